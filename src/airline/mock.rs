//! Hardcoded payloads served when the upstream is unavailable.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use rust_decimal_macros::dec;
use serde_json::Value;

use super::types::{
    Baggage, BookedPassenger, BookedSegment, Booking, BookingDetailsRequest, CityGuide,
    CityGuideRequest, FlightOffer, FlightSearch, FlightState, FlightStatus, FlightStatusRequest,
    Highlight, Promotion, PromotionList, PromotionsRequest, Reward, SearchFlightsRequest,
    StatusEndpoint,
};

const CARRIER: &str = "Turkish Airlines";

/// Static guide data for a known destination.
#[derive(Debug, Clone)]
struct CityProfile {
    highlights: &'static [Highlight],
    flights: &'static str,
    timezone: &'static str,
    currency: &'static str,
    visa_info: &'static str,
}

const GENERIC_HIGHLIGHTS: &[Highlight] = &[
    Highlight {
        title: "Major Attractions",
        description: "Explore iconic landmarks and historical sites",
    },
    Highlight {
        title: "Hotels & Restaurants",
        description: "Premium accommodation and dining options",
    },
    Highlight {
        title: "Transportation",
        description: "Convenient transit options from airport",
    },
    Highlight {
        title: "Weather & Season",
        description: "Best time to visit and climate information",
    },
];

static GENERIC_PROFILE: CityProfile = CityProfile {
    highlights: GENERIC_HIGHLIGHTS,
    flights: "Multiple daily flights from Istanbul",
    timezone: "Local time",
    currency: "Local currency",
    visa_info: "Check requirements at Turkish Airlines website",
};

/// Known destinations keyed by lowercased city name.
static CITY_PROFILES: Lazy<HashMap<&'static str, CityProfile>> = Lazy::new(|| {
    HashMap::from([
        (
            "london",
            CityProfile {
                highlights: &[
                    Highlight {
                        title: "British Museum",
                        description: "World history and culture under one roof, free entry",
                    },
                    Highlight {
                        title: "Tower of London",
                        description: "Medieval fortress and home of the Crown Jewels",
                    },
                    Highlight {
                        title: "West End",
                        description: "Theatre district with nightly musicals and plays",
                    },
                    Highlight {
                        title: "Airport Transfer",
                        description: "Heathrow Express reaches Paddington in 15 minutes",
                    },
                ],
                flights: "Up to 6 daily flights from Istanbul to LHR, LGW and STN",
                timezone: "GMT",
                currency: "GBP",
                visa_info: "Visa or ETA required for most Turkish passport holders",
            },
        ),
        (
            "paris",
            CityProfile {
                highlights: &[
                    Highlight {
                        title: "Eiffel Tower",
                        description: "Book summit tickets in advance during high season",
                    },
                    Highlight {
                        title: "Louvre",
                        description: "The largest art museum in the world",
                    },
                    Highlight {
                        title: "Montmartre",
                        description: "Hilltop village views and the Sacre-Coeur basilica",
                    },
                    Highlight {
                        title: "Airport Transfer",
                        description: "RER B connects CDG with central Paris in 35 minutes",
                    },
                ],
                flights: "Up to 5 daily flights from Istanbul to CDG",
                timezone: "CET",
                currency: "EUR",
                visa_info: "Schengen visa required for most Turkish passport holders",
            },
        ),
        (
            "istanbul",
            CityProfile {
                highlights: &[
                    Highlight {
                        title: "Hagia Sophia",
                        description: "Byzantine landmark at the heart of the old city",
                    },
                    Highlight {
                        title: "Grand Bazaar",
                        description: "One of the oldest covered markets in the world",
                    },
                    Highlight {
                        title: "Bosphorus Cruise",
                        description: "Sail between Europe and Asia in an afternoon",
                    },
                    Highlight {
                        title: "Touristanbul",
                        description: "Free city tour for long layovers at IST",
                    },
                ],
                flights: "Turkish Airlines hub with connections to over 340 destinations",
                timezone: "TRT",
                currency: "TRY",
                visa_info: "e-Visa or visa-free entry depending on nationality",
            },
        ),
    ])
});

fn lookup_city(city: &Value) -> &'static CityProfile {
    city.as_str()
        .map(|name| name.trim().to_lowercase())
        .and_then(|key| CITY_PROFILES.get(key.as_str()))
        .unwrap_or(&GENERIC_PROFILE)
}

fn offer(
    number: &str,
    departure: &str,
    arrival: &str,
    duration: &str,
    price: rust_decimal::Decimal,
    aircraft: &str,
    seats: u32,
) -> FlightOffer {
    FlightOffer {
        id: number.to_string(),
        number: number.to_string(),
        departure: departure.to_string(),
        arrival: arrival.to_string(),
        duration: duration.to_string(),
        price,
        currency: "USD".to_string(),
        airline: CARRIER.to_string(),
        aircraft: aircraft.to_string(),
        seats,
        cabin_class: "Economy".to_string(),
    }
}

/// Three fixed economy flights, whatever the query.
pub fn search_flights(req: &SearchFlightsRequest) -> FlightSearch {
    FlightSearch {
        origin: req.origin.clone(),
        destination: req.destination.clone(),
        date: req.date.clone(),
        passengers: req.passengers.clone(),
        flights: vec![
            offer("TK123", "09:00", "13:35", "4h 35m", dec!(245), "Boeing 777-300ER", 234),
            offer("TK125", "14:00", "18:15", "4h 15m", dec!(198), "Boeing 787-9", 156),
            offer("TK127", "19:30", "23:45", "4h 15m", dec!(189), "Airbus A350", 312),
        ],
    }
}

/// An on-time IST to LHR flight echoing the requested number and date.
pub fn flight_status(req: &FlightStatusRequest) -> FlightStatus {
    FlightStatus {
        flight: req.flight_number.clone(),
        date: req.date.clone(),
        status: FlightState::OnTime,
        departure: StatusEndpoint {
            airport: "IST".to_string(),
            city: "Istanbul".to_string(),
            scheduled: "09:00".to_string(),
            actual: Some("09:05".to_string()),
            estimated: None,
            gate: "B12".to_string(),
        },
        arrival: StatusEndpoint {
            airport: "LHR".to_string(),
            city: "London".to_string(),
            scheduled: "13:35".to_string(),
            actual: None,
            estimated: Some("13:40".to_string()),
            gate: "A5".to_string(),
        },
        aircraft: "Boeing 777-300ER".to_string(),
        operating_airline: CARRIER.to_string(),
    }
}

/// A confirmed single-segment booking for the given PNR and surname.
pub fn booking_details(req: &BookingDetailsRequest) -> Booking {
    Booking {
        pnr: req.pnr.clone(),
        passenger: req.surname.clone(),
        booking_status: "CONFIRMED".to_string(),
        booking_date: "2026-01-15".to_string(),
        flights: vec![BookedSegment {
            number: "TK123".to_string(),
            route: "IST → LHR".to_string(),
            date: "2026-02-15".to_string(),
            departure: "09:00".to_string(),
            arrival: "13:35".to_string(),
            seat: "12A".to_string(),
            seat_class: "Economy".to_string(),
            booking_reference: req.pnr.clone(),
        }],
        passengers: vec![BookedPassenger {
            name: req.surname.clone(),
            kind: "ADT".to_string(),
        }],
        baggage: Baggage {
            checked_bags: 2,
            bag_weight: 23,
            unit: "kg".to_string(),
            carry: "Included".to_string(),
        },
        miles_credited: 3450,
        total_price: dec!(245),
        currency: "USD".to_string(),
    }
}

fn promotion(id: u32, name: &str, reward: Reward, description: &str, until: &str, code: &str) -> Promotion {
    Promotion {
        id,
        name: name.to_string(),
        reward,
        description: description.to_string(),
        valid_from: "2026-02-01".to_string(),
        valid_until: until.to_string(),
        code: code.to_string(),
    }
}

/// Three fixed offers, identical for every country.
pub fn promotions(req: &PromotionsRequest) -> PromotionList {
    PromotionList {
        country: req.country.clone(),
        offers: vec![
            promotion(
                1,
                "Spring Sale",
                Reward::Discount("25% OFF".to_string()),
                "Get 25% discount on selected routes",
                "2026-03-31",
                "SPRING25",
            ),
            promotion(
                2,
                "Miles Multiplier",
                Reward::Bonus("3x miles".to_string()),
                "Earn 3x Miles&Smiles on all bookings",
                "2026-02-28",
                "MILES3X",
            ),
            promotion(
                3,
                "Double Loyalty Points",
                Reward::Bonus("2x points".to_string()),
                "Earn double loyalty points this month",
                "2026-02-14",
                "DOUBLE2X",
            ),
        ],
    }
}

/// Guide for a known city (case-insensitive), or the generic guide.
pub fn city_guide(req: &CityGuideRequest) -> CityGuide {
    let profile = lookup_city(&req.city);

    CityGuide {
        city: req.city.clone(),
        highlights: profile.highlights.to_vec(),
        flights: profile.flights.to_string(),
        timezone: profile.timezone.to_string(),
        currency: profile.currency.to_string(),
        visa_info: profile.visa_info.to_string(),
    }
}
