//! Provider offer records and their normalization into the flat result
//! shape served to callers.

use serde::{Deserialize, Serialize};

use crate::duration::{parse_duration_hours, round_tenth};

// ============================================================================
// Raw provider shapes
// ============================================================================

// Everything below is optional or defaulted so a sparse provider record
// degrades to absent fields instead of failing deserialization.

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOffer {
    pub price: Option<RawPrice>,
    #[serde(default)]
    pub itineraries: Vec<RawItinerary>,
    #[serde(default)]
    pub validating_airline_codes: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPrice {
    pub total: Option<String>,
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawItinerary {
    pub duration: Option<String>,
    #[serde(default)]
    pub segments: Vec<RawSegment>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSegment {
    pub departure: Option<RawEndpoint>,
    pub arrival: Option<RawEndpoint>,
    pub carrier_code: Option<String>,
    pub number: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEndpoint {
    pub iata_code: Option<String>,
    pub at: Option<String>,
}

// ============================================================================
// Normalized result shapes
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedOffer {
    pub price: Option<String>,
    pub currency: String,
    pub total_duration_hours: f64,
    pub itineraries: Vec<Itinerary>,
    pub airlines: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    pub duration_hours: f64,
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub from: Option<String>,
    pub to: Option<String>,
    pub depart: Option<String>,
    pub arrive: Option<String>,
    pub carrier: Option<String>,
    pub number: Option<String>,
}

/// Flatten one raw provider offer. Pure and total: missing nested fields
/// become `None`, the currency falls back to the one requested in the
/// search.
pub fn normalize_offer(raw: &RawOffer, fallback_currency: &str) -> NormalizedOffer {
    let itineraries: Vec<Itinerary> = raw
        .itineraries
        .iter()
        .map(|it| Itinerary {
            duration_hours: parse_duration_hours(it.duration.as_deref()),
            segments: it
                .segments
                .iter()
                .map(|seg| Segment {
                    from: seg.departure.as_ref().and_then(|e| e.iata_code.clone()),
                    to: seg.arrival.as_ref().and_then(|e| e.iata_code.clone()),
                    depart: seg.departure.as_ref().and_then(|e| e.at.clone()),
                    arrive: seg.arrival.as_ref().and_then(|e| e.at.clone()),
                    carrier: seg.carrier_code.clone(),
                    number: seg.number.clone(),
                })
                .collect(),
        })
        .collect();

    // Validating airlines first, then every segment carrier, first
    // occurrence wins.
    let mut airlines: Vec<String> = Vec::new();
    let declared = raw.validating_airline_codes.iter().cloned();
    let carriers = raw
        .itineraries
        .iter()
        .flat_map(|it| it.segments.iter())
        .filter_map(|seg| seg.carrier_code.clone());
    for code in declared.chain(carriers) {
        if !code.is_empty() && !airlines.contains(&code) {
            airlines.push(code);
        }
    }

    let total: f64 = itineraries.iter().map(|it| it.duration_hours).sum();

    NormalizedOffer {
        price: raw.price.as_ref().and_then(|p| p.total.clone()),
        currency: raw
            .price
            .as_ref()
            .and_then(|p| p.currency.clone())
            .unwrap_or_else(|| fallback_currency.to_string()),
        total_duration_hours: round_tenth(total),
        itineraries,
        airlines,
    }
}

/// Offer survives the optional duration filter: always when no positive
/// limit was supplied, otherwise iff its total duration fits.
pub fn within_duration_limit(offer: &NormalizedOffer, max_hours: Option<f64>) -> bool {
    match max_hours {
        Some(limit) if limit > 0.0 => offer.total_duration_hours <= limit,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(json: serde_json::Value) -> RawOffer {
        serde_json::from_value(json).expect("Failed to deserialize raw offer")
    }

    fn round_trip_offer() -> RawOffer {
        raw(serde_json::json!({
            "price": { "total": "412.30", "currency": "EUR" },
            "validatingAirlineCodes": ["LH"],
            "itineraries": [
                {
                    "duration": "PT8H30M",
                    "segments": [
                        {
                            "departure": { "iataCode": "FRA", "at": "2025-06-01T10:00:00" },
                            "arrival": { "iataCode": "JFK", "at": "2025-06-01T18:30:00" },
                            "carrierCode": "LH",
                            "number": "400"
                        }
                    ]
                },
                {
                    "duration": "PT7H45M",
                    "segments": [
                        {
                            "departure": { "iataCode": "JFK", "at": "2025-06-10T19:00:00" },
                            "arrival": { "iataCode": "FRA", "at": "2025-06-11T08:45:00" },
                            "carrierCode": "UA",
                            "number": "961"
                        }
                    ]
                }
            ]
        }))
    }

    #[test]
    fn test_normalizes_full_offer() {
        let offer = normalize_offer(&round_trip_offer(), "EUR");

        assert_eq!(offer.price.as_deref(), Some("412.30"));
        assert_eq!(offer.currency, "EUR");
        assert_eq!(offer.itineraries.len(), 2);
        assert_eq!(offer.itineraries[0].duration_hours, 8.5);
        assert_eq!(offer.itineraries[1].duration_hours, 7.8);
        // 8.5 + 7.8 summed, then re-rounded
        assert_eq!(offer.total_duration_hours, 16.3);
        assert_eq!(offer.airlines, vec!["LH", "UA"]);

        let outbound = &offer.itineraries[0].segments[0];
        assert_eq!(outbound.from.as_deref(), Some("FRA"));
        assert_eq!(outbound.to.as_deref(), Some("JFK"));
        assert_eq!(outbound.carrier.as_deref(), Some("LH"));
        assert_eq!(outbound.number.as_deref(), Some("400"));
    }

    #[test]
    fn test_empty_offer_degrades_to_absent_fields() {
        let offer = normalize_offer(&raw(serde_json::json!({})), "CHF");

        assert_eq!(offer.price, None);
        assert_eq!(offer.currency, "CHF");
        assert_eq!(offer.total_duration_hours, 0.0);
        assert!(offer.itineraries.is_empty());
        assert!(offer.airlines.is_empty());
    }

    #[test]
    fn test_missing_nested_fields_become_none() {
        let offer = normalize_offer(
            &raw(serde_json::json!({
                "itineraries": [
                    { "segments": [ { "departure": { "iataCode": "VIE" } } ] }
                ]
            })),
            "EUR",
        );

        let segment = &offer.itineraries[0].segments[0];
        assert_eq!(segment.from.as_deref(), Some("VIE"));
        assert_eq!(segment.depart, None);
        assert_eq!(segment.to, None);
        assert_eq!(segment.arrive, None);
        assert_eq!(segment.carrier, None);
        assert_eq!(offer.itineraries[0].duration_hours, 0.0);
    }

    #[test]
    fn test_currency_falls_back_to_requested() {
        let offer = normalize_offer(
            &raw(serde_json::json!({ "price": { "total": "99.00" } })),
            "USD",
        );
        assert_eq!(offer.price.as_deref(), Some("99.00"));
        assert_eq!(offer.currency, "USD");
    }

    #[test]
    fn test_airlines_deduplicated_in_first_occurrence_order() {
        let offer = normalize_offer(
            &raw(serde_json::json!({
                "validatingAirlineCodes": ["OS", ""],
                "itineraries": [
                    { "segments": [
                        { "carrierCode": "LH" },
                        { "carrierCode": "OS" },
                        { "carrierCode": "LH" }
                    ]}
                ]
            })),
            "EUR",
        );
        assert_eq!(offer.airlines, vec!["OS", "LH"]);
    }

    #[test]
    fn test_duration_filter() {
        let mut offer = normalize_offer(&round_trip_offer(), "EUR");
        offer.total_duration_hours = 16.3;

        assert!(within_duration_limit(&offer, None));
        assert!(within_duration_limit(&offer, Some(0.0)));
        assert!(within_duration_limit(&offer, Some(-2.0)));
        assert!(within_duration_limit(&offer, Some(16.3)));
        assert!(!within_duration_limit(&offer, Some(16.2)));
    }
}
