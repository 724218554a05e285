use serde::{Deserialize, Serialize};

use crate::iata;

/// Flight-search request body as received over the wire. Loosely typed;
/// `validate` turns it into an immutable [`SearchQuery`].
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub depart_date: String,
    pub return_date: Option<String>,
    pub adults: Option<u32>,
    pub currency: Option<String>,
    pub max_flight_hours: Option<f64>,
}

/// A validated, immutable flight search. Airport codes are uppercase
/// 3-letter IATA codes and `adults` sits in [1, 9].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub origin: String,
    pub destination: String,
    pub depart_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_date: Option<String>,
    pub adults: u32,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_flight_hours: Option<f64>,
}

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("{0} must be a 3-letter IATA code")]
    BadAirportCode(&'static str),

    #[error("adults must be at least 1")]
    NoPassengers,
}

impl SearchRequest {
    pub fn validate(self) -> Result<SearchQuery, ValidationError> {
        if self.origin.trim().is_empty() {
            return Err(ValidationError::MissingField("origin"));
        }
        if self.destination.trim().is_empty() {
            return Err(ValidationError::MissingField("destination"));
        }
        if self.depart_date.trim().is_empty() {
            return Err(ValidationError::MissingField("departDate"));
        }

        let adults = self.adults.unwrap_or(1);
        if adults == 0 {
            return Err(ValidationError::NoPassengers);
        }

        let origin = iata::normalize_code(&self.origin)
            .ok_or(ValidationError::BadAirportCode("origin"))?;
        let destination = iata::normalize_code(&self.destination)
            .ok_or(ValidationError::BadAirportCode("destination"))?;

        Ok(SearchQuery {
            origin,
            destination,
            depart_date: self.depart_date,
            return_date: self.return_date.filter(|d| !d.trim().is_empty()),
            adults: adults.min(9),
            currency: self
                .currency
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| "EUR".to_string()),
            max_flight_hours: self.max_flight_hours,
        })
    }
}
