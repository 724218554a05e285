use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use chrono::Utc;
use serde::Serialize;

use abflug_core::iata;
use abflug_core::offer::{normalize_offer, within_duration_limit, NormalizedOffer};
use abflug_core::search::{SearchQuery, SearchRequest};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub query: SearchQuery,
    pub fetched_at: String,
    pub count: usize,
    pub results: Vec<NormalizedOffer>,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/flights/search", post(search_flights))
}

/// POST /v1/flights/search
///
/// Validate, check the DACH whitelist, fetch offers from the provider,
/// normalize them, apply the optional duration filter and wrap the lot
/// in the response envelope.
async fn search_flights(
    State(state): State<AppState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    let query = request.validate()?;

    if !iata::is_dach_airport(&query.origin) {
        tracing::info!(origin = %query.origin, "rejected non-DACH departure");
        return Err(AppError::OriginNotAllowed);
    }

    let raw_offers = state.provider.search_offers(&query).await?;

    let results: Vec<NormalizedOffer> = raw_offers
        .iter()
        .map(|raw| normalize_offer(raw, &query.currency))
        .filter(|offer| within_duration_limit(offer, query.max_flight_hours))
        .collect();

    tracing::info!(
        origin = %query.origin,
        destination = %query.destination,
        count = results.len(),
        "flight search completed"
    );

    Ok(Json(SearchResponse {
        fetched_at: Utc::now().to_rfc3339(),
        count: results.len(),
        results,
        query,
    }))
}
