use async_trait::async_trait;

use crate::offer::RawOffer;
use crate::search::SearchQuery;

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Credential exchange rejected with status {status}")]
    Auth { status: u16, body: String },

    #[error("Flight-offer search rejected with status {status}")]
    Api { status: u16, body: String },

    #[error("Provider unreachable: {0}")]
    Network(String),
}

/// Seam between the HTTP surface and the travel-data provider. The
/// production implementation lives in the provider crate; tests swap in
/// a canned one.
#[async_trait]
pub trait FlightProvider: Send + Sync {
    /// Fetch raw flight offers for a validated search.
    async fn search_offers(&self, query: &SearchQuery) -> Result<Vec<RawOffer>, ProviderError>;
}
