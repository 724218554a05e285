//! Amadeus Self-Service API client: client-credentials exchange plus the
//! flight-offers search call.

use async_trait::async_trait;
use serde::Deserialize;

use abflug_core::offer::RawOffer;
use abflug_core::provider::{FlightProvider, ProviderError};
use abflug_core::search::SearchQuery;

use crate::app_config::AmadeusConfig;
use crate::token::{CachedToken, TokenCache};

const TOKEN_PATH: &str = "/v1/security/oauth2/token";
const OFFERS_PATH: &str = "/v2/shopping/flight-offers";
const PAGE_SIZE: u32 = 20;

pub struct AmadeusClient {
    http: reqwest::Client,
    base_url: String,
    client_id: String,
    client_secret: String,
    tokens: TokenCache,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct OffersResponse {
    #[serde(default)]
    data: Vec<RawOffer>,
}

impl AmadeusClient {
    pub fn new(config: &AmadeusConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            tokens: TokenCache::new(),
        }
    }

    async fn bearer_token(&self) -> Result<String, ProviderError> {
        self.tokens
            .get_or_refresh(|| self.exchange_credentials())
            .await
    }

    /// Client-credentials grant against the token endpoint.
    async fn exchange_credentials(&self) -> Result<CachedToken, ProviderError> {
        let url = format!("{}{}", self.base_url, TOKEN_PATH);
        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];

        let response = self
            .http
            .post(&url)
            .form(&params)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "credential exchange rejected");
            return Err(ProviderError::Auth {
                status: status.as_u16(),
                body,
            });
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        // A response without a lifetime is cached as already expired, so
        // the next access refreshes again.
        Ok(CachedToken::new(
            token.access_token,
            token.expires_in.unwrap_or(0),
        ))
    }
}

#[async_trait]
impl FlightProvider for AmadeusClient {
    async fn search_offers(&self, query: &SearchQuery) -> Result<Vec<RawOffer>, ProviderError> {
        let token = self.bearer_token().await?;
        let url = format!("{}{}", self.base_url, OFFERS_PATH);

        let mut params: Vec<(&str, String)> = vec![
            ("originLocationCode", query.origin.clone()),
            ("destinationLocationCode", query.destination.clone()),
            ("departureDate", query.depart_date.clone()),
            ("adults", query.adults.to_string()),
            ("currencyCode", query.currency.clone()),
            ("max", PAGE_SIZE.to_string()),
            ("nonStop", "false".to_string()),
        ];
        if let Some(return_date) = &query.return_date {
            params.push(("returnDate", return_date.clone()));
        }

        tracing::debug!(
            origin = %query.origin,
            destination = %query.destination,
            "querying flight offers"
        );

        let response = self
            .http
            .get(&url)
            .bearer_auth(&token)
            .query(&params)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "flight-offer search rejected");
            return Err(ProviderError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let offers: OffersResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        Ok(offers.data)
    }
}
