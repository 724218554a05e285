pub mod amadeus;
pub mod app_config;
pub mod token;

pub use amadeus::AmadeusClient;
pub use token::{CachedToken, TokenCache};
