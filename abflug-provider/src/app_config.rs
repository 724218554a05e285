use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub amadeus: AmadeusConfig,
    #[serde(default)]
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AmadeusConfig {
    pub client_id: String,
    pub client_secret: String,
    #[serde(default)]
    pub environment: Environment,
    /// Overrides the environment-derived host; only set in tests.
    #[serde(default)]
    pub base_url: Option<String>,
}

/// Which Amadeus deployment to talk to.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Test,
    Production,
}

impl Environment {
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Test => "https://test.api.amadeus.com",
            Environment::Production => "https://api.amadeus.com",
        }
    }
}

impl AmadeusConfig {
    pub fn base_url(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| self.environment.base_url().to_string())
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CorsConfig {
    /// Browser origins allowed to call the API. Empty means any origin.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Optional per-environment and local overrides
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `ABFLUG__AMADEUS__CLIENT_ID=...`
            .add_source(config::Environment::with_prefix("ABFLUG").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
