use std::net::SocketAddr;
use std::sync::Arc;

use abflug_api::{app, AppState};
use abflug_provider::amadeus::AmadeusClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "abflug_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = abflug_provider::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting Abflug API on port {}", config.server.port);

    let provider = Arc::new(AmadeusClient::new(&config.amadeus));
    let app_state = AppState { provider };

    let app = app(app_state, &config.cors);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
