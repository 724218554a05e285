use std::sync::Arc;

use abflug_core::provider::FlightProvider;

#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn FlightProvider>,
}
