use std::sync::Arc;

use flight2ics_core::config::Flight2IcsConfig;
use flight2ics_core::ics::IcsBuilder;
use flight2ics_core::lookup::MockFlightLookup;

/// Shared application state. Read-only once the server starts.
#[derive(Clone)]
pub struct AppState {
    pub lookup: Arc<MockFlightLookup>,
    pub builder: Arc<IcsBuilder>,
}

impl AppState {
    pub fn new(config: &Flight2IcsConfig, lookup: MockFlightLookup) -> Self {
        AppState {
            lookup: Arc::new(lookup),
            builder: Arc::new(IcsBuilder::new(config.ics.clone())),
        }
    }
}
