use anyhow::Result;
use flight2ics_core::config::Flight2IcsConfig;
use flight2ics_core::lookup::MockFlightLookup;

use crate::server::{self, AppState};

pub async fn run(config: Flight2IcsConfig, lookup: MockFlightLookup, port: u16) -> Result<()> {
    let state = AppState::new(&config, lookup);

    server::serve(state, port).await
}
