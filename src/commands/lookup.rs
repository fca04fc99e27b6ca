use anyhow::Result;
use flight2ics_core::lookup::FlightLookup;

use crate::render::Render;

pub async fn run<L: FlightLookup>(lookup: &L, flight_number: &str) -> Result<()> {
    let flight = lookup.lookup(flight_number).await?;

    println!("{}", flight.render());

    Ok(())
}
