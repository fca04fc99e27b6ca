//! Core types for flight2ics.
//!
//! - `flight` holds the flight data model handed from lookup to the ICS builder
//! - `ics` formats, builds and reads back calendar invites
//! - `lookup` resolves a flight number into a `FlightRecord`

pub mod config;
pub mod error;
pub mod flight;
pub mod ics;
pub mod lookup;

pub use error::{Flight2IcsError, Flight2IcsResult};
pub use flight::{FlightEndpoint, FlightRecord};
