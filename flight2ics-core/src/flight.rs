//! Flight data model.
//!
//! A `FlightRecord` is produced by a lookup and consumed by the ICS builder.
//! It is a plain data-transfer value: nothing here validates that the
//! arrival comes after the departure.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// One end of a flight (departure or arrival).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightEndpoint {
    /// IATA airport code, e.g. "JFK"
    pub airport: String,
    pub city: String,
    pub time: DateTime<Utc>,
}

/// A single flight as returned by a lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightRecord {
    /// Airline code followed by digits, e.g. "AA123"
    pub flight_number: String,
    pub airline: String,
    pub departure: FlightEndpoint,
    pub arrival: FlightEndpoint,
}

impl FlightRecord {
    /// Scheduled time in the air. Negative if the record is inconsistent.
    pub fn duration(&self) -> Duration {
        self.arrival.time - self.departure.time
    }

    /// Suggested filename for the calendar invite of this flight.
    pub fn ics_filename(&self) -> String {
        format!("flight-{}.ics", self.flight_number)
    }
}
