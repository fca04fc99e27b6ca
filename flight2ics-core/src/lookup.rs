//! Flight lookup.
//!
//! `FlightLookup` is the seam a real flight-data source would plug into.
//! `MockFlightLookup` fabricates a plausible record for any well-formed
//! flight number.

use std::future::Future;
use std::sync::LazyLock;
use std::time::Duration;

use chrono::{DateTime, Days, Local, NaiveTime, TimeZone, Utc};
use regex::Regex;

use crate::config::LookupSettings;
use crate::error::{Flight2IcsError, Flight2IcsResult};
use crate::flight::{FlightEndpoint, FlightRecord};

/// Two-letter airline code followed by the flight's digits
static FLIGHT_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z]{2})([0-9]+)$").expect("valid flight number regex"));

const AIRLINES: &[(&str, &str)] = &[
    ("AA", "American Airlines"),
    ("UA", "United Airlines"),
    ("DL", "Delta Air Lines"),
    ("BA", "British Airways"),
    ("LH", "Lufthansa"),
    ("AF", "Air France"),
    ("KL", "KLM"),
    ("EK", "Emirates"),
    ("QF", "Qantas"),
    ("SQ", "Singapore Airlines"),
];

const DAYS_UNTIL_DEPARTURE: u64 = 7;
const DEPARTURE_HOUR: u32 = 10;
const FLIGHT_HOURS: i64 = 3;

/// Resolves a flight number into flight details.
pub trait FlightLookup: Send + Sync {
    fn lookup(
        &self,
        flight_number: &str,
    ) -> impl Future<Output = Flight2IcsResult<FlightRecord>> + Send;
}

/// Split a flight number into its upper-cased airline code and digits.
pub fn parse_flight_number(input: &str) -> Flight2IcsResult<(String, String)> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Flight2IcsError::EmptyFlightNumber);
    }

    let captures = FLIGHT_NUMBER
        .captures(trimmed)
        .ok_or_else(|| Flight2IcsError::InvalidFlightNumber {
            input: trimmed.to_string(),
        })?;

    Ok((captures[1].to_uppercase(), captures[2].to_string()))
}

/// Display name for an airline code; unknown codes get a generic name.
pub fn airline_name(code: &str) -> String {
    AIRLINES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| format!("{code} Airlines"))
}

/// Placeholder data source: every flight goes JFK → LAX a week from now.
#[derive(Debug, Clone, Default)]
pub struct MockFlightLookup {
    latency: Duration,
}

impl MockFlightLookup {
    pub fn new(settings: &LookupSettings) -> Self {
        MockFlightLookup {
            latency: settings.latency,
        }
    }

    /// Build the mock record relative to `now`, in `now`'s timezone.
    ///
    /// Departure is seven days after `now`'s calendar date at 10:00 local
    /// time; the flight lasts three hours.
    pub fn lookup_at<Tz: TimeZone>(
        &self,
        flight_number: &str,
        now: &DateTime<Tz>,
    ) -> Flight2IcsResult<FlightRecord> {
        let (code, digits) = parse_flight_number(flight_number)?;

        let departure_date = now.date_naive() + Days::new(DAYS_UNTIL_DEPARTURE);
        let departure_local = departure_date.and_time(
            NaiveTime::from_hms_opt(DEPARTURE_HOUR, 0, 0).unwrap_or(NaiveTime::MIN),
        );
        let departure_time = match now.timezone().from_local_datetime(&departure_local).earliest() {
            Some(dt) => dt.with_timezone(&Utc),
            None => departure_local.and_utc(),
        };
        let arrival_time = departure_time + chrono::Duration::hours(FLIGHT_HOURS);

        Ok(FlightRecord {
            flight_number: format!("{code}{digits}"),
            airline: airline_name(&code),
            departure: FlightEndpoint {
                airport: "JFK".to_string(),
                city: "New York".to_string(),
                time: departure_time,
            },
            arrival: FlightEndpoint {
                airport: "LAX".to_string(),
                city: "Los Angeles".to_string(),
                time: arrival_time,
            },
        })
    }
}

impl FlightLookup for MockFlightLookup {
    fn lookup(
        &self,
        flight_number: &str,
    ) -> impl Future<Output = Flight2IcsResult<FlightRecord>> + Send {
        let flight_number = flight_number.to_string();
        let latency = self.latency;

        async move {
            log::debug!("Looking up {flight_number} (simulated latency {latency:?})");

            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }

            let record = self.lookup_at(&flight_number, &Local::now())?;
            log::debug!(
                "Found {} ({}) departing {}",
                record.flight_number,
                record.airline,
                record.departure.time
            );
            Ok(record)
        }
    }
}
