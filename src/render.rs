//! Terminal rendering for flight2ics-core types.

use chrono::{DateTime, Local, TimeZone, Utc};
use flight2ics_core::FlightRecord;
use flight2ics_core::ics::FlightInvite;
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

const LABEL_WIDTH: usize = 11;

fn row(label: &str, value: &str) -> String {
    let label = format!("{:<LABEL_WIDTH$}", format!("{label}:"));
    format!("  {} {}", label.dimmed(), value)
}

/// e.g. "Mon, Jun 10, 2024, 10:00 AM"
pub fn format_time<Tz: TimeZone>(time: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    time.with_timezone(tz)
        .format("%a, %b %-d, %Y, %I:%M %p")
        .to_string()
}

pub fn format_local_time(time: &DateTime<Utc>) -> String {
    format_time(time, &Local)
}

impl Render for FlightRecord {
    fn render(&self) -> String {
        [
            format!("✈️  {}", self.flight_number.bold()),
            row("Flight", &self.flight_number),
            row("Airline", &self.airline),
            row(
                "From",
                &format!("{} ({})", self.departure.city, self.departure.airport),
            ),
            row("Departure", &format_local_time(&self.departure.time)),
            row(
                "To",
                &format!("{} ({})", self.arrival.city, self.arrival.airport),
            ),
            row("Arrival", &format_local_time(&self.arrival.time)),
        ]
        .join("\n")
    }
}

impl Render for FlightInvite {
    fn render(&self) -> String {
        let mut lines = vec![
            format!("📅 {}", self.summary.bold()),
            row("Starts", &format_local_time(&self.start)),
            row("Ends", &format_local_time(&self.end)),
        ];

        if let Some(location) = &self.location {
            lines.push(row("Location", location));
        }
        if let Some(trigger) = &self.alarm_trigger {
            lines.push(row("Reminder", trigger));
        }
        lines.push(row("UID", &self.uid.dimmed().to_string()));

        if let Some(description) = &self.description {
            lines.push(String::new());
            lines.extend(description.lines().map(|l| format!("  {l}")));
        }

        lines.join("\n")
    }
}
