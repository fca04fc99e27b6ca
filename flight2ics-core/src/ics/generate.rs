//! ICS invite generation.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::config::IcsSettings;
use crate::flight::FlightRecord;
use crate::ics::date::format_ics_date;
use crate::ics::escape::{escape_text, fold_line};

/// A finished invite ready to be saved or served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IcsDownload {
    pub content: String,
    pub filename: String,
}

/// Builds single-event calendar documents for flights.
#[derive(Debug, Clone, Default)]
pub struct IcsBuilder {
    settings: IcsSettings,
}

impl IcsBuilder {
    pub fn new(settings: IcsSettings) -> Self {
        IcsBuilder { settings }
    }

    /// Build the invite, stamped with the current time.
    pub fn build(&self, flight: &FlightRecord) -> String {
        self.build_at(flight, Utc::now())
    }

    /// Build the invite as if generated at `generated_at`.
    ///
    /// DTSTAMP and the UID both derive from `generated_at`. Nothing about the
    /// flight is validated; an inconsistent record yields a well-formed but
    /// meaningless document.
    pub fn build_at(&self, flight: &FlightRecord, generated_at: DateTime<Utc>) -> String {
        let settings = &self.settings;

        let flight_number = escape_text(&flight.flight_number);
        let airline = escape_text(&flight.airline);
        let dep_airport = escape_text(&flight.departure.airport);
        let dep_city = escape_text(&flight.departure.city);
        let arr_airport = escape_text(&flight.arrival.airport);
        let arr_city = escape_text(&flight.arrival.city);

        let uid = format!(
            "{}-{}@{}",
            flight.flight_number,
            generated_at.timestamp_millis(),
            settings.uid_domain
        );

        // "\\n" is the two-character escaped line break, not a raw newline
        let description = [
            format!("Flight: {flight_number}"),
            format!("Airline: {airline}"),
            format!("From: {dep_city} ({dep_airport})"),
            format!("To: {arr_city} ({arr_airport})"),
        ]
        .join("\\n");

        let lines = [
            "BEGIN:VCALENDAR".to_string(),
            "VERSION:2.0".to_string(),
            format!("PRODID:{}", settings.prodid),
            "CALSCALE:GREGORIAN".to_string(),
            "METHOD:PUBLISH".to_string(),
            "BEGIN:VEVENT".to_string(),
            format!("UID:{uid}"),
            format!("DTSTAMP:{}", format_ics_date(&generated_at)),
            format!("DTSTART:{}", format_ics_date(&flight.departure.time)),
            format!("DTEND:{}", format_ics_date(&flight.arrival.time)),
            format!("SUMMARY:Flight {flight_number} - {airline}"),
            format!("DESCRIPTION:{description}"),
            format!("LOCATION:{dep_airport} to {arr_airport}"),
            "STATUS:CONFIRMED".to_string(),
            "SEQUENCE:0".to_string(),
            "BEGIN:VALARM".to_string(),
            format!("TRIGGER:{}", format_trigger(settings.alarm_before)),
            "ACTION:DISPLAY".to_string(),
            format!(
                "DESCRIPTION:{}",
                escape_text(&settings.reminder_description)
            ),
            "END:VALARM".to_string(),
            "END:VEVENT".to_string(),
            "END:VCALENDAR".to_string(),
        ];

        log::debug!("Generated invite {} for {}", uid, flight.flight_number);

        if settings.fold_lines {
            lines.iter().map(|l| fold_line(l)).collect::<Vec<_>>().join("\r\n")
        } else {
            lines.join("\r\n")
        }
    }

    /// Build the invite together with its suggested filename.
    pub fn download(&self, flight: &FlightRecord) -> IcsDownload {
        IcsDownload {
            content: self.build(flight),
            filename: flight.ics_filename(),
        }
    }
}

/// Generate an invite with the default settings.
pub fn generate_ics(flight: &FlightRecord) -> String {
    IcsBuilder::default().build(flight)
}

/// Render a "fire before start" alarm offset as an RFC 5545 duration, e.g. `-PT2H`.
pub fn format_trigger(before: Duration) -> String {
    let total = before.as_secs();
    let days = total / 86_400;
    let hours = total % 86_400 / 3600;
    let minutes = total % 3600 / 60;
    let seconds = total % 60;

    let mut trigger = String::from("-P");
    if days > 0 {
        trigger.push_str(&format!("{days}D"));
    }
    if hours > 0 || minutes > 0 || seconds > 0 || days == 0 {
        trigger.push('T');
        if hours > 0 {
            trigger.push_str(&format!("{hours}H"));
        }
        if minutes > 0 {
            trigger.push_str(&format!("{minutes}M"));
        }
        if seconds > 0 || total == 0 {
            trigger.push_str(&format!("{seconds}S"));
        }
    }

    trigger
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flight::tests::make_test_flight;
    use chrono::TimeZone;

    fn generated_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 8, 30, 15).unwrap()
    }

    #[test]
    fn test_generate_ics_example_flight() {
        let ics = IcsBuilder::default().build_at(&make_test_flight(), generated_at());
        let lines: Vec<&str> = ics.split("\r\n").collect();

        assert!(lines.contains(&"DTSTART:20240610T100000Z"));
        assert!(lines.contains(&"DTEND:20240610T130000Z"));
        assert!(lines.contains(&"SUMMARY:Flight AA123 - American Airlines"));
        assert!(lines.contains(&"LOCATION:JFK to LAX"));
        assert!(lines.contains(&"DTSTAMP:20240601T083015Z"));
    }

    #[test]
    fn test_generate_ics_exact_document() {
        let at = generated_at();
        let ics = IcsBuilder::default().build_at(&make_test_flight(), at);

        let expected = format!(
            "BEGIN:VCALENDAR\r\n\
             VERSION:2.0\r\n\
             PRODID:-//flight2ics//Flight Calendar//EN\r\n\
             CALSCALE:GREGORIAN\r\n\
             METHOD:PUBLISH\r\n\
             BEGIN:VEVENT\r\n\
             UID:AA123-{millis}@flight2ics.app\r\n\
             DTSTAMP:20240601T083015Z\r\n\
             DTSTART:20240610T100000Z\r\n\
             DTEND:20240610T130000Z\r\n\
             SUMMARY:Flight AA123 - American Airlines\r\n\
             DESCRIPTION:Flight: AA123\\nAirline: American Airlines\\nFrom: New York (JFK)\\nTo: Los Angeles (LAX)\r\n\
             LOCATION:JFK to LAX\r\n\
             STATUS:CONFIRMED\r\n\
             SEQUENCE:0\r\n\
             BEGIN:VALARM\r\n\
             TRIGGER:-PT2H\r\n\
             ACTION:DISPLAY\r\n\
             DESCRIPTION:Flight Reminder\r\n\
             END:VALARM\r\n\
             END:VEVENT\r\n\
             END:VCALENDAR",
            millis = at.timestamp_millis()
        );

        assert_eq!(ics, expected);
    }

    #[test]
    fn test_lines_are_crlf_terminated() {
        let ics = generate_ics(&make_test_flight());

        assert!(!ics.replace("\r\n", "").contains('\n'), "bare LF in output");
        assert!(!ics.replace("\r\n", "").contains('\r'), "bare CR in output");
        assert!(ics.ends_with("END:VCALENDAR"));
    }

    #[test]
    fn test_description_uses_escaped_newlines() {
        let ics = generate_ics(&make_test_flight());
        let description = ics
            .split("\r\n")
            .find(|l| l.starts_with("DESCRIPTION:Flight:"))
            .expect("Should have flight DESCRIPTION line");

        assert_eq!(description.matches("\\n").count(), 3);
    }

    #[test]
    fn test_single_event_and_alarm_nested() {
        let ics = generate_ics(&make_test_flight());
        let lines: Vec<&str> = ics.split("\r\n").collect();
        let position = |needle: &str| {
            assert_eq!(lines.iter().filter(|l| **l == needle).count(), 1, "{needle}");
            lines.iter().position(|l| *l == needle).unwrap()
        };

        let begin_event = position("BEGIN:VEVENT");
        let begin_alarm = position("BEGIN:VALARM");
        let end_alarm = position("END:VALARM");
        let end_event = position("END:VEVENT");

        assert!(position("BEGIN:VCALENDAR") < begin_event);
        assert!(begin_event < begin_alarm);
        assert!(begin_alarm < end_alarm);
        assert!(end_alarm < end_event);
        assert!(end_event < position("END:VCALENDAR"));
    }

    #[test]
    fn test_uid_differs_between_flights_at_same_moment() {
        let builder = IcsBuilder::default();
        let mut other = make_test_flight();
        other.flight_number = "UA456".to_string();

        let uid = |ics: &str| {
            ics.split("\r\n")
                .find(|l| l.starts_with("UID:"))
                .unwrap()
                .to_string()
        };

        let a = uid(&builder.build_at(&make_test_flight(), generated_at()));
        let b = uid(&builder.build_at(&other, generated_at()));
        assert_ne!(a, b);
    }

    #[test]
    fn test_repeated_builds_differ_only_in_stamp_and_uid() {
        let builder = IcsBuilder::default();
        let flight = make_test_flight();
        let first = builder.build_at(&flight, generated_at());
        let second = builder.build_at(&flight, generated_at() + chrono::Duration::milliseconds(1500));

        let differing: Vec<(&str, &str)> = first
            .split("\r\n")
            .zip(second.split("\r\n"))
            .filter(|(a, b)| a != b)
            .collect();

        assert_eq!(differing.len(), 2, "{differing:?}");
        assert!(differing[0].0.starts_with("UID:"));
        assert!(differing[1].0.starts_with("DTSTAMP:"));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let mut flight = make_test_flight();
        flight.airline = "Fly, Inc; Ltd".to_string();

        let ics = IcsBuilder::default().build_at(&flight, generated_at());

        assert!(ics.contains("SUMMARY:Flight AA123 - Fly\\, Inc\\; Ltd\r\n"));
    }

    #[test]
    fn test_carriage_returns_in_text_never_reach_the_output() {
        let mut flight = make_test_flight();
        flight.departure.city = "New\rYork".to_string();

        let ics = IcsBuilder::default().build_at(&flight, generated_at());

        assert!(ics.contains("From: New\\nYork (JFK)"));
        assert!(!ics.replace("\r\n", "").contains('\r'), "bare CR in:\n{ics}");
    }

    #[test]
    fn test_inconsistent_flight_still_builds() {
        let mut flight = make_test_flight();
        std::mem::swap(&mut flight.departure.time, &mut flight.arrival.time);
        flight.airline = String::new();

        let ics = IcsBuilder::default().build_at(&flight, generated_at());

        assert!(ics.contains("DTSTART:20240610T130000Z"));
        assert!(ics.contains("DTEND:20240610T100000Z"));
        assert!(ics.contains("SUMMARY:Flight AA123 - \r\n"));
    }

    #[test]
    fn test_custom_settings() {
        let settings = IcsSettings {
            prodid: "-//Test//Test//EN".to_string(),
            uid_domain: "example.com".to_string(),
            alarm_before: Duration::from_secs(30 * 60),
            reminder_description: "Leave for the airport".to_string(),
            fold_lines: false,
        };

        let ics = IcsBuilder::new(settings).build_at(&make_test_flight(), generated_at());

        assert!(ics.contains("PRODID:-//Test//Test//EN\r\n"));
        assert!(ics.contains("@example.com\r\n"));
        assert!(ics.contains("TRIGGER:-PT30M\r\n"));
        assert!(ics.contains("DESCRIPTION:Leave for the airport\r\n"));
    }

    #[test]
    fn test_folded_output_unfolds_to_plain_output() {
        let mut flight = make_test_flight();
        flight.airline = "An Extremely Long Airline Name That Keeps Going And Going".to_string();
        let folding = IcsSettings {
            fold_lines: true,
            ..IcsSettings::default()
        };

        let plain = IcsBuilder::default().build_at(&flight, generated_at());
        let folded = IcsBuilder::new(folding).build_at(&flight, generated_at());

        assert_ne!(plain, folded);
        assert!(folded.split("\r\n").all(|l| l.len() <= 75));
        assert_eq!(folded.replace("\r\n ", ""), plain);
    }

    #[test]
    fn test_download_filename() {
        let download = IcsBuilder::default().download(&make_test_flight());

        assert_eq!(download.filename, "flight-AA123.ics");
        assert!(download.content.starts_with("BEGIN:VCALENDAR\r\n"));
    }

    #[test]
    fn test_format_trigger() {
        assert_eq!(format_trigger(Duration::from_secs(2 * 3600)), "-PT2H");
        assert_eq!(format_trigger(Duration::from_secs(30 * 60)), "-PT30M");
        assert_eq!(format_trigger(Duration::from_secs(90 * 60)), "-PT1H30M");
        assert_eq!(format_trigger(Duration::from_secs(86_400)), "-P1D");
        assert_eq!(format_trigger(Duration::from_secs(86_400 + 3600)), "-P1DT1H");
        assert_eq!(format_trigger(Duration::from_millis(45_500)), "-PT45S");
        assert_eq!(format_trigger(Duration::ZERO), "-PT0S");
    }
}
