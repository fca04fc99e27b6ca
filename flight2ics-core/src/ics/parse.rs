//! Reading flight invites back using the icalendar crate's parser.

use chrono::{DateTime, Utc};
use icalendar::{
    CalendarDateTime, DatePerhapsTime,
    parser::{Component, read_calendar, unfold},
};
use serde::Serialize;

use crate::error::{Flight2IcsError, Flight2IcsResult};
use crate::ics::date::parse_ics_date;
use crate::ics::escape::unescape_text;

/// The parts of a flight invite worth showing to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlightInvite {
    pub uid: String,
    pub summary: String,
    /// Unescaped, with real line breaks
    pub description: Option<String>,
    pub location: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: Option<String>,
    /// Raw TRIGGER value of the first alarm, e.g. "-PT2H"
    pub alarm_trigger: Option<String>,
}

/// Parse ICS content into a `FlightInvite`.
///
/// Only the first VEVENT is read. DTSTART/DTEND must be UTC date-times.
pub fn parse_invite(content: &str) -> Flight2IcsResult<FlightInvite> {
    let mut unfolded = unfold(content);
    if !unfolded.ends_with('\n') {
        unfolded.push_str("\r\n");
    }

    let calendar = read_calendar(&unfolded).map_err(Flight2IcsError::IcsParse)?;
    let vevent = calendar
        .components
        .iter()
        .find(|c| c.name == "VEVENT")
        .ok_or_else(|| Flight2IcsError::IcsParse("No VEVENT found".into()))?;

    let uid = required_text(vevent, "UID")?;
    let summary = required_text(vevent, "SUMMARY")?;
    let description = optional_text(vevent, "DESCRIPTION");
    let location = optional_text(vevent, "LOCATION");
    let status = vevent.find_prop("STATUS").map(|p| p.val.to_string());
    let start = utc_time(vevent, "DTSTART")?;
    let end = utc_time(vevent, "DTEND")?;

    let alarm_trigger = vevent
        .components
        .iter()
        .find(|c| c.name == "VALARM")
        .and_then(|alarm| alarm.find_prop("TRIGGER"))
        .map(|p| p.val.to_string());

    Ok(FlightInvite {
        uid,
        summary,
        description,
        location,
        start,
        end,
        status,
        alarm_trigger,
    })
}

fn required_text(component: &Component, name: &str) -> Flight2IcsResult<String> {
    optional_text(component, name)
        .ok_or_else(|| Flight2IcsError::IcsParse(format!("Missing {name}")))
}

fn optional_text(component: &Component, name: &str) -> Option<String> {
    component
        .find_prop(name)
        .map(|p| unescape_text(p.val.as_ref()))
}

/// Read a UTC date-time property, falling back to our own format parser.
fn utc_time(component: &Component, name: &str) -> Flight2IcsResult<DateTime<Utc>> {
    let prop = component
        .find_prop(name)
        .ok_or_else(|| Flight2IcsError::IcsParse(format!("Missing {name}")))?;

    match DatePerhapsTime::try_from(prop) {
        Ok(DatePerhapsTime::DateTime(CalendarDateTime::Utc(dt))) => Ok(dt),
        _ => parse_ics_date(prop.val.as_ref()).ok_or_else(|| {
            Flight2IcsError::IcsParse(format!("{name} is not a UTC date-time: {}", prop.val))
        }),
    }
}
