//! ICS file generation and parsing.

mod date;
mod escape;
mod generate;
mod parse;

pub use date::{format_ics_date, parse_ics_date};
pub use escape::{MAX_LINE_OCTETS, escape_text, fold_line, unescape_text};
pub use generate::{IcsBuilder, IcsDownload, format_trigger, generate_ics};
pub use parse::{FlightInvite, parse_invite};
