pub mod config;
pub mod ics;
pub mod inspect;
pub mod lookup;
pub mod serve;
