use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// A bookable drop-off/pickup window at one location. Start and end are kept
/// as the "HH:MM" strings the admin entered; parse with [`parse_clock`] before
/// doing arithmetic on them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    pub id: String,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub location: String,
    pub available: bool,
}

impl AvailabilitySlot {
    pub fn start(&self) -> Option<NaiveTime> {
        parse_clock(&self.start_time)
    }
}

/// Accepts both "09:05" and "9:05".
pub fn parse_clock(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M").ok()
}
