use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::models::{parse_clock, AvailabilitySlot};

/// Open slots at one location, soonest first.
pub fn slots_for_location<'a>(
    slots: &'a [AvailabilitySlot],
    location: &str,
) -> Vec<&'a AvailabilitySlot> {
    let mut out: Vec<&AvailabilitySlot> = slots
        .iter()
        .filter(|s| s.available && s.location == location)
        .collect();
    out.sort_by_key(|s| (s.date, s.start()));
    out
}

/// Distinct days with at least one open slot, today or later, ascending.
pub fn dates_for_location(
    slots: &[AvailabilitySlot],
    location: &str,
    today: NaiveDate,
) -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = slots
        .iter()
        .filter(|s| s.available && s.location == location && s.date >= today)
        .map(|s| s.date)
        .collect();
    dates.sort();
    dates.dedup();
    dates
}

/// Open slots at a location on one day. On the current day, slots whose start
/// is not strictly after `now` are dropped; a slot starting at exactly the
/// current minute can no longer be taken. Slots with unparseable times are
/// dropped with the same rule.
pub fn slots_for_date<'a>(
    slots: &'a [AvailabilitySlot],
    location: &str,
    date: NaiveDate,
    now: NaiveDateTime,
) -> Vec<&'a AvailabilitySlot> {
    let mut out: Vec<&AvailabilitySlot> = slots
        .iter()
        .filter(|s| s.available && s.location == location && s.date == date)
        .filter(|s| {
            if date != now.date() {
                return true;
            }
            match s.start() {
                Some(start) => start > now.time(),
                None => false,
            }
        })
        .collect();
    out.sort_by_key(|s| s.start());
    out
}

/// Sequential "HH:MM - HH:MM" display labels slicing a slot into half-hour
/// windows; the final window is shorter when the slot length is not a
/// multiple of 30 minutes. Unparseable or inverted bounds yield no windows.
pub fn thirty_minute_windows(start: &str, end: &str) -> Vec<String> {
    let (Some(start), Some(end)) = (parse_clock(start), parse_clock(end)) else {
        return Vec::new();
    };

    let mut windows = Vec::new();
    let mut cursor = start;
    while cursor < end {
        let (candidate, wrapped) = cursor.overflowing_add_signed(Duration::minutes(30));
        let next = if wrapped != 0 || candidate > end || candidate <= cursor {
            end
        } else {
            candidate
        };
        windows.push(format!(
            "{} - {}",
            cursor.format("%H:%M"),
            next.format("%H:%M")
        ));
        cursor = next;
    }
    windows
}
