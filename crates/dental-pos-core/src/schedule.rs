//! Temporal normalization: time-of-day labels, canonical timestamps, day
//! buckets, and booking slot generation.
//!
//! Every function here is total. Malformed input degrades to a safe default
//! (the opening slot for times, `Upcoming` for dates) instead of erroring,
//! because dirty data must never take the demo UI down.

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::models::DayBucket;

/// Office opening time, minutes from midnight (9:00 AM).
pub const OPENING_MINUTES: i64 = 9 * 60;

/// Office closing time, minutes from midnight (5:00 PM).
pub const CLOSING_MINUTES: i64 = 17 * 60;

/// Wire format of the canonical appointment timestamp.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Wire format of calendar dates.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// The fallback slot used when a time label is missing or malformed.
pub fn default_time() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).expect("valid opening time")
}

/// Parse a human time-of-day label.
///
/// Accepts a 12-hour clock with AM/PM suffix ("9:30 AM", "12:00 pm") and a
/// 24-hour "HH:MM" clock. 12 AM rolls to hour 0 and 12 PM stays 12. Anything
/// unparseable falls back to the opening slot.
pub fn parse_time_label(label: &str) -> NaiveTime {
    try_parse_time_label(label).unwrap_or_else(default_time)
}

fn try_parse_time_label(label: &str) -> Option<NaiveTime> {
    let label = label.trim();
    let mut parts = label.split_whitespace();
    let clock = parts.next()?;
    let meridiem = parts.next();
    if parts.next().is_some() {
        return None;
    }

    let (hour_str, minute_str) = clock.split_once(':')?;
    let hour: u32 = hour_str.parse().ok()?;
    let minute: u32 = minute_str.parse().ok()?;

    let hour = match meridiem {
        Some(m) if m.eq_ignore_ascii_case("am") => {
            if hour == 12 {
                0
            } else {
                hour
            }
        }
        Some(m) if m.eq_ignore_ascii_case("pm") => {
            if hour == 12 {
                12
            } else {
                hour + 12
            }
        }
        Some(_) => return None,
        None => hour,
    };

    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Format a time as the 12-hour label the booking UI shows ("9:30 AM").
///
/// Exact inverse of [`parse_time_label`] for any time the slot generator can
/// produce.
pub fn format_time_label(time: NaiveTime) -> String {
    let hour24 = time.hour();
    let hour12 = (hour24 + 11) % 12 + 1;
    let meridiem = if hour24 >= 12 { "PM" } else { "AM" };
    format!("{}:{:02} {}", hour12, time.minute(), meridiem)
}

/// Parse a "YYYY-MM-DD" date. `None` for anything else.
pub fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), DATE_FORMAT).ok()
}

/// Format a date in the wire format.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Combine a wire date and a time label into a canonical timestamp.
/// `None` when the date does not parse; the time degrades per
/// [`parse_time_label`].
pub fn to_timestamp(date: &str, time_label: &str) -> Option<NaiveDateTime> {
    Some(parse_date(date)?.and_time(parse_time_label(time_label)))
}

/// Parse a canonical "YYYY-MM-DDTHH:MM:SS" timestamp.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), TIMESTAMP_FORMAT).ok()
}

/// Format a canonical timestamp for the wire.
pub fn format_timestamp(timestamp: NaiveDateTime) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

/// Split a canonical timestamp back into `(wire date, time label)`.
pub fn split_timestamp(timestamp: NaiveDateTime) -> (String, String) {
    (
        format_date(timestamp.date()),
        format_time_label(timestamp.time()),
    )
}

/// Classify a wire date against a reference day.
///
/// Calendar-day difference of 0 is today, +1 tomorrow, negative past, and
/// everything else (including unparseable dates) upcoming.
pub fn day_bucket_on(date: &str, today: NaiveDate) -> DayBucket {
    let Some(parsed) = parse_date(date) else {
        return DayBucket::Upcoming;
    };
    match (parsed - today).num_days() {
        0 => DayBucket::Today,
        1 => DayBucket::Tomorrow,
        d if d < 0 => DayBucket::Past,
        _ => DayBucket::Upcoming,
    }
}

/// Classify a wire date against the current local day.
pub fn day_bucket(date: &str) -> DayBucket {
    day_bucket_on(date, Local::now().date_naive())
}

/// Enumerate the bookable start-time labels for a slot duration, from the
/// opening time up to the last slot that still ends by closing.
///
/// Deterministic for a given duration; regenerated on every call. A
/// non-positive duration falls back to 30 minutes.
pub fn time_slots(duration_minutes: i64) -> Vec<String> {
    let duration = if duration_minutes > 0 {
        duration_minutes
    } else {
        30
    };

    let mut slots = Vec::new();
    let mut minutes = OPENING_MINUTES;
    while minutes <= CLOSING_MINUTES - duration {
        let time = NaiveTime::from_hms_opt((minutes / 60) as u32, (minutes % 60) as u32, 0)
            .expect("slot within the day");
        slots.push(format_time_label(time));
        minutes += duration;
    }
    slots
}
