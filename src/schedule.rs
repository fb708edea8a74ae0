use chrono::{DateTime, Local};

pub const DAY_SECONDS: i64 = 24 * 3600;

/// Local-zone rendering of an epoch second.
pub fn local_datetime(t: i64) -> DateTime<Local> {
    DateTime::from_timestamp(t, 0)
        .unwrap_or(DateTime::UNIX_EPOCH)
        .with_timezone(&Local)
}

/// Seconds east of UTC for the local zone in effect at `t`.
fn zone_offset(t: i64) -> i64 {
    i64::from(local_datetime(t).offset().local_minus_utc())
}

/// Epoch second of the next local midnight strictly after `t`.
///
/// Shifts `t` by the zone offset so that local midnights lie on
/// multiples of a day, rounds up to the next multiple, and shifts back.
/// In DST-observing zones the gap may be a 23- or 25-hour day.
pub fn next_day(t: i64) -> i64 {
    let offset = zone_offset(t);
    let secs = t + offset;
    secs + (DAY_SECONDS - secs.rem_euclid(DAY_SECONDS)) - offset
}
