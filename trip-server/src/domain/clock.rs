//! Wall-clock time strings from the timetable.
//!
//! Schedule files carry times as `HH:MM` or `HH:MM:SS` strings with no
//! date attached. Hours may exceed 23 for journeys that run past midnight.
//! Everything here degrades to `None` (or the unchanged input) on malformed
//! strings instead of failing, since one bad timestamp must not abort a query.

use chrono::Duration;

/// Seconds in one day.
pub const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Minutes in one day.
pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// Sort key used in place of a missing departure time.
///
/// Compares greater than any real `HH:MM[:SS]` string.
pub const MISSING_TIME_SORT_KEY: &str = "99:99:99";

/// Split a time string into hours, minutes and the raw seconds text.
///
/// Returns `None` unless there are exactly two or three `:`-separated
/// fields with integer hours and minutes.
fn fields(s: &str) -> Option<(i64, i64, Option<&str>)> {
    let parts: Vec<&str> = s.split(':').collect();
    match parts.as_slice() {
        [h, m] => Some((h.parse().ok()?, m.parse().ok()?, None)),
        [h, m, sec] => Some((h.parse().ok()?, m.parse().ok()?, Some(*sec))),
        _ => None,
    }
}

/// `h * 60 + m`, or `None` on overflow.
fn total_minutes(h: i64, m: i64) -> Option<i64> {
    h.checked_mul(60)?.checked_add(m)
}

/// Convert `HH:MM` or `HH:MM:SS` to seconds since midnight.
///
/// `HH:MM` is read as `HH:MM:00`.
///
/// # Examples
///
/// ```
/// use trip_server::domain::seconds_of_day;
///
/// assert_eq!(seconds_of_day("01:02:03"), Some(3723));
/// assert_eq!(seconds_of_day("01:02"), Some(3720));
/// assert_eq!(seconds_of_day("1h02"), None);
/// ```
pub fn seconds_of_day(s: &str) -> Option<i64> {
    let (h, m, sec) = fields(s)?;
    let sec: i64 = match sec {
        Some(text) => text.parse().ok()?,
        None => 0,
    };
    if h < 0 || m < 0 || sec < 0 {
        return None;
    }
    total_minutes(h, m)?.checked_mul(60)?.checked_add(sec)
}

/// Travel time between a departure and an arrival clock time.
///
/// An arrival earlier in the day than the departure is taken to be on
/// the following day. Spans too large for a [`Duration`] give `None`.
pub fn travel_duration(departure: &str, arrival: &str) -> Option<Duration> {
    let dep = seconds_of_day(departure)?;
    let arr = seconds_of_day(arrival)?;

    let mut diff = arr - dep;
    if diff < 0 {
        diff += SECONDS_PER_DAY;
    }
    Duration::try_seconds(diff)
}

/// Shift a clock time by a whole number of minutes.
///
/// Wraps around midnight in both directions. Only hours and minutes are
/// read; a third field, if the input has one, is carried over untouched.
/// A zero shift or an unparseable input returns the input unchanged.
///
/// # Examples
///
/// ```
/// use trip_server::domain::shift_minutes;
///
/// assert_eq!(shift_minutes("23:50", 20), "00:10");
/// assert_eq!(shift_minutes("08:15:30", 5), "08:20:30");
/// assert_eq!(shift_minutes("08:15:30", 0), "08:15:30");
/// assert_eq!(shift_minutes("soon", 5), "soon");
/// ```
pub fn shift_minutes(time: &str, delta: i64) -> String {
    if delta == 0 {
        return time.to_string();
    }

    let Some((h, m, seconds)) = fields(time) else {
        return time.to_string();
    };
    let Some(total) = total_minutes(h, m).and_then(|t| t.checked_add(delta)) else {
        return time.to_string();
    };

    let total = total.rem_euclid(MINUTES_PER_DAY);
    let base = format!("{:02}:{:02}", total / 60, total % 60);

    // Seconds text is kept verbatim, including its padding.
    match seconds {
        Some(seconds) => format!("{base}:{seconds}"),
        None => base,
    }
}
