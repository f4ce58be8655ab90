//! Suggesting a replacement for a cancelled departure.

use crate::delay::DelaySimulator;
use crate::schedule::Trip;

/// Index of the on-time trip closest in the list to `chosen`.
///
/// Closeness is distance in list position, which for a departure-sorted
/// list means closeness in time. On a tie the later trip wins. If
/// `chosen` is out of range the first on-time trip is returned. Returns
/// `None` when no other trip is on time.
pub fn nearest_on_time_trip(
    trips: &[Trip],
    chosen: usize,
    delays: &DelaySimulator,
    start: &str,
    dest: &str,
) -> Option<usize> {
    let on_time = |trip: &Trip| delays.get_delay(trip, start, dest).delay_minutes == 0;

    if chosen >= trips.len() {
        return trips.iter().position(on_time);
    }

    let mut best: Option<usize> = None;
    for (idx, trip) in trips.iter().enumerate() {
        if idx == chosen || !on_time(trip) {
            continue;
        }

        let distance = idx.abs_diff(chosen);
        best = match best {
            None => Some(idx),
            Some(b) if distance < b.abs_diff(chosen) => Some(idx),
            Some(b) if distance == b.abs_diff(chosen) && b < chosen && idx > chosen => Some(idx),
            keep => keep,
        };
    }

    best
}
