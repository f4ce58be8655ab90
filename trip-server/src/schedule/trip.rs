//! Direct trips derived from one service journey.

use crate::domain::MISSING_TIME_SORT_KEY;

/// Direction shown when no row of the journey carries a hint.
pub const UNKNOWN_DIRECTION: &str = "unknown direction";

/// Line shown when the journey id has no line segment.
pub const UNKNOWN_LINE: &str = "?";

/// Duration value used when either end time is missing or malformed.
pub const UNKNOWN_DURATION: i64 = -1;

/// A ride from a start quay to a destination quay on one journey.
///
/// Computed on demand by [`ScheduleGraph::find_trips`](super::ScheduleGraph::find_trips)
/// and never stored. The row indices refer to the journey's rows after
/// sorting by stop sequence; `start_index < dest_index` always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trip {
    pub service_journey_id: String,
    pub line: String,
    pub direction: String,
    /// Departure from the start quay.
    pub departure_time: Option<String>,
    /// Arrival at the destination quay.
    pub arrival_time: Option<String>,
    /// Stops passed between boarding and alighting.
    pub stops_before_dest: usize,
    /// Scheduled travel time, or [`UNKNOWN_DURATION`].
    pub duration_minutes: i64,
    pub start_index: usize,
    pub dest_index: usize,
}

impl Trip {
    /// Key trips are ordered by: the departure string, missing last.
    pub fn departure_sort_key(&self) -> &str {
        self.departure_time
            .as_deref()
            .unwrap_or(MISSING_TIME_SORT_KEY)
    }
}

/// Extract the line code from a service journey id.
///
/// Takes the third `:`-separated segment and keeps what precedes the
/// first `_`, so `OST:ServiceJourney:630_250304` gives `630`.
///
/// # Examples
///
/// ```
/// use trip_server::schedule::line_from_journey_id;
///
/// assert_eq!(line_from_journey_id("OST:ServiceJourney:630_2503"), "630");
/// assert_eq!(line_from_journey_id("OST:ServiceJourney:R20"), "R20");
/// assert_eq!(line_from_journey_id("OST:630"), "?");
/// ```
pub fn line_from_journey_id(journey_id: &str) -> String {
    journey_id
        .split(':')
        .nth(2)
        .and_then(|tail| tail.split('_').next())
        .filter(|line| !line.is_empty())
        .unwrap_or(UNKNOWN_LINE)
        .to_string()
}
