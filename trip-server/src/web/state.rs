//! Application state for the web layer.

use std::sync::Arc;

use crate::delay::DelaySimulator;
use crate::schedule::{ScheduleGraph, StopRecord};
use crate::stops::{FuzzyPlaceMatcher, NearestStopLocator, StopIndex};

/// Shared application state.
///
/// Everything except the delay simulator is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Stop name lookup
    pub stops: Arc<StopIndex>,

    /// Direct-trip search over the timetable
    pub schedule: Arc<ScheduleGraph>,

    /// Nearest stop by position
    pub nearest: Arc<NearestStopLocator>,

    /// Spelling correction for place names
    pub places: Arc<FuzzyPlaceMatcher>,

    /// Mock delays, remembered for the life of the process
    pub delays: Arc<DelaySimulator>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        stops: StopIndex,
        schedule: ScheduleGraph,
        nearest: NearestStopLocator,
        places: FuzzyPlaceMatcher,
        delays: DelaySimulator,
    ) -> Self {
        Self {
            stops: Arc::new(stops),
            schedule: Arc::new(schedule),
            nearest: Arc::new(nearest),
            places: Arc::new(places),
            delays: Arc::new(delays),
        }
    }

    /// Build both stop lookups from one stop list.
    pub fn from_records(
        records: &[StopRecord],
        schedule: ScheduleGraph,
        places: FuzzyPlaceMatcher,
        delays: DelaySimulator,
    ) -> Self {
        Self::new(
            StopIndex::new(records),
            schedule,
            NearestStopLocator::new(records),
            places,
            delays,
        )
    }
}
