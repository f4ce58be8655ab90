//! Mock real-time delays.
//!
//! Each ride gets a random delay the first time it is asked about. The
//! draw is then remembered, so a ride shows the same delay for the rest
//! of the process no matter how often or from how many requests it is
//! looked up. A fresh process draws fresh delays unless seeded.

use std::sync::Mutex;

use moka::sync::Cache;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::trace;

use crate::domain::shift_minutes;
use crate::schedule::Trip;

use super::assignment::{DelayAssignment, DelayKey};

/// Number of equally likely outcomes per draw.
const DRAW_OUTCOMES: u32 = 20;

/// Delay in minutes for a draw in `0..DRAW_OUTCOMES`.
///
/// | draws | share | delay |
/// |-------|-------|-------|
/// | 0-9   | 50%   | 0     |
/// | 10-11 | 10%   | 5     |
/// | 12-13 | 10%   | 10    |
/// | 14-16 | 15%   | 20    |
/// | 17-19 | 15%   | 30    |
pub fn delay_for_draw(draw: u32) -> i64 {
    match draw {
        0..=9 => 0,
        10..=11 => 5,
        12..=13 => 10,
        14..=16 => 20,
        _ => 30,
    }
}

/// Assigns and remembers a mock delay per ride.
///
/// Safe to share between threads. Concurrent first lookups of the same
/// ride agree on a single draw.
pub struct DelaySimulator {
    rng: Mutex<ChaCha8Rng>,
    assignments: Cache<DelayKey, DelayAssignment>,
}

impl Default for DelaySimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl DelaySimulator {
    /// Simulator with unpredictable delays.
    pub fn new() -> Self {
        Self::from_rng(ChaCha8Rng::from_entropy())
    }

    /// Simulator whose draws are reproducible for a given seed and
    /// lookup order.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    fn from_rng(rng: ChaCha8Rng) -> Self {
        Self {
            rng: Mutex::new(rng),
            // No capacity or expiry: an assignment lives as long as the simulator.
            assignments: Cache::builder().build(),
        }
    }

    /// Delay for `trip` ridden from `start` to `dest`.
    ///
    /// Passing `None` for the trip gives [`DelayAssignment::none`]
    /// without drawing.
    pub fn get_delay<'a>(
        &self,
        trip: impl Into<Option<&'a Trip>>,
        start: &str,
        dest: &str,
    ) -> DelayAssignment {
        let Some(trip) = trip.into() else {
            return DelayAssignment::none();
        };

        let key = DelayKey::for_trip(trip, start, dest);
        self.assignments.get_with(key, || self.assign(trip, start, dest))
    }

    /// Draw a delay and shift the trip's times by it.
    fn assign(&self, trip: &Trip, start: &str, dest: &str) -> DelayAssignment {
        let draw = {
            let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
            rng.gen_range(0..DRAW_OUTCOMES)
        };
        let delay_minutes = delay_for_draw(draw);

        trace!(
            journey = %trip.service_journey_id,
            start,
            dest,
            delay_minutes,
            "assigned mock delay"
        );

        DelayAssignment {
            delay_minutes,
            new_departure: trip
                .departure_time
                .as_deref()
                .map(|t| shift_minutes(t, delay_minutes)),
            new_arrival: trip
                .arrival_time
                .as_deref()
                .map(|t| shift_minutes(t, delay_minutes)),
        }
    }

    /// Number of rides with a stored assignment.
    pub fn assigned_count(&self) -> u64 {
        self.assignments.run_pending_tasks();
        self.assignments.entry_count()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any lookup returns the same assignment when repeated
        #[test]
        fn lookup_idempotent(
            seed in any::<u64>(),
            id in "[A-Z]{3}:ServiceJourney:[0-9]{3}_[0-9]{1,4}",
            h in 0u32..24, m in 0u32..60,
            start in "NSR:Quay:[0-9]{1,5}",
            dest in "NSR:Quay:[0-9]{1,5}"
        ) {
            let sim = DelaySimulator::with_seed(seed);
            let departure = format!("{h:02}:{m:02}");
            let t = Trip {
                service_journey_id: id,
                line: "630".to_string(),
                direction: "Moss".to_string(),
                departure_time: Some(departure),
                arrival_time: None,
                stops_before_dest: 0,
                duration_minutes: -1,
                start_index: 0,
                dest_index: 1,
            };

            let first = sim.get_delay(&t, &start, &dest);
            let second = sim.get_delay(&t, &start, &dest);
            prop_assert_eq!(&first, &second);
            prop_assert!([0, 5, 10, 20, 30].contains(&first.delay_minutes));
        }
    }
}
