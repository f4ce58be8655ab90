//! Delay assignments and their classification.

use std::fmt;

use serde::Serialize;

use crate::schedule::Trip;

/// Placeholder for a missing key component.
const MISSING: &str = "?";

/// Delay, in minutes, that consumers treat as a cancellation.
pub const CANCELLED_DELAY_MINUTES: i64 = 30;

/// Identifies one ride: a journey's departure between two quays.
///
/// Missing components are stored as `"?"`, so two rides that both lack a
/// departure time share a key. Empty strings are kept as they are.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DelayKey {
    service_journey_id: String,
    departure_time: String,
    start: String,
    dest: String,
}

impl DelayKey {
    pub fn new(
        service_journey_id: Option<&str>,
        departure_time: Option<&str>,
        start: Option<&str>,
        dest: Option<&str>,
    ) -> Self {
        let part = |value: Option<&str>| value.unwrap_or(MISSING).to_string();

        Self {
            service_journey_id: part(service_journey_id),
            departure_time: part(departure_time),
            start: part(start),
            dest: part(dest),
        }
    }

    /// Key for `trip` ridden from `start` to `dest`.
    pub fn for_trip(trip: &Trip, start: &str, dest: &str) -> Self {
        Self::new(
            Some(&trip.service_journey_id),
            trip.departure_time.as_deref(),
            Some(start),
            Some(dest),
        )
    }
}

impl fmt::Display for DelayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{}|{}|{}",
            self.service_journey_id, self.departure_time, self.start, self.dest
        )
    }
}

/// A mock real-time delay applied to one ride.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DelayAssignment {
    pub delay_minutes: i64,
    /// Departure at the start quay after the delay.
    pub new_departure: Option<String>,
    /// Arrival at the destination quay after the delay.
    pub new_arrival: Option<String>,
}

impl DelayAssignment {
    /// No delay and no times, used when there is no trip to delay.
    pub fn none() -> Self {
        Self {
            delay_minutes: 0,
            new_departure: None,
            new_arrival: None,
        }
    }

    pub fn status(&self) -> DelayStatus {
        DelayStatus::from_minutes(self.delay_minutes)
    }

    pub fn is_cancelled(&self) -> bool {
        self.status() == DelayStatus::Cancelled
    }

    /// Departure to show for `trip`: shifted when delayed, scheduled
    /// otherwise (including when cancelled).
    pub fn effective_departure<'a>(&'a self, trip: &'a Trip) -> Option<&'a str> {
        match self.status() {
            DelayStatus::Delayed => self
                .new_departure
                .as_deref()
                .or(trip.departure_time.as_deref()),
            DelayStatus::OnTime | DelayStatus::Cancelled => trip.departure_time.as_deref(),
        }
    }
}

/// How a delay is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DelayStatus {
    OnTime,
    Delayed,
    Cancelled,
}

impl DelayStatus {
    pub fn from_minutes(minutes: i64) -> Self {
        if minutes <= 0 {
            Self::OnTime
        } else if minutes >= CANCELLED_DELAY_MINUTES {
            Self::Cancelled
        } else {
            Self::Delayed
        }
    }
}
