//! Schedule graph and direct-trip search.
//!
//! Rows are grouped by service journey and ordered by stop sequence once,
//! when the graph is built. A query then scans each journey for the start
//! and destination quays and derives trip metadata from the matching rows.

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::domain::travel_duration;

use super::error::LoadError;
use super::records::ScheduleRow;
use super::trip::{Trip, UNKNOWN_DIRECTION, UNKNOWN_DURATION, line_from_journey_id};

/// One scheduled run of a vehicle: its rows in stop-sequence order.
///
/// Stop sequences strictly increase along `rows`. A quay may appear more
/// than once (loop routes).
#[derive(Debug, Clone)]
pub struct ServiceJourney {
    id: String,
    rows: Vec<ScheduleRow>,
}

impl ServiceJourney {
    /// Order rows by stop sequence and check that no sequence repeats.
    fn from_rows(id: String, mut rows: Vec<ScheduleRow>) -> Result<Self, LoadError> {
        rows.sort_by_key(|row| row.stop_sequence);

        if let Some(pair) = rows
            .windows(2)
            .find(|pair| pair[0].stop_sequence >= pair[1].stop_sequence)
        {
            return Err(LoadError::DuplicateStopSequence {
                journey: id,
                sequence: pair[1].stop_sequence,
            });
        }

        Ok(Self { id, rows })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn rows(&self) -> &[ScheduleRow] {
        &self.rows
    }

    /// Direct trip from `start` to `dest` on this journey, if it has one.
    ///
    /// Boards at the first visit of `start` and alights at the last visit
    /// of `dest`; the journey qualifies only if boarding comes first.
    pub fn direct_trip(&self, start: &str, dest: &str) -> Option<Trip> {
        let mut start_index = None;
        let mut dest_index = None;

        for (idx, row) in self.rows.iter().enumerate() {
            let Some(quay) = &row.quay_id else {
                continue;
            };
            if start_index.is_none() && quay.as_str() == start {
                start_index = Some(idx);
            }
            if quay.as_str() == dest {
                dest_index = Some(idx);
            }
        }

        let (start_index, dest_index) = match (start_index, dest_index) {
            (Some(s), Some(d)) if s < d => (s, d),
            _ => return None,
        };

        let start_row = &self.rows[start_index];
        let dest_row = &self.rows[dest_index];

        let departure_time = start_row.departure_time.clone();
        let arrival_time = dest_row.arrival_time.clone();

        let duration_minutes = match (&departure_time, &arrival_time) {
            (Some(dep), Some(arr)) => travel_duration(dep, arr)
                .map(|d| d.num_minutes())
                .unwrap_or(UNKNOWN_DURATION),
            _ => UNKNOWN_DURATION,
        };

        Some(Trip {
            service_journey_id: self.id.clone(),
            line: line_from_journey_id(&self.id),
            direction: self.direction_at(dest_row),
            departure_time,
            arrival_time,
            stops_before_dest: dest_index - start_index - 1,
            duration_minutes,
            start_index,
            dest_index,
        })
    }

    /// Direction text for a trip alighting at `dest_row`.
    fn direction_at(&self, dest_row: &ScheduleRow) -> String {
        let hint = |row: &ScheduleRow| -> Option<String> {
            row.direction_hint.clone().filter(|h| !h.is_empty())
        };

        hint(dest_row)
            .or_else(|| self.rows.iter().find_map(hint))
            .unwrap_or_else(|| UNKNOWN_DIRECTION.to_string())
    }
}

/// All service journeys of a loaded timetable, keyed by journey id.
///
/// Read-only once built, so it can be shared between request handlers
/// without locking.
#[derive(Debug, Clone, Default)]
pub struct ScheduleGraph {
    journeys: BTreeMap<String, ServiceJourney>,
}

impl ScheduleGraph {
    /// Group rows into journeys.
    ///
    /// Fails if any journey repeats a stop sequence.
    pub fn from_rows(rows: impl IntoIterator<Item = ScheduleRow>) -> Result<Self, LoadError> {
        let mut grouped: BTreeMap<String, Vec<ScheduleRow>> = BTreeMap::new();
        let mut row_count = 0usize;

        for row in rows {
            row_count += 1;
            grouped
                .entry(row.service_journey_id.clone())
                .or_default()
                .push(row);
        }

        let journeys = grouped
            .into_iter()
            .map(|(id, rows)| Ok((id.clone(), ServiceJourney::from_rows(id, rows)?)))
            .collect::<Result<BTreeMap<_, _>, LoadError>>()?;

        info!(
            journeys = journeys.len(),
            rows = row_count,
            "built schedule graph"
        );

        Ok(Self { journeys })
    }

    /// Look up a journey by id.
    pub fn journey(&self, id: &str) -> Option<&ServiceJourney> {
        self.journeys.get(id)
    }

    /// Iterate over all journeys in id order.
    pub fn journeys(&self) -> impl Iterator<Item = &ServiceJourney> {
        self.journeys.values()
    }

    /// Number of journeys.
    pub fn len(&self) -> usize {
        self.journeys.len()
    }

    /// Whether the graph has no journeys.
    pub fn is_empty(&self) -> bool {
        self.journeys.is_empty()
    }

    /// Every direct trip from `start` to `dest`, earliest departure first.
    ///
    /// Trips with no departure time come last. Trips with equal
    /// departure strings keep journey-id order. An empty result is not
    /// an error.
    pub fn find_trips(&self, start: &str, dest: &str) -> Vec<Trip> {
        let mut trips: Vec<Trip> = self
            .journeys
            .values()
            .filter_map(|journey| journey.direct_trip(start, dest))
            .collect();

        trips.sort_by(|a, b| a.departure_sort_key().cmp(b.departure_sort_key()));

        debug!(start, dest, found = trips.len(), "direct trip search");
        trips
    }
}
