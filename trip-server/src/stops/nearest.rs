//! Nearest-stop lookup by coordinate.

use tracing::info;

use crate::domain::{Coordinate, QuayId};
use crate::schedule::StopRecord;

/// A stop with a known position.
#[derive(Debug, Clone, PartialEq)]
pub struct LocatedStop {
    pub id: QuayId,
    pub name: String,
    pub coordinate: Coordinate,
}

/// Result of a nearest-stop query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestStop<'a> {
    pub stop: &'a LocatedStop,
    pub distance_m: f64,
}

/// Finds the closest stop to a position by linear scan.
#[derive(Debug, Clone, Default)]
pub struct NearestStopLocator {
    stops: Vec<LocatedStop>,
}

impl NearestStopLocator {
    /// Build from stop records, keeping only those with a position.
    pub fn new<'a>(stops: impl IntoIterator<Item = &'a StopRecord>) -> Self {
        let stops: Vec<LocatedStop> = stops
            .into_iter()
            .filter_map(|s| {
                s.coordinate.map(|coordinate| LocatedStop {
                    id: s.id.clone(),
                    name: s.name.clone(),
                    coordinate,
                })
            })
            .collect();

        info!(stops = stops.len(), "indexed stops with coordinates");
        Self { stops }
    }

    /// The stop closest to (`lat`, `lon`) by great-circle distance.
    ///
    /// Returns `None` when no stop has a position. On equal distances
    /// the stop loaded first wins.
    pub fn find_nearest(&self, lat: f64, lon: f64) -> Option<NearestStop<'_>> {
        let here = Coordinate::new(lat, lon);
        let mut best: Option<NearestStop<'_>> = None;

        for stop in &self.stops {
            let distance_m = here.distance_to(&stop.coordinate);
            if best.is_none_or(|b| distance_m < b.distance_m) {
                best = Some(NearestStop { stop, distance_m });
            }
        }

        best
    }

    /// Number of stops with a position.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}
