//! Fallback search over other stop combinations.
//!
//! A place name usually resolves to several quays (both sides of the
//! road, several platforms). When the pair the user picked has no direct
//! trip, one of the neighbouring quays often does. The fallback tries,
//! in order:
//!
//! 1. the chosen start with each other destination candidate,
//! 2. each other start candidate with the chosen destination,
//! 3. every start × destination candidate pair except the chosen one.
//!
//! The first pair with at least one trip wins.

use serde::Serialize;
use tracing::{debug, info};

use crate::domain::QuayId;
use crate::schedule::{ScheduleGraph, Trip};

/// Anything that can list direct trips between two quays.
///
/// This abstraction allows the fallback to be tested with mock data.
pub trait TripSource {
    /// Direct trips from `start` to `dest`, earliest first.
    fn find_trips(&self, start: &str, dest: &str) -> Vec<Trip>;
}

impl TripSource for ScheduleGraph {
    fn find_trips(&self, start: &str, dest: &str) -> Vec<Trip> {
        ScheduleGraph::find_trips(self, start, dest)
    }
}

/// Which fallback step produced a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPhase {
    SameStart,
    SameDestination,
    AnyPair,
}

/// The user's choice together with the candidates it was picked from.
#[derive(Debug, Clone)]
pub struct AlternativeRequest<'a> {
    pub start_candidates: &'a [QuayId],
    pub dest_candidates: &'a [QuayId],
    pub chosen_start: &'a QuayId,
    pub chosen_dest: &'a QuayId,
}

/// A stop pair that has direct trips, found by the fallback.
#[derive(Debug, Clone)]
pub struct AlternativeRoute {
    pub start: QuayId,
    pub dest: QuayId,
    pub phase: FallbackPhase,
    pub trips: Vec<Trip>,
}

/// Runs the three-step fallback against a trip source.
pub struct AlternativeRouteResolver<'a, S> {
    source: &'a S,
}

impl<'a, S: TripSource> AlternativeRouteResolver<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Find another stop pair with direct trips.
    ///
    /// Returns `None` when no candidate combination has any; that is a
    /// normal outcome, not an error.
    pub fn resolve(&self, request: &AlternativeRequest<'_>) -> Option<AlternativeRoute> {
        let chosen_start = request.chosen_start;
        let chosen_dest = request.chosen_dest;

        let same_start = request
            .dest_candidates
            .iter()
            .filter(|dest| *dest != chosen_dest)
            .map(|dest| (chosen_start, dest));

        let same_dest = request
            .start_candidates
            .iter()
            .filter(|start| *start != chosen_start)
            .map(|start| (start, chosen_dest));

        let any_pair = request
            .start_candidates
            .iter()
            .flat_map(|start| request.dest_candidates.iter().map(move |dest| (start, dest)))
            .filter(|(start, dest)| !(*start == chosen_start && *dest == chosen_dest));

        let found = self
            .first_with_trips(same_start, FallbackPhase::SameStart)
            .or_else(|| self.first_with_trips(same_dest, FallbackPhase::SameDestination))
            .or_else(|| self.first_with_trips(any_pair, FallbackPhase::AnyPair));

        match &found {
            Some(route) => info!(
                chosen_start = %chosen_start,
                chosen_dest = %chosen_dest,
                start = %route.start,
                dest = %route.dest,
                phase = ?route.phase,
                "found alternative stop pair"
            ),
            None => info!(
                chosen_start = %chosen_start,
                chosen_dest = %chosen_dest,
                "no alternative stop pair has direct trips"
            ),
        }

        found
    }

    fn first_with_trips<'q>(
        &self,
        pairs: impl Iterator<Item = (&'q QuayId, &'q QuayId)>,
        phase: FallbackPhase,
    ) -> Option<AlternativeRoute> {
        pairs.into_iter().find_map(|(start, dest)| {
            let trips = self.source.find_trips(start.as_str(), dest.as_str());
            debug!(%start, %dest, ?phase, found = trips.len(), "trying alternative pair");

            (!trips.is_empty()).then(|| AlternativeRoute {
                start: start.clone(),
                dest: dest.clone(),
                phase,
                trips,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashSet;

    /// Trip source with trips only for the listed pairs, recording queries.
    struct MockSource {
        routes: HashSet<(String, String)>,
        queries: RefCell<Vec<(String, String)>>,
    }

    impl MockSource {
        fn new(routes: &[(&str, &str)]) -> Self {
            Self {
                routes: routes
                    .iter()
                    .map(|(a, b)| (a.to_string(), b.to_string()))
                    .collect(),
                queries: RefCell::new(Vec::new()),
            }
        }

        fn queries(&self) -> Vec<(String, String)> {
            self.queries.borrow().clone()
        }
    }

    impl TripSource for MockSource {
        fn find_trips(&self, start: &str, dest: &str) -> Vec<Trip> {
            self.queries
                .borrow_mut()
                .push((start.to_string(), dest.to_string()));

            if !self.routes.contains(&(start.to_string(), dest.to_string())) {
                return Vec::new();
            }
            vec![Trip {
                service_journey_id: format!("OST:ServiceJourney:630_{start}_{dest}"),
                line: "630".to_string(),
                direction: "Moss".to_string(),
                departure_time: Some("08:00".to_string()),
                arrival_time: Some("08:30".to_string()),
                stops_before_dest: 2,
                duration_minutes: 30,
                start_index: 0,
                dest_index: 3,
            }]
        }
    }

    fn ids(list: &[&str]) -> Vec<QuayId> {
        list.iter().map(|s| QuayId::new(*s)).collect()
    }

    fn resolve(source: &MockSource, starts: &[&str], dests: &[&str]) -> Option<AlternativeRoute> {
        let starts = ids(starts);
        let dests = ids(dests);
        AlternativeRouteResolver::new(source).resolve(&AlternativeRequest {
            start_candidates: &starts,
            dest_candidates: &dests,
            chosen_start: &starts[0],
            chosen_dest: &dests[0],
        })
    }

    fn pair(route: &AlternativeRoute) -> (&str, &str) {
        (route.start.as_str(), route.dest.as_str())
    }

    #[test]
    fn same_start_tried_first() {
        // Both a same-start and a same-dest alternative exist
        let source = MockSource::new(&[("S1", "D2"), ("S2", "D1")]);
        let route = resolve(&source, &["S1", "S2"], &["D1", "D2"]).unwrap();

        assert_eq!(pair(&route), ("S1", "D2"));
        assert_eq!(route.phase, FallbackPhase::SameStart);
        assert_eq!(route.trips.len(), 1);
    }

    #[test]
    fn same_destination_second() {
        let source = MockSource::new(&[("S3", "D1"), ("S2", "D1")]);
        let route = resolve(&source, &["S1", "S2", "S3"], &["D1", "D2"]).unwrap();

        // Candidate order decides: S2 comes before S3
        assert_eq!(pair(&route), ("S2", "D1"));
        assert_eq!(route.phase, FallbackPhase::SameDestination);
    }

    #[test]
    fn cross_product_last() {
        let source = MockSource::new(&[("S3", "D2"), ("S2", "D3")]);
        let route = resolve(&source, &["S1", "S2", "S3"], &["D1", "D2", "D3"]).unwrap();

        // Outer loop over starts: S2 is reached before S3
        assert_eq!(pair(&route), ("S2", "D3"));
        assert_eq!(route.phase, FallbackPhase::AnyPair);
    }

    #[test]
    fn same_start_beats_cross_product() {
        let source = MockSource::new(&[("S2", "D2"), ("S1", "D3")]);
        let route = resolve(&source, &["S1", "S2"], &["D1", "D2", "D3"]).unwrap();

        assert_eq!(pair(&route), ("S1", "D3"));
        assert_eq!(route.phase, FallbackPhase::SameStart);
    }

    #[test]
    fn never_retries_chosen_pair() {
        let source = MockSource::new(&[("S1", "D1")]);
        assert!(resolve(&source, &["S1", "S2"], &["D1", "D2"]).is_none());

        let chosen = ("S1".to_string(), "D1".to_string());
        assert!(!source.queries().contains(&chosen));
    }

    #[test]
    fn phase_order_of_queries() {
        let source = MockSource::new(&[]);
        assert!(resolve(&source, &["S1", "S2"], &["D1", "D2"]).is_none());

        let q: Vec<(String, String)> = source.queries();
        let expected: Vec<(String, String)> = [
            ("S1", "D2"), // same start
            ("S2", "D1"), // same destination
            ("S1", "D2"), // cross product, chosen pair skipped
            ("S2", "D1"),
            ("S2", "D2"),
        ]
        .iter()
        .map(|(a, b)| (a.to_string(), b.to_string()))
        .collect();
        assert_eq!(q, expected);
    }

    #[test]
    fn single_candidates_have_no_alternative() {
        let source = MockSource::new(&[]);
        assert!(resolve(&source, &["S1"], &["D1"]).is_none());
        assert!(source.queries().is_empty());
    }

    #[test]
    fn works_against_schedule_graph() {
        use crate::schedule::ScheduleRow;

        let j = "OST:ServiceJourney:630_1";
        let graph = ScheduleGraph::from_rows(vec![
            ScheduleRow::new(j, 1, "NSR:Quay:11", "08:00"),
            ScheduleRow::new(j, 2, "NSR:Quay:21", "08:30"),
        ])
        .unwrap();

        let starts = ids(&["NSR:Quay:10", "NSR:Quay:11"]);
        let dests = ids(&["NSR:Quay:20", "NSR:Quay:21"]);
        let route = AlternativeRouteResolver::new(&graph)
            .resolve(&AlternativeRequest {
                start_candidates: &starts,
                dest_candidates: &dests,
                chosen_start: &starts[0],
                chosen_dest: &dests[0],
            })
            .unwrap();

        assert_eq!(pair(&route), ("NSR:Quay:11", "NSR:Quay:21"));
        assert_eq!(route.phase, FallbackPhase::AnyPair);
    }
}
