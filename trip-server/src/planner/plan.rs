//! Direct search with fallback, the flow every caller runs.

use crate::domain::QuayId;
use crate::schedule::Trip;

use super::alternative::{AlternativeRequest, AlternativeRouteResolver, FallbackPhase, TripSource};

/// Trips for the stop pair that was finally used.
#[derive(Debug, Clone)]
pub struct TripPlan {
    pub start: QuayId,
    pub dest: QuayId,
    /// Set when the chosen pair had no trips and a fallback pair did.
    pub alternative: Option<FallbackPhase>,
    pub trips: Vec<Trip>,
}

impl TripPlan {
    /// Whether the trips are for a different pair than the one chosen.
    pub fn is_alternative(&self) -> bool {
        self.alternative.is_some()
    }
}

/// Search the chosen pair, falling back to other candidates when empty.
///
/// When neither the chosen pair nor any fallback has trips, the plan is
/// for the chosen pair with no trips.
pub fn plan_trips<S: TripSource>(source: &S, request: &AlternativeRequest<'_>) -> TripPlan {
    let trips = source.find_trips(request.chosen_start.as_str(), request.chosen_dest.as_str());
    if !trips.is_empty() {
        return TripPlan {
            start: request.chosen_start.clone(),
            dest: request.chosen_dest.clone(),
            alternative: None,
            trips,
        };
    }

    match AlternativeRouteResolver::new(source).resolve(request) {
        Some(route) => TripPlan {
            start: route.start,
            dest: route.dest,
            alternative: Some(route.phase),
            trips: route.trips,
        },
        None => TripPlan {
            start: request.chosen_start.clone(),
            dest: request.chosen_dest.clone(),
            alternative: None,
            trips: Vec::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{ScheduleGraph, ScheduleRow};

    fn graph() -> ScheduleGraph {
        let a = "OST:ServiceJourney:630_1";
        let b = "OST:ServiceJourney:630_2";
        ScheduleGraph::from_rows(vec![
            ScheduleRow::new(a, 1, "NSR:Quay:10", "08:00"),
            ScheduleRow::new(a, 2, "NSR:Quay:20", "08:40"),
            ScheduleRow::new(b, 1, "NSR:Quay:11", "09:00"),
            ScheduleRow::new(b, 2, "NSR:Quay:21", "09:40"),
        ])
        .unwrap()
    }

    fn plan(starts: &[&str], dests: &[&str]) -> TripPlan {
        let starts: Vec<QuayId> = starts.iter().map(|s| QuayId::new(*s)).collect();
        let dests: Vec<QuayId> = dests.iter().map(|s| QuayId::new(*s)).collect();
        plan_trips(
            &graph(),
            &AlternativeRequest {
                start_candidates: &starts,
                dest_candidates: &dests,
                chosen_start: &starts[0],
                chosen_dest: &dests[0],
            },
        )
    }

    #[test]
    fn direct_trips_win() {
        let p = plan(&["NSR:Quay:10", "NSR:Quay:11"], &["NSR:Quay:20", "NSR:Quay:21"]);
        assert!(!p.is_alternative());
        assert_eq!(p.start.as_str(), "NSR:Quay:10");
        assert_eq!(p.trips.len(), 1);
        assert_eq!(p.trips[0].service_journey_id, "OST:ServiceJourney:630_1");
    }

    #[test]
    fn falls_back_to_other_pair() {
        let p = plan(&["NSR:Quay:10", "NSR:Quay:11"], &["NSR:Quay:21", "NSR:Quay:20"]);
        assert_eq!(p.alternative, Some(FallbackPhase::SameStart));
        assert_eq!(p.start.as_str(), "NSR:Quay:10");
        assert_eq!(p.dest.as_str(), "NSR:Quay:20");
    }

    #[test]
    fn nothing_found_keeps_chosen_pair() {
        let p = plan(&["NSR:Quay:20"], &["NSR:Quay:10"]);
        assert!(!p.is_alternative());
        assert!(p.trips.is_empty());
        assert_eq!(p.start.as_str(), "NSR:Quay:20");
        assert_eq!(p.dest.as_str(), "NSR:Quay:10");
    }
}
