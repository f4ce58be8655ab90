//! Trip planning on top of the direct-trip search.
//!
//! Turns typed place names into candidate quays, recovers a usable stop
//! pair when the chosen one has no direct trips, and suggests an on-time
//! replacement for a cancelled departure.

mod alternative;
mod on_time;
mod place;
mod plan;

pub use alternative::{
    AlternativeRequest, AlternativeRoute, AlternativeRouteResolver, FallbackPhase, TripSource,
};
pub use on_time::nearest_on_time_trip;
pub use place::{PlaceResolution, resolve_place};
pub use plan::{TripPlan, plan_trips};
