//! Domain types for the trip planner.
//!
//! Small value types shared by the schedule, stop lookup and delay
//! modules. Identifiers are validated where they enter from user input;
//! clock times stay as the strings found in the timetable.

mod clock;
mod geo;
mod quay;

pub use clock::{
    MINUTES_PER_DAY, MISSING_TIME_SORT_KEY, SECONDS_PER_DAY, seconds_of_day, shift_minutes,
    travel_duration,
};
pub use geo::{Coordinate, EARTH_RADIUS_M, haversine_m};
pub use quay::{InvalidQuayId, QUAY_PREFIX, QuayId};
