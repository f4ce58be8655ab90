//! Timetable data: stop and row records, loading, and direct-trip search.
//!
//! Data is read once at startup into a [`ScheduleGraph`], which answers
//! "which journeys run from A to B" without further I/O.

mod error;
mod graph;
mod load;
mod records;
mod trip;

pub use error::LoadError;
pub use graph::{ScheduleGraph, ServiceJourney};
pub use load::{load_graph, load_rows, load_stops};
pub use records::{RawScheduleRow, RawStopRecord, ScheduleRow, StopRecord};
pub use trip::{Trip, UNKNOWN_DIRECTION, UNKNOWN_DURATION, UNKNOWN_LINE, line_from_journey_id};
