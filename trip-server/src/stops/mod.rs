//! Resolving user input to stops.
//!
//! Three independent lookups built from the loaded stop list: by name,
//! by position, and spelling correction for the handful of places the
//! timetable covers.

mod fuzzy;
mod index;
mod nearest;

pub use fuzzy::{DEFAULT_KNOWN_PLACES, FuzzyPlaceMatcher, MAX_EDIT_DISTANCE, levenshtein};
pub use index::{StopIndex, UNKNOWN_STOP_NAME};
pub use nearest::{LocatedStop, NearestStop, NearestStopLocator};
