//! Web layer for the trip planner.
//!
//! Thin JSON endpoints over stop lookup, trip search and mock delays.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
