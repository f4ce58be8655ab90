//! Mock real-time delays for found trips.
//!
//! Delays are for presentation only. They never change which trips a
//! search returns.

mod assignment;
mod simulator;

pub use assignment::{CANCELLED_DELAY_MINUTES, DelayAssignment, DelayKey, DelayStatus};
pub use simulator::{DelaySimulator, delay_for_draw};
