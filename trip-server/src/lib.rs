//! Transit trip search server.
//!
//! Loads a stop list and a timetable once at startup, then answers
//! "which direct trips run from here to there" with a mock delay on
//! every trip. When the chosen stop pair has no trips, neighbouring
//! quays with the same name are tried instead.

pub mod config;
pub mod delay;
pub mod domain;
pub mod logging;
pub mod planner;
pub mod schedule;
pub mod stops;
pub mod web;
