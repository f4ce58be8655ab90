//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::delay::{DelayAssignment, DelayStatus};
use crate::planner::FallbackPhase;
use crate::schedule::Trip;
use crate::stops::NearestStop;

/// Query for stop name search.
#[derive(Debug, Deserialize)]
pub struct StopSearchRequest {
    /// Free-text stop name
    pub q: Option<String>,
}

/// A stop in search results.
#[derive(Debug, Serialize)]
pub struct StopResult {
    pub id: String,
    pub name: String,
}

/// Query for trips between two quay ids.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripsRequest {
    /// Start quay, either `NSR:Quay:<n>` or just the digits
    pub from_id: Option<String>,

    /// Destination quay, same forms as `from_id`
    pub to_id: Option<String>,
}

/// Query for trips between two place names.
#[derive(Debug, Deserialize)]
pub struct TripsByNameRequest {
    pub from: Option<String>,
    pub to: Option<String>,
}

/// Query for the stop nearest a position.
///
/// Kept as text so parse failures get the usual error body.
#[derive(Debug, Deserialize)]
pub struct NearestStopRequest {
    pub lat: Option<String>,
    pub lon: Option<String>,
}

/// Query for an on-time replacement of a chosen trip.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnTimeAlternativeRequest {
    pub from_id: Option<String>,
    pub to_id: Option<String>,

    /// Journey of the trip being replaced
    pub service_journey_id: Option<String>,
}

/// A stop at one end of a trip search.
#[derive(Debug, Serialize)]
pub struct StopRef {
    pub id: String,
    pub name: String,
}

/// A trip with its mock delay.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripResult {
    pub service_journey_id: String,
    pub line: String,
    pub direction: String,
    pub departure_time: Option<String>,
    pub arrival_time: Option<String>,
    pub stops_before_dest: usize,

    /// Minutes of travel, or -1 when a time is unparseable
    pub duration_minutes: i64,

    pub delay_minutes: i64,
    pub new_departure: Option<String>,
    pub new_arrival: Option<String>,
    pub status: DelayStatus,

    /// Departure to show: shifted when delayed, scheduled otherwise
    pub effective_departure: Option<String>,
    pub cancelled: bool,
}

impl TripResult {
    pub fn new(trip: &Trip, delay: DelayAssignment) -> Self {
        Self {
            service_journey_id: trip.service_journey_id.clone(),
            line: trip.line.clone(),
            direction: trip.direction.clone(),
            departure_time: trip.departure_time.clone(),
            arrival_time: trip.arrival_time.clone(),
            stops_before_dest: trip.stops_before_dest,
            duration_minutes: trip.duration_minutes,
            status: delay.status(),
            effective_departure: delay.effective_departure(trip).map(str::to_string),
            cancelled: delay.is_cancelled(),
            delay_minutes: delay.delay_minutes,
            new_departure: delay.new_departure,
            new_arrival: delay.new_arrival,
        }
    }
}

/// Trips for a stop pair.
#[derive(Debug, Serialize)]
pub struct TripsResponse {
    /// Start of the pair actually searched
    pub from: StopRef,

    /// Destination of the pair actually searched
    pub to: StopRef,

    /// Which fallback found the pair, if the chosen one had no trips
    pub alternative: Option<FallbackPhase>,

    pub trips: Vec<TripResult>,
}

/// The stop nearest a position.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NearestStopResponse {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub distance_meters: f64,
}

impl From<NearestStop<'_>> for NearestStopResponse {
    fn from(nearest: NearestStop<'_>) -> Self {
        Self {
            id: nearest.stop.id.to_string(),
            name: nearest.stop.name.clone(),
            lat: nearest.stop.coordinate.lat,
            lon: nearest.stop.coordinate.lon,
            distance_meters: nearest.distance_m,
        }
    }
}

/// An on-time trip offered in place of another.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnTimeAlternativeResponse {
    /// Journey the replacement stands in for
    pub replaces: String,
    pub trip: TripResult,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
