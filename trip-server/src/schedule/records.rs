//! Stop and schedule-row records.
//!
//! The `Raw*` types map directly onto the JSON exported from the
//! timetable. Every field is optional because exports differ in which
//! keys they fill (`id` vs `quay_id`, `name` vs `navn`). Conversion into
//! the typed records drops rows that cannot be placed at all and fails
//! on rows whose required numbers are malformed.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::{Coordinate, QuayId};

use super::error::LoadError;

/// A stop as it appears in the quay export.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawStopRecord {
    pub id: Option<String>,
    pub quay_id: Option<String>,
    pub name: Option<String>,
    pub navn: Option<String>,
    pub lat: Option<Value>,
    pub lon: Option<Value>,
}

/// One stop visit as it appears in the journey export.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawScheduleRow {
    pub service_journey_id: Option<String>,
    pub stop_sequence: Option<Value>,
    pub quay_id: Option<String>,
    pub departure_time: Option<String>,
    pub arrival_time: Option<String>,
    /// Destination display text. Older exports call this `extra1`.
    pub extra1: Option<String>,
    pub direction: Option<String>,
}

/// A stop with a stable id and display name.
#[derive(Debug, Clone, PartialEq)]
pub struct StopRecord {
    pub id: QuayId,
    pub name: String,
    pub coordinate: Option<Coordinate>,
}

impl StopRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: QuayId::new(id),
            name: name.into(),
            coordinate: None,
        }
    }

    /// Attach a position.
    pub fn at(mut self, lat: f64, lon: f64) -> Self {
        self.coordinate = Some(Coordinate::new(lat, lon));
        self
    }

    /// Convert a raw export record.
    ///
    /// Returns `Ok(None)` for records without an id or name. `navn` wins
    /// over `name` and `id` wins over `quay_id` when both are present. A
    /// position is kept only when both `lat` and `lon` are present.
    pub fn from_raw(raw: RawStopRecord) -> Result<Option<Self>, LoadError> {
        let Some(id) = raw.id.or(raw.quay_id) else {
            return Ok(None);
        };
        let Some(name) = raw.navn.or(raw.name) else {
            return Ok(None);
        };

        let lat = raw.lat.as_ref().map(|v| coordinate_value(&id, v)).transpose()?;
        let lon = raw.lon.as_ref().map(|v| coordinate_value(&id, v)).transpose()?;

        let coordinate = match (lat.flatten(), lon.flatten()) {
            (Some(lat), Some(lon)) => Some(Coordinate::new(lat, lon)),
            _ => None,
        };

        Ok(Some(Self {
            id: QuayId::new(id),
            name,
            coordinate,
        }))
    }
}

/// One stop visit within one scheduled journey.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleRow {
    pub service_journey_id: String,
    pub stop_sequence: i64,
    pub quay_id: Option<QuayId>,
    pub departure_time: Option<String>,
    pub arrival_time: Option<String>,
    pub direction_hint: Option<String>,
}

impl ScheduleRow {
    /// Build a row with both times set to `time`.
    pub fn new(journey: &str, sequence: i64, quay: &str, time: &str) -> Self {
        Self {
            service_journey_id: journey.to_string(),
            stop_sequence: sequence,
            quay_id: Some(QuayId::new(quay)),
            departure_time: Some(time.to_string()),
            arrival_time: Some(time.to_string()),
            direction_hint: None,
        }
    }

    /// Set distinct arrival and departure times.
    pub fn times(mut self, arrival: &str, departure: &str) -> Self {
        self.arrival_time = Some(arrival.to_string());
        self.departure_time = Some(departure.to_string());
        self
    }

    /// Set the direction hint.
    pub fn direction(mut self, hint: &str) -> Self {
        self.direction_hint = Some(hint.to_string());
        self
    }

    /// Convert a raw export row.
    ///
    /// Rows without a journey id are dropped (`Ok(None)`). A missing or
    /// non-integer `stop_sequence` is an error.
    pub fn from_raw(raw: RawScheduleRow) -> Result<Option<Self>, LoadError> {
        let Some(journey) = raw.service_journey_id else {
            return Ok(None);
        };

        let stop_sequence = match raw.stop_sequence.as_ref().and_then(sequence_value) {
            Some(seq) => seq,
            None => {
                return Err(LoadError::InvalidStopSequence {
                    value: raw
                        .stop_sequence
                        .map(|v| v.to_string())
                        .unwrap_or_else(|| "nothing".to_string()),
                    journey,
                });
            }
        };

        let direction_hint = raw
            .extra1
            .or(raw.direction)
            .filter(|hint| !hint.trim().is_empty());

        Ok(Some(Self {
            service_journey_id: journey,
            stop_sequence,
            quay_id: raw.quay_id.map(QuayId::new),
            departure_time: raw.departure_time,
            arrival_time: raw.arrival_time,
            direction_hint,
        }))
    }
}

/// Read an integer stop sequence from a JSON number or numeric string.
fn sequence_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Read a coordinate from a JSON number or numeric string.
///
/// `null` counts as absent.
fn coordinate_value(id: &str, value: &Value) -> Result<Option<f64>, LoadError> {
    let invalid = || LoadError::InvalidCoordinate {
        id: id.to_string(),
        value: value.to_string(),
    };

    match value {
        Value::Null => Ok(None),
        Value::Number(n) => n.as_f64().map(Some).ok_or_else(invalid),
        Value::String(s) => s.trim().parse().map(Some).map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}
