//! Loading stop and journey exports from JSON files.

use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{info, warn};

use super::error::LoadError;
use super::graph::ScheduleGraph;
use super::records::{RawScheduleRow, RawStopRecord, ScheduleRow, StopRecord};

/// Read a JSON array file into raw records.
fn read_json_array<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, LoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&contents).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Load stops from a quay export.
///
/// Records without an id or a name are skipped.
pub fn load_stops(path: impl AsRef<Path>) -> Result<Vec<StopRecord>, LoadError> {
    let path = path.as_ref();
    let raw: Vec<RawStopRecord> = read_json_array(path)?;
    let total = raw.len();

    let mut stops = Vec::with_capacity(total);
    for record in raw {
        if let Some(stop) = StopRecord::from_raw(record)? {
            stops.push(stop);
        }
    }

    if stops.len() < total {
        warn!(
            path = %path.display(),
            skipped = total - stops.len(),
            "skipped stop records without id or name"
        );
    }
    info!(path = %path.display(), stops = stops.len(), "loaded stops");

    Ok(stops)
}

/// Load schedule rows from a journey export.
///
/// Rows without a journey id are skipped; a malformed stop sequence
/// fails the whole load.
pub fn load_rows(path: impl AsRef<Path>) -> Result<Vec<ScheduleRow>, LoadError> {
    let path = path.as_ref();
    let raw: Vec<RawScheduleRow> = read_json_array(path)?;
    let total = raw.len();

    let mut rows = Vec::with_capacity(total);
    for record in raw {
        if let Some(row) = ScheduleRow::from_raw(record)? {
            rows.push(row);
        }
    }

    if rows.len() < total {
        warn!(
            path = %path.display(),
            skipped = total - rows.len(),
            "skipped schedule rows without service_journey_id"
        );
    }
    info!(path = %path.display(), rows = rows.len(), "loaded schedule rows");

    Ok(rows)
}

/// Load a journey export straight into a [`ScheduleGraph`].
pub fn load_graph(path: impl AsRef<Path>) -> Result<ScheduleGraph, LoadError> {
    ScheduleGraph::from_rows(load_rows(path)?)
}
