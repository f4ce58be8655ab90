//! Stop name lookup.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::domain::QuayId;
use crate::schedule::StopRecord;

/// Name reported for ids that are not in the index.
pub const UNKNOWN_STOP_NAME: &str = "unknown";

/// Name → ids and id → name lookup over the loaded stops.
///
/// Names are matched case-insensitively. Several quays usually share one
/// name (one per platform or side of the road), so a name maps to a list
/// of ids in load order.
#[derive(Debug, Clone, Default)]
pub struct StopIndex {
    by_name: BTreeMap<String, Vec<QuayId>>,
    names: HashMap<QuayId, String>,
}

impl StopIndex {
    /// Build the index from loaded stop records.
    pub fn new<'a>(stops: impl IntoIterator<Item = &'a StopRecord>) -> Self {
        let mut by_name: BTreeMap<String, Vec<QuayId>> = BTreeMap::new();
        let mut names = HashMap::new();

        for stop in stops {
            names.insert(stop.id.clone(), stop.name.clone());
            by_name
                .entry(normalize(&stop.name))
                .or_default()
                .push(stop.id.clone());
        }

        Self { by_name, names }
    }

    /// Find quay ids whose name matches `text`.
    ///
    /// An exact (case-insensitive) name match returns just that name's
    /// ids. Otherwise every name containing `text` contributes its ids,
    /// names taken in alphabetical order. No match gives an empty list.
    pub fn lookup(&self, text: &str) -> Vec<QuayId> {
        let key = normalize(text);

        if let Some(ids) = self.by_name.get(&key) {
            return ids.clone();
        }

        let ids: Vec<QuayId> = self
            .by_name
            .iter()
            .filter(|(name, _)| name.contains(&key))
            .flat_map(|(_, ids)| ids.iter().cloned())
            .collect();

        debug!(query = text, matches = ids.len(), "substring stop lookup");
        ids
    }

    /// Display name for a quay id.
    pub fn get(&self, id: &str) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    /// Display name for a quay id, or [`UNKNOWN_STOP_NAME`].
    pub fn name_of(&self, id: &str) -> &str {
        self.get(id).unwrap_or(UNKNOWN_STOP_NAME)
    }

    /// Number of distinct stop ids.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the index has no stops.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

fn normalize(name: &str) -> String {
    name.to_lowercase()
}
