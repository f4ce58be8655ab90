//! Server configuration read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::stops::DEFAULT_KNOWN_PLACES;

/// Default stop list location.
const DEFAULT_QUAYS_PATH: &str = "data/stops_630_only.json";

/// Default timetable location.
const DEFAULT_JOURNEYS_PATH: &str = "data/Rutetider630.json";

/// Errors reading configuration values.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The bind address is not a socket address
    #[error("{var}: invalid address {value:?}")]
    InvalidAddr {
        var: &'static str,
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    /// The delay seed is not an unsigned integer
    #[error("{var}: invalid seed {value:?}")]
    InvalidSeed {
        var: &'static str,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// The known-place list has no names in it
    #[error("{var}: no place names given")]
    EmptyPlaces { var: &'static str },
}

/// Configuration for the trip server.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// JSON stop list.
    pub quays_path: PathBuf,

    /// JSON timetable rows.
    pub journeys_path: PathBuf,

    /// Address the HTTP server listens on.
    pub bind_addr: SocketAddr,

    /// Seed for mock delays. `None` draws fresh delays each run.
    pub delay_seed: Option<u64>,

    /// Vocabulary for spelling correction of place names.
    pub known_places: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            quays_path: PathBuf::from(DEFAULT_QUAYS_PATH),
            journeys_path: PathBuf::from(DEFAULT_JOURNEYS_PATH),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8081)),
            delay_seed: None,
            known_places: DEFAULT_KNOWN_PLACES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl AppConfig {
    pub const QUAYS_PATH_VAR: &'static str = "TRIP_QUAYS_PATH";
    pub const JOURNEYS_PATH_VAR: &'static str = "TRIP_JOURNEYS_PATH";
    pub const BIND_ADDR_VAR: &'static str = "TRIP_BIND_ADDR";
    pub const DELAY_SEED_VAR: &'static str = "TRIP_DELAY_SEED";
    pub const KNOWN_PLACES_VAR: &'static str = "TRIP_KNOWN_PLACES";

    /// Read configuration from process environment variables.
    ///
    /// Unset or empty variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name
    /// to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| {
            lookup(var)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Self::default();

        if let Some(path) = get(Self::QUAYS_PATH_VAR) {
            config.quays_path = PathBuf::from(path);
        }
        if let Some(path) = get(Self::JOURNEYS_PATH_VAR) {
            config.journeys_path = PathBuf::from(path);
        }

        if let Some(value) = get(Self::BIND_ADDR_VAR) {
            config.bind_addr = value.parse().map_err(|source| ConfigError::InvalidAddr {
                var: Self::BIND_ADDR_VAR,
                value: value.clone(),
                source,
            })?;
        }

        if let Some(value) = get(Self::DELAY_SEED_VAR) {
            let seed = value.parse().map_err(|source| ConfigError::InvalidSeed {
                var: Self::DELAY_SEED_VAR,
                value: value.clone(),
                source,
            })?;
            config.delay_seed = Some(seed);
        }

        if let Some(value) = get(Self::KNOWN_PLACES_VAR) {
            let places: Vec<String> = value
                .split(',')
                .map(|p| p.trim().to_lowercase())
                .filter(|p| !p.is_empty())
                .collect();
            if places.is_empty() {
                return Err(ConfigError::EmptyPlaces {
                    var: Self::KNOWN_PLACES_VAR,
                });
            }
            config.known_places = places;
        }

        Ok(config)
    }

    /// Set the data file locations.
    pub fn with_data(mut self, quays: impl Into<PathBuf>, journeys: impl Into<PathBuf>) -> Self {
        self.quays_path = quays.into();
        self.journeys_path = journeys.into();
        self
    }

    /// Fix the delay seed (for testing).
    pub fn with_delay_seed(mut self, seed: u64) -> Self {
        self.delay_seed = Some(seed);
        self
    }
}
