//! Tracing subscriber setup.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber, filtered by `RUST_LOG`.
///
/// An unset or invalid `RUST_LOG` falls back to `info`. Calling this
/// twice is harmless; the second call leaves the first subscriber in place.
pub fn init_logger() {
    let default_level = LevelFilter::INFO;
    let filter = std::env::var(EnvFilter::DEFAULT_ENV)
        .ok()
        .and_then(|rust_log| match EnvFilter::try_new(&rust_log) {
            Ok(filter) => Some(filter),
            Err(err) => {
                eprintln!(
                    "invalid {}, falling back to level '{default_level}' - {err}",
                    EnvFilter::DEFAULT_ENV
                );
                None
            }
        })
        .unwrap_or_else(|| EnvFilter::new(default_level.to_string()));

    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .try_init();
}
