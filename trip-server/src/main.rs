use std::process::ExitCode;

use tracing::{error, info};

use trip_server::config::AppConfig;
use trip_server::delay::DelaySimulator;
use trip_server::logging::init_logger;
use trip_server::schedule::{load_graph, load_stops};
use trip_server::stops::FuzzyPlaceMatcher;
use trip_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    init_logger();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;

    // Fail fast on unreadable or malformed data
    let stops = load_stops(&config.quays_path)?;
    let schedule = load_graph(&config.journeys_path)?;

    let delays = match config.delay_seed {
        Some(seed) => {
            info!(seed, "mock delays are seeded");
            DelaySimulator::with_seed(seed)
        }
        None => DelaySimulator::new(),
    };

    let places = FuzzyPlaceMatcher::new(&config.known_places);
    info!(places = ?places.vocabulary(), "spelling correction vocabulary");

    let state = AppState::from_records(&stops, schedule, places, delays);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "trip server listening");
    info!("  GET /health");
    info!("  GET /api/stops?q=");
    info!("  GET /api/stops/nearest?lat=&lon=");
    info!("  GET /api/trips?fromId=&toId=");
    info!("  GET /api/trips/by-name?from=&to=");
    info!("  GET /api/trips/on-time-alternative?fromId=&toId=&serviceJourneyId=");

    axum::serve(listener, app).await?;
    Ok(())
}
