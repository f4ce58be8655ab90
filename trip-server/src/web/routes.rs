//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::domain::QuayId;
use crate::planner::{AlternativeRequest, TripPlan, nearest_on_time_trip, plan_trips, resolve_place};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/stops", get(search_stops))
        .route("/api/stops/nearest", get(nearest_stop))
        .route("/api/trips", get(trips_by_id))
        .route("/api/trips/by-name", get(trips_by_name))
        .route("/api/trips/on-time-alternative", get(on_time_alternative))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Search stops by name, with spelling correction for known places.
async fn search_stops(
    State(state): State<AppState>,
    Query(req): Query<StopSearchRequest>,
) -> Result<Json<Vec<StopResult>>, AppError> {
    let q = required(req.q.as_deref(), "q")?;

    let resolution = resolve_place(&state.stops, &state.places, q);
    if resolution.is_empty() {
        return Err(AppError::NotFound {
            message: format!("No stops match {q:?}"),
        });
    }

    let stops = resolution
        .candidates
        .iter()
        .map(|id| StopResult {
            id: id.to_string(),
            name: state.stops.name_of(id.as_str()).to_string(),
        })
        .collect();

    Ok(Json(stops))
}

/// Trips between two quay ids, falling back to neighbouring quays.
async fn trips_by_id(
    State(state): State<AppState>,
    Query(req): Query<TripsRequest>,
) -> Result<Json<TripsResponse>, AppError> {
    let from = quay_param(req.from_id.as_deref(), "fromId")?;
    let to = quay_param(req.to_id.as_deref(), "toId")?;

    let starts = candidates_for(&state, &from);
    let dests = candidates_for(&state, &to);

    let plan = plan_trips(
        state.schedule.as_ref(),
        &AlternativeRequest {
            start_candidates: &starts,
            dest_candidates: &dests,
            chosen_start: &from,
            chosen_dest: &to,
        },
    );

    Ok(Json(trips_response(&state, plan)))
}

/// Trips between two place names, using the first stop of each.
async fn trips_by_name(
    State(state): State<AppState>,
    Query(req): Query<TripsByNameRequest>,
) -> Result<Json<TripsResponse>, AppError> {
    let from_text = required(req.from.as_deref(), "from")?;
    let to_text = required(req.to.as_deref(), "to")?;

    let from = resolve_place(&state.stops, &state.places, from_text);
    let to = resolve_place(&state.stops, &state.places, to_text);

    let (Some(chosen_start), Some(chosen_dest)) = (from.candidates.first(), to.candidates.first())
    else {
        let missing = if from.is_empty() { from_text } else { to_text };
        return Err(AppError::NotFound {
            message: format!("No stops match {missing:?}"),
        });
    };

    let plan = plan_trips(
        state.schedule.as_ref(),
        &AlternativeRequest {
            start_candidates: &from.candidates,
            dest_candidates: &to.candidates,
            chosen_start,
            chosen_dest,
        },
    );

    Ok(Json(trips_response(&state, plan)))
}

/// The stop closest to a position.
async fn nearest_stop(
    State(state): State<AppState>,
    Query(req): Query<NearestStopRequest>,
) -> Result<Json<NearestStopResponse>, AppError> {
    let lat = coordinate_param(req.lat.as_deref(), "lat")?;
    let lon = coordinate_param(req.lon.as_deref(), "lon")?;

    state
        .nearest
        .find_nearest(lat, lon)
        .map(|nearest| Json(nearest.into()))
        .ok_or_else(|| AppError::NotFound {
            message: "No stops with coordinates".to_string(),
        })
}

/// An on-time trip to take instead of the given journey.
async fn on_time_alternative(
    State(state): State<AppState>,
    Query(req): Query<OnTimeAlternativeRequest>,
) -> Result<Json<OnTimeAlternativeResponse>, AppError> {
    let from = quay_param(req.from_id.as_deref(), "fromId")?;
    let to = quay_param(req.to_id.as_deref(), "toId")?;
    let journey = required(req.service_journey_id.as_deref(), "serviceJourneyId")?;

    let trips = state.schedule.find_trips(from.as_str(), to.as_str());
    let chosen = trips
        .iter()
        .position(|t| t.service_journey_id == journey)
        .unwrap_or(trips.len());

    let idx = nearest_on_time_trip(&trips, chosen, &state.delays, from.as_str(), to.as_str())
        .ok_or_else(|| AppError::NotFound {
            message: format!("No on-time alternative to {journey}"),
        })?;

    let trip = &trips[idx];
    let delay = state.delays.get_delay(trip, from.as_str(), to.as_str());

    Ok(Json(OnTimeAlternativeResponse {
        replaces: journey.to_string(),
        trip: TripResult::new(trip, delay),
    }))
}

/// Attach delays and stop names to a plan.
fn trips_response(state: &AppState, plan: TripPlan) -> TripsResponse {
    let trips = plan
        .trips
        .iter()
        .map(|trip| {
            let delay = state
                .delays
                .get_delay(trip, plan.start.as_str(), plan.dest.as_str());
            TripResult::new(trip, delay)
        })
        .collect();

    TripsResponse {
        from: stop_ref(state, &plan.start),
        to: stop_ref(state, &plan.dest),
        alternative: plan.alternative,
        trips,
    }
}

fn stop_ref(state: &AppState, id: &QuayId) -> StopRef {
    StopRef {
        id: id.to_string(),
        name: state.stops.name_of(id.as_str()).to_string(),
    }
}

/// Quays sharing a name with `id`. An unknown id only has itself.
fn candidates_for(state: &AppState, id: &QuayId) -> Vec<QuayId> {
    match state.stops.get(id.as_str()) {
        Some(name) => state.stops.lookup(name),
        None => vec![id.clone()],
    }
}

/// A query parameter that must be present and non-blank.
fn required<'a>(value: Option<&'a str>, name: &str) -> Result<&'a str, AppError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::BadRequest {
            message: format!("Missing query parameter {name}"),
        })
}

fn quay_param(value: Option<&str>, name: &str) -> Result<QuayId, AppError> {
    let raw = required(value, name)?;
    QuayId::parse(QuayId::normalize(raw).as_str()).map_err(|e| AppError::BadRequest {
        message: format!("Invalid {name}: {e}"),
    })
}

fn coordinate_param(value: Option<&str>, name: &str) -> Result<f64, AppError> {
    let raw = required(value, name)?;
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| AppError::BadRequest {
            message: format!("Invalid {name}: {raw:?}"),
        })
}

/// Application error type.
///
/// Every failure a handler can report is a problem with the request.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    BadRequest { message: String },

    #[error("{message}")]
    NotFound { message: String },
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let message = self.to_string();

        warn!(%status, error = %message, "request rejected");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_trims_and_rejects_blank() {
        assert_eq!(required(Some("  halden "), "q").unwrap(), "halden");
        assert!(matches!(
            required(Some("   "), "q"),
            Err(AppError::BadRequest { .. })
        ));
        assert!(matches!(required(None, "q"), Err(AppError::BadRequest { .. })));
    }

    #[test]
    fn quay_param_normalizes_digits() {
        let id = quay_param(Some(" 7193 "), "fromId").unwrap();
        assert_eq!(id.as_str(), "NSR:Quay:7193");

        let id = quay_param(Some("NSR:Quay:7193"), "fromId").unwrap();
        assert_eq!(id.as_str(), "NSR:Quay:7193");
    }

    #[test]
    fn quay_param_rejects_other_ids() {
        let err = quay_param(Some("NSR:StopPlace:1"), "toId").unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().starts_with("Invalid toId"));
    }

    #[test]
    fn coordinate_param_parses_floats() {
        assert_eq!(coordinate_param(Some("59.12"), "lat").unwrap(), 59.12);
        assert!(coordinate_param(Some("north"), "lat").is_err());
        assert!(coordinate_param(Some("NaN"), "lat").is_err());
        assert!(coordinate_param(Some("inf"), "lon").is_err());
    }

    #[test]
    fn error_status_codes() {
        let cases = [
            (AppError::BadRequest { message: "x".into() }, StatusCode::BAD_REQUEST),
            (AppError::NotFound { message: "x".into() }, StatusCode::NOT_FOUND),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
