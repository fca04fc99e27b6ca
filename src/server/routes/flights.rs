//! Flight lookup and invite endpoints

use axum::{
    Json, Router,
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    routing::get,
};
use flight2ics_core::FlightRecord;
use flight2ics_core::lookup::FlightLookup;

use crate::server::routes::AppError;
use crate::server::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/flights/{number}", get(get_flight))
        .route("/flights/{number}/ics", get(get_flight_ics))
}

/// GET /flights/:number - Flight details as JSON
async fn get_flight(
    State(state): State<AppState>,
    Path(number): Path<String>,
) -> Result<Json<FlightRecord>, AppError> {
    let flight = state.lookup.lookup(&number).await?;

    Ok(Json(flight))
}

/// GET /flights/:number/ics - Calendar invite as a file download
async fn get_flight_ics(
    State(state): State<AppState>,
    Path(number): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let flight = state.lookup.lookup(&number).await?;
    let download = state.builder.download(&flight);

    let headers = [
        (header::CONTENT_TYPE, "text/calendar; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", download.filename),
        ),
    ];

    Ok((headers, download.content))
}
