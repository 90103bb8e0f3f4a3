//! Router for the calendar API

use std::sync::{Arc, RwLock};

use axum::{Router, extract::State, response::Json};
use axum_extra::extract::Query;
use http::HeaderMap;

use super::public;
use crate::api::state::AppState;
use crate::api::utils::{bearer_token, parse_date};
use crate::google::gcal::fetch_busy_intervals;
use crate::schedule::build_grid;

type SharedState = Arc<RwLock<AppState>>;

async fn free_slots_handler(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(params): Query<public::FreeSlotsQuery>,
) -> Result<Json<public::FreeSlotsResponse>, crate::api::public::ApiError> {
    let access_token = bearer_token(&headers)?;
    let date = parse_date(&params.date)?;

    let (google_api_url, grid_config) = {
        let shared_state = state.read().expect("Unable to read shared state");
        (
            shared_state.config.google_api_url.clone(),
            shared_state.config.grid,
        )
    };

    let intervals = fetch_busy_intervals(&google_api_url, &access_token, date).await?;
    let slots = build_grid(&grid_config, date, &intervals);

    // Transform intervals to a simpler format for the API response
    let events = intervals
        .iter()
        .map(|interval| public::BusyIntervalResponse {
            start: interval.start.to_rfc3339(),
            end: interval.end.to_rfc3339(),
            summary: interval.label.clone(),
        })
        .collect();

    Ok(Json(public::FreeSlotsResponse { events, slots }))
}

/// Create the calendar router
pub fn router() -> Router<SharedState> {
    Router::new().route("/free-slots", axum::routing::get(free_slots_handler))
}
