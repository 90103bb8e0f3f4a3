//! Router for the Calendly slots API

use std::sync::{Arc, RwLock};

use axum::{Router, extract::State, response::Json};
use axum_extra::extract::Query;

use super::public;
use crate::api::state::AppState;
use crate::api::utils::{parse_date, resolve_reference};
use crate::calendly::fetch_offered_spots;

type SharedState = Arc<RwLock<AppState>>;

async fn slots_handler(
    State(state): State<SharedState>,
    Query(params): Query<public::SlotsQuery>,
) -> Result<Json<public::SlotsResponse>, crate::api::public::ApiError> {
    let date = parse_date(&params.date)?;
    let reference = resolve_reference(params.organization, params.event_type, params.url)?;

    let calendly_base_url = {
        let shared_state = state.read().expect("Unable to read shared state");
        shared_state.config.calendly_base_url.clone()
    };

    let spots = fetch_offered_spots(&calendly_base_url, &reference, date, &params.timezone).await?;

    let available_times = spots
        .iter()
        .map(|spot| public::AvailableTime {
            start_time: spot.start.to_rfc3339(),
            end_time: spot.end.to_rfc3339(),
        })
        .collect();

    Ok(Json(public::SlotsResponse {
        available_times,
        source: "calendly_api".to_string(),
    }))
}

/// Create the Calendly slots router
pub fn router() -> Router<SharedState> {
    Router::new().route("/slots", axum::routing::get(slots_handler))
}
