//! Router for the combined availability facade

use std::sync::{Arc, RwLock};

use axum::{Router, extract::State, response::Json};
use axum_extra::extract::Query;
use http::HeaderMap;

use super::public;
use crate::api::public::ErrorBody;
use crate::api::state::AppState;
use crate::api::utils::{bearer_token, parse_date, resolve_reference};
use crate::calendly::fetch_offered_spots;
use crate::google::gcal::fetch_busy_intervals;
use crate::schedule::build_grid;

type SharedState = Arc<RwLock<AppState>>;

async fn availability_handler(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(params): Query<public::AvailabilityQuery>,
) -> Result<Json<public::AvailabilityResponse>, crate::api::public::ApiError> {
    let access_token = bearer_token(&headers)?;
    let date = parse_date(&params.date)?;
    let reference = resolve_reference(params.organization, params.event_type, params.url)?;

    let (google_api_url, calendly_base_url, grid_config) = {
        let shared_state = state.read().expect("Unable to read shared state");
        (
            shared_state.config.google_api_url.clone(),
            shared_state.config.calendly_base_url.clone(),
            shared_state.config.grid,
        )
    };

    // The two upstream fetches don't depend on each other; fire both and
    // await both
    let (busy_result, spots_result) = tokio::join!(
        fetch_busy_intervals(&google_api_url, &access_token, date),
        fetch_offered_spots(&calendly_base_url, &reference, date, &params.timezone),
    );

    // The user's own calendar is mandatory: without it the whole request
    // fails
    let intervals = busy_result?;
    let slots = build_grid(&grid_config, date, &intervals);

    let events = intervals
        .iter()
        .map(|interval| public::BusyIntervalResponse {
            start: interval.start.to_rfc3339(),
            end: interval.end.to_rfc3339(),
            summary: interval.label.clone(),
        })
        .collect();

    // The Calendly half degrades to an inline displayable error instead of
    // taking down the calendar half
    let calendly = match spots_result {
        Ok(spots) => public::CalendlyOutcome::Available {
            available_times: spots
                .iter()
                .map(|spot| public::AvailableTime {
                    start_time: spot.start.to_rfc3339(),
                    end_time: spot.end.to_rfc3339(),
                })
                .collect(),
            source: "calendly_api".to_string(),
        },
        Err(err) => {
            tracing::warn!("Calendly availability failed: {:?}", err);
            public::CalendlyOutcome::Failed(ErrorBody::from_error(&err))
        }
    };

    Ok(Json(public::AvailabilityResponse {
        events,
        slots,
        calendly,
    }))
}

/// Create the availability router
pub fn router() -> Router<SharedState> {
    Router::new().route("/", axum::routing::get(availability_handler))
}
