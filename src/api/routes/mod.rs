//! API routes module

pub mod availability;
pub mod calendar;
pub mod calendly;

use std::sync::{Arc, RwLock};

use crate::api::state::AppState;
use axum::Router;

type SharedState = Arc<RwLock<AppState>>;

/// Create the combined API router
pub fn router() -> Router<SharedState> {
    Router::new()
        // Own-calendar busy intervals
        .nest("/calendar", calendar::router())
        // Third-party offered spots
        .nest("/calendly", calendly::router())
        // Combined availability facade
        .nest("/availability", availability::router())
}
