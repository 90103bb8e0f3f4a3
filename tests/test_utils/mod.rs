//! Test utilities for integration tests
use std::sync::{Arc, RwLock};

use axum::Router;

use meetsync::api::AppState;
use meetsync::api::app;
use meetsync::core::AppConfig;
use meetsync::schedule::GridConfig;

/// Creates a test application router. The upstream base URLs point at an
/// unroutable port so any test that should issue no upstream calls fails
/// loudly if it does.
pub fn test_app() -> Router {
    test_app_with(test_config())
}

pub fn test_config() -> AppConfig {
    AppConfig {
        google_api_url: String::from("http://127.0.0.1:1"),
        calendly_base_url: String::from("http://127.0.0.1:1"),
        grid: GridConfig::default(),
    }
}

/// Creates a test application router against explicit upstream base URLs,
/// typically a `mockito` server
pub fn test_app_with(config: AppConfig) -> Router {
    let app_state = AppState::new(config);
    app(Arc::new(RwLock::new(app_state)))
}
