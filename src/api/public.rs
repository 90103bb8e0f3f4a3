//! Public API types

use axum::response::{IntoResponse, Json, Response};
use http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::core::FetchError;

// Errors

/// Displayable failure body. `suggestion` and `manualLink` carry an
/// actionable next step where one exists, rather than a bare error code.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(rename = "manualLink", skip_serializing_if = "Option::is_none")]
    pub manual_link: Option<String>,
}

impl ErrorBody {
    pub fn from_error(err: &FetchError) -> Self {
        match err {
            FetchError::UpstreamRejected { manual_link, .. } => Self {
                error: err.to_string(),
                suggestion: Some(
                    "Please manually check the Calendly link and enter available times".to_string(),
                ),
                manual_link: Some(manual_link.clone()),
            },
            // Unexpected failures get a generic message; the cause is
            // logged at the boundary, not shown to the user
            FetchError::Internal(_) => Self {
                error: "Something went wrong".to_string(),
                suggestion: None,
                manual_link: None,
            },
            _ => Self {
                error: err.to_string(),
                suggestion: None,
                manual_link: None,
            },
        }
    }
}

/// Convert a classified `FetchError` into an Axum compatible response.
pub struct ApiError(FetchError);

impl ApiError {
    fn status(&self) -> StatusCode {
        match self.0 {
            FetchError::Unauthenticated => StatusCode::UNAUTHORIZED,
            FetchError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            FetchError::PageNotFound { .. } => StatusCode::NOT_FOUND,
            FetchError::UpstreamRejected { .. } => StatusCode::BAD_GATEWAY,
            FetchError::UpstreamUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            FetchError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Always log the error, including the parts the body omits
        tracing::error!("{:?}", self.0);

        (self.status(), Json(ErrorBody::from_error(&self.0))).into_response()
    }
}

/// Enables using `?` on functions that return `Result<_, FetchError>`
/// inside handlers
impl From<FetchError> for ApiError {
    fn from(err: FetchError) -> Self {
        Self(err)
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self(FetchError::Internal(err))
    }
}

// Re-export public types from each route

pub mod availability {
    pub use crate::api::routes::availability::public::*;
}

pub mod calendar {
    pub use crate::api::routes::calendar::public::*;
}

pub mod calendly {
    pub use crate::api::routes::calendly::public::*;
}
