//! Classified failures from the upstream calendar and scheduling fetches

use thiserror::Error;

/// One classification per failure mode. Each fetch component fails fast
/// with exactly one of these; the API layer maps them onto HTTP statuses
/// and displayable bodies.
#[derive(Debug, Error)]
pub enum FetchError {
    /// No calendar credential, or the calendar service rejected it
    #[error("Not authenticated")]
    Unauthenticated,

    /// A required parameter is missing or unparseable
    #[error("{0}")]
    InvalidRequest(String),

    /// The scheduling page itself could not be fetched. Carries the
    /// attempted URL so the user can verify the link.
    #[error("Calendly page not found: {url}. Please check the link is correct.")]
    PageNotFound { url: String },

    /// The availability endpoint refused or errored. An expected
    /// condition when the Calendly user restricts programmatic access;
    /// the manual link is the fallback path.
    #[error(
        "Unable to automatically fetch availability from Calendly. The API returned: {status}. \
         This usually means the Calendly user has restricted access or the event type is private."
    )]
    UpstreamRejected {
        status: u16,
        body: String,
        manual_link: String,
    },

    /// Transient calendar service failure. Not retried here; the caller
    /// may retry at a higher level.
    #[error("Calendar service unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::UpstreamUnavailable(err.to_string())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Internal(err.into())
    }
}
