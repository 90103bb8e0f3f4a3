//! Shared parameter extraction for the API handlers

use chrono::NaiveDate;
use http::{HeaderMap, header};

use crate::core::FetchError;
use crate::schedule::ScheduleReference;

/// Pull the bearer credential off the Authorization header
pub fn bearer_token(headers: &HeaderMap) -> Result<String, FetchError> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .filter(|token| !token.is_empty())
        .map(|token| token.to_string())
        .ok_or(FetchError::Unauthenticated)
}

/// Parse the mandatory date parameter
pub fn parse_date(raw: &str) -> Result<NaiveDate, FetchError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| FetchError::InvalidRequest("Invalid date parameter, expected YYYY-MM-DD".to_string()))
}

/// Resolve a schedule reference from explicit slugs, or from a pasted
/// scheduling page link when the slugs are absent
pub fn resolve_reference(
    organization: Option<String>,
    event_type: Option<String>,
    url: Option<String>,
) -> Result<ScheduleReference, FetchError> {
    if let (Some(organization), Some(event_type)) = (organization, event_type) {
        return Ok(ScheduleReference::new(organization, event_type));
    }
    if let Some(url) = url
        && let Some(reference) = ScheduleReference::from_url(&url)
    {
        return Ok(reference);
    }
    Err(FetchError::InvalidRequest(
        "Missing required parameters: organization, event_type (or a scheduling page url)"
            .to_string(),
    ))
}
