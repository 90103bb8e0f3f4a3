//! Public types for the Calendly slots API
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct SlotsQuery {
    pub organization: Option<String>,
    #[serde(alias = "eventType")]
    pub event_type: Option<String>,
    /// Full scheduling page link, accepted in place of the two slugs
    pub url: Option<String>,
    pub date: String,
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

#[derive(Serialize, Deserialize)]
pub struct AvailableTime {
    pub start_time: String, // RFC 3339
    pub end_time: String,   // RFC 3339
}

#[derive(Serialize, Deserialize)]
pub struct SlotsResponse {
    pub available_times: Vec<AvailableTime>,
    pub source: String,
}
