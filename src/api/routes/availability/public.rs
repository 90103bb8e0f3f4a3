//! Public types for the combined availability API
use serde::{Deserialize, Serialize};

use crate::api::public::ErrorBody;
pub use crate::api::routes::calendar::public::BusyIntervalResponse;
pub use crate::api::routes::calendly::public::AvailableTime;
use crate::schedule::SlotVerdict;

#[derive(Deserialize)]
pub struct AvailabilityQuery {
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

/// The Calendly half of the response: the offered spots, or a displayable
/// failure. The two upstream fetches are independent, so a Calendly
/// refusal never hides an already-successful calendar result.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
pub enum CalendlyOutcome {
    Available {
        available_times: Vec<AvailableTime>,
        source: String,
    },
    Failed(ErrorBody),
}

#[derive(Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub events: Vec<BusyIntervalResponse>,
    pub slots: Vec<SlotVerdict>,
    pub calendly: CalendlyOutcome,
}
