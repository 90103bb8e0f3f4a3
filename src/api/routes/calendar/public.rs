//! Public types for the calendar API
use serde::{Deserialize, Serialize};

use crate::schedule::SlotVerdict;

#[derive(Deserialize)]
pub struct FreeSlotsQuery {
    pub date: String,
    /// Accepted for parity with the Calendly half; the booked-event query
    /// itself runs on the server's local day window
    pub timezone: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct BusyIntervalResponse {
    pub start: String, // RFC 3339
    pub end: String,   // RFC 3339
    pub summary: String,
}

#[derive(Serialize, Deserialize)]
pub struct FreeSlotsResponse {
    pub events: Vec<BusyIntervalResponse>,
    pub slots: Vec<SlotVerdict>,
}
