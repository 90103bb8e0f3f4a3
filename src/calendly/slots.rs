//! Fetches one day's offered spots from the booking range endpoint
//!
//! The endpoint is what the scheduling page's own frontend calls. It is
//! not documented or stable, so the response shape is a best-effort
//! contract and a refusal is an expected, user-facing condition rather
//! than a bug.

use anyhow::Context;
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::{Client, Url, header};
use serde::Deserialize;

use super::BROWSER_USER_AGENT;
use super::page::page_url;
use crate::core::FetchError;
use crate::schedule::ScheduleReference;

/// One bookable window the third party is willing to offer
#[derive(Debug, Clone, PartialEq)]
pub struct OfferedSpot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Day-keyed response shape observed from the range endpoint
#[derive(Debug, Deserialize)]
struct RangeResponse {
    days: Option<Vec<RangeDay>>,
}

#[derive(Debug, Deserialize)]
struct RangeDay {
    spots: Option<Vec<RangeSpot>>,
}

#[derive(Debug, Deserialize)]
struct RangeSpot {
    start_time: Option<String>,
    end_time: Option<String>,
}

impl RangeSpot {
    /// Malformed or missing fields skip the spot rather than abort the
    /// whole batch
    fn into_offered(self) -> Option<OfferedSpot> {
        let start = parse_instant(self.start_time.as_deref()?)?;
        let end = parse_instant(self.end_time.as_deref()?)?;
        Some(OfferedSpot { start, end })
    }
}

fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(instant) => Some(instant.with_timezone(&Utc)),
        Err(err) => {
            tracing::debug!("Skipping spot with unparseable time {:?}: {}", raw, err);
            None
        }
    }
}

/// Query the day-range availability endpoint for a single-day range in
/// the caller's timezone and normalize the first day's spot list
pub async fn fetch_spots(
    base_url: &str,
    reference: &ScheduleReference,
    date: NaiveDate,
    timezone: &str,
) -> Result<Vec<OfferedSpot>, FetchError> {
    let manual_link = page_url(base_url, reference);
    let date = date.format("%Y-%m-%d").to_string();
    let mut url = Url::parse(&format!(
        "{}/api/booking/event_types/{}/{}/calendar/range",
        base_url, reference.organization, reference.event_type
    ))
    .context("Invalid availability endpoint URL")?;
    url.query_pairs_mut()
        .append_pair("timezone", timezone)
        .append_pair("diagnostics", "false")
        .append_pair("start_date", &date)
        .append_pair("end_date", &date);

    tracing::debug!("Fetching availability from {}", url);

    let client = Client::new();
    let res = client
        .get(url)
        .header(header::ACCEPT, "application/json")
        .header(header::REFERER, manual_link.clone())
        .header(header::USER_AGENT, BROWSER_USER_AGENT)
        .send()
        .await?;
    let status = res.status();
    let text = res.text().await.unwrap_or_default();
    if !status.is_success() {
        tracing::warn!("Availability endpoint rejected the request: {}", status);
        return Err(FetchError::UpstreamRejected {
            status: status.as_u16(),
            body: text,
            manual_link,
        });
    }
    let resp: RangeResponse = serde_json::from_str(&text)?;

    // Only the first day is consulted, matching the single-day range asked
    // for above
    let spots = resp
        .days
        .and_then(|days| days.into_iter().next())
        .and_then(|day| day.spots)
        .unwrap_or_default();
    Ok(spots
        .into_iter()
        .filter_map(RangeSpot::into_offered)
        .collect())
}
