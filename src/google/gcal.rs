//! Google Calendar API client for listing one day's booked events

use anyhow::Context;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Utc};
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;

use crate::core::FetchError;
use crate::schedule::BusyInterval;
use crate::schedule::grid::local_instant;

/// Cap on events returned for one day, bounds the response size
const MAX_RESULTS: u32 = 50;

/// Event structures from the Calendar API v3 documentation
#[derive(Debug, Clone, Deserialize)]
pub struct EventTime {
    /// Set for timed events
    #[serde(rename = "dateTime")]
    pub date_time: Option<DateTime<FixedOffset>>,
    /// Set for whole-day events
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Event {
    pub id: Option<String>,
    pub summary: Option<String>,
    pub start: Option<EventTime>,
    pub end: Option<EventTime>,
}

#[derive(Debug, Deserialize)]
struct ListEventsResponse {
    items: Option<Vec<Event>>,
}

impl EventTime {
    /// Timed events resolve to their instant; whole-day events resolve to
    /// the given day bound. None when the event carries neither field.
    fn resolve(&self, day_bound: DateTime<Utc>) -> Option<DateTime<Utc>> {
        if let Some(instant) = self.date_time {
            return Some(instant.with_timezone(&Utc));
        }
        if self.date.is_some() {
            return Some(day_bound);
        }
        None
    }
}

/// The queried day window, [00:00:00.000, 23:59:59.999] in the server's
/// local representation of the date. Note the Calendly half of a request
/// takes an explicit timezone while this query does not.
pub fn day_window(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let end_of_day = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).expect("valid time of day");
    (
        local_instant(date.and_time(NaiveTime::MIN)),
        local_instant(date.and_time(end_of_day)),
    )
}

/// List events on a calendar between two instants, expanded to single
/// instances and ordered by start time
pub async fn list_events(
    base_url: &str,
    access_token: &str,
    calendar_id: &str,
    time_min: DateTime<Utc>,
    time_max: DateTime<Utc>,
) -> Result<Vec<Event>, FetchError> {
    let mut url = Url::parse(&format!(
        "{}/calendar/v3/calendars/{}/events",
        base_url, calendar_id
    ))
    .context("Invalid calendar API URL")?;
    url.query_pairs_mut()
        .append_pair("timeMin", &time_min.to_rfc3339())
        .append_pair("timeMax", &time_max.to_rfc3339())
        .append_pair("singleEvents", "true")
        .append_pair("orderBy", "startTime")
        .append_pair("maxResults", &MAX_RESULTS.to_string());

    tracing::debug!("Fetching events from {} to {}", time_min, time_max);

    let client = Client::new();
    let res = client.get(url).bearer_auth(access_token).send().await?;
    let status = res.status();
    let text = res.text().await.unwrap_or_default();
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        tracing::warn!("Calendar credential rejected: {}", status);
        return Err(FetchError::Unauthenticated);
    }
    if !status.is_success() {
        return Err(FetchError::UpstreamUnavailable(format!(
            "Event list fetch failed: {} ({})",
            status, text
        )));
    }
    let resp: ListEventsResponse = serde_json::from_str(&text)?;
    Ok(resp.items.unwrap_or_default())
}

/// Normalize raw events into busy intervals for one day. Whole-day events
/// span the entire day window. Events carrying neither an instant nor a
/// date on an endpoint are excluded, as are inverted ranges.
pub fn busy_intervals(events: Vec<Event>, date: NaiveDate) -> Vec<BusyInterval> {
    let (day_start, day_end) = day_window(date);
    events
        .into_iter()
        .filter_map(|event| {
            let start = event.start.as_ref()?.resolve(day_start)?;
            let end = event.end.as_ref()?.resolve(day_end)?;
            let label = event.summary.unwrap_or_else(|| "Busy".to_string());
            BusyInterval::new(start, end, label)
        })
        .collect()
}

/// Fetch the authenticated user's booked events for one day off the
/// primary calendar and normalize them into busy intervals
pub async fn fetch_busy_intervals(
    base_url: &str,
    access_token: &str,
    date: NaiveDate,
) -> Result<Vec<BusyInterval>, FetchError> {
    let (day_start, day_end) = day_window(date);
    let events = list_events(base_url, access_token, "primary", day_start, day_end).await?;
    tracing::debug!("Found {} events on {}", events.len(), date);
    Ok(busy_intervals(events, date))
}
