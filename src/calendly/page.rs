//! Resolves a scheduling page into whatever identifiers its HTML exposes
//!
//! The page isn't designed to be machine-read, so resolution is an ordered
//! chain of independent extraction strategies. Each is a pure function over
//! the HTML that may fail without consequence; the first usable identifier
//! wins and a fully failed chain degrades to an empty context.

use regex::Regex;
use reqwest::Client;
use reqwest::header;

use super::BROWSER_USER_AGENT;
use crate::core::FetchError;
use crate::schedule::ScheduleReference;

/// Identifiers recovered from the page, all optional. Downstream spot
/// fetches only need the public slugs, so an empty context is fine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContext {
    pub event_type_uuid: Option<String>,
    pub scheduling_url: Option<String>,
}

impl PageContext {
    pub fn is_empty(&self) -> bool {
        self.event_type_uuid.is_none() && self.scheduling_url.is_none()
    }
}

/// The public scheduling page URL for a reference
pub fn page_url(base_url: &str, reference: &ScheduleReference) -> String {
    format!(
        "{}/{}/{}",
        base_url, reference.organization, reference.event_type
    )
}

/// Strategy 1: the embedded full-state JSON blob, taking the event-type
/// sub-object's uuid
fn extract_initial_state(html: &str) -> Option<PageContext> {
    let re = Regex::new(r"(?s)window\.__INITIAL_STATE__\s*=\s*(\{.+?\});").unwrap();
    let raw = re.captures(html)?.get(1)?.as_str();
    let state: serde_json::Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(err) => {
            tracing::debug!("Embedded page state did not parse: {}", err);
            return None;
        }
    };
    let event_type = state.get("eventType").unwrap_or(&state);
    let uuid = event_type.get("uuid")?.as_str()?;
    Some(PageContext {
        event_type_uuid: Some(uuid.to_string()),
        scheduling_url: None,
    })
}

/// Strategy 2: inline script content mentioning an event-type marker
fn extract_event_type_script(html: &str) -> Option<PageContext> {
    let script_re = Regex::new(r#"(?s)<script[^>]*>.*?"event_type".*?</script>"#).unwrap();
    let script = script_re.find(html)?.as_str();
    let uuid_re = Regex::new(r#""uuid"\s*:\s*"([^"]+)""#).unwrap();
    let uuid = uuid_re.captures(script)?.get(1)?.as_str();
    Some(PageContext {
        event_type_uuid: Some(uuid.to_string()),
        scheduling_url: None,
    })
}

/// Strategy 3: an embedded invitee-scheduling-URL literal
fn extract_invitee_url(html: &str) -> Option<PageContext> {
    let re = Regex::new(r#"invitee_scheduling_url[^"]*"([^"]+)""#).unwrap();
    let url = re.captures(html)?.get(1)?.as_str();
    Some(PageContext {
        event_type_uuid: None,
        scheduling_url: Some(url.to_string()),
    })
}

/// Run the strategy chain over the page HTML, first hit wins
pub fn extract_page_context(html: &str) -> PageContext {
    let strategies: [fn(&str) -> Option<PageContext>; 3] = [
        extract_initial_state,
        extract_event_type_script,
        extract_invitee_url,
    ];
    strategies
        .iter()
        .find_map(|extract| extract(html))
        .unwrap_or_default()
}

/// Fetch the public scheduling page and extract a context from it. The
/// page being unreachable is the one hard failure here: without it there
/// is nothing to schedule against, so the attempted URL goes back to the
/// user for verification.
pub async fn resolve_page(
    base_url: &str,
    reference: &ScheduleReference,
) -> Result<PageContext, FetchError> {
    let url = page_url(base_url, reference);

    tracing::debug!("Fetching scheduling page {}", url);

    let client = Client::new();
    let res = client
        .get(&url)
        .header(
            header::ACCEPT,
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        )
        .header(header::ACCEPT_LANGUAGE, "en-US,en;q=0.5")
        .header(header::USER_AGENT, BROWSER_USER_AGENT)
        .send()
        .await
        .map_err(|err| {
            tracing::warn!("Scheduling page fetch failed: {}", err);
            FetchError::PageNotFound { url: url.clone() }
        })?;
    if !res.status().is_success() {
        tracing::warn!("Scheduling page returned {}", res.status());
        return Err(FetchError::PageNotFound { url });
    }
    let html = res.text().await.unwrap_or_default();
    Ok(extract_page_context(&html))
}
