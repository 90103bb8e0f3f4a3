//! Client for a third party's public Calendly scheduling page and the
//! undocumented availability endpoint behind it

pub mod page;
pub mod slots;

pub use page::{PageContext, resolve_page};
pub use slots::{OfferedSpot, fetch_spots};

use chrono::NaiveDate;

use crate::core::FetchError;
use crate::schedule::ScheduleReference;

/// Calendly rejects requests that don't look like a browser
pub(crate) const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Resolve the scheduling page, then pull the day's offered spots. The
/// page-derived context is best-effort: the range endpoint works from the
/// public slugs alone, so an empty context does not block the fetch.
pub async fn fetch_offered_spots(
    base_url: &str,
    reference: &ScheduleReference,
    date: NaiveDate,
    timezone: &str,
) -> Result<Vec<OfferedSpot>, FetchError> {
    let context = page::resolve_page(base_url, reference).await?;
    if context.is_empty() {
        tracing::debug!("No identifiers recovered from the scheduling page");
    } else {
        tracing::debug!("Resolved page context: {:?}", context);
    }
    slots::fetch_spots(base_url, reference, date, timezone).await
}
