//! Identifies one public Calendly scheduling page

use regex::Regex;

/// The organization and event-type slugs behind a scheduling page URL of
/// the form `https://calendly.com/{organization}/{event_type}`. Parsed
/// once from user input and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleReference {
    pub organization: String,
    pub event_type: String,
}

impl ScheduleReference {
    pub fn new(organization: impl Into<String>, event_type: impl Into<String>) -> Self {
        Self {
            organization: organization.into(),
            event_type: event_type.into(),
        }
    }

    /// Parse the slugs out of a full scheduling page link. Trailing query
    /// strings and paths are ignored.
    pub fn from_url(url: &str) -> Option<Self> {
        let re = Regex::new(r"calendly\.com/([^/?#]+)/([^/?#]+)").unwrap();
        let caps = re.captures(url)?;
        Some(Self::new(&caps[1], &caps[2]))
    }
}
