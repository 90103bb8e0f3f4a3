use std::env;

use crate::schedule::GridConfig;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub google_api_url: String,
    pub calendly_base_url: String,
    pub grid: GridConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let google_api_url = env::var("MEETSYNC_GOOGLE_API_URL")
            .unwrap_or_else(|_| "https://www.googleapis.com".to_string());
        let calendly_base_url = env::var("MEETSYNC_CALENDLY_BASE_URL")
            .unwrap_or_else(|_| "https://calendly.com".to_string());

        // Slot grid settings are overridable so the daily window isn't a
        // baked-in business rule
        let defaults = GridConfig::default();
        let grid = GridConfig {
            window_start_hour: env_u32("MEETSYNC_SLOT_WINDOW_START_HOUR")
                .unwrap_or(defaults.window_start_hour),
            window_end_hour: env_u32("MEETSYNC_SLOT_WINDOW_END_HOUR")
                .unwrap_or(defaults.window_end_hour),
            granularity_minutes: env_u32("MEETSYNC_SLOT_GRANULARITY_MINUTES")
                .unwrap_or(defaults.granularity_minutes),
        };

        Self {
            google_api_url,
            calendly_base_url,
            grid,
        }
    }
}

fn env_u32(name: &str) -> Option<u32> {
    env::var(name).ok().and_then(|value| value.parse().ok())
}
