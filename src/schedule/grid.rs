//! Builds the per-slot free/busy grid for a single day
//!
//! This is a pure function over (date, busy intervals): no clock reads, no
//! I/O. The offered spots from the other party are deliberately kept out of
//! this grid and rendered as their own panel.

use chrono::{DateTime, Local, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A time range during which the user is already committed. Invariant:
/// start < end, enforced by the constructor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusyInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub label: String,
}

impl BusyInterval {
    /// Returns None for empty or inverted ranges
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, label: String) -> Option<Self> {
        if start < end {
            Some(Self { start, end, label })
        } else {
            None
        }
    }
}

/// Daily slot window and granularity. These are deployment settings, not
/// business rules; see `AppConfig` for the environment overrides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridConfig {
    /// Hour of the first slot start
    pub window_start_hour: u32,
    /// Hour of the last slot start, inclusive
    pub window_end_hour: u32,
    pub granularity_minutes: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            window_start_hour: 7,
            window_end_hour: 22,
            granularity_minutes: 30,
        }
    }
}

impl GridConfig {
    /// Ordered slot start times covering the daily window, last slot start
    /// inclusive
    pub fn slot_times(&self) -> Vec<NaiveTime> {
        let start = self.window_start_hour * 60;
        let end = self.window_end_hour * 60;
        let step = self.granularity_minutes.max(1);
        (start..=end)
            .step_by(step as usize)
            .filter_map(|minutes| NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0))
            .collect()
    }
}

/// Free/busy verdict for one fixed-width slot of the day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotVerdict {
    pub slot_start: NaiveTime,
    pub busy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Resolve a wall-clock datetime on the server into an instant. Ambiguous
/// local times (DST fall-back) take the earlier mapping; nonexistent ones
/// fall back to UTC.
pub(crate) fn local_instant(naive: NaiveDateTime) -> DateTime<Utc> {
    match naive.and_local_timezone(Local) {
        LocalResult::Single(instant) | LocalResult::Ambiguous(instant, _) => {
            instant.with_timezone(&Utc)
        }
        LocalResult::None => Utc.from_utc_datetime(&naive),
    }
}

/// Build the ordered slot grid for a date. A slot is busy iff some
/// interval's half-open [start, end) range contains the slot's start
/// instant: an event ending exactly at a slot start leaves it free, an
/// event starting exactly there marks it busy. When several intervals
/// contain the slot, the first in the given (chronological) order supplies
/// the label.
pub fn build_grid(config: &GridConfig, date: NaiveDate, busy: &[BusyInterval]) -> Vec<SlotVerdict> {
    config
        .slot_times()
        .into_iter()
        .map(|slot_start| {
            let instant = local_instant(date.and_time(slot_start));
            let hit = busy
                .iter()
                .find(|interval| interval.start <= instant && instant < interval.end);
            SlotVerdict {
                slot_start,
                busy: hit.is_some(),
                label: hit.map(|interval| interval.label.clone()),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    fn interval(start: (u32, u32), end: (u32, u32), label: &str) -> BusyInterval {
        let day = date();
        BusyInterval::new(
            local_instant(day.and_time(NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap())),
            local_instant(day.and_time(NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap())),
            label.to_string(),
        )
        .unwrap()
    }

    fn slot(grid: &[SlotVerdict], hour: u32, minute: u32) -> &SlotVerdict {
        let time = NaiveTime::from_hms_opt(hour, minute, 0).unwrap();
        grid.iter()
            .find(|verdict| verdict.slot_start == time)
            .unwrap()
    }

    #[test]
    fn test_grid_shape_is_fixed() {
        let config = GridConfig::default();

        // 31 slots from 07:00 to 22:00 at 30 minute spacing, no matter
        // what the intervals look like
        for busy in [vec![], vec![interval((9, 0), (18, 0), "All day-ish")]] {
            let grid = build_grid(&config, date(), &busy);
            assert_eq!(grid.len(), 31);
            assert_eq!(grid[0].slot_start, NaiveTime::from_hms_opt(7, 0, 0).unwrap());
            assert_eq!(
                grid[30].slot_start,
                NaiveTime::from_hms_opt(22, 0, 0).unwrap()
            );
            for pair in grid.windows(2) {
                assert_eq!(
                    pair[1].slot_start - pair[0].slot_start,
                    chrono::Duration::minutes(30)
                );
            }
        }
    }

    #[test]
    fn test_half_open_containment() {
        let config = GridConfig::default();
        let busy = vec![interval((7, 0), (7, 30), "Standup")];

        let grid = build_grid(&config, date(), &busy);

        // An event covering [07:00, 07:30) marks 07:00 busy only; ending
        // exactly at 07:30 leaves that slot free
        assert!(slot(&grid, 7, 0).busy);
        assert_eq!(slot(&grid, 7, 0).label.as_deref(), Some("Standup"));
        assert!(!slot(&grid, 7, 30).busy);
        assert!(grid.iter().filter(|verdict| verdict.busy).count() == 1);
    }

    #[test]
    fn test_empty_intervals_all_free() {
        let grid = build_grid(&GridConfig::default(), date(), &[]);

        assert_eq!(grid.len(), 31);
        assert!(grid.iter().all(|verdict| !verdict.busy));
        assert!(grid.iter().all(|verdict| verdict.label.is_none()));
    }

    #[test]
    fn test_whole_day_interval_marks_every_slot() {
        let busy = vec![interval((0, 0), (23, 59), "Out of office")];

        let grid = build_grid(&GridConfig::default(), date(), &busy);

        assert!(grid.iter().all(|verdict| verdict.busy));
    }

    #[test]
    fn test_overlap_takes_first_label_in_order() {
        let busy = vec![
            interval((9, 0), (10, 0), "First"),
            interval((9, 30), (11, 0), "Second"),
        ];

        let grid = build_grid(&GridConfig::default(), date(), &busy);

        // 09:30 is inside both; the chronologically first interval wins
        assert!(slot(&grid, 9, 30).busy);
        assert_eq!(slot(&grid, 9, 30).label.as_deref(), Some("First"));
        assert_eq!(slot(&grid, 10, 30).label.as_deref(), Some("Second"));
    }

    #[test]
    fn test_interval_outside_window_contributes_nothing() {
        let busy = vec![interval((5, 0), (6, 30), "Early call")];

        let grid = build_grid(&GridConfig::default(), date(), &busy);

        assert!(grid.iter().all(|verdict| !verdict.busy));
    }

    #[test]
    fn test_custom_window_and_granularity() {
        let config = GridConfig {
            window_start_hour: 9,
            window_end_hour: 17,
            granularity_minutes: 60,
        };

        let grid = build_grid(&config, date(), &[]);

        assert_eq!(grid.len(), 9);
        assert_eq!(grid[0].slot_start, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(
            grid[8].slot_start,
            NaiveTime::from_hms_opt(17, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_inverted_interval_is_rejected() {
        let day = date();
        let start = local_instant(day.and_time(NaiveTime::from_hms_opt(10, 0, 0).unwrap()));
        let end = local_instant(day.and_time(NaiveTime::from_hms_opt(9, 0, 0).unwrap()));

        assert!(BusyInterval::new(start, end, "Backwards".to_string()).is_none());
        assert!(BusyInterval::new(start, start, "Empty".to_string()).is_none());
    }
}
