//! Slot-grid reconciliation of busy intervals against the daily window

pub mod grid;
pub mod reference;

pub use grid::{BusyInterval, GridConfig, SlotVerdict, build_grid};
pub use reference::ScheduleReference;
