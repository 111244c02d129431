//! Terminal UI rendering using ratatui.
//!
//! This module contains all the view-specific rendering logic for the TUI.
//! Each view is implemented in its own submodule with a `render` function.
//!
//! ## Submodules
//!
//! - [`chart`]: Probability chart drawn from projected points, with threshold markers
//! - [`history`]: Table of recent observations, newest first
//! - [`stats`]: Per-band shares, value statistics and a trend sparkline
//! - [`detail`]: Modal overlay showing one observation
//! - [`common`]: Shared components (header, tabs, status bar, help overlay)
//! - [`theme`]: Light/dark theme support with terminal auto-detection
//!
//! ## Rendering Architecture
//!
//! The main loop in `main.rs` calls into these modules based on the current view:
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ Header (common::render_header)       │
//! ├──────────────────────────────────────┤
//! │ Tabs (common::render_tabs)           │
//! ├──────────────────────────────────────┤
//! │                                      │
//! │ View Content                         │
//! │ (chart/history/stats::render)        │
//! │                                      │
//! ├──────────────────────────────────────┤
//! │ Status Bar (common::render_status)   │
//! └──────────────────────────────────────┘
//!         ↑
//!    Overlays rendered on top:
//!    - detail::render_overlay
//!    - common::render_help
//! ```

pub mod chart;
pub mod common;
pub mod detail;
pub mod history;
pub mod stats;
pub mod theme;

pub use theme::{Theme, ThemeMode};

use chrono::Local;
use probwatch_core::{Observation, Status, BAD_THRESHOLD, GOOD_THRESHOLD};

/// Local wall-clock time of an observation, `HH:MM:SS`.
pub fn format_time(obs: &Observation) -> String {
    obs.timestamp().with_timezone(&Local).format("%H:%M:%S").to_string()
}

/// Value interval covered by a status band, as shown in legends and titles.
pub fn band_range(status: Status) -> String {
    match status {
        Status::Good => format!("≤ {:.0}%", GOOD_THRESHOLD),
        Status::Normal => format!("> {:.0}% and < {:.0}%", GOOD_THRESHOLD, BAD_THRESHOLD),
        Status::Bad => format!("≥ {:.0}%", BAD_THRESHOLD),
    }
}

/// Value as a percentage with one decimal.
pub fn format_value(value: f64) -> String {
    format!("{:.1}%", value)
}
