//! Derived data for display and export.
//!
//! The observations themselves live in [`probwatch_core::SeriesBuffer`]; this
//! module computes what the views and the JSON export need on top of them.
//!
//! ## Submodules
//!
//! - [`duration`]: Parsing interval strings (e.g., "3s", "500ms") and formatting elapsed time
//! - [`export`]: JSON export of the history with a summary block
//! - [`stats`]: Per-band counts and min/max/mean ([`SeriesStats`])
//!
//! ## Data Flow
//!
//! ```text
//! Observation (from the source)
//!        │
//!        ▼
//! SeriesBuffer::push()
//!        │
//!        ├──▶ SeriesStats::from_observations() (header, stats view)
//!        │
//!        └──▶ export_series() (on demand)
//! ```

pub mod duration;
pub mod export;
pub mod stats;

pub use export::{export_series, export_value};
pub use stats::SeriesStats;
