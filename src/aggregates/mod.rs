//! History aggregation for the charts and summary cards.
//!
//! Time-window filtering (always returned in chronological order), day-part
//! averages, the last appended reading, and adjacent lying→standing pairs.
//! All functions take a history snapshot and accept an empty one.

mod day_parts;
mod pairs;
mod types;
mod window;

pub use day_parts::*;
pub use pairs::*;
pub use types::*;
pub use window::*;

// ── Tests ──────────────────────────────────────────────────────────────────
