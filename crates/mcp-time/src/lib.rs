//! # mcp-time
//!
//! Calendar dates and the day-count conventions used to turn curve pillar
//! dates into year fractions.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// `Date` type.
pub mod date;

/// `DayCounter` trait and built-in day-count conventions.
pub mod day_counter;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use date::Date;
pub use day_counter::{
    Actual360, Actual365Fixed, ActualActualIsda, DayCounter, DayCounterKind, Thirty360,
};
