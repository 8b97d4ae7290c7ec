//! # mcp-methods
//!
//! Monte Carlo path generation.
//!
//! # Modules
//!
//! * [`monte_carlo`] — time grid, path generator, knock-out barriers and
//!   the batch driver that fills caller-supplied buffers

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Monte Carlo simulation: time grids, path generation, barriers, batches.
pub mod monte_carlo;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use monte_carlo::{
    BarrierLevel, BarrierSide, BatchDriver, BatchOutcome, CancelWhen, CancellationSignal,
    KnockOut, NeverCancel, Path, PathGenerator, RandomSequenceGenerator, TimeGrid, WriteStrategy,
};
