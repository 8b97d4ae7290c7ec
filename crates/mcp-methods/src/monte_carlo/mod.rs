//! Monte Carlo simulation framework.
//!
//! # Overview
//!
//! * [`TimeGrid`] — the fixed discretization of `[0, T]`
//! * [`RandomSequenceGenerator`] — variate source plus optional Brownian
//!   bridge, producing one vector of step shocks per draw
//! * [`PathGenerator`] — evolves a 1-D process along the grid
//! * [`KnockOut`] — up/down barrier policy that ends a row early
//! * [`BatchDriver`] — fills the rows of a 2-D buffer, with burn-in and
//!   cooperative cancellation
//!
//! None of the generators may be shared between threads while drawing:
//! quasi-random sequences are position dependent. Parallel runs need one
//! generator per worker and disjoint row ranges.

mod barrier;
mod batch;
mod path;
mod path_generator;
mod sequence_generator;
mod time_grid;

pub use barrier::{BarrierLevel, BarrierSide, KnockOut, WriteStrategy};
pub use batch::{
    BatchDriver, BatchOutcome, CancelWhen, CancellationSignal, NeverCancel, DEFAULT_CHECK_INTERVAL,
};
pub use path::Path;
pub use path_generator::PathGenerator;
pub use sequence_generator::RandomSequenceGenerator;
pub use time_grid::TimeGrid;
