//! Batch driver: fills the rows of a caller-supplied buffer.
//!
//! A batch optionally discards `skip` draws first (burn-in, or alignment
//! with a stream generated elsewhere), then writes one path per row.
//! Cancellation is polled before rows `0, k, 2k, …`; a cancelled batch
//! returns the rows already written and is not an error.

use super::barrier::KnockOut;
use super::path_generator::PathGenerator;
use super::sequence_generator::RandomSequenceGenerator;
use mcp_core::{ensure_arg, errors::Result, Real};
use mcp_math::VariateSource;
use ndarray::{ArrayViewMut2, Axis};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Default number of rows between two cancellation checks.
pub const DEFAULT_CHECK_INTERVAL: usize = 10_000;

/// A cooperative stop request polled by the batch driver.
pub trait CancellationSignal {
    /// Whether the batch should stop.
    fn is_cancelled(&self) -> bool;
}

impl CancellationSignal for AtomicBool {
    fn is_cancelled(&self) -> bool {
        self.load(Ordering::SeqCst)
    }
}

impl<T: CancellationSignal + ?Sized> CancellationSignal for Arc<T> {
    fn is_cancelled(&self) -> bool {
        (**self).is_cancelled()
    }
}

/// Adapts a closure into a [`CancellationSignal`].
#[derive(Debug, Clone, Copy)]
pub struct CancelWhen<F>(pub F);

impl<F: Fn() -> bool> CancellationSignal for CancelWhen<F> {
    fn is_cancelled(&self) -> bool {
        (self.0)()
    }
}

/// A signal that never fires.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancel;

impl CancellationSignal for NeverCancel {
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Result of a batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Rows written, starting from row 0.
    pub rows: usize,
    /// Whether the batch stopped on a cancellation request.
    pub cancelled: bool,
}

/// Drives a generator over the rows of a 2-D buffer.
#[derive(Debug, Clone, Copy)]
pub struct BatchDriver {
    skip: usize,
    check_interval: usize,
}

impl Default for BatchDriver {
    fn default() -> Self {
        Self {
            skip: 0,
            check_interval: DEFAULT_CHECK_INTERVAL,
        }
    }
}

impl BatchDriver {
    /// A driver that discards `skip` draws before the first row.
    pub fn new(skip: usize) -> Self {
        Self {
            skip,
            ..Self::default()
        }
    }

    /// Poll the cancellation signal every `rows` rows (at least 1).
    pub fn with_check_interval(mut self, rows: usize) -> Self {
        self.check_interval = rows.max(1);
        self
    }

    /// Number of draws discarded before the first row.
    pub fn skip(&self) -> usize {
        self.skip
    }

    /// Rows between two cancellation checks.
    pub fn check_interval(&self) -> usize {
        self.check_interval
    }

    /// Fill rows `[0, path_count)` of `out` with paths.
    ///
    /// # Errors
    /// `InvalidArgument` if `out` has fewer than `path_count` rows, a row
    /// width other than `steps + 1`, or barrier data shorter than the grid.
    /// Validation happens before any draw.
    pub fn generate_batch<S, C>(
        &self,
        generator: &mut PathGenerator<S>,
        knock_out: &KnockOut,
        mut out: ArrayViewMut2<'_, Real>,
        path_count: usize,
        cancel: &C,
    ) -> Result<BatchOutcome>
    where
        S: VariateSource,
        C: CancellationSignal + ?Sized,
    {
        let points = generator.time_grid().size();
        check_shape(&out, path_count, points)?;
        knock_out.validate(points)?;
        debug!(
            path_count,
            skip = self.skip,
            strategy = %knock_out.strategy(),
            "starting path batch"
        );

        for _ in 0..self.skip {
            generator.draw();
        }
        for (row, view) in out.axis_iter_mut(Axis(0)).take(path_count).enumerate() {
            if let Some(outcome) = self.poll(row, cancel) {
                return Ok(outcome);
            }
            generator.fill_row(view, knock_out);
        }
        info!(rows = path_count, "path batch complete");
        Ok(BatchOutcome {
            rows: path_count,
            cancelled: false,
        })
    }

    /// Fill rows `[0, path_count)` of `out` with raw shocks in columns
    /// `1..=N`; column 0 is untouched.
    pub fn generate_raw_batch<S, C>(
        &self,
        generator: &mut RandomSequenceGenerator<S>,
        mut out: ArrayViewMut2<'_, Real>,
        path_count: usize,
        cancel: &C,
    ) -> Result<BatchOutcome>
    where
        S: VariateSource,
        C: CancellationSignal + ?Sized,
    {
        let points = generator.time_grid().size();
        check_shape(&out, path_count, points)?;
        debug!(path_count, skip = self.skip, strategy = "raw", "starting sequence batch");

        for _ in 0..self.skip {
            generator.draw();
        }
        for (row, view) in out.axis_iter_mut(Axis(0)).take(path_count).enumerate() {
            if let Some(outcome) = self.poll(row, cancel) {
                return Ok(outcome);
            }
            generator.fill_row(view);
        }
        info!(rows = path_count, "sequence batch complete");
        Ok(BatchOutcome {
            rows: path_count,
            cancelled: false,
        })
    }

    fn poll<C>(&self, row: usize, cancel: &C) -> Option<BatchOutcome>
    where
        C: CancellationSignal + ?Sized,
    {
        if row % self.check_interval == 0 && cancel.is_cancelled() {
            warn!(rows = row, "MC simulation stopped. {row} paths are made");
            return Some(BatchOutcome {
                rows: row,
                cancelled: true,
            });
        }
        None
    }
}

fn check_shape(out: &ArrayViewMut2<'_, Real>, path_count: usize, points: usize) -> Result<()> {
    let (rows, cols) = out.dim();
    ensure_arg!(
        rows >= path_count,
        "output buffer has {rows} rows, {path_count} paths requested"
    );
    ensure_arg!(
        cols == points,
        "output buffer has {cols} columns, need {points} (steps + 1)"
    );
    Ok(())
}
