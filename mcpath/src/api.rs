//! Batch entry points.
//!
//! Every entry point builds a fresh Sobol source (`low_discrepancy(steps,
//! seed)`), so two calls with the same request write identical buffers.
//! Paths start at a spot of 1.0.

use crate::market::{build_process, knock_out};
use crate::request::{PathRequest, SequenceRequest};
use mcp_core::{errors::Result, Real};
use mcp_math::low_discrepancy;
use mcp_methods::{
    BatchDriver, BatchOutcome, CancellationSignal, NeverCancel, PathGenerator,
    RandomSequenceGenerator,
};
use ndarray::ArrayViewMut2;
use tracing::{debug, info};

/// Initial value of every generated path.
pub const SPOT: Real = 1.0;

/// Fill rows `[0, path_count)` of `out` with price paths.
///
/// `out` needs at least `path_count` rows of `steps + 1` columns. A row
/// knocked out at column `j` is written up to `j` and left alone after it.
pub fn generate_paths(
    request: &PathRequest,
    out: ArrayViewMut2<'_, Real>,
) -> Result<BatchOutcome> {
    generate_paths_with_cancel(request, out, &NeverCancel)
}

/// [`generate_paths`] with a cancellation signal polled between rows.
pub fn generate_paths_with_cancel<C>(
    request: &PathRequest,
    out: ArrayViewMut2<'_, Real>,
    cancel: &C,
) -> Result<BatchOutcome>
where
    C: CancellationSignal + ?Sized,
{
    request.validate()?;
    let process = build_process(
        request.process,
        SPOT,
        request.evaluation_date,
        &request.rate,
        request.dividend.as_ref(),
        &request.volatility,
    )?;
    let knock_out = knock_out(&request.up_out, &request.down_out)?;
    info!(
        evaluation_date = %request.evaluation_date,
        path_count = request.path_count,
        steps = request.steps,
        horizon = request.horizon,
        process = ?request.process,
        "generating paths"
    );

    let source = low_discrepancy(request.steps, request.seed)?;
    let mut generator = PathGenerator::new(
        process,
        request.horizon,
        request.steps,
        source,
        request.brownian_bridge,
    )?;
    let outcome = BatchDriver::new(request.skip).generate_batch(
        &mut generator,
        &knock_out,
        out,
        request.path_count,
        cancel,
    )?;
    debug!(rows = outcome.rows, cancelled = outcome.cancelled, "paths generated");
    Ok(outcome)
}

/// Fill rows `[0, path_count)` of `out` with standard normal step shocks in
/// columns `1..=steps`. Column 0 is not written.
pub fn generate_raw_sequence(
    request: &SequenceRequest,
    out: ArrayViewMut2<'_, Real>,
) -> Result<BatchOutcome> {
    generate_raw_sequence_with_cancel(request, out, &NeverCancel)
}

/// [`generate_raw_sequence`] with a cancellation signal polled between rows.
pub fn generate_raw_sequence_with_cancel<C>(
    request: &SequenceRequest,
    out: ArrayViewMut2<'_, Real>,
    cancel: &C,
) -> Result<BatchOutcome>
where
    C: CancellationSignal + ?Sized,
{
    request.validate()?;
    info!(
        path_count = request.path_count,
        steps = request.steps,
        horizon = request.horizon,
        "generating raw sequences"
    );
    let source = low_discrepancy(request.steps, request.seed)?;
    let mut generator = RandomSequenceGenerator::new(
        request.horizon,
        request.steps,
        source,
        request.brownian_bridge,
    )?;
    BatchDriver::new(request.skip).generate_raw_batch(
        &mut generator,
        out,
        request.path_count,
        cancel,
    )
}
