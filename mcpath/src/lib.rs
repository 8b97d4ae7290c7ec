//! # mcpath
//!
//! Quasi-Monte Carlo path generation for barrier-style payoffs.
//!
//! This crate is the **façade** over the workspace: it re-exports the
//! underlying `mcp-*` crates and adds the request layer that turns a market
//! description (yield, dividend and volatility curves, barrier levels) into
//! a filled path buffer.
//!
//! ## Quick start
//!
//! ```rust
//! use mcpath::{generate_paths, CurveSpec, PathRequest, VolSpec};
//! use mcpath::time::{Date, DayCounterKind};
//! use ndarray::Array2;
//!
//! let today = Date::from_ymd(2020, 2, 24).unwrap();
//! let request = PathRequest::new(
//!     today,
//!     100,
//!     12,
//!     1.0,
//!     CurveSpec::flat(0.02, DayCounterKind::Actual365Fixed),
//!     VolSpec::flat(0.2, DayCounterKind::Actual365Fixed),
//! );
//! let mut out = Array2::zeros((100, 13));
//! let outcome = generate_paths(&request, out.view_mut()).unwrap();
//! assert_eq!(outcome.rows, 100);
//! assert_eq!(out[[0, 0]], 1.0);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, and error definitions.
pub use mcp_core as core;

/// Dates and day counters.
pub use mcp_time as time;

/// Random numbers, Brownian bridge, interpolation.
pub use mcp_math as math;

/// Yield and Black volatility term structures.
pub use mcp_termstructures as termstructures;

/// Diffusion processes.
pub use mcp_processes as processes;

/// Path generation and the batch driver.
pub use mcp_methods as methods;

// ── Modules ──────────────────────────────────────────────────────────────────

/// Market descriptions and factories keyed on type codes.
pub mod market;

/// Generation requests and their TOML form.
pub mod request;

/// Batch entry points.
pub mod api;

// ── Re-exports ───────────────────────────────────────────────────────────────

pub use api::{
    generate_paths, generate_paths_with_cancel, generate_raw_sequence,
    generate_raw_sequence_with_cancel, SPOT,
};
pub use market::{
    build_process, knock_out, BarrierKind, BarrierSpec, CurveKind, CurveSpec, ProcessKind,
    VolKind, VolSpec,
};
pub use mcp_core::{Error, Result};
pub use mcp_methods::{BatchOutcome, CancelWhen, CancellationSignal, NeverCancel};
pub use request::{PathRequest, SequenceRequest, DEFAULT_SEED};
