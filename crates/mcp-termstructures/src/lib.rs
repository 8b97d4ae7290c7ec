//! # mcp-termstructures
//!
//! Yield curves and Black volatility term structures consumed by the
//! Black-Scholes processes.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// `TermStructure` — base trait for all term structures.
pub mod term_structure;

/// `YieldTermStructure` — yield / interest-rate term structures.
pub mod yield_term_structure;

/// `FlatForward` — constant forward-rate yield curve.
pub mod flat_forward;

/// `InterpolatedZeroCurve` — linearly interpolated zero rates.
pub mod interpolated_zero_curve;

/// `InterpolatedForwardCurve` — linearly interpolated instantaneous forwards.
pub mod interpolated_forward_curve;

/// `InterpolatedDiscountCurve` — linearly interpolated discount factors.
pub mod interpolated_discount_curve;

/// `BlackVolTermStructure` and `BlackConstantVol`.
pub mod black_vol_term_structure;

/// `BlackVarianceCurve` — Black volatility term structure from pillar vols.
pub mod black_variance_curve;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use black_variance_curve::BlackVarianceCurve;
pub use black_vol_term_structure::{BlackConstantVol, BlackVolTermStructure};
pub use flat_forward::FlatForward;
pub use interpolated_discount_curve::InterpolatedDiscountCurve;
pub use interpolated_forward_curve::InterpolatedForwardCurve;
pub use interpolated_zero_curve::InterpolatedZeroCurve;
pub use term_structure::{TermStructure, TermStructureData};
pub use yield_term_structure::YieldTermStructure;
