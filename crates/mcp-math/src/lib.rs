//! # mcp-math
//!
//! Mathematical building blocks for path generation: the normal
//! distribution, linear interpolation, uniform and Gaussian random
//! sequences (Mersenne Twister, Sobol), and the Brownian-bridge transform.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Standard normal distribution.
pub mod distributions;

/// 1D interpolation.
pub mod interpolation;

/// Random number and sequence generators.
pub mod random_numbers;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use distributions::{normal_cdf, normal_cdf_inverse, normal_pdf};
pub use interpolation::{Interpolation1D, LinearInterpolation};
pub use random_numbers::{
    brownian_bridge::BrownianBridge, low_discrepancy, pseudo_random, GaussianRsg,
    InverseCumulativeRsg, LowDiscrepancy, MersenneTwisterRsg, MersenneTwisterUniformRng,
    PseudoRandom, Sample, SobolRsg, VariateSource,
};
