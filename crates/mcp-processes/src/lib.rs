//! # mcp-processes
//!
//! One-dimensional diffusion processes driven by the path generator.
//!
//! The generator only ever calls [`StochasticProcess1D::evolve`]; the
//! conditional moments are exposed for callers that want the deterministic
//! skeleton of a path.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// `StochasticProcess1D` — the process interface seen by the path generator.
pub mod stochastic_process;

/// Generalized Black-Scholes process and its BS / BSM constructors.
pub mod black_scholes_process;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use black_scholes_process::{
    black_scholes_merton_process, black_scholes_process, GeneralizedBlackScholesProcess,
};
pub use stochastic_process::StochasticProcess1D;
