//! `StochasticProcess1D` — base trait for one-dimensional processes.
//!
//! A process `dX = μ(t,X) dt + σ(t,X) dW` is described by its drift (`μ`),
//! its diffusion (`σ`) and an `apply` rule that adds a change to a state.
//! Processes that evolve in log space (Black-Scholes) override `apply`.

use mcp_core::{Real, Time};

/// A 1-dimensional stochastic process `dX = μ(t,X) dt + σ(t,X) dW`.
///
/// Implementations are read-only once built and may be shared between
/// path generators.
pub trait StochasticProcess1D: std::fmt::Debug + Send + Sync {
    /// Initial value of the process.
    fn x0(&self) -> Real;

    /// Drift `μ(t, x)`.
    fn drift(&self, t: Time, x: Real) -> Real;

    /// Diffusion `σ(t, x)`.
    fn diffusion(&self, t: Time, x: Real) -> Real;

    /// Expected value `E[x(t+Δt) | x(t) = x]`.
    ///
    /// Default: Euler, `apply(x, μ(t,x)·Δt)`.
    fn expectation(&self, t: Time, x: Real, dt: Time) -> Real {
        self.apply(x, self.drift(t, x) * dt)
    }

    /// Standard deviation of the change over `Δt`.
    ///
    /// Default: `σ(t,x) · √Δt`.
    fn std_deviation(&self, t: Time, x: Real, dt: Time) -> Real {
        self.diffusion(t, x) * dt.sqrt()
    }

    /// Variance of the change over `Δt`.
    fn variance(&self, t: Time, x: Real, dt: Time) -> Real {
        let s = self.std_deviation(t, x, dt);
        s * s
    }

    /// Advance `x` from `t` to `t + Δt` given a standard normal shock `dw`.
    ///
    /// Default: `apply(E, S · dw)`.
    fn evolve(&self, t: Time, x: Real, dt: Time, dw: Real) -> Real {
        self.apply(self.expectation(t, x, dt), self.std_deviation(t, x, dt) * dw)
    }

    /// Add the change `dx` to the state `x`.
    fn apply(&self, x: Real, dx: Real) -> Real {
        x + dx
    }
}
