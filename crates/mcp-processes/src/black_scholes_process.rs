//! Generalized Black-Scholes process.
//!
//! `dS/S = (r(t) − q(t)) dt + σ(t) dW`
//!
//! where `r` is the risk-free rate, `q` the continuous dividend yield and
//! `σ` a strike-independent Black volatility. Steps are taken exactly in
//! log space using the forward rates and the Black variance accrued over
//! the step, so the scheme has no time-discretization bias.
//!
//! Constructors:
//! * [`black_scholes_process`] — no dividends
//! * [`black_scholes_merton_process`] — continuous dividend yield

use crate::stochastic_process::StochasticProcess1D;
use mcp_core::{Real, Time};
use mcp_termstructures::{BlackVolTermStructure, FlatForward, YieldTermStructure};
use mcp_time::Actual365Fixed;
use std::sync::Arc;

/// Step used for the instantaneous local volatility.
const DT: Time = 1.0e-4;

/// A generalized Black-Scholes stochastic process on the price level.
///
/// `drift` and `diffusion` are those of `ln S`; `apply(x, dx) = x·exp(dx)`.
#[derive(Debug, Clone)]
pub struct GeneralizedBlackScholesProcess {
    x0: Real,
    dividend_yield: Arc<dyn YieldTermStructure>,
    risk_free_rate: Arc<dyn YieldTermStructure>,
    black_vol: Arc<dyn BlackVolTermStructure>,
}

impl GeneralizedBlackScholesProcess {
    /// Create a process from a spot value and its three curves.
    pub fn new(
        x0: Real,
        dividend_yield: Arc<dyn YieldTermStructure>,
        risk_free_rate: Arc<dyn YieldTermStructure>,
        black_vol: Arc<dyn BlackVolTermStructure>,
    ) -> Self {
        Self {
            x0,
            dividend_yield,
            risk_free_rate,
            black_vol,
        }
    }

    /// The spot value.
    pub fn spot(&self) -> Real {
        self.x0
    }

    /// The risk-free rate term structure.
    pub fn risk_free_rate(&self) -> &dyn YieldTermStructure {
        &*self.risk_free_rate
    }

    /// The dividend yield term structure.
    pub fn dividend_yield(&self) -> &dyn YieldTermStructure {
        &*self.dividend_yield
    }

    /// The Black volatility term structure.
    pub fn black_volatility(&self) -> &dyn BlackVolTermStructure {
        &*self.black_vol
    }

    /// Log-space drift over `[t, t+dt]` before the convexity correction.
    fn carry(&self, t: Time, dt: Time) -> Real {
        let fr = self.risk_free_rate.forward_rate(t, t + dt);
        let fq = self.dividend_yield.forward_rate(t, t + dt);
        (fr - fq) * dt
    }
}

impl StochasticProcess1D for GeneralizedBlackScholesProcess {
    fn x0(&self) -> Real {
        self.x0
    }

    fn drift(&self, t: Time, x: Real) -> Real {
        let sigma = self.diffusion(t, x);
        let r = self.risk_free_rate.forward_rate(t, t);
        let q = self.dividend_yield.forward_rate(t, t);
        r - q - 0.5 * sigma * sigma
    }

    fn diffusion(&self, t: Time, _x: Real) -> Real {
        let dv = self.black_vol.black_variance(t + DT) - self.black_vol.black_variance(t);
        (dv.max(0.0) / DT).sqrt()
    }

    fn expectation(&self, t: Time, x: Real, dt: Time) -> Real {
        self.apply(x, self.carry(t, dt))
    }

    fn std_deviation(&self, t: Time, x: Real, dt: Time) -> Real {
        self.variance(t, x, dt).sqrt()
    }

    fn variance(&self, t: Time, _x: Real, dt: Time) -> Real {
        let v = self.black_vol.black_variance(t + dt) - self.black_vol.black_variance(t);
        v.max(0.0)
    }

    fn evolve(&self, t: Time, x: Real, dt: Time, dw: Real) -> Real {
        let var = self.variance(t, x, dt);
        self.apply(x, self.carry(t, dt) - 0.5 * var + var.sqrt() * dw)
    }

    fn apply(&self, x: Real, dx: Real) -> Real {
        x * dx.exp()
    }
}

/// A Black-Scholes process with no dividends (`q = 0`).
pub fn black_scholes_process(
    x0: Real,
    risk_free_rate: Arc<dyn YieldTermStructure>,
    black_vol: Arc<dyn BlackVolTermStructure>,
) -> GeneralizedBlackScholesProcess {
    let ref_date = risk_free_rate.reference_date();
    let zero_yield: Arc<dyn YieldTermStructure> =
        Arc::new(FlatForward::new(ref_date, 0.0, Arc::new(Actual365Fixed)));
    GeneralizedBlackScholesProcess::new(x0, zero_yield, risk_free_rate, black_vol)
}

/// A Black-Scholes-Merton process with a continuous dividend yield.
pub fn black_scholes_merton_process(
    x0: Real,
    dividend_yield: Arc<dyn YieldTermStructure>,
    risk_free_rate: Arc<dyn YieldTermStructure>,
    black_vol: Arc<dyn BlackVolTermStructure>,
) -> GeneralizedBlackScholesProcess {
    GeneralizedBlackScholesProcess::new(x0, dividend_yield, risk_free_rate, black_vol)
}
