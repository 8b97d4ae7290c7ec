//! `BlackVolTermStructure` — Black-volatility term structures.
//!
//! Provides the `BlackVolTermStructure` trait and `BlackConstantVol`, a flat
//! Black volatility. Volatilities here are strike-independent: paths are
//! generated for the underlying alone.

use crate::term_structure::{TermStructure, TermStructureData};
use mcp_core::{Real, Time, Volatility};
use mcp_time::{Date, DayCounter};
use std::sync::Arc;

/// A Black-volatility term structure.
///
/// Implementors must provide at least one of
/// [`black_vol_impl`](BlackVolTermStructure::black_vol_impl) (σ(t)) and
/// [`black_variance_impl`](BlackVolTermStructure::black_variance_impl) (σ²·t).
pub trait BlackVolTermStructure: TermStructure {
    /// Return the Black volatility for time `t`.
    fn black_vol_impl(&self, t: Time) -> Volatility {
        if t <= 0.0 {
            return 0.0;
        }
        (self.black_variance_impl(t) / t).sqrt()
    }

    /// Return the Black variance `σ²·t` for time `t`.
    fn black_variance_impl(&self, t: Time) -> Real {
        let vol = self.black_vol_impl(t);
        vol * vol * t
    }

    /// Black volatility for a time.
    fn black_vol(&self, t: Time) -> Volatility {
        self.black_vol_impl(t)
    }

    /// Black variance for a time.
    fn black_variance(&self, t: Time) -> Real {
        self.black_variance_impl(t)
    }

    /// Black volatility for a date.
    fn black_vol_date(&self, date: Date) -> Volatility {
        self.black_vol_impl(self.time_from_reference(date))
    }

    /// Black variance for a date.
    fn black_variance_date(&self, date: Date) -> Real {
        self.black_variance_impl(self.time_from_reference(date))
    }
}

// ── BlackConstantVol ──────────────────────────────────────────────────────────

/// A flat (constant) Black volatility.
///
/// `σ(t) = constant` for all `t > 0`.
#[derive(Debug, Clone)]
pub struct BlackConstantVol {
    data: TermStructureData,
    volatility: Volatility,
}

impl BlackConstantVol {
    /// Create a constant Black volatility.
    pub fn new(
        reference_date: Date,
        volatility: Volatility,
        day_counter: Arc<dyn DayCounter>,
    ) -> Self {
        Self {
            data: TermStructureData::new(reference_date, day_counter),
            volatility,
        }
    }

    /// The constant volatility value.
    pub fn volatility(&self) -> Volatility {
        self.volatility
    }
}

impl TermStructure for BlackConstantVol {
    fn reference_date(&self) -> Date {
        self.data.reference_date
    }

    fn day_counter(&self) -> &dyn DayCounter {
        &*self.data.day_counter
    }
}

impl BlackVolTermStructure for BlackConstantVol {
    fn black_vol_impl(&self, _t: Time) -> Volatility {
        self.volatility
    }

    fn black_variance_impl(&self, t: Time) -> Real {
        self.volatility * self.volatility * t
    }
}
