//! `BlackVarianceCurve` — a Black volatility term structure built from
//! volatilities at pillar dates.
//!
//! The total variance `σ²(t)·t` is interpolated linearly in time through
//! `(0, 0)` and the pillars. After the last pillar the volatility is held
//! constant, so variance keeps growing linearly in `t`.

use crate::black_vol_term_structure::BlackVolTermStructure;
use crate::term_structure::{TermStructure, TermStructureData};
use mcp_core::{ensure, errors::Result, Real, Time, Volatility};
use mcp_math::{Interpolation1D, LinearInterpolation};
use mcp_time::{Date, DayCounter};
use std::sync::Arc;

/// Black volatility term structure interpolating total variance.
#[derive(Debug, Clone)]
pub struct BlackVarianceCurve {
    data: TermStructureData,
    dates: Vec<Date>,
    /// Variance interpolation, including the `(0, 0)` node.
    variances: LinearInterpolation,
}

impl BlackVarianceCurve {
    /// Build the curve from pillar dates strictly after `reference_date` and
    /// the Black volatilities at those dates.
    ///
    /// # Errors
    /// Fails if the dates are not strictly increasing and after the
    /// reference date, if a volatility is negative or non-finite, or if the
    /// implied total variance decreases between pillars.
    pub fn new(
        reference_date: Date,
        dates: &[Date],
        vols: &[Volatility],
        day_counter: Arc<dyn DayCounter>,
    ) -> Result<Self> {
        ensure!(!dates.is_empty(), "need at least one volatility pillar");
        ensure!(
            dates.len() == vols.len(),
            "dates and volatilities must have the same length ({} != {})",
            dates.len(),
            vols.len()
        );
        ensure!(
            vols.iter().all(|v| v.is_finite() && *v >= 0.0),
            "volatilities must be finite and non-negative"
        );

        let mut times = Vec::with_capacity(dates.len() + 1);
        let mut variances = Vec::with_capacity(dates.len() + 1);
        times.push(0.0);
        variances.push(0.0);
        for (&d, &v) in dates.iter().zip(vols) {
            let t = day_counter.year_fraction(reference_date, d);
            ensure!(
                t > times[times.len() - 1],
                "volatility pillar {d} is not after the previous pillar"
            );
            let var = v * v * t;
            ensure!(
                var >= variances[variances.len() - 1],
                "total variance must be non-decreasing (decreases at {d})"
            );
            times.push(t);
            variances.push(var);
        }

        Ok(Self {
            data: TermStructureData::new(reference_date, day_counter),
            dates: dates.to_vec(),
            variances: LinearInterpolation::new(&times, &variances)?,
        })
    }

    /// Return the pillar dates.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Pillar times, starting with the reference time 0.
    pub fn times(&self) -> &[Real] {
        self.variances.xs()
    }
}

impl TermStructure for BlackVarianceCurve {
    fn reference_date(&self) -> Date {
        self.data.reference_date
    }

    fn day_counter(&self) -> &dyn DayCounter {
        &*self.data.day_counter
    }

    fn max_date(&self) -> Date {
        self.dates[self.dates.len() - 1]
    }
}

impl BlackVolTermStructure for BlackVarianceCurve {
    fn black_variance_impl(&self, t: Time) -> Real {
        if t <= 0.0 {
            return 0.0;
        }
        let t_max = self.variances.x_max();
        if t <= t_max {
            return self.variances.operator(t);
        }
        self.variances.operator(t_max) * t / t_max
    }

    fn black_vol_impl(&self, t: Time) -> Volatility {
        // At t = 0 use the limit along the first segment.
        let t = if t <= 0.0 { self.variances.xs()[1] } else { t };
        (self.black_variance_impl(t) / t).sqrt()
    }
}
