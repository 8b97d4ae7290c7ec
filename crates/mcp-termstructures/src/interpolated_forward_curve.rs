//! `InterpolatedForwardCurve` — a yield curve defined by instantaneous
//! forward rates at pillar dates.
//!
//! The forwards are linearly interpolated in time and discount factors are
//! obtained by integrating them exactly: `P(t) = exp(−∫₀ᵗ f(s) ds)`. Beyond
//! the last pillar the forward is held flat.

use crate::term_structure::{pillar_times, TermStructure, TermStructureData};
use crate::yield_term_structure::YieldTermStructure;
use mcp_core::{errors::Result, DiscountFactor, Rate, Real, Time};
use mcp_math::{Interpolation1D, LinearInterpolation};
use mcp_time::{Date, DayCounter};
use std::sync::Arc;

/// A yield curve defined by instantaneous forward rates at known dates.
#[derive(Debug, Clone)]
pub struct InterpolatedForwardCurve {
    data: TermStructureData,
    dates: Vec<Date>,
    interp: LinearInterpolation,
}

impl InterpolatedForwardCurve {
    /// Build a forward-rate curve from pillar dates and instantaneous
    /// forward rates.
    ///
    /// The first date is the reference date; dates must be strictly
    /// increasing.
    pub fn new(
        dates: &[Date],
        forwards: &[Rate],
        day_counter: Arc<dyn DayCounter>,
    ) -> Result<Self> {
        let times = pillar_times(dates, forwards, &*day_counter)?;
        let interp = LinearInterpolation::new(&times, forwards)?;
        Ok(Self {
            data: TermStructureData::new(dates[0], day_counter),
            dates: dates.to_vec(),
            interp,
        })
    }

    /// Return the pillar dates.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Return the pillar times.
    pub fn times(&self) -> &[Real] {
        self.interp.xs()
    }

    /// Return the pillar forward rates.
    pub fn forwards(&self) -> &[Rate] {
        self.interp.ys()
    }

    /// `∫₀ᵗ f(s) ds`.
    fn integrated_forward(&self, t: Time) -> Real {
        let t_max = self.interp.x_max();
        if t <= t_max {
            return self.interp.primitive(t);
        }
        self.interp.primitive(t_max) + self.interp.operator(t_max) * (t - t_max)
    }
}

impl TermStructure for InterpolatedForwardCurve {
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

impl YieldTermStructure for InterpolatedForwardCurve {
    fn discount_impl(&self, t: Time) -> DiscountFactor {
        if t <= 0.0 {
            return 1.0;
        }
        (-self.integrated_forward(t)).exp()
    }

    fn zero_rate_impl(&self, t: Time) -> Rate {
        if t <= 0.0 {
            return self.interp.operator(0.0);
        }
        self.integrated_forward(t) / t
    }
}
