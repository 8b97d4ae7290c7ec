//! `InterpolatedDiscountCurve` — a yield curve defined by discount factors at
//! pillar dates, linearly interpolated in time.
//!
//! Beyond the last pillar the curve continues with the instantaneous forward
//! implied by the last segment.

use crate::term_structure::{pillar_times, TermStructure, TermStructureData};
use crate::yield_term_structure::YieldTermStructure;
use mcp_core::{ensure, errors::Result, DiscountFactor, Rate, Real, Time};
use mcp_math::{Interpolation1D, LinearInterpolation};
use mcp_time::{Date, DayCounter};
use std::sync::Arc;

/// A yield curve defined by discount factors.
#[derive(Debug, Clone)]
pub struct InterpolatedDiscountCurve {
    data: TermStructureData,
    dates: Vec<Date>,
    interp: LinearInterpolation,
    /// Instantaneous forward at the last pillar.
    forward_max: Rate,
}

impl InterpolatedDiscountCurve {
    /// Build a discount curve from pillar dates and discount factors.
    ///
    /// The first date is the reference date and its discount factor must be
    /// 1; every factor must be positive.
    pub fn new(
        dates: &[Date],
        discounts: &[DiscountFactor],
        day_counter: Arc<dyn DayCounter>,
    ) -> Result<Self> {
        let times = pillar_times(dates, discounts, &*day_counter)?;
        ensure!(
            discounts[0] == 1.0,
            "the first discount factor must be 1, got {}",
            discounts[0]
        );
        ensure!(
            discounts.iter().all(|&d| d > 0.0),
            "discount factors must be positive"
        );
        let interp = LinearInterpolation::new(&times, discounts)?;

        let n = times.len();
        let slope = (discounts[n - 1] - discounts[n - 2]) / (times[n - 1] - times[n - 2]);
        let forward_max = -slope / discounts[n - 1];

        Ok(Self {
            data: TermStructureData::new(dates[0], day_counter),
            dates: dates.to_vec(),
            interp,
            forward_max,
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

    /// Return the pillar discount factors.
    pub fn discounts(&self) -> &[DiscountFactor] {
        self.interp.ys()
    }
}

impl TermStructure for InterpolatedDiscountCurve {
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

impl YieldTermStructure for InterpolatedDiscountCurve {
    fn discount_impl(&self, t: Time) -> DiscountFactor {
        let t_max = self.interp.x_max();
        if t <= t_max {
            return self.interp.operator(t);
        }
        self.interp.operator(t_max) * (-self.forward_max * (t - t_max)).exp()
    }
}
