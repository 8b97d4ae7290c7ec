//! `InterpolatedZeroCurve` — a yield curve defined by zero rates at pillar
//! dates, linearly interpolated in time.
//!
//! Beyond the last pillar the instantaneous forward rate is held at its
//! last-pillar value.

use crate::term_structure::{pillar_times, TermStructure, TermStructureData};
use crate::yield_term_structure::YieldTermStructure;
use mcp_core::{errors::Result, Rate, Real, Time};
use mcp_math::{Interpolation1D, LinearInterpolation};
use mcp_time::{Date, DayCounter};
use std::sync::Arc;

/// A yield curve defined by continuously-compounded zero rates.
#[derive(Debug, Clone)]
pub struct InterpolatedZeroCurve {
    data: TermStructureData,
    dates: Vec<Date>,
    interp: LinearInterpolation,
    /// Instantaneous forward at the last pillar.
    forward_max: Rate,
}

impl InterpolatedZeroCurve {
    /// Build a zero curve from pillar dates and zero rates.
    ///
    /// The first date is the reference date; dates must be strictly
    /// increasing.
    pub fn new(
        dates: &[Date],
        zero_rates: &[Rate],
        day_counter: Arc<dyn DayCounter>,
    ) -> Result<Self> {
        let times = pillar_times(dates, zero_rates, &*day_counter)?;
        let interp = LinearInterpolation::new(&times, zero_rates)?;

        let n = times.len();
        let slope = (zero_rates[n - 1] - zero_rates[n - 2]) / (times[n - 1] - times[n - 2]);
        let forward_max = zero_rates[n - 1] + times[n - 1] * slope;

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

    /// Return the pillar zero rates.
    pub fn zero_rates(&self) -> &[Rate] {
        self.interp.ys()
    }
}

impl TermStructure for InterpolatedZeroCurve {
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

impl YieldTermStructure for InterpolatedZeroCurve {
    fn zero_rate_impl(&self, t: Time) -> Rate {
        let t_max = self.interp.x_max();
        if t <= t_max {
            return self.interp.operator(t);
        }
        let z_max = self.interp.operator(t_max);
        (z_max * t_max + self.forward_max * (t - t_max)) / t
    }
}
