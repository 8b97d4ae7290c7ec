//! `TermStructure` — base trait for all term structures.
//!
//! Every term structure has a **reference date**, from which time is
//! measured, and a **day counter** turning dates into year fractions.

use mcp_core::{ensure, errors::Result, Real, Time};
use mcp_time::{Date, DayCounter};
use std::sync::Arc;

/// Base trait for all term structures.
pub trait TermStructure: std::fmt::Debug + Send + Sync {
    /// The date at which discount = 1.0 and from which time is measured.
    fn reference_date(&self) -> Date;

    /// The day counter used for date → time-fraction conversions.
    fn day_counter(&self) -> &dyn DayCounter;

    /// The last pillar date. Queries past it are extrapolated.
    fn max_date(&self) -> Date {
        Date::MAX
    }

    /// Convert a date to a year fraction relative to the reference date.
    fn time_from_reference(&self, date: Date) -> Time {
        self.day_counter()
            .year_fraction(self.reference_date(), date)
    }
}

/// Common data shared by the concrete term structures.
#[derive(Debug, Clone)]
pub struct TermStructureData {
    /// Reference date.
    pub reference_date: Date,
    /// Day counter for time calculations.
    pub day_counter: Arc<dyn DayCounter>,
}

impl TermStructureData {
    /// Create a new data bundle.
    pub fn new(reference_date: Date, day_counter: Arc<dyn DayCounter>) -> Self {
        Self {
            reference_date,
            day_counter,
        }
    }
}

/// Check pillar data and convert the dates to year fractions.
///
/// The first date is the reference date, so the first time is 0.
pub(crate) fn pillar_times(
    dates: &[Date],
    values: &[Real],
    day_counter: &dyn DayCounter,
) -> Result<Vec<Time>> {
    ensure!(
        dates.len() >= 2,
        "need at least 2 dates (reference + 1 pillar), got {}",
        dates.len()
    );
    ensure!(
        dates.len() == values.len(),
        "dates and values must have the same length ({} != {})",
        dates.len(),
        values.len()
    );
    ensure!(
        values.iter().all(|v| v.is_finite()),
        "curve values must be finite"
    );
    let times: Vec<Time> = dates
        .iter()
        .map(|&d| day_counter.year_fraction(dates[0], d))
        .collect();
    ensure!(
        times.windows(2).all(|w| w[1] > w[0]),
        "pillar dates must be strictly increasing"
    );
    Ok(times)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcp_time::{Actual365Fixed, Thirty360};

    fn dates(offsets: &[i32]) -> Vec<Date> {
        let today = Date::from_ymd(2020, 2, 24).unwrap();
        offsets.iter().map(|&n| today.add_days(n).unwrap()).collect()
    }

    #[test]
    fn pillar_times_start_at_zero() {
        let t = pillar_times(&dates(&[0, 73, 365]), &[0.01, 0.02, 0.03], &Actual365Fixed)
            .unwrap();
        assert_eq!(t, vec![0.0, 0.2, 1.0]);
    }

    #[test]
    fn pillar_times_reject_bad_input() {
        assert!(pillar_times(&dates(&[0]), &[0.01], &Actual365Fixed).is_err());
        assert!(pillar_times(&dates(&[0, 10]), &[0.01], &Actual365Fixed).is_err());
        assert!(pillar_times(&dates(&[0, 10]), &[0.01, f64::NAN], &Actual365Fixed).is_err());
        assert!(pillar_times(&dates(&[0, 10, 5]), &[0.0; 3], &Actual365Fixed).is_err());
        // Under 30/360 the 30th and 31st of a month are the same day.
        let eom = [
            Date::from_ymd(2020, 3, 30).unwrap(),
            Date::from_ymd(2020, 3, 31).unwrap(),
        ];
        assert!(pillar_times(&eom, &[0.0; 2], &Thirty360).is_err());
    }
}
