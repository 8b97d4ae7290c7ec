//! `DayCounter` trait and the day-count conventions accepted by the market
//! data builders.
//!
//! A day counter turns a pair of dates into a year fraction. Curve pillars
//! and volatility pillars are given as dates, while the path generator works
//! on a grid of year fractions, so every term structure carries one.

use std::sync::Arc;

use crate::date::{is_leap_year, Date};
use mcp_core::errors::{Error, Result};
use mcp_core::{Real, Time};
use serde::{Deserialize, Serialize};

/// A convention for counting the fraction of a year between two dates.
pub trait DayCounter: std::fmt::Debug + Send + Sync {
    /// Human-readable name of this convention (e.g. `"Actual/365 (Fixed)"`).
    fn name(&self) -> &str;

    /// Number of days between `d1` and `d2` according to this convention.
    fn day_count(&self, d1: Date, d2: Date) -> i64;

    /// Fraction of a year between `d1` and `d2`.
    fn year_fraction(&self, d1: Date, d2: Date) -> Time;
}

fn actual_days(d1: Date, d2: Date) -> i64 {
    d1.days_between(d2) as i64
}

/// Actual/365 (Fixed): `actual_days / 365`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Actual365Fixed;

impl DayCounter for Actual365Fixed {
    fn name(&self) -> &str {
        "Actual/365 (Fixed)"
    }

    fn day_count(&self, d1: Date, d2: Date) -> i64 {
        actual_days(d1, d2)
    }

    fn year_fraction(&self, d1: Date, d2: Date) -> Time {
        self.day_count(d1, d2) as Real / 365.0
    }
}

/// Actual/360: `actual_days / 360`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Actual360;

impl DayCounter for Actual360 {
    fn name(&self) -> &str {
        "Actual/360"
    }

    fn day_count(&self, d1: Date, d2: Date) -> i64 {
        actual_days(d1, d2)
    }

    fn year_fraction(&self, d1: Date, d2: Date) -> Time {
        self.day_count(d1, d2) as Real / 360.0
    }
}

/// 30/360 (Bond Basis).
///
/// `day_count = 360(Y2−Y1) + 30(M2−M1) + (D2−D1)` after the usual
/// end-of-month adjustments.
#[derive(Debug, Clone, Copy, Default)]
pub struct Thirty360;

impl DayCounter for Thirty360 {
    fn name(&self) -> &str {
        "30/360 (Bond Basis)"
    }

    fn day_count(&self, d1: Date, d2: Date) -> i64 {
        let (y1, m1) = (d1.year() as i64, d1.month() as i64);
        let (y2, m2) = (d2.year() as i64, d2.month() as i64);
        let mut dd1 = d1.day_of_month() as i64;
        let mut dd2 = d2.day_of_month() as i64;

        if dd1 == 31 {
            dd1 = 30;
        }
        if dd2 == 31 && dd1 == 30 {
            dd2 = 30;
        }

        360 * (y2 - y1) + 30 * (m2 - m1) + (dd2 - dd1)
    }

    fn year_fraction(&self, d1: Date, d2: Date) -> Time {
        self.day_count(d1, d2) as Real / 360.0
    }
}

/// Actual/Actual (ISDA).
///
/// The period is split at year boundaries; each piece is divided by the
/// length of the calendar year it falls in.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActualActualIsda;

impl DayCounter for ActualActualIsda {
    fn name(&self) -> &str {
        "Actual/Actual (ISDA)"
    }

    fn day_count(&self, d1: Date, d2: Date) -> i64 {
        actual_days(d1, d2)
    }

    fn year_fraction(&self, d1: Date, d2: Date) -> Time {
        if d1 == d2 {
            return 0.0;
        }
        if d1 > d2 {
            return -self.year_fraction(d2, d1);
        }
        let basis = |y: u16| if is_leap_year(y) { 366.0 } else { 365.0 };
        let (y1, y2) = (d1.year(), d2.year());

        // y1 < y2 <= 2199, so January 1st of every year used here exists.
        let start_of = |y: u16| Date::from_ymd(y, 1, 1).map_or(0, |d| d.serial() as i64);
        if y1 == y2 {
            return actual_days(d1, d2) as Real / basis(y1);
        }

        let head = (start_of(y1 + 1) - d1.serial() as i64) as Real / basis(y1);
        let tail = (d2.serial() as i64 - start_of(y2)) as Real / basis(y2);
        head + tail + (y2 - y1 - 1) as Real
    }
}

// ── Convention selector ──────────────────────────────────────────────────────

/// Day-count convention selector used by market data descriptions.
///
/// Integer codes accepted by [`DayCounterKind::from_code`]:
///
/// | code | convention           |
/// |------|----------------------|
/// | 0    | Actual/365 (Fixed)   |
/// | 1    | Actual/Actual (ISDA) |
/// | 2    | Actual/360           |
/// | 3    | 30/360               |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayCounterKind {
    /// Actual/365 (Fixed).
    #[default]
    Actual365Fixed,
    /// Actual/Actual (ISDA).
    ActualActual,
    /// Actual/360.
    Actual360,
    /// 30/360 (Bond Basis).
    Thirty360,
}

impl DayCounterKind {
    /// Map an integer type code onto a convention.
    pub fn from_code(code: i32) -> Result<Self> {
        match code {
            0 => Ok(Self::Actual365Fixed),
            1 => Ok(Self::ActualActual),
            2 => Ok(Self::Actual360),
            3 => Ok(Self::Thirty360),
            other => Err(Error::InvalidArgument(format!(
                "unsupported day counter type code {other}"
            ))),
        }
    }

    /// Instantiate the convention.
    pub fn day_counter(self) -> Arc<dyn DayCounter> {
        match self {
            Self::Actual365Fixed => Arc::new(Actual365Fixed),
            Self::ActualActual => Arc::new(ActualActualIsda),
            Self::Actual360 => Arc::new(Actual360),
            Self::Thirty360 => Arc::new(Thirty360),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn actual_conventions() {
        let d1 = date(2020, 2, 24);
        let d2 = d1.add_days(90).unwrap();
        assert_abs_diff_eq!(Actual365Fixed.year_fraction(d1, d2), 90.0 / 365.0);
        assert_abs_diff_eq!(Actual360.year_fraction(d1, d2), 0.25);
        assert_abs_diff_eq!(Actual365Fixed.year_fraction(d2, d1), -90.0 / 365.0);
    }

    #[test]
    fn thirty_360_end_of_month() {
        assert_eq!(Thirty360.day_count(date(2020, 1, 31), date(2020, 3, 31)), 60);
        assert_eq!(Thirty360.day_count(date(2020, 1, 30), date(2020, 2, 29)), 29);
        assert_eq!(Thirty360.day_count(date(2020, 1, 15), date(2021, 1, 15)), 360);
    }

    #[test]
    fn actual_actual_spans_several_years() {
        let yf = ActualActualIsda.year_fraction(date(2019, 1, 1), date(2022, 1, 1));
        assert_abs_diff_eq!(yf, 3.0, epsilon = 1e-14);
        let back = ActualActualIsda.year_fraction(date(2022, 1, 1), date(2019, 1, 1));
        assert_abs_diff_eq!(back, -3.0, epsilon = 1e-14);
    }

    #[test]
    fn kind_from_code() {
        assert_eq!(DayCounterKind::from_code(0), Ok(DayCounterKind::Actual365Fixed));
        assert_eq!(DayCounterKind::from_code(3), Ok(DayCounterKind::Thirty360));
        assert!(matches!(
            DayCounterKind::from_code(4),
            Err(Error::InvalidArgument(_))
        ));
        assert_eq!(DayCounterKind::Actual360.day_counter().name(), "Actual/360");
    }

    #[test]
    fn kind_from_toml() {
        #[derive(Deserialize)]
        struct Holder {
            day_counter: DayCounterKind,
        }
        let h: Holder = toml::from_str("day_counter = \"actual_actual\"").unwrap();
        assert_eq!(h.day_counter, DayCounterKind::ActualActual);
    }
}
