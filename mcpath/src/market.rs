//! Market descriptions and the factories that turn them into curves,
//! processes and knock-out policies.
//!
//! Curve terms are day offsets from the evaluation date. Every kind has an
//! integer type code (`from_code`) next to its `snake_case` name:
//!
//! | type            | codes                                              |
//! |-----------------|----------------------------------------------------|
//! | [`CurveKind`]   | 0 flat, 1 zero rate, 2 forward rate, 3 discount    |
//! | [`VolKind`]     | 0 flat, 1 variance curve                           |
//! | [`ProcessKind`] | 0 Black-Scholes, 1 Black-Scholes-Merton            |
//! | [`BarrierKind`] | 0 none, 1 constant, 2 time-varying                 |

use mcp_core::{
    ensure_arg,
    errors::{Error, Result},
    Real,
};
use mcp_methods::{BarrierSide, KnockOut};
use mcp_processes::{black_scholes_merton_process, black_scholes_process, StochasticProcess1D};
use mcp_termstructures::{
    BlackConstantVol, BlackVarianceCurve, BlackVolTermStructure, FlatForward,
    InterpolatedDiscountCurve, InterpolatedForwardCurve, InterpolatedZeroCurve,
    YieldTermStructure,
};
use mcp_time::{Date, DayCounterKind};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

fn unsupported(what: &str, code: i32) -> Error {
    Error::InvalidArgument(format!("{what} type code {code} is not supported"))
}

fn invalid(what: &str) -> impl FnOnce(Error) -> Error + '_ {
    move |e| match e {
        Error::InvalidArgument(_) => e,
        other => Error::InvalidArgument(format!("{what}: {other}")),
    }
}

fn pillar_dates(evaluation_date: Date, terms: &[i32]) -> Result<Vec<Date>> {
    terms.iter().map(|&n| evaluation_date.add_days(n)).collect()
}

// ── Yield curves ─────────────────────────────────────────────────────────────

/// Shape of a yield curve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveKind {
    /// Constant rate taken from the first value.
    #[default]
    Flat,
    /// Linearly interpolated zero rates.
    ZeroRate,
    /// Linearly interpolated instantaneous forward rates.
    ForwardRate,
    /// Linearly interpolated discount factors.
    DiscountFactor,
}

impl CurveKind {
    /// Map an integer type code onto a curve kind.
    pub fn from_code(code: i32) -> Result<Self> {
        match code {
            0 => Ok(Self::Flat),
            1 => Ok(Self::ZeroRate),
            2 => Ok(Self::ForwardRate),
            3 => Ok(Self::DiscountFactor),
            other => Err(unsupported("yield curve", other)),
        }
    }
}

/// A yield curve description.
///
/// Term-structured kinds need at least two pillars and the first term must
/// be 0 (the evaluation date). A curve whose first pillar falls after the
/// evaluation date is rejected instead of being anchored on that pillar,
/// so every curve in a request shares the evaluation date as its
/// reference date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveSpec {
    /// Curve shape.
    #[serde(default)]
    pub kind: CurveKind,
    /// Pillar offsets in days from the evaluation date.
    #[serde(default)]
    pub terms: Vec<i32>,
    /// Rates or discount factors, one per term.
    pub values: Vec<Real>,
    /// Day-count convention.
    #[serde(default)]
    pub day_counter: DayCounterKind,
}

impl CurveSpec {
    /// A flat curve.
    pub fn flat(rate: Real, day_counter: DayCounterKind) -> Self {
        Self {
            kind: CurveKind::Flat,
            terms: vec![0],
            values: vec![rate],
            day_counter,
        }
    }

    /// A term-structured curve.
    pub fn new(
        kind: CurveKind,
        terms: Vec<i32>,
        values: Vec<Real>,
        day_counter: DayCounterKind,
    ) -> Self {
        Self {
            kind,
            terms,
            values,
            day_counter,
        }
    }

    fn pillars(&self, evaluation_date: Date) -> Result<Vec<Date>> {
        ensure_arg!(
            self.terms.first() == Some(&0),
            "yield curve terms must start at 0, got {:?}",
            self.terms.first()
        );
        pillar_dates(evaluation_date, &self.terms).map_err(invalid("yield curve"))
    }

    /// Build the curve as seen from `evaluation_date`.
    pub fn build(&self, evaluation_date: Date) -> Result<Arc<dyn YieldTermStructure>> {
        ensure_arg!(!self.values.is_empty(), "yield curve has no values");
        ensure_arg!(
            self.values.iter().all(|v| v.is_finite()),
            "yield curve values must be finite"
        );
        let dc = self.day_counter.day_counter();
        let curve: Arc<dyn YieldTermStructure> = match self.kind {
            CurveKind::Flat => Arc::new(FlatForward::new(evaluation_date, self.values[0], dc)),
            CurveKind::ZeroRate => Arc::new(
                InterpolatedZeroCurve::new(&self.pillars(evaluation_date)?, &self.values, dc)
                    .map_err(invalid("zero curve"))?,
            ),
            CurveKind::ForwardRate => Arc::new(
                InterpolatedForwardCurve::new(&self.pillars(evaluation_date)?, &self.values, dc)
                    .map_err(invalid("forward curve"))?,
            ),
            CurveKind::DiscountFactor => Arc::new(
                InterpolatedDiscountCurve::new(&self.pillars(evaluation_date)?, &self.values, dc)
                    .map_err(invalid("discount curve"))?,
            ),
        };
        Ok(curve)
    }
}

// ── Volatility ───────────────────────────────────────────────────────────────

/// Shape of a Black volatility curve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolKind {
    /// Constant volatility taken from the first value.
    #[default]
    Flat,
    /// Total variance interpolated linearly between pillar volatilities.
    VarianceCurve,
}

impl VolKind {
    /// Map an integer type code onto a volatility kind.
    pub fn from_code(code: i32) -> Result<Self> {
        match code {
            0 => Ok(Self::Flat),
            1 => Ok(Self::VarianceCurve),
            other => Err(unsupported("volatility curve", other)),
        }
    }
}

/// A Black volatility description.
///
/// For a variance curve every term must be strictly after the evaluation
/// date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolSpec {
    /// Curve shape.
    #[serde(default)]
    pub kind: VolKind,
    /// Pillar offsets in days from the evaluation date.
    #[serde(default)]
    pub terms: Vec<i32>,
    /// Black volatilities, one per term.
    pub values: Vec<Real>,
    /// Day-count convention.
    #[serde(default)]
    pub day_counter: DayCounterKind,
}

impl VolSpec {
    /// A flat volatility.
    pub fn flat(vol: Real, day_counter: DayCounterKind) -> Self {
        Self {
            kind: VolKind::Flat,
            terms: vec![0],
            values: vec![vol],
            day_counter,
        }
    }

    /// A variance curve through the given pillar volatilities.
    pub fn variance_curve(terms: Vec<i32>, values: Vec<Real>, day_counter: DayCounterKind) -> Self {
        Self {
            kind: VolKind::VarianceCurve,
            terms,
            values,
            day_counter,
        }
    }

    /// Build the volatility structure as seen from `evaluation_date`.
    pub fn build(&self, evaluation_date: Date) -> Result<Arc<dyn BlackVolTermStructure>> {
        ensure_arg!(!self.values.is_empty(), "volatility curve has no values");
        ensure_arg!(
            self.values.iter().all(|v| v.is_finite()),
            "volatility values must be finite"
        );
        let dc = self.day_counter.day_counter();
        match self.kind {
            VolKind::Flat => Ok(Arc::new(BlackConstantVol::new(
                evaluation_date,
                self.values[0],
                dc,
            ))),
            VolKind::VarianceCurve => {
                let dates = pillar_dates(evaluation_date, &self.terms)
                    .map_err(invalid("volatility curve"))?;
                let curve = BlackVarianceCurve::new(evaluation_date, &dates, &self.values, dc)
                    .map_err(invalid("volatility curve"))?;
                Ok(Arc::new(curve))
            }
        }
    }
}

// ── Process ──────────────────────────────────────────────────────────────────

/// Diffusion model for the underlying.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessKind {
    /// Rate curve only.
    #[default]
    BlackScholes,
    /// Rate and dividend curves.
    BlackScholesMerton,
}

impl ProcessKind {
    /// Map an integer type code onto a process kind.
    pub fn from_code(code: i32) -> Result<Self> {
        match code {
            0 => Ok(Self::BlackScholes),
            1 => Ok(Self::BlackScholesMerton),
            other => Err(unsupported("process", other)),
        }
    }
}

/// Build the process from the market description.
///
/// The dividend curve is only read, and then required, for
/// [`ProcessKind::BlackScholesMerton`].
pub fn build_process(
    kind: ProcessKind,
    spot: Real,
    evaluation_date: Date,
    rate: &CurveSpec,
    dividend: Option<&CurveSpec>,
    volatility: &VolSpec,
) -> Result<Arc<dyn StochasticProcess1D>> {
    let rate_curve = rate.build(evaluation_date)?;
    let vol_curve = volatility.build(evaluation_date)?;
    let process: Arc<dyn StochasticProcess1D> = match kind {
        ProcessKind::BlackScholes => Arc::new(black_scholes_process(spot, rate_curve, vol_curve)),
        ProcessKind::BlackScholesMerton => {
            let dividend = dividend.ok_or_else(|| {
                Error::InvalidArgument(
                    "a Black-Scholes-Merton process needs a dividend curve".to_string(),
                )
            })?;
            let dividend_curve = dividend.build(evaluation_date)?;
            Arc::new(black_scholes_merton_process(
                spot,
                dividend_curve,
                rate_curve,
                vol_curve,
            ))
        }
    };
    Ok(process)
}

// ── Barriers ─────────────────────────────────────────────────────────────────

/// Kind of one knock-out side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarrierKind {
    /// No barrier.
    #[default]
    None,
    /// A single level, the first entry of `levels`.
    Constant,
    /// One level per grid point.
    TimeVarying,
}

impl BarrierKind {
    /// Map an integer type code onto a barrier kind.
    pub fn from_code(code: i32) -> Result<Self> {
        match code {
            0 => Ok(Self::None),
            1 => Ok(Self::Constant),
            2 => Ok(Self::TimeVarying),
            other => Err(unsupported("barrier", other)),
        }
    }
}

/// One knock-out side: levels plus a per-grid-point observation flag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BarrierSpec {
    /// Barrier kind.
    #[serde(default)]
    pub kind: BarrierKind,
    /// Whether the barrier is checked at each grid point (`steps + 1`).
    #[serde(default)]
    pub observed: Vec<bool>,
    /// Barrier levels.
    #[serde(default)]
    pub levels: Vec<Real>,
}

impl BarrierSpec {
    /// No barrier.
    pub fn none() -> Self {
        Self::default()
    }

    /// A constant barrier.
    pub fn constant(level: Real, observed: Vec<bool>) -> Self {
        Self {
            kind: BarrierKind::Constant,
            observed,
            levels: vec![level],
        }
    }

    /// A barrier with one level per grid point.
    pub fn time_varying(levels: Vec<Real>, observed: Vec<bool>) -> Self {
        Self {
            kind: BarrierKind::TimeVarying,
            observed,
            levels,
        }
    }

    /// Convert into a barrier side. Data of an absent side is ignored.
    pub fn to_side(&self) -> Result<BarrierSide> {
        match self.kind {
            BarrierKind::None => Ok(BarrierSide::absent()),
            BarrierKind::Constant => {
                let level = self.levels.first().copied().ok_or_else(|| {
                    Error::InvalidArgument("constant barrier has no level".to_string())
                })?;
                Ok(BarrierSide::constant(level, self.observed.clone()))
            }
            BarrierKind::TimeVarying => Ok(BarrierSide::time_varying(
                self.levels.clone(),
                self.observed.clone(),
            )),
        }
    }
}

/// Combine the two sides into a knock-out policy.
pub fn knock_out(up_out: &BarrierSpec, down_out: &BarrierSpec) -> Result<KnockOut> {
    Ok(KnockOut::new(up_out.to_side()?, down_out.to_side()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use mcp_methods::WriteStrategy;

    fn today() -> Date {
        Date::from_ymd(2020, 2, 24).unwrap()
    }

    #[test]
    fn type_codes() {
        assert_eq!(CurveKind::from_code(2), Ok(CurveKind::ForwardRate));
        assert_eq!(VolKind::from_code(1), Ok(VolKind::VarianceCurve));
        assert_eq!(ProcessKind::from_code(1), Ok(ProcessKind::BlackScholesMerton));
        assert_eq!(BarrierKind::from_code(2), Ok(BarrierKind::TimeVarying));
        assert!(matches!(CurveKind::from_code(4), Err(Error::InvalidArgument(_))));
        assert!(matches!(VolKind::from_code(-1), Err(Error::InvalidArgument(_))));
        assert!(matches!(ProcessKind::from_code(2), Err(Error::InvalidArgument(_))));
        assert!(matches!(BarrierKind::from_code(3), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn flat_curve_reads_first_value() {
        let spec = CurveSpec::new(
            CurveKind::Flat,
            vec![0, 30],
            vec![0.03, 0.5],
            DayCounterKind::Actual365Fixed,
        );
        let curve = spec.build(today()).unwrap();
        assert_abs_diff_eq!(curve.zero_rate(2.0), 0.03, epsilon = 1e-15);
    }

    #[test]
    fn term_curves_are_anchored_on_the_evaluation_date() {
        let terms = vec![0, 31, 94, 182, 276, 367];
        let rates = vec![0.0261, 0.0261, 0.0276, 0.0279, 0.0281, 0.0283];
        for kind in [CurveKind::ZeroRate, CurveKind::ForwardRate] {
            let dc = DayCounterKind::Actual365Fixed;
            let spec = CurveSpec::new(kind, terms.clone(), rates.clone(), dc);
            let curve = spec.build(today()).unwrap();
            assert_eq!(curve.reference_date(), today());
            assert_abs_diff_eq!(curve.discount(0.0), 1.0);
            assert!(curve.discount(1.0) < 1.0);
        }
    }

    #[test]
    fn curve_input_errors_are_invalid_arguments() {
        let dc = DayCounterKind::Actual365Fixed;
        let not_at_zero = CurveSpec::new(CurveKind::ZeroRate, vec![1, 30], vec![0.01, 0.02], dc);
        let non_finite = CurveSpec::new(CurveKind::ZeroRate, vec![0, 30], vec![0.01, f64::NAN], dc);
        let decreasing = CurveSpec::new(CurveKind::ZeroRate, vec![0, 30, 10], vec![0.01; 3], dc);
        let bad_discount =
            CurveSpec::new(CurveKind::DiscountFactor, vec![0, 30], vec![0.99, 0.98], dc);
        let empty = CurveSpec::new(CurveKind::Flat, vec![], vec![], dc);
        for spec in [not_at_zero, non_finite, decreasing, bad_discount, empty] {
            assert!(matches!(spec.build(today()), Err(Error::InvalidArgument(_))));
        }
    }

    #[test]
    fn variance_curve_from_day_offsets() {
        let spec = VolSpec::variance_curve(
            vec![1, 30, 63, 92],
            vec![0.3697, 0.3697, 0.3288, 0.3260],
            DayCounterKind::Actual365Fixed,
        );
        let vol = spec.build(today()).unwrap();
        assert_abs_diff_eq!(vol.black_vol(30.0 / 365.0), 0.3697, epsilon = 1e-12);
        let dc = DayCounterKind::Actual365Fixed;
        let bad = VolSpec::variance_curve(vec![0, 30], vec![0.2, 0.2], dc);
        assert!(matches!(bad.build(today()), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn merton_process_needs_a_dividend_curve() {
        let rate = CurveSpec::flat(0.02, DayCounterKind::Actual365Fixed);
        let vol = VolSpec::flat(0.2, DayCounterKind::Actual365Fixed);
        let err = build_process(ProcessKind::BlackScholesMerton, 1.0, today(), &rate, None, &vol);
        assert!(matches!(err, Err(Error::InvalidArgument(_))));

        let dividend = CurveSpec::flat(0.01, DayCounterKind::Actual365Fixed);
        let p = build_process(
            ProcessKind::BlackScholesMerton,
            1.0,
            today(),
            &rate,
            Some(&dividend),
            &vol,
        )
        .unwrap();
        assert_abs_diff_eq!(p.expectation(0.0, 1.0, 1.0), 0.01f64.exp(), epsilon = 1e-12);

        // The dividend curve is ignored for Black-Scholes.
        let kind = ProcessKind::BlackScholes;
        let p = build_process(kind, 1.0, today(), &rate, Some(&dividend), &vol).unwrap();
        assert_abs_diff_eq!(p.expectation(0.0, 1.0, 1.0), 0.02f64.exp(), epsilon = 1e-12);
    }

    #[test]
    fn barrier_specs() {
        let observed = vec![true; 5];
        let ko = knock_out(
            &BarrierSpec::constant(1.1, observed.clone()),
            &BarrierSpec::time_varying(vec![0.9; 5], observed),
        )
        .unwrap();
        assert_eq!(ko.strategy(), WriteStrategy::DualOut);
        assert!(ko.validate(5).is_ok());

        // Levels of an absent side are never looked at.
        let ignored = BarrierSpec {
            kind: BarrierKind::None,
            observed: vec![],
            levels: vec![f64::NAN],
        };
        let plain = knock_out(&ignored, &BarrierSpec::none()).unwrap();
        assert_eq!(plain.strategy(), WriteStrategy::Plain);

        let no_level = BarrierSpec {
            kind: BarrierKind::Constant,
            observed: vec![true; 5],
            levels: vec![],
        };
        assert!(matches!(no_level.to_side(), Err(Error::InvalidArgument(_))));
    }
}
