//! Generation requests.
//!
//! A request bundles everything a batch needs apart from the output buffer.
//! Requests deserialize from TOML; omitted fields take the defaults below.
//!
//! ```toml
//! evaluation_date = "2020-02-24"
//! path_count = 10000
//! steps = 252
//! horizon = 1.0
//! # brownian_bridge = true, skip = 0, seed = 42
//!
//! [rate]
//! kind = "zero_rate"
//! terms = [0, 31, 94, 182]
//! values = [0.0261, 0.0261, 0.0276, 0.0279]
//!
//! [volatility]
//! values = [0.2]
//!
//! [up_out]
//! kind = "constant"
//! levels = [1.2]
//! observed = [true, true, true]  # one flag per grid point
//! ```

use crate::market::{BarrierSpec, CurveSpec, ProcessKind, VolSpec};
use mcp_core::{
    ensure_arg,
    errors::{Error, Result},
    Size, Time,
};
use mcp_math::random_numbers::MAX_DIMENSION;
use mcp_time::Date;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Seed used when a request does not name one.
pub const DEFAULT_SEED: u64 = 42;

fn default_bridge() -> bool {
    true
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

fn parse_toml<T: DeserializeOwned>(text: &str) -> Result<T> {
    toml::from_str(text).map_err(|e| Error::InvalidArgument(format!("bad request: {e}")))
}

fn check_grid(steps: Size, horizon: Time) -> Result<()> {
    ensure_arg!(
        (1..=MAX_DIMENSION).contains(&steps),
        "steps must be in [1, {MAX_DIMENSION}], got {steps}"
    );
    ensure_arg!(
        horizon.is_finite() && horizon > 0.0,
        "horizon must be positive and finite, got {horizon}"
    );
    Ok(())
}

/// A request for simulated price paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathRequest {
    /// Date all curve terms are counted from.
    pub evaluation_date: Date,
    /// Number of rows to write.
    pub path_count: Size,
    /// Time steps per path; a row holds `steps + 1` values.
    pub steps: Size,
    /// Path horizon in years.
    pub horizon: Time,
    /// Diffusion model.
    #[serde(default)]
    pub process: ProcessKind,
    /// Reorder the variates with a Brownian bridge.
    #[serde(default = "default_bridge")]
    pub brownian_bridge: bool,
    /// Draws discarded before the first row.
    #[serde(default)]
    pub skip: Size,
    /// Seed of the Sobol direction numbers beyond the tabulated dimensions.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Risk-free curve.
    pub rate: CurveSpec,
    /// Dividend curve, required for Black-Scholes-Merton.
    #[serde(default)]
    pub dividend: Option<CurveSpec>,
    /// Black volatility.
    pub volatility: VolSpec,
    /// Upper knock-out side.
    #[serde(default)]
    pub up_out: BarrierSpec,
    /// Lower knock-out side.
    #[serde(default)]
    pub down_out: BarrierSpec,
}

impl PathRequest {
    /// A request without barriers and with default generator settings.
    pub fn new(
        evaluation_date: Date,
        path_count: Size,
        steps: Size,
        horizon: Time,
        rate: CurveSpec,
        volatility: VolSpec,
    ) -> Self {
        Self {
            evaluation_date,
            path_count,
            steps,
            horizon,
            process: ProcessKind::BlackScholes,
            brownian_bridge: true,
            skip: 0,
            seed: DEFAULT_SEED,
            rate,
            dividend: None,
            volatility,
            up_out: BarrierSpec::none(),
            down_out: BarrierSpec::none(),
        }
    }

    /// Parse a request from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        parse_toml(text)
    }

    /// Check the grid parameters.
    pub fn validate(&self) -> Result<()> {
        check_grid(self.steps, self.horizon)
    }
}

/// A request for raw (optionally bridged) standard normal step shocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceRequest {
    /// Number of rows to write.
    pub path_count: Size,
    /// Shocks per row; a row holds `steps + 1` values, column 0 is untouched.
    pub steps: Size,
    /// Horizon in years, used by the bridge.
    pub horizon: Time,
    /// Reorder the variates with a Brownian bridge.
    #[serde(default = "default_bridge")]
    pub brownian_bridge: bool,
    /// Draws discarded before the first row.
    #[serde(default)]
    pub skip: Size,
    /// Sobol seed.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl SequenceRequest {
    /// A request with default generator settings.
    pub fn new(path_count: Size, steps: Size, horizon: Time) -> Self {
        Self {
            path_count,
            steps,
            horizon,
            brownian_bridge: true,
            skip: 0,
            seed: DEFAULT_SEED,
        }
    }

    /// Parse a request from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        parse_toml(text)
    }

    /// Check the grid parameters.
    pub fn validate(&self) -> Result<()> {
        check_grid(self.steps, self.horizon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::{BarrierKind, CurveKind, VolKind};
    use mcp_time::DayCounterKind;

    #[test]
    fn defaults_fill_omitted_fields() {
        let text = r#"
            evaluation_date = "2020-02-24"
            path_count = 100
            steps = 4
            horizon = 1.0

            [rate]
            values = [0.02]

            [volatility]
            values = [0.2]
        "#;
        let req = PathRequest::from_toml_str(text).unwrap();
        assert_eq!(req.evaluation_date, Date::from_ymd(2020, 2, 24).unwrap());
        assert!(req.brownian_bridge);
        assert_eq!(req.skip, 0);
        assert_eq!(req.seed, DEFAULT_SEED);
        assert_eq!(req.process, ProcessKind::BlackScholes);
        assert_eq!(req.rate.kind, CurveKind::Flat);
        assert_eq!(req.rate.day_counter, DayCounterKind::Actual365Fixed);
        assert_eq!(req.volatility.kind, VolKind::Flat);
        assert_eq!(req.up_out.kind, BarrierKind::None);
        assert!(req.dividend.is_none());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn explicit_fields() {
        let text = r#"
            evaluation_date = "2020-02-24"
            path_count = 8
            steps = 2
            horizon = 0.5
            process = "black_scholes_merton"
            brownian_bridge = false
            skip = 5
            seed = 7

            [rate]
            kind = "discount_factor"
            terms = [0, 365]
            values = [1.0, 0.98]

            [dividend]
            values = [0.01]

            [volatility]
            kind = "variance_curve"
            terms = [30, 365]
            values = [0.25, 0.22]

            [down_out]
            kind = "time_varying"
            levels = [0.8, 0.8, 0.8]
            observed = [false, true, true]
        "#;
        let req = PathRequest::from_toml_str(text).unwrap();
        assert_eq!(req.process, ProcessKind::BlackScholesMerton);
        assert!(!req.brownian_bridge);
        assert_eq!((req.skip, req.seed), (5, 7));
        assert_eq!(req.rate.kind, CurveKind::DiscountFactor);
        assert_eq!(req.dividend.as_ref().map(|d| d.kind), Some(CurveKind::Flat));
        assert_eq!(req.volatility.terms, vec![30, 365]);
        assert_eq!(req.down_out.observed, vec![false, true, true]);
    }

    #[test]
    fn malformed_toml_is_an_invalid_argument() {
        let err = PathRequest::from_toml_str("path_count = \"many\"").unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        let err = SequenceRequest::from_toml_str("steps = 3\nhorizon = 1.0").unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn grid_checks() {
        assert!(SequenceRequest::new(10, 1, 1.0).validate().is_ok());
        assert!(SequenceRequest::new(10, 0, 1.0).validate().is_err());
        assert!(SequenceRequest::new(10, MAX_DIMENSION + 1, 1.0).validate().is_err());
        assert!(SequenceRequest::new(10, 4, 0.0).validate().is_err());
        assert!(SequenceRequest::new(10, 4, f64::INFINITY).validate().is_err());
    }

    #[test]
    fn sequence_request_round_trips_through_toml() {
        let req = SequenceRequest::new(3, 6, 2.0);
        let text = toml::to_string(&req).unwrap();
        assert_eq!(SequenceRequest::from_toml_str(&text).unwrap(), req);
    }
}
