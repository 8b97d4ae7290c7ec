//! `RandomSequenceGenerator` — step shocks without a process.
//!
//! Wraps a [`VariateSource`] and, optionally, a [`BrownianBridge`] built on
//! the time grid. Each draw leaves one vector of standard normal step shocks
//! in an internal buffer; [`PathGenerator`](super::PathGenerator) evolves a
//! process with it, [`write_row`](RandomSequenceGenerator::write_row) copies
//! it out as is.

use super::time_grid::TimeGrid;
use mcp_core::{
    ensure_arg,
    errors::{Error, Result},
    Real, Size, Time,
};
use mcp_math::{BrownianBridge, VariateSource};
use ndarray::ArrayViewMut1;
use tracing::debug;

/// A variate source bound to a time grid.
///
/// Scratch buffers are sized once at construction and reused by every draw.
#[derive(Debug)]
pub struct RandomSequenceGenerator<S> {
    generator: S,
    time_grid: TimeGrid,
    bridge: Option<BrownianBridge>,
    shocks: Vec<Real>,
    weight: Real,
}

impl<S: VariateSource> RandomSequenceGenerator<S> {
    /// Bind `generator` to an equally spaced grid on `[0, horizon]`.
    pub fn new(horizon: Time, steps: Size, generator: S, brownian_bridge: bool) -> Result<Self> {
        Self::with_time_grid(TimeGrid::new(horizon, steps)?, generator, brownian_bridge)
    }

    /// Bind `generator` to an explicit grid.
    ///
    /// # Errors
    /// [`Error::DimensionMismatch`] if the generator does not produce one
    /// variate per step.
    pub fn with_time_grid(
        time_grid: TimeGrid,
        generator: S,
        brownian_bridge: bool,
    ) -> Result<Self> {
        let steps = time_grid.steps();
        let dimension = generator.dimension();
        if dimension != steps {
            return Err(Error::DimensionMismatch {
                expected: steps,
                actual: dimension,
            });
        }
        let bridge = if brownian_bridge {
            Some(BrownianBridge::with_times(time_grid.times())?)
        } else {
            None
        };
        debug!(dimension, steps, brownian_bridge, "sequence generator built");
        Ok(Self {
            generator,
            time_grid,
            bridge,
            shocks: vec![0.0; steps],
            weight: 1.0,
        })
    }

    /// Draw the next vector and apply the bridge. Returns its weight.
    pub fn draw(&mut self) -> Real {
        let sample = self.generator.next_sequence();
        let weight = sample.weight;
        match &self.bridge {
            Some(bridge) => bridge.transform(&sample.value, &mut self.shocks),
            None => self.shocks.copy_from_slice(&sample.value),
        }
        self.weight = weight;
        weight
    }

    /// Reuse the last vector with its sign flipped. Returns its weight.
    pub fn draw_antithetic(&mut self) -> Real {
        let sample = self.generator.last_sequence();
        let weight = sample.weight;
        match &self.bridge {
            Some(bridge) => bridge.transform(&sample.value, &mut self.shocks),
            None => self.shocks.copy_from_slice(&sample.value),
        }
        for x in self.shocks.iter_mut() {
            *x = -*x;
        }
        self.weight = weight;
        weight
    }

    /// Draw and write the shocks into columns `1..=N` of `row`.
    ///
    /// Column 0 is left untouched.
    pub fn write_row(&mut self, row: ArrayViewMut1<'_, Real>) -> Result<()> {
        ensure_arg!(
            row.len() == self.time_grid.size(),
            "output row has {} columns, need {}",
            row.len(),
            self.time_grid.size()
        );
        self.fill_row(row);
        Ok(())
    }

    pub(crate) fn fill_row(&mut self, mut row: ArrayViewMut1<'_, Real>) {
        self.draw();
        for (i, &x) in self.shocks.iter().enumerate() {
            row[i + 1] = x;
        }
    }

    /// The shocks of the last draw.
    pub fn shocks(&self) -> &[Real] {
        &self.shocks
    }

    /// The weight of the last draw.
    pub fn weight(&self) -> Real {
        self.weight
    }

    /// The time grid.
    pub fn time_grid(&self) -> &TimeGrid {
        &self.time_grid
    }

    /// Number of steps (= variates per draw).
    pub fn steps(&self) -> usize {
        self.shocks.len()
    }

    /// Whether the Brownian bridge is applied.
    pub fn brownian_bridge(&self) -> bool {
        self.bridge.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use mcp_math::{low_discrepancy, pseudo_random};
    use ndarray::Array1;

    #[test]
    fn dimension_must_match_steps() {
        let err = RandomSequenceGenerator::new(1.0, 4, low_discrepancy(5, 42).unwrap(), true)
            .unwrap_err();
        assert_eq!(
            err,
            Error::DimensionMismatch {
                expected: 4,
                actual: 5
            }
        );
    }

    #[test]
    fn without_bridge_shocks_are_the_raw_variates() {
        let mut reference = pseudo_random(6, 7).unwrap();
        let mut gen =
            RandomSequenceGenerator::new(1.0, 6, pseudo_random(6, 7).unwrap(), false).unwrap();
        for _ in 0..3 {
            gen.draw();
            assert_eq!(gen.shocks(), &reference.next_sequence().value[..]);
        }
    }

    #[test]
    fn antithetic_flips_the_last_draw() {
        let mut gen =
            RandomSequenceGenerator::new(2.0, 8, low_discrepancy(8, 42).unwrap(), true).unwrap();
        gen.draw();
        gen.draw();
        let plain = gen.shocks().to_vec();
        gen.draw_antithetic();
        for (a, b) in plain.iter().zip(gen.shocks()) {
            assert_abs_diff_eq!(*a, -*b, epsilon = 1e-15);
        }
    }

    #[test]
    fn write_row_leaves_column_zero() {
        let mut gen =
            RandomSequenceGenerator::new(1.0, 4, low_discrepancy(4, 42).unwrap(), true).unwrap();
        let mut row = Array1::from_elem(5, -7.0);
        gen.write_row(row.view_mut()).unwrap();
        assert_eq!(row[0], -7.0);
        assert_eq!(&row.as_slice().unwrap()[1..], gen.shocks());
    }

    #[test]
    fn write_row_rejects_wrong_width() {
        let mut gen =
            RandomSequenceGenerator::new(1.0, 4, low_discrepancy(4, 42).unwrap(), true).unwrap();
        let mut row = Array1::zeros(4);
        assert!(matches!(
            gen.write_row(row.view_mut()),
            Err(Error::InvalidArgument(_))
        ));
    }
}
