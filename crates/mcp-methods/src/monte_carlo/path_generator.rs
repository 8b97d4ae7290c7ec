//! `PathGenerator` — evolves a 1-D process along a time grid.
//!
//! One draw of the variate source gives one path. The shocks are bridged
//! (or not) as a whole before the first step is taken, then the process is
//! stepped with `evolve` from its initial value.

use super::barrier::KnockOut;
use super::path::Path;
use super::sequence_generator::RandomSequenceGenerator;
use super::time_grid::TimeGrid;
use mcp_core::{ensure_arg, errors::Result, Real, Size, Time};
use mcp_math::{Sample, VariateSource};
use mcp_processes::StochasticProcess1D;
use ndarray::ArrayViewMut1;
use std::sync::Arc;

/// Generates sample paths of a 1-D stochastic process.
///
/// Not meant for concurrent use: each draw advances the variate source.
#[derive(Debug)]
pub struct PathGenerator<S> {
    process: Arc<dyn StochasticProcess1D>,
    sequence: RandomSequenceGenerator<S>,
    next: Sample<Path>,
}

impl<S: VariateSource> PathGenerator<S> {
    /// Create a generator on an equally spaced grid over `[0, horizon]`.
    ///
    /// # Errors
    /// [`DimensionMismatch`](mcp_core::Error::DimensionMismatch) if the
    /// generator's dimension differs from `steps`.
    pub fn new(
        process: Arc<dyn StochasticProcess1D>,
        horizon: Time,
        steps: Size,
        generator: S,
        brownian_bridge: bool,
    ) -> Result<Self> {
        let sequence = RandomSequenceGenerator::new(horizon, steps, generator, brownian_bridge)?;
        Ok(Self::from_sequence(process, sequence))
    }

    /// Create a generator on an explicit grid.
    pub fn with_time_grid(
        process: Arc<dyn StochasticProcess1D>,
        time_grid: TimeGrid,
        generator: S,
        brownian_bridge: bool,
    ) -> Result<Self> {
        let sequence =
            RandomSequenceGenerator::with_time_grid(time_grid, generator, brownian_bridge)?;
        Ok(Self::from_sequence(process, sequence))
    }

    fn from_sequence(
        process: Arc<dyn StochasticProcess1D>,
        sequence: RandomSequenceGenerator<S>,
    ) -> Self {
        let path = Path::new(sequence.time_grid().clone());
        Self {
            process,
            sequence,
            next: Sample::new(path, 1.0),
        }
    }

    /// The process being simulated.
    pub fn process(&self) -> &dyn StochasticProcess1D {
        &*self.process
    }

    /// The time grid.
    pub fn time_grid(&self) -> &TimeGrid {
        self.sequence.time_grid()
    }

    /// Number of steps per path.
    pub fn steps(&self) -> usize {
        self.sequence.steps()
    }

    /// Whether the Brownian bridge is applied.
    pub fn brownian_bridge(&self) -> bool {
        self.sequence.brownian_bridge()
    }

    /// Advance the variate source by one draw without writing anything.
    ///
    /// Returns the weight of the draw.
    pub fn draw(&mut self) -> Real {
        self.sequence.draw()
    }

    /// The bridged shocks of the last draw.
    pub fn shocks(&self) -> &[Real] {
        self.sequence.shocks()
    }

    /// Generate the next path.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> &Sample<Path> {
        self.next.weight = self.sequence.draw();
        self.walk_path();
        &self.next
    }

    /// Generate the antithetic of the last path.
    pub fn antithetic(&mut self) -> &Sample<Path> {
        self.next.weight = self.sequence.draw_antithetic();
        self.walk_path();
        &self.next
    }

    fn walk_path(&mut self) {
        let grid = self.sequence.time_grid();
        let shocks = self.sequence.shocks();
        let values = self.next.value.values_mut();
        let mut x = self.process.x0();
        values[0] = x;
        for (i, &dw) in shocks.iter().enumerate() {
            x = self.process.evolve(grid.time(i), x, grid.dt(i), dw);
            values[i + 1] = x;
        }
    }

    /// Draw one path into `row`, stopping early on a knock-out.
    ///
    /// `row[0]` receives the initial value and `row[i]` the value after
    /// step `i`. After a knock-out at point `i` the columns beyond `i` are
    /// left untouched. Exactly one draw is consumed either way.
    ///
    /// Returns the number of columns written.
    ///
    /// # Errors
    /// `InvalidArgument` if `row` does not have `steps + 1` columns or the
    /// barrier data does not cover the grid; nothing is drawn in that case.
    pub fn generate_row(
        &mut self,
        row: ArrayViewMut1<'_, Real>,
        knock_out: &KnockOut,
    ) -> Result<usize> {
        let points = self.time_grid().size();
        ensure_arg!(
            row.len() == points,
            "output row has {} columns, need {points}",
            row.len()
        );
        knock_out.validate(points)?;
        Ok(self.fill_row(row, knock_out))
    }

    pub(crate) fn fill_row(
        &mut self,
        mut row: ArrayViewMut1<'_, Real>,
        knock_out: &KnockOut,
    ) -> usize {
        self.sequence.draw();
        let grid = self.sequence.time_grid();
        let shocks = self.sequence.shocks();
        let mut x = self.process.x0();
        row[0] = x;
        for (i, &dw) in shocks.iter().enumerate() {
            x = self.process.evolve(grid.time(i), x, grid.dt(i), dw);
            row[i + 1] = x;
            if knock_out.breached(i + 1, x) {
                return i + 2;
            }
        }
        shocks.len() + 1
    }

    /// Draw and write the bridged shocks, not the path, into columns
    /// `1..=N` of `row`.
    pub fn generate_raw(&mut self, row: ArrayViewMut1<'_, Real>) -> Result<()> {
        self.sequence.write_row(row)
    }

    /// Write the conditional moments along the last draw.
    ///
    /// Starting from `x = 1`, for each step `i = 1..=N` writes
    /// `drift[i] = E[x(t_i) | x]` and `std_dev[i]` (the process's
    /// conditional standard deviation), then moves `x` with the step's
    /// shock. Column 0 of both buffers is left untouched.
    pub fn write_terms(
        &self,
        mut drift: ArrayViewMut1<'_, Real>,
        mut std_dev: ArrayViewMut1<'_, Real>,
    ) -> Result<()> {
        let points = self.time_grid().size();
        ensure_arg!(
            drift.len() == points && std_dev.len() == points,
            "term buffers have {} and {} columns, need {points}",
            drift.len(),
            std_dev.len()
        );
        let grid = self.sequence.time_grid();
        let mut x = 1.0;
        for (i, &dw) in self.sequence.shocks().iter().enumerate() {
            let (t, dt) = (grid.time(i), grid.dt(i));
            let e = self.process.expectation(t, x, dt);
            let s = self.process.std_deviation(t, x, dt);
            drift[i + 1] = e;
            std_dev[i + 1] = s;
            x = self.process.apply(e, s * dw);
        }
        Ok(())
    }
}
