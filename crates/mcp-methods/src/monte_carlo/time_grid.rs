//! `TimeGrid` — fixed simulation grid.

use mcp_core::{ensure, errors::Result, Size, Time};

/// A strictly increasing grid of times `t[0] = 0 < t[1] < … < t[N]`.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid {
    times: Vec<Time>,
    dts: Vec<Time>,
}

impl TimeGrid {
    /// Create an equally spaced grid from 0 to `end` with `steps` intervals.
    pub fn new(end: Time, steps: Size) -> Result<Self> {
        ensure!(steps > 0, "time grid needs at least one step");
        ensure!(
            end.is_finite() && end > 0.0,
            "time grid horizon must be positive and finite, got {end}"
        );
        let n = steps as Time;
        let mut times: Vec<Time> = (0..=steps).map(|i| end * i as Time / n).collect();
        times[steps] = end;
        Ok(Self::from_sorted(times))
    }

    /// Create a grid from explicit times.
    ///
    /// The first time must be 0 and the sequence strictly increasing.
    pub fn from_times(times: &[Time]) -> Result<Self> {
        ensure!(times.len() >= 2, "time grid needs at least 2 points");
        ensure!(times[0] == 0.0, "time grid must start at 0, got {}", times[0]);
        ensure!(
            times.iter().all(|t| t.is_finite()),
            "time grid points must be finite"
        );
        ensure!(
            times.windows(2).all(|w| w[1] > w[0]),
            "time grid points must be strictly increasing"
        );
        Ok(Self::from_sorted(times.to_vec()))
    }

    fn from_sorted(times: Vec<Time>) -> Self {
        let dts = times.windows(2).map(|w| w[1] - w[0]).collect();
        Self { times, dts }
    }

    /// Number of time points (= steps + 1).
    pub fn size(&self) -> usize {
        self.times.len()
    }

    /// Number of steps.
    pub fn steps(&self) -> usize {
        self.dts.len()
    }

    /// Time at index `i`.
    pub fn time(&self, i: usize) -> Time {
        self.times[i]
    }

    /// Length of step `i`, i.e. `t[i+1] - t[i]`.
    pub fn dt(&self, i: usize) -> Time {
        self.dts[i]
    }

    /// All time points.
    pub fn times(&self) -> &[Time] {
        &self.times
    }

    /// All step lengths.
    pub fn dts(&self) -> &[Time] {
        &self.dts
    }

    /// The horizon `t[N]`.
    pub fn horizon(&self) -> Time {
        self.times[self.times.len() - 1]
    }
}
