//! Gaussian sequences sampled from any `rand` generator.

use super::{Sample, VariateSource};
use mcp_core::{ensure, errors::Result, Real};
use rand::Rng;
use rand_distr::StandardNormal;

/// Standard normal vectors drawn from a `rand::Rng` through
/// `rand_distr::StandardNormal`.
#[derive(Debug)]
pub struct GaussianRsg<R> {
    rng: R,
    sequence: Sample<Vec<Real>>,
}

impl<R: Rng> GaussianRsg<R> {
    /// Create a `dimension`-dimensional source backed by `rng`.
    pub fn new(dimension: usize, rng: R) -> Result<Self> {
        ensure!(dimension >= 1, "sequence dimension must be positive");
        Ok(Self {
            rng,
            sequence: Sample::new(vec![0.0; dimension], 1.0),
        })
    }
}

impl<R: Rng> VariateSource for GaussianRsg<R> {
    fn dimension(&self) -> usize {
        self.sequence.value.len()
    }

    fn next_sequence(&mut self) -> &Sample<Vec<Real>> {
        for x in self.sequence.value.iter_mut() {
            *x = self.rng.sample(StandardNormal);
        }
        &self.sequence
    }

    fn last_sequence(&self) -> &Sample<Vec<Real>> {
        &self.sequence
    }
}
