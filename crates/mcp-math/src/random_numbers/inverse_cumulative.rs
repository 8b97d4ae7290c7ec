//! Gaussian sequences obtained by inverting the normal CDF.

use super::{Sample, VariateSource};
use crate::distributions::normal_cdf_inverse;
use mcp_core::Real;

/// Maps each coordinate of a uniform source through the inverse normal CDF.
///
/// The weight of the uniform sample is passed through unchanged.
#[derive(Debug)]
pub struct InverseCumulativeRsg<U> {
    uniform: U,
    sequence: Sample<Vec<Real>>,
}

impl<U: VariateSource> InverseCumulativeRsg<U> {
    /// Wrap a uniform source whose points lie in `(0, 1)`.
    pub fn new(uniform: U) -> Self {
        let dimension = uniform.dimension();
        Self {
            uniform,
            sequence: Sample::new(vec![0.0; dimension], 1.0),
        }
    }

    /// The underlying uniform source.
    pub fn uniform(&self) -> &U {
        &self.uniform
    }
}

impl<U: VariateSource> VariateSource for InverseCumulativeRsg<U> {
    fn dimension(&self) -> usize {
        self.sequence.value.len()
    }

    fn next_sequence(&mut self) -> &Sample<Vec<Real>> {
        let u = self.uniform.next_sequence();
        for (x, &p) in self.sequence.value.iter_mut().zip(&u.value) {
            *x = normal_cdf_inverse(p);
        }
        self.sequence.weight = u.weight;
        &self.sequence
    }

    fn last_sequence(&self) -> &Sample<Vec<Real>> {
        &self.sequence
    }
}
