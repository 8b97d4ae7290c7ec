//! Random number and sequence generators.
//!
//! Everything that feeds the path generator implements [`VariateSource`]: a
//! stateful generator of fixed-dimension vectors, drawn strictly in order.
//!
//! | type                         | output                                  |
//! |------------------------------|-----------------------------------------|
//! | [`SobolRsg`]                 | uniform low-discrepancy points          |
//! | [`MersenneTwisterRsg`]       | uniform pseudo-random points            |
//! | [`InverseCumulativeRsg`]     | Gaussian image of a uniform source      |
//! | [`GaussianRsg`]              | Gaussian points from any `rand::Rng`    |

use mcp_core::{errors::Result, Real};

/// Brownian-bridge variate reordering.
pub mod brownian_bridge;

mod gaussian;
mod inverse_cumulative;
mod mersenne_twister;
mod sobol;

pub use gaussian::GaussianRsg;
pub use inverse_cumulative::InverseCumulativeRsg;
pub use mersenne_twister::{MersenneTwisterRsg, MersenneTwisterUniformRng};
pub use sobol::{primitive_polynomials, SobolRsg, MAX_DIMENSION};

/// A weighted sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample<T> {
    /// The sampled value.
    pub value: T,
    /// The weight attached to the value.
    pub weight: Real,
}

impl<T> Sample<T> {
    /// Wrap `value` with the given weight.
    pub fn new(value: T, weight: Real) -> Self {
        Self { value, weight }
    }
}

/// A stateful source of fixed-dimension variate vectors.
///
/// Draw order is part of the contract: two sources built with the same
/// parameters yield the same sequence of vectors. Instances are not meant to
/// be shared between concurrent consumers.
pub trait VariateSource {
    /// Number of variates in each vector.
    fn dimension(&self) -> usize;

    /// Advance the generator and return the new vector.
    fn next_sequence(&mut self) -> &Sample<Vec<Real>>;

    /// The vector returned by the last call to `next_sequence`.
    fn last_sequence(&self) -> &Sample<Vec<Real>>;
}

impl<S: VariateSource + ?Sized> VariateSource for Box<S> {
    fn dimension(&self) -> usize {
        (**self).dimension()
    }

    fn next_sequence(&mut self) -> &Sample<Vec<Real>> {
        (**self).next_sequence()
    }

    fn last_sequence(&self) -> &Sample<Vec<Real>> {
        (**self).last_sequence()
    }
}

/// Sobol points mapped to standard normals.
pub type LowDiscrepancy = InverseCumulativeRsg<SobolRsg>;

/// Mersenne Twister points mapped to standard normals.
pub type PseudoRandom = InverseCumulativeRsg<MersenneTwisterRsg>;

/// Gaussian low-discrepancy source of the given dimension.
///
/// `seed` only affects the Sobol dimensions beyond the tabulated initial
/// direction numbers.
pub fn low_discrepancy(dimension: usize, seed: u64) -> Result<LowDiscrepancy> {
    Ok(InverseCumulativeRsg::new(SobolRsg::new(dimension, seed)?))
}

/// Gaussian pseudo-random source of the given dimension.
pub fn pseudo_random(dimension: usize, seed: u64) -> Result<PseudoRandom> {
    Ok(InverseCumulativeRsg::new(MersenneTwisterRsg::new(
        dimension, seed,
    )?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boxed_source_delegates() {
        let mut boxed: Box<dyn VariateSource> = Box::new(low_discrepancy(3, 42).unwrap());
        assert_eq!(boxed.dimension(), 3);
        let first = boxed.next_sequence().clone();
        assert_eq!(boxed.last_sequence(), &first);
        // The first Sobol point is 0.5 in every dimension.
        for &x in &first.value {
            assert!(x.abs() < 1e-15);
        }
    }

    #[test]
    fn factories_reject_zero_dimension() {
        assert!(low_discrepancy(0, 42).is_err());
        assert!(pseudo_random(0, 42).is_err());
    }
}
