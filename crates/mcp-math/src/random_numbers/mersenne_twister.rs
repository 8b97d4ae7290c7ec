//! Mersenne Twister uniform generators.

use super::{Sample, VariateSource};
use mcp_core::{ensure, errors::Result, Real};
use rand_mt::Mt19937GenRand64;

/// A uniform pseudo-random number generator based on the Mersenne Twister
/// MT19937-64 algorithm.
pub struct MersenneTwisterUniformRng {
    rng: Mt19937GenRand64,
}

impl MersenneTwisterUniformRng {
    /// Create a new generator with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mt19937GenRand64::new(seed),
        }
    }

    /// Generate the next uniform deviate in the open interval `(0, 1)`.
    pub fn next_real(&mut self) -> Real {
        // 53 random bits, shifted half a step off zero.
        let bits = self.rng.next_u64() >> 11;
        (bits as Real + 0.5) / (1u64 << 53) as Real
    }

    /// Generate the next 32-bit integer deviate.
    pub fn next_int32(&mut self) -> u32 {
        self.rng.next_u32()
    }
}

impl std::fmt::Debug for MersenneTwisterUniformRng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MersenneTwisterUniformRng").finish_non_exhaustive()
    }
}

/// Uniform pseudo-random sequences of a fixed dimension.
#[derive(Debug)]
pub struct MersenneTwisterRsg {
    rng: MersenneTwisterUniformRng,
    sequence: Sample<Vec<Real>>,
}

impl MersenneTwisterRsg {
    /// Create a `dimension`-dimensional generator seeded with `seed`.
    pub fn new(dimension: usize, seed: u64) -> Result<Self> {
        ensure!(dimension >= 1, "sequence dimension must be positive");
        Ok(Self {
            rng: MersenneTwisterUniformRng::new(seed),
            sequence: Sample::new(vec![0.0; dimension], 1.0),
        })
    }
}

impl VariateSource for MersenneTwisterRsg {
    fn dimension(&self) -> usize {
        self.sequence.value.len()
    }

    fn next_sequence(&mut self) -> &Sample<Vec<Real>> {
        for x in self.sequence.value.iter_mut() {
            *x = self.rng.next_real();
        }
        &self.sequence
    }

    fn last_sequence(&self) -> &Sample<Vec<Real>> {
        &self.sequence
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mt_open_unit_interval() {
        let mut rng = MersenneTwisterUniformRng::new(42);
        for _ in 0..10_000 {
            let x = rng.next_real();
            assert!(x > 0.0 && x < 1.0);
        }
    }

    #[test]
    fn mt_sequence_is_reproducible() {
        let mut a = MersenneTwisterRsg::new(4, 7).unwrap();
        let mut b = MersenneTwisterRsg::new(4, 7).unwrap();
        for _ in 0..10 {
            assert_eq!(a.next_sequence(), b.next_sequence());
        }
        let mut c = MersenneTwisterRsg::new(4, 8).unwrap();
        assert_ne!(a.next_sequence().value, c.next_sequence().value);
    }

    #[test]
    fn mt_sample_mean() {
        let mut rsg = MersenneTwisterRsg::new(1, 42).unwrap();
        let n = 20_000;
        let mean = (0..n).map(|_| rsg.next_sequence().value[0]).sum::<Real>() / n as Real;
        assert!((mean - 0.5).abs() < 0.01, "mean {mean}");
    }
}
