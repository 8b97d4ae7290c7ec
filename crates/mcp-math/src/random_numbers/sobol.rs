//! Sobol quasi-random sequence generator.
//!
//! Dimension 0 is the Van der Corput sequence; dimension `d >= 1` uses the
//! `d`-th primitive polynomial over GF(2), ordered by degree and then by
//! coefficient pattern. Initial direction numbers are tabulated for the
//! first fifty dimensions; beyond that they are drawn from a Mersenne
//! Twister seeded by the caller.
//!
//! Points are produced in Gray-code order and the all-zero first point is
//! skipped, so every coordinate lies in the open interval `(0, 1)`.

use super::{MersenneTwisterUniformRng, Sample, VariateSource};
use mcp_core::{ensure, errors::Result, Real};

/// Maximum supported dimension for the Sobol sequence.
pub const MAX_DIMENSION: usize = 21201;

/// Number of bits used for the direction numbers.
const BITS: usize = 32;

/// Sobol quasi-random sequence generator.
pub struct SobolRsg {
    dimension: usize,
    sequence_count: u32,
    int_sequence: Vec<u32>,
    /// `direction_numbers[d][k]`, already shifted into the top bits.
    direction_numbers: Vec<[u32; BITS]>,
    sequence: Sample<Vec<Real>>,
}

impl SobolRsg {
    /// Create a new Sobol sequence generator of the given dimension.
    ///
    /// `seed` drives the initial direction numbers of the dimensions past
    /// the tabulated ones; lower dimensions do not depend on it.
    pub fn new(dimension: usize, seed: u64) -> Result<Self> {
        ensure!(
            (1..=MAX_DIMENSION).contains(&dimension),
            "Sobol dimension must be in [1, {MAX_DIMENSION}], got {dimension}"
        );

        Ok(Self {
            dimension,
            sequence_count: 0,
            int_sequence: vec![0u32; dimension],
            direction_numbers: init_direction_numbers(dimension, seed),
            sequence: Sample::new(vec![0.0; dimension], 1.0),
        })
    }

    /// Number of points generated so far.
    pub fn sequence_count(&self) -> u32 {
        self.sequence_count
    }

    /// Advance the integer sequence by one Gray-code step.
    fn next_int_sequence(&mut self) {
        let c = self.sequence_count.trailing_ones() as usize;
        // Past 2^32 points the sequence wraps around.
        let c = c.min(BITS - 1);
        for (x, v) in self.int_sequence.iter_mut().zip(&self.direction_numbers) {
            *x ^= v[c];
        }
        self.sequence_count = self.sequence_count.wrapping_add(1);
    }
}

impl VariateSource for SobolRsg {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn next_sequence(&mut self) -> &Sample<Vec<Real>> {
        self.next_int_sequence();
        let norm = (1u64 << BITS) as Real;
        for (x, &v) in self.sequence.value.iter_mut().zip(&self.int_sequence) {
            *x = v as Real / norm;
        }
        &self.sequence
    }

    fn last_sequence(&self) -> &Sample<Vec<Real>> {
        &self.sequence
    }
}

impl std::fmt::Debug for SobolRsg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SobolRsg")
            .field("dimension", &self.dimension)
            .field("sequence_count", &self.sequence_count)
            .finish_non_exhaustive()
    }
}

fn init_direction_numbers(dimension: usize, seed: u64) -> Vec<[u32; BITS]> {
    let mut dn = Vec::with_capacity(dimension);

    let mut vdc = [0u32; BITS];
    for (k, v) in vdc.iter_mut().enumerate() {
        *v = 1u32 << (BITS - 1 - k);
    }
    dn.push(vdc);

    let polynomials = primitive_polynomials(dimension - 1);
    let mut rng = MersenneTwisterUniformRng::new(seed);

    for (d, &(degree, poly)) in polynomials.iter().enumerate() {
        let mut v = [0u32; BITS];
        match INITIAL_NUMBERS.get(d) {
            Some(initial) => {
                for (k, &m) in initial.iter().enumerate() {
                    v[k] = m << (BITS - 1 - k);
                }
            }
            None => {
                // Any odd m_k < 2^k gives a valid sequence.
                for (k, slot) in v.iter_mut().take(degree).enumerate() {
                    let mask = ((1u64 << (k + 1)) - 1) as u32;
                    let m = (rng.next_int32() & mask) | 1;
                    *slot = m << (BITS - 1 - k);
                }
            }
        }

        for i in degree..BITS {
            v[i] = v[i - degree] ^ (v[i - degree] >> degree);
            for k in 1..degree {
                if poly & (1 << (degree - 1 - k)) != 0 {
                    v[i] ^= v[i - k];
                }
            }
        }

        dn.push(v);
    }

    dn
}

// ── Primitive polynomials ─────────────────────────────────────────────────────

/// The first `count` primitive polynomials over GF(2), as `(degree, a)`
/// pairs.
///
/// `a` holds the `degree - 1` interior coefficients, highest power first, so
/// the full polynomial is `x^degree + a_1 x^(degree-1) + ... + a_(degree-1) x + 1`.
/// Polynomials are ordered by degree and then by `a`.
pub fn primitive_polynomials(count: usize) -> Vec<(usize, u32)> {
    let mut out = Vec::with_capacity(count);
    let mut degree = 1usize;
    while out.len() < count {
        let order = (1u64 << degree) - 1;
        let factors = prime_factors(order);
        for a in 0..(1u32 << (degree - 1)) {
            if out.len() == count {
                break;
            }
            let poly = (1u64 << degree) | (u64::from(a) << 1) | 1;
            // An even number of terms means x + 1 divides the polynomial.
            if degree > 1 && poly.count_ones() % 2 == 0 {
                continue;
            }
            if is_primitive(poly, degree, order, &factors) {
                out.push((degree, a));
            }
        }
        degree += 1;
    }
    out
}

/// `x` generates the full multiplicative group of GF(2)[x] / (poly).
fn is_primitive(poly: u64, degree: usize, order: u64, factors: &[u64]) -> bool {
    if x_pow_mod(order, poly, degree) != 1 {
        return false;
    }
    factors
        .iter()
        .all(|&q| x_pow_mod(order / q, poly, degree) != 1)
}

fn mul_mod(mut a: u64, mut b: u64, poly: u64, degree: usize) -> u64 {
    let top = 1u64 << degree;
    let mut r = 0;
    while b != 0 {
        if b & 1 == 1 {
            r ^= a;
        }
        b >>= 1;
        a <<= 1;
        if a & top != 0 {
            a ^= poly;
        }
    }
    r
}

fn x_pow_mod(mut e: u64, poly: u64, degree: usize) -> u64 {
    let mut base = if degree == 1 { 0b10 ^ poly } else { 0b10 };
    let mut r = 1u64;
    while e != 0 {
        if e & 1 == 1 {
            r = mul_mod(r, base, poly, degree);
        }
        base = mul_mod(base, base, poly, degree);
        e >>= 1;
    }
    r
}

fn prime_factors(mut n: u64) -> Vec<u64> {
    let mut factors = Vec::new();
    let mut p = 2;
    while p * p <= n {
        if n % p == 0 {
            factors.push(p);
            while n % p == 0 {
                n /= p;
            }
        }
        p += 1;
    }
    if n > 1 {
        factors.push(n);
    }
    factors
}

/// Initial direction numbers `m_1, ..., m_s` for dimensions 1 through 50.
/// Each `m_k` is odd and smaller than `2^k`.
const INITIAL_NUMBERS: [&[u32]; 50] = [
    &[1],
    &[1, 1],
    &[1, 1, 1],
    &[1, 3, 1],
    &[1, 1, 1, 1],
    &[1, 3, 3, 1],
    &[1, 1, 1, 3, 3],
    &[1, 3, 5, 13, 7],
    &[1, 1, 5, 5, 15],
    &[1, 3, 1, 7, 9],
    &[1, 1, 3, 1, 13],
    &[1, 1, 7, 13, 25],
    &[1, 3, 7, 5, 29, 17],
    &[1, 1, 5, 9, 5, 57],
    &[1, 3, 1, 13, 25, 49],
    &[1, 1, 3, 7, 17, 23],
    &[1, 3, 5, 1, 15, 13],
    &[1, 1, 1, 15, 7, 61],
    &[1, 3, 1, 3, 5, 43, 79],
    &[1, 1, 7, 5, 1, 35, 65],
    &[1, 3, 3, 9, 31, 47, 3],
    &[1, 1, 5, 7, 11, 15, 93],
    &[1, 3, 7, 11, 17, 63, 111],
    &[1, 1, 3, 3, 19, 37, 53],
    &[1, 3, 1, 5, 5, 55, 99],
    &[1, 1, 7, 15, 29, 7, 73],
    &[1, 3, 5, 3, 29, 23, 83],
    &[1, 1, 1, 9, 15, 39, 13],
    &[1, 3, 3, 5, 9, 45, 117],
    &[1, 1, 5, 13, 7, 25, 91],
    &[1, 3, 7, 1, 19, 51, 97],
    &[1, 1, 3, 11, 5, 41, 109],
    &[1, 3, 1, 7, 27, 11, 63],
    &[1, 1, 7, 3, 21, 33, 75],
    &[1, 3, 5, 15, 31, 5, 49],
    &[1, 1, 1, 1, 23, 57, 15],
    &[1, 3, 3, 13, 3, 19, 111, 235],
    &[1, 1, 5, 1, 13, 41, 49, 237],
    &[1, 3, 7, 7, 17, 27, 91, 157],
    &[1, 1, 3, 9, 1, 53, 55, 69],
    &[1, 3, 1, 3, 19, 21, 77, 193],
    &[1, 1, 7, 11, 31, 17, 113, 43],
    &[1, 3, 5, 5, 5, 63, 19, 213],
    &[1, 1, 1, 7, 21, 45, 5, 251],
    &[1, 3, 3, 3, 27, 29, 97, 7],
    &[1, 1, 5, 15, 7, 7, 43, 195],
    &[1, 3, 7, 9, 29, 35, 79, 35],
    &[1, 1, 3, 5, 15, 59, 23, 59],
    &[1, 3, 1, 11, 1, 25, 121, 85],
    &[1, 1, 7, 1, 19, 3, 103, 101],
];
