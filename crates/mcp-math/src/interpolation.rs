//! 1D interpolation trait and linear interpolation.

use mcp_core::{ensure, errors::Result, Real};

/// A 1D interpolation function `f: R → R` defined by a set of known points.
pub trait Interpolation1D: std::fmt::Debug + Send + Sync {
    /// Evaluate the interpolation at `x`.
    fn operator(&self, x: Real) -> Real;

    /// Integral of the interpolant from `x_min()` to `x`.
    fn primitive(&self, x: Real) -> Real;

    /// Return the lower bound of the interpolation domain.
    fn x_min(&self) -> Real;

    /// Return the upper bound of the interpolation domain.
    fn x_max(&self) -> Real;

    /// Return `true` if `x` is within the interpolation range.
    fn is_in_range(&self, x: Real) -> bool {
        x >= self.x_min() && x <= self.x_max()
    }
}

/// Linear interpolation.
///
/// `f(x) = y[i] + (y[i+1] - y[i]) * (x - x[i]) / (x[i+1] - x[i])`
///
/// Outside `[x_min, x_max]` the first or last segment is extended.
#[derive(Debug, Clone)]
pub struct LinearInterpolation {
    xs: Vec<Real>,
    ys: Vec<Real>,
    /// `primitive_const[i]` = integral from `xs[0]` to `xs[i]`.
    primitive_const: Vec<Real>,
}

impl LinearInterpolation {
    /// Construct a linear interpolation from strictly increasing `xs` and
    /// the corresponding `ys`.
    ///
    /// # Errors
    /// Returns an error if the slices have different lengths, hold fewer than
    /// 2 points, or `xs` is not strictly increasing.
    pub fn new(xs: &[Real], ys: &[Real]) -> Result<Self> {
        ensure!(xs.len() >= 2, "need at least 2 points for interpolation");
        ensure!(
            xs.len() == ys.len(),
            "xs and ys must have the same length ({} != {})",
            xs.len(),
            ys.len()
        );
        ensure!(
            xs.windows(2).all(|w| w[1] > w[0]),
            "interpolation abscissae must be strictly increasing"
        );
        let mut primitive_const = vec![0.0; xs.len()];
        for i in 1..xs.len() {
            let dx = xs[i] - xs[i - 1];
            primitive_const[i] = primitive_const[i - 1] + 0.5 * dx * (ys[i - 1] + ys[i]);
        }
        Ok(Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            primitive_const,
        })
    }

    /// Interpolation nodes.
    pub fn xs(&self) -> &[Real] {
        &self.xs
    }

    /// Interpolated values at the nodes.
    pub fn ys(&self) -> &[Real] {
        &self.ys
    }

    fn locate(&self, x: Real) -> usize {
        let n = self.xs.len();
        if x <= self.xs[0] {
            return 0;
        }
        if x >= self.xs[n - 1] {
            return n - 2;
        }
        // First node strictly greater than x, minus one.
        self.xs.partition_point(|&xi| xi <= x) - 1
    }

    fn slope(&self, i: usize) -> Real {
        (self.ys[i + 1] - self.ys[i]) / (self.xs[i + 1] - self.xs[i])
    }
}

impl Interpolation1D for LinearInterpolation {
    fn operator(&self, x: Real) -> Real {
        let i = self.locate(x);
        self.ys[i] + (x - self.xs[i]) * self.slope(i)
    }

    fn primitive(&self, x: Real) -> Real {
        let i = self.locate(x);
        let dx = x - self.xs[i];
        self.primitive_const[i] + dx * (self.ys[i] + 0.5 * dx * self.slope(i))
    }

    fn x_min(&self) -> Real {
        self.xs[0]
    }

    fn x_max(&self) -> Real {
        self.xs[self.xs.len() - 1]
    }
}
