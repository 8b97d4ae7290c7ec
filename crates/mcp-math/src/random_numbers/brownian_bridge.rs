//! Brownian-bridge variate reordering.
//!
//! A Brownian bridge fills in a Wiener path by bisection: the first variate
//! fixes the terminal value, the second the midpoint, and so on. With a
//! low-discrepancy source this puts the best-distributed coordinates on the
//! largest-scale features of the path.
//!
//! [`BrownianBridge::transform`] returns the bridged path as *normalized
//! increments* `(W(t_i) - W(t_{i-1})) / sqrt(t_i - t_{i-1})`, so its output
//! has the same joint law as the input and can be fed step by step to a
//! process exactly like an unbridged draw.

use mcp_core::{ensure, errors::Result, Real};

/// Brownian-bridge construction on a fixed time grid.
#[derive(Debug, Clone)]
pub struct BrownianBridge {
    size: usize,
    /// Grid times after the origin: `t[i]` is the end of step `i`.
    t: Vec<Real>,
    sqrt_dt: Vec<Real>,
    bridge_index: Vec<usize>,
    left_index: Vec<usize>,
    right_index: Vec<usize>,
    left_weight: Vec<Real>,
    right_weight: Vec<Real>,
    std_dev: Vec<Real>,
}

impl BrownianBridge {
    /// Create a bridge for `steps` unit-length time steps.
    pub fn new(steps: usize) -> Result<Self> {
        ensure!(steps >= 1, "the bridge needs at least one step");
        let times: Vec<Real> = (0..=steps).map(|i| i as Real).collect();
        Self::with_times(&times)
    }

    /// Create a bridge for an arbitrary time grid.
    ///
    /// `times` must start at 0 and be strictly increasing; a grid of
    /// `steps + 1` points gives a bridge of `steps` variates.
    pub fn with_times(times: &[Real]) -> Result<Self> {
        ensure!(times.len() >= 2, "need at least 2 time points");
        ensure!(times[0] == 0.0, "the time grid must start at 0");
        ensure!(
            times.windows(2).all(|w| w[1] > w[0]),
            "the time grid must be strictly increasing"
        );
        let t = times[1..].to_vec();
        let size = t.len();

        let mut sqrt_dt = vec![0.0; size];
        sqrt_dt[0] = t[0].sqrt();
        for i in 1..size {
            sqrt_dt[i] = (t[i] - t[i - 1]).sqrt();
        }

        let mut bridge = Self {
            size,
            t,
            sqrt_dt,
            bridge_index: vec![0; size],
            left_index: vec![0; size],
            right_index: vec![0; size],
            left_weight: vec![0.0; size],
            right_weight: vec![0.0; size],
            std_dev: vec![0.0; size],
        };
        bridge.initialize();
        Ok(bridge)
    }

    fn initialize(&mut self) {
        let size = self.size;
        let t = &self.t;
        // map[j] != 0 once point j has been placed.
        let mut map = vec![0usize; size];

        map[size - 1] = 1;
        self.bridge_index[0] = size - 1;
        self.std_dev[0] = t[size - 1].sqrt();

        let mut j = 0;
        for i in 1..size {
            // First unpopulated point...
            while map[j] != 0 {
                j += 1;
            }
            // ...and the next populated one to its right.
            let mut k = j;
            while map[k] == 0 {
                k += 1;
            }
            let l = j + ((k - 1 - j) >> 1);
            map[l] = i;
            self.bridge_index[i] = l;
            self.left_index[i] = j;
            self.right_index[i] = k;
            if j != 0 {
                let span = t[k] - t[j - 1];
                self.left_weight[i] = (t[k] - t[l]) / span;
                self.right_weight[i] = (t[l] - t[j - 1]) / span;
                self.std_dev[i] = ((t[l] - t[j - 1]) * (t[k] - t[l]) / span).sqrt();
            } else {
                self.left_weight[i] = (t[k] - t[l]) / t[k];
                self.right_weight[i] = t[l] / t[k];
                self.std_dev[i] = (t[l] * (t[k] - t[l]) / t[k]).sqrt();
            }
            j = k + 1;
            if j >= size {
                j = 0;
            }
        }
    }

    /// Number of variates consumed and produced per transform.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Grid times after the origin.
    pub fn times(&self) -> &[Real] {
        &self.t
    }

    /// Order in which grid points are filled: `bridge_index()[i]` is the
    /// point determined by the `i`-th input variate.
    pub fn bridge_index(&self) -> &[usize] {
        &self.bridge_index
    }

    /// Reorder `input` into normalized increments written to `output`.
    ///
    /// Both slices must hold [`size`](Self::size) elements.
    pub fn transform(&self, input: &[Real], output: &mut [Real]) {
        debug_assert_eq!(input.len(), self.size);
        debug_assert_eq!(output.len(), self.size);
        let size = self.size;

        // Wiener values at the grid points, in bridge order.
        output[size - 1] = self.std_dev[0] * input[0];
        for i in 1..size {
            let j = self.left_index[i];
            let k = self.right_index[i];
            let l = self.bridge_index[i];
            let left = if j != 0 {
                self.left_weight[i] * output[j - 1]
            } else {
                0.0
            };
            output[l] = left + self.right_weight[i] * output[k] + self.std_dev[i] * input[i];
        }

        // Back to normalized increments.
        for i in (1..size).rev() {
            output[i] = (output[i] - output[i - 1]) / self.sqrt_dt[i];
        }
        output[0] /= self.sqrt_dt[0];
    }
}
