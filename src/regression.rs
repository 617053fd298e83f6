//! Online least-squares slope estimation.

use serde::{Deserialize, Serialize};

/// Incremental ordinary-least-squares fit of `y` against `x`.
///
/// Keeps running means and centred co-moments (Welford style) so the slope
/// matches a batch fit over every pushed point without retaining them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegressionAccumulator {
    count: u64,
    mean_x: f64,
    mean_y: f64,
    /// Sum of (x - mean_x)^2.
    m2_x: f64,
    /// Sum of (x - mean_x)(y - mean_y).
    c_xy: f64,
}

impl RegressionAccumulator {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Incorporate one observation.
    pub fn push(&mut self, x: f64, y: f64) {
        self.count += 1;
        let n = self.count as f64;
        let dx = x - self.mean_x;
        self.mean_x += dx / n;
        self.mean_y += (y - self.mean_y) / n;
        self.m2_x += dx * (x - self.mean_x);
        self.c_xy += dx * (y - self.mean_y);
    }

    /// Least-squares slope of all observations so far.
    ///
    /// Zero until at least two distinct `x` values have been pushed.
    pub fn slope(&self) -> f64 {
        if self.count < 2 || self.m2_x == 0.0 {
            return 0.0;
        }
        self.c_xy / self.m2_x
    }

    /// Number of observations pushed.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Forget every observation.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
