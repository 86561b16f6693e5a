// src/ops/clip.rs

use crate::matrix::Matrix;

/// Which side a single-bound clip clamps from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipBound {
    /// Values below the limit are raised to it.
    Lower,
    /// Values above the limit are lowered to it.
    Upper,
}

impl Matrix {
    /// Clamps every element into `[low, high]`.
    ///
    /// `low > high` is not rejected: each element is first raised to `low`,
    /// then lowered to `high`, so the result is filled with `high`.
    pub fn clip(&self, low: f32, high: f32) -> Matrix {
        self.map(|x| x.max(low).min(high))
    }

    /// Clamps from one side only.
    pub fn clip_bound(&self, limit: f32, bound: ClipBound) -> Matrix {
        match bound {
            ClipBound::Lower => self.map(|x| x.max(limit)),
            ClipBound::Upper => self.map(|x| x.min(limit)),
        }
    }
}
