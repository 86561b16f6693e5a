// src/ops/activation.rs

use crate::matrix::Matrix;

/// `max(0, x)` elementwise.
pub fn relu_op(m: &Matrix) -> Matrix {
    m.map(|x| if x > 0.0 { x } else { 0.0 })
}

/// `1` where `x > 0`, else `0`. The ReLU derivative; zero at `x == 0`.
pub fn relu_mask(m: &Matrix) -> Matrix {
    m.map(|x| if x > 0.0 { 1.0 } else { 0.0 })
}

/// Logistic sigmoid `1 / (1 + e^-x)` elementwise.
pub fn sigmoid_op(m: &Matrix) -> Matrix {
    m.map(|x| 1.0 / (1.0 + (-x).exp()))
}
