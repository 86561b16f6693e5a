// src/ops/linalg.rs

use crate::error::DagradError;
use crate::matrix::Matrix;

/// Returns the `cols x rows` transpose, `out[j, i] = m[i, j]`.
pub fn transpose_op(m: &Matrix) -> Matrix {
    let (rows, cols) = m.shape();
    let src = m.as_slice();
    let mut out = vec![0.0; rows * cols];
    for i in 0..rows {
        for j in 0..cols {
            out[j * rows + i] = src[i * cols + j];
        }
    }
    Matrix::from_parts(cols, rows, out)
}

/// Matrix product `a · b`, `out[i, j] = Σ_k a[i, k] * b[k, j]`.
///
/// Requires `a.cols() == b.rows()`; the result is `a.rows() x b.cols()`.
pub fn matmul_op(a: &Matrix, b: &Matrix) -> Result<Matrix, DagradError> {
    let (m, k) = a.shape();
    let (k2, n) = b.shape();
    if k != k2 {
        return Err(DagradError::ShapeMismatch {
            operation: "matmul".to_string(),
            left: a.shape(),
            right: b.shape(),
        });
    }

    let a_data = a.as_slice();
    let b_data = b.as_slice();
    let mut out = vec![0.0f32; m * n];
    for i in 0..m {
        for j in 0..n {
            let mut acc = 0.0f32;
            for p in 0..k {
                acc += a_data[i * k + p] * b_data[p * n + j];
            }
            out[i * n + j] = acc;
        }
    }
    Ok(Matrix::from_parts(m, n, out))
}

impl Matrix {
    /// See [`transpose_op`].
    pub fn transpose(&self) -> Matrix {
        transpose_op(self)
    }

    /// See [`matmul_op`].
    pub fn matmul(&self, other: &Matrix) -> Result<Matrix, DagradError> {
        matmul_op(self, other)
    }
}
