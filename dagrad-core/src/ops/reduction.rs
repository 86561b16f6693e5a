// src/ops/reduction.rs

use crate::matrix::Matrix;

/// Sums `m` along one axis.
///
/// * `dim == 0`: sums each row, producing a `rows x 1` column.
/// * any other `dim`: sums each column, producing a `1 x cols` row.
pub fn sum_op(m: &Matrix, dim: usize) -> Matrix {
    let (rows, cols) = m.shape();
    if dim == 0 {
        let out: Vec<f32> = m
            .as_slice()
            .chunks(cols)
            .map(|row| row.iter().sum::<f32>())
            .collect();
        Matrix::from_parts(rows, 1, out)
    } else {
        let mut out = vec![0.0f32; cols];
        for row in m.as_slice().chunks(cols) {
            for (acc, &x) in out.iter_mut().zip(row) {
                *acc += x;
            }
        }
        Matrix::from_parts(1, cols, out)
    }
}

impl Matrix {
    /// See [`sum_op`].
    pub fn sum(&self, dim: usize) -> Matrix {
        sum_op(self, dim)
    }
}
