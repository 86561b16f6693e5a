// src/matrix/create.rs

use crate::error::DagradError;
use crate::matrix::Matrix;

fn check_dims(rows: usize, cols: usize) -> Result<(), DagradError> {
    if rows == 0 || cols == 0 {
        return Err(DagradError::InvalidDimension { rows, cols });
    }
    Ok(())
}

impl Matrix {
    /// Creates a `rows x cols` matrix with a zero-filled buffer.
    pub fn new(rows: usize, cols: usize) -> Result<Self, DagradError> {
        Matrix::full(0.0, rows, cols)
    }

    /// Creates a `rows x cols` matrix with every element set to `value`.
    pub fn full(value: f32, rows: usize, cols: usize) -> Result<Self, DagradError> {
        check_dims(rows, cols)?;
        Ok(Matrix::from_parts(rows, cols, vec![value; rows * cols]))
    }

    /// Creates a matrix filled with `0.0`.
    pub fn zeros(rows: usize, cols: usize) -> Result<Self, DagradError> {
        Matrix::full(0.0, rows, cols)
    }

    /// Creates a matrix filled with `1.0`.
    pub fn ones(rows: usize, cols: usize) -> Result<Self, DagradError> {
        Matrix::full(1.0, rows, cols)
    }

    /// Takes ownership of a row-major buffer.
    pub fn from_vec(data: Vec<f32>, rows: usize, cols: usize) -> Result<Self, DagradError> {
        check_dims(rows, cols)?;
        if data.len() != rows * cols {
            return Err(DagradError::DataLengthMismatch {
                data_len: data.len(),
                rows,
                cols,
            });
        }
        Ok(Matrix::from_parts(rows, cols, data))
    }

    /// Copies a row-major buffer.
    pub fn from_slice(data: &[f32], rows: usize, cols: usize) -> Result<Self, DagradError> {
        Matrix::from_vec(data.to_vec(), rows, cols)
    }

    /// Builds a matrix from fixed-width rows, e.g. `Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]])`.
    pub fn from_rows<const C: usize>(rows: &[[f32; C]]) -> Result<Self, DagradError> {
        check_dims(rows.len(), C)?;
        let data = rows.iter().flat_map(|row| row.iter().copied()).collect();
        Ok(Matrix::from_parts(rows.len(), C, data))
    }

    /// A zero matrix with the same shape as `self`.
    pub fn zeros_like(&self) -> Matrix {
        Matrix::from_parts(self.rows(), self.cols(), vec![0.0; self.len()])
    }

    /// A matrix of ones with the same shape as `self`.
    pub fn ones_like(&self) -> Matrix {
        Matrix::from_parts(self.rows(), self.cols(), vec![1.0; self.len()])
    }
}

#[cfg(test)]
#[path = "create_test.rs"]
mod tests;
