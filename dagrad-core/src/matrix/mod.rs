// src/matrix/mod.rs

use crate::error::DagradError;
use std::ops::{Index, IndexMut};

pub mod create;
mod compare;
mod display;

/// A dense, row-major 2-D buffer of `f32` values.
///
/// A `Matrix` always owns its buffer: `clone()` deep-copies the data, so two
/// matrices never alias the same storage. Dimensions are fixed at
/// construction and both are strictly positive.
///
/// Construction goes through the fallible constructors in [`create`]
/// (`Matrix::zeros`, `Matrix::full`, `Matrix::from_vec`, ...), which reject a
/// zero row/col count and buffers whose length disagrees with `rows * cols`.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl Matrix {
    /// Wraps an already validated buffer. Callers guarantee
    /// `data.len() == rows * cols` and non-zero dimensions.
    pub(crate) fn from_parts(rows: usize, cols: usize, data: Vec<f32>) -> Self {
        debug_assert_eq!(data.len(), rows * cols);
        Matrix { rows, cols, data }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Number of elements, `rows * cols`.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always `false`: a matrix has at least one element.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Row-major view of the buffer.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Mutable row-major view of the buffer.
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Consumes the matrix and returns its buffer.
    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    /// Returns the element at `(row, col)`, or `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    /// Overwrites the element at `(row, col)`.
    pub fn set(&mut self, row: usize, col: usize, value: f32) -> Result<(), DagradError> {
        if row >= self.rows || col >= self.cols {
            return Err(DagradError::IndexOutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        self.data[row * self.cols + col] = value;
        Ok(())
    }

    /// Sets every element to `value`.
    pub fn fill(&mut self, value: f32) {
        self.data.fill(value);
    }

    /// Sum of every element.
    pub fn sum_all(&self) -> f32 {
        self.data.iter().sum()
    }

    /// Arithmetic mean of every element.
    pub fn mean(&self) -> f32 {
        self.sum_all() / self.data.len() as f32
    }

    /// Checks that `other` has the same shape, reporting `operation` otherwise.
    pub(crate) fn ensure_same_shape(&self, other: &Matrix, operation: &str) -> Result<(), DagradError> {
        if self.shape() != other.shape() {
            return Err(DagradError::ShapeMismatch {
                operation: operation.to_string(),
                left: self.shape(),
                right: other.shape(),
            });
        }
        Ok(())
    }

    /// Applies `f` to every element, producing a new matrix of the same shape.
    pub(crate) fn map(&self, f: impl Fn(f32) -> f32) -> Matrix {
        Matrix::from_parts(self.rows, self.cols, self.data.iter().map(|&x| f(x)).collect())
    }

    /// Combines two same-shaped matrices element by element.
    pub(crate) fn zip_map(
        &self,
        other: &Matrix,
        operation: &str,
        f: impl Fn(f32, f32) -> f32,
    ) -> Result<Matrix, DagradError> {
        self.ensure_same_shape(other, operation)?;
        let data = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(&a, &b)| f(a, b))
            .collect();
        Ok(Matrix::from_parts(self.rows, self.cols, data))
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f32;

    /// Panics when `(row, col)` is out of bounds; use [`Matrix::get`] for a
    /// checked lookup.
    fn index(&self, (row, col): (usize, usize)) -> &f32 {
        assert!(
            row < self.rows && col < self.cols,
            "index ({}, {}) out of bounds for {}x{} matrix",
            row,
            col,
            self.rows,
            self.cols
        );
        &self.data[row * self.cols + col]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f32 {
        assert!(
            row < self.rows && col < self.cols,
            "index ({}, {}) out of bounds for {}x{} matrix",
            row,
            col,
            self.rows,
            self.cols
        );
        &mut self.data[row * self.cols + col]
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
