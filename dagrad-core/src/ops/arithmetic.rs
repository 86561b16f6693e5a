// src/ops/arithmetic.rs

use crate::error::DagradError;
use crate::matrix::Matrix;
use std::ops::{Add, Mul, Neg, Sub};

/// Divisors whose magnitude falls below this threshold are rejected.
pub const DIV_EPSILON: f32 = 1e-9;

fn check_divisor(value: f32, operation: &str) -> Result<(), DagradError> {
    if value.abs() < DIV_EPSILON {
        return Err(DagradError::DivideByZero {
            operation: operation.to_string(),
            value,
        });
    }
    Ok(())
}

/// Elementwise `a + b`. Both operands must have the same shape.
pub fn add_op(a: &Matrix, b: &Matrix) -> Result<Matrix, DagradError> {
    a.zip_map(b, "add", |x, y| x + y)
}

/// Elementwise `a - b`.
pub fn sub_op(a: &Matrix, b: &Matrix) -> Result<Matrix, DagradError> {
    a.zip_map(b, "sub", |x, y| x - y)
}

/// Elementwise (Hadamard) product `a ⊙ b`.
pub fn mul_op(a: &Matrix, b: &Matrix) -> Result<Matrix, DagradError> {
    a.zip_map(b, "mul", |x, y| x * y)
}

/// Elementwise `a ⊘ b`.
///
/// Every divisor is validated before the output is built, so a
/// `DivideByZero` error never comes with a partially computed result.
pub fn div_op(a: &Matrix, b: &Matrix) -> Result<Matrix, DagradError> {
    a.ensure_same_shape(b, "div")?;
    for &divisor in b.as_slice() {
        check_divisor(divisor, "div")?;
    }
    a.zip_map(b, "div", |x, y| x / y)
}

/// Elementwise negation.
pub fn neg_op(a: &Matrix) -> Matrix {
    a.map(|x| -x)
}

impl Matrix {
    /// `self + scalar` on every element.
    pub fn add_scalar(&self, scalar: f32) -> Matrix {
        self.map(|x| x + scalar)
    }

    /// `self - scalar` on every element.
    pub fn sub_scalar(&self, scalar: f32) -> Matrix {
        self.map(|x| x - scalar)
    }

    /// `scalar - self` on every element.
    pub fn rsub_scalar(&self, scalar: f32) -> Matrix {
        self.map(|x| scalar - x)
    }

    /// `self * scalar` on every element.
    pub fn mul_scalar(&self, scalar: f32) -> Matrix {
        self.map(|x| x * scalar)
    }

    /// `self / scalar` on every element.
    pub fn div_scalar(&self, scalar: f32) -> Result<Matrix, DagradError> {
        check_divisor(scalar, "div_scalar")?;
        Ok(self.map(|x| x / scalar))
    }

    /// `scalar / self` on every element; each element is a divisor.
    pub fn rdiv_scalar(&self, scalar: f32) -> Result<Matrix, DagradError> {
        for &divisor in self.as_slice() {
            check_divisor(divisor, "rdiv_scalar")?;
        }
        Ok(self.map(|x| scalar / x))
    }
}

// Scalar broadcasting cannot fail for `+ - *`, so those get operator impls on
// both sides. Division stays behind the fallible methods above.

impl Add<f32> for &Matrix {
    type Output = Matrix;
    fn add(self, rhs: f32) -> Matrix {
        self.add_scalar(rhs)
    }
}

impl Add<&Matrix> for f32 {
    type Output = Matrix;
    fn add(self, rhs: &Matrix) -> Matrix {
        rhs.add_scalar(self)
    }
}

impl Sub<f32> for &Matrix {
    type Output = Matrix;
    fn sub(self, rhs: f32) -> Matrix {
        self.sub_scalar(rhs)
    }
}

impl Sub<&Matrix> for f32 {
    type Output = Matrix;
    fn sub(self, rhs: &Matrix) -> Matrix {
        rhs.rsub_scalar(self)
    }
}

impl Mul<f32> for &Matrix {
    type Output = Matrix;
    fn mul(self, rhs: f32) -> Matrix {
        self.mul_scalar(rhs)
    }
}

impl Mul<&Matrix> for f32 {
    type Output = Matrix;
    fn mul(self, rhs: &Matrix) -> Matrix {
        rhs.mul_scalar(self)
    }
}

impl Neg for &Matrix {
    type Output = Matrix;
    fn neg(self) -> Matrix {
        neg_op(self)
    }
}

#[cfg(test)]
#[path = "arithmetic_test.rs"]
mod tests;
