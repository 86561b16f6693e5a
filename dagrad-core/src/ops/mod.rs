// src/ops/mod.rs
//! Kernels over [`Matrix`](crate::matrix::Matrix).
//!
//! Every kernel allocates a fresh output and either fully succeeds or returns
//! an error before producing anything; inputs are never mutated.

pub mod activation;
pub mod arithmetic;
pub mod clip;
pub mod linalg;
pub mod reduction;

pub use arithmetic::{add_op, div_op, mul_op, neg_op, sub_op, DIV_EPSILON};
pub use clip::ClipBound;
pub use linalg::{matmul_op, transpose_op};
pub use reduction::sum_op;
