//! Reverse-mode automatic differentiation.
//!
//! A backward pass walks the nodes reachable from its roots in reverse
//! topological order (see [`graph`]), asks each operator node's [`OpKind`]
//! for the local contributions of its operands ([`BackwardOp`]), and sums
//! them into per-node totals before the node itself is processed. This is
//! what makes shared subexpressions such as `x + x` receive every
//! contribution rather than only the last one.

pub mod backward_op;
pub(crate) mod engine;
pub mod grad_check;
pub(crate) mod graph;
pub mod op_kind;

pub use backward_op::BackwardOp;
pub use grad_check::{check_grad, GradCheckError};
pub use op_kind::OpKind;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_tests;
