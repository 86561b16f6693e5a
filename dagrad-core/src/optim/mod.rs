// src/optim/mod.rs

//! Optimizers and gradient utilities for [`Parameter`](crate::nn::Parameter)s.

pub mod grad_clipping;
pub mod optimizer_trait;
pub mod sgd;

pub use grad_clipping::{clip_grad_norm, clip_grad_value};
pub use optimizer_trait::Optimizer;
pub use sgd::Sgd;
