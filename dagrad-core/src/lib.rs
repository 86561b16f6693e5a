//! Reverse-mode automatic differentiation over dense 2-D `f32` matrices.
//!
//! Computations are recorded in a [`Graph`] as operators are applied to
//! [`NodeId`] handles; a backward pass then fills every reachable node's
//! gradient. Layers ([`nn`]) and optimisers ([`optim`]) are built on top of
//! the same graph operators.

pub mod autograd;
pub mod error;
pub mod graph;
pub mod matrix;
pub mod nn;
pub mod ops;
pub mod optim;
pub mod utils;

pub use autograd::OpKind;
pub use error::DagradError;
pub use graph::{BackwardOptions, Graph, GraphConfig, NodeId, RootSelection};
pub use matrix::Matrix;
