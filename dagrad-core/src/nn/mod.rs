// src/nn/mod.rs
//! Layers, parameters and losses built on the graph operators.

pub mod init;
pub mod layer;
pub mod layers;
pub mod losses;
pub mod parameter;

pub use layer::{ForwardTrace, Layer};
pub use layers::{Linear, Relu, Sequential, Sigmoid};
pub use losses::{mse_loss, squared_error, Reduction};
pub use parameter::Parameter;
