// src/nn/layers/mod.rs

pub mod activation;
pub mod linear;
pub mod sequential;

pub use activation::{Relu, Sigmoid};
pub use linear::Linear;
pub use sequential::Sequential;
