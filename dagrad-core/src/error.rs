use crate::graph::NodeId;
use thiserror::Error;

/// Every failure a matrix kernel, graph operation, layer or optimiser can report.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum DagradError {
    #[error("Shape mismatch during operation {operation}: left is {left:?}, right is {right:?}")]
    ShapeMismatch {
        operation: String,
        left: (usize, usize),
        right: (usize, usize),
    },

    #[error("Division by zero during operation {operation}: divisor {value} is too close to zero")]
    DivideByZero { operation: String, value: f32 },

    #[error("Invalid dimension {rows}x{cols}: rows and cols must both be positive")]
    InvalidDimension { rows: usize, cols: usize },

    #[error("Matrix creation error: data length {data_len} does not match {rows}x{cols}")]
    DataLengthMismatch {
        data_len: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Index out of bounds: ({row}, {col}) for a {rows}x{cols} matrix")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Layer {layer} has no parameter named '{name}'")]
    MissingParameter { layer: String, name: String },

    #[error("Node {0:?} does not belong to this graph")]
    NodeNotFound(NodeId),

    #[error("Node {0:?} is an operator node, the operation requires a leaf")]
    NotALeaf(NodeId),

    #[error("Backward called on layer {0} before any forward pass")]
    BackwardBeforeForward(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}
