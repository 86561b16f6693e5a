use crate::error::DagradError;
use crate::matrix::Matrix;
use crate::ops::activation::{relu_op, sigmoid_op};
use crate::ops::{add_op, div_op, matmul_op, mul_op, sub_op};

/// The operation that produced a graph node.
///
/// `Conv` and `MaxPool` are reserved for future layers. They have no forward
/// or backward rule yet, so no node carrying them can be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    /// No operands; a parameter or an input.
    Leaf,
    Add,
    Sub,
    /// Elementwise product.
    Mul,
    /// Elementwise quotient.
    Div,
    MatMul,
    ReLU,
    Sigmoid,
    Conv,
    MaxPool,
}

impl OpKind {
    /// Number of operands the operation consumes.
    pub fn arity(self) -> usize {
        match self {
            OpKind::Leaf => 0,
            OpKind::ReLU | OpKind::Sigmoid => 1,
            OpKind::Add
            | OpKind::Sub
            | OpKind::Mul
            | OpKind::Div
            | OpKind::MatMul
            | OpKind::Conv
            | OpKind::MaxPool => 2,
        }
    }

    /// Lower-case name used in logs and error messages.
    pub fn name(self) -> &'static str {
        match self {
            OpKind::Leaf => "leaf",
            OpKind::Add => "add",
            OpKind::Sub => "sub",
            OpKind::Mul => "mul",
            OpKind::Div => "div",
            OpKind::MatMul => "matmul",
            OpKind::ReLU => "relu",
            OpKind::Sigmoid => "sigmoid",
            OpKind::Conv => "conv",
            OpKind::MaxPool => "maxpool",
        }
    }

    pub(crate) fn check_arity(self, given: usize) -> Result<(), DagradError> {
        if given != self.arity() {
            return Err(DagradError::InternalError(format!(
                "{} expects {} operand(s), got {}",
                self.name(),
                self.arity(),
                given
            )));
        }
        Ok(())
    }

    /// Computes the operation's value from its operand values.
    pub(crate) fn forward(self, inputs: &[&Matrix]) -> Result<Matrix, DagradError> {
        self.check_arity(inputs.len())?;
        match self {
            OpKind::Add => add_op(inputs[0], inputs[1]),
            OpKind::Sub => sub_op(inputs[0], inputs[1]),
            OpKind::Mul => mul_op(inputs[0], inputs[1]),
            OpKind::Div => div_op(inputs[0], inputs[1]),
            OpKind::MatMul => matmul_op(inputs[0], inputs[1]),
            OpKind::ReLU => Ok(relu_op(inputs[0])),
            OpKind::Sigmoid => Ok(sigmoid_op(inputs[0])),
            OpKind::Leaf | OpKind::Conv | OpKind::MaxPool => Err(DagradError::UnsupportedOperation(
                format!("{} has no forward rule", self.name()),
            )),
        }
    }
}
