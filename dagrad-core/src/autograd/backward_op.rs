use crate::autograd::op_kind::OpKind;
use crate::error::DagradError;
use crate::matrix::Matrix;
use crate::ops::activation::relu_mask;
use crate::ops::{div_op, matmul_op, mul_op, neg_op};

/// Defines the local-derivative rule of a differentiable operation.
///
/// Given the values of the operation's inputs, its own output value, and the
/// gradient flowing into that output (`grad_output`, dL/dOutput), returns the
/// contribution dL/dInput_i for each input, in input order. Each contribution
/// has the shape of the corresponding input.
///
/// Every rule in the crate lives in the single `OpKind` implementation below;
/// the engine never special-cases an operation.
pub trait BackwardOp {
    fn backward(
        &self,
        inputs: &[&Matrix],
        output: &Matrix,
        grad_output: &Matrix,
    ) -> Result<Vec<Matrix>, DagradError>;
}

impl BackwardOp for OpKind {
    fn backward(
        &self,
        inputs: &[&Matrix],
        output: &Matrix,
        grad_output: &Matrix,
    ) -> Result<Vec<Matrix>, DagradError> {
        self.check_arity(inputs.len())?;
        let g = grad_output;
        match self {
            OpKind::Leaf => Ok(Vec::new()),
            // d(l + r) = g, g
            OpKind::Add => Ok(vec![g.clone(), g.clone()]),
            // d(l - r) = g, -g
            OpKind::Sub => Ok(vec![g.clone(), neg_op(g)]),
            // d(l ⊙ r) = r ⊙ g, l ⊙ g
            OpKind::Mul => {
                let (l, r) = (inputs[0], inputs[1]);
                Ok(vec![mul_op(r, g)?, mul_op(l, g)?])
            }
            // d(l ⊘ r) = g ⊘ r, -(l ⊘ r²) ⊙ g
            OpKind::Div => {
                let (l, r) = (inputs[0], inputs[1]);
                let grad_l = div_op(g, r)?;
                // (l ⊘ r) ⊘ r rather than l ⊘ (r ⊙ r): r already passed the
                // divisor check in forward, r² may underflow below it.
                let l_over_r_squared = div_op(&div_op(l, r)?, r)?;
                let grad_r = mul_op(&neg_op(&l_over_r_squared), g)?;
                Ok(vec![grad_l, grad_r])
            }
            // d(l · r) = g · rᵗ, lᵗ · g
            OpKind::MatMul => {
                let (l, r) = (inputs[0], inputs[1]);
                Ok(vec![matmul_op(g, &r.transpose())?, matmul_op(&l.transpose(), g)?])
            }
            OpKind::ReLU => Ok(vec![mul_op(g, &relu_mask(inputs[0]))?]),
            // s' = s ⊙ (1 - s), with s the node's own output.
            OpKind::Sigmoid => {
                let slope = output.map(|s| s * (1.0 - s));
                Ok(vec![mul_op(g, &slope)?])
            }
            OpKind::Conv | OpKind::MaxPool => Err(DagradError::UnsupportedOperation(format!(
                "{} has no backward rule",
                self.name()
            ))),
        }
    }
}

#[cfg(test)]
#[path = "backward_op_test.rs"]
mod tests;
