use crate::error::DagradError;
use crate::graph::{Graph, NodeId};
use crate::matrix::Matrix;
use crate::ops::add_op;
use std::fmt;

/// A learnable matrix owned by a layer, together with its gradient.
///
/// A parameter lives outside any graph. Each forward pass registers it as a
/// fresh `requires_grad` leaf via [`Parameter::bind`]; after backward,
/// [`Parameter::collect_grad`] adds the leaf's gradient into `grad`.
#[derive(Clone)]
pub struct Parameter {
    name: String,
    value: Matrix,
    grad: Matrix,
    node: Option<NodeId>,
}

impl Parameter {
    /// Creates a parameter with a zero gradient.
    pub fn new(name: impl Into<String>, value: Matrix) -> Self {
        let grad = value.zeros_like();
        Parameter {
            name: name.into(),
            value,
            grad,
            node: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &Matrix {
        &self.value
    }

    /// Mutable access for optimisers. The shape must not change.
    pub fn value_mut(&mut self) -> &mut Matrix {
        &mut self.value
    }

    pub fn grad(&self) -> &Matrix {
        &self.grad
    }

    pub fn grad_mut(&mut self) -> &mut Matrix {
        &mut self.grad
    }

    pub fn shape(&self) -> (usize, usize) {
        self.value.shape()
    }

    /// The leaf created by the most recent [`Parameter::bind`], if any.
    pub fn node(&self) -> Option<NodeId> {
        self.node
    }

    /// Registers the current value as a new leaf in `graph` and remembers it.
    pub fn bind(&mut self, graph: &mut Graph) -> NodeId {
        let id = graph.variable(self.value.clone());
        self.node = Some(id);
        id
    }

    /// Adds the gradient of the bound leaf into `grad`.
    ///
    /// A parameter that was never bound has nothing to collect. A leaf foreign
    /// to `graph` fails with `NodeNotFound`.
    pub fn collect_grad(&mut self, graph: &Graph) -> Result<(), DagradError> {
        if let Some(id) = self.node {
            self.grad = add_op(&self.grad, graph.grad(id)?)?;
        }
        Ok(())
    }

    pub fn zero_grad(&mut self) {
        self.grad.fill(0.0);
    }
}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Parameter({}, {:?})", self.name, self.value.shape())
    }
}

#[cfg(test)]
#[path = "parameter_test.rs"]
mod tests;
