// src/graph/node.rs

use crate::autograd::OpKind;
use crate::matrix::Matrix;

/// Handle to a node owned by a [`Graph`](crate::graph::Graph).
///
/// Handles are scoped to the graph that issued them; any other graph rejects
/// them with `NodeNotFound`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    pub(crate) graph: u32,
    pub(crate) index: usize,
}

impl NodeId {
    /// Position of the node in its graph, in creation order.
    pub fn index(&self) -> usize {
        self.index
    }
}

/// One value in a computation graph together with its gradient buffer.
///
/// `grad` always has the shape of `value`. It starts at zero and is only
/// written by a backward pass or reset by `zero_grad`.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) value: Matrix,
    pub(crate) op: OpKind,
    pub(crate) operands: Vec<NodeId>,
    pub(crate) grad: Matrix,
    pub(crate) requires_grad: bool,
    pub(crate) visited: bool,
}

impl Node {
    pub(crate) fn new(value: Matrix, op: OpKind, operands: Vec<NodeId>, requires_grad: bool) -> Self {
        let grad = value.zeros_like();
        Node {
            value,
            op,
            operands,
            grad,
            requires_grad,
            visited: false,
        }
    }

    pub fn value(&self) -> &Matrix {
        &self.value
    }

    pub fn grad(&self) -> &Matrix {
        &self.grad
    }

    pub fn op(&self) -> OpKind {
        self.op
    }

    /// Operand handles, in operation order (left first).
    pub fn operands(&self) -> &[NodeId] {
        &self.operands
    }

    pub fn requires_grad(&self) -> bool {
        self.requires_grad
    }

    /// A leaf has no operands.
    pub fn is_leaf(&self) -> bool {
        self.operands.is_empty()
    }

    /// Whether the last backward pass since `zero_grad` traversed this node.
    pub fn is_visited(&self) -> bool {
        self.visited
    }

    pub(crate) fn reset_grad(&mut self) {
        self.grad.fill(0.0);
        self.visited = false;
    }
}
