// src/graph/mod.rs

use crate::autograd::engine::run_backward;
use crate::autograd::graph::reachable_from;
use crate::autograd::OpKind;
use crate::error::DagradError;
use crate::matrix::Matrix;
use log::{debug, trace};
use std::sync::atomic::{AtomicU32, Ordering};

mod config;
mod node;

pub use config::{BackwardOptions, GraphConfig, RootSelection};
pub use node::{Node, NodeId};

static NEXT_GRAPH_ID: AtomicU32 = AtomicU32::new(0);

/// Arena owning every node of one or more computations.
///
/// Nodes are appended as operators are applied and live as long as the
/// graph. Operands are referred to by [`NodeId`] handles, so a node can be
/// shared by any number of consumers and no handle can outlive the storage
/// it points into.
///
/// ```
/// use dagrad_core::{Graph, Matrix};
///
/// let mut g = Graph::new();
/// let a = g.variable(Matrix::full(5.0, 1, 1)?);
/// let b = g.variable(Matrix::full(3.0, 1, 1)?);
/// let ba = g.mul(b, a)?;
/// let c = g.sub(a, ba)?;
/// g.backward_from(c, Matrix::ones(1, 1)?)?;
/// assert_eq!(g.grad(a)?.as_slice(), &[-2.0]);
/// assert_eq!(g.grad(b)?.as_slice(), &[-5.0]);
/// # Ok::<(), dagrad_core::DagradError>(())
/// ```
#[derive(Debug)]
pub struct Graph {
    id: u32,
    pub(crate) nodes: Vec<Node>,
    roots: Vec<NodeId>,
    config: GraphConfig,
}

impl Default for Graph {
    fn default() -> Self {
        Graph::new()
    }
}

impl Graph {
    /// Creates an empty graph with the default configuration.
    pub fn new() -> Self {
        Graph::with_config(GraphConfig::default())
    }

    pub fn with_config(config: GraphConfig) -> Self {
        Graph {
            id: NEXT_GRAPH_ID.fetch_add(1, Ordering::Relaxed),
            nodes: Vec::new(),
            roots: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> GraphConfig {
        self.config
    }

    pub fn set_config(&mut self, config: GraphConfig) {
        self.config = config;
    }

    /// Number of nodes owned by the graph.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn resolve(&self, id: NodeId) -> Result<usize, DagradError> {
        if id.graph != self.id || id.index >= self.nodes.len() {
            return Err(DagradError::NodeNotFound(id));
        }
        Ok(id.index)
    }

    fn handle(&self, index: usize) -> NodeId {
        NodeId {
            graph: self.id,
            index,
        }
    }

    pub fn node(&self, id: NodeId) -> Result<&Node, DagradError> {
        let index = self.resolve(id)?;
        Ok(&self.nodes[index])
    }

    /// Forward value of `id`.
    pub fn value(&self, id: NodeId) -> Result<&Matrix, DagradError> {
        Ok(&self.node(id)?.value)
    }

    /// Gradient accumulated into `id` by backward passes since the last reset.
    pub fn grad(&self, id: NodeId) -> Result<&Matrix, DagradError> {
        Ok(&self.node(id)?.grad)
    }

    /// Iterates over `(handle, node)` pairs in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(move |(index, node)| (self.handle(index), node))
    }

    // --- Node construction ---

    /// Adds a leaf holding `value`.
    pub fn leaf(&mut self, value: Matrix, requires_grad: bool) -> NodeId {
        let id = self.handle(self.nodes.len());
        trace!("graph {}: leaf {} {:?}", self.id, id.index, value.shape());
        self.nodes.push(Node::new(value, OpKind::Leaf, Vec::new(), requires_grad));
        id
    }

    /// Adds a leaf that requires grad (a trainable parameter or a watched input).
    pub fn variable(&mut self, value: Matrix) -> NodeId {
        self.leaf(value, true)
    }

    /// Adds a leaf that does not require grad (data, frozen weights).
    pub fn constant(&mut self, value: Matrix) -> NodeId {
        self.leaf(value, false)
    }

    fn push_op(&mut self, op: OpKind, operands: &[NodeId]) -> Result<NodeId, DagradError> {
        let indices = operands
            .iter()
            .map(|&id| self.resolve(id))
            .collect::<Result<Vec<_>, _>>()?;
        let value = {
            let inputs: Vec<&Matrix> = indices.iter().map(|&i| &self.nodes[i].value).collect();
            op.forward(&inputs)?
        };
        let requires_grad = indices.iter().any(|&i| self.nodes[i].requires_grad);

        let id = self.handle(self.nodes.len());
        trace!(
            "graph {}: {} {} <- {:?} {:?}",
            self.id,
            op.name(),
            id.index,
            indices,
            value.shape()
        );
        self.nodes
            .push(Node::new(value, op, operands.to_vec(), requires_grad));
        Ok(id)
    }

    /// Elementwise `l + r`.
    pub fn add(&mut self, l: NodeId, r: NodeId) -> Result<NodeId, DagradError> {
        self.push_op(OpKind::Add, &[l, r])
    }

    /// Elementwise `l - r`.
    pub fn sub(&mut self, l: NodeId, r: NodeId) -> Result<NodeId, DagradError> {
        self.push_op(OpKind::Sub, &[l, r])
    }

    /// Elementwise `l ⊙ r`.
    pub fn mul(&mut self, l: NodeId, r: NodeId) -> Result<NodeId, DagradError> {
        self.push_op(OpKind::Mul, &[l, r])
    }

    /// Elementwise `l ⊘ r`; fails with `DivideByZero` on a near-zero divisor.
    pub fn div(&mut self, l: NodeId, r: NodeId) -> Result<NodeId, DagradError> {
        self.push_op(OpKind::Div, &[l, r])
    }

    /// Matrix product `l · r`.
    pub fn matmul(&mut self, l: NodeId, r: NodeId) -> Result<NodeId, DagradError> {
        self.push_op(OpKind::MatMul, &[l, r])
    }

    pub fn relu(&mut self, x: NodeId) -> Result<NodeId, DagradError> {
        self.push_op(OpKind::ReLU, &[x])
    }

    pub fn sigmoid(&mut self, x: NodeId) -> Result<NodeId, DagradError> {
        self.push_op(OpKind::Sigmoid, &[x])
    }

    // --- Re-evaluation ---

    /// Replaces the value of a leaf. The new value must keep the leaf's shape;
    /// call [`Graph::forward`] afterwards to refresh dependent nodes.
    pub fn set_value(&mut self, id: NodeId, value: Matrix) -> Result<(), DagradError> {
        let index = self.resolve(id)?;
        let node = &mut self.nodes[index];
        if !node.is_leaf() {
            return Err(DagradError::NotALeaf(id));
        }
        node.value.ensure_same_shape(&value, "set_value")?;
        node.value = value;
        Ok(())
    }

    /// Re-evaluates every operator node in creation order.
    ///
    /// New values are staged and only stored once every node evaluated, so a
    /// failure (e.g. a leaf that now holds a zero divisor) leaves the graph
    /// as it was.
    pub fn forward(&mut self) -> Result<(), DagradError> {
        let mut fresh: Vec<Option<Matrix>> = vec![None; self.nodes.len()];
        for (index, node) in self.nodes.iter().enumerate() {
            if node.is_leaf() {
                continue;
            }
            let inputs: Vec<&Matrix> = node
                .operands
                .iter()
                .map(|operand| fresh[operand.index].as_ref().unwrap_or(&self.nodes[operand.index].value))
                .collect();
            let value = node.op.forward(&inputs)?;
            fresh[index] = Some(value);
        }
        let mut recomputed = 0;
        for (node, value) in self.nodes.iter_mut().zip(fresh) {
            if let Some(value) = value {
                node.value = value;
                recomputed += 1;
            }
        }
        debug!("graph {}: forward recomputed {} node(s)", self.id, recomputed);
        Ok(())
    }

    // --- Roots ---

    /// Registers `id` as a designated root for the bulk [`Graph::backward`].
    /// Registering the same node twice is a no-op.
    pub fn add_node(&mut self, id: NodeId) -> Result<(), DagradError> {
        self.resolve(id)?;
        if !self.roots.contains(&id) {
            self.roots.push(id);
        }
        Ok(())
    }

    /// Designated roots, in registration order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// How many operand edges point at `id` across the whole graph.
    pub fn consumers(&self, id: NodeId) -> Result<usize, DagradError> {
        let index = self.resolve(id)?;
        Ok(self
            .nodes
            .iter()
            .flat_map(|node| node.operands.iter())
            .filter(|operand| operand.index == index)
            .count())
    }

    /// Nodes that no other node in the graph consumes.
    pub fn terminal_nodes(&self) -> Vec<NodeId> {
        let mut consumed = vec![false; self.nodes.len()];
        for node in &self.nodes {
            for operand in &node.operands {
                consumed[operand.index] = true;
            }
        }
        consumed
            .iter()
            .enumerate()
            .filter(|(_, &is_consumed)| !is_consumed)
            .map(|(index, _)| self.handle(index))
            .collect()
    }

    // --- Backward ---

    /// Backward from a single root using the graph's configured options.
    ///
    /// `seed` must have the root's shape; all-ones is the usual choice for a
    /// loss. Afterwards every node reachable from `root` that requires grad
    /// holds dRoot/dNode (weighted by `seed`) in its `grad`.
    pub fn backward_from(&mut self, root: NodeId, seed: Matrix) -> Result<(), DagradError> {
        let options = self.config.backward;
        self.backward_with(root, seed, options)
    }

    /// Backward from a single root with explicit options.
    pub fn backward_with(
        &mut self,
        root: NodeId,
        seed: Matrix,
        options: BackwardOptions,
    ) -> Result<(), DagradError> {
        let index = self.resolve(root)?;
        let updated = run_backward(&mut self.nodes, vec![(index, seed)], options)?;
        debug!("graph {}: backward from {} updated {} node(s)", self.id, index, updated);
        Ok(())
    }

    /// Bulk backward over several outputs in one pass, each seeded with ones.
    ///
    /// The roots are the terminal nodes that require grad or the designated
    /// roots, depending on [`GraphConfig::roots`]. Nodes shared between
    /// outputs receive the sum of every output's contribution.
    pub fn backward(&mut self) -> Result<(), DagradError> {
        let roots: Vec<NodeId> = match self.config.roots {
            RootSelection::Terminal => self
                .terminal_nodes()
                .into_iter()
                .filter(|id| self.nodes[id.index].requires_grad)
                .collect(),
            RootSelection::Designated => self.roots.clone(),
        };
        let seeds: Vec<(usize, Matrix)> = roots
            .iter()
            .map(|id| (id.index, self.nodes[id.index].value.ones_like()))
            .collect();
        let updated = run_backward(&mut self.nodes, seeds, self.config.backward)?;
        debug!(
            "graph {}: bulk backward from {} root(s) updated {} node(s)",
            self.id,
            roots.len(),
            updated
        );
        Ok(())
    }

    /// Resets every gradient to zero and clears the visited marks.
    pub fn zero_grad(&mut self) {
        for node in &mut self.nodes {
            node.reset_grad();
        }
        debug!("graph {}: zero_grad on {} node(s)", self.id, self.nodes.len());
    }

    /// Resets `id` and every node it depends on.
    pub fn zero_grad_from(&mut self, id: NodeId) -> Result<(), DagradError> {
        let index = self.resolve(id)?;
        let reached = reachable_from(&self.nodes, &[index]).nodes;
        for &i in &reached {
            self.nodes[i].reset_grad();
        }
        debug!("graph {}: zero_grad from {} reset {} node(s)", self.id, index, reached.len());
        Ok(())
    }
}

#[cfg(test)]
#[path = "graph_test.rs"]
mod tests;
