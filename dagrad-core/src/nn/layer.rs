use crate::error::DagradError;
use crate::graph::{Graph, NodeId};
use crate::matrix::Matrix;
use crate::nn::Parameter;
use std::fmt::Debug;

/// Input and output nodes recorded by a layer's most recent forward pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForwardTrace {
    pub input: NodeId,
    pub output: NodeId,
}

/// The base trait for all layers (activations, linear maps, containers).
///
/// A layer's forward pass wires its input and its own parameter leaves
/// through the graph operators, so backward needs no per-layer derivative
/// code: running the engine from the recorded output already yields the
/// gradients of the parameters and of the input.
pub trait Layer: Debug {
    /// Short human-readable name, used in error messages.
    fn name(&self) -> &str;

    /// Builds the layer's nodes on top of `input` and returns the output node.
    ///
    /// Implementations bind their parameters into `graph` and record a
    /// [`ForwardTrace`] for [`Layer::backward`].
    fn forward(&mut self, graph: &mut Graph, input: NodeId) -> Result<NodeId, DagradError>;

    /// The trace left by the most recent forward pass, if any.
    fn trace(&self) -> Option<ForwardTrace>;

    /// All learnable parameters, including those of nested layers.
    fn parameters(&self) -> Vec<&Parameter>;

    fn parameters_mut(&mut self) -> Vec<&mut Parameter>;

    /// Runs backward from the recorded output seeded with `upstream`, adds
    /// the resulting gradients into the parameters, and returns the gradient
    /// with respect to the recorded input.
    ///
    /// Graph gradients of every ancestor of the output are reset first, so
    /// each call contributes exactly one pass to the parameters. Chaining
    /// `l1.backward(graph, &l2.backward(graph, &g)?)` therefore counts each
    /// parameter once.
    ///
    /// The input gradient is zero when the input node does not require grad.
    ///
    /// # Errors
    /// `BackwardBeforeForward` when no forward pass was recorded, and any
    /// error of the backward pass itself.
    fn backward(&mut self, graph: &mut Graph, upstream: &Matrix) -> Result<Matrix, DagradError> {
        let trace = self
            .trace()
            .ok_or_else(|| DagradError::BackwardBeforeForward(self.name().to_string()))?;
        graph.zero_grad_from(trace.output)?;
        graph.backward_from(trace.output, upstream.clone())?;
        self.collect_grads(graph)?;
        Ok(graph.grad(trace.input)?.clone())
    }

    /// Adds the gradients of every bound parameter leaf into its parameter.
    fn collect_grads(&mut self, graph: &Graph) -> Result<(), DagradError> {
        for param in self.parameters_mut() {
            param.collect_grad(graph)?;
        }
        Ok(())
    }

    /// Resets the accumulated gradient of every parameter.
    fn zero_grad(&mut self) {
        for param in self.parameters_mut() {
            param.zero_grad();
        }
    }
}
