use crate::error::DagradError;
use crate::graph::{Graph, NodeId};
use crate::nn::{ForwardTrace, Layer, Parameter};
use log::debug;

/// Runs a list of layers one after the other.
///
/// The trace spans the whole chain: its input is the first layer's input and
/// its output the last layer's output, so the provided [`Layer::backward`]
/// covers every child in one pass.
#[derive(Debug, Default)]
pub struct Sequential {
    layers: Vec<Box<dyn Layer>>,
    trace: Option<ForwardTrace>,
}

impl Sequential {
    pub fn new() -> Self {
        Sequential::default()
    }

    /// Appends a layer; builder style.
    pub fn with(mut self, layer: impl Layer + 'static) -> Self {
        self.push(layer);
        self
    }

    pub fn push(&mut self, layer: impl Layer + 'static) {
        self.layers.push(Box::new(layer));
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn layers(&self) -> &[Box<dyn Layer>] {
        &self.layers
    }
}

impl Layer for Sequential {
    fn name(&self) -> &str {
        "sequential"
    }

    /// An empty container is the identity: its output is `input` itself.
    fn forward(&mut self, graph: &mut Graph, input: NodeId) -> Result<NodeId, DagradError> {
        let mut current = input;
        for layer in &mut self.layers {
            current = layer.forward(graph, current)?;
        }
        debug!(
            "sequential: {} layer(s), node {} -> node {}",
            self.layers.len(),
            input.index(),
            current.index()
        );
        self.trace = Some(ForwardTrace {
            input,
            output: current,
        });
        Ok(current)
    }

    fn trace(&self) -> Option<ForwardTrace> {
        self.trace
    }

    fn parameters(&self) -> Vec<&Parameter> {
        self.layers.iter().flat_map(|l| l.parameters()).collect()
    }

    fn parameters_mut(&mut self) -> Vec<&mut Parameter> {
        self.layers
            .iter_mut()
            .flat_map(|l| l.parameters_mut())
            .collect()
    }
}

#[cfg(test)]
#[path = "sequential_test.rs"]
mod tests;
