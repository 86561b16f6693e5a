use crate::error::DagradError;
use crate::graph::{Graph, NodeId};
use crate::nn::{ForwardTrace, Layer, Parameter};

/// Elementwise `max(x, 0)`.
#[derive(Debug, Default)]
pub struct Relu {
    trace: Option<ForwardTrace>,
}

impl Relu {
    pub fn new() -> Self {
        Relu::default()
    }
}

impl Layer for Relu {
    fn name(&self) -> &str {
        "relu"
    }

    fn forward(&mut self, graph: &mut Graph, input: NodeId) -> Result<NodeId, DagradError> {
        let output = graph.relu(input)?;
        self.trace = Some(ForwardTrace { input, output });
        Ok(output)
    }

    fn trace(&self) -> Option<ForwardTrace> {
        self.trace
    }

    fn parameters(&self) -> Vec<&Parameter> {
        Vec::new()
    }

    fn parameters_mut(&mut self) -> Vec<&mut Parameter> {
        Vec::new()
    }
}

/// Elementwise logistic function `1 / (1 + e^-x)`.
#[derive(Debug, Default)]
pub struct Sigmoid {
    trace: Option<ForwardTrace>,
}

impl Sigmoid {
    pub fn new() -> Self {
        Sigmoid::default()
    }
}

impl Layer for Sigmoid {
    fn name(&self) -> &str {
        "sigmoid"
    }

    fn forward(&mut self, graph: &mut Graph, input: NodeId) -> Result<NodeId, DagradError> {
        let output = graph.sigmoid(input)?;
        self.trace = Some(ForwardTrace { input, output });
        Ok(output)
    }

    fn trace(&self) -> Option<ForwardTrace> {
        self.trace
    }

    fn parameters(&self) -> Vec<&Parameter> {
        Vec::new()
    }

    fn parameters_mut(&mut self) -> Vec<&mut Parameter> {
        Vec::new()
    }
}
