use crate::error::DagradError;
use crate::graph::{Graph, NodeId};
use crate::matrix::Matrix;
use crate::nn::init::fan_in_uniform;
use crate::nn::{ForwardTrace, Layer, Parameter};
use log::trace;
use rand::Rng;
use std::collections::BTreeMap;

/// Applies an affine map to a batch of rows: `y = x · weight + bias`.
///
/// `x` is `batch x in_features`, `weight` is `in_features x out_features`
/// and `bias` is a single `1 x out_features` row, added to every row of the
/// batch through `ones(batch x 1) · bias`.
#[derive(Debug)]
pub struct Linear {
    params: BTreeMap<String, Parameter>,
    in_features: usize,
    out_features: usize,
    trace: Option<ForwardTrace>,
}

impl Linear {
    /// Creates a layer with fan-in uniform weights and a zero bias.
    pub fn new<R: Rng + ?Sized>(
        in_features: usize,
        out_features: usize,
        rng: &mut R,
    ) -> Result<Self, DagradError> {
        let weight = fan_in_uniform(in_features, out_features, rng)?;
        let bias = Matrix::zeros(1, out_features)?;
        Linear::from_matrices(weight, bias)
    }

    /// Creates a layer from explicit weight and bias matrices.
    ///
    /// # Errors
    /// `ShapeMismatch` if `bias` is not `1 x weight.cols()`.
    pub fn from_matrices(weight: Matrix, bias: Matrix) -> Result<Self, DagradError> {
        let (in_features, out_features) = weight.shape();
        if bias.shape() != (1, out_features) {
            return Err(DagradError::ShapeMismatch {
                operation: "linear bias".to_string(),
                left: weight.shape(),
                right: bias.shape(),
            });
        }
        let mut params = BTreeMap::new();
        params.insert("weight".to_string(), Parameter::new("weight", weight));
        params.insert("bias".to_string(), Parameter::new("bias", bias));
        Ok(Linear {
            params,
            in_features,
            out_features,
            trace: None,
        })
    }

    pub fn in_features(&self) -> usize {
        self.in_features
    }

    pub fn out_features(&self) -> usize {
        self.out_features
    }

    /// Looks up a parameter by name (`"weight"` or `"bias"`).
    pub fn param(&self, name: &str) -> Result<&Parameter, DagradError> {
        self.params.get(name).ok_or_else(|| missing_parameter(name))
    }

    pub fn param_mut(&mut self, name: &str) -> Result<&mut Parameter, DagradError> {
        self.params
            .get_mut(name)
            .ok_or_else(|| missing_parameter(name))
    }

    /// Removes a parameter from the map, returning it. Later forward passes
    /// fail with `MissingParameter` until it is put back with
    /// [`Linear::insert_param`].
    pub fn remove_param(&mut self, name: &str) -> Option<Parameter> {
        self.params.remove(name)
    }

    pub fn insert_param(&mut self, param: Parameter) {
        self.params.insert(param.name().to_string(), param);
    }
}

const LAYER_NAME: &str = "linear";
const PARAM_NAMES: [&str; 2] = ["weight", "bias"];

fn missing_parameter(name: &str) -> DagradError {
    DagradError::MissingParameter {
        layer: LAYER_NAME.to_string(),
        name: name.to_string(),
    }
}

impl Layer for Linear {
    fn name(&self) -> &str {
        LAYER_NAME
    }

    fn forward(&mut self, graph: &mut Graph, input: NodeId) -> Result<NodeId, DagradError> {
        let batch = graph.value(input)?.rows();
        for name in PARAM_NAMES {
            self.param(name)?;
        }
        let weight = self.param_mut("weight")?.bind(graph);
        let bias = self.param_mut("bias")?.bind(graph);

        let xw = graph.matmul(input, weight)?;
        let ones = graph.constant(Matrix::ones(batch, 1)?);
        let rows_bias = graph.matmul(ones, bias)?;
        let output = graph.add(xw, rows_bias)?;

        trace!(
            "linear {}x{}: batch {} -> node {}",
            self.in_features,
            self.out_features,
            batch,
            output.index()
        );
        self.trace = Some(ForwardTrace { input, output });
        Ok(output)
    }

    fn trace(&self) -> Option<ForwardTrace> {
        self.trace
    }

    fn parameters(&self) -> Vec<&Parameter> {
        self.params.values().collect()
    }

    fn parameters_mut(&mut self) -> Vec<&mut Parameter> {
        self.params.values_mut().collect()
    }
}

#[cfg(test)]
#[path = "linear_test.rs"]
mod tests;
