use crate::error::DagradError;
use crate::graph::{Graph, NodeId};
use crate::matrix::Matrix;
use log::debug;
use thiserror::Error;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for input {input_index}, element {element_index}: analytical {analytical} != numerical {numerical} (difference {difference})")]
    GradientMismatch {
        input_index: usize,
        element_index: usize,
        analytical: f64,
        numerical: f64,
        difference: f64,
    },

    #[error("Numerical gradient is not finite for input {input_index}, element {element_index}: loss+ {loss_plus}, loss- {loss_minus}")]
    NumericalGradNotFinite {
        input_index: usize,
        element_index: usize,
        loss_plus: f64,
        loss_minus: f64,
    },

    #[error("Epsilon must be positive, got {0}")]
    InvalidEpsilon(f64),

    #[error("Graph error during gradient check: {0}")]
    Graph(#[from] DagradError),
}

/// Weighted sum `Σ seed ⊙ output` in f64.
fn projected_loss(output: &Matrix, seed: &Matrix) -> Result<f64, DagradError> {
    output.ensure_same_shape(seed, "grad check loss")?;
    Ok(output
        .as_slice()
        .iter()
        .zip(seed.as_slice())
        .map(|(&o, &s)| f64::from(o) * f64::from(s))
        .sum())
}

fn evaluate<F>(build: &F, inputs: &[Matrix], seed: &Matrix) -> Result<f64, DagradError>
where
    F: Fn(&mut Graph, &[NodeId]) -> Result<NodeId, DagradError>,
{
    let mut graph = Graph::new();
    let leaves: Vec<NodeId> = inputs.iter().map(|m| graph.constant(m.clone())).collect();
    let output = build(&mut graph, &leaves)?;
    projected_loss(graph.value(output)?, seed)
}

/// Checks engine gradients against central finite differences.
///
/// `build` receives a fresh graph and one leaf per entry of `inputs` and
/// returns the output node. With loss `L = Σ seed ⊙ output`, the analytical
/// dL/dinput from a single backward pass seeded with `seed` is compared to
/// `(L(x + ε) - L(x - ε)) / 2ε` element by element. An element passes when
/// `|analytical - numerical| <= tolerance * max(1, |numerical|)`.
///
/// The graph is rebuilt for every perturbation, so `build` must be pure.
pub fn check_grad<F>(
    build: F,
    inputs: &[Matrix],
    seed: &Matrix,
    epsilon: f64,
    tolerance: f64,
) -> Result<(), GradCheckError>
where
    F: Fn(&mut Graph, &[NodeId]) -> Result<NodeId, DagradError>,
{
    if epsilon <= 0.0 || !epsilon.is_finite() {
        return Err(GradCheckError::InvalidEpsilon(epsilon));
    }

    // --- Analytical gradients ---
    let mut graph = Graph::new();
    let leaves: Vec<NodeId> = inputs.iter().map(|m| graph.variable(m.clone())).collect();
    let output = build(&mut graph, &leaves)?;
    graph.backward_from(output, seed.clone())?;

    // --- Numerical gradients ---
    let mut perturbed: Vec<Matrix> = inputs.to_vec();
    for (input_index, leaf) in leaves.iter().enumerate() {
        let analytical = graph.grad(*leaf)?.clone();
        for element_index in 0..inputs[input_index].len() {
            let original = inputs[input_index].as_slice()[element_index];

            perturbed[input_index].as_mut_slice()[element_index] = (f64::from(original) + epsilon) as f32;
            let loss_plus = evaluate(&build, &perturbed, seed)?;
            perturbed[input_index].as_mut_slice()[element_index] = (f64::from(original) - epsilon) as f32;
            let loss_minus = evaluate(&build, &perturbed, seed)?;
            perturbed[input_index].as_mut_slice()[element_index] = original;

            let numerical = (loss_plus - loss_minus) / (2.0 * epsilon);
            if !numerical.is_finite() {
                return Err(GradCheckError::NumericalGradNotFinite {
                    input_index,
                    element_index,
                    loss_plus,
                    loss_minus,
                });
            }
            let analytical_value = f64::from(analytical.as_slice()[element_index]);
            let difference = (analytical_value - numerical).abs();
            if difference > tolerance * numerical.abs().max(1.0) {
                return Err(GradCheckError::GradientMismatch {
                    input_index,
                    element_index,
                    analytical: analytical_value,
                    numerical,
                    difference,
                });
            }
        }
    }
    debug!("grad check passed for {} input(s)", inputs.len());
    Ok(())
}
