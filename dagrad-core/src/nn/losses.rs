use crate::error::DagradError;
use crate::graph::{Graph, NodeId};
use crate::matrix::Matrix;

/// How an elementwise loss is reduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reduction {
    /// Keep the elementwise loss.
    None,
    Sum,
    #[default]
    Mean,
}

/// Elementwise squared error `(prediction - target) ⊙ (prediction - target)`.
pub fn squared_error(
    graph: &mut Graph,
    prediction: NodeId,
    target: NodeId,
) -> Result<NodeId, DagradError> {
    let diff = graph.sub(prediction, target)?;
    graph.mul(diff, diff)
}

/// Squared error reduced to a `1 x 1` node (or left elementwise).
///
/// Sums are expressed as `ones(1 x rows) · e · ones(cols x 1)` and the mean
/// as a product with a constant `1/n`, so the result stays differentiable
/// through the ordinary graph operators.
pub fn mse_loss(
    graph: &mut Graph,
    prediction: NodeId,
    target: NodeId,
    reduction: Reduction,
) -> Result<NodeId, DagradError> {
    let errors = squared_error(graph, prediction, target)?;
    if reduction == Reduction::None {
        return Ok(errors);
    }
    let (rows, cols) = graph.value(errors)?.shape();
    let left = graph.constant(Matrix::ones(1, rows)?);
    let right = graph.constant(Matrix::ones(cols, 1)?);
    let row_sums = graph.matmul(left, errors)?;
    let total = graph.matmul(row_sums, right)?;
    match reduction {
        Reduction::Mean => {
            let scale = graph.constant(Matrix::full(1.0 / (rows * cols) as f32, 1, 1)?);
            graph.mul(total, scale)
        }
        _ => Ok(total),
    }
}

#[cfg(test)]
#[path = "losses_test.rs"]
mod tests;
