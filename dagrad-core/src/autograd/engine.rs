use crate::autograd::backward_op::BackwardOp;
use crate::autograd::graph::reverse_topological_order;
use crate::error::DagradError;
use crate::graph::{BackwardOptions, Node};
use crate::matrix::Matrix;
use crate::ops::add_op;
use log::{debug, trace, warn};
use std::collections::HashSet;

fn accumulate(slot: &mut Option<Matrix>, grad: Matrix) -> Result<(), DagradError> {
    let total = match slot.take() {
        Some(existing) => add_op(&existing, &grad)?,
        None => grad,
    };
    *slot = Some(total);
    Ok(())
}

/// Runs reverse-mode differentiation from every `(node index, seed)` pair.
///
/// Gradients are summed per node in a scratch buffer while nodes are
/// processed in reverse topological order, so each node propagates only once
/// its total is final. Stored `grad` buffers are written after the whole
/// pass succeeded; on error no node is modified.
///
/// Returns the number of nodes whose gradient was updated.
pub(crate) fn run_backward(
    nodes: &mut [Node],
    seeds: Vec<(usize, Matrix)>,
    options: BackwardOptions,
) -> Result<usize, DagradError> {
    let mut upstream: Vec<Option<Matrix>> = vec![None; nodes.len()];
    let mut roots = Vec::with_capacity(seeds.len());

    for (index, seed) in seeds {
        let node = &nodes[index];
        node.value.ensure_same_shape(&seed, "backward seed")?;
        if !node.requires_grad {
            warn!("backward requested on node {} which does not require grad, skipping", index);
            continue;
        }
        accumulate(&mut upstream[index], seed)?;
        roots.push(index);
    }
    if roots.is_empty() {
        return Ok(0);
    }

    let order = reverse_topological_order(nodes, &roots);
    debug!(
        "backward: {} root(s), {} reachable node(s)",
        roots.len(),
        order.len()
    );

    let mut totals: Vec<(usize, Matrix)> = Vec::with_capacity(order.len());
    for &index in &order {
        // Nodes that do not require grad never receive a contribution.
        let Some(grad) = upstream[index].take() else {
            continue;
        };
        let node = &nodes[index];
        if !node.is_leaf() {
            let inputs: Vec<&Matrix> = node
                .operands
                .iter()
                .map(|operand| &nodes[operand.index].value)
                .collect();
            let contributions = node.op.backward(&inputs, &node.value, &grad)?;
            for (operand, contribution) in node.operands.iter().zip(contributions) {
                let target = &nodes[operand.index];
                if !target.requires_grad {
                    continue;
                }
                target
                    .value
                    .ensure_same_shape(&contribution, "gradient accumulation")?;
                accumulate(&mut upstream[operand.index], contribution)?;
            }
        }
        trace!("backward: closed node {} ({})", index, node.op.name());
        totals.push((index, grad));
    }

    let seeded: HashSet<usize> = roots.into_iter().collect();
    for &index in &order {
        nodes[index].visited = true;
    }
    let updated = totals.len();
    for (index, grad) in totals {
        let node = &mut nodes[index];
        node.grad = if seeded.contains(&index) && !options.accumulate {
            grad
        } else {
            add_op(&node.grad, &grad)?
        };
    }
    Ok(updated)
}
