use crate::graph::Node;
use std::collections::VecDeque;

/// The part of a graph reachable from a set of roots through operand edges.
pub(crate) struct Reachable {
    /// Distinct roots, in the order they were first given.
    pub roots: Vec<usize>,
    /// Every reachable node index, roots included.
    pub nodes: Vec<usize>,
    /// Per node index: how many operand edges inside the reachable part point
    /// at that node. A node used twice by one consumer (`x + x`) counts twice.
    pub consumer_counts: Vec<usize>,
}

/// First pass: collects the reachable nodes and their in-computation fan-out.
pub(crate) fn reachable_from(nodes: &[Node], roots: &[usize]) -> Reachable {
    let mut consumer_counts = vec![0usize; nodes.len()];
    let mut seen = vec![false; nodes.len()];
    let mut unique_roots = Vec::with_capacity(roots.len());
    let mut reached = Vec::new();
    let mut stack = Vec::new();

    for &root in roots {
        if !seen[root] {
            seen[root] = true;
            unique_roots.push(root);
            stack.push(root);
        }
    }

    while let Some(index) = stack.pop() {
        reached.push(index);
        for operand in &nodes[index].operands {
            let i = operand.index;
            consumer_counts[i] += 1;
            if !seen[i] {
                seen[i] = true;
                stack.push(i);
            }
        }
    }

    Reachable {
        roots: unique_roots,
        nodes: reached,
        consumer_counts,
    }
}

/// Orders the nodes reachable from `roots` so that every node comes before
/// all of its operands.
///
/// Second pass: a node is emitted only once every consumer inside the
/// reachable part has been emitted, i.e. once its gradient can no longer
/// receive contributions.
pub(crate) fn reverse_topological_order(nodes: &[Node], roots: &[usize]) -> Vec<usize> {
    let Reachable {
        roots,
        nodes: reached,
        mut consumer_counts,
    } = reachable_from(nodes, roots);

    // A root that is itself an operand of another root waits for it.
    let mut ready: VecDeque<usize> = roots
        .into_iter()
        .filter(|&root| consumer_counts[root] == 0)
        .collect();
    let mut order = Vec::with_capacity(reached.len());

    while let Some(index) = ready.pop_front() {
        order.push(index);
        for operand in &nodes[index].operands {
            let i = operand.index;
            consumer_counts[i] -= 1;
            if consumer_counts[i] == 0 {
                ready.push_back(i);
            }
        }
    }

    // Operands always precede their consumers in the arena, so no cycle can
    // leave a node behind.
    debug_assert_eq!(order.len(), reached.len());
    order
}
