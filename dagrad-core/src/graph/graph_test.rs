use super::*;
use crate::utils::testing::check_matrix_near;

fn scalar(value: f32) -> Matrix {
    Matrix::full(value, 1, 1).unwrap()
}

#[test]
fn test_leaf_and_operator_flags() {
    let mut g = Graph::new();
    let x = g.variable(Matrix::ones(2, 3).unwrap());
    let c = g.constant(Matrix::ones(2, 3).unwrap());
    let y = g.add(x, c).unwrap();

    let leaf = g.node(x).unwrap();
    assert!(leaf.is_leaf());
    assert_eq!(leaf.op(), OpKind::Leaf);
    assert_eq!(leaf.grad(), &Matrix::zeros(2, 3).unwrap());

    let op = g.node(y).unwrap();
    assert!(!op.is_leaf());
    assert_eq!(op.op(), OpKind::Add);
    assert_eq!(op.operands(), &[x, c]);
    assert!(op.requires_grad());
    assert_eq!(op.grad().shape(), (2, 3));
    assert_eq!(g.len(), 3);
}

#[test]
fn test_requires_grad_is_or_of_operands() {
    let mut g = Graph::new();
    let a = g.constant(scalar(1.0));
    let b = g.constant(scalar(2.0));
    let w = g.variable(scalar(3.0));
    let ab = g.add(a, b).unwrap();
    let abw = g.mul(ab, w).unwrap();
    assert!(!g.node(ab).unwrap().requires_grad());
    assert!(g.node(abw).unwrap().requires_grad());
}

#[test]
fn test_operator_errors_do_not_add_nodes() {
    let mut g = Graph::new();
    let a = g.variable(Matrix::ones(2, 2).unwrap());
    let b = g.variable(Matrix::ones(3, 2).unwrap());
    assert!(matches!(g.add(a, b), Err(DagradError::ShapeMismatch { .. })));
    let zero = g.constant(Matrix::zeros(2, 2).unwrap());
    assert!(matches!(g.div(a, zero), Err(DagradError::DivideByZero { .. })));
    assert_eq!(g.len(), 3);
}

#[test]
fn test_handles_are_graph_scoped() {
    let mut first = Graph::new();
    let mut second = Graph::new();
    let x = first.variable(scalar(1.0));
    let y = second.variable(scalar(1.0));
    assert_eq!(first.value(y).unwrap_err(), DagradError::NodeNotFound(y));
    assert!(matches!(second.add(x, y), Err(DagradError::NodeNotFound(_))));
    assert_eq!(first.add_node(y), Err(DagradError::NodeNotFound(y)));
}

#[test]
fn test_zero_grad_resets_everything() {
    let mut g = Graph::new();
    let x = g.variable(Matrix::from_rows(&[[1.0, 2.0]]).unwrap());
    let w = g.variable(Matrix::from_rows(&[[3.0, 4.0]]).unwrap());
    let y = g.mul(x, w).unwrap();
    let z = g.add(y, x).unwrap();

    g.backward_from(z, Matrix::ones(1, 2).unwrap()).unwrap();
    let first_x = g.grad(x).unwrap().clone();
    let first_w = g.grad(w).unwrap().clone();
    assert!(g.node(x).unwrap().is_visited());

    g.zero_grad();
    for (_, node) in g.iter() {
        assert_eq!(node.grad(), &node.value().zeros_like());
        assert!(!node.is_visited());
    }

    g.backward_from(z, Matrix::ones(1, 2).unwrap()).unwrap();
    assert_eq!(g.grad(x).unwrap(), &first_x);
    assert_eq!(g.grad(w).unwrap(), &first_w);
}

#[test]
fn test_zero_grad_from_only_touches_ancestors() {
    let mut g = Graph::new();
    let a = g.variable(scalar(1.0));
    let b = g.variable(scalar(2.0));
    let left = g.mul(a, a).unwrap();
    let right = g.mul(b, b).unwrap();
    g.add_node(left).unwrap();
    g.add_node(right).unwrap();
    g.set_config(GraphConfig {
        roots: RootSelection::Designated,
        ..GraphConfig::default()
    });
    g.backward().unwrap();
    assert_eq!(g.grad(a).unwrap().as_slice(), &[2.0]);
    assert_eq!(g.grad(b).unwrap().as_slice(), &[4.0]);

    g.zero_grad_from(left).unwrap();
    assert_eq!(g.grad(a).unwrap().as_slice(), &[0.0]);
    assert_eq!(g.grad(b).unwrap().as_slice(), &[4.0]);
}

#[test]
fn test_terminal_nodes_and_consumers() {
    let mut g = Graph::new();
    let x = g.variable(scalar(1.0));
    let y = g.add(x, x).unwrap();
    let z = g.mul(y, x).unwrap();
    let w = g.sub(y, x).unwrap();
    assert_eq!(g.terminal_nodes(), vec![z, w]);
    assert_eq!(g.consumers(x).unwrap(), 4);
    assert_eq!(g.consumers(y).unwrap(), 2);
    assert_eq!(g.consumers(z).unwrap(), 0);
}

#[test]
fn test_bulk_backward_over_terminals_sums_outputs() {
    // z = y * x, w = y - x, y = x + x. dz/dx = 4x, dw/dx = 1.
    let mut g = Graph::new();
    let x = g.variable(scalar(3.0));
    let y = g.add(x, x).unwrap();
    let _z = g.mul(y, x).unwrap();
    let _w = g.sub(y, x).unwrap();
    g.backward().unwrap();
    assert_eq!(g.grad(x).unwrap().as_slice(), &[13.0]);
    // y collects from both outputs: x from z, 1 from w.
    assert_eq!(g.grad(y).unwrap().as_slice(), &[4.0]);
}

#[test]
fn test_bulk_backward_designated_root_inside_another() {
    // The designated root `y` is also an operand of the other root `z`.
    let mut g = Graph::with_config(GraphConfig {
        roots: RootSelection::Designated,
        backward: BackwardOptions::default(),
    });
    let x = g.variable(scalar(2.0));
    let y = g.mul(x, x).unwrap();
    let z = g.add(y, x).unwrap();
    g.add_node(z).unwrap();
    g.add_node(y).unwrap();
    g.add_node(y).unwrap();
    assert_eq!(g.roots(), &[z, y]);

    g.backward().unwrap();
    // y: seed 1 + 1 from z.
    assert_eq!(g.grad(y).unwrap().as_slice(), &[2.0]);
    // x: 2 * 2x from y, 1 from z.
    assert_eq!(g.grad(x).unwrap().as_slice(), &[9.0]);
}

#[test]
fn test_bulk_backward_skips_terminal_constants() {
    let mut g = Graph::new();
    let _unused = g.constant(scalar(5.0));
    let x = g.variable(scalar(1.0));
    let _y = g.mul(x, x).unwrap();
    g.backward().unwrap();
    assert_eq!(g.grad(x).unwrap().as_slice(), &[2.0]);
}

#[test]
fn test_set_value_and_forward() {
    let mut g = Graph::new();
    let a = g.variable(scalar(2.0));
    let b = g.variable(scalar(4.0));
    let q = g.div(a, b).unwrap();
    let y = g.mul(q, a).unwrap();
    assert_eq!(g.value(y).unwrap().as_slice(), &[1.0]);

    g.set_value(a, scalar(6.0)).unwrap();
    g.forward().unwrap();
    check_matrix_near(g.value(y).unwrap(), (1, 1), &[9.0], 1e-6);

    assert_eq!(g.set_value(y, scalar(1.0)), Err(DagradError::NotALeaf(y)));
    assert!(matches!(
        g.set_value(a, Matrix::ones(2, 1).unwrap()),
        Err(DagradError::ShapeMismatch { .. })
    ));
}

#[test]
fn test_failed_forward_leaves_values() {
    let mut g = Graph::new();
    let a = g.variable(scalar(1.0));
    let b = g.variable(scalar(2.0));
    let s = g.add(a, b).unwrap();
    let q = g.div(a, b).unwrap();
    g.set_value(b, scalar(0.0)).unwrap();
    assert!(matches!(g.forward(), Err(DagradError::DivideByZero { .. })));
    assert_eq!(g.value(s).unwrap().as_slice(), &[3.0]);
    assert_eq!(g.value(q).unwrap().as_slice(), &[0.5]);
}

#[test]
fn test_activation_nodes() {
    let mut g = Graph::new();
    let x = g.variable(Matrix::from_rows(&[[-1.0, 2.0]]).unwrap());
    let r = g.relu(x).unwrap();
    let s = g.sigmoid(r).unwrap();
    g.backward_from(s, Matrix::ones(1, 2).unwrap()).unwrap();
    // sigmoid(0) = 0.5 -> slope 0.25 but relu blocks x = -1.
    // sigmoid(2) slope = s(1 - s).
    let s2 = 1.0 / (1.0 + (-2.0f32).exp());
    check_matrix_near(g.grad(x).unwrap(), (1, 2), &[0.0, s2 * (1.0 - s2)], 1e-6);
}
