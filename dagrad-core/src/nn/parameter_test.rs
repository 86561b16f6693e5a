use super::*;

#[test]
fn test_new_parameter_has_zero_grad() {
    let p = Parameter::new("w", Matrix::full(2.0, 2, 3).unwrap());
    assert_eq!(p.name(), "w");
    assert_eq!(p.shape(), (2, 3));
    assert_eq!(p.grad(), &Matrix::zeros(2, 3).unwrap());
    assert!(p.node().is_none());
    assert_eq!(format!("{:?}", p), "Parameter(w, (2, 3))");
}

#[test]
fn test_bind_creates_trainable_leaf() {
    let mut g = Graph::new();
    let mut p = Parameter::new("w", Matrix::ones(1, 2).unwrap());
    let id = p.bind(&mut g);
    assert_eq!(p.node(), Some(id));
    let node = g.node(id).unwrap();
    assert!(node.is_leaf());
    assert!(node.requires_grad());
    assert_eq!(node.value(), p.value());
}

#[test]
fn test_collect_grad_accumulates_until_zeroed() {
    let mut p = Parameter::new("w", Matrix::full(3.0, 1, 1).unwrap());
    for _ in 0..2 {
        let mut g = Graph::new();
        let w = p.bind(&mut g);
        let y = g.mul(w, w).unwrap();
        g.backward_from(y, Matrix::ones(1, 1).unwrap()).unwrap();
        p.collect_grad(&g).unwrap();
    }
    assert_eq!(p.grad().as_slice(), &[12.0]);
    p.zero_grad();
    assert_eq!(p.grad().as_slice(), &[0.0]);
}

#[test]
fn test_collect_grad_from_foreign_graph_fails() {
    let mut p = Parameter::new("w", Matrix::ones(1, 1).unwrap());
    let mut bound = Graph::new();
    p.bind(&mut bound);
    let other = Graph::new();
    assert!(matches!(
        p.collect_grad(&other),
        Err(DagradError::NodeNotFound(_))
    ));
}

#[test]
fn test_collect_grad_unbound_is_a_no_op() {
    let mut p = Parameter::new("w", Matrix::ones(1, 1).unwrap());
    p.collect_grad(&Graph::new()).unwrap();
    assert_eq!(p.grad().as_slice(), &[0.0]);
}
