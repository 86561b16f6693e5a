use super::*;
use crate::utils::testing::check_matrix_near;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn fixed_layer() -> Linear {
    let weight = Matrix::from_rows(&[[1.0, 0.0], [0.0, 1.0], [1.0, -1.0]]).unwrap();
    let bias = Matrix::from_rows(&[[0.5, -1.0]]).unwrap();
    Linear::from_matrices(weight, bias).unwrap()
}

#[test]
fn test_linear_new_shapes() {
    let mut rng = StdRng::seed_from_u64(0);
    let layer = Linear::new(3, 2, &mut rng).unwrap();
    assert_eq!(layer.in_features(), 3);
    assert_eq!(layer.out_features(), 2);
    assert_eq!(layer.param("weight").unwrap().shape(), (3, 2));
    assert_eq!(layer.param("bias").unwrap().value(), &Matrix::zeros(1, 2).unwrap());
    assert_eq!(layer.parameters().len(), 2);
}

#[test]
fn test_linear_forward_adds_bias_to_every_row() {
    let mut layer = fixed_layer();
    let mut g = Graph::new();
    let x = g.constant(Matrix::from_rows(&[[1.0, 2.0, 3.0], [0.0, 0.0, 0.0]]).unwrap());
    let y = layer.forward(&mut g, x).unwrap();
    check_matrix_near(g.value(y).unwrap(), (2, 2), &[4.5, -2.0, 0.5, -1.0], 1e-6);
    assert_eq!(layer.trace(), Some(ForwardTrace { input: x, output: y }));
}

#[test]
fn test_linear_backward_gradients() {
    let mut layer = fixed_layer();
    let mut g = Graph::new();
    let x = g.variable(Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap());
    layer.forward(&mut g, x).unwrap();

    let dx = layer.backward(&mut g, &Matrix::ones(2, 2).unwrap()).unwrap();
    // dx = g · Wᵗ, row sums of W.
    check_matrix_near(&dx, (2, 3), &[1.0, 1.0, 0.0, 1.0, 1.0, 0.0], 1e-6);
    // dW = xᵗ · g, column sums of x repeated.
    check_matrix_near(
        layer.param("weight").unwrap().grad(),
        (3, 2),
        &[5.0, 5.0, 7.0, 7.0, 9.0, 9.0],
        1e-6,
    );
    // db = onesᵗ · g, one contribution per batch row.
    check_matrix_near(layer.param("bias").unwrap().grad(), (1, 2), &[2.0, 2.0], 1e-6);
}

#[test]
fn test_linear_input_grad_is_zero_for_constant_input() {
    let mut layer = fixed_layer();
    let mut g = Graph::new();
    let x = g.constant(Matrix::ones(1, 3).unwrap());
    layer.forward(&mut g, x).unwrap();
    let dx = layer.backward(&mut g, &Matrix::ones(1, 2).unwrap()).unwrap();
    assert_eq!(dx, Matrix::zeros(1, 3).unwrap());
    assert_eq!(layer.param("bias").unwrap().grad().as_slice(), &[1.0, 1.0]);
}

#[test]
fn test_linear_missing_parameter() {
    let mut layer = fixed_layer();
    let bias = layer.remove_param("bias").unwrap();
    let mut g = Graph::new();
    let x = g.constant(Matrix::ones(1, 3).unwrap());
    assert_eq!(
        layer.forward(&mut g, x),
        Err(DagradError::MissingParameter {
            layer: "linear".to_string(),
            name: "bias".to_string(),
        })
    );
    assert!(matches!(
        layer.param("gamma"),
        Err(DagradError::MissingParameter { .. })
    ));

    layer.insert_param(bias);
    assert!(layer.forward(&mut g, x).is_ok());
}

#[test]
fn test_linear_rejects_bad_shapes() {
    let err = Linear::from_matrices(Matrix::ones(3, 2).unwrap(), Matrix::ones(1, 3).unwrap())
        .unwrap_err();
    assert!(matches!(err, DagradError::ShapeMismatch { .. }));

    let mut layer = fixed_layer();
    let mut g = Graph::new();
    let x = g.constant(Matrix::ones(2, 4).unwrap());
    assert!(matches!(
        layer.forward(&mut g, x),
        Err(DagradError::ShapeMismatch { .. })
    ));
}

#[test]
fn test_linear_backward_before_forward() {
    let mut layer = fixed_layer();
    let mut g = Graph::new();
    assert_eq!(
        layer.backward(&mut g, &Matrix::ones(1, 2).unwrap()),
        Err(DagradError::BackwardBeforeForward("linear".to_string()))
    );
}

fn scalar_layer(weight: f32) -> Linear {
    Linear::from_matrices(
        Matrix::full(weight, 1, 1).unwrap(),
        Matrix::zeros(1, 1).unwrap(),
    )
    .unwrap()
}

#[test]
fn test_linear_chained_backward_counts_each_layer_once() {
    let mut first = scalar_layer(2.0);
    let mut second = scalar_layer(3.0);
    let mut g = Graph::new();
    let x = g.constant(Matrix::ones(1, 1).unwrap());
    let h = first.forward(&mut g, x).unwrap();
    second.forward(&mut g, h).unwrap();

    let dh = second.backward(&mut g, &Matrix::ones(1, 1).unwrap()).unwrap();
    assert_eq!(dh.as_slice(), &[3.0]);
    assert_eq!(second.param("weight").unwrap().grad().as_slice(), &[2.0]);

    let dx = first.backward(&mut g, &dh).unwrap();
    assert_eq!(dx, Matrix::zeros(1, 1).unwrap());
    assert_eq!(first.param("weight").unwrap().grad().as_slice(), &[3.0]);
    assert_eq!(first.param("bias").unwrap().grad().as_slice(), &[3.0]);
}

#[test]
fn test_linear_repeated_backward_adds_one_pass_per_call() {
    let mut layer = scalar_layer(2.0);
    let mut g = Graph::new();
    let x = g.constant(Matrix::ones(1, 1).unwrap());
    layer.forward(&mut g, x).unwrap();

    layer.backward(&mut g, &Matrix::ones(1, 1).unwrap()).unwrap();
    layer.backward(&mut g, &Matrix::ones(1, 1).unwrap()).unwrap();

    let weight = layer.param("weight").unwrap();
    assert_eq!(g.grad(weight.node().unwrap()).unwrap().as_slice(), &[1.0]);
    assert_eq!(weight.grad().as_slice(), &[2.0]);
    assert_eq!(layer.param("bias").unwrap().grad().as_slice(), &[2.0]);

    layer.zero_grad();
    layer.backward(&mut g, &Matrix::ones(1, 1).unwrap()).unwrap();
    assert_eq!(layer.param("weight").unwrap().grad().as_slice(), &[1.0]);
}
