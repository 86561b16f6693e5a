use super::*;
use crate::utils::testing::check_matrix_near;

fn param_with_grad(value: &[f32], grad: &[f32]) -> Parameter {
    let mut p = Parameter::new("p", Matrix::from_slice(value, 1, value.len()).unwrap());
    p.grad_mut().as_mut_slice().copy_from_slice(grad);
    p
}

#[test]
fn test_sgd_basic_step() {
    let mut p = param_with_grad(&[1.0, 2.0, 3.0, 4.0], &[0.1, 0.2, 0.3, 0.4]);
    let mut opt = Sgd::new(0.1).unwrap();
    opt.step(&mut [&mut p]).unwrap();
    check_matrix_near(p.value(), (1, 4), &[0.99, 1.98, 2.97, 3.96], 1e-6);
    // The gradient is left for the caller to clear.
    assert_eq!(p.grad().as_slice(), &[0.1, 0.2, 0.3, 0.4]);
    opt.zero_grad(&mut [&mut p]);
    assert_eq!(p.grad().as_slice(), &[0.0; 4]);
}

#[test]
fn test_sgd_momentum_accumulates_velocity() {
    let mut p = param_with_grad(&[1.0], &[1.0]);
    let mut opt = Sgd::with_momentum(0.1, 0.9, 0.0).unwrap();
    opt.step(&mut [&mut p]).unwrap();
    // v = 1
    check_matrix_near(p.value(), (1, 1), &[0.9], 1e-6);
    opt.step(&mut [&mut p]).unwrap();
    // v = 0.9 * 1 + 1 = 1.9
    check_matrix_near(p.value(), (1, 1), &[0.71], 1e-6);
}

#[test]
fn test_sgd_momentum_state_is_per_position() {
    let mut a = param_with_grad(&[0.0], &[1.0]);
    let mut b = param_with_grad(&[0.0, 0.0], &[-1.0, 2.0]);
    let mut opt = Sgd::with_momentum(1.0, 0.5, 0.0).unwrap();
    opt.step(&mut [&mut a, &mut b]).unwrap();
    opt.step(&mut [&mut a, &mut b]).unwrap();
    check_matrix_near(a.value(), (1, 1), &[-2.5], 1e-6);
    check_matrix_near(b.value(), (1, 2), &[2.5, -5.0], 1e-6);
}

#[test]
fn test_sgd_weight_decay() {
    let mut p = param_with_grad(&[2.0], &[0.0]);
    let mut opt = Sgd::with_momentum(0.5, 0.0, 0.1).unwrap();
    opt.step(&mut [&mut p]).unwrap();
    check_matrix_near(p.value(), (1, 1), &[1.9], 1e-6);
}

#[test]
fn test_sgd_rejects_bad_hyperparameters() {
    assert!(matches!(Sgd::new(0.0), Err(DagradError::InvalidArgument(_))));
    assert!(matches!(Sgd::new(f32::NAN), Err(DagradError::InvalidArgument(_))));
    assert!(matches!(
        Sgd::with_momentum(0.1, -0.1, 0.0),
        Err(DagradError::InvalidArgument(_))
    ));
    assert!(matches!(
        Sgd::with_momentum(0.1, 0.0, -1.0),
        Err(DagradError::InvalidArgument(_))
    ));
}
