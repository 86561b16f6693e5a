use crate::matrix::Matrix;

/// Checks that a matrix has the expected shape and that every element is
/// within `tolerance` of `expected_data` (row-major).
/// Panics with the offending index otherwise.
pub fn check_matrix_near(
    actual: &Matrix,
    expected_shape: (usize, usize),
    expected_data: &[f32],
    tolerance: f32,
) {
    assert_eq!(actual.shape(), expected_shape, "Shape mismatch");
    assert_eq!(
        actual.len(),
        expected_data.len(),
        "Data length mismatch"
    );

    for (i, (a, e)) in actual.as_slice().iter().zip(expected_data.iter()).enumerate() {
        let diff = (*a - *e).abs();
        if diff > tolerance || diff.is_nan() {
            panic!(
                "Data mismatch at index {}: actual={:?}, expected={:?}, diff={:?}, tolerance={:?}",
                i, a, e, diff, tolerance
            );
        }
    }
}
