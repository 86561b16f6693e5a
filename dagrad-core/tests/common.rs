use dagrad_core::Matrix;

// Every test binary includes this module, not all of them use every helper.
#[allow(dead_code)]
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[allow(dead_code)]
pub fn scalar(value: f32) -> Matrix {
    Matrix::full(value, 1, 1).expect("1x1 matrix")
}

#[allow(dead_code)]
pub fn matrix<const C: usize>(rows: &[[f32; C]]) -> Matrix {
    Matrix::from_rows(rows).expect("test matrix rows")
}
