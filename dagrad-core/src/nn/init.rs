use crate::error::DagradError;
use crate::matrix::Matrix;
use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use rand_distr::Normal;

/// Samples a `rows x cols` matrix uniformly from `[low, high)`.
///
/// # Errors
/// `InvalidArgument` unless `low < high` and both are finite;
/// `InvalidDimension` for a zero dimension.
pub fn uniform<R: Rng + ?Sized>(
    rows: usize,
    cols: usize,
    low: f32,
    high: f32,
    rng: &mut R,
) -> Result<Matrix, DagradError> {
    if !(low.is_finite() && high.is_finite() && low < high) {
        return Err(DagradError::InvalidArgument(format!(
            "uniform init requires finite low < high, got [{}, {})",
            low, high
        )));
    }
    let mut m = Matrix::zeros(rows, cols)?;
    let dist = Uniform::new(low, high);
    for x in m.as_mut_slice() {
        *x = dist.sample(rng);
    }
    Ok(m)
}

/// Samples a `rows x cols` matrix from `N(mean, std^2)`.
///
/// # Errors
/// `InvalidArgument` for a negative or non-finite `std`.
pub fn normal<R: Rng + ?Sized>(
    rows: usize,
    cols: usize,
    mean: f32,
    std: f32,
    rng: &mut R,
) -> Result<Matrix, DagradError> {
    let dist = Normal::new(mean, std).map_err(|e| {
        DagradError::InvalidArgument(format!("normal init with std {}: {}", std, e))
    })?;
    let mut m = Matrix::zeros(rows, cols)?;
    for x in m.as_mut_slice() {
        *x = dist.sample(rng);
    }
    Ok(m)
}

/// Weight init for a layer mapping `fan_in` features to `fan_out`:
/// uniform in `[-1/sqrt(fan_in), 1/sqrt(fan_in))`, shaped `fan_in x fan_out`.
pub fn fan_in_uniform<R: Rng + ?Sized>(
    fan_in: usize,
    fan_out: usize,
    rng: &mut R,
) -> Result<Matrix, DagradError> {
    if fan_in == 0 {
        return Err(DagradError::InvalidDimension {
            rows: fan_in,
            cols: fan_out,
        });
    }
    let bound = 1.0 / (fan_in as f32).sqrt();
    uniform(fan_in, fan_out, -bound, bound, rng)
}

#[cfg(test)]
#[path = "init_test.rs"]
mod tests;
