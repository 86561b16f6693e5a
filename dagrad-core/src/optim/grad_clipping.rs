use crate::error::DagradError;
use crate::nn::Parameter;

/// Clamps every gradient element into `[-clip_value, clip_value]`.
///
/// # Errors
/// `InvalidArgument` for a negative or NaN `clip_value`.
pub fn clip_grad_value(params: &mut [&mut Parameter], clip_value: f32) -> Result<(), DagradError> {
    if clip_value.is_nan() || clip_value < 0.0 {
        return Err(DagradError::InvalidArgument(format!(
            "clip_value must be non-negative, got {}",
            clip_value
        )));
    }
    for param in params.iter_mut() {
        let clipped = param.grad().clip(-clip_value, clip_value);
        *param.grad_mut() = clipped;
    }
    Ok(())
}

/// Rescales all gradients together so that their joint L2 norm is at most
/// `max_norm`. Returns the norm measured before clipping.
pub fn clip_grad_norm(params: &mut [&mut Parameter], max_norm: f32) -> Result<f32, DagradError> {
    if max_norm.is_nan() || max_norm < 0.0 {
        return Err(DagradError::InvalidArgument(format!(
            "max_norm must be non-negative, got {}",
            max_norm
        )));
    }
    let total: f32 = params
        .iter()
        .flat_map(|p| p.grad().as_slice().iter())
        .map(|g| g * g)
        .sum::<f32>()
        .sqrt();
    if total > max_norm {
        let scale = max_norm / (total + 1e-6);
        for param in params.iter_mut() {
            let scaled = param.grad().mul_scalar(scale);
            *param.grad_mut() = scaled;
        }
    }
    Ok(total)
}
