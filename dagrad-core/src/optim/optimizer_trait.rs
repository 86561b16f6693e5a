use crate::error::DagradError;
use crate::nn::Parameter;

/// Trait defining the common interface for all optimizers.
///
/// Optimizers do not own parameters; each call receives the parameters of a
/// model in a stable order (e.g. `Layer::parameters_mut`), and per-parameter
/// state is keyed by position in that list.
pub trait Optimizer {
    /// Updates every parameter in place from its accumulated gradient.
    fn step(&mut self, params: &mut [&mut Parameter]) -> Result<(), DagradError>;

    /// Clears the gradients of `params`.
    fn zero_grad(&mut self, params: &mut [&mut Parameter]) {
        for param in params.iter_mut() {
            param.zero_grad();
        }
    }
}
