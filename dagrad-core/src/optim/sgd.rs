use crate::error::DagradError;
use crate::matrix::Matrix;
use crate::nn::Parameter;
use crate::ops::{add_op, sub_op};
use crate::optim::Optimizer;
use log::debug;

/// Stochastic gradient descent with optional momentum and weight decay.
///
/// For each parameter `p` with gradient `g`:
/// `d = g + weight_decay * p`, `v = momentum * v + d`, `p -= lr * v`.
/// With `momentum == 0` this is plain `p -= lr * d`.
#[derive(Debug, Clone)]
pub struct Sgd {
    lr: f32,
    momentum: f32,
    weight_decay: f32,
    velocity: Vec<Option<Matrix>>,
}

impl Sgd {
    pub fn new(lr: f32) -> Result<Self, DagradError> {
        Sgd::with_momentum(lr, 0.0, 0.0)
    }

    /// # Errors
    /// `InvalidArgument` for a non-positive learning rate or a negative
    /// momentum or weight decay.
    pub fn with_momentum(lr: f32, momentum: f32, weight_decay: f32) -> Result<Self, DagradError> {
        if !(lr > 0.0 && lr.is_finite()) {
            return Err(DagradError::InvalidArgument(format!(
                "learning rate must be positive, got {}",
                lr
            )));
        }
        if momentum.is_nan() || momentum < 0.0 {
            return Err(DagradError::InvalidArgument(format!(
                "momentum must be non-negative, got {}",
                momentum
            )));
        }
        if weight_decay.is_nan() || weight_decay < 0.0 {
            return Err(DagradError::InvalidArgument(format!(
                "weight decay must be non-negative, got {}",
                weight_decay
            )));
        }
        Ok(Sgd {
            lr,
            momentum,
            weight_decay,
            velocity: Vec::new(),
        })
    }

    pub fn lr(&self) -> f32 {
        self.lr
    }

    pub fn set_lr(&mut self, lr: f32) {
        self.lr = lr;
    }

    pub fn momentum(&self) -> f32 {
        self.momentum
    }

    fn direction(&mut self, index: usize, grad: Matrix) -> Result<Matrix, DagradError> {
        if self.momentum == 0.0 {
            return Ok(grad);
        }
        if self.velocity.len() <= index {
            self.velocity.resize(index + 1, None);
        }
        let v = match self.velocity[index].take() {
            Some(previous) => add_op(&previous.mul_scalar(self.momentum), &grad)?,
            None => grad,
        };
        self.velocity[index] = Some(v.clone());
        Ok(v)
    }
}

impl Optimizer for Sgd {
    fn step(&mut self, params: &mut [&mut Parameter]) -> Result<(), DagradError> {
        for (index, param) in params.iter_mut().enumerate() {
            let mut grad = param.grad().clone();
            if self.weight_decay != 0.0 {
                grad = add_op(&grad, &param.value().mul_scalar(self.weight_decay))?;
            }
            let direction = self.direction(index, grad)?;
            let updated = sub_op(param.value(), &direction.mul_scalar(self.lr))?;
            *param.value_mut() = updated;
        }
        debug!(
            "sgd: step over {} parameter(s), lr {}, momentum {}",
            params.len(),
            self.lr,
            self.momentum
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "sgd_test.rs"]
mod tests;
