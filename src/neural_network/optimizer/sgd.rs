use crate::error::ModelError;
use crate::neural_network::optimizer::input_validation_function::validate_learning_rate;
use crate::neural_network::{Layer, Optimizer};
use ndarray::Array2;

/// Plain stochastic gradient descent: `θ ← θ - lr·∇θ`
pub struct SGD {
    learning_rate: f32,
}

impl SGD {
    /// # Errors
    ///
    /// - `ModelError::Config` - If `learning_rate` is not positive and finite
    pub fn new(learning_rate: f32) -> Result<Self, ModelError> {
        validate_learning_rate(learning_rate)?;
        Ok(Self { learning_rate })
    }

    /// Applies one descent step to a weight matrix and its bias row.
    ///
    /// The two updates are independent, so they run on the rayon pool side by side.
    pub fn update_sgd_parameters(
        weights: &mut Array2<f32>,
        weight_grads: &Array2<f32>,
        bias: &mut Array2<f32>,
        bias_grads: &Array2<f32>,
        lr: f32,
    ) {
        rayon::join(
            || weights.scaled_add(-lr, weight_grads),
            || bias.scaled_add(-lr, bias_grads),
        );
    }
}

impl Optimizer for SGD {
    fn update(&mut self, layer: &mut dyn Layer) {
        layer.update_parameters_sgd(self.learning_rate);
    }
}
