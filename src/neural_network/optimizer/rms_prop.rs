use crate::error::ModelError;
use crate::neural_network::optimizer::input_validation_function::{
    validate_decay_rate, validate_epsilon, validate_learning_rate,
};
use crate::neural_network::{Layer, Optimizer};
use ndarray::{Array2, Zip};

/// Element count from which a parameter matrix is updated on the rayon pool
const RMS_PROP_PARALLEL_THRESHOLD: usize = 1024;

/// RMSprop optimizer
///
/// Divides each gradient by a running root mean square of its recent magnitudes.
///
/// # Fields
///
/// - `learning_rate` - Step size
/// - `rho` - Decay of the running mean of squared gradients
/// - `epsilon` - Added to the denominator
pub struct RMSprop {
    learning_rate: f32,
    rho: f32,
    epsilon: f32,
}

impl RMSprop {
    /// Creates a new RMSprop optimizer.
    ///
    /// # Errors
    ///
    /// - `ModelError::Config` - If any hyperparameter is out of range
    pub fn new(learning_rate: f32, rho: f32, epsilon: f32) -> Result<Self, ModelError> {
        validate_learning_rate(learning_rate)?;
        validate_decay_rate(rho, "rho")?;
        validate_epsilon(epsilon)?;

        Ok(Self {
            learning_rate,
            rho,
            epsilon,
        })
    }
}

impl Optimizer for RMSprop {
    fn update(&mut self, layer: &mut dyn Layer) {
        layer.update_parameters_rmsprop(self.learning_rate, self.rho, self.epsilon);
    }
}

/// Running mean of squared gradients for one dense layer
#[derive(Debug, Clone, Default)]
pub struct RMSpropCache {
    /// Same shape as the weight matrix
    pub cache: Array2<f32>,
    /// Same shape as the bias row
    pub bias: Array2<f32>,
}

impl RMSpropCache {
    /// Zeroed cache for a layer with the given weight and bias shapes
    pub fn new(dims: (usize, usize), bias_dims: (usize, usize)) -> Self {
        Self {
            cache: Array2::zeros(dims),
            bias: Array2::zeros(bias_dims),
        }
    }

    /// Updates one parameter matrix in place together with its squared-gradient mean.
    pub fn update_param(
        param: &mut Array2<f32>,
        grad: &Array2<f32>,
        cache: &mut Array2<f32>,
        rho: f32,
        lr: f32,
        epsilon: f32,
    ) {
        let step = |p: &mut f32, s: &mut f32, &g: &f32| {
            *s = rho * *s + (1.0 - rho) * g * g;
            *p -= lr * g / (s.sqrt() + epsilon);
        };

        let zip = Zip::from(param).and(cache).and(grad);
        if zip.size() >= RMS_PROP_PARALLEL_THRESHOLD {
            zip.par_for_each(step);
        } else {
            zip.for_each(step);
        }
    }

    /// Updates the weights and the bias of a layer.
    pub fn update_parameters(
        &mut self,
        param: &mut Array2<f32>,
        bias_param: &mut Array2<f32>,
        grad: &Array2<f32>,
        bias_grad: &Array2<f32>,
        rho: f32,
        lr: f32,
        epsilon: f32,
    ) {
        Self::update_param(param, grad, &mut self.cache, rho, lr, epsilon);
        Self::update_param(bias_param, bias_grad, &mut self.bias, rho, lr, epsilon);
    }
}
