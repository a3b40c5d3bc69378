use crate::error::ModelError;
use crate::neural_network::layer::layer_weight::LayerWeight;
use crate::neural_network::{Activation, Tensor};

/// A trainable transformation inside a [`crate::neural_network::Sequential`].
///
/// Two forward paths exist: `forward` keeps what `backward` will need, `infer` touches
/// nothing and is what introspection and evaluation use. After `backward` a layer holds its
/// parameter gradients until one of the `update_parameters_*` hooks consumes them.
pub trait Layer: std::any::Any + Send + Sync {
    /// Training forward pass; caches inputs and outputs for `backward`.
    ///
    /// # Errors
    ///
    /// - `ModelError::InputValidationError` - If `input` does not fit the layer
    fn forward(&mut self, input: &Tensor) -> Result<Tensor, ModelError>;

    /// Read-only forward pass.
    fn infer(&self, input: &Tensor) -> Result<Tensor, ModelError>;

    /// Propagates `grad_output` (dL/d output) back and stores parameter gradients.
    ///
    /// # Returns
    ///
    /// - `Ok(Tensor)` - dL/d input, handed to the previous layer
    /// - `Err(ModelError::ProcessingError)` - If no forward pass is cached
    fn backward(&mut self, grad_output: &Tensor) -> Result<Tensor, ModelError>;

    /// Short type name shown in summaries, e.g. `"Dense"`
    fn layer_type(&self) -> &str {
        "Unknown"
    }

    /// Output shape as printed in summaries
    fn output_shape(&self) -> String {
        "Unknown".to_string()
    }

    fn input_dim(&self) -> usize;

    fn output_dim(&self) -> usize;

    /// Activation applied to the layer output, for layers that have one.
    fn activation(&self) -> Option<Activation> {
        None
    }

    /// Number of trainable scalars
    fn param_count(&self) -> usize;

    /// Applies the stored gradients with plain gradient descent.
    fn update_parameters_sgd(&mut self, lr: f32);

    /// Applies the stored gradients with Adam at timestep `t` (1-based).
    fn update_parameters_adam(&mut self, lr: f32, beta1: f32, beta2: f32, epsilon: f32, t: u64);

    /// Applies the stored gradients with RMSprop.
    fn update_parameters_rmsprop(&mut self, lr: f32, rho: f32, epsilon: f32);

    /// Forgets optimizer moments and pending gradients from earlier runs.
    fn reset_optimizer_state(&mut self) {}

    fn get_weights(&self) -> LayerWeight<'_>;
}

/// Scalar objective and its gradient with respect to the predictions.
pub trait LossFunction: Send + Sync {
    /// Mean loss over the batch
    fn compute_loss(&self, y_true: &Tensor, y_pred: &Tensor) -> f32;

    /// dL/d y_pred, same shape as `y_pred`
    fn compute_grad(&self, y_true: &Tensor, y_pred: &Tensor) -> Tensor;
}

/// Parameter update rule, dispatched to the matching `Layer::update_parameters_*` hook.
pub trait Optimizer: Send + Sync {
    /// Called once per batch before any layer is updated.
    fn begin_step(&mut self) {}

    fn update(&mut self, layer: &mut dyn Layer);
}
