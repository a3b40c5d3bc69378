use crate::error::ModelError;
use crate::neural_network::layer::{DenseLayerWeight, LayerWeight};
use crate::neural_network::optimizer::*;
use crate::neural_network::{Activation, Layer, Tensor};
use ndarray::{Array, Array2, Axis, Ix2};
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::Uniform;

/// Fully connected layer: `activation(input · weights + bias)`.
///
/// Weights start Glorot-uniform, bias at zero. `forward` keeps the input and the activated
/// output for `backward`; `infer` keeps nothing.
///
/// # Dimensions
///
/// - Input shape: (batch_size, input_dim)
/// - Output shape: (batch_size, output_dim)
///
/// # Example
/// ```rust
/// use ndarray::Array;
/// use netscope::neural_network::*;
///
/// let x = Array::ones((2, 4)).into_dyn();
///
/// let dense = Dense::new(4, 3, Activation::ReLU).unwrap();
/// let output = dense.infer(&x).unwrap();
/// assert_eq!(output.shape(), &[2, 3]);
/// ```
pub struct Dense {
    /// Input dimension size
    input_dim: usize,
    /// Output dimension size
    output_dim: usize,
    /// Weight matrix with shape (input_dim, output_dim)
    weights: Array2<f32>,
    /// Bias vector with shape (1, output_dim)
    bias: Array2<f32>,
    /// Cache of the input from forward pass for use in backward pass
    input_cache: Option<Array2<f32>>,
    /// Stored weight gradients
    grad_weights: Option<Array2<f32>>,
    /// Stored bias gradients
    grad_bias: Option<Array2<f32>>,
    /// Cache for optimizer
    optimizer_cache: OptimizerCache,
    /// Activation function for the layer
    activation: Activation,
    /// Cached output after activation for use in backward pass
    activation_output: Option<Array2<f32>>,
}

impl Dense {
    /// Creates a new dense layer.
    ///
    /// # Parameters
    ///
    /// - `input_dim` - Number of input features
    /// - `output_dim` - Number of units
    /// - `activation` - Activation applied after the affine transformation
    ///
    /// # Returns
    ///
    /// - `Ok(Self)` - A new Dense layer instance with specified dimensions
    /// - `Err(ModelError::InputValidationError)` - If either dimension is zero
    pub fn new(
        input_dim: usize,
        output_dim: usize,
        activation: Activation,
    ) -> Result<Self, ModelError> {
        if input_dim == 0 || output_dim == 0 {
            return Err(ModelError::InputValidationError(format!(
                "Dense dimensions must be positive, got input_dim={}, output_dim={}",
                input_dim, output_dim
            )));
        }

        let limit = (6.0 / (input_dim + output_dim) as f32).sqrt();
        let weights = Array::random((input_dim, output_dim), Uniform::new(-limit, limit));
        let bias = Array::zeros((1, output_dim));

        Ok(Self {
            input_dim,
            output_dim,
            weights,
            bias,
            input_cache: None,
            grad_weights: None,
            grad_bias: None,
            activation,
            activation_output: None,
            optimizer_cache: OptimizerCache::default(),
        })
    }

    /// Replaces weights and bias, e.g. when a persistence collaborator restores a model.
    ///
    /// # Parameters
    ///
    /// - `weights` - Matrix with shape (input_dim, output_dim)
    /// - `bias` - Matrix with shape (1, output_dim)
    ///
    /// # Returns
    ///
    /// - `Ok(())` - Parameters replaced
    /// - `Err(ModelError::Shape)` - If either matrix has the wrong shape
    pub fn set_weights(&mut self, weights: Array2<f32>, bias: Array2<f32>) -> Result<(), ModelError> {
        if weights.dim() != (self.input_dim, self.output_dim) || bias.dim() != (1, self.output_dim) {
            return Err(ModelError::Shape(format!(
                "expected weights {:?} and bias {:?}, got {:?} and {:?}",
                (self.input_dim, self.output_dim),
                (1, self.output_dim),
                weights.dim(),
                bias.dim()
            )));
        }
        self.weights = weights;
        self.bias = bias;
        Ok(())
    }

    fn to_2d(&self, input: &Tensor) -> Result<Array2<f32>, ModelError> {
        let input_2d = input
            .clone()
            .into_dimensionality::<Ix2>()
            .map_err(|e| {
                ModelError::InputValidationError(format!("Dense expects a 2D input: {}", e))
            })?;

        if input_2d.ncols() != self.input_dim {
            return Err(ModelError::InputValidationError(format!(
                "Dense expects {} input features, got {}",
                self.input_dim,
                input_2d.ncols()
            )));
        }
        Ok(input_2d)
    }

    fn affine(&self, input_2d: &Array2<f32>) -> Array2<f32> {
        // ndarray dispatches to rayon when the feature is enabled
        let z = input_2d.dot(&self.weights) + &self.bias;
        Activation::apply_activation(&z, &self.activation)
    }
}

impl Layer for Dense {
    fn forward(&mut self, input: &Tensor) -> Result<Tensor, ModelError> {
        let input_2d = self.to_2d(input)?;
        let a = self.affine(&input_2d);

        self.input_cache = Some(input_2d);
        self.activation_output = Some(a.clone());
        Ok(a.into_dyn())
    }

    fn infer(&self, input: &Tensor) -> Result<Tensor, ModelError> {
        let input_2d = self.to_2d(input)?;
        Ok(self.affine(&input_2d).into_dyn())
    }

    fn backward(&mut self, grad_output: &Tensor) -> Result<Tensor, ModelError> {
        let grad_upstream = grad_output
            .clone()
            .into_dimensionality::<Ix2>()
            .map_err(|e| ModelError::ProcessingError(format!("Dense gradient is not 2D: {}", e)))?;

        let a = match self.activation_output.take() {
            Some(a) => a,
            None => Err(ModelError::ProcessingError(String::from(
                "Forward pass has not been run",
            )))?,
        };

        // dL/dz from dL/da
        let grad_z = if self.activation == Activation::Softmax {
            Activation::softmax_backward(&a, &grad_upstream)
        } else {
            Activation::activation_derivative(&a, &self.activation) * &grad_upstream
        };

        let input = match self.input_cache.take() {
            Some(input) => input,
            None => Err(ModelError::ProcessingError(String::from(
                "Forward pass has not been run",
            )))?,
        };

        self.grad_weights = Some(input.t().dot(&grad_z));
        self.grad_bias = Some(grad_z.sum_axis(Axis(0)).insert_axis(Axis(0)));

        Ok(grad_z.dot(&self.weights.t()).into_dyn())
    }

    fn layer_type(&self) -> &str {
        "Dense"
    }

    fn output_shape(&self) -> String {
        format!("(None, {})", self.output_dim)
    }

    fn input_dim(&self) -> usize {
        self.input_dim
    }

    fn output_dim(&self) -> usize {
        self.output_dim
    }

    fn activation(&self) -> Option<Activation> {
        Some(self.activation)
    }

    fn param_count(&self) -> usize {
        self.input_dim * self.output_dim + self.output_dim
    }

    fn update_parameters_sgd(&mut self, lr: f32) {
        if let (Some(grad_w), Some(grad_b)) = (&self.grad_weights, &self.grad_bias) {
            SGD::update_sgd_parameters(&mut self.weights, grad_w, &mut self.bias, grad_b, lr);
        }
    }

    fn update_parameters_adam(&mut self, lr: f32, beta1: f32, beta2: f32, epsilon: f32, t: u64) {
        if let (Some(grad_w), Some(grad_b)) = (&self.grad_weights, &self.grad_bias) {
            let adam_states = self.optimizer_cache.adam_states.get_or_insert_with(|| {
                AdamStates::new((self.input_dim, self.output_dim), (1, self.output_dim))
            });
            adam_states.update_parameters(
                &mut self.weights,
                &mut self.bias,
                grad_w,
                grad_b,
                AdamStep::new(lr, beta1, beta2, epsilon, t),
            );
        }
    }

    fn update_parameters_rmsprop(&mut self, lr: f32, rho: f32, epsilon: f32) {
        if let (Some(grad_w), Some(grad_b)) = (&self.grad_weights, &self.grad_bias) {
            let cache = self.optimizer_cache.rmsprop_cache.get_or_insert_with(|| {
                RMSpropCache::new((self.input_dim, self.output_dim), (1, self.output_dim))
            });
            cache.update_parameters(&mut self.weights, &mut self.bias, grad_w, grad_b, rho, lr, epsilon);
        }
    }

    fn reset_optimizer_state(&mut self) {
        self.optimizer_cache = OptimizerCache::default();
        self.grad_weights = None;
        self.grad_bias = None;
    }

    fn get_weights(&self) -> LayerWeight<'_> {
        LayerWeight::Dense(DenseLayerWeight {
            weight: &self.weights,
            bias: &self.bias,
        })
    }
}
