use crate::error::ModelError;
use crate::neural_network::optimizer::input_validation_function::{
    validate_decay_rate, validate_epsilon, validate_learning_rate,
};
use crate::neural_network::{Layer, Optimizer};
use ndarray::{Array2, Zip};

/// Adam optimizer implementation.
///
/// An optimization algorithm that computes individual adaptive learning
/// rates for different parameters from estimates of first and second moments
/// of the gradients.
pub struct Adam {
    /// Learning rate controlling the size of parameter updates.
    learning_rate: f32,
    /// Exponential decay rate for the first moment estimates.
    beta1: f32,
    /// Exponential decay rate for the second moment estimates.
    beta2: f32,
    /// Small constant added for numerical stability.
    epsilon: f32,
    /// Current timestep, incremented once per batch.
    t: u64,
}

impl Adam {
    /// Creates a new Adam optimizer with the specified parameters.
    ///
    /// # Parameters
    ///
    /// - `learning_rate` - Step size for parameter updates
    /// - `beta1` - Decay rate for the first moment estimates (typically 0.9)
    /// - `beta2` - Decay rate for the second moment estimates (typically 0.999)
    /// - `epsilon` - Small constant for numerical stability (typically 1e-7)
    ///
    /// # Returns
    ///
    /// - `Result<Self, ModelError>` - A new Adam optimizer instance or a `Config` error
    pub fn new(learning_rate: f32, beta1: f32, beta2: f32, epsilon: f32) -> Result<Self, ModelError> {
        validate_learning_rate(learning_rate)?;
        validate_decay_rate(beta1, "beta1")?;
        validate_decay_rate(beta2, "beta2")?;
        validate_epsilon(epsilon)?;

        Ok(Self {
            learning_rate,
            beta1,
            beta2,
            epsilon,
            t: 0,
        })
    }

    /// Creates an Adam optimizer with the usual decay rates and the given learning rate.
    pub fn with_learning_rate(learning_rate: f32) -> Result<Self, ModelError> {
        Self::new(learning_rate, 0.9, 0.999, 1e-7)
    }
}

impl Optimizer for Adam {
    fn begin_step(&mut self) {
        self.t += 1;
    }

    fn update(&mut self, layer: &mut dyn Layer) {
        // bias correction divides by (1 - beta^t), so t must never be 0 here
        let t = self.t.max(1);
        layer.update_parameters_adam(self.learning_rate, self.beta1, self.beta2, self.epsilon, t);
    }
}

/// First and second moment estimates of one dense layer
#[derive(Debug, Clone, Default)]
pub struct AdamStates {
    /// Moving average of the weight gradients
    pub m: Array2<f32>,
    /// Moving average of the squared weight gradients
    pub v: Array2<f32>,
    pub m_bias: Array2<f32>,
    pub v_bias: Array2<f32>,
}

/// Hyperparameters of one Adam step, with the bias corrections for its timestep folded in
#[derive(Debug, Clone, Copy)]
pub struct AdamStep {
    pub lr: f32,
    pub beta1: f32,
    pub beta2: f32,
    pub epsilon: f32,
    correction1: f32,
    correction2: f32,
}

impl AdamStep {
    /// # Parameters
    ///
    /// - `t` - 1-based timestep
    pub fn new(lr: f32, beta1: f32, beta2: f32, epsilon: f32, t: u64) -> Self {
        let t = t.clamp(1, i32::MAX as u64) as i32;
        Self {
            lr,
            beta1,
            beta2,
            epsilon,
            correction1: 1.0 - beta1.powi(t),
            correction2: 1.0 - beta2.powi(t),
        }
    }

    fn apply(&self, param: &mut Array2<f32>, m: &mut Array2<f32>, v: &mut Array2<f32>, grad: &Array2<f32>) {
        Zip::from(param)
            .and(m)
            .and(v)
            .and(grad)
            .par_for_each(|p, m, v, &g| {
                *m = self.beta1 * *m + (1.0 - self.beta1) * g;
                *v = self.beta2 * *v + (1.0 - self.beta2) * g * g;
                let m_hat = *m / self.correction1;
                let v_hat = *v / self.correction2;
                *p -= self.lr * m_hat / (v_hat.sqrt() + self.epsilon);
            });
    }
}

impl AdamStates {
    /// Zeroed moments for a layer with the given weight and bias shapes
    pub fn new(dims_param: (usize, usize), dims_bias: (usize, usize)) -> Self {
        Self {
            m: Array2::zeros(dims_param),
            v: Array2::zeros(dims_param),
            m_bias: Array2::zeros(dims_bias),
            v_bias: Array2::zeros(dims_bias),
        }
    }

    /// Updates the moments and applies one Adam step to weights and bias in place.
    pub fn update_parameters(
        &mut self,
        weights: &mut Array2<f32>,
        bias: &mut Array2<f32>,
        grad_weights: &Array2<f32>,
        grad_bias: &Array2<f32>,
        step: AdamStep,
    ) {
        step.apply(weights, &mut self.m, &mut self.v, grad_weights);
        step.apply(bias, &mut self.m_bias, &mut self.v_bias, grad_bias);
    }
}
