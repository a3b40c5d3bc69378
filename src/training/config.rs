use crate::error::ModelError;
use crate::neural_network::optimizer::input_validation_function::{
    validate_learning_rate, validate_positive_count,
};
use crate::neural_network::{
    Adam, CategoricalCrossEntropy, LossFunction, MeanSquaredError, Optimizer, RMSprop, SGD,
};

/// Default RMSprop decay rate
const RMSPROP_RHO: f32 = 0.9;
/// Default RMSprop epsilon
const RMSPROP_EPSILON: f32 = 1e-7;

/// Optimization algorithm and its learning rate
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OptimizerConfig {
    Adam { learning_rate: f32 },
    Sgd { learning_rate: f32 },
    RmsProp { learning_rate: f32 },
}

impl OptimizerConfig {
    pub fn learning_rate(&self) -> f32 {
        match *self {
            OptimizerConfig::Adam { learning_rate }
            | OptimizerConfig::Sgd { learning_rate }
            | OptimizerConfig::RmsProp { learning_rate } => learning_rate,
        }
    }

    /// Same algorithm with another learning rate
    pub fn with_learning_rate(self, learning_rate: f32) -> Self {
        match self {
            OptimizerConfig::Adam { .. } => OptimizerConfig::Adam { learning_rate },
            OptimizerConfig::Sgd { .. } => OptimizerConfig::Sgd { learning_rate },
            OptimizerConfig::RmsProp { .. } => OptimizerConfig::RmsProp { learning_rate },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            OptimizerConfig::Adam { .. } => "adam",
            OptimizerConfig::Sgd { .. } => "sgd",
            OptimizerConfig::RmsProp { .. } => "rmsprop",
        }
    }

    /// Instantiates the optimizer.
    ///
    /// # Returns
    ///
    /// - `Ok(Box<dyn Optimizer>)` - A fresh optimizer with no accumulated state
    /// - `Err(ModelError::Config)` - If the learning rate is not positive and finite
    pub fn build(&self) -> Result<Box<dyn Optimizer>, ModelError> {
        let optimizer: Box<dyn Optimizer> = match *self {
            OptimizerConfig::Adam { learning_rate } => {
                Box::new(Adam::with_learning_rate(learning_rate)?)
            }
            OptimizerConfig::Sgd { learning_rate } => Box::new(SGD::new(learning_rate)?),
            OptimizerConfig::RmsProp { learning_rate } => {
                Box::new(RMSprop::new(learning_rate, RMSPROP_RHO, RMSPROP_EPSILON)?)
            }
        };
        Ok(optimizer)
    }
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        OptimizerConfig::Adam {
            learning_rate: 0.03,
        }
    }
}

/// Loss function used by training
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LossKind {
    #[default]
    CategoricalCrossEntropy,
    MeanSquaredError,
}

impl LossKind {
    pub fn name(&self) -> &'static str {
        match self {
            LossKind::CategoricalCrossEntropy => "categorical_cross_entropy",
            LossKind::MeanSquaredError => "mean_squared_error",
        }
    }

    pub fn build(&self) -> Box<dyn LossFunction> {
        match self {
            LossKind::CategoricalCrossEntropy => Box::new(CategoricalCrossEntropy::new()),
            LossKind::MeanSquaredError => Box::new(MeanSquaredError::new()),
        }
    }
}

/// Configuration of one training run
///
/// # Fields
///
/// - `epochs` - Number of passes over the training split, at least 1
/// - `batch_size` - Samples per optimizer step, at least 1; the last batch may be smaller
/// - `optimizer` - Algorithm and learning rate
/// - `loss` - Loss function
/// - `shuffle` - Reorder the training samples before each epoch
/// - `seed` - Seed for the shuffling order; `None` draws one per run
///
/// # Example
/// ```rust
/// use netscope::training::{OptimizerConfig, TrainConfig};
///
/// let config = TrainConfig {
///     epochs: 50,
///     batch_size: 16,
///     ..TrainConfig::default()
/// };
/// assert_eq!(config.optimizer, OptimizerConfig::Adam { learning_rate: 0.03 });
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TrainConfig {
    pub epochs: usize,
    pub batch_size: usize,
    pub optimizer: OptimizerConfig,
    pub loss: LossKind,
    pub shuffle: bool,
    pub seed: Option<u64>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            epochs: 20,
            batch_size: 4,
            optimizer: OptimizerConfig::default(),
            loss: LossKind::default(),
            shuffle: true,
            seed: None,
        }
    }
}

impl TrainConfig {
    /// Checks the configuration before any work starts.
    ///
    /// # Returns
    ///
    /// - `Ok(())` - The configuration is usable
    /// - `Err(ModelError::Config)` - Zero epochs or batch size, or a bad learning rate
    pub fn validate(&self) -> Result<(), ModelError> {
        validate_positive_count(self.epochs, "epochs")?;
        validate_positive_count(self.batch_size, "batch_size")?;
        validate_learning_rate(self.optimizer.learning_rate())
    }
}
