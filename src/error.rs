use crate::training::TrainMetric;

/// Error types that can occur while building, training, introspecting or evaluating a model
///
/// # Variants
///
/// - `Validation` - The layer specification is malformed; names the offending layer index
/// - `Config` - The training configuration is malformed; raised before any epoch runs
/// - `Shape` - Dataset arity does not match model arity; raised before any inference runs
/// - `Training` - The numeric engine failed mid-run; carries the metrics of every completed epoch
/// - `NoModel` - The operation needs a built model and the session has none
/// - `InputValidationError` - A numeric primitive received data it cannot process
/// - `ProcessingError` - A numeric primitive failed while processing
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    Validation {
        layer: usize,
        reason: String,
    },
    Config(String),
    Shape(String),
    Training {
        epoch: usize,
        reason: String,
        metrics: Vec<TrainMetric>,
    },
    NoModel,
    InputValidationError(String),
    ProcessingError(String),
}

impl ModelError {
    /// Shorthand for a validation failure on layer `layer`.
    pub(crate) fn validation(layer: usize, reason: impl Into<String>) -> Self {
        ModelError::Validation {
            layer,
            reason: reason.into(),
        }
    }

    /// Returns the metrics recorded before a training failure, if any.
    ///
    /// # Returns
    ///
    /// - `&[TrainMetric]` - The partial history for `Training` errors, an empty slice otherwise
    pub fn partial_metrics(&self) -> &[TrainMetric] {
        match self {
            ModelError::Training { metrics, .. } => metrics,
            _ => &[],
        }
    }
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::Validation { layer, reason } => {
                write!(f, "Invalid layer specification at index {}: {}", layer, reason)
            }
            ModelError::Config(msg) => write!(f, "Invalid training configuration: {}", msg),
            ModelError::Shape(msg) => write!(f, "Shape mismatch: {}", msg),
            ModelError::Training {
                epoch,
                reason,
                metrics,
            } => write!(
                f,
                "Training failed at epoch {} ({} epochs completed): {}",
                epoch,
                metrics.len(),
                reason
            ),
            ModelError::NoModel => write!(
                f,
                "No model has been built. Build a model from a specification first."
            ),
            ModelError::InputValidationError(msg) => write!(f, "Input validation error: {}", msg),
            ModelError::ProcessingError(msg) => write!(f, "Processing error: {}", msg),
        }
    }
}

/// Implements the standard error trait for ModelError
impl std::error::Error for ModelError {}
