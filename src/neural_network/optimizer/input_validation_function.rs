use crate::error::ModelError;

/// Rejects learning rates that are not strictly positive and finite.
pub fn validate_learning_rate(learning_rate: f32) -> Result<(), ModelError> {
    if learning_rate.is_finite() && learning_rate > 0.0 {
        Ok(())
    } else {
        Err(ModelError::Config(format!(
            "learning_rate must be positive and finite, got {}",
            learning_rate
        )))
    }
}

/// Rejects decay rates (beta1, beta2, rho) outside [0, 1).
///
/// # Parameters
///
/// - `value` - The decay rate
/// - `param_name` - Name used in the error message
pub fn validate_decay_rate(value: f32, param_name: &str) -> Result<(), ModelError> {
    if (0.0..1.0).contains(&value) {
        Ok(())
    } else {
        Err(ModelError::Config(format!(
            "{} must be in [0, 1), got {}",
            param_name, value
        )))
    }
}

/// Rejects an epsilon that is not strictly positive and finite.
pub fn validate_epsilon(epsilon: f32) -> Result<(), ModelError> {
    if epsilon.is_finite() && epsilon > 0.0 {
        Ok(())
    } else {
        Err(ModelError::Config(format!(
            "epsilon must be positive and finite, got {}",
            epsilon
        )))
    }
}

/// Rejects a zero count such as `epochs` or `batch_size`.
pub fn validate_positive_count(value: usize, param_name: &str) -> Result<(), ModelError> {
    match value {
        0 => Err(ModelError::Config(format!("{} must be at least 1", param_name))),
        _ => Ok(()),
    }
}
