use super::{LossFunction, Tensor};
use ndarray::Zip;

/// Probabilities are kept inside [PROB_FLOOR, 1 - PROB_FLOOR] so `ln` and `1/p` stay finite
const PROB_FLOOR: f32 = 1e-7;

/// Number of samples in a batch tensor, never 0 so it can divide
fn batch_len(t: &Tensor) -> f32 {
    t.shape().first().copied().unwrap_or(1).max(1) as f32
}

/// Cross entropy between one-hot labels and probability rows
///
/// Loss is `-Σ y·ln(p)` summed over classes and averaged over samples. Intended to sit on top
/// of a softmax output layer.
#[derive(Debug, Default, Clone, Copy)]
pub struct CategoricalCrossEntropy;

impl CategoricalCrossEntropy {
    pub fn new() -> Self {
        Self
    }
}

impl LossFunction for CategoricalCrossEntropy {
    fn compute_loss(&self, y_true: &Tensor, y_pred: &Tensor) -> f32 {
        let mut total = 0.0f32;
        Zip::from(y_true).and(y_pred).for_each(|&y, &p| {
            if y != 0.0 {
                total -= y * p.clamp(PROB_FLOOR, 1.0 - PROB_FLOOR).ln();
            }
        });
        total / batch_len(y_true)
    }

    fn compute_grad(&self, y_true: &Tensor, y_pred: &Tensor) -> Tensor {
        let n = batch_len(y_true);
        Zip::from(y_true)
            .and(y_pred)
            .map_collect(|&y, &p| -y / (p.clamp(PROB_FLOOR, 1.0 - PROB_FLOOR) * n))
    }
}

/// Mean of squared differences over every element
///
/// # Example
///
/// ```rust
/// use netscope::neural_network::*;
/// use ndarray::array;
///
/// let mse = MeanSquaredError::new();
/// let y_true = array![[1.0f32], [2.0], [3.0]].into_dyn();
/// let y_pred = array![[1.0f32], [2.0], [2.0]].into_dyn();
///
/// assert!((mse.compute_loss(&y_true, &y_pred) - 1.0 / 3.0).abs() < 1e-6);
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct MeanSquaredError;

impl MeanSquaredError {
    pub fn new() -> Self {
        Self
    }
}

impl LossFunction for MeanSquaredError {
    fn compute_loss(&self, y_true: &Tensor, y_pred: &Tensor) -> f32 {
        let mut total = 0.0f32;
        Zip::from(y_true).and(y_pred).for_each(|&y, &p| {
            let d = p - y;
            total += d * d;
        });
        total / y_true.len().max(1) as f32
    }

    fn compute_grad(&self, y_true: &Tensor, y_pred: &Tensor) -> Tensor {
        let scale = 2.0 / y_true.len().max(1) as f32;
        let mut grad = y_pred - y_true;
        grad.par_mapv_inplace(|d| d * scale);
        grad
    }
}
