use crate::dataset::{Dataset, Split};
use crate::error::ModelError;
use crate::math::argmax;
use crate::neural_network::Sequential;
use ndarray::Ix2;

/// Classification of one held-out example
///
/// # Fields
///
/// - `index` - Row of the example in the test split
/// - `input` - Feature values of the example
/// - `class_probabilities` - Model output for the example
/// - `predicted_class` - Argmax of `class_probabilities`, lowest index on ties
/// - `true_class` - Argmax of the one-hot label
/// - `confident` - Whether the predicted class probability reaches the threshold
#[derive(Debug, Clone, PartialEq)]
pub struct EvalRow {
    pub index: usize,
    pub input: Vec<f32>,
    pub class_probabilities: Vec<f32>,
    pub predicted_class: usize,
    pub true_class: usize,
    pub confident: bool,
}

impl EvalRow {
    /// Returns `true` when the prediction matches the label
    pub fn is_correct(&self) -> bool {
        self.predicted_class == self.true_class
    }
}

/// Result of evaluating a model on a test split
#[derive(Debug, Clone, PartialEq)]
pub struct EvalReport {
    /// Mean loss over the test split
    pub loss: f32,
    /// Accuracy, present only if the model was compiled with accuracy tracking
    pub accuracy: Option<f32>,
    /// One row per test example, in dataset order
    pub rows: Vec<EvalRow>,
}

impl EvalReport {
    /// Number of rows whose prediction matches the label
    pub fn correct_count(&self) -> usize {
        self.rows.iter().filter(|row| row.is_correct()).count()
    }

    /// Number of rows marked confident
    pub fn confident_count(&self) -> usize {
        self.rows.iter().filter(|row| row.confident).count()
    }
}

/// Evaluates a model on the test split of a dataset.
///
/// The threshold is used as given: 0 marks every row confident, anything above the highest
/// attainable probability marks none.
///
/// # Parameters
///
/// - `model` - The model to evaluate; left untouched
/// - `dataset` - Supplies `test_inputs` and `test_labels`
/// - `threshold` - Minimum predicted-class probability for a row to be confident
///
/// # Returns
///
/// - `Ok(EvalReport)` - Loss, optional accuracy and per-example rows
/// - `Err(ModelError::Shape)` - Dataset arity does not match the model; nothing was run
/// - `Err(ModelError)` - If inference fails
pub fn evaluate(
    model: &Sequential,
    dataset: &Dataset,
    threshold: f32,
) -> Result<EvalReport, ModelError> {
    dataset.validate_against(model, Split::Test)?;
    let (inputs, labels) = dataset.split(Split::Test);
    let x = inputs.clone().into_dyn();
    let y = labels.clone().into_dyn();

    let (loss, accuracy) = model.evaluate_loss(&x, &y)?;

    let probabilities = model
        .predict(&x)?
        .into_dimensionality::<Ix2>()
        .map_err(|e| ModelError::ProcessingError(format!("predictions are not 2D: {}", e)))?;

    let rows = probabilities
        .rows()
        .into_iter()
        .zip(inputs.rows())
        .zip(labels.rows())
        .enumerate()
        .map(|(index, ((probs, input), label))| {
            let predicted_class = argmax(&probs).unwrap_or(0);
            EvalRow {
                index,
                input: input.to_vec(),
                class_probabilities: probs.to_vec(),
                predicted_class,
                true_class: argmax(&label).unwrap_or(0),
                confident: probs[predicted_class] >= threshold,
            }
        })
        .collect();

    Ok(EvalReport {
        loss,
        accuracy,
        rows,
    })
}
