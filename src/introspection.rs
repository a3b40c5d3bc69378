use crate::error::ModelError;
use crate::neural_network::{Sequential, Tensor};
use log::error;
use ndarray::{Array2, Ix2};

/// Feeds one example through every layer and captures each layer's output.
///
/// The example is wrapped as a single-row batch. Every intermediate tensor is owned by the
/// fold and dropped as soon as the next layer has consumed it, on success and on failure.
///
/// # Parameters
///
/// - `model` - The model to run
/// - `input` - One example, with as many values as the model's input arity
///
/// # Returns
///
/// - `Ok(Vec<Vec<f32>>)` - One activation vector per layer, in layer order
/// - `Err(ModelError::Shape)` - If `input` does not match the model's input arity or the model
///   has no layers
/// - `Err(ModelError)` - If a layer fails
///
/// # Example
/// ```rust
/// use netscope::introspection::try_forward_activations;
/// use netscope::model_builder::{build, default_xor_spec};
///
/// let model = build(&default_xor_spec()).unwrap();
/// let activations = try_forward_activations(&model, &[1.0, 0.0]).unwrap();
/// assert_eq!(activations.len(), 2);
/// assert_eq!(activations[0].len(), 4);
/// assert_eq!(activations[1].len(), 2);
/// ```
pub fn try_forward_activations(
    model: &Sequential,
    input: &[f32],
) -> Result<Vec<Vec<f32>>, ModelError> {
    let Some(input_dim) = model.input_dim() else {
        return Err(ModelError::Shape("model has no layers".to_string()));
    };
    if input.len() != input_dim {
        return Err(ModelError::Shape(format!(
            "input has {} values, model expects {}",
            input.len(),
            input_dim
        )));
    }

    let batch: Tensor = Array2::from_shape_vec((1, input_dim), input.to_vec())
        .map_err(|e| ModelError::Shape(e.to_string()))?
        .into_dyn();

    let mut activations = Vec::with_capacity(model.len());
    model
        .layers()
        .enumerate()
        .try_fold(batch, |current, (index, layer)| -> Result<Tensor, ModelError> {
            let next = layer.infer(&current).map_err(|e| {
                ModelError::ProcessingError(format!(
                    "layer {} ({}) failed: {}",
                    index,
                    layer.layer_type(),
                    e
                ))
            })?;
            activations.push(first_row(&next)?);
            Ok(next)
        })?;

    Ok(activations)
}

/// Runs [`try_forward_activations`] against an optional model.
///
/// # Returns
///
/// - `Some(activations)` - One vector per layer
/// - `None` - If there is no model, or the pass failed; failures are logged with context
pub fn run_forward_activations(model: Option<&Sequential>, input: &[f32]) -> Option<Vec<Vec<f32>>> {
    let model = model?;
    match try_forward_activations(model, input) {
        Ok(activations) => Some(activations),
        Err(e) => {
            error!(
                "forward activation pass failed for input {:?} on a {}-layer model: {}",
                input,
                model.len(),
                e
            );
            None
        }
    }
}

fn first_row(output: &Tensor) -> Result<Vec<f32>, ModelError> {
    let output = output
        .view()
        .into_dimensionality::<Ix2>()
        .map_err(|e| ModelError::ProcessingError(format!("layer output is not 2D: {}", e)))?;
    if output.nrows() == 0 {
        return Err(ModelError::ProcessingError(
            "layer produced an empty batch".to_string(),
        ));
    }
    Ok(output.row(0).to_vec())
}
