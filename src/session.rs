use crate::dataset::Dataset;
use crate::error::ModelError;
use crate::evaluation::{EvalReport, evaluate};
use crate::introspection::{run_forward_activations, try_forward_activations};
use crate::model_builder::{LayerSpec, build};
use crate::neural_network::Sequential;
use crate::training::{StopHandle, TrainConfig, TrainMetric, TrainReport, Trainer};
use log::info;
use ndarray::Array2;
use tokio::sync::mpsc::UnboundedSender;

/// Per-layer description for the network canvas
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerSummary {
    pub index: usize,
    pub kind: String,
    pub units: usize,
    pub activation: Option<String>,
    pub params: usize,
}

/// Output of [`Session::run_all`] for one input
#[derive(Debug, Clone, PartialEq)]
pub struct RunResult {
    pub input: Vec<f32>,
    /// One vector per layer, in layer order
    pub activations: Vec<Vec<f32>>,
    /// Final layer output for `input`
    pub probabilities: Vec<f32>,
}

/// Owner of the current model
///
/// At most one model is current at a time. Every operation borrows it from here, and
/// replacing it releases the previous one.
///
/// # Example
/// ```rust
/// use netscope::model_builder::default_xor_spec;
/// use netscope::session::Session;
///
/// let mut session = Session::new();
/// assert!(session.forward_activations(&[0.0, 1.0]).is_none());
///
/// session.build(&default_xor_spec()).unwrap();
/// let activations = session.forward_activations(&[0.0, 1.0]).unwrap();
/// assert_eq!(activations.len(), 2);
/// ```
#[derive(Default)]
pub struct Session {
    model: Option<Sequential>,
    trainer: Trainer,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a model from `spec` and makes it current.
    ///
    /// On failure the current model is left in place.
    ///
    /// # Returns
    ///
    /// - `Ok(&Sequential)` - The new current model
    /// - `Err(ModelError::Validation)` - If the specification is malformed
    pub fn build(&mut self, spec: &[LayerSpec]) -> Result<&Sequential, ModelError> {
        let model = build(spec)?;
        Ok(self.install_model(model))
    }

    /// Makes an externally produced model current, releasing the previous one.
    pub fn install_model(&mut self, model: Sequential) -> &Sequential {
        if let Some(old) = self.model.take() {
            info!(
                "releasing previous model ({} layers, {} parameters)",
                old.len(),
                old.param_count()
            );
            drop(old);
        }
        info!(
            "installed model: {} layers, {} parameters",
            model.len(),
            model.param_count()
        );
        self.model.insert(model)
    }

    /// Removes the current model and hands it to the caller.
    pub fn take_model(&mut self) -> Option<Sequential> {
        self.model.take()
    }

    pub fn model(&self) -> Option<&Sequential> {
        self.model.as_ref()
    }

    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    /// Handle for stopping the session's training runs.
    pub fn stop_handle(&self) -> StopHandle {
        self.trainer.stop_handle()
    }

    /// Requests cancellation of the in-flight run.
    pub fn stop(&self) {
        self.trainer.stop();
    }

    /// Metrics of the most recent training run
    pub fn metrics(&self) -> &[TrainMetric] {
        self.trainer.metrics()
    }

    /// Trains the current model; see [`Trainer::train`].
    ///
    /// # Errors
    ///
    /// - `ModelError::NoModel` - If no model has been built
    pub async fn train(
        &mut self,
        dataset: &Dataset,
        config: &TrainConfig,
        sink: Option<&UnboundedSender<TrainMetric>>,
    ) -> Result<TrainReport, ModelError> {
        let model = self.model.as_mut().ok_or(ModelError::NoModel)?;
        self.trainer.train(model, dataset, config, sink).await
    }

    /// Layer outputs of the current model for one input; `None` without a model or on failure.
    pub fn forward_activations(&self, input: &[f32]) -> Option<Vec<Vec<f32>>> {
        run_forward_activations(self.model.as_ref(), input)
    }

    /// Evaluates the current model on the test split of `dataset`.
    ///
    /// # Errors
    ///
    /// - `ModelError::NoModel` - If no model has been built
    pub fn evaluate(&self, dataset: &Dataset, threshold: f32) -> Result<EvalReport, ModelError> {
        let model = self.model.as_ref().ok_or(ModelError::NoModel)?;
        evaluate(model, dataset, threshold)
    }

    /// Runs every row of `inputs` through the current model, capturing layer outputs.
    ///
    /// # Parameters
    ///
    /// - `inputs` - One example per row
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<RunResult>)` - One result per row, in row order
    /// - `Err(ModelError::NoModel)` - If no model has been built
    /// - `Err(ModelError)` - If a row does not fit the model
    pub fn run_all(&self, inputs: &Array2<f32>) -> Result<Vec<RunResult>, ModelError> {
        let model = self.model.as_ref().ok_or(ModelError::NoModel)?;
        inputs
            .rows()
            .into_iter()
            .map(|row| {
                let input = row.to_vec();
                let activations = try_forward_activations(model, &input)?;
                let probabilities = activations.last().cloned().unwrap_or_default();
                Ok(RunResult {
                    input,
                    activations,
                    probabilities,
                })
            })
            .collect()
    }

    /// Describes each layer of the current model; empty without a model.
    pub fn layer_summaries(&self) -> Vec<LayerSummary> {
        let Some(model) = &self.model else {
            return Vec::new();
        };
        model
            .layers()
            .enumerate()
            .map(|(index, layer)| {
                LayerSummary {
                    index,
                    kind: layer.layer_type().to_string(),
                    units: layer.output_dim(),
                    activation: layer.activation().map(|a| a.to_string()),
                    params: layer.param_count(),
                }
            })
            .collect()
    }

    /// Prints the summary table of the current model, if any.
    pub fn summary(&self) {
        match &self.model {
            Some(model) => model.summary(),
            None => println!("No model has been built."),
        }
    }
}
