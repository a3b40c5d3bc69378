use super::*;
use crate::error::ModelError;
use crate::math::count_correct;

/// Outcome of one optimizer step on one batch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchOutcome {
    /// Mean loss over the batch, computed before the update
    pub loss: f32,
    /// Number of samples whose predicted class matched the label, before the update
    pub correct: usize,
    /// Number of samples in the batch
    pub size: usize,
}

/// A Sequential neural network model for building and training feedforward networks.
///
/// Layers are stacked linearly; each layer feeds its output to the next one.
///
/// # Fields
///
/// - `layers` - All the layers in the model, in forward computation order
/// - `optimizer` - Optimizer used for updating parameters, set by `compile`
/// - `loss` - Loss function used for training and evaluation, set by `compile`
/// - `track_accuracy` - Whether training and evaluation report classification accuracy
///
/// # Example
/// ```rust
/// use netscope::neural_network::*;
/// use ndarray::Array;
///
/// let x = Array::ones((8, 2)).into_dyn();
/// let y = Array::from_shape_fn((8, 2), |(_, j)| if j == 0 { 1.0 } else { 0.0 }).into_dyn();
///
/// let mut model = Sequential::new();
/// model
///     .add(Dense::new(2, 4, Activation::Tanh).unwrap())
///     .add(Dense::new(4, 2, Activation::Softmax).unwrap())
///     .compile(Adam::with_learning_rate(0.03).unwrap(), CategoricalCrossEntropy::new());
///
/// let outcome = model.train_batch(&x, &y).unwrap();
/// assert_eq!(outcome.size, 8);
///
/// let predictions = model.predict(&x).unwrap();
/// assert_eq!(predictions.shape(), &[8, 2]);
/// ```
pub struct Sequential {
    layers: Vec<Box<dyn Layer>>,
    optimizer: Option<Box<dyn Optimizer>>,
    loss: Option<Box<dyn LossFunction>>,
    track_accuracy: bool,
}

impl Default for Sequential {
    fn default() -> Self {
        Self::new()
    }
}

impl Sequential {
    /// Creates a new empty Sequential model
    pub fn new() -> Self {
        Self {
            layers: Vec::new(),
            optimizer: None,
            loss: None,
            track_accuracy: false,
        }
    }

    /// Adds a layer to the model
    ///
    /// Supports method chaining pattern
    ///
    /// # Parameters
    ///
    /// - `layer` - The layer to add to the model
    ///
    /// # Returns
    ///
    /// - `&mut Sequential` - Mutable reference to self for method chaining
    pub fn add<L: 'static + Layer>(&mut self, layer: L) -> &mut Self {
        self.layers.push(Box::new(layer));
        self
    }

    /// Configures the optimizer and loss function for the model
    ///
    /// Compiling starts a fresh optimization: optimizer state cached in the layers by a
    /// previous run is discarded. Accuracy tracking is switched on.
    ///
    /// # Parameters
    ///
    /// - `optimizer` - The optimizer to use for training
    /// - `loss` - The loss function to use for training
    ///
    /// # Returns
    ///
    /// - `&mut Sequential` - Mutable reference to self for method chaining
    pub fn compile<O, LFunc>(&mut self, optimizer: O, loss: LFunc) -> &mut Self
    where
        O: 'static + Optimizer,
        LFunc: 'static + LossFunction,
    {
        self.compile_boxed(Box::new(optimizer), Box::new(loss))
    }

    /// Same as [`Sequential::compile`] for already boxed components.
    pub fn compile_boxed(
        &mut self,
        optimizer: Box<dyn Optimizer>,
        loss: Box<dyn LossFunction>,
    ) -> &mut Self {
        for layer in &mut self.layers {
            layer.reset_optimizer_state();
        }
        self.optimizer = Some(optimizer);
        self.loss = Some(loss);
        self.track_accuracy = true;
        self
    }

    /// Returns `true` once `compile` has been called
    pub fn is_compiled(&self) -> bool {
        self.optimizer.is_some() && self.loss.is_some()
    }

    /// Returns `true` when the model was compiled with accuracy tracking
    pub fn tracks_accuracy(&self) -> bool {
        self.track_accuracy
    }

    /// Number of layers in the model
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Returns `true` if the model has no layers
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Iterates over the layers in forward computation order
    pub fn layers(&self) -> impl ExactSizeIterator<Item = &dyn Layer> + '_ {
        self.layers.iter().map(|layer| &**layer)
    }

    /// Input arity of the first layer, if any
    pub fn input_dim(&self) -> Option<usize> {
        self.layers.first().map(|layer| layer.input_dim())
    }

    /// Output arity of the last layer, if any
    pub fn output_dim(&self) -> Option<usize> {
        self.layers.last().map(|layer| layer.output_dim())
    }

    /// Total number of trainable parameters
    pub fn param_count(&self) -> usize {
        self.layers.iter().map(|layer| layer.param_count()).sum()
    }

    /// Validates the model state and input data
    fn validate_training_inputs(&self, x: &Tensor, y: &Tensor) -> Result<(), ModelError> {
        if !self.is_compiled() {
            return Err(ModelError::InputValidationError(
                "Model must be compiled before training".to_string(),
            ));
        }

        if self.layers.is_empty() {
            return Err(ModelError::InputValidationError(
                "Layers not specified".to_string(),
            ));
        }

        if x.is_empty() || y.is_empty() {
            return Err(ModelError::InputValidationError(
                "Input tensors cannot be empty".to_string(),
            ));
        }

        if x.shape()[0] != y.shape()[0] {
            return Err(ModelError::InputValidationError(format!(
                "Batch size mismatch: input has {} samples, target has {} samples",
                x.shape()[0],
                y.shape()[0]
            )));
        }

        Ok(())
    }

    /// Performs one optimizer step on a single batch of data
    ///
    /// # Parameters
    ///
    /// - `x` - Input tensor for the batch
    /// - `y` - Target tensor for the batch
    ///
    /// # Returns
    ///
    /// - `Ok(BatchOutcome)` - Loss and number of correct predictions, both measured before the update
    /// - `Err(ModelError)` - If the model is not compiled or a layer fails
    pub fn train_batch(&mut self, x: &Tensor, y: &Tensor) -> Result<BatchOutcome, ModelError> {
        self.validate_training_inputs(x, y)?;

        let (Some(optimizer), Some(loss)) = (self.optimizer.as_mut(), self.loss.as_ref()) else {
            return Err(ModelError::InputValidationError(
                "Model must be compiled before training".to_string(),
            ));
        };

        let mut output = x.clone();
        for layer in &mut self.layers {
            output = layer.forward(&output)?;
        }

        check_output_shape(y, &output)?;
        let loss_value = loss.compute_loss(y, &output);
        let correct = count_correct(y, &output)?;
        let mut grad = loss.compute_grad(y, &output);

        optimizer.begin_step();
        for layer in self.layers.iter_mut().rev() {
            grad = layer.backward(&grad)?;
            optimizer.update(&mut **layer);
        }

        Ok(BatchOutcome {
            loss: loss_value,
            correct,
            size: x.shape()[0],
        })
    }

    /// Generates predictions for the input data
    ///
    /// Only performs a read-only forward pass; no layer state is touched.
    ///
    /// # Parameters
    ///
    /// - `x` - Input tensor containing data to predict on
    ///
    /// # Returns
    ///
    /// - `Ok(Tensor)` - The model's predictions
    /// - `Err(ModelError)` - If the input is empty or a layer rejects it
    pub fn predict(&self, x: &Tensor) -> Result<Tensor, ModelError> {
        if x.is_empty() {
            return Err(ModelError::InputValidationError(
                "Input tensor cannot be empty".to_string(),
            ));
        }

        let mut output = x.clone();
        for layer in &self.layers {
            output = layer.infer(&output)?;
        }
        Ok(output)
    }

    /// Computes the loss (and accuracy, when tracked) of the model over a labelled set
    ///
    /// Uses the compiled loss function, or categorical cross entropy when the model has not
    /// been compiled yet.
    ///
    /// # Parameters
    ///
    /// - `x` - Input tensor
    /// - `y` - One-hot target tensor
    ///
    /// # Returns
    ///
    /// - `Ok((loss, accuracy))` - Mean loss, and accuracy if the model tracks it
    /// - `Err(ModelError)` - If inference fails
    pub fn evaluate_loss(&self, x: &Tensor, y: &Tensor) -> Result<(f32, Option<f32>), ModelError> {
        let output = self.predict(x)?;
        check_output_shape(y, &output)?;
        let loss_value = match &self.loss {
            Some(loss) => loss.compute_loss(y, &output),
            None => CategoricalCrossEntropy::new().compute_loss(y, &output),
        };

        let accuracy = if self.track_accuracy {
            let n = y.shape()[0].max(1);
            Some(count_correct(y, &output)? as f32 / n as f32)
        } else {
            None
        };

        Ok((loss_value, accuracy))
    }

    /// Returns all the weights from each layer in the model, in layer order.
    pub fn get_weights(&self) -> Vec<LayerWeight<'_>> {
        self.layers.iter().map(|layer| layer.get_weights()).collect()
    }

    /// Prints a summary of the model's structure
    ///
    /// One line per layer with its activation, output shape and parameter count, then the
    /// totals.
    pub fn summary(&self) {
        const WIDTHS: [usize; 4] = [22, 12, 16, 10];
        let rule = |left: &str, mid: &str, right: &str, fill: &str| {
            let cells: Vec<String> = WIDTHS.iter().map(|w| fill.repeat(w + 2)).collect();
            format!("{}{}{}", left, cells.join(mid), right)
        };

        println!("Model: \"sequential\" ({} layers)", self.len());
        println!("{}", rule("┏", "┳", "┓", "━"));
        println!(
            "┃ {:<22} ┃ {:<12} ┃ {:<16} ┃ {:>10} ┃",
            "Layer", "Activation", "Output Shape", "Param #"
        );
        println!("{}", rule("┡", "╇", "┩", "━"));
        for (i, layer) in self.layers.iter().enumerate() {
            println!(
                "│ {:<22} │ {:<12} │ {:<16} │ {:>10} │",
                format!("{}_{}", layer.layer_type().to_lowercase(), i),
                layer.activation().map_or("-", |a| a.name()),
                layer.output_shape(),
                layer.param_count()
            );
        }
        println!("{}", rule("└", "┴", "┘", "─"));

        let total_params = self.param_count();
        println!(
            " Total params: {} ({} B), compiled: {}",
            total_params,
            total_params * std::mem::size_of::<f32>(),
            self.is_compiled()
        );
    }
}

fn check_output_shape(y: &Tensor, output: &Tensor) -> Result<(), ModelError> {
    if y.shape() != output.shape() {
        return Err(ModelError::Shape(format!(
            "targets have shape {:?}, model output has shape {:?}",
            y.shape(),
            output.shape()
        )));
    }
    Ok(())
}
