use crate::error::ModelError;
use crate::neural_network::Sequential;
use ndarray::Array2;

/// Two moons toy dataset (four fixed points)
pub mod moons;
/// Spiral toy dataset (randomly generated points)
pub mod spiral;
/// Boolean XOR dataset
pub mod xor;

pub use moons::load_moons;
pub use spiral::{SPIRAL_POINTS, load_spiral, spiral_with_rng};
pub use xor::load_xor;

/// Train and test split of a classification dataset
///
/// Rows are examples. Labels are one-hot encoded, so the label column count is the class
/// count.
///
/// # Fields
///
/// - `train_inputs` - Training features, shape (n_train, features)
/// - `train_labels` - Training labels, shape (n_train, classes)
/// - `test_inputs` - Held-out features, shape (n_test, features)
/// - `test_labels` - Held-out labels, shape (n_test, classes)
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub train_inputs: Array2<f32>,
    pub train_labels: Array2<f32>,
    pub test_inputs: Array2<f32>,
    pub test_labels: Array2<f32>,
}

/// Which split of a [`Dataset`] an operation works on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Split {
    Train,
    Test,
}

impl Split {
    fn name(&self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Test => "test",
        }
    }
}

impl Dataset {
    /// Builds a dataset whose test split is a copy of its training split.
    pub fn mirrored(inputs: Array2<f32>, labels: Array2<f32>) -> Self {
        Self {
            test_inputs: inputs.clone(),
            test_labels: labels.clone(),
            train_inputs: inputs,
            train_labels: labels,
        }
    }

    /// Returns the (inputs, labels) pair of a split.
    pub fn split(&self, split: Split) -> (&Array2<f32>, &Array2<f32>) {
        match split {
            Split::Train => (&self.train_inputs, &self.train_labels),
            Split::Test => (&self.test_inputs, &self.test_labels),
        }
    }

    /// Number of classes, i.e. label columns
    pub fn class_count(&self) -> usize {
        self.train_labels.ncols()
    }

    /// Checks that a split fits the model's input and output arity.
    ///
    /// # Parameters
    ///
    /// - `model` - The model the split will be fed to
    /// - `split` - Which split to check
    ///
    /// # Returns
    ///
    /// - `Ok(())` - Feature count equals the model input arity, label count equals its output
    ///   arity, and inputs and labels have the same number of rows
    /// - `Err(ModelError::Shape)` - Otherwise, naming the mismatching side
    pub fn validate_against(&self, model: &Sequential, split: Split) -> Result<(), ModelError> {
        let (inputs, labels) = self.split(split);
        let (Some(input_dim), Some(output_dim)) = (model.input_dim(), model.output_dim()) else {
            return Err(ModelError::Shape("model has no layers".to_string()));
        };

        if inputs.nrows() != labels.nrows() {
            return Err(ModelError::Shape(format!(
                "{} split has {} input rows but {} label rows",
                split.name(),
                inputs.nrows(),
                labels.nrows()
            )));
        }
        if inputs.ncols() != input_dim {
            return Err(ModelError::Shape(format!(
                "{} inputs have {} features, model expects {}",
                split.name(),
                inputs.ncols(),
                input_dim
            )));
        }
        if labels.ncols() != output_dim {
            return Err(ModelError::Shape(format!(
                "{} labels have {} classes, model outputs {}",
                split.name(),
                labels.ncols(),
                output_dim
            )));
        }
        Ok(())
    }
}

/// Names of the bundled toy datasets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DatasetName {
    #[default]
    Xor,
    Moons,
    Spiral,
}

impl DatasetName {
    /// Maps a selection key to a dataset; unrecognized keys fall back to `Xor`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "moons" => DatasetName::Moons,
            "spiral" => DatasetName::Spiral,
            _ => DatasetName::Xor,
        }
    }

    /// Returns the selection key of this dataset.
    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetName::Xor => "xor",
            DatasetName::Moons => "moons",
            DatasetName::Spiral => "spiral",
        }
    }

    /// Produces the dataset.
    pub fn load(&self) -> Dataset {
        match self {
            DatasetName::Xor => load_xor(),
            DatasetName::Moons => load_moons(),
            DatasetName::Spiral => load_spiral(),
        }
    }
}

/// Looks up or generates a dataset by key: `"xor"`, `"moons"` or `"spiral"`.
///
/// Unknown keys select `"xor"`. `"spiral"` is drawn from an unseeded random source, so its
/// content differs between calls; use [`spiral_with_rng`] for reproducible data.
///
/// # Example
/// ```
/// use netscope::dataset::select;
///
/// let data = select("xor");
/// assert_eq!(data.train_inputs.shape(), &[4, 2]);
/// assert_eq!(select("no-such-set"), data);
/// ```
pub fn select(name: &str) -> Dataset {
    DatasetName::from_name(name).load()
}
