//! Build, train, introspect and evaluate small feed-forward classifiers.
//!
//! A model is described as an ordered list of [`model_builder::LayerSpec`], built into a
//! [`neural_network::Sequential`], trained on one of the toy datasets of [`dataset`],
//! looked into layer by layer with [`introspection`], and scored against a confidence
//! threshold with [`evaluation`]. [`session::Session`] owns the current model and ties the
//! pieces together.

/// Error types shared by every module of the crate.
pub mod error;

/// Module `traits` defines the seams of the numeric engine: layers, loss functions and
/// optimizers.
pub mod traits;

/// Module `math` contains the classification helpers shared by training and evaluation.
///
/// - `argmax` - Index of the largest entry, lowest index on ties
/// - `argmax_rows` - Row-wise argmax of a matrix
/// - `count_correct` - Number of rows whose predicted class matches the label
///
/// # Example
/// ```rust
/// use netscope::math::argmax_rows;
/// use ndarray::array;
///
/// let probabilities = array![[0.9f32, 0.1], [0.3, 0.7]];
/// assert_eq!(argmax_rows(&probabilities), vec![0, 1]);
/// ```
pub mod math;

/// Module `neural_network` is the numeric engine the core orchestrates.
///
/// # Components
///
/// - **Dense**: fully connected layer with Glorot-uniform initialization
/// - **Activation**: ReLU, Tanh, Sigmoid, Softmax and Linear
/// - **Loss functions**: categorical cross entropy, mean squared error
/// - **Optimizers**: SGD, Adam, RMSprop
/// - **Sequential**: ordered stack of layers with batch training and read-only inference
pub mod neural_network;

/// Module `model_builder` validates layer specifications and builds models from them.
pub mod model_builder;

/// Module `dataset` provides the toy datasets `xor`, `moons` and `spiral`.
pub mod dataset;

/// Module `training` runs the cancellable, metrics-emitting training loop.
pub mod training;

/// Module `introspection` captures the output of every layer for a single input.
pub mod introspection;

/// Module `evaluation` scores a model on a held-out set, one row per example.
pub mod evaluation;

/// Module `session` owns the current model and routes every operation to it.
pub mod session;

/// A convenience module that re-exports the most commonly used types of this crate.
///
/// # Example
/// ```rust
/// use netscope::prelude::*;
///
/// let mut session = Session::new();
/// session.build(&default_xor_spec()).unwrap();
/// let report = session.evaluate(&select("xor"), 0.5).unwrap();
/// assert_eq!(report.rows.len(), 4);
/// ```
pub mod prelude;
