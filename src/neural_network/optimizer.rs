
/// Adam optimizer and its per-layer moment state
pub mod adam;
/// Hyperparameter validation shared by all optimizers
pub mod input_validation_function;
/// RMSprop optimizer and its per-layer cache
pub mod rms_prop;
/// Plain stochastic gradient descent
pub mod sgd;

pub use adam::*;
pub use rms_prop::*;
pub use sgd::*;

/// Per-layer optimizer state.
///
/// Each stateful optimizer lazily creates its entry the first time it updates a layer;
/// compiling a model for a new training run resets it.
#[derive(Debug, Clone, Default)]
pub struct OptimizerCache {
    pub adam_states: Option<AdamStates>,
    pub rmsprop_cache: Option<RMSpropCache>,
}
