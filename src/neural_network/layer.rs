/// Dense (fully connected) layer
pub mod dense;
/// Borrowed views over the trainable weights of each layer type
pub mod layer_weight;

pub use dense::*;
pub use layer_weight::*;
