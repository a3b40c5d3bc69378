use ndarray::Array2;

/// Container for the weights of one neural network layer
///
/// Persistence collaborators read weights through this view; the crate itself defines no
/// serialization format for them.
///
/// New layer kinds add their own variant, so matches need a wildcard arm.
#[non_exhaustive]
pub enum LayerWeight<'a> {
    /// Weights of a dense (fully connected) layer
    Dense(DenseLayerWeight<'a>),
}

/// Weights for a dense (fully connected) neural network layer
///
/// # Fields
///
/// - `weight` - Weight matrix with shape (input_features, output_features)
/// - `bias` - Bias vector with shape (1, output_features)
pub struct DenseLayerWeight<'a> {
    pub weight: &'a Array2<f32>,
    pub bias: &'a Array2<f32>,
}

impl LayerWeight<'_> {
    /// Total number of scalars held by this view.
    pub fn len(&self) -> usize {
        match self {
            LayerWeight::Dense(w) => w.weight.len() + w.bias.len(),
        }
    }

    /// Returns `true` when the layer holds no trainable parameters.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
