use crate::error::ModelError;
use crate::neural_network::{Activation, Dense, Sequential};
use log::debug;

/// Kinds of layer a specification can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Dense,
}

impl LayerKind {
    /// Returns the tag used by the layer editor for this kind.
    pub fn name(&self) -> &'static str {
        match self {
            LayerKind::Dense => "dense",
        }
    }
}

impl std::str::FromStr for LayerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dense" => Ok(LayerKind::Dense),
            other => Err(format!("unsupported layer kind '{}'", other)),
        }
    }
}

/// Declarative description of one layer
///
/// # Fields
///
/// - `kind` - Layer variant
/// - `units` - Number of output units, must be positive
/// - `activation` - Activation applied to the layer output
/// - `input_arity` - Shape of one input example; required on the first layer, forbidden elsewhere
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerSpec {
    pub kind: LayerKind,
    pub units: usize,
    pub activation: Activation,
    pub input_arity: Option<Vec<usize>>,
}

impl LayerSpec {
    /// A dense layer without an input arity.
    pub fn dense(units: usize, activation: Activation) -> Self {
        Self {
            kind: LayerKind::Dense,
            units,
            activation,
            input_arity: None,
        }
    }

    /// Sets the input arity; use on the first layer only.
    pub fn with_input_arity(mut self, arity: Vec<usize>) -> Self {
        self.input_arity = Some(arity);
        self
    }
}

/// Ordered layer specifications; order is the forward computation order
pub type ModelSpec = Vec<LayerSpec>;

/// Layer description as produced by the layer-editing form, before any checking
///
/// Tags are free-form strings and sizes are signed, so malformed input can be represented
/// and rejected with a proper [`ModelError::Validation`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawLayerSpec {
    pub kind: String,
    pub units: i64,
    pub activation: Option<String>,
    pub input_arity: Option<Vec<i64>>,
}

impl RawLayerSpec {
    /// Converts the untyped description of layer `index` into a [`LayerSpec`].
    ///
    /// A missing activation means linear.
    ///
    /// # Errors
    ///
    /// - `ModelError::Validation` - Unknown kind or activation, or a negative size
    pub fn parse(&self, index: usize) -> Result<LayerSpec, ModelError> {
        let kind = self
            .kind
            .parse::<LayerKind>()
            .map_err(|reason| ModelError::validation(index, reason))?;

        let activation = match &self.activation {
            Some(name) => name
                .parse::<Activation>()
                .map_err(|reason| ModelError::validation(index, reason))?,
            None => Activation::Linear,
        };

        let units = usize::try_from(self.units).map_err(|_| {
            ModelError::validation(index, format!("units must be positive, got {}", self.units))
        })?;

        let input_arity = match &self.input_arity {
            Some(dims) => Some(
                dims.iter()
                    .map(|&d| {
                        usize::try_from(d).map_err(|_| {
                            ModelError::validation(
                                index,
                                format!("input arity entries must be positive, got {}", d),
                            )
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            None => None,
        };

        Ok(LayerSpec {
            kind,
            units,
            activation,
            input_arity,
        })
    }
}

/// The default specification: a 2-input network with a 4-unit tanh hidden layer and a
/// 2-unit softmax output.
pub fn default_xor_spec() -> ModelSpec {
    vec![
        LayerSpec::dense(4, Activation::Tanh).with_input_arity(vec![2]),
        LayerSpec::dense(2, Activation::Softmax),
    ]
}

/// Checks a specification without building anything.
///
/// # Parameters
///
/// - `spec` - Layer specifications in forward order
///
/// # Returns
///
/// - `Ok(())` - The specification can be built
/// - `Err(ModelError::Validation)` - Names the first offending layer and why
pub fn validate_spec(spec: &[LayerSpec]) -> Result<(), ModelError> {
    if spec.is_empty() {
        return Err(ModelError::validation(0, "specification has no layers"));
    }

    for (index, layer) in spec.iter().enumerate() {
        if layer.units == 0 {
            return Err(ModelError::validation(index, "units must be positive, got 0"));
        }

        match (&layer.input_arity, index) {
            (None, 0) => {
                return Err(ModelError::validation(
                    0,
                    "the first layer must declare its input arity",
                ));
            }
            (Some(arity), 0) => {
                if arity.is_empty() {
                    return Err(ModelError::validation(0, "input arity must not be empty"));
                }
                if let Some(&d) = arity.iter().find(|&&d| d == 0) {
                    return Err(ModelError::validation(
                        0,
                        format!("input arity entries must be positive, got {}", d),
                    ));
                }
                if flat_input_dim(arity).is_none() {
                    return Err(ModelError::validation(0, "input arity is too large"));
                }
            }
            (Some(_), _) => {
                return Err(ModelError::validation(
                    index,
                    "only the first layer may declare an input arity",
                ));
            }
            (None, _) => {}
        }
    }

    Ok(())
}

/// Product of the arity entries, or `None` on overflow.
fn flat_input_dim(arity: &[usize]) -> Option<usize> {
    arity.iter().try_fold(1usize, |acc, &d| acc.checked_mul(d))
}

/// Builds a runnable model from a layer specification.
///
/// Each layer's input size is the previous layer's unit count; the first layer's input size
/// is the product of its declared input arity. Parameters are freshly initialized. Building
/// never releases a model built earlier; replacing the current model is the owner's job
/// (see [`crate::session::Session::build`]).
///
/// # Parameters
///
/// - `spec` - Layer specifications in forward order
///
/// # Returns
///
/// - `Ok(Sequential)` - A model with exactly `spec.len()` layers
/// - `Err(ModelError::Validation)` - If the specification is malformed
///
/// # Examples
/// ```rust
/// use netscope::model_builder::{build, default_xor_spec};
///
/// let model = build(&default_xor_spec()).unwrap();
/// assert_eq!(model.len(), 2);
/// assert_eq!(model.input_dim(), Some(2));
/// assert_eq!(model.output_dim(), Some(2));
/// ```
pub fn build(spec: &[LayerSpec]) -> Result<Sequential, ModelError> {
    validate_spec(spec)?;

    let mut model = Sequential::new();
    let mut fan_in = spec[0]
        .input_arity
        .as_deref()
        .and_then(flat_input_dim)
        .unwrap_or_default();

    for (index, layer) in spec.iter().enumerate() {
        match layer.kind {
            LayerKind::Dense => {
                let dense = Dense::new(fan_in, layer.units, layer.activation)
                    .map_err(|e| ModelError::validation(index, e.to_string()))?;
                model.add(dense);
            }
        }
        fan_in = layer.units;
    }

    debug!(
        "built model: {} layers, {} parameters",
        model.len(),
        model.param_count()
    );
    Ok(model)
}

/// Parses and builds a specification coming straight from the layer editor.
///
/// # Errors
///
/// - `ModelError::Validation` - If any layer cannot be parsed or the parsed spec is malformed
pub fn build_from_raw(raw: &[RawLayerSpec]) -> Result<Sequential, ModelError> {
    let spec = raw
        .iter()
        .enumerate()
        .map(|(index, layer)| layer.parse(index))
        .collect::<Result<ModelSpec, _>>()?;
    build(&spec)
}
