pub use crate::dataset::{Dataset, DatasetName, Split, select, spiral_with_rng};
pub use crate::error::ModelError;
pub use crate::evaluation::{EvalReport, EvalRow, evaluate};
pub use crate::introspection::{run_forward_activations, try_forward_activations};
pub use crate::model_builder::{
    LayerKind, LayerSpec, ModelSpec, RawLayerSpec, build, build_from_raw, default_xor_spec,
};
pub use crate::neural_network::{Activation, Dense, Sequential, Tensor};
pub use crate::session::{LayerSummary, RunResult, Session};
pub use crate::training::{
    LossKind, OptimizerConfig, StopHandle, TrainConfig, TrainMetric, TrainReport, Trainer,
};
