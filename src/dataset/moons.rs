use super::Dataset;
use ndarray::array;

/// Loads a four-point, two-cluster dataset
///
/// The first two points belong to class 0, the last two to class 1. The test split is
/// identical to the training split.
pub fn load_moons() -> Dataset {
    let inputs = array![[0.1, 0.3], [0.2, 0.4], [0.9, 0.7], [0.8, 0.65]];
    let labels = array![[1.0, 0.0], [1.0, 0.0], [0.0, 1.0], [0.0, 1.0]];
    Dataset::mirrored(inputs, labels)
}
