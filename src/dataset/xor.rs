use super::Dataset;
use ndarray::array;

/// Loads the Boolean XOR dataset
///
/// Inputs are the four points of {0,1}², labels are one-hot with class 1 when exactly one
/// coordinate is set. The test split is identical to the training split.
///
/// # Example
///
/// ```
/// use netscope::dataset::load_xor;
///
/// let data = load_xor();
/// assert_eq!(data.train_labels.shape(), &[4, 2]);
/// assert_eq!(data.train_inputs, data.test_inputs);
/// ```
pub fn load_xor() -> Dataset {
    let inputs = array![[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]];
    let labels = array![[1.0, 0.0], [0.0, 1.0], [0.0, 1.0], [1.0, 0.0]];
    Dataset::mirrored(inputs, labels)
}
