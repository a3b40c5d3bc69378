use super::Dataset;
use ndarray::Array2;
use rand::Rng;

/// Number of points generated per call
pub const SPIRAL_POINTS: usize = 200;

/// Generates the spiral dataset from the thread-local, unseeded random source.
///
/// Content varies from call to call; the point count never does.
pub fn load_spiral() -> Dataset {
    spiral_with_rng(&mut rand::rng())
}

/// Generates the spiral dataset from a caller-provided random source.
///
/// Coordinates are uniform in [0, 1)², labels are uniform over two classes and one-hot
/// encoded. The test split is identical to the training split.
///
/// # Example
///
/// ```
/// use netscope::dataset::{SPIRAL_POINTS, spiral_with_rng};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let a = spiral_with_rng(&mut StdRng::seed_from_u64(7));
/// let b = spiral_with_rng(&mut StdRng::seed_from_u64(7));
/// assert_eq!(a, b);
/// assert_eq!(a.train_inputs.nrows(), SPIRAL_POINTS);
/// ```
pub fn spiral_with_rng<R: Rng>(rng: &mut R) -> Dataset {
    let inputs = Array2::from_shape_simple_fn((SPIRAL_POINTS, 2), || rng.random::<f32>());

    let mut labels = Array2::<f32>::zeros((SPIRAL_POINTS, 2));
    for mut row in labels.rows_mut() {
        let class = rng.random_range(0..2);
        row[class] = 1.0;
    }

    Dataset::mirrored(inputs, labels)
}
