use crate::error::ModelError;
use crate::neural_network::Tensor;
use ndarray::{ArrayBase, Data, Ix1, Ix2};

/// Returns the index of the largest entry of a vector.
///
/// Ties are broken by the lowest index. NaN entries never win against a number.
///
/// # Parameters
///
/// - `values` - Any 1D view, array or slice-backed vector
///
/// # Returns
///
/// - `Some(index)` - Position of the first maximum
/// - `None` - If `values` is empty
///
/// # Examples
/// ```rust
/// use netscope::math::argmax;
/// use ndarray::array;
///
/// assert_eq!(argmax(&array![0.2f32, 0.7, 0.1]), Some(1));
/// // ties resolve to the lowest index
/// assert_eq!(argmax(&array![0.5f32, 0.5]), Some(0));
/// ```
pub fn argmax<S>(values: &ArrayBase<S, Ix1>) -> Option<usize>
where
    S: Data<Elem = f32>,
{
    let mut best: Option<(usize, f32)> = None;
    for (i, &v) in values.iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        match best {
            Some((_, current)) if v <= current => {}
            _ => best = Some((i, v)),
        }
    }

    match best {
        Some((i, _)) => Some(i),
        None if values.is_empty() => None,
        // all-NaN rows still need a class
        None => Some(0),
    }
}

/// Applies [`argmax`] to every row of a matrix.
///
/// # Parameters
///
/// - `matrix` - A 2D array with one example per row
///
/// # Returns
///
/// - `Vec<usize>` - The winning column of each row; rows of a zero-column matrix map to 0
pub fn argmax_rows<S>(matrix: &ArrayBase<S, Ix2>) -> Vec<usize>
where
    S: Data<Elem = f32>,
{
    matrix
        .rows()
        .into_iter()
        .map(|row| argmax(&row).unwrap_or(0))
        .collect()
}

/// Counts rows whose predicted class matches the label's class.
///
/// For multi-column outputs classes are compared by argmax. For a single output column a
/// prediction of at least 0.5 counts as class 1.
///
/// # Parameters
///
/// - `y_true` - Labels with shape (n, classes)
/// - `y_pred` - Predictions with the same shape
///
/// # Returns
///
/// - `Ok(count)` - Number of matching rows
/// - `Err(ModelError::Shape)` - If the tensors are not 2D or their shapes differ
pub fn count_correct(y_true: &Tensor, y_pred: &Tensor) -> Result<usize, ModelError> {
    if y_true.shape() != y_pred.shape() {
        return Err(ModelError::Shape(format!(
            "labels have shape {:?}, predictions have shape {:?}",
            y_true.shape(),
            y_pred.shape()
        )));
    }

    let y_true = y_true
        .view()
        .into_dimensionality::<Ix2>()
        .map_err(|e| ModelError::Shape(format!("labels must be 2D: {}", e)))?;
    let y_pred = y_pred
        .view()
        .into_dimensionality::<Ix2>()
        .map_err(|e| ModelError::Shape(format!("predictions must be 2D: {}", e)))?;

    if y_true.ncols() == 1 {
        let hits = y_true
            .iter()
            .zip(y_pred.iter())
            .filter(|&(&t, &p)| (t >= 0.5) == (p >= 0.5))
            .count();
        return Ok(hits);
    }

    let hits = argmax_rows(&y_true)
        .into_iter()
        .zip(argmax_rows(&y_pred))
        .filter(|(t, p)| t == p)
        .count();
    Ok(hits)
}
