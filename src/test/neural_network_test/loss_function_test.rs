use super::*;

#[test]
fn categorical_cross_entropy_of_uniform_prediction() {
    let y_true = array![[1.0, 0.0]].into_dyn();
    let y_pred = array![[0.5, 0.5]].into_dyn();
    let loss = CategoricalCrossEntropy::new().compute_loss(&y_true, &y_pred);
    assert_relative_eq!(loss, std::f32::consts::LN_2, epsilon = 1e-6);
}

#[test]
fn categorical_cross_entropy_is_finite_at_zero_probability() {
    let y_true = array![[1.0, 0.0]].into_dyn();
    let y_pred = array![[0.0, 1.0]].into_dyn();
    let cce = CategoricalCrossEntropy::new();
    assert!(cce.compute_loss(&y_true, &y_pred).is_finite());
    assert!(cce.compute_grad(&y_true, &y_pred).iter().all(|g| g.is_finite()));
}

#[test]
fn categorical_cross_entropy_is_averaged_over_samples() {
    let y_true = array![[1.0, 0.0], [0.0, 1.0]].into_dyn();
    let y_pred = array![[0.5, 0.5], [0.5, 0.5]].into_dyn();
    let loss = CategoricalCrossEntropy::new().compute_loss(&y_true, &y_pred);
    assert_relative_eq!(loss, std::f32::consts::LN_2, epsilon = 1e-6);
}

#[test]
fn mean_squared_error_loss_and_gradient() {
    let y_true = array![[1.0, 0.0]].into_dyn();
    let y_pred = array![[0.0, 0.0]].into_dyn();
    let mse = MeanSquaredError::new();

    assert_relative_eq!(mse.compute_loss(&y_true, &y_pred), 0.5);
    let grad = mse.compute_grad(&y_true, &y_pred);
    assert_relative_eq!(grad[[0, 0]], -1.0);
    assert_relative_eq!(grad[[0, 1]], 0.0);
}
