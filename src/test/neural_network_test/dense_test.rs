use super::*;

#[test]
fn dense_forward_pass_dimensions() {
    let mut dense = Dense::new(4, 3, Activation::ReLU).unwrap();
    let input = Array::ones((2, 4)).into_dyn();

    let output = dense.forward(&input).unwrap();
    assert_eq!(output.shape(), &[2, 3]);
}

#[test]
fn infer_matches_forward() {
    let mut dense = Dense::new(3, 2, Activation::Tanh).unwrap();
    let input = array![[0.1, -0.4, 0.9]].into_dyn();

    let inferred = dense.infer(&input).unwrap();
    let forwarded = dense.forward(&input).unwrap();
    assert_eq!(inferred, forwarded);
}

#[test]
fn dense_with_fixed_weights() {
    let dense = fixed_dense(
        array![[1.0, 0.0], [0.0, 1.0]],
        array![[0.5, -0.5]],
        Activation::Linear,
    );
    let output = dense.infer(&array![[1.0, 2.0]].into_dyn()).unwrap();
    assert_eq!(output, array![[1.5, 1.5]].into_dyn());
}

#[test]
fn zero_dimensions_are_rejected() {
    assert!(matches!(
        Dense::new(0, 3, Activation::ReLU),
        Err(ModelError::InputValidationError(_))
    ));
    assert!(matches!(
        Dense::new(3, 0, Activation::ReLU),
        Err(ModelError::InputValidationError(_))
    ));
}

#[test]
fn wrong_feature_count_is_rejected() {
    let dense = Dense::new(2, 3, Activation::ReLU).unwrap();
    let result = dense.infer(&Array::ones((1, 5)).into_dyn());
    assert!(matches!(result, Err(ModelError::InputValidationError(_))));
}

#[test]
fn backward_before_forward_fails() {
    let mut dense = Dense::new(2, 2, Activation::Sigmoid).unwrap();
    let result = dense.backward(&Array::ones((1, 2)).into_dyn());
    assert!(matches!(result, Err(ModelError::ProcessingError(_))));
}

#[test]
fn backward_returns_input_gradient() {
    let mut dense = fixed_dense(
        array![[1.0, 2.0], [3.0, 4.0]],
        array![[0.0, 0.0]],
        Activation::Linear,
    );
    dense.forward(&array![[1.0, 1.0]].into_dyn()).unwrap();
    let grad = dense.backward(&array![[1.0, 0.0]].into_dyn()).unwrap();
    // grad_z · Wᵀ
    assert_eq!(grad, array![[1.0, 3.0]].into_dyn());
}

#[test]
fn set_weights_checks_shapes() {
    let mut dense = Dense::new(2, 3, Activation::Linear).unwrap();
    let result = dense.set_weights(Array2::zeros((3, 2)), Array2::zeros((1, 3)));
    assert!(matches!(result, Err(ModelError::Shape(_))));
}

#[test]
fn parameters_and_initialization() {
    let dense = Dense::new(4, 3, Activation::ReLU).unwrap();
    assert_eq!(dense.param_count(), 15);
    assert_eq!(dense.activation(), Some(Activation::ReLU));
    assert_eq!(dense.output_shape(), "(None, 3)");

    let limit = (6.0f32 / 7.0).sqrt();
    let LayerWeight::Dense(w) = dense.get_weights();
    assert_eq!(w.weight.dim(), (4, 3));
    assert!(w.weight.iter().all(|x| x.abs() <= limit));
    assert!(w.bias.iter().all(|&b| b == 0.0));
    assert_eq!(dense.get_weights().len(), 15);
}
