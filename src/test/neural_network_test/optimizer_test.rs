use super::*;

/// Linear 2→1 model with zero parameters, and a batch it can fit exactly.
fn linear_problem() -> (Sequential, Tensor, Tensor) {
    let mut model = Sequential::new();
    model.add(fixed_dense(
        Array2::zeros((2, 1)),
        Array2::zeros((1, 1)),
        Activation::Linear,
    ));
    let x = array![[1.0, 0.0], [0.0, 1.0]].into_dyn();
    let y = array![[1.0], [2.0]].into_dyn();
    (model, x, y)
}

#[test]
fn hyperparameters_are_validated() {
    assert!(matches!(SGD::new(0.0), Err(ModelError::Config(_))));
    assert!(matches!(SGD::new(f32::NAN), Err(ModelError::Config(_))));
    assert!(matches!(
        Adam::new(0.01, 1.0, 0.999, 1e-7),
        Err(ModelError::Config(_))
    ));
    assert!(matches!(
        Adam::new(0.01, 0.9, 0.999, 0.0),
        Err(ModelError::Config(_))
    ));
    assert!(matches!(
        RMSprop::new(-0.1, 0.9, 1e-7),
        Err(ModelError::Config(_))
    ));
    assert!(Adam::with_learning_rate(0.03).is_ok());
}

#[test]
fn sgd_step_matches_hand_computation() {
    let (mut model, x, y) = linear_problem();
    model.compile(SGD::new(0.1).unwrap(), MeanSquaredError::new());

    // predictions are 0, so loss = (1 + 4) / 2
    let first = model.train_batch(&x, &y).unwrap();
    assert_relative_eq!(first.loss, 2.5);

    // after one step: w = [0.1, 0.2], b = 0.3, predictions [0.4, 0.5]
    let predictions = model.predict(&x).unwrap();
    assert_relative_eq!(predictions[[0, 0]], 0.4, epsilon = 1e-6);
    assert_relative_eq!(predictions[[1, 0]], 0.5, epsilon = 1e-6);

    let second = model.train_batch(&x, &y).unwrap();
    assert_relative_eq!(second.loss, 1.305, epsilon = 1e-5);
}

#[test]
fn adam_first_step_moves_each_parameter_by_learning_rate() {
    let (mut model, x, y) = linear_problem();
    model.compile(Adam::with_learning_rate(0.01).unwrap(), MeanSquaredError::new());
    model.train_batch(&x, &y).unwrap();

    let weights = model.get_weights();
    let LayerWeight::Dense(ref w) = weights[0];
    for &p in w.weight.iter().chain(w.bias.iter()) {
        assert_relative_eq!(p, 0.01, epsilon = 1e-5);
    }
}

#[test]
fn rmsprop_reduces_loss() {
    let (mut model, x, y) = linear_problem();
    model.compile(RMSprop::new(0.05, 0.9, 1e-7).unwrap(), MeanSquaredError::new());

    let first = model.train_batch(&x, &y).unwrap().loss;
    let mut last = first;
    for _ in 0..30 {
        last = model.train_batch(&x, &y).unwrap().loss;
    }
    assert!(last < first, "loss went from {} to {}", first, last);
}

#[test]
fn recompiling_resets_adam_state() {
    let (mut model, x, y) = linear_problem();
    model.compile(Adam::with_learning_rate(0.01).unwrap(), MeanSquaredError::new());
    for _ in 0..5 {
        model.train_batch(&x, &y).unwrap();
    }
    let before = model.predict(&x).unwrap();

    // a fresh run takes a bias-corrected first step again: every parameter moves by ~lr
    model.compile(Adam::with_learning_rate(0.01).unwrap(), MeanSquaredError::new());
    model.train_batch(&x, &y).unwrap();
    let after = model.predict(&x).unwrap();

    // each prediction depends on one weight and the bias
    for (b, a) in before.iter().zip(after.iter()) {
        assert_relative_eq!(a - b, 0.02, epsilon = 1e-4);
    }
}
