use super::*;

fn xor_model() -> Sequential {
    let mut model = Sequential::new();
    model
        .add(Dense::new(2, 4, Activation::Tanh).unwrap())
        .add(Dense::new(4, 2, Activation::Softmax).unwrap());
    model
}

#[test]
fn empty_model_reports_no_dims() {
    let model = Sequential::new();
    assert!(model.is_empty());
    assert_eq!(model.input_dim(), None);
    assert_eq!(model.output_dim(), None);
    assert_eq!(model.param_count(), 0);
}

#[test]
fn layers_are_kept_in_order() {
    let model = xor_model();
    assert_eq!(model.len(), 2);
    assert_eq!(model.input_dim(), Some(2));
    assert_eq!(model.output_dim(), Some(2));
    assert_eq!(model.param_count(), 2 * 4 + 4 + 4 * 2 + 2);

    let units: Vec<usize> = model.layers().map(|layer| layer.output_dim()).collect();
    assert_eq!(units, vec![4, 2]);
}

#[test]
fn training_requires_compile() {
    let mut model = xor_model();
    let x = Array::ones((4, 2)).into_dyn();
    let y = Array::ones((4, 2)).into_dyn();
    assert!(!model.is_compiled());
    assert!(matches!(
        model.train_batch(&x, &y),
        Err(ModelError::InputValidationError(_))
    ));
}

#[test]
fn batch_size_mismatch_is_rejected() {
    let mut model = xor_model();
    model.compile(SGD::new(0.1).unwrap(), CategoricalCrossEntropy::new());
    let x = Array::ones((4, 2)).into_dyn();
    let y = Array::ones((3, 2)).into_dyn();
    assert!(matches!(
        model.train_batch(&x, &y),
        Err(ModelError::InputValidationError(_))
    ));
}

#[test]
fn predict_is_read_only() {
    let model = xor_model();
    let x = array![[0.0, 1.0], [1.0, 1.0]].into_dyn();
    let first = model.predict(&x).unwrap();
    let second = model.predict(&x).unwrap();
    assert_eq!(first, second);
    for row in first.rows() {
        assert_relative_eq!(row.sum(), 1.0, epsilon = 1e-5);
    }
}

#[test]
fn evaluate_loss_reports_accuracy_only_when_tracked() {
    let mut model = xor_model();
    let data = load_xor();
    let x = data.test_inputs.clone().into_dyn();
    let y = data.test_labels.clone().into_dyn();

    let (loss, accuracy) = model.evaluate_loss(&x, &y).unwrap();
    assert!(loss.is_finite());
    assert_eq!(accuracy, None);

    model.compile(Adam::with_learning_rate(0.03).unwrap(), CategoricalCrossEntropy::new());
    let (_, accuracy) = model.evaluate_loss(&x, &y).unwrap();
    let accuracy = accuracy.unwrap();
    assert!((0.0..=1.0).contains(&accuracy));
}

#[test]
fn train_batch_counts_correct_predictions() {
    let mut model = Sequential::new();
    model.add(fixed_dense(
        array![[1.0, 0.0], [0.0, 1.0]],
        array![[0.0, 0.0]],
        Activation::Softmax,
    ));
    model.compile(SGD::new(0.01).unwrap(), CategoricalCrossEntropy::new());

    // argmax of the input picks the class; the last row is labelled the other way
    let x = array![[2.0, 0.0], [0.0, 2.0], [3.0, 0.0]].into_dyn();
    let y = array![[1.0, 0.0], [0.0, 1.0], [0.0, 1.0]].into_dyn();
    let outcome = model.train_batch(&x, &y).unwrap();
    assert_eq!(outcome.size, 3);
    assert_eq!(outcome.correct, 2);
}
