use super::*;
use crate::introspection::*;

fn two_layer_fixed_model() -> Sequential {
    let mut model = Sequential::new();
    model
        .add(fixed_dense(
            array![[1.0, 0.0], [0.0, 1.0]],
            array![[1.0, -1.0]],
            Activation::Linear,
        ))
        .add(fixed_dense(array![[1.0], [1.0]], array![[0.0]], Activation::ReLU));
    model
}

#[test]
fn captures_every_layer_output() {
    let model = two_layer_fixed_model();
    let activations = try_forward_activations(&model, &[2.0, 3.0]).unwrap();
    assert_eq!(activations, vec![vec![3.0, 2.0], vec![5.0]]);
}

#[test]
fn one_vector_per_layer_ending_at_output_arity() {
    let spec = vec![
        LayerSpec::dense(5, Activation::ReLU).with_input_arity(vec![2]),
        LayerSpec::dense(3, Activation::Sigmoid),
        LayerSpec::dense(4, Activation::Softmax),
    ];
    let model = build(&spec).unwrap();
    let activations = run_forward_activations(Some(&model), &[0.3, -0.7]).unwrap();

    let lengths: Vec<usize> = activations.iter().map(Vec::len).collect();
    assert_eq!(lengths, vec![5, 3, 4]);
    assert_relative_eq!(activations[2].iter().sum::<f32>(), 1.0, epsilon = 1e-5);
}

#[test]
fn no_model_is_an_absent_result() {
    assert_eq!(run_forward_activations(None, &[0.0, 1.0]), None);
}

#[test]
fn wrong_input_length_is_reported() {
    let model = build(&default_xor_spec()).unwrap();
    assert!(matches!(
        try_forward_activations(&model, &[1.0, 2.0, 3.0]),
        Err(ModelError::Shape(_))
    ));
    assert_eq!(run_forward_activations(Some(&model), &[1.0]), None);
}

#[test]
fn empty_model_is_reported() {
    let model = Sequential::new();
    assert!(matches!(
        try_forward_activations(&model, &[]),
        Err(ModelError::Shape(_))
    ));
}

#[test]
fn forward_pass_leaves_the_model_untouched() {
    let model = build(&default_xor_spec()).unwrap();
    let x = array![[1.0, 0.0]].into_dyn();
    let before = model.predict(&x).unwrap();
    try_forward_activations(&model, &[1.0, 0.0]).unwrap();
    assert_eq!(model.predict(&x).unwrap(), before);
}
