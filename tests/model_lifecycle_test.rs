use netscope::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn raw_layer_editor_input_builds_a_model() {
    let raw = vec![
        RawLayerSpec {
            kind: "dense".to_string(),
            units: 6,
            activation: Some("sigmoid".to_string()),
            input_arity: Some(vec![2]),
        },
        RawLayerSpec {
            kind: "dense".to_string(),
            units: 2,
            activation: Some("softmax".to_string()),
            input_arity: None,
        },
    ];
    let mut session = Session::new();
    session.install_model(build_from_raw(&raw).unwrap());

    let activations = session.forward_activations(&[0.5, 0.5]).unwrap();
    assert_eq!(activations.len(), 2);
    assert_eq!(activations[0].len(), 6);
    assert!(activations[0].iter().all(|&a| a > 0.0 && a < 1.0));
}

#[test]
fn validation_errors_surface_as_values() {
    let err = build(&[]).err().unwrap();
    assert!(matches!(err, ModelError::Validation { layer: 0, .. }));

    let raw = vec![RawLayerSpec {
        kind: "lstm".to_string(),
        units: 4,
        activation: None,
        input_arity: Some(vec![2]),
    }];
    let err = build_from_raw(&raw).err().unwrap();
    assert!(err.to_string().contains("lstm"), "{}", err);
}

#[test]
fn evaluation_on_a_reproducible_spiral() {
    let data = spiral_with_rng(&mut StdRng::seed_from_u64(2024));
    let model = build(&default_xor_spec()).unwrap();

    let report = evaluate(&model, &data, 0.0).unwrap();
    assert_eq!(report.rows.len(), 200);
    assert_eq!(report.confident_count(), 200);
    assert!(report.rows.iter().all(|r| r.true_class < 2 && r.predicted_class < 2));

    let none = evaluate(&model, &data, 1.01).unwrap();
    assert_eq!(none.confident_count(), 0);
}

#[test]
fn forward_activations_without_a_model_are_absent() {
    assert_eq!(run_forward_activations(None, &[1.0, 1.0]), None);
    let session = Session::new();
    assert_eq!(session.forward_activations(&[1.0, 1.0]), None);
}
