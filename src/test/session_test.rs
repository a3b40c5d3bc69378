use super::*;
use crate::session::*;
use crate::training::TrainConfig;

fn three_layer_spec() -> ModelSpec {
    vec![
        LayerSpec::dense(8, Activation::ReLU).with_input_arity(vec![2]),
        LayerSpec::dense(4, Activation::Tanh),
        LayerSpec::dense(2, Activation::Softmax),
    ]
}

#[test]
fn operations_without_a_model() {
    let mut session = Session::new();
    let data = load_xor();

    assert!(!session.has_model());
    assert_eq!(session.forward_activations(&[0.0, 1.0]), None);
    assert!(matches!(session.evaluate(&data, 0.5), Err(ModelError::NoModel)));
    assert!(matches!(
        session.run_all(&data.test_inputs),
        Err(ModelError::NoModel)
    ));
    assert!(session.layer_summaries().is_empty());

    let result = block_on(session.train(&data, &TrainConfig::default(), None));
    assert!(matches!(result, Err(ModelError::NoModel)));
}

#[test]
fn build_replaces_the_current_model() {
    let mut session = Session::new();
    session.build(&default_xor_spec()).unwrap();
    assert_eq!(session.model().map(Sequential::len), Some(2));

    let model = session.build(&three_layer_spec()).unwrap();
    assert_eq!(model.len(), 3);
    assert_eq!(session.model().map(Sequential::len), Some(3));
}

#[test]
fn failed_build_keeps_the_current_model() {
    let mut session = Session::new();
    session.build(&default_xor_spec()).unwrap();

    let result = session.build(&[LayerSpec::dense(3, Activation::ReLU)]);
    assert!(matches!(result, Err(ModelError::Validation { layer: 0, .. })));
    assert_eq!(session.model().map(Sequential::len), Some(2));
}

#[test]
fn install_and_take_model() {
    let mut session = Session::new();
    session.install_model(build(&three_layer_spec()).unwrap());
    assert!(session.has_model());

    let taken = session.take_model().unwrap();
    assert_eq!(taken.len(), 3);
    assert!(!session.has_model());
    assert!(session.take_model().is_none());
}

#[test]
fn layer_summaries_describe_each_layer() {
    let mut session = Session::new();
    session.build(&default_xor_spec()).unwrap();

    let summaries = session.layer_summaries();
    assert_eq!(
        summaries,
        vec![
            LayerSummary {
                index: 0,
                kind: "Dense".to_string(),
                units: 4,
                activation: Some("tanh".to_string()),
                params: 12,
            },
            LayerSummary {
                index: 1,
                kind: "Dense".to_string(),
                units: 2,
                activation: Some("softmax".to_string()),
                params: 10,
            },
        ]
    );
}

#[test]
fn run_all_feeds_every_row() {
    let mut session = Session::new();
    session.build(&default_xor_spec()).unwrap();
    let data = load_xor();

    let results = session.run_all(&data.test_inputs).unwrap();
    assert_eq!(results.len(), 4);
    for (result, row) in results.iter().zip(data.test_inputs.rows()) {
        assert_eq!(result.input, row.to_vec());
        assert_eq!(result.activations.len(), 2);
        assert_eq!(Some(&result.probabilities), result.activations.last());
        assert_relative_eq!(result.probabilities.iter().sum::<f32>(), 1.0, epsilon = 1e-5);
    }

    assert!(session.run_all(&Array2::zeros((1, 3))).is_err());
}

#[tokio::test]
async fn train_then_evaluate_through_the_session() {
    let mut session = Session::new();
    session.build(&default_xor_spec()).unwrap();
    let data = load_xor();
    let config = TrainConfig {
        epochs: 5,
        ..TrainConfig::default()
    };

    let report = session.train(&data, &config, None).await.unwrap();
    assert_eq!(report.metrics.len(), 5);
    assert_eq!(session.metrics().len(), 5);

    let eval = session.evaluate(&data, 0.5).unwrap();
    assert!(eval.accuracy.is_some());
    assert_eq!(eval.rows.len(), 4);
}

#[tokio::test]
async fn session_stop_handle_reaches_the_trainer() {
    let mut session = Session::new();
    session.build(&default_xor_spec()).unwrap();
    let handle = session.stop_handle();
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let data = load_xor();
    let config = TrainConfig {
        epochs: 200,
        ..TrainConfig::default()
    };

    let (result, _) = tokio::join!(session.train(&data, &config, Some(&tx)), async {
        rx.recv().await;
        handle.stop();
    });
    let report = result.unwrap();
    assert!(report.stopped);
    assert!(report.metrics.len() < 200);
}
