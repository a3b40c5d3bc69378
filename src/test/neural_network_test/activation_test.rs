use super::*;

#[test]
fn relu_zeroes_negative_inputs() {
    let z = array![[-1.0, 0.0, 2.5]];
    let a = Activation::apply_activation(&z, &Activation::ReLU);
    assert_eq!(a, array![[0.0, 0.0, 2.5]]);
}

#[test]
fn sigmoid_and_tanh_at_zero() {
    let z = array![[0.0]];
    assert_relative_eq!(
        Activation::apply_activation(&z, &Activation::Sigmoid)[[0, 0]],
        0.5
    );
    assert_relative_eq!(Activation::apply_activation(&z, &Activation::Tanh)[[0, 0]], 0.0);
}

#[test]
fn sigmoid_does_not_overflow_on_huge_inputs() {
    let z = array![[1.0e6, -1.0e6]];
    let a = Activation::apply_activation(&z, &Activation::Sigmoid);
    assert!(a.iter().all(|x| x.is_finite()));
    assert_relative_eq!(a[[0, 0]], 1.0);
}

#[test]
fn softmax_rows_sum_to_one() {
    // 3 rows takes the sequential path, 20 rows the parallel one
    for rows in [3, 20] {
        let z = Array2::from_shape_fn((rows, 4), |(i, j)| (i * 4 + j) as f32 * 0.3 - 2.0);
        let a = Activation::apply_activation(&z, &Activation::Softmax);
        for row in a.rows() {
            assert_relative_eq!(row.sum(), 1.0, epsilon = 1e-5);
            assert!(row.iter().all(|&p| p > 0.0));
        }
    }
}

#[test]
fn softmax_is_shift_invariant() {
    let a = Activation::apply_activation(&array![[1.0, 2.0]], &Activation::Softmax);
    let b = Activation::apply_activation(&array![[101.0, 102.0]], &Activation::Softmax);
    assert_relative_eq!(a[[0, 1]], b[[0, 1]], epsilon = 1e-6);
}

#[test]
fn derivatives_from_activated_output() {
    let a = array![[0.5, -0.5]];
    assert_eq!(
        Activation::activation_derivative(&a, &Activation::Tanh),
        array![[0.75, 0.75]]
    );
    assert_eq!(
        Activation::activation_derivative(&a, &Activation::ReLU),
        array![[1.0, 0.0]]
    );
    assert_eq!(
        Activation::activation_derivative(&a, &Activation::Linear),
        array![[1.0, 1.0]]
    );
}

#[test]
fn softmax_backward_projects_upstream_gradient() {
    let a = array![[0.5, 0.5]];
    let upstream = array![[1.0, 0.0]];
    let grad = Activation::softmax_backward(&a, &upstream);
    assert_relative_eq!(grad[[0, 0]], 0.25);
    assert_relative_eq!(grad[[0, 1]], -0.25);
}

#[test]
fn activation_names_parse_back() {
    for activation in [
        Activation::ReLU,
        Activation::Tanh,
        Activation::Sigmoid,
        Activation::Softmax,
        Activation::Linear,
    ] {
        assert_eq!(activation.to_string().parse::<Activation>(), Ok(activation));
    }
    assert_eq!("ReLU".parse::<Activation>(), Ok(Activation::ReLU));
    assert!("gelu".parse::<Activation>().is_err());
}
