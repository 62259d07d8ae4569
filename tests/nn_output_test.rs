use approx::assert_abs_diff_eq;
use ndarray::array;
use rustynn::prelude::*;

#[test]
fn test_regression_mse_loss_and_gradient() {
    let mut mse = RegressionMSE::new();
    let p = array![[1.0f32, 2.0], [3.0, 4.0]];
    let t = array![[0.0f32, 2.0], [1.0, 5.0]];
    mse.evaluate(&p, &t).unwrap();

    // 0.5 * (1 + 0 + 4 + 1) / 2
    assert_abs_diff_eq!(mse.loss().unwrap(), 1.5, epsilon = 1e-6);
    assert_eq!(mse.backprop_data(), &array![[1.0f32, 0.0], [2.0, -1.0]]);
    assert_eq!(mse.output_type(), "RegressionMSE");
}

#[test]
fn test_regression_mse_shape_mismatch() {
    let mut mse = RegressionMSE::new();
    let p = array![[1.0f32, 2.0]];
    let t = array![[1.0f32, 2.0, 3.0]];
    assert!(matches!(
        mse.evaluate(&p, &t),
        Err(ModelError::DimensionMismatch(_))
    ));
    let t = array![[1.0f32, 2.0], [3.0, 4.0]];
    assert!(matches!(
        mse.evaluate(&p, &t),
        Err(ModelError::DimensionMismatch(_))
    ));
}

#[test]
fn test_regression_mse_rejects_labels() {
    let mut mse = RegressionMSE::new();
    let labels: Labels = array![0, 1];
    assert!(matches!(
        mse.check_label_data(&labels),
        Err(ModelError::Unsupported(_))
    ));
    assert!(matches!(
        mse.evaluate_labels(&array![[0.5f32, 0.5]], &labels),
        Err(ModelError::Unsupported(_))
    ));
    assert!(mse.check_target_data(&array![[0.3f32, 7.0]]).is_ok());
}

#[test]
fn test_loss_before_evaluate_fails() {
    assert!(matches!(
        RegressionMSE::new().loss(),
        Err(ModelError::ProcessingError(_))
    ));
    assert!(matches!(
        BinaryClassEntropy::new().loss(),
        Err(ModelError::ProcessingError(_))
    ));
    assert!(matches!(
        MultiClassEntropy::new().loss(),
        Err(ModelError::ProcessingError(_))
    ));
}

#[test]
fn test_binary_class_entropy_with_labels() {
    let mut out = BinaryClassEntropy::new();
    let p = array![[0.8f32, 0.4]];
    let labels: Labels = array![1, 0];
    out.check_label_data(&labels).unwrap();
    out.evaluate_labels(&p, &labels).unwrap();

    let expected = -(0.8f32.ln() + 0.6f32.ln()) / 2.0;
    assert_abs_diff_eq!(out.loss().unwrap(), expected, epsilon = 1e-6);
    assert_abs_diff_eq!(out.backprop_data()[[0, 0]], -1.0 / 0.8, epsilon = 1e-5);
    assert_abs_diff_eq!(out.backprop_data()[[0, 1]], 1.0 / 0.6, epsilon = 1e-5);
    assert_eq!(out.output_type(), "BinaryClassEntropy");
}

#[test]
fn test_binary_class_entropy_matrix_matches_labels() {
    let p = array![[0.9f32, 0.2, 0.6]];

    let mut from_labels = BinaryClassEntropy::new();
    from_labels.evaluate_labels(&p, &array![1, 0, 1]).unwrap();

    let mut from_matrix = BinaryClassEntropy::new();
    let t = array![[1.0f32, 0.0, 1.0]];
    from_matrix.check_target_data(&t).unwrap();
    from_matrix.evaluate(&p, &t).unwrap();

    assert_eq!(from_labels.loss().unwrap(), from_matrix.loss().unwrap());
    assert_eq!(from_labels.backprop_data(), from_matrix.backprop_data());
}

#[test]
fn test_binary_class_entropy_validation() {
    let mut out = BinaryClassEntropy::new();
    assert!(matches!(
        out.check_target_data(&array![[0.0f32, 0.5]]),
        Err(ModelError::InputValidationError(_))
    ));
    assert!(matches!(
        out.check_label_data(&array![0, 2]),
        Err(ModelError::InputValidationError(_))
    ));
    assert!(matches!(
        out.evaluate_labels(&array![[0.5f32], [0.5]], &array![1]),
        Err(ModelError::DimensionMismatch(_))
    ));
    assert!(matches!(
        out.evaluate_labels(&array![[0.5f32, 0.5]], &array![1]),
        Err(ModelError::DimensionMismatch(_))
    ));
}

#[test]
fn test_binary_class_entropy_evaluate_rejects_soft_targets() {
    let mut out = BinaryClassEntropy::new();
    let p = array![[0.6f32, 0.4]];
    assert!(matches!(
        out.evaluate(&p, &array![[0.7f32, 0.0]]),
        Err(ModelError::InputValidationError(_))
    ));
    assert!(matches!(
        out.evaluate_labels(&p, &array![1, -1]),
        Err(ModelError::InputValidationError(_))
    ));
    assert!(out.loss().is_err());

    out.evaluate(&p, &array![[1.0f32, 0.0]]).unwrap();
    assert_abs_diff_eq!(out.loss().unwrap(), -0.6f32.ln(), epsilon = 1e-6);
}

#[test]
fn test_multi_class_entropy_with_labels() {
    let mut out = MultiClassEntropy::new();
    let p = array![[0.7f32, 0.2], [0.3, 0.8]];
    let labels: Labels = array![0, 1];
    out.check_label_data(&labels).unwrap();
    out.evaluate_labels(&p, &labels).unwrap();

    let expected = -(0.7f32.ln() + 0.8f32.ln()) / 2.0;
    assert_abs_diff_eq!(out.loss().unwrap(), expected, epsilon = 1e-6);

    let d = out.backprop_data();
    assert_abs_diff_eq!(d[[0, 0]], -1.0 / 0.7, epsilon = 1e-5);
    assert_eq!(d[[1, 0]], 0.0);
    assert_eq!(d[[0, 1]], 0.0);
    assert_abs_diff_eq!(d[[1, 1]], -1.0 / 0.8, epsilon = 1e-5);
    assert_eq!(out.output_type(), "MultiClassEntropy");
}

#[test]
fn test_multi_class_entropy_one_hot_matches_labels() {
    let p = array![[0.5f32, 0.1, 0.3], [0.25, 0.6, 0.3], [0.25, 0.3, 0.4]];

    let mut from_labels = MultiClassEntropy::new();
    from_labels.evaluate_labels(&p, &array![0, 1, 2]).unwrap();

    let mut from_matrix = MultiClassEntropy::new();
    let t = array![[1.0f32, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
    from_matrix.evaluate(&p, &t).unwrap();

    assert_abs_diff_eq!(
        from_labels.loss().unwrap(),
        from_matrix.loss().unwrap(),
        epsilon = 1e-6
    );
    assert_eq!(from_labels.backprop_data(), from_matrix.backprop_data());
}

#[test]
fn test_multi_class_entropy_validation() {
    let mut out = MultiClassEntropy::new();
    assert!(matches!(
        out.check_label_data(&array![0, -1]),
        Err(ModelError::InputValidationError(_))
    ));
    assert!(matches!(
        out.check_target_data(&array![[0.5f32, 1.0]]),
        Err(ModelError::InputValidationError(_))
    ));
    assert!(matches!(
        out.evaluate_labels(&array![[0.5f32, 0.5], [0.5, 0.5]], &array![0, 2]),
        Err(ModelError::InputValidationError(_))
    ));
    assert!(matches!(
        out.evaluate(&array![[0.5f32, 0.5]], &array![[1.0f32], [0.0]]),
        Err(ModelError::DimensionMismatch(_))
    ));
}
