use approx::assert_abs_diff_eq;
use rustynn::ModelError;
use rustynn::neural_network::optimizer::*;
use rustynn::traits::Optimizer;

/// Runs one training step of `opt` over the given (gradient, parameter) buffers.
fn step(opt: &mut dyn Optimizer, grads: &[&[f32]], params: &mut [&mut [f32]]) {
    opt.begin_step();
    for (g, p) in grads.iter().zip(params.iter_mut()) {
        opt.update(g, p).unwrap();
    }
}

#[test]
fn test_sgd_new() {
    assert!(SGD::new(0.01).is_ok());
    assert!(SGD::new(0.0).is_err());
    assert!(SGD::new(-0.1).is_err());
    assert!(SGD::new(f32::INFINITY).is_err());
    assert!(SGD::new(f32::NAN).is_err());

    assert!(SGD::with_decay(0.1, 0.0).is_ok());
    assert!(SGD::with_decay(0.1, -0.01).is_err());
    assert!(SGD::with_decay(0.1, f32::INFINITY).is_err());

    let sgd = SGD::with_decay(0.1, 0.01).unwrap();
    assert_eq!(sgd.learning_rate(), 0.1);
    assert_eq!(sgd.decay(), 0.01);
}

#[test]
fn test_sgd_update() {
    let mut sgd = SGD::new(0.1).unwrap();
    let mut p = [1.0f32, -2.0, 0.5];
    sgd.update(&[0.5, -1.0, 0.0], &mut p).unwrap();
    assert_abs_diff_eq!(p[0], 0.95, epsilon = 1e-6);
    assert_abs_diff_eq!(p[1], -1.9, epsilon = 1e-6);
    assert_abs_diff_eq!(p[2], 0.5, epsilon = 1e-6);
}

#[test]
fn test_sgd_weight_decay() {
    let mut sgd = SGD::with_decay(0.1, 0.1).unwrap();
    let mut p = [1.0f32];
    sgd.update(&[0.5], &mut p).unwrap();
    // p - lr * (g + decay * p)
    assert_abs_diff_eq!(p[0], 0.94, epsilon = 1e-6);
}

#[test]
fn test_update_rejects_length_mismatch() {
    let mut p = [0.0f32; 3];
    let g = [0.0f32; 2];

    let mut optimizers: Vec<Box<dyn Optimizer>> = vec![
        Box::new(SGD::new(0.1).unwrap()),
        Box::new(Momentum::new(0.1, 0.9, 0.0, false).unwrap()),
        Box::new(AdaGrad::new(0.1, 1e-8, 0.0).unwrap()),
        Box::new(RMSprop::new(0.1, 0.9, 1e-8, 0.0).unwrap()),
        Box::new(Adam::new(0.1, 0.9, 0.999, 1e-8, 0.0).unwrap()),
    ];
    for opt in optimizers.iter_mut() {
        opt.begin_step();
        assert!(matches!(
            opt.update(&g, &mut p),
            Err(ModelError::DimensionMismatch(_))
        ));
    }
}

#[test]
fn test_momentum_new() {
    assert!(Momentum::new(0.01, 0.9, 0.0, false).is_ok());
    assert!(Momentum::new(0.01, 0.0, 0.0, true).is_ok());
    assert!(Momentum::new(0.01, 1.0, 0.0, false).is_err());
    assert!(Momentum::new(0.01, -0.1, 0.0, false).is_err());
    assert!(Momentum::new(0.0, 0.9, 0.0, false).is_err());
    assert!(Momentum::new(0.01, 0.9, -1.0, false).is_err());
}

#[test]
fn test_momentum_accumulates_velocity() {
    let mut opt = Momentum::new(0.1, 0.9, 0.0, false).unwrap();
    let mut p = [1.0f32];

    step(&mut opt, &[&[1.0]], &mut [&mut p]);
    assert_abs_diff_eq!(p[0], 0.9, epsilon = 1e-6);

    // v = 0.9 * 1 + 1 = 1.9
    step(&mut opt, &[&[1.0]], &mut [&mut p]);
    assert_abs_diff_eq!(p[0], 0.71, epsilon = 1e-6);
    assert_eq!(opt.velocity().len(), 1);
}

#[test]
fn test_momentum_nesterov() {
    let mut opt = Momentum::new(0.1, 0.9, 0.0, true).unwrap();
    let mut p = [1.0f32];
    step(&mut opt, &[&[1.0]], &mut [&mut p]);
    // g + momentum * v = 1 + 0.9
    assert_abs_diff_eq!(p[0], 0.81, epsilon = 1e-6);
}

#[test]
fn test_momentum_keeps_one_slot_per_buffer() {
    let mut opt = Momentum::new(0.1, 0.5, 0.0, false).unwrap();
    let mut a = [0.0f32; 2];
    let mut b = [0.0f32; 3];

    step(&mut opt, &[&[1.0, 1.0], &[2.0, 2.0, 2.0]], &mut [&mut a, &mut b]);
    step(&mut opt, &[&[1.0, 1.0], &[2.0, 2.0, 2.0]], &mut [&mut a, &mut b]);
    assert_eq!(opt.velocity().len(), 2);

    // a: 0.1 * 1 + 0.1 * 1.5; b: 0.1 * 2 + 0.1 * 3
    assert_abs_diff_eq!(a[0], -0.25, epsilon = 1e-6);
    assert_abs_diff_eq!(b[0], -0.5, epsilon = 1e-6);
}

#[test]
fn test_slot_layout_change_is_rejected() {
    let mut opt = Momentum::new(0.1, 0.9, 0.0, false).unwrap();
    let mut a = [0.0f32; 2];
    let mut b = [0.0f32; 3];

    opt.begin_step();
    opt.update(&[1.0, 1.0], &mut a).unwrap();

    opt.begin_step();
    assert!(matches!(
        opt.update(&[1.0, 1.0, 1.0], &mut b),
        Err(ModelError::DimensionMismatch(_))
    ));

    // After a reset any layout is accepted again
    opt.reset();
    opt.begin_step();
    assert!(opt.update(&[1.0, 1.0, 1.0], &mut b).is_ok());
}

#[test]
fn test_stateful_update_outside_a_step_is_rejected() {
    let mut optimizers: Vec<Box<dyn Optimizer>> = vec![
        Box::new(Momentum::new(0.1, 0.9, 0.0, false).unwrap()),
        Box::new(AdaGrad::new(0.1, 1e-8, 0.0).unwrap()),
        Box::new(RMSprop::new(0.1, 0.9, 1e-8, 0.0).unwrap()),
        Box::new(Adam::new(0.1, 0.9, 0.999, 1e-8, 0.0).unwrap()),
    ];
    for opt in optimizers.iter_mut() {
        let mut p = [1.0f32];
        assert!(matches!(
            opt.update(&[1.0], &mut p),
            Err(ModelError::ProcessingError(_))
        ));
        assert_eq!(p[0], 1.0);

        // A reset closes the step again
        step(opt.as_mut(), &[&[1.0]], &mut [&mut p]);
        opt.reset();
        assert!(matches!(
            opt.update(&[1.0], &mut p),
            Err(ModelError::ProcessingError(_))
        ));
    }
}

#[test]
fn test_extra_update_in_a_step_is_rejected() {
    let mut opt = Momentum::new(0.1, 0.9, 0.0, false).unwrap();
    let mut p = [1.0f32];

    step(&mut opt, &[&[1.0]], &mut [&mut p]);
    opt.begin_step();
    opt.update(&[1.0], &mut p).unwrap();
    assert!(matches!(
        opt.update(&[1.0], &mut p),
        Err(ModelError::ProcessingError(_))
    ));
    assert_eq!(opt.velocity().len(), 1);
}

#[test]
fn test_momentum_memory_persists_across_many_steps() {
    let mut opt = Momentum::new(0.1, 0.9, 0.0, false).unwrap();
    let mut p = [1.0f32];
    for _ in 0..1000 {
        step(&mut opt, &[&[1.0]], &mut [&mut p]);
    }
    assert_eq!(opt.velocity().len(), 1);
    // The velocity converges to 1 / (1 - 0.9), far beyond plain SGD's 1000 * 0.1
    assert!(p[0] < -900.0, "p = {}", p[0]);
}

#[test]
fn test_reset_clears_memory() {
    let mut opt = Momentum::new(0.1, 0.9, 0.0, false).unwrap();
    let mut p = [1.0f32];
    step(&mut opt, &[&[1.0]], &mut [&mut p]);
    opt.reset();

    let mut q = [1.0f32];
    step(&mut opt, &[&[1.0]], &mut [&mut q]);
    assert_abs_diff_eq!(q[0], 0.9, epsilon = 1e-6);
}

#[test]
fn test_ada_grad_new() {
    assert!(AdaGrad::new(0.01, 1e-8, 0.0).is_ok());
    assert!(AdaGrad::new(0.0, 1e-8, 0.0).is_err());
    assert!(AdaGrad::new(0.01, 0.0, 0.0).is_err());
    assert!(AdaGrad::new(0.01, -1e-8, 0.0).is_err());
    assert!(AdaGrad::new(0.01, 1e-8, -0.5).is_err());
}

#[test]
fn test_ada_grad_update() {
    let mut opt = AdaGrad::new(0.1, 1e-8, 0.0).unwrap();
    let mut p = [1.0f32, 1.0];
    step(&mut opt, &[&[2.0, -0.5]], &mut [&mut p]);
    // First step moves every parameter by lr * sign(g)
    assert_abs_diff_eq!(p[0], 0.9, epsilon = 1e-6);
    assert_abs_diff_eq!(p[1], 1.1, epsilon = 1e-6);

    // Second step: acc = 8, step = 0.1 * 2 / sqrt(8)
    step(&mut opt, &[&[2.0, -0.5]], &mut [&mut p]);
    assert_abs_diff_eq!(p[0], 0.9 - 0.2 / 8.0f32.sqrt(), epsilon = 1e-6);
}

#[test]
fn test_rms_prop_new() {
    assert!(RMSprop::new(0.001, 0.9, 1e-8, 0.0).is_ok());
    assert!(RMSprop::new(0.001, 1.0, 1e-8, 0.0).is_err());
    assert!(RMSprop::new(0.001, -0.1, 1e-8, 0.0).is_err());
    assert!(RMSprop::new(0.001, 0.9, 0.0, 0.0).is_err());
    assert!(RMSprop::new(-0.001, 0.9, 1e-8, 0.0).is_err());
}

#[test]
fn test_rms_prop_update() {
    let mut opt = RMSprop::new(0.1, 0.9, 1e-8, 0.0).unwrap();
    let mut p = [1.0f32];
    step(&mut opt, &[&[1.0]], &mut [&mut p]);
    // s = 0.1, step = 0.1 / sqrt(0.1)
    assert_abs_diff_eq!(p[0], 1.0 - 0.1 / 0.1f32.sqrt(), epsilon = 1e-5);
}

#[test]
fn test_adam_new() {
    assert!(Adam::new(0.001, 0.9, 0.999, 1e-8, 0.0).is_ok());

    // Invalid learning rate
    assert!(Adam::new(-0.001, 0.9, 0.999, 1e-8, 0.0).is_err());
    assert!(Adam::new(0.0, 0.9, 0.999, 1e-8, 0.0).is_err());
    assert!(Adam::new(f32::INFINITY, 0.9, 0.999, 1e-8, 0.0).is_err());

    // Invalid betas
    assert!(Adam::new(0.001, -0.1, 0.999, 1e-8, 0.0).is_err());
    assert!(Adam::new(0.001, 1.1, 0.999, 1e-8, 0.0).is_err());
    assert!(Adam::new(0.001, 0.9, -0.999, 1e-8, 0.0).is_err());
    assert!(Adam::new(0.001, 0.9, 1.0, 1e-8, 0.0).is_err());

    // Invalid epsilon
    assert!(Adam::new(0.001, 0.9, 0.999, -1e-8, 0.0).is_err());
    assert!(Adam::new(0.001, 0.9, 0.999, 0.0, 0.0).is_err());
    assert!(Adam::new(0.001, 0.9, 0.999, f32::INFINITY, 0.0).is_err());

    // Invalid decay
    assert!(Adam::new(0.001, 0.9, 0.999, 1e-8, -0.1).is_err());
}

#[test]
fn test_adam_first_step_is_bias_corrected() {
    let mut opt = Adam::new(0.01, 0.9, 0.999, 1e-8, 0.0).unwrap();
    let mut w = [1.0f32, 1.0];
    let mut b = [0.0f32];

    step(&mut opt, &[&[0.5, -3.0], &[2.0]], &mut [&mut w, &mut b]);
    assert_eq!(opt.step_count(), 1);

    // m_hat = g and v_hat = g², so every parameter moves by lr * sign(g)
    assert_abs_diff_eq!(w[0], 0.99, epsilon = 1e-5);
    assert_abs_diff_eq!(w[1], 1.01, epsilon = 1e-5);
    assert_abs_diff_eq!(b[0], -0.01, epsilon = 1e-5);

    opt.reset();
    assert_eq!(opt.step_count(), 0);
}

#[test]
fn test_adam_step_counter_advances_per_step() {
    let mut opt = Adam::new(0.01, 0.9, 0.999, 1e-8, 0.0).unwrap();
    let mut w = [1.0f32];
    let mut b = [1.0f32];
    for _ in 0..3 {
        step(&mut opt, &[&[1.0], &[1.0]], &mut [&mut w, &mut b]);
    }
    assert_eq!(opt.step_count(), 3);
    // A constant gradient keeps the corrected ratio at 1
    assert_abs_diff_eq!(w[0], 0.97, epsilon = 1e-5);
    assert_abs_diff_eq!(b[0], 0.97, epsilon = 1e-5);
}
