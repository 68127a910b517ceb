//! End-to-end scenarios pinning concrete numbers and recovery behavior.

use linarm::{
    compute_ucb, initialize_model, update_model, update_model_incremental, validate_model,
    ModelError,
};

const SQRT_HALF: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// One full select-observe-update cycle at d=2 with hand-checked numbers.
#[test]
fn two_dim_walkthrough_matches_hand_computation() {
    let fresh = initialize_model(2, 1.0).unwrap();
    assert_eq!(fresh.matrix_a, vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
    assert_eq!(fresh.vector_b, vec![0.0, 0.0]);

    let x = [1.0, 0.0];

    // Prior-only score: theta = 0, width = 1.
    let s0 = compute_ucb(&fresh.matrix_a, &fresh.vector_b, &x, 0.5).unwrap();
    assert_eq!(s0.theta, vec![0.0, 0.0]);
    assert_eq!(s0.expected_reward, 0.0);
    assert!((s0.confidence_width - 1.0).abs() < 1e-12);
    assert!((s0.ucb - 0.5).abs() < 1e-12);

    // Observe reward 1.0 along x.
    let m1 = update_model(&fresh.matrix_a, &fresh.vector_b, &x, 1.0).unwrap();
    assert_eq!(m1.matrix_a, vec![vec![2.0, 0.0], vec![0.0, 1.0]]);
    assert_eq!(m1.vector_b, vec![1.0, 0.0]);

    // Re-score: evidence halves the variance along x and lifts the mean.
    let s1 = compute_ucb(&m1.matrix_a, &m1.vector_b, &x, 0.5).unwrap();
    assert!((s1.theta[0] - 0.5).abs() < 1e-12);
    assert!(s1.theta[1].abs() < 1e-12);
    assert!((s1.expected_reward - 0.5).abs() < 1e-12);
    assert!((s1.confidence_width - SQRT_HALF).abs() < 1e-12);
    assert!((s1.ucb - (0.5 + 0.5 * SQRT_HALF)).abs() < 1e-12);
}

#[test]
fn updated_models_keep_validating_healthy() {
    let fresh = initialize_model(4, 1.0).unwrap();
    let mut a = fresh.matrix_a;
    let mut b = fresh.vector_b;

    for k in 0..12u32 {
        let x: Vec<f64> = (0..4)
            .map(|i| ((i as f64 + 1.0) * (k as f64 + 0.3)).sin())
            .collect();
        let next = update_model(&a, &b, &x, 0.6).unwrap();
        a = next.matrix_a;
        b = next.vector_b;
    }

    let d = validate_model(&a, &b).unwrap();
    assert!(d.is_healthy, "diagnostics: {d:?}");
    assert!(d.is_symmetric);
    assert!(d.is_positive_definite);
}

#[test]
fn singular_matrix_scores_via_perturbation_not_failure() {
    // Rank-1 accumulator with no regularization prior: exactly singular.
    let a = vec![vec![1.0, 1.0], vec![1.0, 1.0]];
    let b = vec![0.5, 0.5];

    let s = compute_ucb(&a, &b, &[1.0, 0.0], 0.5).unwrap();
    assert!(s.perturbed);
    assert!(s.ucb.is_finite());

    // The same matrix updates fine too: A + x x^T may still be singular, and
    // the ridge retry carries it.
    let m = update_model(&a, &b, &[1.0, 1.0], 1.0).unwrap();
    assert!(m.matrix_a_inverse.iter().flatten().all(|v| v.is_finite()));
    assert_eq!(m.vector_b, vec![1.5, 1.5]);
}

#[test]
fn validator_flags_the_same_matrix_the_scorer_tolerates() {
    let a = vec![vec![1.0, 1.0], vec![1.0, 1.0]];
    let d = validate_model(&a, &[0.0, 0.0]).unwrap();
    assert!(!d.is_healthy);
    assert!(d.condition_number.is_infinite());
    assert_eq!(d.recommendation, "Consider resetting model");
}

#[test]
fn nan_poisoned_model_is_reported_as_data() {
    let a = vec![vec![1.0, 0.0], vec![0.0, f64::NAN]];
    let d = validate_model(&a, &[0.0, 0.0]).unwrap();
    assert!(d.has_nan);
    assert!(!d.is_healthy);

    let b = vec![f64::NEG_INFINITY, 0.0];
    let d = validate_model(&[vec![1.0, 0.0], vec![0.0, 1.0]], &b).unwrap();
    assert!(d.has_inf);
    assert!(!d.is_healthy);
}

#[test]
fn shape_errors_name_both_sides_of_the_conflict() {
    let err = compute_ucb(
        &[vec![1.0, 0.0], vec![0.0, 1.0]],
        &[0.0, 0.0],
        &[1.0, 0.0, 0.0],
        0.5,
    )
    .unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("context"), "{msg}");
    assert!(msg.contains('2') && msg.contains('3'), "{msg}");

    let err = validate_model(&[vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0]], &[0.0, 0.0]).unwrap_err();
    assert_eq!(err, ModelError::NonSquare { rows: 2, cols: 3 });
}

/// The O(d^2) fast path tracks the exact path through a longer walk at d=16.
#[test]
fn incremental_fast_path_tracks_exact_inversion() {
    let fresh = initialize_model(16, 1.0).unwrap();
    let mut exact_a = fresh.matrix_a.clone();
    let mut exact_b = fresh.vector_b.clone();
    let mut fast_a = fresh.matrix_a;
    let mut fast_inv = fresh.matrix_a_inverse;
    let mut fast_b = fresh.vector_b;

    for k in 0..20u32 {
        let x: Vec<f64> = (0..16)
            .map(|i| (((i as f64) * 0.61 + (k as f64) * 1.7).cos()) * 0.8)
            .collect();
        let r = 0.5 + 0.5 * ((k as f64) * 0.9).sin().abs();

        let exact = update_model(&exact_a, &exact_b, &x, r).unwrap();
        let fast = update_model_incremental(&fast_a, &fast_inv, &fast_b, &x, r).unwrap();

        assert_eq!(exact.matrix_a, fast.matrix_a);
        assert_eq!(exact.vector_b, fast.vector_b);
        for i in 0..16 {
            for j in 0..16 {
                assert!(
                    (exact.matrix_a_inverse[i][j] - fast.matrix_a_inverse[i][j]).abs() < 1e-8,
                    "inverse diverged at step {k}, entry ({i},{j})"
                );
            }
        }

        exact_a = exact.matrix_a;
        exact_b = exact.vector_b;
        fast_a = fast.matrix_a;
        fast_inv = fast.matrix_a_inverse;
        fast_b = fast.vector_b;
    }
}
