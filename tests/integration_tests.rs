//! End-to-end checks of the lab engine through its public API.

use approx::assert_abs_diff_eq;
use qubit_lab::algorithms::{
    grover_steps, iteration_count, sample_bell_pairs, simulate_bb84, BellStatistics, GroverRun,
    SearchSize,
};
use qubit_lab::core::measurement::{measure, sample_many};
use qubit_lab::core::{
    apply_gate, project_to_screen, project_to_sphere, BlochVector, Complex, Gate, LabSession,
    MeasurementHistory, Outcome, ProjectionConfig, QubitState, ScriptedRandom, SeededRandom,
    KEY_STATES,
};
use qubit_lab::{LabConfig, LabError};
use std::f64::consts::{FRAC_1_SQRT_2, PI};

const EPS: f64 = 1e-9;

fn assert_state_eq(a: &QubitState, b: &QubitState) {
    assert_abs_diff_eq!(a.amp0.re, b.amp0.re, epsilon = EPS);
    assert_abs_diff_eq!(a.amp0.im, b.amp0.im, epsilon = EPS);
    assert_abs_diff_eq!(a.amp1.re, b.amp1.re, epsilon = EPS);
    assert_abs_diff_eq!(a.amp1.im, b.amp1.im, epsilon = EPS);
}

// ── Normalization ─────────────────────────────────────────────────────────

#[test]
fn normalization_holds_for_long_gate_sequences() {
    let mut lab = LabSession::with_seed(3);
    for i in 0..300 {
        lab.apply(Gate::ALL[(i * 7 + i / 5) % Gate::ALL.len()]);
        let (p0, p1) = lab.probabilities();
        assert_abs_diff_eq!(p0 + p1, 1.0, epsilon = EPS);
    }
    assert_eq!(lab.gates().sequence().len(), 300);
    for state in lab.gates().states() {
        assert!(state.is_normalized(EPS));
    }
}

// ── Angle round-trip ──────────────────────────────────────────────────────

#[test]
fn states_from_angles() {
    assert_state_eq(&QubitState::from_angles(0.0, 0.0), &QubitState::zero());
    assert_state_eq(&QubitState::from_angles(PI, 0.0), &QubitState::one());
    assert_state_eq(
        &QubitState::from_angles(PI / 2.0, 0.0),
        &QubitState::new(Complex::real(FRAC_1_SQRT_2), Complex::real(FRAC_1_SQRT_2)),
    );
}

#[test]
fn explicit_amplitudes_are_normalized() {
    let state = QubitState::new(Complex::real(1.0), Complex::real(1.0));
    let (p0, p1) = state.probabilities();
    assert_abs_diff_eq!(p0 + p1, 1.0, epsilon = EPS);

    let (zeros, ones) = sample_many(&state, 1_000, &mut SeededRandom::new(1));
    assert!(zeros > 400 && ones > 400, "zeros={zeros} ones={ones}");
}

#[test]
fn key_states_round_trip_through_bloch_vector() {
    for k in KEY_STATES.iter() {
        let from_state = BlochVector::from_state(&k.state());
        let from_angles = project_to_sphere(k.theta, k.phi);
        assert!(
            from_state.approx_eq(&from_angles, 1e-9),
            "{}: {:?} vs {:?}",
            k.label,
            from_state,
            from_angles
        );
        assert_abs_diff_eq!(from_state.magnitude(), 1.0, epsilon = EPS);
    }
}

#[test]
fn screen_projection_uses_configured_radius() {
    let half = ProjectionConfig {
        sphere_radius: 55.0,
        ..Default::default()
    };
    let north = project_to_screen(&project_to_sphere(0.0, 0.0), &half);
    assert_abs_diff_eq!(north.x, 0.0, epsilon = EPS);
    assert_abs_diff_eq!(north.y, -44.0, epsilon = EPS);
}

// ── Involution ────────────────────────────────────────────────────────────

#[test]
fn x_and_h_are_self_inverse() {
    let start = QubitState::from_angles(1.1, 0.4);
    for gate in [Gate::X, Gate::H] {
        let twice = apply_gate(gate, &apply_gate(gate, &start));
        assert_state_eq(&twice, &start);
    }
}

#[test]
fn undo_restores_previous_state() {
    let mut lab = LabSession::with_seed(0);
    lab.h().t();
    let before = *lab.state();
    lab.s();
    assert_eq!(lab.undo(), Some(Gate::S));
    assert_state_eq(lab.state(), &before);
    assert_eq!(lab.gates().sequence_label(), "H → T");
}

// ── Measurement statistics ────────────────────────────────────────────────

#[test]
fn measurement_frequency_tracks_probability() {
    // cos²(π/3) = 0.25
    let state = QubitState::from_angles(2.0 * PI / 3.0, 0.0);
    assert_abs_diff_eq!(state.probabilities().0, 0.25, epsilon = EPS);

    let mut rng = SeededRandom::new(2024);
    let (zeros, ones) = sample_many(&state, 10_000, &mut rng);
    assert_eq!(zeros + ones, 10_000);
    assert_abs_diff_eq!(zeros as f64 / 10_000.0, 0.25, epsilon = 0.02);
}

#[test]
fn measurement_threshold_is_p0() {
    let state = QubitState::from_angles(2.0 * PI / 3.0, 0.0);
    let mut rng = ScriptedRandom::new(vec![0.0, 0.2499, 0.2501, 0.99]);
    let got: Vec<Outcome> = (0..4).map(|_| measure(&state, &mut rng)).collect();
    assert_eq!(got, vec![Outcome::Zero, Outcome::Zero, Outcome::One, Outcome::One]);
}

#[test]
fn basis_states_measure_deterministically() {
    let mut rng = SeededRandom::new(11);
    assert_eq!(sample_many(&QubitState::zero(), 500, &mut rng), (500, 0));
    assert_eq!(sample_many(&QubitState::one(), 500, &mut rng), (0, 500));
}

// ── History bound ─────────────────────────────────────────────────────────

#[test]
fn history_keeps_most_recent_twenty() {
    let mut history = MeasurementHistory::default();
    let drawn: Vec<Outcome> = (0..25)
        .map(|i| if i % 3 == 0 { Outcome::One } else { Outcome::Zero })
        .collect();
    for &o in &drawn {
        history.record(o);
    }
    assert_eq!(history.len(), 20);
    assert_eq!(history.outcomes().collect::<Vec<_>>(), drawn[5..].to_vec());
    assert_eq!(history.total(), 25);
}

#[test]
fn session_history_bounded_after_measurements() {
    let mut lab = LabSession::with_seed(99);
    lab.h();
    let drawn = lab.measure_many(25);
    assert_eq!(lab.history().len(), 20);
    assert_eq!(lab.history().outcomes().collect::<Vec<_>>(), drawn[5..].to_vec());
    assert_eq!(lab.history().last(), drawn.last().copied());
}

// ── Grover ────────────────────────────────────────────────────────────────

#[test]
fn grover_n8_target3_converges() {
    let steps = grover_steps(8, 3);
    assert_eq!(steps.len(), iteration_count(8) + 1);
    for step in &steps {
        let norm: f64 = step.iter().map(|a| a * a).sum();
        assert_abs_diff_eq!(norm, 1.0, epsilon = EPS);
    }
    let last = steps.last().unwrap();
    for (i, a) in last.iter().enumerate() {
        if i != 3 {
            assert!(last[3] * last[3] > a * a);
        }
    }
    assert_abs_diff_eq!(last[3], 0.972_271_824_131_502_7, epsilon = 1e-9);
}

#[test]
fn grover_run_recomputes_per_request() {
    let first = GroverRun::new(SearchSize::N16, 5).unwrap();
    let second = GroverRun::new(SearchSize::N16, 9).unwrap();
    assert_eq!(first.steps()[0], second.steps()[0]);
    assert_ne!(first.final_amplitudes(), second.final_amplitudes());
    assert_abs_diff_eq!(
        first.success_probability(first.iterations()).unwrap(),
        second.success_probability(second.iterations()).unwrap(),
        epsilon = 1e-12
    );
}

#[test]
fn grover_run_rejects_out_of_range_input() {
    assert!(matches!(
        GroverRun::new(SearchSize::N4, 4),
        Err(LabError::TargetOutOfRange { target: 4, size: 4 })
    ));
    assert!(matches!(SearchSize::try_from(10), Err(LabError::UnsupportedSearchSize(10))));
}

#[test]
fn grover_run_serializes_steps() {
    let run = GroverRun::new(SearchSize::N4, 2).unwrap();
    let json: serde_json::Value = serde_json::to_value(&run).unwrap();
    assert_eq!(json["size"], 4);
    assert_eq!(json["target"], 2);
    assert_eq!(json["steps"].as_array().unwrap().len(), 2);
}

// ── Scenario ──────────────────────────────────────────────────────────────

#[test]
fn hadamard_on_zero_gives_even_split() {
    let plus = apply_gate(Gate::H, &QubitState::zero());
    assert_abs_diff_eq!(plus.amp0.re, FRAC_1_SQRT_2, epsilon = EPS);
    assert_abs_diff_eq!(plus.amp1.re, FRAC_1_SQRT_2, epsilon = EPS);
    assert_abs_diff_eq!(plus.amp0.im, 0.0, epsilon = EPS);
    assert_abs_diff_eq!(plus.amp1.im, 0.0, epsilon = EPS);
    let (p0, p1) = plus.probabilities();
    assert_abs_diff_eq!(p0, 0.5, epsilon = EPS);
    assert_abs_diff_eq!(p1, 0.5, epsilon = EPS);
    assert_eq!(plus.format(3), "(0.707)|0⟩ + (0.707)|1⟩");
}

// ── Supplements ───────────────────────────────────────────────────────────

#[test]
fn bb84_sifted_key_matches_alice() {
    let exchange = simulate_bb84(64, &mut SeededRandom::new(12));
    for r in exchange.rounds().iter().filter(|r| r.bases_match()) {
        assert_eq!(r.alice_bit, r.bob_result);
    }
    assert_eq!(exchange.sifted_key().len(), exchange.match_count());
}

#[test]
fn bell_pairs_are_perfectly_correlated() {
    let stats = BellStatistics::from_shots(&sample_bell_pairs(1_000, &mut SeededRandom::new(8)));
    assert_eq!(stats.mismatches, 0);
    assert_abs_diff_eq!(stats.correlation(), 1.0);
    assert_abs_diff_eq!(stats.zeros_zeros as f64 / 1_000.0, 0.5, epsilon = 0.05);
}

#[test]
fn config_drives_session_sampling() {
    let config = LabConfig::from_json_str(r#"{"seed": 5, "history_capacity": 4}"#).unwrap();
    let capacity = config.history_capacity;
    let mut a = LabSession::with_source(MeasurementHistory::new(capacity), config.rng());
    let mut b = LabSession::with_source(MeasurementHistory::new(capacity), config.rng());
    a.h();
    b.h();
    assert_eq!(a.measure_many(10), b.measure_many(10));
    assert_eq!(a.history().len(), 4);
}
