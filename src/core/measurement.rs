//! Projective measurement of a single qubit.
//!
//! A measurement draws r ∈ [0, 1) from a [`RandomSource`] and reports |0⟩
//! when r < |α|², |1⟩ otherwise. The random source is injected so tests can
//! replay a seeded or scripted sequence instead of OS entropy.
//!
//! [`MeasurementHistory`] keeps the most recent outcomes for display (oldest
//! evicted first) together with lifetime counters for empirical frequencies.

use super::state::QubitState;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use tracing::trace;

/// Number of outcomes the lab keeps on screen.
pub const DEFAULT_HISTORY_CAPACITY: usize = 20;

// ── Random Sources ─────────────────────────────────────────────────────────

/// Supplies uniform samples in [0, 1).
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;
}

impl<T: RandomSource + ?Sized> RandomSource for &mut T {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

impl<T: RandomSource + ?Sized> RandomSource for Box<T> {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

/// Non-deterministic source backed by the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_f64(&mut self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }
}

/// Reproducible source seeded from a `u64`.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_f64(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Replays a fixed list of samples, wrapping around at the end.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedRandom {
    pub fn new(values: Vec<f64>) -> Self {
        assert!(!values.is_empty(), "scripted source needs at least one value");
        Self { values, cursor: 0 }
    }
}

impl RandomSource for ScriptedRandom {
    fn next_f64(&mut self) -> f64 {
        let v = self.values[self.cursor];
        self.cursor = (self.cursor + 1) % self.values.len();
        v
    }
}

// ── Outcome ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Zero,
    One,
}

impl Outcome {
    pub fn bit(self) -> u8 {
        match self {
            Outcome::Zero => 0,
            Outcome::One => 1,
        }
    }

    pub fn from_bit(bit: u8) -> Self {
        if bit == 0 {
            Outcome::Zero
        } else {
            Outcome::One
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bit())
    }
}

// ── Sampling ───────────────────────────────────────────────────────────────

/// Measure `state` in the computational basis.
///
/// Weighted by the amplitudes, not a fair coin. The state itself is not
/// modified; the caller decides whether to collapse it.
pub fn measure<R: RandomSource + ?Sized>(state: &QubitState, rng: &mut R) -> Outcome {
    let r = rng.next_f64();
    let (p0, _) = state.probabilities();
    let outcome = if r < p0 { Outcome::Zero } else { Outcome::One };
    trace!(r, p0, outcome = outcome.bit(), "measured qubit");
    outcome
}

/// The post-measurement basis state for `outcome`.
pub fn collapse(outcome: Outcome) -> QubitState {
    match outcome {
        Outcome::Zero => QubitState::zero(),
        Outcome::One => QubitState::one(),
    }
}

/// Draw `shots` independent measurements and return `(zeros, ones)`.
pub fn sample_many<R: RandomSource + ?Sized>(
    state: &QubitState,
    shots: usize,
    rng: &mut R,
) -> (usize, usize) {
    let zeros = (0..shots)
        .filter(|_| measure(state, rng) == Outcome::Zero)
        .count();
    (zeros, shots - zeros)
}

// ── History ────────────────────────────────────────────────────────────────

/// Bounded outcome log plus running counters.
#[derive(Debug, Clone)]
pub struct MeasurementHistory {
    capacity: usize,
    recent: VecDeque<Outcome>,
    total_zeros: u64,
    total_ones: u64,
}

impl MeasurementHistory {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity >= 1, "history capacity must be at least 1");
        Self {
            capacity,
            recent: VecDeque::with_capacity(capacity),
            total_zeros: 0,
            total_ones: 0,
        }
    }

    /// Append an outcome, evicting the oldest once full.
    pub fn record(&mut self, outcome: Outcome) {
        if self.recent.len() == self.capacity {
            self.recent.pop_front();
        }
        self.recent.push_back(outcome);
        match outcome {
            Outcome::Zero => self.total_zeros += 1,
            Outcome::One => self.total_ones += 1,
        }
    }

    /// Measure `state` and log the result.
    pub fn measure<R: RandomSource + ?Sized>(
        &mut self,
        state: &QubitState,
        rng: &mut R,
    ) -> Outcome {
        let outcome = measure(state, rng);
        self.record(outcome);
        outcome
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.recent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recent.is_empty()
    }

    /// Retained outcomes, oldest first.
    pub fn outcomes(&self) -> impl Iterator<Item = Outcome> + '_ {
        self.recent.iter().copied()
    }

    pub fn last(&self) -> Option<Outcome> {
        self.recent.back().copied()
    }

    /// `(zeros, ones)` among the retained outcomes.
    pub fn window_counts(&self) -> (usize, usize) {
        let zeros = self.recent.iter().filter(|o| **o == Outcome::Zero).count();
        (zeros, self.recent.len() - zeros)
    }

    pub fn total_zeros(&self) -> u64 {
        self.total_zeros
    }

    pub fn total_ones(&self) -> u64 {
        self.total_ones
    }

    pub fn total(&self) -> u64 {
        self.total_zeros + self.total_ones
    }

    /// Lifetime empirical frequencies `(f0, f1)`; `(0, 0)` before any draw.
    pub fn frequencies(&self) -> (f64, f64) {
        let total = self.total();
        if total == 0 {
            return (0.0, 0.0);
        }
        let n = total as f64;
        (self.total_zeros as f64 / n, self.total_ones as f64 / n)
    }

    /// Frequencies `(f0, f1)` over the retained window only; `(0, 0)` when empty.
    pub fn window_frequencies(&self) -> (f64, f64) {
        if self.recent.is_empty() {
            return (0.0, 0.0);
        }
        let (zeros, ones) = self.window_counts();
        let n = self.recent.len() as f64;
        (zeros as f64 / n, ones as f64 / n)
    }

    pub fn clear(&mut self) {
        self.recent.clear();
        self.total_zeros = 0;
        self.total_ones = 0;
    }
}

impl Default for MeasurementHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl fmt::Display for MeasurementHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for o in self.outcomes() {
            write!(f, "{o}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::complex::Complex;

    #[test]
    fn test_measure_follows_threshold() {
        let state = QubitState::new_unchecked(Complex::real(0.5), Complex::real(0.75_f64.sqrt()));
        // p0 = 0.25
        let mut rng = ScriptedRandom::new(vec![0.0, 0.2499, 0.25, 0.9]);
        assert_eq!(measure(&state, &mut rng), Outcome::Zero);
        assert_eq!(measure(&state, &mut rng), Outcome::Zero);
        assert_eq!(measure(&state, &mut rng), Outcome::One);
        assert_eq!(measure(&state, &mut rng), Outcome::One);
    }

    #[test]
    fn test_basis_states_are_deterministic() {
        let mut rng = SeededRandom::new(7);
        for _ in 0..200 {
            assert_eq!(measure(&QubitState::zero(), &mut rng), Outcome::Zero);
            assert_eq!(measure(&QubitState::one(), &mut rng), Outcome::One);
        }
    }

    #[test]
    fn test_measure_does_not_mutate_state() {
        let state = QubitState::plus();
        let mut rng = ThreadRandom;
        let _ = measure(&state, &mut rng);
        assert_eq!(state, QubitState::plus());
    }

    #[test]
    fn test_seeded_source_is_reproducible() {
        let mut a = SeededRandom::new(42);
        let mut b = SeededRandom::new(42);
        for _ in 0..10 {
            let (x, y) = (a.next_f64(), b.next_f64());
            assert_eq!(x, y);
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn test_history_evicts_oldest() {
        let mut h = MeasurementHistory::new(3);
        for bit in [0, 1, 1, 0, 1] {
            h.record(Outcome::from_bit(bit));
        }
        let kept: Vec<u8> = h.outcomes().map(Outcome::bit).collect();
        assert_eq!(kept, vec![1, 0, 1]);
        assert_eq!(h.len(), 3);
        assert_eq!(h.last(), Some(Outcome::One));
        assert_eq!(h.window_counts(), (1, 2));
        assert_eq!(h.total_zeros(), 2);
        assert_eq!(h.total_ones(), 3);
        assert_eq!(h.to_string(), "101");
    }

    #[test]
    fn test_history_frequencies_and_clear() {
        let mut h = MeasurementHistory::default();
        assert_eq!(h.frequencies(), (0.0, 0.0));
        h.record(Outcome::Zero);
        h.record(Outcome::One);
        h.record(Outcome::One);
        h.record(Outcome::One);
        assert_eq!(h.frequencies(), (0.25, 0.75));
        h.clear();
        assert!(h.is_empty());
        assert_eq!(h.total(), 0);
    }

    #[test]
    fn test_window_frequencies_ignore_evicted() {
        let mut h = MeasurementHistory::new(4);
        assert_eq!(h.window_frequencies(), (0.0, 0.0));
        for bit in [0, 0, 0, 0, 1, 1, 0, 1] {
            h.record(Outcome::from_bit(bit));
        }
        // window holds 1 1 0 1, lifetime holds five zeros
        assert_eq!(h.window_frequencies(), (0.25, 0.75));
        assert_eq!(h.frequencies(), (0.625, 0.375));
    }

    #[test]
    fn test_collapse() {
        assert_eq!(collapse(Outcome::Zero), QubitState::zero());
        assert_eq!(collapse(Outcome::One), QubitState::one());
    }

    #[test]
    fn test_sample_many_counts() {
        let mut rng = ScriptedRandom::new(vec![0.1, 0.6]);
        let (zeros, ones) = sample_many(&QubitState::plus(), 10, &mut rng);
        assert_eq!((zeros, ones), (5, 5));
    }
}
