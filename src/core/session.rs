//! Per-user lab session.
//!
//! `GateSession` threads a qubit through successive gate applications. It
//! keeps every intermediate state, so earlier states remain observable and
//! the last step can be undone, and an append-only log of the gates applied.
//!
//! `LabSession` bundles a gate session with a measurement history and a
//! random source behind a chainable API:
//!   - Gate application (H, X, Y, Z, S, T)
//!   - Measurement against the current state, logged to a bounded history
//!   - Deterministic mode via an injected seeded source
//!   - Probability, Bloch-vector and amplitude readout
//!
//! Sessions are never shared; each interactive view owns its own.

use super::bloch::BlochVector;
use super::gates::{apply_gate, Gate};
use super::measurement::{MeasurementHistory, Outcome, RandomSource, SeededRandom, ThreadRandom};
use super::state::QubitState;
use std::fmt;
use tracing::debug;

// ── GateSession ────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct GateSession {
    /// states[0] is |0⟩; states[k] is the state after k gates.
    states: Vec<QubitState>,
    sequence: Vec<Gate>,
}

impl GateSession {
    /// Start from |0⟩ with an empty gate log.
    pub fn new() -> Self {
        Self::from_state(QubitState::zero())
    }

    /// Start from an arbitrary prepared state.
    pub fn from_state(initial: QubitState) -> Self {
        Self {
            states: vec![initial],
            sequence: Vec::new(),
        }
    }

    /// The most recent state.
    pub fn current(&self) -> &QubitState {
        // states is never empty: construction seeds it and undo keeps index 0
        &self.states[self.states.len() - 1]
    }

    /// Apply `gate` to the current state and log it.
    pub fn apply(&mut self, gate: Gate) -> &QubitState {
        let next = apply_gate(gate, self.current());
        self.states.push(next);
        self.sequence.push(gate);
        debug!(gate = gate.symbol(), depth = self.sequence.len(), "applied gate");
        self.current()
    }

    /// Drop the last gate, restoring the previous state.
    /// Returns the removed gate, or `None` when nothing has been applied.
    pub fn undo(&mut self) -> Option<Gate> {
        let gate = self.sequence.pop()?;
        self.states.pop();
        debug!(gate = gate.symbol(), depth = self.sequence.len(), "undid gate");
        Some(gate)
    }

    /// Restore |0⟩ and clear the gate log.
    pub fn reset(&mut self) {
        self.states.clear();
        self.states.push(QubitState::zero());
        self.sequence.clear();
        debug!("gate session reset");
    }

    pub fn sequence(&self) -> &[Gate] {
        &self.sequence
    }

    /// Every state produced so far, starting with the initial one.
    pub fn states(&self) -> &[QubitState] {
        &self.states
    }

    /// Gate log as `H → X → T`; empty string for an empty log.
    pub fn sequence_label(&self) -> String {
        self.sequence
            .iter()
            .map(|g| g.symbol())
            .collect::<Vec<_>>()
            .join(" → ")
    }
}

impl Default for GateSession {
    fn default() -> Self {
        Self::new()
    }
}

// ── LabSession ─────────────────────────────────────────────────────────────

pub struct LabSession<R: RandomSource = ThreadRandom> {
    gates: GateSession,
    history: MeasurementHistory,
    rng: R,
}

impl LabSession<ThreadRandom> {
    /// Session with the default history size and a non-deterministic source.
    pub fn new() -> Self {
        Self::with_source(MeasurementHistory::default(), ThreadRandom)
    }
}

impl Default for LabSession<ThreadRandom> {
    fn default() -> Self {
        Self::new()
    }
}

impl LabSession<SeededRandom> {
    /// Session with reproducible measurement outcomes.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_source(MeasurementHistory::default(), SeededRandom::new(seed))
    }
}

impl<R: RandomSource> LabSession<R> {
    pub fn with_source(history: MeasurementHistory, rng: R) -> Self {
        Self {
            gates: GateSession::new(),
            history,
            rng,
        }
    }

    // ── Gates ─────────────────────────────────────────────────────────────

    pub fn apply(&mut self, gate: Gate) -> &mut Self {
        self.gates.apply(gate);
        self
    }

    pub fn h(&mut self) -> &mut Self {
        self.apply(Gate::H)
    }

    pub fn x(&mut self) -> &mut Self {
        self.apply(Gate::X)
    }

    pub fn y(&mut self) -> &mut Self {
        self.apply(Gate::Y)
    }

    pub fn z(&mut self) -> &mut Self {
        self.apply(Gate::Z)
    }

    pub fn s(&mut self) -> &mut Self {
        self.apply(Gate::S)
    }

    pub fn t(&mut self) -> &mut Self {
        self.apply(Gate::T)
    }

    pub fn undo(&mut self) -> Option<Gate> {
        self.gates.undo()
    }

    // ── Measurement ───────────────────────────────────────────────────────

    /// Measure the current state and log the outcome.
    /// The gate chain is left as is so the same state can be sampled again.
    pub fn measure(&mut self) -> Outcome {
        let state = *self.gates.current();
        self.history.measure(&state, &mut self.rng)
    }

    /// Measure `shots` times; returns the outcomes in draw order.
    pub fn measure_many(&mut self, shots: usize) -> Vec<Outcome> {
        (0..shots).map(|_| self.measure()).collect()
    }

    // ── Readout ───────────────────────────────────────────────────────────

    pub fn state(&self) -> &QubitState {
        self.gates.current()
    }

    pub fn probabilities(&self) -> (f64, f64) {
        self.gates.current().probabilities()
    }

    pub fn bloch(&self) -> BlochVector {
        BlochVector::from_state(self.gates.current())
    }

    pub fn gates(&self) -> &GateSession {
        &self.gates
    }

    pub fn history(&self) -> &MeasurementHistory {
        &self.history
    }

    // ── State Control ─────────────────────────────────────────────────────

    /// Reset to |0⟩ and clear both the gate log and measurement history.
    pub fn reset(&mut self) {
        self.gates.reset();
        self.history.clear();
    }
}

impl<R: RandomSource> fmt::Display for LabSession<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (p0, p1) = self.probabilities();
        writeln!(f, "State: {}", self.state())?;
        writeln!(f, "P(0) = {p0:.4}  P(1) = {p1:.4}")?;
        let label = self.gates.sequence_label();
        writeln!(f, "Gates: {}", if label.is_empty() { "(none)" } else { label.as_str() })?;
        writeln!(f, "Measurements: [{}]", self.history)
    }
}
