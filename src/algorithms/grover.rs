//! Amplitude amplification over a real-valued amplitude array.
//!
//! The search space holds N entries, each starting at 1/√N. One iteration
//! negates the target entry (the oracle) and then reflects every entry about
//! the array mean (the diffusion step). After ⌊(π/4)·√N⌋ iterations the
//! target carries most of the probability mass.
//!
//! Every intermediate array is kept so callers can step through the
//! evolution. A run is recomputed from scratch for each (N, target) pair;
//! nothing carries over between runs.

use crate::error::{LabError, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use tracing::debug;

/// Search-space sizes offered by the lab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchSize {
    N4,
    N8,
    N16,
    N32,
}

impl SearchSize {
    pub const ALL: [SearchSize; 4] = [
        SearchSize::N4,
        SearchSize::N8,
        SearchSize::N16,
        SearchSize::N32,
    ];

    pub fn get(self) -> usize {
        match self {
            SearchSize::N4 => 4,
            SearchSize::N8 => 8,
            SearchSize::N16 => 16,
            SearchSize::N32 => 32,
        }
    }
}

impl TryFrom<usize> for SearchSize {
    type Error = LabError;

    fn try_from(n: usize) -> Result<Self> {
        match n {
            4 => Ok(SearchSize::N4),
            8 => Ok(SearchSize::N8),
            16 => Ok(SearchSize::N16),
            32 => Ok(SearchSize::N32),
            other => Err(LabError::UnsupportedSearchSize(other)),
        }
    }
}

impl fmt::Display for SearchSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

// ── Steps ──────────────────────────────────────────────────────────────────

/// Uniform superposition: every entry 1/√N.
pub fn init_amplitudes(n: usize) -> Vec<f64> {
    assert!(n > 0, "search space must not be empty");
    vec![1.0 / (n as f64).sqrt(); n]
}

/// ⌊(π/4)·√N⌋, never less than one.
pub fn iteration_count(n: usize) -> usize {
    let k = ((PI / 4.0) * (n as f64).sqrt()).floor() as usize;
    k.max(1)
}

/// Oracle: flip the sign of the target amplitude.
#[inline]
pub fn oracle(amps: &mut [f64], target: usize) {
    amps[target] = -amps[target];
}

/// Diffusion: replace each entry a with 2·mean − a.
pub fn diffuse(amps: &mut [f64]) {
    if amps.is_empty() {
        return;
    }
    let mean = amps.iter().sum::<f64>() / amps.len() as f64;
    for a in amps.iter_mut() {
        *a = 2.0 * mean - *a;
    }
}

/// Run amplitude amplification for `target` in a space of `n` entries.
///
/// Returns `iteration_count(n) + 1` arrays: index 0 is the uniform start,
/// index k the array after k iterations.
///
/// # Panics
///
/// When `n == 0` or `target >= n`. Callers validate both beforehand; use
/// [`GroverRun::new`] for a checked entry point.
pub fn grover_steps(n: usize, target: usize) -> Vec<Vec<f64>> {
    assert!(target < n, "target {target} out of range for search size {n}");

    let iterations = iteration_count(n);
    let mut amps = init_amplitudes(n);
    let mut steps = Vec::with_capacity(iterations + 1);
    steps.push(amps.clone());

    for _ in 0..iterations {
        oracle(&mut amps, target);
        diffuse(&mut amps);
        steps.push(amps.clone());
    }
    steps
}

/// Σ a² over one amplitude array.
pub fn norm_sq(amps: &[f64]) -> f64 {
    amps.iter().map(|a| a * a).sum()
}

// ── GroverRun ──────────────────────────────────────────────────────────────

/// A complete amplification run for one (N, target) pair.
#[derive(Debug, Clone, Serialize)]
pub struct GroverRun {
    size: usize,
    target: usize,
    steps: Vec<Vec<f64>>,
}

impl GroverRun {
    /// Validate `target` against `size` and compute every step.
    pub fn new(size: SearchSize, target: usize) -> Result<Self> {
        let n = size.get();
        if target >= n {
            return Err(LabError::target_out_of_range(target, n));
        }
        let steps = grover_steps(n, target);
        debug!(n, target, iterations = steps.len() - 1, "computed grover run");
        Ok(Self {
            size: n,
            target,
            steps,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn iterations(&self) -> usize {
        self.steps.len() - 1
    }

    /// All arrays, initial first.
    pub fn steps(&self) -> &[Vec<f64>] {
        &self.steps
    }

    pub fn step(&self, k: usize) -> Option<&[f64]> {
        self.steps.get(k).map(Vec::as_slice)
    }

    pub fn final_amplitudes(&self) -> &[f64] {
        &self.steps[self.steps.len() - 1]
    }

    /// Probability of reading the target after `k` iterations.
    pub fn success_probability(&self, k: usize) -> Option<f64> {
        self.step(k).map(|amps| amps[self.target] * amps[self.target])
    }

    /// Σ a² at step `k`.
    pub fn norm_sq(&self, k: usize) -> Option<f64> {
        self.step(k).map(norm_sq)
    }

    /// Largest |a| at step `k`, used to scale bar charts.
    pub fn peak_magnitude(&self, k: usize) -> Option<f64> {
        self.step(k)
            .map(|amps| amps.iter().fold(0.0_f64, |m, a| m.max(a.abs())))
    }
}

impl fmt::Display for GroverRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Grover search  N={}  target={}  iterations={}",
            self.size,
            self.target,
            self.iterations()
        )?;
        for (k, amps) in self.steps.iter().enumerate() {
            let p = amps[self.target] * amps[self.target];
            writeln!(f, "  step {k}: P(target) = {p:.4}  Σa² = {:.6}", norm_sq(amps))?;
        }
        Ok(())
    }
}
