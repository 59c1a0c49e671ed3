//! Correlated sampling of the Bell pair |Φ+⟩ = (|00⟩ + |11⟩)/√2.
//!
//! Both qubits always agree: each shot yields (0,0) or (1,1) with equal
//! probability. Only the outcome distribution is sampled here; the two-qubit
//! amplitudes themselves are not evolved.

use crate::core::measurement::{Outcome, RandomSource};
use serde::Serialize;

/// Shots per batch shown by the lab.
pub const DEFAULT_SHOTS: usize = 100;

pub type BellShot = (Outcome, Outcome);

/// Draw `shots` joint measurements of |Φ+⟩.
pub fn sample_bell_pairs<R: RandomSource + ?Sized>(shots: usize, rng: &mut R) -> Vec<BellShot> {
    (0..shots)
        .map(|_| {
            if rng.next_f64() < 0.5 {
                (Outcome::Zero, Outcome::Zero)
            } else {
                (Outcome::One, Outcome::One)
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BellStatistics {
    pub zeros_zeros: usize,
    pub ones_ones: usize,
    /// Shots where the qubits disagreed.
    pub mismatches: usize,
}

impl BellStatistics {
    pub fn from_shots(shots: &[BellShot]) -> Self {
        shots.iter().fold(Self::default(), |mut acc, shot| {
            match shot {
                (Outcome::Zero, Outcome::Zero) => acc.zeros_zeros += 1,
                (Outcome::One, Outcome::One) => acc.ones_ones += 1,
                _ => acc.mismatches += 1,
            }
            acc
        })
    }

    pub fn total(&self) -> usize {
        self.zeros_zeros + self.ones_ones + self.mismatches
    }

    pub fn agreements(&self) -> usize {
        self.zeros_zeros + self.ones_ones
    }

    /// ⟨Z⊗Z⟩ estimate: (agreements − mismatches) / total.
    pub fn correlation(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        (self.agreements() as f64 - self.mismatches as f64) / total as f64
    }
}
