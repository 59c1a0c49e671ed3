//! BB84 key distribution, sampled round by round.
//!
//! Alice sends a random bit in a random basis; Bob measures in a random basis
//! of his own. When the bases agree Bob reads Alice's bit, otherwise he gets a
//! fair coin. The rounds where the bases agree form the sifted key.

use crate::core::measurement::RandomSource;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rounds per exchange shown by the lab.
pub const DEFAULT_ROUNDS: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Basis {
    /// `+`: |0⟩ / |1⟩
    Rectilinear,
    /// `x`: |+⟩ / |−⟩
    Diagonal,
}

impl Basis {
    pub fn symbol(self) -> char {
        match self {
            Basis::Rectilinear => '+',
            Basis::Diagonal => 'x',
        }
    }
}

impl fmt::Display for Basis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bb84Round {
    pub alice_bit: u8,
    pub alice_basis: Basis,
    pub bob_basis: Basis,
    pub bob_result: u8,
}

impl Bb84Round {
    pub fn bases_match(&self) -> bool {
        self.alice_basis == self.bob_basis
    }
}

fn coin<R: RandomSource + ?Sized>(rng: &mut R) -> u8 {
    if rng.next_f64() < 0.5 {
        0
    } else {
        1
    }
}

fn basis<R: RandomSource + ?Sized>(rng: &mut R) -> Basis {
    if rng.next_f64() < 0.5 {
        Basis::Rectilinear
    } else {
        Basis::Diagonal
    }
}

/// Sample `rounds` BB84 rounds.
///
/// Draw order per round: Alice's bit, Alice's basis, Bob's basis, then Bob's
/// coin only when the bases differ.
pub fn simulate_bb84<R: RandomSource + ?Sized>(rounds: usize, rng: &mut R) -> Bb84Exchange {
    let rounds = (0..rounds)
        .map(|_| {
            let alice_bit = coin(rng);
            let alice_basis = basis(rng);
            let bob_basis = basis(rng);
            let bob_result = if alice_basis == bob_basis {
                alice_bit
            } else {
                coin(rng)
            };
            Bb84Round {
                alice_bit,
                alice_basis,
                bob_basis,
                bob_result,
            }
        })
        .collect();
    Bb84Exchange { rounds }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bb84Exchange {
    rounds: Vec<Bb84Round>,
}

impl Bb84Exchange {
    pub fn rounds(&self) -> &[Bb84Round] {
        &self.rounds
    }

    pub fn match_count(&self) -> usize {
        self.rounds.iter().filter(|r| r.bases_match()).count()
    }

    /// Bob's bits from the rounds with matching bases.
    pub fn sifted_key(&self) -> Vec<u8> {
        self.rounds
            .iter()
            .filter(|r| r.bases_match())
            .map(|r| r.bob_result)
            .collect()
    }

    /// Fraction of sifted bits where Bob disagrees with Alice.
    pub fn error_rate(&self) -> f64 {
        let sifted: Vec<&Bb84Round> = self.rounds.iter().filter(|r| r.bases_match()).collect();
        if sifted.is_empty() {
            return 0.0;
        }
        let errors = sifted.iter().filter(|r| r.alice_bit != r.bob_result).count();
        errors as f64 / sifted.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::measurement::{ScriptedRandom, SeededRandom};

    #[test]
    fn test_scripted_rounds() {
        // round 1: bit 1, basis +, +  → match, Bob reads 1
        // round 2: bit 0, basis x, +  → mismatch, Bob's coin 1
        let mut rng = ScriptedRandom::new(vec![0.7, 0.1, 0.2, 0.3, 0.8, 0.4, 0.9]);
        let ex = simulate_bb84(2, &mut rng);
        let r = ex.rounds();
        assert_eq!(r[0].alice_bit, 1);
        assert!(r[0].bases_match());
        assert_eq!(r[0].bob_result, 1);
        assert_eq!(r[1].alice_basis, Basis::Diagonal);
        assert_eq!(r[1].bob_basis, Basis::Rectilinear);
        assert_eq!(r[1].bob_result, 1);
        assert_eq!(ex.sifted_key(), vec![1]);
        assert_eq!(ex.match_count(), 1);
    }

    #[test]
    fn test_sifted_key_has_no_errors() {
        let mut rng = SeededRandom::new(84);
        let ex = simulate_bb84(500, &mut rng);
        assert_eq!(ex.rounds().len(), 500);
        assert_eq!(ex.error_rate(), 0.0);
        let matched = ex.match_count() as f64 / 500.0;
        assert!((matched - 0.5).abs() < 0.1);
    }

    #[test]
    fn test_empty_exchange() {
        let ex = simulate_bb84(0, &mut SeededRandom::new(1));
        assert!(ex.sifted_key().is_empty());
        assert_eq!(ex.error_rate(), 0.0);
    }

    #[test]
    fn test_basis_symbols() {
        assert_eq!(Basis::Rectilinear.to_string(), "+");
        assert_eq!(Basis::Diagonal.to_string(), "x");
    }
}
