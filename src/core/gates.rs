//! Single-qubit gate catalog and application.
//!
//! The catalog is closed: Hadamard, the three Paulis and the S and T phase
//! gates. Each gate is a 2×2 unitary matrix and application is an ordinary
//! matrix–vector product, so the result is always a new state.

use super::complex::Complex;
use super::state::QubitState;
use crate::error::LabError;
use std::f64::consts::{FRAC_1_SQRT_2, PI};
use std::fmt;
use std::str::FromStr;

/// Gate matrix, indexed `[row][col]`.
pub type Matrix2x2 = [[Complex; 2]; 2];

// ── Catalog Matrices ───────────────────────────────────────────────────────

/// H = [[1, 1], [1, -1]] / √2
pub fn hadamard() -> Matrix2x2 {
    let h = Complex::real(FRAC_1_SQRT_2);
    let neg_h = Complex::real(-FRAC_1_SQRT_2);
    [
        [h, h],
        [h, neg_h],
    ]
}

/// X = [[0, 1], [1, 0]]
pub fn pauli_x() -> Matrix2x2 {
    [
        [Complex::zero(), Complex::one()],
        [Complex::one(), Complex::zero()],
    ]
}

/// Y = [[0, -i], [i, 0]]
pub fn pauli_y() -> Matrix2x2 {
    [
        [Complex::zero(), Complex::new(0.0, -1.0)],
        [Complex::i(), Complex::zero()],
    ]
}

/// Z = [[1, 0], [0, -1]]
pub fn pauli_z() -> Matrix2x2 {
    [
        [Complex::one(), Complex::zero()],
        [Complex::zero(), Complex::real(-1.0)],
    ]
}

/// S = [[1, 0], [0, i]]
pub fn s_gate() -> Matrix2x2 {
    [
        [Complex::one(), Complex::zero()],
        [Complex::zero(), Complex::i()],
    ]
}

/// T = [[1, 0], [0, e^(iπ/4)]]
pub fn t_gate() -> Matrix2x2 {
    [
        [Complex::one(), Complex::zero()],
        [Complex::zero(), Complex::exp_i(PI / 4.0)],
    ]
}

// ── Gate Catalog ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gate {
    H,
    X,
    Y,
    Z,
    S,
    T,
}

impl Gate {
    /// Every catalog gate, in menu order.
    pub const ALL: [Gate; 6] = [Gate::H, Gate::X, Gate::Y, Gate::Z, Gate::S, Gate::T];

    pub fn matrix(self) -> Matrix2x2 {
        match self {
            Gate::H => hadamard(),
            Gate::X => pauli_x(),
            Gate::Y => pauli_y(),
            Gate::Z => pauli_z(),
            Gate::S => s_gate(),
            Gate::T => t_gate(),
        }
    }

    /// Single-letter symbol used in gate sequences.
    pub fn symbol(self) -> &'static str {
        match self {
            Gate::H => "H",
            Gate::X => "X",
            Gate::Y => "Y",
            Gate::Z => "Z",
            Gate::S => "S",
            Gate::T => "T",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Gate::H => "Hadamard (H)",
            Gate::X => "Pauli-X (NOT)",
            Gate::Y => "Pauli-Y",
            Gate::Z => "Pauli-Z",
            Gate::S => "Phase (S)",
            Gate::T => "T Gate",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Gate::H => "Creates an equal superposition: maps |0⟩ to |+⟩ and |1⟩ to |−⟩.",
            Gate::X => "Bit flip. Rotates the Bloch vector 180° about the X axis.",
            Gate::Y => "Bit and phase flip. Rotates 180° about the Y axis.",
            Gate::Z => "Phase flip. Rotates 180° about the Z axis.",
            Gate::S => "Quarter turn about the Z axis. S² = Z.",
            Gate::T => "Eighth turn about the Z axis. T² = S.",
        }
    }

    /// Gates equal to their own inverse (G·G = I).
    pub fn is_self_inverse(self) -> bool {
        matches!(self, Gate::H | Gate::X | Gate::Y | Gate::Z)
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Gate {
    type Err = LabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "H" => Ok(Gate::H),
            "X" => Ok(Gate::X),
            "Y" => Ok(Gate::Y),
            "Z" => Ok(Gate::Z),
            "S" => Ok(Gate::S),
            "T" => Ok(Gate::T),
            _ => Err(LabError::UnknownGate(s.to_string())),
        }
    }
}

// ── Application ────────────────────────────────────────────────────────────

/// 2×2 matrix times a 2-component column vector.
#[inline(always)]
pub fn mat_vec_mul(m: &Matrix2x2, v: [Complex; 2]) -> [Complex; 2] {
    [
        m[0][0] * v[0] + m[0][1] * v[1],
        m[1][0] * v[0] + m[1][1] * v[1],
    ]
}

/// Apply an arbitrary 2×2 matrix to `state`; the result is rescaled to unit
/// length, so a non-unitary matrix still yields a valid state.
#[inline(always)]
pub fn apply_matrix(matrix: &Matrix2x2, state: &QubitState) -> QubitState {
    QubitState::from(mat_vec_mul(matrix, state.as_array()))
}

/// Apply a catalog gate to `state`: state' = G·state.
///
/// Pure: `state` is left untouched. Every catalog matrix is unitary, so the
/// result stays normalized up to floating-point rounding.
pub fn apply_gate(gate: Gate, state: &QubitState) -> QubitState {
    let [amp0, amp1] = mat_vec_mul(&gate.matrix(), state.as_array());
    QubitState::new_unchecked(amp0, amp1)
}

/// Check U†U = I within `tolerance`.
pub fn is_unitary(m: &Matrix2x2, tolerance: f64) -> bool {
    for i in 0..2 {
        for j in 0..2 {
            let dot = m[0][i].conj() * m[0][j] + m[1][i].conj() * m[1][j];
            let expected = if i == j { Complex::one() } else { Complex::zero() };
            if !dot.approx_eq(&expected, tolerance) {
                return false;
            }
        }
    }
    true
}
