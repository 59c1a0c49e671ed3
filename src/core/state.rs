//! Single-qubit state representation.
//!
//! A qubit holds two complex amplitudes, |ψ⟩ = α|0⟩ + β|1⟩, which must
//! satisfy the normalization constraint |α|² + |β|² = 1.
//! States are `Copy` values: gate application produces a new state and the
//! previous one stays valid for history and undo.

use super::complex::Complex;
use std::f64::consts::{FRAC_1_SQRT_2, PI, TAU};
use std::fmt;

/// Tolerance used when checking the normalization constraint.
pub const NORM_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QubitState {
    /// Amplitude of |0⟩
    pub amp0: Complex,
    /// Amplitude of |1⟩
    pub amp1: Complex,
}

impl QubitState {
    /// Build a state from explicit amplitudes, rescaled to unit length.
    ///
    /// An all-zero pair becomes |0⟩ (see [`QubitState::normalized`]).
    pub fn new(amp0: Complex, amp1: Complex) -> Self {
        Self::new_unchecked(amp0, amp1).normalized()
    }

    /// Store the amplitudes as given. Callers guarantee |α|² + |β|² = 1.
    #[inline(always)]
    pub(crate) const fn new_unchecked(amp0: Complex, amp1: Complex) -> Self {
        Self { amp0, amp1 }
    }

    /// |0⟩, the north pole of the Bloch sphere.
    pub const fn zero() -> Self {
        Self::new_unchecked(Complex::one(), Complex::zero())
    }

    /// |1⟩, the south pole.
    pub const fn one() -> Self {
        Self::new_unchecked(Complex::zero(), Complex::one())
    }

    /// |+⟩ = (|0⟩ + |1⟩) / √2
    pub fn plus() -> Self {
        Self::new_unchecked(Complex::real(FRAC_1_SQRT_2), Complex::real(FRAC_1_SQRT_2))
    }

    /// |−⟩ = (|0⟩ − |1⟩) / √2
    pub fn minus() -> Self {
        Self::new_unchecked(Complex::real(FRAC_1_SQRT_2), Complex::real(-FRAC_1_SQRT_2))
    }

    /// Build the state at polar angle `theta` and azimuth `phi`:
    /// α = cos(θ/2), β = e^(iφ)·sin(θ/2).
    pub fn from_angles(theta: f64, phi: f64) -> Self {
        let half = theta / 2.0;
        Self {
            amp0: Complex::real(half.cos()),
            amp1: Complex::exp_i(phi) * Complex::real(half.sin()),
        }
    }

    /// Measurement probabilities `(p0, p1)` = (|α|², |β|²).
    #[inline(always)]
    pub fn probabilities(&self) -> (f64, f64) {
        (self.amp0.norm_sq(), self.amp1.norm_sq())
    }

    /// Total probability |α|² + |β|² (≈ 1.0 for a valid state).
    #[inline(always)]
    pub fn norm_sq(&self) -> f64 {
        self.amp0.norm_sq() + self.amp1.norm_sq()
    }

    pub fn is_normalized(&self, tolerance: f64) -> bool {
        (self.norm_sq() - 1.0).abs() < tolerance
    }

    /// Return a copy rescaled to unit length.
    ///
    /// A zero vector has no physical meaning and maps to |0⟩.
    pub fn normalized(&self) -> Self {
        let total = self.norm_sq();
        if total < 1e-24 {
            return Self::zero();
        }
        let inv_norm = 1.0 / total.sqrt();
        Self {
            amp0: self.amp0.scale(inv_norm),
            amp1: self.amp1.scale(inv_norm),
        }
    }

    /// Amplitudes as a `[α, β]` column vector.
    #[inline(always)]
    pub fn as_array(&self) -> [Complex; 2] {
        [self.amp0, self.amp1]
    }

    /// Recover the Bloch angles `(θ, φ)` of this state.
    ///
    /// The global phase is discarded: φ is the phase of β relative to α,
    /// wrapped into [0, 2π). At either pole φ is reported as 0.
    pub fn bloch_angles(&self) -> (f64, f64) {
        let r0 = self.amp0.norm();
        let r1 = self.amp1.norm();
        let theta = 2.0 * r1.atan2(r0);

        if r0 < 1e-12 || r1 < 1e-12 {
            return (theta, 0.0);
        }
        let mut phi = self.amp1.arg() - self.amp0.arg();
        phi = phi.rem_euclid(TAU);
        if (phi - TAU).abs() < 1e-12 {
            phi = 0.0;
        }
        (theta, phi)
    }

    /// Format both amplitudes using `precision` decimals.
    pub fn format(&self, precision: usize) -> String {
        format!(
            "({})|0⟩ + ({})|1⟩",
            self.amp0.format(precision),
            self.amp1.format(precision)
        )
    }
}

impl Default for QubitState {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<[Complex; 2]> for QubitState {
    fn from(amps: [Complex; 2]) -> Self {
        Self::new(amps[0], amps[1])
    }
}

impl fmt::Display for QubitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f
            .precision()
            .unwrap_or(super::complex::DEFAULT_PRECISION);
        f.write_str(&self.format(precision))
    }
}

// ── Key States ─────────────────────────────────────────────────────────────

/// A named landmark on the Bloch sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyState {
    pub label: &'static str,
    pub theta: f64,
    pub phi: f64,
    pub description: &'static str,
}

impl KeyState {
    pub fn state(&self) -> QubitState {
        QubitState::from_angles(self.theta, self.phi)
    }
}

/// The six cardinal states: both poles and the four equator crossings
/// of the x and y axes.
pub static KEY_STATES: [KeyState; 6] = [
    KeyState {
        label: "|0⟩",
        theta: 0.0,
        phi: 0.0,
        description: "North pole, computational basis 0",
    },
    KeyState {
        label: "|1⟩",
        theta: PI,
        phi: 0.0,
        description: "South pole, computational basis 1",
    },
    KeyState {
        label: "|+⟩",
        theta: PI / 2.0,
        phi: 0.0,
        description: "Equal superposition with + relative phase",
    },
    KeyState {
        label: "|−⟩",
        theta: PI / 2.0,
        phi: PI,
        description: "Equal superposition with − relative phase",
    },
    KeyState {
        label: "|i⟩",
        theta: PI / 2.0,
        phi: PI / 2.0,
        description: "Y-basis, +i relative phase",
    },
    KeyState {
        label: "|−i⟩",
        theta: PI / 2.0,
        phi: 3.0 * PI / 2.0,
        description: "Y-basis, −i relative phase",
    },
];

/// Look up a key state by its ket label (e.g. `"|+⟩"`).
pub fn key_state(label: &str) -> Option<&'static KeyState> {
    KEY_STATES.iter().find(|k| k.label == label)
}
