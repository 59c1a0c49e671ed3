//! Bloch-sphere geometry for single-qubit states.
//!
//! A pure state |ψ⟩ = cos(θ/2)|0⟩ + e^(iφ)sin(θ/2)|1⟩ corresponds to the
//! point (sinθ·cosφ, sinθ·sinφ, cosθ) on the unit sphere. |0⟩ sits at the
//! north pole (+z), |1⟩ at the south pole and equal superpositions on the
//! equator.
//!
//! The lab draws the sphere in a fixed isometric view: x runs horizontally,
//! z runs vertically, and y leans into the vertical axis to suggest depth.
//! [`project_to_screen`] performs that flattening.

use super::state::QubitState;
use serde::{Deserialize, Serialize};

/// A point on (or inside) the Bloch sphere in Cartesian coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlochVector {
    pub x: f64,
    pub y: f64,
    /// +z is |0⟩, −z is |1⟩
    pub z: f64,
}

impl BlochVector {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Map spherical angles onto the unit sphere.
    pub fn from_angles(theta: f64, phi: f64) -> Self {
        let (sin_t, cos_t) = theta.sin_cos();
        let (sin_p, cos_p) = phi.sin_cos();
        Self {
            x: sin_t * cos_p,
            y: sin_t * sin_p,
            z: cos_t,
        }
    }

    /// Bloch vector of a state from its Pauli expectation values:
    /// x = 2·Re(α*β), y = 2·Im(α*β), z = |α|² − |β|².
    pub fn from_state(state: &QubitState) -> Self {
        let cross = state.amp0.conj() * state.amp1;
        Self {
            x: 2.0 * cross.re,
            y: 2.0 * cross.im,
            z: state.amp0.norm_sq() - state.amp1.norm_sq(),
        }
    }

    /// Spherical angles `(θ, φ)` with φ in [0, 2π).
    pub fn to_angles(&self) -> (f64, f64) {
        let r = self.magnitude();
        if r < 1e-10 {
            return (0.0, 0.0);
        }
        let theta = (self.z / r).clamp(-1.0, 1.0).acos();
        let mut phi = self.y.atan2(self.x);
        if phi < 0.0 {
            phi += 2.0 * std::f64::consts::PI;
        }
        (theta, phi)
    }

    /// 1.0 for a pure state.
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        (self.x - other.x).abs() < tolerance
            && (self.y - other.y).abs() < tolerance
            && (self.z - other.z).abs() < tolerance
    }
}

/// Project `(θ, φ)` onto the unit sphere.
pub fn project_to_sphere(theta: f64, phi: f64) -> BlochVector {
    BlochVector::from_angles(theta, phi)
}

/// Scale factors of the isometric sphere drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Sphere radius in screen units.
    pub sphere_radius: f64,
    /// Fraction of the radius used for the x axis.
    pub horizontal_scale: f64,
    /// Fraction of the radius used for the z axis.
    pub vertical_scale: f64,
    /// Fraction of the radius the y axis contributes to the vertical.
    pub depth_scale: f64,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            sphere_radius: 110.0,
            horizontal_scale: 0.8,
            vertical_scale: 0.8,
            depth_scale: 0.3,
        }
    }
}

/// 2D screen coordinates relative to the sphere centre.
/// Screen y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

/// Flatten a Bloch vector to screen coordinates:
/// sx = x·R·h, sy = −z·R·v + y·R·d.
pub fn project_to_screen(v: &BlochVector, config: &ProjectionConfig) -> ScreenPoint {
    let r = config.sphere_radius;
    ScreenPoint {
        x: v.x * r * config.horizontal_scale,
        y: -v.z * r * config.vertical_scale + v.y * r * config.depth_scale,
    }
}
