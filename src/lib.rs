//! # qubit-lab
//!
//! Numeric engine behind an interactive quantum-computing lab: single-qubit
//! states, the H/X/Y/Z/S/T gate catalog, Bloch-sphere projection, weighted
//! measurement and a step-by-step Grover amplitude simulator.
//!
//! ## Quick Start
//!
//! ```rust
//! use qubit_lab::core::{apply_gate, Gate, QubitState};
//!
//! // |0⟩ → H → |+⟩
//! let plus = apply_gate(Gate::H, &QubitState::zero());
//! let (p0, p1) = plus.probabilities();
//! assert!((p0 - 0.5).abs() < 1e-12 && (p1 - 0.5).abs() < 1e-12);
//!
//! // Step through amplitude amplification for N = 8, target 3
//! let steps = qubit_lab::algorithms::grover_steps(8, 3);
//! assert_eq!(steps.len(), 3);
//! ```

pub mod algorithms;
pub mod config;
pub mod core;
pub mod error;

pub use config::LabConfig;
pub use error::{LabError, Result};
