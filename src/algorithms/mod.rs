//! Multi-step lab algorithms built on the single-qubit engine.
//!
//! - `grover`: amplitude amplification over a real amplitude array
//! - `bb84`:   BB84 key-distribution rounds
//! - `bell`:   correlated |Φ+⟩ outcome sampling

pub mod bb84;
pub mod bell;
pub mod grover;

pub use bb84::{simulate_bb84, Basis, Bb84Exchange, Bb84Round};
pub use bell::{sample_bell_pairs, BellStatistics};
pub use grover::{grover_steps, init_amplitudes, iteration_count, GroverRun, SearchSize};
