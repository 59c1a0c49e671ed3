pub mod bloch;
pub mod complex;
pub mod gates;
pub mod measurement;
pub mod session;
pub mod state;

// Convenience re-exports for library users
pub use bloch::{project_to_screen, project_to_sphere, BlochVector, ProjectionConfig, ScreenPoint};
pub use complex::Complex;
pub use gates::{apply_gate, Gate, Matrix2x2};
pub use measurement::{
    measure, MeasurementHistory, Outcome, RandomSource, ScriptedRandom, SeededRandom, ThreadRandom,
};
pub use session::{GateSession, LabSession};
pub use state::{QubitState, KEY_STATES};
