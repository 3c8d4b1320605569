//! Constants for qalgos
//!
//! Execution defaults and limits shared by the backend and algorithm crates.

// ============================================================================
// Execution Constants
// ============================================================================

pub mod execution {
    //! Defaults for running a circuit on a backend

    /// Default number of shots per execution
    pub const DEFAULT_SHOTS: u64 = 2000;

    /// Shot count used by the `quick` presets
    pub const QUICK_SHOTS: u64 = 256;

    /// Minimum shots per execution
    pub const MIN_SHOTS: u64 = 1;

    /// Maximum shots per execution
    pub const MAX_SHOTS: u64 = 100_000;

    /// Default transpiler optimization level
    pub const DEFAULT_OPTIMIZATION_LEVEL: u8 = 1;

    /// Highest supported transpiler optimization level
    pub const MAX_OPTIMIZATION_LEVEL: u8 = 3;
}

// ============================================================================
// Simulator Constants
// ============================================================================

pub mod simulator {
    //! Limits of the local state-vector simulator

    /// Default qubit capacity of the local simulator (2^24 amplitudes)
    pub const DEFAULT_MAX_QUBITS: usize = 24;

    /// Hard ceiling on simulator capacity (2^30 amplitudes, 16 GiB)
    pub const MAX_SIMULATOR_QUBITS: usize = 30;

    /// Name reported by the local simulator backend
    pub const BACKEND_NAME: &str = "qalgos_simulator";

    /// Amplitudes with squared norm below this are treated as zero
    pub const PROBABILITY_EPSILON: f64 = 1e-12;
}

// ============================================================================
// Tests
// ============================================================================
