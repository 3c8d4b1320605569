//! Error types for qalgos
//!
//! A single error enum shared by every crate in the workspace, grouped by
//! the layer that raises it.

// Error variant fields are self-documenting via error messages
#![allow(missing_docs)]

use thiserror::Error;

/// Main error type for qalgos
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QalgosError {
    // ========================================================================
    // Validation Errors (invalid arguments)
    // ========================================================================
    /// Oracle family name is neither "constant" nor "balanced"
    #[error("oracle_type must be 'constant' or 'balanced' (got '{0}')")]
    InvalidOracleType(String),

    /// Forced oracle variant outside {0, 1}
    #[error("Invalid oracle variant {0}: must be 0 or 1")]
    InvalidVariant(u8),

    /// Invalid bitstring format
    #[error("Invalid bitstring '{0}': must contain only '0' and '1'")]
    InvalidBitstring(String),

    /// Shots out of range
    #[error("Shots {0} out of range [{1}, {2}]")]
    ShotsOutOfRange(u64, u64, u64),

    /// Optimization level outside 0..=3
    #[error("Invalid optimization level {0}: must be in range [0, 3]")]
    InvalidOptimizationLevel(u8),

    /// Configuration rejected by `validate()`
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ========================================================================
    // Circuit Errors
    // ========================================================================
    /// Gate on non-existent qubit
    #[error("Gate references qubit {qubit} but circuit has only {num_qubits} qubits")]
    GateQubitMismatch { qubit: usize, num_qubits: usize },

    /// Measurement into non-existent classical bit
    #[error("Measurement writes clbit {clbit} but circuit has only {num_clbits} clbits")]
    ClbitOutOfRange { clbit: usize, num_clbits: usize },

    /// Fragment does not fit into the host circuit
    #[error(
        "Cannot compose fragment ({fragment_qubits}q/{fragment_clbits}c) \
         into circuit ({host_qubits}q/{host_clbits}c)"
    )]
    ComposeMismatch {
        fragment_qubits: usize,
        fragment_clbits: usize,
        host_qubits: usize,
        host_clbits: usize,
    },

    /// Oracle applied to a circuit that lacks its target wire
    #[error("Oracle targets wire {target} but circuit has only {num_qubits} qubits")]
    TargetWireMismatch { target: usize, num_qubits: usize },

    /// Unitary applied to a wire after it was measured
    #[error("Qubit {0} is operated on after measurement")]
    MeasuredQubitReused(usize),

    /// Qubit index out of range for a backend
    #[error("Qubit {qubit} out of range: max is {max}")]
    QubitOutOfRange { qubit: usize, max: usize },

    // ========================================================================
    // Backend Errors (collaborator unavailable)
    // ========================================================================
    /// Backend execution error
    #[error("Backend error: {0}")]
    BackendError(String),

    /// Backend not available
    #[error("Backend not available: {0}")]
    BackendNotAvailable(String),

    /// Device discovery failed
    #[error("Backend discovery failed: {0}")]
    DiscoveryFailed(String),

    // ========================================================================
    // I/O Errors
    // ========================================================================
    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(String),

    /// File I/O error
    #[error("File error: {0}")]
    FileError(String),
}

/// Result type alias for qalgos operations
pub type QalgosResult<T> = Result<T, QalgosError>;

// ============================================================================
// Error Conversion Helpers
// ============================================================================

impl From<serde_json::Error> for QalgosError {
    fn from(err: serde_json::Error) -> Self {
        QalgosError::JsonError(err.to_string())
    }
}

impl From<std::io::Error> for QalgosError {
    fn from(err: std::io::Error) -> Self {
        QalgosError::FileError(err.to_string())
    }
}

// ============================================================================
// Error Helpers
// ============================================================================

impl QalgosError {
    /// Check if error was caused by a bad caller-supplied argument
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            QalgosError::InvalidOracleType(_)
                | QalgosError::InvalidVariant(_)
                | QalgosError::InvalidBitstring(_)
                | QalgosError::ShotsOutOfRange(..)
                | QalgosError::InvalidOptimizationLevel(_)
                | QalgosError::InvalidConfig(_)
        )
    }

    /// Check if error is a circuit error
    pub fn is_circuit_error(&self) -> bool {
        matches!(
            self,
            QalgosError::GateQubitMismatch { .. }
                | QalgosError::ClbitOutOfRange { .. }
                | QalgosError::ComposeMismatch { .. }
                | QalgosError::TargetWireMismatch { .. }
                | QalgosError::MeasuredQubitReused(_)
                | QalgosError::QubitOutOfRange { .. }
        )
    }

    /// Check if a remote collaborator could not be reached or used.
    ///
    /// Backend selection treats these as a signal to fall back to the
    /// local simulator.
    pub fn is_collaborator_unavailable(&self) -> bool {
        matches!(
            self,
            QalgosError::BackendError(_)
                | QalgosError::BackendNotAvailable(_)
                | QalgosError::DiscoveryFailed(_)
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
