//! Execution configuration
//!
//! Shots, optimization level, seed, and backend choice for one run.

use crate::selection::BackendChoice;
use qalgos_core::constants::execution::{
    DEFAULT_OPTIMIZATION_LEVEL, DEFAULT_SHOTS, MAX_OPTIMIZATION_LEVEL, MAX_SHOTS, MIN_SHOTS,
    QUICK_SHOTS,
};
use qalgos_core::constants::simulator::{DEFAULT_MAX_QUBITS, MAX_SIMULATOR_QUBITS};
use qalgos_core::{QalgosError, QalgosResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Configuration for executing a circuit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionConfig {
    /// Number of shots
    pub shots: u64,

    /// Transpiler optimization level (0-3), used for non-simulator targets
    pub optimization_level: u8,

    /// Random seed for the local simulator (None = entropy)
    pub seed: Option<u64>,

    /// Which backend to run on
    pub backend: BackendChoice,

    /// Qubit capacity of the local simulator
    pub max_qubits: usize,
}

impl ExecutionConfig {
    // ========================================================================
    // Presets
    // ========================================================================

    /// Few shots, for demos and smoke tests
    pub fn quick() -> Self {
        Self {
            shots: QUICK_SHOTS,
            ..Default::default()
        }
    }

    /// Seeded local simulation
    pub fn reproducible(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Default::default()
        }
    }

    // ========================================================================
    // Builder Methods
    // ========================================================================

    /// Set shots
    pub fn with_shots(mut self, shots: u64) -> Self {
        self.shots = shots;
        self
    }

    /// Set optimization level
    pub fn with_optimization_level(mut self, level: u8) -> Self {
        self.optimization_level = level;
        self
    }

    /// Set seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set backend choice
    pub fn with_backend(mut self, backend: BackendChoice) -> Self {
        self.backend = backend;
        self
    }

    /// Set local simulator capacity
    pub fn with_max_qubits(mut self, max_qubits: usize) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    // ========================================================================
    // Validation and I/O
    // ========================================================================

    /// Validate configuration
    pub fn validate(&self) -> QalgosResult<()> {
        if !(MIN_SHOTS..=MAX_SHOTS).contains(&self.shots) {
            return Err(QalgosError::ShotsOutOfRange(self.shots, MIN_SHOTS, MAX_SHOTS));
        }

        if self.optimization_level > MAX_OPTIMIZATION_LEVEL {
            return Err(QalgosError::InvalidOptimizationLevel(self.optimization_level));
        }

        if self.max_qubits == 0 || self.max_qubits > MAX_SIMULATOR_QUBITS {
            return Err(QalgosError::InvalidConfig(format!(
                "max_qubits must be in range [1, {}] (got {})",
                MAX_SIMULATOR_QUBITS, self.max_qubits
            )));
        }

        Ok(())
    }

    /// Parse from JSON and validate
    pub fn from_json(json: &str) -> QalgosResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> QalgosResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load from a JSON file and validate
    pub fn from_file(path: impl AsRef<Path>) -> QalgosResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            shots: DEFAULT_SHOTS,
            optimization_level: DEFAULT_OPTIMIZATION_LEVEL,
            seed: None,
            backend: BackendChoice::default(),
            max_qubits: DEFAULT_MAX_QUBITS,
        }
    }
}

impl fmt::Display for ExecutionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ExecutionConfig(shots={}, opt={}, seed={:?}, backend={})",
            self.shots, self.optimization_level, self.seed, self.backend
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
