//! # qalgos Backend
//!
//! Backend selection, transpilation, and ideal local simulation.
//!
//! ## Quick Start
//!
//! ```rust
//! use qalgos_backend::prelude::*;
//! use qalgos_core::CircuitBuilder;
//!
//! // Ideal simulator with a fixed seed
//! let backend = SimulatorBackend::ideal(5).with_seed(42);
//!
//! let circuit = CircuitBuilder::with_clbits(2, 2)
//!     .h(0)
//!     .cnot(0, 1)
//!     .measure_range(2)
//!     .build();
//!
//! let result = run_circuit(&circuit, &backend, &ExecutionConfig::default()).unwrap();
//! assert_eq!(result.total_counts(), 2000);
//! assert_eq!(result.probability("01"), 0.0);
//! ```
//!
//! ## Selection
//!
//! ```rust
//! use qalgos_backend::prelude::*;
//!
//! // Without a provider every remote choice falls back to the simulator
//! let selected = BackendSelector::local_only().select_backend(&BackendChoice::LeastBusy);
//! assert!(selected.backend.is_simulator());
//! assert!(selected.is_fallback());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Execution types and backend trait
pub mod execution;

/// Ideal state-vector simulator
pub mod simulator;

/// Peephole transpiler with optimization levels
pub mod transpiler;

/// Remote device discovery seam
pub mod provider;

/// Backend choice resolution with simulator fallback
pub mod selection;

/// Execution configuration
pub mod config;

/// `run_circuit` entry point
pub mod runner;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::ExecutionConfig;
pub use execution::{Backend, ExecutionMetadata, ExecutionResult};
pub use provider::{least_busy, BackendProvider, DeviceDescriptor, DeviceStatus};
pub use runner::{run_circuit, run_with_selector};
pub use selection::{BackendChoice, BackendSelector, SelectedBackend};
pub use simulator::{Distribution, SimulatorBackend};
pub use transpiler::{TranspileReport, Transpiler, TranspilerConfig};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use qalgos_backend::prelude::*;
    //! ```

    pub use crate::config::ExecutionConfig;
    pub use crate::execution::{Backend, ExecutionMetadata, ExecutionResult};
    pub use crate::provider::{BackendProvider, DeviceDescriptor, DeviceStatus};
    pub use crate::runner::{run_circuit, run_with_selector};
    pub use crate::selection::{BackendChoice, BackendSelector, SelectedBackend};
    pub use crate::simulator::SimulatorBackend;
    pub use crate::transpiler::{Transpiler, TranspilerConfig};
}

// ============================================================================
// Integration Tests
// ============================================================================
