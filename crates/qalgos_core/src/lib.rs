//! # qalgos Core
//!
//! Circuit data model, bit strings, and error types for the qalgos
//! oracle-algorithm workspace.
//!
//! ## Quick Start
//!
//! ```rust
//! use qalgos_core::prelude::*;
//!
//! // Two input wires, one target wire, two classical bits
//! let circuit = CircuitBuilder::with_clbits(3, 2)
//!     .x(2)
//!     .h_layer()
//!     .barrier()
//!     .cnot(0, 2)
//!     .cnot(1, 2)
//!     .barrier()
//!     .h_on(0..2)
//!     .measure_range(2)
//!     .build();
//!
//! println!("{}", circuit);
//! println!("{}", circuit.to_qasm());
//! ```
//!
//! ## Register Order
//!
//! ```rust
//! use qalgos_core::Bitstring;
//!
//! // The last character governs wire 0
//! let secret = Bitstring::parse("110").unwrap();
//! assert_eq!(secret.wire_bit(0), Some(false));
//! assert_eq!(secret.wire_bit(2), Some(true));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Core types: ids, counts, bit strings
pub mod types;

/// Execution and simulator constants
pub mod constants;

/// Error types
pub mod error;

/// Quantum gates
pub mod gate;

/// Circuit structure
pub mod circuit;

/// Circuit builder
pub mod builder;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::CircuitBuilder;
pub use circuit::Circuit;
pub use error::{QalgosError, QalgosResult};
pub use gate::Gate;
pub use types::{Angle, Bitstring, ClbitId, Counts, QubitId};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Convenient imports for common use cases
    //!
    //! ```rust
    //! use qalgos_core::prelude::*;
    //! ```

    pub use crate::builder::CircuitBuilder;
    pub use crate::circuit::Circuit;
    pub use crate::constants::{execution, simulator};
    pub use crate::error::{QalgosError, QalgosResult};
    pub use crate::gate::Gate;
    pub use crate::types::{Angle, Bitstring, ClbitId, Counts, QubitId};
}

// ============================================================================
// Version Information
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// ============================================================================
// Integration Tests
// ============================================================================
