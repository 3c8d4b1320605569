//! # qalgos Oracle
//!
//! Boolean-function oracles for Deutsch-Jozsa and Bernstein-Vazirani, and
//! the randomized selectors that hide which function is in use.
//!
//! ## Quick Start
//!
//! ```rust
//! use qalgos_oracle::prelude::*;
//! use qalgos_core::{Bitstring, Circuit};
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//!
//! // Randomized balanced oracle, handed back as a fragment
//! let oracle = balanced_oracle_random(3, None, OracleForm::Fragment, &mut rng);
//! let mut circuit = Circuit::with_clbits(4, 3);
//! oracle.apply_to(&mut circuit).unwrap();
//!
//! // Secret-string oracle, applied in place
//! let secret = Bitstring::parse("1011").unwrap();
//! let mut circuit = Circuit::with_clbits(5, 4);
//! Oracle::secret_dot_product(&secret).mutator().apply(&mut circuit).unwrap();
//! assert_eq!(circuit.count_2q(), 3);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Classical boolean functions implemented by oracles
pub mod function;

/// Oracle operation sequences and their fragment/mutator adapters
pub mod oracle;

/// Randomized variant selection
pub mod selector;

// ============================================================================
// Re-exports
// ============================================================================

pub use function::{BooleanFunction, MAX_TRUTH_TABLE_INPUTS};
pub use oracle::{BuiltOracle, Oracle, OracleForm, OracleMutator};
pub use selector::{
    balanced_oracle_random, build_oracle, build_oracle_unseeded, constant_oracle_random,
    select_oracle, OracleFamily, OracleSelection, Variant,
};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Convenient imports for common use cases

    pub use crate::function::BooleanFunction;
    pub use crate::oracle::{BuiltOracle, Oracle, OracleForm, OracleMutator};
    pub use crate::selector::{
        balanced_oracle_random, build_oracle, build_oracle_unseeded, constant_oracle_random,
        select_oracle, OracleFamily, OracleSelection, Variant,
    };
}

// ============================================================================
// Integration Tests
// ============================================================================
