//! # qalgos Algorithms
//!
//! Circuit assembly for the Deutsch-Jozsa and Bernstein-Vazirani oracle
//! algorithms, plus helpers that read their answer out of measurement
//! counts.
//!
//! ## Quick Start
//!
//! ```rust
//! use qalgos_algorithms::prelude::*;
//! use qalgos_oracle::OracleForm;
//!
//! // Deutsch-Jozsa over 3 inputs with a hidden constant function
//! let dj = deutsch_jozsa(3, DjOracleKind::Constant, OracleForm::Fragment).unwrap();
//! assert_eq!(dj.num_qubits(), 4);
//! assert_eq!(dj.num_clbits(), 3);
//!
//! // Bernstein-Vazirani for secret 1011
//! let bv = bernstein_vazirani("1011", OracleForm::Mutator).unwrap();
//! assert_eq!(bv.name(), Some("bernstein_vazirani[1011]"));
//!
//! // Unknown oracle types are rejected before anything is built
//! assert!(deutsch_jozsa_str(3, "linear", OracleForm::Mutator).is_err());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Deutsch-Jozsa assembly and verdict
pub mod deutsch_jozsa;

/// Bernstein-Vazirani assembly and secret recovery
pub mod bernstein_vazirani;

/// Serializable run descriptions
pub mod config;

// ============================================================================
// Re-exports
// ============================================================================

pub use bernstein_vazirani::{bernstein_vazirani, bernstein_vazirani_bits, recover_secret};
pub use config::{BernsteinVaziraniConfig, DeutschJozsaConfig};
pub use deutsch_jozsa::{
    deutsch_jozsa, deutsch_jozsa_str, deutsch_jozsa_with_rng, deutsch_jozsa_with_variant,
    DeutschJozsaVerdict, DjOracleKind,
};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Convenient imports for common use cases

    pub use crate::bernstein_vazirani::{bernstein_vazirani, recover_secret};
    pub use crate::config::{BernsteinVaziraniConfig, DeutschJozsaConfig};
    pub use crate::deutsch_jozsa::{
        deutsch_jozsa, deutsch_jozsa_str, deutsch_jozsa_with_rng, deutsch_jozsa_with_variant,
        DeutschJozsaVerdict, DjOracleKind,
    };
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use approx::assert_relative_eq;
    use qalgos_backend::{run_circuit, Distribution, ExecutionConfig, SimulatorBackend};
    use qalgos_core::{Bitstring, Circuit, CircuitBuilder};
    use qalgos_oracle::{Oracle, OracleForm, Variant};

    fn ideal(circuit: &Circuit) -> Distribution {
        SimulatorBackend::ideal(12).probabilities(circuit).unwrap()
    }

    fn prob(dist: &Distribution, outcome: &str) -> f64 {
        dist.get(outcome).copied().unwrap_or(0.0)
    }

    const FORMS: [OracleForm; 2] = [OracleForm::Fragment, OracleForm::Mutator];
    const VARIANTS: [Variant; 2] = [Variant::First, Variant::Second];

    #[test]
    fn test_dj_constant_reads_all_zero() {
        for n in 1..=4 {
            for form in FORMS {
                for variant in VARIANTS {
                    let circuit =
                        deutsch_jozsa_with_variant(n, DjOracleKind::Constant, variant, form).unwrap();
                    let dist = ideal(&circuit);
                    assert_relative_eq!(prob(&dist, &"0".repeat(n)), 1.0, epsilon = 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_dj_balanced_never_reads_all_zero() {
        for n in 1..=4 {
            for form in FORMS {
                for variant in VARIANTS {
                    let circuit =
                        deutsch_jozsa_with_variant(n, DjOracleKind::Balanced, variant, form).unwrap();
                    let dist = ideal(&circuit);
                    assert_relative_eq!(prob(&dist, &"0".repeat(n)), 0.0, epsilon = 1e-9);
                    // parity oracles send every amplitude to all-ones
                    assert_relative_eq!(prob(&dist, &"1".repeat(n)), 1.0, epsilon = 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_bv_recovers_secret() {
        for secret in ["1011", "0000", "1", "0", "110", "0101"] {
            for form in FORMS {
                let circuit = bernstein_vazirani(secret, form).unwrap();
                let dist = ideal(&circuit);
                assert_eq!(dist.len(), 1, "secret {}", secret);
                assert_relative_eq!(prob(&dist, secret), 1.0, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_bv_sampled_run() {
        let circuit = bernstein_vazirani("1011", OracleForm::Mutator).unwrap();
        let backend = SimulatorBackend::ideal(8).with_seed(42);
        let result = run_circuit(&circuit, &backend, &ExecutionConfig::default()).unwrap();
        assert_eq!(result.counts.get("1011"), Some(&2000));
        assert_eq!(
            recover_secret(&result.counts),
            Some(Bitstring::parse("1011").unwrap())
        );
    }

    #[test]
    fn test_dj_verdict_from_sampled_counts() {
        let backend = SimulatorBackend::ideal(8).with_seed(3);
        let config = ExecutionConfig::quick();
        for (kind, expected) in [
            (DjOracleKind::Constant, DeutschJozsaVerdict::Constant),
            (DjOracleKind::Balanced, DeutschJozsaVerdict::Balanced),
        ] {
            let circuit = deutsch_jozsa(3, kind, OracleForm::Fragment).unwrap();
            let result = run_circuit(&circuit, &backend, &config).unwrap();
            assert_eq!(DeutschJozsaVerdict::from_counts(&result.counts), Some(expected));
        }
    }

    #[test]
    fn test_oracles_compute_their_function() {
        for n in 1..=3 {
            let oracles = vec![
                Oracle::constant_zero(n),
                Oracle::constant_one(n),
                Oracle::parity(n),
                Oracle::parity_negated(n),
                Oracle::secret_dot_product(&Bitstring::from_usize(0b101 & ((1 << n) - 1), n)),
            ];
            for oracle in oracles {
                for x in 0..(1usize << n) {
                    let input = Bitstring::from_usize(x, n);
                    let mut builder = CircuitBuilder::with_clbits(n + 1, 1);
                    for (wire, bit) in input.wire_bits() {
                        if bit {
                            builder = builder.x(wire);
                        }
                    }
                    let circuit = builder
                        .apply(|c| oracle.mutator().apply(c))
                        .measure(n, 0)
                        .try_build()
                        .unwrap();

                    let expected = if oracle.function().evaluate(&input) { "1" } else { "0" };
                    let dist = ideal(&circuit);
                    assert_relative_eq!(prob(&dist, expected), 1.0, epsilon = 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_fragment_and_mutator_states_match() {
        let backend = SimulatorBackend::ideal(8);
        for variant in VARIANTS {
            let a = deutsch_jozsa_with_variant(3, DjOracleKind::Balanced, variant, OracleForm::Fragment)
                .unwrap();
            let b = deutsch_jozsa_with_variant(3, DjOracleKind::Balanced, variant, OracleForm::Mutator)
                .unwrap();
            let sa = backend.statevector(&a).unwrap();
            let sb = backend.statevector(&b).unwrap();
            for (x, y) in sa.iter().zip(sb.iter()) {
                assert_relative_eq!(x.re, y.re, epsilon = 1e-12);
                assert_relative_eq!(x.im, y.im, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_config_roundtrip_builds() {
        let config = DeutschJozsaConfig::new(2, DjOracleKind::Constant)
            .with_form(OracleForm::Fragment)
            .with_seed(1);
        let json = serde_json::to_string(&config).unwrap();
        let parsed = DeutschJozsaConfig::from_json(&json).unwrap();
        assert_eq!(parsed.build().unwrap(), config.build().unwrap());
    }
}
