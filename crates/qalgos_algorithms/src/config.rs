//! Algorithm configuration
//!
//! Serializable descriptions of a Deutsch-Jozsa or Bernstein-Vazirani run
//! that assemble their circuit on [`build`](DeutschJozsaConfig::build).

use crate::bernstein_vazirani::bernstein_vazirani;
use crate::deutsch_jozsa::{deutsch_jozsa_with_rng, deutsch_jozsa_with_variant, DjOracleKind};
use qalgos_core::{Bitstring, Circuit, QalgosError, QalgosResult};
use qalgos_oracle::{OracleForm, Variant};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Deutsch-Jozsa
// ============================================================================

/// Deutsch-Jozsa run description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeutschJozsaConfig {
    /// Number of input wires
    pub num_inputs: usize,

    /// Oracle family
    pub oracle_type: DjOracleKind,

    /// How the oracle is merged into the circuit
    pub form: OracleForm,

    /// Forced oracle variant (None = random draw)
    pub variant: Option<Variant>,

    /// Seed for the variant draw (None = thread RNG)
    pub seed: Option<u64>,
}

impl Default for DeutschJozsaConfig {
    fn default() -> Self {
        Self {
            num_inputs: 3,
            oracle_type: DjOracleKind::default(),
            form: OracleForm::default(),
            variant: None,
            seed: None,
        }
    }
}

impl DeutschJozsaConfig {
    /// Create config for `num_inputs` wires and an oracle family
    pub fn new(num_inputs: usize, oracle_type: DjOracleKind) -> Self {
        Self {
            num_inputs,
            oracle_type,
            ..Default::default()
        }
    }

    /// Set oracle form
    pub fn with_form(mut self, form: OracleForm) -> Self {
        self.form = form;
        self
    }

    /// Force a variant
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = Some(variant);
        self
    }

    /// Seed the variant draw
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Assemble the circuit
    pub fn build(&self) -> QalgosResult<Circuit> {
        match (self.variant, self.seed) {
            (Some(variant), _) => {
                deutsch_jozsa_with_variant(self.num_inputs, self.oracle_type, variant, self.form)
            }
            (None, Some(seed)) => deutsch_jozsa_with_rng(
                self.num_inputs,
                self.oracle_type,
                self.form,
                &mut StdRng::seed_from_u64(seed),
            ),
            (None, None) => deutsch_jozsa_with_rng(
                self.num_inputs,
                self.oracle_type,
                self.form,
                &mut rand::thread_rng(),
            ),
        }
    }

    /// Parse from JSON; an unknown `oracle_type` is reported as
    /// [`QalgosError::InvalidOracleType`]
    pub fn from_json(json: &str) -> QalgosResult<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if let Some(oracle_type) = value.get("oracle_type").and_then(|v| v.as_str()) {
            oracle_type.parse::<DjOracleKind>()?;
        }
        Ok(serde_json::from_value(value)?)
    }
}

impl fmt::Display for DeutschJozsaConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DeutschJozsaConfig(n={}, {}, {}",
            self.num_inputs, self.oracle_type, self.form
        )?;
        if let Some(v) = self.variant {
            write!(f, ", variant={}", v)?;
        }
        write!(f, ")")
    }
}

// ============================================================================
// Bernstein-Vazirani
// ============================================================================

/// Bernstein-Vazirani run description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BernsteinVaziraniConfig {
    /// Hidden bit string
    pub secret: String,

    /// How the oracle is merged into the circuit
    #[serde(default)]
    pub form: OracleForm,
}

impl BernsteinVaziraniConfig {
    /// Create config for `secret`
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            form: OracleForm::default(),
        }
    }

    /// Set oracle form
    pub fn with_form(mut self, form: OracleForm) -> Self {
        self.form = form;
        self
    }

    /// Check that the secret is a bit string
    pub fn validate(&self) -> QalgosResult<()> {
        Bitstring::parse(&self.secret).map(|_| ())
    }

    /// Assemble the circuit
    pub fn build(&self) -> QalgosResult<Circuit> {
        bernstein_vazirani(&self.secret, self.form)
    }

    /// Parse from JSON, rejecting non-binary secrets
    pub fn from_json(json: &str) -> QalgosResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

impl fmt::Display for BernsteinVaziraniConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BernsteinVaziraniConfig(secret={}, {})", self.secret, self.form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qalgos_core::Gate;

    #[test]
    fn test_dj_default() {
        let config = DeutschJozsaConfig::default();
        assert_eq!(config.oracle_type, DjOracleKind::Balanced);
        assert_eq!(config.form, OracleForm::Mutator);
        assert_eq!(config.build().unwrap().num_qubits(), 4);
    }

    #[test]
    fn test_dj_forced_variant() {
        let circuit = DeutschJozsaConfig::new(2, DjOracleKind::Balanced)
            .with_variant(Variant::Second)
            .build()
            .unwrap();
        // parity-negated ends with X on the target before the second barrier
        assert_eq!(circuit.gates()[7], Gate::X(2));
    }

    #[test]
    fn test_dj_seed_repeats() {
        let config = DeutschJozsaConfig::new(4, DjOracleKind::Constant).with_seed(11);
        assert_eq!(config.build().unwrap(), config.build().unwrap());
    }

    #[test]
    fn test_dj_from_json() {
        let config = DeutschJozsaConfig::from_json(
            r#"{"num_inputs": 5, "oracle_type": "constant", "form": "fragment"}"#,
        )
        .unwrap();
        assert_eq!(config.num_inputs, 5);
        assert_eq!(config.form, OracleForm::Fragment);
        assert!(config.variant.is_none());
        assert_eq!(
            config.to_string(),
            "DeutschJozsaConfig(n=5, constant, fragment)"
        );
    }

    #[test]
    fn test_dj_from_json_oracle_type() {
        let config =
            DeutschJozsaConfig::from_json(r#"{"num_inputs": 3, "oracle_type": "BALANCED", "variant": 1}"#)
                .unwrap();
        assert_eq!(config.oracle_type, DjOracleKind::Balanced);
        assert_eq!(config.variant, Some(Variant::Second));

        let err = DeutschJozsaConfig::from_json(r#"{"num_inputs": 3, "oracle_type": "unknown"}"#)
            .unwrap_err();
        assert_eq!(err, QalgosError::InvalidOracleType("unknown".into()));

        let err = DeutschJozsaConfig::from_json(r#"{"variant": 4}"#).unwrap_err();
        assert!(matches!(err, QalgosError::JsonError(_)));
    }

    #[test]
    fn test_bv_config() {
        let config = BernsteinVaziraniConfig::new("101").with_form(OracleForm::Fragment);
        assert!(config.validate().is_ok());
        assert_eq!(config.build().unwrap().num_clbits(), 3);

        let err = BernsteinVaziraniConfig::from_json(r#"{"secret": "12"}"#).unwrap_err();
        assert_eq!(err, QalgosError::InvalidBitstring("12".into()));
    }
}
