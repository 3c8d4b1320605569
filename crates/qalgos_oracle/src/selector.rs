//! Randomized oracle selection
//!
//! The constant and balanced families each have two fixed implementations.
//! A selector either honours a caller-forced [`Variant`] or draws one
//! uniformly from the injected random source.

use crate::function::BooleanFunction;
use crate::oracle::{BuiltOracle, Oracle, OracleForm};
use qalgos_core::QalgosError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Variant
// ============================================================================

/// Which of a family's two implementations to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Variant {
    /// Implementation 0
    First,
    /// Implementation 1
    Second,
}

impl Variant {
    /// Draw uniformly from {0, 1}
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.gen_bool(0.5) {
            Variant::Second
        } else {
            Variant::First
        }
    }

    /// Numeric index of the variant
    pub fn index(self) -> u8 {
        match self {
            Variant::First => 0,
            Variant::Second => 1,
        }
    }
}

impl TryFrom<u8> for Variant {
    type Error = QalgosError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Variant::First),
            1 => Ok(Variant::Second),
            other => Err(QalgosError::InvalidVariant(other)),
        }
    }
}

impl From<Variant> for u8 {
    fn from(variant: Variant) -> Self {
        variant.index()
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

// ============================================================================
// Family
// ============================================================================

/// Oracle family with two interchangeable implementations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OracleFamily {
    /// constant-0 (variant 0) or constant-1 (variant 1)
    Constant,
    /// parity (variant 0) or parity-negated (variant 1)
    Balanced,
}

impl OracleFamily {
    /// Function implemented by `variant` of this family
    pub fn function(self, variant: Variant) -> BooleanFunction {
        match (self, variant) {
            (OracleFamily::Constant, Variant::First) => BooleanFunction::ConstantZero,
            (OracleFamily::Constant, Variant::Second) => BooleanFunction::ConstantOne,
            (OracleFamily::Balanced, Variant::First) => BooleanFunction::Parity,
            (OracleFamily::Balanced, Variant::Second) => BooleanFunction::ParityNegated,
        }
    }
}

impl fmt::Display for OracleFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OracleFamily::Constant => write!(f, "constant"),
            OracleFamily::Balanced => write!(f, "balanced"),
        }
    }
}

// ============================================================================
// Selection
// ============================================================================

/// Outcome of a selector call: the chosen variant and its oracle
#[derive(Debug, Clone, PartialEq)]
pub struct OracleSelection {
    /// Family the oracle was drawn from
    pub family: OracleFamily,
    /// Variant that was forced or drawn
    pub variant: Variant,
    /// Whether the variant came from the caller
    pub forced: bool,
    /// The selected oracle
    pub oracle: Oracle,
}

/// Select one implementation of `family` for `n` input wires
pub fn select_oracle<R: Rng + ?Sized>(
    family: OracleFamily,
    n: usize,
    forced_variant: Option<Variant>,
    rng: &mut R,
) -> OracleSelection {
    let (variant, forced) = match forced_variant {
        Some(v) => (v, true),
        None => (Variant::random(rng), false),
    };
    log::debug!(
        "{} oracle: variant {} ({}) for n={}",
        family,
        variant,
        if forced { "forced" } else { "drawn" },
        n
    );
    OracleSelection {
        family,
        variant,
        forced,
        oracle: Oracle::new(family.function(variant), n),
    }
}

/// Build an oracle of `family` in the requested form
pub fn build_oracle<R: Rng + ?Sized>(
    family: OracleFamily,
    n: usize,
    forced_variant: Option<Variant>,
    form: OracleForm,
    rng: &mut R,
) -> BuiltOracle {
    select_oracle(family, n, forced_variant, rng)
        .oracle
        .into_form(form)
}

/// Randomized constant oracle (constant-0 or constant-1)
pub fn constant_oracle_random<R: Rng + ?Sized>(
    n: usize,
    forced_variant: Option<Variant>,
    form: OracleForm,
    rng: &mut R,
) -> BuiltOracle {
    build_oracle(OracleFamily::Constant, n, forced_variant, form, rng)
}

/// Randomized balanced oracle (parity or parity-negated)
pub fn balanced_oracle_random<R: Rng + ?Sized>(
    n: usize,
    forced_variant: Option<Variant>,
    form: OracleForm,
    rng: &mut R,
) -> BuiltOracle {
    build_oracle(OracleFamily::Balanced, n, forced_variant, form, rng)
}

/// Build an oracle drawing from the thread-local random source
pub fn build_oracle_unseeded(
    family: OracleFamily,
    n: usize,
    forced_variant: Option<Variant>,
    form: OracleForm,
) -> BuiltOracle {
    build_oracle(family, n, forced_variant, form, &mut rand::thread_rng())
}

// ============================================================================
// Tests
// ============================================================================
