//! Deutsch-Jozsa circuit assembly
//!
//! Layout for `n` inputs: wires `0..n` are inputs, wire `n` is the target,
//! and clbit `i` receives input wire `i`.
//!
//! ```text
//! X(n) ─ H(all) ─ ║ ─ oracle ─ ║ ─ H(all) ─ ║ ─ measure(0..n)
//! ```

use qalgos_core::{Circuit, CircuitBuilder, Counts, QalgosError, QalgosResult};
use qalgos_oracle::{build_oracle, OracleFamily, OracleForm, Variant};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Oracle family requested from the Deutsch-Jozsa assembler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DjOracleKind {
    /// f(x) is the same for every input
    Constant,
    /// f(x) = 1 for exactly half of the inputs
    #[default]
    Balanced,
}

impl DjOracleKind {
    /// Oracle family backing this kind
    pub fn family(self) -> OracleFamily {
        match self {
            DjOracleKind::Constant => OracleFamily::Constant,
            DjOracleKind::Balanced => OracleFamily::Balanced,
        }
    }
}

impl FromStr for DjOracleKind {
    type Err = QalgosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "constant" => Ok(DjOracleKind::Constant),
            "balanced" => Ok(DjOracleKind::Balanced),
            _ => Err(QalgosError::InvalidOracleType(s.to_string())),
        }
    }
}

impl TryFrom<String> for DjOracleKind {
    type Error = QalgosError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DjOracleKind> for String {
    fn from(kind: DjOracleKind) -> Self {
        kind.to_string()
    }
}

impl fmt::Display for DjOracleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DjOracleKind::Constant => write!(f, "constant"),
            DjOracleKind::Balanced => write!(f, "balanced"),
        }
    }
}

/// Assemble a Deutsch-Jozsa circuit with a randomly drawn oracle variant
pub fn deutsch_jozsa(n: usize, kind: DjOracleKind, form: OracleForm) -> QalgosResult<Circuit> {
    deutsch_jozsa_with_rng(n, kind, form, &mut rand::thread_rng())
}

/// Assemble from an `oracle_type` string ("constant" or "balanced", any case)
///
/// An unrecognized type fails before any circuit is built.
pub fn deutsch_jozsa_str(n: usize, oracle_type: &str, form: OracleForm) -> QalgosResult<Circuit> {
    let kind: DjOracleKind = oracle_type.parse()?;
    deutsch_jozsa(n, kind, form)
}

/// Assemble, drawing the oracle variant from `rng`
pub fn deutsch_jozsa_with_rng<R: Rng + ?Sized>(
    n: usize,
    kind: DjOracleKind,
    form: OracleForm,
    rng: &mut R,
) -> QalgosResult<Circuit> {
    assemble(n, kind, None, form, rng)
}

/// Assemble with a caller-chosen oracle variant
pub fn deutsch_jozsa_with_variant(
    n: usize,
    kind: DjOracleKind,
    variant: Variant,
    form: OracleForm,
) -> QalgosResult<Circuit> {
    assemble(n, kind, Some(variant), form, &mut rand::thread_rng())
}

fn assemble<R: Rng + ?Sized>(
    n: usize,
    kind: DjOracleKind,
    forced_variant: Option<Variant>,
    form: OracleForm,
    rng: &mut R,
) -> QalgosResult<Circuit> {
    let target = n;

    log::info!("Oracle selected: {}", kind.to_string().to_uppercase());
    let oracle = build_oracle(kind.family(), n, forced_variant, form, rng);

    CircuitBuilder::with_clbits(n + 1, n)
        .named(format!("deutsch_jozsa[{}]", kind))
        .x(target)
        .h_layer()
        .barrier()
        .apply(|circuit| oracle.apply_to(circuit))
        .barrier()
        .h_layer()
        .barrier()
        .measure_range(n)
        .try_build()
}

// ============================================================================
// Interpretation
// ============================================================================

/// Classification read from measurement counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeutschJozsaVerdict {
    /// Every shot measured all zeros
    Constant,
    /// At least one shot measured a non-zero string
    Balanced,
}

impl DeutschJozsaVerdict {
    /// Classify counts; `None` when no shot was recorded
    pub fn from_counts(counts: &Counts) -> Option<Self> {
        let mut observed = counts.iter().filter(|&(_, &c)| c > 0).peekable();
        observed.peek()?;
        if observed.all(|(outcome, _)| outcome.chars().all(|c| c == '0')) {
            Some(DeutschJozsaVerdict::Constant)
        } else {
            Some(DeutschJozsaVerdict::Balanced)
        }
    }
}

impl fmt::Display for DeutschJozsaVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeutschJozsaVerdict::Constant => write!(f, "constant"),
            DeutschJozsaVerdict::Balanced => write!(f, "balanced"),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
