//! Oracle construction
//!
//! An [`Oracle`] owns a single operation sequence over `n + 1` wires, with
//! wire `n` as the target. Two adapters expose it: a standalone fragment
//! circuit for composition, and an [`OracleMutator`] that appends the same
//! operations onto an existing circuit. Oracles never measure.

use crate::function::BooleanFunction;
use qalgos_core::{Bitstring, Circuit, CircuitBuilder, Gate, QalgosError, QalgosResult, QubitId};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Oracle
// ============================================================================

/// Fixed oracle for one boolean function over `num_inputs` wires
#[derive(Debug, Clone, PartialEq)]
pub struct Oracle {
    function: BooleanFunction,
    num_inputs: usize,
    ops: Vec<Gate>,
}

impl Oracle {
    /// Synthesize the oracle for `function` over `num_inputs` input wires.
    ///
    /// For [`BooleanFunction::SecretDotProduct`] the secret's own length
    /// sets the input count and `num_inputs` is ignored.
    pub fn new(function: BooleanFunction, num_inputs: usize) -> Self {
        let n = match &function {
            BooleanFunction::SecretDotProduct(secret) => secret.len(),
            _ => num_inputs,
        };
        let target = n;

        let ops = match &function {
            BooleanFunction::ConstantZero => Vec::new(),
            BooleanFunction::ConstantOne => vec![Gate::X(target)],
            BooleanFunction::Parity => (0..n).map(|i| Gate::Cnot(i, target)).collect(),
            BooleanFunction::ParityNegated => (0..n)
                .map(|i| Gate::Cnot(i, target))
                .chain(std::iter::once(Gate::X(target)))
                .collect(),
            BooleanFunction::SecretDotProduct(secret) => secret
                .wire_bits()
                .filter(|(_, bit)| *bit)
                .map(|(i, _)| Gate::Cnot(i, target))
                .collect(),
        };

        Self {
            function,
            num_inputs: n,
            ops,
        }
    }

    /// Identity on all wires
    pub fn constant_zero(n: usize) -> Self {
        Self::new(BooleanFunction::ConstantZero, n)
    }

    /// Single negation of the target wire
    pub fn constant_one(n: usize) -> Self {
        Self::new(BooleanFunction::ConstantOne, n)
    }

    /// CX from every input wire onto the target
    pub fn parity(n: usize) -> Self {
        Self::new(BooleanFunction::Parity, n)
    }

    /// Parity followed by X on the target
    pub fn parity_negated(n: usize) -> Self {
        Self::new(BooleanFunction::ParityNegated, n)
    }

    /// CX from wire `i` onto the target for every set secret bit `i`
    /// (the secret's last character is wire 0)
    pub fn secret_dot_product(secret: &Bitstring) -> Self {
        Self::new(BooleanFunction::SecretDotProduct(secret.clone()), secret.len())
    }

    /// Get the implemented function
    pub fn function(&self) -> &BooleanFunction {
        &self.function
    }

    /// Number of input wires
    pub fn num_inputs(&self) -> usize {
        self.num_inputs
    }

    /// Target wire index (always `num_inputs`)
    pub fn target(&self) -> QubitId {
        self.num_inputs
    }

    /// Total wires the oracle acts on
    pub fn num_qubits(&self) -> usize {
        self.num_inputs + 1
    }

    /// The operation sequence
    pub fn operations(&self) -> &[Gate] {
        &self.ops
    }

    // ========================================================================
    // Adapters
    // ========================================================================

    /// Standalone fragment: `n + 1` wires, no classical bits
    pub fn to_fragment(&self) -> Circuit {
        self.ops
            .iter()
            .cloned()
            .fold(
                CircuitBuilder::new(self.num_qubits()).named(format!("oracle[{}]", self.function)),
                CircuitBuilder::gate,
            )
            .build()
    }

    /// In-place adapter over an existing circuit
    pub fn mutator(&self) -> OracleMutator {
        OracleMutator {
            target: self.target(),
            ops: self.ops.clone(),
        }
    }

    /// Convert into the requested form
    pub fn into_form(self, form: OracleForm) -> BuiltOracle {
        match form {
            OracleForm::Fragment => BuiltOracle::Fragment(self.to_fragment()),
            OracleForm::Mutator => BuiltOracle::Mutator(OracleMutator {
                target: self.target(),
                ops: self.ops,
            }),
        }
    }
}

impl fmt::Display for Oracle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Oracle({}, n={}, ops={})",
            self.function,
            self.num_inputs,
            self.ops.len()
        )
    }
}

// ============================================================================
// Mutator
// ============================================================================

/// Appends an oracle's operations directly onto a circuit
#[derive(Debug, Clone, PartialEq)]
pub struct OracleMutator {
    target: QubitId,
    ops: Vec<Gate>,
}

impl OracleMutator {
    /// Target wire this mutator writes to
    pub fn target(&self) -> QubitId {
        self.target
    }

    /// Append the oracle onto `circuit`, whose wire `target` must exist.
    ///
    /// Nothing is appended on error.
    pub fn apply(&self, circuit: &mut Circuit) -> QalgosResult<()> {
        if self.target >= circuit.num_qubits() {
            return Err(QalgosError::TargetWireMismatch {
                target: self.target,
                num_qubits: circuit.num_qubits(),
            });
        }
        circuit.add_gates(self.ops.iter().cloned())
    }
}

// ============================================================================
// Form
// ============================================================================

/// How a built oracle is handed back to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OracleForm {
    /// Standalone circuit merged by composition
    #[serde(alias = "Fragment")]
    Fragment,
    /// Callable that mutates the host circuit
    #[default]
    #[serde(alias = "Mutator")]
    Mutator,
}

impl OracleForm {
    /// Map the `as_fragment` flag to a form
    pub fn from_flag(as_fragment: bool) -> Self {
        if as_fragment {
            OracleForm::Fragment
        } else {
            OracleForm::Mutator
        }
    }
}

impl fmt::Display for OracleForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OracleForm::Fragment => write!(f, "fragment"),
            OracleForm::Mutator => write!(f, "mutator"),
        }
    }
}

/// Oracle in either of its two forms
#[derive(Debug, Clone, PartialEq)]
pub enum BuiltOracle {
    /// Standalone fragment circuit
    Fragment(Circuit),
    /// In-place mutator
    Mutator(OracleMutator),
}

impl BuiltOracle {
    /// Form of this oracle
    pub fn form(&self) -> OracleForm {
        match self {
            BuiltOracle::Fragment(_) => OracleForm::Fragment,
            BuiltOracle::Mutator(_) => OracleForm::Mutator,
        }
    }

    /// Apply to `circuit` by composition or by mutation
    pub fn apply_to(&self, circuit: &mut Circuit) -> QalgosResult<()> {
        match self {
            BuiltOracle::Fragment(fragment) => circuit.compose(fragment),
            BuiltOracle::Mutator(mutator) => mutator.apply(circuit),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
