//! Quantum gate definitions for qalgos
//!
//! The operation set needed to express oracle circuits: Clifford+T
//! single-qubit gates, axis rotations, two-qubit entanglers, measurement
//! into a named classical bit, and barriers.

use crate::types::{Angle, ClbitId, QubitId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Quantum gate enumeration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Gate {
    // ========================================================================
    // Single-Qubit Gates (Non-Parameterized)
    // ========================================================================
    /// Hadamard gate
    H(QubitId),

    /// Pauli-X gate (NOT)
    X(QubitId),

    /// Pauli-Y gate
    Y(QubitId),

    /// Pauli-Z gate
    Z(QubitId),

    /// S gate (sqrt(Z))
    S(QubitId),

    /// S-dagger gate (inverse of S)
    Sdg(QubitId),

    /// T gate (fourth root of Z)
    T(QubitId),

    /// T-dagger gate (inverse of T)
    Tdg(QubitId),

    // ========================================================================
    // Single-Qubit Parameterized Rotation Gates
    // ========================================================================
    /// Rotation around X-axis
    Rx(QubitId, Angle),

    /// Rotation around Y-axis
    Ry(QubitId, Angle),

    /// Rotation around Z-axis
    Rz(QubitId, Angle),

    // ========================================================================
    // Two-Qubit Gates
    // ========================================================================
    /// Controlled-NOT (control, target)
    Cnot(QubitId, QubitId),

    /// Controlled-Z
    Cz(QubitId, QubitId),

    /// SWAP gate
    Swap(QubitId, QubitId),

    // ========================================================================
    // Measurement and Control
    // ========================================================================
    /// Measure a qubit into a classical bit
    Measure(QubitId, ClbitId),

    /// Barrier over the listed wires
    Barrier(Vec<QubitId>),
}

impl Gate {
    // ========================================================================
    // Gate Properties
    // ========================================================================

    /// Get qubits involved in this gate
    pub fn qubits(&self) -> Vec<QubitId> {
        match self {
            Gate::H(q)
            | Gate::X(q)
            | Gate::Y(q)
            | Gate::Z(q)
            | Gate::S(q)
            | Gate::Sdg(q)
            | Gate::T(q)
            | Gate::Tdg(q)
            | Gate::Rx(q, _)
            | Gate::Ry(q, _)
            | Gate::Rz(q, _)
            | Gate::Measure(q, _) => vec![*q],

            Gate::Cnot(a, b) | Gate::Cz(a, b) | Gate::Swap(a, b) => vec![*a, *b],

            Gate::Barrier(qs) => qs.clone(),
        }
    }

    /// Get the classical bit written by this gate
    pub fn clbit(&self) -> Option<ClbitId> {
        match self {
            Gate::Measure(_, c) => Some(*c),
            _ => None,
        }
    }

    /// Check if gate is single-qubit unitary
    pub fn is_single_qubit(&self) -> bool {
        matches!(
            self,
            Gate::H(_)
                | Gate::X(_)
                | Gate::Y(_)
                | Gate::Z(_)
                | Gate::S(_)
                | Gate::Sdg(_)
                | Gate::T(_)
                | Gate::Tdg(_)
                | Gate::Rx(_, _)
                | Gate::Ry(_, _)
                | Gate::Rz(_, _)
        )
    }

    /// Check if gate is two-qubit
    pub fn is_two_qubit(&self) -> bool {
        matches!(self, Gate::Cnot(_, _) | Gate::Cz(_, _) | Gate::Swap(_, _))
    }

    /// Check if gate is a unitary operation (not measurement or barrier)
    pub fn is_unitary(&self) -> bool {
        self.is_single_qubit() || self.is_two_qubit()
    }

    /// Check if applying the gate twice is the identity
    pub fn is_self_inverse(&self) -> bool {
        matches!(
            self,
            Gate::H(_)
                | Gate::X(_)
                | Gate::Y(_)
                | Gate::Z(_)
                | Gate::Cnot(_, _)
                | Gate::Cz(_, _)
                | Gate::Swap(_, _)
        )
    }

    /// Check if gate is measurement
    pub fn is_measurement(&self) -> bool {
        matches!(self, Gate::Measure(_, _))
    }

    /// Check if gate is a barrier
    pub fn is_barrier(&self) -> bool {
        matches!(self, Gate::Barrier(_))
    }

    /// Get gate name
    pub fn name(&self) -> &'static str {
        match self {
            Gate::H(_) => "h",
            Gate::X(_) => "x",
            Gate::Y(_) => "y",
            Gate::Z(_) => "z",
            Gate::S(_) => "s",
            Gate::Sdg(_) => "sdg",
            Gate::T(_) => "t",
            Gate::Tdg(_) => "tdg",
            Gate::Rx(_, _) => "rx",
            Gate::Ry(_, _) => "ry",
            Gate::Rz(_, _) => "rz",
            Gate::Cnot(_, _) => "cx",
            Gate::Cz(_, _) => "cz",
            Gate::Swap(_, _) => "swap",
            Gate::Measure(_, _) => "measure",
            Gate::Barrier(_) => "barrier",
        }
    }

    /// Convert to OpenQASM 2.0 string
    pub fn to_qasm(&self) -> String {
        match self {
            Gate::Rx(q, theta) | Gate::Ry(q, theta) | Gate::Rz(q, theta) => {
                format!("{}({}) q[{}];", self.name(), theta, q)
            }
            Gate::Cnot(a, b) | Gate::Cz(a, b) | Gate::Swap(a, b) => {
                format!("{} q[{}],q[{}];", self.name(), a, b)
            }
            Gate::Measure(q, c) => format!("measure q[{}] -> c[{}];", q, c),
            Gate::Barrier(qs) => {
                if qs.is_empty() {
                    "barrier q;".to_string()
                } else {
                    let qubits: Vec<String> = qs.iter().map(|q| format!("q[{}]", q)).collect();
                    format!("barrier {};", qubits.join(","))
                }
            }
            single => match single.qubits().first() {
                Some(q) => format!("{} q[{}];", single.name(), q),
                None => format!("{};", single.name()),
            },
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_qasm())
    }
}

// ============================================================================
// Tests
// ============================================================================
