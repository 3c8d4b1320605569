//! Quantum circuit structure for qalgos
//!
//! A circuit is an ordered operation list over `num_qubits` wires and
//! `num_clbits` classical bits. Oracle fragments carry no classical bits;
//! algorithm circuits carry one classical bit per input wire.

use crate::error::{QalgosError, QalgosResult};
use crate::gate::Gate;
use crate::types::QubitId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Quantum circuit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    /// Number of qubits
    num_qubits: usize,

    /// Number of classical bits
    num_clbits: usize,

    /// Gate sequence
    gates: Vec<Gate>,

    /// Optional circuit name
    name: Option<String>,
}

impl Circuit {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create a new empty circuit without classical bits
    pub fn new(num_qubits: usize) -> Self {
        Self::with_clbits(num_qubits, 0)
    }

    /// Create a new empty circuit with a classical register
    pub fn with_clbits(num_qubits: usize, num_clbits: usize) -> Self {
        Self {
            num_qubits,
            num_clbits,
            gates: Vec::new(),
            name: None,
        }
    }

    /// Create a circuit with a name
    pub fn with_name(num_qubits: usize, num_clbits: usize, name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::with_clbits(num_qubits, num_clbits)
        }
    }

    /// Create from a vector of gates
    pub fn from_gates(num_qubits: usize, num_clbits: usize, gates: Vec<Gate>) -> QalgosResult<Self> {
        let mut circuit = Self::with_clbits(num_qubits, num_clbits);
        circuit.add_gates(gates)?;
        Ok(circuit)
    }

    // ========================================================================
    // Basic Operations
    // ========================================================================

    /// Add a gate to the circuit
    pub fn add_gate(&mut self, gate: Gate) -> QalgosResult<()> {
        self.check_gate(&gate)?;
        self.gates.push(gate);
        Ok(())
    }

    /// Add multiple gates
    pub fn add_gates(&mut self, gates: impl IntoIterator<Item = Gate>) -> QalgosResult<()> {
        for gate in gates {
            self.add_gate(gate)?;
        }
        Ok(())
    }

    /// Append every operation of `fragment` with identity wire mapping.
    ///
    /// The fragment may be narrower than `self`, never wider. Nothing is
    /// appended when the widths do not fit.
    pub fn compose(&mut self, fragment: &Circuit) -> QalgosResult<()> {
        if fragment.num_qubits > self.num_qubits || fragment.num_clbits > self.num_clbits {
            return Err(QalgosError::ComposeMismatch {
                fragment_qubits: fragment.num_qubits,
                fragment_clbits: fragment.num_clbits,
                host_qubits: self.num_qubits,
                host_clbits: self.num_clbits,
            });
        }
        self.gates.extend(fragment.gates.iter().cloned());
        Ok(())
    }

    /// Clear all gates
    pub fn clear(&mut self) {
        self.gates.clear();
    }

    /// Get number of qubits
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Get number of classical bits
    pub fn num_clbits(&self) -> usize {
        self.num_clbits
    }

    /// Get gates
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Get circuit name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Set circuit name
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Check if circuit is empty
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    // ========================================================================
    // Circuit Analysis
    // ========================================================================

    /// Calculate circuit depth (longest path).
    ///
    /// Barriers align the wires they span but add no layer of their own.
    pub fn depth(&self) -> usize {
        let mut qubit_depths = vec![0usize; self.num_qubits];

        for gate in &self.gates {
            let qubits = gate.qubits();
            let max_depth = qubits
                .iter()
                .filter_map(|&q| qubit_depths.get(q))
                .max()
                .copied()
                .unwrap_or(0);
            let next = if gate.is_barrier() {
                max_depth
            } else {
                max_depth + 1
            };
            for &q in &qubits {
                if q < self.num_qubits {
                    qubit_depths[q] = next;
                }
            }
        }

        qubit_depths.into_iter().max().unwrap_or(0)
    }

    /// Get total gate count (including measurements and barriers)
    pub fn gate_count(&self) -> usize {
        self.gates.len()
    }

    /// Count single-qubit gates
    pub fn count_1q(&self) -> usize {
        self.gates.iter().filter(|g| g.is_single_qubit()).count()
    }

    /// Count two-qubit gates
    pub fn count_2q(&self) -> usize {
        self.gates.iter().filter(|g| g.is_two_qubit()).count()
    }

    /// Count measurement operations
    pub fn count_measurements(&self) -> usize {
        self.gates.iter().filter(|g| g.is_measurement()).count()
    }

    /// Count barriers
    pub fn count_barriers(&self) -> usize {
        self.gates.iter().filter(|g| g.is_barrier()).count()
    }

    /// Count gates with the given QASM name (e.g. "h", "cx")
    pub fn count_named(&self, name: &str) -> usize {
        self.gates.iter().filter(|g| g.name() == name).count()
    }

    /// Get qubits touched by any operation, in ascending order
    pub fn used_qubits(&self) -> BTreeSet<QubitId> {
        self.gates.iter().flat_map(|g| g.qubits()).collect()
    }

    /// Get measured qubits, in ascending order
    pub fn measured_qubits(&self) -> BTreeSet<QubitId> {
        self.gates
            .iter()
            .filter(|g| g.is_measurement())
            .flat_map(|g| g.qubits())
            .collect()
    }

    // ========================================================================
    // Validation
    // ========================================================================

    fn check_gate(&self, gate: &Gate) -> QalgosResult<()> {
        for qubit in gate.qubits() {
            if qubit >= self.num_qubits {
                return Err(QalgosError::GateQubitMismatch {
                    qubit,
                    num_qubits: self.num_qubits,
                });
            }
        }
        if let Some(clbit) = gate.clbit() {
            if clbit >= self.num_clbits {
                return Err(QalgosError::ClbitOutOfRange {
                    clbit,
                    num_clbits: self.num_clbits,
                });
            }
        }
        Ok(())
    }

    // ========================================================================
    // QASM Conversion
    // ========================================================================

    /// Convert to OpenQASM 2.0 string
    pub fn to_qasm(&self) -> String {
        let mut lines = Vec::new();

        lines.push("OPENQASM 2.0;".to_string());
        lines.push("include \"qelib1.inc\";".to_string());
        lines.push(String::new());

        lines.push(format!("qreg q[{}];", self.num_qubits));
        if self.num_clbits > 0 {
            lines.push(format!("creg c[{}];", self.num_clbits));
        }
        lines.push(String::new());

        for gate in &self.gates {
            lines.push(gate.to_qasm());
        }

        lines.join("\n")
    }
}

// ============================================================================
// Display
// ============================================================================

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Circuit '{}' ({} qubits, {} clbits, {} ops)",
            self.name.as_deref().unwrap_or("unnamed"),
            self.num_qubits,
            self.num_clbits,
            self.gates.len()
        )?;
        writeln!(f, "  Depth: {}", self.depth())?;
        writeln!(f, "  1Q gates: {}", self.count_1q())?;
        writeln!(f, "  2Q gates: {}", self.count_2q())?;
        writeln!(f, "  Measurements: {}", self.count_measurements())?;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
