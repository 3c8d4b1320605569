//! Circuit builder for qalgos
//!
//! Fluent, consuming-self builder for assembling circuits. The first
//! rejected operation is remembered and surfaced by
//! [`CircuitBuilder::try_build`]; later operations are still recorded.

use crate::circuit::Circuit;
use crate::error::{QalgosError, QalgosResult};
use crate::gate::Gate;
use crate::types::{Angle, ClbitId, QubitId};
use std::ops::Range;

/// Fluent circuit builder (consuming self pattern)
pub struct CircuitBuilder {
    /// Internal circuit being built
    circuit: Circuit,

    /// First error raised while building
    error: Option<QalgosError>,
}

impl CircuitBuilder {
    // ========================================================================
    // Constructor
    // ========================================================================

    /// Create a new circuit builder without classical bits
    pub fn new(num_qubits: usize) -> Self {
        Self::with_clbits(num_qubits, 0)
    }

    /// Create a builder with a classical register
    pub fn with_clbits(num_qubits: usize, num_clbits: usize) -> Self {
        Self {
            circuit: Circuit::with_clbits(num_qubits, num_clbits),
            error: None,
        }
    }

    /// Set circuit name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.circuit.set_name(name);
        self
    }

    /// Add an arbitrary gate
    pub fn gate(mut self, gate: Gate) -> Self {
        self.push(gate);
        self
    }

    fn push(&mut self, gate: Gate) {
        if let Err(err) = self.circuit.add_gate(gate) {
            self.error.get_or_insert(err);
        }
    }

    // ========================================================================
    // Single-Qubit Gates
    // ========================================================================

    /// Add Hadamard gate
    pub fn h(self, qubit: QubitId) -> Self {
        self.gate(Gate::H(qubit))
    }

    /// Add Pauli-X gate
    pub fn x(self, qubit: QubitId) -> Self {
        self.gate(Gate::X(qubit))
    }

    /// Add Pauli-Y gate
    pub fn y(self, qubit: QubitId) -> Self {
        self.gate(Gate::Y(qubit))
    }

    /// Add Pauli-Z gate
    pub fn z(self, qubit: QubitId) -> Self {
        self.gate(Gate::Z(qubit))
    }

    /// Add S gate
    pub fn s(self, qubit: QubitId) -> Self {
        self.gate(Gate::S(qubit))
    }

    /// Add S-dagger gate
    pub fn sdg(self, qubit: QubitId) -> Self {
        self.gate(Gate::Sdg(qubit))
    }

    /// Add T gate
    pub fn t(self, qubit: QubitId) -> Self {
        self.gate(Gate::T(qubit))
    }

    /// Add T-dagger gate
    pub fn tdg(self, qubit: QubitId) -> Self {
        self.gate(Gate::Tdg(qubit))
    }

    /// Add Rx rotation
    pub fn rx(self, qubit: QubitId, angle: Angle) -> Self {
        self.gate(Gate::Rx(qubit, angle))
    }

    /// Add Ry rotation
    pub fn ry(self, qubit: QubitId, angle: Angle) -> Self {
        self.gate(Gate::Ry(qubit, angle))
    }

    /// Add Rz rotation
    pub fn rz(self, qubit: QubitId, angle: Angle) -> Self {
        self.gate(Gate::Rz(qubit, angle))
    }

    // ========================================================================
    // Two-Qubit Gates
    // ========================================================================

    /// Add CNOT gate
    pub fn cnot(self, control: QubitId, target: QubitId) -> Self {
        self.gate(Gate::Cnot(control, target))
    }

    /// Alias for cnot
    pub fn cx(self, control: QubitId, target: QubitId) -> Self {
        self.cnot(control, target)
    }

    /// Add CZ gate
    pub fn cz(self, control: QubitId, target: QubitId) -> Self {
        self.gate(Gate::Cz(control, target))
    }

    /// Add SWAP gate
    pub fn swap(self, qubit1: QubitId, qubit2: QubitId) -> Self {
        self.gate(Gate::Swap(qubit1, qubit2))
    }

    // ========================================================================
    // Layers
    // ========================================================================

    /// Add Hadamard on every wire in `wires`
    pub fn h_on(mut self, wires: Range<QubitId>) -> Self {
        for q in wires {
            self.push(Gate::H(q));
        }
        self
    }

    /// Add Hadamard layer on all qubits
    pub fn h_layer(self) -> Self {
        let n = self.circuit.num_qubits();
        self.h_on(0..n)
    }

    /// Append another circuit's operations (identity wire mapping)
    pub fn compose(mut self, fragment: &Circuit) -> Self {
        if let Err(err) = self.circuit.compose(fragment) {
            self.error.get_or_insert(err);
        }
        self
    }

    /// Run an in-place edit on the circuit being built
    pub fn apply<F>(mut self, edit: F) -> Self
    where
        F: FnOnce(&mut Circuit) -> QalgosResult<()>,
    {
        if let Err(err) = edit(&mut self.circuit) {
            self.error.get_or_insert(err);
        }
        self
    }

    // ========================================================================
    // Measurement and Control
    // ========================================================================

    /// Measure `qubit` into `clbit`
    pub fn measure(self, qubit: QubitId, clbit: ClbitId) -> Self {
        self.gate(Gate::Measure(qubit, clbit))
    }

    /// Measure wires `0..n` into clbits `0..n`
    pub fn measure_range(mut self, n: usize) -> Self {
        for i in 0..n {
            self.push(Gate::Measure(i, i));
        }
        self
    }

    /// Add barrier across all qubits
    pub fn barrier(self) -> Self {
        let qubits: Vec<QubitId> = (0..self.circuit.num_qubits()).collect();
        self.gate(Gate::Barrier(qubits))
    }

    /// Add barrier on specific qubits
    pub fn barrier_on(self, qubits: Vec<QubitId>) -> Self {
        self.gate(Gate::Barrier(qubits))
    }

    // ========================================================================
    // Build
    // ========================================================================

    /// Build and return the circuit, keeping only accepted operations
    pub fn build(self) -> Circuit {
        self.circuit
    }

    /// Build, failing with the first rejected operation
    pub fn try_build(self) -> QalgosResult<Circuit> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.circuit),
        }
    }

    /// Get reference to current circuit state
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// Get number of qubits
    pub fn num_qubits(&self) -> usize {
        self.circuit.num_qubits()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_basic() {
        let circuit = CircuitBuilder::with_clbits(3, 2)
            .x(2)
            .h_layer()
            .barrier()
            .cnot(0, 2)
            .measure_range(2)
            .build();

        assert_eq!(circuit.num_qubits(), 3);
        assert_eq!(circuit.num_clbits(), 2);
        assert_eq!(circuit.count_named("h"), 3);
        assert_eq!(circuit.count_measurements(), 2);
        assert_eq!(circuit.gates()[4], Gate::Barrier(vec![0, 1, 2]));
    }

    #[test]
    fn test_h_on_range() {
        let circuit = CircuitBuilder::new(4).h_on(0..3).build();
        assert_eq!(circuit.gates(), &[Gate::H(0), Gate::H(1), Gate::H(2)]);
    }

    #[test]
    fn test_try_build_reports_first_error() {
        let result = CircuitBuilder::new(2).h(0).h(7).x(9).try_build();
        assert_eq!(
            result.unwrap_err(),
            QalgosError::GateQubitMismatch {
                qubit: 7,
                num_qubits: 2
            }
        );
    }

    #[test]
    fn test_build_keeps_accepted_gates() {
        let circuit = CircuitBuilder::new(2).h(0).h(7).x(1).build();
        assert_eq!(circuit.gates(), &[Gate::H(0), Gate::X(1)]);
    }

    #[test]
    fn test_named_and_compose() {
        let fragment = CircuitBuilder::new(2).cx(0, 1).build();
        let circuit = CircuitBuilder::with_clbits(2, 1)
            .named("demo")
            .compose(&fragment)
            .try_build()
            .unwrap();
        assert_eq!(circuit.name(), Some("demo"));
        assert_eq!(circuit.gate_count(), 1);
    }

    #[test]
    fn test_apply_edit() {
        let circuit = CircuitBuilder::new(2)
            .h(0)
            .apply(|c| c.add_gate(Gate::Cnot(0, 1)))
            .x(1)
            .build();
        assert_eq!(circuit.gates(), &[Gate::H(0), Gate::Cnot(0, 1), Gate::X(1)]);

        let err = CircuitBuilder::new(1)
            .apply(|c| c.add_gate(Gate::X(3)))
            .try_build()
            .unwrap_err();
        assert!(err.is_circuit_error());
    }
}
