//! Circuit transpilation for execution targets
//!
//! Validates a circuit against the target's size and applies peephole
//! optimization according to the optimization level:
//!
//! | Level | Passes |
//! |-------|--------|
//! | 0 | none |
//! | 1 | one sweep of adjacent self-inverse pair cancellation |
//! | 2, 3 | cancellation repeated until nothing changes |
//!
//! Two gates are adjacent when no operation between them touches any of
//! their wires. Barriers and measurements touch their wires, so nothing
//! cancels across them.

use qalgos_core::constants::execution::{DEFAULT_OPTIMIZATION_LEVEL, MAX_OPTIMIZATION_LEVEL};
use qalgos_core::{Circuit, Gate, QalgosError, QalgosResult};

/// Transpiler configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranspilerConfig {
    /// Optimization level (0-3)
    pub optimization_level: u8,

    /// Number of qubits on target
    pub num_qubits: usize,
}

impl Default for TranspilerConfig {
    fn default() -> Self {
        Self {
            optimization_level: DEFAULT_OPTIMIZATION_LEVEL,
            num_qubits: usize::MAX,
        }
    }
}

impl TranspilerConfig {
    /// Create config for a target with `num_qubits` wires
    pub fn for_target(num_qubits: usize) -> Self {
        Self {
            num_qubits,
            ..Default::default()
        }
    }

    /// Set optimization level (clamped to 3)
    pub fn with_optimization_level(mut self, level: u8) -> Self {
        self.optimization_level = level.min(MAX_OPTIMIZATION_LEVEL);
        self
    }
}

/// Summary of a transpilation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranspileReport {
    /// Operations before transpilation
    pub gates_before: usize,
    /// Operations after transpilation
    pub gates_after: usize,
    /// Gate pairs cancelled
    pub cancelled_pairs: usize,
    /// Cancellation sweeps performed
    pub sweeps: usize,
}

/// Circuit transpiler
#[derive(Debug, Clone, Default)]
pub struct Transpiler {
    config: TranspilerConfig,
}

impl Transpiler {
    /// Create new transpiler
    pub fn new(config: TranspilerConfig) -> Self {
        Self { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &TranspilerConfig {
        &self.config
    }

    /// Validate circuit for target
    pub fn validate(&self, circuit: &Circuit) -> QalgosResult<()> {
        if circuit.num_qubits() > self.config.num_qubits {
            return Err(QalgosError::QubitOutOfRange {
                qubit: circuit.num_qubits(),
                max: self.config.num_qubits,
            });
        }
        Ok(())
    }

    /// Validate and optimize `circuit`, returning the new circuit
    pub fn transpile(&self, circuit: &Circuit) -> QalgosResult<(Circuit, TranspileReport)> {
        self.validate(circuit)?;

        let mut gates: Vec<Gate> = circuit.gates().to_vec();
        let gates_before = gates.len();
        let mut cancelled_pairs = 0;
        let mut sweeps = 0;

        let max_sweeps = match self.config.optimization_level {
            0 => 0,
            1 => 1,
            _ => usize::MAX,
        };

        while sweeps < max_sweeps {
            sweeps += 1;
            let removed = cancel_adjacent_pairs(&mut gates);
            cancelled_pairs += removed;
            if removed == 0 {
                break;
            }
        }

        let mut out = Circuit::from_gates(circuit.num_qubits(), circuit.num_clbits(), gates)?;
        if let Some(name) = circuit.name() {
            out.set_name(name);
        }

        let report = TranspileReport {
            gates_before,
            gates_after: out.gate_count(),
            cancelled_pairs,
            sweeps,
        };
        log::debug!(
            "transpile (level {}): {} -> {} ops, {} pairs cancelled",
            self.config.optimization_level,
            report.gates_before,
            report.gates_after,
            report.cancelled_pairs
        );
        Ok((out, report))
    }
}

/// One left-to-right sweep; returns the number of pairs removed
fn cancel_adjacent_pairs(gates: &mut Vec<Gate>) -> usize {
    let mut removed = vec![false; gates.len()];
    let mut pairs = 0;

    for i in 0..gates.len() {
        if removed[i] || !gates[i].is_self_inverse() {
            continue;
        }
        let wires = gates[i].qubits();
        // Next surviving op that shares a wire with gates[i]
        let next = (i + 1..gates.len())
            .find(|&j| !removed[j] && gates[j].qubits().iter().any(|q| wires.contains(q)));
        if let Some(j) = next {
            if gates[j] == gates[i] {
                removed[i] = true;
                removed[j] = true;
                pairs += 1;
            }
        }
    }

    let mut flags = removed.into_iter();
    gates.retain(|_| !flags.next().unwrap_or(false));
    pairs
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use qalgos_core::CircuitBuilder;

    fn at_level(level: u8) -> Transpiler {
        Transpiler::new(TranspilerConfig::default().with_optimization_level(level))
    }

    #[test]
    fn test_level_zero_is_identity() {
        let circuit = CircuitBuilder::new(2).h(0).h(0).build();
        let (out, report) = at_level(0).transpile(&circuit).unwrap();
        assert_eq!(out, circuit);
        assert_eq!(report.cancelled_pairs, 0);
        assert_eq!(report.sweeps, 0);
    }

    #[test]
    fn test_adjacent_pair_cancels() {
        let circuit = CircuitBuilder::new(2).h(0).x(1).h(0).cx(0, 1).build();
        let (out, _) = at_level(1).transpile(&circuit).unwrap();
        assert_eq!(out.gates(), &[Gate::X(1), Gate::Cnot(0, 1)]);
    }

    #[test]
    fn test_barrier_blocks_cancellation() {
        let circuit = CircuitBuilder::new(2).h(0).barrier().h(0).build();
        let (out, report) = at_level(3).transpile(&circuit).unwrap();
        assert_eq!(out.gate_count(), 3);
        assert_eq!(report.cancelled_pairs, 0);
    }

    #[test]
    fn test_interleaved_gate_blocks_cancellation() {
        let circuit = CircuitBuilder::new(2).h(0).cx(0, 1).h(0).build();
        let (out, _) = at_level(3).transpile(&circuit).unwrap();
        assert_eq!(out.gate_count(), 3);
    }

    #[test]
    fn test_non_self_inverse_kept() {
        let circuit = CircuitBuilder::new(1).s(0).s(0).build();
        let (out, _) = at_level(3).transpile(&circuit).unwrap();
        assert_eq!(out.gate_count(), 2);
    }

    #[test]
    fn test_nested_pairs_need_higher_level() {
        // H X X H: level 1 removes X X only; level 2 also removes H H
        let circuit = CircuitBuilder::new(1).h(0).x(0).x(0).h(0).build();

        let (out1, _) = at_level(1).transpile(&circuit).unwrap();
        assert_eq!(out1.gates(), &[Gate::H(0), Gate::H(0)]);

        let (out2, report) = at_level(2).transpile(&circuit).unwrap();
        assert!(out2.is_empty());
        assert_eq!(report.cancelled_pairs, 2);
    }

    #[test]
    fn test_validate_width() {
        let circuit = Circuit::new(10);
        let transpiler = Transpiler::new(TranspilerConfig::for_target(5));
        assert!(matches!(
            transpiler.validate(&circuit),
            Err(QalgosError::QubitOutOfRange { qubit: 10, max: 5 })
        ));
    }

    #[test]
    fn test_level_clamped() {
        let config = TranspilerConfig::default().with_optimization_level(9);
        assert_eq!(config.optimization_level, 3);
    }

    #[test]
    fn test_name_and_registers_preserved() {
        let circuit = CircuitBuilder::with_clbits(2, 1)
            .named("keep")
            .x(0)
            .x(0)
            .measure(1, 0)
            .build();
        let (out, _) = at_level(1).transpile(&circuit).unwrap();
        assert_eq!(out.name(), Some("keep"));
        assert_eq!(out.num_clbits(), 1);
        assert_eq!(out.gates(), &[Gate::Measure(1, 0)]);
    }
}
