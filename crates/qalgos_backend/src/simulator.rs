//! Simulator backend for qalgos
//!
//! Ideal (noiseless) state-vector simulator. The circuit is evolved once,
//! the outcome distribution over the classical register is computed
//! exactly, and shots are sampled from it.
//!
//! Measurements must be terminal: once a wire is measured no further
//! unitary may act on it. Outcome strings print the classical register
//! with clbit 0 as the rightmost character.

use crate::execution::{Backend, ExecutionMetadata, ExecutionResult};
use num_complex::Complex64;
use qalgos_core::constants::execution::{MAX_SHOTS, MIN_SHOTS};
use qalgos_core::constants::simulator::{
    BACKEND_NAME, DEFAULT_MAX_QUBITS, MAX_SIMULATOR_QUBITS, PROBABILITY_EPSILON,
};
use qalgos_core::{Circuit, ClbitId, Counts, Gate, QalgosError, QalgosResult, QubitId};
use rand::prelude::*;
use rand::rngs::StdRng;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::f64::consts::{FRAC_1_SQRT_2, PI};
use std::time::Instant;

/// Exact outcome distribution: classical register string -> probability
pub type Distribution = BTreeMap<String, f64>;

/// Ideal state-vector simulator backend
#[derive(Debug, Clone)]
pub struct SimulatorBackend {
    /// Backend name
    name: String,

    /// Qubit capacity
    num_qubits: usize,

    /// Random seed
    seed: Option<u64>,
}

impl Default for SimulatorBackend {
    fn default() -> Self {
        Self::ideal(DEFAULT_MAX_QUBITS)
    }
}

impl SimulatorBackend {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create ideal (noiseless) simulator with the given qubit capacity
    /// (clamped to [`MAX_SIMULATOR_QUBITS`])
    pub fn ideal(num_qubits: usize) -> Self {
        Self {
            name: BACKEND_NAME.to_string(),
            num_qubits: num_qubits.min(MAX_SIMULATOR_QUBITS),
            seed: None,
        }
    }

    /// Set seed for reproducibility
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set or clear the seed
    pub fn with_optional_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Set backend name
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Seed in use, if any
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    // ========================================================================
    // Exact Evaluation
    // ========================================================================

    /// Final state vector of the circuit's unitary part (measurements and
    /// barriers are skipped). Amplitude index bit `q` is wire `q`.
    pub fn statevector(&self, circuit: &Circuit) -> QalgosResult<Vec<Complex64>> {
        Ok(self.evolve(circuit)?.0)
    }

    /// Exact probability of every reachable classical outcome
    pub fn probabilities(&self, circuit: &Circuit) -> QalgosResult<Distribution> {
        let (state, measured) = self.evolve(circuit)?;
        let num_clbits = circuit.num_clbits();

        let mut dist = Distribution::new();
        for (index, amp) in state.iter().enumerate() {
            let p = amp.norm_sqr();
            if p < PROBABILITY_EPSILON {
                continue;
            }
            let mut bits = vec![false; num_clbits];
            for &(qubit, clbit) in &measured {
                bits[clbit] = (index >> qubit) & 1 == 1;
            }
            let key: String = bits.iter().rev().map(|&b| if b { '1' } else { '0' }).collect();
            *dist.entry(key).or_insert(0.0) += p;
        }
        Ok(dist)
    }

    // ========================================================================
    // Simulation
    // ========================================================================

    /// Apply every unitary, recording (qubit, clbit) measurement pairs
    fn evolve(&self, circuit: &Circuit) -> QalgosResult<(Vec<Complex64>, Vec<(QubitId, ClbitId)>)> {
        let n = circuit.num_qubits();
        if n > self.num_qubits {
            return Err(QalgosError::QubitOutOfRange {
                qubit: n,
                max: self.num_qubits,
            });
        }

        // Deserialized circuits bypass add_gate validation
        let num_clbits = circuit.num_clbits();
        for gate in circuit.gates() {
            if let Some(&qubit) = gate.qubits().iter().find(|&&q| q >= n) {
                return Err(QalgosError::GateQubitMismatch { qubit, num_qubits: n });
            }
            if let Some(clbit) = gate.clbit().filter(|&c| c >= num_clbits) {
                return Err(QalgosError::ClbitOutOfRange { clbit, num_clbits });
            }
        }

        let mut state = vec![Complex64::new(0.0, 0.0); 1 << n];
        state[0] = Complex64::new(1.0, 0.0);

        let mut measured: Vec<(QubitId, ClbitId)> = Vec::new();
        let mut measured_set: HashSet<QubitId> = HashSet::new();

        for gate in circuit.gates() {
            match gate {
                Gate::Measure(q, c) => {
                    measured.push((*q, *c));
                    measured_set.insert(*q);
                }
                Gate::Barrier(_) => {}
                unitary => {
                    if let Some(q) = unitary.qubits().into_iter().find(|q| measured_set.contains(q)) {
                        return Err(QalgosError::MeasuredQubitReused(q));
                    }
                    apply_gate(&mut state, unitary);
                }
            }
        }

        Ok((state, measured))
    }

    /// Sample `shots` outcomes from an exact distribution
    fn sample(dist: &Distribution, shots: u64, rng: &mut StdRng) -> Counts {
        let mut outcomes: Vec<&String> = Vec::with_capacity(dist.len());
        let mut cumulative: Vec<f64> = Vec::with_capacity(dist.len());
        let mut total = 0.0;
        for (key, &p) in dist {
            total += p;
            outcomes.push(key);
            cumulative.push(total);
        }

        let mut counts: Counts = HashMap::new();
        if outcomes.is_empty() {
            return counts;
        }
        for _ in 0..shots {
            let r: f64 = rng.gen::<f64>() * total;
            let idx = cumulative.partition_point(|&c| c <= r).min(outcomes.len() - 1);
            *counts.entry(outcomes[idx].clone()).or_insert(0) += 1;
        }
        counts
    }
}

impl Backend for SimulatorBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    fn execute(&self, circuit: &Circuit, shots: u64) -> QalgosResult<ExecutionResult> {
        if !(MIN_SHOTS..=self.max_shots()).contains(&shots) {
            return Err(QalgosError::ShotsOutOfRange(shots, MIN_SHOTS, self.max_shots()));
        }

        let started = Instant::now();
        let dist = self.probabilities(circuit)?;

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let counts = Self::sample(&dist, shots, &mut rng);

        log::debug!(
            "{}: {} qubits, {} outcomes, {} shots",
            self.name,
            circuit.num_qubits(),
            dist.len(),
            shots
        );

        Ok(ExecutionResult {
            counts,
            shots,
            metadata: ExecutionMetadata {
                backend: self.name.clone(),
                execution_time_ms: Some(started.elapsed().as_millis() as u64),
                simulated: true,
                seed: self.seed,
                gate_count: Some(circuit.gate_count()),
                depth: Some(circuit.depth()),
                ..Default::default()
            },
        })
    }

    fn is_simulator(&self) -> bool {
        true
    }

    fn max_shots(&self) -> u64 {
        MAX_SHOTS
    }
}

// ============================================================================
// Gate Application
// ============================================================================

fn apply_gate(state: &mut [Complex64], gate: &Gate) {
    let i = Complex64::i();
    match *gate {
        Gate::H(q) => apply_single_qubit_gate(state, q, |a, b| {
            ((a + b) * FRAC_1_SQRT_2, (a - b) * FRAC_1_SQRT_2)
        }),
        Gate::X(q) => apply_single_qubit_gate(state, q, |a, b| (b, a)),
        Gate::Y(q) => apply_single_qubit_gate(state, q, |a, b| (-i * b, i * a)),
        Gate::Z(q) => apply_single_qubit_gate(state, q, |a, b| (a, -b)),
        Gate::S(q) => apply_phase(state, q, Complex64::from_polar(1.0, PI / 2.0)),
        Gate::Sdg(q) => apply_phase(state, q, Complex64::from_polar(1.0, -PI / 2.0)),
        Gate::T(q) => apply_phase(state, q, Complex64::from_polar(1.0, PI / 4.0)),
        Gate::Tdg(q) => apply_phase(state, q, Complex64::from_polar(1.0, -PI / 4.0)),
        Gate::Rx(q, angle) => {
            let c = (angle / 2.0).cos();
            let s = Complex64::new(0.0, -(angle / 2.0).sin());
            apply_single_qubit_gate(state, q, |a, b| (a * c + b * s, a * s + b * c))
        }
        Gate::Ry(q, angle) => {
            let c = (angle / 2.0).cos();
            let s = (angle / 2.0).sin();
            apply_single_qubit_gate(state, q, |a, b| (a * c - b * s, a * s + b * c))
        }
        Gate::Rz(q, angle) => {
            let neg = Complex64::from_polar(1.0, -angle / 2.0);
            let pos = Complex64::from_polar(1.0, angle / 2.0);
            apply_single_qubit_gate(state, q, |a, b| (a * neg, b * pos))
        }
        Gate::Cnot(control, target) => {
            let (cm, tm) = (1 << control, 1 << target);
            for idx in 0..state.len() {
                if idx & cm != 0 && idx & tm == 0 {
                    state.swap(idx, idx | tm);
                }
            }
        }
        Gate::Cz(q1, q2) => {
            let mask = (1 << q1) | (1 << q2);
            for (idx, amp) in state.iter_mut().enumerate() {
                if idx & mask == mask {
                    *amp = -*amp;
                }
            }
        }
        Gate::Swap(q1, q2) => {
            let (m1, m2) = (1 << q1, 1 << q2);
            for idx in 0..state.len() {
                if idx & m1 != 0 && idx & m2 == 0 {
                    state.swap(idx, idx ^ m1 ^ m2);
                }
            }
        }
        Gate::Measure(_, _) | Gate::Barrier(_) => {}
    }
}

fn apply_phase(state: &mut [Complex64], q: usize, phase: Complex64) {
    apply_single_qubit_gate(state, q, |a, b| (a, b * phase));
}

fn apply_single_qubit_gate<F>(state: &mut [Complex64], q: usize, f: F)
where
    F: Fn(Complex64, Complex64) -> (Complex64, Complex64),
{
    let mask = 1 << q;
    for i in 0..state.len() {
        if i & mask == 0 {
            let j = i | mask;
            let (new_i, new_j) = f(state[i], state[j]);
            state[i] = new_i;
            state[j] = new_j;
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use qalgos_core::CircuitBuilder;

    #[test]
    fn test_bell_distribution() {
        let circuit = CircuitBuilder::with_clbits(2, 2)
            .h(0)
            .cnot(0, 1)
            .measure_range(2)
            .build();
        let dist = SimulatorBackend::ideal(2).probabilities(&circuit).unwrap();
        assert_eq!(dist.len(), 2);
        assert_relative_eq!(dist["00"], 0.5, epsilon = 1e-12);
        assert_relative_eq!(dist["11"], 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_clbit_zero_is_rightmost() {
        let circuit = CircuitBuilder::with_clbits(3, 3)
            .x(0)
            .measure_range(3)
            .build();
        let dist = SimulatorBackend::ideal(3).probabilities(&circuit).unwrap();
        assert_relative_eq!(dist["001"], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_unmeasured_wires_are_traced_out() {
        // Wire 2 is in superposition but never measured
        let circuit = CircuitBuilder::with_clbits(3, 2)
            .x(1)
            .h(2)
            .measure_range(2)
            .build();
        let dist = SimulatorBackend::ideal(3).probabilities(&circuit).unwrap();
        assert_eq!(dist.len(), 1);
        assert_relative_eq!(dist["10"], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_measure_into_other_clbit() {
        let circuit = CircuitBuilder::with_clbits(2, 2).x(0).measure(0, 1).build();
        let dist = SimulatorBackend::ideal(2).probabilities(&circuit).unwrap();
        assert_relative_eq!(dist["10"], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_gate_after_measurement_rejected() {
        let circuit = CircuitBuilder::with_clbits(1, 1).measure(0, 0).x(0).build();
        let err = SimulatorBackend::ideal(1).probabilities(&circuit).unwrap_err();
        assert_eq!(err, QalgosError::MeasuredQubitReused(0));
    }

    #[test]
    fn test_rotations_and_phases() {
        let backend = SimulatorBackend::ideal(1);

        let circuit = CircuitBuilder::with_clbits(1, 1).rx(0, PI).measure(0, 0).build();
        assert_relative_eq!(backend.probabilities(&circuit).unwrap()["1"], 1.0, epsilon = 1e-12);

        let circuit = CircuitBuilder::with_clbits(1, 1).ry(0, PI).measure(0, 0).build();
        assert_relative_eq!(backend.probabilities(&circuit).unwrap()["1"], 1.0, epsilon = 1e-12);

        // H S S H = H Z H = X
        let circuit = CircuitBuilder::with_clbits(1, 1)
            .h(0)
            .s(0)
            .s(0)
            .h(0)
            .measure(0, 0)
            .build();
        assert_relative_eq!(backend.probabilities(&circuit).unwrap()["1"], 1.0, epsilon = 1e-12);

        // H T T Tdg Tdg H = identity
        let circuit = CircuitBuilder::with_clbits(1, 1)
            .h(0)
            .t(0)
            .t(0)
            .tdg(0)
            .tdg(0)
            .h(0)
            .measure(0, 0)
            .build();
        assert_relative_eq!(backend.probabilities(&circuit).unwrap()["0"], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_cz_and_swap() {
        // |+>|1> --CZ--> |->|1>, then H gives |1>|1>
        let circuit = CircuitBuilder::with_clbits(2, 2)
            .h(0)
            .x(1)
            .cz(0, 1)
            .h(0)
            .measure_range(2)
            .build();
        let dist = SimulatorBackend::ideal(2).probabilities(&circuit).unwrap();
        assert_relative_eq!(dist["11"], 1.0, epsilon = 1e-12);

        let circuit = CircuitBuilder::with_clbits(2, 2).x(0).swap(0, 1).measure_range(2).build();
        let dist = SimulatorBackend::ideal(2).probabilities(&circuit).unwrap();
        assert_relative_eq!(dist["10"], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_statevector_norm() {
        let circuit = CircuitBuilder::new(3).h_layer().cnot(0, 2).y(1).build();
        let state = SimulatorBackend::ideal(3).statevector(&circuit).unwrap();
        let norm: f64 = state.iter().map(|a| a.norm_sqr()).sum();
        assert_relative_eq!(norm, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_execute_seeded_is_reproducible() {
        let circuit = CircuitBuilder::with_clbits(2, 2).h(0).h(1).measure_range(2).build();
        let backend = SimulatorBackend::ideal(2).with_seed(42);
        let a = backend.execute(&circuit, 500).unwrap();
        let b = backend.execute(&circuit, 500).unwrap();
        assert_eq!(a.counts, b.counts);
        assert_eq!(a.total_counts(), 500);
        assert_eq!(a.metadata.seed, Some(42));
    }

    #[test]
    fn test_execute_rejects_bad_input() {
        let backend = SimulatorBackend::ideal(2);
        let too_wide = Circuit::with_clbits(3, 1);
        assert!(matches!(
            backend.execute(&too_wide, 10),
            Err(QalgosError::QubitOutOfRange { qubit: 3, max: 2 })
        ));

        let circuit = Circuit::with_clbits(1, 1);
        assert!(matches!(
            backend.execute(&circuit, 0),
            Err(QalgosError::ShotsOutOfRange(0, _, _))
        ));
    }

    #[test]
    fn test_deserialized_circuit_is_revalidated() {
        let bad_clbit: Circuit = serde_json::from_str(
            r#"{"num_qubits":1,"num_clbits":1,"gates":[{"Measure":[0,5]}],"name":null}"#,
        )
        .unwrap();
        assert_eq!(
            SimulatorBackend::ideal(4).execute(&bad_clbit, 10).unwrap_err(),
            QalgosError::ClbitOutOfRange {
                clbit: 5,
                num_clbits: 1
            }
        );

        let bad_qubit: Circuit = serde_json::from_str(
            r#"{"num_qubits":2,"num_clbits":0,"gates":[{"Cnot":[0,7]}],"name":null}"#,
        )
        .unwrap();
        assert_eq!(
            SimulatorBackend::ideal(4).probabilities(&bad_qubit).unwrap_err(),
            QalgosError::GateQubitMismatch {
                qubit: 7,
                num_qubits: 2
            }
        );
    }

    #[test]
    fn test_capacity_is_capped() {
        let backend = SimulatorBackend::ideal(64);
        assert_eq!(backend.num_qubits(), MAX_SIMULATOR_QUBITS);
        let too_wide = Circuit::new(64);
        assert!(matches!(
            backend.statevector(&too_wide),
            Err(QalgosError::QubitOutOfRange { qubit: 64, .. })
        ));
    }

    #[test]
    fn test_no_clbits_gives_empty_outcome() {
        let circuit = CircuitBuilder::new(1).h(0).build();
        let result = SimulatorBackend::ideal(1).with_seed(1).execute(&circuit, 10).unwrap();
        assert_eq!(result.counts.get(""), Some(&10));
    }
}
