//! Backend execution types and traits
//!
//! Defines the interface every execution target implements, and the
//! counts-plus-diagnostics result it returns.

use qalgos_core::constants::execution::MAX_SHOTS;
use qalgos_core::{Circuit, Counts, QalgosResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Result of circuit execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Measurement counts (classical register string -> count)
    pub counts: Counts,

    /// Number of shots executed
    pub shots: u64,

    /// Execution metadata
    pub metadata: ExecutionMetadata,
}

/// Diagnostic information recorded alongside the counts
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecutionMetadata {
    /// Backend name
    pub backend: String,

    /// Job ID (if applicable)
    pub job_id: Option<String>,

    /// Execution time in milliseconds
    pub execution_time_ms: Option<u64>,

    /// Whether simulation was used
    pub simulated: bool,

    /// Seed used (if any)
    pub seed: Option<u64>,

    /// Transpiler optimization level applied (None if not transpiled)
    pub optimization_level: Option<u8>,

    /// Gate count of the executed circuit
    pub gate_count: Option<usize>,

    /// Depth of the executed circuit
    pub depth: Option<usize>,

    /// Additional info
    pub extra: BTreeMap<String, String>,
}

impl ExecutionResult {
    /// Create new execution result
    pub fn new(counts: Counts, shots: u64, backend: &str) -> Self {
        Self {
            counts,
            shots,
            metadata: ExecutionMetadata {
                backend: backend.to_string(),
                simulated: true,
                ..Default::default()
            },
        }
    }

    /// Get total count (should equal shots)
    pub fn total_counts(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Get observed frequency of a specific outcome
    pub fn probability(&self, bitstring: &str) -> f64 {
        if self.shots == 0 {
            return 0.0;
        }
        let count = self.counts.get(bitstring).copied().unwrap_or(0);
        count as f64 / self.shots as f64
    }

    /// Get most frequent outcome (ties broken by the smaller string)
    pub fn most_frequent(&self) -> Option<(&String, u64)> {
        self.counts
            .iter()
            .max_by(|(a, ca), (b, cb)| ca.cmp(cb).then_with(|| b.cmp(a)))
            .map(|(bs, &count)| (bs, count))
    }

    /// Counts sorted by descending frequency, then by outcome
    pub fn sorted_counts(&self) -> Vec<(String, u64)> {
        let mut sorted: Vec<(String, u64)> =
            self.counts.iter().map(|(k, &v)| (k.clone(), v)).collect();
        sorted.sort_by(|(a, ca), (b, cb)| cb.cmp(ca).then_with(|| a.cmp(b)));
        sorted
    }
}

impl fmt::Display for ExecutionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ExecutionResult(backend={}, shots={}, unique={})",
            self.metadata.backend,
            self.shots,
            self.counts.len()
        )
    }
}

/// Quantum backend trait
pub trait Backend: Send + Sync {
    /// Get backend name
    fn name(&self) -> &str;

    /// Get number of qubits
    fn num_qubits(&self) -> usize;

    /// Execute a circuit
    fn execute(&self, circuit: &Circuit, shots: u64) -> QalgosResult<ExecutionResult>;

    /// Execute multiple circuits (batch)
    fn execute_batch(&self, circuits: &[Circuit], shots: u64) -> QalgosResult<Vec<ExecutionResult>> {
        circuits.iter().map(|c| self.execute(c, shots)).collect()
    }

    /// Check if backend is simulator
    fn is_simulator(&self) -> bool {
        true
    }

    /// Get maximum shots per execution
    fn max_shots(&self) -> u64 {
        MAX_SHOTS
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn make_test_counts() -> Counts {
        let mut counts = HashMap::new();
        counts.insert("000".to_string(), 400);
        counts.insert("001".to_string(), 100);
        counts.insert("010".to_string(), 100);
        counts.insert("011".to_string(), 400);
        counts
    }

    #[test]
    fn test_execution_result_new() {
        let result = ExecutionResult::new(make_test_counts(), 1000, "test");
        assert_eq!(result.shots, 1000);
        assert_eq!(result.metadata.backend, "test");
        assert!(result.metadata.simulated);
        assert_eq!(result.total_counts(), 1000);
    }

    #[test]
    fn test_probability() {
        let result = ExecutionResult::new(make_test_counts(), 1000, "test");
        assert!((result.probability("000") - 0.4).abs() < 1e-10);
        assert_eq!(result.probability("111"), 0.0);
    }

    #[test]
    fn test_zero_shots_probability() {
        let result = ExecutionResult::new(HashMap::new(), 0, "test");
        assert_eq!(result.probability("0"), 0.0);
        assert!(result.most_frequent().is_none());
    }

    #[test]
    fn test_most_frequent_tie_break() {
        let result = ExecutionResult::new(make_test_counts(), 1000, "test");
        let (bs, count) = result.most_frequent().unwrap();
        assert_eq!(bs, "000");
        assert_eq!(count, 400);
    }

    #[test]
    fn test_sorted_counts() {
        let result = ExecutionResult::new(make_test_counts(), 1000, "test");
        let sorted = result.sorted_counts();
        assert_eq!(sorted[0], ("000".to_string(), 400));
        assert_eq!(sorted[1], ("011".to_string(), 400));
        assert_eq!(sorted[2], ("001".to_string(), 100));
    }
}
