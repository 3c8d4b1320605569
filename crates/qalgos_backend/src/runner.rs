//! Circuit execution entry point
//!
//! Simulators take the circuit as-is. Every other backend receives a
//! transpiled copy at the configured optimization level.

use crate::config::ExecutionConfig;
use crate::execution::{Backend, ExecutionResult};
use crate::selection::{BackendSelector, SelectedBackend};
use crate::transpiler::{Transpiler, TranspilerConfig};
use qalgos_core::{Circuit, QalgosResult};

/// Run `circuit` on `backend` with `config.shots` shots
pub fn run_circuit(
    circuit: &Circuit,
    backend: &dyn Backend,
    config: &ExecutionConfig,
) -> QalgosResult<ExecutionResult> {
    config.validate()?;

    if backend.is_simulator() {
        log::debug!("Running {} on simulator {}", circuit_label(circuit), backend.name());
        return backend.execute(circuit, config.shots);
    }

    let transpiler = Transpiler::new(
        TranspilerConfig::for_target(backend.num_qubits())
            .with_optimization_level(config.optimization_level),
    );
    let (transpiled, report) = transpiler.transpile(circuit)?;
    log::info!(
        "Running {} on {} ({} -> {} ops)",
        circuit_label(circuit),
        backend.name(),
        report.gates_before,
        report.gates_after
    );

    let mut result = backend.execute(&transpiled, config.shots)?;
    let metadata = &mut result.metadata;
    metadata.optimization_level = Some(config.optimization_level);
    metadata.gate_count = Some(transpiled.gate_count());
    metadata.depth = Some(transpiled.depth());
    metadata
        .extra
        .insert("gates_before".into(), report.gates_before.to_string());
    metadata
        .extra
        .insert("cancelled_pairs".into(), report.cancelled_pairs.to_string());
    Ok(result)
}

/// Select a backend from `config.backend`, then run `circuit` on it
///
/// A local simulator (requested or fallback) uses `config.seed` and
/// `config.max_qubits`. Returns the selection alongside the result so
/// callers can see whether the local simulator stood in for the requested
/// device.
pub fn run_with_selector(
    circuit: &Circuit,
    selector: &BackendSelector,
    config: &ExecutionConfig,
) -> QalgosResult<(SelectedBackend, ExecutionResult)> {
    config.validate()?;
    let selected = selector.select_for(config);
    let mut result = run_circuit(circuit, selected.backend.as_ref(), config)?;
    if let Some(reason) = &selected.fallback_reason {
        result
            .metadata
            .extra
            .insert("fallback_reason".into(), reason.clone());
    }
    Ok((selected, result))
}

fn circuit_label(circuit: &Circuit) -> String {
    match circuit.name() {
        Some(name) => name.to_string(),
        None => format!("circuit({}q)", circuit.num_qubits()),
    }
}

// ============================================================================
// Tests
// ============================================================================
