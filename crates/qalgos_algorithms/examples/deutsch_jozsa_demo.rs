//! Deutsch-Jozsa demo
//!
//! Builds a circuit with a hidden constant or balanced function, runs it
//! on the local simulator and reports which family the counts indicate.
//!
//! Usage: `cargo run --example deutsch_jozsa_demo -- [n] [constant|balanced]`
//! (set `RUST_LOG=debug` to see the drawn oracle variant)

use anyhow::{Context, Result};
use qalgos_algorithms::prelude::*;
use qalgos_backend::prelude::*;
use qalgos_oracle::OracleForm;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let n: usize = match args.next() {
        Some(arg) => arg.parse().context("n must be a non-negative integer")?,
        None => 3,
    };
    let oracle_type = args.next().unwrap_or_else(|| "balanced".to_string());

    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║                      Deutsch-Jozsa                           ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
    println!("Inputs: {}, oracle_type: {}\n", n, oracle_type);

    let circuit = deutsch_jozsa_str(n, &oracle_type, OracleForm::Mutator)?;
    println!("{}\n", circuit.to_qasm());

    let config = ExecutionConfig::default();
    let selector = BackendSelector::local_only();
    let (selected, result) = run_with_selector(&circuit, &selector, &config)?;

    println!("Backend: {}", selected.backend.name());
    println!("{}", result);
    for (outcome, count) in result.sorted_counts() {
        println!("  {}  {:>6}  ({:.3})", outcome, count, result.probability(&outcome));
    }

    match DeutschJozsaVerdict::from_counts(&result.counts) {
        Some(verdict) => println!("\nThe hidden function is {}", verdict),
        None => println!("\nNo shots recorded"),
    }
    Ok(())
}
