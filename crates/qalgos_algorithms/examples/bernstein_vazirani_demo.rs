//! Bernstein-Vazirani demo
//!
//! Hides a secret bit string in an oracle and recovers it with a single
//! oracle query.
//!
//! Usage: `cargo run --example bernstein_vazirani_demo -- [secret]`

use anyhow::{bail, Result};
use qalgos_algorithms::prelude::*;
use qalgos_backend::prelude::*;
use qalgos_oracle::OracleForm;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let secret = std::env::args().nth(1).unwrap_or_else(|| "1011".to_string());
    let config = BernsteinVaziraniConfig::new(secret.as_str()).with_form(OracleForm::Fragment);

    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║                  Bernstein-Vazirani                          ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
    println!("{}\n", config);

    let circuit = config.build()?;
    println!("{}\n", circuit.to_qasm());

    let exec = ExecutionConfig::quick();
    let (_, result) = run_with_selector(&circuit, &BackendSelector::local_only(), &exec)?;
    for (outcome, count) in result.sorted_counts() {
        println!("  {}  {:>6}", outcome, count);
    }

    let Some(recovered) = recover_secret(&result.counts) else {
        bail!("no measurement outcomes");
    };
    println!("\nRecovered secret: {}", recovered);
    if recovered.to_string() != secret {
        bail!("recovered {} but the secret was {}", recovered, secret);
    }
    Ok(())
}
