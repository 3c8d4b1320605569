//! Bernstein-Vazirani circuit assembly
//!
//! The secret's last character governs input wire 0, so on an ideal run
//! the measured register reads back the secret exactly as written.

use qalgos_core::{Bitstring, Circuit, CircuitBuilder, Counts, QalgosResult};
use qalgos_oracle::{Oracle, OracleForm};

/// Assemble a Bernstein-Vazirani circuit for `secret` (characters '0'/'1')
pub fn bernstein_vazirani(secret: &str, form: OracleForm) -> QalgosResult<Circuit> {
    let secret = Bitstring::parse(secret)?;
    bernstein_vazirani_bits(&secret, form)
}

/// Assemble from an already parsed secret
pub fn bernstein_vazirani_bits(secret: &Bitstring, form: OracleForm) -> QalgosResult<Circuit> {
    let n = secret.len();
    let oracle = Oracle::secret_dot_product(secret).into_form(form);

    CircuitBuilder::with_clbits(n + 1, n)
        .named(format!("bernstein_vazirani[{}]", secret))
        .x(n)
        .h_layer()
        .barrier()
        .apply(|circuit| oracle.apply_to(circuit))
        .barrier()
        .h_on(0..n)
        .measure_range(n)
        .try_build()
}

/// Most frequent outcome as a bitstring (ties to the smaller string)
pub fn recover_secret(counts: &Counts) -> Option<Bitstring> {
    counts
        .iter()
        .filter(|&(_, &c)| c > 0)
        .max_by(|(a, ca), (b, cb)| ca.cmp(cb).then_with(|| b.cmp(a)))
        .and_then(|(outcome, _)| Bitstring::parse(outcome).ok())
}
