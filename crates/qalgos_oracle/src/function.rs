//! Boolean functions hidden inside oracles
//!
//! Each oracle implements one fixed `f: {0,1}^n -> {0,1}`. The classical
//! side lives here so circuits can be checked against a truth table.

use qalgos_core::Bitstring;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Widest input a [`BooleanFunction::truth_table`] is built for
pub const MAX_TRUTH_TABLE_INPUTS: usize = 20;

/// Fixed two-valued function over `n` input bits
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BooleanFunction {
    /// f(x) = 0
    ConstantZero,

    /// f(x) = 1
    ConstantOne,

    /// f(x) = x_0 XOR x_1 XOR ... XOR x_{n-1}
    Parity,

    /// f(x) = NOT parity(x)
    ParityNegated,

    /// f(x) = s . x (mod 2)
    SecretDotProduct(Bitstring),
}

impl BooleanFunction {
    /// Evaluate on an input written in register order (last char = wire 0)
    pub fn evaluate(&self, input: &Bitstring) -> bool {
        match self {
            BooleanFunction::ConstantZero => false,
            BooleanFunction::ConstantOne => true,
            BooleanFunction::Parity => input.parity(),
            BooleanFunction::ParityNegated => !input.parity(),
            BooleanFunction::SecretDotProduct(secret) => secret.dot(input),
        }
    }

    /// Full truth table over `n` inputs, indexed by the input's integer value.
    ///
    /// Returns `None` above [`MAX_TRUTH_TABLE_INPUTS`].
    pub fn truth_table(&self, n: usize) -> Option<Vec<bool>> {
        if n > MAX_TRUTH_TABLE_INPUTS {
            return None;
        }
        Some(
            (0..1usize << n)
                .map(|x| self.evaluate(&Bitstring::from_usize(x, n)))
                .collect(),
        )
    }

    /// Check if the function is constant over `n` inputs
    pub fn is_constant(&self, n: usize) -> bool {
        !self.depends_on_input(n)
    }

    /// Check if exactly half of the `n`-bit inputs map to 1
    pub fn is_balanced(&self, n: usize) -> bool {
        // Every member is affine over GF(2): it either ignores x or is balanced
        self.depends_on_input(n)
    }

    fn depends_on_input(&self, n: usize) -> bool {
        match self {
            BooleanFunction::ConstantZero | BooleanFunction::ConstantOne => false,
            BooleanFunction::Parity | BooleanFunction::ParityNegated => n > 0,
            BooleanFunction::SecretDotProduct(secret) => {
                secret.wire_bits().any(|(wire, bit)| bit && wire < n)
            }
        }
    }
}

impl fmt::Display for BooleanFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BooleanFunction::ConstantZero => write!(f, "constant-0"),
            BooleanFunction::ConstantOne => write!(f, "constant-1"),
            BooleanFunction::Parity => write!(f, "parity"),
            BooleanFunction::ParityNegated => write!(f, "parity-negated"),
            BooleanFunction::SecretDotProduct(s) => write!(f, "secret-dot-product({})", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bs(s: &str) -> Bitstring {
        Bitstring::parse(s).unwrap()
    }

    #[test]
    fn test_constant_functions() {
        for n in 1..=4 {
            assert!(BooleanFunction::ConstantZero.is_constant(n));
            assert!(BooleanFunction::ConstantOne.is_constant(n));
            assert!(!BooleanFunction::ConstantOne.is_balanced(n));
        }
    }

    #[test]
    fn test_parity_functions_are_balanced() {
        for n in 1..=4 {
            assert!(BooleanFunction::Parity.is_balanced(n));
            assert!(BooleanFunction::ParityNegated.is_balanced(n));
            assert!(!BooleanFunction::Parity.is_constant(n));
        }
    }

    #[test]
    fn test_parity_negated_inverts() {
        let x = bs("101");
        assert!(!BooleanFunction::Parity.evaluate(&x));
        assert!(BooleanFunction::ParityNegated.evaluate(&x));
    }

    #[test]
    fn test_secret_dot_product() {
        let f = BooleanFunction::SecretDotProduct(bs("1011"));
        assert!(f.evaluate(&bs("0001")));
        assert!(!f.evaluate(&bs("0100")));
        assert!(!f.evaluate(&bs("0011")));
        assert!(f.is_balanced(4));

        let zero = BooleanFunction::SecretDotProduct(bs("0000"));
        assert!(zero.is_constant(4));
    }

    #[test]
    fn test_classification_matches_truth_table() {
        let functions = [
            BooleanFunction::ConstantZero,
            BooleanFunction::ConstantOne,
            BooleanFunction::Parity,
            BooleanFunction::ParityNegated,
            BooleanFunction::SecretDotProduct(bs("0110")),
            BooleanFunction::SecretDotProduct(bs("1000")),
        ];
        for f in &functions {
            for n in 0..=5 {
                let table = f.truth_table(n).unwrap();
                let ones = table.iter().filter(|&&v| v).count();
                assert_eq!(f.is_constant(n), ones == 0 || ones == table.len(), "{} n={}", f, n);
                assert_eq!(f.is_balanced(n), 2 * ones == table.len(), "{} n={}", f, n);
            }
        }
    }

    #[test]
    fn test_wide_inputs() {
        assert!(BooleanFunction::Parity.truth_table(64).is_none());
        assert!(BooleanFunction::Parity.truth_table(MAX_TRUTH_TABLE_INPUTS + 1).is_none());
        assert_eq!(BooleanFunction::ConstantOne.truth_table(2), Some(vec![true; 4]));

        assert!(BooleanFunction::Parity.is_balanced(64));
        assert!(BooleanFunction::ConstantZero.is_constant(100));
        let mut secret = "1".to_string();
        secret.push_str(&"0".repeat(69));
        let f = BooleanFunction::SecretDotProduct(bs(&secret));
        assert!(f.is_balanced(70));
        assert!(f.is_constant(69));
    }

    #[test]
    fn test_zero_inputs() {
        // One input (the empty string): constant, never balanced
        assert!(BooleanFunction::Parity.is_constant(0));
        assert!(!BooleanFunction::Parity.is_balanced(0));
    }
}
