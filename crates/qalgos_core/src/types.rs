//! Core types for qalgos
//!
//! Wire/bit identifiers, measurement counts, and the strict bit-string type
//! shared by measurement outcomes and hidden secrets.

use crate::error::{QalgosError, QalgosResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Type Aliases
// ============================================================================

/// Qubit (wire) identifier, 0-indexed
pub type QubitId = usize;

/// Classical bit identifier, 0-indexed
pub type ClbitId = usize;

/// Rotation angle in radians
pub type Angle = f64;

/// Measurement counts: outcome string -> count
pub type Counts = HashMap<String, u64>;

// ============================================================================
// Bitstring
// ============================================================================

/// Ordered bit sequence, written most-significant character first.
///
/// Register convention: the *last* character corresponds to wire/clbit 0,
/// so `"1011"` sets wires 0, 1 and 3. [`Bitstring::wire_bit`] reads in
/// that order; [`Bitstring::get`] reads in text order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bitstring {
    bits: Vec<bool>,
}

impl Bitstring {
    /// Create from a vector of bools (text order)
    pub fn new(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// Create from string (e.g., "0110")
    pub fn parse(s: &str) -> QalgosResult<Self> {
        let bits: Result<Vec<bool>, _> = s
            .chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(QalgosError::InvalidBitstring(s.to_string())),
            })
            .collect();
        Ok(Self { bits: bits? })
    }

    /// Create zero bitstring of given length
    pub fn zeros(n: usize) -> Self {
        Self {
            bits: vec![false; n],
        }
    }

    /// Create the `width`-bit register value of `value` (wire 0 = LSB).
    ///
    /// Wires at or above `usize::BITS` are 0.
    pub fn from_usize(value: usize, width: usize) -> Self {
        let bits = (0..width)
            .rev()
            .map(|i| i < usize::BITS as usize && (value >> i) & 1 == 1)
            .collect();
        Self { bits }
    }

    /// Get the number of bits
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Count number of 1s (Hamming weight)
    pub fn popcount(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Get parity (true if odd number of 1s)
    pub fn parity(&self) -> bool {
        self.popcount() % 2 == 1
    }

    /// Check if every bit is 0 (true for the empty string)
    pub fn is_all_zero(&self) -> bool {
        self.bits.iter().all(|&b| !b)
    }

    /// Get bit at text position `index` (0 = leftmost character)
    pub fn get(&self, index: usize) -> Option<bool> {
        self.bits.get(index).copied()
    }

    /// Get the bit governing wire `wire` (0 = rightmost character)
    pub fn wire_bit(&self, wire: usize) -> Option<bool> {
        if wire >= self.bits.len() {
            return None;
        }
        Some(self.bits[self.bits.len() - 1 - wire])
    }

    /// Iterate over `(wire, bit)` pairs starting from wire 0
    pub fn wire_bits(&self) -> impl Iterator<Item = (usize, bool)> + '_ {
        self.bits.iter().rev().copied().enumerate()
    }

    /// Inner product modulo 2 over wires present in both strings
    pub fn dot(&self, other: &Bitstring) -> bool {
        self.wire_bits()
            .zip(other.wire_bits())
            .filter(|((_, a), (_, b))| *a && *b)
            .count()
            % 2
            == 1
    }

    /// Convert to usize (wire 0 = LSB).
    ///
    /// Returns `None` if a set bit sits at or above wire `usize::BITS`.
    pub fn to_usize(&self) -> Option<usize> {
        self.wire_bits()
            .filter(|(_, b)| *b)
            .try_fold(0usize, |acc, (i, _)| {
                let shift = u32::try_from(i).ok()?;
                Some(acc | 1usize.checked_shl(shift)?)
            })
    }
}

impl fmt::Display for Bitstring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.bits {
            write!(f, "{}", if b { '1' } else { '0' })?;
        }
        Ok(())
    }
}

impl FromStr for Bitstring {
    type Err = QalgosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitstring_parse_rejects_non_binary() {
        assert!(Bitstring::parse("0110").is_ok());
        let err = Bitstring::parse("10a1").unwrap_err();
        assert_eq!(err, QalgosError::InvalidBitstring("10a1".into()));
    }

    #[test]
    fn test_empty_bitstring() {
        let bs = Bitstring::parse("").unwrap();
        assert!(bs.is_empty());
        assert!(bs.is_all_zero());
        assert_eq!(bs.to_string(), "");
    }

    #[test]
    fn test_wire_bit_reads_reversed() {
        let bs = Bitstring::parse("1011").unwrap();
        assert_eq!(bs.wire_bit(0), Some(true));
        assert_eq!(bs.wire_bit(1), Some(true));
        assert_eq!(bs.wire_bit(2), Some(false));
        assert_eq!(bs.wire_bit(3), Some(true));
        assert_eq!(bs.wire_bit(4), None);
        assert_eq!(bs.get(0), Some(true));
        assert_eq!(bs.get(1), Some(false));
    }

    #[test]
    fn test_from_usize_matches_register_order() {
        assert_eq!(Bitstring::from_usize(0b1011, 4).to_string(), "1011");
        assert_eq!(Bitstring::from_usize(1, 3).to_string(), "001");
        assert_eq!(Bitstring::from_usize(0b1011, 4).to_usize(), Some(0b1011));
    }

    #[test]
    fn test_usize_conversion_past_word_width() {
        let wide = Bitstring::from_usize(usize::MAX, 70);
        assert_eq!(wide.len(), 70);
        assert_eq!(wide.popcount(), usize::BITS as usize);
        assert_eq!(wide.wire_bit(69), Some(false));
        assert_eq!(wide.to_usize(), Some(usize::MAX));

        let mut text = "1".to_string();
        text.push_str(&"0".repeat(64));
        assert_eq!(Bitstring::parse(&text).unwrap().to_usize(), None);
        assert_eq!(Bitstring::zeros(200).to_usize(), Some(0));
    }

    #[test]
    fn test_popcount_and_parity() {
        let bs = Bitstring::parse("01101").unwrap();
        assert_eq!(bs.popcount(), 3);
        assert!(bs.parity());
        assert!(!Bitstring::parse("0110").unwrap().parity());
    }

    #[test]
    fn test_dot_product_mod_two() {
        let secret = Bitstring::parse("101").unwrap();
        assert!(secret.dot(&Bitstring::parse("001").unwrap()));
        assert!(!secret.dot(&Bitstring::parse("101").unwrap()));
        assert!(!secret.dot(&Bitstring::parse("010").unwrap()));
    }

    #[test]
    fn test_from_str() {
        let bs: Bitstring = "110".parse().unwrap();
        assert_eq!(bs.len(), 3);
        assert!("12".parse::<Bitstring>().is_err());
    }
}
