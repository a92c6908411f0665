// 🪪 Civic Number Validation - Luhn-style checksum
// Normalizes a national identity number to its canonical YYMMDD-NNNN form
//
// Accepted shapes (whole string):
// - XXXXXX-XXXX     (short, hyphenated)
// - XXXXXXXX-XXXX   (with century, hyphenated)
// - XXXXXXXXXXXX    (with century)
// - XXXXXXXXXX      (short)
//
// X is any word character at the shape stage. Digits are enforced when the
// checksum is computed; the century prefix is dropped before that.

use crate::error::{BankError, BankResult};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Digits in the short form: 6 date digits + 3 sequence digits + 1 check digit
const SHORT_LEN: usize = 10;

/// Position of the hyphen in the canonical form
const HYPHEN_AT: usize = 6;

// ============================================================================
// CIVIC NUMBER
// ============================================================================

/// A civic number that passed validation, always in `NNNNNN-NNNN` form
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CivicNumber(String);

impl CivicNumber {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CivicNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CivicNumber {
    type Err = BankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        normalize(s)
    }
}

// ============================================================================
// VALIDATOR
// ============================================================================

/// Validate `raw` and return it in canonical form.
///
/// Canonical output is itself an accepted shape, so normalizing twice is a no-op.
pub fn normalize(raw: &str) -> BankResult<CivicNumber> {
    let chars: Vec<char> = raw.chars().collect();
    if !matches_shape(&chars) {
        return Err(BankError::InvalidFormat(raw.to_string()));
    }

    let mut stripped: Vec<char> = chars.into_iter().filter(|c| *c != '-').collect();
    if stripped.len() == SHORT_LEN + 2 {
        // century prefix
        stripped.drain(..2);
    }

    let digits = stripped
        .iter()
        .map(|c| c.to_digit(10))
        .collect::<Option<Vec<u32>>>()
        .ok_or_else(|| BankError::InvalidFormat(raw.to_string()))?;

    let mut body = [0u32; SHORT_LEN - 1];
    body.copy_from_slice(&digits[..SHORT_LEN - 1]);

    let expected = check_digit(&body);
    let found = digits[SHORT_LEN - 1];
    if expected != found {
        return Err(BankError::InvalidChecksum { expected, found });
    }

    let canonical: String = stripped[..HYPHEN_AT]
        .iter()
        .chain(std::iter::once(&'-'))
        .chain(stripped[HYPHEN_AT..].iter())
        .collect();

    Ok(CivicNumber(canonical))
}

/// Check digit for the first nine digits of a short civic number.
///
/// Even positions are doubled and every product contributes the sum of its
/// decimal digits (so 7 * 2 = 14 adds 1 + 4).
pub fn check_digit(digits: &[u32; 9]) -> u32 {
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(index, digit)| {
            let product = digit * if index % 2 == 0 { 2 } else { 1 };
            product / 10 + product % 10
        })
        .sum();

    (10 - sum % 10) % 10
}

fn is_word(c: &char) -> bool {
    c.is_alphanumeric() || *c == '_'
}

fn matches_shape(chars: &[char]) -> bool {
    match chars.len() {
        10 | 12 => chars.iter().all(is_word),
        11 | 13 => {
            let split = chars.len() - 5;
            chars[split] == '-'
                && chars[..split].iter().all(is_word)
                && chars[split + 1..].iter().all(is_word)
        }
        _ => false,
    }
}

// ============================================================================
// TESTS
// ============================================================================
