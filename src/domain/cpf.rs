//! CPF normalization, check-digit validation and display masking.
//!
//! Everything here is pure: no I/O, no logging, no shared state. Every input
//! string maps to exactly one [`ValidationOutcome`].

use crate::domain::model::{Digits, InvalidReason, ValidationOutcome};
use crate::utils::error::{CpfError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub const CPF_LENGTH: usize = 11;
pub const BASE_LENGTH: usize = 9;

pub fn normalize(input: &str) -> Digits {
    Digits::from_raw(input)
}

/// Weighted modulo-11 check digit over `digits`.
///
/// Weights run from `digits.len() + 1` down to 2. A remainder of 10 maps to 0.
fn check_digit(digits: &[u8]) -> u8 {
    let top = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, &d)| d as u32 * (top - i as u32))
        .sum();

    let remainder = (sum * 10) % 11;
    if remainder >= 10 {
        0
    } else {
        remainder as u8
    }
}

/// Both check digits for a 9-digit base, or `None` if `base` is not nine
/// values in `0..=9`.
pub fn check_digits(base: &[u8]) -> Option<[u8; 2]> {
    if base.len() != BASE_LENGTH || base.iter().any(|&d| d > 9) {
        return None;
    }

    let first = check_digit(base);
    let mut extended = [0u8; BASE_LENGTH + 1];
    extended[..BASE_LENGTH].copy_from_slice(base);
    extended[BASE_LENGTH] = first;
    let second = check_digit(&extended);

    Some([first, second])
}

fn is_repeated(digits: &[u8]) -> bool {
    digits.windows(2).all(|pair| pair[0] == pair[1])
}

fn validate_digits(digits: &Digits) -> ValidationOutcome {
    if digits.len() != CPF_LENGTH {
        return ValidationOutcome::Invalid(InvalidReason::IncompleteInput);
    }

    let values = digits.values();
    if is_repeated(&values) {
        return ValidationOutcome::Invalid(InvalidReason::RepeatedDigitSequence);
    }

    match check_digits(&values[..BASE_LENGTH]) {
        Some([first, second]) if values[9] == first && values[10] == second => {
            ValidationOutcome::Valid
        }
        _ => ValidationOutcome::Invalid(InvalidReason::ChecksumMismatch),
    }
}

/// Validates a freeform CPF string. Punctuation is ignored.
pub fn validate(input: &str) -> ValidationOutcome {
    validate_digits(&normalize(input))
}

/// Formats the digits of `input` as `XXX.XXX.XXX-XX`.
///
/// Only the first 11 digits are used, and a separator is written only when a
/// digit follows it, so partial input yields a partial mask.
pub fn mask(input: &str) -> String {
    mask_digits(normalize(input).as_str())
}

fn mask_digits(digits: &str) -> String {
    let mut masked = String::with_capacity(CPF_LENGTH + 3);
    for (i, c) in digits.chars().take(CPF_LENGTH).enumerate() {
        match i {
            3 | 6 => masked.push('.'),
            9 => masked.push('-'),
            _ => {}
        }
        masked.push(c);
    }
    masked
}

/// Builds a full CPF from a 9-digit base by appending its check digits.
pub fn complete(input: &str) -> Result<Cpf> {
    let base = normalize(input);
    let values = base.values();
    let [first, second] = check_digits(&values).ok_or_else(|| CpfError::InvalidBase {
        input: input.to_string(),
        digits: base.len(),
    })?;

    let full = format!("{}{}{}", base, first, second);
    Cpf::parse(&full)
}

/// An 11-digit CPF that passed [`validate`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cpf(Digits);

impl Cpf {
    pub fn parse(input: &str) -> Result<Self> {
        let digits = normalize(input);
        match validate_digits(&digits) {
            ValidationOutcome::Valid => Ok(Self(digits)),
            ValidationOutcome::Invalid(reason) => Err(CpfError::InvalidCpf {
                input: input.to_string(),
                reason,
            }),
        }
    }

    /// The bare 11 digits.
    pub fn digits(&self) -> &str {
        self.0.as_str()
    }

    pub fn masked(&self) -> String {
        mask_digits(self.0.as_str())
    }
}

impl FromStr for Cpf {
    type Err = CpfError;

    fn from_str(s: &str) -> Result<Self> {
        Cpf::parse(s)
    }
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

impl Serialize for Cpf {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.masked())
    }
}

impl<'de> Deserialize<'de> for Cpf {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Cpf::parse(&raw).map_err(serde::de::Error::custom)
    }
}
