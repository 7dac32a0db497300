use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Ordered ASCII decimal digits extracted from raw user input.
///
/// May hold any number of digits; only an 11-digit sequence can ever be a
/// valid CPF.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Digits(String);

impl Digits {
    pub fn from_raw(input: &str) -> Self {
        Self(input.chars().filter(|c| c.is_ascii_digit()).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Numeric value of each digit, in order.
    pub fn values(&self) -> Vec<u8> {
        self.0
            .chars()
            .filter_map(|c| c.to_digit(10))
            .map(|d| d as u8)
            .collect()
    }
}

impl<'de> Deserialize<'de> for Digits {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Digits::from_raw(&raw))
    }
}

impl fmt::Display for Digits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidReason {
    /// Not exactly 11 digits after normalization.
    IncompleteInput,
    /// All 11 digits identical, rejected regardless of checksum.
    RepeatedDigitSequence,
    /// One of the two check digits does not match.
    ChecksumMismatch,
}

impl InvalidReason {
    pub const ALL: [InvalidReason; 3] = [
        InvalidReason::IncompleteInput,
        InvalidReason::RepeatedDigitSequence,
        InvalidReason::ChecksumMismatch,
    ];

    /// Stable machine tag, matches the serde representation.
    pub fn tag(&self) -> &'static str {
        match self {
            InvalidReason::IncompleteInput => "incomplete_input",
            InvalidReason::RepeatedDigitSequence => "repeated_digit_sequence",
            InvalidReason::ChecksumMismatch => "checksum_mismatch",
        }
    }
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            InvalidReason::IncompleteInput => "CPF must contain exactly 11 digits",
            InvalidReason::RepeatedDigitSequence => "CPF cannot be a sequence of repeated digits",
            InvalidReason::ChecksumMismatch => "CPF check digits do not match",
        };
        f.write_str(message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum ValidationOutcome {
    Valid,
    Invalid(InvalidReason),
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid)
    }

    pub fn reason(&self) -> Option<InvalidReason> {
        match self {
            ValidationOutcome::Valid => None,
            ValidationOutcome::Invalid(reason) => Some(*reason),
        }
    }
}

impl fmt::Display for ValidationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationOutcome::Valid => f.write_str("valid"),
            ValidationOutcome::Invalid(reason) => write!(f, "invalid: {}", reason),
        }
    }
}

/// One input line after validation, as written to batch reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRecord {
    pub line: usize,
    pub input: String,
    pub digits: String,
    pub masked: String,
    pub valid: bool,
    pub reason: Option<InvalidReason>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub valid: usize,
    pub incomplete_input: usize,
    pub repeated_digit_sequence: usize,
    pub checksum_mismatch: usize,
}

impl BatchSummary {
    pub fn record(&mut self, outcome: ValidationOutcome) {
        self.total += 1;
        match outcome {
            ValidationOutcome::Valid => self.valid += 1,
            ValidationOutcome::Invalid(InvalidReason::IncompleteInput) => {
                self.incomplete_input += 1
            }
            ValidationOutcome::Invalid(InvalidReason::RepeatedDigitSequence) => {
                self.repeated_digit_sequence += 1
            }
            ValidationOutcome::Invalid(InvalidReason::ChecksumMismatch) => {
                self.checksum_mismatch += 1
            }
        }
    }

    pub fn invalid(&self) -> usize {
        self.total - self.valid
    }
}

/// A raw line read from batch input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputLine {
    pub line: usize,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub generated_at: DateTime<Utc>,
    pub summary: BatchSummary,
    pub records: Vec<ValidationRecord>,
}
