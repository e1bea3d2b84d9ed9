//! Error types produced while validating inputs or searching the design space.

use std::path::PathBuf;

use thiserror::Error;

/// Error returned when a design-space evaluation cannot be carried out.
///
/// A search in which every candidate is rejected is *not* an error; it is
/// reported as [`Outcome::NoValidCombination`](crate::Outcome::NoValidCombination).
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum EvaluationError {
    /// Returned when the supplied parameters or candidates are not usable.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),
    /// Returned when the allowable stress is zero, which would leave the
    /// required section modulus undefined.
    #[error("allowable stress is zero; the required section modulus is undefined")]
    DivisionByZero,
}

/// Describes why an evaluation input was rejected.
///
/// The variants carry the offending value so callers can present actionable
/// feedback to users.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum InputError {
    /// Returned when no candidate heights were supplied.
    #[error("candidate heights must not be empty")]
    EmptyHeights,
    /// Returned when no candidate widths were supplied.
    #[error("candidate widths must not be empty")]
    EmptyWidths,
    /// Returned when no load distances were supplied.
    #[error("at least one load distance is required")]
    EmptyDistances,
    /// Returned when the flange/web thickness is zero or negative.
    #[error("thickness must be positive (received {thickness})")]
    NonPositiveThickness {
        /// Rejected thickness in millimetres.
        thickness: f64,
    },
    /// Returned when the allowable stress is negative.
    #[error("allowable stress must not be negative (received {sigma})")]
    NegativeStress {
        /// Rejected allowable stress in N/mm².
        sigma: f64,
    },
    /// Returned when a candidate dimension is zero, negative or not finite.
    #[error("candidate {dimension} at index {index} must be positive and finite (received {value})")]
    NonPositiveCandidate {
        /// Which candidate sequence holds the value.
        dimension: Dimension,
        /// Position of the value within its sequence.
        index: usize,
        /// Rejected value in millimetres.
        value: f64,
    },
    /// Returned when a scalar parameter is NaN or infinite.
    #[error("parameter `{name}` must be finite (received {value})")]
    NonFiniteParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },
}

/// Identifies one of the two candidate sequences.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dimension {
    /// Web height `h`.
    Height,
    /// Flange width `w`.
    Width,
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Height => f.write_str("height"),
            Self::Width => f.write_str("width"),
        }
    }
}

/// Error returned when a design configuration cannot be loaded.
///
/// # Examples
///
/// ```
/// use ibeamx::{CandidateRange, ConfigError};
///
/// let error = CandidateRange::new(1.0, 10.0, 0.0)
///     .values()
///     .expect_err("zero step is rejected");
/// assert!(matches!(error, ConfigError::InvalidRange { .. }));
/// ```
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Returned when the configuration file cannot be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Location of the configuration file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// Returned when the configuration file is not valid TOML for a design.
    #[error("failed to parse design configuration: {0}")]
    Parse(#[from] toml::de::Error),
    /// Returned when a candidate range cannot produce a usable sequence.
    #[error("invalid candidate range {start}..{stop} step {step}: {reason}")]
    InvalidRange {
        /// First value of the range.
        start: f64,
        /// Exclusive upper bound of the range.
        stop: f64,
        /// Increment between successive values.
        step: f64,
        /// Description of the problem.
        reason: &'static str,
    },
}
