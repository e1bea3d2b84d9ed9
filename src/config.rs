//! TOML configuration for a design study.
//!
//! Every key is optional; anything left out falls back to the reference
//! design case of a 100 kN load on a 10 mm thick section.
//!
//! ```toml
//! distances = [100, 1000, 2000]
//! strategy = "parallel"
//! threads = 4
//!
//! [parameters]
//! sigma = 100.0
//! force = 100e3
//! thickness = 10.0
//! tolerance = 2.0
//!
//! [heights]
//! start = 1
//! stop = 981
//!
//! [widths]
//! values = [50, 100, 150]
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::errors::ConfigError;
use crate::evaluator::SearchStrategy;
use crate::parameters::{BeamParameters, CandidateRange, CandidateSet};

/// Load distances, in millimetres, studied when none are configured.
pub const DEFAULT_DISTANCES: [f64; 5] = [100.0, 1_000.0, 2_000.0, 3_000.0, 4_000.0];

/// Source of one candidate sequence.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CandidateSource {
    /// Explicit values, searched in the given order.
    Values(CandidateValues),
    /// Values generated from an arithmetic range.
    Range(CandidateRange),
}

/// Explicit candidate list, `values = [...]`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CandidateValues {
    /// Candidate dimensions in millimetres.
    pub values: Vec<f64>,
}

impl CandidateSource {
    /// Expand the source into its candidate values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRange`] when a range cannot be expanded.
    pub fn values(&self) -> Result<Vec<f64>, ConfigError> {
        match self {
            Self::Values(list) => Ok(list.values.clone()),
            Self::Range(range) => range.values(),
        }
    }
}

/// Complete description of a design study.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DesignConfig {
    /// Material limit, load and thickness.
    pub parameters: BeamParameters,
    /// Load distances evaluated independently, in order.
    pub distances: Vec<f64>,
    /// Candidate heights; defaults to the thickness-derived range.
    pub heights: Option<CandidateSource>,
    /// Candidate widths; defaults to the thickness-derived range.
    pub widths: Option<CandidateSource>,
    /// Grid scan strategy.
    pub strategy: SearchStrategy,
    /// Worker threads for the parallel strategy; rayon's default when unset.
    pub threads: Option<usize>,
}

impl Default for DesignConfig {
    fn default() -> Self {
        Self {
            parameters: BeamParameters::default(),
            distances: DEFAULT_DISTANCES.to_vec(),
            heights: None,
            widths: None,
            strategy: SearchStrategy::default(),
            threads: None,
        }
    }
}

impl DesignConfig {
    /// Parse a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys.
    ///
    /// # Examples
    /// ```
    /// use ibeamx::DesignConfig;
    ///
    /// let config = DesignConfig::from_toml_str("distances = [500]").unwrap();
    /// assert_eq!(config.distances, vec![500.0]);
    /// assert_eq!(config.parameters.sigma, 100.0);
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] when the file cannot be read and
    /// [`ConfigError::Parse`] when it is not a valid configuration.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded design configuration");
        Ok(config)
    }

    /// Resolve the candidate sequences, filling gaps with the default range
    /// for the configured thickness.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRange`] when a range cannot be expanded.
    pub fn candidates(&self) -> Result<CandidateSet, ConfigError> {
        let resolve = |source: &Option<CandidateSource>| match source {
            Some(source) => source.values(),
            None => CandidateRange::default_for_thickness(self.parameters.thickness).values(),
        };
        Ok(CandidateSet::new(
            resolve(&self.heights)?,
            resolve(&self.widths)?,
        ))
    }
}
