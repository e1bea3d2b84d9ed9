//! Loading conditions and candidate dimensions for a design search.

use serde::{Deserialize, Serialize};

use crate::errors::{ConfigError, Dimension, InputError};

/// Largest outer depth and flange width, in millimetres, covered by the
/// default candidate ranges.
pub const DEFAULT_MAX_OUTER_DIMENSION: f64 = 1_000.0;

/// Largest number of values a single [`CandidateRange`] may expand to.
pub const MAX_RANGE_VALUES: u32 = 100_000;

/// Material limit, load and section constants shared by every evaluation.
///
/// Units follow the usual hand-calculation convention of newtons and
/// millimetres, so stresses are in N/mm² (MPa).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BeamParameters {
    /// Allowable bending stress `σ` in N/mm².
    pub sigma: f64,
    /// Applied force `F` in newtons.
    pub force: f64,
    /// Flange and web thickness `t` in millimetres.
    pub thickness: f64,
    /// Upper bound of the accepted section modulus as a multiple of the
    /// required modulus. Values at or below one leave no valid candidates.
    pub tolerance: f64,
}

impl Default for BeamParameters {
    fn default() -> Self {
        Self {
            sigma: 100.0,
            force: 100.0e3,
            thickness: 10.0,
            tolerance: 2.0,
        }
    }
}

impl BeamParameters {
    /// Bending moment `M = F · d` for a load applied at `distance`.
    #[must_use]
    pub fn bending_moment(&self, distance: f64) -> f64 {
        self.force * distance
    }

    /// Section modulus needed to keep the bending stress at `σ`, `M / σ`.
    #[must_use]
    pub fn required_section_modulus(&self, distance: f64) -> f64 {
        self.bending_moment(distance) / self.sigma
    }

    /// Check that every scalar is finite, the stress is not negative and the
    /// thickness is positive.
    ///
    /// A zero `sigma` is accepted here; the evaluator reports it separately as
    /// a division by zero.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::NonFiniteParameter`],
    /// [`InputError::NegativeStress`] or [`InputError::NonPositiveThickness`].
    pub fn validate(&self) -> Result<(), InputError> {
        for (name, value) in [
            ("sigma", self.sigma),
            ("force", self.force),
            ("thickness", self.thickness),
            ("tolerance", self.tolerance),
        ] {
            if !value.is_finite() {
                return Err(InputError::NonFiniteParameter { name, value });
            }
        }
        if self.sigma < 0.0 {
            return Err(InputError::NegativeStress { sigma: self.sigma });
        }
        if self.thickness <= 0.0 {
            return Err(InputError::NonPositiveThickness {
                thickness: self.thickness,
            });
        }
        Ok(())
    }
}

/// Ordered candidate heights and widths searched by the evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateSet {
    /// Candidate web heights `h` in millimetres.
    pub heights: Vec<f64>,
    /// Candidate flange widths `w` in millimetres.
    pub widths: Vec<f64>,
}

impl CandidateSet {
    /// Create a candidate set from explicit sequences.
    ///
    /// # Examples
    /// ```
    /// use ibeamx::CandidateSet;
    ///
    /// let candidates = CandidateSet::new(vec![100.0, 200.0], vec![50.0]);
    /// assert_eq!(candidates.len(), 2);
    /// ```
    #[must_use]
    pub fn new(heights: Vec<f64>, widths: Vec<f64>) -> Self {
        Self { heights, widths }
    }

    /// Default search grid for a given thickness: both dimensions run over
    /// `1 .. 1001 − 2t` in millimetre steps, keeping the outer depth within
    /// [`DEFAULT_MAX_OUTER_DIMENSION`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRange`] when the thickness leaves no
    /// room for any candidate.
    pub fn default_for_thickness(thickness: f64) -> Result<Self, ConfigError> {
        let range = CandidateRange::default_for_thickness(thickness);
        let values = range.values()?;
        Ok(Self::new(values.clone(), values))
    }

    /// Number of `(height, width)` combinations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heights.len() * self.widths.len()
    }

    /// Whether the set contains no combinations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check both sequences are non-empty and hold positive finite values.
    ///
    /// # Errors
    ///
    /// Returns the first [`InputError`] found, heights before widths.
    pub fn validate(&self) -> Result<(), InputError> {
        if self.heights.is_empty() {
            return Err(InputError::EmptyHeights);
        }
        if self.widths.is_empty() {
            return Err(InputError::EmptyWidths);
        }
        for (dimension, values) in [
            (Dimension::Height, &self.heights),
            (Dimension::Width, &self.widths),
        ] {
            if let Some((index, &value)) = values
                .iter()
                .enumerate()
                .find(|(_, value)| !(value.is_finite() && **value > 0.0))
            {
                return Err(InputError::NonPositiveCandidate {
                    dimension,
                    index,
                    value,
                });
            }
        }
        Ok(())
    }
}

/// Half-open arithmetic range `start, start + step, … < stop`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CandidateRange {
    /// First value of the range.
    pub start: f64,
    /// Exclusive upper bound.
    pub stop: f64,
    /// Increment between values.
    #[serde(default = "default_step")]
    pub step: f64,
}

/// Serde default for [`CandidateRange::step`].
fn default_step() -> f64 {
    1.0
}

impl CandidateRange {
    /// Create a range with explicit bounds.
    #[must_use]
    pub const fn new(start: f64, stop: f64, step: f64) -> Self {
        Self { start, stop, step }
    }

    /// The range `1 .. 1001 − 2t` used when no candidates are configured.
    #[must_use]
    pub fn default_for_thickness(thickness: f64) -> Self {
        Self::new(1.0, DEFAULT_MAX_OUTER_DIMENSION + 1.0 - 2.0 * thickness, 1.0)
    }

    /// Expand the range into its values.
    ///
    /// Values are computed as `start + i · step` so long ranges do not
    /// accumulate rounding drift.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRange`] when a bound is not finite, the
    /// step is not positive, the range is empty, or it would hold more than
    /// [`MAX_RANGE_VALUES`] values.
    ///
    /// # Examples
    /// ```
    /// use ibeamx::CandidateRange;
    ///
    /// let values = CandidateRange::new(1.0, 4.0, 1.0).values().unwrap();
    /// assert_eq!(values, vec![1.0, 2.0, 3.0]);
    /// ```
    pub fn values(&self) -> Result<Vec<f64>, ConfigError> {
        let invalid = |reason| ConfigError::InvalidRange {
            start: self.start,
            stop: self.stop,
            step: self.step,
            reason,
        };
        if !(self.start.is_finite() && self.stop.is_finite() && self.step.is_finite()) {
            return Err(invalid("bounds and step must be finite"));
        }
        if self.step <= 0.0 {
            return Err(invalid("step must be positive"));
        }
        if self.start >= self.stop {
            return Err(invalid("range is empty"));
        }
        let count = ((self.stop - self.start) / self.step).ceil();
        if count > f64::from(MAX_RANGE_VALUES) {
            return Err(invalid("range holds too many values"));
        }
        // One spare index absorbs rounding in `count`; `take_while` trims it.
        let values = (0..=MAX_RANGE_VALUES)
            .map(|i| self.start + f64::from(i) * self.step)
            .take_while(|value| *value < self.stop)
            .collect();
        Ok(values)
    }
}
