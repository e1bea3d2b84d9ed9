//! Cross-section properties of the idealised I-beam.
//!
//! The section is modelled as a web of height `h` and thickness `t` with two
//! flanges of thickness `t` and width `w`, giving an outer depth of `h + 2t`.
//! Properties follow the rectangle decomposition described at
//! <https://en.wikipedia.org/wiki/Second_moment_of_area>. All lengths are in
//! millimetres.

use serde::Serialize;

/// Dimensions of a symmetric I-section.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct IBeamSection {
    /// Clear web height `h` between the flanges.
    pub height: f64,
    /// Flange width `w`.
    pub width: f64,
    /// Flange and web thickness `t`.
    pub thickness: f64,
}

impl IBeamSection {
    /// Create an [`IBeamSection`] with explicit dimensions.
    #[must_use]
    pub const fn new(height: f64, width: f64, thickness: f64) -> Self {
        Self {
            height,
            width,
            thickness,
        }
    }

    /// Total depth of the section, `h + 2t`.
    #[must_use]
    pub fn outer_height(&self) -> f64 {
        self.height + 2.0 * self.thickness
    }

    /// Cross-sectional area, `2tw + th`.
    #[must_use]
    pub fn cross_sectional_area(&self) -> f64 {
        2.0 * self.thickness * self.width + self.thickness * self.height
    }

    /// Second moment of area about the bending axis.
    ///
    /// `I = t h³ / 12 + (w / 12) ((2t + h)³ − h³)`
    ///
    /// Every term stays exact in `f64` for integer millimetre dimensions below
    /// roughly 200 m, so the cubic difference does not suffer cancellation in
    /// any realistic design space.
    #[must_use]
    pub fn moment_of_inertia(&self) -> f64 {
        let t = self.thickness;
        let h = self.height;
        let w = self.width;
        t * h.powi(3) / 12.0 + (w / 12.0) * ((2.0 * t + h).powi(3) - h.powi(3))
    }

    /// Distance from the neutral axis to the extreme fibre, `h / 2 + t`.
    #[must_use]
    pub fn neutral_axis_offset(&self) -> f64 {
        self.height / 2.0 + self.thickness
    }

    /// Elastic section modulus, `I / y`.
    #[must_use]
    pub fn section_modulus(&self) -> f64 {
        self.moment_of_inertia() / self.neutral_axis_offset()
    }

    /// Derive every property of the section and score it against a required
    /// section modulus.
    ///
    /// The section is eligible only when its modulus lies strictly inside
    /// `(required_modulus, tolerance * required_modulus)`; otherwise the
    /// efficiency is zero.
    #[must_use]
    pub fn cell(&self, required_modulus: f64, tolerance: f64) -> EvaluationCell {
        let cross_sectional_area = self.cross_sectional_area();
        let moment_of_inertia = self.moment_of_inertia();
        let neutral_axis_offset = self.neutral_axis_offset();
        let section_modulus = self.section_modulus();
        let eligible =
            section_modulus > required_modulus && section_modulus < tolerance * required_modulus;
        let efficiency = if eligible {
            section_modulus / cross_sectional_area
        } else {
            0.0
        };
        EvaluationCell {
            cross_sectional_area,
            moment_of_inertia,
            neutral_axis_offset,
            section_modulus,
            efficiency,
        }
    }
}

/// Properties derived for one `(height, width)` candidate during a search.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct EvaluationCell {
    /// Cross-sectional area in mm².
    pub cross_sectional_area: f64,
    /// Second moment of area in mm⁴.
    pub moment_of_inertia: f64,
    /// Neutral axis to extreme fibre distance in mm.
    pub neutral_axis_offset: f64,
    /// Achieved section modulus in mm³.
    pub section_modulus: f64,
    /// Section modulus per unit area, or zero when the candidate is rejected.
    pub efficiency: f64,
}

impl EvaluationCell {
    /// Whether the candidate passed the validity gate.
    #[must_use]
    pub fn is_eligible(&self) -> bool {
        self.efficiency > 0.0
    }
}

/// Convenience helper for creating [`IBeamSection`] instances.
///
/// # Examples
/// ```
/// use ibeamx::section;
///
/// let beam = section(2.0, 12.0, 3.0);
/// assert_eq!(beam.moment_of_inertia(), 506.0);
/// assert_eq!(beam.section_modulus(), 126.5);
/// ```
#[must_use]
pub const fn section(height: f64, width: f64, thickness: f64) -> IBeamSection {
    IBeamSection::new(height, width, thickness)
}
