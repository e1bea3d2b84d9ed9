//! Exhaustive search of the I-beam design space.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use ndarray::Array2;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::{EvaluationError, InputError};
use crate::geometry::{section, IBeamSection};
use crate::parameters::{BeamParameters, CandidateSet};

/// How the `(height, width)` grid is scanned.
///
/// Every strategy returns the same [`Outcome`], including which of several
/// equally efficient candidates is reported.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    /// Row-major loop on the calling thread.
    #[default]
    Sequential,
    /// Materialise the full efficiency grid, then select from it.
    Grid,
    /// Scan height rows on the current rayon pool.
    Parallel,
}

impl FromStr for SearchStrategy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "sequential" => Ok(Self::Sequential),
            "grid" => Ok(Self::Grid),
            "parallel" => Ok(Self::Parallel),
            other => Err(format!(
                "unknown strategy `{other}` (expected sequential, grid or parallel)"
            )),
        }
    }
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequential => f.write_str("sequential"),
            Self::Grid => f.write_str("grid"),
            Self::Parallel => f.write_str("parallel"),
        }
    }
}

/// Most efficient admissible section found for one load distance.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BeamDesign {
    /// Load distance the design was selected for, in millimetres.
    pub distance: f64,
    /// Selected web height `h`.
    pub height: f64,
    /// Selected flange width `w`.
    pub width: f64,
    /// Position of `height` in the candidate heights.
    pub height_index: usize,
    /// Position of `width` in the candidate widths.
    pub width_index: usize,
    /// Total depth `h + 2t`.
    pub outer_height: f64,
    /// Section modulus per unit area of the selected section.
    pub efficiency: f64,
    /// Achieved section modulus in mm³.
    pub section_modulus: f64,
    /// Section modulus required by the load, in mm³.
    pub required_section_modulus: f64,
    /// Cross-sectional area in mm².
    pub cross_sectional_area: f64,
}

/// Result of searching the design space for a single load distance.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// At least one candidate passed the validity gate.
    Optimal(BeamDesign),
    /// Every candidate was either too weak or over-built.
    NoValidCombination {
        /// Load distance that has no feasible geometry.
        distance: f64,
    },
}

impl Outcome {
    /// Load distance this outcome refers to.
    #[must_use]
    pub fn distance(&self) -> f64 {
        match self {
            Self::Optimal(design) => design.distance,
            Self::NoValidCombination { distance } => *distance,
        }
    }

    /// The selected design, if any.
    #[must_use]
    pub fn design(&self) -> Option<&BeamDesign> {
        match self {
            Self::Optimal(design) => Some(design),
            Self::NoValidCombination { .. } => None,
        }
    }

    /// Best efficiency, treating an infeasible search as zero.
    #[must_use]
    pub fn efficiency(&self) -> f64 {
        self.design().map_or(0.0, |design| design.efficiency)
    }
}

/// Winning cell while reducing over the grid.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Best {
    /// Efficiency of the cell.
    efficiency: f64,
    /// Row of the cell.
    height_index: usize,
    /// Column of the cell.
    width_index: usize,
}

impl Best {
    /// Pick the better of two cells: higher efficiency first, then the
    /// earlier cell in row-major order.
    ///
    /// The choice does not depend on argument order, so any reduction tree
    /// produces the same winner.
    fn prefer(self, other: Self) -> Self {
        let by_efficiency = self.efficiency.total_cmp(&other.efficiency);
        let by_position = (other.height_index, other.width_index)
            .cmp(&(self.height_index, self.width_index));
        match by_efficiency.then(by_position) {
            Ordering::Less => other,
            Ordering::Equal | Ordering::Greater => self,
        }
    }
}

/// Load case shared by every cell of one search.
#[derive(Clone, Copy, Debug)]
struct LoadCase {
    /// Flange and web thickness.
    thickness: f64,
    /// Required section modulus `M / σ`.
    required_modulus: f64,
    /// Tolerance multiple bounding the accepted modulus.
    tolerance: f64,
}

impl LoadCase {
    /// Efficiency of one candidate, zero when rejected.
    fn efficiency(&self, height: f64, width: f64) -> f64 {
        section(height, width, self.thickness)
            .cell(self.required_modulus, self.tolerance)
            .efficiency
    }

    /// Best admissible cell of one height row.
    fn scan_row(&self, height_index: usize, height: f64, widths: &[f64]) -> Option<Best> {
        widths
            .iter()
            .enumerate()
            .filter_map(|(width_index, &width)| {
                let efficiency = self.efficiency(height, width);
                (efficiency > 0.0).then_some(Best {
                    efficiency,
                    height_index,
                    width_index,
                })
            })
            .reduce(Best::prefer)
    }
}

/// Validate inputs and derive the load case for `distance`.
fn load_case(
    parameters: &BeamParameters,
    distance: f64,
    candidates: &CandidateSet,
) -> Result<LoadCase, EvaluationError> {
    parameters.validate()?;
    if !distance.is_finite() {
        return Err(InputError::NonFiniteParameter {
            name: "distance",
            value: distance,
        }
        .into());
    }
    if parameters.sigma == 0.0 {
        return Err(EvaluationError::DivisionByZero);
    }
    candidates.validate()?;
    Ok(LoadCase {
        thickness: parameters.thickness,
        required_modulus: parameters.required_section_modulus(distance),
        tolerance: parameters.tolerance,
    })
}

/// Compute the efficiency of every `(height, width)` pair.
///
/// Rows follow `candidates.heights` and columns `candidates.widths`. Rejected
/// candidates hold zero.
///
/// # Errors
///
/// Returns [`EvaluationError`] under the same conditions as [`evaluate`].
///
/// # Examples
/// ```
/// use ibeamx::{efficiency_grid, BeamParameters, CandidateSet};
///
/// let candidates = CandidateSet::new(vec![100.0, 200.0, 300.0], vec![50.0, 100.0]);
/// let grid = efficiency_grid(&BeamParameters::default(), 100.0, &candidates).unwrap();
/// assert_eq!(grid.dim(), (3, 2));
/// ```
pub fn efficiency_grid(
    parameters: &BeamParameters,
    distance: f64,
    candidates: &CandidateSet,
) -> Result<Array2<f64>, EvaluationError> {
    let case = load_case(parameters, distance, candidates)?;
    Ok(build_grid(&case, candidates))
}

/// Fill the efficiency grid for a validated load case.
fn build_grid(case: &LoadCase, candidates: &CandidateSet) -> Array2<f64> {
    let shape = (candidates.heights.len(), candidates.widths.len());
    Array2::from_shape_fn(shape, |(row, col)| {
        case.efficiency(candidates.heights[row], candidates.widths[col])
    })
}

/// Locate the most efficient positive cell of a grid.
///
/// Ties resolve to the first cell in row-major order. Returns `None` when no
/// cell is positive.
#[must_use]
pub fn select_best(grid: &Array2<f64>) -> Option<(usize, usize)> {
    grid.indexed_iter()
        .filter(|(_, &efficiency)| efficiency > 0.0)
        .map(|((height_index, width_index), &efficiency)| Best {
            efficiency,
            height_index,
            width_index,
        })
        .reduce(Best::prefer)
        .map(|best| (best.height_index, best.width_index))
}

/// Search the design space for `distance` with the sequential strategy.
///
/// See [`evaluate_with`].
///
/// # Errors
///
/// Returns [`EvaluationError::DivisionByZero`] when `sigma` is zero and
/// [`EvaluationError::InvalidInput`] for non-finite parameters, a negative
/// `sigma`, a non-positive thickness, or empty or non-positive candidates.
pub fn evaluate(
    parameters: &BeamParameters,
    distance: f64,
    candidates: &CandidateSet,
) -> Result<Outcome, EvaluationError> {
    evaluate_with(SearchStrategy::Sequential, parameters, distance, candidates)
}

/// Search the design space for `distance` using `strategy`.
///
/// The required section modulus is `F · d / σ`. A candidate is admissible when
/// its section modulus lies strictly between the required modulus and
/// `tolerance` times it; the admissible candidate with the greatest section
/// modulus per unit area wins.
///
/// # Errors
///
/// See [`evaluate`].
///
/// # Examples
/// ```
/// use ibeamx::{evaluate_with, BeamParameters, CandidateSet, Outcome, SearchStrategy};
///
/// let heights: Vec<f64> = (1..=300_u32).map(f64::from).collect();
/// let candidates = CandidateSet::new(heights.clone(), heights);
/// let outcome = evaluate_with(
///     SearchStrategy::Parallel,
///     &BeamParameters::default(),
///     100.0,
///     &candidates,
/// )
/// .unwrap();
///
/// let Outcome::Optimal(design) = outcome else { panic!("feasible") };
/// assert_eq!((design.height, design.width), (257.0, 38.0));
/// ```
pub fn evaluate_with(
    strategy: SearchStrategy,
    parameters: &BeamParameters,
    distance: f64,
    candidates: &CandidateSet,
) -> Result<Outcome, EvaluationError> {
    let case = load_case(parameters, distance, candidates)?;
    tracing::debug!(
        distance,
        required_modulus = case.required_modulus,
        cells = candidates.len(),
        %strategy,
        "searching design space"
    );

    let heights = &candidates.heights;
    let widths = &candidates.widths;
    let best = match strategy {
        SearchStrategy::Sequential => heights
            .iter()
            .enumerate()
            .filter_map(|(row, &height)| case.scan_row(row, height, widths))
            .reduce(Best::prefer),
        SearchStrategy::Grid => {
            let grid = build_grid(&case, candidates);
            select_best(&grid).map(|(row, col)| Best {
                efficiency: grid[[row, col]],
                height_index: row,
                width_index: col,
            })
        }
        SearchStrategy::Parallel => heights
            .par_iter()
            .enumerate()
            .filter_map(|(row, &height)| case.scan_row(row, height, widths))
            .reduce_with(Best::prefer),
    };

    let Some(best) = best else {
        tracing::warn!(distance, "no feasible geometry");
        return Ok(Outcome::NoValidCombination { distance });
    };

    let beam = IBeamSection::new(
        heights[best.height_index],
        widths[best.width_index],
        parameters.thickness,
    );
    let cell = beam.cell(case.required_modulus, case.tolerance);
    let design = BeamDesign {
        distance,
        height: beam.height,
        width: beam.width,
        height_index: best.height_index,
        width_index: best.width_index,
        outer_height: beam.outer_height(),
        efficiency: best.efficiency,
        section_modulus: cell.section_modulus,
        required_section_modulus: case.required_modulus,
        cross_sectional_area: cell.cross_sectional_area,
    };
    tracing::info!(
        distance,
        height = design.height,
        width = design.width,
        efficiency = design.efficiency,
        "selected geometry"
    );
    Ok(Outcome::Optimal(design))
}

/// Search the design space once per distance, preserving input order.
///
/// # Errors
///
/// Returns [`InputError::EmptyDistances`] when `distances` is empty, and
/// otherwise the first error reported by [`evaluate_with`].
pub fn evaluate_distances(
    strategy: SearchStrategy,
    parameters: &BeamParameters,
    distances: &[f64],
    candidates: &CandidateSet,
) -> Result<Vec<Outcome>, EvaluationError> {
    if distances.is_empty() {
        return Err(InputError::EmptyDistances.into());
    }
    distances
        .iter()
        .map(|&distance| evaluate_with(strategy, parameters, distance, candidates))
        .collect()
}
