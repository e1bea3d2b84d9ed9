#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_doc_code_examples)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

pub mod config;
pub mod errors;
pub mod evaluator;
pub mod geometry;
pub mod parameters;
pub mod report;

pub use config::{CandidateSource, CandidateValues, DesignConfig, DEFAULT_DISTANCES};
pub use errors::{ConfigError, Dimension, EvaluationError, InputError};
pub use evaluator::{
    efficiency_grid, evaluate, evaluate_distances, evaluate_with, select_best, BeamDesign,
    Outcome, SearchStrategy,
};
pub use geometry::{section, EvaluationCell, IBeamSection};
pub use parameters::{
    BeamParameters, CandidateRange, CandidateSet, DEFAULT_MAX_OUTER_DIMENSION, MAX_RANGE_VALUES,
};
pub use report::{render_json, render_table};
