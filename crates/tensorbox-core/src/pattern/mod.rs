//! Pattern/Experiment data model.
//!
//! A pattern is a hyper-rectangle of a dense tensor (one index set per
//! dimension) plus the density it predicts for every covered cell. An
//! experiment is the ranked list of patterns produced by one mining run.

pub mod box_pattern;
pub mod cells;
pub mod experiment;
pub mod similarity;

pub use box_pattern::Pattern;
pub use cells::Cells;
pub use experiment::{Experiment, SortReport};
pub use similarity::jaccard_index;
