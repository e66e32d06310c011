//! Consolidated validation utilities
//!
//! Each validator is a stateless unit struct grouping the checks for one
//! kind of input. `InputValidator` composes them.

pub mod features;
pub mod labels;
pub mod probabilities;

pub use features::FeatureValidator;
pub use labels::LabelValidator;
pub use probabilities::ProbabilityValidator;
