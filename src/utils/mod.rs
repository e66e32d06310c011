//! Utility modules for common operations

pub mod validation;

// Re-export commonly used items for convenience
pub use validation::{FeatureValidator, LabelValidator, ProbabilityValidator};
