//! Predicted-probability validation utilities
//!
//! Provides shape and value-range checks for `examples x classes`
//! probability matrices.

use crate::error::{Result, ValidationError};
use crate::types::PredProbs;
use ndarray::ArrayD;

/// Validator for predicted-probability matrices
pub struct ProbabilityValidator;

impl ProbabilityValidator {
    /// Borrow the dense array, rejecting any other container
    pub fn as_dense(pred_probs: &PredProbs) -> Result<&ArrayD<f64>> {
        match pred_probs {
            PredProbs::Dense(array) => Ok(array),
            PredProbs::Unsupported { type_name } => Err(ValidationError::invalid_type(format!(
                "pred_probs must be a numeric array, got {}.",
                type_name
            ))),
        }
    }

    /// Validate the row count against the number of labels
    pub fn validate_row_count(pred_probs: &ArrayD<f64>, num_labels: usize) -> Result<()> {
        let rows = pred_probs.shape().first().copied().ok_or_else(|| {
            ValidationError::invalid_type("pred_probs must have at least one dimension.")
        })?;
        if rows != num_labels {
            return Err(ValidationError::invalid_value(format!(
                "pred_probs and labels must have same length, but pred_probs has {} rows and labels has {} entries.",
                rows, num_labels
            )));
        }
        Ok(())
    }

    /// Validate the matrix is 2-D; returns the column (class) count
    pub fn validate_matrix_shape(pred_probs: &ArrayD<f64>) -> Result<usize> {
        match pred_probs.shape() {
            &[_, columns] => Ok(columns),
            shape => Err(ValidationError::invalid_value(format!(
                "pred_probs array must have shape: num_examples x num_classes, got shape {:?}.",
                shape
            ))),
        }
    }

    /// Validate every value lies in `[min, max]`; non-finite values are out of range
    pub fn validate_value_range(pred_probs: &ArrayD<f64>, min: f64, max: f64) -> Result<()> {
        for value in pred_probs {
            if !value.is_finite() {
                return Err(ValidationError::invalid_value(format!(
                    "Values in pred_probs must be between {} and {}, found non-finite value {}.",
                    min, max, value
                )));
            }
            if *value < min || *value > max {
                return Err(ValidationError::invalid_value(format!(
                    "Values in pred_probs must be between {} and {}, found {}.",
                    min, max, value
                )));
            }
        }
        Ok(())
    }

    /// Validate the number of distinct labels matches the column count
    pub fn validate_class_count(num_unique_labels: usize, num_columns: usize) -> Result<()> {
        if num_unique_labels != num_columns {
            return Err(ValidationError::invalid_value(format!(
                "All classes in (0,1,2,...,K-1) must be present in labels \
                 with K = pred_probs.shape[1] = {} in your case, \
                 but your labels only contain {} unique values.",
                num_columns, num_unique_labels
            )));
        }
        Ok(())
    }
}
