//! Input validator
//!
//! `InputValidator` composes the label, feature and probability validators
//! into the full input contract. Its capability registry is built once at
//! construction; validation itself holds no state.

use crate::config::ValidationConfig;
use crate::error::{Result, ValidationError};
use crate::registry::CapabilityRegistry;
use crate::types::{Features, LabelContainer, PredProbs, ValidationReport, ValidationWarning};
use crate::utils::{FeatureValidator, LabelValidator, ProbabilityValidator};
use ndarray::{ArrayBase, ArrayD, Data, Dimension};
use std::sync::OnceLock;

/// Validates labels, features and predicted probabilities
#[derive(Debug, Clone)]
pub struct InputValidator {
    config: ValidationConfig,
    registry: CapabilityRegistry,
}

impl Default for InputValidator {
    fn default() -> Self {
        let config = ValidationConfig::default();
        let registry = CapabilityRegistry::from_config(&config);
        Self { config, registry }
    }
}

impl InputValidator {
    /// Create a validator, building its capability registry from `config`
    pub fn new(config: ValidationConfig) -> Result<Self> {
        config.validate()?;
        let registry = CapabilityRegistry::from_config(&config);
        Ok(Self { config, registry })
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    pub fn registry(&self) -> &CapabilityRegistry {
        &self.registry
    }

    /// Normalize a labels container into a numeric array
    pub fn labels_to_array(&self, y: &LabelContainer) -> Result<ArrayD<i64>> {
        LabelValidator::labels_to_array(y)
    }

    /// Check labels are 1-D and, unless relaxed, zero-indexed and complete
    pub fn assert_valid_class_labels<S, D>(
        &self,
        y: &ArrayBase<S, D>,
        allow_missing_classes: bool,
    ) -> Result<()>
    where
        S: Data<Elem = i64>,
        D: Dimension,
    {
        LabelValidator::assert_valid_class_labels(y, allow_missing_classes)
    }

    /// Fail if the features handle is absent
    pub fn assert_nonempty_input(&self, x: Option<&Features>) -> Result<()> {
        FeatureValidator::assert_nonempty_input(x)
    }

    /// Ensure the features handle supports list-based indexing
    pub fn assert_indexing_works(
        &self,
        x: &Features,
        idx: Option<&[usize]>,
        length_x: Option<usize>,
    ) -> Result<()> {
        FeatureValidator::assert_indexing_works(
            &self.registry,
            x,
            idx,
            length_x,
            self.config.default_length,
        )
    }

    /// Validate inputs using the mode flags of this validator's configuration
    pub fn validate(
        &self,
        x: Option<&Features>,
        y: &LabelContainer,
        pred_probs: Option<&PredProbs>,
    ) -> Result<ValidationReport> {
        self.assert_valid_inputs(
            x,
            y,
            pred_probs,
            self.config.multi_label,
            self.config.allow_missing_classes,
        )
    }

    /// Check that features, labels and predicted probabilities are correctly formatted
    ///
    /// Returns on the first violated contract. A recognized batched stream
    /// is exempt from the emptiness, length and indexing checks on `x`
    /// because its reported length counts batches rather than examples.
    ///
    /// # Examples
    /// ```rust
    /// use labelcheck::{Features, InputValidator, LabelContainer, PredProbs};
    /// use ndarray::array;
    ///
    /// # fn main() -> labelcheck::Result<()> {
    /// let validator = InputValidator::default();
    /// let x = Features::from(array![[1.0, 2.0], [3.0, 4.0]]);
    /// let y = LabelContainer::from(vec![0_i64, 1]);
    /// let pred_probs = PredProbs::from(array![[0.9, 0.1], [0.2, 0.8]]);
    ///
    /// let report = validator.assert_valid_inputs(Some(&x), &y, Some(&pred_probs), false, false)?;
    /// assert_eq!(report.num_labels, 2);
    /// assert!(report.has_warnings());
    /// # Ok(())
    /// # }
    /// ```
    pub fn assert_valid_inputs(
        &self,
        x: Option<&Features>,
        y: &LabelContainer,
        pred_probs: Option<&PredProbs>,
        multi_label: bool,
        allow_missing_classes: bool,
    ) -> Result<ValidationReport> {
        let span = tracing::debug_span!(
            "assert_valid_inputs",
            multi_label,
            allow_missing_classes,
            has_features = x.is_some(),
            has_pred_probs = pred_probs.is_some()
        );
        let _enter = span.enter();

        if let LabelContainer::Unsupported { type_name } = y {
            return Err(ValidationError::invalid_type(format!(
                "labels should be an array, list, Series or DataFrame, got {}.",
                type_name
            )));
        }

        let mut report = ValidationReport::default();

        // Multi-label mode sizes the labels only where a length is compared
        let mut known_len = None;
        let unique_classes = if multi_label {
            None
        } else {
            let labels = self.labels_to_array(y)?;
            self.assert_valid_class_labels(&labels, allow_missing_classes)?;
            known_len = Some(labels.len());
            let unique = LabelValidator::unique_classes(&labels);
            report.num_classes = Some(unique.len());
            Some(unique)
        };

        let stream_exempt = x.is_some_and(|features| self.registry.skips_length_checks(features));
        if stream_exempt {
            tracing::debug!(
                features = ?x.map(Features::type_name),
                "skipping emptiness, length and indexing checks for batched stream"
            );
        }
        let allow_empty_x = pred_probs.is_some() || stream_exempt;

        if !allow_empty_x {
            self.assert_nonempty_input(x)?;
            if let Some(features) = x {
                let num_examples = FeatureValidator::num_examples(&self.registry, features)?;
                let num_labels = labels_len(y, &mut known_len)?;
                if num_examples != num_labels {
                    return Err(ValidationError::length_mismatch(
                        "X",
                        num_examples,
                        "labels",
                        num_labels,
                    ));
                }
                self.assert_indexing_works(features, None, Some(num_examples))?;
                report.num_examples = Some(num_examples);
                report.features_checked = true;
            }
        }

        if let Some(pred_probs) = pred_probs {
            let probs = ProbabilityValidator::as_dense(pred_probs)?;
            ProbabilityValidator::validate_row_count(probs, labels_len(y, &mut known_len)?)?;
            let num_columns = ProbabilityValidator::validate_matrix_shape(probs)?;
            ProbabilityValidator::validate_value_range(probs, 0.0, 1.0)?;

            if x.is_some() {
                let warning = ValidationWarning::FeaturesMayBeIgnored;
                tracing::warn!(warning = %warning, "features and pred_probs both supplied");
                report.warnings.push(warning);
            }

            // Multi-label mode never computes classes, so it never compares them
            if !allow_missing_classes {
                if let Some(unique) = &unique_classes {
                    ProbabilityValidator::validate_class_count(unique.len(), num_columns)?;
                }
            }
        }

        report.num_labels = known_len.or_else(|| y.len()).unwrap_or_default();
        tracing::debug!(
            num_labels = report.num_labels,
            num_classes = ?report.num_classes,
            num_examples = ?report.num_examples,
            "inputs validated"
        );
        Ok(report)
    }
}

/// Length of `y`, computed on first use
fn labels_len(y: &LabelContainer, known_len: &mut Option<usize>) -> Result<usize> {
    if let Some(len) = *known_len {
        return Ok(len);
    }
    let len = y.len().ok_or_else(|| {
        ValidationError::invalid_type(format!("labels of type {} have no length.", y.type_name()))
    })?;
    *known_len = Some(len);
    Ok(len)
}

static DEFAULT_VALIDATOR: OnceLock<InputValidator> = OnceLock::new();

/// Process-wide validator with the default configuration
pub fn default_validator() -> &'static InputValidator {
    DEFAULT_VALIDATOR.get_or_init(InputValidator::default)
}

/// Normalize a labels container into a numeric array
pub fn labels_to_array(y: &LabelContainer) -> Result<ArrayD<i64>> {
    default_validator().labels_to_array(y)
}

/// Check labels are 1-D and, unless relaxed, zero-indexed and complete
pub fn assert_valid_class_labels<S, D>(y: &ArrayBase<S, D>, allow_missing_classes: bool) -> Result<()>
where
    S: Data<Elem = i64>,
    D: Dimension,
{
    default_validator().assert_valid_class_labels(y, allow_missing_classes)
}

/// Fail if the features handle is absent
pub fn assert_nonempty_input(x: Option<&Features>) -> Result<()> {
    default_validator().assert_nonempty_input(x)
}

/// Ensure the features handle supports list-based indexing
pub fn assert_indexing_works(
    x: &Features,
    idx: Option<&[usize]>,
    length_x: Option<usize>,
) -> Result<()> {
    default_validator().assert_indexing_works(x, idx, length_x)
}

/// Check that features, labels and predicted probabilities are correctly formatted
pub fn assert_valid_inputs(
    x: Option<&Features>,
    y: &LabelContainer,
    pred_probs: Option<&PredProbs>,
    multi_label: bool,
    allow_missing_classes: bool,
) -> Result<ValidationReport> {
    default_validator().assert_valid_inputs(x, y, pred_probs, multi_label, allow_missing_classes)
}
