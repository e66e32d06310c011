//! Feature handle validation utilities
//!
//! Checks that a features handle is present, can be sized, and supports
//! list-based indexing. Capability questions are delegated to the
//! `CapabilityRegistry` the caller was built with.

use crate::error::{Result, ValidationError};
use crate::registry::CapabilityRegistry;
use crate::types::Features;

/// Validator for features handles
pub struct FeatureValidator;

impl FeatureValidator {
    /// Fail if the features handle is absent
    pub fn assert_nonempty_input(x: Option<&Features>) -> Result<()> {
        if x.is_none() {
            return Err(ValidationError::invalid_value(
                "Data features X cannot be None. Currently X is None.",
            ));
        }
        Ok(())
    }

    /// Example count of `x`, trying each size strategy in order
    pub fn num_examples(registry: &CapabilityRegistry, x: &Features) -> Result<usize> {
        registry.num_examples(x).ok_or_else(|| {
            let supported: Vec<&str> = registry
                .size_strategies()
                .iter()
                .map(|strategy| strategy.name())
                .collect();
            ValidationError::invalid_type(format!(
                "Data features X must support either: {} (got {})",
                supported.join(" or "),
                x.type_name()
            ))
        })
    }

    /// Positions sampled by the indexing probe: first and last example
    pub fn probe_indices(length_x: Option<usize>, default_length: usize) -> Vec<usize> {
        let length = length_x.unwrap_or(default_length);
        vec![0, length.saturating_sub(1)]
    }

    /// Ensure `x` can be subset by a list of positions
    ///
    /// `idx` defaults to the first and last position of `length_x`
    /// examples, and `length_x` to `default_length` when unknown.
    pub fn assert_indexing_works(
        registry: &CapabilityRegistry,
        x: &Features,
        idx: Option<&[usize]>,
        length_x: Option<usize>,
        default_length: usize,
    ) -> Result<()> {
        let sampled;
        let indices = match idx {
            Some(indices) => indices,
            None => {
                sampled = Self::probe_indices(length_x, default_length);
                sampled.as_slice()
            },
        };

        if registry.find_indexing_protocol(x, indices).is_some() {
            return Ok(());
        }

        Err(ValidationError::invalid_type(
            "Data features X must support list-based indexing; i.e. one of these must work: \n\
             1)  X[index_list] where say index_list = [0,1,3,10], or \n\
             2)  X.iloc[index_list] if X is a DataFrame.",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasets::FeatureSource;
    use crate::tabular::{DataFrame, Series};
    use ndarray::array;

    #[derive(Debug)]
    struct SubscriptOnly;

    impl FeatureSource for SubscriptOnly {
        fn type_name(&self) -> &str {
            "SubscriptOnly"
        }

        fn select(&self, _indices: &[usize]) -> Result<()> {
            Ok(())
        }
    }

    #[derive(Debug)]
    struct Nothing;

    impl FeatureSource for Nothing {
        fn type_name(&self) -> &str {
            "Nothing"
        }
    }

    #[test]
    fn test_assert_nonempty_input() {
        let x = Features::from(array![1.0, 2.0]);
        assert!(FeatureValidator::assert_nonempty_input(Some(&x)).is_ok());

        let err = FeatureValidator::assert_nonempty_input(None).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidValue(_)));
        assert!(err.to_string().contains("cannot be None"));
    }

    #[test]
    fn test_probe_indices() {
        assert_eq!(FeatureValidator::probe_indices(Some(10), 2), vec![0, 9]);
        assert_eq!(FeatureValidator::probe_indices(None, 2), vec![0, 1]);
        assert_eq!(FeatureValidator::probe_indices(Some(0), 2), vec![0, 0]);
    }

    #[test]
    fn test_num_examples() {
        let registry = CapabilityRegistry::default();
        let x = Features::from(array![[1.0, 2.0], [3.0, 4.0]]);
        assert_eq!(FeatureValidator::num_examples(&registry, &x).unwrap(), 2);

        let err = FeatureValidator::num_examples(&registry, &Features::custom(Nothing)).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidType(_)));
        assert!(err.to_string().contains("len(X) or X.shape[0]"));
    }

    #[test]
    fn test_indexing_via_subscript_only() {
        let registry = CapabilityRegistry::default();
        let x = Features::custom(SubscriptOnly);
        assert!(FeatureValidator::assert_indexing_works(&registry, &x, Some(&[0, 1][..]), None, 2).is_ok());
    }

    #[test]
    fn test_indexing_unsupported() {
        let registry = CapabilityRegistry::default();
        let x = Features::custom(Nothing);
        let err = FeatureValidator::assert_indexing_works(&registry, &x, None, None, 2).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidType(_)));
        let msg = err.to_string();
        assert!(msg.contains("X[index_list]"));
        assert!(msg.contains("X.iloc[index_list]"));
    }

    #[test]
    fn test_indexing_tabular() {
        let registry = CapabilityRegistry::default();
        let frame = Features::from(
            DataFrame::from_rows(
                vec!["f0".to_string(), "f1".to_string()],
                vec![vec![0.1, 0.2], vec![0.3, 0.4], vec![0.5, 0.6]],
            )
            .unwrap(),
        );
        assert!(FeatureValidator::assert_indexing_works(&registry, &frame, None, Some(3), 2).is_ok());
        assert!(FeatureValidator::assert_indexing_works(&registry, &frame, None, Some(4), 2).is_err());

        let series = Features::from(Series::new(vec![1.0, 2.0]));
        assert!(FeatureValidator::assert_indexing_works(&registry, &series, None, None, 2).is_ok());
    }

    #[test]
    fn test_indexing_uses_default_length() {
        let registry = CapabilityRegistry::default();
        let x = Features::from(array![1.0, 2.0, 3.0]);
        assert!(FeatureValidator::assert_indexing_works(&registry, &x, None, None, 3).is_ok());
        assert!(FeatureValidator::assert_indexing_works(&registry, &x, None, None, 4).is_err());
    }
}
