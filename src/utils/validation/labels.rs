//! Label validation utilities
//!
//! Normalizes label containers into numeric arrays and checks that class
//! labels are zero-indexed and contiguous.

use crate::error::{Result, ValidationError};
use crate::types::{LabelContainer, Nested};
use ndarray::{arr0, Array1, ArrayBase, ArrayD, Data, Dimension};

/// Validator for label containers
pub struct LabelValidator;

impl LabelValidator {
    /// Convert a labels container into a numeric array
    ///
    /// Series yield their values and single-column frames are flattened.
    /// Every other form goes through generic array coercion, which may
    /// produce an array of any rank; rank is checked separately by
    /// `assert_valid_class_labels`.
    pub fn labels_to_array(y: &LabelContainer) -> Result<ArrayD<i64>> {
        match y {
            LabelContainer::Series(series) => Ok(series.to_array().into_dyn()),
            LabelContainer::Frame(frame) => {
                if frame.ncols() != 1 {
                    return Err(ValidationError::invalid_value(format!(
                        "labels must be one dimensional, but the DataFrame has {} columns.",
                        frame.ncols()
                    )));
                }
                Ok(frame.values().iter().copied().collect::<Array1<i64>>().into_dyn())
            },
            LabelContainer::Array(array) => Ok(array.clone()),
            LabelContainer::Scalar(value) => Ok(arr0(*value).into_dyn()),
            LabelContainer::Sequence(items) => {
                Nested::coerce(items).ok_or_else(Self::not_convertible)
            },
            LabelContainer::Unsupported { .. } => Err(Self::not_convertible()),
        }
    }

    fn not_convertible() -> ValidationError {
        ValidationError::invalid_value(
            "List of labels must be convertible to a 1D numeric array.",
        )
    }

    /// Sorted distinct values of `y`
    pub fn unique_classes<S, D>(y: &ArrayBase<S, D>) -> Vec<i64>
    where
        S: Data<Elem = i64>,
        D: Dimension,
    {
        let mut classes: Vec<i64> = y.iter().copied().collect();
        classes.sort_unstable();
        classes.dedup();
        classes
    }

    /// Check that `y` is 1-D and, unless relaxed, holds every class in `0..K-1`
    pub fn assert_valid_class_labels<S, D>(y: &ArrayBase<S, D>, allow_missing_classes: bool) -> Result<()>
    where
        S: Data<Elem = i64>,
        D: Dimension,
    {
        if y.ndim() != 1 {
            return Err(ValidationError::invalid_value(format!(
                "labels must be 1D array, got {} dimensions.",
                y.ndim()
            )));
        }

        if !allow_missing_classes {
            let unique = Self::unique_classes(y);
            if unique.len() < 2 {
                return Err(ValidationError::invalid_value(
                    "Labels must contain at least 2 classes.",
                ));
            }

            let contiguous = unique
                .iter()
                .zip(0_i64..)
                .all(|(&class, expected)| class == expected);
            if !contiguous {
                return Err(ValidationError::invalid_type(format!(
                    "Labels must be zero-indexed integers (0,1,2,..,K-1), but in your case: \
                     unique(labels) = {:?}. Every class in (0,1,2,..,K-1) must be present in labels as well.",
                    unique
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tabular::{DataFrame, Series};
    use ndarray::array;

    #[test]
    fn test_labels_to_array_from_sequence() {
        let y = LabelValidator::labels_to_array(&LabelContainer::from(vec![0_i64, 1, 1])).unwrap();
        assert_eq!(y, array![0_i64, 1, 1].into_dyn());
    }

    #[test]
    fn test_labels_to_array_from_series() {
        let y = LabelContainer::from(Series::new(vec![2_i64, 0, 1]).with_name("target"));
        assert_eq!(
            LabelValidator::labels_to_array(&y).unwrap(),
            array![2_i64, 0, 1].into_dyn()
        );
    }

    #[test]
    fn test_labels_to_array_from_frame() {
        let single = LabelContainer::from(DataFrame::from_column("y", vec![1_i64, 0, 1]));
        assert_eq!(
            LabelValidator::labels_to_array(&single).unwrap(),
            array![1_i64, 0, 1].into_dyn()
        );

        let double = LabelContainer::from(
            DataFrame::from_rows(
                vec!["a".to_string(), "b".to_string()],
                vec![vec![0_i64, 1], vec![1_i64, 0]],
            )
            .unwrap(),
        );
        let err = LabelValidator::labels_to_array(&double).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidValue(_)));
        assert!(err.to_string().contains("one dimensional"));
    }

    #[test]
    fn test_labels_to_array_generic_coercion() {
        // Nested input keeps its rank; rejected later by the 1-D check
        let nested = LabelContainer::from(vec![vec![0_i64, 1], vec![1_i64, 0]]);
        assert_eq!(LabelValidator::labels_to_array(&nested).unwrap().ndim(), 2);

        let scalar = LabelValidator::labels_to_array(&LabelContainer::Scalar(3)).unwrap();
        assert_eq!(scalar.ndim(), 0);

        let ragged = LabelContainer::Sequence(vec![
            Nested::List(vec![Nested::Scalar(0)]),
            Nested::List(vec![Nested::Scalar(0), Nested::Scalar(1)]),
        ]);
        assert!(matches!(
            LabelValidator::labels_to_array(&ragged),
            Err(ValidationError::InvalidValue(_))
        ));
        assert!(LabelValidator::labels_to_array(&LabelContainer::unsupported("dict")).is_err());
    }

    #[test]
    fn test_valid_class_labels() {
        assert!(LabelValidator::assert_valid_class_labels(&array![0_i64, 0, 1, 2], false).is_ok());
        assert!(LabelValidator::assert_valid_class_labels(&array![2_i64, 1, 0], false).is_ok());
    }

    #[test]
    fn test_missing_class_zero() {
        let y = array![1_i64, 2, 3];
        let err = LabelValidator::assert_valid_class_labels(&y, false).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidType(_)));
        assert!(err.to_string().contains("[1, 2, 3]"));
        assert!(LabelValidator::assert_valid_class_labels(&y, true).is_ok());
    }

    #[test]
    fn test_gap_in_classes() {
        let err = LabelValidator::assert_valid_class_labels(&array![0_i64, 2, 2], false).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidType(_)));
    }

    #[test]
    fn test_single_class() {
        let y = array![0_i64];
        let err = LabelValidator::assert_valid_class_labels(&y, false).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidValue(_)));
        assert!(err.to_string().contains("at least 2 classes"));
        assert!(LabelValidator::assert_valid_class_labels(&y, true).is_ok());
    }

    #[test]
    fn test_rank_checked_even_when_relaxed() {
        let y = array![[0_i64, 1], [1, 0]];
        assert!(LabelValidator::assert_valid_class_labels(&y, true).is_err());

        let empty: Array1<i64> = Array1::from(vec![]);
        assert!(LabelValidator::assert_valid_class_labels(&empty, true).is_ok());
        assert!(LabelValidator::assert_valid_class_labels(&empty, false).is_err());
    }

    #[test]
    fn test_permutations_of_contiguous_classes() {
        for k in 2..8_i64 {
            // Rotations and reversals of 0..k, with duplicates appended
            let base: Vec<i64> = (0..k).collect();
            for shift in 0..k as usize {
                let mut labels = base.clone();
                labels.rotate_left(shift);
                labels.reverse();
                labels.extend_from_slice(&base[..1]);
                let y = Array1::from(labels);
                assert!(
                    LabelValidator::assert_valid_class_labels(&y, false).is_ok(),
                    "k={} shift={}",
                    k,
                    shift
                );
            }
        }
    }

    #[test]
    fn test_unique_classes_sorted() {
        assert_eq!(LabelValidator::unique_classes(&array![3_i64, 1, 3, 0]), vec![0_i64, 1, 3]);
    }
}
