//! Core types for input validation
//!
//! The input containers are closed enums: every accepted form of labels,
//! features and predicted probabilities is a variant, and anything else is
//! represented explicitly so it can be rejected with a descriptive error.

use crate::datasets::{BatchedStream, FeatureSource, MapDataset};
use crate::tabular::{DataFrame, Series};
use ndarray::{Array, ArrayD, Dimension, IxDyn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// A possibly nested list of scalars, as produced by JSON or literal input
#[derive(Debug, Clone, PartialEq)]
pub enum Nested<T> {
    Scalar(T),
    List(Vec<Nested<T>>),
}

impl<T: Clone> Nested<T> {
    /// Coerce a list into a dense array
    ///
    /// The shape is taken from the first element at every depth; returns
    /// `None` when the nesting is ragged or mixes scalars and lists. The
    /// first-element shape is unverified until flattening, so it must not
    /// size any allocation.
    pub fn coerce(items: &[Self]) -> Option<ArrayD<T>> {
        let mut shape = vec![items.len()];
        let mut current = items.first();
        while let Some(Self::List(inner)) = current {
            shape.push(inner.len());
            current = inner.first();
        }

        let mut flat = Vec::new();
        if !Self::flatten_into(items, &shape, &mut flat) {
            return None;
        }
        ArrayD::from_shape_vec(IxDyn(&shape), flat).ok()
    }

    fn flatten_into(items: &[Self], shape: &[usize], out: &mut Vec<T>) -> bool {
        let Some((&expected, rest)) = shape.split_first() else {
            return false;
        };
        if items.len() != expected {
            return false;
        }
        for item in items {
            match item {
                Self::Scalar(value) if rest.is_empty() => out.push(value.clone()),
                Self::List(inner) if !rest.is_empty() => {
                    if !Self::flatten_into(inner, rest, out) {
                        return false;
                    }
                },
                _ => return false,
            }
        }
        true
    }
}

impl<T> From<T> for Nested<T> {
    fn from(value: T) -> Self {
        Self::Scalar(value)
    }
}

/// Accepted forms of a labels container
#[derive(Debug, Clone, PartialEq)]
pub enum LabelContainer {
    /// Ordered list; nested lists hold multi-label annotations
    Sequence(Vec<Nested<i64>>),
    /// Numeric array of any rank
    Array(ArrayD<i64>),
    /// A lone numeric scalar
    Scalar(i64),
    /// Single tabular column
    Series(Series<i64>),
    /// Tabular container; only single-column frames are valid labels
    Frame(DataFrame<i64>),
    /// Any other container, kept so it can be rejected by name
    Unsupported { type_name: String },
}

impl LabelContainer {
    /// Number of entries along the leading axis, if the container has one
    pub fn len(&self) -> Option<usize> {
        match self {
            Self::Sequence(items) => Some(items.len()),
            Self::Array(array) => array.shape().first().copied(),
            Self::Series(series) => Some(series.len()),
            Self::Frame(frame) => Some(frame.nrows()),
            Self::Scalar(_) | Self::Unsupported { .. } => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    /// Short name of the container form for messages
    pub fn type_name(&self) -> &str {
        match self {
            Self::Sequence(_) => "list",
            Self::Array(_) => "array",
            Self::Scalar(_) => "scalar",
            Self::Series(_) => "Series",
            Self::Frame(_) => "DataFrame",
            Self::Unsupported { type_name } => type_name.as_str(),
        }
    }

    pub fn unsupported<S: Into<String>>(type_name: S) -> Self {
        Self::Unsupported {
            type_name: type_name.into(),
        }
    }
}

impl From<Vec<i64>> for LabelContainer {
    fn from(values: Vec<i64>) -> Self {
        Self::Sequence(values.into_iter().map(Nested::Scalar).collect())
    }
}

impl From<Vec<Vec<i64>>> for LabelContainer {
    fn from(rows: Vec<Vec<i64>>) -> Self {
        Self::Sequence(
            rows.into_iter()
                .map(|row| Nested::List(row.into_iter().map(Nested::Scalar).collect()))
                .collect(),
        )
    }
}

impl<D: Dimension> From<Array<i64, D>> for LabelContainer {
    fn from(array: Array<i64, D>) -> Self {
        Self::Array(array.into_dyn())
    }
}

impl From<Series<i64>> for LabelContainer {
    fn from(series: Series<i64>) -> Self {
        Self::Series(series)
    }
}

impl From<DataFrame<i64>> for LabelContainer {
    fn from(frame: DataFrame<i64>) -> Self {
        Self::Frame(frame)
    }
}

/// Accepted forms of a features handle
#[derive(Debug, Clone)]
pub enum Features {
    /// Dense numeric array; examples along axis 0
    Array(ArrayD<f64>),
    /// Tabular container; examples are rows
    Frame(DataFrame<f64>),
    /// Single tabular column; examples are entries
    Series(Series<f64>),
    /// Indexable dataset fetched one example at a time
    MapDataset(Arc<dyn MapDataset>),
    /// Lazily evaluated batched pipeline
    BatchedStream(Arc<dyn BatchedStream>),
    /// Any other user-defined container
    Custom(Arc<dyn FeatureSource>),
}

impl Features {
    pub fn map_dataset<M: MapDataset + 'static>(dataset: M) -> Self {
        Self::MapDataset(Arc::new(dataset))
    }

    pub fn batched_stream<B: BatchedStream + 'static>(stream: B) -> Self {
        Self::BatchedStream(Arc::new(stream))
    }

    pub fn custom<F: FeatureSource + 'static>(source: F) -> Self {
        Self::Custom(Arc::new(source))
    }

    /// Short name of the handle for messages
    pub fn type_name(&self) -> &str {
        match self {
            Self::Array(_) => "array",
            Self::Frame(_) => "DataFrame",
            Self::Series(_) => "Series",
            Self::MapDataset(dataset) => dataset.type_name(),
            Self::BatchedStream(stream) => stream.type_name(),
            Self::Custom(source) => source.type_name(),
        }
    }
}

impl<D: Dimension> From<Array<f64, D>> for Features {
    fn from(array: Array<f64, D>) -> Self {
        Self::Array(array.into_dyn())
    }
}

impl From<DataFrame<f64>> for Features {
    fn from(frame: DataFrame<f64>) -> Self {
        Self::Frame(frame)
    }
}

impl From<Series<f64>> for Features {
    fn from(series: Series<f64>) -> Self {
        Self::Series(series)
    }
}

/// Accepted forms of a predicted-probability matrix
#[derive(Debug, Clone, PartialEq)]
pub enum PredProbs {
    /// Dense numeric array; expected shape `examples x classes`
    Dense(ArrayD<f64>),
    /// Any other container, kept so it can be rejected by name
    Unsupported { type_name: String },
}

impl PredProbs {
    pub fn unsupported<S: Into<String>>(type_name: S) -> Self {
        Self::Unsupported {
            type_name: type_name.into(),
        }
    }
}

impl<D: Dimension> From<Array<f64, D>> for PredProbs {
    fn from(array: Array<f64, D>) -> Self {
        Self::Dense(array.into_dyn())
    }
}

/// Non-fatal advisory produced during validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationWarning {
    /// Both features and predicted probabilities were supplied
    FeaturesMayBeIgnored,
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FeaturesMayBeIgnored => write!(
                f,
                "When X and pred_probs are both provided, former may be ignored."
            ),
        }
    }
}

/// Summary of a successful `assert_valid_inputs` call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Number of labels (leading-axis length of the labels container)
    pub num_labels: usize,
    /// Distinct classes present; only computed in single-label mode
    pub num_classes: Option<usize>,
    /// Example count of the features handle, when it was sized
    pub num_examples: Option<usize>,
    /// Whether emptiness, length and indexing checks ran on the features
    pub features_checked: bool,
    /// Advisories raised along the way
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn ints(values: &[i64]) -> Vec<Nested<i64>> {
        values.iter().copied().map(Nested::Scalar).collect()
    }

    #[test]
    fn test_coerce_flat_list() {
        let array = Nested::coerce(&ints(&[0, 1, 2])).unwrap();
        assert_eq!(array.shape(), &[3]);
    }

    #[test]
    fn test_coerce_rectangular_nesting() {
        let items = vec![Nested::List(ints(&[0, 1])), Nested::List(ints(&[1, 0]))];
        let array = Nested::coerce(&items).unwrap();
        assert_eq!(array.shape(), &[2, 2]);
        assert_eq!(array, array![[0_i64, 1], [1, 0]].into_dyn());
    }

    #[test]
    fn test_coerce_rejects_ragged_and_mixed() {
        let ragged = vec![Nested::List(ints(&[0, 1])), Nested::List(ints(&[1]))];
        assert!(Nested::coerce(&ragged).is_none());

        let mixed = vec![Nested::Scalar(0), Nested::List(ints(&[1]))];
        assert!(Nested::coerce(&mixed).is_none());
    }

    /// Each level leads with a deeper list followed by scalar siblings, so the
    /// first-element shape is enormous while the input itself stays small.
    fn deep_first_element(depth: usize, width: usize) -> Vec<Nested<i64>> {
        let mut items = ints(&vec![0; width]);
        for _ in 0..depth {
            let mut level = vec![Nested::List(items)];
            level.extend(ints(&vec![0; width - 1]));
            items = level;
        }
        items
    }

    #[test]
    fn test_coerce_rejects_deep_first_element_without_sizing_it() {
        let items = deep_first_element(8, 300);
        assert!(Nested::coerce(&items).is_none());

        let labels = LabelContainer::Sequence(items);
        let err = crate::utils::validation::LabelValidator::labels_to_array(&labels).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Value);
    }

    #[test]
    fn test_coerce_rejects_wide_first_row() {
        let mut items = vec![Nested::List(ints(&vec![0; 100_000]))];
        items.extend((0..100_000).map(|_| Nested::List(Vec::new())));
        assert!(Nested::coerce(&items).is_none());
    }

    #[test]
    fn test_coerce_empty_list() {
        let array = Nested::<i64>::coerce(&[]).unwrap();
        assert_eq!(array.shape(), &[0]);
    }

    #[test]
    fn test_label_container_len() {
        assert_eq!(LabelContainer::from(vec![0_i64, 1, 1]).len(), Some(3));
        assert_eq!(LabelContainer::from(array![[0_i64, 1], [1, 0]]).len(), Some(2));
        assert_eq!(LabelContainer::Scalar(3).len(), None);
        assert_eq!(LabelContainer::unsupported("dict").len(), None);
        assert_eq!(LabelContainer::unsupported("dict").type_name(), "dict");
    }

    #[test]
    fn test_report_serializes_warnings() {
        let report = ValidationReport {
            num_labels: 2,
            num_classes: Some(2),
            num_examples: None,
            features_checked: false,
            warnings: vec![ValidationWarning::FeaturesMayBeIgnored],
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("features_may_be_ignored"));
        assert!(report.has_warnings());
    }
}
