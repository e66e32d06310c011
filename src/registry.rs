//! Capability detection for feature handles
//!
//! A `CapabilityRegistry` is built once from a `ValidationConfig`. It
//! resolves every `Features` value to a `ContainerKind`, then answers two
//! questions by walking ordered lists: how many examples the handle holds
//! (`SizeStrategy`) and whether it supports list-based indexing
//! (`IndexingProtocol`). Each attempt is isolated; a failing attempt only
//! moves the walk on to the next entry.

use crate::config::ValidationConfig;
use crate::datasets::Subset;
use crate::error::{Result, ValidationError};
use crate::types::Features;
use ndarray::Axis;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Recognized families of feature handles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerKind {
    /// `Frame` and `Series`
    Tabular,
    /// `MapDataset` handles
    MapDataset,
    /// `BatchedStream` handles
    BatchedStream,
    /// Arrays, custom sources and unrecognized handles
    Generic,
}

impl ContainerKind {
    /// Kind a handle belongs to before recognition settings apply
    pub fn of(features: &Features) -> Self {
        match features {
            Features::Frame(_) | Features::Series(_) => Self::Tabular,
            Features::MapDataset(_) => Self::MapDataset,
            Features::BatchedStream(_) => Self::BatchedStream,
            Features::Array(_) | Features::Custom(_) => Self::Generic,
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tabular => write!(f, "tabular"),
            Self::MapDataset => write!(f, "map-dataset"),
            Self::BatchedStream => write!(f, "batched-stream"),
            Self::Generic => write!(f, "generic"),
        }
    }
}

/// Ways of confirming a handle can be subset by a list of positions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexingProtocol {
    /// `X.iloc[index_list]` on tabular handles
    PositionalRows,
    /// Wrap a map dataset in a lazy `Subset`; nothing is fetched
    LazySubset,
    /// Accept a batched stream without indexing it; too costly to check
    UncheckedStream,
    /// `X[index_list]`
    Subscript,
}

impl IndexingProtocol {
    pub fn name(self) -> &'static str {
        match self {
            Self::PositionalRows => "X.iloc[index_list]",
            Self::LazySubset => "Subset(X, index_list)",
            Self::UncheckedStream => "unchecked stream",
            Self::Subscript => "X[index_list]",
        }
    }

    /// Whether this protocol is tried for handles of `kind`
    pub fn applies_to(self, kind: ContainerKind) -> bool {
        match self {
            Self::PositionalRows => kind == ContainerKind::Tabular,
            Self::LazySubset => kind == ContainerKind::MapDataset,
            Self::UncheckedStream => kind == ContainerKind::BatchedStream,
            Self::Subscript => true,
        }
    }

    /// Perform one indexing attempt
    pub fn attempt(self, features: &Features, indices: &[usize]) -> Result<()> {
        match (self, features) {
            (Self::PositionalRows, Features::Frame(frame)) => frame.iloc(indices).map(drop),
            (Self::PositionalRows, Features::Series(series)) => series.iloc(indices).map(drop),
            (Self::LazySubset, Features::MapDataset(dataset)) => {
                let subset = Subset::new(Arc::clone(dataset), indices.to_vec());
                tracing::trace!(?subset, "built lazy subset");
                Ok(())
            },
            (Self::UncheckedStream, Features::BatchedStream(_)) => Ok(()),
            (Self::Subscript, Features::Array(array)) => {
                if array.ndim() == 0 {
                    return Err(ValidationError::invalid_type(
                        "too many indices for a 0-dimensional array",
                    ));
                }
                let len = array.len_of(Axis(0));
                if let Some(&bad) = indices.iter().find(|&&i| i >= len) {
                    return Err(ValidationError::invalid_value(format!(
                        "index {} is out of bounds for axis 0 with size {}",
                        bad, len
                    )));
                }
                Ok(())
            },
            // Subscripting a frame selects columns by label
            (Self::Subscript, Features::Frame(frame)) => {
                let labels: Vec<String> = indices.iter().map(ToString::to_string).collect();
                frame.select_columns(labels.as_slice()).map(drop)
            },
            (Self::Subscript, Features::Series(series)) => series.iloc(indices).map(drop),
            (Self::Subscript, Features::Custom(source)) => source.select(indices),
            (protocol, features) => Err(ValidationError::invalid_type(format!(
                "{} does not support {}",
                features.type_name(),
                protocol.name()
            ))),
        }
    }
}

/// Ways of asking a handle for its example count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeStrategy {
    /// `len(X)`
    Length,
    /// `X.shape[0]`
    LeadingAxis,
}

impl SizeStrategy {
    pub fn name(self) -> &'static str {
        match self {
            Self::Length => "len(X)",
            Self::LeadingAxis => "X.shape[0]",
        }
    }

    /// Example count reported through this strategy, if the handle supports it
    pub fn probe(self, features: &Features) -> Option<usize> {
        match (self, features) {
            (_, Features::Array(array)) => array.shape().first().copied(),
            (_, Features::Frame(frame)) => Some(frame.nrows()),
            (_, Features::Series(series)) => Some(series.len()),
            (Self::Length, Features::MapDataset(dataset)) => dataset.len(),
            // Counts batches, not examples
            (Self::Length, Features::BatchedStream(stream)) => stream.cardinality(),
            (Self::Length, Features::Custom(source)) => source.len(),
            (Self::LeadingAxis, Features::Custom(source)) => {
                source.shape().and_then(|shape| shape.first().copied())
            },
            (Self::LeadingAxis, Features::MapDataset(_) | Features::BatchedStream(_)) => None,
        }
    }
}

/// Registry of recognized container kinds and their capability probes
#[derive(Debug, Clone)]
pub struct CapabilityRegistry {
    recognized: Vec<ContainerKind>,
    protocols: Vec<IndexingProtocol>,
    size_strategies: Vec<SizeStrategy>,
}

impl Default for CapabilityRegistry {
    fn default() -> Self {
        Self::from_config(&ValidationConfig::default())
    }
}

impl CapabilityRegistry {
    /// Build the registry for a configuration
    pub fn from_config(config: &ValidationConfig) -> Self {
        let mut recognized = vec![ContainerKind::Tabular];
        if config.recognize_map_datasets {
            recognized.push(ContainerKind::MapDataset);
        }
        if config.recognize_batched_streams {
            recognized.push(ContainerKind::BatchedStream);
        }
        recognized.push(ContainerKind::Generic);

        let registry = Self {
            recognized,
            protocols: vec![
                IndexingProtocol::PositionalRows,
                IndexingProtocol::LazySubset,
                IndexingProtocol::UncheckedStream,
                IndexingProtocol::Subscript,
            ],
            size_strategies: vec![SizeStrategy::Length, SizeStrategy::LeadingAxis],
        };
        tracing::debug!(
            recognized = ?registry.recognized,
            "capability registry initialized"
        );
        registry
    }

    /// Resolve a handle to its kind; unrecognized kinds fall through to `Generic`
    pub fn resolve(&self, features: &Features) -> ContainerKind {
        let kind = ContainerKind::of(features);
        if self.recognized.contains(&kind) {
            kind
        } else {
            ContainerKind::Generic
        }
    }

    pub fn recognizes(&self, kind: ContainerKind) -> bool {
        self.recognized.contains(&kind)
    }

    pub fn recognized_kinds(&self) -> &[ContainerKind] {
        &self.recognized
    }

    pub fn protocols(&self) -> &[IndexingProtocol] {
        &self.protocols
    }

    pub fn size_strategies(&self) -> &[SizeStrategy] {
        &self.size_strategies
    }

    /// Whether emptiness, length and indexing checks are skipped for this handle
    ///
    /// Recognized batched streams report a batch count rather than an
    /// example count, so their length cannot be compared with the labels.
    pub fn skips_length_checks(&self, features: &Features) -> bool {
        self.resolve(features) == ContainerKind::BatchedStream
    }

    /// First example count reported by the ordered size strategies
    pub fn num_examples(&self, features: &Features) -> Option<usize> {
        self.size_strategies.iter().find_map(|strategy| {
            let count = strategy.probe(features);
            if let Some(n) = count {
                tracing::trace!(strategy = strategy.name(), examples = n, "sized features");
            }
            count
        })
    }

    /// Try each applicable indexing protocol in order
    ///
    /// Returns the protocol that succeeded, or `None` if every attempt failed.
    pub fn find_indexing_protocol(
        &self,
        features: &Features,
        indices: &[usize],
    ) -> Option<IndexingProtocol> {
        let kind = self.resolve(features);
        for &protocol in &self.protocols {
            if !protocol.applies_to(kind) {
                continue;
            }
            match protocol.attempt(features, indices) {
                Ok(()) => {
                    tracing::debug!(
                        kind = %kind,
                        protocol = protocol.name(),
                        "indexing check passed"
                    );
                    return Some(protocol);
                },
                Err(e) => {
                    tracing::trace!(
                        kind = %kind,
                        protocol = protocol.name(),
                        error = %e,
                        "indexing attempt failed"
                    );
                },
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasets::{BatchedStream, FeatureSource, MapDataset};
    use crate::tabular::DataFrame;
    use ndarray::{array, ArrayD};

    #[derive(Debug)]
    struct Batches;

    impl BatchedStream for Batches {
        fn cardinality(&self) -> Option<usize> {
            Some(4)
        }
    }

    #[derive(Debug)]
    struct Images;

    impl MapDataset for Images {
        fn len(&self) -> Option<usize> {
            Some(10)
        }

        fn get(&self, _index: usize) -> Option<ArrayD<f64>> {
            None
        }
    }

    #[derive(Debug)]
    struct ShapeOnly;

    impl FeatureSource for ShapeOnly {
        fn type_name(&self) -> &str {
            "ShapeOnly"
        }

        fn shape(&self) -> Option<Vec<usize>> {
            Some(vec![7, 3])
        }
    }

    #[test]
    fn test_resolve_respects_recognition() {
        let stream = Features::batched_stream(Batches);
        let dataset = Features::map_dataset(Images);

        let registry = CapabilityRegistry::default();
        assert_eq!(registry.resolve(&stream), ContainerKind::BatchedStream);
        assert_eq!(registry.resolve(&dataset), ContainerKind::MapDataset);
        assert!(registry.skips_length_checks(&stream));

        let config = ValidationConfig {
            recognize_map_datasets: false,
            recognize_batched_streams: false,
            ..ValidationConfig::default()
        };
        let registry = CapabilityRegistry::from_config(&config);
        assert_eq!(registry.resolve(&stream), ContainerKind::Generic);
        assert_eq!(registry.resolve(&dataset), ContainerKind::Generic);
        assert!(!registry.skips_length_checks(&stream));
    }

    #[test]
    fn test_size_strategies_in_order() {
        let registry = CapabilityRegistry::default();
        let array = Features::from(array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]);
        assert_eq!(registry.num_examples(&array), Some(3));

        // Falls back to the leading axis when no length is reported
        assert_eq!(registry.num_examples(&Features::custom(ShapeOnly)), Some(7));

        let scalar = Features::from(ndarray::arr0(1.0));
        assert_eq!(registry.num_examples(&scalar), None);
    }

    #[test]
    fn test_indexing_protocol_selection() {
        let registry = CapabilityRegistry::default();

        let frame = Features::from(
            DataFrame::from_rows(
                vec!["a".to_string()],
                vec![vec![1.0], vec![2.0], vec![3.0]],
            )
            .unwrap(),
        );
        assert_eq!(
            registry.find_indexing_protocol(&frame, &[0, 2]),
            Some(IndexingProtocol::PositionalRows)
        );
        // Out-of-range rows fall through to column-label subscripting, which fails too
        assert_eq!(registry.find_indexing_protocol(&frame, &[0, 5]), None);

        let dataset = Features::map_dataset(Images);
        assert_eq!(
            registry.find_indexing_protocol(&dataset, &[0, 99]),
            Some(IndexingProtocol::LazySubset)
        );

        let stream = Features::batched_stream(Batches);
        assert_eq!(
            registry.find_indexing_protocol(&stream, &[0, 1]),
            Some(IndexingProtocol::UncheckedStream)
        );

        let array = Features::from(array![1.0, 2.0]);
        assert_eq!(
            registry.find_indexing_protocol(&array, &[0, 1]),
            Some(IndexingProtocol::Subscript)
        );
        assert_eq!(registry.find_indexing_protocol(&array, &[0, 2]), None);
    }

    #[test]
    fn test_subscript_checks_bounds_without_copying() {
        let array = Features::from(array![[1.0], [2.0], [3.0]]);
        assert_eq!(IndexingProtocol::Subscript.attempt(&array, &[0, 2]).ok(), Some(()));
        let err = IndexingProtocol::Subscript.attempt(&array, &[3]).unwrap_err();
        assert!(err.to_string().contains("out of bounds for axis 0 with size 3"));

        let scalar = Features::Array(ArrayD::zeros(ndarray::IxDyn(&[])));
        assert!(IndexingProtocol::Subscript.attempt(&scalar, &[0]).is_err());
    }

    #[test]
    fn test_unrecognized_handles_fall_through_to_subscript() {
        let config = ValidationConfig {
            recognize_map_datasets: false,
            ..ValidationConfig::default()
        };
        let registry = CapabilityRegistry::from_config(&config);
        let dataset = Features::map_dataset(Images);
        assert_eq!(registry.find_indexing_protocol(&dataset, &[0, 1]), None);
    }
}
