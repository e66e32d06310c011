//! Dataset handle abstractions
//!
//! Feature handles that are not plain arrays or tables implement one of the
//! traits below. `MapDataset` models an indexable dataset whose elements are
//! fetched one at a time; `BatchedStream` models a lazily evaluated,
//! possibly batched pipeline whose size cannot be inspected without
//! materializing it. Anything else implements `FeatureSource` and exposes
//! whichever capabilities it has.

use crate::error::{Result, ValidationError};
use ndarray::ArrayD;
use std::fmt;
use std::sync::Arc;

/// A user-defined feature container
///
/// Every capability is optional. Validation uses `len` then `shape` to size
/// the container and `select` to confirm list-based indexing.
#[allow(clippy::len_without_is_empty)]
pub trait FeatureSource: Send + Sync + fmt::Debug {
    /// Name used in error messages
    fn type_name(&self) -> &str;

    /// Number of examples, if the container can report it directly
    fn len(&self) -> Option<usize> {
        None
    }

    /// Full shape, if the container is array-like
    fn shape(&self) -> Option<Vec<usize>> {
        None
    }

    /// Subset the container by a list of example positions
    fn select(&self, indices: &[usize]) -> Result<()> {
        Err(ValidationError::invalid_type(format!(
            "{} does not support list-based indexing (requested {:?})",
            self.type_name(),
            indices
        )))
    }
}

/// An indexable dataset that yields one example per position
#[allow(clippy::len_without_is_empty)]
pub trait MapDataset: Send + Sync + fmt::Debug {
    /// Name used in logs and error messages
    fn type_name(&self) -> &str {
        "MapDataset"
    }

    /// Number of examples, when the dataset defines one
    fn len(&self) -> Option<usize>;

    /// Fetch the example at `index`
    fn get(&self, index: usize) -> Option<ArrayD<f64>>;
}

/// A lazily evaluated, possibly batched example pipeline
///
/// The reported cardinality counts batches, not examples, so it cannot be
/// compared against the number of labels.
pub trait BatchedStream: Send + Sync + fmt::Debug {
    /// Name used in logs and error messages
    fn type_name(&self) -> &str {
        "BatchedStream"
    }

    /// Examples per batch, when known
    fn batch_size(&self) -> Option<usize> {
        None
    }

    /// Number of batches the pipeline yields, when known
    fn cardinality(&self) -> Option<usize> {
        None
    }
}

/// A lazy view over a `MapDataset` restricted to the given positions
///
/// Construction never touches the underlying dataset; positions are
/// resolved only when an element is fetched.
#[derive(Clone)]
pub struct Subset {
    dataset: Arc<dyn MapDataset>,
    indices: Vec<usize>,
}

impl Subset {
    pub fn new(dataset: Arc<dyn MapDataset>, indices: Vec<usize>) -> Self {
        Self { dataset, indices }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Fetch the `i`-th element of the subset
    pub fn get(&self, i: usize) -> Option<ArrayD<f64>> {
        self.indices.get(i).and_then(|&pos| self.dataset.get(pos))
    }
}

impl fmt::Debug for Subset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subset")
            .field("dataset", &self.dataset.type_name())
            .field("indices", &self.indices)
            .finish()
    }
}
