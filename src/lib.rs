#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::must_use_candidate)]

//! # labelcheck
//!
//! Input contract checks for label-quality analysis. Before a label-quality
//! analysis runs, its inputs must line up: class labels must be
//! zero-indexed integers covering `0..K-1`, the features handle must be
//! sized like the labels and support list-based indexing, and the
//! predicted-probability matrix must be `examples x classes` with values
//! in `[0, 1]`.
//!
//! ## Features
//!
//! - **Label normalization**: lists, arrays, Series and single-column
//!   DataFrames become a numeric `ndarray` array
//! - **Closed container model**: arrays, tabular containers, map-style
//!   datasets, batched streams and user-defined sources
//! - **Capability registry**: size and indexing probes are resolved once per
//!   validator instead of by trial and error on every call
//! - **CLI Integration**: `labelcheck` binary for JSON inputs (enable with `cli` feature)
//!
//! ## Quick Start
//!
//! ```rust
//! use labelcheck::{assert_valid_inputs, Features, LabelContainer, PredProbs};
//! use ndarray::array;
//!
//! # fn main() -> labelcheck::Result<()> {
//! let y = LabelContainer::from(vec![0_i64, 1, 1, 2]);
//! let pred_probs = PredProbs::from(array![
//!     [0.8, 0.1, 0.1],
//!     [0.1, 0.7, 0.2],
//!     [0.2, 0.6, 0.2],
//!     [0.1, 0.1, 0.8],
//! ]);
//!
//! let report = assert_valid_inputs(None, &y, Some(&pred_probs), false, false)?;
//! assert_eq!(report.num_classes, Some(3));
//! # Ok(())
//! # }
//! ```
//!
//! ## Custom configuration
//!
//! ```rust
//! use labelcheck::{InputValidator, LabelContainer, ValidationConfig};
//! use ndarray::array;
//!
//! # fn main() -> labelcheck::Result<()> {
//! let config = ValidationConfig::builder()
//!     .allow_missing_classes(true)
//!     .build()?;
//! let validator = InputValidator::new(config)?;
//!
//! let labels = validator.labels_to_array(&LabelContainer::from(vec![1_i64, 3]))?;
//! validator.assert_valid_class_labels(&labels, validator.config().allow_missing_classes)?;
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod datasets;
pub mod error;
pub mod loader;
pub mod registry;
pub mod tabular;
// Subscriber setup needs `tracing-subscriber` and `uuid`, which only the
// `cli` feature pulls in; without it embedders install their own subscriber.
#[cfg(feature = "cli")]
pub mod tracing_config;
pub mod types;
pub mod utils;
pub mod validator;

// Public API exports
pub use config::{ValidationConfig, ValidationConfigBuilder};
pub use datasets::{BatchedStream, FeatureSource, MapDataset, Subset};
pub use error::{ErrorKind, Result, ValidationError};
pub use registry::{CapabilityRegistry, ContainerKind, IndexingProtocol, SizeStrategy};
pub use tabular::{DataFrame, Series};
pub use types::{
    Features, LabelContainer, Nested, PredProbs, ValidationReport, ValidationWarning,
};
pub use utils::{FeatureValidator, LabelValidator, ProbabilityValidator};
pub use validator::{
    assert_indexing_works, assert_nonempty_input, assert_valid_class_labels, assert_valid_inputs,
    default_validator, labels_to_array, InputValidator,
};

#[cfg(feature = "cli")]
pub use tracing_config::{init_cli_tracing, init_library_tracing, TracingConfig, TracingFormat, TracingOutput};
