//! labelcheck CLI Tool
//!
//! Command-line interface for validating labels, features and predicted
//! probabilities before a label-quality analysis.

#[cfg(feature = "cli")]
use labelcheck::cli;

#[cfg(feature = "cli")]
fn main() -> anyhow::Result<()> {
    cli::main()
}

#[cfg(not(feature = "cli"))]
fn main() {
    panic!("CLI feature not enabled. Please rebuild with --features cli");
}
