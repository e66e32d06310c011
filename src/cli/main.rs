//! Label validation CLI tool
//!
//! Command-line interface for checking labels, features and predicted
//! probabilities stored as JSON before running a label-quality analysis.

use super::config::CliConfigBuilder;
use crate::{
    loader,
    registry::CapabilityRegistry,
    tracing_config::{events, init_cli_tracing, spans, TracingFormat},
    types::{Features, LabelContainer, PredProbs, ValidationReport},
    validator::InputValidator,
};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Label and prediction input checker
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "labelcheck")]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Labels as JSON: an array or a frame object {"columns": [...], "data": [[...]]}
    #[arg(long, value_name = "FILE", required_unless_present = "show_registry")]
    pub labels: Option<PathBuf>,

    /// Predicted probabilities as a JSON nested array (examples x classes)
    #[arg(long, value_name = "FILE")]
    pub pred_probs: Option<PathBuf>,

    /// Features as a JSON nested array or frame object
    #[arg(long, value_name = "FILE")]
    pub features: Option<PathBuf>,

    /// Treat labels as multi-label (each entry is a list of classes)
    #[arg(long)]
    pub multi_label: bool,

    /// Do not require every class in 0..K-1 to be present
    #[arg(long)]
    pub allow_missing_classes: bool,

    /// JSON validation config; flags above override it
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (-v: DEBUG, -vv: TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Log output format
    #[arg(long, value_enum, default_value_t = CliLogFormat::Console)]
    pub format: CliLogFormat,

    /// Show recognized container kinds and indexing protocols and exit
    #[arg(long)]
    pub show_registry: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
pub enum CliLogFormat {
    Console,
    Compact,
    Json,
}

impl From<CliLogFormat> for TracingFormat {
    fn from(format: CliLogFormat) -> Self {
        match format {
            CliLogFormat::Console => Self::Console,
            CliLogFormat::Compact => Self::Compact,
            CliLogFormat::Json => Self::Json,
        }
    }
}

pub fn main() -> Result<()> {
    let cli = Cli::parse();

    let session_id =
        init_cli_tracing(cli.verbose, cli.format.into()).context("Failed to initialize tracing")?;
    let _session = spans::session(&session_id, cli.multi_label).entered();

    match run(&cli) {
        Ok(output) => {
            print!("{output}");
            Ok(())
        },
        Err(e) => {
            events::error_with_context(&e, "labelcheck");
            Err(e)
        },
    }
}

/// Execute the CLI for parsed arguments; returns the text to print
pub fn run(cli: &Cli) -> Result<String> {
    CliConfigBuilder::validate_cli(cli).context("Invalid CLI arguments")?;
    let config = CliConfigBuilder::from_cli(cli).context("Failed to build configuration")?;
    debug!(?config, "configuration resolved");

    let validator = InputValidator::new(config).context("Failed to build validator")?;

    if cli.show_registry {
        return Ok(render_registry(validator.registry()));
    }

    let labels_path = cli
        .labels
        .as_deref()
        .context("--labels is required unless --show-registry is given")?;
    let labels: LabelContainer = load_input("labels", labels_path, |p| loader::load_labels(p))?;
    let features: Option<Features> = cli
        .features
        .as_deref()
        .map(|path| load_input("features", path, |p| loader::load_features(p)))
        .transpose()?;
    let pred_probs: Option<PredProbs> = cli
        .pred_probs
        .as_deref()
        .map(|path| load_input("pred_probs", path, |p| loader::load_pred_probs(p)))
        .transpose()?;

    if features.is_none() && pred_probs.is_none() {
        events::warning_with_recommendation(
            "neither --features nor --pred-probs was given",
            "pass at least one of them; validation will fail without X",
        );
    }

    let report = validator
        .validate(features.as_ref(), &labels, pred_probs.as_ref())
        .context("Input validation failed")?;
    info!(
        num_labels = report.num_labels,
        warnings = report.warnings.len(),
        "inputs are valid"
    );

    Ok(render_report(&report, validator.config().multi_label))
}

fn load_input<T>(
    input: &str,
    path: &Path,
    load: impl FnOnce(&Path) -> crate::Result<T>,
) -> Result<T> {
    let _span = spans::file_loading(input, path).entered();
    load(path).with_context(|| format!("Failed to load {} from {}", input, path.display()))
}

fn render_report(report: &ValidationReport, multi_label: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "✅ Inputs are valid");
    let _ = writeln!(out, "  • Labels: {}", report.num_labels);
    match report.num_classes {
        Some(classes) => {
            let _ = writeln!(out, "  • Classes: {}", classes);
        },
        None if multi_label => {
            let _ = writeln!(out, "  • Classes: not counted (multi-label)");
        },
        None => {},
    }
    if report.features_checked {
        let _ = writeln!(
            out,
            "  • Features: {} examples, indexing supported",
            report.num_examples.unwrap_or(report.num_labels)
        );
    } else {
        let _ = writeln!(out, "  • Features: not checked");
    }
    for warning in &report.warnings {
        let _ = writeln!(out, "⚠️  {}", warning);
    }
    out
}

fn render_registry(registry: &CapabilityRegistry) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "🔍 Capability registry");
    let _ = writeln!(out, "\nRecognized container kinds:");
    for kind in registry.recognized_kinds() {
        let _ = writeln!(out, "  • {}", kind);
    }
    let _ = writeln!(out, "\nIndexing protocols (tried in order):");
    for protocol in registry.protocols() {
        let _ = writeln!(out, "  • {}", protocol.name());
    }
    let _ = writeln!(out, "\nSize strategies (tried in order):");
    for strategy in registry.size_strategies() {
        let _ = writeln!(out, "  • {}", strategy.name());
    }
    out
}
