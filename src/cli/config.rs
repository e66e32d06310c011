//! Configuration conversion utilities for CLI arguments

use crate::cli::main_impl::Cli;
use crate::config::{ValidationConfig, ValidationConfigBuilder};
use anyhow::{Context, Result};

/// Convert CLI arguments to a `ValidationConfig`
pub(crate) struct CliConfigBuilder;

impl CliConfigBuilder {
    /// Build the configuration: `--config` file first, flags layered on top
    pub(crate) fn from_cli(cli: &Cli) -> Result<ValidationConfig> {
        let base = match &cli.config {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file {}", path.display()))?;
                ValidationConfig::from_json(&json)
                    .with_context(|| format!("Invalid config file {}", path.display()))?
            },
            None => ValidationConfig::default(),
        };

        // Flags can only switch modes on; a config file setting stays otherwise
        let multi_label = base.multi_label || cli.multi_label;
        let allow_missing_classes = base.allow_missing_classes || cli.allow_missing_classes;
        let config = ValidationConfigBuilder::from_config(base)
            .multi_label(multi_label)
            .allow_missing_classes(allow_missing_classes)
            .build()
            .context("Invalid configuration")?;

        Ok(config)
    }

    /// Validate CLI arguments for consistency
    pub(crate) fn validate_cli(cli: &Cli) -> Result<()> {
        if cli.show_registry {
            return Ok(());
        }
        if cli.labels.is_none() {
            anyhow::bail!("--labels is required unless --show-registry is given");
        }
        for (flag, path) in [
            ("--labels", cli.labels.as_ref()),
            ("--pred-probs", cli.pred_probs.as_ref()),
            ("--features", cli.features.as_ref()),
            ("--config", cli.config.as_ref()),
        ] {
            if let Some(path) = path {
                if !path.is_file() {
                    anyhow::bail!("{} file does not exist: {}", flag, path.display());
                }
            }
        }
        Ok(())
    }
}
