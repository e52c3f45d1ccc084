//! Pipeline options from a TOML file plus command-line overrides.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use readmit_model::PipelineOptions;

/// Values given on the command line that replace file or default options.
#[derive(Debug, Clone, Default)]
pub struct OptionOverrides {
    pub timestamp_format: Option<String>,
    pub discharge_category: Option<String>,
}

/// Load options from `path`, or the defaults when no file is given.
///
/// Keys missing from the file keep their default values.
pub fn load_options(path: Option<&Path>) -> Result<PipelineOptions> {
    let Some(path) = path else {
        return Ok(PipelineOptions::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    parse_options(&text).with_context(|| format!("parse config {}", path.display()))
}

/// Parse options from TOML text.
pub fn parse_options(text: &str) -> Result<PipelineOptions> {
    let options: PipelineOptions = toml::from_str(text)?;
    Ok(options)
}

/// Load options, apply overrides, and validate the result.
pub fn resolve_options(
    path: Option<&Path>,
    overrides: &OptionOverrides,
) -> Result<PipelineOptions> {
    let mut options = load_options(path)?;
    if let Some(format) = &overrides.timestamp_format {
        options = options.with_timestamp_format(format.clone());
    }
    if let Some(category) = &overrides.discharge_category {
        options = options.with_discharge_category(category.clone());
    }
    options.validate().context("invalid pipeline options")?;
    Ok(options)
}
