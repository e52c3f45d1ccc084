//! Writing the merged table to disk.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use polars::prelude::{CsvWriter, SerWriter};
use readmit_model::{MergedRecord, PipelineOptions};
use readmit_transform::merged_to_dataframe;
use tracing::{debug, trace};

use crate::logging::redact_value;

/// File name used when no output path is given.
pub const DEFAULT_OUTPUT_NAME: &str = "merged.csv";

/// Default output location: next to the admissions file.
pub fn default_output_path(admissions: &Path) -> PathBuf {
    admissions
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(DEFAULT_OUTPUT_NAME)
}

/// Write the merged records as CSV with a header row.
///
/// Timestamps use the configured format; null values are written as empty
/// fields.
pub fn write_merged_csv(
    path: &Path,
    records: &[MergedRecord],
    options: &PipelineOptions,
) -> Result<()> {
    let mut df = merged_to_dataframe(records, options).context("build output frame")?;
    for record in records.iter().take(5) {
        trace!(
            subject_id = record.subject_id.get(),
            admission_id = record.admission_id.get(),
            text = redact_value(record.text.as_deref().unwrap_or("")),
            "output row"
        );
    }
    let mut file =
        File::create(path).with_context(|| format!("create {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)
        .with_context(|| format!("write {}", path.display()))?;
    debug!(path = %path.display(), rows = df.height(), "merged table written");
    Ok(())
}
