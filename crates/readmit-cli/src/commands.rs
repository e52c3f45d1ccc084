use std::time::Instant;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{info, info_span};

use readmit_cli::config::{OptionOverrides, load_options, resolve_options};
use readmit_cli::output::{default_output_path, write_merged_csv};
use readmit_ingest::{CsvAdmissionSource, CsvNoteSource};
use readmit_transform::load_clean_merge;

use crate::cli::{BuildArgs, ColumnsArgs};
use crate::summary::apply_table_style;
use crate::types::BuildResult;

pub fn run_columns(args: &ColumnsArgs) -> Result<()> {
    let options = load_options(args.config.as_deref())?;
    let mut table = Table::new();
    table.set_header(vec!["Table", "Column", "Contents"]);
    apply_table_style(&mut table);
    for (column, description) in options.admission_columns.describe() {
        table.add_row(vec!["admissions", column, description]);
    }
    for (column, description) in options.note_columns.describe() {
        table.add_row(vec!["notes", column, description]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_build(args: &BuildArgs) -> Result<BuildResult> {
    let build_span = info_span!("build", admissions = %args.admissions.display());
    let _build_guard = build_span.enter();
    let start = Instant::now();

    let overrides = OptionOverrides {
        timestamp_format: args.timestamp_format.clone(),
        discharge_category: args.discharge_category.clone(),
    };
    let options = resolve_options(args.config.as_deref(), &overrides)?;

    let admissions = CsvAdmissionSource::new(&args.admissions);
    let notes = CsvNoteSource::new(&args.notes);
    let dataset = load_clean_merge(&admissions, &notes, &options)
        .context("build readmission dataset")?;

    let output = if args.dry_run {
        info!("dry run, skipping output");
        None
    } else {
        let path = args
            .output
            .clone()
            .unwrap_or_else(|| default_output_path(&args.admissions));
        write_merged_csv(&path, &dataset.records, &options)?;
        Some(path)
    };

    info!(
        rows = dataset.records.len(),
        duration_ms = start.elapsed().as_millis(),
        "build complete"
    );

    Ok(BuildResult {
        admissions: args.admissions.clone(),
        notes: args.notes.clone(),
        output,
        rows: dataset.records.len(),
        stats: dataset.stats,
    })
}
