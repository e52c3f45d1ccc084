//! The three stages composed into one run.
//!
//! ```text
//! admission rows ─► clean_admissions ───────┐
//!                                           ├─► merge_admissions_notes ─► MergedRecord
//! note rows ──────► select_discharge_notes ─┘
//! ```
//!
//! Either the whole table is produced or the run stops with an error; no
//! partial output is returned.

use std::time::Instant;

use tracing::{info, info_span};

use readmit_ingest::{AdmissionSource, NoteSource};
use readmit_model::{AdmissionRow, MergedRecord, NoteRow, PipelineOptions};

use crate::admissions::{CleaningStats, clean_admissions};
use crate::error::Result;
use crate::merge::{MergeStats, merge_admissions_notes};
use crate::notes::{SelectionStats, select_discharge_notes};

/// Per-stage counters for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineStats {
    pub cleaning: CleaningStats,
    pub selection: SelectionStats,
    pub merge: MergeStats,
}

/// The modeling table and how it was produced.
#[derive(Debug, Clone, Default)]
pub struct DatasetOutput {
    pub records: Vec<MergedRecord>,
    pub stats: PipelineStats,
}

/// Build the modeling table from rows already in memory.
///
/// # Errors
///
/// Fails on invalid options or on a data-integrity violation in the notes
/// selection or the merge.
pub fn build_dataset(
    admissions: Vec<AdmissionRow>,
    notes: Vec<NoteRow>,
    options: &PipelineOptions,
) -> Result<DatasetOutput> {
    options.validate()?;
    let start = Instant::now();

    let cleaned = clean_admissions(admissions, options);
    let selected = select_discharge_notes(notes, options)?;
    let merged = merge_admissions_notes(&cleaned.records, &selected.notes, options)?;

    let stats = PipelineStats {
        cleaning: cleaned.stats,
        selection: selected.stats,
        merge: merged.stats,
    };
    info!(
        rows = merged.records.len(),
        duration_ms = start.elapsed().as_millis(),
        "dataset built"
    );

    Ok(DatasetOutput {
        records: merged.records,
        stats,
    })
}

/// Load both inputs through their sources, then build the modeling table.
///
/// # Errors
///
/// Fails if either source fails to load, plus everything [`build_dataset`]
/// can fail on.
pub fn load_clean_merge<A, N>(
    admissions: &A,
    notes: &N,
    options: &PipelineOptions,
) -> Result<DatasetOutput>
where
    A: AdmissionSource + ?Sized,
    N: NoteSource + ?Sized,
{
    options.validate()?;

    let load_span = info_span!("load");
    let (admission_rows, note_rows) = load_span.in_scope(|| -> Result<_> {
        let admission_rows = admissions.load_admissions(&options.admission_columns)?;
        let note_rows = notes.load_notes(&options.note_columns)?;
        Ok((admission_rows, note_rows))
    })?;

    build_dataset(admission_rows, note_rows, options)
}
