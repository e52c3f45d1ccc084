//! Discharge summary selection.
//!
//! Keeps the last discharge summary recorded for each (subject, admission)
//! pair, where "last" is position in the loaded table. Rows are never
//! re-sorted by any note timestamp.

use std::collections::{BTreeMap, HashMap};
use std::time::Instant;

use tracing::{info, info_span, warn};

use readmit_model::{
    AdmissionId, AdmissionKey, DataIntegrityError, NoteRecord, NoteRow, PipelineOptions,
    SubjectId,
};

/// Counters reported by [`select_discharge_notes`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionStats {
    /// Note rows in.
    pub notes: usize,
    /// Rows whose category is the discharge category.
    pub discharge_summaries: usize,
    /// Discharge summaries with no admission to attach to.
    pub without_admission: usize,
    /// Earlier summaries replaced by a later one for the same admission.
    pub superseded: usize,
    /// Notes out.
    pub selected: usize,
}

/// Output of [`select_discharge_notes`], ordered by subject then admission.
#[derive(Debug, Clone, Default)]
pub struct SelectedNotes {
    pub notes: Vec<NoteRecord>,
    pub stats: SelectionStats,
}

/// Reduce raw notes to at most one discharge summary per admission.
///
/// # Errors
///
/// Returns [`DataIntegrityError::DuplicateDischargeSummary`] when one
/// admission identifier still carries summaries under two subjects.
pub fn select_discharge_notes(
    rows: Vec<NoteRow>,
    options: &PipelineOptions,
) -> Result<SelectedNotes, DataIntegrityError> {
    let span = info_span!("select_discharge_notes", notes = rows.len());
    let _guard = span.enter();
    let start = Instant::now();

    let mut stats = SelectionStats {
        notes: rows.len(),
        ..SelectionStats::default()
    };
    let mut latest: BTreeMap<AdmissionKey, NoteRecord> = BTreeMap::new();
    for row in rows {
        if row.category != options.discharge_category {
            continue;
        }
        stats.discharge_summaries += 1;
        let Some(admission_id) = row.admission_id else {
            stats.without_admission += 1;
            continue;
        };
        let note = NoteRecord {
            subject_id: row.subject_id,
            admission_id,
            category: row.category,
            text: row.text,
        };
        if latest.insert(note.key(), note).is_some() {
            stats.superseded += 1;
        }
    }

    let notes: Vec<NoteRecord> = latest.into_values().collect();
    ensure_one_summary_per_admission(&notes)?;
    stats.selected = notes.len();

    if stats.without_admission > 0 {
        warn!(
            count = stats.without_admission,
            "discharge summaries without an admission id were skipped"
        );
    }
    info!(
        notes = stats.notes,
        discharge_summaries = stats.discharge_summaries,
        superseded = stats.superseded,
        selected = stats.selected,
        duration_ms = start.elapsed().as_millis(),
        "discharge summaries selected"
    );

    Ok(SelectedNotes { notes, stats })
}

fn ensure_one_summary_per_admission(notes: &[NoteRecord]) -> Result<(), DataIntegrityError> {
    let mut owners: HashMap<AdmissionId, SubjectId> = HashMap::with_capacity(notes.len());
    for note in notes {
        if let Some(first) = owners.insert(note.admission_id, note.subject_id) {
            return Err(DataIntegrityError::DuplicateDischargeSummary {
                admission_id: note.admission_id,
                first_subject: first,
                second_subject: note.subject_id,
            });
        }
    }
    Ok(())
}
