//! Admissions and discharge summaries joined into the modeling table.

use std::collections::HashMap;
use std::time::Instant;

use tracing::{info, info_span};

use readmit_model::{
    AdmissionKey, CleanedAdmission, DataIntegrityError, MergedRecord, NoteRecord,
    PipelineOptions,
};

/// Counters reported by [`merge_admissions_notes`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Admission rows driving the join.
    pub admissions: usize,
    /// Rows after the join, before the newborn filter.
    pub merged: usize,
    /// Joined rows that found a discharge summary.
    pub with_text: usize,
    /// Rows removed by the newborn filter.
    pub newborn_dropped: usize,
    /// Rows out.
    pub output: usize,
}

/// Output of [`merge_admissions_notes`], in admissions order.
#[derive(Debug, Clone, Default)]
pub struct MergedTable {
    pub records: Vec<MergedRecord>,
    pub stats: MergeStats,
}

/// Left join admissions to notes on (subject, admission), then drop newborns.
///
/// Every admission is kept; `text` is `None` when no note matches.
///
/// # Errors
///
/// Returns [`DataIntegrityError::RowCountIncreased`] when the join yields more
/// rows than there are admissions, which happens only if `notes` repeats a
/// key.
pub fn merge_admissions_notes(
    admissions: &[CleanedAdmission],
    notes: &[NoteRecord],
    options: &PipelineOptions,
) -> Result<MergedTable, DataIntegrityError> {
    let span = info_span!(
        "merge_admissions_notes",
        admissions = admissions.len(),
        notes = notes.len()
    );
    let _guard = span.enter();
    let start = Instant::now();

    let mut by_key: HashMap<AdmissionKey, Vec<&NoteRecord>> = HashMap::with_capacity(notes.len());
    for note in notes {
        by_key.entry(note.key()).or_default().push(note);
    }

    let mut records = Vec::with_capacity(admissions.len());
    let mut with_text = 0usize;
    for admission in admissions {
        match by_key.get(&admission.key()) {
            Some(matches) => {
                for note in matches {
                    records.push(MergedRecord::from_parts(admission, Some(note.text.as_str())));
                    with_text += 1;
                }
            }
            None => records.push(MergedRecord::from_parts(admission, None)),
        }
    }

    if records.len() != admissions.len() {
        return Err(DataIntegrityError::RowCountIncreased {
            before: admissions.len(),
            after: records.len(),
        });
    }
    let merged = records.len();

    let newborn = options.newborn_type.as_str();
    records.retain(|record| record.admission_type.as_deref() != Some(newborn));

    let stats = MergeStats {
        admissions: admissions.len(),
        merged,
        with_text,
        newborn_dropped: merged - records.len(),
        output: records.len(),
    };
    info!(
        merged = stats.merged,
        with_text = stats.with_text,
        newborn_dropped = stats.newborn_dropped,
        output = stats.output,
        duration_ms = start.elapsed().as_millis(),
        "admissions merged with discharge summaries"
    );

    Ok(MergedTable { records, stats })
}

#[cfg(test)]
mod tests {
    use super::*;
    use readmit_model::{AdmissionId, AdmissionRecord, SubjectId};

    fn admission(subject: i64, id: i64, kind: &str) -> CleanedAdmission {
        CleanedAdmission {
            admission: AdmissionRecord {
                subject_id: SubjectId::new(subject),
                admission_id: AdmissionId::new(id),
                admit_time: None,
                discharge_time: None,
                death_time: None,
                admission_type: Some(kind.to_string()),
            },
            next_admit_time: None,
            next_admission_type: None,
            days_to_next_admit: None,
        }
    }

    fn summary(subject: i64, id: i64, text: &str) -> NoteRecord {
        NoteRecord {
            subject_id: SubjectId::new(subject),
            admission_id: AdmissionId::new(id),
            category: "Discharge summary".to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn admissions_without_notes_are_kept() {
        let admissions = vec![admission(1, 10, "EMERGENCY"), admission(1, 11, "URGENT")];
        let notes = vec![summary(1, 11, "home")];

        let table =
            merge_admissions_notes(&admissions, &notes, &PipelineOptions::default()).unwrap();

        assert_eq!(table.records.len(), 2);
        assert_eq!(table.records[0].text, None);
        assert_eq!(table.records[1].text.as_deref(), Some("home"));
        assert_eq!(table.stats.with_text, 1);
    }

    #[test]
    fn join_requires_both_key_parts() {
        let admissions = vec![admission(1, 10, "EMERGENCY")];
        let notes = vec![summary(2, 10, "someone else")];

        let table =
            merge_admissions_notes(&admissions, &notes, &PipelineOptions::default()).unwrap();

        assert_eq!(table.records[0].text, None);
    }

    #[test]
    fn notes_without_admission_are_ignored() {
        let admissions = vec![admission(1, 10, "EMERGENCY")];
        let notes = vec![summary(1, 99, "unmatched")];

        let table =
            merge_admissions_notes(&admissions, &notes, &PipelineOptions::default()).unwrap();

        assert_eq!(table.records.len(), 1);
        assert_eq!(table.stats.with_text, 0);
    }

    #[test]
    fn duplicate_note_keys_fail_the_row_count_check() {
        let admissions = vec![admission(1, 10, "EMERGENCY")];
        let notes = vec![summary(1, 10, "a"), summary(1, 10, "b")];

        let err =
            merge_admissions_notes(&admissions, &notes, &PipelineOptions::default()).unwrap_err();

        assert_eq!(
            err,
            DataIntegrityError::RowCountIncreased {
                before: 1,
                after: 2
            }
        );
    }

    #[test]
    fn newborn_rows_are_dropped_after_the_join() {
        let admissions = vec![
            admission(1, 10, "NEWBORN"),
            admission(2, 20, "EMERGENCY"),
        ];
        let notes = vec![summary(1, 10, "baby")];

        let table =
            merge_admissions_notes(&admissions, &notes, &PipelineOptions::default()).unwrap();

        assert_eq!(table.records.len(), 1);
        assert_eq!(table.records[0].admission_id, AdmissionId::new(20));
        assert_eq!(table.stats.merged, 2);
        assert_eq!(table.stats.newborn_dropped, 1);
    }

    #[test]
    fn missing_admission_type_is_not_newborn() {
        let mut untyped = admission(1, 10, "");
        untyped.admission.admission_type = None;

        let table =
            merge_admissions_notes(&[untyped], &[], &PipelineOptions::default()).unwrap();

        assert_eq!(table.records.len(), 1);
    }
}
