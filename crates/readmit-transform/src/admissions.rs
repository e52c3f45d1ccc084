//! Next unplanned admission linkage.
//!
//! For every admission, find the patient's chronologically next admission
//! that was not elective and measure the gap from discharge to it. The work
//! is a stable sort by (subject, admit time) followed by linear passes over
//! each subject's run of rows:
//!
//! 1. link each row to the row after it,
//! 2. clear links that point at an elective admission,
//! 3. backward-fill cleared links from later rows of the same subject,
//! 4. compute the day gap.

use std::cmp::Ordering;
use std::time::Instant;

use tracing::{info, info_span, warn};

use readmit_model::{AdmissionRecord, AdmissionRow, CleanedAdmission, PipelineOptions};

use crate::datetime::{days_between, parse_timestamp};

/// Counters reported by [`clean_admissions`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleaningStats {
    /// Admission rows in (and out).
    pub admissions: usize,
    /// Distinct patients.
    pub subjects: usize,
    /// Non-empty timestamp cells that did not match the format.
    pub coerced_timestamps: usize,
    /// Links to an elective next admission that were cleared before filling.
    pub elective_links_cleared: usize,
    /// Rows that ended up with a next unplanned admission.
    pub with_next_admission: usize,
}

/// Output of [`clean_admissions`], ordered by subject then admit time.
#[derive(Debug, Clone, Default)]
pub struct CleanedAdmissions {
    pub records: Vec<CleanedAdmission>,
    pub stats: CleaningStats,
}

/// Parse admission rows and derive each row's next unplanned admission.
///
/// Never drops a row: the output has exactly one record per input row.
pub fn clean_admissions(rows: Vec<AdmissionRow>, options: &PipelineOptions) -> CleanedAdmissions {
    let span = info_span!("clean_admissions", admissions = rows.len());
    let _guard = span.enter();
    let start = Instant::now();

    let mut stats = CleaningStats {
        admissions: rows.len(),
        ..CleaningStats::default()
    };
    let format = options.timestamp_format.as_str();
    let mut records: Vec<CleanedAdmission> = rows
        .into_iter()
        .map(|row| CleanedAdmission {
            admission: parse_row(row, format, &mut stats.coerced_timestamps),
            next_admit_time: None,
            next_admission_type: None,
            days_to_next_admit: None,
        })
        .collect();

    sort_by_subject_and_admit_time(&mut records);
    for partition in records.chunk_by_mut(same_subject) {
        stats.subjects += 1;
        link_next_admission(partition);
    }

    stats.elective_links_cleared = clear_elective_links(&mut records, &options.elective_type);

    // The fill reads later rows of the same subject; it needs sorted input.
    sort_by_subject_and_admit_time(&mut records);
    for partition in records.chunk_by_mut(same_subject) {
        backfill_next_admission(partition);
    }

    for record in &mut records {
        record.days_to_next_admit = match (record.admission.discharge_time, record.next_admit_time)
        {
            (Some(discharge), Some(next)) => Some(days_between(discharge, next)),
            _ => None,
        };
    }
    stats.with_next_admission = records
        .iter()
        .filter(|record| record.next_admit_time.is_some())
        .count();

    if stats.coerced_timestamps > 0 {
        warn!(
            coerced = stats.coerced_timestamps,
            timestamp_format = format,
            "timestamps did not match the expected format and were set to null"
        );
    }
    info!(
        admissions = stats.admissions,
        subjects = stats.subjects,
        elective_links_cleared = stats.elective_links_cleared,
        with_next_admission = stats.with_next_admission,
        duration_ms = start.elapsed().as_millis(),
        "admissions cleaned"
    );

    CleanedAdmissions { records, stats }
}

fn parse_row(row: AdmissionRow, format: &str, coerced: &mut usize) -> AdmissionRecord {
    let mut parse = |value: Option<&str>| {
        let parsed = parse_timestamp(value, format);
        if parsed.is_none() && value.is_some_and(|v| !v.trim().is_empty()) {
            *coerced += 1;
        }
        parsed
    };
    AdmissionRecord {
        subject_id: row.subject_id,
        admission_id: row.admission_id,
        admit_time: parse(row.admit_time.as_deref()),
        discharge_time: parse(row.discharge_time.as_deref()),
        death_time: parse(row.death_time.as_deref()),
        admission_type: row.admission_type,
    }
}

fn same_subject(a: &CleanedAdmission, b: &CleanedAdmission) -> bool {
    a.admission.subject_id == b.admission.subject_id
}

/// Stable sort by subject, then admit time with missing admit times last.
fn sort_by_subject_and_admit_time(records: &mut [CleanedAdmission]) {
    records.sort_by(|a, b| {
        a.admission
            .subject_id
            .cmp(&b.admission.subject_id)
            .then_with(|| match (a.admission.admit_time, b.admission.admit_time) {
                (Some(left), Some(right)) => left.cmp(&right),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            })
    });
}

/// Point each row at the row after it; the last row has no successor.
fn link_next_admission(partition: &mut [CleanedAdmission]) {
    for idx in 0..partition.len() {
        let (next_time, next_type) = match partition.get(idx + 1) {
            Some(next) => (
                next.admission.admit_time,
                next.admission.admission_type.clone(),
            ),
            None => (None, None),
        };
        let record = &mut partition[idx];
        record.next_admit_time = next_time;
        record.next_admission_type = next_type;
    }
}

/// Elective stays are planned, so they never count as the readmission.
fn clear_elective_links(records: &mut [CleanedAdmission], elective_type: &str) -> usize {
    let mut cleared = 0;
    for record in records {
        if record.next_admission_type.as_deref() == Some(elective_type) {
            record.next_admit_time = None;
            record.next_admission_type = None;
            cleared += 1;
        }
    }
    cleared
}

/// Fill each missing link from the nearest later row that has one.
///
/// Time and type are filled independently of each other.
fn backfill_next_admission(partition: &mut [CleanedAdmission]) {
    let mut later_time = None;
    let mut later_type: Option<String> = None;
    for record in partition.iter_mut().rev() {
        match record.next_admit_time {
            Some(time) => later_time = Some(time),
            None => record.next_admit_time = later_time,
        }
        if record.next_admission_type.is_some() {
            later_type.clone_from(&record.next_admission_type);
        } else {
            record.next_admission_type.clone_from(&later_type);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use readmit_model::{AdmissionId, SubjectId};

    fn row(subject: i64, admission: i64, admit: &str, discharge: &str, kind: &str) -> AdmissionRow {
        AdmissionRow {
            subject_id: SubjectId::new(subject),
            admission_id: AdmissionId::new(admission),
            admit_time: Some(admit.to_string()),
            discharge_time: Some(discharge.to_string()),
            death_time: None,
            admission_type: Some(kind.to_string()),
        }
    }

    fn ids(records: &[CleanedAdmission]) -> Vec<i64> {
        records
            .iter()
            .map(|record| record.admission.admission_id.get())
            .collect()
    }

    #[test]
    fn sorts_by_subject_then_admit_time() {
        let rows = vec![
            row(2, 20, "2100-03-01 00:00:00", "2100-03-02 00:00:00", "EMERGENCY"),
            row(1, 11, "2100-02-01 00:00:00", "2100-02-02 00:00:00", "EMERGENCY"),
            row(1, 10, "2100-01-01 00:00:00", "2100-01-02 00:00:00", "EMERGENCY"),
        ];
        let cleaned = clean_admissions(rows, &PipelineOptions::default());
        assert_eq!(ids(&cleaned.records), vec![10, 11, 20]);
        assert_eq!(cleaned.stats.subjects, 2);
    }

    #[test]
    fn missing_admit_time_sorts_last_and_keeps_input_order() {
        let rows = vec![
            row(1, 12, "garbage", "2100-01-02 00:00:00", "EMERGENCY"),
            row(1, 11, "", "2100-01-02 00:00:00", "EMERGENCY"),
            row(1, 10, "2100-01-01 00:00:00", "2100-01-02 00:00:00", "EMERGENCY"),
        ];
        let cleaned = clean_admissions(rows, &PipelineOptions::default());
        assert_eq!(ids(&cleaned.records), vec![10, 12, 11]);
        // Only the non-empty unparseable cell counts as coerced.
        assert_eq!(cleaned.stats.coerced_timestamps, 1);
    }

    #[test]
    fn last_admission_has_no_successor() {
        let rows = vec![row(
            1,
            10,
            "2100-01-01 00:00:00",
            "2100-01-02 00:00:00",
            "EMERGENCY",
        )];
        let cleaned = clean_admissions(rows, &PipelineOptions::default());
        let record = &cleaned.records[0];
        assert_eq!(record.next_admit_time, None);
        assert_eq!(record.next_admission_type, None);
        assert_eq!(record.days_to_next_admit, None);
    }

    #[test]
    fn links_do_not_cross_subjects() {
        let rows = vec![
            row(1, 10, "2100-01-01 00:00:00", "2100-01-02 00:00:00", "EMERGENCY"),
            row(2, 20, "2100-01-10 00:00:00", "2100-01-12 00:00:00", "EMERGENCY"),
        ];
        let cleaned = clean_admissions(rows, &PipelineOptions::default());
        assert!(cleaned.records.iter().all(|r| r.next_admit_time.is_none()));
    }

    #[test]
    fn elective_successor_is_skipped() {
        let rows = vec![
            row(1, 10, "2100-01-01 00:00:00", "2100-01-02 00:00:00", "EMERGENCY"),
            row(1, 11, "2100-02-01 00:00:00", "2100-02-03 00:00:00", "ELECTIVE"),
            row(1, 12, "2100-03-01 00:00:00", "2100-03-04 00:00:00", "URGENT"),
        ];
        let cleaned = clean_admissions(rows, &PipelineOptions::default());
        let first = &cleaned.records[0];
        assert_eq!(first.next_admission_type.as_deref(), Some("URGENT"));
        assert_eq!(
            first.next_admit_time,
            cleaned.records[2].admission.admit_time
        );
        assert_eq!(cleaned.stats.elective_links_cleared, 1);
    }

    #[test]
    fn trailing_electives_leave_no_successor() {
        let rows = vec![
            row(1, 10, "2100-01-01 00:00:00", "2100-01-02 00:00:00", "EMERGENCY"),
            row(1, 11, "2100-02-01 00:00:00", "2100-02-03 00:00:00", "ELECTIVE"),
            row(1, 12, "2100-03-01 00:00:00", "2100-03-04 00:00:00", "ELECTIVE"),
        ];
        let cleaned = clean_admissions(rows, &PipelineOptions::default());
        assert!(cleaned.records.iter().all(|r| r.next_admit_time.is_none()));
        assert_eq!(cleaned.stats.with_next_admission, 0);
    }

    #[test]
    fn fill_takes_type_even_when_time_is_missing() {
        // The successor's admit time is unparseable, so only its type links.
        let rows = vec![
            row(1, 10, "2100-01-01 00:00:00", "2100-01-02 00:00:00", "EMERGENCY"),
            row(1, 11, "2100-02-01 00:00:00", "2100-02-03 00:00:00", "ELECTIVE"),
            row(1, 12, "2100-03-01 00:00:00", "2100-03-04 00:00:00", "EMERGENCY"),
            row(1, 13, "bad", "2100-04-04 00:00:00", "URGENT"),
        ];
        let cleaned = clean_admissions(rows, &PipelineOptions::default());
        let third = &cleaned.records[2];
        assert_eq!(third.admission.admission_id.get(), 12);
        assert_eq!(third.next_admit_time, None);
        assert_eq!(third.next_admission_type.as_deref(), Some("URGENT"));
        assert_eq!(third.days_to_next_admit, None);
    }

    #[test]
    fn overlapping_stays_give_negative_gap() {
        let rows = vec![
            row(1, 10, "2100-01-01 00:00:00", "2100-01-10 00:00:00", "EMERGENCY"),
            row(1, 11, "2100-01-08 00:00:00", "2100-01-12 00:00:00", "EMERGENCY"),
        ];
        let cleaned = clean_admissions(rows, &PipelineOptions::default());
        assert_eq!(cleaned.records[0].days_to_next_admit, Some(-2.0));
    }

    #[test]
    fn custom_elective_label() {
        let options = PipelineOptions {
            elective_type: "PLANNED".to_string(),
            ..PipelineOptions::default()
        };
        let rows = vec![
            row(1, 10, "2100-01-01 00:00:00", "2100-01-02 00:00:00", "EMERGENCY"),
            row(1, 11, "2100-02-01 00:00:00", "2100-02-03 00:00:00", "PLANNED"),
        ];
        let cleaned = clean_admissions(rows, &options);
        assert_eq!(cleaned.records[0].next_admit_time, None);
    }
}
