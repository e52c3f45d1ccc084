//! Integration tests for the CSV-backed sources.

use std::io::Write;

use tempfile::NamedTempFile;

use readmit_ingest::{
    AdmissionSource, CsvAdmissionSource, CsvNoteSource, IngestError, NoteSource,
};
use readmit_model::{AdmissionColumns, AdmissionId, NoteColumns, SubjectId};

fn create_temp_csv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn csv_admissions_load_in_file_order() {
    let file = create_temp_csv(
        "ROW_ID,SUBJECT_ID,HADM_ID,ADMITTIME,DISCHTIME,DEATHTIME,ADMISSION_TYPE\n\
         1,22,165315,2196-04-09 12:26:00,2196-04-10 15:54:00,,EMERGENCY\n\
         2,23,152223,2153-09-03 07:15:00,2153-09-08 19:10:00,,ELECTIVE\n\
         3,23,124321,2157-10-18 19:34:00,2157-10-25 14:00:00,,EMERGENCY\n",
    );
    let source = CsvAdmissionSource::new(file.path());

    let rows = source
        .load_admissions(&AdmissionColumns::default())
        .unwrap();

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].subject_id, SubjectId::new(22));
    assert_eq!(rows[1].admission_id, AdmissionId::new(152223));
    assert_eq!(rows[1].admission_type.as_deref(), Some("ELECTIVE"));
    assert_eq!(rows[2].discharge_time.as_deref(), Some("2157-10-25 14:00:00"));
    assert!(rows.iter().all(|row| row.death_time.is_none()));
}

#[test]
fn csv_notes_keep_multiline_text() {
    let file = create_temp_csv(
        "SUBJECT_ID,HADM_ID,CATEGORY,TEXT\n\
         22,165315,Discharge summary,\"Admission Date: [**2196-4-9**]\nDischarge Date: [**2196-4-10**]\"\n\
         22,,Radiology,\"CHEST (PA & LAT)\"\n",
    );
    let source = CsvNoteSource::new(file.path());

    let rows = source.load_notes(&NoteColumns::default()).unwrap();

    assert_eq!(rows.len(), 2);
    assert!(rows[0].text.contains('\n'));
    assert_eq!(rows[0].admission_id, Some(AdmissionId::new(165315)));
    assert_eq!(rows[1].admission_id, None);
    assert_eq!(rows[1].category, "Radiology");
}

#[test]
fn csv_admissions_report_missing_column() {
    let file = create_temp_csv("SUBJECT_ID,HADM_ID\n1,10\n");
    let source = CsvAdmissionSource::new(file.path());

    let err = source
        .load_admissions(&AdmissionColumns::default())
        .unwrap_err();

    assert!(matches!(
        err,
        IngestError::MissingColumn {
            table: "admissions",
            ..
        }
    ));
}

#[test]
fn custom_column_names_are_honored() {
    let file = create_temp_csv(
        "subject,stay,kind,body\n\
         5,50,Discharge summary,text\n",
    );
    let columns = NoteColumns {
        subject_id: "subject".to_string(),
        admission_id: "stay".to_string(),
        category: "kind".to_string(),
        text: "body".to_string(),
    };

    let rows = CsvNoteSource::new(file.path()).load_notes(&columns).unwrap();

    assert_eq!(rows[0].subject_id, SubjectId::new(5));
    assert_eq!(rows[0].text, "text");
}
