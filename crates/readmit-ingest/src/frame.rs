//! DataFrame to typed row conversion.
//!
//! Row numbers in errors are 1-based data rows (the header is not counted).

use polars::prelude::{AnyValue, Column, DataFrame};

use readmit_common::{any_to_i64, any_to_string, any_to_string_non_empty};
use readmit_model::{AdmissionColumns, AdmissionId, AdmissionRow, NoteColumns, NoteRow, SubjectId};

use crate::columns::resolve_column;
use crate::error::{IngestError, Result};

const ADMISSIONS: &str = "admissions";
const NOTES: &str = "notes";

struct IdColumn<'a> {
    name: &'a str,
    column: &'a Column,
    table: &'static str,
}

impl IdColumn<'_> {
    fn optional(&self, idx: usize) -> Result<Option<i64>> {
        let value = self.column.get(idx)?;
        if matches!(value, AnyValue::Null) {
            return Ok(None);
        }
        let text = any_to_string(value.clone());
        if text.trim().is_empty() {
            return Ok(None);
        }
        match any_to_i64(value) {
            Some(id) => Ok(Some(id)),
            None => Err(self.invalid(idx, text)),
        }
    }

    fn required(&self, idx: usize) -> Result<i64> {
        self.optional(idx)?
            .ok_or_else(|| self.invalid(idx, String::new()))
    }

    fn invalid(&self, idx: usize, value: String) -> IngestError {
        IngestError::InvalidIdentifier {
            table: self.table,
            column: self.name.to_string(),
            row: idx + 1,
            value,
        }
    }
}

fn text_at(column: &Column, idx: usize) -> Result<Option<String>> {
    Ok(any_to_string_non_empty(column.get(idx)?))
}

/// Convert an admissions table into typed rows.
///
/// Identifiers must be present and integral; every other cell may be empty.
pub fn admissions_from_dataframe(
    df: &DataFrame,
    columns: &AdmissionColumns,
) -> Result<Vec<AdmissionRow>> {
    let subject_name = resolve_column(df, &columns.subject_id, ADMISSIONS)?;
    let admission_name = resolve_column(df, &columns.admission_id, ADMISSIONS)?;
    let admit_name = resolve_column(df, &columns.admit_time, ADMISSIONS)?;
    let discharge_name = resolve_column(df, &columns.discharge_time, ADMISSIONS)?;
    let death_name = resolve_column(df, &columns.death_time, ADMISSIONS)?;
    let type_name = resolve_column(df, &columns.admission_type, ADMISSIONS)?;

    let subject = IdColumn {
        name: &columns.subject_id,
        column: df.column(&subject_name)?,
        table: ADMISSIONS,
    };
    let admission = IdColumn {
        name: &columns.admission_id,
        column: df.column(&admission_name)?,
        table: ADMISSIONS,
    };
    let admit = df.column(&admit_name)?;
    let discharge = df.column(&discharge_name)?;
    let death = df.column(&death_name)?;
    let admission_type = df.column(&type_name)?;

    let mut rows = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        rows.push(AdmissionRow {
            subject_id: SubjectId::new(subject.required(idx)?),
            admission_id: AdmissionId::new(admission.required(idx)?),
            admit_time: text_at(admit, idx)?,
            discharge_time: text_at(discharge, idx)?,
            death_time: text_at(death, idx)?,
            admission_type: text_at(admission_type, idx)?.map(|t| t.trim().to_string()),
        });
    }
    Ok(rows)
}

/// Convert a notes table into typed rows.
///
/// The admission identifier may be empty; category and text default to
/// empty strings.
pub fn notes_from_dataframe(df: &DataFrame, columns: &NoteColumns) -> Result<Vec<NoteRow>> {
    let subject_name = resolve_column(df, &columns.subject_id, NOTES)?;
    let admission_name = resolve_column(df, &columns.admission_id, NOTES)?;
    let category_name = resolve_column(df, &columns.category, NOTES)?;
    let text_name = resolve_column(df, &columns.text, NOTES)?;

    let subject = IdColumn {
        name: &columns.subject_id,
        column: df.column(&subject_name)?,
        table: NOTES,
    };
    let admission = IdColumn {
        name: &columns.admission_id,
        column: df.column(&admission_name)?,
        table: NOTES,
    };
    let category = df.column(&category_name)?;
    let text = df.column(&text_name)?;

    let mut rows = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        rows.push(NoteRow {
            subject_id: SubjectId::new(subject.required(idx)?),
            admission_id: admission.optional(idx)?.map(AdmissionId::new),
            category: any_to_string(category.get(idx)?).trim().to_string(),
            text: any_to_string(text.get(idx)?),
        });
    }
    Ok(rows)
}
