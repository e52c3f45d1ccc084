//! Loader traits for the two pipeline inputs.
//!
//! The pipeline only ever sees typed rows; where they come from (a CSV
//! export, a frame built by the caller, or rows assembled in a test) is the
//! source's concern.

use std::path::{Path, PathBuf};
use std::time::Instant;

use polars::prelude::DataFrame;
use tracing::info;

use readmit_model::{AdmissionColumns, AdmissionRow, NoteColumns, NoteRow};

use crate::csv::read_csv_table;
use crate::error::Result;
use crate::frame::{admissions_from_dataframe, notes_from_dataframe};

/// Supplies raw admission rows.
pub trait AdmissionSource {
    fn load_admissions(&self, columns: &AdmissionColumns) -> Result<Vec<AdmissionRow>>;
}

/// Supplies raw clinical note rows.
pub trait NoteSource {
    fn load_notes(&self, columns: &NoteColumns) -> Result<Vec<NoteRow>>;
}

impl AdmissionSource for Vec<AdmissionRow> {
    fn load_admissions(&self, _columns: &AdmissionColumns) -> Result<Vec<AdmissionRow>> {
        Ok(self.clone())
    }
}

impl NoteSource for Vec<NoteRow> {
    fn load_notes(&self, _columns: &NoteColumns) -> Result<Vec<NoteRow>> {
        Ok(self.clone())
    }
}

impl AdmissionSource for DataFrame {
    fn load_admissions(&self, columns: &AdmissionColumns) -> Result<Vec<AdmissionRow>> {
        admissions_from_dataframe(self, columns)
    }
}

impl NoteSource for DataFrame {
    fn load_notes(&self, columns: &NoteColumns) -> Result<Vec<NoteRow>> {
        notes_from_dataframe(self, columns)
    }
}

/// Admissions read from a CSV export.
#[derive(Debug, Clone)]
pub struct CsvAdmissionSource {
    path: PathBuf,
}

impl CsvAdmissionSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AdmissionSource for CsvAdmissionSource {
    fn load_admissions(&self, columns: &AdmissionColumns) -> Result<Vec<AdmissionRow>> {
        let start = Instant::now();
        let df = read_csv_table(&self.path)?;
        let rows = admissions_from_dataframe(&df, columns)?;
        info!(
            path = %self.path.display(),
            rows = rows.len(),
            duration_ms = start.elapsed().as_millis(),
            "loaded admissions"
        );
        Ok(rows)
    }
}

/// Clinical notes read from a CSV export.
#[derive(Debug, Clone)]
pub struct CsvNoteSource {
    path: PathBuf,
}

impl CsvNoteSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl NoteSource for CsvNoteSource {
    fn load_notes(&self, columns: &NoteColumns) -> Result<Vec<NoteRow>> {
        let start = Instant::now();
        let df = read_csv_table(&self.path)?;
        let rows = notes_from_dataframe(&df, columns)?;
        info!(
            path = %self.path.display(),
            rows = rows.len(),
            duration_ms = start.elapsed().as_millis(),
            "loaded notes"
        );
        Ok(rows)
    }
}
