//! Configuration options for a pipeline run.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Timestamp layout used by the admissions table.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Source column names for the admissions table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdmissionColumns {
    pub subject_id: String,
    pub admission_id: String,
    pub admit_time: String,
    pub discharge_time: String,
    pub death_time: String,
    pub admission_type: String,
}

impl Default for AdmissionColumns {
    fn default() -> Self {
        Self {
            subject_id: "SUBJECT_ID".to_string(),
            admission_id: "HADM_ID".to_string(),
            admit_time: "ADMITTIME".to_string(),
            discharge_time: "DISCHTIME".to_string(),
            death_time: "DEATHTIME".to_string(),
            admission_type: "ADMISSION_TYPE".to_string(),
        }
    }
}

impl AdmissionColumns {
    /// Column names in source order, paired with a short description.
    pub fn describe(&self) -> Vec<(&str, &'static str)> {
        vec![
            (self.subject_id.as_str(), "patient identifier (integer)"),
            (self.admission_id.as_str(), "hospital stay identifier (integer)"),
            (self.admit_time.as_str(), "admission timestamp"),
            (self.discharge_time.as_str(), "discharge timestamp"),
            (self.death_time.as_str(), "in-hospital death timestamp (may be empty)"),
            (self.admission_type.as_str(), "admission type, e.g. EMERGENCY or ELECTIVE"),
        ]
    }
}

/// Source column names for the notes table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoteColumns {
    pub subject_id: String,
    pub admission_id: String,
    pub category: String,
    pub text: String,
}

impl Default for NoteColumns {
    fn default() -> Self {
        Self {
            subject_id: "SUBJECT_ID".to_string(),
            admission_id: "HADM_ID".to_string(),
            category: "CATEGORY".to_string(),
            text: "TEXT".to_string(),
        }
    }
}

impl NoteColumns {
    /// Column names in source order, paired with a short description.
    pub fn describe(&self) -> Vec<(&str, &'static str)> {
        vec![
            (self.subject_id.as_str(), "patient identifier (integer)"),
            (self.admission_id.as_str(), "hospital stay identifier (may be empty)"),
            (self.category.as_str(), "note category"),
            (self.text.as_str(), "note body"),
        ]
    }
}

/// Options controlling a pipeline run.
///
/// Every field has a default matching the MIMIC-III export, so a TOML file
/// only needs the values that differ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
    /// `chrono` format string for admit, discharge, and death times.
    pub timestamp_format: String,
    /// Admission type that never counts as an unplanned readmission.
    pub elective_type: String,
    /// Admission type excluded from the final table.
    pub newborn_type: String,
    /// Note category holding the end-of-stay summary.
    pub discharge_category: String,
    pub admission_columns: AdmissionColumns,
    pub note_columns: NoteColumns,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            elective_type: "ELECTIVE".to_string(),
            newborn_type: "NEWBORN".to_string(),
            discharge_category: "Discharge summary".to_string(),
            admission_columns: AdmissionColumns::default(),
            note_columns: NoteColumns::default(),
        }
    }
}

impl PipelineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_format = format.into();
        self
    }

    #[must_use]
    pub fn with_discharge_category(mut self, category: impl Into<String>) -> Self {
        self.discharge_category = category.into();
        self
    }

    /// Reject options no run could succeed with.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("timestamp_format", self.timestamp_format.as_str()),
            ("elective_type", self.elective_type.as_str()),
            ("newborn_type", self.newborn_type.as_str()),
            ("discharge_category", self.discharge_category.as_str()),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ModelError::InvalidOption {
                    field,
                    reason: "must not be empty".to_string(),
                });
            }
        }
        if !self.timestamp_format.contains('%') {
            return Err(ModelError::InvalidOption {
                field: "timestamp_format",
                reason: format!(
                    "'{}' has no format specifiers",
                    self.timestamp_format
                ),
            });
        }
        let columns = self
            .admission_columns
            .describe()
            .into_iter()
            .chain(self.note_columns.describe());
        for (name, _) in columns {
            if name.trim().is_empty() {
                return Err(ModelError::InvalidOption {
                    field: "columns",
                    reason: "column names must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }
}
