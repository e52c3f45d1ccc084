//! Record types flowing through the pipeline.
//!
//! Each stage consumes the previous stage's output by value and produces a
//! new record type; nothing is mutated across stage boundaries.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::ids::{AdmissionId, AdmissionKey, SubjectId};

/// One admission row as delivered by a loader, timestamps still unparsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdmissionRow {
    pub subject_id: SubjectId,
    pub admission_id: AdmissionId,
    pub admit_time: Option<String>,
    pub discharge_time: Option<String>,
    pub death_time: Option<String>,
    pub admission_type: Option<String>,
}

/// One clinical note row as delivered by a loader.
///
/// `admission_id` is absent for notes written outside a hospital stay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteRow {
    pub subject_id: SubjectId,
    pub admission_id: Option<AdmissionId>,
    pub category: String,
    pub text: String,
}

/// An admission with parsed timestamps.
///
/// A timestamp that did not match the configured format is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdmissionRecord {
    pub subject_id: SubjectId,
    pub admission_id: AdmissionId,
    pub admit_time: Option<NaiveDateTime>,
    pub discharge_time: Option<NaiveDateTime>,
    pub death_time: Option<NaiveDateTime>,
    pub admission_type: Option<String>,
}

impl AdmissionRecord {
    pub fn key(&self) -> AdmissionKey {
        AdmissionKey::new(self.subject_id, self.admission_id)
    }
}

/// An admission linked to the patient's next unplanned admission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanedAdmission {
    #[serde(flatten)]
    pub admission: AdmissionRecord,
    pub next_admit_time: Option<NaiveDateTime>,
    pub next_admission_type: Option<String>,
    /// Days from discharge to the next unplanned admission. Negative when
    /// the next stay starts before this one ends.
    pub days_to_next_admit: Option<f64>,
}

impl CleanedAdmission {
    pub fn key(&self) -> AdmissionKey {
        self.admission.key()
    }
}

/// The discharge summary selected for one admission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteRecord {
    pub subject_id: SubjectId,
    pub admission_id: AdmissionId,
    pub category: String,
    pub text: String,
}

impl NoteRecord {
    pub fn key(&self) -> AdmissionKey {
        AdmissionKey::new(self.subject_id, self.admission_id)
    }
}

/// One row of the final modeling table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedRecord {
    pub subject_id: SubjectId,
    pub admission_id: AdmissionId,
    pub admit_time: Option<NaiveDateTime>,
    pub discharge_time: Option<NaiveDateTime>,
    pub days_to_next_admit: Option<f64>,
    pub next_admit_time: Option<NaiveDateTime>,
    pub admission_type: Option<String>,
    pub death_time: Option<NaiveDateTime>,
    pub text: Option<String>,
}

impl MergedRecord {
    /// Project a cleaned admission and its (optional) discharge summary.
    pub fn from_parts(admission: &CleanedAdmission, text: Option<&str>) -> Self {
        let record = &admission.admission;
        Self {
            subject_id: record.subject_id,
            admission_id: record.admission_id,
            admit_time: record.admit_time,
            discharge_time: record.discharge_time,
            days_to_next_admit: admission.days_to_next_admit,
            next_admit_time: admission.next_admit_time,
            admission_type: record.admission_type.clone(),
            death_time: record.death_time,
            text: text.map(str::to_string),
        }
    }

    pub fn key(&self) -> AdmissionKey {
        AdmissionKey::new(self.subject_id, self.admission_id)
    }
}
