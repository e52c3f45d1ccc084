use std::fmt;

use serde::{Deserialize, Serialize};

/// Patient identifier (`SUBJECT_ID` in the source tables).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SubjectId(i64);

impl SubjectId {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hospital stay identifier (`HADM_ID` in the source tables).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct AdmissionId(i64);

impl AdmissionId {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for AdmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Join key shared by admissions and notes.
///
/// Orders by subject first, then admission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AdmissionKey {
    pub subject_id: SubjectId,
    pub admission_id: AdmissionId,
}

impl AdmissionKey {
    pub const fn new(subject_id: SubjectId, admission_id: AdmissionId) -> Self {
        Self {
            subject_id,
            admission_id,
        }
    }
}

impl fmt::Display for AdmissionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "subject {}, admission {}",
            self.subject_id, self.admission_id
        )
    }
}
