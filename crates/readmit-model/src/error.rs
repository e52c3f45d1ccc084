use thiserror::Error;

use crate::ids::{AdmissionId, SubjectId};

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid option {field}: {reason}")]
    InvalidOption { field: &'static str, reason: String },
}

/// Input data that violates a structural guarantee of the pipeline.
///
/// These are never recovered from: the run stops and the source data has to
/// be fixed upstream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataIntegrityError {
    /// One admission carries discharge summaries under more than one subject.
    #[error(
        "multiple discharge summaries per admission: admission {admission_id} \
         recorded for subjects {first_subject} and {second_subject}"
    )]
    DuplicateDischargeSummary {
        admission_id: AdmissionId,
        first_subject: SubjectId,
        second_subject: SubjectId,
    },

    /// The notes join produced more rows than there are admissions.
    #[error("number of rows increased during merge: {before} admissions became {after} rows")]
    RowCountIncreased { before: usize, after: usize },
}

pub type Result<T> = std::result::Result<T, ModelError>;
