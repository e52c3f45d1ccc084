//! Data model for the readmission dataset pipeline.
//!
//! Raw rows as delivered by a loader, the parsed and derived records produced
//! by each stage, the options that parameterize a run, and the errors that
//! signal corrupt input.

pub mod error;
pub mod ids;
pub mod lookup;
pub mod options;
pub mod records;

pub use error::{DataIntegrityError, ModelError, Result};
pub use ids::{AdmissionId, AdmissionKey, SubjectId};
pub use lookup::CaseInsensitiveSet;
pub use options::{AdmissionColumns, DEFAULT_TIMESTAMP_FORMAT, NoteColumns, PipelineOptions};
pub use records::{
    AdmissionRecord, AdmissionRow, CleanedAdmission, MergedRecord, NoteRecord, NoteRow,
};
