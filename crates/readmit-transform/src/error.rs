use thiserror::Error;

use readmit_ingest::IngestError;
use readmit_model::{DataIntegrityError, ModelError};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid pipeline options: {0}")]
    Options(#[from] ModelError),
    #[error("failed to load input: {0}")]
    Ingest(#[from] IngestError),
    #[error("data integrity violation: {0}")]
    Integrity(#[from] DataIntegrityError),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
