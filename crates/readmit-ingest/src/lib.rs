//! Admission and note ingestion.
//!
//! This crate loads the admissions and clinical notes tables into Polars
//! DataFrames and turns them into the typed rows the pipeline consumes.
//!
//! # Features
//!
//! - **CSV Loading**: Read CSV files with every column kept as text
//! - **Column Resolution**: Case-insensitive lookup of configured column names
//! - **Row Extraction**: DataFrame to [`AdmissionRow`] / [`NoteRow`] conversion
//! - **Loader Traits**: [`AdmissionSource`] and [`NoteSource`] for files,
//!   DataFrames, and in-memory rows
//!
//! # Example
//!
//! ```ignore
//! use readmit_ingest::{AdmissionSource, CsvAdmissionSource};
//! use readmit_model::AdmissionColumns;
//!
//! let source = CsvAdmissionSource::new("mimic/ADMISSIONS.csv");
//! let rows = source.load_admissions(&AdmissionColumns::default())?;
//! ```
//!
//! [`AdmissionRow`]: readmit_model::AdmissionRow
//! [`NoteRow`]: readmit_model::NoteRow

mod columns;
mod csv;
mod error;
mod frame;
mod source;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use csv::{MAX_CSV_FILE_SIZE, check_file_size, read_csv_table, validate_encoding};

// === Row Extraction ===
pub use columns::resolve_column;
pub use frame::{admissions_from_dataframe, notes_from_dataframe};

// === Loader Traits ===
pub use source::{AdmissionSource, CsvAdmissionSource, CsvNoteSource, NoteSource};
