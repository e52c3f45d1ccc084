//! Readmission dataset transformations.
//!
//! This crate turns raw admission and note rows into the modeling table:
//!
//! - **datetime**: fixed-format timestamp parsing and day-gap arithmetic
//! - **admissions**: next unplanned admission linkage per patient
//! - **notes**: one discharge summary per admission
//! - **merge**: left join of admissions and notes, newborn exclusion
//! - **pipeline**: the three stages composed, with per-stage statistics
//! - **frame**: export of the merged table as a Polars DataFrame

pub mod admissions;
pub mod datetime;
pub mod error;
pub mod frame;
pub mod merge;
pub mod notes;
pub mod pipeline;

pub use admissions::{CleanedAdmissions, CleaningStats, clean_admissions};
pub use error::{PipelineError, Result};
pub use frame::{DAYS_NEXT_ADMIT_COLUMN, NEXT_ADMIT_TIME_COLUMN, merged_to_dataframe};
pub use merge::{MergeStats, MergedTable, merge_admissions_notes};
pub use notes::{SelectedNotes, SelectionStats, select_discharge_notes};
pub use pipeline::{DatasetOutput, PipelineStats, build_dataset, load_clean_merge};
