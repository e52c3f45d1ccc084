use std::path::PathBuf;

use readmit_transform::PipelineStats;

#[derive(Debug)]
pub struct BuildResult {
    pub admissions: PathBuf,
    pub notes: PathBuf,
    /// `None` on a dry run.
    pub output: Option<PathBuf>,
    pub rows: usize,
    pub stats: PipelineStats,
}
