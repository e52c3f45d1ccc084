use polars::prelude::DataFrame;

use readmit_model::CaseInsensitiveSet;

use crate::error::{IngestError, Result};

/// Find `name` among the frame's columns, ignoring case and padding.
///
/// Returns the column name as spelled in the frame.
pub fn resolve_column(df: &DataFrame, name: &str, table: &'static str) -> Result<String> {
    let lookup = CaseInsensitiveSet::new(df.get_column_names().iter().map(|n| n.as_str()));
    lookup
        .get(name)
        .map(str::to_string)
        .ok_or_else(|| IngestError::MissingColumn {
            column: name.to_string(),
            table,
        })
}
