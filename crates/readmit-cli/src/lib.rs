//! CLI library components for the readmission dataset builder.

pub mod config;
pub mod logging;
pub mod output;
