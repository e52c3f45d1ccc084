//! Shared utilities for the readmission dataset crates.
//!
//! This crate provides common utilities used across the workspace,
//! mainly Polars `AnyValue` helpers for reading loosely typed CSV cells.

pub mod polars;

pub use self::polars::{any_to_i64, any_to_string, any_to_string_non_empty, parse_i64};
