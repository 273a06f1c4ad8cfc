//! # SQL Literal Formatting
//!
//! Helpers that render Rust values as SQL literals for the export script.
//! Absent values render as `NULL`; embedded single quotes are doubled.

use chrono::{DateTime, Utc};

/// A quoted string literal with `'` doubled
pub fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Optional string: `NULL` when absent
pub fn opt_quote(value: Option<&str>) -> String {
    match value {
        Some(v) => quote(v),
        None => "NULL".to_string(),
    }
}

/// Timestamp as `'YYYY-MM-DD HH:MM:SS'`
pub fn datetime(value: DateTime<Utc>) -> String {
    format!("'{}'", value.format("%Y-%m-%d %H:%M:%S"))
}

/// Booleans as `1`/`0`
pub fn boolean(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}

/// Numeric literal (emitted bare)
pub fn number<T: std::fmt::Display>(value: T) -> String {
    value.to_string()
}

/// Optional numeric literal: `NULL` when absent
pub fn opt_number<T: std::fmt::Display>(value: Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "NULL".to_string(),
    }
}

/// String list as an escaped JSON array literal
pub fn json_array(values: &[String]) -> String {
    let json = serde_json::to_string(values).unwrap_or_else(|_| "[]".to_string());
    quote(&json)
}
