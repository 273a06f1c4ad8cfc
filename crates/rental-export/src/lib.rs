//! # rental-export
//!
//! SQL export utility for the berth-rental document store.
//!
//! One linear pass: fetch every row of the seven collections into a
//! [`DatabaseSnapshot`], render it as a single SQL script (tables, data,
//! indexes), and write the script to the working directory. No chunking,
//! no destination transactions, no round-trip validation.

pub mod schema;
pub mod script;
pub mod sql;

pub use script::{build_script, DatabaseSnapshot};

/// Fixed output filename, written to the process working directory
pub const OUTPUT_FILE: &str = "sailingloc_export.sql";
