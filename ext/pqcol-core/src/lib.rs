//! Typed single-column access to Parquet files
//!
//! `pqcol-core` is the language-agnostic half of `pqcol`. It wraps the Apache
//! parquet-rs crate with a small API built around one idea: a caller names a
//! column, and values move between that column and a flat `i64` buffer.
//!
//! # Key Components
//!
//! - **Schema**: [`schema::ColumnFile`] owns an opened file and its decoded
//!   footer, and resolves a [`ColumnSelector`] to a [`ResolvedColumn`]
//!   carrying the column's [`TypeTag`].
//!
//! - **Reader**: two ways to fill a buffer
//!   - Whole-column materialization through the Arrow record batch reader
//!   - Row-group streaming through the low-level typed column readers,
//!     decoding a bounded number of values at a time
//!
//! - **Writer**: [`ColumnWriter`] builds an Int64 array from a slice,
//!   wraps it in a one-column record batch and serializes it with a
//!   configurable row group size.
//!
//! - **Status**: every [`ColumnError`] classifies into one of the fixed
//!   [`Status`] codes handed to foreign callers.
//!
//! # Example Usage
//!
//! This crate is designed to be used through the `pqcol` C ABI crate, but
//! the Rust API is usable directly:
//!
//! ```no_run
//! use pqcol_core::{reader, writer, ColumnSelector};
//!
//! writer::write_column("vals.parquet", &[10, 20, 30], "vals", 2)?;
//!
//! let mut out = vec![0i64; 3];
//! reader::read_column("vals.parquet", &ColumnSelector::name("vals"), &mut out, 3)?;
//! assert_eq!(out, vec![10, 20, 30]);
//! # Ok::<(), pqcol_core::ColumnError>(())
//! ```

pub mod error;
pub mod reader;
pub mod schema;
pub mod status;
pub mod types;
pub mod writer;

#[cfg(test)]
pub mod test_utils;

pub use error::{ColumnError, ErrorContext, Result};
pub use reader::{BatchedColumnReader, DEFAULT_BATCH_SIZE};
pub use schema::ColumnFile;
pub use status::Status;
pub use types::{ColumnSelector, ResolvedColumn, TypeTag};
pub use writer::{ColumnWriter, ColumnWriterBuilder, DEFAULT_ROW_GROUP_SIZE};

/// Version string of the underlying Parquet library, as it stamps into the
/// `created_by` field of files it writes.
pub fn version_info() -> &'static str {
    parquet::file::properties::DEFAULT_CREATED_BY
}
