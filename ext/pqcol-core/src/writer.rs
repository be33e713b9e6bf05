//! Core column writing functionality

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::record_batch::RecordBatch;
use arrow_array::builder::Int64Builder;
use arrow_array::ArrayRef;
use arrow_schema::{DataType, Field, Schema, SchemaRef};
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use crate::{ColumnError, ErrorContext, Result};

/// Rows per row group when the caller does not choose
pub const DEFAULT_ROW_GROUP_SIZE: usize = 1024 * 1024;

/// Builder for creating a configured [`ColumnWriter`]
#[derive(Debug, Clone)]
pub struct ColumnWriterBuilder {
    compression: Compression,
    row_group_size: usize,
}

impl Default for ColumnWriterBuilder {
    fn default() -> Self {
        Self {
            compression: Compression::SNAPPY,
            row_group_size: DEFAULT_ROW_GROUP_SIZE,
        }
    }
}

impl ColumnWriterBuilder {
    /// Create a new ColumnWriterBuilder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the compression algorithm
    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Set the maximum number of rows per row group
    pub fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    /// Build a writer for a single non-nullable Int64 column named `column_name`
    pub fn build<S: Into<String>>(self, column_name: S) -> Result<ColumnWriter> {
        if self.row_group_size == 0 {
            return Err(ColumnError::write("Row group size must be positive"));
        }

        let schema = Arc::new(Schema::new(vec![Field::new(
            column_name.into(),
            DataType::Int64,
            false,
        )]));

        let props = WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size)
            .build();

        Ok(ColumnWriter { schema, props })
    }
}

/// Writes one Int64 column as a complete Parquet file
#[derive(Debug, Clone)]
pub struct ColumnWriter {
    schema: SchemaRef,
    props: WriterProperties,
}

impl ColumnWriter {
    /// Name of the single column this writer produces
    pub fn column_name(&self) -> &str {
        self.schema.field(0).name()
    }

    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    /// Create (or truncate) `path` and write `values` into it
    pub fn write<P: AsRef<Path>>(&self, path: P, values: &[i64]) -> Result<()> {
        let path = path.as_ref();
        let file =
            File::create(path).write_context(format!("Failed to create {}", path.display()))?;
        self.write_to(file, values)
            .write_context(format!("Failed to write {}", path.display()))
    }

    /// Serialize `values` into any sink
    ///
    /// Values are appended in slice order; rows are split into row groups of
    /// at most the configured size, the last one holding the remainder.
    pub fn write_to<W: std::io::Write + Send>(&self, sink: W, values: &[i64]) -> Result<()> {
        let batch = self.build_batch(values)?;

        let mut writer = ArrowWriter::try_new(sink, self.schema.clone(), Some(self.props.clone()))
            .write_context("Failed to start parquet writer")?;
        if batch.num_rows() > 0 {
            writer.write(&batch).write_context("Failed to encode batch")?;
        }
        writer.close().write_context("Failed to finish file")?;

        log::debug!(
            "Wrote {} values to column '{}'",
            values.len(),
            self.column_name()
        );
        Ok(())
    }

    /// Build the typed array and wrap it in a one-column batch
    fn build_batch(&self, values: &[i64]) -> Result<RecordBatch> {
        let mut builder = Int64Builder::with_capacity(values.len());
        for &value in values {
            builder.append_value(value);
        }
        let array: ArrayRef = Arc::new(builder.finish());

        RecordBatch::try_new(self.schema.clone(), vec![array])
            .write_context("Failed to assemble record batch")
    }
}

/// Write `values` to `path` as a single Int64 column
pub fn write_column<P: AsRef<Path>, S: Into<String>>(
    path: P,
    values: &[i64],
    column_name: S,
    row_group_size: usize,
) -> Result<()> {
    ColumnWriterBuilder::new()
        .with_row_group_size(row_group_size)
        .build(column_name)?
        .write(path, values)
}
