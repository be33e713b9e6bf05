//! Core column reading functionality
//!
//! Two read paths fill a caller-owned `i64` buffer:
//!
//! - [`read_column_from`] materializes the whole column through the Arrow
//!   record batch reader and copies the requested prefix out of it.
//! - [`BatchedColumnReader`] walks row groups in file order and pulls at most
//!   `batch_size` decoded values at a time from the typed column readers,
//!   appending them at a running cursor.
//!
//! Both paths resolve the column once, before any value is written, and
//! dispatch on its [`TypeTag`]. Int32 values are widened to `i64`.

use std::path::Path;

use arrow_array::types::{ArrowPrimitiveType, Int32Type, Int64Type};
use arrow_array::{Array, ArrayRef, PrimitiveArray};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ProjectionMask;
use parquet::column::reader::{ColumnReader, ColumnReaderImpl};
use parquet::data_type::DataType as PhysicalType;
use parquet::file::reader::{ChunkReader, FileReader, RowGroupReader, SerializedFileReader};

use crate::{ColumnError, ColumnFile, ColumnSelector, ResolvedColumn, Result, TypeTag};

/// Rows decoded per pull on the batched path
pub const DEFAULT_BATCH_SIZE: usize = 8192;

/// Read the first `count` values of a column into `out`
///
/// Opens the file, reads, and closes it again before returning. Returns the
/// number of values written.
pub fn read_column<P: AsRef<Path>>(
    path: P,
    selector: &ColumnSelector,
    out: &mut [i64],
    count: usize,
) -> Result<usize> {
    read_column_from(ColumnFile::open(path)?, selector, out, count)
}

/// Stream a whole column into `out`, one row group batch at a time
pub fn read_column_batched<P: AsRef<Path>>(
    path: P,
    selector: &ColumnSelector,
    out: &mut [i64],
) -> Result<usize> {
    BatchedColumnReader::new().read(ColumnFile::open(path)?, selector, out)
}

/// Whole-column read over an already opened file
///
/// The requested `count` is validated against both the buffer and the
/// column length before anything is written; reading past the end of the
/// column is an error, never zero-filled.
pub fn read_column_from<R>(
    file: ColumnFile<R>,
    selector: &ColumnSelector,
    out: &mut [i64],
    count: usize,
) -> Result<usize>
where
    R: ChunkReader + 'static,
{
    let column = file.resolve(selector)?;
    column.ensure_supported()?;

    if count > out.len() {
        return Err(ColumnError::invalid_argument(format!(
            "Requested {} values but the output buffer holds {}",
            count,
            out.len()
        )));
    }
    if count as i64 > column.num_rows {
        return Err(ColumnError::invalid_argument(format!(
            "Requested {} values but column '{}' has {} rows",
            count, column.name, column.num_rows
        )));
    }

    let chunks = materialize(file, &column)?;
    let available: usize = chunks.iter().map(|chunk| chunk.len()).sum();
    if available < count {
        return Err(ColumnError::data_validation(format!(
            "Column '{}' decoded {} values, fewer than the {} requested",
            column.name, available, count
        )));
    }

    let mut cursor = 0;
    for chunk in &chunks {
        if cursor == count {
            break;
        }
        let take = chunk.len().min(count - cursor);
        widen_chunk(&column, chunk.as_ref(), &mut out[cursor..cursor + take])?;
        cursor += take;
    }

    log::debug!("Read {} values from column '{}'", cursor, column.name);
    Ok(cursor)
}

/// Decode a single column fully, as the list of record batch chunks
fn materialize<R>(file: ColumnFile<R>, column: &ResolvedColumn) -> Result<Vec<ArrayRef>>
where
    R: ChunkReader + 'static,
{
    let (reader, metadata) = file.into_parts();
    let mask = ProjectionMask::roots(metadata.parquet_schema(), [column.index]);
    let batch_size = usize::try_from(column.num_rows).unwrap_or(0).max(1);

    let batches = ParquetRecordBatchReaderBuilder::new_with_metadata(reader, metadata)
        .with_projection(mask)
        .with_batch_size(batch_size)
        .build()?;

    let mut chunks = Vec::new();
    for batch in batches {
        let batch = batch?;
        chunks.push(batch.column(0).clone());
    }
    Ok(chunks)
}

/// Per-tag decode dispatch for materialized chunks
fn widen_chunk(column: &ResolvedColumn, array: &dyn Array, target: &mut [i64]) -> Result<()> {
    match column.type_tag {
        TypeTag::Int64 => widen_array::<Int64Type>(column, array, target),
        TypeTag::Int32 => widen_array::<Int32Type>(column, array, target),
        TypeTag::Unsupported => Err(ColumnError::unsupported_type(
            column.name.clone(),
            &column.data_type,
        )),
    }
}

/// Copy a decoded Arrow array into `target`, widening to `i64`
fn widen_array<T>(column: &ResolvedColumn, array: &dyn Array, target: &mut [i64]) -> Result<()>
where
    T: ArrowPrimitiveType,
    T::Native: Into<i64>,
{
    let array = array
        .as_any()
        .downcast_ref::<PrimitiveArray<T>>()
        .ok_or_else(|| {
            ColumnError::data_validation(format!(
                "Column '{}' decoded as {:?}, expected {:?}",
                column.name,
                array.data_type(),
                T::DATA_TYPE
            ))
        })?;

    if array.null_count() > 0 {
        return Err(null_values(column));
    }

    for (slot, value) in target.iter_mut().zip(array.values().iter()) {
        *slot = (*value).into();
    }
    Ok(())
}

fn null_values(column: &ResolvedColumn) -> ColumnError {
    ColumnError::data_validation(format!(
        "Column '{}' contains null values, which an i64 buffer cannot hold",
        column.name
    ))
}

/// Row-group streaming reader
///
/// Memory use is bounded by `batch_size` decoded values instead of the
/// whole column, at the cost of one decode call per batch per row group.
#[derive(Debug, Clone)]
pub struct BatchedColumnReader {
    batch_size: usize,
}

impl Default for BatchedColumnReader {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl BatchedColumnReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the number of rows decoded per pull (minimum 1)
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Stream the selected column of `file` into `out`
    ///
    /// Returns the final cursor position, which always equals the column's
    /// row count from the footer; any mismatch is reported as an error.
    pub fn read<R>(
        &self,
        file: ColumnFile<R>,
        selector: &ColumnSelector,
        out: &mut [i64],
    ) -> Result<usize>
    where
        R: ChunkReader + 'static,
    {
        let column = file.resolve(selector)?;
        column.ensure_supported()?;

        let leaf = column.leaf_index.ok_or_else(|| {
            ColumnError::unsupported_type(column.name.clone(), &column.data_type)
        })?;
        let total = usize::try_from(column.num_rows).map_err(|_| {
            ColumnError::data_validation(format!("Invalid row count {}", column.num_rows))
        })?;
        if out.len() < total {
            return Err(ColumnError::invalid_argument(format!(
                "Column '{}' has {} rows but the output buffer holds {}",
                column.name,
                total,
                out.len()
            )));
        }

        let (reader, _) = file.into_parts();
        let file_reader = SerializedFileReader::new(reader)?;
        let max_def_level = file_reader
            .metadata()
            .file_metadata()
            .schema_descr()
            .column(leaf)
            .max_def_level();

        let mut cursor = 0;
        for rg in 0..file_reader.num_row_groups() {
            let row_group = file_reader.get_row_group(rg)?;
            let expected = usize::try_from(row_group.metadata().num_rows()).unwrap_or(0);
            let start = cursor;
            log::debug!(
                "Reading row group {} of column '{}' ({} rows)",
                rg,
                column.name,
                expected
            );

            match row_group.get_column_reader(leaf)? {
                ColumnReader::Int64ColumnReader(typed) => {
                    self.drain(&column, typed, max_def_level, &mut out[..total], &mut cursor)?
                }
                ColumnReader::Int32ColumnReader(typed) => {
                    self.drain(&column, typed, max_def_level, &mut out[..total], &mut cursor)?
                }
                _ => {
                    return Err(ColumnError::unsupported_type(
                        column.name.clone(),
                        &column.data_type,
                    ))
                }
            }

            if cursor - start != expected {
                return Err(ColumnError::data_validation(format!(
                    "Row group {} of column '{}' yielded {} values, metadata says {}",
                    rg,
                    column.name,
                    cursor - start,
                    expected
                )));
            }
        }

        if cursor != total {
            return Err(ColumnError::data_validation(format!(
                "Column '{}' yielded {} values, metadata says {}",
                column.name, cursor, total
            )));
        }
        Ok(cursor)
    }

    /// Pull batches from one row group's typed reader until it is exhausted
    fn drain<T>(
        &self,
        column: &ResolvedColumn,
        mut reader: ColumnReaderImpl<T>,
        max_def_level: i16,
        out: &mut [i64],
        cursor: &mut usize,
    ) -> Result<()>
    where
        T: PhysicalType,
        T::T: Copy + Into<i64>,
    {
        let mut values: Vec<T::T> = Vec::with_capacity(self.batch_size);
        let mut def_levels: Vec<i16> = Vec::new();

        loop {
            values.clear();
            def_levels.clear();
            let levels = (max_def_level > 0).then_some(&mut def_levels);
            let (records, values_read, _) =
                reader.read_records(self.batch_size, levels, None, &mut values)?;
            if records == 0 {
                return Ok(());
            }
            if values_read != records {
                return Err(null_values(column));
            }

            let end = *cursor + values_read;
            let target = out.get_mut(*cursor..end).ok_or_else(|| {
                ColumnError::data_validation(format!(
                    "Column '{}' yielded more values than its row count",
                    column.name
                ))
            })?;
            for (slot, value) in target.iter_mut().zip(values.iter()) {
                *slot = (*value).into();
            }
            *cursor = end;
        }
    }
}
