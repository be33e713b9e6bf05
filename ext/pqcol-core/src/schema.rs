//! Opening files and resolving columns against their schema

use std::fs::File;
use std::path::Path;

use arrow_schema::SchemaRef;
use parquet::arrow::arrow_reader::{ArrowReaderMetadata, ArrowReaderOptions};
use parquet::file::metadata::ParquetMetaData;
use parquet::file::reader::ChunkReader;

use crate::{ColumnError, ColumnSelector, ErrorContext, ResolvedColumn, Result, TypeTag};

/// An opened Parquet source together with its decoded footer
///
/// The handle is owned by the operation that opened it and is dropped when
/// that operation returns; nothing here is shared between calls.
pub struct ColumnFile<R> {
    reader: R,
    metadata: ArrowReaderMetadata,
}

impl ColumnFile<File> {
    /// Open a file on disk and load its metadata
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("Opening parquet file {}", path.display());
        let file =
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        Self::new(file).with_context(|| format!("Failed to read metadata of {}", path.display()))
    }
}

impl<R> ColumnFile<R>
where
    R: ChunkReader + 'static,
{
    /// Wrap any chunk reader (a file, in-memory bytes, ...)
    pub fn new(reader: R) -> Result<Self> {
        let metadata = ArrowReaderMetadata::load(&reader, ArrowReaderOptions::new())?;
        Ok(Self { reader, metadata })
    }

    pub fn metadata(&self) -> &ParquetMetaData {
        self.metadata.metadata()
    }

    /// Arrow view of the file schema
    pub fn schema(&self) -> &SchemaRef {
        self.metadata.schema()
    }

    /// Total row count recorded in the footer
    pub fn num_rows(&self) -> i64 {
        self.metadata().file_metadata().num_rows()
    }

    pub fn num_row_groups(&self) -> usize {
        self.metadata().num_row_groups()
    }

    /// Row counts of each row group, in file order
    pub fn row_group_row_counts(&self) -> Vec<i64> {
        self.metadata()
            .row_groups()
            .iter()
            .map(|rg| rg.num_rows())
            .collect()
    }

    /// Names of the top-level fields, in schema order
    pub fn column_names(&self) -> Vec<String> {
        self.schema()
            .fields()
            .iter()
            .map(|field| field.name().to_string())
            .collect()
    }

    /// Resolve a column to its ordinal index and type tag
    ///
    /// A name or index that is not in the schema is an error; there is no
    /// fallback to the first column. Types outside the tag set resolve to
    /// [`TypeTag::Unsupported`] rather than failing here.
    pub fn resolve(&self, selector: &ColumnSelector) -> Result<ResolvedColumn> {
        let fields = self.schema().fields();
        let index = match selector {
            ColumnSelector::Name(name) => fields.iter().position(|field| field.name() == name),
            ColumnSelector::Index(index) => (*index < fields.len()).then_some(*index),
        }
        .ok_or_else(|| ColumnError::column_not_found(selector.to_string()))?;

        let field = &fields[index];
        let descr = self.metadata.parquet_schema();
        let mut leaves =
            (0..descr.num_columns()).filter(|&leaf| descr.get_column_root_idx(leaf) == index);
        let leaf_index = match (leaves.next(), leaves.next()) {
            (Some(leaf), None) => Some(leaf),
            _ => None,
        };

        let column = ResolvedColumn {
            index,
            name: field.name().to_string(),
            type_tag: TypeTag::from_arrow(field.data_type()),
            data_type: field.data_type().clone(),
            leaf_index,
            num_rows: self.num_rows(),
        };
        log::debug!(
            "Resolved column {} to index {} ({})",
            selector,
            column.index,
            column.type_tag
        );
        Ok(column)
    }

    pub(crate) fn into_parts(self) -> (R, ArrowReaderMetadata) {
        (self.reader, self.metadata)
    }
}

/// Total row count of the file at `path`
pub fn row_count<P: AsRef<Path>>(path: P) -> Result<i64> {
    Ok(ColumnFile::open(path)?.num_rows())
}

/// Per-row-group row counts of the file at `path`
pub fn row_group_row_counts<P: AsRef<Path>>(path: P) -> Result<Vec<i64>> {
    Ok(ColumnFile::open(path)?.row_group_row_counts())
}

/// Top-level column names of the file at `path`
pub fn column_names<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    Ok(ColumnFile::open(path)?.column_names())
}

/// Resolve a column of the file at `path`; the file is closed on return
pub fn resolve<P: AsRef<Path>>(path: P, selector: &ColumnSelector) -> Result<ResolvedColumn> {
    ColumnFile::open(path)?.resolve(selector)
}

/// Type tag of a column without reading any values
pub fn column_type<P: AsRef<Path>>(path: P, selector: &ColumnSelector) -> Result<TypeTag> {
    Ok(resolve(path, selector)?.type_tag)
}
