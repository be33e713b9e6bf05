use thiserror::Error;

use crate::status::Status;

/// Core error type for column operations
#[derive(Error, Debug)]
pub enum ColumnError {
    /// IO errors from opening or reading files
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Arrow errors from building or decoding arrays
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow_schema::ArrowError),

    /// Parquet format errors (bad footer, truncated pages, ...)
    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    /// The requested column is not part of the file schema
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// The column exists but its type has no [`crate::TypeTag`] mapping
    #[error("Unsupported type for column '{column}': {data_type}")]
    UnsupportedType { column: String, data_type: String },

    /// Decoded data cannot be represented in the output buffer
    #[error("Data validation error: {0}")]
    DataValidation(String),

    /// Invalid argument errors
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Any failure while producing an output file
    #[error("Write error: {0}")]
    Write(String),

    /// An error wrapped with a description of what was being done
    #[error("{context}: {source}")]
    Context {
        context: String,
        source: Box<ColumnError>,
    },
}

/// Result type alias for column operations
pub type Result<T> = std::result::Result<T, ColumnError>;

impl ColumnError {
    /// Create a new column-not-found error
    pub fn column_not_found<S: Into<String>>(column: S) -> Self {
        ColumnError::ColumnNotFound(column.into())
    }

    /// Create a new unsupported type error
    pub fn unsupported_type<S: Into<String>, T: std::fmt::Debug>(column: S, data_type: T) -> Self {
        ColumnError::UnsupportedType {
            column: column.into(),
            data_type: format!("{:?}", data_type),
        }
    }

    /// Create a new data validation error
    pub fn data_validation<S: Into<String>>(msg: S) -> Self {
        ColumnError::DataValidation(msg.into())
    }

    /// Create a new invalid argument error
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        ColumnError::InvalidArgument(msg.into())
    }

    /// Create a new write error
    pub fn write<S: Into<String>>(msg: S) -> Self {
        ColumnError::Write(msg.into())
    }

    /// Status code this error is reported as at the C boundary
    pub fn status(&self) -> Status {
        match self {
            ColumnError::UnsupportedType { .. } => Status::UnsupportedType,
            ColumnError::ColumnNotFound(_) => Status::ColumnNotFound,
            ColumnError::Write(_) => Status::FileWrite,
            ColumnError::Context { source, .. } => source.status(),
            ColumnError::Io(_)
            | ColumnError::Arrow(_)
            | ColumnError::Parquet(_)
            | ColumnError::DataValidation(_)
            | ColumnError::InvalidArgument(_) => Status::FileRead,
        }
    }
}

/// Extension trait to add context to errors
pub trait ErrorContext<T> {
    /// Add context to an error, keeping its status classification
    fn context<S: Into<String>>(self, ctx: S) -> Result<T>;

    /// Add context with a closure that's only called on error
    fn with_context<S: Into<String>, F: FnOnce() -> S>(self, f: F) -> Result<T>;

    /// Reclassify any failure as a write failure
    fn write_context<S: Into<String>>(self, ctx: S) -> Result<T>;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: Into<ColumnError>,
{
    fn context<S: Into<String>>(self, ctx: S) -> Result<T> {
        self.map_err(|e| ColumnError::Context {
            context: ctx.into(),
            source: Box::new(e.into()),
        })
    }

    fn with_context<S: Into<String>, F: FnOnce() -> S>(self, f: F) -> Result<T> {
        self.map_err(|e| ColumnError::Context {
            context: f().into(),
            source: Box::new(e.into()),
        })
    }

    fn write_context<S: Into<String>>(self, ctx: S) -> Result<T> {
        self.map_err(|e| match e.into() {
            err @ ColumnError::Write(_) => err,
            err => ColumnError::Write(format!("{}: {}", ctx.into(), err)),
        })
    }
}
