//! Integer status vocabulary shared with foreign callers
//!
//! Non-negative values mean success (and carry a count where the operation
//! returns one). Negative values are the fixed failure codes below and must
//! stay stable.

/// Fixed status codes returned across the C boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Status {
    Ok = 0,
    /// A column type outside the supported set was encountered
    UnsupportedType = -1,
    /// The file is missing, corrupt or could not be read
    FileRead = -2,
    /// The named column is not in the file schema
    ColumnNotFound = -3,
    /// The output file could not be created or written
    FileWrite = -4,
}

impl Status {
    /// The raw integer handed to callers
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Map a raw code back to a status. Non-negative codes are all `Ok`.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            c if c >= 0 => Some(Status::Ok),
            -1 => Some(Status::UnsupportedType),
            -2 => Some(Status::FileRead),
            -3 => Some(Status::ColumnNotFound),
            -4 => Some(Status::FileWrite),
            _ => None,
        }
    }

    pub fn is_ok(self) -> bool {
        self == Status::Ok
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Ok => write!(f, "ok"),
            Status::UnsupportedType => write!(f, "unsupported type"),
            Status::FileRead => write!(f, "file open/read error"),
            Status::ColumnNotFound => write!(f, "column not found"),
            Status::FileWrite => write!(f, "file write error"),
        }
    }
}
