use arrow_schema::DataType;

/// Logical type of a column, as far as this crate is concerned
///
/// The discriminants are the values reported by `pqcol_get_column_type`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum TypeTag {
    Int64 = 0,
    Int32 = 1,
    Unsupported = -1,
}

impl TypeTag {
    /// Map an Arrow data type onto the closed tag set
    pub fn from_arrow(data_type: &DataType) -> Self {
        match data_type {
            DataType::Int64 => TypeTag::Int64,
            DataType::Int32 => TypeTag::Int32,
            _ => TypeTag::Unsupported,
        }
    }

    pub const fn code(self) -> i32 {
        self as i32
    }

    pub fn is_supported(self) -> bool {
        !matches!(self, TypeTag::Unsupported)
    }
}

impl std::fmt::Display for TypeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeTag::Int64 => write!(f, "int64"),
            TypeTag::Int32 => write!(f, "int32"),
            TypeTag::Unsupported => write!(f, "unsupported"),
        }
    }
}

/// How a caller identifies a column
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ColumnSelector {
    /// Exact, case-sensitive match against a top-level field name
    Name(String),
    /// Ordinal position among the top-level fields
    Index(usize),
}

impl ColumnSelector {
    pub fn name<S: Into<String>>(name: S) -> Self {
        ColumnSelector::Name(name.into())
    }

    pub fn index(index: usize) -> Self {
        ColumnSelector::Index(index)
    }
}

impl From<&str> for ColumnSelector {
    fn from(value: &str) -> Self {
        ColumnSelector::Name(value.to_string())
    }
}

impl From<String> for ColumnSelector {
    fn from(value: String) -> Self {
        ColumnSelector::Name(value)
    }
}

impl From<usize> for ColumnSelector {
    fn from(value: usize) -> Self {
        ColumnSelector::Index(value)
    }
}

impl std::fmt::Display for ColumnSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnSelector::Name(name) => write!(f, "'{}'", name),
            ColumnSelector::Index(index) => write!(f, "#{}", index),
        }
    }
}

/// A column after resolution against a file schema
///
/// Fixed for the duration of one read; never re-resolved mid-stream.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedColumn {
    /// Position among the top-level Arrow fields
    pub index: usize,
    pub name: String,
    pub type_tag: TypeTag,
    pub data_type: DataType,
    /// Physical leaf column backing this field, if it is a single leaf
    pub leaf_index: Option<usize>,
    /// Total rows in the file, from footer metadata
    pub num_rows: i64,
}

impl ResolvedColumn {
    /// Fail with `UnsupportedType` unless the tag is readable
    pub fn ensure_supported(&self) -> crate::Result<TypeTag> {
        if self.type_tag.is_supported() {
            Ok(self.type_tag)
        } else {
            Err(crate::ColumnError::unsupported_type(
                self.name.clone(),
                &self.data_type,
            ))
        }
    }
}
