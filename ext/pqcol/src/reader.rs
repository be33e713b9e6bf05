//! Exported read-side functions

use std::ffi::c_char;

use pqcol_core::{reader, schema, ColumnError, ColumnFile, ColumnSelector, Status};

use crate::utils::{buffer_mut, guard, len_arg, path_arg, str_arg, to_i32};

/// Total number of rows in the file, or a negative status
///
/// # Safety
/// `path` must be a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn pqcol_get_row_count(path: *const c_char) -> i64 {
    guard("pqcol_get_row_count", Status::FileRead, || {
        let path = unsafe { path_arg(path) }?;
        schema::row_count(path)
    })
}

/// Number of row groups in the file, or a negative status
///
/// # Safety
/// `path` must be a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn pqcol_get_row_group_count(path: *const c_char) -> i32 {
    guard("pqcol_get_row_group_count", Status::FileRead, || {
        let path = unsafe { path_arg(path) }?;
        let file = ColumnFile::open(path)?;
        Ok(to_i32(file.num_row_groups(), "row group count")?)
    })
}

/// Number of top-level columns in the file, or a negative status
///
/// # Safety
/// `path` must be a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn pqcol_get_column_count(path: *const c_char) -> i32 {
    guard("pqcol_get_column_count", Status::FileRead, || {
        let path = unsafe { path_arg(path) }?;
        let names = schema::column_names(path)?;
        Ok(to_i32(names.len(), "column count")?)
    })
}

/// Copy the name of column `index` into `out` as a NUL-terminated string
///
/// Returns the name's length in bytes (without the terminator), `-3` when
/// the index is out of range, and `-2` when `out` cannot hold the name.
///
/// # Safety
/// `path` must be a valid NUL-terminated string and `out` must be valid for
/// writes of `capacity` bytes.
#[no_mangle]
pub unsafe extern "C" fn pqcol_get_column_name(
    path: *const c_char,
    index: i32,
    out: *mut c_char,
    capacity: i32,
) -> i32 {
    guard("pqcol_get_column_name", Status::FileRead, || {
        let path = unsafe { path_arg(path) }?;
        let index = len_arg(index, "index")?;
        let capacity = len_arg(capacity, "capacity")?;

        let names = schema::column_names(path)?;
        let name = names.get(index).ok_or_else(|| {
            ColumnError::column_not_found(ColumnSelector::index(index).to_string())
        })?;

        let bytes = name.as_bytes();
        if out.is_null() || bytes.len() + 1 > capacity {
            return Err(ColumnError::invalid_argument(format!(
                "Name buffer of {} bytes cannot hold '{}'",
                capacity, name
            )));
        }
        let target = unsafe { std::slice::from_raw_parts_mut(out as *mut u8, capacity) };
        target[..bytes.len()].copy_from_slice(bytes);
        target[bytes.len()] = 0;

        Ok(to_i32(bytes.len(), "name length")?)
    })
}

/// Type tag of a column: `0` Int64, `1` Int32, `-1` unsupported, or a
/// negative status
///
/// # Safety
/// `path` and `column` must be valid NUL-terminated strings.
#[no_mangle]
pub unsafe extern "C" fn pqcol_get_column_type(
    path: *const c_char,
    column: *const c_char,
) -> i32 {
    guard("pqcol_get_column_type", Status::FileRead, || {
        let path = unsafe { path_arg(path) }?;
        let column = unsafe { str_arg(column, "column") }?;
        let tag = schema::column_type(path, &ColumnSelector::name(column))?;
        Ok(tag.code())
    })
}

/// Read the first `count` values of the named column into `out`
///
/// Returns the number of values written or a negative status. On failure
/// before decoding (missing column, unsupported type) `out` is untouched.
///
/// # Safety
/// `path` and `column` must be valid NUL-terminated strings and `out` must
/// be valid for writes of `count` `int64_t`s.
#[no_mangle]
pub unsafe extern "C" fn pqcol_read_column(
    path: *const c_char,
    column: *const c_char,
    out: *mut i64,
    count: i32,
) -> i32 {
    guard("pqcol_read_column", Status::FileRead, || {
        let path = unsafe { path_arg(path) }?;
        let column = unsafe { str_arg(column, "column") }?;
        let count = len_arg(count, "count")?;
        let out = unsafe { buffer_mut(out, count) }?;

        let read = reader::read_column(path, &ColumnSelector::name(column), out, count)?;
        Ok(to_i32(read, "values read")?)
    })
}

/// Same as [`pqcol_read_column`], selecting the column by ordinal index
///
/// # Safety
/// `path` must be a valid NUL-terminated string and `out` must be valid for
/// writes of `count` `int64_t`s.
#[no_mangle]
pub unsafe extern "C" fn pqcol_read_column_at(
    path: *const c_char,
    index: i32,
    out: *mut i64,
    count: i32,
) -> i32 {
    guard("pqcol_read_column_at", Status::FileRead, || {
        let path = unsafe { path_arg(path) }?;
        let index = len_arg(index, "index")?;
        let count = len_arg(count, "count")?;
        let out = unsafe { buffer_mut(out, count) }?;

        let read = reader::read_column(path, &ColumnSelector::index(index), out, count)?;
        Ok(to_i32(read, "values read")?)
    })
}

/// Stream the whole named column into `out`, row group by row group
///
/// `capacity` is the number of `int64_t` slots behind `out`; it must be at
/// least the file's row count. Returns the number of values written or a
/// negative status. A failure after some row groups were decoded may leave
/// `out` partially filled, but is always reported as a failure.
///
/// # Safety
/// `path` and `column` must be valid NUL-terminated strings and `out` must
/// be valid for writes of `capacity` `int64_t`s.
#[no_mangle]
pub unsafe extern "C" fn pqcol_read_column_batched(
    path: *const c_char,
    column: *const c_char,
    out: *mut i64,
    capacity: i64,
) -> i64 {
    guard("pqcol_read_column_batched", Status::FileRead, || {
        let path = unsafe { path_arg(path) }?;
        let column = unsafe { str_arg(column, "column") }?;
        let capacity = len_arg(capacity, "capacity")?;
        let out = unsafe { buffer_mut(out, capacity) }?;

        let read = reader::read_column_batched(path, &ColumnSelector::name(column), out)?;
        i64::try_from(read)
            .map_err(|_| ColumnError::invalid_argument(format!("{} values overflow", read)))
    })
}
