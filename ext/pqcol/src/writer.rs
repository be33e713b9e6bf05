//! Exported write-side functions

use std::ffi::c_char;
use std::path::Path;

use pqcol_core::{writer, ErrorContext, Status};

use crate::utils::{buffer, guard, len_arg, path_arg, str_arg, ArgumentError};

/// Arguments of one write call, validated and borrowed
struct WriteArgs<'a> {
    path: &'a Path,
    values: &'a [i64],
    column: &'a str,
    row_group_size: usize,
}

impl<'a> WriteArgs<'a> {
    /// # Safety
    /// Same contract as [`pqcol_write_column`].
    unsafe fn parse(
        path: *const c_char,
        values: *const i64,
        column: *const c_char,
        count: i32,
        row_group_size: i32,
    ) -> Result<Self, ArgumentError> {
        let count = len_arg(count, "count")?;
        Ok(Self {
            path: path_arg(path)?,
            values: buffer(values, count)?,
            column: str_arg(column, "column")?,
            row_group_size: len_arg(row_group_size, "row group size")?,
        })
    }
}

/// Write `count` values as a single non-nullable Int64 column named
/// `column`, splitting rows into groups of at most `row_group_size`
///
/// Returns `0` or a negative status; every failure, including bad
/// arguments, is reported as the write error `-4`.
///
/// # Safety
/// `path` and `column` must be valid NUL-terminated strings and `values`
/// must be valid for reads of `count` `int64_t`s.
#[no_mangle]
pub unsafe extern "C" fn pqcol_write_column(
    path: *const c_char,
    values: *const i64,
    column: *const c_char,
    count: i32,
    row_group_size: i32,
) -> i32 {
    guard("pqcol_write_column", Status::FileWrite, || {
        let args = unsafe { WriteArgs::parse(path, values, column, count, row_group_size) }
            .write_context("Invalid write arguments")?;

        writer::write_column(args.path, args.values, args.column, args.row_group_size)
            .write_context(format!("Writing column '{}'", args.column))?;
        Ok(Status::Ok.code())
    })
}
