use std::ffi::{c_char, CStr};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::Path;

use pqcol_core::{ColumnError, Status};
use thiserror::Error;

use crate::logger;

/// Problems with raw arguments handed over the C boundary
#[derive(Error, Debug)]
pub enum ArgumentError {
    #[error("{0} pointer is null")]
    NullPointer(&'static str),
    #[error("{0} is not valid UTF-8: {1}")]
    Utf8(&'static str, std::str::Utf8Error),
    #[error("{0} must not be negative, got {1}")]
    Negative(&'static str, i64),
    #[error("{0} does not fit the return type: {1}")]
    Overflow(&'static str, usize),
}

impl From<ArgumentError> for ColumnError {
    fn from(err: ArgumentError) -> Self {
        ColumnError::invalid_argument(err.to_string())
    }
}

/// Borrow a NUL-terminated string argument
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string that outlives `'a`.
pub(crate) unsafe fn str_arg<'a>(
    ptr: *const c_char,
    what: &'static str,
) -> Result<&'a str, ArgumentError> {
    if ptr.is_null() {
        return Err(ArgumentError::NullPointer(what));
    }
    CStr::from_ptr(ptr)
        .to_str()
        .map_err(|e| ArgumentError::Utf8(what, e))
}

/// Borrow a NUL-terminated path argument
///
/// # Safety
/// Same contract as [`str_arg`].
pub(crate) unsafe fn path_arg<'a>(ptr: *const c_char) -> Result<&'a Path, ArgumentError> {
    str_arg(ptr, "path").map(Path::new)
}

/// Turn a signed length from the caller into `usize`
pub(crate) fn len_arg<T: Into<i64>>(value: T, what: &'static str) -> Result<usize, ArgumentError> {
    let value = value.into();
    usize::try_from(value).map_err(|_| ArgumentError::Negative(what, value))
}

/// Borrow a caller-owned output buffer of `len` elements
///
/// # Safety
/// When `len > 0`, `ptr` must be valid for writes of `len` `i64`s for `'a`
/// and not aliased elsewhere during the call.
pub(crate) unsafe fn buffer_mut<'a>(
    ptr: *mut i64,
    len: usize,
) -> Result<&'a mut [i64], ArgumentError> {
    if len == 0 {
        return Ok(&mut []);
    }
    if ptr.is_null() {
        return Err(ArgumentError::NullPointer("buffer"));
    }
    Ok(std::slice::from_raw_parts_mut(ptr, len))
}

/// Borrow a caller-owned input buffer of `len` elements
///
/// # Safety
/// When `len > 0`, `ptr` must be valid for reads of `len` `i64`s for `'a`.
pub(crate) unsafe fn buffer<'a>(ptr: *const i64, len: usize) -> Result<&'a [i64], ArgumentError> {
    if len == 0 {
        return Ok(&[]);
    }
    if ptr.is_null() {
        return Err(ArgumentError::NullPointer("buffer"));
    }
    Ok(std::slice::from_raw_parts(ptr, len))
}

/// Narrow a count for an `int32` return slot
pub(crate) fn to_i32(value: usize, what: &'static str) -> Result<i32, ArgumentError> {
    i32::try_from(value).map_err(|_| ArgumentError::Overflow(what, value))
}

/// Run one exported operation and translate its outcome into an integer
///
/// Errors become their [`Status`] code; a panic becomes `on_panic`.
pub(crate) fn guard<T, F>(operation: &'static str, on_panic: Status, f: F) -> T
where
    T: From<i32>,
    F: FnOnce() -> pqcol_core::Result<T>,
{
    logger::init();

    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(value)) => value,
        Ok(Err(err)) => {
            let status = err.status();
            log::warn!(
                "{} failed with status {} ({}): {}",
                operation,
                status.code(),
                status,
                err
            );
            T::from(status.code())
        }
        Err(_) => {
            log::error!("{} panicked; reporting status {}", operation, on_panic.code());
            T::from(on_panic.code())
        }
    }
}
