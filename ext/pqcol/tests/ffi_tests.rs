use pqcol::*;
use std::ffi::CStr;
use tempfile::tempdir;

use test_helpers::*;

const OK: i32 = 0;
const UNSUPPORTED: i32 = -1;
const FILE_READ: i32 = -2;
const COLUMN_NOT_FOUND: i32 = -3;
const FILE_WRITE: i32 = -4;

#[test]
fn test_status_constants_match_core() {
    assert_eq!(Status::Ok.code(), OK);
    assert_eq!(Status::UnsupportedType.code(), UNSUPPORTED);
    assert_eq!(Status::FileRead.code(), FILE_READ);
    assert_eq!(Status::ColumnNotFound.code(), COLUMN_NOT_FOUND);
    assert_eq!(Status::FileWrite.code(), FILE_WRITE);
}

// =============================================================================
// Write, then read back
// =============================================================================

#[test]
fn test_write_then_read_scenario() {
    let dir = tempdir().unwrap();
    let path = c_path(&dir.path().join("vals.parquet"));
    let column = c_str("vals");
    let values = [10i64, 20, 30];

    let status =
        unsafe { pqcol_write_column(path.as_ptr(), values.as_ptr(), column.as_ptr(), 3, 2) };
    assert_eq!(status, OK);

    assert_eq!(unsafe { pqcol_get_row_count(path.as_ptr()) }, 3);
    assert_eq!(unsafe { pqcol_get_row_group_count(path.as_ptr()) }, 2);
    assert_eq!(
        unsafe { pqcol_get_column_type(path.as_ptr(), column.as_ptr()) },
        TypeTag::Int64.code()
    );

    let mut out = [0i64; 3];
    let read = unsafe { pqcol_read_column(path.as_ptr(), column.as_ptr(), out.as_mut_ptr(), 3) };
    assert_eq!(read, 3);
    assert_eq!(out, [10, 20, 30]);

    let mut batched = [0i64; 3];
    let read = unsafe {
        pqcol_read_column_batched(path.as_ptr(), column.as_ptr(), batched.as_mut_ptr(), 3)
    };
    assert_eq!(read, 3);
    assert_eq!(batched, out);
}

#[test]
fn test_read_by_index() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mixed.parquet");
    write_mixed_file(&path);
    let path = c_path(&path);

    let mut out = [0i64; 3];
    let read = unsafe { pqcol_read_column_at(path.as_ptr(), 1, out.as_mut_ptr(), 3) };
    assert_eq!(read, 3);
    assert_eq!(out, [-1, -2, -3]);

    let read = unsafe { pqcol_read_column_at(path.as_ptr(), 9, out.as_mut_ptr(), 3) };
    assert_eq!(read, COLUMN_NOT_FOUND);
}

// =============================================================================
// Schema inspection
// =============================================================================

#[test]
fn test_column_listing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mixed.parquet");
    write_mixed_file(&path);
    let path = c_path(&path);

    assert_eq!(unsafe { pqcol_get_column_count(path.as_ptr()) }, 3);

    let mut name = [0 as std::ffi::c_char; 16];
    let len = unsafe { pqcol_get_column_name(path.as_ptr(), 1, name.as_mut_ptr(), 16) };
    assert_eq!(len, 5);
    let value = unsafe { CStr::from_ptr(name.as_ptr()) };
    assert_eq!(value.to_str().unwrap(), "small");

    let mut tiny = [0 as std::ffi::c_char; 3];
    let len = unsafe { pqcol_get_column_name(path.as_ptr(), 1, tiny.as_mut_ptr(), 3) };
    assert_eq!(len, FILE_READ);

    let len = unsafe { pqcol_get_column_name(path.as_ptr(), 3, name.as_mut_ptr(), 16) };
    assert_eq!(len, COLUMN_NOT_FOUND);
}

#[test]
fn test_column_types() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mixed.parquet");
    write_mixed_file(&path);
    let path = c_path(&path);

    let cases = [
        ("id", 0),
        ("small", 1),
        ("ratio", UNSUPPORTED),
        ("absent", COLUMN_NOT_FOUND),
    ];
    for (name, expected) in cases {
        let column = c_str(name);
        let tag = unsafe { pqcol_get_column_type(path.as_ptr(), column.as_ptr()) };
        assert_eq!(tag, expected, "column {}", name);
    }
}

// =============================================================================
// Failure codes
// =============================================================================

#[test]
fn test_unsupported_read_leaves_buffer() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mixed.parquet");
    write_mixed_file(&path);
    let path = c_path(&path);
    let column = c_str("ratio");

    let mut out = [7i64; 3];
    let status = unsafe { pqcol_read_column(path.as_ptr(), column.as_ptr(), out.as_mut_ptr(), 3) };
    assert_eq!(status, UNSUPPORTED);
    assert_eq!(out, [7, 7, 7]);

    let status = unsafe {
        pqcol_read_column_batched(path.as_ptr(), column.as_ptr(), out.as_mut_ptr(), 3)
    };
    assert_eq!(status, UNSUPPORTED as i64);
    assert_eq!(out, [7, 7, 7]);
}

#[test]
fn test_missing_column_writes_nothing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mixed.parquet");
    write_mixed_file(&path);
    let path = c_path(&path);
    let column = c_str("wrong-dset-name");

    let mut out = [5i64; 3];
    let status = unsafe { pqcol_read_column(path.as_ptr(), column.as_ptr(), out.as_mut_ptr(), 3) };
    assert_eq!(status, COLUMN_NOT_FOUND);
    assert_eq!(out, [5, 5, 5]);
}

#[test]
fn test_nonexistent_path_for_every_read() {
    let dir = tempdir().unwrap();
    let path = c_path(&dir.path().join("nothing-here.parquet"));
    let column = c_str("vals");
    let mut out = [0i64; 4];
    let mut name = [0 as std::ffi::c_char; 8];

    unsafe {
        assert_eq!(pqcol_get_row_count(path.as_ptr()), FILE_READ as i64);
        assert_eq!(pqcol_get_row_group_count(path.as_ptr()), FILE_READ);
        assert_eq!(pqcol_get_column_count(path.as_ptr()), FILE_READ);
        assert_eq!(pqcol_get_column_name(path.as_ptr(), 0, name.as_mut_ptr(), 8), FILE_READ);
        assert_eq!(pqcol_get_column_type(path.as_ptr(), column.as_ptr()), FILE_READ);
        assert_eq!(
            pqcol_read_column(path.as_ptr(), column.as_ptr(), out.as_mut_ptr(), 4),
            FILE_READ
        );
        assert_eq!(pqcol_read_column_at(path.as_ptr(), 0, out.as_mut_ptr(), 4), FILE_READ);
        assert_eq!(
            pqcol_read_column_batched(path.as_ptr(), column.as_ptr(), out.as_mut_ptr(), 4),
            FILE_READ as i64
        );
    }
}

#[test]
fn test_unwritable_path() {
    let dir = tempdir().unwrap();
    let path = c_path(&dir.path().join("missing").join("out.parquet"));
    let column = c_str("vals");
    let values = [1i64, 2, 3];

    let status =
        unsafe { pqcol_write_column(path.as_ptr(), values.as_ptr(), column.as_ptr(), 3, 2) };
    assert_eq!(status, FILE_WRITE);
}

#[test]
fn test_bad_arguments() {
    let dir = tempdir().unwrap();
    let path = c_path(&dir.path().join("args.parquet"));
    let column = c_str("vals");
    let values = [1i64, 2, 3];
    let mut out = [0i64; 3];

    unsafe {
        // Write side reports every bad argument as a write error
        assert_eq!(
            pqcol_write_column(path.as_ptr(), values.as_ptr(), column.as_ptr(), 3, 0),
            FILE_WRITE
        );
        assert_eq!(
            pqcol_write_column(path.as_ptr(), values.as_ptr(), column.as_ptr(), -1, 2),
            FILE_WRITE
        );
        assert_eq!(
            pqcol_write_column(path.as_ptr(), std::ptr::null(), column.as_ptr(), 3, 2),
            FILE_WRITE
        );
        assert_eq!(
            pqcol_write_column(std::ptr::null(), values.as_ptr(), column.as_ptr(), 3, 2),
            FILE_WRITE
        );

        assert_eq!(pqcol_write_column(path.as_ptr(), values.as_ptr(), column.as_ptr(), 3, 2), OK);

        // Read side reports them as read errors
        assert_eq!(pqcol_get_row_count(std::ptr::null()), FILE_READ as i64);
        assert_eq!(
            pqcol_read_column(path.as_ptr(), column.as_ptr(), out.as_mut_ptr(), -3),
            FILE_READ
        );
        assert_eq!(
            pqcol_read_column(path.as_ptr(), column.as_ptr(), std::ptr::null_mut(), 3),
            FILE_READ
        );
        assert_eq!(
            pqcol_read_column(path.as_ptr(), column.as_ptr(), out.as_mut_ptr(), 4),
            FILE_READ
        );
        assert_eq!(
            pqcol_read_column_batched(path.as_ptr(), column.as_ptr(), out.as_mut_ptr(), 2),
            FILE_READ as i64
        );
    }
}

#[test]
fn test_empty_write() {
    let dir = tempdir().unwrap();
    let path = c_path(&dir.path().join("empty.parquet"));
    let column = c_str("vals");

    let status =
        unsafe { pqcol_write_column(path.as_ptr(), std::ptr::null(), column.as_ptr(), 0, 8) };
    assert_eq!(status, OK);
    assert_eq!(unsafe { pqcol_get_row_count(path.as_ptr()) }, 0);
}

#[test]
fn test_version_info() {
    let version = unsafe { CStr::from_ptr(pqcol_get_version_info()) };
    assert!(version.to_str().unwrap().starts_with("parquet-rs version"));
    assert_eq!(pqcol_get_version_info(), pqcol_get_version_info());
}
