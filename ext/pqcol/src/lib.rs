//! C ABI over `pqcol-core`
//!
//! Every exported function takes raw pointers from a foreign runtime, turns
//! them into borrowed slices and strings, runs one core operation and
//! returns a signed integer. Non-negative results are counts (or `0`);
//! negative results are [`Status`] codes. No panic and no error text ever
//! crosses the boundary.
//!
//! The matching C declarations live in `include/pqcol.h`.

mod logger;
mod reader;
mod utils;
mod writer;

use std::ffi::{c_char, CString};
use std::sync::OnceLock;

pub use logger::LogLevel;
pub use pqcol_core::{Status, TypeTag};
pub use reader::*;
pub use writer::*;

/// Version string of the underlying Parquet library
///
/// The returned pointer is static and must not be freed.
#[no_mangle]
pub extern "C" fn pqcol_get_version_info() -> *const c_char {
    static VERSION: OnceLock<CString> = OnceLock::new();
    VERSION
        .get_or_init(|| CString::new(pqcol_core::version_info()).unwrap_or_default())
        .as_ptr()
}
