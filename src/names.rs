//! Name lookups and version information provided by the native library

use crate::config::{Config, Modifier, Orientation};
use crate::error::{Error, Result};
use crate::ffi;
use libc::{c_char, c_uint};
use std::ffi::CStr;
use std::fmt;
use tracing::debug;

/// Version of the linked ZBar library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Query the version of the linked library.
pub fn version() -> Result<Version> {
    let (mut major, mut minor, mut patch): (c_uint, c_uint, c_uint) = (0, 0, 0);
    let status = unsafe { ffi::zbar_version(&mut major, &mut minor, &mut patch) };
    if status != 0 {
        return Err(Error::Native(status));
    }
    Ok(Version {
        major,
        minor,
        patch,
    })
}

/// Library name for a symbology type code, e.g. `"EAN-13"`.
///
/// Add-on bits are ignored. Unknown codes give the library's `"UNKNOWN"`.
pub fn symbol_name(code: i32) -> &'static str {
    unsafe { static_str(ffi::zbar_get_symbol_name(code)) }
}

/// Library name for the add-on bits of a type code (`"+2"`, `"+5"`), or `""`.
pub fn addon_name(code: i32) -> &'static str {
    unsafe { static_str(ffi::zbar_get_addon_name(code)) }
}

pub fn config_name(config: Config) -> &'static str {
    unsafe { static_str(ffi::zbar_get_config_name(config.as_raw())) }
}

pub fn modifier_name(modifier: Modifier) -> &'static str {
    unsafe { static_str(ffi::zbar_get_modifier_name(modifier.as_raw())) }
}

pub fn orientation_name(orientation: Orientation) -> &'static str {
    unsafe { static_str(ffi::zbar_get_orientation_name(orientation.as_raw())) }
}

/// Borrow one of the library's static name strings.
///
/// # Safety
///
/// `ptr` must be null or point to a NUL-terminated string that is never freed.
unsafe fn static_str(ptr: *const c_char) -> &'static str {
    if ptr.is_null() {
        debug!("native name lookup returned null");
        return "";
    }
    CStr::from_ptr(ptr).to_str().unwrap_or_default()
}
