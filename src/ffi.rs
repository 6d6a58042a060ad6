//! FFI bindings to the C ZBar library
//!
//! Only the symbol and symbol-set entry points are declared here. Images,
//! scanners and processors stay on the caller's side of the boundary; this
//! crate starts from a result set the caller already obtained.

use libc::{c_char, c_int, c_uint};
use std::marker::{PhantomData, PhantomPinned};

/// Opaque decoded symbol owned by libzbar.
#[repr(C)]
#[allow(non_camel_case_types)]
pub struct zbar_symbol_t {
    _data: [u8; 0],
    _marker: PhantomData<(*mut u8, PhantomPinned)>,
}

/// Opaque, reference counted container of decoded symbols.
#[repr(C)]
#[allow(non_camel_case_types)]
pub struct zbar_symbol_set_t {
    _data: [u8; 0],
    _marker: PhantomData<(*mut u8, PhantomPinned)>,
}

#[allow(non_camel_case_types)]
pub type zbar_symbol_type_t = c_int;
#[allow(non_camel_case_types)]
pub type zbar_orientation_t = c_int;
#[allow(non_camel_case_types)]
pub type zbar_config_t = c_int;
#[allow(non_camel_case_types)]
pub type zbar_modifier_t = c_int;

/// Mask for the base symbology bits of a type code.
pub const ZBAR_SYMBOL: c_int = 0x00ff;
/// 2-digit add-on flag.
pub const ZBAR_ADDON2: c_int = 0x0200;
/// 5-digit add-on flag.
pub const ZBAR_ADDON5: c_int = 0x0500;
/// Add-on flag mask.
pub const ZBAR_ADDON: c_int = 0x0700;

#[cfg_attr(not(test), link(name = "zbar"))]
extern "C" {
    pub fn zbar_version(major: *mut c_uint, minor: *mut c_uint, patch: *mut c_uint) -> c_int;

    pub fn zbar_get_symbol_name(sym: zbar_symbol_type_t) -> *const c_char;
    pub fn zbar_get_addon_name(sym: zbar_symbol_type_t) -> *const c_char;
    pub fn zbar_get_config_name(config: zbar_config_t) -> *const c_char;
    pub fn zbar_get_modifier_name(modifier: zbar_modifier_t) -> *const c_char;
    pub fn zbar_get_orientation_name(orientation: zbar_orientation_t) -> *const c_char;

    pub fn zbar_symbol_get_type(symbol: *const zbar_symbol_t) -> zbar_symbol_type_t;
    pub fn zbar_symbol_get_configs(symbol: *const zbar_symbol_t) -> c_uint;
    pub fn zbar_symbol_get_modifiers(symbol: *const zbar_symbol_t) -> c_uint;
    pub fn zbar_symbol_get_data(symbol: *const zbar_symbol_t) -> *const c_char;
    pub fn zbar_symbol_get_data_length(symbol: *const zbar_symbol_t) -> c_uint;
    pub fn zbar_symbol_get_quality(symbol: *const zbar_symbol_t) -> c_int;
    pub fn zbar_symbol_get_count(symbol: *const zbar_symbol_t) -> c_int;
    pub fn zbar_symbol_get_loc_size(symbol: *const zbar_symbol_t) -> c_uint;
    pub fn zbar_symbol_get_loc_x(symbol: *const zbar_symbol_t, index: c_uint) -> c_int;
    pub fn zbar_symbol_get_loc_y(symbol: *const zbar_symbol_t, index: c_uint) -> c_int;
    pub fn zbar_symbol_get_orientation(symbol: *const zbar_symbol_t) -> zbar_orientation_t;
    pub fn zbar_symbol_next(symbol: *const zbar_symbol_t) -> *const zbar_symbol_t;
    pub fn zbar_symbol_get_components(symbol: *const zbar_symbol_t) -> *const zbar_symbol_set_t;
    pub fn zbar_symbol_first_component(symbol: *const zbar_symbol_t) -> *const zbar_symbol_t;
    pub fn zbar_symbol_xml(
        symbol: *const zbar_symbol_t,
        buffer: *mut *mut c_char,
        buflen: *mut c_uint,
    ) -> *mut c_char;

    pub fn zbar_symbol_set_ref(symbols: *const zbar_symbol_set_t, refs: c_int);
    pub fn zbar_symbol_set_get_size(symbols: *const zbar_symbol_set_t) -> c_int;
    pub fn zbar_symbol_set_first_symbol(symbols: *const zbar_symbol_set_t)
        -> *const zbar_symbol_t;
    pub fn zbar_symbol_set_first_unfiltered(
        symbols: *const zbar_symbol_set_t,
    ) -> *const zbar_symbol_t;
}
