//! In-process stand-in for the libzbar symbol ABI
//!
//! Unit tests are built without linking libzbar. The `zbar_*` entry points
//! declared in `ffi` resolve to the `#[no_mangle]` definitions below, which
//! read Rust-built symbol chains. Names and sentinels follow libzbar 0.23.

use crate::ffi::{self, zbar_symbol_set_t, zbar_symbol_t, ZBAR_ADDON, ZBAR_ADDON2, ZBAR_ADDON5};
use crate::symbol::SymbolType;
use crate::symbol_set::ScanResult;
use libc::{c_char, c_int, c_uint};
use std::cell::Cell;
use std::ffi::CStr;
use std::ptr;

/// Description of one symbol to place in a mock chain.
#[derive(Debug, Clone, Default)]
pub(crate) struct SymbolSpec {
    type_code: i32,
    configs: u32,
    modifiers: u32,
    data: Option<Vec<u8>>,
    quality: i32,
    count: i32,
    points: Vec<[i32; 2]>,
    orientation: i32,
    components: Option<Vec<SymbolSpec>>,
}

impl SymbolSpec {
    pub(crate) fn new(symbol_type: SymbolType) -> Self {
        SymbolSpec {
            type_code: symbol_type.into(),
            orientation: -1,
            ..Default::default()
        }
    }

    pub(crate) fn type_code(mut self, code: i32) -> Self {
        self.type_code = code;
        self
    }

    pub(crate) fn data(self, text: &str) -> Self {
        self.bytes(text.as_bytes())
    }

    pub(crate) fn bytes(mut self, bytes: &[u8]) -> Self {
        self.data = Some(bytes.to_vec());
        self
    }

    pub(crate) fn quality(mut self, quality: i32) -> Self {
        self.quality = quality;
        self
    }

    pub(crate) fn count(mut self, count: i32) -> Self {
        self.count = count;
        self
    }

    pub(crate) fn configs(mut self, bits: u32) -> Self {
        self.configs = bits;
        self
    }

    pub(crate) fn modifiers(mut self, bits: u32) -> Self {
        self.modifiers = bits;
        self
    }

    pub(crate) fn orientation(mut self, orientation: i32) -> Self {
        self.orientation = orientation;
        self
    }

    pub(crate) fn points(mut self, points: &[[i32; 2]]) -> Self {
        self.points = points.to_vec();
        self
    }

    pub(crate) fn components(mut self, components: Vec<SymbolSpec>) -> Self {
        self.components = Some(components);
        self
    }
}

struct MockSymbol {
    type_code: i32,
    configs: u32,
    modifiers: u32,
    /// NUL-terminated copy of the payload.
    data: Option<Vec<u8>>,
    quality: i32,
    count: i32,
    points: Vec<[i32; 2]>,
    orientation: i32,
    components: Option<Box<MockSetData>>,
    next: *const MockSymbol,
}

struct MockSetData {
    refs: Cell<i32>,
    filtered: usize,
    symbols: Vec<Box<MockSymbol>>,
}

impl MockSetData {
    fn build(specs: Vec<SymbolSpec>) -> Box<Self> {
        let mut symbols: Vec<Box<MockSymbol>> = specs
            .into_iter()
            .map(|spec| {
                Box::new(MockSymbol {
                    type_code: spec.type_code,
                    configs: spec.configs,
                    modifiers: spec.modifiers,
                    data: spec.data.map(|mut bytes| {
                        bytes.push(0);
                        bytes
                    }),
                    quality: spec.quality,
                    count: spec.count,
                    points: spec.points,
                    orientation: spec.orientation,
                    components: spec.components.map(MockSetData::build),
                    next: ptr::null(),
                })
            })
            .collect();
        for i in 1..symbols.len() {
            let next: *const MockSymbol = &*symbols[i];
            symbols[i - 1].next = next;
        }
        Box::new(MockSetData {
            refs: Cell::new(1),
            filtered: 0,
            symbols,
        })
    }

    fn as_raw(&self) -> *const zbar_symbol_set_t {
        (self as *const MockSetData).cast()
    }
}

/// A symbol set owned by the test, standing in for one held by the library.
///
/// Starts with one reference, the library's own.
pub(crate) struct MockSet {
    inner: Box<MockSetData>,
}

impl MockSet {
    pub(crate) fn new(specs: Vec<SymbolSpec>) -> Self {
        MockSet {
            inner: MockSetData::build(specs),
        }
    }

    /// Hide the first `count` symbols from `first_symbol`, as the result cache does.
    pub(crate) fn filtered(mut self, count: usize) -> Self {
        self.inner.filtered = count.min(self.inner.symbols.len());
        self
    }

    pub(crate) fn refs(&self) -> i32 {
        self.inner.refs.get()
    }

    pub(crate) fn as_raw(&self) -> *const zbar_symbol_set_t {
        self.inner.as_raw()
    }

    pub(crate) fn scan_result(&self) -> ScanResult {
        unsafe { ScanResult::from_raw(self.as_raw()) }.expect("mock set is never null")
    }
}

unsafe fn symbol<'a>(ptr: *const zbar_symbol_t) -> &'a MockSymbol {
    &*ptr.cast::<MockSymbol>()
}

unsafe fn set<'a>(ptr: *const zbar_symbol_set_t) -> &'a MockSetData {
    &*ptr.cast::<MockSetData>()
}

fn symbol_ptr(symbol: Option<&MockSymbol>) -> *const zbar_symbol_t {
    symbol.map_or(ptr::null(), |s| (s as *const MockSymbol).cast())
}

fn symbol_name(code: c_int) -> &'static CStr {
    match code & ffi::ZBAR_SYMBOL {
        2 => c"EAN-2",
        5 => c"EAN-5",
        8 => c"EAN-8",
        9 => c"UPC-E",
        10 => c"ISBN-10",
        12 => c"UPC-A",
        13 => c"EAN-13",
        14 => c"ISBN-13",
        15 => c"COMPOSITE",
        25 => c"I2/5",
        34 => c"DataBar",
        35 => c"DataBar-Exp",
        38 => c"Codabar",
        39 => c"CODE-39",
        57 => c"PDF417",
        64 => c"QR-Code",
        80 => c"SQ-Code",
        93 => c"CODE-93",
        128 => c"CODE-128",
        _ => c"UNKNOWN",
    }
}

fn orientation_name(orientation: c_int) -> &'static CStr {
    match orientation {
        0 => c"UP",
        1 => c"RIGHT",
        2 => c"DOWN",
        3 => c"LEFT",
        _ => c"UNKNOWN",
    }
}

#[no_mangle]
pub unsafe extern "C" fn zbar_version(
    major: *mut c_uint,
    minor: *mut c_uint,
    patch: *mut c_uint,
) -> c_int {
    for (out, value) in [(major, 0), (minor, 23), (patch, 93)] {
        if !out.is_null() {
            *out = value;
        }
    }
    0
}

#[no_mangle]
pub extern "C" fn zbar_get_symbol_name(sym: c_int) -> *const c_char {
    symbol_name(sym).as_ptr()
}

#[no_mangle]
pub extern "C" fn zbar_get_addon_name(sym: c_int) -> *const c_char {
    match sym & ZBAR_ADDON {
        ZBAR_ADDON2 => c"+2".as_ptr(),
        ZBAR_ADDON5 => c"+5".as_ptr(),
        _ => c"".as_ptr(),
    }
}

#[no_mangle]
pub extern "C" fn zbar_get_config_name(config: c_int) -> *const c_char {
    let name = match config {
        0 => c"ENABLE",
        1 => c"ADD_CHECK",
        2 => c"EMIT_CHECK",
        3 => c"ASCII",
        4 => c"BINARY",
        0x20 => c"MIN_LEN",
        0x21 => c"MAX_LEN",
        0x40 => c"UNCERTAINTY",
        0x80 => c"POSITION",
        0x81 => c"TEST_INVERTED",
        0x100 => c"X_DENSITY",
        0x101 => c"Y_DENSITY",
        _ => c"",
    };
    name.as_ptr()
}

#[no_mangle]
pub extern "C" fn zbar_get_modifier_name(modifier: c_int) -> *const c_char {
    match modifier {
        0 => c"GS1".as_ptr(),
        1 => c"AIM".as_ptr(),
        _ => c"".as_ptr(),
    }
}

#[no_mangle]
pub extern "C" fn zbar_get_orientation_name(orientation: c_int) -> *const c_char {
    orientation_name(orientation).as_ptr()
}

#[no_mangle]
pub unsafe extern "C" fn zbar_symbol_get_type(sym: *const zbar_symbol_t) -> c_int {
    symbol(sym).type_code
}

#[no_mangle]
pub unsafe extern "C" fn zbar_symbol_get_configs(sym: *const zbar_symbol_t) -> c_uint {
    symbol(sym).configs
}

#[no_mangle]
pub unsafe extern "C" fn zbar_symbol_get_modifiers(sym: *const zbar_symbol_t) -> c_uint {
    symbol(sym).modifiers
}

#[no_mangle]
pub unsafe extern "C" fn zbar_symbol_get_data(sym: *const zbar_symbol_t) -> *const c_char {
    symbol(sym)
        .data
        .as_ref()
        .map_or(ptr::null(), |bytes| bytes.as_ptr().cast())
}

#[no_mangle]
pub unsafe extern "C" fn zbar_symbol_get_data_length(sym: *const zbar_symbol_t) -> c_uint {
    symbol(sym)
        .data
        .as_ref()
        .map_or(0, |bytes| (bytes.len() - 1) as c_uint)
}

#[no_mangle]
pub unsafe extern "C" fn zbar_symbol_get_quality(sym: *const zbar_symbol_t) -> c_int {
    symbol(sym).quality
}

#[no_mangle]
pub unsafe extern "C" fn zbar_symbol_get_count(sym: *const zbar_symbol_t) -> c_int {
    symbol(sym).count
}

#[no_mangle]
pub unsafe extern "C" fn zbar_symbol_get_loc_size(sym: *const zbar_symbol_t) -> c_uint {
    symbol(sym).points.len() as c_uint
}

#[no_mangle]
pub unsafe extern "C" fn zbar_symbol_get_loc_x(sym: *const zbar_symbol_t, index: c_uint) -> c_int {
    symbol(sym)
        .points
        .get(index as usize)
        .map_or(-1, |point| point[0])
}

#[no_mangle]
pub unsafe extern "C" fn zbar_symbol_get_loc_y(sym: *const zbar_symbol_t, index: c_uint) -> c_int {
    symbol(sym)
        .points
        .get(index as usize)
        .map_or(-1, |point| point[1])
}

#[no_mangle]
pub unsafe extern "C" fn zbar_symbol_get_orientation(sym: *const zbar_symbol_t) -> c_int {
    symbol(sym).orientation
}

#[no_mangle]
pub unsafe extern "C" fn zbar_symbol_next(sym: *const zbar_symbol_t) -> *const zbar_symbol_t {
    symbol(sym).next.cast()
}

#[no_mangle]
pub unsafe extern "C" fn zbar_symbol_get_components(
    sym: *const zbar_symbol_t,
) -> *const zbar_symbol_set_t {
    symbol(sym)
        .components
        .as_deref()
        .map_or(ptr::null(), MockSetData::as_raw)
}

#[no_mangle]
pub unsafe extern "C" fn zbar_symbol_first_component(
    sym: *const zbar_symbol_t,
) -> *const zbar_symbol_t {
    let first = symbol(sym)
        .components
        .as_deref()
        .and_then(|set| set.symbols.first())
        .map(|s| &**s);
    symbol_ptr(first)
}

/// Fails for type code 0, the way a symbol with no usable type would.
#[no_mangle]
pub unsafe extern "C" fn zbar_symbol_xml(
    sym: *const zbar_symbol_t,
    buffer: *mut *mut c_char,
    buflen: *mut c_uint,
) -> *mut c_char {
    let sym = symbol(sym);
    if sym.type_code & ffi::ZBAR_SYMBOL == 0 {
        return ptr::null_mut();
    }
    let data = sym
        .data
        .as_deref()
        .map(|bytes| String::from_utf8_lossy(&bytes[..bytes.len() - 1]).into_owned())
        .unwrap_or_default();
    let xml = format!(
        "<symbol type='{}' quality='{}' orientation='{}'><data><![CDATA[{}]]></data></symbol>",
        symbol_name(sym.type_code).to_string_lossy(),
        sym.quality,
        orientation_name(sym.orientation).to_string_lossy(),
        data,
    );

    if !(*buffer).is_null() {
        libc::free((*buffer).cast());
    }
    let out = libc::malloc(xml.len() + 1).cast::<c_char>();
    ptr::copy_nonoverlapping(xml.as_ptr().cast::<c_char>(), out, xml.len());
    *out.add(xml.len()) = 0;
    *buffer = out;
    *buflen = (xml.len() + 1) as c_uint;
    out
}

#[no_mangle]
pub unsafe extern "C" fn zbar_symbol_set_ref(syms: *const zbar_symbol_set_t, refs: c_int) {
    let refcnt = &set(syms).refs;
    refcnt.set(refcnt.get() + refs);
    debug_assert!(refcnt.get() >= 0);
}

#[no_mangle]
pub unsafe extern "C" fn zbar_symbol_set_get_size(syms: *const zbar_symbol_set_t) -> c_int {
    let set = set(syms);
    (set.symbols.len() - set.filtered) as c_int
}

#[no_mangle]
pub unsafe extern "C" fn zbar_symbol_set_first_symbol(
    syms: *const zbar_symbol_set_t,
) -> *const zbar_symbol_t {
    let set = set(syms);
    symbol_ptr(set.symbols.get(set.filtered).map(|s| &**s))
}

#[no_mangle]
pub unsafe extern "C" fn zbar_symbol_set_first_unfiltered(
    syms: *const zbar_symbol_set_t,
) -> *const zbar_symbol_t {
    symbol_ptr(set(syms).symbols.first().map(|s| &**s))
}
