//! Decoded symbol access
//!
//! A [`Symbol`] is a borrowed view of one `zbar_symbol_t` inside a result set
//! owned by the library. Symbols from one scan pass form a forward-only,
//! null-terminated chain, walked with [`Symbol::next`] or [`Symbols`].
//!
//! Every accessor calls into the library; nothing is cached on the Rust side.

use crate::config::{ConfigSet, ModifierSet, Orientation};
use crate::error::{Error, Result};
use crate::ffi::{self, zbar_symbol_t};
use crate::names;
use crate::symbol_set::SymbolSet;
use libc::{c_char, c_uint};
use std::borrow::Cow;
use std::ffi::CStr;
use std::fmt::{self, Display};
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ptr::{self, NonNull};
use tracing::debug;

/// Symbology of a decoded symbol, numbered as in `zbar_symbol_type_t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub enum SymbolType {
    #[default]
    None = 0,
    Partial = 1,
    Ean2 = 2,
    Ean5 = 5,
    Ean8 = 8,
    Upce = 9,
    Isbn10 = 10,
    Upca = 12,
    Ean13 = 13,
    Isbn13 = 14,
    Composite = 15,
    I25 = 25,
    Databar = 34,
    DatabarExp = 35,
    Codabar = 38,
    Code39 = 39,
    Pdf417 = 57,
    QrCode = 64,
    SqCode = 80,
    Code93 = 93,
    Code128 = 128,
}

impl SymbolType {
    /// Symbologies that can come out of a decode pass.
    pub const ALL: [Self; 18] = [
        SymbolType::Ean13,
        SymbolType::Ean2,
        SymbolType::Ean5,
        SymbolType::Ean8,
        SymbolType::Upca,
        SymbolType::Upce,
        SymbolType::Isbn10,
        SymbolType::Isbn13,
        SymbolType::I25,
        SymbolType::Databar,
        SymbolType::DatabarExp,
        SymbolType::Codabar,
        SymbolType::Code39,
        SymbolType::Code93,
        SymbolType::Code128,
        SymbolType::Pdf417,
        SymbolType::QrCode,
        SymbolType::SqCode,
    ];

    /// Stable label for this symbology, without asking the library.
    pub fn name(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Partial => "Partial",
            Self::Ean2 => "EAN-2",
            Self::Ean5 => "EAN-5",
            Self::Ean8 => "EAN-8",
            Self::Upce => "UPC-E",
            Self::Isbn10 => "ISBN-10",
            Self::Upca => "UPC-A",
            Self::Ean13 => "EAN-13",
            Self::Isbn13 => "ISBN-13",
            Self::Composite => "COMPOSITE",
            Self::I25 => "I2/5",
            Self::Databar => "DataBar",
            Self::DatabarExp => "DataBar-Exp",
            Self::Codabar => "Codabar",
            Self::Code39 => "CODE-39",
            Self::Pdf417 => "PDF417",
            Self::QrCode => "QR-Code",
            Self::SqCode => "SQ-Code",
            Self::Code93 => "CODE-93",
            Self::Code128 => "CODE-128",
        }
    }
}

impl Display for SymbolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<SymbolType> for i32 {
    fn from(value: SymbolType) -> Self {
        value as i32
    }
}

impl From<i32> for SymbolType {
    fn from(value: i32) -> Self {
        match value {
            0 => Self::None,
            1 => Self::Partial,
            2 => Self::Ean2,
            5 => Self::Ean5,
            8 => Self::Ean8,
            9 => Self::Upce,
            10 => Self::Isbn10,
            12 => Self::Upca,
            13 => Self::Ean13,
            14 => Self::Isbn13,
            15 => Self::Composite,
            25 => Self::I25,
            34 => Self::Databar,
            35 => Self::DatabarExp,
            38 => Self::Codabar,
            39 => Self::Code39,
            57 => Self::Pdf417,
            64 => Self::QrCode,
            80 => Self::SqCode,
            93 => Self::Code93,
            128 => Self::Code128,
            _ => Self::None,
        }
    }
}

/// One point of a symbol's location polygon, in image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

/// A reference to a decoded barcode symbol
///
/// The lifetime ties the symbol to the result set it was read from. The
/// library owns the underlying data; dropping a `Symbol` frees nothing.
#[derive(Clone, Copy)]
pub struct Symbol<'a> {
    ptr: NonNull<zbar_symbol_t>,
    _set: PhantomData<&'a zbar_symbol_t>,
}

impl<'a> Symbol<'a> {
    /// Wrap a raw symbol pointer, returning `None` for null.
    ///
    /// # Safety
    ///
    /// A non-null `ptr` must point to a symbol inside a result set that stays
    /// alive, and is not mutated, for all of `'a`.
    pub unsafe fn from_raw(ptr: *const zbar_symbol_t) -> Option<Self> {
        NonNull::new(ptr as *mut zbar_symbol_t).map(|ptr| Symbol {
            ptr,
            _set: PhantomData,
        })
    }

    pub fn as_ptr(&self) -> *const zbar_symbol_t {
        self.ptr.as_ptr()
    }

    /// The next symbol decoded in the same pass, or `None` at the end of the chain.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&self) -> Option<Symbol<'a>> {
        unsafe { Symbol::from_raw(ffi::zbar_symbol_next(self.as_ptr())) }
    }

    /// Iterate from this symbol (inclusive) to the end of the chain.
    pub fn iter(&self) -> Symbols<'a> {
        Symbols::new(Some(*self))
    }

    /// Call `visitor` with the decoded text of this symbol and every symbol
    /// after it, in the order the decoder found them.
    pub fn for_each<F>(&self, mut visitor: F)
    where
        F: FnMut(&str),
    {
        for symbol in self.iter() {
            visitor(&symbol.data());
        }
    }

    /// Get the decoded data as bytes, or `None` if the library reports no data
    pub fn raw_data(&self) -> Option<&'a [u8]> {
        let data = unsafe { ffi::zbar_symbol_get_data(self.as_ptr()) };
        if data.is_null() {
            return None;
        }
        let len = unsafe { ffi::zbar_symbol_get_data_length(self.as_ptr()) };
        Some(unsafe { std::slice::from_raw_parts(data.cast::<u8>(), len as usize) })
    }

    /// Get the decoded data as bytes
    ///
    /// Empty when the library reports no data.
    pub fn data_bytes(&self) -> &'a [u8] {
        self.raw_data().unwrap_or_default()
    }

    /// Get the decoded data as a string (if valid UTF-8)
    pub fn data_str(&self) -> Option<&'a str> {
        std::str::from_utf8(self.data_bytes()).ok()
    }

    /// Get the decoded data as text.
    ///
    /// Missing data reads as `""`. Invalid UTF-8 sequences are replaced with
    /// U+FFFD.
    pub fn data(&self) -> Cow<'a, str> {
        String::from_utf8_lossy(self.data_bytes())
    }

    /// Raw type code as reported by the library, add-on bits included.
    pub fn type_code(&self) -> i32 {
        unsafe { ffi::zbar_symbol_get_type(self.as_ptr()) }
    }

    /// Symbology of this symbol, with add-on bits stripped.
    pub fn symbol_type(&self) -> SymbolType {
        SymbolType::from(self.type_code() & ffi::ZBAR_SYMBOL)
    }

    /// The library's name for this symbol's type code.
    pub fn type_name(&self) -> &'static str {
        names::symbol_name(self.type_code())
    }

    /// The library's name for this symbol's add-on, `""` when there is none.
    pub fn addon_name(&self) -> &'static str {
        names::addon_name(self.type_code())
    }

    /// Relative confidence of the decode.
    ///
    /// Only comparable with other scores from the same library build.
    pub fn quality(&self) -> i32 {
        unsafe { ffi::zbar_symbol_get_quality(self.as_ptr()) }
    }

    /// Cache hit count: positive for a repeat, 0 for new, negative while unconfirmed.
    pub fn count(&self) -> i32 {
        unsafe { ffi::zbar_symbol_get_count(self.as_ptr()) }
    }

    pub fn configs(&self) -> ConfigSet {
        ConfigSet::from_bits(unsafe { ffi::zbar_symbol_get_configs(self.as_ptr()) })
    }

    pub fn modifiers(&self) -> ModifierSet {
        ModifierSet::from_bits(unsafe { ffi::zbar_symbol_get_modifiers(self.as_ptr()) })
    }

    pub fn orientation(&self) -> Orientation {
        Orientation::from(unsafe { ffi::zbar_symbol_get_orientation(self.as_ptr()) })
    }

    /// Number of points in the location polygon.
    ///
    /// The points are the scan locations where the symbol was decoded and do
    /// not necessarily form a closed polygon.
    pub fn location_len(&self) -> u32 {
        unsafe { ffi::zbar_symbol_get_loc_size(self.as_ptr()) }
    }

    /// X coordinate of location point `index`, or `-1` if out of range.
    pub fn location_x(&self, index: u32) -> i32 {
        unsafe { ffi::zbar_symbol_get_loc_x(self.as_ptr(), index) }
    }

    /// Y coordinate of location point `index`, or `-1` if out of range.
    pub fn location_y(&self, index: u32) -> i32 {
        unsafe { ffi::zbar_symbol_get_loc_y(self.as_ptr(), index) }
    }

    pub fn location_point(&self, index: u32) -> Option<Point> {
        if index >= self.location_len() {
            return None;
        }
        Some(Point {
            x: self.location_x(index),
            y: self.location_y(index),
        })
    }

    pub fn location(&self) -> Location<'a> {
        Location {
            symbol: *self,
            index: 0,
            len: self.location_len(),
        }
    }

    /// Get the component symbols (for composite symbols like EAN+add-on or QR structured append)
    pub fn components(&self) -> Option<SymbolSet<'a>> {
        unsafe { SymbolSet::from_raw(ffi::zbar_symbol_get_components(self.as_ptr())) }
    }

    pub fn first_component(&self) -> Option<Symbol<'a>> {
        unsafe { Symbol::from_raw(ffi::zbar_symbol_first_component(self.as_ptr())) }
    }

    /// Render the symbol with the library's XML serializer.
    pub fn to_xml(&self) -> Result<String> {
        let mut buffer: *mut c_char = ptr::null_mut();
        let mut len: c_uint = 0;
        let xml = unsafe { ffi::zbar_symbol_xml(self.as_ptr(), &mut buffer, &mut len) };
        if xml.is_null() {
            debug!(symbol_type = %self.symbol_type(), "xml export returned null");
            if !buffer.is_null() {
                unsafe { libc::free(buffer.cast()) };
            }
            return Err(Error::Xml);
        }
        let text = unsafe { CStr::from_ptr(xml) }.to_string_lossy().into_owned();
        // The library hands back `buffer` itself, possibly reallocated.
        unsafe { libc::free(xml.cast()) };
        Ok(text)
    }
}

impl fmt::Debug for Symbol<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Symbol")
            .field("symbol_type", &self.symbol_type())
            .field("data", &self.data())
            .field("quality", &self.quality())
            .finish()
    }
}

/// Iterator over a chain of symbols
pub struct Symbols<'a> {
    next: Option<Symbol<'a>>,
}

impl<'a> Symbols<'a> {
    pub(crate) fn new(first: Option<Symbol<'a>>) -> Self {
        Self { next: first }
    }
}

impl<'a> Iterator for Symbols<'a> {
    type Item = Symbol<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = current.next();
        Some(current)
    }
}

impl FusedIterator for Symbols<'_> {}

/// Iterator over the points of a symbol's location polygon
pub struct Location<'a> {
    symbol: Symbol<'a>,
    index: u32,
    len: u32,
}

impl Iterator for Location<'_> {
    type Item = Point;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.len {
            return None;
        }
        let point = Point {
            x: self.symbol.location_x(self.index),
            y: self.symbol.location_y(self.index),
        };
        self.index += 1;
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.len - self.index) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Location<'_> {}

impl FusedIterator for Location<'_> {}
