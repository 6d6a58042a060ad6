//! Result sets produced by a decode pass
//!
//! [`ScanResult`] holds one reference on a native `zbar_symbol_set_t` and is
//! the owner every borrowed [`Symbol`] is tied to. [`SymbolSet`] is the
//! non-owning view used for nested sets such as composite components.

use crate::error::{Error, Result};
use crate::ffi::{self, zbar_symbol_set_t};
use crate::symbol::{Symbol, Symbols};
use std::fmt;
use std::marker::PhantomData;
use std::ptr::NonNull;
use tracing::trace;

/// Collection of decoded symbols
#[derive(Clone, Copy)]
pub struct SymbolSet<'a> {
    ptr: NonNull<zbar_symbol_set_t>,
    _owner: PhantomData<&'a zbar_symbol_set_t>,
}

impl<'a> SymbolSet<'a> {
    /// Wrap a raw set pointer without taking a reference, `None` for null.
    ///
    /// # Safety
    ///
    /// A non-null `ptr` must stay alive, and must not be rescanned, for all of `'a`.
    pub unsafe fn from_raw(ptr: *const zbar_symbol_set_t) -> Option<Self> {
        NonNull::new(ptr as *mut zbar_symbol_set_t).map(|ptr| SymbolSet {
            ptr,
            _owner: PhantomData,
        })
    }

    pub fn as_ptr(&self) -> *const zbar_symbol_set_t {
        self.ptr.as_ptr()
    }

    /// Get the number of symbols
    pub fn len(&self) -> usize {
        let size = unsafe { ffi::zbar_symbol_set_get_size(self.as_ptr()) };
        usize::try_from(size).unwrap_or(0)
    }

    /// Check if there are any symbols
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Head of the chain of reported symbols.
    pub fn first_symbol(&self) -> Option<Symbol<'a>> {
        unsafe { Symbol::from_raw(ffi::zbar_symbol_set_first_symbol(self.as_ptr())) }
    }

    /// Head of the chain including symbols the result cache filtered out.
    pub fn first_unfiltered(&self) -> Option<Symbol<'a>> {
        unsafe { Symbol::from_raw(ffi::zbar_symbol_set_first_unfiltered(self.as_ptr())) }
    }

    /// Get an iterator over the symbols
    pub fn iter(&self) -> Symbols<'a> {
        Symbols::new(self.first_symbol())
    }

    pub fn iter_unfiltered(&self) -> Symbols<'a> {
        Symbols::new(self.first_unfiltered())
    }
}

impl<'a> IntoIterator for SymbolSet<'a> {
    type Item = Symbol<'a>;
    type IntoIter = Symbols<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &SymbolSet<'a> {
    type Item = Symbol<'a>;
    type IntoIter = Symbols<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for SymbolSet<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Owned reference to the symbols of one decode pass
///
/// Symbols borrowed from a `ScanResult` cannot outlive it. The native set is
/// released when the last reference, Rust side or library side, goes away.
pub struct ScanResult {
    ptr: NonNull<zbar_symbol_set_t>,
}

impl ScanResult {
    /// Take a new reference on a set returned by the library, e.g. from
    /// `zbar_image_get_symbols` or `zbar_image_scanner_get_results`.
    ///
    /// # Safety
    ///
    /// A non-null `ptr` must point to a live `zbar_symbol_set_t`, and the
    /// library must not modify it while this `ScanResult` exists.
    pub unsafe fn from_raw(ptr: *const zbar_symbol_set_t) -> Result<Self> {
        let ptr = NonNull::new(ptr as *mut zbar_symbol_set_t).ok_or(Error::NullHandle)?;
        ffi::zbar_symbol_set_ref(ptr.as_ptr(), 1);
        trace!(set = ?ptr, "acquired symbol set reference");
        Ok(ScanResult { ptr })
    }

    /// Borrow the set as a [`SymbolSet`] bounded by this result.
    pub fn symbols(&self) -> SymbolSet<'_> {
        SymbolSet {
            ptr: self.ptr,
            _owner: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.symbols().len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols().is_empty()
    }

    pub fn first_symbol(&self) -> Option<Symbol<'_>> {
        self.symbols().first_symbol()
    }

    pub fn iter(&self) -> Symbols<'_> {
        self.symbols().iter()
    }

    pub fn as_ptr(&self) -> *const zbar_symbol_set_t {
        self.ptr.as_ptr()
    }
}

impl Clone for ScanResult {
    fn clone(&self) -> Self {
        unsafe { ffi::zbar_symbol_set_ref(self.as_ptr(), 1) };
        trace!(set = ?self.ptr, "cloned symbol set reference");
        ScanResult { ptr: self.ptr }
    }
}

impl Drop for ScanResult {
    fn drop(&mut self) {
        unsafe { ffi::zbar_symbol_set_ref(self.as_ptr(), -1) };
        trace!(set = ?self.ptr, "released symbol set reference");
    }
}

impl<'s> IntoIterator for &'s ScanResult {
    type Item = Symbol<'s>;
    type IntoIter = Symbols<'s>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for ScanResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScanResult")
            .field("symbols", &self.symbols())
            .finish()
    }
}
