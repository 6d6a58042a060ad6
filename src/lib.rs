//! Safe access to ZBar decode results
//!
//! This crate wraps the decoded-symbol structures of the C ZBar library.
//! Scanning happens in libzbar; the caller hands the resulting
//! `zbar_symbol_set_t` to [`ScanResult::from_raw`] and reads symbols from it.
//!
//! ```ignore
//! use zbar_symbols::ScanResult;
//!
//! let results = unsafe { ScanResult::from_raw(zbar_image_get_symbols(image)) }?;
//! for symbol in &results {
//!     println!("{} {}", symbol.type_name(), symbol.data());
//! }
//! ```

pub mod config;
pub mod error;
pub mod ffi;
pub mod names;
pub mod symbol;
pub mod symbol_set;

// Re-export main types
pub use config::{Config, ConfigSet, Modifier, ModifierSet, Orientation};
pub use error::{Error, Result};
pub use names::Version;
pub use symbol::{Location, Point, Symbol, SymbolType, Symbols};
pub use symbol_set::{ScanResult, SymbolSet};

#[cfg(test)]
mod mock_zbar;
