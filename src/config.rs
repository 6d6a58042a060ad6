//! Typed views of the decoder settings recorded on each symbol
//!
//! The library stamps every decoded symbol with the boolean decoder configs
//! that were in effect and with any modifiers detected while decoding. These
//! arrive as bitmasks; this module names the bits.

use crate::ffi;
use std::fmt;

/// Decoder configuration options, numbered as in `zbar_config_t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Config {
    Enable = 0,
    AddCheck = 1,
    EmitCheck = 2,
    Ascii = 3,
    Binary = 4,
    MinLength = 0x20,
    MaxLength = 0x21,
    Uncertainty = 0x40,
    Position = 0x80,
    TestInverted = 0x81,
    XDensity = 0x100,
    YDensity = 0x101,
}

impl Config {
    /// Boolean configs, the only ones that can appear in a symbol's config mask.
    pub const BOOLEAN: [Self; 5] = [
        Config::Enable,
        Config::AddCheck,
        Config::EmitCheck,
        Config::Ascii,
        Config::Binary,
    ];

    fn bit(self) -> Option<u32> {
        let value = self as u32;
        (value < Config::BOOLEAN.len() as u32).then(|| 1 << value)
    }

    pub(crate) fn as_raw(self) -> ffi::zbar_config_t {
        self as ffi::zbar_config_t
    }
}

/// Symbol modifiers, numbered as in `zbar_modifier_t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    /// Data is GS1 formatted (FNC1 in first position).
    Gs1 = 0,
    /// Data carries an AIM application indicator.
    Aim = 1,
}

impl Modifier {
    pub const ALL: [Self; 2] = [Modifier::Gs1, Modifier::Aim];

    fn bit(self) -> u32 {
        1 << (self as u32)
    }

    pub(crate) fn as_raw(self) -> ffi::zbar_modifier_t {
        self as ffi::zbar_modifier_t
    }
}

/// Coarse orientation of a decoded symbol relative to the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    #[default]
    Unknown = -1,
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
}

impl Orientation {
    pub(crate) fn as_raw(self) -> ffi::zbar_orientation_t {
        self as ffi::zbar_orientation_t
    }
}

impl From<i32> for Orientation {
    fn from(value: i32) -> Self {
        match value {
            0 => Self::Up,
            1 => Self::Right,
            2 => Self::Down,
            3 => Self::Left,
            _ => Self::Unknown,
        }
    }
}

/// Bitmask of boolean [`Config`]s, as returned by `zbar_symbol_get_configs`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ConfigSet(u32);

impl ConfigSet {
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub fn contains(self, config: Config) -> bool {
        config.bit().is_some_and(|bit| self.0 & bit != 0)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Known configs present in the mask, in numeric order.
    pub fn iter(self) -> impl Iterator<Item = Config> {
        Config::BOOLEAN
            .into_iter()
            .filter(move |config| self.contains(*config))
    }
}

impl fmt::Debug for ConfigSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Bitmask of [`Modifier`]s, as returned by `zbar_symbol_get_modifiers`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ModifierSet(u32);

impl ModifierSet {
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub fn contains(self, modifier: Modifier) -> bool {
        self.0 & modifier.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Modifier> {
        Modifier::ALL
            .into_iter()
            .filter(move |modifier| self.contains(*modifier))
    }
}

impl fmt::Debug for ModifierSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
