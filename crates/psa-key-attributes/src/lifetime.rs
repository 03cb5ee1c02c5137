//! Key lifetime encoding
//!
//! A lifetime says where a key is stored and which management events destroy
//! it. It packs two fields into 32 bits:
//!
//! - bits 0-7: persistence level ([`Persistence`])
//! - bits 8-31: location indicator ([`Location`])
//!
//! The packing is a bijection: every 32-bit value decodes to a pair and every
//! pair encodes to exactly one value, so [`KeyLifetime`] has no invalid states.

use crate::error::{KeyAttributesError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Persistence level of a key (low 8 bits of a lifetime)
///
/// Higher levels should survive at least as many management events as lower
/// ones. That ordering is a convention for implementers, not checked here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Persistence(u8);

/// Meaning of a persistence level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PersistenceClass {
    /// Destroyed when the application instance ends or on power reset
    Volatile,
    /// Persistent with the implementation's default lifetime
    Default,
    /// Persistent, meaning assigned by other specifications (2-127)
    SpecificationDefined,
    /// Persistent, meaning chosen by the vendor (128-254)
    VendorDefined,
    /// Read-only or write-once; cannot be destroyed
    ReadOnly,
}

impl Persistence {
    /// Volatile key
    pub const VOLATILE: Self = Self(0);
    /// Persistent key with the default lifetime
    pub const DEFAULT: Self = Self(1);
    /// Read-only or write-once key
    pub const READ_ONLY: Self = Self(0xff);

    /// Wrap a raw persistence level
    pub const fn new(level: u8) -> Self {
        Self(level)
    }

    /// Get the raw level
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Classify the level
    pub const fn class(self) -> PersistenceClass {
        match self.0 {
            0 => PersistenceClass::Volatile,
            1 => PersistenceClass::Default,
            2..=0x7f => PersistenceClass::SpecificationDefined,
            0x80..=0xfe => PersistenceClass::VendorDefined,
            0xff => PersistenceClass::ReadOnly,
        }
    }

    /// True for level 0
    pub const fn is_volatile(self) -> bool {
        self.0 == 0
    }
}

impl From<u8> for Persistence {
    fn from(level: u8) -> Self {
        Self(level)
    }
}

impl From<Persistence> for u8 {
    fn from(persistence: Persistence) -> Self {
        persistence.0
    }
}

/// Location indicator of a key (high 24 bits of a lifetime)
///
/// An opaque routing tag for the storage or driver layer. Every 24-bit value
/// is valid; the constructor only rejects values that do not fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Location(u32);

/// Meaning of a location indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocationClass {
    /// Primary local storage, alongside the key metadata
    PrimaryLocal,
    /// Primary secure element
    PrimarySecureElement,
    /// Other locations assigned by a specification (2-0x7fffff)
    SpecificationDefined,
    /// Vendor-defined locations (0x800000-0xffffff)
    VendorDefined,
}

impl Location {
    /// Largest representable location
    pub const MAX: u32 = 0x00ff_ffff;
    /// First vendor-defined location
    pub const VENDOR_MIN: u32 = 0x0080_0000;

    /// Primary local storage
    pub const PRIMARY_LOCAL: Self = Self(0);
    /// Primary secure element
    pub const PRIMARY_SECURE_ELEMENT: Self = Self(1);

    /// Wrap a raw location, or `None` if it does not fit in 24 bits
    pub const fn new(value: u32) -> Option<Self> {
        if value <= Self::MAX {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Keep only the low 24 bits of `value`
    pub const fn from_bits_truncate(value: u32) -> Self {
        Self(value & Self::MAX)
    }

    /// Get the raw location
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Classify the location
    pub const fn class(self) -> LocationClass {
        match self.0 {
            0 => LocationClass::PrimaryLocal,
            1 => LocationClass::PrimarySecureElement,
            v if v < Self::VENDOR_MIN => LocationClass::SpecificationDefined,
            _ => LocationClass::VendorDefined,
        }
    }

    /// True for the vendor-defined range
    pub const fn is_vendor_defined(self) -> bool {
        self.0 >= Self::VENDOR_MIN
    }
}

impl TryFrom<u32> for Location {
    type Error = KeyAttributesError;

    fn try_from(value: u32) -> Result<Self> {
        Self::new(value).ok_or(KeyAttributesError::LocationOutOfRange { value })
    }
}

impl From<Location> for u32 {
    fn from(location: Location) -> Self {
        location.0
    }
}

/// Packed 32-bit key lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyLifetime(u32);

impl KeyLifetime {
    /// Volatile key in primary local storage
    pub const VOLATILE: Self = Self::encode(Persistence::VOLATILE, Location::PRIMARY_LOCAL);
    /// Persistent key with the default lifetime in primary local storage
    pub const PERSISTENT_DEFAULT: Self =
        Self::encode(Persistence::DEFAULT, Location::PRIMARY_LOCAL);

    /// Pack a persistence level and a location
    pub const fn encode(persistence: Persistence, location: Location) -> Self {
        Self(persistence.0 as u32 | (location.0 << 8))
    }

    /// Unpack into persistence level and location
    pub const fn decode(self) -> (Persistence, Location) {
        (self.persistence(), self.location())
    }

    /// Alias of [`KeyLifetime::encode`] for callers that think in terms of the
    /// two component names
    pub const fn from_persistence_and_location(
        persistence: Persistence,
        location: Location,
    ) -> Self {
        Self::encode(persistence, location)
    }

    /// Wrap a raw lifetime value
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Get the raw lifetime value
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Persistence level (bits 0-7)
    pub const fn persistence(self) -> Persistence {
        Persistence((self.0 & 0xff) as u8)
    }

    /// Location indicator (bits 8-31)
    pub const fn location(self) -> Location {
        Location((self.0 >> 8) & Location::MAX)
    }

    /// True if the persistence level is volatile, whatever the location
    pub const fn is_volatile(self) -> bool {
        self.persistence().is_volatile()
    }

    /// True if the persistence level is read-only
    pub const fn is_read_only(self) -> bool {
        self.persistence().0 == Persistence::READ_ONLY.0
    }
}

impl From<u32> for KeyLifetime {
    fn from(bits: u32) -> Self {
        Self(bits)
    }
}

impl From<KeyLifetime> for u32 {
    fn from(lifetime: KeyLifetime) -> Self {
        lifetime.0
    }
}

impl fmt::Display for KeyLifetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (persistence, location) = self.decode();
        write!(f, "{:#04x}/{:#08x}", persistence.0, location.0)
    }
}
