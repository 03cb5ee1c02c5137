//! Scalar encodings carried by key attributes
//!
//! Each wrapper keeps the raw integer of the PSA ABI so values pass through
//! unchanged to drivers and storage. Whether a particular encoding is
//! supported is decided by the key creation layer, not here.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

/// Largest key size, in bits, that a record stores as-is
pub const MAX_KEY_BITS: usize = 0xfff8;

/// Size reported for keys larger than [`MAX_KEY_BITS`]
pub const KEY_BITS_TOO_LARGE: usize = 0xffff;

/// Handle to a key object returned by key creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyHandle(u16);

impl KeyHandle {
    /// The null handle
    pub const NULL: Self = Self(0);

    /// Wrap a raw handle
    pub const fn new(handle: u16) -> Self {
        Self(handle)
    }

    /// Get the raw handle
    pub const fn value(self) -> u16 {
        self.0
    }

    /// True for the null handle
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for KeyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "handle-{}", self.0)
    }
}

/// Encoding of a key type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyType(u16);

impl KeyType {
    /// Unspecified key type
    pub const NONE: Self = Self(0);

    /// Wrap a raw key type
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    /// Get the raw encoding
    pub const fn value(self) -> u16 {
        self.0
    }

    /// True for the unspecified type
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl From<u16> for KeyType {
    fn from(raw: u16) -> Self {
        Self(raw)
    }
}

/// Encoding of a cryptographic algorithm
///
/// For algorithms that apply to several key types this does not encode the
/// key type; a block cipher mode is an algorithm, the block cipher itself is a
/// [`KeyType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Algorithm(u32);

impl Algorithm {
    /// No cryptographic usage permitted
    pub const NONE: Self = Self(0);

    /// Wrap a raw algorithm
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw encoding
    pub const fn value(self) -> u32 {
        self.0
    }

    /// True for [`Algorithm::NONE`]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl From<u32> for Algorithm {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

/// Permitted usage of a key, as a bitmask
///
/// Bits without a named constant are kept as given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyUsage(u32);

impl KeyUsage {
    /// No usage except exporting a public key
    pub const NONE: Self = Self(0);
    /// Key material may be exported
    pub const EXPORT: Self = Self(0x0000_0001);
    /// Key may be copied
    pub const COPY: Self = Self(0x0000_0002);
    /// Key may encrypt
    pub const ENCRYPT: Self = Self(0x0000_0100);
    /// Key may decrypt
    pub const DECRYPT: Self = Self(0x0000_0200);
    /// Key may sign a message
    pub const SIGN_MESSAGE: Self = Self(0x0000_0400);
    /// Key may verify a message signature
    pub const VERIFY_MESSAGE: Self = Self(0x0000_0800);
    /// Key may sign a precomputed hash
    pub const SIGN_HASH: Self = Self(0x0000_1000);
    /// Key may verify a signature over a precomputed hash
    pub const VERIFY_HASH: Self = Self(0x0000_2000);
    /// Key may be used in key derivation
    pub const DERIVE: Self = Self(0x0000_4000);

    /// Wrap a raw bitmask
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Get the raw bitmask
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// True if no bit is set
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True if every bit of `other` is set here
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Bits set in either
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Bits set in both
    pub const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }
}

impl BitOr for KeyUsage {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for KeyUsage {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for KeyUsage {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        self.intersection(rhs)
    }
}

/// First family value reserved for vendors, for curve and group families alike
const VENDOR_FAMILY_MIN: u8 = 0x80;

/// Elliptic curve family identifier
///
/// Values `0x80..=0xff` are vendor-defined; specification-defined families
/// never use that range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EccFamily(u8);

impl EccFamily {
    /// Wrap a raw family identifier
    pub const fn new(raw: u8) -> Self {
        Self(raw)
    }

    /// Get the raw identifier
    pub const fn value(self) -> u8 {
        self.0
    }

    /// True for vendor-defined families
    pub const fn is_vendor_defined(self) -> bool {
        self.0 >= VENDOR_FAMILY_MIN
    }
}

/// Diffie-Hellman group family identifier
///
/// Same vendor split as [`EccFamily`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DhFamily(u8);

impl DhFamily {
    /// Wrap a raw family identifier
    pub const fn new(raw: u8) -> Self {
        Self(raw)
    }

    /// Get the raw identifier
    pub const fn value(self) -> u8 {
        self.0
    }

    /// True for vendor-defined families
    pub const fn is_vendor_defined(self) -> bool {
        self.0 >= VENDOR_FAMILY_MIN
    }
}

/// Step of a key derivation (secret input, label, salt, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyDerivationStep(u16);

impl KeyDerivationStep {
    /// Wrap a raw step encoding
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    /// Get the raw encoding
    pub const fn value(self) -> u16 {
        self.0
    }
}
