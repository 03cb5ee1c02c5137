//! Key identifiers and their range classification
//!
//! Identifier `0` is never a valid key. The remaining space is split by the
//! calling profile into an application range, a vendor range, and whatever is
//! left over (reserved for future use). The boundaries are configuration:
//! [`KeyIdRanges::default`] configures no ranges at all.
//!
//! Identifier ranges are unrelated to vendor-defined *locations* in a
//! [`KeyLifetime`](crate::KeyLifetime); an identifier such as `0x800001` is
//! only vendor-assigned if the configured vendor identifier range says so.

use crate::error::{KeyAttributesError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a persistent key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyId(u32);

impl KeyId {
    /// The reserved invalid identifier
    pub const INVALID: Self = Self(0);

    /// Wrap a raw identifier
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw identifier
    pub const fn value(self) -> u32 {
        self.0
    }

    /// True for the reserved identifier `0`
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "key-{:#x}", self.0)
    }
}

impl From<u32> for KeyId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<KeyId> for u32 {
    fn from(id: KeyId) -> Self {
        id.0
    }
}

/// Inclusive identifier range `min..=max`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawKeyIdRange")]
pub struct KeyIdRange {
    min: u32,
    max: u32,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawKeyIdRange {
    min: u32,
    max: u32,
}

impl TryFrom<RawKeyIdRange> for KeyIdRange {
    type Error = KeyAttributesError;

    fn try_from(raw: RawKeyIdRange) -> Result<Self> {
        Self::new(raw.min, raw.max)
    }
}

impl KeyIdRange {
    /// Build a range; rejects `min > max` and ranges that include `0`
    pub fn new(min: u32, max: u32) -> Result<Self> {
        if min == 0 {
            return Err(KeyAttributesError::InvalidRange {
                min,
                max,
                reason: "identifier 0 is reserved",
            });
        }
        if min > max {
            return Err(KeyAttributesError::InvalidRange {
                min,
                max,
                reason: "lower bound exceeds upper bound",
            });
        }
        Ok(Self { min, max })
    }

    /// Lowest identifier in the range
    pub const fn min(&self) -> u32 {
        self.min
    }

    /// Highest identifier in the range
    pub const fn max(&self) -> u32 {
        self.max
    }

    /// True if `id` lies within the range
    pub const fn contains(&self, id: KeyId) -> bool {
        id.0 >= self.min && id.0 <= self.max
    }

    /// True if the two ranges share any identifier
    pub const fn overlaps(&self, other: &KeyIdRange) -> bool {
        self.min <= other.max && other.min <= self.max
    }
}

impl fmt::Display for KeyIdRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}..={:#x}", self.min, self.max)
    }
}

/// What an identifier may be used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyIdClass {
    /// Identifier `0`
    Invalid,
    /// Freely chosen by applications
    ApplicationAssigned,
    /// Assigned by the implementation
    VendorAssigned,
    /// Outside every configured range; not usable by applications
    Reserved,
}

/// Application and vendor identifier ranges supplied by the calling profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeyIdRanges {
    /// Identifiers applications may choose
    pub application: Option<KeyIdRange>,
    /// Identifiers the implementation may define
    pub vendor: Option<KeyIdRange>,
}

impl KeyIdRanges {
    /// Ranges with only an application range
    pub const fn application_only(application: KeyIdRange) -> Self {
        Self {
            application: Some(application),
            vendor: None,
        }
    }

    /// Ranges with both an application and a vendor range
    pub fn new(application: KeyIdRange, vendor: KeyIdRange) -> Result<Self> {
        let ranges = Self {
            application: Some(application),
            vendor: Some(vendor),
        };
        ranges.validate()?;
        Ok(ranges)
    }

    /// The boundaries published by PSA Crypto API 1.0
    ///
    /// Opt-in only; other profiles pick their own ranges.
    pub const fn psa_crypto_v1() -> Self {
        Self {
            application: Some(KeyIdRange {
                min: 0x0000_0001,
                max: 0x3fff_ffff,
            }),
            vendor: Some(KeyIdRange {
                min: 0x4000_0000,
                max: 0x7fff_ffff,
            }),
        }
    }

    /// Reject overlapping application and vendor ranges
    pub fn validate(&self) -> Result<()> {
        if let (Some(application), Some(vendor)) = (&self.application, &self.vendor) {
            if application.overlaps(vendor) {
                return Err(KeyAttributesError::OverlappingRanges {
                    application: application.to_string(),
                    vendor: vendor.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Classify `id` against these ranges
    pub fn classify(&self, id: KeyId) -> KeyIdClass {
        classify(id, self)
    }
}

/// Classify a key identifier
///
/// `0` is [`KeyIdClass::Invalid`] whatever the ranges say. Anything else is
/// matched against the application range first, then the vendor range, and
/// falls back to [`KeyIdClass::Reserved`].
pub fn classify(id: KeyId, ranges: &KeyIdRanges) -> KeyIdClass {
    if id.is_null() {
        return KeyIdClass::Invalid;
    }
    if ranges.application.is_some_and(|range| range.contains(id)) {
        return KeyIdClass::ApplicationAssigned;
    }
    if ranges.vendor.is_some_and(|range| range.contains(id)) {
        return KeyIdClass::VendorAssigned;
    }
    KeyIdClass::Reserved
}
