//! Boundary to the key creation layer
//!
//! Import, generation and copy all take a [`KeyAttributes`] by reference and
//! produce a [`KeyHandle`]. Implementations live with the key store or driver
//! dispatch; they may copy attribute values but must not keep the record.

use crate::attributes::KeyAttributes;
use crate::status::StatusCode;
use crate::types::KeyHandle;

/// Where the material of a new key comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMaterialSource<'a> {
    /// Import the given key data
    Import(&'a [u8]),
    /// Generate fresh material of the size in the attributes
    Generate,
    /// Copy the material of an existing key
    Copy(KeyHandle),
}

impl KeyMaterialSource<'_> {
    /// Name of the creation operation, for logs
    pub fn operation(&self) -> &'static str {
        match self {
            Self::Import(_) => "import",
            Self::Generate => "generate",
            Self::Copy(_) => "copy",
        }
    }
}

/// Key creation operation consumed by this crate
///
/// Semantic validation (unsupported type or algorithm, identifier collision,
/// storage failure) happens here and is reported as a negative
/// [`StatusCode`].
pub trait KeyCreator {
    /// Create a key described by `attributes`
    fn create(
        &mut self,
        attributes: &KeyAttributes,
        source: KeyMaterialSource<'_>,
    ) -> Result<KeyHandle, StatusCode>;
}

impl<T: KeyCreator + ?Sized> KeyCreator for &mut T {
    fn create(
        &mut self,
        attributes: &KeyAttributes,
        source: KeyMaterialSource<'_>,
    ) -> Result<KeyHandle, StatusCode> {
        (**self).create(attributes, source)
    }
}

impl<T: KeyCreator + ?Sized> KeyCreator for Box<T> {
    fn create(
        &mut self,
        attributes: &KeyAttributes,
        source: KeyMaterialSource<'_>,
    ) -> Result<KeyHandle, StatusCode> {
        (**self).create(attributes, source)
    }
}
