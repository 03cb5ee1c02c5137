//! PSA key attributes
//!
//! In-memory metadata model for a PSA-style key management layer. It defines
//! no cryptography, storage, or wire format; it fixes the binary contracts the
//! key store, persistence layer and driver dispatch share.
//!
//! # Components
//!
//! - [`StatusCode`]: zero is success, negative is an error
//! - [`KeyLifetime`]: packed persistence level (bits 0-7) and location (bits 8-31)
//! - [`classify`]: key identifier ranges, with boundaries from [`KeyIdRanges`]
//! - [`KeyAttributes`]: the metadata record and its release lifecycle
//! - [`KeyCreator`]: the external key creation operation that reads a record
//! - [`ProfileConfig`]: identifier ranges loaded from TOML or JSON
//!
//! # Example
//!
//! ```
//! use psa_key_attributes::{
//!     classify, KeyAttributes, KeyId, KeyIdClass, KeyIdRange, KeyIdRanges, KeyLifetime,
//!     KeyUsage,
//! };
//!
//! let ranges = KeyIdRanges::application_only(KeyIdRange::new(0x1, 0xff)?);
//!
//! let mut attrs = KeyAttributes::init();
//! attrs.set_identifier(KeyId::new(0x10));
//! attrs.set_lifetime(KeyLifetime::PERSISTENT_DEFAULT);
//! attrs.set_usage_flags(KeyUsage::SIGN_HASH | KeyUsage::VERIFY_HASH);
//!
//! assert_eq!(classify(attrs.identifier(), &ranges), KeyIdClass::ApplicationAssigned);
//! attrs.reset();
//! assert_eq!(attrs, KeyAttributes::INIT);
//! # Ok::<(), psa_key_attributes::KeyAttributesError>(())
//! ```

#![forbid(unsafe_code)]

/// Key attribute record and its lifecycle
pub mod attributes;

/// Profile configuration loading
pub mod config;

/// Key creation boundary
pub mod creation;

/// Error types
pub mod error;

/// Key identifiers and range classification
pub mod identifier;

/// Lifetime encoding
pub mod lifetime;

/// Return status convention
pub mod status;

/// Scalar key encodings
pub mod types;

pub use attributes::{AuxiliaryResources, ExtendedPolicy, KeyAttributes};
pub use config::ProfileConfig;
pub use creation::{KeyCreator, KeyMaterialSource};
pub use error::{KeyAttributesError, Result};
pub use identifier::{classify, KeyId, KeyIdClass, KeyIdRange, KeyIdRanges};
pub use lifetime::{KeyLifetime, Location, LocationClass, Persistence, PersistenceClass};
pub use status::StatusCode;
pub use types::{
    Algorithm, DhFamily, EccFamily, KeyDerivationStep, KeyHandle, KeyType, KeyUsage,
    KEY_BITS_TOO_LARGE, MAX_KEY_BITS,
};
