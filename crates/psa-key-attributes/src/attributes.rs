//! Key attribute records
//!
//! A [`KeyAttributes`] value describes a key without holding its material:
//! where it lives (identifier and lifetime), what it is (type and size), and
//! what it may be used for (usage flags and permitted algorithm).
//!
//! # Lifecycle
//!
//! 1. Start from the canonical zero state: [`KeyAttributes::INIT`],
//!    [`KeyAttributes::init`] or `Default`, which are all equal.
//! 2. Fill in fields with the setters. Each setter replaces one field.
//! 3. Hand `&KeyAttributes` to a [`KeyCreator`](crate::KeyCreator).
//! 4. Call [`KeyAttributes::reset`] to release auxiliary resources and get a
//!    reusable zero record back.
//!
//! The six plain setters never allocate, so a record only touched by them can
//! be dropped without a reset. The extended policy setters
//! ([`set_enrollment_algorithm`](KeyAttributes::set_enrollment_algorithm),
//! [`set_domain_parameters`](KeyAttributes::set_domain_parameters)) allocate
//! an out-of-line block owned by the record. That block is released exactly
//! once, by `reset` or when the record is dropped.
//!
//! Getters may normalize: a size larger than [`MAX_KEY_BITS`] reads back as
//! [`KEY_BITS_TOO_LARGE`]. Every other field reads back exactly as set.

use crate::identifier::KeyId;
use crate::lifetime::KeyLifetime;
use crate::types::{Algorithm, KeyType, KeyUsage, KEY_BITS_TOO_LARGE, MAX_KEY_BITS};
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

/// Policy data stored out of line from the record
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExtendedPolicy {
    /// Second algorithm the key policy permits
    #[serde(default)]
    pub enrollment_algorithm: Algorithm,
    /// Opaque domain parameters (e.g. an RSA public exponent)
    #[serde(default)]
    pub domain_parameters: Vec<u8>,
}

impl ExtendedPolicy {
    fn is_empty(&self) -> bool {
        self.enrollment_algorithm.is_none() && self.domain_parameters.is_empty()
    }
}

/// Out-of-line resources a record may own
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<ExtendedPolicy>", into = "Option<ExtendedPolicy>")]
pub enum AuxiliaryResources {
    /// Nothing to release
    #[default]
    None,
    /// An extended policy block owned by this record
    Owned(Box<ExtendedPolicy>),
}

impl AuxiliaryResources {
    /// True if a block is owned
    pub fn is_owned(&self) -> bool {
        matches!(self, Self::Owned(_))
    }

    fn policy(&self) -> Option<&ExtendedPolicy> {
        match self {
            Self::None => None,
            Self::Owned(policy) => Some(policy),
        }
    }
}

impl From<Option<ExtendedPolicy>> for AuxiliaryResources {
    fn from(policy: Option<ExtendedPolicy>) -> Self {
        match policy {
            Some(policy) if !policy.is_empty() => Self::Owned(Box::new(policy)),
            _ => Self::None,
        }
    }
}

impl From<AuxiliaryResources> for Option<ExtendedPolicy> {
    fn from(resources: AuxiliaryResources) -> Self {
        match resources {
            AuxiliaryResources::None => None,
            AuxiliaryResources::Owned(policy) => Some(*policy),
        }
    }
}

/// Metadata of a key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyAttributes {
    id: KeyId,
    lifetime: KeyLifetime,
    key_type: KeyType,
    bits: usize,
    usage: KeyUsage,
    algorithm: Algorithm,
    #[serde(default, skip_serializing_if = "is_unowned")]
    aux: AuxiliaryResources,
}

fn is_unowned(aux: &AuxiliaryResources) -> bool {
    !aux.is_owned()
}

impl KeyAttributes {
    /// Canonical zero state
    pub const INIT: Self = Self {
        id: KeyId::INVALID,
        lifetime: KeyLifetime::VOLATILE,
        key_type: KeyType::NONE,
        bits: 0,
        usage: KeyUsage::NONE,
        algorithm: Algorithm::NONE,
        aux: AuxiliaryResources::None,
    };

    /// Create a record in the canonical zero state
    pub const fn init() -> Self {
        Self::INIT
    }

    // === Plain setters ===

    /// Set the key identifier
    pub fn set_identifier(&mut self, id: KeyId) {
        self.id = id;
    }

    /// Set the lifetime
    pub fn set_lifetime(&mut self, lifetime: KeyLifetime) {
        self.lifetime = lifetime;
    }

    /// Set the key type
    pub fn set_type(&mut self, key_type: KeyType) {
        self.key_type = key_type;
    }

    /// Set the key size in bits
    ///
    /// Sizes above [`MAX_KEY_BITS`] are kept but read back as
    /// [`KEY_BITS_TOO_LARGE`].
    pub fn set_bits(&mut self, bits: usize) {
        if bits > MAX_KEY_BITS {
            warn!(bits, max = MAX_KEY_BITS, "key size not supported; will read as too large");
        }
        self.bits = bits;
    }

    /// Set the usage flags
    pub fn set_usage_flags(&mut self, usage: KeyUsage) {
        self.usage = usage;
    }

    /// Set the permitted algorithm
    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.algorithm = algorithm;
    }

    // === Getters ===

    /// Key identifier
    pub fn identifier(&self) -> KeyId {
        self.id
    }

    /// Lifetime
    pub fn lifetime(&self) -> KeyLifetime {
        self.lifetime
    }

    /// Key type
    pub fn key_type(&self) -> KeyType {
        self.key_type
    }

    /// Key size in bits, or [`KEY_BITS_TOO_LARGE`] if the stored size is not
    /// supported
    pub fn bits(&self) -> usize {
        if self.bits > MAX_KEY_BITS {
            KEY_BITS_TOO_LARGE
        } else {
            self.bits
        }
    }

    /// Usage flags
    pub fn usage_flags(&self) -> KeyUsage {
        self.usage
    }

    /// Permitted algorithm
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// True unless the lifetime is volatile
    pub fn is_persistent(&self) -> bool {
        !self.lifetime.is_volatile()
    }

    // === Extended policy ===

    /// Set the enrollment algorithm
    ///
    /// Allocates the extended policy block if the record has none yet.
    /// Setting [`Algorithm::NONE`] releases the block once it holds nothing.
    pub fn set_enrollment_algorithm(&mut self, algorithm: Algorithm) {
        if algorithm.is_none() && !self.aux.is_owned() {
            return;
        }
        self.update_policy(|policy| policy.enrollment_algorithm = algorithm);
    }

    /// Set the domain parameters
    ///
    /// The bytes are copied into the extended policy block. An empty slice
    /// clears them and releases the block once it holds nothing.
    pub fn set_domain_parameters(&mut self, data: &[u8]) {
        if data.is_empty() && !self.aux.is_owned() {
            return;
        }
        self.update_policy(|policy| {
            policy.domain_parameters.clear();
            policy.domain_parameters.extend_from_slice(data);
        });
    }

    /// Enrollment algorithm, [`Algorithm::NONE`] if never set
    pub fn enrollment_algorithm(&self) -> Algorithm {
        self.aux
            .policy()
            .map_or(Algorithm::NONE, |policy| policy.enrollment_algorithm)
    }

    /// Domain parameters, empty if never set
    pub fn domain_parameters(&self) -> &[u8] {
        match self.aux.policy() {
            Some(policy) => &policy.domain_parameters,
            None => &[],
        }
    }

    /// True if the record owns resources that [`reset`](Self::reset) releases
    pub fn has_auxiliary_resources(&self) -> bool {
        self.aux.is_owned()
    }

    // === Lifecycle ===

    /// Release auxiliary resources and return to the canonical zero state
    ///
    /// Idempotent; a record with nothing to release is simply zeroed.
    pub fn reset(&mut self) {
        if let AuxiliaryResources::Owned(policy) = std::mem::take(&mut self.aux) {
            trace!(
                domain_parameters = policy.domain_parameters.len(),
                "releasing extended key policy"
            );
            drop(policy);
        }
        *self = Self::INIT;
    }

    // An emptied block is never put back.
    fn update_policy(&mut self, update: impl FnOnce(&mut ExtendedPolicy)) {
        let mut policy = match std::mem::take(&mut self.aux) {
            AuxiliaryResources::Owned(policy) => policy,
            AuxiliaryResources::None => {
                trace!("allocating extended key policy");
                Box::default()
            }
        };
        update(&mut policy);
        if policy.is_empty() {
            trace!("extended key policy empty; releasing");
        } else {
            self.aux = AuxiliaryResources::Owned(policy);
        }
    }

    // === Builders ===

    /// Builder form of [`set_identifier`](Self::set_identifier)
    pub fn with_identifier(mut self, id: KeyId) -> Self {
        self.set_identifier(id);
        self
    }

    /// Builder form of [`set_lifetime`](Self::set_lifetime)
    pub fn with_lifetime(mut self, lifetime: KeyLifetime) -> Self {
        self.set_lifetime(lifetime);
        self
    }

    /// Builder form of [`set_type`](Self::set_type)
    pub fn with_type(mut self, key_type: KeyType) -> Self {
        self.set_type(key_type);
        self
    }

    /// Builder form of [`set_bits`](Self::set_bits)
    pub fn with_bits(mut self, bits: usize) -> Self {
        self.set_bits(bits);
        self
    }

    /// Builder form of [`set_usage_flags`](Self::set_usage_flags)
    pub fn with_usage_flags(mut self, usage: KeyUsage) -> Self {
        self.set_usage_flags(usage);
        self
    }

    /// Builder form of [`set_algorithm`](Self::set_algorithm)
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.set_algorithm(algorithm);
        self
    }
}

impl Default for KeyAttributes {
    fn default() -> Self {
        Self::INIT
    }
}

impl Drop for KeyAttributes {
    fn drop(&mut self) {
        if self.aux.is_owned() {
            trace!("releasing extended key policy on drop");
        }
    }
}
