//! Shared test helpers: an in-memory key store and tracing setup

#![allow(dead_code)]

use psa_key_attributes::{
    classify, KeyAttributes, KeyCreator, KeyHandle, KeyIdClass, KeyIdRanges, KeyMaterialSource,
    StatusCode, KEY_BITS_TOO_LARGE,
};
use std::collections::HashMap;

pub const NOT_SUPPORTED: StatusCode = StatusCode::new(-134);
pub const INVALID_ARGUMENT: StatusCode = StatusCode::new(-135);
pub const INVALID_HANDLE: StatusCode = StatusCode::new(-136);
pub const ALREADY_EXISTS: StatusCode = StatusCode::new(-139);

/// Install a test-friendly fmt subscriber; later calls are no-ops
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("psa_key_attributes=trace")
        .try_init();
}

/// Key kept by [`InMemoryKeyStore`]
#[derive(Debug, Clone)]
pub struct StoredKey {
    pub attributes: KeyAttributes,
    pub material: Vec<u8>,
}

/// Key store that copies attribute values and checks identifiers
#[derive(Debug, Default)]
pub struct InMemoryKeyStore {
    ranges: KeyIdRanges,
    keys: HashMap<KeyHandle, StoredKey>,
    next_handle: u16,
}

impl InMemoryKeyStore {
    pub fn new(ranges: KeyIdRanges) -> Self {
        Self {
            ranges,
            keys: HashMap::new(),
            next_handle: 0,
        }
    }

    pub fn get(&self, handle: KeyHandle) -> Option<&StoredKey> {
        self.keys.get(&handle)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    fn check_identifier(&self, attributes: &KeyAttributes) -> Result<(), StatusCode> {
        let id = attributes.identifier();
        if !attributes.is_persistent() {
            return if id.is_null() {
                Ok(())
            } else {
                Err(INVALID_ARGUMENT)
            };
        }
        if classify(id, &self.ranges) != KeyIdClass::ApplicationAssigned {
            return Err(INVALID_ARGUMENT);
        }
        let taken = self
            .keys
            .values()
            .any(|key| key.attributes.is_persistent() && key.attributes.identifier() == id);
        if taken {
            return Err(ALREADY_EXISTS);
        }
        Ok(())
    }
}

impl KeyCreator for InMemoryKeyStore {
    fn create(
        &mut self,
        attributes: &KeyAttributes,
        source: KeyMaterialSource<'_>,
    ) -> Result<KeyHandle, StatusCode> {
        self.check_identifier(attributes)?;

        let material = match source {
            KeyMaterialSource::Import(data) if data.is_empty() => return Err(INVALID_ARGUMENT),
            KeyMaterialSource::Import(data) => data.to_vec(),
            KeyMaterialSource::Generate => match attributes.bits() {
                0 => return Err(INVALID_ARGUMENT),
                KEY_BITS_TOO_LARGE => return Err(NOT_SUPPORTED),
                bits => vec![0xa5; bits.div_ceil(8)],
            },
            KeyMaterialSource::Copy(handle) => self
                .keys
                .get(&handle)
                .map(|key| key.material.clone())
                .ok_or(INVALID_HANDLE)?,
        };

        self.next_handle += 1;
        let handle = KeyHandle::new(self.next_handle);
        self.keys.insert(
            handle,
            StoredKey {
                attributes: attributes.clone(),
                material,
            },
        );
        Ok(handle)
    }
}
