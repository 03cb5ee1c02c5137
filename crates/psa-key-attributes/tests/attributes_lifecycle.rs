//! Key attribute record lifecycle: init, populate, reset

#![allow(clippy::expect_used)]

mod common;

use proptest::prelude::*;
use psa_key_attributes::{
    Algorithm, KeyAttributes, KeyId, KeyLifetime, KeyType, KeyUsage, Location, Persistence,
    KEY_BITS_TOO_LARGE, MAX_KEY_BITS,
};

/// Everything a caller can put into a record
#[derive(Debug, Clone)]
struct Population {
    id: u32,
    lifetime: u32,
    key_type: u16,
    bits: usize,
    usage: u32,
    algorithm: u32,
    enrollment: Option<u32>,
    domain_parameters: Option<Vec<u8>>,
}

impl Population {
    fn apply(&self, attrs: &mut KeyAttributes) {
        attrs.set_identifier(KeyId::new(self.id));
        attrs.set_lifetime(KeyLifetime::from_bits(self.lifetime));
        attrs.set_type(KeyType::new(self.key_type));
        attrs.set_bits(self.bits);
        attrs.set_usage_flags(KeyUsage::from_bits(self.usage));
        attrs.set_algorithm(Algorithm::new(self.algorithm));
        if let Some(alg) = self.enrollment {
            attrs.set_enrollment_algorithm(Algorithm::new(alg));
        }
        if let Some(params) = &self.domain_parameters {
            attrs.set_domain_parameters(params);
        }
    }
}

fn arb_population() -> impl Strategy<Value = Population> {
    (
        any::<u32>(),
        any::<u32>(),
        any::<u16>(),
        prop_oneof![0..=MAX_KEY_BITS, any::<usize>()],
        any::<u32>(),
        any::<u32>(),
        proptest::option::of(any::<u32>()),
        proptest::option::of(prop::collection::vec(any::<u8>(), 0..32)),
    )
        .prop_map(
            |(id, lifetime, key_type, bits, usage, algorithm, enrollment, domain_parameters)| {
                Population {
                    id,
                    lifetime,
                    key_type,
                    bits,
                    usage,
                    algorithm,
                    enrollment,
                    domain_parameters,
                }
            },
        )
}

proptest! {
    /// reset(reset(x)) == reset(x), and both equal init()
    #[test]
    fn reset_is_idempotent(population in arb_population()) {
        let mut attrs = KeyAttributes::init();
        population.apply(&mut attrs);

        attrs.reset();
        let once = attrs.clone();
        attrs.reset();
        prop_assert_eq!(&attrs, &once);
        prop_assert_eq!(&attrs, &KeyAttributes::INIT);
        prop_assert!(!attrs.has_auxiliary_resources());
    }

    /// Plain setters round-trip every field except oversized bit counts
    #[test]
    fn plain_fields_round_trip(population in arb_population()) {
        let mut attrs = KeyAttributes::init();
        population.apply(&mut attrs);

        prop_assert_eq!(attrs.identifier().value(), population.id);
        prop_assert_eq!(attrs.lifetime().bits(), population.lifetime);
        prop_assert_eq!(attrs.key_type().value(), population.key_type);
        prop_assert_eq!(attrs.usage_flags().bits(), population.usage);
        prop_assert_eq!(attrs.algorithm().value(), population.algorithm);
        if population.bits <= MAX_KEY_BITS {
            prop_assert_eq!(attrs.bits(), population.bits);
        } else {
            prop_assert_eq!(attrs.bits(), KEY_BITS_TOO_LARGE);
        }
    }

    /// Only the extended policy setters create auxiliary resources
    #[test]
    fn auxiliary_resources_are_tracked(population in arb_population()) {
        let mut attrs = KeyAttributes::init();
        population.apply(&mut attrs);

        let enrolled = population.enrollment.is_some_and(|alg| alg != 0);
        let has_params = population.domain_parameters.as_ref().is_some_and(|p| !p.is_empty());
        prop_assert_eq!(attrs.has_auxiliary_resources(), enrolled || has_params);
    }
}

#[test]
fn init_yields_the_canonical_zero_state() {
    let attrs = KeyAttributes::init();
    assert_eq!(attrs.identifier(), KeyId::new(0));
    assert_eq!(attrs.lifetime(), KeyLifetime::VOLATILE);
    assert_eq!(attrs.key_type(), KeyType::new(0));
    assert_eq!(attrs.bits(), 0);
    assert_eq!(attrs.usage_flags(), KeyUsage::from_bits(0));
    assert_eq!(attrs.algorithm(), Algorithm::new(0));
    assert_eq!(attrs.enrollment_algorithm(), Algorithm::NONE);
    assert!(attrs.domain_parameters().is_empty());
}

#[test]
fn literal_and_function_initialization_agree() {
    const STATIC_ATTRS: KeyAttributes = KeyAttributes::INIT;
    assert_eq!(STATIC_ATTRS, KeyAttributes::init());
    assert_eq!(KeyAttributes::default(), KeyAttributes::init());
}

#[test]
fn reset_of_fresh_record_is_a_no_op() {
    let mut attrs = KeyAttributes::init();
    attrs.reset();
    assert_eq!(attrs, KeyAttributes::init());
}

#[test]
fn persistent_default_lifetime_round_trips() {
    let mut attrs = KeyAttributes::init();
    let lifetime = KeyLifetime::encode(Persistence::new(1), Location::PRIMARY_LOCAL);
    attrs.set_lifetime(lifetime);
    assert_eq!(attrs.lifetime(), lifetime);
    assert_eq!(attrs.lifetime(), KeyLifetime::PERSISTENT_DEFAULT);
    assert!(attrs.is_persistent());
}

#[test]
fn record_is_reusable_after_reset() {
    common::init_tracing();

    let mut attrs = KeyAttributes::init();
    attrs.set_algorithm(Algorithm::new(0x0600_0609));
    attrs.set_enrollment_algorithm(Algorithm::new(0x0600_0209));
    attrs.set_domain_parameters(&[0x01, 0x00, 0x01]);
    assert!(attrs.has_auxiliary_resources());

    attrs.reset();
    assert_eq!(attrs, KeyAttributes::INIT);

    attrs.set_bits(2048);
    assert_eq!(attrs.bits(), 2048);
    assert!(!attrs.has_auxiliary_resources());
}

#[test]
fn dropping_a_record_with_resources_releases_them() {
    common::init_tracing();

    let mut attrs = KeyAttributes::init();
    attrs.set_domain_parameters(b"dh-group");
    let copy = attrs.clone();
    drop(attrs);
    assert_eq!(copy.domain_parameters(), b"dh-group");
}

#[test]
fn records_are_shareable_for_concurrent_reads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<KeyAttributes>();

    let mut attrs = KeyAttributes::init().with_bits(256);
    attrs.set_domain_parameters(b"shared");
    let attrs = std::sync::Arc::new(attrs);

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let attrs = std::sync::Arc::clone(&attrs);
            std::thread::spawn(move || (attrs.bits(), attrs.domain_parameters().to_vec()))
        })
        .collect();
    for reader in readers {
        let (bits, params) = reader.join().expect("reader thread");
        assert_eq!(bits, 256);
        assert_eq!(params, b"shared");
    }
}
