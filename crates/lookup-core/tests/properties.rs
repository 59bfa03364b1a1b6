//! Property-Based Tests for the key codec and signer
//!
//! These tests verify that, for arbitrary inputs:
//! 1. CODEC: hex decoding and encoding round-trip; malformed hex is rejected
//! 2. DETERMINISM: identical seed and message always yield the identical signature
//! 3. LENGTH: only 32-byte seeds can sign
//! 4. VERIFICATION: a signature verifies against the seed's public key and only
//!    for the message it was produced over

use lookup_core::{
    bytes_to_hex, hex_to_bytes, sign, Colour, CoreError, Entry, PublicKey, SigningSeed,
    SEED_LENGTH, SIGNATURE_LENGTH,
};
use proptest::prelude::*;

// =============================================================================
// CODEC
// =============================================================================

proptest! {
    #[test]
    fn prop_hex_roundtrip(bytes in prop::collection::vec(any::<u8>(), 0..128)) {
        let hex = bytes_to_hex(&bytes);
        prop_assert_eq!(hex_to_bytes(&hex).unwrap(), bytes);
    }

    #[test]
    fn prop_hex_normalizes_case(hex in "([0-9a-fA-F]{2}){0,64}") {
        let decoded = hex_to_bytes(&hex).unwrap();
        prop_assert_eq!(bytes_to_hex(&decoded), hex.to_lowercase());
    }

    #[test]
    fn prop_odd_length_rejected(hex in "[0-9a-f]{1}([0-9a-f]{2}){0,32}") {
        let result = hex_to_bytes(&hex);
        prop_assert!(matches!(result, Err(CoreError::InvalidEncoding(_))));
    }

    #[test]
    fn prop_non_hex_rejected(
        prefix in "([0-9a-f]{2}){0,8}",
        bad in "[g-zG-Z]",
        pad in "[0-9a-f]",
    ) {
        let hex = format!("{}{}{}", prefix, bad, pad);
        let result = hex_to_bytes(&hex);
        prop_assert!(matches!(result, Err(CoreError::InvalidEncoding(_))));
    }
}

// =============================================================================
// SIGNER
// =============================================================================

proptest! {
    #[test]
    fn prop_sign_deterministic(seed in prop::array::uniform32(any::<u8>()), message in ".{0,64}") {
        let key = bytes_to_hex(&seed);
        let first = sign(&message, &key).unwrap();
        let second = sign(&message, &key).unwrap();

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.len(), SIGNATURE_LENGTH * 2);
    }

    #[test]
    fn prop_wrong_seed_length_rejected(
        seed in prop::collection::vec(any::<u8>(), 0..64)
            .prop_filter("not a seed", |s| s.len() != SEED_LENGTH),
    ) {
        let result = sign("login", &bytes_to_hex(&seed));
        prop_assert_eq!(
            result,
            Err(CoreError::InvalidKeyLength { expected: SEED_LENGTH, actual: seed.len() })
        );
    }

    #[test]
    fn prop_signature_verifies_only_its_message(
        seed in prop::array::uniform32(any::<u8>()),
        message in "[A-Z0-9]{1,16}",
        other in "[a-z]{1,16}",
    ) {
        let seed = SigningSeed::from_bytes(&seed).unwrap();
        let public = PublicKey::from_hex(&seed.public_key().to_hex()).unwrap();
        let signature = seed.sign(&message);

        prop_assert!(public.verify(&message, &signature).is_ok());
        prop_assert!(public.verify(&other, &signature).is_err());
    }
}

// =============================================================================
// ENTRY ENCODING
// =============================================================================

proptest! {
    #[test]
    fn prop_entry_survives_transport(
        name in "[A-Za-z ]{1,24}",
        weight in any::<u32>(),
        year in 1800u64..2100,
        colour_index in 0usize..6,
    ) {
        let entry = Entry::new(name, weight as u64, Colour::ALL[colour_index], year);
        let decoded = Entry::from_json(&entry.to_json().unwrap()).unwrap();
        prop_assert_eq!(decoded, entry);
    }
}

#[test]
fn keys_from_random_seeds_sign_and_verify() {
    use rand::RngCore;

    let mut seed = [0u8; SEED_LENGTH];
    rand::thread_rng().fill_bytes(&mut seed);

    let key = bytes_to_hex(&seed);
    let signature = sign("ABC123", &key).unwrap();
    let public = SigningSeed::from_hex(&key).unwrap().public_key();

    assert!(public.verify("ABC123", &signature).is_ok());
}
