//! Property-based tests for the serialization formats
//!
//! Restored values are checked semantically (they verify and decrypt), and
//! the decoders are fed arbitrary input to show they fail with errors rather
//! than panics.

#[cfg(feature = "proptest")]
mod proptest_suite {
    use proptest::prelude::*;
    use transform_core::config::RandomSourceConfig;
    use transform_core::{Api, EncryptedValue, EngineConfig, KeyPair, PublicKey, TransformKey};
    use transform_proto::armor::BEGIN_PREFIX;
    use transform_proto::binary::MAGIC;
    use transform_proto::{armor_decode, armor_encode, detect_format, ArmorType, Format, MultiFormat};

    fn seeded(seed: u64) -> Api {
        Api::from_config(EngineConfig {
            random_source: RandomSourceConfig::Seeded { seed },
            max_hops: None,
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(8))]

        /// Property: a value at any level survives every format and still decrypts
        #[test]
        fn prop_value_survives_every_format(seed in any::<u64>(), hops in 0usize..3) {
            let api = seeded(seed);
            let signing = api.generate_ed25519_key_pair().unwrap();
            let keys: Vec<KeyPair> = (0..=hops).map(|_| api.generate_key_pair().unwrap()).collect();
            let plaintext = api.generate_plaintext().unwrap();

            let mut value = api.encrypt(&plaintext, &keys[0].public_key, &signing).unwrap();
            for pair in keys.windows(2) {
                let key = api
                    .generate_transform_key(&pair[0].private_key, &pair[1].public_key, &signing)
                    .unwrap();
                value = api.transform(&value, &key, &signing).unwrap();
            }

            for encoded in [
                value.to_binary(),
                value.to_json().unwrap().into_bytes(),
                value.to_armor().into_bytes(),
            ] {
                let restored = EncryptedValue::from_any(&encoded).unwrap();
                prop_assert_eq!(restored.level(), hops);
                prop_assert!(restored.verify());
                prop_assert_eq!(api.decrypt(&restored, &keys[hops].private_key).unwrap(), plaintext.clone());
            }
        }

        /// Property: detect_format only reports a format whose marker is present
        #[test]
        fn prop_detect_format_is_consistent(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
            let start = bytes.iter().position(|b| !b.is_ascii_whitespace()).unwrap_or(bytes.len());
            match detect_format(&bytes) {
                Ok(Format::Binary) => prop_assert!(bytes.starts_with(MAGIC)),
                Ok(Format::Armor) => prop_assert!(bytes[start..].starts_with(BEGIN_PREFIX.as_bytes())),
                Ok(Format::Json) => prop_assert_eq!(bytes[start], b'{'),
                Err(_) => {}
            }
        }

        /// Property: decoding arbitrary framed bytes never panics, and never
        /// yields a value from random noise
        #[test]
        fn prop_binary_noise_is_rejected(
            kind in 1u8..4,
            body in prop::collection::vec(any::<u8>(), 0..2048),
        ) {
            let mut bytes = MAGIC.to_vec();
            bytes.push(1);
            bytes.push(kind);
            bytes.extend_from_slice(&body);

            prop_assert!(EncryptedValue::from_any(&bytes).is_err());
            prop_assert!(TransformKey::from_any(&bytes).is_err());
            prop_assert!(PublicKey::from_any(&bytes).is_err());
        }

        /// Property: armor_decode never panics on arbitrary text after a BEGIN line
        #[test]
        fn prop_armor_decode_handles_noise(label in "[A-Z ]{0,20}", rest in ".{0,256}") {
            let text = format!("{BEGIN_PREFIX}{label} -----\n{rest}");
            let _ = armor_decode(&text);
            let _ = armor_decode(&rest);
        }

        /// Property: any payload and simple headers survive armoring
        #[test]
        fn prop_armor_preserves_payload(
            payload in prop::collection::vec(any::<u8>(), 0..1024),
            version in "[0-9]{1,3}",
        ) {
            let armored = armor_encode(ArmorType::TransformKey, &[("Version", version.as_str())], &payload);
            let block = armor_decode(&armored).unwrap();
            prop_assert_eq!(block.headers.get("Version"), Some(&version));
            prop_assert_eq!(block.expect(ArmorType::TransformKey).unwrap(), payload);
        }
    }
}
