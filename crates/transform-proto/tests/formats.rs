//! Serialization round trips through every format, checked semantically:
//! restored values still verify, transform, and decrypt.

use transform_core::{Api, EncryptedValue, KeyPair, Plaintext, PublicKey, SigningKeypair, TransformKey};
use transform_proto::format::MultiFormat;
use transform_proto::{detect_format, Format, ProtoError};

struct Fixture {
    api: Api,
    signing: SigningKeypair,
    alice: KeyPair,
    bob: KeyPair,
    plaintext: Plaintext,
    value: EncryptedValue,
    key: TransformKey,
}

fn fixture() -> Fixture {
    let api = Api::new();
    let signing = api.generate_ed25519_key_pair().unwrap();
    let alice = api.generate_key_pair().unwrap();
    let bob = api.generate_key_pair().unwrap();
    let plaintext = api.generate_plaintext().unwrap();
    let value = api.encrypt(&plaintext, &alice.public_key, &signing).unwrap();
    let key = api
        .generate_transform_key(&alice.private_key, &bob.public_key, &signing)
        .unwrap();
    Fixture {
        api,
        signing,
        alice,
        bob,
        plaintext,
        value,
        key,
    }
}

#[test]
fn test_encrypted_value_all_formats() {
    let f = fixture();
    let moved = f.api.transform(&f.value, &f.key, &f.signing).unwrap();

    let encodings: Vec<Vec<u8>> = vec![
        moved.to_binary(),
        moved.to_json().unwrap().into_bytes(),
        moved.to_armor().into_bytes(),
    ];
    for (encoded, expected) in encodings.iter().zip([Format::Binary, Format::Json, Format::Armor]) {
        assert_eq!(detect_format(encoded).unwrap(), expected);
        let restored = EncryptedValue::from_any(encoded).unwrap();
        assert_eq!(restored, moved);
        assert!(restored.verify());
        assert_eq!(f.api.decrypt(&restored, &f.bob.private_key).unwrap(), f.plaintext);
    }
}

#[test]
fn test_transform_key_restored_still_transforms() {
    let f = fixture();
    for encoded in [
        f.key.to_binary(),
        f.key.to_json().unwrap().into_bytes(),
        f.key.to_armor().into_bytes(),
    ] {
        let restored = TransformKey::from_any(&encoded).unwrap();
        assert_eq!(restored, f.key);
        assert!(restored.verify());

        let moved = f.api.transform(&f.value, &restored, &f.signing).unwrap();
        assert_eq!(f.api.decrypt(&moved, &f.bob.private_key).unwrap(), f.plaintext);
    }
}

#[test]
fn test_public_key_formats() {
    let f = fixture();
    let pk = f.alice.public_key;
    assert_eq!(PublicKey::from_any(&pk.to_binary()).unwrap(), pk);
    assert_eq!(PublicKey::from_json(&pk.to_json().unwrap()).unwrap(), pk);
    assert_eq!(PublicKey::from_armor(&pk.to_armor()).unwrap(), pk);
}

#[test]
fn test_armor_headers() {
    let f = fixture();
    let armored = f.value.to_armor();
    assert!(armored.starts_with("----- BEGIN TRANSFORM ENCRYPTED VALUE -----"));
    assert!(armored.contains("Version: 1\n"));
    assert!(armored.contains("Level: 0\n"));
}

#[test]
fn test_wrong_type_rejected() {
    let f = fixture();
    assert!(TransformKey::from_any(&f.value.to_binary()).is_err());
    assert!(matches!(
        TransformKey::from_armor(&f.value.to_armor()),
        Err(ProtoError::ArmorParse(_))
    ));
    assert!(matches!(
        EncryptedValue::from_json("{\"ephemeralPublicKey\": 1}"),
        Err(ProtoError::Json(_))
    ));
}

#[test]
fn test_decoded_tamper_caught_on_use() {
    let f = fixture();
    let mut bytes = f.value.to_binary();
    // inside the auth hash, after header (6) + EK (64) + message (384)
    bytes[6 + 64 + 384 + 3] ^= 0x01;
    let restored = EncryptedValue::from_binary(&bytes).unwrap();
    assert!(!restored.verify());
    assert!(f.api.decrypt(&restored, &f.alice.private_key).is_err());
}
