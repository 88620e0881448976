//! # transform-core: Multi-hop Transform Encryption
//!
//! A proxy re-encryption engine over the BN254 pairing. A value encrypted to
//! Alice can be handed to a proxy holding only a *transform key*; the proxy
//! moves it to Bob without ever seeing the plaintext or either private key,
//! and the hops chain: Alice → Bob → Carol → ….
//!
//! ## Features
//!
//! - **Multi-hop transformation**: each hop appends a block, nothing is rewritten
//! - **Ed25519-signed structures**: every encrypted value and transform key is sealed
//! - **Key augmentation**: split a private key between a device and a server
//! - **Schnorr signatures** over the same keys, with augmented verification
//!
//! ## Example: Proxy Transformation
//!
//! ```rust
//! use transform_core::Api;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let api = Api::new();
//! let signing = api.generate_ed25519_key_pair()?;
//!
//! // Alice and Bob generate keys
//! let alice = api.generate_key_pair()?;
//! let bob = api.generate_key_pair()?;
//!
//! // Alice encrypts for herself
//! let plaintext = api.generate_plaintext()?;
//! let encrypted = api.encrypt(&plaintext, &alice.public_key, &signing)?;
//!
//! // Alice delegates to Bob
//! let key = api.generate_transform_key(&alice.private_key, &bob.public_key, &signing)?;
//!
//! // Proxy transforms (no access to plaintext!)
//! let for_bob = api.transform(&encrypted, &key, &signing)?;
//!
//! // Bob decrypts
//! assert_eq!(api.decrypt(&for_bob, &bob.private_key)?, plaintext);
//!
//! // The plaintext is a group element; derive a symmetric key from it
//! let _dem_key = plaintext.derive_symmetric_key();
//! # Ok(())
//! # }
//! ```
//!
//! ## Non-Determinism
//!
//! Every encryption, transform key and transform samples fresh randomness,
//! so the same inputs never produce the same bytes twice. **Test semantic
//! correctness**, not byte equality. For reproducible vectors configure a
//! seeded random source (see [`config`]); never do so in production.

pub mod api;
pub mod augment;
pub mod config;
pub mod error;
pub mod group;
pub mod hash;
pub mod keys;
pub mod pre;
pub mod random;
pub mod sign;

pub use api::Api;
pub use augment::{
    add_private_keys, augment_public_key, augment_transform_key, subtract_private_keys, KeyShares,
};
pub use config::EngineConfig;
pub use error::{CoreError, CoreResult};
pub use group::{PrivateKey, PublicKey};
pub use hash::{hash256, AuthHash};
pub use keys::{
    compute_public_key, derive_symmetric_key, generate_key_pair, generate_plaintext, KeyPair,
    Plaintext,
};
pub use pre::{
    decrypt, encrypt, generate_transform_key, transform, transform_key_to_bytes, EncryptedValue,
    TransformBlock, TransformChain, TransformKey,
};
pub use random::{OsRandom, RandomSource, SeededRandom};
pub use sign::{
    compute_ed25519_public_key, ed25519_sign, ed25519_verify, generate_ed25519_key_pair,
    schnorr_sign, schnorr_verify,
    Ed25519Signature, PublicSigningKey, SchnorrSignature, Signed, SigningKeypair, Unsigned,
};
