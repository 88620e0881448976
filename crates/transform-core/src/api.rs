//! One-stop facade bundling every operation with a random source and config.

use tracing::debug;

use crate::augment::{self, KeyShares};
use crate::config::EngineConfig;
use crate::error::CoreResult;
use crate::group::{PrivateKey, PublicKey};
use crate::keys::{self, KeyPair, Plaintext};
use crate::pre::{self, EncryptedValue, TransformKey, TRANSFORM_KEY_LEN};
use crate::random::RandomSource;
use crate::sign::{self, Ed25519Signature, PublicSigningKey, SchnorrSignature, SigningKeypair};

/// The transform engine.
///
/// Holds no key material between calls; the only state is the random source
/// and the configuration, both shareable across threads.
pub struct Api {
    random: Box<dyn RandomSource>,
    config: EngineConfig,
}

impl Api {
    /// OS randomness, default configuration.
    pub fn new() -> Self {
        Self::from_config(EngineConfig::default())
    }

    pub fn from_config(config: EngineConfig) -> Self {
        Self {
            random: config.random_source(),
            config,
        }
    }

    /// Configuration from `transform-engine.toml` and `TRANSFORM_*` variables.
    pub fn load() -> CoreResult<Self> {
        Ok(Self::from_config(EngineConfig::load()?))
    }

    pub fn with_random_source(random: impl RandomSource + 'static) -> Self {
        Self {
            random: Box::new(random),
            config: EngineConfig::default(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // Key generation

    pub fn generate_key_pair(&self) -> CoreResult<KeyPair> {
        keys::generate_key_pair(self.random.as_ref())
    }

    pub fn generate_ed25519_key_pair(&self) -> CoreResult<SigningKeypair> {
        sign::generate_ed25519_key_pair(self.random.as_ref())
    }

    pub fn generate_plaintext(&self) -> CoreResult<Plaintext> {
        keys::generate_plaintext(self.random.as_ref())
    }

    pub fn compute_public_key(&self, private_key: &PrivateKey) -> CoreResult<PublicKey> {
        keys::compute_public_key(private_key)
    }

    pub fn derive_symmetric_key(&self, plaintext: &Plaintext) -> [u8; 32] {
        keys::derive_symmetric_key(plaintext)
    }

    // Protocol

    pub fn encrypt(
        &self,
        plaintext: &Plaintext,
        to_public_key: &PublicKey,
        signing_keypair: &SigningKeypair,
    ) -> CoreResult<EncryptedValue> {
        pre::encrypt(self.random.as_ref(), plaintext, to_public_key, signing_keypair)
    }

    pub fn generate_transform_key(
        &self,
        from_private_key: &PrivateKey,
        to_public_key: &PublicKey,
        signing_keypair: &SigningKeypair,
    ) -> CoreResult<TransformKey> {
        pre::generate_transform_key(self.random.as_ref(), from_private_key, to_public_key, signing_keypair)
    }

    /// One hop, subject to the configured `max_hops`.
    pub fn transform(
        &self,
        value: &EncryptedValue,
        key: &TransformKey,
        signing_keypair: &SigningKeypair,
    ) -> CoreResult<EncryptedValue> {
        if let Err(e) = self.config.check_hop_limit(value.level()) {
            debug!(level = value.level(), "hop limit reached");
            return Err(e);
        }
        pre::transform(self.random.as_ref(), value, key, signing_keypair)
    }

    pub fn decrypt(&self, value: &EncryptedValue, private_key: &PrivateKey) -> CoreResult<Plaintext> {
        pre::decrypt(value, private_key)
    }

    // Augmentation

    pub fn augment_public_key(&self, a: &PublicKey, b: &PublicKey) -> CoreResult<PublicKey> {
        augment::augment_public_key(a, b)
    }

    pub fn augment_transform_key(&self, key: &TransformKey, private_key: &PrivateKey) -> CoreResult<TransformKey> {
        augment::augment_transform_key(key, private_key)
    }

    pub fn add_private_keys(&self, a: &PrivateKey, b: &PrivateKey) -> CoreResult<PrivateKey> {
        augment::add_private_keys(a, b)
    }

    pub fn subtract_private_keys(&self, a: &PrivateKey, b: &PrivateKey) -> CoreResult<PrivateKey> {
        augment::subtract_private_keys(a, b)
    }

    pub fn split_private_key(&self, private_key: &PrivateKey) -> CoreResult<KeyShares> {
        KeyShares::split(self.random.as_ref(), private_key)
    }

    pub fn transform_key_to_bytes(&self, key: &TransformKey) -> [u8; TRANSFORM_KEY_LEN] {
        key.to_bytes()
    }

    // Signatures

    pub fn schnorr_sign(
        &self,
        private_key: &PrivateKey,
        public_key: &PublicKey,
        message: &[u8],
    ) -> CoreResult<SchnorrSignature> {
        sign::schnorr_sign(self.random.as_ref(), private_key, public_key, message)
    }

    pub fn schnorr_verify(
        &self,
        public_key: &PublicKey,
        augmenting_private_key: Option<&PrivateKey>,
        message: &[u8],
        signature: &SchnorrSignature,
    ) -> bool {
        sign::schnorr_verify(public_key, augmenting_private_key, message, signature)
    }

    pub fn ed25519_sign(&self, keypair: &SigningKeypair, message: &[u8]) -> Ed25519Signature {
        sign::ed25519_sign(keypair, message)
    }

    pub fn ed25519_verify(&self, public_key: &PublicSigningKey, message: &[u8], signature: &Ed25519Signature) -> bool {
        sign::ed25519_verify(public_key, message, signature)
    }

    pub fn compute_ed25519_public_key(&self, keypair: &SigningKeypair) -> PublicSigningKey {
        sign::compute_ed25519_public_key(keypair)
    }

    pub fn hash256(&self, bytes: &[u8]) -> [u8; 32] {
        crate::hash::hash256(bytes)
    }
}

impl Default for Api {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Api {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Api").field("config", &self.config).finish_non_exhaustive()
    }
}
