//! Encrypted values and the transform-block chain they carry.

use crate::error::{CoreError, CoreResult};
use crate::group::{GtElement, PublicKey, TwistPoint, GT_ELEMENT_LEN, PUBLIC_KEY_LEN};
use crate::hash::AuthHash;
use crate::sign::{Signable, Signed};

macro_rules! gt_component {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        pub struct $name(GtElement);

        impl $name {
            pub const LEN: usize = GT_ELEMENT_LEN;

            pub fn from_bytes(bytes: &[u8]) -> CoreResult<Self> {
                GtElement::from_bytes(bytes).map(Self)
            }

            pub fn to_bytes(&self) -> [u8; GT_ELEMENT_LEN] {
                self.0.to_bytes()
            }

            pub(crate) fn new(element: GtElement) -> Self {
                Self(element)
            }

            pub(crate) fn element(&self) -> &GtElement {
                &self.0
            }
        }
    };
}

gt_component!(
    /// `plaintext · S`, where `S` is the level-0 shared secret.
    EncryptedMessage
);
gt_component!(
    /// A temp key (or the value needed to recover the previous mask) hidden
    /// under a pairing mask.
    EncryptedTempKey
);

/// `H2(K) - sk · g2`: the part of a transform key that ties the temp key to
/// the delegator's private key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HashedTempKey(TwistPoint);

impl HashedTempKey {
    pub const LEN: usize = TwistPoint::LEN;

    pub fn from_bytes(bytes: &[u8]) -> CoreResult<Self> {
        TwistPoint::from_bytes(bytes).map(Self)
    }

    pub fn to_bytes(&self) -> [u8; TwistPoint::LEN] {
        self.0.to_bytes()
    }

    pub(crate) fn new(point: TwistPoint) -> Self {
        Self(point)
    }

    pub(crate) fn point(&self) -> &TwistPoint {
        &self.0
    }
}

/// One hop of transformation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransformBlock {
    public_key: PublicKey,
    encrypted_temp_key: EncryptedTempKey,
    random_transform_public_key: PublicKey,
    random_transform_encrypted_temp_key: EncryptedTempKey,
}

impl TransformBlock {
    pub const LEN: usize = 2 * PUBLIC_KEY_LEN + 2 * GT_ELEMENT_LEN;

    pub fn new(
        public_key: PublicKey,
        encrypted_temp_key: EncryptedTempKey,
        random_transform_public_key: PublicKey,
        random_transform_encrypted_temp_key: EncryptedTempKey,
    ) -> Self {
        Self {
            public_key,
            encrypted_temp_key,
            random_transform_public_key,
            random_transform_encrypted_temp_key,
        }
    }

    /// Ephemeral public key of the transform key used for this hop.
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn encrypted_temp_key(&self) -> &EncryptedTempKey {
        &self.encrypted_temp_key
    }

    pub fn random_transform_public_key(&self) -> &PublicKey {
        &self.random_transform_public_key
    }

    pub fn random_transform_encrypted_temp_key(&self) -> &EncryptedTempKey {
        &self.random_transform_encrypted_temp_key
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::LEN);
        out.extend_from_slice(&self.public_key.to_bytes());
        out.extend_from_slice(&self.encrypted_temp_key.to_bytes());
        out.extend_from_slice(&self.random_transform_public_key.to_bytes());
        out.extend_from_slice(&self.random_transform_encrypted_temp_key.to_bytes());
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> CoreResult<Self> {
        if bytes.len() != Self::LEN {
            return Err(CoreError::wrong_length("transform block", Self::LEN, bytes.len()));
        }
        let mut reader = Reader::new(bytes);
        Ok(Self {
            public_key: PublicKey::from_bytes(reader.take(PUBLIC_KEY_LEN))?,
            encrypted_temp_key: EncryptedTempKey::from_bytes(reader.take(GT_ELEMENT_LEN))?,
            random_transform_public_key: PublicKey::from_bytes(reader.take(PUBLIC_KEY_LEN))?,
            random_transform_encrypted_temp_key: EncryptedTempKey::from_bytes(
                reader.take(GT_ELEMENT_LEN),
            )?,
        })
    }
}

/// Append-only list of transform blocks, oldest first.
///
/// There is no mutable access: appending returns a new chain and leaves
/// `self` untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransformChain {
    blocks: Vec<TransformBlock>,
}

impl TransformChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_blocks(blocks: Vec<TransformBlock>) -> Self {
        Self { blocks }
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn last(&self) -> Option<&TransformBlock> {
        self.blocks.last()
    }

    pub fn get(&self, index: usize) -> Option<&TransformBlock> {
        self.blocks.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TransformBlock> {
        self.blocks.iter()
    }

    pub fn as_slice(&self) -> &[TransformBlock] {
        &self.blocks
    }

    #[must_use]
    pub fn appended(&self, block: TransformBlock) -> Self {
        let mut blocks = Vec::with_capacity(self.blocks.len() + 1);
        blocks.extend_from_slice(&self.blocks);
        blocks.push(block);
        Self { blocks }
    }
}

impl<'a> IntoIterator for &'a TransformChain {
    type Item = &'a TransformBlock;
    type IntoIter = std::slice::Iter<'a, TransformBlock>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}

/// The signed body of an encrypted value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ciphertext {
    ephemeral_public_key: PublicKey,
    encrypted_message: EncryptedMessage,
    auth_hash: AuthHash,
    transform_blocks: TransformChain,
}

/// Fixed prefix of the payload encoding, before any transform blocks.
pub const CIPHERTEXT_HEADER_LEN: usize = PUBLIC_KEY_LEN + GT_ELEMENT_LEN + AuthHash::LEN;

impl Ciphertext {
    pub fn new(
        ephemeral_public_key: PublicKey,
        encrypted_message: EncryptedMessage,
        auth_hash: AuthHash,
        transform_blocks: TransformChain,
    ) -> Self {
        Self {
            ephemeral_public_key,
            encrypted_message,
            auth_hash,
            transform_blocks,
        }
    }

    pub fn ephemeral_public_key(&self) -> &PublicKey {
        &self.ephemeral_public_key
    }

    pub fn encrypted_message(&self) -> &EncryptedMessage {
        &self.encrypted_message
    }

    pub fn auth_hash(&self) -> &AuthHash {
        &self.auth_hash
    }

    pub fn transform_blocks(&self) -> &TransformChain {
        &self.transform_blocks
    }

    /// Number of hops so far.
    pub fn level(&self) -> usize {
        self.transform_blocks.len()
    }

    /// Same header, one more block.
    pub(crate) fn with_block(&self, block: TransformBlock) -> Self {
        Self {
            transform_blocks: self.transform_blocks.appended(block),
            ..self.clone()
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(CIPHERTEXT_HEADER_LEN + self.level() * TransformBlock::LEN);
        out.extend_from_slice(&self.ephemeral_public_key.to_bytes());
        out.extend_from_slice(&self.encrypted_message.to_bytes());
        out.extend_from_slice(self.auth_hash.as_bytes());
        for block in &self.transform_blocks {
            out.extend_from_slice(&block.to_bytes());
        }
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> CoreResult<Self> {
        if bytes.len() < CIPHERTEXT_HEADER_LEN
            || (bytes.len() - CIPHERTEXT_HEADER_LEN) % TransformBlock::LEN != 0
        {
            return Err(CoreError::Validation(format!(
                "encrypted value payload has invalid length {}",
                bytes.len()
            )));
        }
        let mut reader = Reader::new(bytes);
        let ephemeral_public_key = PublicKey::from_bytes(reader.take(PUBLIC_KEY_LEN))?;
        let encrypted_message = EncryptedMessage::from_bytes(reader.take(GT_ELEMENT_LEN))?;
        let auth_hash = AuthHash::from_bytes(reader.take(AuthHash::LEN))?;
        let blocks = reader
            .rest()
            .chunks_exact(TransformBlock::LEN)
            .map(TransformBlock::from_bytes)
            .collect::<CoreResult<Vec<_>>>()?;
        Ok(Self::new(
            ephemeral_public_key,
            encrypted_message,
            auth_hash,
            TransformChain::from_blocks(blocks),
        ))
    }
}

impl Signable for Ciphertext {
    fn signable_bytes(&self) -> Vec<u8> {
        self.to_bytes()
    }
}

/// A signed ciphertext at any level of transformation.
pub type EncryptedValue = Signed<Ciphertext>;

impl Signed<Ciphertext> {
    /// Number of hops so far.
    pub fn level(&self) -> usize {
        self.payload().level()
    }
}

/// Cursor over a buffer whose total length was already checked.
struct Reader<'a> {
    bytes: &'a [u8],
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    fn take(&mut self, len: usize) -> &'a [u8] {
        let split = len.min(self.bytes.len());
        let (head, tail) = self.bytes.split_at(split);
        self.bytes = tail;
        head
    }

    fn rest(self) -> &'a [u8] {
        self.bytes
    }
}
