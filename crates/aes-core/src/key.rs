//! Key types for AES-128.

use crate::block::Block;

/// AES-128 master key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Aes128Key(pub [u8; 16]);

impl Aes128Key {
    /// Returns the raw key bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

impl From<[u8; 16]> for Aes128Key {
    fn from(value: [u8; 16]) -> Self {
        Self(value)
    }
}

/// The 11 round keys of AES-128; index 0 is the master key, index 10 the last-round key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundKeys(pub [Block; 11]);

impl RoundKeys {
    /// Returns the round key at the requested index (0..=10).
    #[inline]
    pub fn get(&self, round: usize) -> &Block {
        &self.0[round]
    }

    /// Returns the round-10 key.
    #[inline]
    pub fn last(&self) -> &Block {
        &self.0[10]
    }
}
