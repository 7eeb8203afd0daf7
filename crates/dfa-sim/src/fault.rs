//! Round-constant fault description.

use aes_core::RCON;
use rand::RngCore;
use thiserror::Error;

/// Invalid fault parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum FaultError {
    /// The round-constant table has 10 entries.
    #[error("round-constant index {0} out of range (expected 0..10)")]
    IndexOutOfRange(usize),
}

/// XOR of `mask` into one entry of the round-constant table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RconFault {
    index: usize,
    mask: u8,
}

impl RconFault {
    /// Table index whose corruption the recovery stages expect.
    pub const LAST_ROUNDS_INDEX: usize = 7;

    /// Builds a fault on `RCON[index]`.
    pub fn new(index: usize, mask: u8) -> Result<Self, FaultError> {
        if index >= RCON.len() {
            return Err(FaultError::IndexOutOfRange(index));
        }
        Ok(Self { index, mask })
    }

    /// Fault on `RCON[7]`, the entry feeding the round-8 key.
    pub fn last_rounds(mask: u8) -> Self {
        Self {
            index: Self::LAST_ROUNDS_INDEX,
            mask,
        }
    }

    /// Fault on `RCON[7]` with a random non-zero mask.
    pub fn random_last_rounds<R: RngCore>(rng: &mut R) -> Self {
        let mask = loop {
            let candidate = (rng.next_u32() & 0xff) as u8;
            if candidate != 0 {
                break candidate;
            }
        };
        Self::last_rounds(mask)
    }

    /// Corrupted table index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// XOR mask.
    pub fn mask(&self) -> u8 {
        self.mask
    }

    /// Returns a copy of `rcon` with the fault applied.
    pub fn apply(&self, rcon: &[u8; 10]) -> [u8; 10] {
        let mut faulted = *rcon;
        faulted[self.index] ^= self.mask;
        faulted
    }
}
