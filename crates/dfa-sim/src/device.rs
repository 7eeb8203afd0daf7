//! Simulated device producing correct and faulty ciphertexts.

use aes_core::{
    encrypt_block, expand_key, expand_key_with_rcon, xor_blocks, Aes128Key, Block, RoundKeys, RCON,
};
use dfa_solver::{CiphertextPair, SampleSet, SampleSetError};
use rand::RngCore;

use crate::fault::RconFault;

/// A device holding one key, able to encrypt with and without its fault.
#[derive(Clone, Debug)]
pub struct FaultyDevice {
    correct: RoundKeys,
    faulty: RoundKeys,
    fault: RconFault,
}

impl FaultyDevice {
    /// Builds the device; both key schedules are expanded once.
    pub fn new(key: &Aes128Key, fault: RconFault) -> Self {
        Self {
            correct: expand_key(key),
            faulty: expand_key_with_rcon(key, &fault.apply(&RCON)),
            fault,
        }
    }

    /// The injected fault.
    pub fn fault(&self) -> RconFault {
        self.fault
    }

    /// Encrypts with the genuine round constants.
    pub fn encrypt_correct(&self, plaintext: &Block) -> Block {
        encrypt_block(plaintext, &self.correct)
    }

    /// Encrypts with the corrupted round constants.
    pub fn encrypt_faulty(&self, plaintext: &Block) -> Block {
        encrypt_block(plaintext, &self.faulty)
    }

    /// Encrypts `plaintext` both ways.
    pub fn pair(&self, plaintext: &Block) -> CiphertextPair {
        CiphertextPair::new(self.encrypt_correct(plaintext), self.encrypt_faulty(plaintext))
    }

    /// Builds a sample set from the given plaintexts.
    pub fn collect(&self, plaintexts: &[Block]) -> Result<SampleSet, SampleSetError> {
        SampleSet::new(plaintexts.iter().map(|pt| self.pair(pt)).collect())
    }

    /// Draws `n` random plaintexts and builds a sample set from them.
    pub fn collect_random<R: RngCore>(
        &self,
        rng: &mut R,
        n: usize,
    ) -> Result<SampleSet, SampleSetError> {
        self.collect(&random_plaintexts(rng, n))
    }

    /// Difference between the faulty and the genuine round-10 keys.
    pub fn round_key_difference(&self) -> Block {
        xor_blocks(self.correct.last(), self.faulty.last())
    }
}

/// Builds a sample set in which every pair may carry a different fault.
///
/// Such a set breaks the single-fault assumption and is expected to make
/// recovery fail.
pub fn collect_mixed(
    key: &Aes128Key,
    inputs: &[(Block, RconFault)],
) -> Result<SampleSet, SampleSetError> {
    let pairs = inputs
        .iter()
        .map(|(plaintext, fault)| FaultyDevice::new(key, *fault).pair(plaintext))
        .collect();
    SampleSet::new(pairs)
}

/// Draws `n` random plaintexts.
pub fn random_plaintexts<R: RngCore>(rng: &mut R, n: usize) -> Vec<Block> {
    (0..n)
        .map(|_| {
            let mut block = [0u8; 16];
            rng.fill_bytes(&mut block);
            block
        })
        .collect()
}

/// Draws a random AES-128 key.
pub fn random_key<R: RngCore>(rng: &mut R) -> Aes128Key {
    let mut key = [0u8; 16];
    rng.fill_bytes(&mut key);
    Aes128Key::from(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_key() -> Aes128Key {
        Aes128Key::from([
            0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd,
            0xee, 0xff,
        ])
    }

    #[test]
    fn zero_mask_is_no_fault() {
        let device = FaultyDevice::new(&reference_key(), RconFault::last_rounds(0));
        let pt = [0x01u8; 16];
        assert_eq!(device.encrypt_correct(&pt), device.encrypt_faulty(&pt));
        assert_eq!(device.round_key_difference(), [0u8; 16]);
    }

    #[test]
    fn reference_ciphertexts() {
        let device = FaultyDevice::new(&reference_key(), RconFault::last_rounds(0x10));
        let pair = device.pair(&[0x01u8; 16]);
        assert_eq!(
            pair.correct,
            [
                0x35, 0x44, 0xe0, 0x2c, 0xa3, 0x34, 0x11, 0xcf, 0x4d, 0x5d, 0xf8, 0xfc, 0xc6,
                0xe7, 0xa5, 0xec
            ]
        );
        assert_eq!(
            pair.faulty,
            [
                0xa5, 0x7a, 0x26, 0x1b, 0xbe, 0x46, 0xbe, 0xaa, 0x53, 0xa6, 0xce, 0xf0, 0x0a,
                0x30, 0xf7, 0x29
            ]
        );
    }

    #[test]
    fn key_difference_follows_delta_layout() {
        let device = FaultyDevice::new(&reference_key(), RconFault::last_rounds(0x10));
        let diff = device.round_key_difference();
        let (d0, d1, d2) = (diff[0], diff[2], diff[3]);
        assert_eq!(d0, 0x10);
        for (pos, &byte) in diff.iter().enumerate() {
            let expected = match pos {
                0 | 4 => d0,
                2 | 6 | 10 | 14 => d1,
                3 | 11 => d2,
                _ => 0,
            };
            assert_eq!(byte, expected, "position {pos}");
        }
    }

    #[test]
    fn faults_on_earlier_constants_are_modelled_too() {
        let fault = RconFault::new(0, 0x01).expect("fault");
        let device = FaultyDevice::new(&reference_key(), fault);
        assert_ne!(device.round_key_difference(), [0u8; 16]);
    }
}
