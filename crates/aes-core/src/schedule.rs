//! AES-128 key expansion, forward and backward.
//!
//! Round keys are handled as 16-byte blocks holding four big-endian words
//! `w[4r..4r+4]`. The forward direction accepts the round-constant table as a
//! parameter so that a device with a corrupted table can be reproduced.

use crate::block::Block;
use crate::key::{Aes128Key, RoundKeys};
use crate::sbox::{sbox, RCON};

const ROUNDS: usize = 10;

/// `SubWord(RotWord(w))` applied to the last word of `block`.
fn sub_rot_last_word(block: &Block) -> [u8; 4] {
    [
        sbox(block[13]),
        sbox(block[14]),
        sbox(block[15]),
        sbox(block[12]),
    ]
}

/// Expands a 128-bit key into 11 round keys.
pub fn expand_key(key: &Aes128Key) -> RoundKeys {
    expand_key_with_rcon(key, &RCON)
}

/// Expands a key using an arbitrary round-constant table.
///
/// With [`RCON`] this is the standard schedule. Any other table models a
/// device whose stored round constants were corrupted.
pub fn expand_key_with_rcon(key: &Aes128Key, rcon: &[u8; 10]) -> RoundKeys {
    let mut round_keys = [[0u8; 16]; ROUNDS + 1];
    round_keys[0] = key.0;

    for round in 1..=ROUNDS {
        let prev = round_keys[round - 1];
        let mut word = sub_rot_last_word(&prev);
        word[0] ^= rcon[round - 1];

        let next = &mut round_keys[round];
        for (col, chunk) in next.chunks_exact_mut(4).enumerate() {
            for (row, byte) in chunk.iter_mut().enumerate() {
                word[row] ^= prev[col * 4 + row];
                *byte = word[row];
            }
        }
    }

    RoundKeys(round_keys)
}

/// Runs the key schedule backward from the round-10 key and returns all round keys.
pub fn invert_key_schedule_full(last_round_key: &Block) -> RoundKeys {
    let mut round_keys = [[0u8; 16]; ROUNDS + 1];
    round_keys[ROUNDS] = *last_round_key;

    for round in (1..=ROUNDS).rev() {
        let cur = round_keys[round];
        let mut prev = [0u8; 16];

        // w[i] = w[i-4] ^ w[i-1] for the three words that are not the first.
        for i in 4..16 {
            prev[i] = cur[i - 4] ^ cur[i];
        }

        let mut word = sub_rot_last_word(&prev);
        word[0] ^= RCON[round - 1];
        for i in 0..4 {
            prev[i] = cur[i] ^ word[i];
        }

        round_keys[round - 1] = prev;
    }

    RoundKeys(round_keys)
}

/// Recovers the master key from the round-10 key.
pub fn invert_key_schedule(last_round_key: &Block) -> Aes128Key {
    Aes128Key(*invert_key_schedule_full(last_round_key).get(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::xor_blocks;
    use proptest::prelude::*;
    use rand::{RngCore, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    const FIPS_KEY: [u8; 16] = [
        0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e,
        0x0f,
    ];
    const FIPS_ROUND1: [u8; 16] = [
        0xd6, 0xaa, 0x74, 0xfd, 0xd2, 0xaf, 0x72, 0xfa, 0xda, 0xa6, 0x78, 0xf1, 0xd6, 0xab, 0x76,
        0xfe,
    ];
    const FIPS_ROUND10: [u8; 16] = [
        0x13, 0x11, 0x1d, 0x7f, 0xe3, 0x94, 0x4a, 0x17, 0xf3, 0x07, 0xa7, 0x8b, 0x4d, 0x2b, 0x30,
        0xc5,
    ];

    #[test]
    fn expand_matches_fips_vector() {
        let rks = expand_key(&Aes128Key::from(FIPS_KEY));
        assert_eq!(rks.get(0), &FIPS_KEY);
        assert_eq!(rks.get(1), &FIPS_ROUND1);
        assert_eq!(rks.last(), &FIPS_ROUND10);
    }

    #[test]
    fn invert_matches_fips_vector() {
        assert_eq!(invert_key_schedule(&FIPS_ROUND10), Aes128Key::from(FIPS_KEY));
    }

    #[test]
    fn full_inversion_reproduces_every_round_key() {
        let mut rng = ChaCha20Rng::from_seed([7u8; 32]);
        for _ in 0..32 {
            let mut key = [0u8; 16];
            rng.fill_bytes(&mut key);
            let forward = expand_key(&Aes128Key::from(key));
            let backward = invert_key_schedule_full(forward.last());
            assert_eq!(forward, backward);
        }
    }

    #[test]
    fn corrupted_rcon_changes_only_later_round_keys() {
        let key = Aes128Key::from([
            0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd,
            0xee, 0xff,
        ]);
        let mut rcon = RCON;
        rcon[7] ^= 0x10;
        let good = expand_key(&key);
        let bad = expand_key_with_rcon(&key, &rcon);
        for round in 0..8 {
            assert_eq!(good.get(round), bad.get(round));
        }
        assert_eq!(
            xor_blocks(good.get(8), bad.get(8)),
            [0x10, 0, 0, 0, 0x10, 0, 0, 0, 0x10, 0, 0, 0, 0x10, 0, 0, 0]
        );
        assert_eq!(
            xor_blocks(good.last(), bad.last()),
            [
                0x10, 0x00, 0x84, 0x52, 0x10, 0x00, 0x84, 0x00, 0x00, 0x00, 0x84, 0x52, 0x00,
                0x00, 0x84, 0x00
            ]
        );
    }

    proptest! {
        #[test]
        fn reverse_schedule_round_trips(key in any::<[u8; 16]>()) {
            let key = Aes128Key::from(key);
            let last = *expand_key(&key).last();
            prop_assert_eq!(invert_key_schedule(&last), key);
        }
    }
}
