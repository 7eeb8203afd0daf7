//! AES-128 block encryption from expanded round keys.

use crate::block::Block;
use crate::key::RoundKeys;
use crate::round::{add_round_key, mix_columns, shift_rows, sub_bytes};

/// Encrypts a single 16-byte block with pre-expanded round keys.
///
/// The round keys need not come from the standard schedule, which is how a
/// device with a corrupted key schedule is simulated.
pub fn encrypt_block(block: &Block, round_keys: &RoundKeys) -> Block {
    let mut state = *block;
    add_round_key(&mut state, round_keys.get(0));

    for round_key in &round_keys.0[1..10] {
        sub_bytes(&mut state);
        shift_rows(&mut state);
        mix_columns(&mut state);
        add_round_key(&mut state, round_key);
    }

    sub_bytes(&mut state);
    shift_rows(&mut state);
    add_round_key(&mut state, round_keys.last());
    state
}
