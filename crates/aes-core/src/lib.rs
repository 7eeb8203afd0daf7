//! AES-128 building blocks shared by the fault-analysis workspace.
//!
//! This crate mirrors the FIPS-197 specification and provides:
//! - The S-box, its inverse and the round constants.
//! - GF(2^8) doubling (`xtime`) and general multiplication.
//! - The AES-128 key schedule, forward and in reverse, with an injectable
//!   round-constant table so a faulted schedule can be reproduced.
//! - Single-block encryption from pre-expanded round keys, used to simulate
//!   correct and faulty devices.
//!
//! Nothing here is side-channel hardened; it targets clarity and testability.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod cipher;
mod gf;
mod key;
pub mod round;
mod sbox;
mod schedule;

pub use crate::block::{xor_blocks, xor_in_place, Block};
pub use crate::cipher::encrypt_block;
pub use crate::gf::{gmul, xtime};
pub use crate::key::{Aes128Key, RoundKeys};
pub use crate::sbox::{inv_sbox, sbox, INV_SBOX, RCON, SBOX};
pub use crate::schedule::{
    expand_key, expand_key_with_rcon, invert_key_schedule, invert_key_schedule_full,
};
