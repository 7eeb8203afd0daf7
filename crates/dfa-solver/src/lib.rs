//! Key recovery for AES-128 from correct/faulty ciphertext pairs.
//!
//! A single fault in the round-constant table, striking before the key
//! schedule derives the round-8 key, perturbs row 0 of the state entering
//! round 9 and the round-9 and round-10 keys. Round 9's MixColumns spreads
//! each perturbed byte over its column with coefficients `(2, 1, 1, 3)`, so
//! after undoing the final SubBytes with the right key bytes the correct and
//! faulty ciphertexts differ by values tied together through GF(2^8)
//! doubling. Nine exhaustive guess-and-filter stages exploit those relations
//! to recover the round-10 key byte by byte; the key schedule run backward
//! then yields the master key.
//!
//! ```no_run
//! use dfa_solver::{recover, SampleSet};
//!
//! # fn load() -> (String, String) { unimplemented!() }
//! let (correct, faulty) = load();
//! let samples = SampleSet::from_hex(&correct, &faulty)?;
//! match recover(&samples) {
//!     Ok(found) => println!("master key {}", hex::encode(found.master_key.as_bytes())),
//!     Err(err) => eprintln!("{err}"),
//! }
//! # Ok::<(), dfa_solver::SampleSetError>(())
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod error;
mod recover;
mod sample;
mod search;
pub mod stages;

pub use crate::error::{RecoveryError, Stage};
pub use crate::recover::{recover, recover_with, Recovery, StageReport};
pub use crate::sample::{
    format_hex_blocks, parse_hex_blocks, CiphertextPair, SampleSet, SampleSetError,
};
