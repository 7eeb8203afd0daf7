//! Software stand-in for the glitched target used in fault campaigns.
//!
//! The modelled fault corrupts one entry of the round-constant table and
//! stays in place for every later encryption, the way a glitched table held
//! in RAM does. Corrupting `RCON[7]` changes round keys 8 to 10, which is the
//! fault the nine recovery stages in `dfa-solver` are built for.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod device;
mod fault;

pub use crate::device::{collect_mixed, random_key, random_plaintexts, FaultyDevice};
pub use crate::fault::{FaultError, RconFault};
