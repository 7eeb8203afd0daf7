//! Fixed vectors: key 00112233445566778899aabbccddeeff, plaintexts 01×16,
//! 02×16 and 03×16, RCON[7] corrupted by 0x10 on the faulty device.

#![allow(dead_code)]

use dfa_solver::SampleSet;

pub const MASTER_KEY: &str = "00112233445566778899aabbccddeeff";
pub const LAST_ROUND_KEY: &str = "36d024461d84b8375fc0f9c04cbab6bb";
pub const DELTAS: [u8; 3] = [0x10, 0x84, 0x52];

pub const CORRECT: [&str; 3] = [
    "3544e02ca33411cf4d5df8fcc6e7a5ec",
    "d42c1b103455e3d5c712425c37b95a0d",
    "d6478acfa61841918c8c51db6877e6f9",
];

pub const FAULTY: [&str; 3] = [
    "a57a261bbe46beaa53a6cef00a30f729",
    "cc10869a6cdf3affe49d33f2fce4ef46",
    "249c9c16f10e2980ad6f0adfa9efbfcf",
];

/// Same plaintexts, but the fault mask is 0x10, 0x20 and 0x40 respectively.
pub const FAULTY_MIXED: [&str; 3] = [
    "a57a261bbe46beaa53a6cef00a30f729",
    "ab121088a85b12885954f3f27814650e",
    "734e6c348b915bc62c581e0a6253a637",
];

pub fn block(text: &str) -> [u8; 16] {
    let bytes = hex::decode(text).expect("valid hex");
    bytes.as_slice().try_into().expect("16 bytes")
}

pub fn samples_from(correct: &[&str], faulty: &[&str]) -> SampleSet {
    let correct: Vec<_> = correct.iter().map(|c| block(c)).collect();
    let faulty: Vec<_> = faulty.iter().map(|f| block(f)).collect();
    SampleSet::from_ciphertexts(&correct, &faulty).expect("sample set")
}

pub fn reference_samples() -> SampleSet {
    samples_from(&CORRECT, &FAULTY)
}
