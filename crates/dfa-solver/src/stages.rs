//! The nine guess-and-filter stages.
//!
//! Each stage is a pure function of the sample set and of the values earlier
//! stages produced; [`crate::recover`] threads those values through in the
//! fixed order below. Positions are round-10 key / ciphertext byte indices.
//!
//! For a pair `(c, f)`, a key guess `k` at position `p` and a correction `x`
//! (a solved round-10 key difference, or 0), the observed difference is
//! `d_p = S⁻¹(c[p] ^ k) ^ S⁻¹(f[p] ^ k ^ x)`. Writing `2·v = xtime(v)` and
//! `3·v = xtime(v) ^ v`:
//!
//! | stage | solves    | relation                 | faulty-side corrections |
//! |-------|-----------|--------------------------|-------------------------|
//! | 1     | k12, k9   | `d12 = 2·d9`             |                         |
//! | 2     | k6, Δ1    | `d9 = d6`                | 6: Δ1                   |
//! | 3     | k3, Δ2    | `d3 = Δ2 ^ 3·d9`         | 3: Δ2                   |
//! | 4     | k5, k15   | `d15 = Δ2 ^ 3·d5`        |                         |
//! | 5     | k8, Δ0    | `d8 = Δ0 ^ 2·d5`         |                         |
//! | 6     | k2        | `d2 = d5`                | 2: Δ1                   |
//! | 7     | k1, k4    | `d4 = 2·d1`              | 4: Δ0                   |
//! | 8     | k11, k14  | `d11 = Δ2 ^ 3·d14`       | 11: Δ2, 14: Δ1          |
//! | 9     | k0, k13   | `d0 = Δ0 ^ 2·d13`        | 0: Δ0                   |
//! | 9     | k7, k10   | `d7 = Δ2 ^ 3·d10`        | 10: Δ1                  |
//!
//! Every candidate must satisfy its relation for all pairs, and exactly one
//! candidate may survive.

use aes_core::{inv_sbox, xtime};

use crate::error::{RecoveryError, Stage};
use crate::sample::{CiphertextPair, SampleSet};
use crate::search::{search_byte, search_pair};

/// Last-SubBytes input difference at `pos` under key guess `key`.
#[inline]
fn diff(pair: &CiphertextPair, pos: usize, key: u8, correction: u8) -> u8 {
    inv_sbox(pair.correct[pos] ^ key) ^ inv_sbox(pair.faulty[pos] ^ key ^ correction)
}

#[inline]
fn triple(value: u8) -> u8 {
    xtime(value) ^ value
}

/// Stage 1: returns `(k12, k9)`.
pub fn solve_k12_k9(samples: &SampleSet) -> Result<(u8, u8), RecoveryError> {
    search_pair(Stage::K12K9, |k12, k9| {
        samples
            .iter()
            .all(|p| diff(p, 12, k12, 0) == xtime(diff(p, 9, k9, 0)))
    })
}

/// Stage 2: returns `(k6, delta1)`.
pub fn solve_k6_delta1(samples: &SampleSet, k9: u8) -> Result<(u8, u8), RecoveryError> {
    search_pair(Stage::K6Delta1, |k6, delta1| {
        samples
            .iter()
            .all(|p| diff(p, 9, k9, 0) == diff(p, 6, k6, delta1))
    })
}

/// Stage 3: returns `(k3, delta2)`.
pub fn solve_k3_delta2(samples: &SampleSet, k9: u8) -> Result<(u8, u8), RecoveryError> {
    search_pair(Stage::K3Delta2, |k3, delta2| {
        samples
            .iter()
            .all(|p| diff(p, 3, k3, delta2) == delta2 ^ triple(diff(p, 9, k9, 0)))
    })
}

/// Stage 4: returns `(k5, k15)`.
pub fn solve_k5_k15(samples: &SampleSet, delta2: u8) -> Result<(u8, u8), RecoveryError> {
    search_pair(Stage::K5K15, |k5, k15| {
        samples
            .iter()
            .all(|p| diff(p, 15, k15, 0) == delta2 ^ triple(diff(p, 5, k5, 0)))
    })
}

/// Stage 5: returns `(k8, delta0)`.
pub fn solve_k8_delta0(samples: &SampleSet, k5: u8) -> Result<(u8, u8), RecoveryError> {
    search_pair(Stage::K8Delta0, |k8, delta0| {
        samples
            .iter()
            .all(|p| diff(p, 8, k8, 0) == delta0 ^ xtime(diff(p, 5, k5, 0)))
    })
}

/// Stage 6: returns `k2`.
pub fn solve_k2(samples: &SampleSet, k5: u8, delta1: u8) -> Result<u8, RecoveryError> {
    search_byte(Stage::K2, |k2| {
        samples
            .iter()
            .all(|p| diff(p, 2, k2, delta1) == diff(p, 5, k5, 0))
    })
}

/// Stage 7: returns `(k1, k4)`.
pub fn solve_k1_k4(samples: &SampleSet, delta0: u8) -> Result<(u8, u8), RecoveryError> {
    search_pair(Stage::K1K4, |k1, k4| {
        samples
            .iter()
            .all(|p| diff(p, 4, k4, delta0) == xtime(diff(p, 1, k1, 0)))
    })
}

/// Stage 8: returns `(k11, k14)`.
pub fn solve_k11_k14(
    samples: &SampleSet,
    delta1: u8,
    delta2: u8,
) -> Result<(u8, u8), RecoveryError> {
    search_pair(Stage::K11K14, |k11, k14| {
        samples
            .iter()
            .all(|p| diff(p, 11, k11, delta2) == delta2 ^ triple(diff(p, 14, k14, delta1)))
    })
}

/// First half of stage 9: returns `(k0, k13)`.
pub fn solve_k0_k13(samples: &SampleSet, delta0: u8) -> Result<(u8, u8), RecoveryError> {
    search_pair(Stage::K0K13K7K10, |k0, k13| {
        samples
            .iter()
            .all(|p| diff(p, 0, k0, delta0) == delta0 ^ xtime(diff(p, 13, k13, 0)))
    })
}

/// Second half of stage 9: returns `(k7, k10)`.
pub fn solve_k7_k10(
    samples: &SampleSet,
    delta1: u8,
    delta2: u8,
) -> Result<(u8, u8), RecoveryError> {
    search_pair(Stage::K0K13K7K10, |k7, k10| {
        samples
            .iter()
            .all(|p| diff(p, 7, k7, 0) == delta2 ^ triple(diff(p, 10, k10, delta1)))
    })
}
