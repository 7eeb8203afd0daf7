//! Stage sequencing and master-key derivation.

use core::fmt;

use aes_core::{invert_key_schedule, Aes128Key, Block};

use crate::error::{RecoveryError, Stage};
use crate::sample::SampleSet;
use crate::stages;

/// Result of a successful recovery.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Recovery {
    /// The AES-128 master (round-0) key.
    pub master_key: Aes128Key,
    /// The round-10 key recovered by the nine stages.
    pub last_round_key: Block,
    /// Round-10 key differences induced by the fault, by delta slot.
    pub deltas: [u8; 3],
}

/// Snapshot of what is known after a stage succeeds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StageReport {
    /// The stage that just completed.
    pub stage: Stage,
    /// Round-10 key bytes solved so far.
    pub key: [Option<u8>; 16],
    /// Delta slots solved so far.
    pub deltas: [Option<u8>; 3],
}

impl StageReport {
    fn start() -> Self {
        Self {
            stage: Stage::K12K9,
            key: [None; 16],
            deltas: [None; 3],
        }
    }

    fn advance(&mut self, stage: Stage, key: &[(usize, u8)], deltas: &[(usize, u8)]) -> &Self {
        self.stage = stage;
        for &(pos, value) in key {
            self.key[pos] = Some(value);
        }
        for &(slot, value) in deltas {
            self.deltas[slot] = Some(value);
        }
        self
    }
}

impl fmt::Display for StageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: key ", self.stage)?;
        for byte in &self.key {
            match byte {
                Some(value) => write!(f, "{value:02x}")?,
                None => f.write_str("..")?,
            }
        }
        f.write_str(" deltas")?;
        for delta in &self.deltas {
            match delta {
                Some(value) => write!(f, " {value:02x}")?,
                None => f.write_str(" ..")?,
            }
        }
        Ok(())
    }
}

/// Recovers the master key from a sample set.
///
/// Fails with [`RecoveryError::NonUniqueCandidate`] as soon as a stage does
/// not narrow its candidates down to exactly one; no key material is
/// returned in that case.
pub fn recover(samples: &SampleSet) -> Result<Recovery, RecoveryError> {
    recover_with(samples, |_| {})
}

/// Like [`recover`], calling `observer` after every successful stage.
pub fn recover_with<F>(samples: &SampleSet, mut observer: F) -> Result<Recovery, RecoveryError>
where
    F: FnMut(&StageReport),
{
    let mut report = StageReport::start();

    let (k12, k9) = stages::solve_k12_k9(samples)?;
    observer(report.advance(Stage::K12K9, &[(12, k12), (9, k9)], &[]));

    let (k6, delta1) = stages::solve_k6_delta1(samples, k9)?;
    observer(report.advance(Stage::K6Delta1, &[(6, k6)], &[(1, delta1)]));

    let (k3, delta2) = stages::solve_k3_delta2(samples, k9)?;
    observer(report.advance(Stage::K3Delta2, &[(3, k3)], &[(2, delta2)]));

    let (k5, k15) = stages::solve_k5_k15(samples, delta2)?;
    observer(report.advance(Stage::K5K15, &[(5, k5), (15, k15)], &[]));

    let (k8, delta0) = stages::solve_k8_delta0(samples, k5)?;
    observer(report.advance(Stage::K8Delta0, &[(8, k8)], &[(0, delta0)]));

    let k2 = stages::solve_k2(samples, k5, delta1)?;
    observer(report.advance(Stage::K2, &[(2, k2)], &[]));

    let (k1, k4) = stages::solve_k1_k4(samples, delta0)?;
    observer(report.advance(Stage::K1K4, &[(1, k1), (4, k4)], &[]));

    let (k11, k14) = stages::solve_k11_k14(samples, delta1, delta2)?;
    observer(report.advance(Stage::K11K14, &[(11, k11), (14, k14)], &[]));

    let (k0, k13) = stages::solve_k0_k13(samples, delta0)?;
    let (k7, k10) = stages::solve_k7_k10(samples, delta1, delta2)?;
    observer(report.advance(
        Stage::K0K13K7K10,
        &[(0, k0), (13, k13), (7, k7), (10, k10)],
        &[],
    ));

    let last_round_key = [
        k0, k1, k2, k3, k4, k5, k6, k7, k8, k9, k10, k11, k12, k13, k14, k15,
    ];
    Ok(Recovery {
        master_key: invert_key_schedule(&last_round_key),
        last_round_key,
        deltas: [delta0, delta1, delta2],
    })
}
