//! Recovery failure reporting.

use core::fmt;

use thiserror::Error;

/// The nine key-recovery stages, in execution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stage {
    /// Key bytes 12 and 9.
    K12K9,
    /// Key byte 6 and delta slot 1.
    K6Delta1,
    /// Key byte 3 and delta slot 2.
    K3Delta2,
    /// Key bytes 5 and 15.
    K5K15,
    /// Key byte 8 and delta slot 0.
    K8Delta0,
    /// Key byte 2.
    K2,
    /// Key bytes 1 and 4.
    K1K4,
    /// Key bytes 11 and 14.
    K11K14,
    /// Key bytes 0 and 13, then 7 and 10.
    K0K13K7K10,
}

impl Stage {
    /// All stages in the order the engine runs them.
    pub const ALL: [Stage; 9] = [
        Stage::K12K9,
        Stage::K6Delta1,
        Stage::K3Delta2,
        Stage::K5K15,
        Stage::K8Delta0,
        Stage::K2,
        Stage::K1K4,
        Stage::K11K14,
        Stage::K0K13K7K10,
    ];

    /// One-based stage number.
    pub fn number(self) -> u8 {
        self as u8 + 1
    }

    /// Human-readable list of the unknowns this stage solves.
    pub fn unknowns(self) -> &'static str {
        match self {
            Stage::K12K9 => "k12, k9",
            Stage::K6Delta1 => "k6, delta1",
            Stage::K3Delta2 => "k3, delta2",
            Stage::K5K15 => "k5, k15",
            Stage::K8Delta0 => "k8, delta0",
            Stage::K2 => "k2",
            Stage::K1K4 => "k1, k4",
            Stage::K11K14 => "k11, k14",
            Stage::K0K13K7K10 => "k0, k13, k7, k10",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stage {} ({})", self.number(), self.unknowns())
    }
}

/// Why a recovery attempt produced no key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum RecoveryError {
    /// A stage's filter left zero or several candidate assignments.
    #[error("non-unique candidate set at {stage}: {survivors} survivors")]
    NonUniqueCandidate {
        /// The stage that could not settle on one assignment.
        stage: Stage,
        /// How many assignments satisfied every pair.
        survivors: usize,
    },
}

impl RecoveryError {
    /// The failing stage.
    pub fn stage(&self) -> Stage {
        match self {
            RecoveryError::NonUniqueCandidate { stage, .. } => *stage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_are_numbered_in_order() {
        for (i, stage) in Stage::ALL.iter().enumerate() {
            assert_eq!(stage.number() as usize, i + 1);
        }
    }

    #[test]
    fn error_message_names_stage_and_count() {
        let err = RecoveryError::NonUniqueCandidate {
            stage: Stage::K3Delta2,
            survivors: 0,
        };
        assert_eq!(
            err.to_string(),
            "non-unique candidate set at stage 3 (k3, delta2): 0 survivors"
        );
        assert_eq!(err.stage(), Stage::K3Delta2);
    }
}
