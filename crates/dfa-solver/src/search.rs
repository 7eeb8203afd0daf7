//! Exhaustive enumerate-and-filter over one or two unknown bytes.
//!
//! Candidates are evaluated independently, in parallel when the `parallel`
//! feature is on. Only the number of survivors and one representative are
//! kept, so the outcome does not depend on evaluation order: a unique
//! survivor is the same whichever thread finds it, and a failure reports the
//! same count.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{RecoveryError, Stage};

#[derive(Clone, Copy, Debug)]
struct Survivors {
    count: usize,
    any: Option<u32>,
}

impl Survivors {
    fn empty() -> Self {
        Self {
            count: 0,
            any: None,
        }
    }

    fn push(self, candidate: u32) -> Self {
        Self {
            count: self.count + 1,
            any: self.any.or(Some(candidate)),
        }
    }

    fn merge(self, other: Self) -> Self {
        Self {
            count: self.count + other.count,
            any: self.any.or(other.any),
        }
    }

    fn into_unique(self, stage: Stage) -> Result<u32, RecoveryError> {
        match (self.count, self.any) {
            (1, Some(candidate)) => Ok(candidate),
            (survivors, _) => Err(RecoveryError::NonUniqueCandidate { stage, survivors }),
        }
    }
}

#[cfg(feature = "parallel")]
fn tally<F>(space: u32, accept: F) -> Survivors
where
    F: Fn(u32) -> bool + Sync + Send,
{
    (0..space)
        .into_par_iter()
        .filter(|&candidate| accept(candidate))
        .fold(Survivors::empty, Survivors::push)
        .reduce(Survivors::empty, Survivors::merge)
}

#[cfg(not(feature = "parallel"))]
fn tally<F>(space: u32, accept: F) -> Survivors
where
    F: Fn(u32) -> bool + Sync + Send,
{
    (0..space)
        .filter(|&candidate| accept(candidate))
        .fold(Survivors::empty(), Survivors::push)
}

/// Finds the unique byte accepted by `accept`.
pub(crate) fn search_byte<F>(stage: Stage, accept: F) -> Result<u8, RecoveryError>
where
    F: Fn(u8) -> bool + Sync + Send,
{
    tally(1 << 8, |candidate| accept(candidate as u8))
        .into_unique(stage)
        .map(|candidate| candidate as u8)
}

/// Finds the unique byte pair accepted by `accept`.
pub(crate) fn search_pair<F>(stage: Stage, accept: F) -> Result<(u8, u8), RecoveryError>
where
    F: Fn(u8, u8) -> bool + Sync + Send,
{
    tally(1 << 16, |candidate| accept((candidate >> 8) as u8, candidate as u8))
        .into_unique(stage)
        .map(|candidate| ((candidate >> 8) as u8, candidate as u8))
}
