//! The staged schedule for vesting.
//!
//! The time since the starting point is split into stages of equal duration, and each stage
//! unlocks its own share of the balance, expressed in basis points.

use num_traits::{CheckedDiv, Unsigned};
use serde::{Deserialize, Serialize};

pub mod traits;

use traits::{FracScale, FracScaleError};

/// The basis points corresponding to the whole balance.
pub const FULL_BASIS_POINTS: u16 = 10_000;

/// An error that can happen when constructing a [`StagedSchedule`].
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// The stage duration is zero.
    #[error("stage duration must be positive")]
    ZeroStageDuration,
    /// There are no stages.
    #[error("schedule must have at least one stage")]
    EmptySchedule,
    /// A single stage unlocks more than the whole balance.
    #[error("stage {index} unlocks {basis_points} basis points, more than the whole balance")]
    StageAboveFull {
        /// The index of the stage.
        index: usize,
        /// The basis points of the stage.
        basis_points: u16,
    },
}

/// The staged schedule.
///
/// The stage shares are not required to sum up to [`FULL_BASIS_POINTS`]: the cumulative share is
/// capped at the whole balance, and after the last stage the whole balance is vested regardless.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    rename_all = "camelCase",
    try_from = "StagedScheduleParams<Duration>",
    bound(deserialize = "Duration: Deserialize<'de> + Unsigned")
)]
pub struct StagedSchedule<Duration> {
    /// The duration of every stage.
    stage_duration: Duration,
    /// The share unlocked at each stage, in basis points.
    percents: Vec<u16>,
}

/// The unvalidated [`StagedSchedule`].
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct StagedScheduleParams<Duration> {
    stage_duration: Duration,
    percents: Vec<u16>,
}

impl<Duration: Unsigned> TryFrom<StagedScheduleParams<Duration>> for StagedSchedule<Duration> {
    type Error = ScheduleError;

    fn try_from(params: StagedScheduleParams<Duration>) -> Result<Self, Self::Error> {
        Self::new(params.stage_duration, params.percents)
    }
}

impl<Duration: Unsigned> StagedSchedule<Duration> {
    /// Create a new schedule, checking the stages.
    pub fn new(stage_duration: Duration, percents: Vec<u16>) -> Result<Self, ScheduleError> {
        if stage_duration.is_zero() {
            return Err(ScheduleError::ZeroStageDuration);
        }
        if percents.is_empty() {
            return Err(ScheduleError::EmptySchedule);
        }
        if let Some((index, &basis_points)) = percents
            .iter()
            .enumerate()
            .find(|&(_, &basis_points)| basis_points > FULL_BASIS_POINTS)
        {
            return Err(ScheduleError::StageAboveFull {
                index,
                basis_points,
            });
        }
        Ok(Self {
            stage_duration,
            percents,
        })
    }

    /// The duration of every stage.
    pub fn stage_duration(&self) -> &Duration {
        &self.stage_duration
    }

    /// The share unlocked at each stage, in basis points.
    pub fn percents(&self) -> &[u16] {
        &self.percents
    }
}

impl<Duration> StagedSchedule<Duration>
where
    Duration: Unsigned + CheckedDiv + TryInto<usize> + Copy,
{
    /// The index of the stage the point `duration_since_starting_point` falls into.
    ///
    /// Saturates at [`usize::MAX`], any index past the last stage means the vesting is over.
    pub fn stage_at(&self, duration_since_starting_point: Duration) -> usize {
        duration_since_starting_point
            .checked_div(&self.stage_duration)
            .and_then(|stage| stage.try_into().ok())
            .unwrap_or(usize::MAX)
    }

    /// The cumulative share vested at the given point, in basis points.
    pub fn vested_basis_points(&self, duration_since_starting_point: Duration) -> u16 {
        let stage = self.stage_at(duration_since_starting_point);
        let Some(vested_stages) = self.percents.get(..=stage) else {
            return FULL_BASIS_POINTS;
        };
        let sum: u32 = vested_stages.iter().copied().map(u32::from).sum();
        // Lossless, as the sum is capped at a `u16` value.
        sum.min(FULL_BASIS_POINTS.into()) as u16
    }

    /// Compute the amount of balance vested at any given point in the schedule
    /// specified by `duration_since_starting_point`.
    ///
    /// Starts at the share of the first stage right at the starting point, and reaches the whole
    /// `balance` once the last stage is over.
    pub fn compute_vested_balance<S, Balance>(
        &self,
        balance: &Balance,
        duration_since_starting_point: Duration,
    ) -> Result<Balance, FracScaleError>
    where
        S: FracScale<Value = Balance, FracPart = u16>,
        Balance: Copy,
    {
        if self.stage_at(duration_since_starting_point) >= self.percents.len() {
            // We guarantee that we unlock everything.
            return Ok(*balance);
        }
        S::frac_scale(
            balance,
            &self.vested_basis_points(duration_since_starting_point),
            &FULL_BASIS_POINTS,
        )
    }
}
