//! Unrolled Miller loop schedules.
//!
//! A schedule is the flat list of accumulator updates the loop performs.
//! Replaying it on plain integers (start at 1, double, add one, remember a
//! value, add the remembered value back) must land exactly on the ate loop
//! scalar; this is how a schedule is tied to the curve it was written for.

use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MillerStep {
    /// Doubling step on the identity accumulator, skipping the squaring.
    FirstDouble,
    /// Square the accumulator, then a doubling step.
    Double,
    /// Addition step with the input point.
    Add,
    /// Snapshot the accumulator and current point.
    Checkpoint,
    /// Multiply by the snapshot accumulator and add the snapshot point.
    MergeCheckpoint,
}

impl MillerStep {
    pub fn name(&self) -> &'static str {
        match self {
            MillerStep::FirstDouble => "first_double",
            MillerStep::Double => "double",
            MillerStep::Add => "add",
            MillerStep::Checkpoint => "checkpoint",
            MillerStep::MergeCheckpoint => "merge_checkpoint",
        }
    }

    fn is_doubling(&self) -> bool {
        matches!(self, MillerStep::FirstDouble | MillerStep::Double)
    }
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("first_double at step {0}, only allowed as the first step")]
    MisplacedFirstDouble(usize),
    #[error("merge_checkpoint at step {0} has no checkpoint to merge")]
    MergeWithoutCheckpoint(usize),
    #[error("merge_checkpoint at step {0} would add the snapshot point to itself")]
    MergeIntoSelf(usize),
    #[error("add at step {0} would add the input point to itself")]
    AddToSelf(usize),
    #[error("checkpoint at step {0}, only one checkpoint slot exists")]
    SecondCheckpoint(usize),
}

/// BLS12-377, `x = 0x8508c00000000001`. After the leading one the bits run
/// `00001 0100001 0001 1 0...01`; the `0100001` block equals the first
/// five-bit block `100001` = 33, so the state at 33Q is saved and merged
/// back after seven plain squarings instead of replaying its additions.
const BLS12_377_STAGES: [(MillerStep, usize); 12] = [
    (MillerStep::FirstDouble, 1),
    (MillerStep::Double, 4),
    (MillerStep::Add, 1),
    (MillerStep::Checkpoint, 1),
    (MillerStep::Double, 7),
    (MillerStep::MergeCheckpoint, 1),
    (MillerStep::Double, 4),
    (MillerStep::Add, 1),
    (MillerStep::Double, 1),
    (MillerStep::Add, 1),
    (MillerStep::Double, 46),
    (MillerStep::Add, 1),
];

/// Validated sequence of [`MillerStep`]s. Every schedule has at most one
/// `first_double`, placed first, and at most one `checkpoint`, placed before
/// any merge. No addition step ever meets the point it adds: an `add` is never
/// taken while the current point is still the input point, and a merge never
/// happens while the current point equals the snapshot point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<MillerStep>", into = "Vec<MillerStep>")]
pub struct LoopSchedule {
    steps: Vec<MillerStep>,
}

impl LoopSchedule {
    pub fn new(steps: Vec<MillerStep>) -> Result<Self, ScheduleError> {
        // Multiple of the input point the current point holds. Saturates on
        // overflow, which `replay` reports separately.
        let mut k: u128 = 1;
        let mut saved: Option<u128> = None;

        for (index, step) in steps.iter().enumerate() {
            match step {
                MillerStep::FirstDouble if index != 0 => {
                    return Err(ScheduleError::MisplacedFirstDouble(index));
                }
                MillerStep::FirstDouble | MillerStep::Double => k = k.saturating_mul(2),
                MillerStep::Add if k == 1 => return Err(ScheduleError::AddToSelf(index)),
                MillerStep::Add => k = k.saturating_add(1),
                MillerStep::Checkpoint if saved.is_some() => {
                    return Err(ScheduleError::SecondCheckpoint(index));
                }
                MillerStep::Checkpoint => saved = Some(k),
                MillerStep::MergeCheckpoint => match saved {
                    None => return Err(ScheduleError::MergeWithoutCheckpoint(index)),
                    Some(s) if s == k => return Err(ScheduleError::MergeIntoSelf(index)),
                    Some(s) => k = k.saturating_add(s),
                },
            }
        }

        Ok(Self { steps })
    }

    fn from_stages(stages: &[(MillerStep, usize)]) -> Result<Self, ScheduleError> {
        let steps = stages
            .iter()
            .flat_map(|(step, n)| std::iter::repeat_n(*step, *n))
            .collect();
        Self::new(steps)
    }

    /// Checkpointed schedule for the BLS12-377 ate loop.
    pub fn bls12_377() -> Self {
        Self::from_stages(&BLS12_377_STAGES).expect("built-in BLS12-377 schedule is well formed")
    }

    /// Plain MSB-first double-and-add over the bits of `scalar`. The leading
    /// one seeds the state, so `0` and `1` both give an empty schedule.
    pub fn double_and_add(scalar: u64) -> Self {
        let mut steps = Vec::new();

        if scalar > 1 {
            let top = 63 - scalar.leading_zeros();
            for i in (0..top).rev() {
                steps.push(if steps.is_empty() {
                    MillerStep::FirstDouble
                } else {
                    MillerStep::Double
                });
                if (scalar >> i) & 1 == 1 {
                    steps.push(MillerStep::Add);
                }
            }
        }

        Self { steps }
    }

    /// Integer the schedule multiplies the input point by, or `None` if it
    /// overflows `u64`.
    pub fn replay(&self) -> Option<u64> {
        let mut k: u128 = 1;
        let mut saved: u128 = 0;

        for step in &self.steps {
            match step {
                MillerStep::FirstDouble | MillerStep::Double => k = k.checked_mul(2)?,
                MillerStep::Add => k = k.checked_add(1)?,
                MillerStep::Checkpoint => saved = k,
                MillerStep::MergeCheckpoint => k = k.checked_add(saved)?,
            }
            if k > u128::from(u64::MAX) {
                return None;
            }
        }

        u64::try_from(k).ok()
    }

    pub fn steps(&self) -> &[MillerStep] {
        &self.steps
    }

    /// Number of doubling steps (accumulator squarings plus the fused first
    /// doubling). The merge stage is not counted.
    pub fn doubling_count(&self) -> usize {
        self.steps.iter().filter(|s| s.is_doubling()).count()
    }

    pub fn addition_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s, MillerStep::Add))
            .count()
    }

    /// Run-length encoded stages, `FirstDouble` and `Double` kept apart.
    pub fn stages(&self) -> Vec<(MillerStep, usize)> {
        self.steps
            .iter()
            .chunk_by(|s| **s)
            .into_iter()
            .map(|(step, run)| (step, run.count()))
            .collect()
    }
}

impl TryFrom<Vec<MillerStep>> for LoopSchedule {
    type Error = ScheduleError;

    fn try_from(steps: Vec<MillerStep>) -> Result<Self, Self::Error> {
        Self::new(steps)
    }
}

impl From<LoopSchedule> for Vec<MillerStep> {
    fn from(schedule: LoopSchedule) -> Self {
        schedule.steps
    }
}

impl fmt::Display for LoopSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stages = self
            .stages()
            .into_iter()
            .map(|(step, n)| match n {
                1 => step.name().to_string(),
                n => format!("{}x{n}", step.name()),
            })
            .join(", ");
        write!(f, "[{stages}]")
    }
}
