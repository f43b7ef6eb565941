use ark_bls12_377::Fq2;
use ark_ec::{bls12::Bls12Config, short_weierstrass::SWCurveConfig};
use num_bigint::BigInt;
use num_traits::ToPrimitive;
use once_cell::sync::Lazy;

use super::{
    extension::Extension,
    schedule::{LoopSchedule, ScheduleError},
};
use crate::math::{Literal, LiteralError, from_literal};

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum PairingError {
    #[error(transparent)]
    Literal(#[from] LiteralError),
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
    #[error("ate loop scalar {0} is outside [2, 2^64)")]
    AteLoopOutOfRange(BigInt),
    #[error("schedule replays to {replayed:?}, expected ate loop {ate_loop}")]
    ScheduleMismatch { ate_loop: u64, replayed: Option<u64> },
}

/// Shared BLS12-377 context.
pub static BLS12_377: Lazy<PairingContext> = Lazy::new(PairingContext::bls12_377);

/// Curve parameters for one pairing: ate loop scalar, tower, twist
/// coefficient and the loop schedule derived from the scalar. Immutable once
/// built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairingContext {
    ate_loop: u64,
    extension: Extension,
    b_twist: Fq2,
    schedule: LoopSchedule,
}

impl PairingContext {
    /// Picks the checkpointed BLS12-377 schedule when `ate_loop` is the
    /// BLS12-377 scalar and plain double-and-add otherwise.
    pub fn new(ate_loop: u64, extension: Extension, b_twist: Fq2) -> Result<Self, PairingError> {
        let schedule = if ate_loop == bls12_377_ate_loop() {
            LoopSchedule::bls12_377()
        } else {
            LoopSchedule::double_and_add(ate_loop)
        };

        Self::with_schedule(ate_loop, extension, b_twist, schedule)
    }

    /// Fails unless `schedule` replays to `ate_loop`.
    pub fn with_schedule(
        ate_loop: u64,
        extension: Extension,
        b_twist: Fq2,
        schedule: LoopSchedule,
    ) -> Result<Self, PairingError> {
        if ate_loop < 2 {
            return Err(PairingError::AteLoopOutOfRange(BigInt::from(ate_loop)));
        }

        let replayed = schedule.replay();
        if replayed != Some(ate_loop) {
            return Err(PairingError::ScheduleMismatch { ate_loop, replayed });
        }

        Ok(Self {
            ate_loop,
            extension,
            b_twist,
            schedule,
        })
    }

    pub fn from_literal(
        ate_loop: Literal<'_>,
        extension: Extension,
        b_twist: Fq2,
    ) -> Result<Self, PairingError> {
        let scalar = from_literal(ate_loop)?;
        let ate_loop = scalar
            .to_u64()
            .ok_or_else(|| PairingError::AteLoopOutOfRange(scalar.clone()))?;

        Self::new(ate_loop, extension, b_twist)
    }

    pub fn bls12_377() -> Self {
        Self::new(
            bls12_377_ate_loop(),
            Extension::bls12_377(),
            ark_bls12_377::g2::Config::COEFF_B,
        )
        .expect("BLS12-377 parameters are consistent")
    }

    pub fn ate_loop(&self) -> u64 {
        self.ate_loop
    }

    /// The 64 bits of the ate loop scalar, least significant first.
    pub fn ate_loop_bits(&self) -> Vec<bool> {
        let scalar = BigInt::from(self.ate_loop);
        (0..u64::BITS as u64).map(|i| scalar.bit(i)).collect()
    }

    pub fn extension(&self) -> &Extension {
        &self.extension
    }

    pub fn b_twist(&self) -> &Fq2 {
        &self.b_twist
    }

    pub fn schedule(&self) -> &LoopSchedule {
        &self.schedule
    }
}

fn bls12_377_ate_loop() -> u64 {
    ark_bls12_377::Config::X[0]
}
