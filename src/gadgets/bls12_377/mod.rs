//! BLS12-377 pairing gadgets over the BW6-761 scalar field
//!
//! The BLS12-377 base field is the native field of the constraint system, so
//! `Fp` is a single wire and the tower `Fp2 -> Fp6 -> Fp12` is built from
//! plain field gates. On top of it sit affine G1/G2 points and the optimal
//! ate Miller loop.

pub mod context;
pub mod extension;
pub mod fp;
pub mod fp12;
pub mod fp2;
pub mod fp6;
pub mod g1;
pub mod g2;
pub mod pairing;
pub mod schedule;

pub use context::{BLS12_377, PairingContext, PairingError};
pub use extension::Extension;
pub use fp::Fp;
pub use fp2::Fp2;
pub use fp6::Fp6;
pub use fp12::Fp12;
pub use g1::G1Affine;
pub use g2::G2Affine;
pub use pairing::{Checkpoint, LineEvaluation, MillerState, line_coefficients, miller_loop};
pub use schedule::{LoopSchedule, MillerStep, ScheduleError};
