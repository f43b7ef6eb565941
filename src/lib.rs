pub mod circuit;
mod core;
pub mod gadgets;
mod math;

pub use core::{
    circuit::GateCount,
    gate::{Gate, GateError},
    gate_type::GateType,
    wire::{WireError, WireId},
};

pub use circuit::{Circuit, CircuitContext, CircuitError, GateCounter};
pub use gadgets::bls12_377::{
    BLS12_377, Checkpoint, LineEvaluation, LoopSchedule, MillerState, MillerStep, PairingContext,
    PairingError, ScheduleError, line_coefficients, miller_loop,
};
pub use math::*;
