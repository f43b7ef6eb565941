mod circuit_context;
mod gate_counter;

pub use circuit_context::CircuitContext;
pub use gate_counter::GateCounter;

pub use crate::core::circuit::{Circuit, CircuitError};
