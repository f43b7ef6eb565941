use ark_bls12_377::Fq;
use ark_ff::Field;

use crate::{GateType, WireId};

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    #[error("Wire {0} has no assigned value")]
    UnassignedWire(WireId),
}
pub type GateError = Error;

/// A single arithmetic constraint. Unary gates repeat `wire_a` in `wire_b`,
/// constant gates point every input at their own output, and `AssertEqual`
/// has no output so `wire_c` repeats `wire_a`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Gate {
    pub wire_a: WireId,
    pub wire_b: WireId,
    pub wire_c: WireId,
    pub gate_type: GateType,
}

impl Gate {
    pub fn new(gate_type: GateType, wire_a: WireId, wire_b: WireId, wire_c: WireId) -> Self {
        Self {
            wire_a,
            wire_b,
            wire_c,
            gate_type,
        }
    }

    pub fn constant(value: Fq, wire_c: WireId) -> Self {
        Self::new(GateType::Constant(value), wire_c, wire_c, wire_c)
    }

    pub fn add(wire_a: WireId, wire_b: WireId, wire_c: WireId) -> Self {
        Self::new(GateType::Add, wire_a, wire_b, wire_c)
    }

    pub fn sub(wire_a: WireId, wire_b: WireId, wire_c: WireId) -> Self {
        Self::new(GateType::Sub, wire_a, wire_b, wire_c)
    }

    pub fn neg(wire_a: WireId, wire_c: WireId) -> Self {
        Self::new(GateType::Neg, wire_a, wire_a, wire_c)
    }

    pub fn mul(wire_a: WireId, wire_b: WireId, wire_c: WireId) -> Self {
        Self::new(GateType::Mul, wire_a, wire_b, wire_c)
    }

    pub fn scale(wire_a: WireId, k: Fq, wire_c: WireId) -> Self {
        Self::new(GateType::Scale(k), wire_a, wire_a, wire_c)
    }

    pub fn inverse(wire_a: WireId, wire_c: WireId) -> Self {
        Self::new(GateType::Inverse, wire_a, wire_a, wire_c)
    }

    pub fn assert_equal(wire_a: WireId, wire_b: WireId) -> Self {
        Self::new(GateType::AssertEqual, wire_a, wire_b, wire_a)
    }

    /// Wire written by this gate, if any.
    pub fn output(&self) -> Option<WireId> {
        match self.gate_type {
            GateType::AssertEqual => None,
            _ => Some(self.wire_c),
        }
    }

    /// Computes the output value from the inputs. Returns `None` when an input
    /// is unknown, when the gate has no output, or when inverting zero.
    pub fn evaluate(&self, get: impl Fn(WireId) -> Option<Fq>) -> Option<Fq> {
        match self.gate_type {
            GateType::Constant(k) => Some(k),
            GateType::Add => Some(get(self.wire_a)? + get(self.wire_b)?),
            GateType::Sub => Some(get(self.wire_a)? - get(self.wire_b)?),
            GateType::Neg => Some(-get(self.wire_a)?),
            GateType::Mul => Some(get(self.wire_a)? * get(self.wire_b)?),
            GateType::Scale(k) => Some(k * get(self.wire_a)?),
            GateType::Inverse => get(self.wire_a)?.inverse(),
            GateType::AssertEqual => None,
        }
    }

    /// Checks the relation against an assignment.
    pub fn is_satisfied(&self, get: impl Fn(WireId) -> Option<Fq>) -> Result<bool, GateError> {
        let value = |w: WireId| get(w).ok_or(GateError::UnassignedWire(w));

        let ok = match self.gate_type {
            GateType::Constant(k) => value(self.wire_c)? == k,
            GateType::Add => value(self.wire_a)? + value(self.wire_b)? == value(self.wire_c)?,
            GateType::Sub => value(self.wire_a)? - value(self.wire_b)? == value(self.wire_c)?,
            GateType::Neg => -value(self.wire_a)? == value(self.wire_c)?,
            GateType::Mul => value(self.wire_a)? * value(self.wire_b)? == value(self.wire_c)?,
            GateType::Scale(k) => k * value(self.wire_a)? == value(self.wire_c)?,
            GateType::Inverse => value(self.wire_a)? * value(self.wire_c)? == Fq::ONE,
            GateType::AssertEqual => value(self.wire_a)? == value(self.wire_b)?,
        };

        Ok(ok)
    }
}
