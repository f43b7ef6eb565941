use ark_bls12_377::Fq;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::{
    CircuitContext, Gate, GateError, GateType, WireId,
    core::wire::AssignedWires,
};

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum CircuitError {
    #[error("Wire {0} has no assigned value")]
    UnassignedWire(WireId),
    #[error("Gate #{index} ({gate_type}) is not satisfied")]
    UnsatisfiedGate { index: usize, gate_type: &'static str },
}

impl From<GateError> for CircuitError {
    fn from(err: GateError) -> Self {
        match err {
            GateError::UnassignedWire(w) => CircuitError::UnassignedWire(w),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateCount {
    pub constant: usize,
    pub add: usize,
    pub sub: usize,
    pub neg: usize,
    pub mul: usize,
    pub scale: usize,
    pub inverse: usize,
    pub assert_equal: usize,
}

impl GateCount {
    pub fn record(&mut self, gate_type: &GateType) {
        match gate_type {
            GateType::Constant(_) => self.constant += 1,
            GateType::Add => self.add += 1,
            GateType::Sub => self.sub += 1,
            GateType::Neg => self.neg += 1,
            GateType::Mul => self.mul += 1,
            GateType::Scale(_) => self.scale += 1,
            GateType::Inverse => self.inverse += 1,
            GateType::AssertEqual => self.assert_equal += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.constant
            + self.add
            + self.sub
            + self.neg
            + self.mul
            + self.scale
            + self.inverse
            + self.assert_equal
    }

    /// Gates that cost a multiplication constraint.
    pub fn nonlinear(&self) -> usize {
        self.mul + self.inverse
    }

    /// Per-type difference `self - earlier`, for measuring one region of a
    /// circuit.
    pub fn since(&self, earlier: &GateCount) -> GateCount {
        GateCount {
            constant: self.constant - earlier.constant,
            add: self.add - earlier.add,
            sub: self.sub - earlier.sub,
            neg: self.neg - earlier.neg,
            mul: self.mul - earlier.mul,
            scale: self.scale - earlier.scale,
            inverse: self.inverse - earlier.inverse,
            assert_equal: self.assert_equal - earlier.assert_equal,
        }
    }
}

/// Arithmetic circuit that records every gate and, whenever the inputs of a
/// gate are known, evaluates its output immediately.
#[derive(Debug, Default)]
pub struct Circuit {
    wires: AssignedWires,
    gates: Vec<Gate>,
    input_wires: Vec<WireId>,
    output_wires: Vec<WireId>,
    counts: GateCount,
}

impl Circuit {
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    pub fn gate_count(&self) -> usize {
        self.gates.len()
    }

    pub fn num_wires(&self) -> usize {
        self.wires.size()
    }

    pub fn input_wires(&self) -> &[WireId] {
        &self.input_wires
    }

    pub fn output_wires(&self) -> &[WireId] {
        &self.output_wires
    }

    /// Re-verifies every gate against the current assignment.
    pub fn check(&self) -> Result<(), CircuitError> {
        debug!(
            "checking {} gates over {} wires ({} assigned)",
            self.gates.len(),
            self.wires.size(),
            self.wires.assigned()
        );

        for (index, gate) in self.gates.iter().enumerate() {
            if !gate.is_satisfied(|w| self.wires.get(w))? {
                return Err(CircuitError::UnsatisfiedGate {
                    index,
                    gate_type: gate.gate_type.name(),
                });
            }
        }

        Ok(())
    }
}

impl CircuitContext for Circuit {
    fn issue_wire(&mut self) -> WireId {
        self.wires.issue(None)
    }

    fn issue_input_wire(&mut self, value: Option<Fq>) -> WireId {
        let w = self.wires.issue(value);
        self.input_wires.push(w);
        w
    }

    fn make_wire_output(&mut self, w: WireId) {
        if !self.output_wires.contains(&w) {
            self.output_wires.push(w);
        }
    }

    fn add_gate(&mut self, gate: Gate) {
        if let Some(out) = gate.output() {
            let value = gate.evaluate(|w| self.wires.get(w));
            match value {
                Some(value) => {
                    if let Err(err) = self.wires.assign(out, value) {
                        warn!("gate #{} ({}): {err}", self.gates.len(), gate.gate_type);
                    }
                }
                None if gate.gate_type == GateType::Inverse
                    && self.wires.get(gate.wire_a).is_some() =>
                {
                    warn!(
                        "gate #{}: inverting zero on wire {}, output {out} left unassigned",
                        self.gates.len(),
                        gate.wire_a
                    );
                }
                None => {}
            }
        }

        self.counts.record(&gate.gate_type);
        self.gates.push(gate);
    }

    fn wire_value(&self, w: WireId) -> Option<Fq> {
        self.wires.get(w)
    }

    fn gate_counts(&self) -> GateCount {
        self.counts
    }
}
