use ark_bls12_377::Fq;

use crate::{CircuitContext, Gate, GateCount, WireId};

/// Context that only tallies gates. No gate list and no witness is kept, so
/// it is the cheap way to budget a gadget before building it for real.
#[derive(Debug, Default)]
pub struct GateCounter {
    next_wire: usize,
    counts: GateCount,
}

impl GateCounter {
    pub fn num_wires(&self) -> usize {
        self.next_wire
    }
}

impl CircuitContext for GateCounter {
    fn issue_wire(&mut self) -> WireId {
        let w = WireId(self.next_wire);
        self.next_wire += 1;
        w
    }

    fn issue_input_wire(&mut self, _value: Option<Fq>) -> WireId {
        self.issue_wire()
    }

    fn make_wire_output(&mut self, _w: WireId) {}

    fn add_gate(&mut self, gate: Gate) {
        self.counts.record(&gate.gate_type);
    }

    fn wire_value(&self, _w: WireId) -> Option<Fq> {
        None
    }

    fn gate_counts(&self) -> GateCount {
        self.counts
    }
}
