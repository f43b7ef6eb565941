use ark_bls12_377::Fq;

use crate::{Gate, GateCount, WireId};

/// A trait defining the context for arithmetic circuit construction.
///
/// Every gadget in this crate takes a `&mut impl CircuitContext` and turns
/// each field operation into one or more [`Gate`]s over the native field
/// (the BLS12-377 base field, i.e. the BW6-761 scalar field). Gadgets never
/// look at concrete numbers; contexts that track a witness can still report
/// them through [`CircuitContext::wire_value`].
///
/// ## Usage Example
///
/// ```rust
/// use ark_bls12_377::Fq;
/// use miller_loop_circuit::{Circuit, CircuitContext, Gate};
///
/// let mut circuit = Circuit::default();
///
/// let a = circuit.issue_input_wire(Some(Fq::from(3u64)));
/// let b = circuit.issue_input_wire(Some(Fq::from(4u64)));
///
/// let c = circuit.issue_wire();
/// circuit.add_gate(Gate::mul(a, b, c));
///
/// assert_eq!(circuit.wire_value(c), Some(Fq::from(12u64)));
/// ```
pub trait CircuitContext {
    /// Allocates a new internal wire.
    fn issue_wire(&mut self) -> WireId;

    /// Allocates a new input wire. `value` is the witness, if the caller
    /// knows it; symbolic-only construction passes `None`.
    fn issue_input_wire(&mut self, value: Option<Fq>) -> WireId;

    /// Marks an existing wire as a circuit output.
    fn make_wire_output(&mut self, w: WireId);

    /// Adds a gate to the circuit. The gate's input wires must already exist
    /// and its output wire must be freshly issued.
    fn add_gate(&mut self, gate: Gate);

    /// Witness value of a wire, when the context tracks one.
    fn wire_value(&self, w: WireId) -> Option<Fq>;

    /// Number of gates emitted so far, by type.
    fn gate_counts(&self) -> GateCount;
}
