//! Native field variables.
//!
//! The constraint system runs over the BLS12-377 base field, so a single wire
//! holds a full `Fq` element and every operation below is one gate (two for
//! `div`).

use ark_bls12_377::Fq;
use ark_ff::{AdditiveGroup, Field, Zero};

use crate::{CircuitContext, Gate, WireId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fp(pub WireId);

impl Fp {
    /// Input variable with an optional witness.
    pub fn new<C: CircuitContext>(circuit: &mut C, value: Option<Fq>) -> Fp {
        Fp(circuit.issue_input_wire(value))
    }

    pub fn new_constant<C: CircuitContext>(circuit: &mut C, value: &Fq) -> Fp {
        let c = circuit.issue_wire();
        circuit.add_gate(Gate::constant(*value, c));
        Fp(c)
    }

    pub fn value<C: CircuitContext>(&self, circuit: &C) -> Option<Fq> {
        circuit.wire_value(self.0)
    }

    pub fn mark_as_output<C: CircuitContext>(&self, circuit: &mut C) {
        circuit.make_wire_output(self.0);
    }

    pub fn add<C: CircuitContext>(circuit: &mut C, a: &Fp, b: &Fp) -> Fp {
        let c = circuit.issue_wire();
        circuit.add_gate(Gate::add(a.0, b.0, c));
        Fp(c)
    }

    pub fn add_constant<C: CircuitContext>(circuit: &mut C, a: &Fp, b: &Fq) -> Fp {
        if b.is_zero() {
            return *a;
        }
        let b = Self::new_constant(circuit, b);
        Self::add(circuit, a, &b)
    }

    pub fn sub<C: CircuitContext>(circuit: &mut C, a: &Fp, b: &Fp) -> Fp {
        let c = circuit.issue_wire();
        circuit.add_gate(Gate::sub(a.0, b.0, c));
        Fp(c)
    }

    pub fn neg<C: CircuitContext>(circuit: &mut C, a: &Fp) -> Fp {
        let c = circuit.issue_wire();
        circuit.add_gate(Gate::neg(a.0, c));
        Fp(c)
    }

    pub fn double<C: CircuitContext>(circuit: &mut C, a: &Fp) -> Fp {
        Self::add(circuit, a, a)
    }

    pub fn mul<C: CircuitContext>(circuit: &mut C, a: &Fp, b: &Fp) -> Fp {
        let c = circuit.issue_wire();
        circuit.add_gate(Gate::mul(a.0, b.0, c));
        Fp(c)
    }

    pub fn square<C: CircuitContext>(circuit: &mut C, a: &Fp) -> Fp {
        Self::mul(circuit, a, a)
    }

    pub fn mul_by_constant<C: CircuitContext>(circuit: &mut C, a: &Fp, b: &Fq) -> Fp {
        if *b == Fq::ONE {
            return *a;
        }
        if *b == -Fq::ONE {
            return Self::neg(circuit, a);
        }

        let c = circuit.issue_wire();
        circuit.add_gate(Gate::scale(a.0, *b, c));
        Fp(c)
    }

    /// `sum(k_i * a_i)`, skipping zero coefficients. An empty sum is the
    /// constant zero.
    pub fn linear_combination<C: CircuitContext>(circuit: &mut C, terms: &[(&Fp, Fq)]) -> Fp {
        let mut acc: Option<Fp> = None;

        for (a, k) in terms {
            if k.is_zero() {
                continue;
            }
            let term = Self::mul_by_constant(circuit, a, k);
            acc = Some(match acc {
                None => term,
                Some(acc) => Self::add(circuit, &acc, &term),
            });
        }

        acc.unwrap_or_else(|| Self::new_constant(circuit, &Fq::ZERO))
    }

    /// The result is unassigned when `a` is zero.
    pub fn inverse<C: CircuitContext>(circuit: &mut C, a: &Fp) -> Fp {
        let c = circuit.issue_wire();
        circuit.add_gate(Gate::inverse(a.0, c));
        Fp(c)
    }

    pub fn div<C: CircuitContext>(circuit: &mut C, a: &Fp, b: &Fp) -> Fp {
        let b_inv = Self::inverse(circuit, b);
        Self::mul(circuit, a, &b_inv)
    }

    pub fn assert_equal<C: CircuitContext>(circuit: &mut C, a: &Fp, b: &Fp) {
        circuit.add_gate(Gate::assert_equal(a.0, b.0));
    }
}
