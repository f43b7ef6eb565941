//! BLS12-377 Quadratic Extension Field Fp2
//!
//! Elements are `c0 + c1*u` with `c0, c1` native wires and `u² = -5` (taken
//! from [`Extension::u_square`]). G2 coordinates and line coefficients live
//! here.

use ark_bls12_377::{Fq, Fq2};
use ark_ff::{AdditiveGroup, Field};

use super::{extension::Extension, fp::Fp};
use crate::CircuitContext;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fp2(pub [Fp; 2]);

impl Fp2 {
    pub fn c0(&self) -> &Fp {
        &self.0[0]
    }

    pub fn c1(&self) -> &Fp {
        &self.0[1]
    }

    pub fn from_components(c0: Fp, c1: Fp) -> Self {
        Fp2([c0, c1])
    }
}

impl Fp2 {
    pub fn new<C: CircuitContext>(circuit: &mut C, value: Option<Fq2>) -> Fp2 {
        Fp2::from_components(
            Fp::new(circuit, value.map(|v| v.c0)),
            Fp::new(circuit, value.map(|v| v.c1)),
        )
    }

    pub fn new_constant<C: CircuitContext>(circuit: &mut C, value: &Fq2) -> Fp2 {
        Fp2::from_components(
            Fp::new_constant(circuit, &value.c0),
            Fp::new_constant(circuit, &value.c1),
        )
    }

    pub fn value<C: CircuitContext>(&self, circuit: &C) -> Option<Fq2> {
        Some(Fq2::new(self.c0().value(circuit)?, self.c1().value(circuit)?))
    }

    pub fn mark_as_output<C: CircuitContext>(&self, circuit: &mut C) {
        self.c0().mark_as_output(circuit);
        self.c1().mark_as_output(circuit);
    }

    pub fn add<C: CircuitContext>(circuit: &mut C, a: &Fp2, b: &Fp2) -> Fp2 {
        let c0 = Fp::add(circuit, a.c0(), b.c0());
        let c1 = Fp::add(circuit, a.c1(), b.c1());

        Fp2::from_components(c0, c1)
    }

    pub fn sub<C: CircuitContext>(circuit: &mut C, a: &Fp2, b: &Fp2) -> Fp2 {
        let c0 = Fp::sub(circuit, a.c0(), b.c0());
        let c1 = Fp::sub(circuit, a.c1(), b.c1());

        Fp2::from_components(c0, c1)
    }

    pub fn neg<C: CircuitContext>(circuit: &mut C, a: &Fp2) -> Fp2 {
        let c0 = Fp::neg(circuit, a.c0());
        let c1 = Fp::neg(circuit, a.c1());

        Fp2::from_components(c0, c1)
    }

    pub fn double<C: CircuitContext>(circuit: &mut C, a: &Fp2) -> Fp2 {
        let c0 = Fp::double(circuit, a.c0());
        let c1 = Fp::double(circuit, a.c1());

        Fp2::from_components(c0, c1)
    }

    pub fn triple<C: CircuitContext>(circuit: &mut C, a: &Fp2) -> Fp2 {
        let a_2 = Self::double(circuit, a);

        Self::add(circuit, a, &a_2)
    }

    pub fn mul<C: CircuitContext>(circuit: &mut C, a: &Fp2, b: &Fp2, ext: &Extension) -> Fp2 {
        // (a0 + a1) and (b0 + b1)
        let a_sum = Fp::add(circuit, a.c0(), a.c1());
        let b_sum = Fp::add(circuit, b.c0(), b.c1());

        let a0_b0 = Fp::mul(circuit, a.c0(), b.c0());
        let a1_b1 = Fp::mul(circuit, a.c1(), b.c1());
        let sum_prod = Fp::mul(circuit, &a_sum, &b_sum);

        // c0 = a0*b0 + u²*a1*b1
        let c0 = Fp::linear_combination(circuit, &[(&a0_b0, Fq::ONE), (&a1_b1, ext.u_square)]);

        // c1 = (a0+a1)*(b0+b1) - a0*b0 - a1*b1
        let sum_a0b0_a1b1 = Fp::add(circuit, &a0_b0, &a1_b1);
        let c1 = Fp::sub(circuit, &sum_prod, &sum_a0b0_a1b1);

        Fp2::from_components(c0, c1)
    }

    pub fn square<C: CircuitContext>(circuit: &mut C, a: &Fp2, ext: &Extension) -> Fp2 {
        // (a0 - a1)(a0 - u²a1) + (1 + u²)a0a1 = a0² + u²a1²
        let v0 = Fp::sub(circuit, a.c0(), a.c1());
        let v3 = Fp::linear_combination(circuit, &[(a.c0(), Fq::ONE), (a.c1(), -ext.u_square)]);
        let v2 = Fp::mul(circuit, a.c0(), a.c1());
        let v0_v3 = Fp::mul(circuit, &v0, &v3);

        let c0 = Fp::linear_combination(
            circuit,
            &[(&v0_v3, Fq::ONE), (&v2, Fq::ONE + ext.u_square)],
        );
        let c1 = Fp::double(circuit, &v2);

        Fp2::from_components(c0, c1)
    }

    pub fn mul_by_fp<C: CircuitContext>(circuit: &mut C, a: &Fp2, b: &Fp) -> Fp2 {
        let c0 = Fp::mul(circuit, a.c0(), b);
        let c1 = Fp::mul(circuit, a.c1(), b);

        Fp2::from_components(c0, c1)
    }

    pub fn mul_by_constant<C: CircuitContext>(
        circuit: &mut C,
        a: &Fp2,
        b: &Fq2,
        ext: &Extension,
    ) -> Fp2 {
        if *b == Fq2::ONE {
            return *a;
        }

        // (a0 + a1*u) * (b0 + b1*u) = (a0*b0 + u²*a1*b1) + (a0*b1 + a1*b0)*u
        let c0 = Fp::linear_combination(
            circuit,
            &[(a.c0(), b.c0), (a.c1(), ext.u_square * b.c1)],
        );
        let c1 = Fp::linear_combination(circuit, &[(a.c0(), b.c1), (a.c1(), b.c0)]);

        Fp2::from_components(c0, c1)
    }

    /// Multiplication by the Fp6 non-residue `v³`.
    pub fn mul_by_nonresidue<C: CircuitContext>(circuit: &mut C, a: &Fp2, ext: &Extension) -> Fp2 {
        Self::mul_by_constant(circuit, a, &ext.v_cube, ext)
    }

    /// `(a0 - a1*u) / (a0² - u²*a1²)`; unassigned when `a` is zero.
    pub fn inverse<C: CircuitContext>(circuit: &mut C, a: &Fp2, ext: &Extension) -> Fp2 {
        let a0_square = Fp::square(circuit, a.c0());
        let a1_square = Fp::square(circuit, a.c1());
        let norm = Fp::linear_combination(
            circuit,
            &[(&a0_square, Fq::ONE), (&a1_square, -ext.u_square)],
        );
        let inverse_norm = Fp::inverse(circuit, &norm);

        let c0 = Fp::mul(circuit, a.c0(), &inverse_norm);
        let neg_a1 = Fp::neg(circuit, a.c1());
        let c1 = Fp::mul(circuit, &neg_a1, &inverse_norm);

        Fp2::from_components(c0, c1)
    }

    pub fn div<C: CircuitContext>(circuit: &mut C, a: &Fp2, b: &Fp2, ext: &Extension) -> Fp2 {
        let b_inv = Self::inverse(circuit, b, ext);
        Self::mul(circuit, a, &b_inv, ext)
    }

    pub fn assert_equal<C: CircuitContext>(circuit: &mut C, a: &Fp2, b: &Fp2) {
        Fp::assert_equal(circuit, a.c0(), b.c0());
        Fp::assert_equal(circuit, a.c1(), b.c1());
    }

    pub fn zero<C: CircuitContext>(circuit: &mut C) -> Fp2 {
        Self::new_constant(circuit, &Fq2::ZERO)
    }
}
