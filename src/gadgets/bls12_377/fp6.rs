use ark_bls12_377::Fq6;

use super::{extension::Extension, fp2::Fp2};
use crate::CircuitContext;

/// `Fp6 = Fp2[v] / (v³ - v_cube)`, stored as `[c0, c1, c2]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fp6(pub [Fp2; 3]);

impl Fp6 {
    pub fn c0(&self) -> &Fp2 {
        &self.0[0]
    }

    pub fn c1(&self) -> &Fp2 {
        &self.0[1]
    }

    pub fn c2(&self) -> &Fp2 {
        &self.0[2]
    }

    pub fn from_components(c0: Fp2, c1: Fp2, c2: Fp2) -> Self {
        Fp6([c0, c1, c2])
    }
}

impl Fp6 {
    pub fn new<C: CircuitContext>(circuit: &mut C, value: Option<Fq6>) -> Fp6 {
        Fp6::from_components(
            Fp2::new(circuit, value.map(|v| v.c0)),
            Fp2::new(circuit, value.map(|v| v.c1)),
            Fp2::new(circuit, value.map(|v| v.c2)),
        )
    }

    pub fn new_constant<C: CircuitContext>(circuit: &mut C, value: &Fq6) -> Fp6 {
        Fp6::from_components(
            Fp2::new_constant(circuit, &value.c0),
            Fp2::new_constant(circuit, &value.c1),
            Fp2::new_constant(circuit, &value.c2),
        )
    }

    pub fn value<C: CircuitContext>(&self, circuit: &C) -> Option<Fq6> {
        Some(Fq6::new(
            self.c0().value(circuit)?,
            self.c1().value(circuit)?,
            self.c2().value(circuit)?,
        ))
    }

    pub fn mark_as_output<C: CircuitContext>(&self, circuit: &mut C) {
        self.0.iter().for_each(|c| c.mark_as_output(circuit));
    }

    pub fn add<C: CircuitContext>(circuit: &mut C, a: &Fp6, b: &Fp6) -> Fp6 {
        Fp6::from_components(
            Fp2::add(circuit, a.c0(), b.c0()),
            Fp2::add(circuit, a.c1(), b.c1()),
            Fp2::add(circuit, a.c2(), b.c2()),
        )
    }

    pub fn sub<C: CircuitContext>(circuit: &mut C, a: &Fp6, b: &Fp6) -> Fp6 {
        Fp6::from_components(
            Fp2::sub(circuit, a.c0(), b.c0()),
            Fp2::sub(circuit, a.c1(), b.c1()),
            Fp2::sub(circuit, a.c2(), b.c2()),
        )
    }

    pub fn neg<C: CircuitContext>(circuit: &mut C, a: &Fp6) -> Fp6 {
        Fp6::from_components(
            Fp2::neg(circuit, a.c0()),
            Fp2::neg(circuit, a.c1()),
            Fp2::neg(circuit, a.c2()),
        )
    }

    pub fn double<C: CircuitContext>(circuit: &mut C, a: &Fp6) -> Fp6 {
        Fp6::from_components(
            Fp2::double(circuit, a.c0()),
            Fp2::double(circuit, a.c1()),
            Fp2::double(circuit, a.c2()),
        )
    }

    pub fn mul<C: CircuitContext>(circuit: &mut C, a: &Fp6, b: &Fp6, ext: &Extension) -> Fp6 {
        let v0 = Fp2::mul(circuit, a.c0(), b.c0(), ext);
        let v1 = Fp2::mul(circuit, a.c1(), b.c1(), ext);
        let v2 = Fp2::mul(circuit, a.c2(), b.c2(), ext);

        // c0 = ((a1 + a2)(b1 + b2) - v1 - v2) * v³ + v0
        let a12 = Fp2::add(circuit, a.c1(), a.c2());
        let b12 = Fp2::add(circuit, b.c1(), b.c2());
        let t0 = Fp2::mul(circuit, &a12, &b12, ext);
        let v1_v2 = Fp2::add(circuit, &v1, &v2);
        let t0 = Fp2::sub(circuit, &t0, &v1_v2);
        let t0 = Fp2::mul_by_nonresidue(circuit, &t0, ext);
        let c0 = Fp2::add(circuit, &t0, &v0);

        // c1 = (a0 + a1)(b0 + b1) - v0 - v1 + v2 * v³
        let a01 = Fp2::add(circuit, a.c0(), a.c1());
        let b01 = Fp2::add(circuit, b.c0(), b.c1());
        let t1 = Fp2::mul(circuit, &a01, &b01, ext);
        let v0_v1 = Fp2::add(circuit, &v0, &v1);
        let t1 = Fp2::sub(circuit, &t1, &v0_v1);
        let v2_nr = Fp2::mul_by_nonresidue(circuit, &v2, ext);
        let c1 = Fp2::add(circuit, &t1, &v2_nr);

        // c2 = (a0 + a2)(b0 + b2) - v0 + v1 - v2
        let a02 = Fp2::add(circuit, a.c0(), a.c2());
        let b02 = Fp2::add(circuit, b.c0(), b.c2());
        let t2 = Fp2::mul(circuit, &a02, &b02, ext);
        let v0_v2 = Fp2::add(circuit, &v0, &v2);
        let t2 = Fp2::sub(circuit, &t2, &v0_v2);
        let c2 = Fp2::add(circuit, &t2, &v1);

        Fp6::from_components(c0, c1, c2)
    }

    pub fn mul_by_fp2<C: CircuitContext>(
        circuit: &mut C,
        a: &Fp6,
        b: &Fp2,
        ext: &Extension,
    ) -> Fp6 {
        Fp6::from_components(
            Fp2::mul(circuit, a.c0(), b, ext),
            Fp2::mul(circuit, a.c1(), b, ext),
            Fp2::mul(circuit, a.c2(), b, ext),
        )
    }

    /// Multiplication by `v`: `(c0, c1, c2) -> (c2 * v³, c0, c1)`.
    pub fn mul_by_nonresidue<C: CircuitContext>(circuit: &mut C, a: &Fp6, ext: &Extension) -> Fp6 {
        let c0 = Fp2::mul_by_nonresidue(circuit, a.c2(), ext);
        Fp6::from_components(c0, *a.c0(), *a.c1())
    }

    /// Multiplication by the sparse element `c0 + c1*v`.
    pub fn mul_by_01<C: CircuitContext>(
        circuit: &mut C,
        a: &Fp6,
        c0: &Fp2,
        c1: &Fp2,
        ext: &Extension,
    ) -> Fp6 {
        let v0 = Fp2::mul(circuit, a.c0(), c0, ext);
        let v1 = Fp2::mul(circuit, a.c1(), c1, ext);

        let t1 = Fp2::mul(circuit, a.c2(), c1, ext);
        let t1 = Fp2::mul_by_nonresidue(circuit, &t1, ext);
        let t1 = Fp2::add(circuit, &t1, &v0);

        let t3 = Fp2::mul(circuit, a.c2(), c0, ext);
        let t3 = Fp2::add(circuit, &t3, &v1);

        let c01 = Fp2::add(circuit, c0, c1);
        let a01 = Fp2::add(circuit, a.c0(), a.c1());
        let t2 = Fp2::mul(circuit, &c01, &a01, ext);
        let v0_v1 = Fp2::add(circuit, &v0, &v1);
        let t2 = Fp2::sub(circuit, &t2, &v0_v1);

        Fp6::from_components(t1, t2, t3)
    }
}
