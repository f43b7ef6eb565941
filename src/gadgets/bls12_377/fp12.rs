use ark_bls12_377::Fq12;
use ark_ff::Field;

use super::{extension::Extension, fp2::Fp2, fp6::Fp6};
use crate::CircuitContext;

/// `Fp12 = Fp6[w] / (w² - v)`, stored as `[c0, c1]`. This is the target
/// group representation and the type of the Miller loop accumulator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fp12(pub [Fp6; 2]);

impl Fp12 {
    /// Access c0 component (first Fp6)
    pub fn c0(&self) -> &Fp6 {
        &self.0[0]
    }

    /// Access c1 component (second Fp6)
    pub fn c1(&self) -> &Fp6 {
        &self.0[1]
    }

    pub fn from_components(c0: Fp6, c1: Fp6) -> Self {
        Fp12([c0, c1])
    }

    pub fn mark_as_output<C: CircuitContext>(&self, circuit: &mut C) {
        self.c0().mark_as_output(circuit);
        self.c1().mark_as_output(circuit);
    }
}

impl Fp12 {
    pub fn new<C: CircuitContext>(circuit: &mut C, value: Option<Fq12>) -> Fp12 {
        Fp12::from_components(
            Fp6::new(circuit, value.map(|v| v.c0)),
            Fp6::new(circuit, value.map(|v| v.c1)),
        )
    }

    pub fn new_constant<C: CircuitContext>(circuit: &mut C, value: &Fq12) -> Fp12 {
        Fp12::from_components(
            Fp6::new_constant(circuit, &value.c0),
            Fp6::new_constant(circuit, &value.c1),
        )
    }

    pub fn value<C: CircuitContext>(&self, circuit: &C) -> Option<Fq12> {
        Some(Fq12::new(self.c0().value(circuit)?, self.c1().value(circuit)?))
    }

    /// Multiplicative identity as constant wires.
    pub fn one<C: CircuitContext>(circuit: &mut C) -> Fp12 {
        Self::new_constant(circuit, &Fq12::ONE)
    }

    pub fn add<C: CircuitContext>(circuit: &mut C, a: &Fp12, b: &Fp12) -> Fp12 {
        let c0 = Fp6::add(circuit, a.c0(), b.c0());
        let c1 = Fp6::add(circuit, a.c1(), b.c1());

        Fp12::from_components(c0, c1)
    }

    pub fn sub<C: CircuitContext>(circuit: &mut C, a: &Fp12, b: &Fp12) -> Fp12 {
        let c0 = Fp6::sub(circuit, a.c0(), b.c0());
        let c1 = Fp6::sub(circuit, a.c1(), b.c1());

        Fp12::from_components(c0, c1)
    }

    pub fn neg<C: CircuitContext>(circuit: &mut C, a: &Fp12) -> Fp12 {
        Fp12::from_components(Fp6::neg(circuit, a.c0()), Fp6::neg(circuit, a.c1()))
    }

    pub fn mul<C: CircuitContext>(circuit: &mut C, a: &Fp12, b: &Fp12, ext: &Extension) -> Fp12 {
        // (a0 + a1) and (b0 + b1)
        let a_sum = Fp6::add(circuit, a.c0(), a.c1());
        let b_sum = Fp6::add(circuit, b.c0(), b.c1());

        // a0 * b0 and a1 * b1
        let a0_b0 = Fp6::mul(circuit, a.c0(), b.c0(), ext);
        let a1_b1 = Fp6::mul(circuit, a.c1(), b.c1(), ext);

        // a0b0+a1b1
        let sum_a0b0_a1b1 = Fp6::add(circuit, &a0_b0, &a1_b1);

        // (a0 + a1) * (b0 + b1)
        let sum_prod = Fp6::mul(circuit, &a_sum, &b_sum, ext);

        let a1_b1_nonres = Fp6::mul_by_nonresidue(circuit, &a1_b1, ext);

        let c0 = Fp6::add(circuit, &a0_b0, &a1_b1_nonres);

        let c1 = Fp6::sub(circuit, &sum_prod, &sum_a0b0_a1b1);

        Fp12::from_components(c0, c1)
    }

    /// Complex squaring: two Fp6 multiplications instead of three.
    pub fn square<C: CircuitContext>(circuit: &mut C, a: &Fp12, ext: &Extension) -> Fp12 {
        let v0 = Fp6::sub(circuit, a.c0(), a.c1());
        let a1_nonres = Fp6::mul_by_nonresidue(circuit, a.c1(), ext);
        let v3 = Fp6::sub(circuit, a.c0(), &a1_nonres);
        let v2 = Fp6::mul(circuit, a.c0(), a.c1(), ext);
        let v0_v3 = Fp6::mul(circuit, &v0, &v3, ext);

        // c0 = (a0 - a1)(a0 - v*a1) + a0a1 + v*a0a1 = a0² + v*a1²
        let v2_nonres = Fp6::mul_by_nonresidue(circuit, &v2, ext);
        let t = Fp6::add(circuit, &v0_v3, &v2);
        let c0 = Fp6::add(circuit, &t, &v2_nonres);
        let c1 = Fp6::double(circuit, &v2);

        Fp12::from_components(c0, c1)
    }

    /// Multiplication by the sparse element `c0 + (c3 + c4*v)*w`, i.e. the
    /// Fp12 image of a line evaluated at a G1 point.
    pub fn mul_by_034<C: CircuitContext>(
        circuit: &mut C,
        a: &Fp12,
        c0: &Fp2,
        c3: &Fp2,
        c4: &Fp2,
        ext: &Extension,
    ) -> Fp12 {
        let w1 = Fp6::mul_by_01(circuit, a.c1(), c3, c4, ext);
        let w2 = Fp6::mul_by_nonresidue(circuit, &w1, ext);
        let w3 = Fp6::mul_by_fp2(circuit, a.c0(), c0, ext);
        let new_c0 = Fp6::add(circuit, &w2, &w3);
        let w4 = Fp6::add(circuit, a.c0(), a.c1());
        let w5 = Fp2::add(circuit, c3, c0);
        let w6 = Fp6::mul_by_01(circuit, &w4, &w5, c4, ext);
        let w7 = Fp6::add(circuit, &w1, &w3);
        let new_c1 = Fp6::sub(circuit, &w6, &w7);

        Fp12::from_components(new_c0, new_c1)
    }
}

#[cfg(test)]
mod tests {
    use ark_bls12_377::Fq2;
    use ark_std::UniformRand;
    use test_log::test;

    use super::*;
    use crate::{Circuit, GateCounter, test_utils::trng};

    #[test]
    fn test_fp12_one() {
        let mut circuit = Circuit::default();
        let one = Fp12::one(&mut circuit);
        assert_eq!(one.value(&circuit), Some(Fq12::ONE));
        assert_eq!(circuit.gate_counts().constant, 12);
    }

    #[test]
    fn test_fp12_mul() {
        let ext = Extension::bls12_377();
        let mut rng = trng();
        let a_val = Fq12::rand(&mut rng);
        let b_val = Fq12::rand(&mut rng);

        let mut circuit = Circuit::default();
        let a = Fp12::new(&mut circuit, Some(a_val));
        let b = Fp12::new(&mut circuit, Some(b_val));
        let c = Fp12::mul(&mut circuit, &a, &b, &ext);

        assert_eq!(c.value(&circuit), Some(a_val * b_val));
        circuit.check().unwrap();
    }

    #[test]
    fn test_fp12_add_sub_neg() {
        let mut rng = trng();
        let a_val = Fq12::rand(&mut rng);
        let b_val = Fq12::rand(&mut rng);

        let mut circuit = Circuit::default();
        let a = Fp12::new(&mut circuit, Some(a_val));
        let b = Fp12::new(&mut circuit, Some(b_val));

        let sum = Fp12::add(&mut circuit, &a, &b);
        let diff = Fp12::sub(&mut circuit, &a, &b);
        let neg = Fp12::neg(&mut circuit, &a);

        assert_eq!(sum.value(&circuit), Some(a_val + b_val));
        assert_eq!(diff.value(&circuit), Some(a_val - b_val));
        assert_eq!(neg.value(&circuit), Some(-a_val));
        circuit.check().unwrap();
    }

    #[test]
    fn test_fp12_square() {
        let ext = Extension::bls12_377();
        let a_val = Fq12::rand(&mut trng());

        let mut circuit = Circuit::default();
        let a = Fp12::new(&mut circuit, Some(a_val));
        let c = Fp12::square(&mut circuit, &a, &ext);

        assert_eq!(c.value(&circuit), Some(a_val.square()));
        circuit.check().unwrap();
    }

    #[test]
    fn test_fp12_square_cheaper_than_mul() {
        let ext = Extension::bls12_377();

        let mut squaring = GateCounter::default();
        let a = Fp12::new(&mut squaring, None);
        Fp12::square(&mut squaring, &a, &ext);

        let mut multiplying = GateCounter::default();
        let a = Fp12::new(&mut multiplying, None);
        Fp12::mul(&mut multiplying, &a, &a, &ext);

        assert!(squaring.gate_counts().mul < multiplying.gate_counts().mul);
    }

    #[test]
    fn test_fp12_mul_by_034() {
        let ext = Extension::bls12_377();
        let mut rng = trng();
        let a_val = Fq12::rand(&mut rng);
        let c0_val = Fq2::rand(&mut rng);
        let c3_val = Fq2::rand(&mut rng);
        let c4_val = Fq2::rand(&mut rng);

        let mut circuit = Circuit::default();
        let a = Fp12::new(&mut circuit, Some(a_val));
        let c0 = Fp2::new(&mut circuit, Some(c0_val));
        let c3 = Fp2::new(&mut circuit, Some(c3_val));
        let c4 = Fp2::new(&mut circuit, Some(c4_val));
        let c = Fp12::mul_by_034(&mut circuit, &a, &c0, &c3, &c4, &ext);

        let mut expected = a_val;
        expected.mul_by_034(&c0_val, &c3_val, &c4_val);
        assert_eq!(c.value(&circuit), Some(expected));
        circuit.check().unwrap();
    }

    #[test]
    fn test_fp12_sparse_cheaper_than_mul() {
        let ext = Extension::bls12_377();

        let mut sparse = GateCounter::default();
        let a = Fp12::new(&mut sparse, None);
        let c = Fp2::new(&mut sparse, None);
        Fp12::mul_by_034(&mut sparse, &a, &c, &c, &c, &ext);

        let mut dense = GateCounter::default();
        let a = Fp12::new(&mut dense, None);
        Fp12::mul(&mut dense, &a, &a, &ext);

        assert!(sparse.gate_counts().mul < dense.gate_counts().mul);
    }
}
