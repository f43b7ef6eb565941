use ark_bls12_377::Fq;

use super::fp::Fp;
use crate::CircuitContext;

/// Affine point on the base curve. The point at infinity has no wire
/// representation; callers pass finite points only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct G1Affine {
    pub x: Fp,
    pub y: Fp,
}

impl G1Affine {
    pub fn new<C: CircuitContext>(circuit: &mut C, value: Option<ark_bls12_377::G1Affine>) -> Self {
        Self {
            x: Fp::new(circuit, value.map(|p| p.x)),
            y: Fp::new(circuit, value.map(|p| p.y)),
        }
    }

    pub fn new_constant<C: CircuitContext>(circuit: &mut C, p: &ark_bls12_377::G1Affine) -> Self {
        Self {
            x: Fp::new_constant(circuit, &p.x),
            y: Fp::new_constant(circuit, &p.y),
        }
    }

    pub fn value<C: CircuitContext>(&self, circuit: &C) -> Option<ark_bls12_377::G1Affine> {
        Some(ark_bls12_377::G1Affine::new_unchecked(
            self.x.value(circuit)?,
            self.y.value(circuit)?,
        ))
    }

    pub fn neg<C: CircuitContext>(circuit: &mut C, p: &G1Affine) -> G1Affine {
        G1Affine {
            x: p.x,
            y: Fp::neg(circuit, &p.y),
        }
    }

    /// Affine tangent rule; needs `y != 0`.
    pub fn double<C: CircuitContext>(circuit: &mut C, p: &G1Affine) -> G1Affine {
        let x_square = Fp::square(circuit, &p.x);
        let numerator = Fp::mul_by_constant(circuit, &x_square, &Fq::from(3u64));
        let denominator = Fp::double(circuit, &p.y);
        let lambda = Fp::div(circuit, &numerator, &denominator);

        Self::from_slope(circuit, p, &p.x, &lambda)
    }

    /// Affine chord rule; needs `p.x != q.x`.
    pub fn add<C: CircuitContext>(circuit: &mut C, p: &G1Affine, q: &G1Affine) -> G1Affine {
        let dy = Fp::sub(circuit, &q.y, &p.y);
        let dx = Fp::sub(circuit, &q.x, &p.x);
        let lambda = Fp::div(circuit, &dy, &dx);

        Self::from_slope(circuit, p, &q.x, &lambda)
    }

    // x3 = λ² - x1 - x2, y3 = λ(x1 - x3) - y1
    fn from_slope<C: CircuitContext>(
        circuit: &mut C,
        p: &G1Affine,
        other_x: &Fp,
        lambda: &Fp,
    ) -> G1Affine {
        let lambda_square = Fp::square(circuit, lambda);
        let x_sum = Fp::add(circuit, &p.x, other_x);
        let x = Fp::sub(circuit, &lambda_square, &x_sum);

        let dx = Fp::sub(circuit, &p.x, &x);
        let lambda_dx = Fp::mul(circuit, lambda, &dx);
        let y = Fp::sub(circuit, &lambda_dx, &p.y);

        G1Affine { x, y }
    }

    /// Enforces `y² = x³ + b`.
    pub fn assert_on_curve<C: CircuitContext>(circuit: &mut C, p: &G1Affine, b: &Fq) {
        let y2 = Fp::square(circuit, &p.y);
        let x2 = Fp::square(circuit, &p.x);
        let x3 = Fp::mul(circuit, &x2, &p.x);
        let rhs = Fp::add_constant(circuit, &x3, b);
        Fp::assert_equal(circuit, &y2, &rhs);
    }
}
