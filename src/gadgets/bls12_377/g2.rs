use ark_bls12_377::Fq2;

use super::{extension::Extension, fp2::Fp2};
use crate::CircuitContext;

/// Affine point on the D-type twist `y² = x³ + b/u`.
///
/// Doubling and addition use the affine chord-and-tangent formulas with one
/// Fp2 inversion each. They are not complete: `double` needs `y != 0` and
/// `add` needs `p.x != q.x`. The Miller loop never hits either case for
/// points of prime order `r`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct G2Affine {
    pub x: Fp2,
    pub y: Fp2,
}

impl G2Affine {
    pub fn new<C: CircuitContext>(circuit: &mut C, value: Option<ark_bls12_377::G2Affine>) -> Self {
        Self {
            x: Fp2::new(circuit, value.map(|p| p.x)),
            y: Fp2::new(circuit, value.map(|p| p.y)),
        }
    }

    pub fn new_constant<C: CircuitContext>(circuit: &mut C, p: &ark_bls12_377::G2Affine) -> Self {
        Self {
            x: Fp2::new_constant(circuit, &p.x),
            y: Fp2::new_constant(circuit, &p.y),
        }
    }

    pub fn value<C: CircuitContext>(&self, circuit: &C) -> Option<ark_bls12_377::G2Affine> {
        Some(ark_bls12_377::G2Affine::new_unchecked(
            self.x.value(circuit)?,
            self.y.value(circuit)?,
        ))
    }

    pub fn neg<C: CircuitContext>(circuit: &mut C, p: &G2Affine) -> G2Affine {
        G2Affine {
            x: p.x,
            y: Fp2::neg(circuit, &p.y),
        }
    }

    pub fn double<C: CircuitContext>(circuit: &mut C, p: &G2Affine, ext: &Extension) -> G2Affine {
        // λ = 3x² / 2y
        let x_square = Fp2::square(circuit, &p.x, ext);
        let numerator = Fp2::triple(circuit, &x_square);
        let denominator = Fp2::double(circuit, &p.y);
        let lambda = Fp2::div(circuit, &numerator, &denominator, ext);

        // x3 = λ² - 2x
        let lambda_square = Fp2::square(circuit, &lambda, ext);
        let double_x = Fp2::double(circuit, &p.x);
        let x3 = Fp2::sub(circuit, &lambda_square, &double_x);

        // y3 = λ(x - x3) - y
        let dx = Fp2::sub(circuit, &p.x, &x3);
        let lambda_dx = Fp2::mul(circuit, &lambda, &dx, ext);
        let y3 = Fp2::sub(circuit, &lambda_dx, &p.y);

        G2Affine { x: x3, y: y3 }
    }

    pub fn add<C: CircuitContext>(
        circuit: &mut C,
        p: &G2Affine,
        q: &G2Affine,
        ext: &Extension,
    ) -> G2Affine {
        // λ = (y2 - y1) / (x2 - x1)
        let dy = Fp2::sub(circuit, &q.y, &p.y);
        let dx = Fp2::sub(circuit, &q.x, &p.x);
        let lambda = Fp2::div(circuit, &dy, &dx, ext);

        // x3 = λ² - x1 - x2
        let lambda_square = Fp2::square(circuit, &lambda, ext);
        let x_sum = Fp2::add(circuit, &p.x, &q.x);
        let x3 = Fp2::sub(circuit, &lambda_square, &x_sum);

        // y3 = λ(x1 - x3) - y1
        let dx3 = Fp2::sub(circuit, &p.x, &x3);
        let lambda_dx3 = Fp2::mul(circuit, &lambda, &dx3, ext);
        let y3 = Fp2::sub(circuit, &lambda_dx3, &p.y);

        G2Affine { x: x3, y: y3 }
    }

    /// Enforces `y² = x³ + b_twist`.
    pub fn assert_on_curve<C: CircuitContext>(
        circuit: &mut C,
        p: &G2Affine,
        b_twist: &Fq2,
        ext: &Extension,
    ) {
        let y2 = Fp2::square(circuit, &p.y, ext);
        let x2 = Fp2::square(circuit, &p.x, ext);
        let x3 = Fp2::mul(circuit, &x2, &p.x, ext);
        let b = Fp2::new_constant(circuit, b_twist);
        let rhs = Fp2::add(circuit, &x3, &b);
        Fp2::assert_equal(circuit, &y2, &rhs);
    }
}
