//! Optimal ate Miller loop over BLS12-377 in affine coordinates.
//!
//! The accumulator `f` lives in Fp12 and the running point on the twist. Each
//! line through two twist points is evaluated at `P` and folded into `f` with
//! a sparse multiplication. The result is the Miller value `f_{x,Q}(P)` up to
//! factors in proper subfields, all of which the final exponentiation
//! removes. No final exponentiation happens here.

use tracing::{debug, info_span};

use super::{
    context::PairingContext, extension::Extension, fp12::Fp12, fp2::Fp2, g1::G1Affine,
    g2::G2Affine, schedule::MillerStep,
};
use crate::CircuitContext;

/// Line `x·r0 + y·r1 + r2 = 0` through two twist points.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineEvaluation {
    pub r0: Fp2,
    pub r1: Fp2,
    pub r2: Fp2,
}

/// `r0 = Qy - Ry`, `r1 = Rx - Qx`, `r2 = Qx·Ry - Rx·Qy`.
///
/// Degenerate inputs (`Q = R`, `Q = -R`) give the zero line; the Miller
/// steps never pass them.
pub fn line_coefficients<C: CircuitContext>(
    circuit: &mut C,
    q: &G2Affine,
    r: &G2Affine,
    ext: &Extension,
) -> LineEvaluation {
    let r0 = Fp2::sub(circuit, &q.y, &r.y);
    let r1 = Fp2::sub(circuit, &r.x, &q.x);

    let qx_ry = Fp2::mul(circuit, &q.x, &r.y, ext);
    let rx_qy = Fp2::mul(circuit, &r.x, &q.y, ext);
    let r2 = Fp2::sub(circuit, &qx_ry, &rx_qy);

    LineEvaluation { r0, r1, r2 }
}

impl LineEvaluation {
    /// `f · l(P)`.
    ///
    /// Untwisting puts the line at `r1·yP + r0·xP·w + r2·w³` after dropping a
    /// `w²` factor, which is the sparse shape `mul_by_034` expects.
    pub fn mul_into<C: CircuitContext>(
        &self,
        circuit: &mut C,
        f: &Fp12,
        p: &G1Affine,
        ext: &Extension,
    ) -> Fp12 {
        let c0 = Fp2::mul_by_fp(circuit, &self.r1, &p.y);
        let c3 = Fp2::mul_by_fp(circuit, &self.r0, &p.x);
        Fp12::mul_by_034(circuit, f, &c0, &c3, &self.r2, ext)
    }
}

/// Saved accumulator and point, merged back later in the loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Checkpoint {
    pub accumulator: Fp12,
    pub point: G2Affine,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MillerState {
    pub accumulator: Fp12,
    pub current: G2Affine,
}

impl MillerState {
    pub fn new<C: CircuitContext>(circuit: &mut C, q: &G2Affine) -> Self {
        Self {
            accumulator: Fp12::one(circuit),
            current: *q,
        }
    }

    /// Doubling step without squaring the accumulator. Only meaningful while
    /// the accumulator is still one.
    pub fn first_double<C: CircuitContext>(
        &mut self,
        circuit: &mut C,
        p: &G1Affine,
        ext: &Extension,
    ) {
        self.double_step(circuit, p, ext);
    }

    pub fn square_and_double<C: CircuitContext>(
        &mut self,
        circuit: &mut C,
        p: &G1Affine,
        ext: &Extension,
    ) {
        self.accumulator = Fp12::square(circuit, &self.accumulator, ext);
        self.double_step(circuit, p, ext);
    }

    pub fn add<C: CircuitContext>(
        &mut self,
        circuit: &mut C,
        p: &G1Affine,
        q: &G2Affine,
        ext: &Extension,
    ) {
        self.add_step(circuit, p, q, ext);
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            accumulator: self.accumulator,
            point: self.current,
        }
    }

    /// `f ← f · f_saved · l(current, saved)(P)`, `current ← current + saved`.
    pub fn merge_checkpoint<C: CircuitContext>(
        &mut self,
        circuit: &mut C,
        p: &G1Affine,
        saved: &Checkpoint,
        ext: &Extension,
    ) {
        self.accumulator = Fp12::mul(circuit, &self.accumulator, &saved.accumulator, ext);
        self.add_step(circuit, p, &saved.point, ext);
    }

    // The tangent at T meets the curve again at -2T, so the line through T
    // and -2T is the tangent.
    fn double_step<C: CircuitContext>(&mut self, circuit: &mut C, p: &G1Affine, ext: &Extension) {
        let doubled = G2Affine::double(circuit, &self.current, ext);
        let minus_doubled = G2Affine::neg(circuit, &doubled);

        let line = line_coefficients(circuit, &self.current, &minus_doubled, ext);
        self.accumulator = line.mul_into(circuit, &self.accumulator, p, ext);
        self.current = G2Affine::neg(circuit, &minus_doubled);
    }

    fn add_step<C: CircuitContext>(
        &mut self,
        circuit: &mut C,
        p: &G1Affine,
        q: &G2Affine,
        ext: &Extension,
    ) {
        let line = line_coefficients(circuit, &self.current, q, ext);
        self.accumulator = line.mul_into(circuit, &self.accumulator, p, ext);
        self.current = G2Affine::add(circuit, &self.current, q, ext);
    }
}

/// Runs `ctx.schedule()` on `(p, q)` and returns the Miller value.
pub fn miller_loop<C: CircuitContext>(
    circuit: &mut C,
    p: &G1Affine,
    q: &G2Affine,
    ctx: &PairingContext,
) -> Fp12 {
    let span = info_span!("miller_loop", ate_loop = ctx.ate_loop());
    let _guard = span.enter();

    let ext = ctx.extension();
    let start = circuit.gate_counts();
    let mut before = start;

    let mut state = MillerState::new(circuit, q);
    let mut checkpoint: Option<Checkpoint> = None;

    for (stage, (step, repeat)) in ctx.schedule().stages().into_iter().enumerate() {
        for _ in 0..repeat {
            match step {
                MillerStep::FirstDouble => state.first_double(circuit, p, ext),
                MillerStep::Double => state.square_and_double(circuit, p, ext),
                MillerStep::Add => state.add(circuit, p, q, ext),
                MillerStep::Checkpoint => checkpoint = Some(state.checkpoint()),
                MillerStep::MergeCheckpoint => {
                    let saved = checkpoint
                        .as_ref()
                        .expect("LoopSchedule checkpoints before merging");
                    state.merge_checkpoint(circuit, p, saved, ext);
                }
            }
        }

        let counts = circuit.gate_counts();
        let spent = counts.since(&before);
        debug!(
            stage,
            step = step.name(),
            repeat,
            gates = spent.total(),
            nonlinear = spent.nonlinear(),
            "stage done"
        );
        before = counts;
    }

    let spent = circuit.gate_counts().since(&start);
    debug!(gates = spent.total(), nonlinear = spent.nonlinear(), "miller loop done");

    state.accumulator
}

#[cfg(test)]
mod tests {
    use ark_bls12_377::{Bls12_377, Fq12, Fq2, Fr, G1Projective, G2Projective};
    use ark_ec::{
        AffineRepr, CurveGroup, PrimeGroup,
        pairing::{MillerLoopOutput, Pairing, PairingOutput},
        short_weierstrass::SWCurveConfig,
    };
    use ark_ff::{AdditiveGroup, Field, Zero};
    use ark_std::UniformRand;
    use test_log::test;

    use super::*;
    use crate::{
        Circuit, GateCounter,
        gadgets::bls12_377::{context::BLS12_377, schedule::LoopSchedule},
        test_utils::trng,
    };

    type NativeLine = (Fq2, Fq2, Fq2);

    fn native_line(q: &ark_bls12_377::G2Affine, r: &ark_bls12_377::G2Affine) -> NativeLine {
        (q.y - r.y, r.x - q.x, q.x * r.y - r.x * q.y)
    }

    fn native_mul_by_line(f: &mut Fq12, line: NativeLine, p: &ark_bls12_377::G1Affine) {
        let (mut c3, mut c0, c4) = line;
        c0.mul_assign_by_fp(&p.y);
        c3.mul_assign_by_fp(&p.x);
        f.mul_by_034(&c0, &c3, &c4);
    }

    /// Same schedule and line formulas on arkworks field elements.
    fn native_miller_loop(
        p: &ark_bls12_377::G1Affine,
        q: &ark_bls12_377::G2Affine,
        schedule: &LoopSchedule,
    ) -> Fq12 {
        let mut f = Fq12::ONE;
        let mut current = *q;
        let mut saved = None;

        for step in schedule.steps() {
            match step {
                MillerStep::FirstDouble | MillerStep::Double => {
                    if *step == MillerStep::Double {
                        f.square_in_place();
                    }
                    let minus_doubled = -(current.into_group().double()).into_affine();
                    native_mul_by_line(&mut f, native_line(&current, &minus_doubled), p);
                    current = -minus_doubled;
                }
                MillerStep::Add => {
                    native_mul_by_line(&mut f, native_line(&current, q), p);
                    current = (current.into_group() + q).into_affine();
                }
                MillerStep::Checkpoint => saved = Some((f, current)),
                MillerStep::MergeCheckpoint => {
                    let (saved_f, saved_point) = saved.unwrap();
                    f *= saved_f;
                    native_mul_by_line(&mut f, native_line(&current, &saved_point), p);
                    current = (current.into_group() + saved_point).into_affine();
                }
            }
        }

        f
    }

    fn final_exponentiation(f: Fq12) -> PairingOutput<Bls12_377> {
        Bls12_377::final_exponentiation(MillerLoopOutput(f)).unwrap()
    }

    fn circuit_miller_loop(
        p_val: ark_bls12_377::G1Affine,
        q_val: ark_bls12_377::G2Affine,
        ctx: &PairingContext,
    ) -> Fq12 {
        let mut circuit = Circuit::default();
        let p = G1Affine::new(&mut circuit, Some(p_val));
        let q = G2Affine::new(&mut circuit, Some(q_val));
        let f = miller_loop(&mut circuit, &p, &q, ctx);
        f.mark_as_output(&mut circuit);

        circuit.check().unwrap();
        f.value(&circuit).unwrap()
    }

    #[test]
    fn test_line_through_both_points() {
        let ext = Extension::bls12_377();
        let mut rng = trng();
        let q_val = (G2Projective::generator() * Fr::rand(&mut rng)).into_affine();
        let r_val = (G2Projective::generator() * Fr::rand(&mut rng)).into_affine();

        let mut circuit = Circuit::default();
        let q = G2Affine::new(&mut circuit, Some(q_val));
        let r = G2Affine::new(&mut circuit, Some(r_val));
        let line = line_coefficients(&mut circuit, &q, &r, &ext);

        let r0 = line.r0.value(&circuit).unwrap();
        let r1 = line.r1.value(&circuit).unwrap();
        let r2 = line.r2.value(&circuit).unwrap();
        assert_eq!((r0, r1, r2), native_line(&q_val, &r_val));

        for point in [q_val, r_val] {
            assert!((point.x * r0 + point.y * r1 + r2).is_zero());
        }
    }

    #[test]
    fn test_tangent_line() {
        let ext = Extension::bls12_377();
        let q_val = ark_bls12_377::G2Affine::generator();

        let mut circuit = Circuit::default();
        let q = G2Affine::new(&mut circuit, Some(q_val));
        let mut state = MillerState::new(&mut circuit, &q);
        let p = G1Affine::new(&mut circuit, Some(ark_bls12_377::G1Affine::generator()));
        state.first_double(&mut circuit, &p, &ext);

        let expected = q_val.into_group().double().into_affine();
        assert_eq!(state.current.value(&circuit), Some(expected));
        circuit.check().unwrap();
    }

    #[test]
    fn test_generators_match_native_loop() {
        let p = ark_bls12_377::G1Affine::generator();
        let q = ark_bls12_377::G2Affine::generator();

        let f = circuit_miller_loop(p, q, &BLS12_377);

        assert_eq!(f, native_miller_loop(&p, &q, BLS12_377.schedule()));
        assert_eq!(final_exponentiation(f), Bls12_377::pairing(p, q));
    }

    #[test]
    fn test_random_points_match_pairing() {
        let mut rng = trng();
        let p = (G1Projective::generator() * Fr::rand(&mut rng)).into_affine();
        let q = (G2Projective::generator() * Fr::rand(&mut rng)).into_affine();

        let f = circuit_miller_loop(p, q, &BLS12_377);

        assert_eq!(final_exponentiation(f), Bls12_377::pairing(p, q));
    }

    #[test]
    fn test_checkpoint_equals_double_and_add() {
        let p = ark_bls12_377::G1Affine::generator();
        let q = ark_bls12_377::G2Affine::generator();

        let plain = PairingContext::with_schedule(
            BLS12_377.ate_loop(),
            *BLS12_377.extension(),
            *BLS12_377.b_twist(),
            LoopSchedule::double_and_add(BLS12_377.ate_loop()),
        )
        .unwrap();

        let f_checkpointed = circuit_miller_loop(p, q, &BLS12_377);
        let f_plain = circuit_miller_loop(p, q, &plain);

        assert_eq!(f_plain, native_miller_loop(&p, &q, plain.schedule()));
        assert_eq!(
            final_exponentiation(f_checkpointed),
            final_exponentiation(f_plain)
        );
    }

    #[test]
    fn test_checkpoint_matches_recomputed_state() {
        let ext = BLS12_377.extension();
        let p_val = ark_bls12_377::G1Affine::generator();
        let q_val = ark_bls12_377::G2Affine::generator();

        let mut circuit = Circuit::default();
        let p = G1Affine::new(&mut circuit, Some(p_val));
        let q = G2Affine::new(&mut circuit, Some(q_val));
        let mut state = MillerState::new(&mut circuit, &q);
        let mut saved = None;

        for step in BLS12_377.schedule().steps() {
            match step {
                MillerStep::FirstDouble => state.first_double(&mut circuit, &p, ext),
                MillerStep::Double => state.square_and_double(&mut circuit, &p, ext),
                MillerStep::Add => state.add(&mut circuit, &p, &q, ext),
                MillerStep::Checkpoint => {
                    // Rebuild (f_33, [33]Q) from scratch: 1 -> 2 -> 32 -> 33.
                    let mut fresh = MillerState::new(&mut circuit, &q);
                    fresh.first_double(&mut circuit, &p, ext);
                    for _ in 0..4 {
                        fresh.square_and_double(&mut circuit, &p, ext);
                    }
                    fresh.add(&mut circuit, &p, &q, ext);

                    let snapshot = state.checkpoint();
                    assert_eq!(
                        fresh.accumulator.value(&circuit),
                        snapshot.accumulator.value(&circuit)
                    );
                    assert_eq!(fresh.current.value(&circuit), snapshot.point.value(&circuit));
                    assert_eq!(
                        fresh.current.value(&circuit),
                        Some((q_val * Fr::from(33u64)).into_affine())
                    );

                    saved = Some(Checkpoint {
                        accumulator: fresh.accumulator,
                        point: fresh.current,
                    });
                }
                MillerStep::MergeCheckpoint => {
                    let saved = saved.as_ref().unwrap();
                    state.merge_checkpoint(&mut circuit, &p, saved, ext);
                }
            }
        }
        circuit.check().unwrap();

        let f: Fq12 = state.accumulator.value(&circuit).unwrap();
        assert_eq!(f, circuit_miller_loop(p_val, q_val, &BLS12_377));
        assert_eq!(f, native_miller_loop(&p_val, &q_val, BLS12_377.schedule()));
        assert_eq!(
            state.current.value(&circuit),
            Some((q_val * Fr::from(BLS12_377.ate_loop())).into_affine())
        );
    }

    #[test]
    fn test_checkpoint_saves_constraints() {
        let count = |ctx: &PairingContext| {
            let mut counter = GateCounter::default();
            let p = G1Affine::new(&mut counter, None);
            let q = G2Affine::new(&mut counter, None);
            miller_loop(&mut counter, &p, &q, ctx);
            counter.gate_counts()
        };

        let plain = PairingContext::with_schedule(
            BLS12_377.ate_loop(),
            *BLS12_377.extension(),
            *BLS12_377.b_twist(),
            LoopSchedule::double_and_add(BLS12_377.ate_loop()),
        )
        .unwrap();

        assert!(count(&BLS12_377).nonlinear() < count(&plain).nonlinear());
    }

    #[test]
    fn test_bilinearity() {
        let mut rng = trng();
        let a = Fr::rand(&mut rng);
        let b = Fr::rand(&mut rng);
        let p = ark_bls12_377::G1Affine::generator();
        let q = ark_bls12_377::G2Affine::generator();
        let ap = (p * a).into_affine();
        let bq = (q * b).into_affine();

        let base = final_exponentiation(circuit_miller_loop(p, q, &BLS12_377));
        let scaled = final_exponentiation(circuit_miller_loop(ap, bq, &BLS12_377));

        assert_eq!(scaled, base * (a * b));
    }

    #[test]
    fn test_deterministic() {
        let p_val = ark_bls12_377::G1Affine::generator();
        let q_val = ark_bls12_377::G2Affine::generator();

        let build = || {
            let mut circuit = Circuit::default();
            let p = G1Affine::new(&mut circuit, Some(p_val));
            let q = G2Affine::new(&mut circuit, Some(q_val));
            let f = miller_loop(&mut circuit, &p, &q, &BLS12_377);
            (circuit, f)
        };

        let (c1, f1) = build();
        let (c2, f2) = build();

        assert_eq!(f1, f2);
        assert_eq!(c1.gates(), c2.gates());
        assert_eq!(f1.value(&c1), f2.value(&c2));
    }

    #[test]
    fn test_small_scalar_loop() {
        let ext = Extension::bls12_377();
        let b = ark_bls12_377::g2::Config::COEFF_B;
        let ctx = PairingContext::new(6, ext, b).unwrap();
        let p = ark_bls12_377::G1Affine::generator();
        let q = ark_bls12_377::G2Affine::generator();

        let mut circuit = Circuit::default();
        let p_wires = G1Affine::new(&mut circuit, Some(p));
        let q_wires = G2Affine::new(&mut circuit, Some(q));
        let mut state = MillerState::new(&mut circuit, &q_wires);
        state.first_double(&mut circuit, &p_wires, &ext);
        state.add(&mut circuit, &p_wires, &q_wires, &ext);
        state.square_and_double(&mut circuit, &p_wires, &ext);

        let f = miller_loop(&mut circuit, &p_wires, &q_wires, &ctx);

        assert_eq!(state.accumulator.value(&circuit), f.value(&circuit));
        assert_eq!(
            state.current.value(&circuit),
            Some((q * Fr::from(6u64)).into_affine())
        );
        assert_eq!(f.value(&circuit), Some(native_miller_loop(&p, &q, ctx.schedule())));
    }
}
