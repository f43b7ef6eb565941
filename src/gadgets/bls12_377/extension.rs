use ark_bls12_377::{Fq, Fq2, Fq2Config, Fq6Config};
use ark_ff::{Fp2Config, Fp6Config};

/// Tower parameters shared by every extension-field gadget:
///
/// - `Fp2 = Fp[u] / (u² - u_square)`
/// - `Fp6 = Fp2[v] / (v³ - v_cube)`
/// - `Fp12 = Fp6[w] / (w² - v)`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Extension {
    pub u_square: Fq,
    pub v_cube: Fq2,
}

impl Extension {
    /// BLS12-377 tower: `u² = -5`, `v³ = u`.
    pub fn bls12_377() -> Self {
        Self {
            u_square: Fq2Config::NONRESIDUE,
            v_cube: Fq6Config::NONRESIDUE,
        }
    }
}
