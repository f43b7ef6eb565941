use std::fmt;

use ark_bls12_377::Fq;

/// Arithmetic relation enforced by a single gate over the native field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateType {
    /// `c = k`
    Constant(Fq),
    /// `c = a + b`
    Add,
    /// `c = a - b`
    Sub,
    /// `c = -a`
    Neg,
    /// `c = a * b`
    Mul,
    /// `c = k * a`
    Scale(Fq),
    /// `a * c = 1`
    Inverse,
    /// `a = b`, no output wire
    AssertEqual,
}

impl GateType {
    pub fn name(&self) -> &'static str {
        match self {
            GateType::Constant(_) => "const",
            GateType::Add => "add",
            GateType::Sub => "sub",
            GateType::Neg => "neg",
            GateType::Mul => "mul",
            GateType::Scale(_) => "scale",
            GateType::Inverse => "inv",
            GateType::AssertEqual => "eq",
        }
    }
}

impl fmt::Display for GateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
