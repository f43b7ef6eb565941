mod literal;

pub use literal::{AsBigInt, Literal, LiteralError, from_literal};
