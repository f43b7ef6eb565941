//! Numeric literal ingestion.
//!
//! Circuit parameters arrive in several host shapes (machine integers,
//! decimal strings, big-endian bytes, field elements). [`from_literal`]
//! normalises a closed set of them into a signed [`BigInt`].

use ark_ff::{Fp, FpConfig, PrimeField};
use num_bigint::{BigInt, BigUint, Sign};

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum LiteralError {
    #[error("`{0}` is not a base-10 integer")]
    InvalidDecimal(String),
}

/// Values that can present themselves as an arbitrary-precision integer.
pub trait AsBigInt {
    fn as_big_int(&self) -> BigInt;
}

impl<P: FpConfig<N>, const N: usize> AsBigInt for Fp<P, N> {
    /// Canonical (non-Montgomery) representative in `[0, p)`.
    fn as_big_int(&self) -> BigInt {
        BigInt::from(BigUint::from(self.into_bigint()))
    }
}

impl AsBigInt for BigUint {
    fn as_big_int(&self) -> BigInt {
        BigInt::from(self.clone())
    }
}

impl AsBigInt for BigInt {
    fn as_big_int(&self) -> BigInt {
        self.clone()
    }
}

#[derive(Clone, Copy)]
pub enum Literal<'a> {
    U64(u64),
    I64(i64),
    /// Optional sign followed by decimal digits.
    Decimal(&'a str),
    /// Unsigned big-endian magnitude.
    Bytes(&'a [u8]),
    Value(&'a dyn AsBigInt),
}

impl std::fmt::Debug for Literal<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::U64(v) => f.debug_tuple("U64").field(v).finish(),
            Literal::I64(v) => f.debug_tuple("I64").field(v).finish(),
            Literal::Decimal(s) => f.debug_tuple("Decimal").field(s).finish(),
            Literal::Bytes(b) => f.debug_tuple("Bytes").field(b).finish(),
            Literal::Value(v) => f.debug_tuple("Value").field(&v.as_big_int()).finish(),
        }
    }
}

impl From<u64> for Literal<'_> {
    fn from(v: u64) -> Self {
        Literal::U64(v)
    }
}

impl From<i64> for Literal<'_> {
    fn from(v: i64) -> Self {
        Literal::I64(v)
    }
}

impl<'a> From<&'a str> for Literal<'a> {
    fn from(s: &'a str) -> Self {
        Literal::Decimal(s)
    }
}

impl<'a> From<&'a [u8]> for Literal<'a> {
    fn from(b: &'a [u8]) -> Self {
        Literal::Bytes(b)
    }
}

pub fn from_literal(literal: Literal<'_>) -> Result<BigInt, LiteralError> {
    match literal {
        Literal::U64(v) => Ok(BigInt::from(v)),
        Literal::I64(v) => Ok(BigInt::from(v)),
        Literal::Decimal(s) => parse_decimal(s),
        Literal::Bytes(b) => Ok(BigInt::from_bytes_be(Sign::Plus, b)),
        Literal::Value(v) => Ok(v.as_big_int()),
    }
}

fn parse_decimal(s: &str) -> Result<BigInt, LiteralError> {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(LiteralError::InvalidDecimal(s.to_owned()));
    }

    BigInt::parse_bytes(s.as_bytes(), 10).ok_or_else(|| LiteralError::InvalidDecimal(s.to_owned()))
}
