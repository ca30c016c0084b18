//! Exact decimal scaling.
//!
//! Contract literals are reproduced digit for digit, so all arithmetic here is
//! arbitrary precision.

use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// An integer already multiplied by a power of ten.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScaledNumeral(BigInt);

impl ScaledNumeral {
    pub fn as_bigint(&self) -> &BigInt {
        &self.0
    }

    pub fn into_bigint(self) -> BigInt {
        self.0
    }
}

impl fmt::Display for ScaledNumeral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ScaledNumeral> for Value {
    fn from(numeral: ScaledNumeral) -> Self {
        numeral_value(&numeral.0)
    }
}

/// Computes `amount × 10^precision`.
pub fn scale<A: Into<BigInt>>(amount: A, precision: u32) -> ScaledNumeral {
    let amount = amount.into();
    if amount.is_zero() {
        return ScaledNumeral(amount);
    }
    ScaledNumeral(amount * BigInt::from(10u8).pow(precision))
}

/// Encodes an integer argument for the SDK.
///
/// Values that fit a JSON number are sent as numbers, larger ones as decimal
/// strings.
pub fn numeral_value(value: &BigInt) -> Value {
    if let Some(small) = value.to_i64() {
        Value::from(small)
    } else if let Some(small) = value.to_u64() {
        Value::from(small)
    } else {
        Value::String(value.to_string())
    }
}

/// Reads an integer out of a decoded result (number or decimal string).
pub fn decode_numeral(value: &Value) -> Option<BigInt> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .map(BigInt::from)
            .or_else(|| number.as_u64().map(BigInt::from)),
        Value::String(text) => BigInt::from_str(text.trim()).ok(),
        _ => None,
    }
}
