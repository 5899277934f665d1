//! FLOW token amounts.

use std::fmt::{self, Display};
use std::ops::{Add, Sub};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ParseAmountError;

/// Number of decimal places in a UFix64 amount.
const DECIMALS: usize = 8;
/// Base units per whole FLOW (10^8).
const UNITS_PER_FLOW: u64 = 100_000_000;

/// A FLOW token amount with UFix64 precision (10^-8 FLOW).
///
/// ```
/// use flow_access::FlowToken;
///
/// let amount: FlowToken = "1.5 FLOW".parse().unwrap();
/// assert_eq!(amount.as_units(), 150_000_000);
/// assert_eq!(amount.to_string(), "1.5 FLOW");
/// ```
///
/// Bare numbers are rejected when parsing to avoid unit confusion. On the
/// wire the amount is a decimal string of base units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FlowToken(u64);

impl FlowToken {
    /// Zero FLOW.
    pub const ZERO: Self = Self(0);
    /// Smallest representable amount (10^-8 FLOW).
    pub const ONE_UNIT: Self = Self(1);
    /// One FLOW.
    pub const ONE_FLOW: Self = Self(UNITS_PER_FLOW);

    /// Create from whole FLOW.
    pub const fn flow(flow: u64) -> Self {
        Self(flow * UNITS_PER_FLOW)
    }

    /// Create from base units (10^-8 FLOW).
    pub const fn from_units(units: u64) -> Self {
        Self(units)
    }

    /// Parse from decimal FLOW (e.g., `1.5`).
    pub fn from_flow_decimal(s: &str) -> Result<Self, ParseAmountError> {
        let s = s.trim();
        let (integer_part, decimal_part) = s.split_once('.').unwrap_or((s, ""));

        if integer_part.is_empty() && decimal_part.is_empty() {
            return Err(ParseAmountError::InvalidNumber(s.to_string()));
        }
        if !is_digits(integer_part) || !is_digits(decimal_part) {
            return Err(ParseAmountError::InvalidNumber(s.to_string()));
        }
        if decimal_part.len() > DECIMALS {
            return Err(ParseAmountError::TooPrecise(s.to_string()));
        }

        let integer: u64 = if integer_part.is_empty() {
            0
        } else {
            integer_part
                .parse()
                .map_err(|_| ParseAmountError::InvalidNumber(s.to_string()))?
        };
        let decimal: u64 = if decimal_part.is_empty() {
            0
        } else {
            let scaled = format!("{:0<width$}", decimal_part, width = DECIMALS);
            scaled
                .parse()
                .map_err(|_| ParseAmountError::InvalidNumber(s.to_string()))?
        };

        integer
            .checked_mul(UNITS_PER_FLOW)
            .and_then(|v| v.checked_add(decimal))
            .map(Self)
            .ok_or(ParseAmountError::Overflow)
    }

    /// Get the raw base-unit value.
    pub const fn as_units(&self) -> u64 {
        self.0
    }

    /// Get whole FLOW (truncated).
    pub const fn as_flow(&self) -> u64 {
        self.0 / UNITS_PER_FLOW
    }

    /// Checked addition.
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Checked subtraction.
    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    /// Saturating addition.
    pub fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Saturating subtraction.
    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// Check if zero.
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

/// `u64::from_str` accepts a leading `+`, so digits are checked first.
fn is_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

impl FromStr for FlowToken {
    type Err = ParseAmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Some(value) = s.strip_suffix(" FLOW").or_else(|| s.strip_suffix(" flow")) {
            return Self::from_flow_decimal(value);
        }

        if s.chars().all(|c| c.is_ascii_digit() || c == '.') {
            return Err(ParseAmountError::AmbiguousAmount(s.to_string()));
        }

        Err(ParseAmountError::InvalidFormat(s.to_string()))
    }
}

impl Display for FlowToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / UNITS_PER_FLOW;
        let remainder = self.0 % UNITS_PER_FLOW;

        if remainder == 0 {
            write!(f, "{} FLOW", whole)
        } else {
            let decimal = format!("{:0width$}", remainder, width = DECIMALS);
            write!(f, "{}.{} FLOW", whole, decimal.trim_end_matches('0'))
        }
    }
}

impl Add for FlowToken {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl Sub for FlowToken {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl Serialize for FlowToken {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for FlowToken {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            Number(u64),
        }

        match Repr::deserialize(d)? {
            Repr::Text(s) => {
                if s.is_empty() || !is_digits(&s) {
                    return Err(serde::de::Error::custom(format!(
                        "invalid FLOW base-unit amount: '{}'",
                        s
                    )));
                }
                s.parse().map(Self).map_err(serde::de::Error::custom)
            }
            Repr::Number(n) => Ok(Self(n)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        assert_eq!(FlowToken::flow(2).as_units(), 200_000_000);
        assert_eq!(FlowToken::from_units(1), FlowToken::ONE_UNIT);
        assert_eq!(FlowToken::flow(1), FlowToken::ONE_FLOW);
        assert_eq!(FlowToken::from_units(250_000_000).as_flow(), 2);
    }

    #[test]
    fn test_parse_flow() {
        assert_eq!("5 FLOW".parse::<FlowToken>().unwrap(), FlowToken::flow(5));
        assert_eq!("5 flow".parse::<FlowToken>().unwrap(), FlowToken::flow(5));
        assert_eq!(
            "0.00000001 FLOW".parse::<FlowToken>().unwrap(),
            FlowToken::ONE_UNIT
        );
        assert_eq!(
            ".5 FLOW".parse::<FlowToken>().unwrap(),
            FlowToken::from_units(50_000_000)
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "5".parse::<FlowToken>(),
            Err(ParseAmountError::AmbiguousAmount("5".to_string()))
        );
        assert_eq!(
            "5 USD".parse::<FlowToken>(),
            Err(ParseAmountError::InvalidFormat("5 USD".to_string()))
        );
        assert_eq!(
            "0.000000001 FLOW".parse::<FlowToken>(),
            Err(ParseAmountError::TooPrecise("0.000000001".to_string()))
        );
        assert_eq!(
            "1.x FLOW".parse::<FlowToken>(),
            Err(ParseAmountError::InvalidNumber("1.x".to_string()))
        );
        assert_eq!(
            "1.+5 FLOW".parse::<FlowToken>(),
            Err(ParseAmountError::InvalidNumber("1.+5".to_string()))
        );
        assert_eq!(
            "+1 FLOW".parse::<FlowToken>(),
            Err(ParseAmountError::InvalidNumber("+1".to_string()))
        );
        assert_eq!(
            "184467440738 FLOW".parse::<FlowToken>(),
            Err(ParseAmountError::Overflow)
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(FlowToken::ZERO.to_string(), "0 FLOW");
        assert_eq!(FlowToken::flow(3).to_string(), "3 FLOW");
        assert_eq!(FlowToken::from_units(150_000_000).to_string(), "1.5 FLOW");
        assert_eq!(FlowToken::ONE_UNIT.to_string(), "0.00000001 FLOW");
    }

    #[test]
    fn test_arithmetic() {
        let a = FlowToken::flow(2);
        let b = FlowToken::flow(1);
        assert_eq!(a + b, FlowToken::flow(3));
        assert_eq!(a - b, FlowToken::flow(1));
        assert_eq!(b.checked_sub(a), None);
        assert_eq!(b.saturating_sub(a), FlowToken::ZERO);
        assert_eq!(
            FlowToken::from_units(u64::MAX).saturating_add(b),
            FlowToken::from_units(u64::MAX)
        );
        assert!(FlowToken::ZERO.is_zero());
    }

    #[test]
    fn test_serde_string_and_number() {
        let amount = FlowToken::from_units(123_456);
        assert_eq!(serde_json::to_string(&amount).unwrap(), "\"123456\"");

        let from_str: FlowToken = serde_json::from_str("\"123456\"").unwrap();
        let from_num: FlowToken = serde_json::from_str("123456").unwrap();
        assert_eq!(from_str, amount);
        assert_eq!(from_num, amount);

        assert!(serde_json::from_str::<FlowToken>("\"12x\"").is_err());
        assert!(serde_json::from_str::<FlowToken>("-1").is_err());
        assert!(serde_json::from_str::<FlowToken>("\"+7\"").is_err());
        assert!(serde_json::from_str::<FlowToken>("\"\"").is_err());
    }
}
