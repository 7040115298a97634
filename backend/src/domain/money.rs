//! Monetary amounts in minor units.
//!
//! Amounts arrive as decimal text (`"99.99"`, `"100"`) or JSON numbers and
//! are held as an integer count of cents, so threshold comparisons never
//! touch floating point.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of minor units per major unit.
const MINOR_PER_MAJOR: u64 = 100;
/// Maximum number of fraction digits accepted when parsing.
const MAX_FRACTION_DIGITS: usize = 2;

/// Errors raised while parsing an amount.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoneyParseError {
    /// No digits were supplied.
    #[error("amount must not be empty")]
    Empty,
    /// A leading minus sign was supplied.
    #[error("amount must not be negative")]
    Negative,
    /// The text was not a plain decimal number.
    #[error("amount must be a decimal number such as 100 or 99.99")]
    Malformed,
    /// More than two digits followed the decimal point.
    #[error("amount must have at most 2 decimal places")]
    TooPrecise,
    /// The amount does not fit in the supported range.
    #[error("amount is too large")]
    Overflow,
}

/// Non-negative amount of money, stored in minor units.
///
/// # Examples
/// ```
/// use loyalty::domain::Money;
///
/// let amount = Money::parse("99.9").expect("valid amount");
/// assert_eq!(amount.minor_units(), 9_990);
/// assert_eq!(amount.to_string(), "99.90");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "MoneyInput", into = "String")]
pub struct Money(u64);

impl Money {
    /// Wrap a raw count of minor units.
    #[must_use]
    pub const fn from_minor_units(minor: u64) -> Self {
        Self(minor)
    }

    /// Raw count of minor units.
    #[must_use]
    pub const fn minor_units(self) -> u64 {
        self.0
    }

    /// Parse decimal text with at most two fraction digits.
    pub fn parse(text: &str) -> Result<Self, MoneyParseError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(MoneyParseError::Empty);
        }
        if trimmed.starts_with('-') {
            return Err(MoneyParseError::Negative);
        }

        let (whole, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));
        if !is_digits(whole) || (trimmed.contains('.') && !is_digits(fraction)) {
            return Err(MoneyParseError::Malformed);
        }
        if fraction.len() > MAX_FRACTION_DIGITS {
            return Err(MoneyParseError::TooPrecise);
        }

        let major: u64 = whole.parse().map_err(|_| MoneyParseError::Overflow)?;
        let mut minor: u64 = if fraction.is_empty() {
            0
        } else {
            fraction.parse().map_err(|_| MoneyParseError::Malformed)?
        };
        if fraction.len() == 1 {
            minor *= 10;
        }

        major
            .checked_mul(MINOR_PER_MAJOR)
            .and_then(|cents| cents.checked_add(minor))
            .map(Self)
            .ok_or(MoneyParseError::Overflow)
    }
}

fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|byte| byte.is_ascii_digit())
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:02}",
            self.0 / MINOR_PER_MAJOR,
            self.0 % MINOR_PER_MAJOR
        )
    }
}

impl From<Money> for String {
    fn from(value: Money) -> Self {
        value.to_string()
    }
}

/// Wire forms accepted for an amount: decimal text or a JSON number.
///
/// Deserialising this never fails on the value itself, so callers can report
/// a malformed amount as a field validation error. Numbers keep their source
/// text, so `99.999` is rejected as too precise rather than rounded, and
/// exponent forms such as `1e2` are malformed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum MoneyInput {
    Text(String),
    Number(serde_json::Number),
}

impl TryFrom<MoneyInput> for Money {
    type Error = MoneyParseError;

    fn try_from(value: MoneyInput) -> Result<Self, Self::Error> {
        match value {
            MoneyInput::Text(text) => Self::parse(&text),
            MoneyInput::Number(number) => Self::parse(&number.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("100", 10_000)]
    #[case("99.99", 9_999)]
    #[case("100.0", 10_000)]
    #[case(" 12.5 ", 1_250)]
    #[case("0.01", 1)]
    #[case("0", 0)]
    fn parses_decimal_text(#[case] text: &str, #[case] minor: u64) {
        assert_eq!(Money::parse(text), Ok(Money::from_minor_units(minor)));
    }

    #[rstest]
    #[case("", MoneyParseError::Empty)]
    #[case("-100", MoneyParseError::Negative)]
    #[case("abc", MoneyParseError::Malformed)]
    #[case("1e3", MoneyParseError::Malformed)]
    #[case("+5", MoneyParseError::Malformed)]
    #[case(".5", MoneyParseError::Malformed)]
    #[case("100.", MoneyParseError::Malformed)]
    #[case("1.2.3", MoneyParseError::Malformed)]
    #[case("99.999", MoneyParseError::TooPrecise)]
    #[case("184467440737095517", MoneyParseError::Overflow)]
    fn rejects_invalid_text(#[case] text: &str, #[case] expected: MoneyParseError) {
        assert_eq!(Money::parse(text), Err(expected));
    }

    #[rstest]
    #[case(json!("99.99"), 9_999)]
    #[case(json!(100), 10_000)]
    #[case(json!(150.5), 15_050)]
    fn deserialises_text_and_numbers(#[case] value: serde_json::Value, #[case] minor: u64) {
        let money: Money = serde_json::from_value(value).expect("valid amount");
        assert_eq!(money.minor_units(), minor);
    }

    #[rstest]
    #[case("99.9999999999999999", MoneyParseError::TooPrecise)]
    #[case("99.999", MoneyParseError::TooPrecise)]
    #[case("1e2", MoneyParseError::Malformed)]
    #[case("-100", MoneyParseError::Negative)]
    fn rejects_invalid_json_numbers(#[case] body: &str, #[case] expected: MoneyParseError) {
        let input: MoneyInput = serde_json::from_str(body).expect("json number");
        assert!(matches!(input, MoneyInput::Number(_)));
        assert_eq!(Money::try_from(input), Err(expected));
    }

    #[rstest]
    fn serialises_as_two_decimal_string() {
        let value = serde_json::to_value(Money::from_minor_units(10_005)).expect("serialise");
        assert_eq!(value, json!("100.05"));
    }
}
