//! Monetary amount validation
//!
//! Amounts arrive as JSON numbers or numeric strings. Anything with more
//! than two fractional digits is rejected; accepted values are rescaled to
//! exactly two places. Sign is not constrained, debits are negative.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;

use super::FieldErrorKind;

/// Fractional digits carried by every stored amount
pub const AMOUNT_DECIMAL_PLACES: u32 = 2;

/// Validated amount with exactly two decimal places
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Amount(Decimal);

impl Amount {
    /// Create an amount, rejecting values with more than two decimal places.
    ///
    /// `12.340` is rejected just like `12.345`: precision is judged on the
    /// value as written, not after trailing zeros are stripped. Values too
    /// wide for two fractional digits in a `Decimal` are rejected as well.
    pub fn new(value: Decimal) -> Result<Self, FieldErrorKind> {
        if value.scale() > AMOUNT_DECIMAL_PLACES {
            return Err(FieldErrorKind::TooPrecise {
                max_places: AMOUNT_DECIMAL_PLACES,
            });
        }

        let mut value = value;
        value.rescale(AMOUNT_DECIMAL_PLACES);
        // `rescale` keeps a lower scale when the mantissa would overflow.
        if value.scale() != AMOUNT_DECIMAL_PLACES {
            return Err(FieldErrorKind::TooLarge {
                max_places: AMOUNT_DECIMAL_PLACES,
            });
        }

        Ok(Self(value))
    }

    /// Parse an amount from a JSON number or numeric string.
    pub fn from_json(value: &Value) -> Result<Self, FieldErrorKind> {
        let text = match value {
            Value::Number(n) => n.to_string(),
            Value::String(s) => s.trim().to_owned(),
            _ => return Err(FieldErrorKind::NotADecimal),
        };

        let decimal = Decimal::from_str(&text)
            .or_else(|_| Decimal::from_scientific(&text))
            .map_err(|_| FieldErrorKind::NotADecimal)?;

        Self::new(decimal)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}
