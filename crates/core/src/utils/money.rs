//! Bounds and overflow-checked arithmetic for money values.

use rust_decimal::Decimal;

use crate::constants::MAX_MONEY_AMOUNT;
use crate::errors::{Error, Result, ValidationError};

/// Accepts values in `(0, MAX_MONEY_AMOUNT]`.
pub fn validate_money(field: &str, value: Decimal) -> Result<()> {
    if value <= Decimal::ZERO {
        return Err(
            ValidationError::InvalidInput(format!("{field} must be greater than zero")).into(),
        );
    }
    if value > Decimal::from(MAX_MONEY_AMOUNT) {
        return Err(ValidationError::OutOfRange(format!(
            "{field} must not exceed {MAX_MONEY_AMOUNT}"
        ))
        .into());
    }
    Ok(())
}

pub fn checked_add(total: Decimal, value: Decimal) -> Result<Decimal> {
    total
        .checked_add(value)
        .ok_or_else(|| out_of_range("spend total"))
}

pub fn checked_sub(minuend: Decimal, subtrahend: Decimal) -> Result<Decimal> {
    minuend
        .checked_sub(subtrahend)
        .ok_or_else(|| out_of_range("remaining budget"))
}

pub fn checked_sum<I>(values: I) -> Result<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    values.into_iter().try_fold(Decimal::ZERO, checked_add)
}

fn out_of_range(what: &str) -> Error {
    ValidationError::OutOfRange(format!("{what} exceeds the supported range")).into()
}
