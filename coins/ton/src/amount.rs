//! Conversion between on-chain integer amounts and decimal amounts.
//!
//! On-chain amounts are unsigned integers in the token's smallest unit; the
//! wallet works with decimals where `decimal == raw / 10^decimals` exactly.
//! All arithmetic is done on [`BigDecimal`], never on binary floats.

use bigdecimal::BigDecimal;
use num_bigint::{BigInt, BigUint};
use num_traits::{Signed, Zero};
use std::str::FromStr;

use crate::TonError;

/// Largest power of ten [`to_raw`] will scale by. Bounds the work done for
/// inputs such as `1e1000000`.
const MAX_SCALE_EXPONENT: i64 = 128;

/// Converts a raw on-chain amount into a decimal amount.
pub fn to_decimal(raw: &BigUint, decimals: u8) -> BigDecimal {
    BigDecimal::new(BigInt::from(raw.clone()), i64::from(decimals))
}

/// Converts a raw amount given as a decimal string.
///
/// Unparseable input yields zero instead of an error: the string comes from
/// the kit and is only guarded here.
pub fn to_decimal_str(raw: &str, decimals: u8) -> BigDecimal {
    match BigDecimal::from_str(raw) {
        Ok(value) => scale_down(&value, decimals),
        Err(e) => {
            tracing::warn!(raw, error = %e, "unparseable kit amount, using zero");
            BigDecimal::zero()
        }
    }
}

/// Divides an already parsed amount by `10^decimals`.
///
/// A scale that no longer fits in `i64` yields zero, like unparseable input.
pub fn scale_down(value: &BigDecimal, decimals: u8) -> BigDecimal {
    let (digits, scale) = value.as_bigint_and_exponent();
    match scale.checked_add(i64::from(decimals)) {
        Some(scale) => BigDecimal::new(digits, scale),
        None => {
            tracing::warn!(scale, decimals, "kit amount exponent out of range, using zero");
            BigDecimal::zero()
        }
    }
}

/// Converts a decimal amount into raw on-chain units.
///
/// Fails when the amount is negative, has more fractional digits than
/// `decimals`, or is too large to be a token amount.
pub fn to_raw(amount: &BigDecimal, decimals: u8) -> Result<BigUint, TonError> {
    let invalid = || TonError::InvalidAmount {
        amount: describe(amount),
        decimals,
    };

    if amount.is_zero() {
        return Ok(BigUint::zero());
    }
    if amount.is_negative() {
        return Err(invalid());
    }

    let (digits, scale) = amount.normalized().as_bigint_and_exponent();
    let shift = i64::from(decimals).checked_sub(scale).ok_or_else(invalid)?;
    if shift < 0 {
        return Err(invalid());
    }
    if shift > MAX_SCALE_EXPONENT {
        return Err(invalid());
    }

    let scaled = digits * BigInt::from(10u8).pow(shift as u32);
    scaled.to_biguint().ok_or_else(invalid)
}

/// Printable form of an amount; extreme exponents stay in scientific notation
fn describe(amount: &BigDecimal) -> String {
    let (digits, scale) = amount.as_bigint_and_exponent();
    if scale.unsigned_abs() <= MAX_SCALE_EXPONENT as u64 {
        amount.to_string()
    } else {
        format!("{}e{}", digits, -i128::from(scale))
    }
}

/// Negates an amount for the debit side of a transfer. Zero stays zero.
pub fn debit(amount: &BigDecimal) -> BigDecimal {
    if amount.is_zero() {
        BigDecimal::zero()
    } else {
        -amount.clone()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn raw_amount() -> impl Strategy<Value = BigUint> {
        prop::collection::vec(any::<u32>(), 0..9).prop_map(BigUint::new)
    }

    proptest! {
        /// Scaling back up recovers the raw amount exactly
        #[test]
        fn decimal_times_power_of_ten_is_raw(raw in raw_amount(), decimals in 0u8..=38) {
            let value = to_decimal(&raw, decimals);
            let factor = BigDecimal::new(BigInt::from(10u8).pow(u32::from(decimals)), 0);
            prop_assert_eq!(value.clone() * factor, BigDecimal::new(BigInt::from(raw.clone()), 0));
            prop_assert_eq!(to_raw(&value, decimals).unwrap(), raw);
        }

        /// String and integer inputs agree
        #[test]
        fn string_input_matches_integer_input(raw in raw_amount(), decimals in 0u8..=38) {
            prop_assert_eq!(to_decimal_str(&raw.to_string(), decimals), to_decimal(&raw, decimals));
        }

        /// Exponents at the edge of the scale range never panic
        #[test]
        fn extreme_exponent_never_panics(exp in (i64::MAX - 64)..=i64::MAX, decimals in 0u8..=38) {
            let value = to_decimal_str(&format!("1e-{exp}"), decimals);
            prop_assert_eq!(value.is_zero(), exp.checked_add(i64::from(decimals)).is_none());

            let huge = BigDecimal::new(BigInt::from(1u8), -exp);
            prop_assert!(to_raw(&huge, decimals).is_err());
        }

        /// Garbage never panics and yields zero
        #[test]
        fn garbage_is_zero(raw in "[g-zG-Z]{0,16}", decimals in 0u8..=38) {
            prop_assert!(to_decimal_str(&raw, decimals).is_zero());
        }
    }
}
