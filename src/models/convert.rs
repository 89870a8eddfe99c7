//! Total converters from loosely-typed JSON slots to field values.
//!
//! The exchange sends records as positional arrays whose slots may be
//! `null`, missing or of an unexpected type. Each converter maps every
//! possible input to a value and never fails; the record decoders enforce
//! the array shape separately.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;

/// Returns the slot at `index`, or `Value::Null` past the end.
pub fn slot(raw: &[Value], index: usize) -> &Value {
    raw.get(index).unwrap_or(&Value::Null)
}

/// Integer value of a number (fractions truncated) or numeric string; `0` otherwise.
///
/// Integers above `i64::MAX` saturate instead of wrapping.
pub fn i64_or_zero(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|u| i64::try_from(u).unwrap_or(i64::MAX)))
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Value::String(s) => s.parse().unwrap_or(0),
        _ => 0,
    }
}

/// Exact decimal value of a number or numeric string; zero otherwise.
///
/// Numbers are parsed from their shortest textual form so `0.001` decodes
/// to exactly `0.001` rather than the nearest binary float. Magnitudes
/// outside `Decimal`'s range (about ±7.9e28) also yield zero.
pub fn decimal_or_zero(value: &Value) -> Decimal {
    match value {
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(s) => parse_decimal(s),
        _ => Decimal::ZERO,
    }
}

/// String contents of a string slot; empty otherwise.
pub fn string_or_empty(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        _ => String::new(),
    }
}

fn parse_decimal(s: &str) -> Decimal {
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use serde_json::json;

    use super::*;

    #[test]
    fn i64_accepts_integers_floats_and_strings() {
        assert_eq!(i64_or_zero(&json!(1_700_000_000_000i64)), 1_700_000_000_000);
        assert_eq!(i64_or_zero(&json!(-5)), -5);
        assert_eq!(i64_or_zero(&json!(12.9)), 12);
        assert_eq!(i64_or_zero(&json!("42")), 42);
    }

    #[test]
    fn i64_falls_back_to_zero() {
        assert_eq!(i64_or_zero(&Value::Null), 0);
        assert_eq!(i64_or_zero(&json!("abc")), 0);
        assert_eq!(i64_or_zero(&json!([1])), 0);
        assert_eq!(i64_or_zero(&json!(true)), 0);
    }

    #[test]
    fn decimal_is_exact() {
        assert_eq!(decimal_or_zero(&json!(0.5)), dec!(0.5));
        assert_eq!(decimal_or_zero(&json!(0.001)), dec!(0.001));
        assert_eq!(decimal_or_zero(&json!(0.00000001)), dec!(0.00000001));
        assert_eq!(decimal_or_zero(&json!(-1.25)), dec!(-1.25));
        assert_eq!(decimal_or_zero(&json!(100)), dec!(100));
        assert_eq!(decimal_or_zero(&json!("0.1")), dec!(0.1));
    }

    #[test]
    fn i64_saturates_above_range() {
        assert_eq!(i64_or_zero(&json!(u64::MAX)), i64::MAX);
        assert_eq!(i64_or_zero(&json!(i64::MAX as u64 + 1)), i64::MAX);
    }

    #[test]
    fn decimal_out_of_range_is_zero() {
        assert_eq!(decimal_or_zero(&json!(1e40)), Decimal::ZERO);
        assert_eq!(decimal_or_zero(&json!("1e40")), Decimal::ZERO);
    }

    #[test]
    fn decimal_falls_back_to_zero() {
        assert_eq!(decimal_or_zero(&Value::Null), Decimal::ZERO);
        assert_eq!(decimal_or_zero(&json!("n/a")), Decimal::ZERO);
        assert_eq!(decimal_or_zero(&json!({ "a": 1 })), Decimal::ZERO);
    }

    #[test]
    fn string_falls_back_to_empty() {
        assert_eq!(string_or_empty(&json!("BTC")), "BTC");
        assert_eq!(string_or_empty(&Value::Null), "");
        assert_eq!(string_or_empty(&json!(7)), "");
    }

    #[test]
    fn slot_past_end_is_null() {
        let raw = vec![json!(1)];
        assert_eq!(slot(&raw, 0), &json!(1));
        assert_eq!(slot(&raw, 5), &Value::Null);
    }
}
