//! Lenient field decoding
//!
//! Upstream records come from explorers, RPC adapters and synthetic
//! generators, and their field types drift. These helpers are plugged in with
//! `#[serde(default, deserialize_with = "...")]` so that a wrongly typed field
//! collapses to `None` (or its zero value) instead of rejecting the record.

use alloy_primitives::U256;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;

/// Coerce a JSON value into a boolean
pub fn coerce_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|x| x != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Coerce a JSON value into a finite float
pub fn coerce_f64(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|x| x.is_finite())
}

/// Coerce a JSON value into a string (numbers and booleans are stringified)
pub fn coerce_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Coerce a JSON value into a wei amount (decimal or `0x` hex string, or number)
pub fn coerce_u256(value: &Value) -> Option<U256> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            U256::from_str(s).ok()
        }
        Value::Number(n) => n.as_u64().map(U256::from).or_else(|| {
            n.as_f64()
                .filter(|x| x.is_finite() && *x >= 0.0)
                .map(|x| U256::from(x as u128))
        }),
        _ => None,
    }
}

pub fn opt_bool<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
    Ok(coerce_bool(&Value::deserialize(d)?))
}

/// Missing or malformed flags read as `false`
pub fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    Ok(coerce_bool(&Value::deserialize(d)?).unwrap_or(false))
}

pub fn opt_f64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(coerce_f64(&Value::deserialize(d)?))
}

pub fn opt_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(coerce_string(&Value::deserialize(d)?))
}

pub fn opt_u256<'de, D: Deserializer<'de>>(d: D) -> Result<Option<U256>, D::Error> {
    Ok(coerce_u256(&Value::deserialize(d)?))
}

/// A list of strings; a bare string becomes a one-element list
pub fn string_set<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    let items = match Value::deserialize(d)? {
        Value::Array(values) => values.iter().filter_map(coerce_string).collect(),
        other => coerce_string(&other).into_iter().collect(),
    };
    Ok(items)
}

/// A nested record; anything that is not an object (or fails to decode) is `None`
pub fn opt_record<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(d)? {
        value @ Value::Object(_) => Ok(serde_json::from_value(value).ok()),
        _ => Ok(None),
    }
}

/// A list of nested records; malformed entries are dropped
pub fn records<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(d)? {
        Value::Array(values) => Ok(values
            .into_iter()
            .filter_map(|v| serde_json::from_value(v).ok())
            .collect()),
        _ => Ok(Vec::new()),
    }
}

/// Any JSON value except `null` and `false`
pub fn presence<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Value>, D::Error> {
    match Value::deserialize(d)? {
        Value::Null | Value::Bool(false) => Ok(None),
        other => Ok(Some(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bool_coercion() {
        assert_eq!(coerce_bool(&json!(true)), Some(true));
        assert_eq!(coerce_bool(&json!("TRUE")), Some(true));
        assert_eq!(coerce_bool(&json!(0)), Some(false));
        assert_eq!(coerce_bool(&json!("maybe")), None);
        assert_eq!(coerce_bool(&json!({"a": 1})), None);
    }

    #[test]
    fn test_number_coercion() {
        assert_eq!(coerce_f64(&json!("28.4")), Some(28.4));
        assert_eq!(coerce_f64(&json!([1])), None);
        assert_eq!(coerce_f64(&json!(" 90.5 ")), Some(90.5));
        assert_eq!(coerce_f64(&json!(14)), Some(14.0));
    }

    #[test]
    fn test_u256_coercion() {
        assert_eq!(coerce_u256(&json!("1000")), Some(U256::from(1000u64)));
        assert_eq!(coerce_u256(&json!("0x10")), Some(U256::from(16u64)));
        assert_eq!(coerce_u256(&json!(42)), Some(U256::from(42u64)));
        assert_eq!(coerce_u256(&json!("")), None);
        assert_eq!(coerce_u256(&json!(-5)), None);
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Probe {
        #[serde(deserialize_with = "flag")]
        on: bool,
        #[serde(deserialize_with = "opt_f64")]
        amount: Option<f64>,
        #[serde(deserialize_with = "string_set")]
        hints: Vec<String>,
        #[serde(deserialize_with = "presence")]
        created: Option<Value>,
    }

    #[test]
    fn test_malformed_fields_fall_back() {
        let probe: Probe = serde_json::from_value(json!({
            "on": {"nested": true},
            "amount": "not-a-number",
            "hints": "Swap",
            "created": false
        }))
        .unwrap();
        assert!(!probe.on);
        assert_eq!(probe.amount, None);
        assert_eq!(probe.hints, vec!["Swap".to_string()]);
        assert!(probe.created.is_none());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let probe: Probe = serde_json::from_value(json!({})).unwrap();
        assert!(!probe.on);
        assert!(probe.hints.is_empty());
    }
}
