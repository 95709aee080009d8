//! Conversion from DynamoDB attribute values to plain JSON.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde_json::{Map, Number, Value};

/// Render a whole item as a JSON object with keys in sorted order
pub fn item_to_json(item: &HashMap<String, AttributeValue>) -> Value {
    Value::Object(sorted_map(item))
}

/// Convert one attribute value.
///
/// Numbers become JSON numbers when they fit an `i64` or `u64`, or when the
/// nearest `f64` reads back as the same decimal value. Anything else, such as a
/// 38 digit DynamoDB number, stays a string. Binary values are base64 encoded.
pub fn attribute_to_json(value: &AttributeValue) -> Value {
    match value {
        AttributeValue::S(s) => Value::String(s.clone()),
        AttributeValue::N(n) => number_to_json(n),
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::B(blob) => Value::String(STANDARD.encode(blob.as_ref())),
        AttributeValue::M(map) => Value::Object(sorted_map(map)),
        AttributeValue::L(list) => Value::Array(list.iter().map(attribute_to_json).collect()),
        AttributeValue::Ss(set) => Value::Array(set.iter().cloned().map(Value::String).collect()),
        AttributeValue::Ns(set) => Value::Array(set.iter().map(|n| number_to_json(n)).collect()),
        AttributeValue::Bs(set) => Value::Array(
            set.iter()
                .map(|blob| Value::String(STANDARD.encode(blob.as_ref())))
                .collect(),
        ),
        // Variants added by newer SDK releases
        _ => Value::Null,
    }
}

fn sorted_map(map: &HashMap<String, AttributeValue>) -> Map<String, Value> {
    let mut keys: Vec<&String> = map.keys().collect();
    keys.sort();
    keys.into_iter()
        .map(|k| (k.clone(), attribute_to_json(&map[k])))
        .collect()
}

fn number_to_json(raw: &str) -> Value {
    if let Ok(i) = raw.parse::<i64>() {
        return Value::Number(i.into());
    }
    if let Ok(u) = raw.parse::<u64>() {
        return Value::Number(u.into());
    }
    raw.parse::<f64>()
        .ok()
        .filter(|f| {
            let expected = decimal_parts(raw);
            expected.is_some() && decimal_parts(&format!("{:e}", f)) == expected
        })
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(raw.to_string()))
}

/// Split a decimal literal into sign, significant digits and power of ten, so
/// `"2.50"`, `"25e-1"` and `"2.5e0"` compare equal.
fn decimal_parts(raw: &str) -> Option<(bool, String, i64)> {
    let (negative, unsigned) = match raw.as_bytes().first()? {
        b'-' => (true, &raw[1..]),
        b'+' => (false, &raw[1..]),
        _ => (false, raw),
    };
    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(at) => (&unsigned[..at], unsigned[at + 1..].parse::<i64>().ok()?),
        None => (unsigned, 0),
    };
    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }

    let mut digits = format!("{}{}", whole, fraction);
    let mut power = exponent.checked_sub(i64::try_from(fraction.len()).ok()?)?;
    let leading_zeros = digits.len() - digits.trim_start_matches('0').len();
    digits.drain(..leading_zeros);
    if digits.is_empty() {
        return Some((false, "0".to_string(), 0));
    }
    while digits.ends_with('0') {
        digits.pop();
        power += 1;
    }
    Some((negative, digits, power))
}
