//! Lenient field decoding for backend read models.
//!
//! Amounts and counts arrive as JSON numbers, numeric strings or `null`
//! depending on the endpoint. Anything that is not a usable number decodes to
//! `None` instead of failing the whole record.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite())
}

/// `Option<f64>` from a number, a numeric string, or anything else as `None`.
pub(crate) fn opt_f64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(number(&Value::deserialize(d)?))
}

/// `f64` defaulting to zero.
pub(crate) fn f64_or_zero<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ok(opt_f64(d)?.unwrap_or(0.0))
}

/// Non-negative whole count, defaulting to one.
pub(crate) fn count_or_one<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    let count = number(&Value::deserialize(d)?)
        .filter(|n| *n >= 0.0 && n.fract() == 0.0 && *n <= u32::MAX as f64)
        .map(|n| n as u32);
    Ok(count.unwrap_or(1))
}

/// `String` from a string, a number, or anything else as empty.
pub(crate) fn string_or_empty<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

/// `Option<String>` from a non-empty string or a number.
pub(crate) fn opt_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// List whose unreadable elements are skipped; a non-array is empty.
pub(crate) fn lenient_vec<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(elements(Some(&Value::deserialize(d)?), "entry"))
}

/// Decode each element of a JSON array, skipping and logging those that do
/// not fit `T`. Anything but an array yields an empty list.
pub(crate) fn elements<T: DeserializeOwned>(value: Option<&Value>, what: &str) -> Vec<T> {
    let Some(array) = value.and_then(Value::as_array) else {
        if value.is_some_and(|v| !v.is_null()) {
            tracing::warn!(what, "expected a list; treating as empty");
        }
        return Vec::new();
    };

    array
        .iter()
        .filter_map(|v| match T::deserialize(v) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!(what, error = %e, "skipping unreadable element");
                None
            }
        })
        .collect()
}

pub(crate) fn one() -> u32 {
    1
}

/// Field spellings, canonical name first.
pub(crate) type KeyGroups = &'static [&'static [&'static str]];

/// Rename the first spelling present in each group to the canonical name.
///
/// Other spellings of the same field stay under their own key, so a record
/// carrying both `_id` and `id` keeps `id` and files `_id` with the unknown
/// fields.
pub(crate) fn canonical_keys(mut map: Map<String, Value>, groups: KeyGroups) -> Map<String, Value> {
    for names in groups {
        let Some((canonical, spellings)) = names.split_first() else {
            continue;
        };
        if map.contains_key(*canonical) {
            continue;
        }
        if let Some(value) = spellings.iter().find_map(|k| map.remove(*k)) {
            map.insert((*canonical).to_string(), value);
        }
    }
    map
}

/// Decode a record with [`canonical_keys`] applied to its top level.
pub(crate) fn canonical<'de, D, T>(
    d: D,
    groups: KeyGroups,
    decode: impl FnOnce(Value) -> Result<T, serde_json::Error>,
) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Value::deserialize(d)? {
        Value::Object(map) => Value::Object(canonical_keys(map, groups)),
        other => other,
    };
    decode(value).map_err(serde::de::Error::custom)
}
