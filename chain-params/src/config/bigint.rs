//! Serde helpers for arbitrary-precision integers
//!
//! Values that fit in a `u64` are written as JSON numbers; larger values are
//! written as decimal strings. Input accepts numbers up to `u64::MAX`, decimal
//! strings and `0x`-prefixed hex strings. Larger values must be quoted: the
//! JSON decoder hands bigger numeric literals over as lossy floats.

use num_bigint::BigUint;
use num_traits::{Num, ToPrimitive};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serializer};
use std::fmt;

/// Parse a decimal or `0x`-prefixed hex string
pub fn parse(s: &str) -> Option<BigUint> {
    let s = s.trim();
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => BigUint::from_str_radix(hex, 16).ok(),
        None => BigUint::from_str_radix(s, 10).ok(),
    }
}

pub fn serialize<S>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value.to_u64() {
        Some(n) => serializer.serialize_u64(n),
        None => serializer.serialize_str(&value.to_str_radix(10)),
    }
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<BigUint, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(BigUintVisitor)
}

struct BigUintVisitor;

impl<'de> Visitor<'de> for BigUintVisitor {
    type Value = BigUint;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a non-negative integer or an integer string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(BigUint::from(v))
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<Self::Value, E> {
        Ok(BigUint::from(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        u64::try_from(v)
            .map(BigUint::from)
            .map_err(|_| E::custom(format!("negative value {}", v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Err(E::custom(format!(
            "non-integer or out-of-range number {}; integers above u64 must be quoted",
            v
        )))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        parse(v).ok_or_else(|| E::custom(format!("invalid integer string {:?}", v)))
    }
}

/// Wrapper so `Option<BigUint>` can reuse the visitor
struct Wire(BigUint);

impl<'de> Deserialize<'de> for Wire {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserialize(deserializer).map(Wire)
    }
}

/// Same encoding for optional values; `null` decodes as absent
pub mod opt {
    use super::*;

    pub fn serialize<S>(value: &Option<BigUint>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(v) => super::serialize(v, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<BigUint>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<Wire>::deserialize(deserializer)?.map(|w| w.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Holder {
        #[serde(with = "crate::config::bigint", rename = "v")]
        value: BigUint,
        #[serde(default, with = "crate::config::bigint::opt", skip_serializing_if = "Option::is_none")]
        maybe: Option<BigUint>,
    }

    #[test]
    fn test_parse_formats() {
        assert_eq!(parse("100"), Some(BigUint::from(100u32)));
        assert_eq!(parse("0x64"), Some(BigUint::from(100u32)));
        assert_eq!(parse("  42 "), Some(BigUint::from(42u32)));
        assert_eq!(parse("-1"), None);
        assert_eq!(parse("abc"), None);
    }

    #[test]
    fn test_small_values_are_numbers() {
        let holder = Holder {
            value: BigUint::from(8217u32),
            maybe: None,
        };
        assert_eq!(serde_json::to_string(&holder).unwrap(), r#"{"v":8217}"#);
    }

    #[test]
    fn test_large_values_are_strings() {
        let huge = BigUint::from(u64::MAX) * 16u32;
        let holder = Holder {
            value: huge.clone(),
            maybe: Some(huge.clone()),
        };
        let json = serde_json::to_string(&holder).unwrap();
        assert!(json.contains(&format!("\"{}\"", huge)));
        let back: Holder = serde_json::from_str(&json).unwrap();
        assert_eq!(back, holder);
    }

    #[test]
    fn test_numbers_above_u64_must_be_quoted() {
        let err = serde_json::from_str::<Holder>(r#"{"v":340282366920938463463374607431768211456}"#)
            .unwrap_err();
        assert!(err.to_string().contains("must be quoted"));

        let holder: Holder =
            serde_json::from_str(r#"{"v":"340282366920938463463374607431768211456"}"#).unwrap();
        assert_eq!(holder.value, BigUint::from(u128::MAX) + 1u32);
        assert!(serde_json::from_str::<Holder>(r#"{"v":1.5}"#).is_err());
    }

    #[test]
    fn test_rejects_negative_and_null_is_absent() {
        assert!(serde_json::from_str::<Holder>(r#"{"v":-3}"#).is_err());
        let holder: Holder = serde_json::from_str(r#"{"v":"0x10","maybe":null}"#).unwrap();
        assert_eq!(holder.value, BigUint::from(16u32));
        assert_eq!(holder.maybe, None);
    }
}
