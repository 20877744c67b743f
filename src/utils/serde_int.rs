//! Lenient integer decoding for subgraph / RPC dumps.
//!
//! Accumulators routinely exceed `u64`, and indexers disagree on whether big
//! integers are emitted as JSON numbers or as strings. `LenientInt` accepts
//! either form and parses it with the target type's `FromStr`.

use std::fmt::Display;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use serde_with::DeserializeAs;

/// `serde_with` adapter: `#[serde_as(as = "LenientInt")]`.
pub struct LenientInt;

impl<'de, T> DeserializeAs<'de, T> for LenientInt
where
    T: FromStr,
    T::Err: Display,
{
    fn deserialize_as<D>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = match Value::deserialize(deserializer)? {
            Value::Number(n) => n.to_string(),
            Value::String(s) => s.trim().to_string(),
            other => {
                return Err(D::Error::custom(format!(
                    "expected an integer, found {other}"
                )))
            }
        };
        raw.parse::<T>()
            .map_err(|e| D::Error::custom(format!("invalid integer {raw:?}: {e}")))
    }
}
