//! Serde integration for `SnapshotValue`

use super::{ObjectMap, SnapshotValue};
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::Number;
use std::fmt;

impl Serialize for SnapshotValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SnapshotValue::Null => serializer.serialize_unit(),
            SnapshotValue::Bool(b) => serializer.serialize_bool(*b),
            SnapshotValue::Number(n) => n.serialize(serializer),
            SnapshotValue::String(s) => serializer.serialize_str(s),
            SnapshotValue::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            SnapshotValue::Object(members) => {
                // BTreeMap iteration is already sorted by key
                let mut map = serializer.serialize_map(Some(members.len()))?;
                for (key, value) in members {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = SnapshotValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any valid JSON value")
    }

    fn visit_bool<E>(self, v: bool) -> Result<SnapshotValue, E> {
        Ok(SnapshotValue::Bool(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<SnapshotValue, E> {
        Ok(SnapshotValue::Number(v.into()))
    }

    fn visit_u64<E>(self, v: u64) -> Result<SnapshotValue, E> {
        Ok(SnapshotValue::Number(v.into()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<SnapshotValue, E> {
        Number::from_f64(v)
            .map(SnapshotValue::Number)
            .ok_or_else(|| E::custom("non-finite numbers cannot be represented"))
    }

    fn visit_str<E>(self, v: &str) -> Result<SnapshotValue, E> {
        Ok(SnapshotValue::String(v.to_string()))
    }

    fn visit_string<E>(self, v: String) -> Result<SnapshotValue, E> {
        Ok(SnapshotValue::String(v))
    }

    fn visit_unit<E>(self) -> Result<SnapshotValue, E> {
        Ok(SnapshotValue::Null)
    }

    fn visit_none<E>(self) -> Result<SnapshotValue, E> {
        Ok(SnapshotValue::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<SnapshotValue, D::Error> {
        SnapshotValue::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<SnapshotValue, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(SnapshotValue::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<SnapshotValue, A::Error> {
        let mut members = ObjectMap::new();
        while let Some((key, value)) = access.next_entry::<String, SnapshotValue>()? {
            members.insert(key, value);
        }
        Ok(SnapshotValue::Object(members))
    }
}

impl<'de> Deserialize<'de> for SnapshotValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}
