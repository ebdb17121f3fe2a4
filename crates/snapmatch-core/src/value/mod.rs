//! Structural value model
//!
//! A `SnapshotValue` is the tree both sides of a comparison are reduced to.
//! Values built from host data and values parsed from snapshot files end up
//! in the same shape, so equality and serialization never depend on where a
//! value came from.
//!
//! ## Determinism
//!
//! - Object members live in a `BTreeMap`, so keys are unique and always
//!   iterate in sorted order
//! - Serialization therefore emits keys in sorted order, and two values with
//!   the same members serialize identically whatever their construction order
//! - Numbers compare numerically: `1` and `1.0` are equal

mod group;
mod serde_impl;

pub use group::GroupDocument;

use crate::errors::Result;
use crate::path::{JsonPath, Step};
use serde::Serialize;
use serde_json::Number;
use std::collections::BTreeMap;

/// Object members, keyed and ordered by name
pub type ObjectMap = BTreeMap<String, SnapshotValue>;

/// A finite, acyclic structured value
#[derive(Debug, Clone, Default)]
pub enum SnapshotValue {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<SnapshotValue>),
    Object(ObjectMap),
}

impl SnapshotValue {
    /// Build a value from any serializable host value.
    ///
    /// Struct fields and map entries become object members; their order in
    /// the host type is irrelevant because members are kept sorted.
    ///
    /// ## Errors
    ///
    /// Returns `SnapError::Serialization` if the host value cannot be
    /// represented (for example a map with non-string keys).
    pub fn from_serializable<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        Ok(serde_json::to_value(value)?.into())
    }

    /// Parse JSON text into a value.
    ///
    /// Duplicate object keys keep the last occurrence.
    pub fn parse(text: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Canonical JSON text with sorted keys, optionally indented.
    ///
    /// ## Errors
    ///
    /// Returns `SnapError::Serialization` if JSON encoding fails.
    pub fn serialize(&self, indent: bool) -> Result<String> {
        let text = if indent {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(text)
    }

    /// Text stored in a snapshot file for this value.
    ///
    /// An ungrouped top-level string is stored as its raw text so single
    /// scalar snapshots stay readable; everything else is canonical JSON.
    ///
    /// ## Errors
    ///
    /// Returns `SnapError::Serialization` if JSON encoding fails.
    pub fn to_snapshot_text(&self, indent: bool, grouped: bool) -> Result<String> {
        match self {
            SnapshotValue::String(s) if !grouped => Ok(s.clone()),
            _ => self.serialize(indent),
        }
    }

    /// Structural equality: member order is irrelevant, element order is not.
    pub fn deep_equals(&self, other: &SnapshotValue) -> bool {
        match (self, other) {
            (SnapshotValue::Null, SnapshotValue::Null) => true,
            (SnapshotValue::Bool(a), SnapshotValue::Bool(b)) => a == b,
            (SnapshotValue::Number(a), SnapshotValue::Number(b)) => numbers_equal(a, b),
            (SnapshotValue::String(a), SnapshotValue::String(b)) => a == b,
            (SnapshotValue::Array(a), SnapshotValue::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.deep_equals(y))
            }
            (SnapshotValue::Object(a), SnapshotValue::Object(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .all(|(k, v)| b.get(k).is_some_and(|other| v.deep_equals(other)))
            }
            _ => false,
        }
    }

    /// Evaluate each path and gather every match, in path order.
    ///
    /// - no match at all → `None`
    /// - exactly one match → that value itself
    /// - several matches → an array of them in match order
    ///
    /// ## Errors
    ///
    /// Returns `SnapError::InvalidPath` if a path cannot be parsed.
    pub fn select<S: AsRef<str>>(&self, paths: &[S]) -> Result<Option<SnapshotValue>> {
        let mut matches = Vec::new();
        for path in paths {
            let query = JsonPath::parse(path.as_ref())?;
            for location in query.resolve(self) {
                if let Some(found) = self.get_at(&location) {
                    matches.push(found.clone());
                }
            }
        }

        Ok(match matches.len() {
            0 => None,
            1 => matches.pop(),
            _ => Some(SnapshotValue::Array(matches)),
        })
    }

    /// Remove every node matched by any of the paths, in place.
    ///
    /// All paths are resolved against the unmodified tree before anything is
    /// detached. Removals then run deepest-and-last first, so array indices
    /// still to be removed never shift.
    ///
    /// ## Errors
    ///
    /// - `SnapError::InvalidPath` if a path cannot be parsed
    /// - `SnapError::RootExclusion` if a path matches the root; nothing is
    ///   removed in that case
    pub fn remove<S: AsRef<str>>(&mut self, paths: &[S]) -> Result<()> {
        let mut locations = Vec::new();
        for path in paths {
            let query = JsonPath::parse(path.as_ref())?;
            let resolved = query.resolve(self);
            if resolved.iter().any(|location| location.is_empty()) {
                return Err(crate::errors::SnapError::RootExclusion {
                    path: path.as_ref().to_string(),
                });
            }
            locations.extend(resolved);
        }

        locations.sort();
        locations.dedup();
        for location in locations.iter().rev() {
            self.remove_at(location);
        }
        Ok(())
    }

    /// Node at a resolved location
    pub fn get_at(&self, location: &[Step]) -> Option<&SnapshotValue> {
        location.iter().try_fold(self, |node, step| match (node, step) {
            (SnapshotValue::Object(map), Step::Key(key)) => map.get(key),
            (SnapshotValue::Array(items), Step::Index(i)) => items.get(*i),
            _ => None,
        })
    }

    fn get_at_mut(&mut self, location: &[Step]) -> Option<&mut SnapshotValue> {
        location.iter().try_fold(self, |node, step| match (node, step) {
            (SnapshotValue::Object(map), Step::Key(key)) => map.get_mut(key),
            (SnapshotValue::Array(items), Step::Index(i)) => items.get_mut(*i),
            _ => None,
        })
    }

    /// Detach the node at a location: a member is removed from its object,
    /// an element from its array. The root cannot be detached.
    fn remove_at(&mut self, location: &[Step]) -> Option<SnapshotValue> {
        let (last, parent_path) = location.split_last()?;
        match (self.get_at_mut(parent_path)?, last) {
            (SnapshotValue::Object(map), Step::Key(key)) => map.remove(key),
            (SnapshotValue::Array(items), Step::Index(i)) if *i < items.len() => {
                Some(items.remove(*i))
            }
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, SnapshotValue::Null)
    }

    pub fn is_object(&self) -> bool {
        matches!(self, SnapshotValue::Object(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, SnapshotValue::String(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SnapshotValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<SnapshotValue>> {
        match self {
            SnapshotValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectMap> {
        match self {
            SnapshotValue::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Member of an object value
    pub fn get(&self, key: &str) -> Option<&SnapshotValue> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Short type description used in error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            SnapshotValue::Null => "null",
            SnapshotValue::Bool(_) => "boolean",
            SnapshotValue::Number(_) => "number",
            SnapshotValue::String(_) => "string",
            SnapshotValue::Array(_) => "array",
            SnapshotValue::Object(_) => "object",
        }
    }
}

impl PartialEq for SnapshotValue {
    fn eq(&self, other: &Self) -> bool {
        self.deep_equals(other)
    }
}

impl From<serde_json::Value> for SnapshotValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => SnapshotValue::Null,
            serde_json::Value::Bool(b) => SnapshotValue::Bool(b),
            serde_json::Value::Number(n) => SnapshotValue::Number(n),
            serde_json::Value::String(s) => SnapshotValue::String(s),
            serde_json::Value::Array(items) => {
                SnapshotValue::Array(items.into_iter().map(SnapshotValue::from).collect())
            }
            serde_json::Value::Object(map) => SnapshotValue::Object(
                map.into_iter()
                    .map(|(k, v)| (k, SnapshotValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for SnapshotValue {
    fn from(s: &str) -> Self {
        SnapshotValue::String(s.to_string())
    }
}

impl From<String> for SnapshotValue {
    fn from(s: String) -> Self {
        SnapshotValue::String(s)
    }
}

impl From<bool> for SnapshotValue {
    fn from(b: bool) -> Self {
        SnapshotValue::Bool(b)
    }
}

impl From<i64> for SnapshotValue {
    fn from(n: i64) -> Self {
        SnapshotValue::Number(n.into())
    }
}

fn numbers_equal(a: &Number, b: &Number) -> bool {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x == y;
    }
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SnapError;
    use serde_json::json;

    fn city() -> SnapshotValue {
        json!({
            "Name": "Flagstaff",
            "Address": { "Street": "William", "Postcode": "3000" },
            "Tags": ["a", "b", "c", "d"]
        })
        .into()
    }

    #[test]
    fn test_object_equality_ignores_member_order() {
        let a = SnapshotValue::parse(r#"{"b":1,"a":{"y":2,"x":3}}"#).unwrap();
        let b = SnapshotValue::parse(r#"{"a":{"x":3,"y":2},"b":1}"#).unwrap();
        assert!(a.deep_equals(&b));
        assert_eq!(a.serialize(false).unwrap(), b.serialize(false).unwrap());
    }

    #[test]
    fn test_array_order_matters() {
        let a: SnapshotValue = json!([1, 2]).into();
        let b: SnapshotValue = json!([2, 1]).into();
        assert!(!a.deep_equals(&b));
    }

    #[test]
    fn test_numbers_compare_numerically() {
        let a = SnapshotValue::parse("1").unwrap();
        let b = SnapshotValue::parse("1.0").unwrap();
        assert!(a.deep_equals(&b));
    }

    #[test]
    fn test_serialize_sorts_keys() {
        let v = SnapshotValue::parse(r#"{"zeta":true,"alpha":null}"#).unwrap();
        assert_eq!(v.serialize(false).unwrap(), r#"{"alpha":null,"zeta":true}"#);
    }

    #[test]
    fn test_serialize_indented() {
        let v: SnapshotValue = json!({"a": [1]}).into();
        assert_eq!(v.serialize(true).unwrap(), "{\n  \"a\": [\n    1\n  ]\n}");
    }

    #[test]
    fn test_snapshot_text_raw_string_only_when_ungrouped() {
        let v = SnapshotValue::from("hello");
        assert_eq!(v.to_snapshot_text(true, false).unwrap(), "hello");
        assert_eq!(v.to_snapshot_text(true, true).unwrap(), "\"hello\"");
    }

    #[test]
    fn test_select_single_match_unwraps() {
        let selected = city().select(&["Address"]).unwrap().unwrap();
        assert!(selected.is_object());
        assert_eq!(selected.get("Street"), Some(&SnapshotValue::from("William")));
    }

    #[test]
    fn test_select_no_match_is_absent() {
        assert!(city().select(&["Missing"]).unwrap().is_none());
    }

    #[test]
    fn test_select_multiple_paths_in_argument_order() {
        let selected = city().select(&["Name", "Address.Street"]).unwrap().unwrap();
        let expected: SnapshotValue = json!(["Flagstaff", "William"]).into();
        assert_eq!(selected, expected);

        let reversed = city().select(&["Address.Street", "Name"]).unwrap().unwrap();
        let expected: SnapshotValue = json!(["William", "Flagstaff"]).into();
        assert_eq!(reversed, expected);
    }

    #[test]
    fn test_select_indices_keep_listed_order_and_duplicates() {
        let selected = city().select(&["Tags[2,0,2]"]).unwrap().unwrap();
        let expected: SnapshotValue = json!(["c", "a", "c"]).into();
        assert_eq!(selected, expected);
    }

    #[test]
    fn test_remove_member() {
        let mut v = city();
        v.remove(&["Address.Postcode"]).unwrap();
        let expected: SnapshotValue = json!({"Street": "William"}).into();
        assert_eq!(v.get("Address"), Some(&expected));
    }

    #[test]
    fn test_remove_several_elements_of_one_array() {
        let mut v = city();
        v.remove(&["Tags[0]", "Tags[2]"]).unwrap();
        let expected: SnapshotValue = json!(["b", "d"]).into();
        assert_eq!(v.get("Tags"), Some(&expected));
    }

    #[test]
    fn test_remove_duplicate_index_removes_once() {
        let mut v = city();
        v.remove(&["Tags[1,1]"]).unwrap();
        let expected: SnapshotValue = json!(["a", "c", "d"]).into();
        assert_eq!(v.get("Tags"), Some(&expected));
    }

    #[test]
    fn test_remove_nested_and_parent_together() {
        let mut v = city();
        v.remove(&["Address.Street", "Address"]).unwrap();
        assert!(v.get("Address").is_none());
    }

    #[test]
    fn test_remove_root_is_rejected_and_leaves_value_intact() {
        let mut v = city();
        let err = v.remove(&["Name", "$"]).unwrap_err();
        assert_eq!(
            err,
            SnapError::RootExclusion {
                path: "$".to_string()
            }
        );
        assert!(v.get("Name").is_some());
    }

    #[test]
    fn test_from_serializable_struct() {
        #[derive(serde::Serialize)]
        struct Address {
            street: &'static str,
            city: &'static str,
        }
        let v = SnapshotValue::from_serializable(&Address {
            street: "William",
            city: "Melbourne",
        })
        .unwrap();
        assert_eq!(
            v.serialize(false).unwrap(),
            r#"{"city":"Melbourne","street":"William"}"#
        );
    }

    #[test]
    fn test_uuid_becomes_string() {
        let id = uuid::Uuid::new_v4();
        let v = SnapshotValue::from_serializable(&id).unwrap();
        assert_eq!(v.as_str(), Some(id.to_string().as_str()));
        assert_eq!(v.to_snapshot_text(true, false).unwrap(), id.to_string());
    }
}
