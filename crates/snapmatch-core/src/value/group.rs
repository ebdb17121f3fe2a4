//! Group snapshot documents
//!
//! A group file holds several named snapshots as members of one JSON object.
//! Unlike `SnapshotValue` objects, the document keeps members in file order:
//! an existing member is replaced where it stands and a new member is
//! appended, so refreshing one entry never reshuffles its siblings.

use super::SnapshotValue;
use crate::errors::{Result, SnapError};
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// Members of a grouped snapshot file, in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupDocument {
    members: Vec<(String, SnapshotValue)>,
}

impl GroupDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// A document holding exactly one member
    pub fn single(key: impl Into<String>, value: SnapshotValue) -> Self {
        Self {
            members: vec![(key.into(), value)],
        }
    }

    /// Parse the content of a group file.
    ///
    /// ## Errors
    ///
    /// - `SnapError::Parse` if `text` is not valid JSON
    /// - `SnapError::GroupNotObject` if the root is not a JSON object
    pub fn from_json(text: &str, file: &str) -> Result<Self> {
        let root = SnapshotValue::parse(text).map_err(|e| SnapError::Parse {
            file: file.to_string(),
            reason: e.to_string(),
        })?;
        if !root.is_object() {
            return Err(SnapError::GroupNotObject {
                file: file.to_string(),
            });
        }

        // Second pass keeps the member order of the file
        serde_json::from_str(text).map_err(|e| SnapError::Parse {
            file: file.to_string(),
            reason: e.to_string(),
        })
    }

    pub fn get(&self, key: &str) -> Option<&SnapshotValue> {
        self.members
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Replace the member in place if present, else append it.
    ///
    /// Returns `true` when an existing member was replaced.
    pub fn upsert(&mut self, key: &str, value: SnapshotValue) -> bool {
        match self.members.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => {
                *existing = value;
                true
            }
            None => {
                self.members.push((key.to_string(), value));
                false
            }
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// JSON text of the whole document; members keep their order, member
    /// values are canonical.
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
}

impl Serialize for GroupDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.members.len()))?;
        for (key, value) in &self.members {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct GroupVisitor;

impl<'de> Visitor<'de> for GroupVisitor {
    type Value = GroupDocument;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON object of snapshot group members")
    }

    fn visit_map<A: MapAccess<'de>>(
        self,
        mut access: A,
    ) -> std::result::Result<GroupDocument, A::Error> {
        let mut document = GroupDocument::new();
        while let Some((key, value)) = access.next_entry::<String, SnapshotValue>()? {
            document.upsert(&key, value);
        }
        Ok(document)
    }
}

impl<'de> Deserialize<'de> for GroupDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(GroupVisitor)
    }
}
