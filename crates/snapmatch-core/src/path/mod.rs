//! Restricted JSON path queries
//!
//! Supports the subset needed to include or exclude parts of a value:
//!
//! - `$` : the root
//! - `name`, `$.name`, `a.b.c` : member access
//! - `name[1]`, `name[2,0,2]` : one or more array elements, in listed order
//!   (duplicates kept)
//! - `$['a','b']`, `["odd.name"]` : one or more members by quoted name, for
//!   names that collide with the grammar
//! - `*` / `[*]` : every member or element of a node
//!
//! Anything else (filters, slices, recursive descent) is rejected as an
//! invalid path.

mod parser;

use crate::errors::Result;
use crate::value::SnapshotValue;

/// One step from a node to one of its children
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step {
    Index(usize),
    Key(String),
}

/// A resolved node address; empty means the root
pub type Location = Vec<Step>;

/// A parsed query segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Members by name, resolved in listed order
    Members(Vec<String>),
    /// Array elements by index, resolved in listed order
    Indices(Vec<usize>),
    /// Every member or element
    Wildcard,
}

/// A parsed path query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonPath {
    source: String,
    segments: Vec<Segment>,
}

impl JsonPath {
    /// Parse a query string.
    ///
    /// ## Errors
    ///
    /// Returns `SnapError::InvalidPath` naming the query and the problem.
    pub fn parse(source: &str) -> Result<Self> {
        let segments = parser::parse_segments(source)?;
        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// True when the query is just `$`
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Locations of every node the query matches, in match order.
    ///
    /// Missing members, out-of-range indices and steps into scalars simply
    /// produce no match.
    pub fn resolve(&self, root: &SnapshotValue) -> Vec<Location> {
        let mut current: Vec<(Location, &SnapshotValue)> = vec![(Vec::new(), root)];

        for segment in &self.segments {
            let mut next = Vec::new();
            for (location, node) in current {
                match (segment, node) {
                    (Segment::Members(names), SnapshotValue::Object(map)) => {
                        for name in names {
                            if let Some(child) = map.get(name) {
                                next.push((child_location(&location, Step::Key(name.clone())), child));
                            }
                        }
                    }
                    (Segment::Indices(indices), SnapshotValue::Array(items)) => {
                        for &i in indices {
                            if let Some(child) = items.get(i) {
                                next.push((child_location(&location, Step::Index(i)), child));
                            }
                        }
                    }
                    (Segment::Wildcard, SnapshotValue::Object(map)) => {
                        for (name, child) in map {
                            next.push((child_location(&location, Step::Key(name.clone())), child));
                        }
                    }
                    (Segment::Wildcard, SnapshotValue::Array(items)) => {
                        for (i, child) in items.iter().enumerate() {
                            next.push((child_location(&location, Step::Index(i)), child));
                        }
                    }
                    _ => {}
                }
            }
            current = next;
        }

        current.into_iter().map(|(location, _)| location).collect()
    }
}

impl std::fmt::Display for JsonPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}

fn child_location(parent: &Location, step: Step) -> Location {
    let mut location = Vec::with_capacity(parent.len() + 1);
    location.extend_from_slice(parent);
    location.push(step);
    location
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> SnapshotValue {
        json!({
            "a": { "b": [10, 20, 30] },
            "c": "x",
            "odd.name": 1
        })
        .into()
    }

    fn keys(locations: &[Location]) -> Vec<String> {
        locations
            .iter()
            .map(|l| {
                l.iter()
                    .map(|s| match s {
                        Step::Key(k) => k.clone(),
                        Step::Index(i) => i.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join("/")
            })
            .collect()
    }

    #[test]
    fn test_root_resolves_to_empty_location() {
        let path = JsonPath::parse("$").unwrap();
        assert!(path.is_root());
        assert_eq!(path.resolve(&sample()), vec![Vec::<Step>::new()]);
    }

    #[test]
    fn test_dotted_members() {
        let path = JsonPath::parse("a.b").unwrap();
        assert_eq!(keys(&path.resolve(&sample())), vec!["a/b"]);
    }

    #[test]
    fn test_indices_in_listed_order() {
        let path = JsonPath::parse("$.a.b[2,0]").unwrap();
        assert_eq!(keys(&path.resolve(&sample())), vec!["a/b/2", "a/b/0"]);
    }

    #[test]
    fn test_quoted_member_with_dot() {
        let path = JsonPath::parse("$['odd.name','c']").unwrap();
        assert_eq!(keys(&path.resolve(&sample())), vec!["odd.name", "c"]);
    }

    #[test]
    fn test_missing_and_out_of_range_produce_nothing() {
        let root = sample();
        assert!(JsonPath::parse("nope").unwrap().resolve(&root).is_empty());
        assert!(JsonPath::parse("a.b[7]").unwrap().resolve(&root).is_empty());
        assert!(JsonPath::parse("c.d").unwrap().resolve(&root).is_empty());
        assert!(JsonPath::parse("a[0]").unwrap().resolve(&root).is_empty());
    }

    #[test]
    fn test_wildcard() {
        let path = JsonPath::parse("a.b[*]").unwrap();
        assert_eq!(path.resolve(&sample()).len(), 3);
        let path = JsonPath::parse("$.*").unwrap();
        assert_eq!(keys(&path.resolve(&sample())), vec!["a", "c", "odd.name"]);
    }
}
