#![forbid(unsafe_code)]

//! Nested value access by path expression
//!
//! A path is a dot-separated list of segments. A segment may end in one
//! bracket index, so `addresses[0].city` reads key `addresses`, element `0`,
//! then key `city`.
//!
//! Reads short-circuit to `None` at the first missing step. Writes never
//! fail: missing or scalar intermediates are replaced with a mapping (for a
//! key step) or a sequence (for an index step), and sequences are padded with
//! `null` up to the written index. Indices above [`MAX_PADDED_INDEX`] are
//! written as mapping keys.

use regex::Regex;
use serde_json::{Map, Value};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Largest index a write will pad a sequence up to
///
/// Writes past it store the value under the decimal key of a mapping
/// instead. An existing sequence becomes a mapping keyed by position.
pub const MAX_PADDED_INDEX: usize = 65_535;

static BRACKET_SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^\[\]]+)\[(\d+)\]$").expect("bracket segment pattern is valid")
});

/// One dot-separated segment: a key with an optional bracket index
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathSegment {
    pub key: String,
    pub index: Option<usize>,
}

impl PathSegment {
    fn parse(raw: &str) -> Self {
        if let Some(caps) = BRACKET_SEGMENT.captures(raw)
            && let Ok(index) = caps[2].parse::<usize>()
        {
            return PathSegment {
                key: caps[1].to_string(),
                index: Some(index),
            };
        }

        PathSegment {
            key: raw.to_string(),
            index: None,
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "{}[{}]", self.key, index),
            None => write!(f, "{}", self.key),
        }
    }
}

/// A single navigation step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step<'a> {
    Key(&'a str),
    Index(usize),
}

/// A parsed path expression
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathExpression {
    segments: Vec<PathSegment>,
}

impl PathExpression {
    /// Parse a path; every string is a path, so this never fails
    pub fn parse(path: &str) -> Self {
        PathExpression {
            segments: path.split('.').map(PathSegment::parse).collect(),
        }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// True when no segment has an empty key (`a..b`, `.a` and `""` are not)
    pub fn is_well_formed(&self) -> bool {
        self.segments.iter().all(|segment| !segment.key.is_empty())
    }

    fn steps(&self) -> impl Iterator<Item = Step<'_>> {
        self.segments.iter().flat_map(|segment| {
            std::iter::once(Step::Key(segment.key.as_str())).chain(segment.index.map(Step::Index))
        })
    }

    /// Read the value at this path
    pub fn get<'v>(&self, root: &'v Value) -> Option<&'v Value> {
        let mut current = root;
        for step in self.steps() {
            current = child(current, step)?;
        }
        Some(current)
    }

    /// Write `value` at this path, creating intermediate containers
    pub fn set(&self, root: &mut Value, value: Value) {
        let steps: Vec<Step<'_>> = self.steps().collect();
        let Some((last, intermediate)) = steps.split_last() else {
            *root = value;
            return;
        };

        let mut current = root;
        for step in intermediate {
            current = slot(current, *step);
        }
        *slot(current, *last) = value;
    }
}

impl fmt::Display for PathExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl FromStr for PathExpression {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(PathExpression::parse(s))
    }
}

impl From<&str> for PathExpression {
    fn from(s: &str) -> Self {
        PathExpression::parse(s)
    }
}

fn child<'v>(current: &'v Value, step: Step<'_>) -> Option<&'v Value> {
    match (current, step) {
        (Value::Object(map), Step::Key(key)) => map.get(key),
        (Value::Array(items), Step::Key(key)) => {
            key.parse::<usize>().ok().and_then(|i| items.get(i))
        }
        (Value::Array(items), Step::Index(i)) => items.get(i),
        (Value::Object(map), Step::Index(i)) => map.get(&i.to_string()),
        _ => None,
    }
}

fn slot<'v>(current: &'v mut Value, step: Step<'_>) -> &'v mut Value {
    match step {
        Step::Key(key) => slot_for_key(current, key),
        Step::Index(index) => slot_for_index(current, index),
    }
}

fn slot_for_key<'v>(current: &'v mut Value, key: &str) -> &'v mut Value {
    if current.is_array()
        && let Ok(index) = key.parse::<usize>()
    {
        return slot_for_index(current, index);
    }

    if !current.is_object() {
        *current = Value::Object(Map::new());
    }
    &mut current[key]
}

fn slot_for_index(current: &mut Value, index: usize) -> &mut Value {
    if index > MAX_PADDED_INDEX {
        let map = match current.take() {
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, item)| (i.to_string(), item))
                .collect(),
            Value::Object(map) => map,
            _ => Map::new(),
        };
        *current = Value::Object(map);
    }

    match current {
        Value::Object(_) => return &mut current[index.to_string().as_str()],
        Value::Array(items) => {
            if items.len() <= index {
                items.resize(index + 1, Value::Null);
            }
        }
        _ => *current = Value::Array(vec![Value::Null; index + 1]),
    }
    &mut current[index]
}

/// Read the value at `path`, or `None` if any step is missing
///
/// A stored `null` is returned as `Some(&Value::Null)`.
pub fn get_nested<'v>(root: &'v Value, path: &str) -> Option<&'v Value> {
    PathExpression::parse(path).get(root)
}

/// Write `value` at `path` inside `root`, creating structure as needed
///
/// Takes the root exclusively, mutates it in place and hands the same
/// reference back so calls can be chained on one document.
pub fn set_nested<'a>(root: &'a mut Value, path: &str, value: Value) -> &'a mut Value {
    PathExpression::parse(path).set(root, value);
    root
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_segments() {
        let expr = PathExpression::parse("addresses[0].city");
        assert_eq!(
            expr.segments(),
            &[
                PathSegment {
                    key: "addresses".to_string(),
                    index: Some(0)
                },
                PathSegment {
                    key: "city".to_string(),
                    index: None
                },
            ]
        );
        assert_eq!(expr.to_string(), "addresses[0].city");
    }

    #[test]
    fn test_parse_non_bracket_segments_are_plain_keys() {
        for raw in ["[0]", "a[x]", "a[0][1]", "a[0]b", "a[-1]"] {
            let expr = PathExpression::parse(raw);
            assert_eq!(expr.segments()[0].key, raw);
            assert_eq!(expr.segments()[0].index, None);
        }
    }

    #[test]
    fn test_well_formed() {
        assert!(PathExpression::parse("a.b[2].c").is_well_formed());
        assert!(!PathExpression::parse("").is_well_formed());
        assert!(!PathExpression::parse("a..b").is_well_formed());
        assert!(!PathExpression::parse(".a").is_well_formed());
    }

    #[test]
    fn test_get_nested_basic() {
        let data = json!({"a": {"b": [{"c": 1}]}});
        assert_eq!(get_nested(&data, "a.b[0].c"), Some(&json!(1)));
        assert_eq!(get_nested(&data, "a.b[0]"), Some(&json!({"c": 1})));
        assert_eq!(get_nested(&data, "a.b[1].c"), None);
    }

    #[test]
    fn test_get_nested_missing() {
        assert_eq!(get_nested(&json!({}), "x.y"), None);
        assert_eq!(get_nested(&json!({"x": 5}), "x.y"), None);
        assert_eq!(get_nested(&json!({"x": {}}), "x[0]"), None);
    }

    #[test]
    fn test_get_nested_falsy_values_are_present() {
        let data = json!({"zero": 0, "empty": "", "no": false, "nothing": null});
        assert_eq!(get_nested(&data, "zero"), Some(&json!(0)));
        assert_eq!(get_nested(&data, "empty"), Some(&json!("")));
        assert_eq!(get_nested(&data, "no"), Some(&json!(false)));
        assert_eq!(get_nested(&data, "nothing"), Some(&Value::Null));
    }

    #[test]
    fn test_get_nested_numeric_key_on_array() {
        let data = json!({"items": ["a", "b"]});
        assert_eq!(get_nested(&data, "items.1"), Some(&json!("b")));
        assert_eq!(get_nested(&data, "items.x"), None);
    }

    #[test]
    fn test_get_nested_index_on_object() {
        let data = json!({"m": {"0": "zero"}});
        assert_eq!(get_nested(&data, "m[0]"), Some(&json!("zero")));
    }

    #[test]
    fn test_set_nested_vivifies() {
        let mut data = json!({});
        set_nested(&mut data, "a.b[0].c", json!(5));
        assert_eq!(data, json!({"a": {"b": [{"c": 5}]}}));
    }

    #[test]
    fn test_set_nested_returns_same_root() {
        let mut data = json!({});
        let returned: *const Value = set_nested(&mut data, "a", json!(1));
        assert!(std::ptr::eq(returned, &data));
    }

    #[test]
    fn test_set_nested_chained_calls_share_root() {
        let mut data = json!({});
        set_nested(&mut data, "user.name", json!("Ada"));
        set_nested(&mut data, "user.tags[1]", json!("x"));
        set_nested(&mut data, "user.tags[0]", json!("y"));
        assert_eq!(data, json!({"user": {"name": "Ada", "tags": ["y", "x"]}}));
    }

    #[test]
    fn test_set_nested_pads_arrays() {
        let mut data = json!({});
        set_nested(&mut data, "list[2]", json!(true));
        assert_eq!(data, json!({"list": [null, null, true]}));
    }

    #[test]
    fn test_set_nested_overwrites_existing() {
        let mut data = json!({"a": {"b": 1, "keep": 2}});
        set_nested(&mut data, "a.b", json!(10));
        assert_eq!(data, json!({"a": {"b": 10, "keep": 2}}));
    }

    #[test]
    fn test_set_nested_replaces_scalar_intermediate() {
        let mut data = json!({"a": 1});
        set_nested(&mut data, "a.b", json!(2));
        assert_eq!(data, json!({"a": {"b": 2}}));
    }

    #[test]
    fn test_set_nested_on_scalar_root() {
        let mut data = Value::Null;
        set_nested(&mut data, "a", json!(1));
        assert_eq!(data, json!({"a": 1}));
    }

    #[test]
    fn test_set_nested_numeric_key_into_existing_array() {
        let mut data = json!({"items": ["a", "b"]});
        set_nested(&mut data, "items.1", json!("B"));
        assert_eq!(data, json!({"items": ["a", "B"]}));
    }

    #[test]
    fn test_round_trip() {
        for path in ["a", "a.b", "a[0]", "a.b[3].c", "x.y.z[0].w[1]", "items.0"] {
            let mut data = json!({});
            set_nested(&mut data, path, json!({"marker": path}));
            assert_eq!(
                get_nested(&data, path),
                Some(&json!({"marker": path})),
                "path {path}"
            );
        }
    }
}
