// Typed navigation over Yahoo's JSON payloads.
//
// Yahoo's JSON is a mechanical translation of its XML: collections are
// objects keyed "0".."n-1" plus a "count", and resource metadata is an array
// of single-key objects (with stray empty arrays mixed in). `Node` walks
// these shapes explicitly and reports the JSON path of the first mismatch.

pub mod v2;

use serde_json::Value;

use crate::error::ApiError;

/// API version the parsers in `v2` are written against.
pub const SCHEMA_VERSION: &str = "fantasy/v2";

/// A position inside a payload, with its JSON path for error reporting.
#[derive(Debug, Clone)]
pub struct Node<'a> {
    value: &'a Value,
    payload: &'static str,
    path: String,
}

impl<'a> Node<'a> {
    pub fn root(value: &'a Value, payload: &'static str) -> Self {
        Node {
            value,
            payload,
            path: "$".to_string(),
        }
    }

    pub fn value(&self) -> &'a Value {
        self.value
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn shape_error(&self, expected: &'static str) -> ApiError {
        ApiError::UnexpectedShape {
            payload: self.payload,
            path: self.path.clone(),
            expected,
        }
    }

    /// Shape error for a child segment that is absent.
    pub fn shape_error_at(&self, segment: &str, expected: &'static str) -> ApiError {
        ApiError::UnexpectedShape {
            payload: self.payload,
            path: format!("{}{}", self.path, segment),
            expected,
        }
    }

    fn child(&self, value: &'a Value, segment: String) -> Node<'a> {
        Node {
            value,
            payload: self.payload,
            path: format!("{}{}", self.path, segment),
        }
    }

    /// Required object member.
    pub fn key(&self, key: &str) -> Result<Node<'a>, ApiError> {
        self.opt_key(key)
            .ok_or_else(|| self.shape_error_at(&format!(".{key}"), "a value"))
    }

    /// Optional object member. Explicit nulls count as missing.
    pub fn opt_key(&self, key: &str) -> Option<Node<'a>> {
        match self.value.as_object()?.get(key)? {
            Value::Null => None,
            v => Some(self.child(v, format!(".{key}"))),
        }
    }

    /// Required array element.
    pub fn index(&self, i: usize) -> Result<Node<'a>, ApiError> {
        let arr = self.value.as_array().ok_or_else(|| self.shape_error("an array"))?;
        arr.get(i)
            .map(|v| self.child(v, format!("[{i}]")))
            .ok_or_else(|| self.shape_error_at(&format!("[{i}]"), "an array element"))
    }

    pub fn as_str(&self) -> Result<&'a str, ApiError> {
        self.value.as_str().ok_or_else(|| self.shape_error("a string"))
    }

    /// Yahoo mixes numbers and numeric strings for the same field.
    pub fn as_u32(&self) -> Result<u32, ApiError> {
        match self.value {
            Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
        .ok_or_else(|| self.shape_error("an unsigned integer"))
    }

    pub fn as_f64(&self) -> Result<f64, ApiError> {
        match self.value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
        .ok_or_else(|| self.shape_error("a number"))
    }

    /// Accepts true/false, 1/0 and "1"/"0".
    pub fn as_bool(&self) -> Result<bool, ApiError> {
        match self.value {
            Value::Bool(b) => Some(*b),
            Value::Number(n) => n.as_u64().map(|n| n != 0),
            Value::String(s) => match s.trim() {
                "1" | "true" => Some(true),
                "0" | "false" | "" => Some(false),
                _ => None,
            },
            _ => None,
        }
        .ok_or_else(|| self.shape_error("a boolean"))
    }

    /// Members "0".."count-1" of a Yahoo collection object.
    ///
    /// An empty array stands in for an empty collection.
    pub fn collection(&self) -> Result<Vec<Node<'a>>, ApiError> {
        if let Some(arr) = self.value.as_array() {
            if arr.is_empty() {
                return Ok(Vec::new());
            }
            return Err(self.shape_error("a counted collection"));
        }
        let count = self.key("count")?.as_u32()? as usize;
        (0..count).map(|i| self.key(&i.to_string())).collect()
    }

    /// Look up `key` in a metadata list (array of single-key objects).
    pub fn meta(&self, key: &str) -> Option<Node<'a>> {
        let arr = self.value.as_array()?;
        arr.iter().enumerate().find_map(|(i, item)| match item.as_object()?.get(key)? {
            Value::Null => None,
            v => Some(self.child(v, format!("[{i}].{key}"))),
        })
    }

    pub fn require_meta(&self, key: &str) -> Result<Node<'a>, ApiError> {
        if self.value.as_array().is_none() {
            return Err(self.shape_error("a metadata list"));
        }
        self.meta(key)
            .ok_or_else(|| self.shape_error_at(&format!("[*].{key}"), "a metadata entry"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn key_errors_carry_path() {
        let v = json!({"fantasy_content": {"league": []}});
        let root = Node::root(&v, "league");
        let err = root
            .key("fantasy_content")
            .and_then(|n| n.key("league"))
            .and_then(|n| n.index(1))
            .unwrap_err();
        match err {
            ApiError::UnexpectedShape { payload, path, .. } => {
                assert_eq!(payload, "league");
                assert_eq!(path, "$.fantasy_content.league[1]");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn lenient_scalars() {
        let v = json!({"a": "7", "b": 7, "c": "12.5", "d": 3.25, "e": "1", "f": 0, "g": "x"});
        let root = Node::root(&v, "test");
        assert_eq!(root.key("a").unwrap().as_u32().unwrap(), 7);
        assert_eq!(root.key("b").unwrap().as_u32().unwrap(), 7);
        assert_eq!(root.key("c").unwrap().as_f64().unwrap(), 12.5);
        assert_eq!(root.key("d").unwrap().as_f64().unwrap(), 3.25);
        assert!(root.key("e").unwrap().as_bool().unwrap());
        assert!(!root.key("f").unwrap().as_bool().unwrap());
        assert!(root.key("g").unwrap().as_u32().is_err());
    }

    #[test]
    fn null_counts_as_missing() {
        let v = json!({"a": null});
        assert!(Node::root(&v, "test").opt_key("a").is_none());
    }

    #[test]
    fn collection_reads_counted_members() {
        let v = json!({"0": {"x": 1}, "1": {"x": 2}, "count": 2});
        let items = Node::root(&v, "test").collection().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].key("x").unwrap().as_u32().unwrap(), 2);
        assert_eq!(items[1].path(), "$.1");
    }

    #[test]
    fn collection_missing_member_fails() {
        let v = json!({"0": {}, "count": 2});
        assert!(Node::root(&v, "test").collection().is_err());
    }

    #[test]
    fn empty_array_is_empty_collection() {
        let v = json!([]);
        assert!(Node::root(&v, "test").collection().unwrap().is_empty());
    }

    #[test]
    fn meta_skips_empty_entries() {
        let v = json!([{"team_key": "461.l.1.t.1"}, [], {"name": "Sharks"}]);
        let root = Node::root(&v, "team");
        assert_eq!(root.meta("name").unwrap().as_str().unwrap(), "Sharks");
        assert_eq!(root.meta("name").unwrap().path(), "$[2].name");
        assert!(root.meta("missing").is_none());
        assert!(root.require_meta("missing").is_err());
    }
}
