//! Context threaded through bootstrappers.
//!
//! The kernel never inspects the context beyond checking whether it is
//! empty. Bootstrappers are free to store whatever they need under their
//! own keys.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use simple_kernel_shared::errors::KernelResult;

/// Opaque key/value mapping passed from one bootstrap step to the next.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Context(Map<String, Value>);

impl Context {
    /// Create an empty context.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Parse a context from a JSON object.
    ///
    /// Anything other than a JSON object is rejected.
    pub fn from_json(json: &str) -> KernelResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builder-style insert.
    ///
    /// ```ignore
    /// let ctx = Context::new().with("env", "prod").with("workers", 4);
    /// ```
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a value, returning the previous one under the same key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Get a value and deserialize it into `T`.
    ///
    /// Returns `Ok(None)` when the key is missing.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> KernelResult<Option<T>> {
        match self.0.get(key) {
            Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
            None => Ok(None),
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Copy every entry of `other` into this context.
    ///
    /// Keys already present are overwritten by `other`.
    pub fn merge(&mut self, other: Context) -> &mut Self {
        for (key, value) in other.0 {
            self.0.insert(key, value);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Context {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Context {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl IntoIterator for Context {
    type Item = (String, Value);
    type IntoIter = serde_json::map::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_context_is_empty() {
        let ctx = Context::new();
        assert!(ctx.is_empty());
        assert_eq!(ctx.len(), 0);
        assert_eq!(ctx, Context::default());
    }

    #[test]
    fn test_merge_overwrites_existing_keys() {
        let mut ctx = Context::new().with("foo", 1).with("bar", true);
        ctx.merge(Context::new().with("foo", 2).with("baz", "x"));

        assert_eq!(ctx.get("foo"), Some(&json!(2)));
        assert_eq!(ctx.get("bar"), Some(&json!(true)));
        assert_eq!(ctx.get("baz"), Some(&json!("x")));
        assert_eq!(ctx.len(), 3);
    }

    #[test]
    fn test_get_as_deserializes_typed_value() {
        let ctx = Context::new().with("ports", json!([80, 443]));

        let ports: Option<Vec<u16>> = ctx.get_as("ports").unwrap();
        assert_eq!(ports, Some(vec![80, 443]));

        let missing: Option<u16> = ctx.get_as("missing").unwrap();
        assert_eq!(missing, None);
    }

    #[test]
    fn test_get_as_wrong_type_is_error() {
        let ctx = Context::new().with("ports", "not-a-list");
        assert!(ctx.get_as::<Vec<u16>>("ports").is_err());
    }

    #[test]
    fn test_from_json_requires_object() {
        let ctx = Context::from_json(r#"{"first": true}"#).unwrap();
        assert_eq!(ctx.get("first"), Some(&json!(true)));

        assert!(Context::from_json("[1, 2, 3]").is_err());
        assert!(Context::from_json(r#"{"first": "#).is_err());
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let ctx: Context = [("a", 1), ("b", 2)].into_iter().collect();
        let value = serde_json::to_value(&ctx).unwrap();
        assert_eq!(value, json!({"a": 1, "b": 2}));
    }

    #[test]
    fn test_remove_and_contains() {
        let mut ctx = Context::new().with("key", "value");
        assert!(ctx.contains_key("key"));
        assert_eq!(ctx.remove("key"), Some(json!("value")));
        assert!(!ctx.contains_key("key"));
        assert!(ctx.is_empty());
    }
}
