//! Result metadata: open-ended key/value annotations.
//!
//! Values are arbitrary JSON (nested maps, sequences, scalars). Equality is
//! structural, which is what assertion layers compare with.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Annotation map carried by a result.
///
/// Merging is additive and shallow: later values win per key, and merging
/// an empty map is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(Map<String, Value>);

impl Metadata {
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    /// Additive merge: every entry of `other` lands here, replacing any
    /// existing entry under the same key.
    pub fn merge(&mut self, other: Metadata) {
        for (key, value) in other.0 {
            self.0.insert(key, value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl FromIterator<(String, Value)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn metadata(entries: &[(&str, Value)]) -> Metadata {
        entries
            .iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn merge_is_last_write_wins_per_key() {
        let mut base = metadata(&[("a", json!(1))]);
        base.merge(metadata(&[("a", json!(2)), ("b", json!(3))]));

        assert_eq!(base, metadata(&[("a", json!(2)), ("b", json!(3))]));
    }

    #[test]
    fn merge_of_empty_is_noop() {
        let mut base = metadata(&[("a", json!(1))]);
        base.merge(Metadata::new());

        assert_eq!(base, metadata(&[("a", json!(1))]));
    }

    #[test]
    fn merge_order_is_indifferent_for_disjoint_keys() {
        let mut forward = Metadata::new();
        forward.merge(metadata(&[("a", json!(1))]));
        forward.merge(metadata(&[("b", json!(2))]));

        let mut backward = Metadata::new();
        backward.merge(metadata(&[("b", json!(2))]));
        backward.merge(metadata(&[("a", json!(1))]));

        assert_eq!(forward, backward);
    }

    #[test]
    fn equality_is_structural_over_nested_values() {
        let a = metadata(&[("nested", json!({"list": [1, 2, {"deep": true}]}))]);
        let b = metadata(&[("nested", json!({"list": [1, 2, {"deep": true}]}))]);

        assert_eq!(a, b);
    }
}
