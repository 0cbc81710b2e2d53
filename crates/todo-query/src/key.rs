//! Query keys.

use std::fmt;

/// Identifies a cached query as an ordered list of segments.
///
/// Invalidation matches by prefix, so `["todos"]` covers `["todos", "5"]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    /// Builds a key from its segments.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Returns the key's segments.
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Returns a new key with `segment` appended.
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    /// Returns true if `self` starts with every segment of `prefix`.
    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_matching() {
        let todos = QueryKey::new(["todos"]);
        let one = todos.child("5");

        assert!(one.starts_with(&todos));
        assert!(todos.starts_with(&todos));
        assert!(!todos.starts_with(&one));
        assert!(!QueryKey::new(["todo"]).starts_with(&todos));
    }

    #[test]
    fn test_empty_key_is_prefix_of_everything() {
        assert!(QueryKey::new(["a", "b"]).starts_with(&QueryKey::new(Vec::<String>::new())));
    }

    #[test]
    fn test_display() {
        assert_eq!(QueryKey::new(["todos", "5"]).to_string(), "[todos, 5]");
    }
}
