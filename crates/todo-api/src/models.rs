//! Data models for the todo API.
//!
//! The server owns the todo schema. [`Todo`] therefore wraps the raw JSON
//! value and only offers read-only accessors for the fields pages commonly
//! display; the value itself is sent and returned untouched.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A server-managed todo record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Todo(Value);

impl Todo {
    /// Wraps an arbitrary JSON value.
    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    /// Creates a todo payload with only a title, the shape the create form sends.
    pub fn with_title(title: impl Into<String>) -> Self {
        let mut map = Map::new();
        map.insert("title".to_string(), Value::String(title.into()));
        Self(Value::Object(map))
    }

    /// Returns the underlying JSON value.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consumes the todo, returning the underlying JSON value.
    pub fn into_value(self) -> Value {
        self.0
    }

    /// Returns a field of the record, if the record is an object.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Returns the server-assigned identifier, if present.
    pub fn id(&self) -> Option<TodoId> {
        match self.0.get("id")? {
            Value::Number(n) => Some(
                n.as_i64()
                    .map(TodoId::Int)
                    .unwrap_or_else(|| TodoId::Str(n.to_string())),
            ),
            Value::String(s) => Some(TodoId::Str(s.clone())),
            _ => None,
        }
    }

    /// Returns the `title` field when it is a string.
    pub fn title(&self) -> Option<&str> {
        self.0.get("title").and_then(Value::as_str)
    }

    /// Returns whether the todo is marked done.
    ///
    /// Servers in the wild use either `completed` or `done`; a missing or
    /// non-boolean flag counts as not done.
    pub fn is_completed(&self) -> bool {
        ["completed", "done"]
            .iter()
            .find_map(|key| self.0.get(*key).and_then(Value::as_bool))
            .unwrap_or(false)
    }
}

impl From<Value> for Todo {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl From<Todo> for Value {
    fn from(todo: Todo) -> Self {
        todo.0
    }
}

/// Identifier used to address a single todo in `/todos/{id}`.
///
/// Rendered verbatim into the request path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TodoId {
    Int(i64),
    Str(String),
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TodoId::Int(n) => write!(f, "{}", n),
            TodoId::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for TodoId {
    fn from(n: i64) -> Self {
        TodoId::Int(n)
    }
}

impl From<&str> for TodoId {
    fn from(s: &str) -> Self {
        TodoId::Str(s.to_string())
    }
}

impl From<String> for TodoId {
    fn from(s: String) -> Self {
        TodoId::Str(s)
    }
}

impl std::str::FromStr for TodoId {
    type Err = std::convert::Infallible;

    /// Parses canonical integers as [`TodoId::Int`], anything else as a string id.
    ///
    /// Input such as `0123` or `+5` stays a string so it reaches the path unchanged.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<i64>()
            .ok()
            .filter(|n| n.to_string() == s)
            .map_or_else(|| TodoId::Str(s.to_string()), TodoId::Int))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_todo_deserialize_preserves_unknown_fields() {
        let raw = json!({"id": 1, "title": "a", "priority": 3, "tags": ["x"]});
        let todo: Todo = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(serde_json::to_value(&todo).unwrap(), raw);
    }

    #[test]
    fn test_todo_id_numeric() {
        let todo = Todo::from(json!({"id": 5, "title": "a"}));
        assert_eq!(todo.id(), Some(TodoId::Int(5)));
    }

    #[test]
    fn test_todo_id_string() {
        let todo = Todo::from(json!({"id": "abc", "title": "a"}));
        assert_eq!(todo.id(), Some(TodoId::Str("abc".to_string())));
    }

    #[test]
    fn test_todo_without_id() {
        let todo = Todo::with_title("a");
        assert_eq!(todo.id(), None);
        assert_eq!(todo.title(), Some("a"));
    }

    #[test]
    fn test_todo_non_object_has_no_fields() {
        let todo = Todo::from(json!("just a string"));
        assert_eq!(todo.id(), None);
        assert_eq!(todo.title(), None);
        assert!(!todo.is_completed());
    }

    #[test]
    fn test_is_completed_reads_completed_or_done() {
        assert!(Todo::from(json!({"completed": true})).is_completed());
        assert!(Todo::from(json!({"done": true})).is_completed());
        assert!(!Todo::from(json!({"done": false})).is_completed());
        assert!(!Todo::from(json!({"done": "yes"})).is_completed());
    }

    #[test]
    fn test_todo_id_display() {
        assert_eq!(TodoId::Int(5).to_string(), "5");
        assert_eq!(TodoId::from("a-b").to_string(), "a-b");
    }

    #[test]
    fn test_todo_id_from_str() {
        assert_eq!("42".parse::<TodoId>().unwrap(), TodoId::Int(42));
        assert_eq!(
            "6f1c".parse::<TodoId>().unwrap(),
            TodoId::Str("6f1c".to_string())
        );
    }

    #[test]
    fn test_todo_id_from_str_keeps_non_canonical_numbers() {
        assert_eq!("-7".parse::<TodoId>().unwrap(), TodoId::Int(-7));
        assert_eq!(
            "0123".parse::<TodoId>().unwrap(),
            TodoId::Str("0123".to_string())
        );
        assert_eq!("+5".parse::<TodoId>().unwrap().to_string(), "+5");
        assert_eq!(
            "99999999999999999999".parse::<TodoId>().unwrap(),
            TodoId::Str("99999999999999999999".to_string())
        );
    }

    #[test]
    fn test_todo_id_outside_i64_falls_back_to_string() {
        let big = Todo::from(json!({"id": u64::MAX}));
        assert_eq!(big.id(), Some(TodoId::Str(u64::MAX.to_string())));

        let float = Todo::from(json!({"id": 1.5}));
        assert_eq!(float.id(), Some(TodoId::Str("1.5".to_string())));
    }

    #[test]
    fn test_todo_id_untagged_serde() {
        let ids: Vec<TodoId> = serde_json::from_value(json!([1, "x"])).unwrap();
        assert_eq!(ids, vec![TodoId::Int(1), TodoId::Str("x".to_string())]);
    }
}
