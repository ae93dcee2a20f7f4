//! Domain types for the todo store.
//!
//! # Design
//! `label` and `done` are `Nullable` on every type. A client that omits them
//! gets a record with the field absent rather than a defaulted value, and
//! absent fields are left out of the JSON again on the way back. An explicit
//! `null` is kept as `null`, so a patch can clear a field. Fields the store
//! does not know about are carried in `extra` and echoed verbatim.
//!
//! The `id` is owned by the store. Any `id` a client sends in a create or
//! patch body is dropped before it can reach a stored record.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Store-assigned identifier of a todo.
pub type TodoId = u64;

/// A JSON field that may be absent (`None`), `null` (`Some(None)`) or set.
pub type Nullable<T> = Option<Option<T>>;

/// Map a present key to `Some`, including an explicit `null`. Absent keys
/// fall back to `#[serde(default)]`.
fn present<'de, T, D>(deserializer: D) -> Result<Nullable<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

const ID_KEY: &str = "id";

/// A single todo record as held by the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Todo {
    pub id: TodoId,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub label: Nullable<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub done: Nullable<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Todo {
    pub fn new(id: TodoId, label: impl Into<String>, done: bool) -> Self {
        Self {
            id,
            label: Some(Some(label.into())),
            done: Some(Some(done)),
            extra: Map::new(),
        }
    }

    /// The label, if present and not `null`.
    pub fn label(&self) -> Option<&str> {
        self.label.as_ref().and_then(|l| l.as_deref())
    }

    /// The done flag, if present and not `null`.
    pub fn done(&self) -> Option<bool> {
        self.done.flatten()
    }
}

/// Request payload for adding a todo. The store assigns the id.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewTodo {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub label: Nullable<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub done: Nullable<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NewTodo {
    pub fn new(label: impl Into<String>, done: bool) -> Self {
        Self {
            label: Some(Some(label.into())),
            done: Some(Some(done)),
            extra: Map::new(),
        }
    }

    /// Turn the candidate into a stored record under `id`.
    pub fn into_todo(self, id: TodoId) -> Todo {
        let mut extra = self.extra;
        extra.remove(ID_KEY);
        Todo {
            id,
            label: self.label,
            done: self.done,
            extra,
        }
    }
}

/// Partial update for an existing todo. Only the fields present in the JSON
/// are applied; omitted fields keep their current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TodoPatch {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub label: Nullable<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub done: Nullable<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TodoPatch {
    pub fn label(label: impl Into<String>) -> Self {
        Self {
            label: Some(Some(label.into())),
            ..Self::default()
        }
    }

    pub fn done(done: bool) -> Self {
        Self {
            done: Some(Some(done)),
            ..Self::default()
        }
    }

    /// Merge this patch over `original`, returning the new record.
    pub fn apply(&self, original: &Todo) -> Todo {
        let mut merged = original.clone();
        if let Some(label) = &self.label {
            merged.label = Some(label.clone());
        }
        if let Some(done) = self.done {
            merged.done = Some(done);
        }
        for (key, value) in &self.extra {
            if key != ID_KEY {
                merged.extra.insert(key.clone(), value.clone());
            }
        }
        merged
    }
}

/// Snapshots taken around a successful update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpdateOutcome {
    pub updated_from: Todo,
    pub updated_to: Todo,
}

/// The records every fresh store starts with.
pub fn seed_todos() -> Vec<Todo> {
    vec![
        Todo::new(0, "Sample Todo 1", true),
        Todo::new(1, "Sample Todo 2", true),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn todo_serializes_to_flat_json() {
        let mut todo = Todo::new(3, "Buy milk", false);
        todo.extra.insert("priority".to_string(), json!(2));
        let value = serde_json::to_value(&todo).unwrap();
        assert_eq!(
            value,
            json!({"id": 3, "label": "Buy milk", "done": false, "priority": 2})
        );
    }

    #[test]
    fn absent_fields_are_not_serialized() {
        let todo = NewTodo::default().into_todo(7);
        let value = serde_json::to_value(&todo).unwrap();
        assert_eq!(value, json!({"id": 7}));
    }

    #[test]
    fn new_todo_drops_client_supplied_id() {
        let input: NewTodo =
            serde_json::from_str(r#"{"label":"x","done":true,"id":99,"tag":"home"}"#).unwrap();
        let todo = input.into_todo(4);
        assert_eq!(todo.id, 4);
        assert!(!todo.extra.contains_key("id"));
        assert_eq!(todo.extra["tag"], "home");
    }

    #[test]
    fn new_todo_accepts_missing_fields() {
        let input: NewTodo = serde_json::from_str(r#"{}"#).unwrap();
        assert!(input.label.is_none());
        assert!(input.done.is_none());
    }

    #[test]
    fn patch_keeps_fields_it_does_not_mention() {
        let original = Todo::new(1, "Walk dog", false);
        let merged = TodoPatch::done(true).apply(&original);
        assert_eq!(merged.label(), Some("Walk dog"));
        assert_eq!(merged.done(), Some(true));
        assert_eq!(merged.id, 1);
    }

    #[test]
    fn patch_cannot_change_id() {
        let original = Todo::new(1, "Walk dog", false);
        let patch: TodoPatch = serde_json::from_str(r#"{"id":42,"label":"Walk cat"}"#).unwrap();
        let merged = patch.apply(&original);
        assert_eq!(merged.id, 1);
        assert_eq!(merged.label(), Some("Walk cat"));
        assert!(merged.extra.is_empty());
    }

    #[test]
    fn null_is_distinct_from_absent() {
        let patch: TodoPatch = serde_json::from_str(r#"{"label":null}"#).unwrap();
        assert_eq!(patch.label, Some(None));
        assert_eq!(patch.done, None);

        let input: NewTodo = serde_json::from_str(r#"{"label":null,"done":false}"#).unwrap();
        let value = serde_json::to_value(input.into_todo(2)).unwrap();
        assert_eq!(value, json!({"id": 2, "label": null, "done": false}));
    }

    #[test]
    fn null_patch_clears_field() {
        let original = Todo::new(1, "Walk dog", false);
        let patch: TodoPatch = serde_json::from_str(r#"{"label":null}"#).unwrap();
        let merged = patch.apply(&original);
        assert_eq!(merged.label, Some(None));
        assert_eq!(merged.label(), None);
        assert_eq!(merged.done(), Some(false));
        let value = serde_json::to_value(&merged).unwrap();
        assert_eq!(value, json!({"id": 1, "label": null, "done": false}));
    }

    #[test]
    fn patch_overrides_extra_fields() {
        let mut original = Todo::new(1, "Walk dog", false);
        original.extra.insert("tag".to_string(), json!("home"));
        original.extra.insert("note".to_string(), json!("leash"));
        let patch: TodoPatch = serde_json::from_str(r#"{"tag":"park"}"#).unwrap();
        let merged = patch.apply(&original);
        assert_eq!(merged.extra["tag"], "park");
        assert_eq!(merged.extra["note"], "leash");
    }

    #[test]
    fn seed_records_match_startup_state() {
        let seeds = seed_todos();
        assert_eq!(seeds.len(), 2);
        assert_eq!(seeds[0].id, 0);
        assert_eq!(seeds[1].label(), Some("Sample Todo 2"));
        assert!(seeds.iter().all(|t| t.done() == Some(true)));
    }
}
