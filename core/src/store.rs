//! The todo store.
//!
//! # Design
//! Records live in a `Vec` in insertion order. Ids come from a counter that
//! only moves forward, so an id is never handed out twice, even after the
//! record holding it is deleted.

use crate::error::{StoreError, StoreResult};
use crate::types::{seed_todos, NewTodo, Todo, TodoId, TodoPatch, UpdateOutcome};

/// Counter value a fresh store starts from. The counter is bumped before
/// use, so the first generated id is `INITIAL_COUNTER + 1`.
const INITIAL_COUNTER: TodoId = 1;

/// Ordered collection of todos keyed by store-assigned ids.
#[derive(Debug, Clone)]
pub struct TodoStore {
    todos: Vec<Todo>,
    last_id: TodoId,
}

impl Default for TodoStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoStore {
    /// An empty store.
    pub fn new() -> Self {
        Self {
            todos: Vec::new(),
            last_id: INITIAL_COUNTER,
        }
    }

    /// A store holding the two sample records present at process start.
    pub fn seeded() -> Self {
        Self::with_todos(seed_todos())
    }

    /// A store holding `todos` in the given order. The id counter is moved
    /// past the largest existing id so generated ids never collide. If that id
    /// is `TodoId::MAX`, every later `add` fails with `IdsExhausted`.
    pub fn with_todos(todos: Vec<Todo>) -> Self {
        let last_id = todos
            .iter()
            .map(|t| t.id)
            .max()
            .map_or(INITIAL_COUNTER, |max| max.max(INITIAL_COUNTER));
        Self { todos, last_id }
    }

    pub fn list(&self) -> &[Todo] {
        &self.todos
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    pub fn get(&self, id: TodoId) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }

    /// Append `candidate` under a freshly generated id and return that id.
    ///
    /// # Errors
    /// - `IdsExhausted` when the counter has reached `TodoId::MAX`. The store
    ///   is left untouched.
    pub fn add(&mut self, candidate: NewTodo) -> StoreResult<TodoId> {
        let id = self.next_id()?;
        self.todos.push(candidate.into_todo(id));
        Ok(id)
    }

    /// Merge `patch` over the todo with `id` and move it to the tail.
    ///
    /// # Errors
    /// - `NotFound` when no todo has `id`.
    /// - `DuplicateId` when several todos share `id`.
    ///
    /// The store is left untouched on error.
    pub fn update(&mut self, id: TodoId, patch: &TodoPatch) -> StoreResult<UpdateOutcome> {
        let mut matches = self.todos.iter().enumerate().filter(|(_, t)| t.id == id);
        let index = match (matches.next(), matches.next()) {
            (None, _) => return Err(StoreError::NotFound(id)),
            (Some((index, _)), None) => index,
            (Some(_), Some(_)) => {
                let count = self.todos.iter().filter(|t| t.id == id).count();
                return Err(StoreError::DuplicateId { id, count });
            }
        };

        let original = self.todos.remove(index);
        let updated = patch.apply(&original);
        self.todos.push(updated.clone());

        Ok(UpdateOutcome {
            updated_from: original,
            updated_to: updated,
        })
    }

    /// Remove every todo with `id` and return how many were removed.
    /// Deleting an unknown id is a no-op.
    pub fn delete(&mut self, id: TodoId) -> usize {
        let before = self.todos.len();
        self.todos.retain(|t| t.id != id);
        before - self.todos.len()
    }

    fn next_id(&mut self) -> StoreResult<TodoId> {
        self.last_id = self
            .last_id
            .checked_add(1)
            .ok_or(StoreError::IdsExhausted)?;
        Ok(self.last_id)
    }
}
