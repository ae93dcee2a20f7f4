//! In-memory todo store.
//!
//! # Overview
//! Holds an ordered list of todos and the counter that hands out their ids.
//! The store does no I/O and owns no locks; callers that share it across
//! threads wrap it themselves.
//!
//! # Design
//! - `TodoStore` is a plain owned value with `&mut self` mutations.
//! - Updates rebuild the sequence: the merged record moves to the tail and
//!   untouched records keep their relative order.
//! - Partial updates are an explicit `TodoPatch` merged field by field.

pub mod error;
pub mod store;
pub mod types;

pub use error::{StoreError, StoreResult};
pub use store::TodoStore;
pub use types::{seed_todos, NewTodo, Todo, TodoId, TodoPatch, UpdateOutcome};
