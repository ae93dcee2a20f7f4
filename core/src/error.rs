//! Error types for the todo store.
//!
//! # Design
//! `NotFound` is the only failure a well-formed caller can hit. `DuplicateId`
//! reports a broken uniqueness invariant; the store refuses the update rather
//! than guessing which record was meant. `IdsExhausted` only occurs when a
//! store was built around an id at the top of the `u64` range.

use thiserror::Error;

use crate::types::TodoId;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors returned by `TodoStore` mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No todo carries the requested id.
    #[error("todo {0} not found")]
    NotFound(TodoId),

    /// More than one todo carries the requested id.
    #[error("todo id {id} is held by {count} records")]
    DuplicateId { id: TodoId, count: usize },

    /// The id counter has no values left to hand out.
    #[error("no todo ids left to assign")]
    IdsExhausted,
}
