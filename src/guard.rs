//! Ownership check in front of every mutating task operation.

use crate::error::ApiError;
use crate::models::{Task, UserId};
use crate::store::TaskStore;

/// Kind of change the caller is attempting, used in the refusal message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Update,
    Delete,
}

impl Mutation {
    fn verb(self) -> &'static str {
        match self {
            Mutation::Update => "update",
            Mutation::Delete => "delete",
        }
    }
}

pub fn owns(task: &Task, caller: &UserId) -> bool {
    &task.owner == caller
}

/// Loads `task_id` and checks that `caller` owns it.
///
/// Existence is checked first: an unknown id is always `NotFound`, and
/// `Forbidden` is only returned for a task that exists.
pub async fn load_owned_task(
    store: &dyn TaskStore,
    task_id: &str,
    caller: &UserId,
    mutation: Mutation,
) -> Result<Task, ApiError> {
    let task = store.find_by_id(task_id).await?.ok_or(ApiError::NotFound)?;
    if !owns(&task, caller) {
        return Err(ApiError::Forbidden(mutation.verb()));
    }
    Ok(task)
}
