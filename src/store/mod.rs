//! Persistence of task documents.

mod memory;
mod mongo;

pub use memory::MemoryTaskStore;
pub use mongo::MongoTaskStore;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::{Task, UserId};

/// A collection of task documents addressed by id.
///
/// Each method is a single read or a single write against one document,
/// except `list_by_owner` which reads many.
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn insert(&self, task: &Task) -> Result<(), StoreError>;

    async fn find_by_id(&self, task_id: &str) -> Result<Option<Task>, StoreError>;

    /// Tasks owned by `owner`, newest first.
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Task>, StoreError>;

    /// Writes the mutable fields of `task` over the stored document and
    /// returns the stored result, or `None` if the document is gone.
    async fn update(&self, task: &Task) -> Result<Option<Task>, StoreError>;

    /// Returns whether a document was removed.
    async fn delete(&self, task_id: &str) -> Result<bool, StoreError>;
}
