use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::models::{Task, UserId};
use crate::store::TaskStore;

/// Process-local store, kept in insertion order.
#[derive(Debug, Default)]
pub struct MemoryTaskStore {
    tasks: RwLock<Vec<Task>>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.tasks.read().await.len()
    }
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn insert(&self, task: &Task) -> Result<(), StoreError> {
        self.tasks.write().await.push(task.clone());
        Ok(())
    }

    async fn find_by_id(&self, task_id: &str) -> Result<Option<Task>, StoreError> {
        let tasks = self.tasks.read().await;
        Ok(tasks.iter().find(|t| t.task_id == task_id).cloned())
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Task>, StoreError> {
        let tasks = self.tasks.read().await;
        // newest insertion first, then a stable sort keeps that order on ties
        let mut owned: Vec<Task> = tasks.iter().rev().filter(|t| &t.owner == owner).cloned().collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    async fn update(&self, task: &Task) -> Result<Option<Task>, StoreError> {
        let mut tasks = self.tasks.write().await;
        let Some(stored) = tasks.iter_mut().find(|t| t.task_id == task.task_id) else {
            return Ok(None);
        };
        stored.title = task.title.clone();
        stored.description = task.description.clone();
        stored.status = task.status;
        stored.priority = task.priority;
        stored.updated_at = task.updated_at;
        Ok(Some(stored.clone()))
    }

    async fn delete(&self, task_id: &str) -> Result<bool, StoreError> {
        let mut tasks = self.tasks.write().await;
        let before = tasks.len();
        tasks.retain(|t| t.task_id != task_id);
        Ok(tasks.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TaskFields, TaskStatus};
    use chrono::{Duration, Utc};
    use pretty_assertions::assert_eq;

    fn task(owner: &str, title: &str, age_secs: i64) -> Task {
        Task::new(
            UserId::from(owner),
            TaskFields::titled(title),
            Utc::now() - Duration::seconds(age_secs),
        )
    }

    #[tokio::test]
    async fn list_is_scoped_and_newest_first() {
        let store = MemoryTaskStore::new();
        store.insert(&task("alice", "old", 60)).await.unwrap();
        store.insert(&task("bob", "other", 30)).await.unwrap();
        store.insert(&task("alice", "new", 0)).await.unwrap();

        let titles: Vec<String> = store
            .list_by_owner(&UserId::from("alice"))
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, vec!["new", "old"]);
    }

    #[tokio::test]
    async fn equal_timestamps_list_latest_insert_first() {
        let store = MemoryTaskStore::new();
        let now = Utc::now();
        for title in ["first", "second"] {
            let t = Task::new(UserId::from("alice"), TaskFields::titled(title), now);
            store.insert(&t).await.unwrap();
        }
        let listed = store.list_by_owner(&UserId::from("alice")).await.unwrap();
        assert_eq!(listed[0].title, "second");
    }

    #[tokio::test]
    async fn update_leaves_owner_and_creation_alone() {
        let store = MemoryTaskStore::new();
        let original = task("alice", "a", 10);
        store.insert(&original).await.unwrap();

        let mut changed = original.clone();
        changed.owner = UserId::from("mallory");
        changed.status = TaskStatus::Completed;
        changed.created_at = Utc::now();
        let stored = store.update(&changed).await.unwrap().unwrap();

        assert_eq!(stored.owner, UserId::from("alice"));
        assert_eq!(stored.created_at, original.created_at);
        assert_eq!(stored.status, TaskStatus::Completed);
    }

    #[tokio::test]
    async fn missing_documents() {
        let store = MemoryTaskStore::new();
        let ghost = task("alice", "ghost", 0);
        assert_eq!(store.find_by_id(&ghost.task_id).await.unwrap(), None);
        assert_eq!(store.update(&ghost).await.unwrap(), None);
        assert!(!store.delete(&ghost.task_id).await.unwrap());
    }

    #[tokio::test]
    async fn delete_removes_only_the_target() {
        let store = MemoryTaskStore::new();
        let keep = task("alice", "keep", 0);
        let drop = task("alice", "drop", 0);
        store.insert(&keep).await.unwrap();
        store.insert(&drop).await.unwrap();

        assert!(store.delete(&drop.task_id).await.unwrap());
        assert_eq!(store.len().await, 1);
        assert!(store.find_by_id(&keep.task_id).await.unwrap().is_some());
    }
}
