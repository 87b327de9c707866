use std::sync::Arc;

use chrono::Utc;
use log::{debug, info};

use crate::dashboard::TaskStats;
use crate::error::ApiError;
use crate::guard::{load_owned_task, Mutation};
use crate::models::{Task, TaskFields, UserId};
use crate::store::TaskStore;

/// Task operations on behalf of an authenticated user.
///
/// Input arrives already validated as [`TaskFields`]. Every read and write
/// is scoped to the caller.
#[derive(Clone)]
pub struct TaskService {
    store: Arc<dyn TaskStore>,
}

impl TaskService {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        TaskService { store }
    }

    pub async fn list(&self, owner: &UserId) -> Result<Vec<Task>, ApiError> {
        Ok(self.store.list_by_owner(owner).await?)
    }

    pub async fn create(&self, owner: &UserId, fields: TaskFields) -> Result<Task, ApiError> {
        let task = Task::new(owner.clone(), fields, Utc::now());
        self.store.insert(&task).await?;
        info!("Task created: {} for user {}", task.task_id, owner);
        Ok(task)
    }

    pub async fn update(
        &self,
        task_id: &str,
        owner: &UserId,
        fields: TaskFields,
    ) -> Result<Task, ApiError> {
        let mut task = load_owned_task(self.store.as_ref(), task_id, owner, Mutation::Update).await?;
        task.apply(fields, Utc::now());
        // a concurrent delete between the guard and the write leaves nothing to update
        let updated = self.store.update(&task).await?.ok_or(ApiError::NotFound)?;
        debug!("Task updated: {}", task_id);
        Ok(updated)
    }

    pub async fn delete(&self, task_id: &str, owner: &UserId) -> Result<(), ApiError> {
        load_owned_task(self.store.as_ref(), task_id, owner, Mutation::Delete).await?;
        if !self.store.delete(task_id).await? {
            return Err(ApiError::NotFound);
        }
        info!("Task deleted: {}", task_id);
        Ok(())
    }

    pub async fn stats(&self, owner: &UserId) -> Result<TaskStats, ApiError> {
        let tasks = self.store.list_by_owner(owner).await?;
        Ok(TaskStats::from_tasks(&tasks))
    }
}
