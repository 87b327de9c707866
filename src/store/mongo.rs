use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use log::info;
use mongodb::bson::{doc, DateTime as BsonDateTime};
use mongodb::options::{ClientOptions, ReturnDocument};
use mongodb::{Client, Collection, IndexModel};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::models::{Task, TaskPriority, TaskStatus, UserId};
use crate::store::TaskStore;

const TASKS_COLLECTION: &str = "tasks";

/// Shape of a task inside MongoDB. Timestamps are BSON dates so that
/// sorting on `created_at` is chronological.
#[derive(Debug, Serialize, Deserialize)]
struct TaskDocument {
    #[serde(rename = "_id")]
    task_id: String,
    title: String,
    #[serde(default)]
    description: String,
    status: TaskStatus,
    priority: TaskPriority,
    owner: UserId,
    created_at: BsonDateTime,
    updated_at: BsonDateTime,
}

impl From<&Task> for TaskDocument {
    fn from(task: &Task) -> Self {
        TaskDocument {
            task_id: task.task_id.clone(),
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status,
            priority: task.priority,
            owner: task.owner.clone(),
            created_at: to_bson_date(task.created_at),
            updated_at: to_bson_date(task.updated_at),
        }
    }
}

impl TryFrom<TaskDocument> for Task {
    type Error = StoreError;

    fn try_from(doc: TaskDocument) -> Result<Self, Self::Error> {
        let created_at = from_bson_date(&doc.task_id, doc.created_at)?;
        let updated_at = from_bson_date(&doc.task_id, doc.updated_at)?;
        Ok(Task {
            task_id: doc.task_id,
            title: doc.title,
            description: doc.description,
            status: doc.status,
            priority: doc.priority,
            owner: doc.owner,
            created_at,
            updated_at,
        })
    }
}

fn to_bson_date(at: DateTime<Utc>) -> BsonDateTime {
    BsonDateTime::from_millis(at.timestamp_millis())
}

fn from_bson_date(task_id: &str, at: BsonDateTime) -> Result<DateTime<Utc>, StoreError> {
    DateTime::from_timestamp_millis(at.timestamp_millis()).ok_or_else(|| StoreError::Corrupt {
        task_id: task_id.to_string(),
        reason: format!("timestamp {} out of range", at.timestamp_millis()),
    })
}

/// Task store backed by a MongoDB collection.
pub struct MongoTaskStore {
    tasks: Collection<TaskDocument>,
}

impl MongoTaskStore {
    /// Connects and makes sure the per-owner listing index exists.
    pub async fn connect(uri: &str, db_name: &str) -> Result<Self, StoreError> {
        let client_options = ClientOptions::parse(uri).await?;
        let client = Client::with_options(client_options)?;
        let tasks = client.database(db_name).collection::<TaskDocument>(TASKS_COLLECTION);

        let index = IndexModel::builder()
            .keys(doc! { "owner": 1, "created_at": -1 })
            .build();
        tasks.create_index(index).await?;
        info!("Connected to MongoDB database {}", db_name);

        Ok(MongoTaskStore { tasks })
    }
}

#[async_trait]
impl TaskStore for MongoTaskStore {
    async fn insert(&self, task: &Task) -> Result<(), StoreError> {
        self.tasks.insert_one(TaskDocument::from(task)).await?;
        Ok(())
    }

    async fn find_by_id(&self, task_id: &str) -> Result<Option<Task>, StoreError> {
        self.tasks
            .find_one(doc! { "_id": task_id })
            .await?
            .map(Task::try_from)
            .transpose()
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Task>, StoreError> {
        let docs: Vec<TaskDocument> = self
            .tasks
            .find(doc! { "owner": owner.as_str() })
            .sort(doc! { "created_at": -1 })
            .await?
            .try_collect()
            .await?;
        docs.into_iter().map(Task::try_from).collect()
    }

    async fn update(&self, task: &Task) -> Result<Option<Task>, StoreError> {
        let update = doc! {
            "$set": {
                "title": &task.title,
                "description": &task.description,
                "status": task.status.as_str(),
                "priority": task.priority.as_str(),
                "updated_at": to_bson_date(task.updated_at),
            }
        };
        self.tasks
            .find_one_and_update(doc! { "_id": &task.task_id }, update)
            .return_document(ReturnDocument::After)
            .await?
            .map(Task::try_from)
            .transpose()
    }

    async fn delete(&self, task_id: &str) -> Result<bool, StoreError> {
        let res = self.tasks.delete_one(doc! { "_id": task_id }).await?;
        Ok(res.deleted_count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskFields;
    use pretty_assertions::assert_eq;

    #[test]
    fn document_conversion_keeps_millisecond_timestamps() {
        let at = DateTime::from_timestamp_millis(1_700_000_000_123).unwrap();
        let task = Task::new(UserId::from("u1"), TaskFields::titled("t"), at);

        let back = Task::try_from(TaskDocument::from(&task)).unwrap();
        assert_eq!(back, task);
    }

    #[test]
    fn document_stores_enums_as_strings() {
        let task = Task::new(UserId::from("u1"), TaskFields::titled("t"), Utc::now());
        let bson = mongodb::bson::to_document(&TaskDocument::from(&task)).unwrap();
        assert_eq!(bson.get_str("status").unwrap(), "pending");
        assert_eq!(bson.get_str("priority").unwrap(), "medium");
        assert_eq!(bson.get_str("owner").unwrap(), "u1");
        assert!(bson.get_datetime("created_at").is_ok());
    }
}
