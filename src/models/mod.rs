pub mod task;
pub mod user;

pub use task::{Task, TaskFields, TaskPayload, TaskPriority, TaskStatus};
pub use user::UserId;
