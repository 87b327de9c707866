//! Client-side view of a user's task list.
//!
//! A front end holds one [`TaskList`] value and replaces it with the result
//! of [`TaskList::apply`] after each successful call to the task endpoints.
//! Nothing here is shared or mutated in place.

use crate::dashboard::TaskStats;
use crate::models::Task;

#[derive(Debug, Clone, PartialEq)]
pub enum TaskAction {
    /// Response of `GET /api/tasks`.
    Loaded(Vec<Task>),
    Created(Task),
    Updated(Task),
    Deleted(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    #[must_use]
    pub fn apply(&self, action: TaskAction) -> TaskList {
        let tasks = match action {
            TaskAction::Loaded(tasks) => tasks,
            // listing is newest first, so a new task goes on top
            TaskAction::Created(task) => std::iter::once(task)
                .chain(self.tasks.iter().cloned())
                .collect(),
            TaskAction::Updated(task) => self
                .tasks
                .iter()
                .map(|t| if t.task_id == task.task_id { task.clone() } else { t.clone() })
                .collect(),
            TaskAction::Deleted(task_id) => self
                .tasks
                .iter()
                .filter(|t| t.task_id != task_id)
                .cloned()
                .collect(),
        };
        TaskList { tasks }
    }

    pub fn stats(&self) -> TaskStats {
        TaskStats::from_tasks(&self.tasks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TaskFields, TaskStatus, UserId};
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn task(title: &str) -> Task {
        Task::new(UserId::from("u"), TaskFields::titled(title), Utc::now())
    }

    #[test]
    fn actions_produce_new_lists() {
        let first = task("first");
        let empty = TaskList::default();
        let loaded = empty.apply(TaskAction::Loaded(vec![first.clone()]));
        let second = task("second");
        let grown = loaded.apply(TaskAction::Created(second.clone()));

        assert!(empty.tasks().is_empty());
        assert_eq!(loaded.tasks(), &[first.clone()]);
        assert_eq!(grown.tasks(), &[second, first]);
    }

    #[test]
    fn update_and_delete_touch_only_their_task() {
        let (a, b) = (task("a"), task("b"));
        let list = TaskList::default().apply(TaskAction::Loaded(vec![a.clone(), b.clone()]));

        let mut done = a.clone();
        done.status = TaskStatus::Completed;
        let list = list.apply(TaskAction::Updated(done.clone()));
        assert_eq!(list.tasks(), &[done.clone(), b.clone()]);
        assert_eq!(list.stats().completed, 1);

        let list = list.apply(TaskAction::Deleted(b.task_id.clone()));
        assert_eq!(list.tasks(), &[done]);
        assert_eq!(list.stats().total, 1);
    }
}
