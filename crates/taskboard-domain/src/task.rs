use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{board::BoardId, status::StatusId, FieldUpdate};

pub type TaskId = Uuid;
pub type SubtaskId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    pub id: SubtaskId,
    pub task_id: TaskId,
    pub title: String,
    #[serde(default)]
    pub is_completed: bool,
}

impl Subtask {
    pub fn new(task_id: TaskId, title: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            task_id,
            title,
            is_completed: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub board_id: BoardId,
    pub status_id: StatusId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
    /// Index inside the task's column.
    #[serde(default)]
    pub position: i32,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

/// Partial update of a task. Changing `status_id` moves the task to the end
/// of the new column.
#[derive(Debug, Clone, Default)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: FieldUpdate<String>,
    pub status_id: Option<StatusId>,
}

impl Task {
    pub fn new(board_id: BoardId, status_id: StatusId, title: String, position: i32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            board_id,
            status_id,
            title,
            description: None,
            subtasks: Vec::new(),
            position,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn with_subtasks(mut self, titles: Vec<String>) -> Self {
        let task_id = self.id;
        self.subtasks = titles
            .into_iter()
            .map(|title| Subtask::new(task_id, title))
            .collect();
        self
    }

    pub fn update_title(&mut self, title: String) {
        self.title = title;
        self.updated_at = Utc::now();
    }

    pub fn update_description(&mut self, description: FieldUpdate<String>) {
        if description.is_change() {
            description.apply_to(&mut self.description);
            self.updated_at = Utc::now();
        }
    }

    pub fn move_to_status(&mut self, status_id: StatusId, position: i32) {
        self.status_id = status_id;
        self.position = position;
        self.updated_at = Utc::now();
    }

    pub fn subtask(&self, id: SubtaskId) -> Option<&Subtask> {
        self.subtasks.iter().find(|s| s.id == id)
    }

    pub fn subtask_mut(&mut self, id: SubtaskId) -> Option<&mut Subtask> {
        self.subtasks.iter_mut().find(|s| s.id == id)
    }

    pub fn push_subtask(&mut self, subtask: Subtask) {
        self.subtasks.push(subtask);
        self.updated_at = Utc::now();
    }

    pub fn remove_subtask(&mut self, id: SubtaskId) -> Option<Subtask> {
        let index = self.subtasks.iter().position(|s| s.id == id)?;
        self.updated_at = Utc::now();
        Some(self.subtasks.remove(index))
    }

    pub fn completed_subtasks(&self) -> usize {
        self.subtasks.iter().filter(|s| s.is_completed).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_task() -> Task {
        Task::new(Uuid::new_v4(), Uuid::new_v4(), "Write docs".to_string(), 0)
    }

    #[test]
    fn test_with_subtasks_binds_task_id() {
        let task = sample_task().with_subtasks(vec!["Outline".into(), "Draft".into()]);
        assert_eq!(task.subtasks.len(), 2);
        assert!(task.subtasks.iter().all(|s| s.task_id == task.id));
        assert!(task.subtasks.iter().all(|s| !s.is_completed));
    }

    #[test]
    fn test_completed_subtasks() {
        let mut task = sample_task().with_subtasks(vec!["A".into(), "B".into(), "C".into()]);
        let first = task.subtasks[0].id;
        task.subtask_mut(first).unwrap().is_completed = true;
        assert_eq!(task.completed_subtasks(), 1);
    }

    #[test]
    fn test_update_description() {
        let mut task = sample_task();
        task.update_description(FieldUpdate::Set("Details".to_string()));
        assert_eq!(task.description.as_deref(), Some("Details"));

        task.update_description(FieldUpdate::NoChange);
        assert_eq!(task.description.as_deref(), Some("Details"));

        task.update_description(FieldUpdate::Clear);
        assert_eq!(task.description, None);
    }

    #[test]
    fn test_remove_subtask() {
        let mut task = sample_task().with_subtasks(vec!["A".into(), "B".into()]);
        let a = task.subtasks[0].id;
        assert_eq!(task.remove_subtask(a).unwrap().title, "A");
        assert_eq!(task.subtasks.len(), 1);
        assert!(task.remove_subtask(a).is_none());
    }

    #[test]
    fn test_move_to_status() {
        let mut task = sample_task();
        let target = Uuid::new_v4();
        task.move_to_status(target, 3);
        assert_eq!(task.status_id, target);
        assert_eq!(task.position, 3);
    }
}
