use crate::{Board, BoardId, Task, TaskId};
use taskboard_core::{TaskboardError, TaskboardResult};

pub mod board_commands;
pub mod settings_commands;
pub mod status_commands;
pub mod subtask_commands;
pub mod task_commands;

pub use board_commands::*;
pub use settings_commands::*;
pub use status_commands::*;
pub use subtask_commands::*;
pub use task_commands::*;

/// Trait for domain commands that mutate state
/// Commands represent intent and are executed by the store
pub trait Command: Send + Sync {
    /// Execute this command, mutating the domain state
    fn execute(&self, context: &mut CommandContext) -> TaskboardResult<()>;

    /// Human-readable description of what this command does
    fn description(&self) -> String;
}

/// Mutable view over the store's state handed to a command
pub struct CommandContext<'a> {
    pub boards: &'a mut Vec<Board>,
    pub tasks: &'a mut Vec<Task>,
    pub is_dark_theme_active: &'a mut bool,
    pub active_board_id: &'a mut Option<BoardId>,
}

impl CommandContext<'_> {
    pub fn board(&self, id: BoardId) -> TaskboardResult<&Board> {
        self.boards
            .iter()
            .find(|b| b.id == id)
            .ok_or_else(|| TaskboardError::not_found("Board", id))
    }

    pub fn board_mut(&mut self, id: BoardId) -> TaskboardResult<&mut Board> {
        self.boards
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| TaskboardError::not_found("Board", id))
    }

    pub fn task(&self, id: TaskId) -> TaskboardResult<&Task> {
        self.tasks
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| TaskboardError::not_found("Task", id))
    }

    pub fn task_mut(&mut self, id: TaskId) -> TaskboardResult<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| TaskboardError::not_found("Task", id))
    }
}
