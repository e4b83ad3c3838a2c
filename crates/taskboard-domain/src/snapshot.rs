//! Point-in-time capture of the whole workspace.
//!
//! `Snapshot` is the store's state and also what gets persisted: boards,
//! tasks, the theme flag and the selected board. Every field defaults so
//! files written by older versions still load.

use crate::commands::CommandContext;
use crate::{Board, BoardId, StatusId, Task, TaskId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub is_dark_theme_active: bool,

    /// Board shown by default. Falls back to the first board when unset.
    #[serde(default)]
    pub active_board_id: Option<BoardId>,

    #[serde(default)]
    pub boards: Vec<Board>,

    /// Tasks of every board; a task's column order is its `position`.
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_data(boards: Vec<Board>, tasks: Vec<Task>) -> Self {
        Self {
            boards,
            tasks,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.boards.is_empty() && self.tasks.is_empty()
    }

    pub fn board(&self, id: BoardId) -> Option<&Board> {
        self.boards.iter().find(|b| b.id == id)
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// The selected board, or the first board when nothing valid is selected.
    pub fn active_board(&self) -> Option<&Board> {
        self.active_board_id
            .and_then(|id| self.board(id))
            .or_else(|| self.boards.first())
    }

    pub fn tasks_for_board(&self, board_id: BoardId) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(move |t| t.board_id == board_id)
    }

    pub fn task_count(&self, status_id: StatusId) -> usize {
        self.tasks.iter().filter(|t| t.status_id == status_id).count()
    }

    /// Borrow every field mutably for command execution.
    pub fn command_context(&mut self) -> CommandContext<'_> {
        CommandContext {
            boards: &mut self.boards,
            tasks: &mut self.tasks,
            is_dark_theme_active: &mut self.is_dark_theme_active,
            active_board_id: &mut self.active_board_id,
        }
    }

    pub fn to_json_bytes(&self) -> taskboard_core::TaskboardResult<Vec<u8>> {
        serde_json::to_vec_pretty(self)
            .map_err(|e| taskboard_core::TaskboardError::Serialization(e.to_string()))
    }

    pub fn from_json_bytes(bytes: &[u8]) -> taskboard_core::TaskboardResult<Self> {
        serde_json::from_slice(bytes)
            .map_err(|e| taskboard_core::TaskboardError::Serialization(e.to_string()))
    }
}
