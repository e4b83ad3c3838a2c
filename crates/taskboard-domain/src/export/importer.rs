//! Reads exported boards back.

use super::models::{AllBoardsExport, BoardExport};
use crate::{Board, Task};
use taskboard_core::{TaskboardError, TaskboardResult};

pub struct BoardImporter;

impl BoardImporter {
    /// Parse an export. Accepts both the all-boards wrapper and a bare
    /// single-board export.
    pub fn from_json(json: &str) -> TaskboardResult<AllBoardsExport> {
        if let Ok(all) = serde_json::from_str::<AllBoardsExport>(json) {
            return Ok(all);
        }
        serde_json::from_str::<BoardExport>(json)
            .map(|single| AllBoardsExport::from_boards(vec![single]))
            .map_err(|e| TaskboardError::Serialization(format!("Invalid export: {}", e)))
    }

    /// Flatten an export into the boards and tasks it carries.
    pub fn into_entities(export: AllBoardsExport) -> (Vec<Board>, Vec<Task>) {
        let mut boards = Vec::with_capacity(export.boards.len());
        let mut tasks = Vec::new();
        for entry in export.boards {
            boards.push(entry.board);
            tasks.extend(entry.tasks);
        }
        (boards, tasks)
    }
}
