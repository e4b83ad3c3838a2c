//! Converts boards and tasks into the export format.

use super::models::{AllBoardsExport, BoardExport};
use crate::{reorder, Board, Task};
use taskboard_core::{TaskboardError, TaskboardResult};

pub struct BoardExporter;

impl BoardExporter {
    /// Export one board with its tasks, ordered column by column.
    pub fn export_board(board: &Board, all_tasks: &[Task]) -> BoardExport {
        let tasks = board
            .statuses
            .iter()
            .flat_map(|status| reorder::column_tasks(all_tasks, status.id))
            .filter(|task| task.board_id == board.id)
            .cloned()
            .collect();

        BoardExport {
            board: board.clone(),
            tasks,
        }
    }

    pub fn export_all_boards(boards: &[Board], tasks: &[Task]) -> AllBoardsExport {
        AllBoardsExport::from_boards(
            boards
                .iter()
                .map(|board| Self::export_board(board, tasks))
                .collect(),
        )
    }

    pub fn export_to_json(export: &AllBoardsExport) -> TaskboardResult<String> {
        serde_json::to_string_pretty(export)
            .map_err(|e| TaskboardError::Serialization(e.to_string()))
    }
}
