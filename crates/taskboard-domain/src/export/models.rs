//! Export data models.

use crate::{Board, Task};
use serde::{Deserialize, Serialize};

/// A single board with its tasks. Columns travel inside the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardExport {
    pub board: Board,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllBoardsExport {
    pub boards: Vec<BoardExport>,
}

impl AllBoardsExport {
    pub fn empty() -> Self {
        Self { boards: Vec::new() }
    }

    pub fn from_boards(boards: Vec<BoardExport>) -> Self {
        Self { boards }
    }
}
