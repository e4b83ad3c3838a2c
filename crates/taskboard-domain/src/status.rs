use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::board::BoardId;

pub type StatusId = Uuid;

/// A column of a board. Column order is owned by the board's status list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub id: StatusId,
    pub board_id: BoardId,
    pub name: String,
}

impl Status {
    pub fn new(board_id: BoardId, name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            board_id,
            name,
        }
    }

    pub fn rename(&mut self, name: String) {
        self.name = name;
    }
}
