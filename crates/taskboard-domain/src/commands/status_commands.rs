use super::{Command, CommandContext};
use crate::{BoardId, Status, StatusId};
use taskboard_core::{TaskboardError, TaskboardResult};

/// Add a column to a board, appended unless a position is given
pub struct AddStatus {
    pub status: Status,
    pub position: Option<usize>,
}

impl Command for AddStatus {
    fn execute(&self, context: &mut CommandContext) -> TaskboardResult<()> {
        let board = context.board_mut(self.status.board_id)?;
        board.insert_status(self.status.clone(), self.position);
        Ok(())
    }

    fn description(&self) -> String {
        format!("Add column: '{}'", self.status.name)
    }
}

pub struct RenameStatus {
    pub board_id: BoardId,
    pub status_id: StatusId,
    pub name: String,
}

impl Command for RenameStatus {
    fn execute(&self, context: &mut CommandContext) -> TaskboardResult<()> {
        let board = context.board_mut(self.board_id)?;
        board
            .status_mut(self.status_id)
            .ok_or_else(|| TaskboardError::not_found("Status", self.status_id))?
            .rename(self.name.clone());
        board.touch();
        Ok(())
    }

    fn description(&self) -> String {
        format!("Rename column {} to '{}'", self.status_id, self.name)
    }
}

/// Remove a column and the tasks in it
pub struct RemoveStatus {
    pub board_id: BoardId,
    pub status_id: StatusId,
}

impl Command for RemoveStatus {
    fn execute(&self, context: &mut CommandContext) -> TaskboardResult<()> {
        context
            .board_mut(self.board_id)?
            .remove_status(self.status_id)
            .ok_or_else(|| TaskboardError::not_found("Status", self.status_id))?;
        context.tasks.retain(|t| t.status_id != self.status_id);
        Ok(())
    }

    fn description(&self) -> String {
        format!("Remove column {}", self.status_id)
    }
}

/// Move a column to another slot of its board
pub struct ReorderStatus {
    pub board_id: BoardId,
    pub status_id: StatusId,
    pub index: usize,
}

impl Command for ReorderStatus {
    fn execute(&self, context: &mut CommandContext) -> TaskboardResult<()> {
        context
            .board_mut(self.board_id)?
            .move_status(self.status_id, self.index)
            .ok_or_else(|| TaskboardError::not_found("Status", self.status_id))?;
        Ok(())
    }

    fn description(&self) -> String {
        format!("Move column {} to {}", self.status_id, self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Board, Snapshot, Task};

    fn setup() -> (Snapshot, Board) {
        let board = Board::with_statuses(
            "Ops".to_string(),
            vec!["Todo".to_string(), "Done".to_string()],
        );
        let mut snapshot = Snapshot::from_data(vec![board.clone()], vec![]);
        snapshot
            .tasks
            .push(Task::new(board.id, board.statuses[0].id, "A".to_string(), 0));
        snapshot
            .tasks
            .push(Task::new(board.id, board.statuses[1].id, "B".to_string(), 0));
        (snapshot, board)
    }

    #[test]
    fn add_status_at_position() {
        let (mut snapshot, board) = setup();
        AddStatus {
            status: Status::new(board.id, "Doing".to_string()),
            position: Some(1),
        }
        .execute(&mut snapshot.command_context())
        .unwrap();

        let names: Vec<_> = snapshot.boards[0]
            .statuses
            .iter()
            .map(|s| s.name.clone())
            .collect();
        assert_eq!(names, vec!["Todo", "Doing", "Done"]);
    }

    #[test]
    fn remove_status_deletes_its_tasks() {
        let (mut snapshot, board) = setup();
        let todo = board.statuses[0].id;

        RemoveStatus {
            board_id: board.id,
            status_id: todo,
        }
        .execute(&mut snapshot.command_context())
        .unwrap();

        assert_eq!(snapshot.boards[0].statuses.len(), 1);
        assert_eq!(snapshot.tasks.len(), 1);
        assert_eq!(snapshot.tasks[0].title, "B");
    }

    #[test]
    fn rename_unknown_status_fails() {
        let (mut snapshot, board) = setup();
        let err = RenameStatus {
            board_id: board.id,
            status_id: uuid::Uuid::new_v4(),
            name: "X".to_string(),
        }
        .execute(&mut snapshot.command_context())
        .unwrap_err();
        assert!(matches!(err, TaskboardError::NotFound(_)));
    }

    #[test]
    fn reorder_status_moves_column() {
        let (mut snapshot, board) = setup();
        ReorderStatus {
            board_id: board.id,
            status_id: board.statuses[1].id,
            index: 0,
        }
        .execute(&mut snapshot.command_context())
        .unwrap();
        assert_eq!(snapshot.boards[0].statuses[0].name, "Done");
    }
}
