use super::{Command, CommandContext};
use crate::validation::required_text;
use crate::{reorder, Board, BoardId, Status, StatusDraft, StatusId, SubtaskId, Task, TaskId};
use std::collections::HashSet;
use taskboard_core::{TaskboardError, TaskboardResult};

/// Add a board and make it the active one
pub struct CreateBoard {
    pub board: Board,
}

impl Command for CreateBoard {
    fn execute(&self, context: &mut CommandContext) -> TaskboardResult<()> {
        if context.boards.iter().any(|b| b.id == self.board.id) {
            return Err(TaskboardError::Validation(format!(
                "Board {} already exists",
                self.board.id
            )));
        }
        context.boards.push(self.board.clone());
        *context.active_board_id = Some(self.board.id);
        Ok(())
    }

    fn description(&self) -> String {
        format!("Create board: '{}'", self.board.title)
    }
}

/// Rename a board
pub struct RenameBoard {
    pub board_id: BoardId,
    pub title: String,
}

impl Command for RenameBoard {
    fn execute(&self, context: &mut CommandContext) -> TaskboardResult<()> {
        context
            .board_mut(self.board_id)?
            .update_title(self.title.clone());
        Ok(())
    }

    fn description(&self) -> String {
        format!("Rename board {} to '{}'", self.board_id, self.title)
    }
}

/// Replace a board's column list, as the board edit form does.
///
/// Drafts with an id keep that column (renamed to the draft name), drafts
/// without one become new columns, and columns missing from the list are
/// removed together with their tasks.
pub struct ReplaceStatuses {
    pub board_id: BoardId,
    pub drafts: Vec<StatusDraft>,
}

impl Command for ReplaceStatuses {
    fn execute(&self, context: &mut CommandContext) -> TaskboardResult<()> {
        let board = context.board(self.board_id)?;

        let mut kept = HashSet::new();
        for draft in &self.drafts {
            if let Some(id) = draft.id {
                if !board.has_status(id) {
                    return Err(TaskboardError::not_found("Status", id));
                }
                if !kept.insert(id) {
                    return Err(TaskboardError::Validation(format!(
                        "Status {} listed more than once",
                        id
                    )));
                }
            }
        }

        let removed: Vec<StatusId> = board
            .statuses
            .iter()
            .map(|s| s.id)
            .filter(|id| !kept.contains(id))
            .collect();

        let statuses: Vec<Status> = self
            .drafts
            .iter()
            .map(|draft| match draft.id {
                Some(id) => Status {
                    id,
                    board_id: self.board_id,
                    name: draft.name.clone(),
                },
                None => Status::new(self.board_id, draft.name.clone()),
            })
            .collect();

        let board = context.board_mut(self.board_id)?;
        board.statuses = statuses;
        board.touch();

        let before = context.tasks.len();
        context.tasks.retain(|t| !removed.contains(&t.status_id));
        if before != context.tasks.len() {
            tracing::debug!(
                "Removed {} tasks with their columns",
                before - context.tasks.len()
            );
        }
        Ok(())
    }

    fn description(&self) -> String {
        format!(
            "Replace columns of board {} ({} columns)",
            self.board_id,
            self.drafts.len()
        )
    }
}

/// Delete a board and every task on it
pub struct DeleteBoard {
    pub board_id: BoardId,
}

impl Command for DeleteBoard {
    fn execute(&self, context: &mut CommandContext) -> TaskboardResult<()> {
        let index = context
            .boards
            .iter()
            .position(|b| b.id == self.board_id)
            .ok_or_else(|| TaskboardError::not_found("Board", self.board_id))?;
        context.boards.remove(index);
        context.tasks.retain(|t| t.board_id != self.board_id);

        if *context.active_board_id == Some(self.board_id) {
            *context.active_board_id = context.boards.first().map(|b| b.id);
        }
        Ok(())
    }

    fn description(&self) -> String {
        format!("Delete board {}", self.board_id)
    }
}

/// Select the board shown by default
pub struct SetActiveBoard {
    pub board_id: BoardId,
}

impl Command for SetActiveBoard {
    fn execute(&self, context: &mut CommandContext) -> TaskboardResult<()> {
        context.board(self.board_id)?;
        *context.active_board_id = Some(self.board_id);
        Ok(())
    }

    fn description(&self) -> String {
        format!("Select board {}", self.board_id)
    }
}

/// Add boards and their tasks from an export
pub struct ImportBoards {
    pub boards: Vec<Board>,
    pub tasks: Vec<Task>,
}

impl ImportBoards {
    /// Imported entities must not collide with existing ones or with each
    /// other, and every child must point back at its parent.
    fn validate(&self, context: &CommandContext) -> TaskboardResult<()> {
        let mut board_ids: HashSet<BoardId> = context.boards.iter().map(|b| b.id).collect();
        let mut status_ids: HashSet<StatusId> = context
            .boards
            .iter()
            .flat_map(|b| b.statuses.iter().map(|s| s.id))
            .collect();
        let mut task_ids: HashSet<TaskId> = context.tasks.iter().map(|t| t.id).collect();
        let mut subtask_ids: HashSet<SubtaskId> = context
            .tasks
            .iter()
            .flat_map(|t| t.subtasks.iter().map(|s| s.id))
            .collect();

        for board in &self.boards {
            if !board_ids.insert(board.id) {
                return Err(duplicate("Board", board.id));
            }
            required_text("Board name", &board.title)?;
            for status in &board.statuses {
                if !status_ids.insert(status.id) {
                    return Err(duplicate("Status", status.id));
                }
                if status.board_id != board.id {
                    return Err(TaskboardError::Validation(format!(
                        "Status {} does not belong to board {}",
                        status.id, board.id
                    )));
                }
                required_text("Column name", &status.name)?;
            }
        }

        for task in &self.tasks {
            if !task_ids.insert(task.id) {
                return Err(duplicate("Task", task.id));
            }
            let board = self
                .boards
                .iter()
                .find(|b| b.id == task.board_id)
                .ok_or_else(|| TaskboardError::not_found("Board", task.board_id))?;
            if !board.has_status(task.status_id) {
                return Err(TaskboardError::Validation(format!(
                    "Status {} does not belong to board {}",
                    task.status_id, board.id
                )));
            }
            required_text("Title", &task.title)?;

            for subtask in &task.subtasks {
                if !subtask_ids.insert(subtask.id) {
                    return Err(duplicate("Subtask", subtask.id));
                }
                if subtask.task_id != task.id {
                    return Err(TaskboardError::Validation(format!(
                        "Subtask {} does not belong to task {}",
                        subtask.id, task.id
                    )));
                }
                required_text("Subtask title", &subtask.title)?;
            }
        }

        Ok(())
    }
}

fn duplicate(kind: &str, id: uuid::Uuid) -> TaskboardError {
    TaskboardError::Validation(format!("{} {} already exists", kind, id))
}

impl Command for ImportBoards {
    fn execute(&self, context: &mut CommandContext) -> TaskboardResult<()> {
        self.validate(context)?;

        context.boards.extend(self.boards.iter().cloned());
        context.tasks.extend(self.tasks.iter().cloned());
        reorder::normalize_positions(context.tasks.as_mut_slice());
        Ok(())
    }

    fn description(&self) -> String {
        format!("Import {} boards", self.boards.len())
    }
}
