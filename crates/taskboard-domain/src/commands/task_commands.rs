use super::{Command, CommandContext};
use crate::{reorder, BoardId, StatusId, Task, TaskId, TaskUpdate};
use taskboard_core::{TaskboardError, TaskboardResult};

/// A task may only sit in a column of its own board.
fn ensure_status_on_board(
    context: &CommandContext,
    board_id: BoardId,
    status_id: StatusId,
) -> TaskboardResult<()> {
    if context.board(board_id)?.has_status(status_id) {
        Ok(())
    } else {
        Err(TaskboardError::Validation(format!(
            "Status {} does not belong to board {}",
            status_id, board_id
        )))
    }
}

/// Append a new task to the end of its column
pub struct CreateTask {
    pub task: Task,
}

impl Command for CreateTask {
    fn execute(&self, context: &mut CommandContext) -> TaskboardResult<()> {
        ensure_status_on_board(context, self.task.board_id, self.task.status_id)?;

        let mut task = self.task.clone();
        task.position = reorder::next_position(context.tasks.as_slice(), task.status_id);
        context.tasks.push(task);
        Ok(())
    }

    fn description(&self) -> String {
        format!("Create task: '{}'", self.task.title)
    }
}

pub struct UpdateTask {
    pub task_id: TaskId,
    pub updates: TaskUpdate,
}

impl Command for UpdateTask {
    fn execute(&self, context: &mut CommandContext) -> TaskboardResult<()> {
        let task = context.task(self.task_id)?;
        let board_id = task.board_id;
        let current_status = task.status_id;

        let target_status = match self.updates.status_id {
            Some(status_id) if status_id != current_status => {
                ensure_status_on_board(context, board_id, status_id)?;
                Some(status_id)
            }
            _ => None,
        };

        let task = context.task_mut(self.task_id)?;
        if let Some(title) = &self.updates.title {
            task.update_title(title.clone());
        }
        task.update_description(self.updates.description.clone());

        if let Some(status_id) = target_status {
            reorder::move_task(context.tasks.as_mut_slice(), self.task_id, status_id, None);
        }
        Ok(())
    }

    fn description(&self) -> String {
        format!("Update task {}", self.task_id)
    }
}

/// Drop a task into a column at an index; `None` appends
pub struct MoveTask {
    pub task_id: TaskId,
    pub status_id: StatusId,
    pub index: Option<usize>,
}

impl Command for MoveTask {
    fn execute(&self, context: &mut CommandContext) -> TaskboardResult<()> {
        let board_id = context.task(self.task_id)?.board_id;
        ensure_status_on_board(context, board_id, self.status_id)?;

        let landed = reorder::move_task(
            context.tasks.as_mut_slice(),
            self.task_id,
            self.status_id,
            self.index,
        )
        .ok_or_else(|| TaskboardError::not_found("Task", self.task_id))?;
        tracing::debug!("Task {} landed at position {}", self.task_id, landed);
        Ok(())
    }

    fn description(&self) -> String {
        format!("Move task {} to column {}", self.task_id, self.status_id)
    }
}

pub struct DeleteTask {
    pub task_id: TaskId,
}

impl Command for DeleteTask {
    fn execute(&self, context: &mut CommandContext) -> TaskboardResult<()> {
        let index = context
            .tasks
            .iter()
            .position(|t| t.id == self.task_id)
            .ok_or_else(|| TaskboardError::not_found("Task", self.task_id))?;
        let removed = context.tasks.remove(index);
        reorder::compact_positions(context.tasks.as_mut_slice(), removed.status_id);
        Ok(())
    }

    fn description(&self) -> String {
        format!("Delete task {}", self.task_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Board, FieldUpdate, Snapshot};

    fn setup() -> (Snapshot, Board) {
        let board = Board::with_statuses(
            "Sprint".to_string(),
            vec!["Todo".to_string(), "Doing".to_string()],
        );
        (Snapshot::from_data(vec![board.clone()], vec![]), board)
    }

    fn create(snapshot: &mut Snapshot, board: &Board, column: usize, title: &str) -> TaskId {
        let task = Task::new(board.id, board.statuses[column].id, title.to_string(), 99);
        let id = task.id;
        CreateTask { task }
            .execute(&mut snapshot.command_context())
            .unwrap();
        id
    }

    fn column_titles(snapshot: &Snapshot, status_id: StatusId) -> Vec<String> {
        reorder::column_tasks(&snapshot.tasks, status_id)
            .into_iter()
            .map(|t| t.title.clone())
            .collect()
    }

    #[test]
    fn create_task_appends_to_column() {
        let (mut snapshot, board) = setup();
        let a = create(&mut snapshot, &board, 0, "A");
        let b = create(&mut snapshot, &board, 0, "B");

        assert_eq!(snapshot.task(a).unwrap().position, 0);
        assert_eq!(snapshot.task(b).unwrap().position, 1);
    }

    #[test]
    fn create_task_rejects_status_of_other_board() {
        let (mut snapshot, board) = setup();
        let task = Task::new(board.id, uuid::Uuid::new_v4(), "Lost".to_string(), 0);
        let err = CreateTask { task }
            .execute(&mut snapshot.command_context())
            .unwrap_err();
        assert!(matches!(err, TaskboardError::Validation(_)));
        assert!(snapshot.tasks.is_empty());
    }

    #[test]
    fn update_task_status_moves_to_end() {
        let (mut snapshot, board) = setup();
        let a = create(&mut snapshot, &board, 0, "A");
        create(&mut snapshot, &board, 0, "B");
        create(&mut snapshot, &board, 1, "X");

        UpdateTask {
            task_id: a,
            updates: TaskUpdate {
                title: Some("A2".to_string()),
                description: FieldUpdate::Set("notes".to_string()),
                status_id: Some(board.statuses[1].id),
            },
        }
        .execute(&mut snapshot.command_context())
        .unwrap();

        assert_eq!(column_titles(&snapshot, board.statuses[1].id), vec!["X", "A2"]);
        assert_eq!(column_titles(&snapshot, board.statuses[0].id), vec!["B"]);
        let task = snapshot.task(a).unwrap();
        assert_eq!(task.position, 1);
        assert_eq!(task.description.as_deref(), Some("notes"));
    }

    #[test]
    fn move_task_between_columns() {
        let (mut snapshot, board) = setup();
        let a = create(&mut snapshot, &board, 0, "A");
        create(&mut snapshot, &board, 1, "X");
        create(&mut snapshot, &board, 1, "Y");

        MoveTask {
            task_id: a,
            status_id: board.statuses[1].id,
            index: Some(0),
        }
        .execute(&mut snapshot.command_context())
        .unwrap();

        assert_eq!(
            column_titles(&snapshot, board.statuses[1].id),
            vec!["A", "X", "Y"]
        );
        assert!(column_titles(&snapshot, board.statuses[0].id).is_empty());
    }

    #[test]
    fn move_task_rejects_foreign_status() {
        let (mut snapshot, board) = setup();
        let a = create(&mut snapshot, &board, 0, "A");
        let err = MoveTask {
            task_id: a,
            status_id: uuid::Uuid::new_v4(),
            index: None,
        }
        .execute(&mut snapshot.command_context())
        .unwrap_err();
        assert!(matches!(err, TaskboardError::Validation(_)));
    }

    #[test]
    fn delete_task_compacts_column() {
        let (mut snapshot, board) = setup();
        let a = create(&mut snapshot, &board, 0, "A");
        let b = create(&mut snapshot, &board, 0, "B");
        let c = create(&mut snapshot, &board, 0, "C");

        DeleteTask { task_id: a }
            .execute(&mut snapshot.command_context())
            .unwrap();

        assert_eq!(snapshot.task(b).unwrap().position, 0);
        assert_eq!(snapshot.task(c).unwrap().position, 1);
    }
}
