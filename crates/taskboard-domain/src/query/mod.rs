//! Read-side queries.
//!
//! Everything a board screen renders, computed from a snapshot: the selected
//! board, its columns in order with their tasks, and what to show when there
//! is nothing to render.

use crate::{reorder, Board, BoardId, Snapshot, Status, StatusId, SubtaskId, Task, TaskId};
use serde::Serialize;

/// Why a board view has no columns to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyState {
    NoBoards,
    NoColumns,
}

impl EmptyState {
    pub fn message(&self) -> &'static str {
        match self {
            EmptyState::NoBoards => "There are no boards",
            EmptyState::NoColumns => "This board is empty",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubtaskView {
    pub id: SubtaskId,
    pub title: String,
    pub is_completed: bool,
}

/// A task card: title plus "n of m subtasks" progress.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskSummary {
    pub id: TaskId,
    pub title: String,
    pub description: Option<String>,
    pub position: i32,
    pub completed_subtasks: usize,
    pub total_subtasks: usize,
    pub subtasks: Vec<SubtaskView>,
}

impl TaskSummary {
    pub fn from_task(task: &Task) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            description: task.description.clone(),
            position: task.position,
            completed_subtasks: task.completed_subtasks(),
            total_subtasks: task.subtasks.len(),
            subtasks: task
                .subtasks
                .iter()
                .map(|s| SubtaskView {
                    id: s.id,
                    title: s.title.clone(),
                    is_completed: s.is_completed,
                })
                .collect(),
        }
    }

    pub fn progress_label(&self) -> String {
        format!(
            "{} of {} subtasks",
            self.completed_subtasks, self.total_subtasks
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnView {
    pub id: StatusId,
    pub name: String,
    pub task_count: usize,
    pub tasks: Vec<TaskSummary>,
}

impl ColumnView {
    fn build(status: &Status, tasks: &[Task]) -> Self {
        let tasks: Vec<TaskSummary> = reorder::column_tasks(tasks, status.id)
            .into_iter()
            .map(TaskSummary::from_task)
            .collect();
        Self {
            id: status.id,
            name: status.name.clone(),
            task_count: tasks.len(),
            tasks,
        }
    }

    /// Column header text, e.g. "TODO (4)".
    pub fn header(&self) -> String {
        format!("{} ({})", self.name.to_uppercase(), self.task_count)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardView {
    pub board_id: Option<BoardId>,
    pub title: Option<String>,
    pub columns: Vec<ColumnView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_state: Option<EmptyState>,
}

impl BoardView {
    fn empty(board: Option<&Board>, state: EmptyState) -> Self {
        Self {
            board_id: board.map(|b| b.id),
            title: board.map(|b| b.title.clone()),
            columns: Vec::new(),
            empty_state: Some(state),
        }
    }
}

/// Build the view of `board_id`, or of the active board when `None`.
///
/// Returns `None` only when a board id was given and no such board exists.
pub fn board_view(snapshot: &Snapshot, board_id: Option<BoardId>) -> Option<BoardView> {
    let board = match board_id {
        Some(id) => Some(snapshot.board(id)?),
        None => snapshot.active_board(),
    };

    let Some(board) = board else {
        return Some(BoardView::empty(None, EmptyState::NoBoards));
    };

    if board.statuses.is_empty() {
        return Some(BoardView::empty(Some(board), EmptyState::NoColumns));
    }

    Some(BoardView {
        board_id: Some(board.id),
        title: Some(board.title.clone()),
        columns: board
            .statuses
            .iter()
            .map(|status| ColumnView::build(status, &snapshot.tasks))
            .collect(),
        empty_state: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_boards() {
        let view = board_view(&Snapshot::new(), None).unwrap();
        assert_eq!(view.empty_state, Some(EmptyState::NoBoards));
        assert_eq!(EmptyState::NoBoards.message(), "There are no boards");
        assert!(view.columns.is_empty());
    }

    #[test]
    fn test_board_without_columns() {
        let board = Board::new("Blank".to_string());
        let snapshot = Snapshot::from_data(vec![board.clone()], vec![]);
        let view = board_view(&snapshot, Some(board.id)).unwrap();
        assert_eq!(view.empty_state, Some(EmptyState::NoColumns));
        assert_eq!(view.title.as_deref(), Some("Blank"));
    }

    #[test]
    fn test_unknown_board() {
        assert!(board_view(&Snapshot::new(), Some(uuid::Uuid::new_v4())).is_none());
    }

    #[test]
    fn test_columns_tasks_and_progress() {
        let board = Board::with_statuses(
            "Launch".to_string(),
            vec!["Todo".to_string(), "Done".to_string()],
        );
        let todo = board.statuses[0].id;
        let mut first = Task::new(board.id, todo, "First".to_string(), 0)
            .with_subtasks(vec!["a".to_string(), "b".to_string(), "c".to_string()]);
        first.subtasks[1].is_completed = true;
        let second = Task::new(board.id, todo, "Second".to_string(), 1);
        let snapshot = Snapshot::from_data(vec![board], vec![second, first]);

        let view = board_view(&snapshot, None).unwrap();

        assert!(view.empty_state.is_none());
        assert_eq!(view.columns.len(), 2);
        assert_eq!(view.columns[0].header(), "TODO (2)");
        assert_eq!(view.columns[1].header(), "DONE (0)");
        assert_eq!(view.columns[0].tasks[0].title, "First");
        assert_eq!(view.columns[0].tasks[0].progress_label(), "1 of 3 subtasks");
    }
}
