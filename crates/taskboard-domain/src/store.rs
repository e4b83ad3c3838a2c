//! The in-memory state container.
//!
//! `Store` owns the [`Snapshot`], runs every mutation as a [`Command`] and
//! tells subscribers about each new state. A failing command leaves the state
//! exactly as it was and notifies nobody.

use crate::commands::{
    AddStatus, AddSubtask, Command, CreateBoard, CreateTask, DeleteBoard, DeleteTask,
    ImportBoards, MoveTask, RemoveStatus, RemoveSubtask, RenameBoard, RenameStatus,
    RenameSubtask, ReorderStatus, ReplaceStatuses, SetActiveBoard, SetDarkTheme,
    SetSubtaskCompleted, ToggleSubtask, ToggleTheme, UpdateTask,
};
use crate::export::{BoardExporter, BoardImporter};
use crate::operations::{NewTask, TaskFilter, TaskboardOperations};
use crate::validation::{optional_text, required_text};
use crate::{
    reorder, Board, BoardId, BoardUpdate, FieldUpdate, Snapshot, Status, StatusDraft, StatusId,
    Subtask, SubtaskId, Task, TaskId, TaskUpdate,
};
use taskboard_core::{TaskboardError, TaskboardResult};

pub type ListenerId = u64;

type Listener = Box<dyn Fn(&Snapshot) + Send + Sync>;

#[derive(Default)]
pub struct Store {
    state: Snapshot,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener_id: ListenerId,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from loaded data without notifying anyone.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            state: normalized(snapshot),
            ..Self::default()
        }
    }

    pub fn state(&self) -> &Snapshot {
        &self.state
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.clone()
    }

    /// Register a listener called with the new state after every change.
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: Fn(&Snapshot) + Send + Sync + 'static,
    {
        let id = self.next_listener_id;
        self.next_listener_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns whether a listener was removed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        before != self.listeners.len()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Replace the whole state, e.g. with what was loaded at startup.
    pub fn hydrate(&mut self, snapshot: Snapshot) {
        tracing::debug!(
            "Hydrating store: {} boards, {} tasks",
            snapshot.boards.len(),
            snapshot.tasks.len()
        );
        self.state = normalized(snapshot);
        self.notify();
    }

    pub fn execute(&mut self, command: Box<dyn Command>) -> TaskboardResult<()> {
        self.execute_batch(vec![command])
    }

    /// Run commands as one action: all of them apply or none do, and
    /// listeners hear about the result once.
    pub fn execute_batch(&mut self, commands: Vec<Box<dyn Command>>) -> TaskboardResult<()> {
        let backup = self.state.clone();

        for command in &commands {
            tracing::debug!("Executing: {}", command.description());
            if let Err(e) = command.execute(&mut self.state.command_context()) {
                tracing::debug!("Command failed, state restored: {}", e);
                self.state = backup;
                return Err(e);
            }
        }

        self.notify();
        Ok(())
    }

    fn notify(&self) {
        for (_, listener) in &self.listeners {
            listener(&self.state);
        }
    }

    fn board_or_err(&self, id: BoardId) -> TaskboardResult<Board> {
        self.state
            .board(id)
            .cloned()
            .ok_or_else(|| TaskboardError::not_found("Board", id))
    }

    fn task_or_err(&self, id: TaskId) -> TaskboardResult<Task> {
        self.state
            .task(id)
            .cloned()
            .ok_or_else(|| TaskboardError::not_found("Task", id))
    }

    fn subtask_or_err(&self, task_id: TaskId, subtask_id: SubtaskId) -> TaskboardResult<Subtask> {
        self.task_or_err(task_id)?
            .subtask(subtask_id)
            .cloned()
            .ok_or_else(|| TaskboardError::not_found("Subtask", subtask_id))
    }

    fn status_or_err(&self, board_id: BoardId, status_id: StatusId) -> TaskboardResult<Status> {
        self.board_or_err(board_id)?
            .status(status_id)
            .cloned()
            .ok_or_else(|| TaskboardError::not_found("Status", status_id))
    }
}

/// Loaded data may predate positions, carry blank descriptions or point at a
/// deleted board.
fn normalized(mut snapshot: Snapshot) -> Snapshot {
    reorder::normalize_positions(&mut snapshot.tasks);
    clear_blank_descriptions(&mut snapshot.tasks);
    if let Some(id) = snapshot.active_board_id {
        if snapshot.board(id).is_none() {
            snapshot.active_board_id = None;
        }
    }
    snapshot
}

fn clear_blank_descriptions(tasks: &mut [Task]) {
    for task in tasks {
        task.description = optional_text(task.description.take());
    }
}

impl TaskboardOperations for Store {
    fn create_board(
        &mut self,
        title: String,
        status_names: Vec<String>,
    ) -> TaskboardResult<Board> {
        let title = required_text("Board name", &title)?;
        let names = status_names
            .iter()
            .map(|name| required_text("Column name", name))
            .collect::<TaskboardResult<Vec<_>>>()?;

        let board = Board::with_statuses(title, names);
        let id = board.id;
        self.execute(Box::new(CreateBoard { board }))?;
        self.board_or_err(id)
    }

    fn list_boards(&self) -> TaskboardResult<Vec<Board>> {
        Ok(self.state.boards.clone())
    }

    fn get_board(&self, id: BoardId) -> TaskboardResult<Option<Board>> {
        Ok(self.state.board(id).cloned())
    }

    fn update_board(&mut self, id: BoardId, updates: BoardUpdate) -> TaskboardResult<Board> {
        let mut commands: Vec<Box<dyn Command>> = Vec::new();

        if let Some(title) = updates.title {
            let title = required_text("Board name", &title)?;
            commands.push(Box::new(RenameBoard { board_id: id, title }));
        }

        if let Some(drafts) = updates.statuses {
            let drafts = drafts
                .into_iter()
                .map(|draft| -> TaskboardResult<StatusDraft> {
                    Ok(StatusDraft {
                        id: draft.id,
                        name: required_text("Column name", &draft.name)?,
                    })
                })
                .collect::<TaskboardResult<Vec<_>>>()?;
            commands.push(Box::new(ReplaceStatuses {
                board_id: id,
                drafts,
            }));
        }

        if commands.is_empty() {
            return self.board_or_err(id);
        }

        self.execute_batch(commands)?;
        self.board_or_err(id)
    }

    fn delete_board(&mut self, id: BoardId) -> TaskboardResult<()> {
        self.execute(Box::new(DeleteBoard { board_id: id }))
    }

    fn set_active_board(&mut self, id: BoardId) -> TaskboardResult<Board> {
        self.execute(Box::new(SetActiveBoard { board_id: id }))?;
        self.board_or_err(id)
    }

    fn active_board(&self) -> TaskboardResult<Option<Board>> {
        Ok(self.state.active_board().cloned())
    }

    fn add_status(
        &mut self,
        board_id: BoardId,
        name: String,
        position: Option<usize>,
    ) -> TaskboardResult<Status> {
        let name = required_text("Column name", &name)?;
        let status = Status::new(board_id, name);
        let status_id = status.id;
        self.execute(Box::new(AddStatus { status, position }))?;
        self.status_or_err(board_id, status_id)
    }

    fn rename_status(
        &mut self,
        board_id: BoardId,
        status_id: StatusId,
        name: String,
    ) -> TaskboardResult<Status> {
        let name = required_text("Column name", &name)?;
        self.execute(Box::new(RenameStatus {
            board_id,
            status_id,
            name,
        }))?;
        self.status_or_err(board_id, status_id)
    }

    fn remove_status(&mut self, board_id: BoardId, status_id: StatusId) -> TaskboardResult<()> {
        self.execute(Box::new(RemoveStatus {
            board_id,
            status_id,
        }))
    }

    fn reorder_status(
        &mut self,
        board_id: BoardId,
        status_id: StatusId,
        index: usize,
    ) -> TaskboardResult<Board> {
        self.execute(Box::new(ReorderStatus {
            board_id,
            status_id,
            index,
        }))?;
        self.board_or_err(board_id)
    }

    fn create_task(&mut self, task: NewTask) -> TaskboardResult<Task> {
        let title = required_text("Title", &task.title)?;
        let subtasks = task
            .subtasks
            .iter()
            .map(|title| required_text("Subtask title", title))
            .collect::<TaskboardResult<Vec<_>>>()?;

        let task = Task::new(task.board_id, task.status_id, title, 0)
            .with_description(optional_text(task.description))
            .with_subtasks(subtasks);
        let id = task.id;
        self.execute(Box::new(CreateTask { task }))?;
        self.task_or_err(id)
    }

    fn list_tasks(&self, filter: TaskFilter) -> TaskboardResult<Vec<Task>> {
        let mut tasks = Vec::new();
        for board in &self.state.boards {
            if filter.board_id.is_some_and(|id| id != board.id) {
                continue;
            }
            for status in &board.statuses {
                if filter.status_id.is_some_and(|id| id != status.id) {
                    continue;
                }
                tasks.extend(
                    reorder::column_tasks(&self.state.tasks, status.id)
                        .into_iter()
                        .cloned(),
                );
            }
        }
        Ok(tasks)
    }

    fn get_task(&self, id: TaskId) -> TaskboardResult<Option<Task>> {
        Ok(self.state.task(id).cloned())
    }

    fn update_task(&mut self, id: TaskId, updates: TaskUpdate) -> TaskboardResult<Task> {
        let title = updates
            .title
            .map(|title| required_text("Title", &title))
            .transpose()?;
        let description = match updates.description {
            FieldUpdate::Set(value) => optional_text(Some(value))
                .map(FieldUpdate::Set)
                .unwrap_or(FieldUpdate::Clear),
            other => other,
        };

        self.execute(Box::new(UpdateTask {
            task_id: id,
            updates: TaskUpdate {
                title,
                description,
                status_id: updates.status_id,
            },
        }))?;
        self.task_or_err(id)
    }

    fn move_task(
        &mut self,
        id: TaskId,
        status_id: StatusId,
        index: Option<usize>,
    ) -> TaskboardResult<Task> {
        self.execute(Box::new(MoveTask {
            task_id: id,
            status_id,
            index,
        }))?;
        self.task_or_err(id)
    }

    fn delete_task(&mut self, id: TaskId) -> TaskboardResult<()> {
        self.execute(Box::new(DeleteTask { task_id: id }))
    }

    fn add_subtask(&mut self, task_id: TaskId, title: String) -> TaskboardResult<Subtask> {
        let title = required_text("Subtask title", &title)?;
        let subtask = Subtask::new(task_id, title);
        let subtask_id = subtask.id;
        self.execute(Box::new(AddSubtask { subtask }))?;
        self.subtask_or_err(task_id, subtask_id)
    }

    fn rename_subtask(
        &mut self,
        task_id: TaskId,
        subtask_id: SubtaskId,
        title: String,
    ) -> TaskboardResult<Subtask> {
        let title = required_text("Subtask title", &title)?;
        self.execute(Box::new(RenameSubtask {
            task_id,
            subtask_id,
            title,
        }))?;
        self.subtask_or_err(task_id, subtask_id)
    }

    fn set_subtask_completed(
        &mut self,
        task_id: TaskId,
        subtask_id: SubtaskId,
        completed: bool,
    ) -> TaskboardResult<Subtask> {
        self.execute(Box::new(SetSubtaskCompleted {
            task_id,
            subtask_id,
            completed,
        }))?;
        self.subtask_or_err(task_id, subtask_id)
    }

    fn toggle_subtask(
        &mut self,
        task_id: TaskId,
        subtask_id: SubtaskId,
    ) -> TaskboardResult<Subtask> {
        self.execute(Box::new(ToggleSubtask {
            task_id,
            subtask_id,
        }))?;
        self.subtask_or_err(task_id, subtask_id)
    }

    fn remove_subtask(&mut self, task_id: TaskId, subtask_id: SubtaskId) -> TaskboardResult<()> {
        self.execute(Box::new(RemoveSubtask {
            task_id,
            subtask_id,
        }))
    }

    fn is_dark_theme_active(&self) -> bool {
        self.state.is_dark_theme_active
    }

    fn set_dark_theme(&mut self, enabled: bool) -> TaskboardResult<bool> {
        self.execute(Box::new(SetDarkTheme { enabled }))?;
        Ok(self.state.is_dark_theme_active)
    }

    fn toggle_theme(&mut self) -> TaskboardResult<bool> {
        self.execute(Box::new(ToggleTheme))?;
        Ok(self.state.is_dark_theme_active)
    }

    fn export_board(&self, board_id: Option<BoardId>) -> TaskboardResult<String> {
        let export = match board_id {
            Some(id) => {
                let board = self.board_or_err(id)?;
                BoardExporter::export_all_boards(&[board], &self.state.tasks)
            }
            None => BoardExporter::export_all_boards(&self.state.boards, &self.state.tasks),
        };
        BoardExporter::export_to_json(&export)
    }

    fn import_boards(&mut self, data: &str) -> TaskboardResult<Vec<Board>> {
        let (boards, mut tasks) = BoardImporter::into_entities(BoardImporter::from_json(data)?);
        clear_blank_descriptions(&mut tasks);
        let ids: Vec<BoardId> = boards.iter().map(|b| b.id).collect();

        self.execute(Box::new(ImportBoards { boards, tasks }))?;
        ids.into_iter().map(|id| self.board_or_err(id)).collect()
    }
}
