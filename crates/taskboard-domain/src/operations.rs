use crate::{
    Board, BoardId, BoardUpdate, Status, StatusId, Subtask, SubtaskId, Task, TaskId, TaskUpdate,
};
use taskboard_core::TaskboardResult;

/// Fields of a task being created. It always lands at the end of its column.
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub board_id: BoardId,
    pub status_id: StatusId,
    pub title: String,
    pub description: Option<String>,
    pub subtasks: Vec<String>,
}

/// Filter options for listing tasks
#[derive(Debug, Default, Clone)]
pub struct TaskFilter {
    pub board_id: Option<BoardId>,
    pub status_id: Option<StatusId>,
}

/// Every action a front end can dispatch against the store.
/// Adding a method here forces every front end to handle it.
pub trait TaskboardOperations {
    // Board operations
    fn create_board(&mut self, title: String, status_names: Vec<String>)
        -> TaskboardResult<Board>;
    fn list_boards(&self) -> TaskboardResult<Vec<Board>>;
    fn get_board(&self, id: BoardId) -> TaskboardResult<Option<Board>>;
    fn update_board(&mut self, id: BoardId, updates: BoardUpdate) -> TaskboardResult<Board>;
    fn delete_board(&mut self, id: BoardId) -> TaskboardResult<()>;
    fn set_active_board(&mut self, id: BoardId) -> TaskboardResult<Board>;
    fn active_board(&self) -> TaskboardResult<Option<Board>>;

    // Status (column) operations
    fn add_status(
        &mut self,
        board_id: BoardId,
        name: String,
        position: Option<usize>,
    ) -> TaskboardResult<Status>;
    fn rename_status(
        &mut self,
        board_id: BoardId,
        status_id: StatusId,
        name: String,
    ) -> TaskboardResult<Status>;
    fn remove_status(&mut self, board_id: BoardId, status_id: StatusId) -> TaskboardResult<()>;
    fn reorder_status(
        &mut self,
        board_id: BoardId,
        status_id: StatusId,
        index: usize,
    ) -> TaskboardResult<Board>;

    // Task operations
    fn create_task(&mut self, task: NewTask) -> TaskboardResult<Task>;
    fn list_tasks(&self, filter: TaskFilter) -> TaskboardResult<Vec<Task>>;
    fn get_task(&self, id: TaskId) -> TaskboardResult<Option<Task>>;
    fn update_task(&mut self, id: TaskId, updates: TaskUpdate) -> TaskboardResult<Task>;
    fn move_task(
        &mut self,
        id: TaskId,
        status_id: StatusId,
        index: Option<usize>,
    ) -> TaskboardResult<Task>;
    fn delete_task(&mut self, id: TaskId) -> TaskboardResult<()>;

    // Subtask operations
    fn add_subtask(&mut self, task_id: TaskId, title: String) -> TaskboardResult<Subtask>;
    fn rename_subtask(
        &mut self,
        task_id: TaskId,
        subtask_id: SubtaskId,
        title: String,
    ) -> TaskboardResult<Subtask>;
    fn set_subtask_completed(
        &mut self,
        task_id: TaskId,
        subtask_id: SubtaskId,
        completed: bool,
    ) -> TaskboardResult<Subtask>;
    fn toggle_subtask(&mut self, task_id: TaskId, subtask_id: SubtaskId)
        -> TaskboardResult<Subtask>;
    fn remove_subtask(&mut self, task_id: TaskId, subtask_id: SubtaskId) -> TaskboardResult<()>;

    // Theme
    fn is_dark_theme_active(&self) -> bool;
    fn set_dark_theme(&mut self, enabled: bool) -> TaskboardResult<bool>;
    fn toggle_theme(&mut self) -> TaskboardResult<bool>;

    // Import/Export
    fn export_board(&self, board_id: Option<BoardId>) -> TaskboardResult<String>;
    fn import_boards(&mut self, data: &str) -> TaskboardResult<Vec<Board>>;
}
