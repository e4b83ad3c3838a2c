pub mod board;
pub mod commands;
pub mod export;
pub mod field_update;
pub mod operations;
pub mod query;
pub mod reorder;
pub mod snapshot;
pub mod status;
pub mod store;
pub mod task;
pub mod validation;

pub use board::{Board, BoardId, BoardUpdate, StatusDraft};
pub use export::{AllBoardsExport, BoardExport, BoardExporter, BoardImporter};
pub use field_update::FieldUpdate;
pub use operations::{NewTask, TaskFilter, TaskboardOperations};
pub use query::{board_view, BoardView, ColumnView, EmptyState, TaskSummary};
pub use snapshot::Snapshot;
pub use status::{Status, StatusId};
pub use store::{ListenerId, Store};
pub use task::{Subtask, SubtaskId, Task, TaskId, TaskUpdate};
