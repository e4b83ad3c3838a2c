pub mod board;
pub mod export;
pub mod status;
pub mod subtask;
pub mod task;
pub mod theme;
