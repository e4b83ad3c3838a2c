use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use uuid::Uuid;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_COMMIT_HASH"),
    ")"
);

#[derive(Parser)]
#[command(name = "taskboard")]
#[command(about = "A local kanban board: boards, columns, tasks and subtasks", long_about = None)]
#[command(version, long_version = LONG_VERSION)]
pub struct Cli {
    /// Path to the data file (defaults to the configured data file)
    #[arg(long, short, global = true, value_name = "FILE", env = "TASKBOARD_FILE")]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Board operations
    Board(BoardCommand),
    /// Column operations
    Status(StatusCommand),
    /// Task operations
    Task(TaskCommand),
    /// Subtask operations
    Subtask(SubtaskCommand),
    /// Light/dark theme preference
    Theme(ThemeCommand),
    /// Export board data
    Export(ExportArgs),
    /// Import board data
    Import(ImportArgs),
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// Board commands
#[derive(Args)]
pub struct BoardCommand {
    #[command(subcommand)]
    pub action: BoardAction,
}

#[derive(Subcommand)]
pub enum BoardAction {
    /// Create a new board and select it
    Create {
        #[arg(long, alias = "name")]
        title: String,
        /// Column name, in order; repeat for more columns
        #[arg(long = "column", value_name = "NAME")]
        columns: Vec<String>,
    },
    /// List all boards
    List,
    /// Get a specific board
    Get {
        #[arg(long)]
        id: Uuid,
    },
    /// Rename a board or replace its columns
    Update(BoardUpdateArgs),
    /// Delete a board and its tasks
    Delete {
        #[arg(long)]
        id: Uuid,
    },
    /// Select the board shown by default
    Select {
        #[arg(long)]
        id: Uuid,
    },
    /// Show a board with its columns and tasks
    Show {
        /// Board to show; the selected board when omitted
        #[arg(long)]
        id: Option<Uuid>,
    },
}

#[derive(Args)]
pub struct BoardUpdateArgs {
    #[arg(long)]
    pub id: Uuid,
    #[arg(long, alias = "name")]
    pub title: Option<String>,
    /// New column list. `NAME` adds a column, `ID=NAME` keeps (and renames)
    /// an existing one; columns not listed are removed with their tasks.
    #[arg(long = "column", value_name = "[ID=]NAME")]
    pub columns: Vec<String>,
    /// Remove every column
    #[arg(long, conflicts_with = "columns")]
    pub clear_columns: bool,
}

// Status (column) commands
#[derive(Args)]
pub struct StatusCommand {
    #[command(subcommand)]
    pub action: StatusAction,
}

#[derive(Subcommand)]
pub enum StatusAction {
    /// Add a column to a board
    Add {
        #[arg(long)]
        board_id: Uuid,
        #[arg(long)]
        name: String,
        /// Zero-based slot; appended when omitted
        #[arg(long)]
        position: Option<usize>,
    },
    /// Rename a column
    Rename {
        #[arg(long)]
        board_id: Uuid,
        #[arg(long)]
        id: Uuid,
        #[arg(long)]
        name: String,
    },
    /// Remove a column and its tasks
    Remove {
        #[arg(long)]
        board_id: Uuid,
        #[arg(long)]
        id: Uuid,
    },
    /// Move a column to another slot
    Reorder {
        #[arg(long)]
        board_id: Uuid,
        #[arg(long)]
        id: Uuid,
        #[arg(long)]
        index: usize,
    },
}

// Task commands
#[derive(Args)]
pub struct TaskCommand {
    #[command(subcommand)]
    pub action: TaskAction,
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a task at the end of a column
    Create(TaskCreateArgs),
    /// List tasks in board and column order
    List {
        #[arg(long)]
        board_id: Option<Uuid>,
        #[arg(long)]
        status_id: Option<Uuid>,
    },
    /// Get a specific task
    Get {
        #[arg(long)]
        id: Uuid,
    },
    /// Update a task
    Update(TaskUpdateArgs),
    /// Drop a task into a column at an index
    Move {
        #[arg(long)]
        id: Uuid,
        #[arg(long)]
        status_id: Uuid,
        /// Zero-based index in the column; appended when omitted
        #[arg(long)]
        index: Option<usize>,
    },
    /// Delete a task
    Delete {
        #[arg(long)]
        id: Uuid,
    },
}

#[derive(Args)]
pub struct TaskCreateArgs {
    /// Column the task starts in
    #[arg(long)]
    pub status_id: Uuid,
    /// Board owning the column; looked up from the column when omitted
    #[arg(long)]
    pub board_id: Option<Uuid>,
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub description: Option<String>,
    /// Subtask title; repeat for more subtasks
    #[arg(long = "subtask", value_name = "TITLE")]
    pub subtasks: Vec<String>,
}

#[derive(Args)]
pub struct TaskUpdateArgs {
    #[arg(long)]
    pub id: Uuid,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub clear_description: bool,
    /// Move to the end of this column
    #[arg(long)]
    pub status_id: Option<Uuid>,
}

// Subtask commands
#[derive(Args)]
pub struct SubtaskCommand {
    #[command(subcommand)]
    pub action: SubtaskAction,
}

#[derive(Subcommand)]
pub enum SubtaskAction {
    /// Add a subtask to a task
    Add {
        #[arg(long)]
        task_id: Uuid,
        #[arg(long)]
        title: String,
    },
    /// Rename a subtask
    Rename {
        #[arg(long)]
        task_id: Uuid,
        #[arg(long)]
        id: Uuid,
        #[arg(long)]
        title: String,
    },
    /// Flip a subtask between done and open
    Toggle {
        #[arg(long)]
        task_id: Uuid,
        #[arg(long)]
        id: Uuid,
    },
    /// Mark a subtask done or open
    Set {
        #[arg(long)]
        task_id: Uuid,
        #[arg(long)]
        id: Uuid,
        #[arg(long, action = ArgAction::Set)]
        completed: bool,
    },
    /// Remove a subtask
    Remove {
        #[arg(long)]
        task_id: Uuid,
        #[arg(long)]
        id: Uuid,
    },
}

// Theme commands
#[derive(Args)]
pub struct ThemeCommand {
    #[command(subcommand)]
    pub action: ThemeAction,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ThemeMode {
    Light,
    Dark,
}

#[derive(Subcommand)]
pub enum ThemeAction {
    /// Show the current theme
    Get,
    /// Choose a theme
    Set {
        #[arg(value_enum)]
        mode: ThemeMode,
    },
    /// Switch between light and dark
    Toggle,
}

// Export/Import commands
#[derive(Args)]
pub struct ExportArgs {
    /// Export only this board
    #[arg(long)]
    pub board_id: Option<Uuid>,
}

#[derive(Args)]
pub struct ImportArgs {
    /// Export file to read boards from
    #[arg(long = "input", value_name = "FILE")]
    pub input: PathBuf,
}
