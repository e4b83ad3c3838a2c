use crate::cli::{BoardAction, BoardUpdateArgs};
use crate::context::CliContext;
use crate::output;
use taskboard_domain::{board_view, Board, BoardUpdate, StatusDraft, TaskboardOperations};
use uuid::Uuid;

pub async fn handle(ctx: &mut CliContext, action: BoardAction) -> anyhow::Result<()> {
    match action {
        BoardAction::Create { title, columns } => {
            let columns = if columns.is_empty() {
                ctx.default_statuses()
            } else {
                columns
            };
            let board = ctx.create_board(title, columns)?;
            output::output_success(&board)?;
        }
        BoardAction::List => {
            let boards = ctx.list_boards()?;
            output::output_list(boards)?;
        }
        BoardAction::Get { id } => match ctx.get_board(id)? {
            Some(board) => output::output_success(&board)?,
            None => output::output_error(&format!("Board not found: {}", id)),
        },
        BoardAction::Update(args) => {
            let board = handle_update(ctx, args)?;
            output::output_success(&board)?;
        }
        BoardAction::Delete { id } => {
            ctx.delete_board(id)?;
            output::output_success(serde_json::json!({"deleted": id.to_string()}))?;
        }
        BoardAction::Select { id } => {
            let board = ctx.set_active_board(id)?;
            output::output_success(&board)?;
        }
        BoardAction::Show { id } => match board_view(ctx.state(), id) {
            Some(view) => output::output_success(&view)?,
            None => output::output_error(&format!(
                "Board not found: {}",
                id.map(|id| id.to_string()).unwrap_or_default()
            )),
        },
    }
    Ok(())
}

fn handle_update(ctx: &mut CliContext, args: BoardUpdateArgs) -> anyhow::Result<Board> {
    let statuses = if args.clear_columns {
        Some(Vec::new())
    } else if args.columns.is_empty() {
        None
    } else {
        Some(args.columns.iter().map(|spec| parse_draft(spec)).collect())
    };

    let updates = BoardUpdate {
        title: args.title,
        statuses,
    };
    Ok(ctx.update_board(args.id, updates)?)
}

/// `ID=NAME` keeps an existing column; anything else names a new one.
fn parse_draft(spec: &str) -> StatusDraft {
    if let Some((id, name)) = spec.split_once('=') {
        if let Ok(id) = Uuid::parse_str(id.trim()) {
            return StatusDraft::existing(id, name);
        }
    }
    StatusDraft::new(spec)
}
