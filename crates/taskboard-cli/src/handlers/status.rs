use crate::cli::StatusAction;
use crate::context::CliContext;
use crate::output;
use taskboard_domain::TaskboardOperations;

pub async fn handle(ctx: &mut CliContext, action: StatusAction) -> anyhow::Result<()> {
    match action {
        StatusAction::Add {
            board_id,
            name,
            position,
        } => {
            let status = ctx.add_status(board_id, name, position)?;
            output::output_success(&status)?;
        }
        StatusAction::Rename { board_id, id, name } => {
            let status = ctx.rename_status(board_id, id, name)?;
            output::output_success(&status)?;
        }
        StatusAction::Remove { board_id, id } => {
            ctx.remove_status(board_id, id)?;
            output::output_success(serde_json::json!({"deleted": id.to_string()}))?;
        }
        StatusAction::Reorder {
            board_id,
            id,
            index,
        } => {
            let board = ctx.reorder_status(board_id, id, index)?;
            output::output_success(&board)?;
        }
    }
    Ok(())
}
