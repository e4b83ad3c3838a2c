use crate::cli::SubtaskAction;
use crate::context::CliContext;
use crate::output;
use taskboard_domain::TaskboardOperations;

pub async fn handle(ctx: &mut CliContext, action: SubtaskAction) -> anyhow::Result<()> {
    match action {
        SubtaskAction::Add { task_id, title } => {
            let subtask = ctx.add_subtask(task_id, title)?;
            output::output_success(&subtask)?;
        }
        SubtaskAction::Rename { task_id, id, title } => {
            let subtask = ctx.rename_subtask(task_id, id, title)?;
            output::output_success(&subtask)?;
        }
        SubtaskAction::Toggle { task_id, id } => {
            let subtask = ctx.toggle_subtask(task_id, id)?;
            output::output_success(&subtask)?;
        }
        SubtaskAction::Set {
            task_id,
            id,
            completed,
        } => {
            let subtask = ctx.set_subtask_completed(task_id, id, completed)?;
            output::output_success(&subtask)?;
        }
        SubtaskAction::Remove { task_id, id } => {
            ctx.remove_subtask(task_id, id)?;
            output::output_success(serde_json::json!({"deleted": id.to_string()}))?;
        }
    }
    Ok(())
}
