use crate::cli::{TaskAction, TaskCreateArgs, TaskUpdateArgs};
use crate::context::CliContext;
use crate::output;
use taskboard_domain::{FieldUpdate, NewTask, Task, TaskFilter, TaskUpdate, TaskboardOperations};

pub async fn handle(ctx: &mut CliContext, action: TaskAction) -> anyhow::Result<()> {
    match action {
        TaskAction::Create(args) => {
            let task = handle_create(ctx, args)?;
            output::output_success(&task)?;
        }
        TaskAction::List {
            board_id,
            status_id,
        } => {
            let tasks = ctx.list_tasks(TaskFilter {
                board_id,
                status_id,
            })?;
            output::output_list(tasks)?;
        }
        TaskAction::Get { id } => match ctx.get_task(id)? {
            Some(task) => output::output_success(&task)?,
            None => output::output_error(&format!("Task not found: {}", id)),
        },
        TaskAction::Update(args) => {
            let task = handle_update(ctx, args)?;
            output::output_success(&task)?;
        }
        TaskAction::Move {
            id,
            status_id,
            index,
        } => {
            let task = ctx.move_task(id, status_id, index)?;
            output::output_success(&task)?;
        }
        TaskAction::Delete { id } => {
            ctx.delete_task(id)?;
            output::output_success(serde_json::json!({"deleted": id.to_string()}))?;
        }
    }
    Ok(())
}

fn handle_create(ctx: &mut CliContext, args: TaskCreateArgs) -> anyhow::Result<Task> {
    let board_id = match args.board_id {
        Some(id) => id,
        None => ctx
            .board_of_status(args.status_id)
            .ok_or_else(|| anyhow::anyhow!("Column not found: {}", args.status_id))?,
    };

    let task = ctx.create_task(NewTask {
        board_id,
        status_id: args.status_id,
        title: args.title,
        description: args.description,
        subtasks: args.subtasks,
    })?;
    Ok(task)
}

fn handle_update(ctx: &mut CliContext, args: TaskUpdateArgs) -> anyhow::Result<Task> {
    let updates = TaskUpdate {
        title: args.title,
        description: FieldUpdate::from_flags(args.description, args.clear_description),
        status_id: args.status_id,
    };
    Ok(ctx.update_task(args.id, updates)?)
}
