use crate::cli::{ExportArgs, ImportArgs};
use crate::context::CliContext;
use crate::output;
use taskboard_domain::TaskboardOperations;

pub async fn handle_export(ctx: &CliContext, args: ExportArgs) -> anyhow::Result<()> {
    let json = ctx.export_board(args.board_id)?;
    println!("{}", json);
    Ok(())
}

pub async fn handle_import(ctx: &mut CliContext, args: ImportArgs) -> anyhow::Result<()> {
    let data = tokio::fs::read_to_string(&args.input)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", args.input.display(), e))?;
    let boards = ctx.import_boards(&data)?;
    output::output_list(boards)
}
