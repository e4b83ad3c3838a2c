mod cli;
mod context;
mod handlers;
mod output;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use context::CliContext;
use std::process::ExitCode;
use taskboard_core::AppConfig;

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = init_tracing() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => output::output_error(&format!("{:#}", e)),
    }
}

fn init_tracing() -> anyhow::Result<()> {
    if let Ok(log_path) = std::env::var("TASKBOARD_DEBUG_LOG") {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(tracing::Level::WARN)
            .init();
    }
    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    if let Commands::Completions { shell } = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "taskboard", &mut std::io::stdout());
        return Ok(());
    }

    let config = match std::env::var_os("TASKBOARD_CONFIG") {
        Some(path) => AppConfig::load_from(std::path::Path::new(&path)),
        None => AppConfig::load(),
    };
    let data_file = cli
        .file
        .or_else(|| config.effective_data_file())
        .ok_or_else(|| anyhow::anyhow!("No data file: pass --file or set TASKBOARD_FILE"))?;

    let mut ctx = CliContext::load(data_file, config).await?;
    tracing::debug!("Using data file {}", ctx.data_file().display());

    let result = match cli.command {
        Commands::Board(board_cmd) => handlers::board::handle(&mut ctx, board_cmd.action).await,
        Commands::Status(status_cmd) => {
            handlers::status::handle(&mut ctx, status_cmd.action).await
        }
        Commands::Task(task_cmd) => handlers::task::handle(&mut ctx, task_cmd.action).await,
        Commands::Subtask(subtask_cmd) => {
            handlers::subtask::handle(&mut ctx, subtask_cmd.action).await
        }
        Commands::Theme(theme_cmd) => handlers::theme::handle(&mut ctx, theme_cmd.action).await,
        Commands::Export(args) => handlers::export::handle_export(&ctx, args).await,
        Commands::Import(args) => handlers::export::handle_import(&mut ctx, args).await,
        Commands::Completions { .. } => Ok(()),
    };

    // Flush queued saves even when the action failed
    let saved = ctx.finish().await;
    result?;
    saved
}
