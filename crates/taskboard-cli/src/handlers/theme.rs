use crate::cli::{ThemeAction, ThemeMode};
use crate::context::CliContext;
use crate::output;
use taskboard_domain::TaskboardOperations;

fn theme_json(dark: bool) -> serde_json::Value {
    serde_json::json!({
        "theme": if dark { "dark" } else { "light" },
        "is_dark_theme_active": dark,
    })
}

pub async fn handle(ctx: &mut CliContext, action: ThemeAction) -> anyhow::Result<()> {
    let dark = match action {
        ThemeAction::Get => ctx.is_dark_theme_active(),
        ThemeAction::Set { mode } => ctx.set_dark_theme(matches!(mode, ThemeMode::Dark))?,
        ThemeAction::Toggle => ctx.toggle_theme()?,
    };
    output::output_success(theme_json(dark))
}
