use super::{Command, CommandContext};
use taskboard_core::TaskboardResult;

pub struct SetDarkTheme {
    pub enabled: bool,
}

impl Command for SetDarkTheme {
    fn execute(&self, context: &mut CommandContext) -> TaskboardResult<()> {
        *context.is_dark_theme_active = self.enabled;
        Ok(())
    }

    fn description(&self) -> String {
        if self.enabled {
            "Switch to dark theme".to_string()
        } else {
            "Switch to light theme".to_string()
        }
    }
}

pub struct ToggleTheme;

impl Command for ToggleTheme {
    fn execute(&self, context: &mut CommandContext) -> TaskboardResult<()> {
        *context.is_dark_theme_active = !*context.is_dark_theme_active;
        Ok(())
    }

    fn description(&self) -> String {
        "Toggle theme".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Snapshot;

    #[test]
    fn toggle_flips_theme() {
        let mut snapshot = Snapshot::new();
        ToggleTheme.execute(&mut snapshot.command_context()).unwrap();
        assert!(snapshot.is_dark_theme_active);
        ToggleTheme.execute(&mut snapshot.command_context()).unwrap();
        assert!(!snapshot.is_dark_theme_active);
    }

    #[test]
    fn set_dark_theme() {
        let mut snapshot = Snapshot::new();
        SetDarkTheme { enabled: true }
            .execute(&mut snapshot.command_context())
            .unwrap();
        assert!(snapshot.is_dark_theme_active);
    }
}
