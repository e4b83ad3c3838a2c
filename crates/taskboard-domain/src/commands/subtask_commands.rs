use super::{Command, CommandContext};
use crate::{Subtask, SubtaskId, TaskId};
use taskboard_core::{TaskboardError, TaskboardResult};

fn subtask_mut<'a>(
    context: &'a mut CommandContext,
    task_id: TaskId,
    subtask_id: SubtaskId,
) -> TaskboardResult<&'a mut Subtask> {
    context
        .task_mut(task_id)?
        .subtask_mut(subtask_id)
        .ok_or_else(|| TaskboardError::not_found("Subtask", subtask_id))
}

pub struct AddSubtask {
    pub subtask: Subtask,
}

impl Command for AddSubtask {
    fn execute(&self, context: &mut CommandContext) -> TaskboardResult<()> {
        context
            .task_mut(self.subtask.task_id)?
            .push_subtask(self.subtask.clone());
        Ok(())
    }

    fn description(&self) -> String {
        format!("Add subtask: '{}'", self.subtask.title)
    }
}

pub struct RenameSubtask {
    pub task_id: TaskId,
    pub subtask_id: SubtaskId,
    pub title: String,
}

impl Command for RenameSubtask {
    fn execute(&self, context: &mut CommandContext) -> TaskboardResult<()> {
        subtask_mut(context, self.task_id, self.subtask_id)?.title = self.title.clone();
        context.task_mut(self.task_id)?.updated_at = chrono::Utc::now();
        Ok(())
    }

    fn description(&self) -> String {
        format!("Rename subtask {} to '{}'", self.subtask_id, self.title)
    }
}

pub struct SetSubtaskCompleted {
    pub task_id: TaskId,
    pub subtask_id: SubtaskId,
    pub completed: bool,
}

impl Command for SetSubtaskCompleted {
    fn execute(&self, context: &mut CommandContext) -> TaskboardResult<()> {
        subtask_mut(context, self.task_id, self.subtask_id)?.is_completed = self.completed;
        context.task_mut(self.task_id)?.updated_at = chrono::Utc::now();
        Ok(())
    }

    fn description(&self) -> String {
        let state = if self.completed { "done" } else { "open" };
        format!("Mark subtask {} {}", self.subtask_id, state)
    }
}

/// Flip a subtask's completion, as clicking its checkbox does
pub struct ToggleSubtask {
    pub task_id: TaskId,
    pub subtask_id: SubtaskId,
}

impl Command for ToggleSubtask {
    fn execute(&self, context: &mut CommandContext) -> TaskboardResult<()> {
        let subtask = subtask_mut(context, self.task_id, self.subtask_id)?;
        subtask.is_completed = !subtask.is_completed;
        context.task_mut(self.task_id)?.updated_at = chrono::Utc::now();
        Ok(())
    }

    fn description(&self) -> String {
        format!("Toggle subtask {}", self.subtask_id)
    }
}

pub struct RemoveSubtask {
    pub task_id: TaskId,
    pub subtask_id: SubtaskId,
}

impl Command for RemoveSubtask {
    fn execute(&self, context: &mut CommandContext) -> TaskboardResult<()> {
        context
            .task_mut(self.task_id)?
            .remove_subtask(self.subtask_id)
            .ok_or_else(|| TaskboardError::not_found("Subtask", self.subtask_id))?;
        Ok(())
    }

    fn description(&self) -> String {
        format!("Remove subtask {}", self.subtask_id)
    }
}
