//! Task ordering rules.
//!
//! Pure functions behind drag-and-drop: where a dropped task lands, and how
//! the columns it left and entered are re-sequenced. Every function keeps
//! task positions inside a column at exactly `0..n`.

use crate::{StatusId, Task, TaskId};
use std::collections::HashSet;

/// Tasks of one column, in display order.
pub fn column_tasks(tasks: &[Task], status_id: StatusId) -> Vec<&Task> {
    let mut column: Vec<_> = tasks.iter().filter(|t| t.status_id == status_id).collect();
    column.sort_by_key(|t| t.position);
    column
}

/// Position a task appended to the column would get.
pub fn next_position(tasks: &[Task], status_id: StatusId) -> i32 {
    tasks.iter().filter(|t| t.status_id == status_id).count() as i32
}

/// Re-sequence one column to `0..n`. Ties keep their slice order.
pub fn compact_positions(tasks: &mut [Task], status_id: StatusId) {
    let mut indices: Vec<usize> = tasks
        .iter()
        .enumerate()
        .filter(|(_, t)| t.status_id == status_id)
        .map(|(i, _)| i)
        .collect();

    indices.sort_by_key(|&i| tasks[i].position);

    for (new_pos, &idx) in indices.iter().enumerate() {
        tasks[idx].position = new_pos as i32;
    }
}

/// Re-sequence every column. Used when state is loaded from disk, where
/// legacy data has no positions and relies on stored order.
pub fn normalize_positions(tasks: &mut [Task]) {
    let mut seen = HashSet::new();
    let status_ids: Vec<StatusId> = tasks
        .iter()
        .map(|t| t.status_id)
        .filter(|id| seen.insert(*id))
        .collect();

    for status_id in status_ids {
        compact_positions(tasks, status_id);
    }
}

/// Move a task into `target_status_id` at `index` (clamped; `None` appends).
///
/// Moving inside the same column reorders it. Returns the landing position,
/// or `None` when the task does not exist.
pub fn move_task(
    tasks: &mut [Task],
    task_id: TaskId,
    target_status_id: StatusId,
    index: Option<usize>,
) -> Option<i32> {
    let task_idx = tasks.iter().position(|t| t.id == task_id)?;
    let source_status_id = tasks[task_idx].status_id;

    let mut order: Vec<TaskId> = column_tasks(tasks, target_status_id)
        .into_iter()
        .filter(|t| t.id != task_id)
        .map(|t| t.id)
        .collect();

    let landing = index.unwrap_or(order.len()).min(order.len());
    order.insert(landing, task_id);

    tasks[task_idx].move_to_status(target_status_id, landing as i32);
    for (pos, id) in order.iter().enumerate() {
        if let Some(task) = tasks.iter_mut().find(|t| t.id == *id) {
            task.position = pos as i32;
        }
    }

    if source_status_id != target_status_id {
        compact_positions(tasks, source_status_id);
    }

    Some(landing as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn task(status_id: StatusId, title: &str, position: i32) -> Task {
        Task::new(Uuid::nil(), status_id, title.to_string(), position)
    }

    fn titles(tasks: &[Task], status_id: StatusId) -> Vec<String> {
        column_tasks(tasks, status_id)
            .into_iter()
            .map(|t| t.title.clone())
            .collect()
    }

    fn positions(tasks: &[Task], status_id: StatusId) -> Vec<i32> {
        column_tasks(tasks, status_id)
            .into_iter()
            .map(|t| t.position)
            .collect()
    }

    #[test]
    fn column_tasks_sorted_by_position() {
        let todo = Uuid::new_v4();
        let tasks = vec![task(todo, "B", 1), task(todo, "A", 0), task(Uuid::new_v4(), "X", 0)];
        assert_eq!(titles(&tasks, todo), vec!["A", "B"]);
    }

    #[test]
    fn next_position_counts_column() {
        let todo = Uuid::new_v4();
        let tasks = vec![task(todo, "A", 0), task(todo, "B", 1)];
        assert_eq!(next_position(&tasks, todo), 2);
        assert_eq!(next_position(&tasks, Uuid::new_v4()), 0);
    }

    #[test]
    fn move_across_columns_inserts_at_index() {
        let todo = Uuid::new_v4();
        let doing = Uuid::new_v4();
        let mut tasks = vec![
            task(todo, "A", 0),
            task(todo, "B", 1),
            task(doing, "X", 0),
            task(doing, "Y", 1),
        ];
        let a = tasks[0].id;

        let landed = move_task(&mut tasks, a, doing, Some(1)).unwrap();

        assert_eq!(landed, 1);
        assert_eq!(titles(&tasks, doing), vec!["X", "A", "Y"]);
        assert_eq!(positions(&tasks, doing), vec![0, 1, 2]);
        assert_eq!(titles(&tasks, todo), vec!["B"]);
        assert_eq!(positions(&tasks, todo), vec![0]);
    }

    #[test]
    fn move_without_index_appends() {
        let todo = Uuid::new_v4();
        let done = Uuid::new_v4();
        let mut tasks = vec![task(todo, "A", 0), task(done, "Z", 0)];
        let a = tasks[0].id;

        assert_eq!(move_task(&mut tasks, a, done, None), Some(1));
        assert_eq!(titles(&tasks, done), vec!["Z", "A"]);
    }

    #[test]
    fn move_index_is_clamped() {
        let todo = Uuid::new_v4();
        let done = Uuid::new_v4();
        let mut tasks = vec![task(todo, "A", 0), task(done, "Z", 0)];
        let a = tasks[0].id;

        assert_eq!(move_task(&mut tasks, a, done, Some(42)), Some(1));
    }

    #[test]
    fn move_within_column_reorders() {
        let todo = Uuid::new_v4();
        let mut tasks = vec![task(todo, "A", 0), task(todo, "B", 1), task(todo, "C", 2)];
        let c = tasks[2].id;

        assert_eq!(move_task(&mut tasks, c, todo, Some(0)), Some(0));
        assert_eq!(titles(&tasks, todo), vec!["C", "A", "B"]);
        assert_eq!(positions(&tasks, todo), vec![0, 1, 2]);

        let a = tasks.iter().find(|t| t.title == "A").unwrap().id;
        move_task(&mut tasks, a, todo, None);
        assert_eq!(titles(&tasks, todo), vec!["C", "B", "A"]);
    }

    #[test]
    fn move_unknown_task_returns_none() {
        let todo = Uuid::new_v4();
        let mut tasks = vec![task(todo, "A", 0)];
        assert_eq!(move_task(&mut tasks, Uuid::new_v4(), todo, None), None);
        assert_eq!(tasks[0].position, 0);
    }

    #[test]
    fn compact_only_affects_target_column() {
        let todo = Uuid::new_v4();
        let done = Uuid::new_v4();
        let mut tasks = vec![task(todo, "A", 3), task(todo, "B", 7), task(done, "Z", 5)];

        compact_positions(&mut tasks, todo);

        assert_eq!(positions(&tasks, todo), vec![0, 1]);
        assert_eq!(tasks[2].position, 5);
    }

    #[test]
    fn normalize_keeps_stored_order_for_ties() {
        let todo = Uuid::new_v4();
        let done = Uuid::new_v4();
        let mut tasks = vec![
            task(todo, "First", 0),
            task(done, "Only", 0),
            task(todo, "Second", 0),
            task(todo, "Third", 0),
        ];

        normalize_positions(&mut tasks);

        assert_eq!(titles(&tasks, todo), vec!["First", "Second", "Third"]);
        assert_eq!(positions(&tasks, todo), vec![0, 1, 2]);
        assert_eq!(positions(&tasks, done), vec![0]);
    }
}
