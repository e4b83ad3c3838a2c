use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::status::{Status, StatusId};

pub type BoardId = Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub id: BoardId,
    pub title: String,
    #[serde(default)]
    pub statuses: Vec<Status>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

/// Partial update of a board.
///
/// `statuses` replaces the whole column list: drafts carrying an id keep that
/// column, drafts without one create a new column, and columns left out are
/// removed.
#[derive(Debug, Clone, Default)]
pub struct BoardUpdate {
    pub title: Option<String>,
    pub statuses: Option<Vec<StatusDraft>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusDraft {
    pub id: Option<StatusId>,
    pub name: String,
}

impl StatusDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }

    pub fn existing(id: StatusId, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
        }
    }
}

impl Board {
    pub fn new(title: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            statuses: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_statuses(title: String, status_names: Vec<String>) -> Self {
        let mut board = Self::new(title);
        board.statuses = status_names
            .into_iter()
            .map(|name| Status::new(board.id, name))
            .collect();
        board
    }

    pub fn update_title(&mut self, title: String) {
        self.title = title;
        self.updated_at = Utc::now();
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn status(&self, id: StatusId) -> Option<&Status> {
        self.statuses.iter().find(|s| s.id == id)
    }

    pub fn status_mut(&mut self, id: StatusId) -> Option<&mut Status> {
        self.statuses.iter_mut().find(|s| s.id == id)
    }

    pub fn status_index(&self, id: StatusId) -> Option<usize> {
        self.statuses.iter().position(|s| s.id == id)
    }

    pub fn has_status(&self, id: StatusId) -> bool {
        self.status_index(id).is_some()
    }

    /// Insert a column at `position`, clamped to the end. Returns the index used.
    pub fn insert_status(&mut self, status: Status, position: Option<usize>) -> usize {
        let index = position
            .unwrap_or(self.statuses.len())
            .min(self.statuses.len());
        self.statuses.insert(index, status);
        self.updated_at = Utc::now();
        index
    }

    pub fn remove_status(&mut self, id: StatusId) -> Option<Status> {
        let index = self.status_index(id)?;
        self.updated_at = Utc::now();
        Some(self.statuses.remove(index))
    }

    /// Move a column to `index`, clamped to the last slot. Returns the index used.
    pub fn move_status(&mut self, id: StatusId, index: usize) -> Option<usize> {
        let current = self.status_index(id)?;
        let status = self.statuses.remove(current);
        let target = index.min(self.statuses.len());
        self.statuses.insert(target, status);
        self.updated_at = Utc::now();
        Some(target)
    }
}
