//! Column and task records.

use serde::{Deserialize, Serialize};

use super::id::Id;

/// A board column. Tasks refer to it through `Task::column_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: Id,
    pub title: String,
}

impl Column {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Id::new(),
            title: title.into(),
        }
    }
}

/// A card living in exactly one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: Id,
    pub content: String,
    #[serde(rename = "columnId")]
    pub column_id: Id,
}

impl Task {
    pub fn new(content: impl Into<String>, column_id: Id) -> Self {
        Self {
            id: Id::new(),
            content: content.into(),
            column_id,
        }
    }

    /// Copy of this task moved into another column.
    pub fn in_column(&self, column_id: Id) -> Self {
        Self {
            column_id,
            ..self.clone()
        }
    }
}

/// Which kind of entity an id names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Column,
    Task,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Column => write!(f, "column"),
            EntityKind::Task => write!(f, "task"),
        }
    }
}

/// Snapshot of the entity currently being dragged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveEntity {
    Column(Column),
    Task(Task),
}

impl ActiveEntity {
    pub fn id(&self) -> Id {
        match self {
            ActiveEntity::Column(column) => column.id,
            ActiveEntity::Task(task) => task.id,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            ActiveEntity::Column(_) => EntityKind::Column,
            ActiveEntity::Task(_) => EntityKind::Task,
        }
    }
}
