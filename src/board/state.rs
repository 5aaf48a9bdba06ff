//! Authoritative board state.
//!
//! `BoardState` owns the ordered column and task collections plus the
//! snapshot of whatever entity is being dragged. Every mutation is a plain
//! `&mut self` call that completes before returning, so callers never see a
//! half-applied change. Unknown ids are silently ignored: state before equals
//! state after.

use std::collections::HashSet;

use serde::Serialize;

use super::id::Id;
use super::model::{ActiveEntity, Column, EntityKind, Task};
use crate::{klog_debug, Error, Result};

/// Move the element at `from` to `to`, shifting the elements in between.
///
/// Splice semantics: remove at `from`, insert at `to`. Returns false (and
/// leaves `items` untouched) when the indices are equal or out of range.
pub fn array_move<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from == to || from >= items.len() || to >= items.len() {
        return false;
    }
    let item = items.remove(from);
    items.insert(to, item);
    true
}

/// The two reorderable collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Columns,
    Tasks,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BoardState {
    columns: Vec<Column>,
    tasks: Vec<Task>,
    #[serde(skip)]
    active: Option<ActiveEntity>,
}

impl BoardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from existing collections. The drag snapshot starts empty.
    pub fn from_parts(columns: Vec<Column>, tasks: Vec<Task>) -> Self {
        Self {
            columns,
            tasks,
            active: None,
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    // ─── Columns ────────────────────────────────────────────────────────────

    pub fn create_column(&mut self) -> Column {
        let column = Column::new(format!("Column {}", self.columns.len() + 1));
        klog_debug!("BoardState::create_column id={}", column.id.short());
        self.columns.push(column.clone());
        column
    }

    /// Remove a column and every task that lives in it.
    pub fn delete_column(&mut self, id: Id) {
        let Some(index) = self.column_index(id) else {
            return;
        };
        self.columns.remove(index);
        let before = self.tasks.len();
        self.tasks.retain(|task| task.column_id != id);
        klog_debug!(
            "BoardState::delete_column id={} cascaded_tasks={}",
            id.short(),
            before - self.tasks.len()
        );
    }

    pub fn update_column(&mut self, id: Id, title: impl Into<String>) {
        if let Some(column) = self.columns.iter_mut().find(|c| c.id == id) {
            column.title = title.into();
        }
    }

    // ─── Tasks ──────────────────────────────────────────────────────────────

    /// Append a task to `column_id`. The column is not checked for existence.
    pub fn create_task(&mut self, column_id: Id) -> Task {
        let task = Task::new(format!("Task {}", self.tasks.len() + 1), column_id);
        klog_debug!(
            "BoardState::create_task id={} column={}",
            task.id.short(),
            column_id.short()
        );
        self.tasks.push(task.clone());
        task
    }

    pub fn delete_task(&mut self, id: Id) {
        if let Some(index) = self.task_index(id) {
            self.tasks.remove(index);
            klog_debug!("BoardState::delete_task id={}", id.short());
        }
    }

    pub fn update_task(&mut self, id: Id, content: impl Into<String>) {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            task.content = content.into();
        }
    }

    /// Replace the task at `index` with `task`. Out-of-range indices are ignored.
    pub(crate) fn replace_task(&mut self, index: usize, task: Task) {
        if let Some(slot) = self.tasks.get_mut(index) {
            *slot = task;
        }
    }

    // ─── Ordering ───────────────────────────────────────────────────────────

    /// Move one element of `collection` from `from` to `to`.
    pub fn reorder(&mut self, collection: Collection, from: usize, to: usize) -> bool {
        match collection {
            Collection::Columns => array_move(&mut self.columns, from, to),
            Collection::Tasks => array_move(&mut self.tasks, from, to),
        }
    }

    // ─── Lookups ────────────────────────────────────────────────────────────

    pub fn column(&self, id: Id) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == id)
    }

    pub fn task(&self, id: Id) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn column_index(&self, id: Id) -> Option<usize> {
        self.columns.iter().position(|c| c.id == id)
    }

    pub fn task_index(&self, id: Id) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    /// Whether `id` names a column, a task, or nothing on this board.
    pub fn resolve(&self, id: Id) -> Option<EntityKind> {
        if self.column(id).is_some() {
            Some(EntityKind::Column)
        } else if self.task(id).is_some() {
            Some(EntityKind::Task)
        } else {
            None
        }
    }

    /// Tasks of one column in visible (global sequence) order.
    pub fn tasks_in(&self, column_id: Id) -> impl Iterator<Item = &Task> + '_ {
        self.tasks.iter().filter(move |t| t.column_id == column_id)
    }

    pub fn task_count(&self, column_id: Id) -> usize {
        self.tasks_in(column_id).count()
    }

    // ─── Drag snapshot ──────────────────────────────────────────────────────

    pub fn active(&self) -> Option<&ActiveEntity> {
        self.active.as_ref()
    }

    pub fn active_column(&self) -> Option<&Column> {
        match &self.active {
            Some(ActiveEntity::Column(column)) => Some(column),
            _ => None,
        }
    }

    pub fn active_task(&self) -> Option<&Task> {
        match &self.active {
            Some(ActiveEntity::Task(task)) => Some(task),
            _ => None,
        }
    }

    pub(crate) fn set_active(&mut self, entity: ActiveEntity) {
        self.active = Some(entity);
    }

    pub(crate) fn clear_active(&mut self) {
        self.active = None;
    }

    /// Verify id uniqueness and that every task points at a live column.
    pub fn check_invariants(&self) -> Result<()> {
        let mut seen = HashSet::new();
        let ids = self
            .columns
            .iter()
            .map(|c| c.id)
            .chain(self.tasks.iter().map(|t| t.id));
        for id in ids {
            if !seen.insert(id) {
                return Err(Error::DuplicateId(id));
            }
        }
        for task in &self.tasks {
            if self.column(task.column_id).is_none() {
                return Err(Error::OrphanTask {
                    task: task.id,
                    column: task.column_id,
                });
            }
        }
        Ok(())
    }
}
