//! Drag session state machine.
//!
//! One gesture moves the controller `Idle -> DraggingColumn | DraggingTask -> Idle`.
//! Task drags are applied live on every `Over` event so the card follows the
//! pointer across columns; column drags are applied once, on `End`.

use crate::board::{ActiveEntity, BoardState, Collection, EntityKind, Id};
use crate::{klog_debug, klog_trace, klog_warn, Error, Result};

/// What the user picked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragPayload {
    Column(Id),
    Task(Id),
}

impl DragPayload {
    pub fn id(&self) -> Id {
        match self {
            DragPayload::Column(id) | DragPayload::Task(id) => *id,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            DragPayload::Column(_) => EntityKind::Column,
            DragPayload::Task(_) => EntityKind::Task,
        }
    }
}

/// Drag lifecycle input. `over` is `None` when the pointer is not above any drop target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEvent {
    Start(DragPayload),
    Over { active: Id, over: Option<Id> },
    End { active: Id, over: Option<Id> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    DraggingColumn(Id),
    DraggingTask(Id),
}

impl DragPhase {
    pub fn active_id(&self) -> Option<Id> {
        match self {
            DragPhase::Idle => None,
            DragPhase::DraggingColumn(id) | DragPhase::DraggingTask(id) => Some(*id),
        }
    }
}

/// Result of feeding one event to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// Nothing changed.
    Ignored,
    Started(DragPayload),
    /// Task took the over-task's slot (and column).
    TaskMoved {
        task: Id,
        column: Id,
        from: usize,
        to: usize,
    },
    /// Task changed column without changing its index.
    TaskReassigned { task: Id, column: Id },
    ColumnMoved { column: Id, from: usize, to: usize },
    /// Session closed without a reorder.
    Ended,
    /// Session closed and the dragged task was removed because its column is gone.
    TaskDropped { task: Id },
}

impl DragOutcome {
    /// Whether the board (collections or drag snapshot) changed.
    pub fn changed(&self) -> bool {
        !matches!(self, DragOutcome::Ignored)
    }
}

#[derive(Debug, Default)]
pub struct DragController {
    phase: DragPhase,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn is_dragging(&self) -> bool {
        self.phase != DragPhase::Idle
    }

    /// Single entry point: apply `event` to `board`.
    ///
    /// Returns `Err(Error::DragInProgress)` only for a start while another
    /// session is open; the board is untouched in that case. Every other
    /// inconsistent event degrades to `DragOutcome::Ignored`.
    pub fn handle(&mut self, board: &mut BoardState, event: DragEvent) -> Result<DragOutcome> {
        klog_trace!("DragController::handle phase={:?} event={:?}", self.phase, event);
        match event {
            DragEvent::Start(payload) => self.start(board, payload),
            DragEvent::Over { active, over } => Ok(self.over(board, active, over)),
            DragEvent::End { active, over } => Ok(self.end(board, active, over)),
        }
    }

    fn start(&mut self, board: &mut BoardState, payload: DragPayload) -> Result<DragOutcome> {
        if let Some(active) = self.phase.active_id() {
            klog_warn!(
                "DragController: start {} rejected, {} already dragging",
                payload.id().short(),
                active.short()
            );
            return Err(Error::DragInProgress { active });
        }

        let (phase, entity) = match payload {
            DragPayload::Column(id) => (
                DragPhase::DraggingColumn(id),
                board.column(id).cloned().map(ActiveEntity::Column),
            ),
            DragPayload::Task(id) => (
                DragPhase::DraggingTask(id),
                board.task(id).cloned().map(ActiveEntity::Task),
            ),
        };
        let Some(entity) = entity else {
            klog_debug!("DragController: start on unknown {}", payload.id().short());
            return Ok(DragOutcome::Ignored);
        };

        klog_debug!(
            "DragController: start {} {}",
            payload.kind(),
            payload.id().short()
        );
        board.set_active(entity);
        self.phase = phase;
        Ok(DragOutcome::Started(payload))
    }

    fn over(&self, board: &mut BoardState, active: Id, over: Option<Id>) -> DragOutcome {
        // Columns only move on drop.
        let DragPhase::DraggingTask(dragged) = self.phase else {
            return DragOutcome::Ignored;
        };
        let Some(over) = over else {
            return DragOutcome::Ignored;
        };
        if dragged != active || active == over {
            return DragOutcome::Ignored;
        }
        let Some(active_index) = board.task_index(active) else {
            return DragOutcome::Ignored;
        };

        match board.resolve(over) {
            Some(EntityKind::Task) => {
                let Some(over_index) = board.task_index(over) else {
                    return DragOutcome::Ignored;
                };
                let column = board.tasks()[over_index].column_id;
                if board.column(column).is_none() {
                    klog_warn!(
                        "DragController: over-task {} sits in missing column {}",
                        over.short(),
                        column.short()
                    );
                    return DragOutcome::Ignored;
                }

                let moved = board.tasks()[active_index].in_column(column);
                board.replace_task(active_index, moved.clone());
                board.reorder(Collection::Tasks, active_index, over_index);
                board.set_active(ActiveEntity::Task(moved));
                klog_trace!(
                    "DragController: task {} -> index {} column {}",
                    active.short(),
                    over_index,
                    column.short()
                );
                DragOutcome::TaskMoved {
                    task: active,
                    column,
                    from: active_index,
                    to: over_index,
                }
            }
            Some(EntityKind::Column) => {
                if board.tasks()[active_index].column_id == over {
                    return DragOutcome::Ignored;
                }
                let moved = board.tasks()[active_index].in_column(over);
                board.replace_task(active_index, moved.clone());
                board.set_active(ActiveEntity::Task(moved));
                klog_trace!(
                    "DragController: task {} -> column {}",
                    active.short(),
                    over.short()
                );
                DragOutcome::TaskReassigned {
                    task: active,
                    column: over,
                }
            }
            None => DragOutcome::Ignored,
        }
    }

    fn end(&mut self, board: &mut BoardState, active: Id, over: Option<Id>) -> DragOutcome {
        let phase = std::mem::take(&mut self.phase);
        board.clear_active();

        let outcome = match phase {
            DragPhase::Idle => DragOutcome::Ignored,
            DragPhase::DraggingColumn(dragged) if dragged == active => {
                drop_column(board, active, over)
            }
            DragPhase::DraggingColumn(_) => DragOutcome::Ended,
            DragPhase::DraggingTask(dragged) => settle_task(board, dragged),
        };
        klog_debug!("DragController: end {:?}", outcome);
        outcome
    }
}

fn drop_column(board: &mut BoardState, active: Id, over: Option<Id>) -> DragOutcome {
    let Some(over) = over else {
        return DragOutcome::Ended;
    };
    if active == over {
        return DragOutcome::Ended;
    }
    let (Some(from), Some(to)) = (board.column_index(active), board.column_index(over)) else {
        return DragOutcome::Ended;
    };
    board.reorder(Collection::Columns, from, to);
    DragOutcome::ColumnMoved {
        column: active,
        from,
        to,
    }
}

/// A dragged task must land in a live column; otherwise it is discarded.
fn settle_task(board: &mut BoardState, task: Id) -> DragOutcome {
    let Some(column) = board.task(task).map(|t| t.column_id) else {
        return DragOutcome::Ended;
    };
    if board.column(column).is_some() {
        return DragOutcome::Ended;
    }
    klog_warn!(
        "DragController: dropping task {} left in missing column {}",
        task.short(),
        column.short()
    );
    board.delete_task(task);
    DragOutcome::TaskDropped { task }
}
