//! Model for the TEA (The Elm Architecture) pattern.
//!
//! The Model is pure application state - no channels, no handles, no terminal.
//! It owns the one `BoardState` for this board session.

use ratatui::layout::Rect;

use crate::board::{BoardState, Column, Id, Task};
use crate::config::Config;
use crate::drag::{DragController, DragEvent, DragOutcome, Point, PointerSensor};
use crate::layout::{self, BoardLayout};
use crate::render::{next_version, ColumnView, OverlayView, RenderState, TaskView};
use crate::{klog_debug, klog_warn};

/// Level of a notification message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    /// Error notification - displayed in red with "Error:" prefix
    Error,
    /// Informational notification - displayed in green
    Info,
}

/// A notification message to display to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

/// What inline edit mode is editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    ColumnTitle(Id),
    TaskContent(Id),
}

impl EditTarget {
    pub fn id(&self) -> Id {
        match self {
            EditTarget::ColumnTitle(id) | EditTarget::TaskContent(id) => *id,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EditTarget::ColumnTitle(_) => "Title",
            EditTarget::TaskContent(_) => "Task",
        }
    }
}

/// Application UI mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Board,
    Edit(EditTarget),
}

/// Keyboard focus: a column, and optionally one of its visible tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub column: usize,
    pub task: Option<usize>,
}

/// Pure application state - the single source of truth.
pub struct Model {
    // Core state
    pub board: BoardState,
    pub drag: DragController,
    pub sensor: PointerSensor,

    // Interaction state
    pub mode: Mode,
    pub selection: Selection,
    /// Index of the leftmost column on screen.
    pub first_column: usize,
    pub viewport: Rect,
    pub pointer: Option<Point>,
    pub notification: Option<Notification>,
    /// Whether the keymap legend is expanded (toggled by '?')
    pub show_keymap: bool,

    // Dirty flag - set when state changes and render is needed
    pub dirty: bool,

    // Config (immutable after init)
    pub config: Config,
}

impl Model {
    pub fn new(board: BoardState, config: Config, viewport: Rect) -> Self {
        Self {
            board,
            drag: DragController::new(),
            sensor: PointerSensor::new(config.activation_distance),
            mode: Mode::default(),
            selection: Selection::default(),
            first_column: 0,
            viewport,
            pointer: None,
            notification: None,
            show_keymap: false,
            dirty: true,
            config,
        }
    }

    /// Geometry of what is currently on screen.
    pub fn layout(&self) -> BoardLayout {
        BoardLayout::compute(
            layout::board_area(self.viewport),
            &self.board,
            self.config.column_width,
            self.first_column,
        )
    }

    // ─── Selection ──────────────────────────────────────────────────────────

    pub fn selected_column(&self) -> Option<&Column> {
        self.board.columns().get(self.selection.column)
    }

    pub fn selected_task(&self) -> Option<&Task> {
        let column = self.selected_column()?;
        let index = self.selection.task?;
        self.board.tasks_in(column.id).nth(index)
    }

    pub fn select_column(&mut self, id: Id) {
        if let Some(index) = self.board.column_index(id) {
            self.selection = Selection {
                column: index,
                task: None,
            };
        }
    }

    pub fn select_task(&mut self, id: Id) {
        let Some(column_id) = self.board.task(id).map(|t| t.column_id) else {
            return;
        };
        let Some(column) = self.board.column_index(column_id) else {
            return;
        };
        let task = self.board.tasks_in(column_id).position(|t| t.id == id);
        self.selection = Selection { column, task };
    }

    /// Pull the selection back inside the board after a removal.
    pub fn clamp_selection(&mut self) {
        let columns = self.board.columns().len();
        if columns == 0 {
            self.selection = Selection::default();
            return;
        }
        self.selection.column = self.selection.column.min(columns - 1);
        let count = self
            .selected_column()
            .map(|c| self.board.task_count(c.id))
            .unwrap_or(0);
        self.selection.task = match self.selection.task {
            Some(_) if count == 0 => None,
            Some(i) => Some(i.min(count - 1)),
            None => None,
        };
    }

    /// Adjust horizontal scroll so the selected column is on screen.
    pub fn scroll_into_view(&mut self) {
        let visible = layout::visible_columns(
            layout::board_area(self.viewport).width,
            self.config.column_width,
        );
        let max_first = self.board.columns().len().saturating_sub(1);
        self.first_column = layout::scroll_to(self.first_column, self.selection.column, visible)
            .min(max_first);
    }

    // ─── Drag ───────────────────────────────────────────────────────────────

    /// Feed one drag event to the controller.
    ///
    /// A rejected start leaves the board alone and surfaces as an error
    /// notification. A task discarded at drag end gets an info notification.
    pub fn dispatch(&mut self, event: DragEvent) -> DragOutcome {
        match self.drag.handle(&mut self.board, event) {
            Ok(outcome) => {
                if outcome.changed() {
                    self.dirty = true;
                }
                if let DragOutcome::TaskDropped { task } = outcome {
                    klog_debug!("Model::dispatch dropped orphaned task {}", task.short());
                    self.clamp_selection();
                    self.notification = Some(Notification {
                        level: NotificationLevel::Info,
                        message: "Task removed: its column no longer exists".to_string(),
                    });
                }
                outcome
            }
            Err(e) => {
                klog_warn!("Model::dispatch {}", e);
                self.notification = Some(Notification {
                    level: NotificationLevel::Error,
                    message: e.to_string(),
                });
                self.dirty = true;
                DragOutcome::Ignored
            }
        }
    }

    /// Create an immutable snapshot for the render thread.
    ///
    /// Each snapshot gets a monotonically increasing version number so the
    /// render thread can skip redundant frames.
    pub fn snapshot(&self) -> RenderState {
        let active_id = self.board.active().map(|a| a.id());
        let editing = match self.mode {
            Mode::Edit(target) => Some(target.id()),
            Mode::Board => None,
        };
        let selected_column = self.selected_column().map(|c| c.id);
        let selected_task = self.selected_task().map(|t| t.id);

        let columns = self
            .board
            .columns()
            .iter()
            .map(|column| ColumnView {
                id: column.id,
                title: column.title.clone(),
                task_count: self.board.task_count(column.id),
                tasks: self
                    .board
                    .tasks_in(column.id)
                    .map(|task| TaskView {
                        id: task.id,
                        content: task.content.clone(),
                        dragging: active_id == Some(task.id),
                        selected: selected_task == Some(task.id),
                        editing: editing == Some(task.id),
                    })
                    .collect(),
                dragging: active_id == Some(column.id),
                selected: selected_column == Some(column.id) && selected_task.is_none(),
                editing: editing == Some(column.id),
            })
            .collect();

        let overlay = self
            .board
            .active()
            .zip(self.pointer)
            .map(|(entity, at)| (OverlayView::from_entity(entity, &self.board), at));

        RenderState {
            version: next_version(),
            columns,
            layout: self.layout(),
            overlay,
            mode: self.mode,
            notification: self.notification.clone(),
            show_keymap: self.show_keymap,
            task_total: self.board.tasks().len(),
        }
    }
}
