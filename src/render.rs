use crate::board::{ActiveEntity, BoardState, Id};
use crate::drag::Point;
use crate::layout::BoardLayout;
use crate::tea::{Mode, Notification};
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskView {
    pub id: Id,
    pub content: String,
    /// This card is the one being dragged; draw a placeholder.
    pub dragging: bool,
    pub selected: bool,
    pub editing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnView {
    pub id: Id,
    pub title: String,
    pub task_count: usize,
    pub tasks: Vec<TaskView>,
    pub dragging: bool,
    pub selected: bool,
    pub editing: bool,
}

/// The floating copy of the dragged entity drawn under the pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayView {
    Column {
        title: String,
        task_count: usize,
        /// First few task contents, for a preview of the column body.
        tasks: Vec<String>,
    },
    Task {
        content: String,
    },
}

impl OverlayView {
    /// Tasks shown inside a dragged column's overlay.
    pub const PREVIEW_TASKS: usize = 3;

    pub fn from_entity(entity: &ActiveEntity, board: &BoardState) -> Self {
        match entity {
            ActiveEntity::Column(column) => OverlayView::Column {
                title: column.title.clone(),
                task_count: board.task_count(column.id),
                tasks: board
                    .tasks_in(column.id)
                    .take(Self::PREVIEW_TASKS)
                    .map(|t| t.content.clone())
                    .collect(),
            },
            ActiveEntity::Task(task) => OverlayView::Task {
                content: task.content.clone(),
            },
        }
    }
}

static VERSION_COUNTER: AtomicU64 = AtomicU64::new(1);

pub fn next_version() -> u64 {
    VERSION_COUNTER.fetch_add(1, Ordering::Relaxed)
}

#[derive(Debug, Clone)]
pub struct RenderState {
    pub version: u64,
    pub columns: Vec<ColumnView>,
    /// Geometry the columns are drawn into, in the same order as `columns`
    /// starting from the scroll offset.
    pub layout: BoardLayout,
    pub overlay: Option<(OverlayView, Point)>,
    pub mode: Mode,
    pub notification: Option<Notification>,
    /// Whether the keymap legend is expanded (toggled by '?')
    pub show_keymap: bool,
    pub task_total: usize,
}

impl RenderState {
    pub fn column(&self, id: Id) -> Option<&ColumnView> {
        self.columns.iter().find(|c| c.id == id)
    }

    pub fn is_dragging(&self) -> bool {
        self.overlay.is_some()
    }
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            version: 0,
            columns: Vec::new(),
            layout: BoardLayout::default(),
            overlay: None,
            mode: Mode::Board,
            notification: None,
            show_keymap: false,
            task_total: 0,
        }
    }
}
