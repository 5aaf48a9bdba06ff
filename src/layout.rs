//! Board geometry and hit-testing.
//!
//! The renderer and the update function both derive the layout from the same
//! inputs (viewport, board, column width, scroll offset), so a pointer
//! position seen by `update` lands on exactly what was drawn there.

use ratatui::layout::Rect;

use crate::board::{BoardState, EntityKind, Id};

pub const HEADER_HEIGHT: u16 = 3;
pub const CARD_HEIGHT: u16 = 3;
pub const COLUMN_GAP: u16 = 1;
/// Width of a `[x]` delete button.
pub const BUTTON_WIDTH: u16 = 3;

/// Something under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    ColumnHeader(Id),
    DeleteColumn(Id),
    ColumnBody(Id),
    Task(Id),
    DeleteTask(Id),
    AddTask(Id),
    AddColumn,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSlot {
    pub id: Id,
    pub card: Rect,
    pub delete: Rect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSlot {
    pub id: Id,
    pub area: Rect,
    pub header: Rect,
    pub delete: Rect,
    pub body: Rect,
    pub tasks: Vec<TaskSlot>,
    pub add_task: Rect,
    /// Tasks that did not fit in the body.
    pub hidden_tasks: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardLayout {
    pub columns: Vec<ColumnSlot>,
    pub add_column: Option<Rect>,
}

/// Whether `(x, y)` falls inside `rect`.
pub fn contains(rect: Rect, x: u16, y: u16) -> bool {
    x >= rect.x && x < rect.right() && y >= rect.y && y < rect.bottom()
}

/// Area left for columns once the title bar and status bar are taken.
pub fn board_area(frame: Rect) -> Rect {
    Rect {
        x: frame.x.saturating_add(1),
        y: frame.y.saturating_add(1),
        width: frame.width.saturating_sub(2),
        height: frame.height.saturating_sub(2),
    }
}

/// Number of whole columns that fit side by side in `width`.
pub fn visible_columns(width: u16, column_width: u16) -> usize {
    let stride = column_width.saturating_add(COLUMN_GAP).max(1);
    (width.saturating_add(COLUMN_GAP) / stride).max(1) as usize
}

/// Smallest scroll offset change that keeps `selected` on screen.
pub fn scroll_to(first: usize, selected: usize, visible: usize) -> usize {
    let visible = visible.max(1);
    if selected < first {
        selected
    } else if selected >= first + visible {
        selected + 1 - visible
    } else {
        first
    }
}

fn column_slot(board: &BoardState, id: Id, area: Rect) -> ColumnSlot {
    let inner_x = area.x + 1;
    let inner_width = area.width.saturating_sub(2);
    let header = Rect {
        height: HEADER_HEIGHT.min(area.height),
        ..area
    };
    let delete = Rect {
        x: area.right().saturating_sub(BUTTON_WIDTH + 1),
        y: area.y + 1,
        width: BUTTON_WIDTH,
        height: 1,
    };
    let add_task = Rect {
        x: inner_x,
        y: area.bottom().saturating_sub(2),
        width: inner_width,
        height: 1,
    };
    let body_top = area.y + HEADER_HEIGHT;
    let body = Rect {
        x: inner_x,
        y: body_top,
        width: inner_width,
        height: add_task.y.saturating_sub(body_top),
    };

    let mut tasks = Vec::new();
    let mut hidden_tasks = 0;
    for (k, task) in board.tasks_in(id).enumerate() {
        let y = body.y + (k as u16).saturating_mul(CARD_HEIGHT);
        if y.saturating_add(CARD_HEIGHT) > body.bottom() {
            hidden_tasks += 1;
            continue;
        }
        let card = Rect {
            x: body.x,
            y,
            width: body.width,
            height: CARD_HEIGHT,
        };
        let delete = Rect {
            x: card.right().saturating_sub(BUTTON_WIDTH + 1),
            y: card.y + 1,
            width: BUTTON_WIDTH,
            height: 1,
        };
        tasks.push(TaskSlot {
            id: task.id,
            card,
            delete,
        });
    }

    ColumnSlot {
        id,
        area,
        header,
        delete,
        body,
        tasks,
        add_task,
        hidden_tasks,
    }
}

impl BoardLayout {
    /// Lay out `board` inside `area`, starting from column `first`.
    pub fn compute(area: Rect, board: &BoardState, column_width: u16, first: usize) -> Self {
        let mut columns = Vec::new();
        let mut x = area.x;
        for column in board.columns().iter().skip(first) {
            if x.saturating_add(column_width) > area.right() {
                break;
            }
            let rect = Rect {
                x,
                y: area.y,
                width: column_width,
                height: area.height,
            };
            columns.push(column_slot(board, column.id, rect));
            x = x.saturating_add(column_width + COLUMN_GAP);
        }

        let all_shown = first + columns.len() >= board.columns().len();
        let add_column = (all_shown && x.saturating_add(column_width) <= area.right()).then_some(
            Rect {
                x,
                y: area.y,
                width: column_width,
                height: HEADER_HEIGHT.min(area.height),
            },
        );

        Self {
            columns,
            add_column,
        }
    }

    /// What is drawn at `(x, y)`.
    pub fn hit(&self, x: u16, y: u16) -> Option<Hit> {
        if let Some(rect) = self.add_column {
            if contains(rect, x, y) {
                return Some(Hit::AddColumn);
            }
        }
        let column = self.columns.iter().find(|c| contains(c.area, x, y))?;
        if contains(column.delete, x, y) {
            return Some(Hit::DeleteColumn(column.id));
        }
        if contains(column.header, x, y) {
            return Some(Hit::ColumnHeader(column.id));
        }
        if let Some(task) = column.tasks.iter().find(|t| contains(t.card, x, y)) {
            if contains(task.delete, x, y) {
                return Some(Hit::DeleteTask(task.id));
            }
            return Some(Hit::Task(task.id));
        }
        if contains(column.add_task, x, y) {
            return Some(Hit::AddTask(column.id));
        }
        Some(Hit::ColumnBody(column.id))
    }

    /// Drop target under `(x, y)` for a drag of `kind`.
    ///
    /// Column drags only ever target columns. Task drags target the card
    /// under the pointer, or the column when over empty column space.
    pub fn drop_target(&self, x: u16, y: u16, kind: EntityKind) -> Option<Id> {
        let column = self.columns.iter().find(|c| contains(c.area, x, y))?;
        match kind {
            EntityKind::Column => Some(column.id),
            EntityKind::Task => Some(
                column
                    .tasks
                    .iter()
                    .find(|t| contains(t.card, x, y))
                    .map(|t| t.id)
                    .unwrap_or(column.id),
            ),
        }
    }
}
