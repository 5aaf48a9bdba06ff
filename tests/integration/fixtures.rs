//! Test fixtures for integration tests.
//!
//! Provides helpers for:
//! - Building boards with named columns and tasks
//! - Driving a `Model` with synthetic keyboard and mouse input
//! - Reading back column/task order by name

use crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use kanban::config::Config;
use kanban::layout::{BoardLayout, ColumnSlot, TaskSlot};
use kanban::tea::{update, Command, Message, Model};
use kanban::{BoardState, Id};

/// Builder for a board with named columns and tasks.
#[derive(Default)]
pub struct BoardBuilder {
    columns: Vec<(String, Vec<String>)>,
}

impl BoardBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column titled `title` holding `tasks` in order.
    pub fn column(mut self, title: &str, tasks: &[&str]) -> Self {
        self.columns.push((
            title.to_string(),
            tasks.iter().map(|t| t.to_string()).collect(),
        ));
        self
    }

    pub fn build(self) -> BoardState {
        let mut board = BoardState::new();
        for (title, tasks) in self.columns {
            let column = board.create_column();
            board.update_column(column.id, title);
            for content in tasks {
                let task = board.create_task(column.id);
                board.update_task(task.id, content);
            }
        }
        board
    }
}

/// Id of the column titled `title`.
pub fn column_id(board: &BoardState, title: &str) -> Id {
    board
        .columns()
        .iter()
        .find(|c| c.title == title)
        .map(|c| c.id)
        .unwrap_or_else(|| panic!("no column titled {title:?}"))
}

/// Id of the task whose content is `content`.
pub fn task_id(board: &BoardState, content: &str) -> Id {
    board
        .tasks()
        .iter()
        .find(|t| t.content == content)
        .map(|t| t.id)
        .unwrap_or_else(|| panic!("no task {content:?}"))
}

pub fn column_titles(board: &BoardState) -> Vec<String> {
    board.columns().iter().map(|c| c.title.clone()).collect()
}

/// Visible task order of the column titled `title`.
pub fn tasks_of(board: &BoardState, title: &str) -> Vec<String> {
    board
        .tasks_in(column_id(board, title))
        .map(|t| t.content.clone())
        .collect()
}

/// Model on a 120x30 terminal with default config.
pub fn model(board: BoardState) -> Model {
    Model::new(board, Config::default(), Rect::new(0, 0, 120, 30))
}

/// Feed `msg` through `update`, returning the commands.
pub fn send(model: &mut Model, msg: Message) -> Vec<Command> {
    update(model, msg)
}

pub fn key(code: KeyCode) -> Message {
    Message::Key(KeyEvent::new(code, KeyModifiers::empty()))
}

pub fn chars(model: &mut Model, text: &str) {
    for c in text.chars() {
        send(model, key(KeyCode::Char(c)));
    }
}

fn mouse(kind: MouseEventKind, x: u16, y: u16) -> Message {
    Message::Mouse(MouseEvent {
        kind,
        column: x,
        row: y,
        modifiers: KeyModifiers::empty(),
    })
}

/// Press, drag through `path`, release at the last point.
pub fn drag_path(model: &mut Model, from: (u16, u16), path: &[(u16, u16)]) {
    send(model, mouse(MouseEventKind::Down(MouseButton::Left), from.0, from.1));
    for &(x, y) in path {
        send(model, mouse(MouseEventKind::Drag(MouseButton::Left), x, y));
    }
    let (x, y) = path.last().copied().unwrap_or(from);
    send(model, mouse(MouseEventKind::Up(MouseButton::Left), x, y));
}

/// Press and release at the same cell.
pub fn click(model: &mut Model, at: (u16, u16)) {
    send(model, mouse(MouseEventKind::Down(MouseButton::Left), at.0, at.1));
    send(model, mouse(MouseEventKind::Up(MouseButton::Left), at.0, at.1));
}

/// Screen slot of column `id`.
pub fn column_slot(layout: &BoardLayout, id: Id) -> Option<&ColumnSlot> {
    layout.columns.iter().find(|c| c.id == id)
}

/// Screen slot of the card for task `id`.
pub fn task_slot(layout: &BoardLayout, id: Id) -> Option<&TaskSlot> {
    layout
        .columns
        .iter()
        .flat_map(|c| c.tasks.iter())
        .find(|t| t.id == id)
}

/// A cell on the header of column `id`, away from its delete button.
pub fn header_cell(model: &Model, id: Id) -> (u16, u16) {
    let layout = model.layout();
    let slot = column_slot(&layout, id).expect("column on screen");
    (slot.header.x + 2, slot.header.y + 1)
}

/// A cell inside the card of task `id`, away from its delete button.
pub fn card_cell(model: &Model, id: Id) -> (u16, u16) {
    let layout = model.layout();
    let slot = task_slot(&layout, id).expect("task on screen");
    (slot.card.x + 2, slot.card.y + 1)
}

/// A cell in the empty body area of column `id`, below its cards.
pub fn body_cell(model: &Model, id: Id) -> (u16, u16) {
    let layout = model.layout();
    let slot = column_slot(&layout, id).expect("column on screen");
    (slot.body.x + 2, slot.body.bottom().saturating_sub(1))
}
