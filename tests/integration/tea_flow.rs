//! Input flow integration tests.
//!
//! These tests drive a `Model` the way the logic thread does, with
//! synthetic key and mouse events, and check the board and the render
//! snapshot that comes out.

use crossterm::event::KeyCode;

use kanban::render::OverlayView;
use kanban::tea::{Command, EditTarget, Mode};
use kanban::BoardState;

use crate::fixtures::{
    body_cell, card_cell, chars, click, column_id, column_slot, column_titles, drag_path,
    header_cell, key, model, send, task_id, task_slot, tasks_of, BoardBuilder,
};

/// Test: Build a board from nothing with the keyboard
/// Given an empty board
/// When columns and tasks are created, renamed and edited
/// Then the board matches what was typed
#[test]
fn test_keyboard_builds_board() {
    let mut model = model(BoardState::new());

    send(&mut model, key(KeyCode::Char('n')));
    send(&mut model, key(KeyCode::Char('e')));
    for _ in 0.."Column 1".len() {
        send(&mut model, key(KeyCode::Backspace));
    }
    chars(&mut model, "Todo");
    send(&mut model, key(KeyCode::Enter));

    send(&mut model, key(KeyCode::Char('t')));
    send(&mut model, key(KeyCode::Enter));
    chars(&mut model, " draft");
    send(&mut model, key(KeyCode::Esc));

    send(&mut model, key(KeyCode::Char('n')));

    assert_eq!(model.mode, Mode::Board);
    assert_eq!(column_titles(&model.board), vec!["Todo", "Column 2"]);
    assert_eq!(tasks_of(&model.board, "Todo"), vec!["Task 1 draft"]);
    model.board.check_invariants().unwrap();
}

/// Test: Mouse drag of a column header
/// Given three columns
/// When the first header is dragged onto the third column
/// Then the first column ends up last, only after release
#[test]
fn test_mouse_reorders_columns() {
    let board = BoardBuilder::new()
        .column("Todo", &["a"])
        .column("Doing", &[])
        .column("Done", &[])
        .build();
    let mut model = model(board);
    let todo = column_id(&model.board, "Todo");
    let done = column_id(&model.board, "Done");
    let from = header_cell(&model, todo);
    let to = body_cell(&model, done);

    drag_path(&mut model, from, &[(from.0 + 5, from.1), to]);

    assert_eq!(column_titles(&model.board), vec!["Doing", "Done", "Todo"]);
    assert_eq!(tasks_of(&model.board, "Todo"), vec!["a"]);
    assert!(model.board.active().is_none());
    assert_eq!(model.selected_column().unwrap().id, todo);
}

/// Test: Mouse drag of a task into an empty column
#[test]
fn test_mouse_moves_task_to_empty_column() {
    let board = BoardBuilder::new()
        .column("Todo", &["a", "b"])
        .column("Done", &[])
        .build();
    let mut model = model(board);
    let a = task_id(&model.board, "a");
    let done = column_id(&model.board, "Done");
    let from = card_cell(&model, a);
    let to = body_cell(&model, done);

    drag_path(&mut model, from, &[(from.0, from.1 + 4), to]);

    assert_eq!(tasks_of(&model.board, "Todo"), vec!["b"]);
    assert_eq!(tasks_of(&model.board, "Done"), vec!["a"]);
    assert_eq!(model.selected_task().unwrap().id, a);
    model.board.check_invariants().unwrap();
}

/// Test: Snapshot during a drag
/// The dragged card is a placeholder and the overlay follows the pointer
#[test]
fn test_snapshot_mid_drag_shows_overlay() {
    use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
    use kanban::tea::Message;

    let board = BoardBuilder::new().column("Todo", &["a", "b"]).build();
    let mut model = model(board);
    let a = task_id(&model.board, "a");
    let (x, y) = card_cell(&model, a);
    let press = |kind, x, y| {
        Message::Mouse(MouseEvent {
            kind,
            column: x,
            row: y,
            modifiers: KeyModifiers::empty(),
        })
    };

    send(&mut model, press(MouseEventKind::Down(MouseButton::Left), x, y));
    send(&mut model, press(MouseEventKind::Drag(MouseButton::Left), x + 40, y + 10));

    let state = model.snapshot();
    let column = &state.columns[0];
    assert!(column.tasks.iter().any(|t| t.id == a && t.dragging));
    let (overlay, at) = state.overlay.expect("overlay while dragging");
    assert_eq!(
        overlay,
        OverlayView::Task {
            content: "a".to_string()
        }
    );
    assert_eq!((at.x, at.y), (x + 40, y + 10));

    // Cancelling with Esc leaves everything where it was.
    let cmds = send(&mut model, key(KeyCode::Esc));
    assert!(cmds.is_empty());
    assert!(model.snapshot().overlay.is_none());
    assert_eq!(tasks_of(&model.board, "Todo"), vec!["a", "b"]);
}

/// Test: Click actions on buttons and entities
#[test]
fn test_clicks_create_delete_and_edit() {
    let board = BoardBuilder::new()
        .column("Todo", &["a", "b"])
        .column("Done", &[])
        .build();
    let mut model = model(board);
    let todo = column_id(&model.board, "Todo");
    let b = task_id(&model.board, "b");

    // "+ Add task" in Todo.
    let add = column_slot(&model.layout(), todo).unwrap().add_task;
    click(&mut model, (add.x + 1, add.y));
    assert_eq!(tasks_of(&model.board, "Todo"), vec!["a", "b", "Task 3"]);

    // Delete button on b.
    let delete = task_slot(&model.layout(), b).unwrap().delete;
    click(&mut model, (delete.x + 1, delete.y));
    assert_eq!(tasks_of(&model.board, "Todo"), vec!["a", "Task 3"]);

    // Clicking the Todo header edits its title.
    let header = header_cell(&model, todo);
    click(&mut model, header);
    assert_eq!(model.mode, Mode::Edit(EditTarget::ColumnTitle(todo)));
    chars(&mut model, "!");
    assert_eq!(column_titles(&model.board), vec!["Todo!", "Done"]);

    // Deleting Todo from its header button ends the edit and cascades.
    let delete = column_slot(&model.layout(), todo).unwrap().delete;
    click(&mut model, (delete.x, delete.y));
    assert_eq!(model.mode, Mode::Board);
    assert_eq!(column_titles(&model.board), vec!["Done"]);
    assert!(model.board.tasks().is_empty());
}

/// Test: Keyboard reordering rings the bell at the edges
#[test]
fn test_keyboard_moves_and_edges() {
    let board = BoardBuilder::new()
        .column("A", &["1", "2"])
        .column("B", &[])
        .build();
    let mut model = model(board);

    send(&mut model, key(KeyCode::Char('j')));
    assert_eq!(send(&mut model, key(KeyCode::Char('K'))), vec![Command::Bell]);
    send(&mut model, key(KeyCode::Char('J')));
    assert_eq!(tasks_of(&model.board, "A"), vec!["2", "1"]);

    send(&mut model, key(KeyCode::Char(']')));
    assert_eq!(tasks_of(&model.board, "B"), vec!["1"]);
    assert_eq!(send(&mut model, key(KeyCode::Char(']'))), vec![Command::Bell]);

    send(&mut model, key(KeyCode::Char('H')));
    assert_eq!(column_titles(&model.board), vec!["B", "A"]);
    model.board.check_invariants().unwrap();
}

/// Test: Quit command
#[test]
fn test_quit_from_board_mode_only() {
    let mut model = model(BoardState::new());
    send(&mut model, key(KeyCode::Char('n')));
    send(&mut model, key(KeyCode::Char('e')));
    assert!(send(&mut model, key(KeyCode::Char('q'))).is_empty());
    send(&mut model, key(KeyCode::Enter));
    assert_eq!(send(&mut model, key(KeyCode::Char('q'))), vec![Command::Quit]);
}
