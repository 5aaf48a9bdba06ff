//! Drag lifecycle integration tests.
//!
//! These tests feed `DragEvent`s straight to a `DragController` and check
//! the resulting board, including the end-to-end create-then-drag scenario.

use kanban::drag::DragPhase;
use kanban::{BoardState, DragController, DragEvent, DragOutcome, DragPayload, Error, Id};

use crate::fixtures::{column_id, column_titles, task_id, tasks_of, BoardBuilder};

fn handle(drag: &mut DragController, board: &mut BoardState, event: DragEvent) -> DragOutcome {
    drag.handle(board, event).unwrap()
}

fn over(active: Id, over: Id) -> DragEvent {
    DragEvent::Over {
        active,
        over: Some(over),
    }
}

fn end(active: Id, over: Option<Id>) -> DragEvent {
    DragEvent::End { active, over }
}

/// Test: End-to-end create and column drag
/// Given an empty board
/// When two columns and one task are created and the first column is dropped on the second
/// Then the columns swap places and the task keeps its column
#[test]
fn test_create_then_drag_column_end_to_end() {
    let mut board = BoardState::new();
    let mut drag = DragController::new();

    let k1 = board.create_column();
    assert_eq!(k1.title, "Column 1");
    let k2 = board.create_column();
    assert_eq!(k2.title, "Column 2");
    let t1 = board.create_task(k1.id);
    assert_eq!(t1.content, "Task 1");
    assert_eq!(t1.column_id, k1.id);

    handle(&mut drag, &mut board, DragEvent::Start(DragPayload::Column(k1.id)));
    let outcome = handle(&mut drag, &mut board, end(k1.id, Some(k2.id)));

    assert_eq!(
        outcome,
        DragOutcome::ColumnMoved {
            column: k1.id,
            from: 0,
            to: 1
        }
    );
    assert_eq!(board.columns(), &[k2, k1.clone()]);
    assert_eq!(board.task(t1.id).unwrap().column_id, k1.id);
    assert!(board.active().is_none());
    board.check_invariants().unwrap();
}

/// Test: Cross-column task drag over a column body
/// Given task T in column X
/// When T is dragged over column Y
/// Then T belongs to Y and keeps its global index
#[test]
fn test_task_over_column_reassigns_without_reindex() {
    let mut board = BoardBuilder::new()
        .column("X", &["T", "U"])
        .column("Y", &[])
        .build();
    let mut drag = DragController::new();
    let t = task_id(&board, "T");
    let y = column_id(&board, "Y");
    let index = board.task_index(t).unwrap();

    handle(&mut drag, &mut board, DragEvent::Start(DragPayload::Task(t)));
    let outcome = handle(&mut drag, &mut board, over(t, y));

    assert_eq!(outcome, DragOutcome::TaskReassigned { task: t, column: y });
    assert_eq!(board.task(t).unwrap().column_id, y);
    assert_eq!(board.task_index(t), Some(index));
    assert_eq!(board.active_task().unwrap().column_id, y);

    handle(&mut drag, &mut board, end(t, Some(y)));
    assert_eq!(tasks_of(&board, "Y"), vec!["T"]);
    board.check_invariants().unwrap();
}

/// Test: A hover path across two columns settles where the pointer stops
#[test]
fn test_task_hover_path_across_columns() {
    let mut board = BoardBuilder::new()
        .column("Todo", &["a", "b"])
        .column("Doing", &["c", "d"])
        .column("Done", &[])
        .build();
    let mut drag = DragController::new();
    let a = task_id(&board, "a");
    let c = task_id(&board, "c");
    let done = column_id(&board, "Done");

    handle(&mut drag, &mut board, DragEvent::Start(DragPayload::Task(a)));
    // Over c: a takes c's slot in the global sequence, after b.
    handle(&mut drag, &mut board, over(a, c));
    assert_eq!(tasks_of(&board, "Todo"), vec!["b"]);
    assert_eq!(tasks_of(&board, "Doing"), vec!["c", "a", "d"]);

    // Hovering itself changes nothing.
    assert_eq!(handle(&mut drag, &mut board, over(a, a)), DragOutcome::Ignored);

    // On to the empty column, then release there.
    handle(&mut drag, &mut board, over(a, done));
    handle(&mut drag, &mut board, end(a, Some(done)));

    assert_eq!(tasks_of(&board, "Doing"), vec!["c", "d"]);
    assert_eq!(tasks_of(&board, "Done"), vec!["a"]);
    assert_eq!(drag.phase(), DragPhase::Idle);
    board.check_invariants().unwrap();
}

/// Test: Drag session reset
/// Every kind of end clears the drag snapshot
#[test]
fn test_every_end_resets_session() {
    let mut board = BoardBuilder::new()
        .column("A", &["t"])
        .column("B", &[])
        .build();
    let a = column_id(&board, "A");
    let t = task_id(&board, "t");
    let ends = [
        (DragPayload::Column(a), None),
        (DragPayload::Column(a), Some(a)),
        (DragPayload::Column(a), Some(t)),
        (DragPayload::Column(a), Some(Id::new())),
        (DragPayload::Task(t), None),
        (DragPayload::Task(t), Some(a)),
    ];

    for (payload, target) in ends {
        let mut drag = DragController::new();
        let before = column_titles(&board);
        handle(&mut drag, &mut board, DragEvent::Start(payload));
        assert!(board.active().is_some());

        handle(&mut drag, &mut board, end(payload.id(), target));

        assert!(board.active().is_none(), "{payload:?} -> {target:?}");
        assert!(board.active_column().is_none());
        assert!(board.active_task().is_none());
        assert!(!drag.is_dragging());
        assert_eq!(column_titles(&board), before);
    }
}

/// Test: Nested drag start is rejected
#[test]
fn test_second_start_is_rejected_and_first_survives() {
    let mut board = BoardBuilder::new().column("A", &["t"]).column("B", &[]).build();
    let mut drag = DragController::new();
    let a = column_id(&board, "A");
    let t = task_id(&board, "t");

    handle(&mut drag, &mut board, DragEvent::Start(DragPayload::Column(a)));
    let err = drag
        .handle(&mut board, DragEvent::Start(DragPayload::Task(t)))
        .unwrap_err();

    assert!(matches!(err, Error::DragInProgress { active } if active == a));
    assert_eq!(drag.phase(), DragPhase::DraggingColumn(a));
    assert_eq!(board.active_column().unwrap().id, a);
    assert!(board.active_task().is_none());
}

/// Test: Column deleted mid-drag
/// Given a task hovering over another column's task
/// When that column is deleted before the drop
/// Then the dragged task goes with it and the board stays consistent
#[test]
fn test_target_column_deleted_mid_drag() {
    let mut board = BoardBuilder::new()
        .column("Todo", &["a"])
        .column("Doing", &["b"])
        .build();
    let mut drag = DragController::new();
    let a = task_id(&board, "a");
    let b = task_id(&board, "b");
    let doing = column_id(&board, "Doing");

    handle(&mut drag, &mut board, DragEvent::Start(DragPayload::Task(a)));
    handle(&mut drag, &mut board, over(a, b));
    assert_eq!(board.task(a).unwrap().column_id, doing);

    board.delete_column(doing);
    assert!(board.task(a).is_none(), "cascade took the dragged task");

    let outcome = handle(&mut drag, &mut board, end(a, None));
    assert_eq!(outcome, DragOutcome::Ended);
    assert!(board.active().is_none());
    board.check_invariants().unwrap();
}

/// Test: Dragged entity deleted mid-drag
/// Every later event for it is a no-op
#[test]
fn test_dragged_task_deleted_mid_drag() {
    let mut board = BoardBuilder::new().column("A", &["t", "u"]).build();
    let mut drag = DragController::new();
    let t = task_id(&board, "t");
    let u = task_id(&board, "u");

    handle(&mut drag, &mut board, DragEvent::Start(DragPayload::Task(t)));
    board.delete_task(t);
    let before = board.clone();

    assert_eq!(handle(&mut drag, &mut board, over(t, u)), DragOutcome::Ignored);
    handle(&mut drag, &mut board, end(t, Some(u)));

    assert_eq!(board.tasks(), before.tasks());
    assert!(board.active().is_none());
}

/// Test: Events for a different entity than the one being dragged are ignored
#[test]
fn test_over_for_foreign_active_is_ignored() {
    let mut board = BoardBuilder::new().column("A", &["t", "u", "v"]).build();
    let mut drag = DragController::new();
    let t = task_id(&board, "t");
    let u = task_id(&board, "u");
    let v = task_id(&board, "v");

    handle(&mut drag, &mut board, DragEvent::Start(DragPayload::Task(t)));
    assert_eq!(handle(&mut drag, &mut board, over(u, v)), DragOutcome::Ignored);
    assert_eq!(tasks_of(&board, "A"), vec!["t", "u", "v"]);
}
