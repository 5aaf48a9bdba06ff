//! Pure update function for the TEA (The Elm Architecture) pattern.
//!
//! The update function takes a model and a message, mutates the model,
//! and returns a list of commands to execute.
//!
//! Mouse input goes through the pointer sensor: a press over a column header
//! or a task card arms it, motion past the activation distance starts a drag,
//! and the release ends it. Keyboard moves are expressed as the same drag
//! events, so both paths share the controller's reordering rules.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::board::{EntityKind, Id};
use crate::drag::{DragEvent, DragPayload, Point, SensorRelease};
use crate::layout::Hit;
use crate::{klog, klog_debug, klog_trace};

use super::command::Command;
use super::message::Message;
use super::model::{EditTarget, Mode, Model, Selection};

/// Pure update function: Model + Message → Commands
pub fn update(model: &mut Model, msg: Message) -> Vec<Command> {
    let mut cmds = Vec::new();

    match msg {
        Message::Key(key) => {
            if key.kind != KeyEventKind::Press {
                return cmds;
            }
            model.notification = None; // Clear notification on any key press
            model.dirty = true; // Keyboard input always triggers render
            match model.mode {
                Mode::Board => update_board_mode(model, key, &mut cmds),
                Mode::Edit(target) => update_edit_mode(model, key, target),
            }
            model.scroll_into_view();
        }

        Message::Mouse(mouse) => update_mouse(model, mouse),

        Message::Resize(width, height) => {
            model.viewport = Rect::new(0, 0, width, height);
            model.scroll_into_view();
            model.dirty = true; // Resize triggers re-render
        }

        Message::Drag(event) => {
            model.dispatch(event);
        }
    }

    cmds
}

// ─── Intents ────────────────────────────────────────────────────────────────

fn create_column(model: &mut Model) {
    let column = model.board.create_column();
    klog!("Column created: {} ({})", column.title, column.id.short());
    model.select_column(column.id);
    model.scroll_into_view();
    model.dirty = true;
}

fn create_task(model: &mut Model, column_id: Id) {
    let task = model.board.create_task(column_id);
    klog!("Task created: {} in {}", task.content, column_id.short());
    model.select_task(task.id);
    model.dirty = true;
}

fn delete_column(model: &mut Model, id: Id) {
    model.board.delete_column(id);
    klog!("Column deleted: {}", id.short());
    leave_edit_if_gone(model);
    model.clamp_selection();
    model.dirty = true;
}

fn delete_task(model: &mut Model, id: Id) {
    model.board.delete_task(id);
    klog!("Task deleted: {}", id.short());
    leave_edit_if_gone(model);
    model.clamp_selection();
    model.dirty = true;
}

fn begin_edit(model: &mut Model, target: EditTarget) {
    // A dragged entity cannot be edited, and an edited one cannot be dragged.
    if model.drag.is_dragging() {
        return;
    }
    match target {
        EditTarget::ColumnTitle(id) => model.select_column(id),
        EditTarget::TaskContent(id) => model.select_task(id),
    }
    model.mode = Mode::Edit(target);
    model.dirty = true;
}

fn leave_edit_if_gone(model: &mut Model) {
    if let Mode::Edit(target) = model.mode {
        if model.board.resolve(target.id()).is_none() {
            model.mode = Mode::Board;
        }
    }
}

// ─── Keyboard ───────────────────────────────────────────────────────────────

fn update_board_mode(model: &mut Model, key: KeyEvent, cmds: &mut Vec<Command>) {
    let column_count = model.board.columns().len();

    match key.code {
        KeyCode::Char('l') | KeyCode::Right => {
            if column_count > 0 {
                model.selection = Selection {
                    column: (model.selection.column + 1) % column_count,
                    task: None,
                };
            }
        }

        KeyCode::Char('h') | KeyCode::Left => {
            if column_count > 0 {
                model.selection = Selection {
                    column: model
                        .selection
                        .column
                        .checked_sub(1)
                        .unwrap_or(column_count - 1),
                    task: None,
                };
            }
        }

        KeyCode::Char('j') | KeyCode::Down => {
            let count = selected_task_count(model);
            if count > 0 {
                model.selection.task = Some(match model.selection.task {
                    Some(i) => (i + 1) % count,
                    None => 0,
                });
            }
        }

        KeyCode::Char('k') | KeyCode::Up => {
            let count = selected_task_count(model);
            if count > 0 {
                model.selection.task = Some(match model.selection.task {
                    Some(i) => i.checked_sub(1).unwrap_or(count - 1),
                    None => count - 1,
                });
            }
        }

        KeyCode::Char('n') => create_column(model),

        KeyCode::Char('t') => {
            if let Some(column) = model.selected_column().map(|c| c.id) {
                create_task(model, column);
            }
        }

        KeyCode::Char('e') | KeyCode::Enter => {
            if let Some(task) = model.selected_task().map(|t| t.id) {
                begin_edit(model, EditTarget::TaskContent(task));
            } else if let Some(column) = model.selected_column().map(|c| c.id) {
                begin_edit(model, EditTarget::ColumnTitle(column));
            }
        }

        KeyCode::Char('x') => {
            if let Some(task) = model.selected_task().map(|t| t.id) {
                delete_task(model, task);
            }
        }

        KeyCode::Char('X') => {
            if let Some(column) = model.selected_column().map(|c| c.id) {
                delete_column(model, column);
            }
        }

        KeyCode::Char('H') => move_selected_column(model, -1, cmds),
        KeyCode::Char('L') => move_selected_column(model, 1, cmds),
        KeyCode::Char('K') => move_selected_task(model, -1, cmds),
        KeyCode::Char('J') => move_selected_task(model, 1, cmds),
        KeyCode::Char('[') => move_selected_task_to_column(model, -1, cmds),
        KeyCode::Char(']') => move_selected_task_to_column(model, 1, cmds),

        KeyCode::Char('?') => {
            model.show_keymap = !model.show_keymap;
        }

        KeyCode::Esc if model.drag.is_dragging() => cancel_drag(model),

        KeyCode::Char('q') | KeyCode::Esc => {
            cmds.push(Command::Quit);
        }

        _ => {}
    }
}

fn update_edit_mode(model: &mut Model, key: KeyEvent, target: EditTarget) {
    let Some(mut text) = current_text(model, target) else {
        model.mode = Mode::Board;
        return;
    };

    match key.code {
        KeyCode::Enter | KeyCode::Esc => {
            klog_debug!("Edit finished for {}", target.id().short());
            model.mode = Mode::Board;
            return;
        }
        KeyCode::Backspace => {
            text.pop();
        }
        KeyCode::Char(c) => {
            text.push(c);
        }
        _ => return,
    }

    // Edits apply live, one keystroke at a time.
    match target {
        EditTarget::ColumnTitle(id) => model.board.update_column(id, text),
        EditTarget::TaskContent(id) => model.board.update_task(id, text),
    }
}

fn current_text(model: &Model, target: EditTarget) -> Option<String> {
    match target {
        EditTarget::ColumnTitle(id) => model.board.column(id).map(|c| c.title.clone()),
        EditTarget::TaskContent(id) => model.board.task(id).map(|t| t.content.clone()),
    }
}

fn selected_task_count(model: &Model) -> usize {
    model
        .selected_column()
        .map(|c| model.board.task_count(c.id))
        .unwrap_or(0)
}

/// Index `delta` steps from `index`, if it stays within `0..len`.
fn offset(index: usize, delta: isize, len: usize) -> Option<usize> {
    index.checked_add_signed(delta).filter(|&i| i < len)
}

/// Run one complete keyboard drag: start, optionally hover `over`, drop on `over`.
fn keyboard_drag(model: &mut Model, payload: DragPayload, over: Id, hover: bool) {
    let active = payload.id();
    model.dispatch(DragEvent::Start(payload));
    if hover {
        model.dispatch(DragEvent::Over {
            active,
            over: Some(over),
        });
    }
    model.dispatch(DragEvent::End {
        active,
        over: Some(over),
    });
}

fn move_selected_column(model: &mut Model, delta: isize, cmds: &mut Vec<Command>) {
    if model.drag.is_dragging() {
        return;
    }
    let columns = model.board.columns();
    let target = offset(model.selection.column, delta, columns.len())
        .and_then(|to| Some((columns.get(model.selection.column)?.id, columns[to].id)));
    let Some((active, over)) = target else {
        cmds.push(Command::Bell);
        return;
    };
    keyboard_drag(model, DragPayload::Column(active), over, false);
    model.select_column(active);
}

fn move_selected_task(model: &mut Model, delta: isize, cmds: &mut Vec<Command>) {
    if model.drag.is_dragging() {
        return;
    }
    let Some((column, index)) = model
        .selected_column()
        .map(|c| c.id)
        .zip(model.selection.task)
    else {
        return;
    };
    let ids: Vec<Id> = model.board.tasks_in(column).map(|t| t.id).collect();
    let Some(to) = offset(index, delta, ids.len()) else {
        cmds.push(Command::Bell);
        return;
    };
    keyboard_drag(model, DragPayload::Task(ids[index]), ids[to], true);
    model.select_task(ids[index]);
}

fn move_selected_task_to_column(model: &mut Model, delta: isize, cmds: &mut Vec<Command>) {
    if model.drag.is_dragging() {
        return;
    }
    let Some(task) = model.selected_task().map(|t| t.id) else {
        return;
    };
    let columns = model.board.columns();
    let Some(to) = offset(model.selection.column, delta, columns.len()) else {
        cmds.push(Command::Bell);
        return;
    };
    let over = columns[to].id;
    keyboard_drag(model, DragPayload::Task(task), over, true);
    model.select_task(task);
}

fn cancel_drag(model: &mut Model) {
    if let Some(active) = model.drag.phase().active_id() {
        klog_debug!("Drag cancelled: {}", active.short());
        model.dispatch(DragEvent::End { active, over: None });
    }
    model.sensor.cancel();
    model.pointer = None;
}

// ─── Mouse ──────────────────────────────────────────────────────────────────

fn update_mouse(model: &mut Model, mouse: MouseEvent) {
    let at = Point::new(mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            model.notification = None;
            // A press while a drag is live means its release was lost.
            if model.drag.is_dragging() {
                cancel_drag(model);
            }
            let hit = model.layout().hit(at.x, at.y);

            // Clicking anywhere but the edited entity ends edit mode (blur).
            let editing = match model.mode {
                Mode::Edit(target) => Some(target.id()),
                Mode::Board => None,
            };
            let payload = match hit {
                Some(Hit::ColumnHeader(id)) => Some(DragPayload::Column(id)),
                Some(Hit::Task(id)) => Some(DragPayload::Task(id)),
                _ => None,
            }
            .filter(|p| Some(p.id()) != editing);
            if payload.is_some() || editing.is_some_and(|id| !hit_names(hit, id)) {
                model.mode = Mode::Board;
            }

            model.sensor.press(at, payload);
            model.pointer = Some(at);
            model.dirty = true;
        }

        MouseEventKind::Drag(MouseButton::Left) => {
            model.pointer = Some(at);
            if let Some(payload) = model.sensor.motion(at) {
                klog_trace!("Pointer activated drag at {:?}", at);
                model.dispatch(DragEvent::Start(payload));
            }
            let Some(payload) = model.sensor.active() else {
                return;
            };
            if model.drag.phase().active_id() == Some(payload.id()) {
                let over = drop_target(model, at, payload.kind());
                model.dispatch(DragEvent::Over {
                    active: payload.id(),
                    over,
                });
                // Overlay follows the pointer even when nothing moved.
                model.dirty = true;
            }
        }

        MouseEventKind::Up(MouseButton::Left) => {
            match model.sensor.release() {
                SensorRelease::Drop(payload) => {
                    let over = drop_target(model, at, payload.kind());
                    model.dispatch(DragEvent::End {
                        active: payload.id(),
                        over,
                    });
                    if let Some(task) = model.board.task(payload.id()).map(|t| t.id) {
                        model.select_task(task);
                    } else {
                        model.select_column(payload.id());
                    }
                }
                SensorRelease::Click(origin) => {
                    let layout = model.layout();
                    let pressed = layout.hit(origin.x, origin.y);
                    // A click lands only if the release is over what was pressed.
                    if pressed.is_some() && pressed == layout.hit(at.x, at.y) {
                        click(model, pressed);
                    }
                }
                SensorRelease::None => {}
            }
            model.pointer = None;
            model.dirty = true;
        }

        _ => {}
    }
}

fn drop_target(model: &Model, at: Point, kind: EntityKind) -> Option<Id> {
    model.layout().drop_target(at.x, at.y, kind)
}

/// Whether `hit` is on the header or card of entity `id`.
fn hit_names(hit: Option<Hit>, id: Id) -> bool {
    matches!(hit, Some(Hit::ColumnHeader(h)) | Some(Hit::Task(h)) if h == id)
}

fn click(model: &mut Model, hit: Option<Hit>) {
    let Some(hit) = hit else {
        return;
    };
    klog_trace!("Click on {:?}", hit);
    match hit {
        Hit::AddColumn => create_column(model),
        Hit::AddTask(column) => create_task(model, column),
        Hit::DeleteColumn(id) => delete_column(model, id),
        Hit::DeleteTask(id) => delete_task(model, id),
        Hit::ColumnHeader(id) => begin_edit(model, EditTarget::ColumnTitle(id)),
        Hit::Task(id) => begin_edit(model, EditTarget::TaskContent(id)),
        Hit::ColumnBody(id) => {
            model.select_column(id);
            model.dirty = true;
        }
    }
}
