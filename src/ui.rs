//! Terminal UI rendering for the board.
//!
//! Columns are rounded boxes laid out left to right, task cards stack inside
//! them, and the dragged entity leaves a dimmed placeholder in its slot while
//! a floating copy follows the pointer.
//!
//! This module renders from RenderState (immutable snapshot) - it never
//! mutates application state. All geometry comes from the snapshot's layout,
//! which is the same layout `update` hit-tests against.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, Paragraph},
    Frame,
};

use crate::drag::Point;
use crate::layout::{ColumnSlot, TaskSlot, HEADER_HEIGHT};
use crate::render::{ColumnView, OverlayView, RenderState, TaskView};
use crate::tea::{EditTarget, Mode, Notification, NotificationLevel};

// Color tokens
const COLOR_ACCENT: Color = Color::Rgb(0xF3, 0x03, 0x7E);
const COLOR_TEXT_DIMMED: Color = Color::Gray;
const COLOR_TEXT_MUTED: Color = Color::DarkGray;
const COLOR_BORDER: Color = Color::Gray;
const COLOR_BADGE: Color = Color::Cyan;
const COLOR_DELETE: Color = Color::Red;

const DELETE_LABEL: &str = "[x]";
const ADD_TASK_LABEL: &str = "+ Add task";
const ADD_COLUMN_LABEL: &str = "+ Add Column";

/// Height of a card in the floating overlay.
const OVERLAY_CARD_HEIGHT: u16 = 3;

// -----------------------------------------------------------------------------
// Context-sensitive keymap system
// -----------------------------------------------------------------------------

/// Context for determining which keybindings to display.
/// Derived from RenderState - this is the "view model" for the statusbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeymapContext {
    /// Browsing the board
    Board { has_column: bool, has_task: bool },
    /// A drag is in flight
    Dragging,
    /// Inline editing of a title or task
    Edit,
}

impl KeymapContext {
    /// Derive keymap context from render state.
    pub fn from_render_state(state: &RenderState) -> Self {
        if state.is_dragging() {
            return KeymapContext::Dragging;
        }
        match state.mode {
            Mode::Edit(_) => KeymapContext::Edit,
            Mode::Board => KeymapContext::Board {
                has_column: !state.columns.is_empty(),
                has_task: state
                    .columns
                    .iter()
                    .flat_map(|c| c.tasks.iter())
                    .any(|t| t.selected),
            },
        }
    }
}

/// A single keybinding entry for display.
struct Keybinding(&'static str, &'static str);

/// A group of related keybindings (separated by │).
struct KeybindingGroup(Vec<Keybinding>);

/// Get keybindings for a given context.
fn keybindings_for_context(ctx: KeymapContext) -> Vec<KeybindingGroup> {
    match ctx {
        KeymapContext::Board {
            has_column,
            has_task,
        } => {
            let navigate = if has_column {
                vec![Keybinding("h/l", "column"), Keybinding("j/k", "task")]
            } else {
                vec![]
            };

            let mut create = vec![Keybinding("n", "new column")];
            if has_column {
                create.push(Keybinding("t", "new task"));
                create.push(Keybinding("e", "edit"));
            }

            let modify = match (has_column, has_task) {
                (_, true) => vec![
                    Keybinding("J/K", "move"),
                    Keybinding("[/]", "to column"),
                    Keybinding("x", "delete"),
                ],
                (true, false) => vec![Keybinding("H/L", "move"), Keybinding("X", "delete")],
                (false, false) => vec![],
            };

            vec![
                KeybindingGroup(navigate),
                KeybindingGroup(create),
                KeybindingGroup(modify),
                KeybindingGroup(vec![Keybinding("q", "quit")]),
            ]
        }
        KeymapContext::Dragging => vec![KeybindingGroup(vec![
            Keybinding("release", "drop"),
            Keybinding("Esc", "cancel"),
        ])],
        KeymapContext::Edit => vec![KeybindingGroup(vec![
            Keybinding("Enter", "done"),
            Keybinding("Esc", "done"),
        ])],
    }
}

/// Main render function - entry point for all UI drawing.
/// Takes an immutable RenderState snapshot.
pub fn draw(frame: &mut Frame, state: &RenderState) {
    let area = frame.area();
    if area.height == 0 || area.width == 0 {
        return;
    }

    render_title_bar(frame, state, row(area, area.y));

    for slot in &state.layout.columns {
        if let Some(view) = state.column(slot.id) {
            render_column(frame, view, slot);
        }
    }
    if let Some(rect) = state.layout.add_column {
        render_add_column(frame, rect);
    }

    if let Some((overlay, at)) = &state.overlay {
        render_overlay(frame, state, overlay, *at);
    }

    if area.height > 1 {
        let bottom = row(area, area.bottom() - 1);
        match state.notification {
            Some(ref notification) => render_notification(frame, notification, bottom),
            None => render_statusbar(frame, state, bottom),
        }
    }
}

/// One-row rect at `y` spanning `area`.
fn row(area: Rect, y: u16) -> Rect {
    Rect {
        x: area.x,
        y,
        width: area.width,
        height: 1,
    }
}

/// Render `widget` clipped to the frame.
fn render_clipped<W: ratatui::widgets::Widget>(frame: &mut Frame, widget: W, rect: Rect) {
    let rect = rect.intersection(frame.area());
    if rect.width > 0 && rect.height > 0 {
        frame.render_widget(widget, rect);
    }
}

/// Render the title bar: board name and totals.
fn render_title_bar(frame: &mut Frame, state: &RenderState, area: Rect) {
    render_clipped(frame, Paragraph::new(title_line(state)), area);
}

fn title_line(state: &RenderState) -> Line<'static> {
    let muted = Style::default().fg(COLOR_TEXT_MUTED);
    let mut spans = vec![
        Span::styled(" Kanban", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled("  ", muted),
        Span::styled(plural(state.columns.len(), "column"), muted),
        Span::styled(" • ", muted),
        Span::styled(plural(state.task_total, "task"), muted),
    ];
    if state.is_dragging() {
        spans.push(Span::styled("  dragging", Style::default().fg(COLOR_ACCENT)));
    }
    Line::from(spans)
}

fn plural(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{n} {noun}")
    } else {
        format!("{n} {noun}s")
    }
}

// -----------------------------------------------------------------------------
// Columns and cards
// -----------------------------------------------------------------------------

fn border_style(selected: bool) -> Style {
    if selected {
        Style::default().fg(COLOR_ACCENT)
    } else {
        Style::default().fg(COLOR_BORDER)
    }
}

/// Dimmed outline left behind by the entity being dragged.
fn render_placeholder(frame: &mut Frame, area: Rect) {
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(
            Style::default()
                .fg(COLOR_TEXT_MUTED)
                .add_modifier(Modifier::DIM),
        );
    render_clipped(frame, block, area);
}

fn render_column(frame: &mut Frame, view: &ColumnView, slot: &ColumnSlot) {
    if view.dragging {
        render_placeholder(frame, slot.area);
        return;
    }

    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(border_style(view.selected || view.editing));
    render_clipped(frame, block, slot.area);

    // Header: count badge, title, delete button.
    let inner_x = slot.area.x + 1;
    let title_y = slot.area.y + 1;
    let title_width = slot.delete.x.saturating_sub(inner_x + 1);
    let mut spans = vec![
        Span::styled(
            format!(" {} ", view.task_count),
            Style::default().fg(Color::Black).bg(COLOR_BADGE),
        ),
        Span::raw(" "),
    ];
    let badge_width = view.task_count.to_string().chars().count() + 3;
    let room = (title_width as usize).saturating_sub(badge_width);
    spans.extend(editable_text(&view.title, view.editing, room, Modifier::BOLD));
    render_clipped(
        frame,
        Paragraph::new(Line::from(spans)),
        Rect::new(inner_x, title_y, title_width, 1),
    );
    render_clipped(
        frame,
        Paragraph::new(Span::styled(DELETE_LABEL, Style::default().fg(COLOR_DELETE))),
        slot.delete,
    );

    // Separator under the header.
    if slot.area.height > HEADER_HEIGHT {
        let rule = "─".repeat(slot.body.width as usize);
        render_clipped(
            frame,
            Paragraph::new(Span::styled(rule, Style::default().fg(COLOR_TEXT_MUTED))),
            Rect::new(inner_x, slot.area.y + HEADER_HEIGHT - 1, slot.body.width, 1),
        );
    }

    for card in &slot.tasks {
        if let Some(task) = view.tasks.iter().find(|t| t.id == card.id) {
            render_card(frame, task, card);
        }
    }

    render_add_task_row(frame, slot);
}

fn render_card(frame: &mut Frame, task: &TaskView, slot: &TaskSlot) {
    if task.dragging {
        render_placeholder(frame, slot.card);
        return;
    }

    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(border_style(task.selected || task.editing));
    render_clipped(frame, block, slot.card);

    let text_x = slot.card.x + 1;
    let text_width = slot.delete.x.saturating_sub(text_x + 1);
    let spans = editable_text(
        &task.content,
        task.editing,
        text_width as usize,
        Modifier::empty(),
    );
    render_clipped(
        frame,
        Paragraph::new(Line::from(spans)),
        Rect::new(text_x, slot.card.y + 1, text_width, 1),
    );
    render_clipped(
        frame,
        Paragraph::new(Span::styled(DELETE_LABEL, Style::default().fg(COLOR_DELETE))),
        slot.delete,
    );
}

/// Text for a title or task; while editing, the tail stays visible behind a cursor.
fn editable_text(text: &str, editing: bool, width: usize, modifier: Modifier) -> Vec<Span<'static>> {
    if !editing {
        return vec![Span::styled(
            truncate(text, width),
            Style::default().add_modifier(modifier),
        )];
    }
    let visible = width.saturating_sub(1);
    let skip = text.chars().count().saturating_sub(visible);
    let tail: String = text.chars().skip(skip).collect();
    vec![
        Span::styled(tail, Style::default().fg(Color::White).add_modifier(modifier)),
        Span::styled(
            "_",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::SLOW_BLINK),
        ),
    ]
}

fn render_add_task_row(frame: &mut Frame, slot: &ColumnSlot) {
    let mut spans = vec![Span::styled(
        ADD_TASK_LABEL,
        Style::default().fg(COLOR_TEXT_DIMMED),
    )];
    if slot.hidden_tasks > 0 {
        let more = format!("… {} more", slot.hidden_tasks);
        let pad = (slot.add_task.width as usize)
            .saturating_sub(ADD_TASK_LABEL.chars().count() + more.chars().count());
        spans.push(Span::raw(" ".repeat(pad)));
        spans.push(Span::styled(more, Style::default().fg(COLOR_TEXT_MUTED)));
    }
    render_clipped(frame, Paragraph::new(Line::from(spans)), slot.add_task);
}

fn render_add_column(frame: &mut Frame, rect: Rect) {
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(COLOR_TEXT_MUTED));
    render_clipped(frame, block, rect);
    render_clipped(
        frame,
        Paragraph::new(Span::styled(
            ADD_COLUMN_LABEL,
            Style::default().fg(COLOR_TEXT_DIMMED),
        )),
        Rect::new(rect.x + 2, rect.y + 1, rect.width.saturating_sub(4), 1),
    );
}

// -----------------------------------------------------------------------------
// Drag overlay
// -----------------------------------------------------------------------------

/// Place a `width` x `height` box with its top-left corner at `at`, pushed
/// back inside `frame` when it would overflow.
fn overlay_rect(frame: Rect, at: Point, width: u16, height: u16) -> Rect {
    let width = width.min(frame.width);
    let height = height.min(frame.height);
    Rect {
        x: at.x.min(frame.right().saturating_sub(width)).max(frame.x),
        y: at.y.min(frame.bottom().saturating_sub(height)).max(frame.y),
        width,
        height,
    }
}

fn render_overlay(frame: &mut Frame, state: &RenderState, overlay: &OverlayView, at: Point) {
    let column_width = state
        .layout
        .columns
        .first()
        .map(|c| c.area.width)
        .unwrap_or(crate::config::DEFAULT_COLUMN_WIDTH);
    let accent = Style::default().fg(COLOR_ACCENT);

    match overlay {
        OverlayView::Task { content } => {
            let card_width = column_width.saturating_sub(2);
            let rect = overlay_rect(frame.area(), at, card_width, OVERLAY_CARD_HEIGHT);
            render_clipped(frame, Clear, rect);
            let block = Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(accent);
            let text = truncate(content, rect.width.saturating_sub(2) as usize);
            render_clipped(frame, Paragraph::new(text).block(block), rect);
        }
        OverlayView::Column {
            title,
            task_count,
            tasks,
        } => {
            let more = task_count.saturating_sub(tasks.len());
            let mut lines = vec![Line::from(vec![
                Span::styled(
                    format!(" {task_count} "),
                    Style::default().fg(Color::Black).bg(COLOR_BADGE),
                ),
                Span::raw(" "),
                Span::styled(title.clone(), Style::default().add_modifier(Modifier::BOLD)),
            ])];
            lines.extend(tasks.iter().map(|t| Line::from(format!("• {t}"))));
            if more > 0 {
                lines.push(Line::from(Span::styled(
                    format!("… {more} more"),
                    Style::default().fg(COLOR_TEXT_MUTED),
                )));
            }

            let height = lines.len() as u16 + 2;
            let rect = overlay_rect(frame.area(), at, column_width, height);
            render_clipped(frame, Clear, rect);
            let block = Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(accent);
            render_clipped(frame, Paragraph::new(lines).block(block), rect);
        }
    }
}

// -----------------------------------------------------------------------------
// Status bar
// -----------------------------------------------------------------------------

/// Render the status bar - single bottom line with conditional display.
/// Shows either:
/// - Edit prompt (when editing a title or task)
/// - "?" indicator only (when keymap is collapsed)
/// - "? │ <full keymap>" (when keymap is expanded via '?' toggle)
fn render_statusbar(frame: &mut Frame, state: &RenderState, area: Rect) {
    let line = match state.mode {
        Mode::Edit(target) => edit_line(state, target),
        Mode::Board => keymap_line(state),
    };
    render_clipped(frame, Paragraph::new(line), area);
}

/// Keybindings legend for the bottom line.
fn keymap_line(state: &RenderState) -> Line<'static> {
    let ctx = KeymapContext::from_render_state(state);
    let groups = keybindings_for_context(ctx);

    let key_style = Style::default().fg(COLOR_TEXT_DIMMED);
    let desc_style = Style::default().fg(COLOR_TEXT_MUTED);
    let sep_style = Style::default().fg(COLOR_TEXT_MUTED);

    // Dimmed '?' when collapsed, bright when expanded.
    let help_style = if state.show_keymap {
        Style::default()
    } else {
        Style::default().fg(COLOR_TEXT_MUTED)
    };
    let mut spans: Vec<Span> = vec![Span::raw(" "), Span::styled("?", help_style)];

    if state.show_keymap || ctx == KeymapContext::Dragging {
        for group in groups.iter().filter(|g| !g.0.is_empty()) {
            spans.push(Span::styled(" │ ", sep_style));
            for (key_idx, keybinding) in group.0.iter().enumerate() {
                if key_idx > 0 {
                    spans.push(Span::styled(" • ", sep_style));
                }
                spans.push(Span::styled(keybinding.0, key_style));
                spans.push(Span::styled(format!(" {}", keybinding.1), desc_style));
            }
        }
    }

    Line::from(spans)
}

/// Edit prompt for the bottom line (replaces keymap while editing).
fn edit_line(state: &RenderState, target: EditTarget) -> Line<'static> {
    let hint_style = Style::default().fg(COLOR_TEXT_MUTED);
    let text = match target {
        EditTarget::ColumnTitle(id) => state.column(id).map(|c| c.title.clone()),
        EditTarget::TaskContent(id) => state
            .columns
            .iter()
            .flat_map(|c| c.tasks.iter())
            .find(|t| t.id == id)
            .map(|t| t.content.clone()),
    }
    .unwrap_or_default();

    Line::from(vec![
        Span::styled(" Enter ", hint_style),
        Span::styled("• ", hint_style),
        Span::styled("Esc ", hint_style),
        Span::styled(" ", hint_style),
        Span::styled(format!("{}: ", target.label()), Style::default().fg(Color::Reset)),
        Span::styled(text, Style::default().fg(Color::White)),
        Span::styled(
            "_",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::SLOW_BLINK),
        ),
    ])
}

/// Render notification in the status bar.
/// - Error: Red text with "Error:" prefix and bold styling
/// - Info: Green text without prefix
fn render_notification(frame: &mut Frame, notification: &Notification, area: Rect) {
    render_clipped(frame, Clear, area);

    let line = match notification.level {
        NotificationLevel::Error => Line::from(vec![
            Span::styled(
                " Error: ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                notification.message.clone(),
                Style::default().fg(Color::Red),
            ),
        ]),
        NotificationLevel::Info => Line::from(Span::styled(
            format!(" {}", notification.message),
            Style::default().fg(Color::Green),
        )),
    };

    render_clipped(frame, Paragraph::new(line), area);
}

// Helper functions

fn truncate(s: &str, max_len: usize) -> String {
    if max_len == 0 {
        return String::new();
    }
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 1).collect();
        format!("{}~", truncated)
    }
}
