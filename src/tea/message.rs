//! Messages for the TEA (The Elm Architecture) pattern.
//!
//! Messages are inputs to the update function - terminal events from the
//! logic thread, or drag events from any other driver of the board.

use crossterm::event::{KeyEvent, MouseEvent};

use crate::drag::DragEvent;

/// Input messages to the update function.
#[derive(Debug)]
pub enum Message {
    // Keyboard/terminal events
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),

    /// A drag lifecycle event delivered directly, bypassing the pointer sensor.
    Drag(DragEvent),
}
