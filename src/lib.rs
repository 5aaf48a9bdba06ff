pub mod board;
pub mod config;
pub mod drag;
pub mod error;
pub mod layout;
pub mod log;

// Decoupled game loop architecture
pub mod app;
pub mod render;
pub mod tea;
pub mod ui;

pub use board::{BoardState, Column, Id, Task};
pub use drag::{DragController, DragEvent, DragOutcome, DragPayload};
pub use error::{Error, Result};
