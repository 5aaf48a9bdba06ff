//! Commands for the TEA (The Elm Architecture) pattern.
//!
//! Commands are outputs from the update function - they represent side effects
//! to be executed by the runtime. Board edits happen inside `update`; only
//! effects that reach outside the model are commands.

/// Output commands from the update function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Ring the terminal bell (rejected action, e.g. moving past the last column).
    Bell,

    // App lifecycle
    Quit,
}
