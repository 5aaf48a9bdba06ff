//! Board domain: identifiers, records, and the state store.

pub mod id;
pub mod model;
pub mod state;

pub use id::Id;
pub use model::{ActiveEntity, Column, EntityKind, Task};
pub use state::{array_move, BoardState, Collection};
