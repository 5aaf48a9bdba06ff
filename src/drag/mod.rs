//! Drag and drop: the session controller and the pointer sensor that feeds it.

pub mod controller;
pub mod sensor;

pub use controller::{DragController, DragEvent, DragOutcome, DragPayload, DragPhase};
pub use sensor::{Point, PointerSensor, SensorRelease};
