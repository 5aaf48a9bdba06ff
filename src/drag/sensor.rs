//! Pointer sensor: tells a click from the start of a drag.
//!
//! A press over a draggable only becomes a drag once the pointer has
//! travelled `activation_distance` cells from where it went down. Until then a
//! release is reported as a click.

use super::controller::DragPayload;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: u16,
    pub y: u16,
}

impl Point {
    pub fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Chebyshev distance; terminal cells are not square so diagonal travel counts once.
    pub fn distance(&self, other: Point) -> u16 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }
}

/// What a pointer release meant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorRelease {
    /// Nothing was pressed.
    None,
    /// Pressed and released without activating a drag.
    Click(Point),
    /// A drag was active and is now over.
    Drop(DragPayload),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum SensorState {
    #[default]
    Idle,
    Pressed {
        origin: Point,
        payload: Option<DragPayload>,
    },
    Active(DragPayload),
}

#[derive(Debug, Clone)]
pub struct PointerSensor {
    activation_distance: u16,
    state: SensorState,
}

impl PointerSensor {
    pub fn new(activation_distance: u16) -> Self {
        Self {
            activation_distance,
            state: SensorState::Idle,
        }
    }

    /// Pointer went down at `at`, above `payload` (or above nothing draggable).
    pub fn press(&mut self, at: Point, payload: Option<DragPayload>) {
        self.state = SensorState::Pressed {
            origin: at,
            payload,
        };
    }

    /// Pointer moved. Returns the payload once, at the moment the drag activates.
    pub fn motion(&mut self, at: Point) -> Option<DragPayload> {
        let SensorState::Pressed {
            origin,
            payload: Some(payload),
        } = self.state
        else {
            return None;
        };
        if origin.distance(at) < self.activation_distance {
            return None;
        }
        self.state = SensorState::Active(payload);
        Some(payload)
    }

    pub fn release(&mut self) -> SensorRelease {
        match std::mem::take(&mut self.state) {
            SensorState::Idle => SensorRelease::None,
            SensorState::Pressed { origin, .. } => SensorRelease::Click(origin),
            SensorState::Active(payload) => SensorRelease::Drop(payload),
        }
    }

    /// Forget any press in progress.
    pub fn cancel(&mut self) {
        self.state = SensorState::Idle;
    }

    /// The payload of an activated drag.
    pub fn active(&self) -> Option<DragPayload> {
        match self.state {
            SensorState::Active(payload) => Some(payload),
            _ => None,
        }
    }

    #[cfg(test)]
    fn is_pressed(&self) -> bool {
        self.state != SensorState::Idle
    }
}
