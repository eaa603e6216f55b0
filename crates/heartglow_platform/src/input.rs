//! Input event types for mouse and touch, and primary pointer tracking

use heartglow_core::Point;
use tracing::trace;

/// Input events
#[derive(Clone, Debug)]
pub enum InputEvent {
    /// Mouse event
    Mouse(MouseEvent),
    /// Touch event (mobile/touchscreen)
    Touch(TouchEvent),
}

// ============================================================================
// Mouse Events
// ============================================================================

/// Mouse events
#[derive(Clone, Debug)]
pub enum MouseEvent {
    /// Mouse moved to position
    Moved {
        /// X position in window coordinates
        x: f32,
        /// Y position in window coordinates
        y: f32,
    },
    /// Mouse button pressed
    ButtonPressed {
        /// Which button was pressed
        button: MouseButton,
        /// X position when pressed
        x: f32,
        /// Y position when pressed
        y: f32,
    },
    /// Mouse button released
    ButtonReleased {
        /// Which button was released
        button: MouseButton,
        /// X position when released
        x: f32,
        /// Y position when released
        y: f32,
    },
    /// Mouse left the window
    Left,
}

/// Mouse buttons
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

// ============================================================================
// Touch Events
// ============================================================================

/// Touch events for touchscreens
#[derive(Clone, Debug)]
pub enum TouchEvent {
    /// A touch started
    Started {
        /// Unique identifier for this touch
        id: u64,
        x: f32,
        y: f32,
    },
    /// A touch moved
    Moved { id: u64, x: f32, y: f32 },
    /// A touch ended
    Ended { id: u64, x: f32, y: f32 },
    /// A touch was cancelled (e.g., by system gesture)
    Cancelled { id: u64 },
}

impl TouchEvent {
    /// Get the touch ID
    pub fn id(&self) -> u64 {
        match self {
            TouchEvent::Started { id, .. } => *id,
            TouchEvent::Moved { id, .. } => *id,
            TouchEvent::Ended { id, .. } => *id,
            TouchEvent::Cancelled { id } => *id,
        }
    }

    /// Get the position (returns None for Cancelled)
    pub fn position(&self) -> Option<Point> {
        match self {
            TouchEvent::Started { x, y, .. }
            | TouchEvent::Moved { x, y, .. }
            | TouchEvent::Ended { x, y, .. } => Some(Point::new(*x, *y)),
            TouchEvent::Cancelled { .. } => None,
        }
    }
}

// ============================================================================
// Pointer Events
// ============================================================================

/// Phase of a pointer interaction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerPhase {
    /// Primary button pressed or first finger down
    Start,
    /// Pointer moved while pressed
    Move,
    /// Pointer released
    End,
    /// Interaction aborted (touch cancelled, mouse left the window)
    Cancel,
    /// Mouse moved with no button held
    Hover,
}

/// A unified, single-pointer input event
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    /// Screen position; for `Cancel` this is the last known position
    pub position: Point,
}

impl PointerEvent {
    pub fn new(phase: PointerPhase, position: Point) -> Self {
        Self { phase, position }
    }

    pub fn start(x: f32, y: f32) -> Self {
        Self::new(PointerPhase::Start, Point::new(x, y))
    }

    pub fn moved(x: f32, y: f32) -> Self {
        Self::new(PointerPhase::Move, Point::new(x, y))
    }

    pub fn end(x: f32, y: f32) -> Self {
        Self::new(PointerPhase::End, Point::new(x, y))
    }
}

/// Source of the active primary pointer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerSource {
    Mouse,
    Touch(u64),
}

/// Reduces raw mouse and touch input to a single primary pointer
///
/// The first touch point (or the left mouse button) that starts an
/// interaction owns it until it ends; every other touch is ignored.
#[derive(Clone, Debug, Default)]
pub struct PrimaryPointer {
    active: Option<PointerSource>,
    last_position: Point,
}

impl PrimaryPointer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The source currently owning the interaction, if any
    pub fn active(&self) -> Option<PointerSource> {
        self.active
    }

    pub fn is_pressed(&self) -> bool {
        self.active.is_some()
    }

    /// Translate a raw input event into a primary pointer event
    pub fn process(&mut self, event: &InputEvent) -> Option<PointerEvent> {
        let pointer = match event {
            InputEvent::Mouse(mouse) => self.process_mouse(mouse),
            InputEvent::Touch(touch) => self.process_touch(touch),
        };
        if let Some(pointer) = pointer {
            self.last_position = pointer.position;
            trace!(?pointer, "primary pointer");
        }
        pointer
    }

    fn process_mouse(&mut self, event: &MouseEvent) -> Option<PointerEvent> {
        match *event {
            MouseEvent::ButtonPressed {
                button: MouseButton::Left,
                x,
                y,
            } if self.active.is_none() => {
                self.active = Some(PointerSource::Mouse);
                Some(PointerEvent::start(x, y))
            }
            MouseEvent::Moved { x, y } => match self.active {
                Some(PointerSource::Mouse) => Some(PointerEvent::moved(x, y)),
                None => Some(PointerEvent::new(PointerPhase::Hover, Point::new(x, y))),
                Some(PointerSource::Touch(_)) => None,
            },
            MouseEvent::ButtonReleased {
                button: MouseButton::Left,
                x,
                y,
            } if self.active == Some(PointerSource::Mouse) => {
                self.active = None;
                Some(PointerEvent::end(x, y))
            }
            MouseEvent::Left if self.active == Some(PointerSource::Mouse) => {
                self.active = None;
                Some(PointerEvent::new(PointerPhase::Cancel, self.last_position))
            }
            _ => None,
        }
    }

    fn process_touch(&mut self, event: &TouchEvent) -> Option<PointerEvent> {
        let owns = self.active == Some(PointerSource::Touch(event.id()));
        match *event {
            TouchEvent::Started { id, x, y } if self.active.is_none() => {
                self.active = Some(PointerSource::Touch(id));
                Some(PointerEvent::start(x, y))
            }
            TouchEvent::Moved { x, y, .. } if owns => Some(PointerEvent::moved(x, y)),
            TouchEvent::Ended { x, y, .. } if owns => {
                self.active = None;
                Some(PointerEvent::end(x, y))
            }
            TouchEvent::Cancelled { .. } if owns => {
                self.active = None;
                Some(PointerEvent::new(PointerPhase::Cancel, self.last_position))
            }
            _ => None,
        }
    }
}
