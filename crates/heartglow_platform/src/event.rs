//! Host events

use crate::input::InputEvent;
use std::time::Duration;

/// Platform events
#[derive(Clone, Debug)]
pub enum Event {
    /// Window-related event
    Window(WindowEvent),
    /// Input event (mouse, touch)
    Input(InputEvent),
    /// Application lifecycle event
    Lifecycle(LifecycleEvent),
    /// Display refresh - time to advance and redraw every animated surface
    ///
    /// `dt` is the wall time since the previous refresh. Motion itself is
    /// per-frame, so `dt` only drives timers and the counter.
    Frame { dt: Duration },
}

/// Window events
#[derive(Clone, Debug)]
pub enum WindowEvent {
    /// Window was resized
    Resized {
        /// New width in logical pixels
        width: f32,
        /// New height in logical pixels
        height: f32,
    },
    /// Window gained or lost focus
    Focused(bool),
}

/// Application lifecycle events
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// Page became visible again
    Resumed,
    /// Page hidden; the host stops delivering refreshes
    Suspended,
}
