//! Heartglow Platform Abstraction
//!
//! The host (browser binding, native window, or headless driver) translates
//! its native events into the types defined here:
//!
//! - **Input**: mouse and touch events, reduced to a single primary pointer
//! - **Events**: window resize, lifecycle, and per-refresh frame ticks

pub mod event;
pub mod input;

pub use event::{Event, LifecycleEvent, WindowEvent};
pub use input::{
    InputEvent, MouseButton, MouseEvent, PointerEvent, PointerPhase, PointerSource,
    PrimaryPointer, TouchEvent,
};
