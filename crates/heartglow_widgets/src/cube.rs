//! Drag-to-rotate cube

use heartglow_core::Point;
use heartglow_platform::{PointerEvent, PointerPhase};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;

/// Cube configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CubeConfig {
    /// Degrees of rotation per pixel dragged
    pub sensitivity: f32,
}

impl Default for CubeConfig {
    fn default() -> Self {
        Self { sensitivity: 0.5 }
    }
}

/// Accumulated cube rotation in degrees (unbounded)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CubeRotation {
    /// Rotation around the horizontal axis
    pub x: f32,
    /// Rotation around the vertical axis
    pub y: f32,
}

impl fmt::Display for CubeRotation {
    /// CSS transform for the cube element
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rotateX({}deg) rotateY({}deg)", self.x, self.y)
    }
}

/// Turns pointer drags into cube rotation
///
/// Horizontal drags spin around the vertical axis, vertical drags tilt
/// around the horizontal axis (dragging up tilts the top away).
#[derive(Clone, Debug, Default)]
pub struct CubeController {
    config: CubeConfig,
    rotation: CubeRotation,
    drag_origin: Option<Point>,
}

impl CubeController {
    pub fn new(config: CubeConfig) -> Self {
        Self {
            config,
            rotation: CubeRotation::default(),
            drag_origin: None,
        }
    }

    pub fn rotation(&self) -> CubeRotation {
        self.rotation
    }

    /// Whether a drag is in progress; hosts use it to toggle a drag style
    pub fn is_dragging(&self) -> bool {
        self.drag_origin.is_some()
    }

    pub fn drag_start(&mut self, position: Point) {
        self.drag_origin = Some(position);
    }

    /// Rotate by the distance moved since the previous drag position
    ///
    /// Returns the new rotation, or `None` when no drag is in progress.
    pub fn drag_move(&mut self, position: Point) -> Option<CubeRotation> {
        let origin = self.drag_origin?;
        let delta = position - origin;
        self.rotation.y += delta.x * self.config.sensitivity;
        self.rotation.x -= delta.y * self.config.sensitivity;
        self.drag_origin = Some(position);
        trace!(rotation = %self.rotation, "cube rotated");
        Some(self.rotation)
    }

    pub fn drag_end(&mut self) {
        self.drag_origin = None;
    }

    /// Feed a pointer event captured by the cube
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> Option<CubeRotation> {
        match event.phase {
            PointerPhase::Start => {
                self.drag_start(event.position);
                None
            }
            PointerPhase::Move => self.drag_move(event.position),
            PointerPhase::End | PointerPhase::Cancel => {
                self.drag_end();
                None
            }
            PointerPhase::Hover => None,
        }
    }
}
