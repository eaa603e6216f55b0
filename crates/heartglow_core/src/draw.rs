//! Draw Context - the 2D drawing surface
//!
//! Every animated component renders through the `DrawContext` trait. The
//! surface only needs four capabilities: clearing a region, filling a circle,
//! drawing a glyph, and reporting its (resizable) dimensions. Hosts implement
//! it over a browser canvas, a GPU layer, or a CPU pixmap.
//!
//! `RecordingContext` records commands instead of drawing them, which makes
//! rendering order and parameters observable in tests.
//!
//! # Example
//!
//! ```ignore
//! fn paint(ctx: &mut dyn DrawContext) {
//!     ctx.clear_all();
//!     ctx.draw_glyph(
//!         Glyph::Heart,
//!         Point::new(40.0, 60.0),
//!         &GlyphStyle::new(24.0).with_alpha(0.5),
//!     );
//! }
//! ```

use crate::color::Color;
use crate::geometry::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Glyphs
// ─────────────────────────────────────────────────────────────────────────────

/// Emoji-like glyphs drawn by the particle systems
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Glyph {
    /// ❤️
    Heart,
    /// 💖
    SparklingHeart,
    /// ✨
    Sparkles,
    /// ⭐
    Star,
}

impl Glyph {
    /// Glyphs a gift-box burst picks from
    pub const BURST: [Glyph; 4] = [
        Glyph::Heart,
        Glyph::Sparkles,
        Glyph::SparklingHeart,
        Glyph::Star,
    ];

    /// Text the host should render for this glyph
    pub fn as_str(&self) -> &'static str {
        match self {
            Glyph::Heart => "\u{2764}\u{FE0F}",
            Glyph::SparklingHeart => "\u{1F496}",
            Glyph::Sparkles => "\u{2728}",
            Glyph::Star => "\u{2B50}",
        }
    }
}

/// Horizontal text alignment relative to the draw position
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

/// Vertical text anchor relative to the draw position
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextBaseline {
    Top,
    Middle,
    #[default]
    Alphabetic,
    Bottom,
}

/// Glyph rendering parameters
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphStyle {
    /// Font size in pixels
    pub size: f32,
    /// Global alpha applied to the glyph
    pub alpha: f32,
    /// Rotation around the draw position (radians)
    pub rotation: f32,
    /// Fill color for hosts that render monochrome glyphs
    pub color: Color,
    pub align: TextAlign,
    pub baseline: TextBaseline,
}

impl GlyphStyle {
    pub fn new(size: f32) -> Self {
        Self {
            size,
            alpha: 1.0,
            rotation: 0.0,
            color: Color::ROSE,
            align: TextAlign::Center,
            baseline: TextBaseline::Alphabetic,
        }
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_baseline(mut self, baseline: TextBaseline) -> Self {
        self.baseline = baseline;
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// DrawContext Trait
// ─────────────────────────────────────────────────────────────────────────────

/// The drawing surface every animated component renders to
pub trait DrawContext {
    /// Current surface dimensions
    fn size(&self) -> Size;

    /// Change the surface dimensions (window resize)
    fn resize(&mut self, size: Size);

    /// Clear a region to fully transparent
    fn clear(&mut self, rect: Rect);

    /// Fill a circle with a solid color
    fn fill_circle(&mut self, center: Point, radius: f32, color: Color);

    /// Draw a single glyph
    fn draw_glyph(&mut self, glyph: Glyph, position: Point, style: &GlyphStyle);
}

/// Convenience helpers available on every `DrawContext`
pub trait DrawContextExt: DrawContext {
    /// Clear the whole surface
    fn clear_all(&mut self) {
        let rect = self.size().to_rect();
        self.clear(rect);
    }
}

impl<T: DrawContext + ?Sized> DrawContextExt for T {}

impl<T: DrawContext + ?Sized> DrawContext for &mut T {
    fn size(&self) -> Size {
        (**self).size()
    }

    fn resize(&mut self, size: Size) {
        (**self).resize(size)
    }

    fn clear(&mut self, rect: Rect) {
        (**self).clear(rect)
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Color) {
        (**self).fill_circle(center, radius, color)
    }

    fn draw_glyph(&mut self, glyph: Glyph, position: Point, style: &GlyphStyle) {
        (**self).draw_glyph(glyph, position, style)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Recording
// ─────────────────────────────────────────────────────────────────────────────

/// A recorded drawing command
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(Rect),
    FillCircle {
        center: Point,
        radius: f32,
        color: Color,
    },
    Glyph {
        glyph: Glyph,
        position: Point,
        style: GlyphStyle,
    },
}

/// A `DrawContext` that records commands instead of rasterizing them
#[derive(Clone, Debug)]
pub struct RecordingContext {
    commands: Vec<DrawCommand>,
    viewport: Size,
    keep_history: bool,
}

impl RecordingContext {
    /// Create a new recording context that keeps every command
    pub fn new(viewport: Size) -> Self {
        Self {
            commands: Vec::new(),
            viewport,
            keep_history: true,
        }
    }

    /// A recording context that drops earlier frames on every full clear
    ///
    /// Memory stays bounded by one frame, for long headless runs.
    pub fn last_frame_only(viewport: Size) -> Self {
        Self {
            keep_history: false,
            ..Self::new(viewport)
        }
    }

    /// Get the recorded commands
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Commands recorded since the last full clear
    pub fn last_frame(&self) -> &[DrawCommand] {
        let full = self.viewport.to_rect();
        let start = self
            .commands
            .iter()
            .rposition(|cmd| matches!(cmd, DrawCommand::Clear(rect) if *rect == full))
            .map(|i| i + 1)
            .unwrap_or(0);
        &self.commands[start..]
    }
}

impl DrawContext for RecordingContext {
    fn size(&self) -> Size {
        self.viewport
    }

    fn resize(&mut self, size: Size) {
        self.viewport = size;
    }

    fn clear(&mut self, rect: Rect) {
        if !self.keep_history && rect == self.viewport.to_rect() {
            self.commands.clear();
        }
        self.commands.push(DrawCommand::Clear(rect));
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Color) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn draw_glyph(&mut self, glyph: Glyph, position: Point, style: &GlyphStyle) {
        self.commands.push(DrawCommand::Glyph {
            glyph,
            position,
            style: *style,
        });
    }
}
