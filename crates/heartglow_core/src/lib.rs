//! Heartglow Core
//!
//! Foundational types shared by every Heartglow crate:
//!
//! - **Geometry**: `Point`, `Vec2`, `Size`, `Rect`
//! - **Color**: linear RGBA with HSLA construction
//! - **Draw Context**: the 2D drawing surface every animated component renders to
//!
//! # Example
//!
//! ```rust
//! use heartglow_core::{Color, DrawContext, DrawContextExt, Point, RecordingContext, Size};
//!
//! let mut ctx = RecordingContext::new(Size::new(300.0, 300.0));
//! ctx.clear_all();
//! ctx.fill_circle(Point::new(150.0, 150.0), 2.0, Color::WHITE);
//! assert_eq!(ctx.commands().len(), 2);
//! ```

pub mod color;
pub mod draw;
pub mod geometry;

pub use color::Color;
pub use draw::{
    DrawCommand, DrawContext, DrawContextExt, Glyph, GlyphStyle, RecordingContext, TextAlign,
    TextBaseline,
};
pub use geometry::{Point, Rect, Size, Vec2};
