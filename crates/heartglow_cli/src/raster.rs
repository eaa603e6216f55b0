//! CPU raster surface
//!
//! A `DrawContext` over a `tiny_skia::Pixmap`, so canvases can be rendered
//! without a browser or GPU. Glyphs are filled vector paths rather than font
//! emoji; the shapes only need to read as hearts, stars, and sparkles in a
//! preview.

use anyhow::{Context, Result};
use heartglow_core::{
    Color, DrawContext, Glyph, GlyphStyle, Point, Rect, Size, TextAlign, TextBaseline,
};
use image::{ImageBuffer, Rgba, RgbaImage};
use std::f32::consts::{FRAC_PI_2, PI};
use std::path::Path;
use tiny_skia::{
    BlendMode, FillRule, Paint, Path as SkPath, PathBuilder, Pixmap, PixmapPaint, Transform,
};

/// Fill for the star and sparkle glyphs
const GOLD: Color = Color::rgb(1.0, 0.84, 0.25);

/// Software surface backed by a tiny-skia pixmap
///
/// A zero-area surface has no pixmap and ignores drawing.
pub struct PixmapSurface {
    size: Size,
    pixmap: Option<Pixmap>,
}

impl PixmapSurface {
    pub fn new(size: Size) -> Self {
        let (width, height) = pixel_dimensions(size);
        Self {
            size: Size::new(width as f32, height as f32),
            pixmap: Pixmap::new(width, height),
        }
    }

    /// Straight-alpha copy of the pixels, composited over `background` when given
    pub fn to_image(&self, background: Option<Color>) -> RgbaImage {
        let Some(pixmap) = &self.pixmap else {
            return ImageBuffer::new(0, 0);
        };

        let flattened = background.and_then(|color| {
            let mut base = Pixmap::new(pixmap.width(), pixmap.height())?;
            let [r, g, b, _] = color.to_rgba8();
            base.fill(tiny_skia::Color::from_rgba8(r, g, b, 255));
            base.draw_pixmap(
                0,
                0,
                pixmap.as_ref(),
                &PixmapPaint::default(),
                Transform::identity(),
                None,
            );
            Some(base)
        });
        let source = flattened.as_ref().unwrap_or(pixmap);

        // tiny-skia stores premultiplied alpha; PNG wants straight alpha
        let mut img: RgbaImage = ImageBuffer::new(source.width(), source.height());
        for (pixel, out) in source.pixels().iter().zip(img.pixels_mut()) {
            let c = pixel.demultiply();
            *out = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
        }
        img
    }

    /// Write the surface as PNG, over `background` when given
    pub fn save_png(&self, path: &Path, background: Option<Color>) -> Result<()> {
        self.to_image(background)
            .save(path)
            .with_context(|| format!("Failed to save PNG {}", path.display()))
    }
}

fn pixel_dimensions(size: Size) -> (u32, u32) {
    let dim = |v: f32| if v.is_finite() && v > 0.0 { v.round() as u32 } else { 0 };
    (dim(size.width), dim(size.height))
}

fn solid_paint(color: Color) -> Paint<'static> {
    let [r, g, b, a] = color.to_rgba8();
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;
    paint
}

impl DrawContext for PixmapSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn resize(&mut self, size: Size) {
        let (width, height) = pixel_dimensions(size);
        let current = self.pixmap.as_ref().map(|p| (p.width(), p.height()));
        if current != Some((width, height)) {
            self.size = Size::new(width as f32, height as f32);
            self.pixmap = Pixmap::new(width, height);
        }
    }

    fn clear(&mut self, rect: Rect) {
        let Some(pixmap) = &mut self.pixmap else {
            return;
        };
        let Some(rect) = tiny_skia::Rect::from_xywh(rect.x(), rect.y(), rect.width(), rect.height())
        else {
            return;
        };
        let mut paint = Paint::default();
        paint.blend_mode = BlendMode::Clear;
        pixmap.fill_rect(rect, &paint, Transform::identity(), None);
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Color) {
        let Some(pixmap) = &mut self.pixmap else {
            return;
        };
        let Some(path) = PathBuilder::from_circle(center.x, center.y, radius) else {
            return;
        };
        pixmap.fill_path(
            &path,
            &solid_paint(color),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }

    fn draw_glyph(&mut self, glyph: Glyph, position: Point, style: &GlyphStyle) {
        if style.size <= 0.0 || style.alpha <= 0.0 {
            return;
        }
        let Some(pixmap) = &mut self.pixmap else {
            return;
        };
        let Some(path) = glyph_path(glyph) else {
            return;
        };

        let half = style.size / 2.0;
        let anchor_x = match style.align {
            TextAlign::Left => half,
            TextAlign::Center => 0.0,
            TextAlign::Right => -half,
        };
        let anchor_y = match style.baseline {
            TextBaseline::Top => half,
            TextBaseline::Middle => 0.0,
            TextBaseline::Alphabetic => -0.35 * style.size,
            TextBaseline::Bottom => -half,
        };

        let color = match glyph {
            Glyph::Heart | Glyph::SparklingHeart => style.color,
            Glyph::Sparkles | Glyph::Star => GOLD,
        };
        let color = color.with_alpha(color.a * style.alpha);

        // Unit shape, scaled to the glyph, offset to its anchor, then rotated
        // about the draw position
        let transform = Transform::from_rotate(style.rotation.to_degrees())
            .post_translate(position.x, position.y)
            .pre_translate(anchor_x, anchor_y)
            .pre_scale(half, half);

        pixmap.fill_path(
            &path,
            &solid_paint(color),
            FillRule::Winding,
            transform,
            None,
        );
    }
}

/// Glyph outline in unit space: centered on the origin, radius about 1, y down
fn glyph_path(glyph: Glyph) -> Option<SkPath> {
    let mut pb = PathBuilder::new();
    match glyph {
        Glyph::Heart | Glyph::SparklingHeart => {
            pb.move_to(0.0, 0.9);
            pb.cubic_to(-0.1, 0.8, -1.0, 0.3, -1.0, -0.25);
            pb.cubic_to(-1.0, -0.75, -0.4, -1.0, 0.0, -0.55);
            pb.cubic_to(0.4, -1.0, 1.0, -0.75, 1.0, -0.25);
            pb.cubic_to(1.0, 0.3, 0.1, 0.8, 0.0, 0.9);
        }
        Glyph::Sparkles => {
            pb.move_to(0.0, -1.0);
            pb.quad_to(0.12, -0.12, 1.0, 0.0);
            pb.quad_to(0.12, 0.12, 0.0, 1.0);
            pb.quad_to(-0.12, 0.12, -1.0, 0.0);
            pb.quad_to(-0.12, -0.12, 0.0, -1.0);
        }
        Glyph::Star => {
            // Five points, one tip straight up
            for i in 0..10 {
                let radius = if i % 2 == 0 { 1.0 } else { 0.45 };
                let angle = FRAC_PI_2 + i as f32 * PI / 5.0;
                let (x, y) = (radius * angle.cos(), -radius * angle.sin());
                if i == 0 {
                    pb.move_to(x, y);
                } else {
                    pb.line_to(x, y);
                }
            }
        }
    }
    pb.close();
    pb.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use heartglow_core::DrawContextExt;

    fn surface() -> PixmapSurface {
        PixmapSurface::new(Size::new(64.0, 64.0))
    }

    fn pixel(surface: &PixmapSurface, x: u32, y: u32) -> [u8; 4] {
        surface.to_image(None).get_pixel(x, y).0
    }

    fn alpha_at(surface: &PixmapSurface, x: u32, y: u32) -> u8 {
        pixel(surface, x, y)[3]
    }

    fn is_blank(surface: &PixmapSurface) -> bool {
        surface.to_image(None).pixels().all(|p| p.0[3] == 0)
    }

    #[test]
    fn test_fill_circle() {
        let mut s = surface();
        s.fill_circle(Point::new(32.0, 32.0), 5.0, Color::WHITE);
        assert_eq!(pixel(&s, 32, 32), [255, 255, 255, 255]);
        assert_eq!(alpha_at(&s, 32, 45), 0);
        assert_eq!(alpha_at(&s, 0, 0), 0);
    }

    #[test]
    fn test_translucent_fill_accumulates() {
        let mut s = surface();
        s.fill_circle(Point::new(10.0, 10.0), 4.0, Color::WHITE.with_alpha(0.5));
        let a = alpha_at(&s, 10, 10);
        assert!((126..=129).contains(&a));

        s.fill_circle(Point::new(10.0, 10.0), 4.0, Color::WHITE.with_alpha(0.5));
        assert!(alpha_at(&s, 10, 10) > a);
    }

    #[test]
    fn test_clear_all() {
        let mut s = surface();
        s.fill_circle(Point::new(32.0, 32.0), 10.0, Color::WHITE);
        s.clear_all();
        assert!(is_blank(&s));
    }

    #[test]
    fn test_partial_clear() {
        let mut s = surface();
        s.fill_circle(Point::new(32.0, 32.0), 30.0, Color::WHITE);
        s.clear(Rect::new(0.0, 0.0, 32.0, 64.0));
        assert_eq!(alpha_at(&s, 16, 32), 0);
        assert_eq!(alpha_at(&s, 48, 32), 255);
    }

    #[test]
    fn test_circle_outside_is_clipped() {
        let mut s = surface();
        s.fill_circle(Point::new(-100.0, 500.0), 10.0, Color::WHITE);
        s.fill_circle(Point::new(0.0, 0.0), 3.0, Color::WHITE);
        assert_eq!(alpha_at(&s, 0, 0), 255);
    }

    #[test]
    fn test_heart_glyph() {
        let mut s = surface();
        let style = GlyphStyle::new(32.0).with_baseline(TextBaseline::Middle);
        s.draw_glyph(Glyph::Heart, Point::new(32.0, 32.0), &style);

        // Filled at the center, empty well outside the outline
        assert_eq!(alpha_at(&s, 32, 32), 255);
        assert_eq!(alpha_at(&s, 2, 2), 0);
        assert_eq!(alpha_at(&s, 32, 62), 0);
    }

    #[test]
    fn test_star_points_up() {
        let mut s = surface();
        let style = GlyphStyle::new(40.0).with_baseline(TextBaseline::Middle);
        s.draw_glyph(Glyph::Star, Point::new(32.0, 32.0), &style);

        assert_eq!(alpha_at(&s, 32, 32), 255);
        // Upper tip reaches y = 12, the notch between the lower tips does not
        assert!(alpha_at(&s, 31, 15) > 0 || alpha_at(&s, 32, 15) > 0);
        assert_eq!(alpha_at(&s, 32, 49), 0);
    }

    #[test]
    fn test_rotated_star_points_down() {
        let mut s = surface();
        let style = GlyphStyle::new(40.0)
            .with_baseline(TextBaseline::Middle)
            .with_rotation(PI);
        s.draw_glyph(Glyph::Star, Point::new(32.0, 32.0), &style);

        assert_eq!(alpha_at(&s, 32, 32), 255);
        assert_eq!(alpha_at(&s, 32, 14), 0);
        assert!(alpha_at(&s, 31, 48) > 0 || alpha_at(&s, 32, 48) > 0);
    }

    #[test]
    fn test_glyph_alpha() {
        let mut s = surface();
        let style = GlyphStyle::new(32.0)
            .with_baseline(TextBaseline::Middle)
            .with_alpha(0.0);
        s.draw_glyph(Glyph::Star, Point::new(32.0, 32.0), &style);
        assert!(is_blank(&s));
    }

    #[test]
    fn test_resize() {
        let mut s = surface();
        s.resize(Size::new(10.0, 20.0));
        assert_eq!(s.to_image(None).dimensions(), (10, 20));
        assert_eq!(s.size(), Size::new(10.0, 20.0));
    }

    #[test]
    fn test_zero_size_ignores_drawing() {
        let mut s = PixmapSurface::new(Size::new(0.0, 0.0));
        s.clear_all();
        s.fill_circle(Point::ZERO, 4.0, Color::WHITE);
        s.draw_glyph(Glyph::Heart, Point::ZERO, &GlyphStyle::new(10.0));
        assert_eq!(s.to_image(None).dimensions(), (0, 0));
    }

    #[test]
    fn test_background_flatten() {
        let mut s = surface();
        s.fill_circle(Point::new(32.0, 32.0), 5.0, Color::WHITE);
        let out = s.to_image(Some(Color::BLACK));
        assert_eq!(out.get_pixel(0, 0).0, [0, 0, 0, 255]);
        assert_eq!(out.get_pixel(32, 32).0, [255, 255, 255, 255]);
    }
}
