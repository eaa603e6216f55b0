//! Particle fields
//!
//! A `ParticleField` is a fixed-size pool of 2D particles that drift by a
//! constant per-frame velocity. Particles are never destroyed: when one leaves
//! the surface it is wrapped to the opposite edge or respawned below the
//! bottom edge, depending on the field's `EdgePolicy`.
//!
//! The three fields on the greeting page differ only in their constants, so
//! they are presets of one `ParticleConfig`:
//!
//! ```ignore
//! let sparkles = ParticleField::new(ParticleConfig::sparkles(), size, seed);
//! let hearts = ParticleField::new(ParticleConfig::floating_hearts(), size, seed);
//! let final_hearts = ParticleField::new(ParticleConfig::final_hearts(), size, seed);
//! ```

use crate::scheduler::{FrameInfo, FrameSubject};
use heartglow_core::{Color, DrawContext, Glyph, GlyphStyle, Point, Size, TextBaseline, Vec2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;
use std::ops::Range;
use tracing::debug;

/// How particles are drawn
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticleShape {
    /// Filled circle with radius = particle size
    Circle,
    /// Glyph with font size = particle size
    Glyph(Glyph),
}

/// What happens to a particle that leaves the surface
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgePolicy {
    /// Re-enter from the opposite edge; positions always stay in `[0, w) x [0, h)`
    Wrap,
    /// Rise-and-recycle: a particle above `-margin` restarts at `height + margin`
    /// with a fresh random x; horizontal exits past `margin` wrap to the other side.
    /// New particles start up to `spawn_depth` below the bottom edge.
    Respawn { margin: f32, spawn_depth: f32 },
}

/// How a particle's opacity evolves
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpacityMode {
    /// Keep the opacity sampled at spawn
    Constant,
    /// `|sin(t_ms * 0.001 + x)|`, so neighbouring particles twinkle out of phase
    Twinkle,
}

/// Pull toward an attractor point within a capture radius
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Attraction {
    /// Particles farther than this are unaffected
    pub radius: f32,
    /// Fraction of the distance vector applied per frame
    pub strength: f32,
}

impl Default for Attraction {
    fn default() -> Self {
        Self {
            radius: 100.0,
            strength: 0.02,
        }
    }
}

/// Configuration shared by every particle in a field
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleConfig {
    /// Pool size
    pub count: usize,
    pub shape: ParticleShape,
    pub color: Color,
    /// Glyph vertical anchor (ignored for circles)
    pub baseline: TextBaseline,
    /// Radius (circles) or font size (glyphs)
    pub size: Range<f32>,
    /// Horizontal displacement per frame
    pub speed_x: Range<f32>,
    /// Vertical displacement per frame; negative values rise
    pub speed_y: Range<f32>,
    pub opacity: Range<f32>,
    /// Rotation per frame (radians); glyphs with a non-zero range also start at a random angle
    pub rotation_speed: Range<f32>,
    pub opacity_mode: OpacityMode,
    pub edges: EdgePolicy,
    /// Pull toward the attractor passed to `tick`
    pub attraction: Option<Attraction>,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self::sparkles()
    }
}

impl ParticleConfig {
    /// White twinkling dots drifting in every direction
    pub fn sparkles() -> Self {
        Self {
            count: 50,
            shape: ParticleShape::Circle,
            color: Color::WHITE,
            baseline: TextBaseline::Alphabetic,
            size: 1.0..4.0,
            speed_x: -0.25..0.25,
            speed_y: -0.25..0.25,
            opacity: 0.0..1.0,
            rotation_speed: 0.0..0.0,
            opacity_mode: OpacityMode::Twinkle,
            edges: EdgePolicy::Wrap,
            attraction: None,
        }
    }

    /// Rotating hearts rising from below, drawn toward the pointer
    pub fn floating_hearts() -> Self {
        Self {
            count: 30,
            shape: ParticleShape::Glyph(Glyph::Heart),
            color: Color::ROSE,
            baseline: TextBaseline::Middle,
            size: 10.0..30.0,
            speed_x: -0.25..0.25,
            speed_y: -1.5..-0.5,
            opacity: 0.3..0.8,
            rotation_speed: -0.01..0.01,
            opacity_mode: OpacityMode::Constant,
            edges: EdgePolicy::Respawn {
                margin: 50.0,
                spawn_depth: 100.0,
            },
            attraction: Some(Attraction::default()),
        }
    }

    /// Large, faint hearts rising straight up
    pub fn final_hearts() -> Self {
        Self {
            count: 15,
            shape: ParticleShape::Glyph(Glyph::Heart),
            color: Color::ROSE,
            baseline: TextBaseline::Alphabetic,
            size: 20.0..50.0,
            speed_x: 0.0..0.0,
            speed_y: -3.0..-1.0,
            opacity: 0.2..0.5,
            rotation_speed: 0.0..0.0,
            opacity_mode: OpacityMode::Constant,
            edges: EdgePolicy::Respawn {
                margin: 50.0,
                spawn_depth: 100.0,
            },
            attraction: None,
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }
}

/// Uniform sample from a range; a degenerate or inverted range yields its start
pub(crate) fn sample(rng: &mut StdRng, range: &Range<f32>) -> f32 {
    if range.end > range.start {
        range.start + rng.gen::<f32>() * (range.end - range.start)
    } else {
        range.start
    }
}

/// Map `value` into `[0, extent)`
fn wrap_coord(value: f32, extent: f32) -> f32 {
    if extent <= 0.0 {
        return 0.0;
    }
    let wrapped = value.rem_euclid(extent);
    // rem_euclid can round up to exactly `extent` for tiny negative inputs
    if wrapped >= extent {
        0.0
    } else {
        wrapped
    }
}

/// A single particle
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: Point,
    /// Displacement per frame
    pub velocity: Vec2,
    pub size: f32,
    pub opacity: f32,
    pub color: Color,
    /// Current rotation (radians)
    pub rotation: f32,
    /// Rotation per frame (radians)
    pub rotation_speed: f32,
}

/// A fixed-size pool of particles sharing one configuration
#[derive(Debug)]
pub struct ParticleField {
    config: ParticleConfig,
    bounds: Size,
    particles: Vec<Particle>,
    attractor: Option<Point>,
    rng: StdRng,
}

impl ParticleField {
    /// Create a field with a deterministic random sequence
    pub fn new(config: ParticleConfig, bounds: Size, seed: u64) -> Self {
        Self::with_rng(config, bounds, StdRng::seed_from_u64(seed))
    }

    /// Create a field seeded from OS entropy
    pub fn from_entropy(config: ParticleConfig, bounds: Size) -> Self {
        Self::with_rng(config, bounds, StdRng::from_entropy())
    }

    fn with_rng(config: ParticleConfig, bounds: Size, mut rng: StdRng) -> Self {
        let particles = (0..config.count)
            .map(|_| spawn(&config, bounds, &mut rng))
            .collect();
        debug!(count = config.count, ?bounds, "particle field created");
        Self {
            config,
            bounds,
            particles,
            attractor: None,
            rng,
        }
    }

    pub fn config(&self) -> &ParticleConfig {
        &self.config
    }

    pub fn bounds(&self) -> Size {
        self.bounds
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Point used as attractor by `FrameSubject::update`
    pub fn attractor(&self) -> Option<Point> {
        self.attractor
    }

    pub fn set_attractor(&mut self, attractor: Option<Point>) {
        self.attractor = attractor;
    }

    /// Change the bounds; particles outside are brought back on the next tick
    pub fn resize(&mut self, bounds: Size) {
        debug!(?bounds, "particle field resized");
        self.bounds = bounds;
    }

    /// Advance every particle by one frame
    ///
    /// `elapsed_ms` drives twinkling opacity; `attractor` pulls particles
    /// within the configured capture radius.
    pub fn tick(&mut self, elapsed_ms: f32, attractor: Option<Point>) {
        let bounds = self.bounds;
        let attraction = self.config.attraction;

        for particle in &mut self.particles {
            particle.position += particle.velocity;
            particle.rotation += particle.rotation_speed;

            if let (Some(attraction), Some(target)) = (attraction, attractor) {
                let to_target = target - particle.position;
                if to_target.length() < attraction.radius {
                    particle.position += to_target * attraction.strength;
                }
            }

            match self.config.edges {
                EdgePolicy::Wrap => {
                    particle.position.x = wrap_coord(particle.position.x, bounds.width);
                    particle.position.y = wrap_coord(particle.position.y, bounds.height);
                }
                EdgePolicy::Respawn { margin, .. } => {
                    if particle.position.y < -margin {
                        particle.position.y = bounds.height + margin;
                        particle.position.x = self.rng.gen::<f32>() * bounds.width;
                    }
                    if particle.position.x < -margin {
                        particle.position.x = bounds.width + margin;
                    } else if particle.position.x > bounds.width + margin {
                        particle.position.x = -margin;
                    }
                }
            }

            if self.config.opacity_mode == OpacityMode::Twinkle {
                particle.opacity = (elapsed_ms * 0.001 + particle.position.x).sin().abs();
            }
        }
    }

    /// Draw every particle in pool order
    pub fn draw(&self, ctx: &mut dyn DrawContext) {
        for particle in &self.particles {
            match self.config.shape {
                ParticleShape::Circle => {
                    ctx.fill_circle(
                        particle.position,
                        particle.size,
                        particle.color.with_alpha(particle.opacity),
                    );
                }
                ParticleShape::Glyph(glyph) => {
                    let style = GlyphStyle::new(particle.size)
                        .with_alpha(particle.opacity)
                        .with_rotation(particle.rotation)
                        .with_color(particle.color)
                        .with_baseline(self.config.baseline);
                    ctx.draw_glyph(glyph, particle.position, &style);
                }
            }
        }
    }
}

fn spawn(config: &ParticleConfig, bounds: Size, rng: &mut StdRng) -> Particle {
    let x = rng.gen::<f32>() * bounds.width;
    let y = match config.edges {
        EdgePolicy::Wrap => rng.gen::<f32>() * bounds.height,
        EdgePolicy::Respawn { spawn_depth, .. } => bounds.height + rng.gen::<f32>() * spawn_depth,
    };
    let rotates = config.rotation_speed.end > config.rotation_speed.start;

    Particle {
        position: Point::new(wrap_or_keep(x, bounds.width, config.edges), y),
        velocity: Vec2::new(sample(rng, &config.speed_x), sample(rng, &config.speed_y)),
        size: sample(rng, &config.size),
        opacity: sample(rng, &config.opacity),
        color: config.color,
        rotation: if rotates { rng.gen::<f32>() * TAU } else { 0.0 },
        rotation_speed: sample(rng, &config.rotation_speed),
    }
}

/// `gen::<f32>()` is in `[0, 1)`, but `x * width` can still round up to `width`
fn wrap_or_keep(x: f32, extent: f32, edges: EdgePolicy) -> f32 {
    match edges {
        EdgePolicy::Wrap => wrap_coord(x, extent),
        EdgePolicy::Respawn { .. } => x,
    }
}

impl FrameSubject for ParticleField {
    fn update(&mut self, frame: &FrameInfo) {
        let attractor = self.attractor;
        self.tick(frame.elapsed_ms(), attractor);
    }

    fn draw(&self, ctx: &mut dyn DrawContext) {
        ParticleField::draw(self, ctx);
    }

    fn resize(&mut self, size: Size) {
        ParticleField::resize(self, size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heartglow_core::{DrawCommand, RecordingContext};

    fn in_bounds(field: &ParticleField) -> bool {
        let b = field.bounds();
        field.particles().iter().all(|p| {
            p.position.x >= 0.0
                && p.position.x < b.width
                && p.position.y >= 0.0
                && p.position.y < b.height
        })
    }

    #[test]
    fn test_presets_pool_sizes() {
        let size = Size::new(800.0, 600.0);
        assert_eq!(ParticleField::new(ParticleConfig::sparkles(), size, 1).len(), 50);
        assert_eq!(ParticleField::new(ParticleConfig::floating_hearts(), size, 1).len(), 30);
        assert_eq!(ParticleField::new(ParticleConfig::final_hearts(), size, 1).len(), 15);
    }

    #[test]
    fn test_wrap_keeps_particles_in_bounds() {
        // Fast particles cross the edges many times
        let config = ParticleConfig {
            speed_x: -37.0..41.0,
            speed_y: -53.0..29.0,
            ..ParticleConfig::sparkles()
        };
        let mut field = ParticleField::new(config, Size::new(320.0, 170.0), 42);
        assert!(in_bounds(&field));

        for frame in 0..2000 {
            field.tick(frame as f32 * 16.7, None);
            assert!(in_bounds(&field), "escaped bounds at frame {frame}");
        }
    }

    #[test]
    fn test_wrap_axes_are_independent() {
        let config = ParticleConfig {
            count: 1,
            speed_x: 5.0..5.0,
            speed_y: 0.0..0.0,
            ..ParticleConfig::sparkles()
        };
        let mut field = ParticleField::new(config, Size::new(100.0, 100.0), 3);
        field.particles[0].position = Point::new(98.0, 40.0);

        field.tick(0.0, None);
        let p = field.particles()[0].position;
        assert!((p.x - 3.0).abs() < 1e-4);
        assert_eq!(p.y, 40.0);
    }

    #[test]
    fn test_twinkle_opacity_phase() {
        let config = ParticleConfig {
            count: 1,
            speed_x: 0.0..0.0,
            speed_y: 0.0..0.0,
            ..ParticleConfig::sparkles()
        };
        let mut field = ParticleField::new(config, Size::new(100.0, 100.0), 9);
        field.particles[0].position = Point::new(10.0, 10.0);

        field.tick(2000.0, None);
        let expected = (2.0f32 + 10.0).sin().abs();
        assert!((field.particles()[0].opacity - expected).abs() < 1e-5);
    }

    #[test]
    fn test_attraction_within_radius() {
        let config = ParticleConfig {
            count: 1,
            speed_x: 0.0..0.0,
            speed_y: 0.0..0.0,
            rotation_speed: 0.0..0.0,
            ..ParticleConfig::floating_hearts()
        };
        let mut field = ParticleField::new(config, Size::new(800.0, 600.0), 5);
        field.particles[0].position = Point::new(300.0, 300.0);

        // 50 units away: pulled 2% of the way
        field.tick(0.0, Some(Point::new(350.0, 300.0)));
        assert!((field.particles()[0].position.x - 301.0).abs() < 1e-4);

        // 150 units away: outside the capture radius
        field.particles[0].position = Point::new(300.0, 300.0);
        field.tick(0.0, Some(Point::new(450.0, 300.0)));
        assert_eq!(field.particles()[0].position, Point::new(300.0, 300.0));
    }

    #[test]
    fn test_attraction_disabled() {
        let config = ParticleConfig {
            count: 1,
            speed_y: 0.0..0.0,
            ..ParticleConfig::final_hearts()
        };
        let mut field = ParticleField::new(config, Size::new(800.0, 600.0), 5);
        field.particles[0].position = Point::new(300.0, 300.0);
        field.tick(0.0, Some(Point::new(310.0, 300.0)));
        assert_eq!(field.particles()[0].position, Point::new(300.0, 300.0));
    }

    #[test]
    fn test_hearts_spawn_below_and_rise() {
        let size = Size::new(800.0, 600.0);
        let mut field = ParticleField::new(ParticleConfig::floating_hearts(), size, 11);
        assert!(field
            .particles()
            .iter()
            .all(|p| p.position.y >= 600.0 && p.position.y < 700.0));

        let start: Vec<f32> = field.particles().iter().map(|p| p.position.y).collect();
        field.tick(0.0, None);
        for (p, y0) in field.particles().iter().zip(start) {
            assert!(p.position.y < y0);
        }
    }

    #[test]
    fn test_respawn_recycles_in_place() {
        let config = ParticleConfig {
            count: 1,
            speed_x: 0.0..0.0,
            speed_y: -2.0..-2.0,
            ..ParticleConfig::final_hearts()
        };
        let mut field = ParticleField::new(config, Size::new(400.0, 300.0), 2);
        field.particles[0].position = Point::new(100.0, -49.0);

        field.tick(0.0, None);
        let p = field.particles()[0].position;
        assert_eq!(p.y, 350.0);
        assert!((0.0..400.0).contains(&p.x));
        assert_eq!(field.len(), 1);
    }

    #[test]
    fn test_respawn_wraps_horizontally() {
        let config = ParticleConfig {
            count: 1,
            speed_x: -3.0..-3.0,
            speed_y: 0.0..0.0,
            rotation_speed: 0.0..0.0,
            attraction: None,
            ..ParticleConfig::floating_hearts()
        };
        let mut field = ParticleField::new(config, Size::new(400.0, 300.0), 2);
        field.particles[0].position = Point::new(-49.0, 100.0);
        field.tick(0.0, None);
        assert_eq!(field.particles()[0].position.x, 450.0);
    }

    #[test]
    fn test_zero_bounds_do_not_produce_nan() {
        let mut field = ParticleField::new(ParticleConfig::sparkles(), Size::ZERO, 1);
        for frame in 0..10 {
            field.tick(frame as f32, None);
        }
        assert!(field
            .particles()
            .iter()
            .all(|p| p.position.x.is_finite() && p.position.y.is_finite()));
    }

    #[test]
    fn test_draw_circles_and_glyphs() {
        let size = Size::new(200.0, 200.0);
        let mut ctx = RecordingContext::new(size);

        let sparkles = ParticleField::new(ParticleConfig::sparkles().with_count(3), size, 1);
        sparkles.draw(&mut ctx);
        assert_eq!(ctx.commands().len(), 3);
        assert!(ctx
            .commands()
            .iter()
            .all(|c| matches!(c, DrawCommand::FillCircle { .. })));

        let mut ctx = RecordingContext::new(size);
        let hearts = ParticleField::new(ParticleConfig::floating_hearts().with_count(2), size, 1);
        hearts.draw(&mut ctx);
        for (cmd, particle) in ctx.commands().iter().zip(hearts.particles()) {
            match cmd {
                DrawCommand::Glyph {
                    glyph,
                    position,
                    style,
                } => {
                    assert_eq!(*glyph, Glyph::Heart);
                    assert_eq!(*position, particle.position);
                    assert_eq!(style.alpha, particle.opacity);
                    assert_eq!(style.rotation, particle.rotation);
                    assert_eq!(style.baseline, TextBaseline::Middle);
                }
                other => panic!("unexpected command {other:?}"),
            }
        }
    }

    #[test]
    fn test_same_seed_same_field() {
        let size = Size::new(300.0, 300.0);
        let a = ParticleField::new(ParticleConfig::sparkles(), size, 77);
        let b = ParticleField::new(ParticleConfig::sparkles(), size, 77);
        assert_eq!(a.particles(), b.particles());
    }
}
