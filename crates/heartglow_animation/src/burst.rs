//! Radial glyph bursts
//!
//! A burst throws a ring of glyphs outward from one origin. Each particle
//! keeps its launch velocity and fades linearly; once faded it is dropped, and
//! the burst finishes when none are left.

use crate::particles::sample;
use crate::scheduler::{FrameInfo, FrameSubject};
use heartglow_core::{DrawContext, Glyph, GlyphStyle, Point, TextBaseline, Vec2};
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;
use std::ops::Range;

/// Burst parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BurstConfig {
    /// Particles per burst, evenly spaced by angle
    pub count: usize,
    /// Launch speed per frame
    pub speed: Range<f32>,
    /// Opacity lost per frame
    pub fade_step: f32,
    /// Glyph font size
    pub glyph_size: f32,
    /// Glyphs picked uniformly for each particle
    pub glyphs: Vec<Glyph>,
}

impl Default for BurstConfig {
    fn default() -> Self {
        Self {
            count: 20,
            speed: 3.0..5.0,
            fade_step: 0.02,
            glyph_size: 32.0,
            glyphs: Glyph::BURST.to_vec(),
        }
    }
}

/// One glyph of a burst
#[derive(Clone, Debug, PartialEq)]
pub struct BurstParticle {
    pub glyph: Glyph,
    /// Displacement from the burst origin
    pub offset: Vec2,
    /// Displacement per frame
    pub velocity: Vec2,
    pub opacity: f32,
}

/// A live burst
#[derive(Clone, Debug)]
pub struct Burst {
    origin: Point,
    particles: Vec<BurstParticle>,
    fade_step: f32,
    glyph_size: f32,
}

impl Burst {
    /// Launch a burst at `origin`
    pub fn new(origin: Point, config: &BurstConfig, rng: &mut StdRng) -> Self {
        let particles = (0..config.count)
            .map(|i| {
                let angle = TAU * i as f32 / config.count as f32;
                let speed = sample(rng, &config.speed);
                let glyph = if config.glyphs.is_empty() {
                    Glyph::Heart
                } else {
                    config.glyphs[rng.gen_range(0..config.glyphs.len())]
                };
                BurstParticle {
                    glyph,
                    offset: Vec2::ZERO,
                    velocity: Vec2::from_angle(angle) * speed,
                    opacity: 1.0,
                }
            })
            .collect();

        Self {
            origin,
            particles,
            fade_step: config.fade_step,
            glyph_size: config.glyph_size,
        }
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn particles(&self) -> &[BurstParticle] {
        &self.particles
    }

    pub fn is_done(&self) -> bool {
        self.particles.is_empty()
    }

    /// Move and fade every particle, dropping the ones that faded out
    pub fn tick(&mut self) {
        let fade = self.fade_step;
        for particle in &mut self.particles {
            particle.offset += particle.velocity;
            particle.opacity -= fade;
        }
        self.particles.retain(|p| p.opacity > 0.0);
    }

    pub fn draw(&self, ctx: &mut dyn DrawContext) {
        for particle in &self.particles {
            let style = GlyphStyle::new(self.glyph_size)
                .with_alpha(particle.opacity)
                .with_baseline(TextBaseline::Middle);
            ctx.draw_glyph(particle.glyph, self.origin + particle.offset, &style);
        }
    }
}

impl FrameSubject for Burst {
    fn update(&mut self, _frame: &FrameInfo) {
        self.tick();
    }

    fn draw(&self, ctx: &mut dyn DrawContext) {
        Burst::draw(self, ctx);
    }

    fn is_finished(&self) -> bool {
        self.is_done()
    }
}
