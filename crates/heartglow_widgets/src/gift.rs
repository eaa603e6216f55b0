//! Gift box reveal
//!
//! Opening the box hides the hint, moves the title and hint up, and throws a
//! burst of glyphs from the box center. The box stays open until `reset`
//! (the replay button); the hint fades back in after a delay the page
//! schedules on its frame clock.

use heartglow_animation::{Burst, BurstConfig, FrameInfo, FrameSubject};
use heartglow_core::{DrawContext, Point, Size};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Gift box configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GiftConfig {
    pub burst: BurstConfig,
    /// Delay before the hint reappears after a reset
    pub hint_delay_ms: u64,
    /// Hint opacity while visible
    pub hint_opacity: f32,
}

impl Default for GiftConfig {
    fn default() -> Self {
        Self {
            burst: BurstConfig::default(),
            hint_delay_ms: 1000,
            hint_opacity: 0.7,
        }
    }
}

/// Gift box state and its live bursts
#[derive(Debug)]
pub struct GiftBox {
    config: GiftConfig,
    origin: Point,
    opened: bool,
    title_moved_up: bool,
    hint_moved_up: bool,
    hint_opacity: f32,
    bursts: Vec<Burst>,
    rng: StdRng,
}

impl GiftBox {
    /// A closed box whose bursts start at `origin`
    pub fn new(config: GiftConfig, origin: Point, seed: u64) -> Self {
        let hint_opacity = config.hint_opacity;
        Self {
            config,
            origin,
            opened: false,
            title_moved_up: false,
            hint_moved_up: false,
            hint_opacity,
            bursts: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn is_opened(&self) -> bool {
        self.opened
    }

    pub fn hint_opacity(&self) -> f32 {
        self.hint_opacity
    }

    pub fn title_moved_up(&self) -> bool {
        self.title_moved_up
    }

    pub fn hint_moved_up(&self) -> bool {
        self.hint_moved_up
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    pub fn bursts(&self) -> &[Burst] {
        &self.bursts
    }

    /// Live burst particles across all bursts
    pub fn particle_count(&self) -> usize {
        self.bursts.iter().map(|b| b.particles().len()).sum()
    }

    /// Open the box; does nothing if it is already open
    ///
    /// Returns whether this call opened it.
    pub fn open(&mut self) -> bool {
        if self.opened {
            return false;
        }
        self.opened = true;
        self.title_moved_up = true;
        self.hint_moved_up = true;
        self.hint_opacity = 0.0;
        self.bursts
            .push(Burst::new(self.origin, &self.config.burst, &mut self.rng));
        debug!(particles = self.config.burst.count, "gift opened");
        true
    }

    /// Close the box again
    ///
    /// Bursts already in flight keep fading. Returns the delay after which
    /// the owner should call `show_hint`.
    pub fn reset(&mut self) -> Duration {
        debug!("gift reset");
        self.opened = false;
        Duration::from_millis(self.config.hint_delay_ms)
    }

    /// Fade the hint back in
    pub fn show_hint(&mut self) {
        self.hint_opacity = self.config.hint_opacity;
    }

    /// Advance every burst by one frame and drop finished ones
    pub fn tick(&mut self) {
        for burst in &mut self.bursts {
            burst.tick();
        }
        self.bursts.retain(|b| !b.is_done());
    }

    pub fn draw(&self, ctx: &mut dyn DrawContext) {
        for burst in &self.bursts {
            burst.draw(ctx);
        }
    }
}

impl FrameSubject for GiftBox {
    fn update(&mut self, _frame: &FrameInfo) {
        self.tick();
    }

    fn draw(&self, ctx: &mut dyn DrawContext) {
        GiftBox::draw(self, ctx);
    }

    fn resize(&mut self, size: Size) {
        self.origin = size.center();
    }
}
