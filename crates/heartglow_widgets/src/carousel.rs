//! 3D card carousel
//!
//! Cards sit on a ring seen from the front. The active card faces the viewer
//! and the others are rotated around the ring by equal angles; cards in the
//! back half are shrunk and faded.
//!
//! The active index changes from three sources: horizontal swipes, pagination
//! dots (`go_to`), and an auto-advance timer the page schedules with
//! `auto_advance()`.

use heartglow_platform::{PointerEvent, PointerPhase};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::time::Duration;
use tracing::{debug, trace};

/// Carousel configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Ring radius in pixels
    pub radius: f32,
    /// Minimum horizontal travel for a swipe to change slides
    pub swipe_threshold: f32,
    /// Auto-advance period in milliseconds (0 disables)
    pub auto_advance_ms: u64,
    /// Scale of cards in the back half of the ring
    pub back_scale: f32,
    /// Opacity of cards in the back half of the ring
    pub back_opacity: f32,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            radius: 280.0,
            swipe_threshold: 50.0,
            auto_advance_ms: 4000,
            back_scale: 0.7,
            back_opacity: 0.3,
        }
    }
}

impl CarouselConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the ring radius
    pub fn radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    /// Set the swipe threshold
    pub fn swipe_threshold(mut self, threshold: f32) -> Self {
        self.swipe_threshold = threshold;
        self
    }

    /// Set the auto-advance period
    pub fn auto_advance(mut self, period: Duration) -> Self {
        self.auto_advance_ms = period.as_millis() as u64;
        self
    }
}

/// Direction of a recognized swipe
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SwipeDirection {
    /// Finger moved left: show the next card
    Next,
    /// Finger moved right: show the previous card
    Previous,
}

/// Where one card sits on the ring
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CardPlacement {
    /// Angle around the ring in degrees, 0 for the active card
    pub angle: f32,
    /// Horizontal offset from the carousel center
    pub x: f32,
    /// Depth offset; 0 at the front, `-2 * radius` at the back
    pub z: f32,
    pub scale: f32,
    pub opacity: f32,
    /// Stacking order, `floor(z)`
    pub z_index: i32,
    /// In the front half of the ring (`z > -radius / 2`)
    pub front: bool,
}

impl CardPlacement {
    pub fn is_front(&self) -> bool {
        self.front
    }
}

/// Carousel state: the active card among a fixed number of cards
#[derive(Clone, Debug)]
pub struct Carousel {
    config: CarouselConfig,
    cards: usize,
    index: usize,
    swipe_start: Option<f32>,
}

impl Carousel {
    /// Create a carousel showing card 0; `None` when there are no cards
    pub fn new(cards: usize, config: CarouselConfig) -> Option<Self> {
        if cards == 0 {
            debug!("carousel has no cards, skipping");
            return None;
        }
        Some(Self {
            config,
            cards,
            index: 0,
            swipe_start: None,
        })
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn card_count(&self) -> usize {
        self.cards
    }

    /// Active card index, always in `[0, card_count)`
    pub fn index(&self) -> usize {
        self.index
    }

    /// Period of the auto-advance timer, if enabled
    pub fn auto_advance(&self) -> Option<Duration> {
        (self.config.auto_advance_ms > 0)
            .then(|| Duration::from_millis(self.config.auto_advance_ms))
    }

    pub fn next(&mut self) -> usize {
        self.go_to(self.index + 1)
    }

    pub fn previous(&mut self) -> usize {
        self.go_to(self.index + self.cards - 1)
    }

    /// Show card `index`, wrapping out-of-range values
    pub fn go_to(&mut self, index: usize) -> usize {
        self.index = index % self.cards;
        trace!(index = self.index, "carousel moved");
        self.index
    }

    /// Interpret a horizontal swipe from `start_x` to `end_x`
    pub fn swipe(&mut self, start_x: f32, end_x: f32) -> Option<SwipeDirection> {
        let diff = start_x - end_x;
        if diff.abs() <= self.config.swipe_threshold {
            return None;
        }
        if diff > 0.0 {
            self.next();
            Some(SwipeDirection::Next)
        } else {
            self.previous();
            Some(SwipeDirection::Previous)
        }
    }

    /// Whether a swipe is in progress
    pub fn is_dragging(&self) -> bool {
        self.swipe_start.is_some()
    }

    /// Feed a pointer event captured by the carousel
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> Option<SwipeDirection> {
        match event.phase {
            PointerPhase::Start => {
                self.swipe_start = Some(event.position.x);
                None
            }
            PointerPhase::End => {
                let start = self.swipe_start.take()?;
                self.swipe(start, event.position.x)
            }
            PointerPhase::Cancel => {
                self.swipe_start = None;
                None
            }
            PointerPhase::Move | PointerPhase::Hover => None,
        }
    }

    /// Placement of card `card` relative to the active card
    pub fn placement(&self, card: usize) -> CardPlacement {
        let radius = self.config.radius;
        let step = 360.0 / self.cards as f32;
        let angle = (card as f32 - self.index as f32) * step;
        let theta = angle.to_radians();
        let x = theta.sin() * radius;
        let z = theta.cos() * radius - radius;

        let front = z > -radius / 2.0;
        CardPlacement {
            angle,
            x,
            z,
            scale: if front { 1.0 } else { self.config.back_scale },
            opacity: if front { 1.0 } else { self.config.back_opacity },
            z_index: z.floor() as i32,
            front,
        }
    }

    /// Placements of every card, in card order
    pub fn placements(&self) -> Vec<CardPlacement> {
        (0..self.cards).map(|card| self.placement(card)).collect()
    }

    /// Pagination dots; only the active card's dot is set
    pub fn dots(&self) -> SmallVec<[bool; 8]> {
        (0..self.cards).map(|i| i == self.index).collect()
    }
}
