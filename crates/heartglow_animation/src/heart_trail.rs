//! Heart-curve trails
//!
//! Comet-like trails race around a heart outline. The outline is a ring of
//! nodes sampled once from the parametric heart curve. Each trail has a
//! leader that accelerates toward its current target node; when it gets
//! close the target advances one node along the ring (or occasionally jumps
//! or reverses). The remaining segments follow the segment in front of them
//! with exponential smoothing, which gives the trail its tapering tail.

use crate::particles::sample;
use crate::scheduler::{FrameInfo, FrameSubject};
use heartglow_core::{Color, DrawContext, Point, Size, Vec2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::ops::Range;
use tracing::debug;

/// Sample `nodes` points of the heart curve centered on `size`
///
/// Angles run over `[0, 6.3)` rather than a full `2π`, so the ring has a
/// small gap at the top cusp.
pub fn heart_curve(nodes: usize, size: Size) -> Vec<Point> {
    let center = size.center();
    (0..nodes)
        .map(|i| {
            let t = i as f32 / nodes as f32 * 6.3;
            let x = 90.0 * t.sin().powi(3);
            let harmonics =
                15.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos();
            let y = -5.0 * harmonics;
            Point::new(center.x + x, center.y + y)
        })
        .collect()
}

/// Heart trail parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeartTrailConfig {
    /// Number of points sampled from the heart curve
    pub nodes: usize,
    pub trails: usize,
    /// Segments per trail, leader included
    pub segments: usize,
    /// Canvas dimensions; the curve is centered on it
    pub size: Size,
    /// Leader distance under which the target node advances
    pub capture_distance: f32,
    /// Chance per capture of jumping to a random node
    pub jump_probability: f32,
    /// Chance per capture of reversing direction around the ring
    pub reverse_probability: f32,
    /// Fraction of the gap to the segment in front closed each frame
    pub smoothing: f32,
    /// Leader acceleration toward the target, per frame
    pub acceleration: Range<f32>,
    /// Leader velocity retained each frame
    pub friction: Range<f32>,
    /// Segment hue in degrees
    pub hue: Range<f32>,
    /// Segment saturation in `[0, 1]`
    pub saturation: Range<f32>,
    pub lightness: f32,
    pub alpha: f32,
}

impl Default for HeartTrailConfig {
    fn default() -> Self {
        Self {
            nodes: 120,
            trails: 120,
            segments: 120,
            size: Size::new(300.0, 300.0),
            capture_distance: 10.0,
            jump_probability: 0.05,
            reverse_probability: 0.01,
            smoothing: 0.7,
            acceleration: 5.0..10.0,
            friction: 0.7..0.9,
            hue: 330.0..350.0,
            saturation: 0.8..1.0,
            lightness: 0.75,
            alpha: 0.3,
        }
    }
}

/// One circle of a trail
#[derive(Clone, Debug, PartialEq)]
pub struct TrailSegment {
    pub position: Point,
    pub radius: f32,
    pub color: Color,
}

/// Steering state of a trail's first segment
#[derive(Clone, Debug, PartialEq)]
pub struct TrailLeader {
    /// Index of the node being chased, always in `[0, nodes)`
    pub target: usize,
    /// +1 or -1: which way the target advances around the ring
    pub direction: i32,
    pub acceleration: f32,
    pub friction: f32,
    pub velocity: Vec2,
}

/// A leader and the segments following it
#[derive(Clone, Debug, PartialEq)]
pub struct Trail {
    pub leader: TrailLeader,
    /// `segments[0]` is the leader's body
    pub segments: Vec<TrailSegment>,
}

impl Trail {
    pub fn head(&self) -> Option<Point> {
        self.segments.first().map(|s| s.position)
    }
}

/// Simulates every trail on one heart canvas
#[derive(Debug)]
pub struct HeartTrailSimulator {
    config: HeartTrailConfig,
    nodes: Vec<Point>,
    trails: Vec<Trail>,
    rng: StdRng,
}

impl HeartTrailSimulator {
    pub fn new(config: HeartTrailConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy(config: HeartTrailConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    fn with_rng(config: HeartTrailConfig, mut rng: StdRng) -> Self {
        let nodes = heart_curve(config.nodes, config.size);
        let trails = (0..config.trails)
            .map(|i| spawn_trail(&config, i, &mut rng))
            .collect();
        debug!(
            nodes = config.nodes,
            trails = config.trails,
            segments = config.segments,
            "heart trails created"
        );
        Self {
            config,
            nodes,
            trails,
            rng,
        }
    }

    pub fn config(&self) -> &HeartTrailConfig {
        &self.config
    }

    pub fn nodes(&self) -> &[Point] {
        &self.nodes
    }

    pub fn trails(&self) -> &[Trail] {
        &self.trails
    }

    pub fn size(&self) -> Size {
        self.config.size
    }

    /// Move the canvas; the curve is resampled around the new center
    pub fn resize(&mut self, size: Size) {
        if size == self.config.size {
            return;
        }
        debug!(?size, "heart trail canvas resized");
        self.config.size = size;
        self.nodes = heart_curve(self.config.nodes, size);
    }

    /// Advance every trail by one frame, last trail first
    pub fn tick(&mut self) {
        if self.nodes.is_empty() {
            return;
        }
        for i in (0..self.trails.len()).rev() {
            self.step_trail(i);
        }
    }

    fn step_trail(&mut self, index: usize) {
        let node_count = self.nodes.len();
        let config = &self.config;
        let trail = &mut self.trails[index];
        let Some(head) = trail.segments.first_mut() else {
            return;
        };
        let leader = &mut trail.leader;

        let offset = head.position - self.nodes[leader.target];
        let distance = offset.length();

        if distance < config.capture_distance {
            if self.rng.gen::<f32>() > 1.0 - config.jump_probability {
                leader.target = self.rng.gen_range(0..node_count);
            } else {
                if self.rng.gen::<f32>() > 1.0 - config.reverse_probability {
                    leader.direction = -leader.direction;
                }
                let next = leader.target as i64 + leader.direction as i64;
                leader.target = next.rem_euclid(node_count as i64) as usize;
            }
        }

        if distance > 0.0 {
            leader.velocity += offset * (-leader.acceleration / distance);
        }
        head.position += leader.velocity;
        leader.velocity *= leader.friction;

        let smoothing = config.smoothing;
        for k in 1..trail.segments.len() {
            let ahead = trail.segments[k - 1].position;
            let segment = &mut trail.segments[k];
            segment.position = segment.position.approach(ahead, smoothing);
        }
    }

    /// Draw trails last to first, each from its leader backwards
    pub fn draw(&self, ctx: &mut dyn DrawContext) {
        for trail in self.trails.iter().rev() {
            for segment in &trail.segments {
                ctx.fill_circle(segment.position, segment.radius, segment.color);
            }
        }
    }
}

fn spawn_trail(config: &HeartTrailConfig, index: usize, rng: &mut StdRng) -> Trail {
    let origin = Point::new(
        rng.gen::<f32>() * config.size.width,
        rng.gen::<f32>() * config.size.height,
    );
    let count = config.segments;
    let segments = (1..=count)
        .map(|k| TrailSegment {
            position: origin,
            radius: (1.0 - k as f32 / count as f32) + 1.0,
            color: Color::from_hsla(
                sample(rng, &config.hue),
                sample(rng, &config.saturation),
                config.lightness,
                config.alpha,
            ),
        })
        .collect();

    let target = if config.nodes > 0 {
        rng.gen_range(0..config.nodes)
    } else {
        0
    };

    Trail {
        leader: TrailLeader {
            target,
            direction: if index % 2 == 1 { 1 } else { -1 },
            acceleration: sample(rng, &config.acceleration),
            friction: sample(rng, &config.friction),
            velocity: Vec2::ZERO,
        },
        segments,
    }
}

impl FrameSubject for HeartTrailSimulator {
    fn update(&mut self, _frame: &FrameInfo) {
        self.tick();
    }

    fn draw(&self, ctx: &mut dyn DrawContext) {
        HeartTrailSimulator::draw(self, ctx);
    }

    fn resize(&mut self, size: Size) {
        HeartTrailSimulator::resize(self, size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heartglow_core::{DrawCommand, RecordingContext};

    fn small_config() -> HeartTrailConfig {
        HeartTrailConfig {
            trails: 40,
            segments: 8,
            ..HeartTrailConfig::default()
        }
    }

    fn mean_distance_to_curve(sim: &HeartTrailSimulator) -> f32 {
        let total: f32 = sim
            .trails()
            .iter()
            .filter_map(Trail::head)
            .map(|head| {
                sim.nodes()
                    .iter()
                    .map(|node| head.distance(*node))
                    .fold(f32::INFINITY, f32::min)
            })
            .sum();
        total / sim.trails().len() as f32
    }

    #[test]
    fn test_heart_curve_nodes() {
        let size = Size::new(300.0, 300.0);
        let nodes = heart_curve(120, size);
        assert_eq!(nodes.len(), 120);
        assert_eq!(nodes, heart_curve(120, size));

        // theta = 0: bottom of the top cusp, straight above center
        assert!((nodes[0].x - 150.0).abs() < 1e-4);
        assert!((nodes[0].y - (150.0 - 5.0 * (15.0 - 5.0 - 2.0 - 1.0))).abs() < 1e-4);

        // Widest point near theta = pi/2
        let max_x = nodes.iter().map(|p| p.x).fold(f32::MIN, f32::max);
        assert!((max_x - 240.0).abs() < 0.5);
    }

    #[test]
    fn test_heart_curve_empty() {
        assert!(heart_curve(0, Size::new(300.0, 300.0)).is_empty());
    }

    #[test]
    fn test_trail_initial_state() {
        let sim = HeartTrailSimulator::new(small_config(), 4);
        assert_eq!(sim.trails().len(), 40);

        for (i, trail) in sim.trails().iter().enumerate() {
            assert_eq!(trail.segments.len(), 8);
            let origin = trail.segments[0].position;
            assert!(trail.segments.iter().all(|s| s.position == origin));
            assert!(trail.leader.target < 120);
            assert_eq!(trail.leader.direction, if i % 2 == 1 { 1 } else { -1 });
            assert!((5.0..10.0).contains(&trail.leader.acceleration));
            assert!((0.7..0.9).contains(&trail.leader.friction));

            // Radii taper from just under 2 down to 1
            assert!((trail.segments[0].radius - (2.0 - 1.0 / 8.0)).abs() < 1e-6);
            assert!((trail.segments[7].radius - 1.0).abs() < 1e-6);
            assert!(trail.segments.iter().all(|s| (s.color.a - 0.3).abs() < 1e-6));
        }
    }

    #[test]
    fn test_segments_follow_with_smoothing() {
        let mut sim = HeartTrailSimulator::new(
            HeartTrailConfig {
                trails: 1,
                segments: 2,
                ..HeartTrailConfig::default()
            },
            8,
        );
        let trail = &mut sim.trails[0];
        trail.segments[1].position = Point::new(0.0, 0.0);

        // Pin the leader so the follower chases a fixed point
        let node = sim.nodes[sim.trails[0].leader.target];
        sim.trails[0].segments[0].position = node;
        sim.trails[0].leader.acceleration = 0.0;
        sim.config.capture_distance = 0.0;

        let mut gap = node.distance(Point::ZERO);
        for _ in 0..5 {
            sim.tick();
            let follower = sim.trails()[0].segments[1].position;
            let next_gap = follower.distance(node);
            assert!((next_gap - gap * 0.3).abs() < 1e-3);
            gap = next_gap;
        }
    }

    #[test]
    fn test_target_stays_in_range() {
        let mut sim = HeartTrailSimulator::new(
            HeartTrailConfig {
                nodes: 7,
                trails: 6,
                segments: 2,
                capture_distance: 1e6,
                jump_probability: 0.3,
                reverse_probability: 0.3,
                ..HeartTrailConfig::default()
            },
            21,
        );
        for _ in 0..500 {
            sim.tick();
            assert!(sim.trails().iter().all(|t| t.leader.target < 7));
        }
    }

    #[test]
    fn test_capture_advances_target_by_direction() {
        let mut sim = HeartTrailSimulator::new(
            HeartTrailConfig {
                trails: 2,
                segments: 1,
                jump_probability: 0.0,
                reverse_probability: 0.0,
                ..HeartTrailConfig::default()
            },
            5,
        );
        for trail in &mut sim.trails {
            trail.leader.target = 0;
        }
        let start = sim.nodes[0];
        sim.trails[0].segments[0].position = start;
        sim.trails[1].segments[0].position = start;

        sim.tick();
        // Trail 0 walks backwards and wraps, trail 1 walks forwards
        assert_eq!(sim.trails()[0].leader.target, 119);
        assert_eq!(sim.trails()[1].leader.target, 1);
    }

    #[test]
    fn test_leader_on_target_does_not_produce_nan() {
        let mut sim = HeartTrailSimulator::new(
            HeartTrailConfig {
                trails: 1,
                segments: 3,
                capture_distance: 0.0,
                ..HeartTrailConfig::default()
            },
            13,
        );
        let node = sim.nodes[sim.trails[0].leader.target];
        sim.trails[0].segments[0].position = node;

        sim.tick();
        let head = sim.trails()[0].segments[0].position;
        assert!(head.x.is_finite() && head.y.is_finite());
        assert_eq!(head, node);
    }

    #[test]
    fn test_trails_converge_onto_curve() {
        let mut sim = HeartTrailSimulator::new(small_config(), 99);
        let initial = mean_distance_to_curve(&sim);

        for _ in 0..250 {
            sim.tick();
        }
        let mut settled = 0.0;
        for _ in 0..50 {
            sim.tick();
            settled += mean_distance_to_curve(&sim);
        }
        settled /= 50.0;

        assert!(settled < 16.0, "mean distance {settled}");
        assert!(settled < initial);

        let center = sim.size().center();
        assert!(sim
            .trails()
            .iter()
            .filter_map(Trail::head)
            .all(|head| head.distance(center) < 260.0));
    }

    #[test]
    fn test_draw_order() {
        let sim = HeartTrailSimulator::new(
            HeartTrailConfig {
                trails: 3,
                segments: 2,
                ..HeartTrailConfig::default()
            },
            1,
        );
        let mut ctx = RecordingContext::new(sim.size());
        sim.draw(&mut ctx);

        let expected: Vec<Point> = sim
            .trails()
            .iter()
            .rev()
            .flat_map(|t| t.segments.iter().map(|s| s.position))
            .collect();
        let drawn: Vec<Point> = ctx
            .commands()
            .iter()
            .map(|cmd| match cmd {
                DrawCommand::FillCircle { center, .. } => *center,
                other => panic!("unexpected command {other:?}"),
            })
            .collect();
        assert_eq!(drawn, expected);
    }

    #[test]
    fn test_resize_recenters_curve() {
        let mut sim = HeartTrailSimulator::new(small_config(), 2);
        sim.resize(Size::new(500.0, 300.0));
        assert!((sim.nodes()[0].x - 250.0).abs() < 1e-4);
    }

    #[test]
    fn test_no_nodes_is_inert() {
        let mut sim = HeartTrailSimulator::new(
            HeartTrailConfig {
                nodes: 0,
                trails: 2,
                segments: 2,
                ..HeartTrailConfig::default()
            },
            2,
        );
        let before = sim.trails().to_vec();
        sim.tick();
        assert_eq!(sim.trails(), before.as_slice());
    }
}
