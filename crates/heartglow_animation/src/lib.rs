//! Heartglow Animation System
//!
//! Per-frame particle simulation and the loop that drives it.
//!
//! # Features
//!
//! - **Frame Driver**: `AnimationLoop` clears, updates, and redraws one surface per refresh;
//!   `FrameScheduler` keeps the frame clock and interval/timeout timers
//! - **Particle Field**: fixed-size pools of drifting circles or glyphs with wraparound,
//!   respawn, twinkling opacity, and pointer attraction
//! - **Heart Trails**: comet-like trails chasing nodes sampled from a parametric heart curve
//! - **Bursts**: short-lived radial glyph bursts that fade out
//! - **Counters**: time-based integer count-up
//!
//! All motion scalars are per frame and calibrated to a ~60 Hz refresh
//! (`REFERENCE_FRAME_RATE`). A display refreshing at 120 Hz animates twice as fast.

pub mod burst;
pub mod counter;
pub mod heart_trail;
pub mod particles;
pub mod scheduler;

pub use burst::{Burst, BurstConfig, BurstParticle};
pub use counter::{CounterAnimation, CounterState, DEFAULT_COUNTER_DURATION};
pub use heart_trail::{
    heart_curve, HeartTrailConfig, HeartTrailSimulator, Trail, TrailLeader, TrailSegment,
};
pub use particles::{
    Attraction, EdgePolicy, OpacityMode, Particle, ParticleConfig, ParticleField, ParticleShape,
};
pub use scheduler::{
    AnimationLoop, ControlFlow, FrameInfo, FrameScheduler, FrameSubject, FrameTick, TimerId,
    REFERENCE_FRAME_RATE,
};
