//! Frame driver and timers
//!
//! The host calls into this module once per display refresh. There is no
//! background thread and no fixed timestep: each refresh is one frame, and
//! every subject advances by exactly one frame's worth of motion.
//!
//! - `FrameScheduler` - the frame clock plus `set_interval`/`set_timeout` style timers
//! - `AnimationLoop` - one animated subject bound to one drawing surface
//!
//! Timers never call back into user code. `FrameScheduler::advance()` returns
//! the ids that fired and the owner dispatches them, which keeps every piece
//! of mutable state owned by exactly one component.

use heartglow_core::{DrawContext, DrawContextExt, Size};
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use std::time::Duration;
use tracing::{debug, trace};

/// Refresh rate every per-frame motion constant was tuned for
pub const REFERENCE_FRAME_RATE: f32 = 60.0;

/// Shortest period a repeating timer may have
const MIN_TIMER_PERIOD: Duration = Duration::from_millis(1);

new_key_type! {
    /// Handle to a registered timer
    pub struct TimerId;
}

/// Per-frame timing information handed to every subject
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameInfo {
    /// Zero-based frame counter
    pub index: u64,
    /// Wall time since the previous frame
    pub dt: Duration,
    /// Wall time since the scheduler started
    pub elapsed: Duration,
}

impl FrameInfo {
    /// A frame at the reference rate, used by tests and headless drivers
    pub fn at(index: u64) -> Self {
        let dt = Duration::from_secs_f32(1.0 / REFERENCE_FRAME_RATE);
        Self {
            index,
            dt,
            elapsed: dt.mul_f64(index as f64),
        }
    }

    /// Elapsed time in milliseconds
    pub fn elapsed_ms(&self) -> f32 {
        self.elapsed.as_secs_f32() * 1000.0
    }
}

/// Whether a loop wants the next refresh
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ControlFlow {
    /// Schedule another frame
    #[default]
    Continue,
    /// Stop; no further frames are drawn
    Exit,
}

// ============================================================================
// Timers
// ============================================================================

#[derive(Clone, Debug)]
struct Timer {
    period: Duration,
    remaining: Duration,
    repeating: bool,
}

/// Result of advancing the scheduler by one refresh
#[derive(Clone, Debug)]
pub struct FrameTick {
    pub frame: FrameInfo,
    /// Timers that came due during this refresh
    pub fired: SmallVec<[TimerId; 4]>,
}

/// Frame clock and timer registry
///
/// ```ignore
/// let mut scheduler = FrameScheduler::new();
/// let auto_advance = scheduler.set_interval(Duration::from_millis(4000));
///
/// // On every display refresh:
/// let tick = scheduler.advance(dt);
/// if tick.fired.contains(&auto_advance) {
///     carousel.next();
/// }
/// ```
#[derive(Debug, Default)]
pub struct FrameScheduler {
    frame_index: u64,
    elapsed: Duration,
    timers: SlotMap<TimerId, Timer>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames produced so far
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Total time advanced so far
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Register a repeating timer firing every `period`
    pub fn set_interval(&mut self, period: Duration) -> TimerId {
        let period = period.max(MIN_TIMER_PERIOD);
        let id = self.timers.insert(Timer {
            period,
            remaining: period,
            repeating: true,
        });
        debug!(?id, ?period, "interval registered");
        id
    }

    /// Register a one-shot timer firing after `delay`
    pub fn set_timeout(&mut self, delay: Duration) -> TimerId {
        let id = self.timers.insert(Timer {
            period: delay,
            remaining: delay,
            repeating: false,
        });
        debug!(?id, ?delay, "timeout registered");
        id
    }

    /// Cancel a timer. Returns false if it already fired (one-shot) or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.timers.remove(id).is_some()
    }

    /// Whether the timer is still registered
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    /// Time until the timer next fires
    pub fn remaining(&self, id: TimerId) -> Option<Duration> {
        self.timers.get(id).map(|t| t.remaining)
    }

    /// Advance the clock by one refresh
    ///
    /// A repeating timer fires at most once per refresh even when `dt` spans
    /// several periods; the missed periods are dropped, as a throttled
    /// browser tab drops them.
    pub fn advance(&mut self, dt: Duration) -> FrameTick {
        let frame = FrameInfo {
            index: self.frame_index,
            dt,
            elapsed: self.elapsed + dt,
        };
        self.frame_index += 1;
        self.elapsed += dt;

        let mut fired = SmallVec::new();
        for (id, timer) in self.timers.iter_mut() {
            if timer.remaining > dt {
                timer.remaining -= dt;
                continue;
            }
            fired.push(id);
            if timer.repeating {
                let overshoot = dt - timer.remaining;
                let period_ns = timer.period.as_nanos();
                let into_period = (overshoot.as_nanos() % period_ns) as u64;
                timer.remaining = timer.period - Duration::from_nanos(into_period);
            }
        }

        for id in &fired {
            if self.timers.get(*id).is_some_and(|t| !t.repeating) {
                self.timers.remove(*id);
            }
        }

        if !fired.is_empty() {
            trace!(frame = frame.index, count = fired.len(), "timers fired");
        }

        FrameTick { frame, fired }
    }
}

// ============================================================================
// Animation Loops
// ============================================================================

/// Something that advances and redraws once per frame
pub trait FrameSubject {
    /// Advance the simulation by one frame
    fn update(&mut self, frame: &FrameInfo);

    /// Draw the current state. The surface has already been cleared.
    fn draw(&self, ctx: &mut dyn DrawContext);

    /// The surface changed size
    fn resize(&mut self, _size: Size) {}

    /// A finished subject stops its loop after the current frame
    fn is_finished(&self) -> bool {
        false
    }
}

/// A continuous redraw loop: one subject rendered to one surface
///
/// Each `frame()` clears the whole surface, updates the subject, redraws it,
/// and reports whether another frame is wanted. Stopping a loop simply means
/// it no longer asks for frames.
#[derive(Debug)]
pub struct AnimationLoop<S, C> {
    subject: S,
    surface: C,
    running: bool,
    frames_drawn: u64,
}

impl<S: FrameSubject, C: DrawContext> AnimationLoop<S, C> {
    pub fn new(subject: S, surface: C) -> Self {
        Self {
            subject,
            surface,
            running: true,
            frames_drawn: 0,
        }
    }

    /// Run one frame
    pub fn frame(&mut self, frame: &FrameInfo) -> ControlFlow {
        if !self.running {
            return ControlFlow::Exit;
        }

        self.surface.clear_all();
        self.subject.update(frame);
        self.subject.draw(&mut self.surface);
        self.frames_drawn += 1;

        if self.subject.is_finished() {
            debug!(frames = self.frames_drawn, "animation loop finished");
            self.running = false;
            return ControlFlow::Exit;
        }
        ControlFlow::Continue
    }

    /// Resize both the surface and the subject
    pub fn resize(&mut self, size: Size) {
        self.surface.resize(size);
        self.subject.resize(size);
    }

    /// Stop requesting frames
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Start requesting frames again
    pub fn resume(&mut self) {
        self.running = true;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    pub fn subject(&self) -> &S {
        &self.subject
    }

    pub fn subject_mut(&mut self) -> &mut S {
        &mut self.subject
    }

    pub fn surface(&self) -> &C {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut C {
        &mut self.surface
    }

    /// Take the subject and surface back out of the loop
    pub fn into_parts(self) -> (S, C) {
        (self.subject, self.surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heartglow_core::{Color, DrawCommand, Point, RecordingContext};

    struct Countdown {
        left: u32,
        resized: Option<Size>,
    }

    impl FrameSubject for Countdown {
        fn update(&mut self, _frame: &FrameInfo) {
            self.left = self.left.saturating_sub(1);
        }

        fn draw(&self, ctx: &mut dyn DrawContext) {
            ctx.fill_circle(Point::new(1.0, 1.0), self.left as f32, Color::WHITE);
        }

        fn resize(&mut self, size: Size) {
            self.resized = Some(size);
        }

        fn is_finished(&self) -> bool {
            self.left == 0
        }
    }

    fn ms(ms: u64) -> Duration {
        Duration::from_millis(ms)
    }

    #[test]
    fn test_frame_clears_then_draws() {
        let surface = RecordingContext::new(Size::new(50.0, 40.0));
        let mut anim = AnimationLoop::new(
            Countdown {
                left: 5,
                resized: None,
            },
            surface,
        );

        assert_eq!(anim.frame(&FrameInfo::at(0)), ControlFlow::Continue);

        let cmds = anim.surface().commands();
        assert_eq!(cmds.len(), 2);
        assert!(matches!(cmds[0], DrawCommand::Clear(rect) if rect.size == Size::new(50.0, 40.0)));
        assert!(matches!(cmds[1], DrawCommand::FillCircle { radius, .. } if radius == 4.0));
    }

    #[test]
    fn test_finished_subject_stops_loop() {
        let surface = RecordingContext::new(Size::new(10.0, 10.0));
        let mut anim = AnimationLoop::new(
            Countdown {
                left: 3,
                resized: None,
            },
            surface,
        );

        let mut frames = 0;
        while anim.frame(&FrameInfo::at(frames)) == ControlFlow::Continue {
            frames += 1;
        }
        assert_eq!(anim.frames_drawn(), 3);
        assert!(!anim.is_running());

        // No further drawing once stopped
        let before = anim.surface().commands().len();
        assert_eq!(anim.frame(&FrameInfo::at(10)), ControlFlow::Exit);
        assert_eq!(anim.surface().commands().len(), before);
    }

    #[test]
    fn test_stop_and_resume() {
        let surface = RecordingContext::new(Size::new(10.0, 10.0));
        let mut anim = AnimationLoop::new(
            Countdown {
                left: 100,
                resized: None,
            },
            surface,
        );
        anim.stop();
        assert_eq!(anim.frame(&FrameInfo::at(0)), ControlFlow::Exit);
        assert_eq!(anim.frames_drawn(), 0);

        anim.resume();
        assert_eq!(anim.frame(&FrameInfo::at(1)), ControlFlow::Continue);
        assert_eq!(anim.frames_drawn(), 1);
    }

    #[test]
    fn test_resize_reaches_surface_and_subject() {
        let surface = RecordingContext::new(Size::new(10.0, 10.0));
        let mut anim = AnimationLoop::new(
            Countdown {
                left: 100,
                resized: None,
            },
            surface,
        );
        anim.resize(Size::new(640.0, 480.0));
        assert_eq!(anim.surface().size(), Size::new(640.0, 480.0));
        assert_eq!(anim.subject().resized, Some(Size::new(640.0, 480.0)));

        let (subject, surface) = anim.into_parts();
        assert_eq!(subject.left, 100);
        assert_eq!(surface.size(), Size::new(640.0, 480.0));
    }

    #[test]
    fn test_interval_fires_each_period() {
        let mut scheduler = FrameScheduler::new();
        let id = scheduler.set_interval(ms(4000));

        let mut fired_at = Vec::new();
        for frame in 0..1000u64 {
            let tick = scheduler.advance(ms(20));
            if tick.fired.contains(&id) {
                fired_at.push(frame);
            }
        }
        // 20s of frames: fires at 4s, 8s, 12s, 16s, 20s
        assert_eq!(fired_at, vec![199, 399, 599, 799, 999]);
        assert!(scheduler.is_pending(id));
    }

    #[test]
    fn test_interval_drops_missed_periods() {
        let mut scheduler = FrameScheduler::new();
        let id = scheduler.set_interval(ms(100));

        let tick = scheduler.advance(ms(350));
        assert_eq!(tick.fired.as_slice(), &[id]);
        assert_eq!(scheduler.remaining(id), Some(ms(50)));
    }

    #[test]
    fn test_timeout_fires_once() {
        let mut scheduler = FrameScheduler::new();
        let id = scheduler.set_timeout(ms(1000));

        assert!(scheduler.advance(ms(600)).fired.is_empty());
        assert_eq!(scheduler.advance(ms(400)).fired.as_slice(), &[id]);
        assert!(!scheduler.is_pending(id));
        assert!(scheduler.advance(ms(5000)).fired.is_empty());
    }

    #[test]
    fn test_cancel() {
        let mut scheduler = FrameScheduler::new();
        let id = scheduler.set_timeout(ms(10));
        assert!(scheduler.cancel(id));
        assert!(!scheduler.cancel(id));
        assert!(scheduler.advance(ms(100)).fired.is_empty());
    }

    #[test]
    fn test_reused_slots_still_fire() {
        let mut scheduler = FrameScheduler::new();
        let early = scheduler.set_timeout(ms(10));
        let interval = scheduler.set_interval(ms(50));
        scheduler.advance(ms(10));
        assert!(!scheduler.is_pending(early));

        // Lands in the slot freed by the fired timeout
        let late = scheduler.set_timeout(ms(40));
        let tick = scheduler.advance(ms(40));
        assert_eq!(tick.fired.len(), 2);
        assert!(tick.fired.contains(&interval));
        assert!(tick.fired.contains(&late));
    }

    #[test]
    fn test_frame_info_beyond_u32_frames() {
        let index = u64::from(u32::MAX) + 10;
        let frame = FrameInfo::at(index);
        let expected = index as f64 / REFERENCE_FRAME_RATE as f64;
        let actual = frame.elapsed.as_secs_f64();
        assert!((actual - expected).abs() / expected < 1e-6);
        assert!(frame.elapsed > FrameInfo::at(u64::from(u32::MAX)).elapsed);
    }

    #[test]
    fn test_frame_clock() {
        let mut scheduler = FrameScheduler::new();
        let first = scheduler.advance(ms(16)).frame;
        let second = scheduler.advance(ms(17)).frame;

        assert_eq!(first.index, 0);
        assert_eq!(second.index, 1);
        assert_eq!(second.elapsed, ms(33));
        assert_eq!(scheduler.frame_index(), 2);
        assert!((second.elapsed_ms() - 33.0).abs() < 1e-3);
    }
}
