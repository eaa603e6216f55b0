//! Greeting page composition
//!
//! `GreetingPage` owns one component per anchor the host provides: the four
//! canvases, the carousel, the cube, the gift box, and the counters. A
//! missing anchor leaves its component out and the rest of the page works
//! as usual.
//!
//! The host forwards platform events to `handle_event` and calls `frame` on
//! every display refresh. Within a frame the page advances its clock,
//! dispatches fired timers (carousel auto-advance, gift hint), then clears,
//! updates, and redraws each canvas.

use crate::config::GreetingConfig;
use crate::error::Result;
use heartglow_animation::{
    AnimationLoop, CounterAnimation, FrameInfo, FrameScheduler, HeartTrailSimulator,
    ParticleField, TimerId,
};
use heartglow_core::{DrawContext, Point, Rect, Size};
use heartglow_platform::{
    Event, InputEvent, LifecycleEvent, PointerEvent, PointerPhase, PrimaryPointer, WindowEvent,
};
use heartglow_widgets::{Carousel, CubeController, CubeRotation, GiftBox};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, trace};

/// Host elements the page can attach to
///
/// Canvas anchors carry the surface to draw on; interactive anchors carry
/// their hit region in page coordinates.
pub struct PageAnchors<C> {
    pub sparkles: Option<C>,
    pub heart_trail: Option<C>,
    pub floating_hearts: Option<C>,
    pub final_hearts: Option<C>,
    pub carousel: Option<Rect>,
    pub cube: Option<Rect>,
    pub gift: Option<GiftAnchor<C>>,
    /// Whether the statistics section exists
    pub counters: bool,
}

impl<C> Default for PageAnchors<C> {
    fn default() -> Self {
        Self {
            sparkles: None,
            heart_trail: None,
            floating_hearts: None,
            final_hearts: None,
            carousel: None,
            cube: None,
            gift: None,
            counters: false,
        }
    }
}

/// The gift box element and the surface its bursts are drawn on
pub struct GiftAnchor<C> {
    pub region: Rect,
    pub surface: C,
}

/// Component currently owning the pressed pointer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Capture {
    Carousel,
    Cube,
    Gift,
}

struct GiftComponent<C> {
    region: Rect,
    anim: AnimationLoop<GiftBox, C>,
}

/// Observable page state, for logging and headless runs
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PageSnapshot {
    pub frame: u64,
    pub elapsed_ms: f64,
    pub suspended: bool,
    pub carousel_index: Option<usize>,
    pub cube_rotation: Option<CubeRotation>,
    pub cube_dragging: bool,
    pub gift_opened: Option<bool>,
    pub hint_opacity: Option<f32>,
    pub burst_particles: usize,
    pub counters: Vec<u32>,
}

/// The whole greeting page
pub struct GreetingPage<C> {
    config: GreetingConfig,
    viewport: Size,
    scheduler: FrameScheduler,
    pointer: PrimaryPointer,
    capture: Option<Capture>,
    suspended: bool,

    sparkles: Option<AnimationLoop<ParticleField, C>>,
    heart_trail: Option<AnimationLoop<HeartTrailSimulator, C>>,
    floating_hearts: Option<AnimationLoop<ParticleField, C>>,
    final_hearts: Option<AnimationLoop<ParticleField, C>>,

    carousel: Option<(Carousel, Rect)>,
    auto_advance: Option<TimerId>,
    cube: Option<(CubeController, Rect)>,
    gift: Option<GiftComponent<C>>,
    hint_timer: Option<TimerId>,
    counters: Vec<CounterAnimation>,
}

fn skipped(anchor: &str) {
    debug!(anchor, "anchor missing, component skipped");
}

impl<C: DrawContext> GreetingPage<C> {
    /// Build the page from a validated config and the anchors the host found
    pub fn new(config: GreetingConfig, viewport: Size, anchors: PageAnchors<C>) -> Result<Self> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(rand::random);
        debug!(seed, ?viewport, "building greeting page");

        let mut scheduler = FrameScheduler::new();

        let sparkles = match anchors.sparkles {
            Some(surface) => {
                let field = ParticleField::new(config.sparkles_config()?, surface.size(), seed);
                Some(AnimationLoop::new(field, surface))
            }
            None => {
                skipped("sparkles");
                None
            }
        };

        let heart_trail = match anchors.heart_trail {
            Some(mut surface) => {
                surface.resize(config.heart_trail.size);
                let sim =
                    HeartTrailSimulator::new(config.heart_trail.clone(), seed.wrapping_add(1));
                Some(AnimationLoop::new(sim, surface))
            }
            None => {
                skipped("heart_trail");
                None
            }
        };

        let floating_hearts = match anchors.floating_hearts {
            Some(surface) => {
                let size = surface.size();
                let mut field = ParticleField::new(
                    config.floating_hearts_config()?,
                    size,
                    seed.wrapping_add(2),
                );
                field.set_attractor(Some(size.center()));
                Some(AnimationLoop::new(field, surface))
            }
            None => {
                skipped("floating_hearts");
                None
            }
        };

        let final_hearts = match anchors.final_hearts {
            Some(surface) => {
                let field = ParticleField::new(
                    config.final_hearts_config()?,
                    surface.size(),
                    seed.wrapping_add(3),
                );
                Some(AnimationLoop::new(field, surface))
            }
            None => {
                skipped("final_hearts");
                None
            }
        };

        let carousel = anchors.carousel.and_then(|region| {
            Carousel::new(config.carousel.cards, config.carousel.config.clone())
                .map(|carousel| (carousel, region))
        });
        if carousel.is_none() {
            skipped("carousel");
        }
        let auto_advance = carousel
            .as_ref()
            .and_then(|(c, _)| c.auto_advance())
            .map(|period| scheduler.set_interval(period));

        let cube = match anchors.cube {
            Some(region) => Some((CubeController::new(config.cube.clone()), region)),
            None => {
                skipped("cube");
                None
            }
        };

        let gift = match anchors.gift {
            Some(GiftAnchor { region, surface }) => {
                let origin = surface.size().center();
                let gift = GiftBox::new(config.gift.clone(), origin, seed.wrapping_add(4));
                Some(GiftComponent {
                    region,
                    anim: AnimationLoop::new(gift, surface),
                })
            }
            None => {
                skipped("gift");
                None
            }
        };

        let counters = if anchors.counters {
            let duration = config.counter.duration();
            config
                .counter
                .targets
                .iter()
                .map(|&target| CounterAnimation::new(target, duration))
                .collect()
        } else {
            skipped("counters");
            Vec::new()
        };

        Ok(Self {
            config,
            viewport,
            scheduler,
            pointer: PrimaryPointer::new(),
            capture: None,
            suspended: false,
            sparkles,
            heart_trail,
            floating_hearts,
            final_hearts,
            carousel,
            auto_advance,
            cube,
            gift,
            hint_timer: None,
            counters,
        })
    }

    pub fn config(&self) -> &GreetingConfig {
        &self.config
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    pub fn sparkles(&self) -> Option<&AnimationLoop<ParticleField, C>> {
        self.sparkles.as_ref()
    }

    pub fn heart_trail(&self) -> Option<&AnimationLoop<HeartTrailSimulator, C>> {
        self.heart_trail.as_ref()
    }

    pub fn floating_hearts(&self) -> Option<&AnimationLoop<ParticleField, C>> {
        self.floating_hearts.as_ref()
    }

    pub fn final_hearts(&self) -> Option<&AnimationLoop<ParticleField, C>> {
        self.final_hearts.as_ref()
    }

    pub fn carousel(&self) -> Option<&Carousel> {
        self.carousel.as_ref().map(|(c, _)| c)
    }

    pub fn cube(&self) -> Option<&CubeController> {
        self.cube.as_ref().map(|(c, _)| c)
    }

    pub fn gift(&self) -> Option<&GiftBox> {
        self.gift.as_ref().map(|g| g.anim.subject())
    }

    pub fn gift_surface(&self) -> Option<&C> {
        self.gift.as_ref().map(|g| g.anim.surface())
    }

    pub fn counters(&self) -> &[CounterAnimation] {
        &self.counters
    }

    /// Dispatch a platform event
    pub fn handle_event(&mut self, event: &Event) {
        match event {
            Event::Window(WindowEvent::Resized { width, height }) => {
                self.resize(Size::new(*width, *height));
            }
            Event::Window(WindowEvent::Focused(_)) => {}
            Event::Input(input) => self.handle_input(input),
            Event::Lifecycle(LifecycleEvent::Suspended) => {
                debug!("page suspended");
                self.suspended = true;
            }
            Event::Lifecycle(LifecycleEvent::Resumed) => {
                debug!("page resumed");
                self.suspended = false;
            }
            Event::Frame { dt } => {
                self.frame(*dt);
            }
        }
    }

    /// Full-window canvases follow the viewport; the heart canvas keeps its size
    pub fn resize(&mut self, viewport: Size) {
        debug!(?viewport, "viewport resized");
        self.viewport = viewport;
        for anim in [
            self.sparkles.as_mut(),
            self.floating_hearts.as_mut(),
            self.final_hearts.as_mut(),
        ]
        .into_iter()
        .flatten()
        {
            anim.resize(viewport);
        }
    }

    /// Advance the page by one display refresh
    ///
    /// Returns the frame that was drawn, or `None` while suspended.
    pub fn frame(&mut self, dt: Duration) -> Option<FrameInfo> {
        if self.suspended {
            return None;
        }

        let tick = self.scheduler.advance(dt);
        for id in tick.fired {
            self.dispatch_timer(id);
        }
        let frame = tick.frame;

        if let Some(anim) = &mut self.sparkles {
            anim.frame(&frame);
        }
        if let Some(anim) = &mut self.heart_trail {
            anim.frame(&frame);
        }
        if let Some(anim) = &mut self.floating_hearts {
            anim.frame(&frame);
        }
        if let Some(anim) = &mut self.final_hearts {
            anim.frame(&frame);
        }
        if let Some(gift) = &mut self.gift {
            gift.anim.frame(&frame);
        }
        for counter in &mut self.counters {
            counter.advance(dt);
        }

        trace!(index = frame.index, "page frame");
        Some(frame)
    }

    fn dispatch_timer(&mut self, id: TimerId) {
        if self.auto_advance == Some(id) {
            if let Some((carousel, _)) = &mut self.carousel {
                let index = carousel.next();
                debug!(index, "carousel auto-advanced");
            }
        } else if self.hint_timer == Some(id) {
            self.hint_timer = None;
            if let Some(gift) = &mut self.gift {
                gift.anim.subject_mut().show_hint();
                debug!("gift hint shown");
            }
        }
    }

    fn handle_input(&mut self, input: &InputEvent) {
        let Some(pointer) = self.pointer.process(input) else {
            return;
        };
        self.handle_pointer(&pointer);
    }

    /// Route a primary pointer event
    ///
    /// A press captures the component under it; moves and the release go
    /// to that component even if the pointer leaves its region.
    pub fn handle_pointer(&mut self, pointer: &PointerEvent) {
        if matches!(pointer.phase, PointerPhase::Hover | PointerPhase::Move) {
            if let Some(anim) = &mut self.floating_hearts {
                anim.subject_mut().set_attractor(Some(pointer.position));
            }
        }

        if pointer.phase == PointerPhase::Start {
            self.capture = self.hit_test(pointer.position);
            trace!(capture = ?self.capture, "pointer captured");
        }

        match self.capture {
            Some(Capture::Carousel) => {
                if let Some((carousel, _)) = &mut self.carousel {
                    if let Some(direction) = carousel.handle_pointer(pointer) {
                        debug!(?direction, index = carousel.index(), "carousel swiped");
                    }
                }
            }
            Some(Capture::Cube) => {
                if let Some((cube, _)) = &mut self.cube {
                    cube.handle_pointer(pointer);
                }
            }
            Some(Capture::Gift) => {
                let released_inside = pointer.phase == PointerPhase::End
                    && self
                        .gift
                        .as_ref()
                        .is_some_and(|g| g.region.contains(pointer.position));
                if released_inside {
                    self.open_gift();
                }
            }
            None => {}
        }

        if matches!(pointer.phase, PointerPhase::End | PointerPhase::Cancel) {
            self.capture = None;
        }
    }

    fn hit_test(&self, position: Point) -> Option<Capture> {
        if self
            .carousel
            .as_ref()
            .is_some_and(|(_, r)| r.contains(position))
        {
            Some(Capture::Carousel)
        } else if self.cube.as_ref().is_some_and(|(_, r)| r.contains(position)) {
            Some(Capture::Cube)
        } else if self.gift.as_ref().is_some_and(|g| g.region.contains(position)) {
            Some(Capture::Gift)
        } else {
            None
        }
    }

    /// Pagination dot clicked
    pub fn select_slide(&mut self, index: usize) -> Option<usize> {
        let (carousel, _) = self.carousel.as_mut()?;
        Some(carousel.go_to(index))
    }

    /// Gift box clicked; returns whether it opened
    pub fn open_gift(&mut self) -> bool {
        self.gift
            .as_mut()
            .is_some_and(|g| g.anim.subject_mut().open())
    }

    /// Replay button: close the gift and bring the hint back after a delay
    pub fn replay(&mut self) {
        let Some(gift) = &mut self.gift else {
            return;
        };
        let delay = gift.anim.subject_mut().reset();
        if let Some(previous) = self.hint_timer.take() {
            self.scheduler.cancel(previous);
        }
        self.hint_timer = Some(self.scheduler.set_timeout(delay));
    }

    /// The counter at `index` scrolled into view
    pub fn counter_visible(&mut self, index: usize) -> bool {
        self.counters
            .get_mut(index)
            .is_some_and(CounterAnimation::on_visible)
    }

    /// The whole statistics section scrolled into view
    pub fn counters_visible(&mut self) {
        for counter in &mut self.counters {
            counter.on_visible();
        }
    }

    pub fn snapshot(&self) -> PageSnapshot {
        let gift = self.gift();
        PageSnapshot {
            frame: self.scheduler.frame_index(),
            elapsed_ms: self.scheduler.elapsed().as_secs_f64() * 1000.0,
            suspended: self.suspended,
            carousel_index: self.carousel().map(Carousel::index),
            cube_rotation: self.cube().map(CubeController::rotation),
            cube_dragging: self.cube().is_some_and(CubeController::is_dragging),
            gift_opened: gift.map(GiftBox::is_opened),
            hint_opacity: gift.map(GiftBox::hint_opacity),
            burst_particles: gift.map_or(0, GiftBox::particle_count),
            counters: self.counters.iter().map(CounterAnimation::value).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heartglow_core::{DrawCommand, RecordingContext};
    use heartglow_platform::{MouseButton, MouseEvent, TouchEvent};

    const VIEWPORT: Size = Size::new(800.0, 600.0);
    const FRAME: Duration = Duration::from_millis(16);

    fn config() -> GreetingConfig {
        let mut config = GreetingConfig {
            seed: Some(42),
            ..GreetingConfig::default()
        };
        config.heart_trail.trails = 10;
        config.heart_trail.segments = 10;
        config
    }

    fn surface() -> RecordingContext {
        RecordingContext::new(VIEWPORT)
    }

    fn full_anchors() -> PageAnchors<RecordingContext> {
        PageAnchors {
            sparkles: Some(surface()),
            heart_trail: Some(surface()),
            floating_hearts: Some(surface()),
            final_hearts: Some(surface()),
            carousel: Some(Rect::new(0.0, 0.0, 800.0, 200.0)),
            cube: Some(Rect::new(0.0, 200.0, 400.0, 200.0)),
            gift: Some(GiftAnchor {
                region: Rect::new(400.0, 200.0, 200.0, 200.0),
                surface: RecordingContext::new(Size::new(200.0, 200.0)),
            }),
            counters: true,
        }
    }

    fn page() -> GreetingPage<RecordingContext> {
        GreetingPage::new(config(), VIEWPORT, full_anchors()).unwrap()
    }

    fn run(page: &mut GreetingPage<RecordingContext>, frames: usize) {
        for _ in 0..frames {
            page.frame(FRAME);
        }
    }

    fn click(page: &mut GreetingPage<RecordingContext>, x: f32, y: f32) {
        page.handle_pointer(&PointerEvent::start(x, y));
        page.handle_pointer(&PointerEvent::end(x, y));
    }

    #[test]
    fn test_missing_anchors_are_skipped() {
        let mut page =
            GreetingPage::<RecordingContext>::new(config(), VIEWPORT, PageAnchors::default())
                .unwrap();
        assert!(page.sparkles().is_none());
        assert!(page.carousel().is_none());
        assert!(page.gift().is_none());
        assert!(page.counters().is_empty());

        // Everything still runs
        run(&mut page, 3);
        click(&mut page, 10.0, 10.0);
        page.replay();
        assert!(!page.open_gift());
        assert_eq!(page.select_slide(2), None);
        assert_eq!(page.snapshot().frame, 3);
    }

    #[test]
    fn test_partial_page() {
        let anchors = PageAnchors {
            sparkles: Some(surface()),
            ..PageAnchors::default()
        };
        let mut page = GreetingPage::new(config(), VIEWPORT, anchors).unwrap();
        run(&mut page, 2);
        let sparkles = page.sparkles().unwrap();
        assert_eq!(sparkles.frames_drawn(), 2);
        assert_eq!(sparkles.surface().last_frame().len(), 50);
    }

    #[test]
    fn test_every_canvas_redraws_each_frame() {
        let mut page = page();
        run(&mut page, 1);

        let sparkles = page.sparkles().unwrap().surface();
        assert!(matches!(sparkles.commands()[0], DrawCommand::Clear(_)));
        assert_eq!(sparkles.last_frame().len(), 50);
        assert_eq!(page.floating_hearts().unwrap().surface().last_frame().len(), 30);
        assert_eq!(page.final_hearts().unwrap().surface().last_frame().len(), 15);
        assert_eq!(page.heart_trail().unwrap().surface().last_frame().len(), 100);
        assert!(page.gift_surface().unwrap().last_frame().is_empty());
    }

    #[test]
    fn test_heart_canvas_uses_configured_size() {
        let page = page();
        assert_eq!(
            page.heart_trail().unwrap().surface().size(),
            Size::new(300.0, 300.0)
        );
    }

    #[test]
    fn test_carousel_auto_advance() {
        let mut page = page();
        // 250 frames of 16ms = 4000ms
        run(&mut page, 249);
        assert_eq!(page.carousel().unwrap().index(), 0);
        run(&mut page, 1);
        assert_eq!(page.carousel().unwrap().index(), 1);
        run(&mut page, 250);
        assert_eq!(page.carousel().unwrap().index(), 2);
    }

    #[test]
    fn test_swipe_routes_to_carousel() {
        let mut page = page();
        page.handle_pointer(&PointerEvent::start(300.0, 100.0));
        page.handle_pointer(&PointerEvent::moved(250.0, 100.0));
        page.handle_pointer(&PointerEvent::end(200.0, 100.0));
        assert_eq!(page.carousel().unwrap().index(), 1);

        // A short drag is not a swipe
        page.handle_pointer(&PointerEvent::start(300.0, 100.0));
        page.handle_pointer(&PointerEvent::end(280.0, 100.0));
        assert_eq!(page.carousel().unwrap().index(), 1);

        assert_eq!(page.select_slide(7), Some(2));
    }

    #[test]
    fn test_cube_drag_keeps_capture_outside_region() {
        let mut page = page();
        page.handle_pointer(&PointerEvent::start(100.0, 300.0));
        assert!(page.cube().unwrap().is_dragging());

        // Far outside the cube region, still rotating the cube
        page.handle_pointer(&PointerEvent::moved(700.0, 300.0));
        assert_eq!(page.cube().unwrap().rotation().y, 300.0);
        assert_eq!(page.carousel().unwrap().index(), 0);

        page.handle_pointer(&PointerEvent::end(700.0, 300.0));
        assert!(!page.cube().unwrap().is_dragging());
    }

    #[test]
    fn test_raw_input_events() {
        let mut page = page();
        let touch = |event| Event::Input(InputEvent::Touch(event));
        page.handle_event(&touch(TouchEvent::Started { id: 1, x: 100.0, y: 300.0 }));
        page.handle_event(&touch(TouchEvent::Moved { id: 1, x: 100.0, y: 280.0 }));
        page.handle_event(&touch(TouchEvent::Ended { id: 1, x: 100.0, y: 280.0 }));
        assert_eq!(page.cube().unwrap().rotation().x, 10.0);

        let hover = MouseEvent::Moved { x: 5.0, y: 6.0 };
        page.handle_event(&Event::Input(InputEvent::Mouse(hover)));
        let hearts = page.floating_hearts().unwrap().subject();
        assert_eq!(hearts.attractor(), Some(Point::new(5.0, 6.0)));

        page.handle_event(&Event::Input(InputEvent::Mouse(MouseEvent::ButtonPressed {
            button: MouseButton::Left,
            x: 500.0,
            y: 300.0,
        })));
        page.handle_event(&Event::Input(InputEvent::Mouse(MouseEvent::ButtonReleased {
            button: MouseButton::Left,
            x: 500.0,
            y: 300.0,
        })));
        assert!(page.gift().unwrap().is_opened());
    }

    #[test]
    fn test_attractor_starts_at_center() {
        let page = page();
        let hearts = page.floating_hearts().unwrap().subject();
        assert_eq!(hearts.attractor(), Some(VIEWPORT.center()));
    }

    #[test]
    fn test_gift_open_and_replay() {
        let mut page = page();
        click(&mut page, 500.0, 300.0);
        let gift = page.gift().unwrap();
        assert!(gift.is_opened());
        assert_eq!(gift.particle_count(), 20);
        assert_eq!(gift.hint_opacity(), 0.0);

        // Clicking again does nothing
        click(&mut page, 500.0, 300.0);
        assert_eq!(page.gift().unwrap().particle_count(), 20);

        run(&mut page, 1);
        assert_eq!(page.gift_surface().unwrap().last_frame().len(), 20);

        page.replay();
        assert!(!page.gift().unwrap().is_opened());
        // Hint comes back 1000ms after the replay
        run(&mut page, 62);
        assert_eq!(page.gift().unwrap().hint_opacity(), 0.0);
        run(&mut page, 1);
        assert_eq!(page.gift().unwrap().hint_opacity(), 0.7);
    }

    #[test]
    fn test_gift_press_released_elsewhere() {
        let mut page = page();
        page.handle_pointer(&PointerEvent::start(500.0, 300.0));
        page.handle_pointer(&PointerEvent::end(10.0, 10.0));
        assert!(!page.gift().unwrap().is_opened());
    }

    #[test]
    fn test_counters_start_when_visible() {
        let mut page = page();
        run(&mut page, 10);
        assert_eq!(page.snapshot().counters, vec![0, 0, 0]);

        assert!(page.counter_visible(0));
        assert!(!page.counter_visible(0));
        assert!(!page.counter_visible(9));
        page.counters_visible();

        run(&mut page, 130);
        assert_eq!(page.snapshot().counters, vec![21, 365, 1000]);
    }

    #[test]
    fn test_suspend_pauses_frames() {
        let mut page = page();
        page.handle_event(&Event::Lifecycle(LifecycleEvent::Suspended));
        assert!(page.frame(FRAME).is_none());
        page.handle_event(&Event::Frame { dt: FRAME });
        assert_eq!(page.snapshot().frame, 0);

        page.handle_event(&Event::Lifecycle(LifecycleEvent::Resumed));
        assert_eq!(page.frame(FRAME).map(|f| f.index), Some(0));
    }

    #[test]
    fn test_resize_full_window_canvases() {
        let mut page = page();
        page.handle_event(&Event::Window(WindowEvent::Resized {
            width: 400.0,
            height: 300.0,
        }));
        assert_eq!(page.viewport(), Size::new(400.0, 300.0));
        assert_eq!(
            page.sparkles().unwrap().subject().bounds(),
            Size::new(400.0, 300.0)
        );
        assert_eq!(
            page.final_hearts().unwrap().surface().size(),
            Size::new(400.0, 300.0)
        );
        assert_eq!(
            page.heart_trail().unwrap().surface().size(),
            Size::new(300.0, 300.0)
        );
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = config();
        config.sparkles.color = Some("nope".to_string());
        assert!(GreetingPage::new(config, VIEWPORT, full_anchors()).is_err());
    }

    #[test]
    fn test_same_seed_same_page() {
        let mut a = page();
        let mut b = page();
        run(&mut a, 20);
        run(&mut b, 20);
        assert_eq!(
            a.heart_trail().unwrap().surface().last_frame(),
            b.heart_trail().unwrap().surface().last_frame()
        );
    }
}
