//! Scripted headless runs of the greeting page
//!
//! A script is a viewport plus a list of steps. Interactions are delivered
//! as raw mouse and touch events, the same way a host would forward them,
//! so the page's pointer routing is exercised end to end.

use anyhow::{Context, Result};
use heartglow_animation::REFERENCE_FRAME_RATE;
use heartglow_app::{GiftAnchor, GreetingConfig, GreetingPage, PageAnchors, PageSnapshot};
use heartglow_core::{Point, Rect, RecordingContext, Size};
use heartglow_platform::{
    Event, InputEvent, LifecycleEvent, MouseButton, MouseEvent, TouchEvent, WindowEvent,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// One scripted step
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Let frames pass
    Wait { frames: u32 },
    /// Mouse hover, steering the floating hearts
    Hover { x: f32, y: f32 },
    /// Horizontal mouse swipe across the carousel
    Swipe { dx: f32 },
    /// Touch drag on the cube
    Drag { dx: f32, dy: f32 },
    /// Pagination dot click
    SelectSlide { index: usize },
    /// Click on the gift box
    OpenGift,
    /// Replay button
    Replay,
    /// Statistics section scrolled into view
    ShowCounters,
    Resize { width: f32, height: f32 },
    Suspend,
    Resume,
    /// Log a page snapshot
    Snapshot,
}

/// Viewport and steps for a headless run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Script {
    pub width: f32,
    pub height: f32,
    pub actions: Vec<Action>,
}

impl Script {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse script {}", path.display()))
    }

    /// A tour of every interactive component
    pub fn demo(width: f32, height: f32) -> Self {
        use Action::*;
        Self {
            width,
            height,
            actions: vec![
                Wait { frames: 30 },
                Hover {
                    x: width * 0.25,
                    y: height * 0.5,
                },
                Swipe { dx: -120.0 },
                Swipe { dx: 120.0 },
                SelectSlide { index: 3 },
                Drag { dx: 80.0, dy: -40.0 },
                Snapshot,
                OpenGift,
                Wait { frames: 20 },
                Snapshot,
                Replay,
                Wait { frames: 70 },
                ShowCounters,
                Wait { frames: 60 },
                Snapshot,
                Suspend,
                Wait { frames: 30 },
                Resume,
                Wait { frames: 150 },
                Resize {
                    width: width * 0.5,
                    height,
                },
                Wait { frames: 10 },
            ],
        }
    }
}

/// Where the interactive elements sit on a page of a given size
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    pub carousel: Rect,
    pub cube: Rect,
    pub gift: Rect,
}

impl Layout {
    /// Stacked sections: carousel, cube, then gift box
    pub fn for_viewport(viewport: Size) -> Self {
        let w = viewport.width;
        let h = viewport.height;
        let square = (w * 0.5).min(h * 0.25);
        Self {
            carousel: Rect::new(0.0, h * 0.05, w, h * 0.3),
            cube: Rect::new((w - square) / 2.0, h * 0.4, square, square),
            gift: Rect::new((w - square) / 2.0, h * 0.7, square, square),
        }
    }
}

/// Drives a page with recording surfaces through a script
pub struct ScriptRunner {
    page: GreetingPage<RecordingContext>,
    layout: Layout,
    dt: Duration,
}

impl ScriptRunner {
    pub fn new(config: GreetingConfig, viewport: Size) -> Result<Self> {
        let layout = Layout::for_viewport(viewport);
        let gift_size = Size::new(layout.gift.width(), layout.gift.height());
        let anchors = PageAnchors {
            sparkles: Some(RecordingContext::last_frame_only(viewport)),
            heart_trail: Some(RecordingContext::last_frame_only(config.heart_trail.size)),
            floating_hearts: Some(RecordingContext::last_frame_only(viewport)),
            final_hearts: Some(RecordingContext::last_frame_only(viewport)),
            carousel: Some(layout.carousel),
            cube: Some(layout.cube),
            gift: Some(GiftAnchor {
                region: layout.gift,
                surface: RecordingContext::last_frame_only(gift_size),
            }),
            counters: true,
        };
        let page = GreetingPage::new(config, viewport, anchors)?;
        Ok(Self {
            page,
            layout,
            dt: Duration::from_secs_f32(1.0 / REFERENCE_FRAME_RATE),
        })
    }

    pub fn page(&self) -> &GreetingPage<RecordingContext> {
        &self.page
    }

    /// Run every step; returns the snapshots taken along the way
    pub fn run(&mut self, actions: &[Action]) -> Vec<PageSnapshot> {
        let mut snapshots = Vec::new();
        for action in actions {
            debug!(?action, "script step");
            if let Some(snapshot) = self.step(action) {
                snapshots.push(snapshot);
            }
        }
        snapshots
    }

    fn step(&mut self, action: &Action) -> Option<PageSnapshot> {
        match *action {
            Action::Wait { frames } => {
                for _ in 0..frames {
                    self.send(Event::Frame { dt: self.dt });
                }
            }
            Action::Hover { x, y } => self.mouse(MouseEvent::Moved { x, y }),
            Action::Swipe { dx } => {
                let Point { x, y } = self.layout.carousel.center();
                self.mouse(MouseEvent::ButtonPressed {
                    button: MouseButton::Left,
                    x,
                    y,
                });
                self.mouse(MouseEvent::Moved { x: x + dx / 2.0, y });
                self.mouse(MouseEvent::ButtonReleased {
                    button: MouseButton::Left,
                    x: x + dx,
                    y,
                });
            }
            Action::Drag { dx, dy } => {
                let Point { x, y } = self.layout.cube.center();
                self.touch(TouchEvent::Started { id: 1, x, y });
                self.touch(TouchEvent::Moved {
                    id: 1,
                    x: x + dx,
                    y: y + dy,
                });
                self.touch(TouchEvent::Ended {
                    id: 1,
                    x: x + dx,
                    y: y + dy,
                });
            }
            Action::SelectSlide { index } => {
                self.page.select_slide(index);
            }
            Action::OpenGift => {
                let Point { x, y } = self.layout.gift.center();
                self.mouse(MouseEvent::ButtonPressed {
                    button: MouseButton::Left,
                    x,
                    y,
                });
                self.mouse(MouseEvent::ButtonReleased {
                    button: MouseButton::Left,
                    x,
                    y,
                });
            }
            Action::Replay => self.page.replay(),
            Action::ShowCounters => self.page.counters_visible(),
            Action::Resize { width, height } => {
                self.send(Event::Window(WindowEvent::Resized { width, height }));
            }
            Action::Suspend => self.send(Event::Lifecycle(LifecycleEvent::Suspended)),
            Action::Resume => self.send(Event::Lifecycle(LifecycleEvent::Resumed)),
            Action::Snapshot => {
                let snapshot = self.page.snapshot();
                info!(
                    frame = snapshot.frame,
                    carousel = ?snapshot.carousel_index,
                    gift_opened = ?snapshot.gift_opened,
                    burst_particles = snapshot.burst_particles,
                    counters = ?snapshot.counters,
                    "snapshot"
                );
                return Some(snapshot);
            }
        }
        None
    }

    fn send(&mut self, event: Event) {
        self.page.handle_event(&event);
    }

    fn mouse(&mut self, event: MouseEvent) {
        self.send(Event::Input(InputEvent::Mouse(event)));
    }

    fn touch(&mut self, event: TouchEvent) {
        self.send(Event::Input(InputEvent::Touch(event)));
    }
}

/// Draw commands recorded by the page's canvases on their latest frame
pub fn last_frame_commands(page: &GreetingPage<RecordingContext>) -> usize {
    let canvases = [
        page.sparkles().map(|a| a.surface()),
        page.heart_trail().map(|a| a.surface()),
        page.floating_hearts().map(|a| a.surface()),
        page.final_hearts().map(|a| a.surface()),
        page.gift_surface(),
    ];
    canvases
        .into_iter()
        .flatten()
        .map(|ctx| ctx.last_frame().len())
        .sum()
}
