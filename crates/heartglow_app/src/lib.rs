//! Heartglow App
//!
//! The greeting page: every animated canvas and interactive controller,
//! wired to host events and configured from `heartglow.toml`.
//!
//! # Example
//!
//! ```ignore
//! use heartglow_app::{GreetingConfig, GreetingPage, PageAnchors};
//!
//! let config = GreetingConfig::load_from_dir(Path::new("."))?;
//! let anchors = PageAnchors {
//!     sparkles: Some(sparkles_canvas),
//!     carousel: Some(carousel_rect),
//!     ..PageAnchors::default()
//! };
//! let mut page = GreetingPage::new(config, viewport, anchors)?;
//!
//! // On every display refresh
//! page.frame(dt);
//! ```

pub mod config;
pub mod error;
pub mod page;

pub use config::{
    parse_color, CarouselSection, CounterConfig, GreetingConfig, ParticleSection,
    CONFIG_FILE_NAME,
};
pub use error::{AppError, Result};
pub use page::{GiftAnchor, GreetingPage, PageAnchors, PageSnapshot};
