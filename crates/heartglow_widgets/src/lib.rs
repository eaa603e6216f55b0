//! Heartglow Widgets
//!
//! Pointer-driven controllers for the interactive sections of the page.
//! Each controller is a plain state machine: it consumes `PointerEvent`s and
//! exposes the transforms or flags a host applies to its elements.
//!
//! - **Carousel**: slide index with swipe, dot, and timer navigation plus 3D card placement
//! - **Cube**: drag-to-rotate accumulator
//! - **Gift box**: one-shot reveal with a glyph burst and a replayable hint
//!
//! # Example
//!
//! ```ignore
//! use heartglow_widgets::{Carousel, CarouselConfig};
//!
//! let mut carousel = Carousel::new(5, CarouselConfig::default()).unwrap();
//! carousel.swipe(200.0, 100.0);
//! assert_eq!(carousel.index(), 1);
//! ```

pub mod carousel;
pub mod cube;
pub mod gift;

pub use carousel::{CardPlacement, Carousel, CarouselConfig, SwipeDirection};
pub use cube::{CubeConfig, CubeController, CubeRotation};
pub use gift::{GiftBox, GiftConfig};
