//! # countup-view
//!
//! Counter state and animation library for scroll-triggered counting
//! numbers.
//!
//! This crate provides platform-agnostic data structures and logic for:
//! - Decomposing element text into prefix, numeric body and suffix
//! - Interpolating values along named easing curves
//! - Driving the per-element counter state machine (setup, run, reset)
//! - Testing element visibility against the scroll viewport
//! - Coordinating debounced scroll re-checks across all live counters
//!
//! ## Features
//!
//! - `serde` - Enable serialization/deserialization for data structures
//! - `web` - Enable DOM rendering and scroll/event wiring via `web-sys`
//!
//! ## Example
//!
//! ```rust
//! use countup_view::{Counter, CounterConfig, CounterState};
//!
//! let mut counter = Counter::new(CounterConfig {
//!     end: 100.0,
//!     duration: 4,
//!     easing: "linearTween".into(),
//!     ..Default::default()
//! });
//!
//! // Decompose the element text and enter the Ready state
//! counter.setup("Users: 100").unwrap();
//!
//! // Advance the animation (call tick() from your timer at frame_interval())
//! counter.run();
//! while counter.tick().is_some() {
//!     println!("{}", counter.render().to_text());
//! }
//! assert_eq!(counter.state(), CounterState::Completed);
//! ```

mod config;
mod counter;
mod decompose;
mod easing;
pub mod render;
mod scroll;
mod visibility;

pub use config::{
    ConfigError, CounterConfig, Hook, DEFAULT_DURATION, DEFAULT_EASING, DEFAULT_FRAME_LENGTH_MS,
};
pub use counter::{Counter, CounterState, StepResult};
pub use decompose::{decompose, DecomposedText};
pub use easing::Easing;
pub use render::{RenderOutput, COUNTER_CLASS, RUN_EVENT};
pub use scroll::{BoundsSource, Debouncer, ScrollCoordinator, DEBOUNCE_DELAY};
pub use visibility::{is_in_view, Bounds, Viewport};

#[cfg(feature = "web")]
pub use render::web::{attach, AttachHandle};
