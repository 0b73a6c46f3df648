//! Core abstractions for the storefront interaction layer.
//!
//! This crate provides the fundamental types shared by the controllers:
//! - `PageEvent` - Input events dispatched into the page
//! - `RenderCommand` / `DisplaySurface` - The display layer contract
//! - `TimerQueue` - Virtual-clock timers for the single-threaded event loop
//! - `Debouncer` / `Throttle` - Timer-coalescing wrappers
//! - `NotificationCenter` - Transient toast bookkeeping
//! - `StorefrontConfig` - Tunables with defaults for every constant

mod clock;
mod config;
mod debounce;
mod error;
mod event;
mod ids;
mod notification;
mod render;

pub use clock::*;
pub use config::*;
pub use debounce::*;
pub use error::*;
pub use event::*;
pub use ids::*;
pub use notification::*;
pub use render::*;
