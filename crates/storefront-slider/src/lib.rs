//! Paged product slider.
//!
//! A fixed strip of product cards is viewed through a window of
//! `visible_count` cards. The controller owns the page index and turns
//! clicks, autoplay ticks, resizes and swipes into render commands.
//!
//! # Example
//!
//! ```rust
//! use storefront_core::SliderConfig;
//! use storefront_slider::SliderController;
//!
//! let mut slider = SliderController::new(10, 1280, &SliderConfig::default());
//! assert_eq!(slider.state().max_page_index(), 6);
//!
//! slider.go_to_next();
//! let render = slider.render(250.0);
//! assert_eq!(render.offset_px, -282.0);
//! ```

mod breakpoints;
mod controller;
mod gesture;
mod state;

pub use breakpoints::Breakpoints;
pub use controller::{SliderController, SliderRender};
pub use gesture::DragTracker;
pub use state::{SliderState, StepDirection};
