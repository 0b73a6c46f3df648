//! Observability for the storefront.
//!
//! This crate provides:
//! - `EventTracker` - Named analytics events with structured fields
//! - `AnalyticsEvent` - One tracked event, printable as JSON or text
//!
//! Events are logged through `tracing` under the `storefront::analytics`
//! target and kept in a bounded in-memory history.

mod tracker;

pub use tracker::*;
