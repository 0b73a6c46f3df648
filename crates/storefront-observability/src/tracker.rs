//! Analytics event tracking.

use std::collections::{BTreeMap, VecDeque};

use chrono::{DateTime, Utc};
use serde::Serialize;

/// `tracing` target analytics events are logged under.
pub const ANALYTICS_TARGET: &str = "storefront::analytics";

/// Default number of events kept in memory.
pub const DEFAULT_HISTORY: usize = 256;

/// A tracked analytics event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsEvent {
    /// Event name, e.g. `add_to_cart`.
    pub name: String,
    /// Structured parameters.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, serde_json::Value>,
    /// Wall-clock time it was recorded.
    pub recorded_at: DateTime<Utc>,
}

impl AnalyticsEvent {
    /// Look up a field.
    pub fn field(&self, key: &str) -> Option<&serde_json::Value> {
        self.fields.get(key)
    }

    /// Format as human-readable string.
    pub fn to_human(&self) -> String {
        let mut s = format!("[{}] {}", self.recorded_at.format("%H:%M:%S%.3f"), self.name);

        if !self.fields.is_empty() {
            s.push_str(" | ");
            let fields: Vec<String> = self
                .fields
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            s.push_str(&fields.join(" "));
        }

        s
    }
}

/// Records analytics events.
#[derive(Debug, Clone)]
pub struct EventTracker {
    history: VecDeque<AnalyticsEvent>,
    capacity: usize,
}

impl EventTracker {
    /// Create a tracker keeping the default history size.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY)
    }

    /// Create a tracker keeping at most `capacity` events.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            history: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// Start building an event.
    pub fn track(&mut self, name: impl Into<String>) -> EventBuilder<'_> {
        EventBuilder {
            tracker: self,
            name: name.into(),
            fields: BTreeMap::new(),
        }
    }

    fn record(&mut self, event: AnalyticsEvent) {
        tracing::info!(
            target: ANALYTICS_TARGET,
            event = %event.name,
            fields = %serde_json::Value::Object(event.fields.clone().into_iter().collect()),
            "event tracked"
        );

        if self.history.len() == self.capacity {
            self.history.pop_front();
        }
        self.history.push_back(event);
    }

    /// Recorded events, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &AnalyticsEvent> {
        self.history.iter()
    }

    /// Most recent event.
    pub fn last(&self) -> Option<&AnalyticsEvent> {
        self.history.back()
    }

    /// Names of recorded events, oldest first.
    pub fn names(&self) -> Vec<&str> {
        self.history.iter().map(|e| e.name.as_str()).collect()
    }

    /// Number of recorded events called `name`.
    pub fn count(&self, name: &str) -> usize {
        self.history.iter().filter(|e| e.name == name).count()
    }

    /// Forget recorded events.
    pub fn clear(&mut self) {
        self.history.clear();
    }
}

impl Default for EventTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for analytics events with fluent API.
pub struct EventBuilder<'a> {
    tracker: &'a mut EventTracker,
    name: String,
    fields: BTreeMap<String, serde_json::Value>,
}

impl<'a> EventBuilder<'a> {
    /// Add a string field.
    pub fn field(mut self, key: &str, value: impl Into<String>) -> Self {
        self.fields
            .insert(key.to_string(), serde_json::json!(value.into()));
        self
    }

    /// Add an integer field.
    pub fn field_i64(mut self, key: &str, value: i64) -> Self {
        self.fields.insert(key.to_string(), serde_json::json!(value));
        self
    }

    /// Add a float field.
    pub fn field_f64(mut self, key: &str, value: f64) -> Self {
        self.fields.insert(key.to_string(), serde_json::json!(value));
        self
    }

    /// Record the event.
    pub fn emit(self) {
        let event = AnalyticsEvent {
            name: self.name,
            fields: self.fields,
            recorded_at: Utc::now(),
        };
        self.tracker.record(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_with_fields() {
        let mut tracker = EventTracker::new();
        tracker
            .track("add_to_cart")
            .field("product_name", "Teddy Bear")
            .field_f64("price", 19.99)
            .emit();

        let event = tracker.last().unwrap();
        assert_eq!(event.name, "add_to_cart");
        assert_eq!(event.field("product_name"), Some(&serde_json::json!("Teddy Bear")));
        assert_eq!(event.field("price"), Some(&serde_json::json!(19.99)));
        assert_eq!(tracker.count("add_to_cart"), 1);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut tracker = EventTracker::with_capacity(2);
        for name in ["a", "b", "c"] {
            tracker.track(name).emit();
        }
        assert_eq!(tracker.names(), vec!["b", "c"]);
    }

    #[test]
    fn test_formats() {
        let mut tracker = EventTracker::new();
        tracker
            .track("cookie_consent")
            .field("status", "accepted")
            .field_i64("page", 2)
            .emit();
        let event = tracker.last().unwrap();

        let json = serde_json::to_value(event).unwrap();
        assert_eq!(json["name"], "cookie_consent");
        assert_eq!(json["fields"]["status"], "accepted");

        let human = event.to_human();
        assert!(human.contains("cookie_consent | page=2 status=\"accepted\""));
    }

    #[test]
    fn test_event_without_fields_omits_them() {
        let mut tracker = EventTracker::new();
        tracker.track("easter_egg_konami").emit();
        let json = serde_json::to_value(tracker.last().unwrap()).unwrap();
        assert!(json.get("fields").is_none());
    }
}
