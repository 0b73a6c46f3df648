//! Scripted sessions: replay timed events against a recording surface.

use serde::{Deserialize, Serialize};
use storefront_cart::KeyValueStore;
use storefront_core::{Millis, PageEvent, RecordingSurface, RenderCommand, StorefrontConfig};
use storefront_observability::AnalyticsEvent;

use crate::page::Storefront;

fn default_cards() -> usize {
    10
}

fn default_viewport() -> u32 {
    1280
}

fn default_card_width() -> f64 {
    250.0
}

/// A session to replay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    /// Number of product cards on the page.
    #[serde(default = "default_cards")]
    pub cards: usize,
    /// Initial viewport width.
    #[serde(default = "default_viewport")]
    pub viewport_width: u32,
    /// Rendered card width.
    #[serde(default = "default_card_width")]
    pub card_width: f64,
    /// Keep the clock running until this time after the last step.
    #[serde(default)]
    pub run_until_ms: Option<Millis>,
    /// Steps, replayed in `at_ms` order.
    #[serde(default)]
    pub steps: Vec<ScriptStep>,
}

/// One timed input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptStep {
    /// Page time of the event.
    pub at_ms: Millis,
    /// Viewport width to report from this step on.
    #[serde(default)]
    pub viewport_width: Option<u32>,
    /// The event.
    pub event: PageEvent,
}

/// A render command and the page time it was issued at.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimedCommand {
    pub at_ms: Millis,
    #[serde(flatten)]
    pub command: RenderCommand,
}

/// Everything a replay produced.
#[derive(Debug, Clone, Serialize)]
pub struct ScriptRun {
    /// Commands in issue order.
    pub commands: Vec<TimedCommand>,
    /// Analytics events tracked during the run.
    pub events: Vec<AnalyticsEvent>,
    /// Page time when the replay stopped.
    pub finished_at: Millis,
    /// Cart count at the end.
    pub cart_count: u32,
    /// Slider page at the end.
    pub page_index: usize,
}

/// Replay `script` on a fresh page over `storage`.
///
/// Timers between steps fire at their own deadlines, so each command is
/// stamped with the time it was really issued.
pub fn run_script<S: KeyValueStore>(
    config: StorefrontConfig,
    storage: S,
    script: &Script,
) -> (ScriptRun, S) {
    let surface = RecordingSurface::new(script.viewport_width, script.card_width);
    let mut page = Storefront::start(config, storage, surface, script.cards);
    let mut commands = Vec::new();
    drain(&mut page, &mut commands);

    let mut steps: Vec<&ScriptStep> = script.steps.iter().collect();
    steps.sort_by_key(|s| s.at_ms);

    for step in steps {
        run_timers_until(&mut page, step.at_ms, &mut commands);
        if let Some(width) = step.viewport_width {
            page.surface_mut().set_viewport_width(width);
        }
        page.dispatch(step.event.clone());
        drain(&mut page, &mut commands);
    }
    if let Some(until) = script.run_until_ms {
        run_timers_until(&mut page, until, &mut commands);
    }

    let run = ScriptRun {
        events: page.tracker().history().cloned().collect(),
        finished_at: page.now(),
        cart_count: page.cart().count(),
        page_index: page.slider().state().page_index(),
        commands,
    };
    let (storage, _) = page.into_parts();
    (run, storage)
}

fn run_timers_until<S: KeyValueStore>(
    page: &mut Storefront<S, RecordingSurface>,
    until: Millis,
    out: &mut Vec<TimedCommand>,
) {
    while let Some(deadline) = page.next_deadline().filter(|d| *d <= until) {
        page.advance_to(deadline);
        drain(page, out);
    }
    page.advance_to(until);
}

fn drain<S: KeyValueStore>(page: &mut Storefront<S, RecordingSurface>, out: &mut Vec<TimedCommand>) {
    let at_ms = page.now();
    out.extend(
        page.surface_mut()
            .take_commands()
            .into_iter()
            .map(|command| TimedCommand { at_ms, command }),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_cart::MemoryStore;
    use storefront_core::ProductId;

    #[test]
    fn test_script_from_json() {
        let script: Script = serde_json::from_str(
            r#"{
                "cards": 10,
                "run_until_ms": 6000,
                "steps": [
                    {"at_ms": 100, "event": {"type": "next_clicked"}},
                    {"at_ms": 200, "event": {"type": "add_to_cart_clicked",
                        "product_id": "p1", "name": "Teddy Bear", "price_text": "19,99 €"}}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(script.viewport_width, 1280);

        let (run, storage) = run_script(StorefrontConfig::default(), MemoryStore::new(), &script);
        assert_eq!(run.finished_at, 6000);
        assert_eq!(run.cart_count, 1);
        // next at 100, autoplay at 5000.
        assert_eq!(run.page_index, 2);
        assert!(storage.exists("itiShopCart").unwrap());

        let pulse_end = run
            .commands
            .iter()
            .find(|c| c.command == RenderCommand::CartPulse { active: false })
            .unwrap();
        assert_eq!(pulse_end.at_ms, 800);

        let names: Vec<&str> = run.events.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["slider_navigated", "add_to_cart"]);
    }

    #[test]
    fn test_steps_replayed_in_time_order() {
        let script = Script {
            cards: 0,
            viewport_width: 1280,
            card_width: 250.0,
            run_until_ms: None,
            steps: vec![
                ScriptStep {
                    at_ms: 50,
                    viewport_width: None,
                    event: PageEvent::AddToCartClicked {
                        product_id: ProductId::new("b"),
                        name: "B".to_string(),
                        price_text: "2,00 €".to_string(),
                    },
                },
                ScriptStep {
                    at_ms: 10,
                    viewport_width: None,
                    event: PageEvent::AddToCartClicked {
                        product_id: ProductId::new("a"),
                        name: "A".to_string(),
                        price_text: "1,00 €".to_string(),
                    },
                },
            ],
        };
        let (_, storage) = run_script(StorefrontConfig::default(), MemoryStore::new(), &script);
        let raw = storage.get_raw("itiShopCart").unwrap().unwrap();
        assert!(raw.find("\"a\"").unwrap() < raw.find("\"b\"").unwrap());
    }
}
