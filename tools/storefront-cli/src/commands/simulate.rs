//! Scripted session replay.

use std::path::Path;

use anyhow::{Context as _, Result};
use serde::Serialize;
use storefront_cart::MemoryStore;
use storefront_core::Millis;
use storefront_observability::AnalyticsEvent;
use storefront_page::{run_script, Script, TimedCommand};

use super::SimulateArgs;
use crate::context::Context;
use crate::output::format_millis;

/// Run the simulate command.
pub async fn run(args: SimulateArgs, ctx: &Context) -> Result<()> {
    let path = ctx.resolve_path(&args.script);
    let script = load_script(&path)?;
    ctx.output.debug(&format!(
        "{} step(s), {} card(s) at {}px",
        script.steps.len(),
        script.cards,
        script.viewport_width
    ));

    let config = ctx.config.clone();
    let run = match args.store.as_deref() {
        Some(store) => run_script(config, ctx.open_store(Some(store))?, &script).0,
        None => run_script(config, MemoryStore::new(), &script).0,
    };

    let commands: Vec<&TimedCommand> = run
        .commands
        .iter()
        .filter(|c| matches_filter(c, &args.filter))
        .collect();

    if ctx.output.is_json() {
        ctx.output.json(&Report {
            script: path.display().to_string(),
            finished_at: run.finished_at,
            page_index: run.page_index,
            cart_count: run.cart_count,
            commands: &commands,
            events: &run.events,
        });
        return Ok(());
    }

    ctx.output.header(&format!("Simulating {}", path.display()));
    for timed in &commands {
        ctx.output.command(timed.at_ms, &timed.command);
    }

    ctx.output.header("Summary");
    ctx.output.kv("Finished at", &format_millis(run.finished_at));
    ctx.output.kv("Commands", &commands.len().to_string());
    ctx.output.kv("Slider page", &run.page_index.to_string());
    ctx.output.kv("Cart count", &run.cart_count.to_string());
    if !run.events.is_empty() {
        ctx.output.info("Tracked events:");
        for event in &run.events {
            ctx.output.list_item(&event.to_human());
        }
    }

    Ok(())
}

#[derive(Serialize)]
struct Report<'a> {
    script: String,
    finished_at: Millis,
    page_index: usize,
    cart_count: u32,
    commands: &'a [&'a TimedCommand],
    events: &'a [AnalyticsEvent],
}

/// Parse a script file, picking the format from the extension.
pub fn load_script(path: &Path) -> Result<Script> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read script: {}", path.display()))?;

    if path.extension().is_some_and(|ext| ext == "json") {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON script: {}", path.display()))
    } else {
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML script: {}", path.display()))
    }
}

fn matches_filter(timed: &TimedCommand, filter: &[String]) -> bool {
    if filter.is_empty() {
        return true;
    }
    serde_json::to_value(&timed.command)
        .ok()
        .and_then(|v| v.get("command").and_then(|c| c.as_str()).map(str::to_string))
        .is_some_and(|name| filter.iter().any(|f| *f == name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::{PageEvent, RenderCommand};

    #[test]
    fn test_load_toml_script() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.toml");
        std::fs::write(
            &path,
            r#"
cards = 6
viewport_width = 900

[[steps]]
at_ms = 100
event = { type = "next_clicked" }

[[steps]]
at_ms = 400
viewport_width = 400
event = { type = "resized" }
"#,
        )
        .unwrap();

        let script = load_script(&path).unwrap();
        assert_eq!(script.cards, 6);
        assert_eq!(script.steps.len(), 2);
        assert_eq!(script.steps[0].event, PageEvent::NextClicked);
        assert_eq!(script.steps[1].viewport_width, Some(400));
    }

    #[test]
    fn test_load_script_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{").unwrap();
        let err = load_script(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("broken.json"));
    }

    #[test]
    fn test_filter_by_command_name() {
        let timed = TimedCommand {
            at_ms: 0,
            command: RenderCommand::CartPulse { active: true },
        };
        assert!(matches_filter(&timed, &[]));
        assert!(matches_filter(&timed, &["cart_pulse".to_string()]));
        assert!(!matches_filter(&timed, &["menu".to_string()]));
    }
}
