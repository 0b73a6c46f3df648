//! Real-time slider run.

use std::time::Duration;

use anyhow::{bail, Result};
use chrono::Local;
use storefront_cart::MemoryStore;
use storefront_core::{RecordingSurface, RenderCommand};
use storefront_page::Storefront;
use tokio::time::{sleep_until, Instant};

use super::RunArgs;
use crate::context::Context;
use crate::output::describe_command;

/// Run the run command.
pub async fn run(args: RunArgs, ctx: &Context) -> Result<()> {
    if args.seconds == 0 {
        bail!("--seconds must be at least 1");
    }

    let surface = RecordingSurface::new(args.width, args.card_width);
    let mut page = Storefront::start(ctx.config.clone(), MemoryStore::new(), surface, args.cards);

    if page.slider().state().total_cards() == 0 {
        ctx.output.warn("No cards: the slider is inert, nothing will move");
    }

    ctx.output.header(&format!(
        "Running {} card(s) at {}px for {}s",
        args.cards, args.width, args.seconds
    ));
    ctx.output.kv(
        "Visible",
        &page.slider().state().visible_count().to_string(),
    );
    ctx.output
        .kv("Autoplay", &format!("{}ms", page.slider().autoplay_delay()));

    let progress = ctx.output.progress(args.seconds, "autoplay");
    let started = Instant::now();
    let end_ms = args.seconds * 1000;
    let mut renders = 0usize;

    print_renders(&mut page, ctx, &progress, &mut renders);

    loop {
        let next = page.next_deadline().unwrap_or(end_ms).min(end_ms);
        let wake = started + Duration::from_millis(next);

        tokio::select! {
            _ = sleep_until(wake) => {}
            _ = tokio::signal::ctrl_c() => {
                progress.abandon_with_message("interrupted");
                break;
            }
        }

        page.advance_to(next);
        progress.set_position(next / 1000);
        print_renders(&mut page, ctx, &progress, &mut renders);

        if next >= end_ms {
            progress.finish_with_message("done");
            break;
        }
    }

    page.teardown();

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "renders": renders,
            "page_index": page.slider().state().page_index(),
            "elapsed_ms": started.elapsed().as_millis() as u64,
        }));
    } else {
        ctx.output.success(&format!(
            "{} slider render(s), finished on page {}",
            renders,
            page.slider().state().page_index()
        ));
    }

    Ok(())
}

fn print_renders(
    page: &mut Storefront<MemoryStore, RecordingSurface>,
    ctx: &Context,
    progress: &indicatif::ProgressBar,
    renders: &mut usize,
) {
    for command in page.surface_mut().take_commands() {
        if !matches!(command, RenderCommand::TranslateCards { .. }) {
            continue;
        }
        *renders += 1;
        if !ctx.output.is_json() {
            progress.println(format!(
                "{} {}",
                Local::now().format("%H:%M:%S%.3f"),
                describe_command(&command)
            ));
        }
    }
}
