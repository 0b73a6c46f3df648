//! Configuration management commands.

use anyhow::{bail, Context as _, Result};
use storefront_core::StorefrontConfig;

use super::{ConfigArgs, ConfigCommand, ConfigFormat};
use crate::context::Context;
use crate::output::format_millis;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force, format } => init_config(force, format, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("source", &path.display().to_string()),
        None => ctx.output.kv("source", "built-in defaults"),
    }

    let c = &ctx.config;

    ctx.output.info("[slider]");
    ctx.output
        .kv("autoplay_delay", &format_millis(c.slider.autoplay_delay_ms));
    ctx.output
        .kv("swipe_threshold_px", &c.slider.swipe_threshold_px.to_string());
    ctx.output.kv("card_gap_px", &c.slider.card_gap_px.to_string());
    ctx.output.kv("transition", &c.slider.transition);
    for bp in &c.slider.breakpoints {
        ctx.output
            .list_item(&format!("<= {}px: {} visible", bp.max_width, bp.visible));
    }
    ctx.output
        .list_item(&format!("wider: {} visible", c.slider.wide_visible));

    ctx.output.info("[cart]");
    ctx.output.kv("storage_key", &c.cart.storage_key);
    ctx.output.kv("pulse", &format_millis(c.cart.pulse_ms));

    ctx.output.info("[notifications]");
    ctx.output
        .kv("auto_dismiss", &format_millis(c.notifications.auto_dismiss_ms));

    ctx.output.info("[viewport]");
    ctx.output
        .kv("resize_debounce", &format_millis(c.viewport.resize_debounce_ms));
    ctx.output
        .kv("desktop_min_width", &c.viewport.desktop_min_width.to_string());

    ctx.output.info("[header]");
    ctx.output
        .kv("condense_after_px", &c.header.condense_after_px.to_string());
    ctx.output.kv("frame", &format_millis(c.header.frame_ms));

    ctx.output.info("[easter_eggs]");
    ctx.output
        .kv("konami_sequence", &c.easter_eggs.konami_sequence.join(" "));
    ctx.output.kv(
        "logo",
        &format!(
            "{} clicks within {}",
            c.easter_eggs.logo_clicks,
            format_millis(c.easter_eggs.logo_window_ms)
        ),
    );

    ctx.output.info("[newsletter]");
    ctx.output
        .kv("submit_delay", &format_millis(c.newsletter.submit_delay_ms));
    ctx.output
        .kv("reset_delay", &format_millis(c.newsletter.reset_delay_ms));

    ctx.output.info("[consent]");
    ctx.output.kv("storage_key", &c.consent.storage_key);
    ctx.output
        .kv("reveal_delay", &format_millis(c.consent.reveal_delay_ms));

    ctx.output.info("[search]");
    ctx.output
        .kv("focus_delay", &format_millis(c.search.focus_delay_ms));
    ctx.output
        .kv("min_query_chars", &c.search.min_query_chars.to_string());

    ctx.output.info("[landing]");
    ctx.output.kv(
        "cta_section",
        &format!("#{} ({}px margin)", c.landing.cta_section, c.landing.scroll_margin_px),
    );
    ctx.output
        .kv("category_loading", &format_millis(c.landing.category_loading_ms));

    ctx.output.info("[contact]");
    ctx.output.kv("phone_href", &c.contact.phone_href);
    ctx.output.kv("email_href", &c.contact.email_href);

    Ok(())
}

fn init_config(force: bool, format: ConfigFormat, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(format.file_name());

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    StorefrontConfig::default()
        .save(&config_path)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    ctx.output
        .success(&format!("Created: {}", config_path.display()));
    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    // Loading already rejects hard errors; these are softer checks.
    ctx.config.validate()?;
    let warnings = config_warnings(&ctx.config);

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "valid": true,
            "warnings": warnings,
        }));
    } else if warnings.is_empty() {
        ctx.output.success("Configuration is valid");
    } else {
        ctx.output.success("Configuration is valid (with warnings)");
    }
    Ok(())
}

fn config_warnings(config: &StorefrontConfig) -> Vec<String> {
    let mut warnings = Vec::new();

    if config.slider.autoplay_delay_ms < 1000 {
        warnings.push(format!(
            "slider.autoplay_delay_ms = {} is shorter than the slide transition",
            config.slider.autoplay_delay_ms
        ));
    }
    if config.notifications.auto_dismiss_ms == 0 {
        warnings.push("notifications.auto_dismiss_ms = 0 hides toasts immediately".to_string());
    }
    if config.easter_eggs.konami_sequence.is_empty() {
        warnings.push("easter_eggs.konami_sequence is empty; the Konami code is disabled".to_string());
    }
    if config
        .slider
        .breakpoints
        .last()
        .is_some_and(|bp| bp.visible > config.slider.wide_visible)
    {
        warnings.push("slider.wide_visible is smaller than the widest breakpoint".to_string());
    }
    if config.search.min_query_chars == 0 {
        warnings.push("search.min_query_chars = 0 searches for an empty query".to_string());
    }

    warnings
}
