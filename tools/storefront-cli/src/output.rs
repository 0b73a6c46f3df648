//! Output formatting for the CLI.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use storefront_core::{Millis, NotificationKind, RenderCommand};

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = width))
            .collect();
        println!("  {}", formatted.join("  "));
    }

    /// Print a render command issued at page time `at`.
    pub fn command(&self, at: Millis, command: &RenderCommand) {
        if self.json {
            return;
        }
        println!(
            "  {} {}",
            style(format!("{:>8}", format_millis(at))).dim(),
            describe_command(command)
        );
    }

    /// Create a progress bar.
    pub fn progress(&self, len: u64, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(len);
        let template = "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len}s {msg}";
        if let Ok(bar_style) = ProgressStyle::default_bar().template(template) {
            pb.set_style(bar_style.progress_chars("#>-"));
        }
        pb.set_message(msg.to_string());
        pb
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Format page time as seconds with millisecond precision.
pub fn format_millis(ms: Millis) -> String {
    format!("{}.{:03}s", ms / 1000, ms % 1000)
}

/// One-line, human-readable form of a render command.
pub fn describe_command(command: &RenderCommand) -> String {
    match command {
        RenderCommand::TranslateCards { offset_px, .. } => {
            format!("{} offset {}px", style("slider").cyan(), offset_px)
        }
        RenderCommand::SliderNav {
            previous_enabled,
            next_enabled,
        } => format!(
            "{} previous={} next={}",
            style("nav").cyan(),
            enabled(*previous_enabled),
            enabled(*next_enabled)
        ),
        RenderCommand::CartBadge { count, visible } => {
            if *visible {
                format!("{} {}", style("badge").magenta(), count)
            } else {
                format!("{} hidden", style("badge").magenta())
            }
        }
        RenderCommand::CartPulse { active } => {
            format!("{} {}", style("pulse").magenta(), if *active { "on" } else { "off" })
        }
        RenderCommand::ShowNotification { id, message, kind } => {
            format!(
                "{} {} {} {}",
                kind_badge(*kind),
                style(kind.accent()).dim(),
                style(id).dim(),
                message
            )
        }
        RenderCommand::DismissNotification { id } => {
            format!("{} {}", style("dismiss").dim(), id)
        }
        RenderCommand::Menu { open } => {
            format!("{} {}", style("menu").blue(), if *open { "open" } else { "closed" })
        }
        RenderCommand::Header { condensed } => format!(
            "{} {}",
            style("header").blue(),
            if *condensed { "condensed" } else { "plain" }
        ),
        RenderCommand::FieldError { field, message } => {
            format!("{} {}: {}", style("field").red(), field, message)
        }
        RenderCommand::ClearFieldError { field } => {
            format!("{} {}: ok", style("field").green(), field)
        }
        RenderCommand::NewsletterButton { label, disabled } => format!(
            "{} \"{}\"{}",
            style("newsletter").yellow(),
            label,
            if *disabled { " (disabled)" } else { "" }
        ),
        RenderCommand::NewsletterFormReset => format!("{} form reset", style("newsletter").yellow()),
        RenderCommand::CookieBanner { visible } => format!(
            "{} {}",
            style("cookies").yellow(),
            if *visible { "shown" } else { "hidden" }
        ),
        RenderCommand::Celebrate { egg } => format!("{} {:?}", style("celebrate").bold(), egg),
        RenderCommand::Modal { modal, open } => format!(
            "{} {} {}",
            style("modal").blue(),
            modal.as_str(),
            if *open { "open" } else { "closed" }
        ),
        RenderCommand::FocusSearchInput => format!("{} focus input", style("search").cyan()),
        RenderCommand::SearchQuery { query } => {
            format!("{} input \"{}\"", style("search").cyan(), query)
        }
        RenderCommand::Search { query } => {
            format!("{} run \"{}\"", style("search").cyan(), query)
        }
        RenderCommand::OpenLink { href } => format!("{} {}", style("link").blue(), href),
        RenderCommand::LoadingOverlay { visible } => format!(
            "{} {}",
            style("loading").dim(),
            if *visible { "shown" } else { "hidden" }
        ),
        RenderCommand::ScrollToSection { section, margin_px } => {
            format!("{} #{} (-{}px)", style("scroll").blue(), section, margin_px)
        }
    }
}

fn enabled(on: bool) -> String {
    if on {
        style("on").green().to_string()
    } else {
        style("off").dim().to_string()
    }
}

fn kind_badge(kind: NotificationKind) -> String {
    match kind {
        NotificationKind::Success => style("success").green().to_string(),
        NotificationKind::Error => style("error").red().to_string(),
        NotificationKind::Info => style("info").cyan().to_string(),
        NotificationKind::Warning => style("warning").yellow().to_string(),
    }
}
