//! Storefront CLI - Command line tool for the storefront interaction layer.
//!
//! Commands:
//! - `storefront simulate` - Replay a scripted session
//! - `storefront run` - Run the slider in real time
//! - `storefront cart` - Inspect or edit a file-backed cart
//! - `storefront consent` - Record a cookie consent decision
//! - `storefront config` - Manage configuration

mod commands;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CartArgs, ConfigArgs, ConsentArgs, RunArgs, SimulateArgs};

/// Storefront CLI - Drive and inspect the storefront page headless
#[derive(Parser)]
#[command(name = "storefront")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a scripted session and print what the page rendered
    Simulate(SimulateArgs),

    /// Run the slider autoplay in real time
    Run(RunArgs),

    /// Inspect or edit the persisted cart
    Cart(CartArgs),

    /// Record the cookie consent decision
    Consent(ConsentArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    let config_path = cli.config.as_deref();
    let ctx = match context::Context::load(config_path, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    tracing::debug!(
        config = ?ctx.config_path,
        cwd = %ctx.cwd.display(),
        "context loaded"
    );

    let result = match cli.command {
        Commands::Simulate(args) => commands::simulate::run(args, &ctx).await,
        Commands::Run(args) => commands::run::run(args, &ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Consent(args) => commands::consent::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
