//! CLI command implementations.

pub mod cart;
pub mod config;
pub mod consent;
pub mod run;
pub mod simulate;

use clap::{Args, Subcommand, ValueEnum};

/// Arguments for the simulate command.
#[derive(Args)]
pub struct SimulateArgs {
    /// Script file (TOML, or JSON when it ends in `.json`).
    pub script: String,

    /// Replay against this file-backed store instead of an empty one.
    #[arg(short, long)]
    pub store: Option<String>,

    /// Only print these commands (e.g. `translate_cards`, `cart_badge`).
    #[arg(short = 'f', long = "filter")]
    pub filter: Vec<String>,
}

/// Arguments for the run command.
#[derive(Args)]
pub struct RunArgs {
    /// Number of product cards.
    #[arg(long, default_value = "10")]
    pub cards: usize,

    /// Viewport width in pixels.
    #[arg(short, long, default_value = "1280")]
    pub width: u32,

    /// Rendered card width in pixels.
    #[arg(long, default_value = "250")]
    pub card_width: f64,

    /// How long to run.
    #[arg(short, long, default_value = "30")]
    pub seconds: u64,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: CartCommand,

    /// Store file (default: .storefront/storage.json).
    #[arg(long, global = true)]
    pub store: Option<String>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart.
    Show,
    /// Add one unit of a product.
    Add {
        /// Product id.
        id: String,
        /// Product name.
        name: String,
        /// Displayed price, e.g. "19,99 €".
        price: String,
    },
    /// Remove the cart from the store.
    Clear {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the consent command.
#[derive(Args)]
pub struct ConsentArgs {
    /// Accept cookies.
    #[arg(long, conflicts_with = "decline")]
    pub accept: bool,

    /// Decline cookies.
    #[arg(long)]
    pub decline: bool,

    /// Store file (default: .storefront/storage.json).
    #[arg(long)]
    pub store: Option<String>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,

        /// File format to write.
        #[arg(long, value_enum, default_value_t = ConfigFormat::Toml)]
        format: ConfigFormat,
    },
    /// Validate the config file.
    Validate,
}

/// Config file format.
#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    /// File name written by `config init`.
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Toml => "storefront.toml",
            Self::Json => "storefront.json",
        }
    }
}
