//! Bundle CLI - Command line tool for bundle offers.
//!
//! Commands:
//! - `bundle init` - Write a default bundle.toml
//! - `bundle preview` - Price an offer group the way the storefront would
//! - `bundle storefront` - Match a product against a published blob
//! - `bundle republish` - Resync a shop's published offers from the record store
//! - `bundle validate` - Check an offer group file

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::{InitArgs, PreviewArgs, RepublishArgs, StorefrontArgs, ValidateArgs};

/// Bundle CLI - Preview, validate and publish bundle offers
#[derive(Parser)]
#[command(name = "bundle")]
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
    /// Write a default bundle.toml and sample seed
    Init(InitArgs),

    /// Price an offer group file
    Preview(PreviewArgs),

    /// Run the storefront matcher against a published blob
    Storefront(StorefrontArgs),

    /// Publish a shop's active offers from the record store seed
    Republish(RepublishArgs),

    /// Validate an offer group file
    Validate(ValidateArgs),
}

fn init_tracing(verbose: bool, json: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_env("BUNDLE_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.json);

    let output = output::Output::new(cli.verbose, cli.json);
    let ctx = context::Context::load(cli.config.as_deref(), output)?;

    let result = match cli.command {
        Commands::Init(args) => commands::init::run(args, &ctx).await,
        Commands::Preview(args) => commands::preview::run(args, &ctx).await,
        Commands::Storefront(args) => commands::storefront::run(args, &ctx).await,
        Commands::Republish(args) => commands::republish::run(args, &ctx).await,
        Commands::Validate(args) => commands::validate::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
