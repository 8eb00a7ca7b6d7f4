//! CLI command implementations.

pub mod init;
pub mod preview;
pub mod republish;
pub mod storefront;
pub mod validate;

use anyhow::Result;
use bundle_commerce::offer::OfferGroup;
use bundle_commerce::pricing::ShopperChoice;
use bundle_commerce::{Currency, TierId};
use clap::Args;

use crate::context::Context;

/// Arguments for the init command.
#[derive(Args)]
pub struct InitArgs {
    /// Shop key to write as the default.
    #[arg(long, default_value = "demo.myshop.dev")]
    pub shop: String,

    /// Overwrite existing files.
    #[arg(short, long)]
    pub force: bool,
}

/// Shopper selection flags shared by preview and storefront.
#[derive(Args)]
pub struct ChoiceArgs {
    /// Tier id the shopper picked.
    #[arg(long, conflicts_with = "quantity")]
    pub choose: Option<String>,

    /// Quantity the shopper picked.
    #[arg(long)]
    pub quantity: Option<u32>,

    /// Currency code, overriding the config.
    #[arg(long)]
    pub currency: Option<String>,
}

impl ChoiceArgs {
    pub fn choice(&self) -> Option<ShopperChoice> {
        match (&self.choose, self.quantity) {
            (Some(id), _) => Some(ShopperChoice::Tier(TierId::new(id.as_str()))),
            (None, Some(q)) => Some(ShopperChoice::Quantity(q)),
            (None, None) => None,
        }
    }

    pub fn currency(&self, ctx: &Context) -> Result<Currency> {
        match &self.currency {
            Some(code) => Currency::from_code(code)
                .ok_or_else(|| anyhow::anyhow!("Unsupported currency: {}", code)),
            None => ctx.config.currency(),
        }
    }
}

/// Arguments for the preview command.
#[derive(Args)]
pub struct PreviewArgs {
    /// Offer group JSON file.
    #[arg(short, long)]
    pub group: String,

    /// Unit price in minor units.
    #[arg(short, long)]
    pub price: f64,

    /// Force best-value auto selection on.
    #[arg(long)]
    pub best_value: bool,

    #[command(flatten)]
    pub choice: ChoiceArgs,
}

/// Arguments for the storefront command.
#[derive(Args)]
pub struct StorefrontArgs {
    /// Published blob file, raw or HTML-escaped.
    #[arg(short, long)]
    pub blob: String,

    /// Product id, bare or as a gid.
    #[arg(long)]
    pub product: String,

    /// Unit price in minor units.
    #[arg(short, long)]
    pub price: f64,

    #[command(flatten)]
    pub choice: ChoiceArgs,
}

/// Arguments for the republish command.
#[derive(Args)]
pub struct RepublishArgs {
    /// Shop key, overriding the config.
    #[arg(short, long)]
    pub shop: Option<String>,

    /// Seed file, overriding the config.
    #[arg(long)]
    pub seed: Option<String>,

    /// Write the payload to this file instead of stdout.
    #[arg(short, long)]
    pub out: Option<String>,
}

/// Arguments for the validate command.
#[derive(Args)]
pub struct ValidateArgs {
    /// Offer group JSON file.
    #[arg(short, long)]
    pub group: String,
}

/// Read and decode an offer group file.
pub fn read_group(ctx: &Context, path: &str) -> Result<OfferGroup> {
    use anyhow::Context as _;

    let raw = ctx.read_file(path)?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse offer group: {}", path))
}
