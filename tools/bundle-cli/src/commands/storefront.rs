//! Match a product against a published blob.

use anyhow::Result;
use bundle_commerce::storefront::offer_for_product;

use super::StorefrontArgs;
use crate::context::Context;

/// Run the storefront command.
pub async fn run(args: StorefrontArgs, ctx: &Context) -> Result<()> {
    let blob = ctx.read_file(&args.blob)?;
    let currency = args.choice.currency(ctx)?;
    let choice = args.choice.choice();

    match offer_for_product(&blob, &args.product, args.price, currency, choice.as_ref()) {
        Some(offer) => {
            if ctx.output.is_json() {
                ctx.output.json(&offer);
                return Ok(());
            }
            ctx.output.header(&format!("Offer: {}", offer.group.name));
            if let Some(id) = &offer.group.id {
                ctx.output.kv("Group", id.as_str());
            }
            ctx.output.pricing(&offer.pricing);
        }
        None => {
            if ctx.output.is_json() {
                ctx.output.json(&serde_json::Value::Null);
            } else {
                ctx.output
                    .info(&format!("No offer applies to product {}", args.product));
            }
        }
    }
    Ok(())
}
