//! Validate an offer group file.

use anyhow::{Context as _, Result};

use super::{read_group, ValidateArgs};
use crate::context::Context;

/// Run the validate command.
pub async fn run(args: ValidateArgs, ctx: &Context) -> Result<()> {
    let group = read_group(ctx, &args.group)?;
    let prepared = group
        .prepare()
        .with_context(|| format!("{} is not a valid offer group", args.group))?;

    if ctx.output.is_json() {
        ctx.output.json(&prepared);
        return Ok(());
    }

    ctx.output.success(&format!("{} is valid", args.group));
    ctx.output.kv("Name", &prepared.name);
    ctx.output.kv("Active", &prepared.active.to_string());
    ctx.output.kv("Tiers", &prepared.tiers.len().to_string());
    if prepared.product_ids.is_empty() {
        ctx.output.warn("No products targeted; the offer will never match");
    }
    for product in &prepared.product_ids {
        ctx.output.list_item(product.as_str());
    }
    Ok(())
}
