//! Price an offer group file.

use anyhow::Result;
use bundle_commerce::pricing::price_group;

use super::{read_group, PreviewArgs};
use crate::context::Context;

/// Run the preview command.
pub async fn run(args: PreviewArgs, ctx: &Context) -> Result<()> {
    let mut group = read_group(ctx, &args.group)?;
    if args.best_value {
        group.design.auto_select_best_value = true;
    }
    let currency = args.choice.currency(ctx)?;
    let choice = args.choice.choice();

    ctx.output.debug(&format!(
        "pricing {} tiers at {} minor units",
        group.tiers.len(),
        args.price
    ));
    let pricing = price_group(&group, args.price, currency, choice.as_ref());

    let name = if group.name.trim().is_empty() {
        "(unnamed)"
    } else {
        group.name.as_str()
    };
    ctx.output.header(&format!("Preview: {}", name));
    ctx.output.pricing(&pricing);
    Ok(())
}
