//! Write a default bundle.toml and a sample seed.

use std::collections::BTreeMap;

use anyhow::{bail, Context as _, Result};
use bundle_commerce::offer::OfferGroup;
use bundle_commerce::ShopId;
use bundle_db::StoreSeed;

use super::InitArgs;
use crate::config::generate_default_config;
use crate::context::Context;

const CONFIG_FILE: &str = "bundle.toml";
const SEED_FILE: &str = "offers.seed.json";

/// Run the init command.
pub async fn run(args: InitArgs, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_FILE);
    let seed_path = ctx.cwd.join(SEED_FILE);

    if !args.force {
        for path in [&config_path, &seed_path] {
            if path.exists() {
                bail!("{} already exists; pass --force to overwrite", path.display());
            }
        }
    }

    ctx.output.header(&format!("Initializing bundle offers for {}", args.shop));

    std::fs::write(&config_path, generate_default_config(&args.shop, SEED_FILE))
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    ctx.output.debug(&format!("wrote {}", config_path.display()));

    let seed = sample_seed(&args.shop);
    std::fs::write(&seed_path, serde_json::to_string_pretty(&seed)?)
        .with_context(|| format!("Failed to write {}", seed_path.display()))?;
    ctx.output.debug(&format!("wrote {}", seed_path.display()));

    ctx.output.success(&format!("Created {} and {}", CONFIG_FILE, SEED_FILE));
    ctx.output.info("Next steps:");
    ctx.output.list_item("bundle validate --group <group.json>");
    ctx.output.list_item("bundle republish --out offers.json");
    ctx.output.list_item("bundle storefront --blob offers.json --product <id> --price <minor units>");
    Ok(())
}

/// One active draft targeting a placeholder product.
fn sample_seed(shop: &str) -> StoreSeed {
    let mut group = OfferGroup::create_draft();
    group.name = "Buy more, save more".to_string();
    group.active = true;
    group.set_product_ids(["1001"]);

    let mut shops = BTreeMap::new();
    shops.insert(ShopId::new(shop), vec![group]);
    StoreSeed { shops }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_seed_is_valid() {
        let seed = sample_seed("demo.myshop.dev");
        let groups = &seed.shops[&ShopId::new("demo.myshop.dev")];
        assert_eq!(groups.len(), 1);
        assert!(groups[0].clone().prepare().is_ok());
        assert!(groups[0].applies_to("1001"));
    }
}
