//! Resync a shop's published offers from the record store seed.

use std::sync::Arc;

use anyhow::{anyhow, Context as _, Result};
use bundle_admin::Publisher;
use bundle_cache::{Cache, KvPublishChannel, PublishChannel, CONTENT_TYPE};
use bundle_commerce::ShopId;
use bundle_db::{MemoryRecordStore, StoreSeed};

use super::RepublishArgs;
use crate::context::Context;

/// Run the republish command.
pub async fn run(args: RepublishArgs, ctx: &Context) -> Result<()> {
    let shop = args
        .shop
        .or_else(|| ctx.config.shop.domain.clone())
        .ok_or_else(|| anyhow!("No shop given; pass --shop or set [shop].domain"))?;
    let shop = ShopId::new(shop);

    let seed_path = args
        .seed
        .or_else(|| ctx.config.store.seed.clone())
        .ok_or_else(|| anyhow!("No seed file given; pass --seed or set [store].seed"))?;
    let seed: StoreSeed = serde_json::from_str(&ctx.read_file(&seed_path)?)
        .with_context(|| format!("Failed to parse seed file: {}", seed_path))?;
    ctx.output.debug(&format!("loaded seed from {}", seed_path));

    let cache = match &ctx.config.publish.kv_store {
        Some(name) => Cache::open(name),
        None => Cache::open_default(),
    }
    .context("Failed to open key-value store")?;
    let channel = Arc::new(KvPublishChannel::with_suffix(
        cache,
        ctx.config.publish.key_suffix.clone(),
    ));
    let store = Arc::new(MemoryRecordStore::from_seed(seed));
    let publisher = Publisher::new(store, channel.clone());

    let report = publisher
        .publish(&shop)
        .await
        .with_context(|| format!("Failed to publish offers for {}", shop))?;
    let payload = channel
        .read(shop.as_str())
        .await?
        .ok_or_else(|| anyhow!("Published payload missing for {}", shop))?;

    match &args.out {
        Some(out) => {
            let path = ctx.resolve_path(out);
            std::fs::write(&path, &payload)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            ctx.output.success(&format!(
                "Published {} group(s) for {} to {}",
                report.groups,
                shop,
                path.display()
            ));
            ctx.output.kv("Key", &channel.key_for(shop.as_str()));
            ctx.output.kv("Bytes", &report.bytes.to_string());
            ctx.output.kv("Content-Type", CONTENT_TYPE);
        }
        None => println!("{}", String::from_utf8_lossy(&payload)),
    }
    Ok(())
}
