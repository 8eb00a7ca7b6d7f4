//! Catalog product id normalization.

use crate::ids::ProductId;

/// Reduce a catalog identifier to its bare form.
///
/// Platform resource paths such as `gid://shopify/Product/8123` become
/// `8123`. Bare ids pass through unchanged apart from trimming.
pub fn normalize_product_id(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed.strip_prefix("gid://") {
        Some(path) => path
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .split('?')
            .next()
            .unwrap_or_default()
            .to_string(),
        None => trimmed.to_string(),
    }
}

/// Normalize a product id list: bare form, no blanks, no duplicates.
///
/// First-seen order is kept so published payloads stay byte-stable.
pub fn normalize_product_ids<I, S>(ids: I) -> Vec<ProductId>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<ProductId> = Vec::new();
    for raw in ids {
        let bare = normalize_product_id(raw.as_ref());
        if bare.is_empty() || out.iter().any(|p| p.as_str() == bare) {
            continue;
        }
        out.push(ProductId::new(bare));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_resource_prefix() {
        assert_eq!(normalize_product_id("gid://shopify/Product/8123"), "8123");
        assert_eq!(normalize_product_id("  8123 "), "8123");
        assert_eq!(
            normalize_product_id("gid://shopify/Product/8123?variant=1"),
            "8123"
        );
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize_product_ids(["gid://shopify/Product/1", "2", "", "1"]);
        let twice = normalize_product_ids(once.iter().map(|p| p.as_str()));
        assert_eq!(once, twice);
        assert_eq!(
            once,
            vec![ProductId::new("1"), ProductId::new("2")]
        );
    }
}
