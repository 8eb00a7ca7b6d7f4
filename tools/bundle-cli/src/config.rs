//! CLI configuration.

use anyhow::{anyhow, Context, Result};
use bundle_cache::DEFAULT_KEY_SUFFIX;
use bundle_commerce::Currency;
use serde::{Deserialize, Serialize};

/// Contents of `bundle.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BundleConfig {
    #[serde(default)]
    pub shop: ShopConfig,

    #[serde(default)]
    pub publish: PublishConfig,

    #[serde(default)]
    pub store: StoreConfig,
}

impl BundleConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Configured currency, falling back to USD when unset.
    pub fn currency(&self) -> Result<Currency> {
        match self.shop.currency.as_deref() {
            None => Ok(Currency::default()),
            Some(code) => {
                Currency::from_code(code).ok_or_else(|| anyhow!("Unsupported currency: {}", code))
            }
        }
    }
}

/// Shop defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShopConfig {
    /// Shop key used when `--shop` is not given.
    #[serde(default)]
    pub domain: Option<String>,

    /// ISO 4217 code for displayed prices.
    #[serde(default)]
    pub currency: Option<String>,
}

/// Storefront channel settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishConfig {
    /// Key-value store name; the default store when unset.
    #[serde(default)]
    pub kv_store: Option<String>,

    /// Suffix of the per-shop key.
    #[serde(default = "default_key_suffix")]
    pub key_suffix: String,
}

fn default_key_suffix() -> String {
    DEFAULT_KEY_SUFFIX.to_string()
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            kv_store: None,
            key_suffix: default_key_suffix(),
        }
    }
}

/// Record store settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// JSON seed file loaded into the in-memory record store.
    #[serde(default)]
    pub seed: Option<String>,
}

/// Generate a default bundle.toml config file.
pub fn generate_default_config(shop: &str, seed: &str) -> String {
    format!(
        r#"# Bundle offers configuration

[shop]
domain = "{shop}"
currency = "USD"

[publish]
# kv_store = "default"
key_suffix = "{suffix}"

[store]
seed = "{seed}"
"#,
        shop = shop,
        suffix = DEFAULT_KEY_SUFFIX,
        seed = seed,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_config_parses() {
        let raw = generate_default_config("demo.myshop.dev", "offers.seed.json");
        let config: BundleConfig = toml::from_str(&raw).unwrap();
        assert_eq!(config.shop.domain.as_deref(), Some("demo.myshop.dev"));
        assert_eq!(config.publish.key_suffix, "bundle_offers");
        assert_eq!(config.store.seed.as_deref(), Some("offers.seed.json"));
        assert_eq!(config.currency().unwrap(), Currency::USD);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: BundleConfig = toml::from_str("").unwrap();
        assert_eq!(config.publish.key_suffix, "bundle_offers");
        assert!(config.shop.domain.is_none());
    }

    #[test]
    fn test_unknown_currency_is_rejected() {
        let config: BundleConfig = toml::from_str("[shop]\ncurrency = \"XYZ\"").unwrap();
        assert!(config.currency().is_err());
    }
}
