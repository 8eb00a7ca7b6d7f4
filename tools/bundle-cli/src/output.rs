//! Output formatting for the CLI.

use bundle_commerce::pricing::{SelectionReason, TierPricing};
use console::style;

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = width))
            .collect();
        println!("  {}", formatted.join("  "));
    }

    /// Print every priced tier, marking the selected one.
    pub fn pricing(&self, pricing: &TierPricing) {
        if self.json {
            self.json(pricing);
            return;
        }

        self.kv("Unit price", &pricing.unit_price.display());
        if let Some(reason) = pricing.selection_reason {
            self.kv("Selected by", reason_label(reason));
        }
        println!();

        let widths = [2, 10, 4, 14, 10, 10, 10, 10];
        self.table_row(
            &["", "TIER", "QTY", "LABEL", "ORIGINAL", "TOTAL", "SAVINGS", "EACH"],
            &widths,
        );
        for tier in &pricing.tiers {
            let marker = if tier.is_selected { "▶" } else { "" };
            let quantity = tier.quantity.to_string();
            let original = tier.original_total.display();
            let discounted = tier.discounted_total.display();
            let savings = tier.savings.display();
            let each = tier.unit_price_after_discount.display();
            self.table_row(
                &[
                    marker,
                    tier.tier_id.as_str(),
                    &quantity,
                    tier.label.as_deref().unwrap_or(""),
                    &original,
                    &discounted,
                    &savings,
                    &each,
                ],
                &widths,
            );
        }
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

fn reason_label(reason: SelectionReason) -> &'static str {
    match reason {
        SelectionReason::ShopperChoice => "shopper choice",
        SelectionReason::BestValue => "best value",
        SelectionReason::Preselect => "preselected tier",
        SelectionReason::FirstTier => "first tier",
    }
}
