//! Presentation options for an offer group.
//!
//! Pricing only ever looks at `auto_select_best_value`; the rest is passed
//! through to whatever renders the widget.

use serde::{Deserialize, Serialize};

/// Widget template variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TemplateVariant {
    #[default]
    Classic,
    Cards,
    Compact,
}

/// Relative text sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TextSize {
    Small,
    #[default]
    Medium,
    Large,
}

/// Where the widget sits on the product page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    #[default]
    InsideForm,
    AboveButton,
}

/// Closed set of presentation options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Design {
    pub template: TemplateVariant,
    pub accent_color: String,
    pub background_color: String,
    pub text_color: String,
    pub badge_color: String,
    pub text_size: TextSize,
    /// Highlight the tier with the largest discount when the shopper has not
    /// picked one.
    pub auto_select_best_value: bool,
    pub show_badges: bool,
}

impl Default for Design {
    fn default() -> Self {
        Self {
            template: TemplateVariant::Classic,
            accent_color: "#1a73e8".to_string(),
            background_color: "#ffffff".to_string(),
            text_color: "#1f2933".to_string(),
            badge_color: "#e8541a".to_string(),
            text_size: TextSize::Medium,
            auto_select_best_value: false,
            show_badges: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_design_fills_defaults() {
        let design: Design =
            serde_json::from_str(r#"{"autoSelectBestValue":true,"template":"cards"}"#).unwrap();
        assert!(design.auto_select_best_value);
        assert_eq!(design.template, TemplateVariant::Cards);
        assert_eq!(design.accent_color, Design::default().accent_color);
        assert!(design.show_badges);
    }

    #[test]
    fn test_placement_wire_names() {
        assert_eq!(
            serde_json::to_string(&Placement::AboveButton).unwrap(),
            "\"above_button\""
        );
        assert_eq!(Placement::default(), Placement::InsideForm);
    }
}
