use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::{ChartColor, ACCENT_COLOR};

/// Key the configuration payload is stored under in the host's settings map.
pub const SETTINGS_KEY: &str = "sankeyConfig";

/// How node labels are matched to configured colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Per-label explicit color assignment.
    Exact,
    /// Ordered substring rules; the first match wins.
    Pattern,
}

impl Default for ColorMode {
    fn default() -> Self {
        ColorMode::Exact
    }
}

/// A pattern-mode color rule: case-insensitive substring match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternRule {
    pub pattern: String,
    pub color: ChartColor,
}

/// Errors raised when loading or validating a chart configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("chart configuration is incomplete: {0} is not set")]
    MissingField(&'static str),
    #[error("stored chart configuration is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Chart configuration as persisted in the host's settings store.
///
/// Field spelling matches the stored camelCase payload, so configurations
/// written by earlier dashboard versions load unchanged. Loading does not
/// validate; call [`ChartConfig::validate`] before rendering so half-filled
/// configurations can still round-trip through an editing dialog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    /// Worksheet the summary data is read from.
    pub worksheet_name: String,
    /// Field supplying flow source labels.
    pub source_col: String,
    /// Field supplying flow target labels.
    pub target_col: String,
    /// Field supplying flow amounts.
    pub amount_col: String,
    #[serde(default)]
    pub color_mode: ColorMode,
    /// Exact-mode palette: node label to color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_colors: Option<BTreeMap<String, ChartColor>>,
    /// Pattern-mode palette, in match priority order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_patterns: Option<Vec<PatternRule>>,
}

impl ChartConfig {
    pub fn new(
        worksheet_name: impl Into<String>,
        source_col: impl Into<String>,
        target_col: impl Into<String>,
        amount_col: impl Into<String>,
    ) -> Self {
        Self {
            worksheet_name: worksheet_name.into(),
            source_col: source_col.into(),
            target_col: target_col.into(),
            amount_col: amount_col.into(),
            color_mode: ColorMode::default(),
            node_colors: None,
            color_patterns: None,
        }
    }

    /// Parses the JSON payload stored under [`SETTINGS_KEY`].
    pub fn from_settings_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the payload to store under [`SETTINGS_KEY`].
    pub fn to_settings_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Checks that every required mapping is present, reporting the first
    /// missing field by its stored (camelCase) name.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (value, field) in [
            (&self.worksheet_name, "worksheetName"),
            (&self.source_col, "sourceCol"),
            (&self.target_col, "targetCol"),
            (&self.amount_col, "amountCol"),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingField(field));
            }
        }
        Ok(())
    }

    /// Resolves the color for a node label under the active color mode,
    /// falling back to [`ACCENT_COLOR`].
    pub fn node_color(&self, label: &str) -> ChartColor {
        match self.color_mode {
            ColorMode::Exact => self
                .node_colors
                .as_ref()
                .and_then(|colors| colors.get(label))
                .cloned()
                .unwrap_or(ACCENT_COLOR),
            ColorMode::Pattern => {
                let label = label.to_lowercase();
                self.color_patterns
                    .iter()
                    .flatten()
                    .find(|rule| label.contains(&rule.pattern.to_lowercase()))
                    .map(|rule| rule.color.clone())
                    .unwrap_or(ACCENT_COLOR)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> ChartConfig {
        ChartConfig::new("Flows", "Source", "Target", "Amount")
    }

    #[test]
    fn validate_reports_first_missing_field() {
        assert!(base_config().validate().is_ok());

        let mut config = base_config();
        config.target_col = "  ".to_string();
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "chart configuration is incomplete: targetCol is not set"
        );

        config.worksheet_name = String::new();
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "chart configuration is incomplete: worksheetName is not set"
        );
    }

    #[test]
    fn exact_mode_resolves_labels_and_falls_back_to_accent() {
        let mut config = base_config();
        config.node_colors = Some(BTreeMap::from([(
            "Marketing".to_string(),
            ChartColor::rgb(0x11, 0x11, 0x11),
        )]));

        assert_eq!(config.node_color("Marketing"), ChartColor::rgb(0x11, 0x11, 0x11));
        assert_eq!(config.node_color("marketing"), ACCENT_COLOR);
        assert_eq!(config.node_color("Sales"), ACCENT_COLOR);
    }

    #[test]
    fn pattern_mode_first_match_wins_case_insensitively() {
        let mut config = base_config();
        config.color_mode = ColorMode::Pattern;
        config.color_patterns = Some(vec![
            PatternRule {
                pattern: "Mark".to_string(),
                color: ChartColor::rgb(0x11, 0x11, 0x11),
            },
            PatternRule {
                pattern: "eting".to_string(),
                color: ChartColor::rgb(0x22, 0x22, 0x22),
            },
        ]);

        // Both rules match "Marketing"; the earlier one wins.
        assert_eq!(config.node_color("Marketing"), ChartColor::rgb(0x11, 0x11, 0x11));
        assert_eq!(config.node_color("MARKETING"), ChartColor::rgb(0x11, 0x11, 0x11));
        assert_eq!(config.node_color("Budgeting"), ChartColor::rgb(0x22, 0x22, 0x22));
        assert_eq!(config.node_color("Ops"), ACCENT_COLOR);
    }

    #[test]
    fn missing_palette_uses_accent_everywhere() {
        let mut config = base_config();
        assert_eq!(config.node_color("Anything"), ACCENT_COLOR);

        config.color_mode = ColorMode::Pattern;
        assert_eq!(config.node_color("Anything"), ACCENT_COLOR);
    }
}
