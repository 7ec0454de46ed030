use std::collections::BTreeMap;

use pretty_assertions::assert_eq;
use sankey_model::{ChartColor, ChartConfig, ColorMode, ConfigError, PatternRule, SETTINGS_KEY};

#[test]
fn settings_key_is_stable() {
    assert_eq!(SETTINGS_KEY, "sankeyConfig");
}

#[test]
fn loads_legacy_exact_mode_payload() {
    let json = r##"{
        "worksheetName": "Spend by Channel",
        "sourceCol": "Channel",
        "targetCol": "Campaign",
        "amountCol": "Spend",
        "colorMode": "exact",
        "nodeColors": {
            "Marketing": "#111111",
            "Sales": "#1E74FF"
        }
    }"##;

    let config = ChartConfig::from_settings_json(json).unwrap();
    assert_eq!(config.worksheet_name, "Spend by Channel");
    assert_eq!(config.source_col, "Channel");
    assert_eq!(config.target_col, "Campaign");
    assert_eq!(config.amount_col, "Spend");
    assert_eq!(config.color_mode, ColorMode::Exact);
    assert_eq!(
        config.node_colors,
        Some(BTreeMap::from([
            ("Marketing".to_string(), ChartColor::rgb(0x11, 0x11, 0x11)),
            ("Sales".to_string(), ChartColor::rgb(0x1E, 0x74, 0xFF)),
        ]))
    );
    assert_eq!(config.color_patterns, None);
    assert!(config.validate().is_ok());
}

#[test]
fn loads_pattern_mode_payload() {
    let json = r##"{
        "worksheetName": "Flows",
        "sourceCol": "From",
        "targetCol": "To",
        "amountCol": "Value",
        "colorMode": "pattern",
        "colorPatterns": [
            { "pattern": "Mark", "color": "#111111" },
            { "pattern": "eting", "color": "#222222" }
        ]
    }"##;

    let config = ChartConfig::from_settings_json(json).unwrap();
    assert_eq!(config.color_mode, ColorMode::Pattern);
    assert_eq!(
        config.color_patterns,
        Some(vec![
            PatternRule {
                pattern: "Mark".to_string(),
                color: ChartColor::rgb(0x11, 0x11, 0x11),
            },
            PatternRule {
                pattern: "eting".to_string(),
                color: ChartColor::rgb(0x22, 0x22, 0x22),
            },
        ])
    );
}

#[test]
fn color_mode_defaults_to_exact_when_absent() {
    let json = r#"{
        "worksheetName": "Flows",
        "sourceCol": "From",
        "targetCol": "To",
        "amountCol": "Value"
    }"#;

    let config = ChartConfig::from_settings_json(json).unwrap();
    assert_eq!(config.color_mode, ColorMode::Exact);
    assert_eq!(config.node_colors, None);
    assert_eq!(config.color_patterns, None);
}

#[test]
fn round_trips_without_null_palette_fields() {
    let config = ChartConfig::new("Flows", "From", "To", "Value");
    let json = config.to_settings_json().unwrap();

    // Unset palettes serialize as absent keys, not `null`.
    assert!(!json.contains("nodeColors"));
    assert!(!json.contains("colorPatterns"));
    assert!(json.contains("\"colorMode\":\"exact\""));

    let reloaded = ChartConfig::from_settings_json(&json).unwrap();
    assert_eq!(reloaded, config);
}

#[test]
fn round_trips_palettes_and_passthrough_colors() {
    let mut config = ChartConfig::new("Flows", "From", "To", "Value");
    config.color_mode = ColorMode::Pattern;
    config.color_patterns = Some(vec![PatternRule {
        pattern: "ops".to_string(),
        color: ChartColor::Unknown("papayawhip".to_string()),
    }]);

    let json = config.to_settings_json().unwrap();
    assert!(json.contains("\"papayawhip\""));

    let reloaded = ChartConfig::from_settings_json(&json).unwrap();
    assert_eq!(reloaded, config);
}

#[test]
fn malformed_payload_reports_json_error() {
    let err = ChartConfig::from_settings_json("{not json").unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)));
}
