//! Tests for the centralized configuration constants.

use super::*;

/// Ensures the default printer configuration is accepted by its own builder.
#[test]
fn default_printer_config_is_valid() {
    let cfg = PrinterConfig::default();
    assert_eq!(
        PrinterConfig::new(cfg.indent_width, cfg.trailing_newline),
        Ok(cfg)
    );
}

/// Validates the builder rejects invalid values.
#[test]
fn new_validates_indent_width() {
    assert_eq!(
        PrinterConfig::new(0, true).unwrap_err(),
        ConfigError::InvalidIndentWidth(0)
    );
    assert_eq!(
        PrinterConfig::new(MAX_INDENT_WIDTH + 1, false).unwrap_err(),
        ConfigError::InvalidIndentWidth(MAX_INDENT_WIDTH + 1)
    );
    assert!(PrinterConfig::new(MAX_INDENT_WIDTH, false).is_ok());
}

#[test]
fn config_error_display_names_the_limit() {
    let message = ConfigError::InvalidIndentWidth(12).to_string();
    assert!(message.contains("12"));
    assert!(message.contains(&MAX_INDENT_WIDTH.to_string()));
}
