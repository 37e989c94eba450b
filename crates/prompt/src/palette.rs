//! Color palette validation.

use crate::types::ColorScheme;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sitebrief_core::{AppError, AppResult};
use std::sync::LazyLock;

static HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^#[0-9A-F]{6}$").expect("Invalid hex color regex"));

/// Whether `value` is a six-digit hex color such as `#1A2b3C`.
pub fn is_hex_color(value: &str) -> bool {
    HEX_COLOR.is_match(value)
}

/// A four-color palette as produced by the palette generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub neutral: String,
}

impl Palette {
    /// Colors paired with their role, in validation order.
    pub fn entries(&self) -> [(&'static str, &str); 4] {
        [
            ("primary", &self.primary),
            ("secondary", &self.secondary),
            ("accent", &self.accent),
            ("neutral", &self.neutral),
        ]
    }

    /// Check every color; the first one that is not a hex color is reported.
    pub fn validate(&self) -> AppResult<()> {
        for (role, value) in self.entries() {
            if !is_hex_color(value) {
                return Err(AppError::MalformedResponse(format!(
                    "Invalid {} color received from the API: \"{}\"",
                    role, value
                )));
            }
        }
        Ok(())
    }
}

impl From<Palette> for ColorScheme {
    fn from(palette: Palette) -> Self {
        Self {
            primary: palette.primary,
            accent: palette.accent,
            secondary: Some(palette.secondary),
            neutral: Some(palette.neutral),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette(primary: &str, secondary: &str) -> Palette {
        Palette {
            primary: primary.to_string(),
            secondary: secondary.to_string(),
            accent: "#FF8800".to_string(),
            neutral: "#f5f5f5".to_string(),
        }
    }

    #[test]
    fn test_is_hex_color() {
        assert!(is_hex_color("#112233"));
        assert!(is_hex_color("#abcDEF"));
        assert!(!is_hex_color("112233"));
        assert!(!is_hex_color("#12345"));
        assert!(!is_hex_color("#1234567"));
        assert!(!is_hex_color("#GG0000"));
        assert!(!is_hex_color("blue"));
        assert!(!is_hex_color(" #112233"));
    }

    #[test]
    fn test_valid_palette() {
        assert!(palette("#0A1B2C", "#333333").validate().is_ok());
    }

    #[test]
    fn test_rejects_named_color() {
        let err = palette("blue", "#333333").validate().unwrap_err();
        match err {
            AppError::MalformedResponse(msg) => {
                assert!(msg.contains("\"blue\""));
                assert!(msg.contains("primary"));
            }
            other => panic!("Expected malformed response, got {:?}", other),
        }
    }

    #[test]
    fn test_reports_first_offender_only() {
        let err = palette("#0A1B2C", "rgb(0,0,0)").validate().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("secondary"));
        assert!(msg.contains("rgb(0,0,0)"));
    }

    #[test]
    fn test_into_color_scheme() {
        let scheme: ColorScheme = palette("#0A1B2C", "#333333").into();
        assert_eq!(scheme.primary, "#0A1B2C");
        assert_eq!(scheme.accent, "#FF8800");
        assert_eq!(scheme.secondary.as_deref(), Some("#333333"));
        assert_eq!(scheme.neutral.as_deref(), Some("#f5f5f5"));
    }
}
