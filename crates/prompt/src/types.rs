//! Domain types for a website brief.
//!
//! Field names serialize in camelCase so form files keep the shape the
//! browser form produced.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Colors locked in for the site.
///
/// Every value must already have passed hex validation
/// ([`crate::palette::is_hex_color`]) before it is attached to a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorScheme {
    pub primary: String,
    pub accent: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neutral: Option<String>,
}

impl ColorScheme {
    /// Scheme with only the two mandatory colors.
    pub fn new(primary: impl Into<String>, accent: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            accent: accent.into(),
            secondary: None,
            neutral: None,
        }
    }
}

/// Everything the user told us about the website they want.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormState {
    pub project_name: String,
    pub niche: String,
    pub target_audience: String,
    /// Main call to action
    pub main_goal: String,
    pub tone: String,
    pub style: String,
    /// Pages in presentation order, no duplicates
    pub selected_pages: Vec<String>,
    pub corner_style: String,
    pub site_complexity: String,
    pub has_logo: bool,
    /// Base64 PNG of a generated logo; never rendered into the prompt
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_suggestion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<ColorScheme>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo_keywords: Option<Vec<String>>,
    /// User-authored copy per page; keys missing from `selected_pages` are ignored
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_content: Option<BTreeMap<String, String>>,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            project_name: String::new(),
            niche: String::new(),
            target_audience: String::new(),
            main_goal: String::new(),
            tone: "Amigável".to_string(),
            style: "Moderno e Minimalista".to_string(),
            selected_pages: vec![
                "Início".to_string(),
                "Sobre Nós".to_string(),
                "Contato".to_string(),
            ],
            corner_style: "Arredondados".to_string(),
            site_complexity: "Simples e Direto".to_string(),
            has_logo: false,
            logo_suggestion: None,
            colors: None,
            seo_keywords: Some(Vec::new()),
            page_content: Some(BTreeMap::new()),
        }
    }
}

impl FormState {
    /// User copy for `page`, if non-empty text was written for it.
    ///
    /// Whitespace-only text is still user content and is returned as is.
    pub fn page_text(&self, page: &str) -> Option<&str> {
        self.page_content
            .as_ref()
            .and_then(|content| content.get(page))
            .map(String::as_str)
            .filter(|text| !text.is_empty())
    }

    /// SEO keywords, if at least one was given.
    pub fn keywords(&self) -> Option<&[String]> {
        self.seo_keywords
            .as_deref()
            .filter(|keywords| !keywords.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_form_matches_product_defaults() {
        let form = FormState::default();
        assert_eq!(form.tone, "Amigável");
        assert_eq!(form.selected_pages, vec!["Início", "Sobre Nós", "Contato"]);
        assert_eq!(form.corner_style, "Arredondados");
        assert_eq!(form.site_complexity, "Simples e Direto");
        assert!(!form.has_logo);
        assert!(form.colors.is_none());
        assert!(form.keywords().is_none());
    }

    #[test]
    fn test_deserialize_partial_camel_case() {
        let form: FormState = serde_json::from_str(
            r##"{
                "projectName": "Café Aurora",
                "selectedPages": ["Início", "Preços"],
                "colors": { "primary": "#112233", "accent": "#445566" },
                "pageContent": { "Início": "Bem-vindo" }
            }"##,
        )
        .unwrap();

        assert_eq!(form.project_name, "Café Aurora");
        assert_eq!(form.tone, "Amigável");
        assert_eq!(form.selected_pages, vec!["Início", "Preços"]);
        assert_eq!(form.colors, Some(ColorScheme::new("#112233", "#445566")));
        assert_eq!(form.page_text("Início"), Some("Bem-vindo"));
    }

    #[test]
    fn test_deserialize_yaml_form_file() {
        let form: FormState = serde_yaml::from_str(
            r##"
projectName: Studio Ipê
niche: Arquitetura
hasLogo: true
seoKeywords: [arquitetura sustentável, projeto residencial]
"##,
        )
        .unwrap();

        assert!(form.has_logo);
        assert_eq!(form.keywords().map(<[String]>::len), Some(2));
    }

    #[test]
    fn test_empty_page_text_counts_as_missing() {
        let mut form = FormState::default();
        form.page_content = Some(BTreeMap::from([
            ("Início".to_string(), "   ".to_string()),
            ("Contato".to_string(), String::new()),
        ]));

        assert_eq!(form.page_text("Início"), Some("   "));
        assert_eq!(form.page_text("Contato"), None);
        assert_eq!(form.page_text("Blog"), None);
    }
}
