//! Form options and state transitions.
//!
//! Each transition mirrors one user action on the brief form (toggling a
//! page, accepting an AI suggestion, ...) and only touches the fields that
//! action owns.

use crate::palette::{is_hex_color, Palette};
use crate::types::{ColorScheme, FormState};
use serde::{Deserialize, Serialize};
use sitebrief_core::{AppError, AppResult};
use std::fmt;

pub const TONES: [&str; 5] = [
    "Profissional",
    "Amigável",
    "Humorístico",
    "Inspirador",
    "Informativo",
];

pub const STYLES: [&str; 5] = [
    "Moderno e Minimalista",
    "Elegante e Sofisticado",
    "Vibrante e Energético",
    "Rústico e Orgânico",
    "Retrô e Divertido",
];

pub const PAGES: [&str; 7] = [
    "Início",
    "Sobre Nós",
    "Serviços",
    "Blog",
    "Contato",
    "Galeria",
    "Preços",
];

pub const CORNER_STYLES: [&str; 2] = ["Arredondados", "Afiados"];

pub const COMPLEXITY_LEVELS: [&str; 2] = ["Simples e Direto", INTERACTIVE_COMPLEXITY];

/// Complexity level that switches the prompt to animated interactions.
pub const INTERACTIVE_COMPLEXITY: &str = "Interativo e Detalhado";

/// Colors guessed from an existing website. Either may be missing or bogus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzedColors {
    pub primary: Option<String>,
    pub accent: Option<String>,
}

/// Structured summary of an existing website.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteAnalysis {
    pub project_name: String,
    pub niche: String,
    pub target_audience: String,
    pub main_goal: String,
    pub tone: String,
    pub selected_pages: Vec<String>,
    pub colors: Option<AnalyzedColors>,
}

/// Free-text fields that can be filled from an AI suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InspirableField {
    ProjectName,
    Niche,
    TargetAudience,
    MainGoal,
}

impl InspirableField {
    pub const ALL: [InspirableField; 4] = [
        Self::ProjectName,
        Self::Niche,
        Self::TargetAudience,
        Self::MainGoal,
    ];

    /// Parse the form field name (`projectName`, `niche`, ...).
    pub fn parse(name: &str) -> AppResult<Self> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == name)
            .ok_or_else(|| {
                AppError::Prompt(format!(
                    "Unknown form field '{}'. Expected one of: projectName, niche, targetAudience, mainGoal",
                    name
                ))
            })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProjectName => "projectName",
            Self::Niche => "niche",
            Self::TargetAudience => "targetAudience",
            Self::MainGoal => "mainGoal",
        }
    }

    fn slot<'a>(&self, form: &'a mut FormState) -> &'a mut String {
        match self {
            Self::ProjectName => &mut form.project_name,
            Self::Niche => &mut form.niche,
            Self::TargetAudience => &mut form.target_audience,
            Self::MainGoal => &mut form.main_goal,
        }
    }
}

impl fmt::Display for InspirableField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Select `page` if absent (appended last), deselect it otherwise.
pub fn toggle_page(form: &mut FormState, page: &str) {
    if let Some(index) = form.selected_pages.iter().position(|p| p == page) {
        form.selected_pages.remove(index);
    } else {
        form.selected_pages.push(page.to_string());
    }
}

/// Store user copy for `page` verbatim; empty text clears it.
pub fn set_page_content(form: &mut FormState, page: &str, text: &str) {
    let content = form.page_content.get_or_insert_with(Default::default);
    if text.is_empty() {
        content.remove(page);
    } else {
        content.insert(page.to_string(), text.to_string());
    }
}

/// Merge a site analysis into the form.
///
/// Blank values leave the current ones untouched, an empty page list keeps the
/// current pages, and colors are only taken when both are valid hex values.
pub fn apply_analysis(form: &mut FormState, analysis: SiteAnalysis) {
    let texts = [
        (&mut form.project_name, analysis.project_name),
        (&mut form.niche, analysis.niche),
        (&mut form.target_audience, analysis.target_audience),
        (&mut form.main_goal, analysis.main_goal),
        (&mut form.tone, analysis.tone),
    ];
    for (slot, value) in texts {
        let value = value.trim();
        if !value.is_empty() {
            *slot = value.to_string();
        }
    }

    let mut pages: Vec<String> = Vec::new();
    for page in analysis.selected_pages {
        let page = page.trim();
        if !page.is_empty() && !pages.iter().any(|p| p == page) {
            pages.push(page.to_string());
        }
    }
    if !pages.is_empty() {
        form.selected_pages = pages;
    }

    match analysis.colors {
        Some(AnalyzedColors {
            primary: Some(primary),
            accent: Some(accent),
        }) if is_hex_color(&primary) && is_hex_color(&accent) => {
            form.colors = Some(ColorScheme::new(primary, accent));
        }
        Some(colors) => {
            tracing::debug!("Ignoring analyzed colors {:?}", colors);
        }
        None => {}
    }
}

/// Lock in a generated palette after validating every color.
pub fn apply_palette(form: &mut FormState, palette: Palette) -> AppResult<()> {
    palette.validate()?;
    form.colors = Some(palette.into());
    Ok(())
}

/// Replace the SEO keywords, dropping blank entries.
pub fn apply_keywords(form: &mut FormState, keywords: Vec<String>) {
    form.seo_keywords = Some(
        keywords
            .into_iter()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .collect(),
    );
}

/// Attach a generated logo (base64 PNG); the brief then counts as having a logo.
pub fn apply_logo(form: &mut FormState, image_base64: String) {
    form.logo_suggestion = Some(image_base64);
    form.has_logo = true;
}

pub fn apply_inspiration(form: &mut FormState, field: InspirableField, suggestion: &str) {
    *field.slot(form) = suggestion.trim().to_string();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_sets_cover_defaults() {
        let form = FormState::default();
        assert!(TONES.contains(&form.tone.as_str()));
        assert!(STYLES.contains(&form.style.as_str()));
        assert!(CORNER_STYLES.contains(&form.corner_style.as_str()));
        assert!(COMPLEXITY_LEVELS.contains(&form.site_complexity.as_str()));
        assert!(form.selected_pages.iter().all(|p| PAGES.contains(&p.as_str())));
    }

    #[test]
    fn test_toggle_page() {
        let mut form = FormState::default();
        toggle_page(&mut form, "Sobre Nós");
        assert_eq!(form.selected_pages, vec!["Início", "Contato"]);

        toggle_page(&mut form, "Blog");
        toggle_page(&mut form, "Sobre Nós");
        assert_eq!(form.selected_pages, vec!["Início", "Contato", "Blog", "Sobre Nós"]);
    }

    #[test]
    fn test_set_page_content() {
        let mut form = FormState {
            page_content: None,
            ..FormState::default()
        };
        set_page_content(&mut form, "Início", "Bem-vindo!");
        assert_eq!(form.page_text("Início"), Some("Bem-vindo!"));

        set_page_content(&mut form, "Início", "  ");
        assert_eq!(form.page_text("Início"), Some("  "));

        set_page_content(&mut form, "Início", "");
        assert_eq!(form.page_text("Início"), None);
        assert!(form.page_content.unwrap().is_empty());
    }

    #[test]
    fn test_apply_analysis_merges() {
        let mut form = FormState::default();
        form.main_goal = "Comprar".to_string();

        apply_analysis(
            &mut form,
            SiteAnalysis {
                project_name: "Padaria Sol".to_string(),
                niche: "Panificação".to_string(),
                main_goal: "  ".to_string(),
                selected_pages: vec![
                    "Início".to_string(),
                    "Preços".to_string(),
                    "Início".to_string(),
                ],
                colors: Some(AnalyzedColors {
                    primary: Some("#AA5500".to_string()),
                    accent: Some("#00aa55".to_string()),
                }),
                ..SiteAnalysis::default()
            },
        );

        assert_eq!(form.project_name, "Padaria Sol");
        assert_eq!(form.niche, "Panificação");
        assert_eq!(form.main_goal, "Comprar");
        assert_eq!(form.tone, "Amigável");
        assert_eq!(form.selected_pages, vec!["Início", "Preços"]);
        assert_eq!(form.colors, Some(ColorScheme::new("#AA5500", "#00aa55")));
    }

    #[test]
    fn test_apply_analysis_keeps_pages_and_rejects_bad_colors() {
        let mut form = FormState::default();
        let analysis: SiteAnalysis = serde_json::from_str(
            r##"{"projectName": "X", "selectedPages": [], "colors": {"primary": "red", "accent": "#000000"}}"##,
        )
        .unwrap();

        apply_analysis(&mut form, analysis);
        assert_eq!(form.selected_pages, FormState::default().selected_pages);
        assert!(form.colors.is_none());
    }

    #[test]
    fn test_apply_palette_validates() {
        let mut form = FormState::default();
        let bad = Palette {
            primary: "blue".to_string(),
            secondary: "#111111".to_string(),
            accent: "#222222".to_string(),
            neutral: "#333333".to_string(),
        };
        assert!(apply_palette(&mut form, bad.clone()).is_err());
        assert!(form.colors.is_none());

        let good = Palette {
            primary: "#000000".to_string(),
            ..bad
        };
        apply_palette(&mut form, good).unwrap();
        let colors = form.colors.unwrap();
        assert_eq!(colors.primary, "#000000");
        assert_eq!(colors.neutral.as_deref(), Some("#333333"));
    }

    #[test]
    fn test_apply_keywords_and_logo() {
        let mut form = FormState::default();
        apply_keywords(
            &mut form,
            vec![" café ".to_string(), String::new(), "brunch".to_string()],
        );
        assert_eq!(form.keywords().unwrap(), ["café", "brunch"]);

        apply_logo(&mut form, "iVBORw0KGgo=".to_string());
        assert!(form.has_logo);
        assert_eq!(form.logo_suggestion.as_deref(), Some("iVBORw0KGgo="));
    }

    #[test]
    fn test_inspiration_fields() {
        let mut form = FormState::default();
        let field = InspirableField::parse("targetAudience").unwrap();
        apply_inspiration(&mut form, field, " Famílias com crianças ");
        assert_eq!(form.target_audience, "Famílias com crianças");

        for field in InspirableField::ALL {
            assert_eq!(InspirableField::parse(field.as_str()).unwrap(), field);
        }
        assert!(matches!(
            InspirableField::parse("tone"),
            Err(AppError::Prompt(_))
        ));
    }
}
