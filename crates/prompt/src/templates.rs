//! Request prompts for the AI assist calls.
//!
//! Each template is a Handlebars string rendered against a small serializable
//! context. HTML escaping is disabled since the output is plain text.

use crate::types::FormState;
use handlebars::Handlebars;
use serde::Serialize;
use sitebrief_core::{AppError, AppResult};

/// Maximum number of characters of website text sent for analysis.
pub const ANALYSIS_CHAR_LIMIT: usize = 8000;

pub const ANALYSIS_TEMPLATE: &str = "Analise o seguinte conteúdo de texto extraído de um site. Extraia as informações solicitadas no formato JSON. Seja conciso e direto. Se uma informação não for clara, faça a sua melhor suposição. Conteúdo: \"{{content}}\"";

pub const PALETTE_TEMPLATE: &str = "Gere uma paleta de cores harmoniosa para um site com o nicho \"{{niche}}\" e estilo visual \"{{style}}\". A paleta deve conter 4 cores: primária, secundária, de destaque (accent) e neutra. Forneça apenas os códigos hexadecimais.";

pub const INSPIRATION_TEMPLATE: &str = "Com base neste contexto: \"{{context}}\", gere {{count}} sugestões criativas e concisas para o campo de formulário \"{{field}}\". As sugestões devem ser curtas e diretas.";

pub const KEYWORDS_TEMPLATE: &str = "Gere uma lista de {{count}} palavras-chave de SEO essenciais (incluindo cauda longa) para um negócio no nicho de \"{{niche}}\" que visa o público \"{{targetAudience}}\".";

pub const PAGE_CONTENT_TEMPLATE: &str = "Gere conteúdo para a página '{{page}}' de um site sobre '{{form.niche}}' para '{{form.targetAudience}}' com um tom '{{form.tone}}'. O objetivo principal do site é '{{form.mainGoal}}'. Elabore um rascunho de texto com cerca de 150-200 palavras para esta página. O texto deve ser bem estruturado com títulos e parágrafos.";

pub const LOGO_TEMPLATE: &str = "Crie um logo moderno e minimalista para uma empresa chamada \"{{form.projectName}}\" no nicho de \"{{form.niche}}\". Estilo: {{form.style}}. Cores principais: {{primary}} e {{accent}}. O logo deve ser simples, icônico e em fundo branco.";

/// Render a Handlebars template with `data`.
pub fn render_template<T: Serialize>(template: &str, data: &T) -> AppResult<String> {
    let mut handlebars = Handlebars::new();

    // Plain text output
    handlebars.register_escape_fn(handlebars::no_escape);

    handlebars
        .register_template_string("prompt", template)
        .map_err(|e| AppError::Prompt(format!("Failed to register template: {}", e)))?;

    handlebars
        .render("prompt", data)
        .map_err(|e| AppError::Prompt(format!("Failed to render template: {}", e)))
}

#[derive(Serialize)]
struct ContentContext<'a> {
    content: &'a str,
}

/// Prompt asking for a structured analysis of website text.
///
/// Only the first [`ANALYSIS_CHAR_LIMIT`] characters are included.
pub fn analysis_prompt(text: &str) -> AppResult<String> {
    let end = text
        .char_indices()
        .nth(ANALYSIS_CHAR_LIMIT)
        .map_or(text.len(), |(i, _)| i);
    render_template(
        ANALYSIS_TEMPLATE,
        &ContentContext {
            content: &text[..end],
        },
    )
}

#[derive(Serialize)]
struct PaletteContext<'a> {
    niche: &'a str,
    style: &'a str,
}

pub fn palette_prompt(niche: &str, style: &str) -> AppResult<String> {
    render_template(PALETTE_TEMPLATE, &PaletteContext { niche, style })
}

/// Context line describing the brief for inspiration requests.
pub fn inspiration_context(form: &FormState) -> String {
    format!(
        "Nicho: {}, Público-alvo: {}",
        form.niche, form.target_audience
    )
}

#[derive(Serialize)]
struct InspirationContext<'a> {
    context: &'a str,
    field: &'a str,
    count: usize,
}

pub fn inspiration_prompt(field: &str, context: &str, count: usize) -> AppResult<String> {
    render_template(
        INSPIRATION_TEMPLATE,
        &InspirationContext {
            context,
            field,
            count,
        },
    )
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct KeywordsContext<'a> {
    niche: &'a str,
    target_audience: &'a str,
    count: usize,
}

pub fn keywords_prompt(niche: &str, target_audience: &str, count: usize) -> AppResult<String> {
    render_template(
        KEYWORDS_TEMPLATE,
        &KeywordsContext {
            niche,
            target_audience,
            count,
        },
    )
}

#[derive(Serialize)]
struct PageContext<'a> {
    page: &'a str,
    form: &'a FormState,
}

pub fn page_content_prompt(page: &str, form: &FormState) -> AppResult<String> {
    render_template(PAGE_CONTENT_TEMPLATE, &PageContext { page, form })
}

#[derive(Serialize)]
struct LogoContext<'a> {
    form: &'a FormState,
    primary: &'a str,
    accent: &'a str,
}

/// Logo request; without a palette the colors default to black and blue.
pub fn logo_prompt(form: &FormState) -> AppResult<String> {
    let colors = form.colors.as_ref();
    render_template(
        LOGO_TEMPLATE,
        &LogoContext {
            form,
            primary: colors.map_or("preto", |c| c.primary.as_str()),
            accent: colors.map_or("azul", |c| c.accent.as_str()),
        },
    )
}
