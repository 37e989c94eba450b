//! Prompt document assembly.
//!
//! [`assemble`] turns a [`FormState`] into the markdown prompt handed to the
//! website-builder model. It is pure and total: every optional field that is
//! missing turns into an instruction asking the model to fill the gap.

use crate::form::INTERACTIVE_COMPLEXITY;
use crate::pages::page_instruction;
use crate::types::{ColorScheme, FormState};

/// First line of every document.
pub const HEADER: &str = "**NÃO adicione nenhum texto introdutório ou final. Gere APENAS o prompt em markdown abaixo, preenchendo as seções com criatividade e detalhes.**";

pub const TITLE: &str = "**PROMPT PARA IA CONSTRUTORA DE SITES**";

pub const LOGO_PROVIDED: &str = "O usuário FORNECEU um arquivo de logo (ou gerou uma sugestão). Use este logo de forma proeminente no cabeçalho (geralmente no canto superior esquerdo) e novamente de forma mais sutil no rodapé. Garanta que haja espaço em branco adequado ao redor do logo.";

pub const LOGO_TEXT: &str = "CRIE um logo de texto simples e elegante para o negócio. Use o nome da marca e a fonte de título principal para o logo. Ele deve ser limpo e profissional.";

pub const COLORS_FIXED: &str = "A paleta de cores JÁ FOI DEFINIDA. Use EXATAMENTE estas cores:";

pub const COLORS_NO_INVENT: &str = "Não invente nenhuma outra cor.";

pub const COLORS_SUGGEST: &str = "Sugira uma paleta de cores profissional e acessível que se alinhe com o nicho e o estilo visual. Certifique-se de que haja contraste suficiente para a legibilidade.";

pub const MOTION_INTERACTIVE: &str = "[Incorpore micro-interações sutis em botões e links (como um leve zoom no hover) e transições suaves de scroll para animar a aparição de seções.]";

pub const MOTION_MINIMAL: &str =
    "[Foque em um design limpo, rápido e fácil de navegar, sem animações desnecessárias.]";

pub const SEO_KEYWORDS: &str = "Incorpore naturalmente as seguintes palavras-chave no conteúdo do site, especialmente em títulos (H1, H2) e parágrafos iniciais:";

pub const SEO_INVENT: &str = "[Sugira 5-10 palavras-chave de cauda longa relevantes para o nicho para otimização de SEO].";

const ACCESSIBILITY: [&str; 3] = [
    "Garanta que todas as combinações de cores de texto e fundo tenham uma taxa de contraste que atenda aos padrões WCAG AA.",
    "Inclua texto alternativo (alt text) descritivo para todas as imagens.",
    "Use uma estrutura de cabeçalho (H1, H2, H3) lógica e semântica.",
];

const PAGE_INDENT: &str = "       ";

/// Build the prompt document for `form`.
pub fn assemble(form: &FormState) -> String {
    tracing::debug!(
        "Assembling prompt for '{}' with {} pages",
        form.project_name,
        form.selected_pages.len()
    );

    let mut doc = String::new();
    doc.push_str(HEADER);
    doc.push_str("\n\n---\n\n");
    doc.push_str(TITLE);
    doc.push_str("\n\n");

    push_identity(&mut doc, form);
    push_structure(&mut doc, form);
    push_design(&mut doc, form);
    push_accessibility(&mut doc, form);

    doc
}

fn push_identity(doc: &mut String, form: &FormState) {
    let logo = if form.has_logo { LOGO_PROVIDED } else { LOGO_TEXT };

    doc.push_str("**1. Identidade Principal:**\n");
    doc.push_str(&format!("   - **Nome do Negócio:** {}\n", form.project_name));
    doc.push_str(&format!("   - **Logo:** {}\n", logo));
    doc.push_str(&format!("   - **Nicho de Mercado:** {}\n", form.niche));
    doc.push_str(&format!("   - **Público-Alvo:** {}\n", form.target_audience));
    doc.push_str("   - **Proposta Única de Valor (USP):** [Elabore uma USP concisa e impactante baseada no nicho e público]\n");
    doc.push_str(&format!("   - **Tom de Voz:** {}\n\n", form.tone));
}

fn push_structure(doc: &mut String, form: &FormState) {
    doc.push_str("**2. Estrutura e Conteúdo:**\n");
    doc.push_str(&format!(
        "   - **Páginas Necessárias:** {}\n",
        form.selected_pages.join(", ")
    ));
    doc.push_str(&format!(
        "   - **Principal Chamada para Ação (CTA):** O objetivo principal do site é levar o usuário a \"{}\". Crie botões e links proeminentes com este objetivo em mente.\n",
        form.main_goal
    ));
    doc.push_str("   - **Conteúdo Detalhado das Páginas:**\n");

    for page in &form.selected_pages {
        push_page(doc, form, page);
    }
    doc.push('\n');
}

fn push_page(doc: &mut String, form: &FormState, page: &str) {
    match form.page_text(page) {
        Some(text) => {
            let fence = fence_for(text);
            doc.push_str(&format!("     - **{}:**\n", page));
            doc.push_str(&format!(
                "{}- **Conteúdo Fornecido pelo Usuário:**\n",
                PAGE_INDENT
            ));
            doc.push_str(&format!("{}{}\n", PAGE_INDENT, fence));
            for line in text.lines() {
                if line.is_empty() {
                    doc.push('\n');
                } else {
                    doc.push_str(&format!("{}{}\n", PAGE_INDENT, line));
                }
            }
            doc.push_str(&format!("{}{}\n", PAGE_INDENT, fence));
            doc.push_str(&format!(
                "{}- **Instrução:** Use o conteúdo acima como base principal para esta página. Expanda-o, melhore-o e formate-o conforme necessário, mantendo o tom de voz \"{}\".\n",
                PAGE_INDENT, form.tone
            ));
        }
        None => {
            doc.push_str(&format!("     - **{}:** [{}]\n", page, page_instruction(page)));
        }
    }
}

/// A code fence longer than any backtick run inside `text`.
fn fence_for(text: &str) -> String {
    let mut longest = 0;
    let mut run = 0;
    for c in text.chars() {
        if c == '`' {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    "`".repeat((longest + 1).max(3))
}

fn push_design(doc: &mut String, form: &FormState) {
    let corners = form.corner_style.to_lowercase();

    doc.push_str("**3. Design e Estética:**\n");
    doc.push_str(&format!(
        "   - **Estilo Visual Geral:** {}. Pense em layouts limpos, tipografia marcante e uso estratégico de espaços em branco.\n",
        form.style
    ));
    doc.push_str(&format!(
        "   - **Paleta de Cores:** {}\n",
        color_instructions(form.colors.as_ref())
    ));
    doc.push_str("   - **Tipografia:** [Sugira um par de fontes (uma para títulos, uma para corpo de texto) que complementem o estilo visual. Ex: \"Use 'Poppins' para títulos e 'Lato' para texto.\"]\n");
    doc.push_str("   - **Estilo dos Elementos:**\n");
    doc.push_str(&format!(
        "     - **Botões:** [Descreva a aparência dos botões, ex: \"grandes, com a cor de destaque e cantos {}\"]\n",
        corners
    ));
    doc.push_str(&format!(
        "     - **Cards e Seções:** Devem ter cantos {} para uma aparência coesa.\n",
        corners
    ));
    doc.push_str(&format!(
        "   - **Complexidade e Interatividade:** O design deve ser **{}**.\n",
        form.site_complexity
    ));
    let motion = if form.site_complexity == INTERACTIVE_COMPLEXITY {
        MOTION_INTERACTIVE
    } else {
        MOTION_MINIMAL
    };
    doc.push_str(&format!("     - {}\n", motion));
    doc.push_str("   - **Imagens:** [Descreva o tipo de imagens a serem usadas. Ex: \"Use fotos de alta qualidade, autênticas e que mostrem pessoas reais interagindo com o produto.\"]\n\n");
}

fn color_instructions(colors: Option<&ColorScheme>) -> String {
    let Some(colors) = colors else {
        return COLORS_SUGGEST.to_string();
    };

    let mut text = String::from(COLORS_FIXED);
    text.push_str(&format!("\n     - Cor Primária: {}", colors.primary));
    text.push_str(&format!("\n     - Cor de Destaque (Accent): {}", colors.accent));
    if let Some(secondary) = &colors.secondary {
        text.push_str(&format!("\n     - Cor Secundária: {}", secondary));
    }
    if let Some(neutral) = &colors.neutral {
        text.push_str(&format!("\n     - Cor Neutra: {}", neutral));
    }
    text.push_str("\n     ");
    text.push_str(COLORS_NO_INVENT);
    text
}

fn push_accessibility(doc: &mut String, form: &FormState) {
    doc.push_str("**4. Acessibilidade e SEO:**\n");
    doc.push_str("   - **Acessibilidade:**\n");
    for directive in ACCESSIBILITY {
        doc.push_str(&format!("     - {}\n", directive));
    }
    doc.push_str("   - **SEO e Palavras-chave:**\n");
    match form.keywords() {
        Some(keywords) => doc.push_str(&format!(
            "     - {} {}.\n",
            SEO_KEYWORDS,
            keywords.join(", ")
        )),
        None => doc.push_str(&format!("     - {}\n", SEO_INVENT)),
    }
}
