//! Built-in content instructions for the canonical page archetypes.

use std::borrow::Cow;

/// One of the seven page kinds with a fixed content instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageArchetype {
    Home,
    About,
    Services,
    Blog,
    Contact,
    Gallery,
    Pricing,
}

impl PageArchetype {
    pub const ALL: [PageArchetype; 7] = [
        Self::Home,
        Self::About,
        Self::Services,
        Self::Blog,
        Self::Contact,
        Self::Gallery,
        Self::Pricing,
    ];

    /// Match a page name (Portuguese form label or English equivalent).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Início" | "Home" => Some(Self::Home),
            "Sobre Nós" | "About" => Some(Self::About),
            "Serviços" | "Services" => Some(Self::Services),
            "Blog" => Some(Self::Blog),
            "Contato" | "Contact" => Some(Self::Contact),
            "Galeria" | "Gallery" => Some(Self::Gallery),
            "Preços" | "Pricing" => Some(Self::Pricing),
            _ => None,
        }
    }

    /// Name shown in the form's page picker.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Home => "Início",
            Self::About => "Sobre Nós",
            Self::Services => "Serviços",
            Self::Blog => "Blog",
            Self::Contact => "Contato",
            Self::Gallery => "Galeria",
            Self::Pricing => "Preços",
        }
    }

    pub fn instruction(&self) -> &'static str {
        match self {
            Self::Home => "Descreva uma seção de herói cativante com um título forte, um subtítulo e um CTA claro. Siga com uma breve introdução dos serviços/produtos, um bloco de prova social (depoimentos ou logotipos de clientes) e um CTA final.",
            Self::About => "Crie uma narrativa envolvente sobre a história, missão e valores da marca. Apresente a equipe, se aplicável, e construa uma conexão emocional com o leitor.",
            Self::Services => "Liste e descreva detalhadamente os serviços ou produtos oferecidos. Use títulos claros, parágrafos curtos e talvez ícones para cada item. Termine com um CTA para solicitar um orçamento ou comprar.",
            Self::Blog => "Estruture uma página de listagem de artigos de blog com espaço para uma imagem destacada, título, resumo e data para cada post. Inclua uma barra lateral com categorias ou posts populares.",
            Self::Contact => "Inclua um formulário de contato simples (Nome, Email, Mensagem). Adicione outras informações como endereço (com um mapa incorporado, se possível), telefone e horário de funcionamento.",
            Self::Gallery => "Projete uma grade de imagens visualmente atraente. Considere funcionalidades de filtro por categoria e um lightbox para visualização em tela cheia.",
            Self::Pricing => "Crie uma tabela de preços clara e comparativa. Destaque o plano mais popular. Para cada plano, liste os recursos principais e inclua um botão de CTA claro.",
        }
    }
}

/// Content instruction for any page; unknown names get a generic one.
pub fn page_instruction(name: &str) -> Cow<'static, str> {
    match PageArchetype::from_name(name) {
        Some(archetype) => Cow::Borrowed(archetype.instruction()),
        None => Cow::Owned(format!(
            "Forneça uma estrutura de conteúdo básica e relevante para uma página de '{}'.",
            name
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_resolve_to_themselves() {
        for archetype in PageArchetype::ALL {
            assert_eq!(PageArchetype::from_name(archetype.label()), Some(archetype));
        }
    }

    #[test]
    fn test_english_aliases() {
        assert_eq!(PageArchetype::from_name("Home"), Some(PageArchetype::Home));
        assert_eq!(PageArchetype::from_name("Pricing"), Some(PageArchetype::Pricing));
    }

    #[test]
    fn test_contact_instruction_mentions_form_address_map_hours() {
        let text = page_instruction("Contato");
        assert!(text.contains("formulário de contato"));
        assert!(text.contains("endereço"));
        assert!(text.contains("mapa"));
        assert!(text.contains("horário de funcionamento"));
    }

    #[test]
    fn test_unknown_page_falls_back_to_generic() {
        assert_eq!(PageArchetype::from_name("PáginaCustom"), None);
        assert_eq!(
            page_instruction("PáginaCustom"),
            "Forneça uma estrutura de conteúdo básica e relevante para uma página de 'PáginaCustom'."
        );
        // Matching is exact
        assert_eq!(PageArchetype::from_name("contato"), None);
    }
}
