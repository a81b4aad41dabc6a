//! CTA catalogue — call-to-action categories and the phrases suggested for each.

/// A CTA category and its suggested phrases, in display order.
#[derive(Debug, Clone, Copy)]
pub struct CtaCategory {
    pub name: &'static str,
    pub suggestions: &'static [&'static str],
}

pub const CTA_CATEGORIES: &[CtaCategory] = &[
    CtaCategory {
        name: "Conversão Direta (Vendas, Cadastros)",
        suggestions: &[
            "Compre Agora",
            "Inscreva-se Hoje",
            "Experimente Gratuitamente",
            "Garanta sua Vaga",
            "Adquira Já",
            "Assine Agora",
            "Reserve Seu Lugar",
            "Comece Já",
            "Solicite Seu Desconto",
            "Peça uma Demonstração",
        ],
    },
    CtaCategory {
        name: "Geração de Leads",
        suggestions: &[
            "Solicite uma Cotação",
            "Saiba Mais",
            "Cadastre-se para Mais Informações",
            "Receba Nosso E-book Gratuito",
            "Fale com um Especialista",
            "Baixe Agora",
            "Entre em Contato",
            "Inscreva-se para Atualizações",
            "Receba um Orçamento",
            "Agende uma Consultoria",
        ],
    },
    CtaCategory {
        name: "Engajamento",
        suggestions: &[
            "Participe Agora",
            "Compartilhe com Seus Amigos",
            "Comente Aqui",
            "Curta Nossa Página",
            "Siga-nos",
            "Deixe Sua Avaliação",
            "Faça Parte da Comunidade",
            "Envie Sua Opinião",
            "Descubra Mais",
            "Teste Grátis",
        ],
    },
    CtaCategory {
        name: "Urgência",
        suggestions: &[
            "Oferta Por Tempo Limitado",
            "Aproveite Hoje Mesmo",
            "Últimos Dias!",
            "Não Perca!",
            "Garanta Antes que Acabe",
            "Promoção Exclusiva – Apenas Hoje",
            "Corra, Acaba Logo!",
            "Últimas Unidades",
            "Faça Agora ou Perderá!",
            "Oportunidade Única",
        ],
    },
    CtaCategory {
        name: "Produtos de Luxo",
        suggestions: &[
            "Experimente o Melhor",
            "Descubra a Exclusividade",
            "Viva a Experiência Premium",
            "Redefina Seu Padrão",
            "Garanta o Máximo de Qualidade",
            "Conheça a Excelência",
            "Torne-se VIP Agora",
        ],
    },
    CtaCategory {
        name: "Educação",
        suggestions: &[
            "Aprenda Mais",
            "Comece sua Jornada",
            "Explore o Conteúdo",
            "Descubra Novos Horizontes",
            "Inscreva-se no Curso",
            "Tenha Acesso ao Material",
            "Veja Nossos Tutoriais",
            "Amplie Seu Conhecimento",
        ],
    },
    CtaCategory {
        name: "Incentivo a experimentar",
        suggestions: &[
            "Experimente Gratuitamente",
            "Teste Agora Sem Compromisso",
            "Veja Como Funciona",
            "Descubra as Vantagens",
            "Prove por Você Mesmo",
            "Avalie Gratuitamente",
        ],
    },
];

pub fn category_names() -> Vec<&'static str> {
    CTA_CATEGORIES.iter().map(|c| c.name).collect()
}

/// Suggested CTAs for a category. Matching ignores case and surrounding whitespace.
pub fn cta_suggestions(category: &str) -> Option<&'static [&'static str]> {
    let wanted = category.trim().to_lowercase();
    CTA_CATEGORIES
        .iter()
        .find(|c| c.name.to_lowercase() == wanted)
        .map(|c| c.suggestions)
}
