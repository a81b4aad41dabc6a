// All LLM prompt constants for the ad generation module.

/// System prompt for ad copy generation — enforces the line-labeled output format.
pub const AD_COPY_SYSTEM: &str = "Você é um redator especialista em anúncios do Google Ads. \
    Respeite rigorosamente os limites de caracteres pedidos. \
    Responda SOMENTE com as linhas rotuladas solicitadas, uma por linha. \
    NÃO use markdown, JSON, numeração extra ou explicações.";

/// Opening line. Rendered in one pass so user text never hits a later placeholder.
pub fn ad_copy_intro(campaign_kind: &str, language: &str, tone: &str) -> String {
    format!("Crie um anúncio {campaign_kind} do Google Ads em {language} com tom {tone}.")
}

/// Relevance instruction when a main search term is present. Replace `{search_term}`.
pub const SEARCH_TERM_INSTRUCTION: &str = "O anúncio deve ser altamente relevante para o termo \
    de pesquisa \"{search_term}\" para garantir uma qualidade excelente. Use este termo de forma \
    estratégica nos títulos e descrições.";

/// CTA placement instruction. Replace `{cta}`.
pub const CTA_INSTRUCTION: &str =
    "O CTA \"{cta}\" deve aparecer em pelo menos um headline e em pelo menos uma descrição.";

pub const REFERENCE_KEYWORDS_INSTRUCTION: &str = "Use as palavras-chave de referência como \
    sinal de relevância; não as copie literalmente quando não couberem no texto.";

pub const OUTPUT_FORMAT_INSTRUCTION: &str =
    "Responda somente com as linhas abaixo, uma por linha, sem markdown e sem texto adicional:";

/// System prompt for competitor keyword extraction.
pub const SITE_KEYWORDS_SYSTEM: &str = "Você é um analista de SEO e mídia paga. \
    Responda SOMENTE com uma lista de palavras-chave separadas por vírgula, \
    sem numeração, sem markdown e sem explicações.";

/// Keyword extraction prompt. Replace `{url}` and `{page_text}` before sending.
pub const SITE_KEYWORDS_PROMPT_TEMPLATE: &str = r#"Quais são as principais palavras-chave relacionadas ao conteúdo deste site?

Site: {url}

CONTEÚDO DA PÁGINA:
{page_text}"#;
