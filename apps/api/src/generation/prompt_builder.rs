//! Prompt Builder — renders a validated campaign into the instruction text
//! sent to the model. Pure: identical requests yield byte-identical prompts.

use crate::generation::prompts::{
    ad_copy_intro, CTA_INSTRUCTION, OUTPUT_FORMAT_INSTRUCTION,
    REFERENCE_KEYWORDS_INSTRUCTION, SEARCH_TERM_INSTRUCTION,
};
use crate::models::ad::{
    AdField, DESCRIPTION, HEADLINE, HEADLINE_COUNT, KEYWORDS_LABEL, KEYWORD_LIMIT, LONG_TITLE,
    LONG_TITLE_COUNT,
};
use crate::models::campaign::{CampaignRequest, CampaignType};

pub fn build_prompt(request: &CampaignRequest) -> String {
    let campaign_type = request.campaign_type;
    let mut lines: Vec<String> = Vec::new();

    lines.push(ad_copy_intro(
        campaign_kind(campaign_type),
        &request.language,
        &request.tone,
    ));
    lines.push(String::new());

    // Campaign brief, embedded verbatim.
    lines.push(format!("Produto/Serviço: {}", request.description));
    lines.push(format!("Público-alvo: {}", request.target));
    lines.push(format!("Diferenciais: {}", request.differentials));
    if let Some(term) = &request.search_term {
        lines.push(format!("Termo de pesquisa principal: {term}"));
    }
    if let Some(url) = &request.final_url {
        lines.push(format!("URL final: {url}"));
    }
    if !request.competitor_urls.is_empty() {
        lines.push(format!("Concorrentes: {}", request.competitor_urls.join(", ")));
    }
    if let Some(category) = &request.cta_category {
        lines.push(format!("Categoria de CTA: {category}"));
    }
    if let Some(cta) = &request.cta {
        lines.push(format!("CTA: {cta}"));
    }
    if !request.reference_keywords.is_empty() {
        lines.push(format!(
            "Palavras-chave de referência: {}",
            request.reference_keywords.join(", ")
        ));
    }

    let mut instructions = Vec::new();
    if let Some(term) = &request.search_term {
        instructions.push(SEARCH_TERM_INSTRUCTION.replace("{search_term}", term));
    }
    if let Some(cta) = &request.cta {
        instructions.push(CTA_INSTRUCTION.replace("{cta}", cta));
    }
    if !request.reference_keywords.is_empty() {
        instructions.push(REFERENCE_KEYWORDS_INSTRUCTION.to_string());
    }
    if !instructions.is_empty() {
        lines.push(String::new());
        lines.extend(instructions);
    }

    lines.push(String::new());
    lines.push("Forneça:".to_string());
    for (index, item) in deliverables(campaign_type).iter().enumerate() {
        lines.push(format!("{}. {item}", index + 1));
    }

    lines.push(String::new());
    lines.push(OUTPUT_FORMAT_INSTRUCTION.to_string());
    lines.push(format!(
        "{KEYWORDS_LABEL} <palavra-chave 1>, <palavra-chave 2>, ..."
    ));
    lines.extend(labeled_placeholders(&HEADLINE, HEADLINE_COUNT));
    if campaign_type.has_long_titles() {
        lines.extend(labeled_placeholders(&LONG_TITLE, LONG_TITLE_COUNT));
    }
    lines.extend(labeled_placeholders(
        &DESCRIPTION,
        campaign_type.description_count(),
    ));

    lines.join("\n")
}

fn campaign_kind(campaign_type: CampaignType) -> &'static str {
    match campaign_type {
        CampaignType::Search => "de pesquisa",
        CampaignType::Pmax => "de Performance Max",
    }
}

fn deliverables(campaign_type: CampaignType) -> Vec<String> {
    let mut items = vec![
        format!(
            "Uma lista de até {KEYWORD_LIMIT} palavras-chave relacionadas ao produto/serviço."
        ),
        format!(
            "Exatamente {HEADLINE_COUNT} headlines (títulos curtos) com até {} caracteres cada.",
            HEADLINE.target
        ),
    ];
    if campaign_type.has_long_titles() {
        items.push(format!(
            "Exatamente {LONG_TITLE_COUNT} títulos longos com no mínimo {} e no máximo {} caracteres cada.",
            LONG_TITLE.minimum, LONG_TITLE.target
        ));
    }
    items.push(format!(
        "Exatamente {} descrições com até {} caracteres cada.",
        campaign_type.description_count(),
        DESCRIPTION.target
    ));
    items
}

fn labeled_placeholders(field: &AdField, count: usize) -> impl Iterator<Item = String> + '_ {
    (1..=count).map(move |n| format!("{} {n}: <texto>", field.label))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search_request() -> CampaignRequest {
        CampaignRequest {
            campaign_type: CampaignType::Search,
            language: "pt-BR".to_string(),
            tone: "entusiasmado".to_string(),
            description: "Tênis de corrida com amortecimento".to_string(),
            search_term: None,
            target: "Corredores amadores".to_string(),
            differentials: "Frete grátis e troca fácil".to_string(),
            final_url: None,
            competitor_urls: vec![],
            cta_category: None,
            cta: None,
            reference_keywords: vec![],
        }
    }

    fn count_lines_starting_with(prompt: &str, prefix: &str) -> usize {
        prompt.lines().filter(|l| l.starts_with(prefix)).count()
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let request = CampaignRequest {
            search_term: Some("tênis de corrida".to_string()),
            cta: Some("Compre Agora".to_string()),
            competitor_urls: vec!["https://rival.example".to_string()],
            ..search_request()
        };
        assert_eq!(build_prompt(&request), build_prompt(&request.clone()));
    }

    #[test]
    fn test_search_prompt_requests_headlines_and_four_descriptions() {
        let prompt = build_prompt(&search_request());
        assert!(prompt.starts_with("Crie um anúncio de pesquisa do Google Ads em pt-BR com tom entusiasmado."));
        assert_eq!(count_lines_starting_with(&prompt, "Headline "), 15);
        assert_eq!(count_lines_starting_with(&prompt, "Descrição "), 4);
        assert_eq!(count_lines_starting_with(&prompt, "Título longo "), 0);
        assert!(prompt.contains("Headline 15: <texto>"));
        assert!(prompt.contains("Palavras-chave: <palavra-chave 1>"));
    }

    #[test]
    fn test_pmax_prompt_requests_long_titles_and_five_descriptions() {
        let request = CampaignRequest {
            campaign_type: CampaignType::Pmax,
            ..search_request()
        };
        let prompt = build_prompt(&request);
        assert!(prompt.contains("anúncio de Performance Max"));
        assert_eq!(count_lines_starting_with(&prompt, "Título longo "), 5);
        assert_eq!(count_lines_starting_with(&prompt, "Descrição "), 5);
        assert!(prompt.contains("no mínimo 70 e no máximo 90"));
    }

    #[test]
    fn test_prompt_embeds_fields_verbatim() {
        let request = CampaignRequest {
            search_term: Some("tênis \"pro\"".to_string()),
            final_url: Some("https://shop.example/tenis".to_string()),
            competitor_urls: vec![
                "https://a.example".to_string(),
                "https://b.example".to_string(),
            ],
            cta_category: Some("Urgência".to_string()),
            reference_keywords: vec!["maratona".to_string(), "running".to_string()],
            ..search_request()
        };
        let prompt = build_prompt(&request);
        assert!(prompt.contains("Produto/Serviço: Tênis de corrida com amortecimento"));
        assert!(prompt.contains("Público-alvo: Corredores amadores"));
        assert!(prompt.contains("Diferenciais: Frete grátis e troca fácil"));
        assert!(prompt.contains("Termo de pesquisa principal: tênis \"pro\""));
        assert!(prompt.contains("URL final: https://shop.example/tenis"));
        assert!(prompt.contains("Concorrentes: https://a.example, https://b.example"));
        assert!(prompt.contains("Categoria de CTA: Urgência"));
        assert!(prompt.contains("Palavras-chave de referência: maratona, running"));
    }

    #[test]
    fn test_intro_keeps_braces_in_user_text() {
        let request = CampaignRequest {
            language: "pt-BR {tone}".to_string(),
            tone: "formal".to_string(),
            ..search_request()
        };
        let prompt = build_prompt(&request);
        assert!(prompt.starts_with(
            "Crie um anúncio de pesquisa do Google Ads em pt-BR {tone} com tom formal."
        ));
    }

    #[test]
    fn test_cta_instruction_only_when_cta_present() {
        let without = build_prompt(&search_request());
        assert!(!without.contains("deve aparecer em pelo menos um headline"));

        let request = CampaignRequest {
            cta: Some("Compre Agora".to_string()),
            ..search_request()
        };
        let with = build_prompt(&request);
        assert!(with.contains("CTA: Compre Agora"));
        assert!(with.contains(
            "O CTA \"Compre Agora\" deve aparecer em pelo menos um headline e em pelo menos uma descrição."
        ));
    }

    #[test]
    fn test_optional_fields_are_omitted_when_absent() {
        let prompt = build_prompt(&search_request());
        assert!(!prompt.contains("Termo de pesquisa principal"));
        assert!(!prompt.contains("URL final"));
        assert!(!prompt.contains("Concorrentes"));
        assert!(!prompt.contains("Palavras-chave de referência"));
    }
}
