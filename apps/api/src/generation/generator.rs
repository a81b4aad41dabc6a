//! Ad Generation — orchestrates the full generation pipeline.
//!
//! Flow: reference keywords (provided or scraped) → build_prompt →
//!       LLM complete → parse_response → attach scraped keywords.
//!
//! Runs as one sequential, request-scoped unit. Only the scraper fans out.

use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::normalizer::parse_response;
use crate::generation::prompt_builder::build_prompt;
use crate::generation::prompts::AD_COPY_SYSTEM;
use crate::generation::scraper::{scrape_keywords, ScrapeLimits, SiteKeywordSource};
use crate::llm_client::LlmClient;
use crate::models::ad::{GeneratedAdContent, HEADLINE_COUNT, LONG_TITLE_COUNT};
use crate::models::campaign::CampaignRequest;

/// Sampling temperature for ad copy: some variety across headlines, still on-brief.
pub const GENERATION_TEMPERATURE: f32 = 0.7;

/// Runs the generation pipeline for a validated campaign.
///
/// Steps:
/// 1. Reference keywords: caller-provided ones win, otherwise scrape the
///    competitor URLs (or the final URL when no competitors were given)
/// 2. build_prompt() → prompt text
/// 3. LLM complete → raw text (empty content is an error)
/// 4. parse_response() → GeneratedAdContent
pub async fn generate_ad(
    llm: &LlmClient,
    keyword_source: &dyn SiteKeywordSource,
    limits: ScrapeLimits,
    request: CampaignRequest,
) -> Result<GeneratedAdContent, AppError> {
    let span = info_span!(
        "generate_ad",
        generation_id = %Uuid::new_v4(),
        campaign_type = request.campaign_type.as_str()
    );

    async move {
        // Step 1: Reference keywords
        let scraped_keywords = resolve_reference_keywords(keyword_source, limits, &request).await;
        let request = request.with_reference_keywords(scraped_keywords.clone());

        // Step 2: Prompt
        let prompt = build_prompt(&request);

        // Step 3: LLM completion
        info!("Requesting ad copy ({} prompt chars)", prompt.chars().count());
        let raw = llm
            .complete(&prompt, AD_COPY_SYSTEM, GENERATION_TEMPERATURE)
            .await
            .map_err(|e| AppError::Llm(format!("Ad generation LLM call failed: {e}")))?;

        // Step 4: Normalize
        let content =
            parse_response(&raw, request.campaign_type).with_scraped_keywords(scraped_keywords);
        report_shortfalls(&request, &content);

        info!(
            "Generated {} headlines, {} long titles, {} descriptions",
            content.headlines.len(),
            content.long_titles.len(),
            content.descriptions.len()
        );

        Ok::<_, AppError>(content)
    }
    .instrument(span)
    .await
}

async fn resolve_reference_keywords(
    keyword_source: &dyn SiteKeywordSource,
    limits: ScrapeLimits,
    request: &CampaignRequest,
) -> Vec<String> {
    if !request.reference_keywords.is_empty() {
        info!(
            "Using {} caller-provided keywords, skipping scrape",
            request.reference_keywords.len()
        );
        return request.reference_keywords.clone();
    }

    let targets = request.scrape_targets();
    if targets.is_empty() {
        return Vec::new();
    }

    let keywords = scrape_keywords(keyword_source, &targets, limits).await;
    info!(
        "Scraped {} keywords from {} URLs",
        keywords.len(),
        targets.len()
    );
    keywords
}

/// The model may return fewer assets than asked for; the response is still usable.
fn report_shortfalls(request: &CampaignRequest, content: &GeneratedAdContent) {
    let campaign_type = request.campaign_type;
    let mut expected = vec![
        ("headlines", HEADLINE_COUNT, content.headlines.len()),
        (
            "descriptions",
            campaign_type.description_count(),
            content.descriptions.len(),
        ),
    ];
    if campaign_type.has_long_titles() {
        expected.push(("long titles", LONG_TITLE_COUNT, content.long_titles.len()));
    }

    for (field, wanted, got) in expected {
        if got < wanted {
            warn!("Model returned {got}/{wanted} {field}");
        }
    }
    if content.keywords.is_empty() {
        warn!("Model returned no keyword line");
    }
}
