//! Axum route handlers for the Ad Generation API.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::generation::cta::{category_names, cta_suggestions};
use crate::generation::generator::generate_ad;
use crate::generation::prompt_builder::build_prompt;
use crate::generation::scraper::{scrape_keywords, ScrapeLimits};
use crate::models::ad::GeneratedAdContent;
use crate::models::campaign::{CampaignPayload, CampaignRequest};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct PromptPreviewResponse {
    pub prompt: String,
}

#[derive(Debug, Deserialize)]
pub struct ScrapeKeywordsRequest {
    pub urls: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ScrapeKeywordsResponse {
    pub keywords: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct CtaQuery {
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CtaSuggestionsResponse {
    pub categories: Vec<&'static str>,
    pub suggestions: Vec<&'static str>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/ads/generate
///
/// Full pipeline: validate → scrape keywords → build prompt → LLM → normalize.
/// Validation failures return before any external call is made.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(payload): Json<CampaignPayload>,
) -> Result<Json<GeneratedAdContent>, AppError> {
    let request = CampaignRequest::try_from(payload)?;

    let content = generate_ad(
        &state.llm,
        state.keyword_source.as_ref(),
        ScrapeLimits::from(&state.config),
        request,
    )
    .await?;

    Ok(Json(content))
}

/// POST /api/v1/ads/prompt
///
/// Returns the prompt that would be sent for this campaign. No external call;
/// reference keywords are only those supplied by the caller.
pub async fn handle_prompt_preview(
    Json(payload): Json<CampaignPayload>,
) -> Result<Json<PromptPreviewResponse>, AppError> {
    let request = CampaignRequest::try_from(payload)?;
    Ok(Json(PromptPreviewResponse {
        prompt: build_prompt(&request),
    }))
}

/// POST /api/v1/ads/keywords
///
/// Scrapes keyword signals from the given URLs. Failing URLs are skipped.
pub async fn handle_scrape_keywords(
    State(state): State<AppState>,
    Json(request): Json<ScrapeKeywordsRequest>,
) -> Result<Json<ScrapeKeywordsResponse>, AppError> {
    let urls: Vec<String> = request
        .urls
        .iter()
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
        .collect();
    if urls.is_empty() {
        return Err(AppError::Validation("urls cannot be empty".to_string()));
    }

    let keywords = scrape_keywords(
        state.keyword_source.as_ref(),
        &urls,
        ScrapeLimits::from(&state.config),
    )
    .await;

    Ok(Json(ScrapeKeywordsResponse { keywords }))
}

/// GET /api/v1/ads/cta-suggestions?category=
///
/// Lists CTA categories, plus the suggested CTAs for `category` when given.
pub async fn handle_cta_suggestions(
    Query(query): Query<CtaQuery>,
) -> Result<Json<CtaSuggestionsResponse>, AppError> {
    let suggestions = match query.category.as_deref() {
        Some(category) => cta_suggestions(category)
            .ok_or_else(|| AppError::Validation(format!("Unknown CTA category '{category}'")))?
            .to_vec(),
        None => Vec::new(),
    };

    Ok(Json(CtaSuggestionsResponse {
        categories: category_names(),
        suggestions,
    }))
}
