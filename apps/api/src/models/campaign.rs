use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ad campaign flavour. Drives how many assets the model is asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignType {
    Search,
    Pmax,
}

impl CampaignType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "search" => Some(CampaignType::Search),
            "pmax" => Some(CampaignType::Pmax),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignType::Search => "search",
            CampaignType::Pmax => "pmax",
        }
    }

    /// Number of descriptions requested from the model.
    pub fn description_count(&self) -> usize {
        match self {
            CampaignType::Search => 4,
            CampaignType::Pmax => 5,
        }
    }

    /// Long titles only exist for Performance Max campaigns.
    pub fn has_long_titles(&self) -> bool {
        matches!(self, CampaignType::Pmax)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("Invalid campaignType '{0}': expected 'search' or 'pmax'")]
    InvalidCampaignType(String),
}

/// Inbound form payload. Every field is optional on the wire so that a missing
/// value surfaces as a `ValidationError` naming it, not as a JSON rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignPayload {
    pub campaign_type: Option<String>,
    pub language: Option<String>,
    pub tone: Option<String>,
    pub description: Option<String>,
    pub search_term: Option<String>,
    pub target: Option<String>,
    pub differentials: Option<String>,
    pub final_url: Option<String>,
    /// Newline-delimited competitor URLs.
    pub competitors: Option<String>,
    pub cta_category: Option<String>,
    pub cta: Option<String>,
    /// Caller-supplied reference keywords. When present, scraping is skipped.
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// A validated campaign brief. Required fields are guaranteed non-blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignRequest {
    pub campaign_type: CampaignType,
    pub language: String,
    pub tone: String,
    pub description: String,
    pub search_term: Option<String>,
    pub target: String,
    pub differentials: String,
    pub final_url: Option<String>,
    pub competitor_urls: Vec<String>,
    pub cta_category: Option<String>,
    pub cta: Option<String>,
    /// Keyword signals fed into the prompt (provided by the caller or scraped).
    pub reference_keywords: Vec<String>,
}

impl CampaignRequest {
    /// Replaces the reference keywords, deduplicating them in first-seen order.
    pub fn with_reference_keywords(mut self, keywords: Vec<String>) -> Self {
        self.reference_keywords = dedup_keywords(keywords);
        self
    }

    /// URLs worth scraping for keyword signals: competitors first, falling back
    /// to the campaign's own final URL.
    pub fn scrape_targets(&self) -> Vec<String> {
        if !self.competitor_urls.is_empty() {
            return self.competitor_urls.clone();
        }
        self.final_url.iter().cloned().collect()
    }
}

impl TryFrom<CampaignPayload> for CampaignRequest {
    type Error = ValidationError;

    /// Required fields are checked in a fixed order; the first absent one is reported.
    fn try_from(payload: CampaignPayload) -> Result<Self, Self::Error> {
        let campaign_type_raw = required(payload.campaign_type, "campaignType")?;
        let language = required(payload.language, "language")?;
        let tone = required(payload.tone, "tone")?;
        let description = required(payload.description, "description")?;
        let target = required(payload.target, "target")?;
        let differentials = required(payload.differentials, "differentials")?;

        let campaign_type = CampaignType::parse(&campaign_type_raw)
            .ok_or(ValidationError::InvalidCampaignType(campaign_type_raw))?;

        Ok(CampaignRequest {
            campaign_type,
            language,
            tone,
            description,
            search_term: optional(payload.search_term),
            target,
            differentials,
            final_url: optional(payload.final_url),
            competitor_urls: payload
                .competitors
                .as_deref()
                .map(parse_competitor_urls)
                .unwrap_or_default(),
            cta_category: optional(payload.cta_category),
            cta: optional(payload.cta),
            reference_keywords: dedup_keywords(payload.keywords),
        })
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, ValidationError> {
    optional(value).ok_or(ValidationError::MissingField { field })
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Splits the newline-delimited competitor field, dropping blank lines.
pub fn parse_competitor_urls(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Trims, drops blanks and removes duplicates while keeping first-seen order.
pub fn dedup_keywords<I>(keywords: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    keywords
        .into_iter()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .filter(|k| seen.insert(k.clone()))
        .collect()
}
