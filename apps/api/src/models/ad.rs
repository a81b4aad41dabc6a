use serde::{Deserialize, Serialize};

pub const HEADLINE_COUNT: usize = 15;
pub const LONG_TITLE_COUNT: usize = 5;
/// Upper bound on the keyword list requested from the model.
pub const KEYWORD_LIMIT: usize = 20;

/// Label that introduces the comma-separated keyword line.
pub const KEYWORDS_LABEL: &str = "Palavras-chave:";

/// A line-labeled ad asset with its character budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdField {
    pub label: &'static str,
    pub target: usize,
    pub minimum: usize,
}

pub const HEADLINE: AdField = AdField {
    label: "Headline",
    target: 30,
    minimum: 25,
};

pub const LONG_TITLE: AdField = AdField {
    label: "Título longo",
    target: 90,
    minimum: 70,
};

pub const DESCRIPTION: AdField = AdField {
    label: "Descrição",
    target: 90,
    minimum: 80,
};

/// Structured ad copy returned to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedAdContent {
    /// Comma-joined keyword list, as returned by the model.
    pub keywords: String,
    pub headlines: Vec<String>,
    /// Only populated for `pmax` campaigns.
    pub long_titles: Vec<String>,
    pub descriptions: Vec<String>,
    pub scraped_keywords: Vec<String>,
}

impl GeneratedAdContent {
    pub fn with_scraped_keywords(self, scraped_keywords: Vec<String>) -> Self {
        Self {
            scraped_keywords,
            ..self
        }
    }
}
