//! Response Normalizer — turns the model's free-text completion into strict,
//! length-bounded ad fields.
//!
//! The line-labeled format is a contract with the model via the prompt, not a
//! guaranteed schema. Parsing therefore never fails: missing sections become
//! empty lists and out-of-band lengths are logged, not rejected.

use std::fmt;

use serde::Deserialize;
use tracing::warn;

use crate::llm_client::strip_json_fences;
use crate::models::ad::{
    AdField, GeneratedAdContent, DESCRIPTION, HEADLINE, KEYWORDS_LABEL, LONG_TITLE,
};
use crate::models::campaign::CampaignType;

/// A parsed value that fell outside its character band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthWarning {
    /// Returned unchanged; shorter values are never padded.
    TooShort { length: usize, minimum: usize },
    /// Cut down to fit the target.
    Truncated { length: usize, target: usize },
}

impl fmt::Display for LengthWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LengthWarning::TooShort { length, minimum } => {
                write!(f, "text too short: {length} chars, expected at least {minimum}")
            }
            LengthWarning::Truncated { length, target } => {
                write!(f, "text too long: {length} chars, truncated to at most {target}")
            }
        }
    }
}

/// Normalizes whitespace and fits `text` into `[minimum, target]` characters
/// without cutting mid-word where possible. Logs a warning when out of band.
pub fn adjust_length(text: &str, target: usize, minimum: usize) -> String {
    let (adjusted, warning) = adjust_length_checked(text, target, minimum);
    if let Some(warning) = warning {
        warn!("{warning}: {adjusted:?}");
    }
    adjusted
}

/// Same as [`adjust_length`] but hands the warning back instead of logging it.
///
/// Lengths are counted in characters. When the text is longer than `target`,
/// it is cut to `target` characters and then shortened to the last space
/// inside the cut whose index is at least `minimum`; with no such space the
/// hard cut stands.
pub fn adjust_length_checked(
    text: &str,
    target: usize,
    minimum: usize,
) -> (String, Option<LengthWarning>) {
    let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let chars: Vec<char> = normalized.chars().collect();
    let length = chars.len();

    if length < minimum {
        return (normalized, Some(LengthWarning::TooShort { length, minimum }));
    }
    if length <= target {
        return (normalized, None);
    }

    let truncated = &chars[..target];
    let cut = (minimum..target)
        .rev()
        .find(|&i| truncated[i] == ' ')
        .unwrap_or(target);
    let adjusted = truncated[..cut].iter().collect::<String>().trim_end().to_string();

    (adjusted, Some(LengthWarning::Truncated { length, target }))
}

/// Parses a raw completion into `GeneratedAdContent`. Total: never fails.
///
/// A JSON object (optionally fenced) with `keywords`/`headlines`/`longTitles`/
/// `descriptions` is accepted as well; anything else goes through line parsing.
pub fn parse_response(raw: &str, campaign_type: CampaignType) -> GeneratedAdContent {
    if let Some(content) = parse_structured(raw, campaign_type) {
        return content;
    }

    let lines: Vec<&str> = raw.lines().map(strip_decoration).collect();

    let keywords = lines
        .iter()
        .find_map(|line| line.strip_prefix(KEYWORDS_LABEL))
        .map(strip_value)
        .map(String::from)
        .unwrap_or_default();

    let long_titles = if campaign_type.has_long_titles() {
        collect_field(&lines, &LONG_TITLE)
    } else {
        Vec::new()
    };

    GeneratedAdContent {
        keywords,
        headlines: collect_field(&lines, &HEADLINE),
        long_titles,
        descriptions: collect_field(&lines, &DESCRIPTION),
        scraped_keywords: Vec::new(),
    }
}

/// Strips leading whitespace and markdown list/bold markers the model sometimes adds.
fn strip_decoration(line: &str) -> &str {
    line.trim_start_matches(|c: char| c.is_whitespace() || matches!(c, '*' | '-' | '#'))
}

/// Drops the closing bold marker left over from `**Label:** value`.
fn strip_value(value: &str) -> &str {
    value.trim().trim_start_matches('*').trim()
}

fn collect_field(lines: &[&str], field: &AdField) -> Vec<String> {
    lines
        .iter()
        .filter(|line| line.starts_with(field.label))
        .filter_map(|line| line.split_once(':'))
        .map(|(_, value)| strip_value(value))
        .filter(|value| !value.is_empty())
        .map(|value| adjust_field(value, field))
        .collect()
}

fn adjust_field(value: &str, field: &AdField) -> String {
    adjust_length(value, field.target, field.minimum)
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum KeywordsValue {
    Joined(String),
    List(Vec<String>),
}

impl Default for KeywordsValue {
    fn default() -> Self {
        KeywordsValue::Joined(String::new())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StructuredAdResponse {
    #[serde(default)]
    keywords: KeywordsValue,
    #[serde(default)]
    headlines: Vec<String>,
    #[serde(default)]
    long_titles: Vec<String>,
    #[serde(default)]
    descriptions: Vec<String>,
}

fn parse_structured(raw: &str, campaign_type: CampaignType) -> Option<GeneratedAdContent> {
    let text = strip_json_fences(raw);
    if !text.starts_with('{') {
        return None;
    }

    let parsed: StructuredAdResponse = serde_json::from_str(text).ok()?;
    if parsed.headlines.is_empty() && parsed.descriptions.is_empty() {
        return None;
    }

    let adjust_all = |values: &[String], field: &AdField| -> Vec<String> {
        values
            .iter()
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(|v| adjust_field(v, field))
            .collect()
    };

    let keywords = match parsed.keywords {
        KeywordsValue::Joined(joined) => joined.trim().to_string(),
        KeywordsValue::List(list) => list
            .iter()
            .map(|k| k.trim())
            .filter(|k| !k.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
    };

    let long_titles = if campaign_type.has_long_titles() {
        adjust_all(&parsed.long_titles, &LONG_TITLE)
    } else {
        Vec::new()
    };

    Some(GeneratedAdContent {
        keywords,
        headlines: adjust_all(&parsed.headlines, &HEADLINE),
        long_titles,
        descriptions: adjust_all(&parsed.descriptions, &DESCRIPTION),
        scraped_keywords: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn char_len(s: &str) -> usize {
        s.chars().count()
    }

    /// Builds roughly `n` characters of 4-letter words, spaces every fifth char.
    fn words_of_len(n: usize) -> String {
        let mut out = String::new();
        while char_len(&out) < n {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str("casa");
        }
        out.chars().take(n).collect::<String>().trim_end().to_string()
    }

    #[test]
    fn test_adjust_length_cuts_at_word_boundary() {
        let text = "Compre já os melhores tênis de corrida hoje";
        let adjusted = adjust_length(text, 30, 25);
        assert_eq!(adjusted, "Compre já os melhores tênis");
        assert!(char_len(&adjusted) <= 30);
        assert!(!adjusted.contains("corrida"));
        assert!(adjusted.contains("melhores"));
    }

    #[test]
    fn test_adjust_length_backs_up_to_previous_space() {
        // Char 30 falls inside "para", so the cut goes back to the space before it.
        let text = "Compre já os melhores tênis para corrida hoje";
        let (adjusted, warning) = adjust_length_checked(text, 30, 25);
        assert_eq!(adjusted, "Compre já os melhores tênis");
        assert!(matches!(warning, Some(LengthWarning::Truncated { .. })));
    }

    #[test]
    fn test_adjust_length_ignores_space_just_past_the_cut() {
        // Char 30 is a space, but only spaces inside the cut are candidates and
        // none of them reaches the minimum, so the hard cut stands.
        let adjusted = adjust_length("Os melhores tênis para corrida de rua", 30, 25);
        assert_eq!(adjusted, "Os melhores tênis para corrida");
    }

    #[test]
    fn test_adjust_length_hard_cut_without_qualifying_space() {
        // The only space sits before the minimum, so the hard cut is kept.
        let text = "Tênis supercalifragilisticexpialidocious";
        let (adjusted, warning) = adjust_length_checked(text, 30, 25);
        assert_eq!(char_len(&adjusted), 30);
        assert_eq!(adjusted, text.chars().take(30).collect::<String>());
        assert_eq!(
            warning,
            Some(LengthWarning::Truncated {
                length: char_len(text),
                target: 30
            })
        );
    }

    #[test]
    fn test_adjust_length_never_exceeds_target() {
        for len in 31..200 {
            let text = words_of_len(len);
            let adjusted = adjust_length(&text, 30, 25);
            assert!(char_len(&adjusted) <= 30, "len {len}: {adjusted:?}");
            assert!(char_len(&adjusted) >= 25, "len {len}: {adjusted:?}");
        }
    }

    #[test]
    fn test_adjust_length_is_identity_within_band() {
        let text = "Tênis leves para maratona";
        assert_eq!(char_len(text), 25);
        let (adjusted, warning) = adjust_length_checked(text, 30, 25);
        assert_eq!(adjusted, text);
        assert!(warning.is_none());
    }

    #[test]
    fn test_adjust_length_collapses_whitespace() {
        let (adjusted, warning) =
            adjust_length_checked("  Tênis   leves\tpara \n maratona  ", 30, 25);
        assert_eq!(adjusted, "Tênis leves para maratona");
        assert!(warning.is_none());
    }

    #[test]
    fn test_adjust_length_short_text_is_not_padded() {
        let (adjusted, warning) = adjust_length_checked("Frete grátis", 30, 25);
        assert_eq!(adjusted, "Frete grátis");
        assert_eq!(
            warning,
            Some(LengthWarning::TooShort {
                length: 12,
                minimum: 25
            })
        );
    }

    #[test]
    fn test_adjust_length_counts_characters_not_bytes() {
        // 30 accented characters is well over 30 bytes but within budget.
        let text = "ééééé ééééé ééééé ééééé éééééé";
        assert_eq!(char_len(text), 30);
        assert_eq!(adjust_length(text, 30, 25), text);
    }

    #[test]
    fn test_adjust_length_empty_input() {
        let (adjusted, warning) = adjust_length_checked("", 30, 25);
        assert_eq!(adjusted, "");
        assert!(matches!(warning, Some(LengthWarning::TooShort { length: 0, .. })));
    }

    #[test]
    fn test_parse_response_empty_string() {
        let content = parse_response("", CampaignType::Pmax);
        assert_eq!(content, GeneratedAdContent::default());
    }

    #[test]
    fn test_parse_response_without_labels() {
        let raw = "Desculpe, não posso ajudar.\nTente novamente.";
        let content = parse_response(raw, CampaignType::Search);
        assert!(content.keywords.is_empty());
        assert!(content.headlines.is_empty());
        assert!(content.long_titles.is_empty());
        assert!(content.descriptions.is_empty());
    }

    #[test]
    fn test_parse_response_search_with_fifteen_headlines() {
        let mut raw = String::from("Palavras-chave: tênis de corrida, maratona, running\n");
        for i in 1..=15 {
            raw.push_str(&format!(
                "Headline {i}: Tênis de corrida com frete grátis número {i}\n"
            ));
        }
        raw.push_str("Título longo 1: Só aparece em campanhas de performance max, nunca em pesquisa\n");
        for i in 1..=4 {
            raw.push_str(&format!(
                "Descrição {i}: Tênis com amortecimento para treinos longos e provas. Compre já e receba em casa.\n"
            ));
        }

        let content = parse_response(&raw, CampaignType::Search);
        assert_eq!(content.keywords, "tênis de corrida, maratona, running");
        assert_eq!(content.headlines.len(), 15);
        assert!(content.headlines.iter().all(|h| char_len(h) <= 30));
        assert!(content.long_titles.is_empty());
        assert_eq!(content.descriptions.len(), 4);
        assert!(content.descriptions.iter().all(|d| char_len(d) <= 90));
    }

    #[test]
    fn test_parse_response_pmax_long_titles() {
        let title =
            "Tênis de corrida com amortecimento premium, frete grátis e troca fácil para todo o Brasil";
        assert!((70..=90).contains(&char_len(title)));
        let mut raw = String::new();
        for i in 1..=5 {
            raw.push_str(&format!("Título longo {i}: {title}\n"));
        }

        let content = parse_response(&raw, CampaignType::Pmax);
        assert_eq!(content.long_titles.len(), 5);
        assert!(content
            .long_titles
            .iter()
            .all(|t| (70..=90).contains(&char_len(t))));
    }

    #[test]
    fn test_parse_response_keeps_text_after_second_colon() {
        let raw = "Headline 1: Oferta: tênis 50% off hoje";
        let content = parse_response(raw, CampaignType::Search);
        assert_eq!(content.headlines, vec!["Oferta: tênis 50% off hoje"]);
    }

    #[test]
    fn test_parse_response_skips_headings_and_markdown() {
        let raw = "Headlines:\n\
                   **Headline 1:** Tênis leves para sua maratona\n\
                   - Headline 2: Corra mais com conforto total\n\
                   Headline sem dois pontos\n\
                   Descrições:";
        let content = parse_response(raw, CampaignType::Search);
        assert_eq!(
            content.headlines,
            vec!["Tênis leves para sua maratona", "Corra mais com conforto total"]
        );
        assert!(content.descriptions.is_empty());
    }

    #[test]
    fn test_parse_response_strips_bold_keyword_label() {
        let raw = "**Palavras-chave:** tênis, corrida";
        assert_eq!(
            parse_response(raw, CampaignType::Search).keywords,
            "tênis, corrida"
        );
    }

    #[test]
    fn test_parse_response_uses_first_keyword_line() {
        let raw = "Palavras-chave:  a, b \nPalavras-chave: c, d";
        assert_eq!(parse_response(raw, CampaignType::Search).keywords, "a, b");
    }

    #[test]
    fn test_parse_response_tolerates_crlf() {
        let raw = "Headline 1: Tênis leves para sua maratona\r\n\
                   Headline 2: Corra mais com conforto total\r\n";
        let content = parse_response(raw, CampaignType::Search);
        assert_eq!(content.headlines.len(), 2);
        assert_eq!(content.headlines[0], "Tênis leves para sua maratona");
    }

    #[test]
    fn test_parse_response_accepts_fenced_json() {
        let raw = r#"```json
{
  "keywords": ["tênis", "corrida", " "],
  "headlines": ["Compre já os melhores tênis de corrida hoje"],
  "longTitles": ["ignored for search"],
  "descriptions": ["Tênis com amortecimento para treinos longos e provas. Compre já e receba em casa."]
}
```"#;
        let content = parse_response(raw, CampaignType::Search);
        assert_eq!(content.keywords, "tênis, corrida");
        assert_eq!(content.headlines, vec!["Compre já os melhores tênis de"]);
        assert!(content.long_titles.is_empty());
        assert_eq!(content.descriptions.len(), 1);
    }

    #[test]
    fn test_parse_response_malformed_json_falls_back_to_lines() {
        let raw = "{ not json\nHeadline 1: Tênis leves para sua maratona";
        let content = parse_response(raw, CampaignType::Search);
        assert_eq!(content.headlines, vec!["Tênis leves para sua maratona"]);
    }
}
