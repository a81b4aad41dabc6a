// Ad Generation
// Implements: prompt building, competitor keyword scraping, LLM generation, response normalization.
// All LLM calls go through llm_client — no direct Anthropic API calls here.

pub mod cta;
pub mod generator;
pub mod handlers;
pub mod normalizer;
pub mod prompt_builder;
pub mod prompts;
pub mod scraper;
