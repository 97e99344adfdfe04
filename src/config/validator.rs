use crate::config::Config;
use crate::error::{Result, SiftError, ValidationError};
use chrono::NaiveDate;
use std::fmt::Write as _;

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration
    pub fn validate(config: &Config) -> Result<()> {
        let mut errors = Vec::new();

        Self::validate_retrieval(config, &mut errors);
        Self::validate_embedding(config, &mut errors);
        Self::validate_reranker(config, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SiftError::ConfigValidation { errors })
        }
    }

    fn validate_retrieval(config: &Config, errors: &mut Vec<ValidationError>) {
        let retrieval = &config.retrieval;

        if !(0.0..=1.0).contains(&retrieval.default_text_weight) {
            errors.push(ValidationError::new(
                "retrieval.default_text_weight",
                format!(
                    "Weight must be between 0.0 and 1.0, got {}",
                    retrieval.default_text_weight
                ),
            ));
        }

        if retrieval.search_multiplier < 2 {
            errors.push(ValidationError::new(
                "retrieval.search_multiplier",
                "Search multiplier must be at least 2 so the combiner has room to filter",
            ));
        }

        if retrieval.rerank_content_cap == 0 {
            errors.push(ValidationError::new(
                "retrieval.rerank_content_cap",
                "Rerank content cap must be greater than 0",
            ));
        }

        if retrieval.tag_prefix.is_empty() {
            errors.push(ValidationError::new(
                "retrieval.tag_prefix",
                "Tag prefix cannot be empty",
            ));
        }

        // A format that cannot round-trip a known date will never match a
        // daily-note title. Rendering goes through write! because chrono's
        // DelayedFormat panics on to_string() for bad specifiers.
        let probe = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap_or_default();
        let mut rendered = String::new();
        let renders = write!(rendered, "{}", probe.format(&retrieval.daily_note_format)).is_ok();
        if !renders || NaiveDate::parse_from_str(&rendered, &retrieval.daily_note_format).is_err() {
            errors.push(ValidationError::new(
                "retrieval.daily_note_format",
                format!("Invalid date format: {}", retrieval.daily_note_format),
            ));
        }
    }

    fn validate_embedding(config: &Config, errors: &mut Vec<ValidationError>) {
        if config.embedding.model.is_empty() {
            errors.push(ValidationError::new(
                "embedding.model",
                "Model name cannot be empty",
            ));
        }
    }

    fn validate_reranker(config: &Config, errors: &mut Vec<ValidationError>) {
        if config.reranker.model.is_empty() {
            errors.push(ValidationError::new(
                "reranker.model",
                "Model name cannot be empty",
            ));
        }
    }
}
