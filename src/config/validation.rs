use crate::analyzer::parser_by_name;
use crate::config::types::{AnalyzerConfig, Config, PipelineConfig, ScoreConfig, ScoreStrategy};
use crate::pipeline::processor_by_name;
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_analyzer_config(&config.analyzer)?;
    validate_pipeline_config(&config.pipeline)?;
    validate_score_config(&config.score)?;
    Ok(())
}

fn validate_analyzer_config(config: &AnalyzerConfig) -> Result<(), ConfigError> {
    validate_id("analyzer", &config.id)?;

    if config.parsers.is_empty() {
        return Err(ConfigError::Validation(
            "analyzer must list at least one parser".to_string(),
        ));
    }

    for name in &config.parsers {
        if parser_by_name(name).is_none() {
            return Err(ConfigError::UnknownParser(name.clone()));
        }
    }

    Ok(())
}

fn validate_pipeline_config(config: &PipelineConfig) -> Result<(), ConfigError> {
    validate_id("pipeline", &config.id)?;

    if config.processors.is_empty() {
        return Err(ConfigError::Validation(
            "pipeline must list at least one processor".to_string(),
        ));
    }

    for name in &config.processors {
        if processor_by_name(name, &config.required_fields).is_none() {
            return Err(ConfigError::UnknownProcessor(name.clone()));
        }
    }

    let requires_fields = config.processors.iter().any(|name| name == "require-fields");
    if requires_fields && config.required_fields.is_empty() {
        return Err(ConfigError::Validation(
            "require-fields processor needs a non-empty required-fields list".to_string(),
        ));
    }

    if config.required_fields.iter().any(|field| field.is_empty()) {
        return Err(ConfigError::Validation(
            "required-fields cannot contain empty names".to_string(),
        ));
    }

    Ok(())
}

fn validate_score_config(config: &ScoreConfig) -> Result<(), ConfigError> {
    if config.strategy == ScoreStrategy::Weighted && config.weights.is_zero() {
        return Err(ConfigError::Validation(
            "weighted score strategy needs at least one non-zero weight".to_string(),
        ));
    }
    Ok(())
}

fn validate_id(scope: &str, id: &str) -> Result<(), ConfigError> {
    if id.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{} id cannot be empty", scope)));
    }
    Ok(())
}
