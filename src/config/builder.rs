use crate::analyzer::{parser_by_name, Analyzer};
use crate::config::types::Config;
use crate::pipeline::{processor_by_name, ItemSink, Pipeline, ProcessItem};
use crate::{ConfigError, Result};

/// Builds the analyzer described by `config`
///
/// Parser names are resolved against the built-in parsers.
pub fn build_analyzer(config: &Config) -> Result<Analyzer> {
    let parsers = config
        .analyzer
        .parsers
        .iter()
        .map(|name| parser_by_name(name).ok_or_else(|| ConfigError::UnknownParser(name.clone())))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let analyzer = Analyzer::new(
        config.analyzer.id.as_str(),
        parsers.into_iter().map(Some).collect(),
        Some(config.score.calculator()),
    )?;

    tracing::debug!(
        "Built analyzer {} with parsers {:?}",
        analyzer.id(),
        config.analyzer.parsers
    );
    Ok(analyzer)
}

/// Builds the pipeline described by `config`, with its fail-fast flag set
pub fn build_pipeline(config: &Config) -> Result<Pipeline> {
    build_pipeline_with(config, None)
}

/// Builds the configured pipeline with `sink`'s processor appended last
///
/// # Arguments
///
/// * `config` - The loaded configuration
/// * `sink` - Receives every item that gets through the whole chain
///
/// # Returns
///
/// * `Ok(Pipeline)` - A pipeline with one more processor than configured
/// * `Err(RippleError)` - An unknown processor name or an invalid list
pub fn build_pipeline_with_sink(config: &Config, sink: &ItemSink) -> Result<Pipeline> {
    build_pipeline_with(config, Some(sink.processor()))
}

fn build_pipeline_with(config: &Config, last: Option<ProcessItem>) -> Result<Pipeline> {
    let pipeline_config = &config.pipeline;
    let mut processors = pipeline_config
        .processors
        .iter()
        .map(|name| {
            processor_by_name(name, &pipeline_config.required_fields)
                .ok_or_else(|| ConfigError::UnknownProcessor(name.clone()))
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    // An empty configured list is still rejected
    if !processors.is_empty() {
        processors.extend(last);
    }

    let pipeline = Pipeline::new(
        pipeline_config.id.as_str(),
        processors.into_iter().map(Some).collect(),
        Some(config.score.calculator()),
    )?;
    pipeline.set_fail_fast(pipeline_config.fail_fast);

    tracing::debug!(
        "Built pipeline {} with processors {:?} (fail-fast: {})",
        pipeline.id(),
        pipeline_config.processors,
        pipeline_config.fail_fast
    );
    Ok(pipeline)
}
