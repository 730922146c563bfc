//! Ripple-Core: the processing stages of a modular web crawler
//!
//! This crate turns already-fetched responses into extracted data and pushes
//! extracted items through a chain of processors. Fetching, scheduling,
//! deduplication and persistence live outside of it.

pub mod analyzer;
pub mod config;
pub mod data;
pub mod module;
pub mod output;
pub mod pipeline;
pub mod reader;

use std::fmt;
use thiserror::Error;

/// The component an error originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Analyzer,
    Pipeline,
    Other,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Analyzer => "analyzer",
            Self::Pipeline => "pipeline",
            Self::Other => "other",
        };
        f.write_str(name)
    }
}

/// An absent or invalid input: response, item, body or configuration entry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("illegal parameter: {0}")]
pub struct ParameterError(pub String);

impl ParameterError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

/// Error reported by a crawl stage, returned as a value next to any output
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CrawlError {
    #[error("crawler error: {kind} error: {message}")]
    Processing { kind: ErrorKind, message: String },

    #[error("crawler error: {kind} error: {source}")]
    Parameter {
        kind: ErrorKind,
        #[source]
        source: ParameterError,
    },
}

impl CrawlError {
    /// Creates a processing error for the given component
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self::Processing {
            kind,
            message: message.into(),
        }
    }

    /// Creates a parameter error for the given component
    pub fn parameter(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self::Parameter {
            kind,
            source: ParameterError::new(message),
        }
    }

    pub fn analyzer(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Analyzer, message)
    }

    pub fn pipeline(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Pipeline, message)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Processing { kind, .. } | Self::Parameter { kind, .. } => *kind,
        }
    }

    /// Returns true if this wraps a parameter validation failure
    pub fn is_parameter(&self) -> bool {
        matches!(self, Self::Parameter { .. })
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unknown response parser: {0}")]
    UnknownParser(String),

    #[error("Unknown item processor: {0}")]
    UnknownProcessor(String),
}

/// Main error type for application-level operations
#[derive(Debug, Error)]
pub enum RippleError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Crawl(#[from] CrawlError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),
}

/// Result type alias for application-level operations
pub type Result<T> = std::result::Result<T, RippleError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use analyzer::{Analyzer, ParseOutput, ParseResponse};
pub use config::Config;
pub use data::{Data, Item, RawRequest, RawResponse, Request, Response};
pub use module::{CalculateScore, Counts, ModuleBase, ModuleId, ModuleSummary};
pub use pipeline::{Pipeline, PipelineSummary, ProcessItem};
pub use reader::ReplayReader;
