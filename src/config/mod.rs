//! Configuration module for Ripple-Core
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files, and building the configured stages from them.
//!
//! # Example
//!
//! ```no_run
//! use ripple_core::config::{build_analyzer, load_config};
//! use std::path::Path;
//!
//! let config = load_config(Path::new("ripple.toml")).unwrap();
//! let analyzer = build_analyzer(&config).unwrap();
//! println!("Analyzer {} runs {} parsers", analyzer.id(), analyzer.parsers().len());
//! ```

mod builder;
mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{AnalyzerConfig, Config, PipelineConfig, ScoreConfig, ScoreStrategy};

// Re-export parser and builder functions
pub use builder::{build_analyzer, build_pipeline, build_pipeline_with_sink};
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
