//! Configuration module for Imovel-Radar
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. The config file is optional: with no file, the built-in defaults
//! (the public OLX listing for João Pessoa, 5 pages, 1 s between ads) apply.
//!
//! # Example
//!
//! ```no_run
//! use imovel_radar::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Crawling up to {} pages", config.crawler.max_pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, HttpConfig, OutputConfig};

// Re-export parser functions
pub use parser::{load_config, load_config_or_default};
