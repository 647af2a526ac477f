//! Configuration module for Kumo
//!
//! A [`CrawlConfig`] can come from CLI flags or from a TOML file; either
//! way it is validated before a crawl starts and stays read-only for the
//! run's duration.

pub mod blacklist;
mod parser;
mod types;
mod validation;

pub use blacklist::parse_blacklist_input;
pub use parser::load_config;
pub use types::{CrawlConfig, DEFAULT_BLACKLIST_EXTENSIONS};
pub use validation::validate;
