//! Configuration loading and management for the Break Placement Engine.
//!
//! This module provides functionality to load break rulesets from YAML files:
//! ruleset metadata plus one file per candidate break rule.
//!
//! # Example
//!
//! ```no_run
//! use break_engine::config::RulesetLoader;
//!
//! let loader = RulesetLoader::load("./config/standard").unwrap();
//! println!("Loaded ruleset: {}", loader.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::RulesetLoader;
pub use types::{RulesetConfig, RulesetMetadata};
