//! Ruleset loading functionality.
//!
//! This module provides the [`RulesetLoader`] type for loading break rulesets
//! from YAML files.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::BreakRule;

use super::types::{RulesetConfig, RulesetMetadata};

/// Loads and provides access to a break ruleset.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/standard/
/// ├── ruleset.yaml              # Ruleset metadata
/// └── rules/
///     ├── 01_standard_day.yaml  # One break rule per file
///     └── 02_short_shift.yaml
/// ```
///
/// Rule files are read in file name order. That order is the candidate order
/// used to break ties during rule selection.
///
/// # Example
///
/// ```no_run
/// use break_engine::config::RulesetLoader;
///
/// let loader = RulesetLoader::load("./config/standard").unwrap();
/// let rule = loader.get_rule("standard_day").unwrap();
/// println!("{} breaks totalling {} minutes", rule.break_count, rule.total_break_minutes);
/// ```
#[derive(Debug, Clone)]
pub struct RulesetLoader {
    config: RulesetConfig,
}

impl RulesetLoader {
    /// Loads a ruleset from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `RulesetLoader` on success, or an error if:
    /// - `ruleset.yaml` or the `rules` directory is missing
    /// - The `rules` directory contains no YAML files
    /// - Any file contains invalid YAML or an invalid `HH:MM` duration
    /// - Two rule files declare the same rule id
    ///
    /// # Example
    ///
    /// ```no_run
    /// use break_engine::config::RulesetLoader;
    ///
    /// let loader = RulesetLoader::load("./config/standard")?;
    /// # Ok::<(), break_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<RulesetMetadata>(&path.join("ruleset.yaml"))?;
        let rules = Self::load_rules(&path.join("rules"))?;

        debug!(
            ruleset = %metadata.code,
            rules = rules.len(),
            "Loaded break ruleset"
        );

        Ok(Self {
            config: RulesetConfig::new(metadata, rules),
        })
    }

    /// Wraps an already-built ruleset.
    pub fn from_config(config: RulesetConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all rule files from the rules directory, sorted by file name.
    fn load_rules(rules_dir: &Path) -> EngineResult<Vec<BreakRule>> {
        let rules_dir_str = rules_dir.display().to_string();

        if !rules_dir.exists() {
            return Err(EngineError::ConfigNotFound {
                path: rules_dir_str,
            });
        }

        let entries = fs::read_dir(rules_dir).map_err(|_| EngineError::ConfigNotFound {
            path: rules_dir_str.clone(),
        })?;

        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: rules_dir_str.clone(),
            })?;

            let path = entry.path();
            if path
                .extension()
                .is_some_and(|ext| ext == "yaml" || ext == "yml")
            {
                paths.push(path);
            }
        }
        paths.sort();

        if paths.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no rule files found)", rules_dir_str),
            });
        }

        let mut seen = HashSet::new();
        let mut rules = Vec::with_capacity(paths.len());
        for path in paths {
            let rule = Self::load_yaml::<BreakRule>(&path)?;
            if !seen.insert(rule.id.clone()) {
                return Err(EngineError::DuplicateRule {
                    id: rule.id,
                    path: path.display().to_string(),
                });
            }
            rules.push(rule);
        }

        Ok(rules)
    }

    /// Returns the underlying ruleset configuration.
    pub fn config(&self) -> &RulesetConfig {
        &self.config
    }

    /// Returns the ruleset metadata.
    pub fn metadata(&self) -> &RulesetMetadata {
        self.config.metadata()
    }

    /// Returns all rules in candidate order.
    pub fn rules(&self) -> &[BreakRule] {
        self.config.rules()
    }

    /// Gets a rule by its id.
    ///
    /// # Returns
    ///
    /// Returns the rule if found, or `RuleNotFound`.
    pub fn get_rule(&self, id: &str) -> EngineResult<&BreakRule> {
        self.rules()
            .iter()
            .find(|rule| rule.id == id)
            .ok_or_else(|| EngineError::RuleNotFound { id: id.to_string() })
    }
}
