//! Configuration types for break rulesets.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use serde::{Deserialize, Serialize};

use crate::models::BreakRule;

/// Metadata about a ruleset.
///
/// Contains identifying information such as the ruleset code, name, and
/// version, read from `ruleset.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesetMetadata {
    /// Short code identifying the ruleset (e.g., "STANDARD").
    pub code: String,
    /// The human-readable name of the ruleset.
    pub name: String,
    /// The version or effective date of the ruleset.
    pub version: String,
    /// Optional longer description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A complete ruleset: metadata plus candidate rules in file order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesetConfig {
    /// Ruleset metadata.
    metadata: RulesetMetadata,
    /// Candidate rules, in the order their files sort by name.
    rules: Vec<BreakRule>,
}

impl RulesetConfig {
    /// Creates a new RulesetConfig from its component parts.
    ///
    /// Rule order is kept as given; it decides ties during rule selection.
    pub fn new(metadata: RulesetMetadata, rules: Vec<BreakRule>) -> Self {
        Self { metadata, rules }
    }

    /// Returns the ruleset metadata.
    pub fn metadata(&self) -> &RulesetMetadata {
        &self.metadata
    }

    /// Returns all rules.
    pub fn rules(&self) -> &[BreakRule] {
        &self.rules
    }
}
