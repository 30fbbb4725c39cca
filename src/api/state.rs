//! Application state for the Break Placement Engine API.

use std::sync::Arc;

use crate::calculation::BreakPlanner;
use crate::config::RulesetLoader;

/// Shared application state.
///
/// Holds the loaded ruleset and a planner built from it. Both are shared
/// read-only across request handlers.
#[derive(Clone)]
pub struct AppState {
    ruleset: Arc<RulesetLoader>,
    planner: Arc<BreakPlanner>,
}

impl AppState {
    /// Creates a new application state from a loaded ruleset.
    pub fn new(ruleset: RulesetLoader) -> Self {
        let planner = BreakPlanner::from_loader(&ruleset);
        Self {
            ruleset: Arc::new(ruleset),
            planner: Arc::new(planner),
        }
    }

    /// Returns the loaded ruleset.
    pub fn ruleset(&self) -> &RulesetLoader {
        &self.ruleset
    }

    /// Returns the planner for the loaded ruleset.
    pub fn planner(&self) -> &BreakPlanner {
        &self.planner
    }
}
