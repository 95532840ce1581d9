//! Agent configuration, stored as JSON

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::carry::CaptureRule;
use crate::error::HexflagError;
use crate::eval::RatioWeights;
use crate::strategy::intercept::InterceptConfig;
use crate::strategy::StrategyKind;

/// Seed used when none is configured
pub const DEFAULT_SEED: u64 = 42;

/// Everything needed to build an agent besides its team
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub strategy: StrategyKind,
    /// RNG seed; `None` means `DEFAULT_SEED`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub capture_rule: CaptureRule,
    pub intercept: InterceptConfig,
    pub ratio: RatioWeights,
}

impl AgentConfig {
    pub fn new(strategy: StrategyKind) -> Self {
        Self {
            strategy,
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_capture_rule(mut self, rule: CaptureRule) -> Self {
        self.capture_rule = rule;
        self
    }

    pub fn seed_or_default(&self) -> u64 {
        self.seed.unwrap_or(DEFAULT_SEED)
    }

    pub fn load(path: &Path) -> Result<Self, HexflagError> {
        let content = std::fs::read_to_string(path).map_err(|e| HexflagError::io(path, e))?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), HexflagError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| HexflagError::io(path, e))
    }
}

// ============================================================================
// TESTS
// ============================================================================
