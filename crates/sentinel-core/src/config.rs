use serde::{Deserialize, Serialize};

/// Which strategy groups the engine evaluates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StrategySet {
    /// Accelerator, core-systems, leverage, paradigm.
    Tech,
    /// Tech strategies followed by the skills / interview / resource group.
    #[default]
    TechAndTalent,
}

impl StrategySet {
    pub fn includes_talent(&self) -> bool {
        matches!(self, StrategySet::TechAndTalent)
    }
}

/// Numeric gates used by the structural strategies. Both are strict `>`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Thresholds {
    /// Leverage signal requires `forks > leverage_min_forks`.
    pub leverage_min_forks: u64,
    /// Paradigm signal additionally requires `stars > n` when set.
    pub paradigm_min_stars: Option<u64>,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            leverage_min_forks: 20,
            paradigm_min_stars: None,
        }
    }
}

/// Classifier behaviour toggles.
///
/// The default is the full-spectrum variant: tech and talent strategies,
/// no noise exclusion, fallback tagging on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ClassifierConfig {
    pub noise_filter: bool,
    pub fallback_tag: bool,
    pub strategy_set: StrategySet,
    pub thresholds: Thresholds,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            noise_filter: false,
            fallback_tag: true,
            strategy_set: StrategySet::TechAndTalent,
            thresholds: Thresholds::default(),
        }
    }
}

impl ClassifierConfig {
    /// Tech-only variant: noise excluded, unmatched candidates dropped,
    /// tighter fork gate and a star gate on the paradigm signal.
    pub fn strict() -> Self {
        Self {
            noise_filter: true,
            fallback_tag: false,
            strategy_set: StrategySet::Tech,
            thresholds: Thresholds {
                leverage_min_forks: 30,
                paradigm_min_stars: Some(100),
            },
        }
    }
}
