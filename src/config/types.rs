use crate::lang::Grammar;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub grammar: Grammar,
    #[serde(default = "default_true")]
    pub autojunk: bool,
    #[serde(default = "default_max_lcs_cells")]
    pub max_lcs_cells: u64,
    #[serde(default = "default_max_ratio_steps")]
    pub max_ratio_steps: u64,
    #[serde(default = "default_max_tree_nodes")]
    pub max_tree_nodes: usize,
    // 0 disables the cache
    #[serde(default = "default_cache_capacity")]
    pub lcs_cache_capacity: usize,
    #[serde(default = "default_true")]
    pub parallel: bool,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            grammar: Grammar::default(),
            autojunk: true,
            max_lcs_cells: default_max_lcs_cells(),
            max_ratio_steps: default_max_ratio_steps(),
            max_tree_nodes: default_max_tree_nodes(),
            lcs_cache_capacity: default_cache_capacity(),
            parallel: true,
        }
    }
}

const fn default_true() -> bool { true }
// 5000 x 5000 characters
const fn default_max_lcs_cells() -> u64 { 25_000_000 }
const fn default_max_ratio_steps() -> u64 { 50_000_000 }
const fn default_max_tree_nodes() -> usize { 200_000 }
const fn default_cache_capacity() -> usize { 1024 }

/// On-disk layout of `codematch.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CodematchToml {
    #[serde(default)]
    pub scoring: ScoringConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub verbose: bool,
}
