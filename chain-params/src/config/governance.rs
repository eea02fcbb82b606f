//! Governance configuration
//!
//! Reward and fee values are carried verbatim; nothing in this crate
//! interprets them beyond defaulting.

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::address::Address;
use crate::constants::*;

/// How parameter changes are voted on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GovernanceMode {
    #[default]
    None,
    Single,
    Ballot,
}

impl fmt::Display for GovernanceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::None => "none",
            Self::Single => "single",
            Self::Ballot => "ballot",
        };
        f.write_str(s)
    }
}

/// Governance sub-config
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GovernanceConfig {
    #[serde(default)]
    pub governing_node: Address,
    #[serde(default)]
    pub governance_mode: GovernanceMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reward: Option<RewardConfig>,
    #[serde(rename = "kip71", default, skip_serializing_if = "Option::is_none")]
    pub kip71: Option<Kip71Config>,
}

impl GovernanceConfig {
    /// Governance with every nested section filled with defaults
    pub fn with_defaults() -> Self {
        Self {
            reward: Some(RewardConfig::default()),
            kip71: Some(Kip71Config::default()),
            ..Default::default()
        }
    }
}

/// Block reward parameters; missing keys take the values from `Default`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RewardConfig {
    #[serde(with = "super::bigint")]
    pub minting_amount: BigUint,
    pub ratio: String,
    #[serde(rename = "kip82ratio", skip_serializing_if = "Option::is_none")]
    pub kip82_ratio: Option<String>,
    pub use_gini_coeff: bool,
    pub deferred_tx_fee: bool,
    pub staking_update_interval: u64,
    pub proposer_update_interval: u64,
    #[serde(with = "super::bigint")]
    pub minimum_stake: BigUint,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            minting_amount: BigUint::from(DEFAULT_MINTING_AMOUNT),
            ratio: DEFAULT_REWARD_RATIO.to_string(),
            kip82_ratio: Some(DEFAULT_KIP82_RATIO.to_string()),
            use_gini_coeff: false,
            deferred_tx_fee: false,
            staking_update_interval: DEFAULT_STAKING_UPDATE_INTERVAL,
            proposer_update_interval: DEFAULT_PROPOSER_REFRESH_INTERVAL,
            minimum_stake: BigUint::from(DEFAULT_MINIMUM_STAKE),
        }
    }
}

/// KIP-71 dynamic base fee parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Kip71Config {
    pub lower_bound_base_fee: u64,
    pub upper_bound_base_fee: u64,
    pub gas_target: u64,
    pub max_block_gas_used_for_base_fee: u64,
    pub base_fee_denominator: u64,
}

impl Default for Kip71Config {
    fn default() -> Self {
        Self {
            lower_bound_base_fee: DEFAULT_LOWER_BOUND_BASE_FEE,
            upper_bound_base_fee: DEFAULT_UPPER_BOUND_BASE_FEE,
            gas_target: DEFAULT_GAS_TARGET,
            max_block_gas_used_for_base_fee: DEFAULT_MAX_BLOCK_GAS_USED_FOR_BASE_FEE,
            base_fee_denominator: DEFAULT_BASE_FEE_DENOMINATOR,
        }
    }
}
