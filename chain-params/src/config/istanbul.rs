//! Istanbul BFT engine configuration

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{DEFAULT_EPOCH, DEFAULT_SUB_GROUP_SIZE};

/// Proposer selection policy, encoded as an integer on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub enum ProposerPolicy {
    #[default]
    RoundRobin,
    Sticky,
    WeightedRandom,
}

impl TryFrom<u64> for ProposerPolicy {
    type Error = String;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::RoundRobin),
            1 => Ok(Self::Sticky),
            2 => Ok(Self::WeightedRandom),
            other => Err(format!("unknown proposer policy {}", other)),
        }
    }
}

impl From<ProposerPolicy> for u64 {
    fn from(policy: ProposerPolicy) -> Self {
        match policy {
            ProposerPolicy::RoundRobin => 0,
            ProposerPolicy::Sticky => 1,
            ProposerPolicy::WeightedRandom => 2,
        }
    }
}

impl fmt::Display for ProposerPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::RoundRobin => "round-robin",
            Self::Sticky => "sticky",
            Self::WeightedRandom => "weighted-random",
        };
        f.write_str(s)
    }
}

/// Consensus engine parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IstanbulConfig {
    /// Blocks after which votes are reset
    #[serde(default = "default_epoch")]
    pub epoch: u64,
    #[serde(default)]
    pub policy: ProposerPolicy,
    /// Committee size
    #[serde(rename = "sub", alias = "size", default = "default_sub_group_size")]
    pub sub_group_size: u64,
}

fn default_epoch() -> u64 {
    DEFAULT_EPOCH
}

fn default_sub_group_size() -> u64 {
    DEFAULT_SUB_GROUP_SIZE
}

impl Default for IstanbulConfig {
    fn default() -> Self {
        Self {
            epoch: default_epoch(),
            policy: ProposerPolicy::default(),
            sub_group_size: default_sub_group_size(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_wire_format() {
        let cfg = IstanbulConfig {
            policy: ProposerPolicy::WeightedRandom,
            ..Default::default()
        };
        let json = serde_json::to_value(&cfg).unwrap();
        assert_eq!(json["policy"], 2);
        assert_eq!(json["sub"], 21);

        let bad = serde_json::from_str::<IstanbulConfig>(r#"{"policy":7}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_committee_size_key() {
        let cfg: IstanbulConfig = serde_json::from_str(r#"{"sub":22}"#).unwrap();
        assert_eq!(cfg.sub_group_size, 22);

        let legacy: IstanbulConfig = serde_json::from_str(r#"{"size":7}"#).unwrap();
        assert_eq!(legacy.sub_group_size, 7);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let cfg: IstanbulConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, IstanbulConfig::default());
    }
}
