//! Fork Catalog
//!
//! The fixed, total order of named protocol upgrades. The order is identical
//! for every configuration; only the activation thresholds differ.

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A named, height-triggered protocol upgrade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Fork {
    Istanbul,
    London,
    EthTxType,
    Magma,
    Kore,
    Shanghai,
    Cancun,
    /// Optional: chains without on-chain randomness never schedule it
    Randao,
    Kaia,
    Prague,
    Osaka,
    /// Blob-parameter-only forks, all optional
    Bpo1,
    Bpo2,
    Bpo3,
    Bpo4,
    Bpo5,
}

impl Fork {
    /// Number of forks in the catalog
    pub const COUNT: usize = 16;

    /// Every fork, in activation order
    pub const ALL: [Fork; Fork::COUNT] = [
        Fork::Istanbul,
        Fork::London,
        Fork::EthTxType,
        Fork::Magma,
        Fork::Kore,
        Fork::Shanghai,
        Fork::Cancun,
        Fork::Randao,
        Fork::Kaia,
        Fork::Prague,
        Fork::Osaka,
        Fork::Bpo1,
        Fork::Bpo2,
        Fork::Bpo3,
        Fork::Bpo4,
        Fork::Bpo5,
    ];

    /// Forks that change blob parameters, in activation order
    pub const BLOB_FORKS: [Fork; 6] = [
        Fork::Osaka,
        Fork::Bpo1,
        Fork::Bpo2,
        Fork::Bpo3,
        Fork::Bpo4,
        Fork::Bpo5,
    ];

    /// Position in the catalog
    pub fn index(self) -> usize {
        self as usize
    }

    /// Human-readable name used in errors and logs
    pub fn name(self) -> &'static str {
        match self {
            Fork::Istanbul => "Istanbul",
            Fork::London => "London",
            Fork::EthTxType => "EthTxType",
            Fork::Magma => "Magma",
            Fork::Kore => "Kore",
            Fork::Shanghai => "Shanghai",
            Fork::Cancun => "Cancun",
            Fork::Randao => "Randao",
            Fork::Kaia => "Kaia",
            Fork::Prague => "Prague",
            Fork::Osaka => "Osaka",
            Fork::Bpo1 => "BPO1",
            Fork::Bpo2 => "BPO2",
            Fork::Bpo3 => "BPO3",
            Fork::Bpo4 => "BPO4",
            Fork::Bpo5 => "BPO5",
        }
    }

    /// Field name of the threshold in the persisted configuration
    pub fn json_key(self) -> &'static str {
        match self {
            Fork::Istanbul => "istanbulCompatibleBlock",
            Fork::London => "londonCompatibleBlock",
            Fork::EthTxType => "ethTxTypeCompatibleBlock",
            Fork::Magma => "magmaCompatibleBlock",
            Fork::Kore => "koreCompatibleBlock",
            Fork::Shanghai => "shanghaiCompatibleBlock",
            Fork::Cancun => "cancunCompatibleBlock",
            Fork::Randao => "randaoCompatibleBlock",
            Fork::Kaia => "kaiaCompatibleBlock",
            Fork::Prague => "pragueCompatibleBlock",
            Fork::Osaka => "osakaCompatibleBlock",
            Fork::Bpo1 => "bpo1Block",
            Fork::Bpo2 => "bpo2Block",
            Fork::Bpo3 => "bpo3Block",
            Fork::Bpo4 => "bpo4Block",
            Fork::Bpo5 => "bpo5Block",
        }
    }

    /// Optional forks may be left unscheduled without breaking the order of
    /// the mandatory forks that follow them
    pub fn is_optional(self) -> bool {
        matches!(
            self,
            Fork::Randao | Fork::Bpo1 | Fork::Bpo2 | Fork::Bpo3 | Fork::Bpo4 | Fork::Bpo5
        )
    }

    /// Whether this fork carries its own blob parameters
    pub fn is_blob_fork(self) -> bool {
        Self::BLOB_FORKS.contains(&self)
    }

    /// Parse a fork from its name or persisted key (case-insensitive)
    pub fn from_name(s: &str) -> Option<Self> {
        let needle = s.trim().to_lowercase();
        Self::ALL.iter().copied().find(|fork| {
            fork.name().to_lowercase() == needle || fork.json_key().to_lowercase() == needle
        })
    }
}

impl fmt::Display for Fork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One catalog entry as seen through a specific configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForkPoint<'a> {
    pub fork: Fork,
    /// `None` means the upgrade is not scheduled
    pub threshold: Option<&'a BigUint>,
    pub optional: bool,
}

impl<'a> ForkPoint<'a> {
    pub fn new(fork: Fork, threshold: Option<&'a BigUint>) -> Self {
        Self {
            fork,
            threshold,
            optional: fork.is_optional(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.fork.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_indices_match_order() {
        for (i, fork) in Fork::ALL.iter().enumerate() {
            assert_eq!(fork.index(), i);
        }
    }

    #[test]
    fn test_blob_forks_are_in_catalog_order() {
        let positions: Vec<usize> = Fork::BLOB_FORKS.iter().map(|f| f.index()).collect();
        let mut sorted = positions.clone();
        sorted.sort();
        assert_eq!(positions, sorted);
        assert!(Fork::Osaka.is_blob_fork());
        assert!(!Fork::Cancun.is_blob_fork());
    }

    #[test]
    fn test_optional_forks() {
        assert!(Fork::Randao.is_optional());
        assert!(Fork::Bpo3.is_optional());
        assert!(!Fork::Istanbul.is_optional());
        assert!(!Fork::Osaka.is_optional());
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Fork::from_name("london"), Some(Fork::London));
        assert_eq!(Fork::from_name("BPO2"), Some(Fork::Bpo2));
        assert_eq!(Fork::from_name("koreCompatibleBlock"), Some(Fork::Kore));
        assert_eq!(Fork::from_name("frontier"), None);
    }
}
