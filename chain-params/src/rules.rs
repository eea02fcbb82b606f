//! Rules Snapshot
//!
//! The resolved set of active forks for one block. Derived once from a
//! configuration and a block number, never mutated afterwards, and free of
//! references back to the configuration, so it can be shared across threads.

use num_bigint::BigUint;
use serde::Serialize;

use crate::activation::is_forked;
use crate::catalog::Fork;
use crate::config::ChainConfig;

/// Active-fork vector for a single block
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Rules {
    #[serde(serialize_with = "crate::config::bigint::serialize")]
    chain_id: BigUint,
    number: u64,
    active: [bool; Fork::COUNT],
}

impl Rules {
    pub fn derive(config: &ChainConfig, number: u64) -> Self {
        let head = BigUint::from(number);
        let mut active = [false; Fork::COUNT];
        for point in config.fork_points() {
            active[point.fork.index()] = is_forked(point.threshold, Some(&head));
        }
        Self {
            chain_id: config.chain_id.clone().unwrap_or_default(),
            number,
            active,
        }
    }

    /// Chain identifier copied from the configuration; zero when unset
    pub fn chain_id(&self) -> &BigUint {
        &self.chain_id
    }

    pub fn number(&self) -> u64 {
        self.number
    }

    pub fn is_active(&self, fork: Fork) -> bool {
        self.active[fork.index()]
    }

    /// Active forks in catalog order
    pub fn active_forks(&self) -> impl Iterator<Item = Fork> + '_ {
        Fork::ALL.iter().copied().filter(move |fork| self.is_active(*fork))
    }

    pub fn is_istanbul(&self) -> bool {
        self.is_active(Fork::Istanbul)
    }

    pub fn is_london(&self) -> bool {
        self.is_active(Fork::London)
    }

    pub fn is_eth_tx_type(&self) -> bool {
        self.is_active(Fork::EthTxType)
    }

    pub fn is_magma(&self) -> bool {
        self.is_active(Fork::Magma)
    }

    pub fn is_kore(&self) -> bool {
        self.is_active(Fork::Kore)
    }

    pub fn is_shanghai(&self) -> bool {
        self.is_active(Fork::Shanghai)
    }

    pub fn is_cancun(&self) -> bool {
        self.is_active(Fork::Cancun)
    }

    pub fn is_randao(&self) -> bool {
        self.is_active(Fork::Randao)
    }

    pub fn is_kaia(&self) -> bool {
        self.is_active(Fork::Kaia)
    }

    pub fn is_prague(&self) -> bool {
        self.is_active(Fork::Prague)
    }

    pub fn is_osaka(&self) -> bool {
        self.is_active(Fork::Osaka)
    }

    pub fn is_bpo1(&self) -> bool {
        self.is_active(Fork::Bpo1)
    }

    pub fn is_bpo2(&self) -> bool {
        self.is_active(Fork::Bpo2)
    }

    pub fn is_bpo3(&self) -> bool {
        self.is_active(Fork::Bpo3)
    }

    pub fn is_bpo4(&self) -> bool {
        self.is_active(Fork::Bpo4)
    }

    pub fn is_bpo5(&self) -> bool {
        self.is_active(Fork::Bpo5)
    }
}

impl ChainConfig {
    /// Rules snapshot for block `num`
    pub fn rules(&self, num: u64) -> Rules {
        Rules::derive(self, num)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_istanbul_activation_boundary() {
        let cfg = ChainConfig::new().with_fork(Fork::Istanbul, 100);
        assert!(cfg.rules(100).is_istanbul());
        assert!(!cfg.rules(99).is_istanbul());
    }

    #[test]
    fn test_rules_match_predicates() {
        let cfg = ChainConfig::testnet();
        for num in [0, 75_373_311, 75_373_312, 141_367_000, 200_000_000] {
            let rules = cfg.rules(num);
            for fork in Fork::ALL {
                assert_eq!(rules.is_active(fork), cfg.is_active(fork, num), "{} at {}", fork, num);
            }
        }
    }

    #[test]
    fn test_chain_id_copied_by_value() {
        let mut cfg = ChainConfig::new().with_chain_id(8217);
        let rules = cfg.rules(0);
        cfg.chain_id = Some(BigUint::from(1u32));
        assert_eq!(rules.chain_id(), &BigUint::from(8217u32));

        let unset = ChainConfig::new().rules(0);
        assert_eq!(unset.chain_id(), &BigUint::from(0u32));
    }

    #[test]
    fn test_derivation_is_independent_of_call_order() {
        let cfg = ChainConfig::mainnet();
        let later = cfg.rules(190_000_000);
        let earlier = cfg.rules(10);
        assert_eq!(cfg.rules(10), earlier);
        assert_eq!(cfg.rules(190_000_000), later);
        assert_eq!(earlier.active_forks().count(), 0);
        assert!(later.is_prague());
    }

    #[test]
    fn test_blob_parameter_forks() {
        let cfg = ChainConfig::all_forks_enabled()
            .with_fork(Fork::Bpo1, 10)
            .with_fork(Fork::Bpo3, 30);
        let rules = cfg.rules(20);
        assert!(rules.is_osaka());
        assert!(rules.is_bpo1());
        assert!(!rules.is_bpo2());
        assert!(!rules.is_bpo3());

        let rules = cfg.rules(30);
        assert!(rules.is_bpo3());
        assert!(!rules.is_bpo4());
        assert!(!rules.is_bpo5());
    }

    #[test]
    fn test_rules_are_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Rules>();
    }
}
