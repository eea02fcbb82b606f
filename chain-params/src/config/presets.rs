//! Built-in network configurations

use num_bigint::BigUint;

use super::{
    Address, ChainConfig, DeriveShaMode, GovernanceConfig, GovernanceMode, IstanbulConfig,
    ProposerPolicy, RewardConfig,
};
use crate::blob::BlobConfig;
use crate::catalog::Fork;
use crate::constants::*;

const MAINNET_GOVERNING_NODE: &str = "0x52d41ca72af615a1ac3301b0a93efa222ecc7541";
const TESTNET_GOVERNING_NODE: &str = "0x99fb17d324fa0e07f23b49d09028ac0919414db6";

fn governing_node(hex: &str) -> Address {
    // Constant input; a parse failure would be caught by the preset tests
    Address::from_hex(hex).unwrap_or_default()
}

impl ChainConfig {
    /// Mainnet schedule
    pub fn mainnet() -> Self {
        let schedule: [(Fork, u64); 10] = [
            (Fork::Istanbul, 86_816_005),
            (Fork::London, 86_816_005),
            (Fork::EthTxType, 86_816_005),
            (Fork::Magma, 99_841_497),
            (Fork::Kore, 119_750_400),
            (Fork::Shanghai, 135_456_000),
            (Fork::Cancun, 147_534_000),
            (Fork::Randao, 147_534_000),
            (Fork::Kaia, 162_900_480),
            (Fork::Prague, 187_930_000),
        ];
        let mut config = schedule
            .iter()
            .fold(ChainConfig::new().with_chain_id(MAINNET_CHAIN_ID), |cfg, (fork, block)| {
                cfg.with_fork(*fork, *block)
            });

        config.istanbul = Some(IstanbulConfig {
            epoch: DEFAULT_EPOCH,
            policy: ProposerPolicy::WeightedRandom,
            sub_group_size: 22,
        });
        config.governance = Some(GovernanceConfig {
            governing_node: governing_node(MAINNET_GOVERNING_NODE),
            governance_mode: GovernanceMode::Single,
            reward: Some(RewardConfig {
                minting_amount: BigUint::from(9_600_000_000_000_000_000u64),
                ratio: "34/54/12".to_string(),
                kip82_ratio: Some(DEFAULT_KIP82_RATIO.to_string()),
                use_gini_coeff: true,
                deferred_tx_fee: true,
                staking_update_interval: DEFAULT_STAKING_UPDATE_INTERVAL,
                proposer_update_interval: DEFAULT_PROPOSER_REFRESH_INTERVAL,
                minimum_stake: BigUint::from(5_000_000u64),
            }),
            kip71: None,
        });
        config.unit_price = DEFAULT_UNIT_PRICE;
        config.derive_sha_impl = DeriveShaMode::Concat;
        config
    }

    /// Public testnet schedule
    pub fn testnet() -> Self {
        let schedule: [(Fork, u64); 10] = [
            (Fork::Istanbul, 75_373_312),
            (Fork::London, 80_295_291),
            (Fork::EthTxType, 86_513_895),
            (Fork::Magma, 98_347_376),
            (Fork::Kore, 111_736_800),
            (Fork::Shanghai, 131_608_000),
            (Fork::Cancun, 141_367_000),
            (Fork::Randao, 141_367_000),
            (Fork::Kaia, 156_660_000),
            (Fork::Prague, 187_197_000),
        ];
        let mut config = schedule
            .iter()
            .fold(ChainConfig::new().with_chain_id(TESTNET_CHAIN_ID), |cfg, (fork, block)| {
                cfg.with_fork(*fork, *block)
            });

        config.istanbul = Some(IstanbulConfig {
            epoch: DEFAULT_EPOCH,
            policy: ProposerPolicy::WeightedRandom,
            sub_group_size: 22,
        });
        config.governance = Some(GovernanceConfig {
            governing_node: governing_node(TESTNET_GOVERNING_NODE),
            governance_mode: GovernanceMode::Single,
            reward: Some(RewardConfig {
                ratio: "34/54/12".to_string(),
                use_gini_coeff: true,
                deferred_tx_fee: true,
                ..RewardConfig::default()
            }),
            kip71: None,
        });
        config.unit_price = DEFAULT_UNIT_PRICE;
        config.derive_sha_impl = DeriveShaMode::Concat;
        config
    }

    /// Every mandatory fork (and Randao) active from genesis; for local networks and tests
    pub fn all_forks_enabled() -> Self {
        let mut config = Fork::ALL
            .iter()
            .filter(|fork| !matches!(fork, Fork::Bpo1 | Fork::Bpo2 | Fork::Bpo3 | Fork::Bpo4 | Fork::Bpo5))
            .fold(ChainConfig::new().with_chain_id(DEV_CHAIN_ID), |cfg, fork| {
                cfg.with_fork(*fork, 0)
            })
            .with_blob_config(Fork::Osaka, BlobConfig::osaka_default());

        config.istanbul = Some(IstanbulConfig::default());
        config.governance = Some(GovernanceConfig::with_defaults());
        config.unit_price = DEFAULT_UNIT_PRICE;
        config
    }
}
