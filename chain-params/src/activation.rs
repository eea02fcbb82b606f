//! Activation Predicates
//!
//! The only place where a fork threshold is compared against a block height.
//! Every per-fork query in the crate goes through these functions.

use num_bigint::BigUint;

use crate::catalog::Fork;
use crate::config::ChainConfig;

/// Whether a fork scheduled at `threshold` is active at `head`.
///
/// Returns `false` when either side is absent: an unscheduled fork is never
/// active, and an unknown head has not forked anything.
pub fn is_forked(threshold: Option<&BigUint>, head: Option<&BigUint>) -> bool {
    match (threshold, head) {
        (Some(threshold), Some(head)) => threshold <= head,
        _ => false,
    }
}

/// Whether `head` is the activation block itself
pub fn is_exactly(threshold: Option<&BigUint>, head: Option<&BigUint>) -> bool {
    match (threshold, head) {
        (Some(threshold), Some(head)) => threshold == head,
        _ => false,
    }
}

/// Whether `head` is the block immediately preceding activation
pub fn is_immediately_before(threshold: Option<&BigUint>, head: Option<&BigUint>) -> bool {
    match (threshold, head) {
        (Some(threshold), Some(head)) => *threshold == head + 1u32,
        _ => false,
    }
}

impl ChainConfig {
    /// Whether `fork` is active at block `num`
    pub fn is_active(&self, fork: Fork, num: u64) -> bool {
        is_forked(self.fork_block(fork), Some(&BigUint::from(num)))
    }

    /// Whether `num` is the activation block of `fork`
    pub fn is_fork_block(&self, fork: Fork, num: u64) -> bool {
        is_exactly(self.fork_block(fork), Some(&BigUint::from(num)))
    }

    /// Whether `num` is the block right before `fork` activates
    pub fn is_fork_block_parent(&self, fork: Fork, num: u64) -> bool {
        is_immediately_before(self.fork_block(fork), Some(&BigUint::from(num)))
    }

    /// Whether the registry must be written into state while processing `num`
    pub fn is_registry_install_block(&self, num: u64) -> bool {
        self.registry.is_some() && self.is_fork_block(Fork::Randao, num)
    }
}

macro_rules! fork_enabled {
    ($($method:ident => $fork:ident),* $(,)?) => {
        impl ChainConfig {
            $(
                #[doc = concat!("Whether the ", stringify!($fork), " fork is active at block `num`")]
                pub fn $method(&self, num: u64) -> bool {
                    self.is_active(Fork::$fork, num)
                }
            )*
        }
    };
}

fork_enabled! {
    is_istanbul_fork_enabled => Istanbul,
    is_london_fork_enabled => London,
    is_eth_tx_type_fork_enabled => EthTxType,
    is_magma_fork_enabled => Magma,
    is_kore_fork_enabled => Kore,
    is_shanghai_fork_enabled => Shanghai,
    is_cancun_fork_enabled => Cancun,
    is_randao_fork_enabled => Randao,
    is_kaia_fork_enabled => Kaia,
    is_prague_fork_enabled => Prague,
    is_osaka_fork_enabled => Osaka,
    is_bpo1_fork_enabled => Bpo1,
    is_bpo2_fork_enabled => Bpo2,
    is_bpo3_fork_enabled => Bpo3,
    is_bpo4_fork_enabled => Bpo4,
    is_bpo5_fork_enabled => Bpo5,
}
