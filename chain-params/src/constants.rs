//! Protocol Constants
//!
//! Default values used when a configuration omits a section, plus the
//! identifiers of the public networks.
//!
//! # Categories
//!
//! - **Networks**: Chain identifiers
//! - **Engine**: Istanbul BFT defaults
//! - **Governance**: Reward and KIP-71 base fee defaults
//! - **Intervals**: Staking and proposer refresh intervals
//! - **Blobs**: Blob schedule defaults

// ============================================================================
// Networks
// ============================================================================

/// Mainnet chain identifier
pub const MAINNET_CHAIN_ID: u64 = 8217;

/// Public testnet chain identifier
pub const TESTNET_CHAIN_ID: u64 = 1001;

/// Chain identifier used by `ChainConfig::all_forks_enabled`
pub const DEV_CHAIN_ID: u64 = 2019;

// ============================================================================
// Engine
// ============================================================================

/// Blocks per Istanbul epoch
pub const DEFAULT_EPOCH: u64 = 604_800;

/// Committee size
pub const DEFAULT_SUB_GROUP_SIZE: u64 = 21;

/// Base unit price in kei (25 gkei)
pub const DEFAULT_UNIT_PRICE: u64 = 25_000_000_000;

// ============================================================================
// Governance
// ============================================================================

/// Block reward in kei (6.4 KAIA)
pub const DEFAULT_MINTING_AMOUNT: u64 = 6_400_000_000_000_000_000;

/// Reward split between CN/KGF/KIR
pub const DEFAULT_REWARD_RATIO: &str = "100/0/0";

/// Split of the CN share between proposer and stakers
pub const DEFAULT_KIP82_RATIO: &str = "20/80";

/// Minimum stake in KAIA
pub const DEFAULT_MINIMUM_STAKE: u64 = 2_000_000;

/// KIP-71 lower bound of the base fee in kei
pub const DEFAULT_LOWER_BOUND_BASE_FEE: u64 = 25_000_000_000;

/// KIP-71 upper bound of the base fee in kei
pub const DEFAULT_UPPER_BOUND_BASE_FEE: u64 = 750_000_000_000;

/// KIP-71 gas target
pub const DEFAULT_GAS_TARGET: u64 = 30_000_000;

/// KIP-71 maximum block gas used for base fee computation
pub const DEFAULT_MAX_BLOCK_GAS_USED_FOR_BASE_FEE: u64 = 60_000_000;

/// KIP-71 base fee denominator
pub const DEFAULT_BASE_FEE_DENOMINATOR: u64 = 20;

// ============================================================================
// Intervals
// ============================================================================

/// Blocks between staking info refreshes
pub const DEFAULT_STAKING_UPDATE_INTERVAL: u64 = 86_400;

/// Blocks between proposer list refreshes
pub const DEFAULT_PROPOSER_REFRESH_INTERVAL: u64 = 3_600;

// ============================================================================
// Blobs
// ============================================================================

/// Osaka target blobs per block
pub const DEFAULT_OSAKA_BLOB_TARGET: u64 = 6;

/// Osaka max blobs per block
pub const DEFAULT_OSAKA_BLOB_MAX: u64 = 9;

/// Osaka blob base fee update fraction
pub const DEFAULT_OSAKA_BLOB_UPDATE_FRACTION: u64 = 5_007_716;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_fee_bounds_ordered() {
        assert!(DEFAULT_LOWER_BOUND_BASE_FEE <= DEFAULT_UPPER_BOUND_BASE_FEE);
        assert!(DEFAULT_GAS_TARGET <= DEFAULT_MAX_BLOCK_GAS_USED_FOR_BASE_FEE);
    }

    #[test]
    fn test_blob_defaults_consistent() {
        assert!(DEFAULT_OSAKA_BLOB_TARGET <= DEFAULT_OSAKA_BLOB_MAX);
        assert!(DEFAULT_OSAKA_BLOB_UPDATE_FRACTION > 0);
    }
}
