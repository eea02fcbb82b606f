//! Chain Params - Protocol Versioning and Compatibility
//!
//! This crate owns the hard fork schedule of a chain and every question the
//! rest of the node asks about it:
//! - Which upgrades are active at a given block (`activation`, `rules`)
//! - Whether a schedule is declared in a legal order (`order`)
//! - Whether a replacement configuration would rewrite finalized history,
//!   and how far the chain must rewind if it does (`compat`)
//! - Which blob (data-availability) parameters apply at a block (`blob`)
//!
//! # Architecture
//!
//! The fork catalog (`catalog::Fork::ALL`) is the single ordered list walked by
//! validation, compatibility checks and rules derivation. A threshold is only
//! ever compared against a height through `activation::is_forked`.
//!
//! Configurations are immutable once validated. Replacements are published
//! through `store::ConfigStore`, which gates the swap on a compatibility check.

pub mod activation;
pub mod blob;
pub mod catalog;
pub mod compat;
pub mod config;
pub mod constants;
pub mod context;
pub mod error;
pub mod logging;
pub mod order;
pub mod rules;
pub mod store;

pub use activation::{is_exactly, is_forked, is_immediately_before};
pub use blob::{BlobConfig, BlobScheduleConfig};
pub use catalog::{Fork, ForkPoint};
pub use compat::ConfigCompatError;
pub use config::{
    Address, ChainConfig, DeriveShaMode, GovernanceConfig, GovernanceMode, IstanbulConfig,
    Kip71Config, ProposerPolicy, RegistryConfig, RewardConfig,
};
pub use context::{context, init_context, teardown_context, IntervalSettings};
pub use error::*;
pub use rules::Rules;
pub use store::ConfigStore;
