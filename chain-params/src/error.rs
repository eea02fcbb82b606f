//! Error types for Chain Params

use num_bigint::BigUint;
use thiserror::Error;

use crate::catalog::Fork;
use crate::compat::ConfigCompatError;

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A legacy consensus-engine selector was supplied
    #[error("{field} is deprecated, use istanbul")]
    Deprecated { field: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error(transparent)]
    Order(#[from] ForkOrderError),
}

impl ConfigError {
    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// A schedule that violates the catalog order. Fatal at startup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ForkOrderError {
    #[error("unsupported fork ordering: {earlier} not enabled, but {later} enabled at {later_block}")]
    NotEnabled {
        earlier: Fork,
        later: Fork,
        later_block: BigUint,
    },

    #[error("unsupported fork ordering: {earlier} enabled at {earlier_block}, but {later} enabled at {later_block}")]
    OutOfOrder {
        earlier: Fork,
        earlier_block: BigUint,
        later: Fork,
        later_block: BigUint,
    },

    #[error("invalid chain configuration: missing entry for fork {fork} in blobSchedule")]
    MissingBlobConfig { fork: Fork },

    #[error("invalid chain configuration in blobSchedule for fork {fork}: {reason}")]
    InvalidBlobConfig { fork: Fork, reason: String },
}

/// Process-wide context lifecycle errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContextError {
    #[error("Context already initialized")]
    AlreadyInitialized,

    #[error("Context not initialized")]
    NotInitialized,

    #[error("Interval {name} must be non-zero")]
    ZeroInterval { name: &'static str },
}

/// Errors raised when publishing a configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SwapError {
    #[error(transparent)]
    Order(#[from] ForkOrderError),

    #[error("Incompatible configuration: {0}")]
    Incompatible(#[from] ConfigCompatError),

    #[error("Chain ID mismatch: stored {stored}, new {new}")]
    ChainIdMismatch { stored: String, new: String },
}

/// Result type alias for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type alias for context operations
pub type ContextResult<T> = Result<T, ContextError>;

/// Result type alias for configuration publication
pub type SwapResult<T> = Result<T, SwapError>;
