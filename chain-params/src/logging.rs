//! Logging Conventions
//!
//! The library only emits `tracing` events; installing a subscriber is left to
//! the embedding binary.
//!
//! # Log Levels
//!
//! | Level | Usage | Examples |
//! |-------|-------|----------|
//! | ERROR | Never emitted by the library | |
//! | WARN  | A default was filled in, a loop bound was hit | Missing istanbul section |
//! | INFO  | Configuration swapped at runtime | Store replace |
//! | DEBUG | Validation and compatibility outcomes | Fork order ok, rewind found |
//! | TRACE | Per-iteration detail | Compatibility driver steps |
//!
//! # Structured Fields
//!
//! Field names come from [`fields`] and are passed as constant names:
//!
//! ```ignore
//! use tracing::warn;
//! use chain_params::logging::{fields, operations};
//!
//! warn!(
//!     { fields::SECTION } = "istanbul",
//!     { fields::OPERATION } = operations::SET_DEFAULTS,
//!     "Missing section, using defaults"
//! );
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Log level enumeration matching tracing levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }

    /// Check if this level is enabled for the given max level
    pub fn is_enabled(&self, max_level: LogLevel) -> bool {
        self.priority() <= max_level.priority()
    }

    fn priority(&self) -> u8 {
        match self {
            Self::Error => 0,
            Self::Warn => 1,
            Self::Info => 2,
            Self::Debug => 3,
            Self::Trace => 4,
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            other => Err(format!("unknown log level: {}", other)),
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Standard log field names
pub mod fields {
    /// Fork name from the catalog
    pub const FORK: &str = "fork";
    /// Current chain head
    pub const HEIGHT: &str = "height";
    /// Fork thresholds on either side of a compatibility check
    pub const STORED_BLOCK: &str = "stored_block";
    pub const NEW_BLOCK: &str = "new_block";
    /// Block the chain must rewind to
    pub const REWIND_TO: &str = "rewind_to";
    pub const CHAIN_ID: &str = "chain_id";
    /// Configuration section a default was applied to
    pub const SECTION: &str = "section";
    /// Operation name
    pub const OPERATION: &str = "operation";
    /// Source file path
    pub const PATH: &str = "path";
    /// Error message
    pub const ERROR: &str = "error";
    /// Loop iteration count
    pub const ITERATIONS: &str = "iterations";
}

/// Operation names for consistent tagging
pub mod operations {
    pub const LOAD: &str = "load";
    pub const SET_DEFAULTS: &str = "set_defaults";
    pub const VALIDATE: &str = "validate";
    pub const CHECK_COMPAT: &str = "check_compat";
    pub const REPLACE: &str = "replace";
    pub const CONTEXT_INIT: &str = "context_init";
    pub const CONTEXT_TEARDOWN: &str = "context_teardown";
}
