//! Compatibility Checking
//!
//! Decides whether a node that has already processed blocks under one
//! configuration can switch to another, and if not, how far back it has to
//! rewind so that no processed block was executed under rules the new
//! configuration disagrees with.

use std::fmt;

use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};
use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::activation::is_forked;
use crate::catalog::Fork;
use crate::config::ChainConfig;
use crate::logging::{fields, operations};

/// Upper bound on driver iterations
const MAX_ITERATIONS: usize = 2 * Fork::COUNT;

/// A fork threshold that differs between the stored and the new
/// configuration at a point the chain has already passed.
///
/// Returned as a value; callers decide whether to refuse the switch or to
/// rewind to `rewind_to` and retry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ConfigCompatError {
    /// Name of the mismatching fork
    pub what: String,
    #[serde(serialize_with = "crate::config::bigint::opt::serialize")]
    pub stored_block: Option<BigUint>,
    #[serde(serialize_with = "crate::config::bigint::opt::serialize")]
    pub new_block: Option<BigUint>,
    /// Highest block that is still valid under both configurations
    pub rewind_to: u64,
}

impl ConfigCompatError {
    /// Build the error and compute the rewind target.
    ///
    /// The target is the earlier of the two thresholds; an absent threshold
    /// defers to the other one.
    pub fn new(what: impl Into<String>, stored: Option<&BigUint>, new: Option<&BigUint>) -> Self {
        let target = match (stored, new) {
            (None, new) => new,
            (Some(stored), None) => Some(stored),
            (Some(stored), Some(new)) => {
                debug_assert_ne!(stored, new, "equal thresholds are never incompatible");
                Some(stored.min(new))
            }
        };
        let rewind_to = match target {
            Some(target) if !target.is_zero() => {
                // Heights are u64; a threshold beyond that range has not been reached
                (target - 1u32).to_u64().unwrap_or(u64::MAX)
            }
            _ => 0,
        };
        Self {
            what: what.into(),
            stored_block: stored.cloned(),
            new_block: new.cloned(),
            rewind_to,
        }
    }
}

fn fmt_threshold(value: Option<&BigUint>) -> String {
    value.map_or_else(|| "nil".to_string(), |v| v.to_string())
}

impl fmt::Display for ConfigCompatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "mismatching {} in database (have {}, want {}, rewindto {})",
            self.what,
            fmt_threshold(self.stored_block.as_ref()),
            fmt_threshold(self.new_block.as_ref()),
            self.rewind_to
        )
    }
}

impl std::error::Error for ConfigCompatError {}

impl ChainConfig {
    /// First fork, in catalog order, whose threshold differs between `self`
    /// (stored) and `new` and which either side considers active at `head`.
    pub fn check_compatible_at(&self, new: &ChainConfig, head: &BigUint) -> Option<ConfigCompatError> {
        self.fork_points().find_map(|stored| {
            let new_block = new.fork_block(stored.fork);
            let active = is_forked(stored.threshold, Some(head)) || is_forked(new_block, Some(head));
            if active && stored.threshold != new_block {
                Some(ConfigCompatError::new(stored.name(), stored.threshold, new_block))
            } else {
                None
            }
        })
    }

    /// Whether a chain at `height` built under `self` may continue under `new`.
    ///
    /// Repeats the check from each rewind target until no mismatch remains or
    /// the target stops moving, and reports the earliest conflict found.
    pub fn check_compatible(&self, new: &ChainConfig, height: u64) -> Option<ConfigCompatError> {
        check_compatible_counted(self, new, height).0
    }
}

/// Driver behind `check_compatible`; also returns the number of checks run
pub(crate) fn check_compatible_counted(
    stored: &ChainConfig,
    new: &ChainConfig,
    height: u64,
) -> (Option<ConfigCompatError>, usize) {
    let mut head = BigUint::from(height);
    let mut last: Option<ConfigCompatError> = None;
    let mut iterations = 0;

    loop {
        if iterations >= MAX_ITERATIONS {
            debug_assert!(false, "compatibility check did not converge");
            warn!(
                { fields::OPERATION } = operations::CHECK_COMPAT,
                { fields::HEIGHT } = height,
                { fields::ITERATIONS } = iterations,
                "Compatibility check hit its iteration bound"
            );
            break;
        }
        iterations += 1;

        let err = match stored.check_compatible_at(new, &head) {
            Some(err) => err,
            None => break,
        };
        trace!(
            { fields::OPERATION } = operations::CHECK_COMPAT,
            { fields::FORK } = %err.what,
            { fields::STORED_BLOCK } = %fmt_threshold(err.stored_block.as_ref()),
            { fields::NEW_BLOCK } = %fmt_threshold(err.new_block.as_ref()),
            { fields::REWIND_TO } = err.rewind_to,
            "Mismatch found"
        );
        if last.as_ref().is_some_and(|prev| prev.rewind_to == err.rewind_to) {
            break;
        }
        head = BigUint::from(err.rewind_to);
        last = Some(err);
    }

    if let Some(err) = &last {
        debug!(
            { fields::OPERATION } = operations::CHECK_COMPAT,
            { fields::HEIGHT } = height,
            { fields::FORK } = %err.what,
            { fields::REWIND_TO } = err.rewind_to,
            { fields::ITERATIONS } = iterations,
            "Configurations incompatible"
        );
    }
    (last, iterations)
}
