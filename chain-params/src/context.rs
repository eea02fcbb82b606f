//! Process-wide interval settings
//!
//! Staking snapshots and proposer refreshes happen on fixed block intervals
//! that every consumer in a process must agree on. The settings live in a
//! single slot with an explicit lifecycle: initialized once at startup, read
//! freely, and torn down when the process (or a test) is done with them.

use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::constants::{DEFAULT_PROPOSER_REFRESH_INTERVAL, DEFAULT_STAKING_UPDATE_INTERVAL};
use crate::error::{ContextError, ContextResult};
use crate::logging::{fields, operations};

/// Block intervals for staking updates and proposer refreshes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntervalSettings {
    staking_update_interval: u64,
    proposer_refresh_interval: u64,
}

impl Default for IntervalSettings {
    fn default() -> Self {
        Self {
            staking_update_interval: DEFAULT_STAKING_UPDATE_INTERVAL,
            proposer_refresh_interval: DEFAULT_PROPOSER_REFRESH_INTERVAL,
        }
    }
}

impl IntervalSettings {
    pub fn new(staking_update_interval: u64, proposer_refresh_interval: u64) -> ContextResult<Self> {
        if staking_update_interval == 0 {
            return Err(ContextError::ZeroInterval {
                name: "staking_update_interval",
            });
        }
        if proposer_refresh_interval == 0 {
            return Err(ContextError::ZeroInterval {
                name: "proposer_refresh_interval",
            });
        }
        Ok(Self {
            staking_update_interval,
            proposer_refresh_interval,
        })
    }

    pub fn staking_update_interval(&self) -> u64 {
        self.staking_update_interval
    }

    pub fn proposer_refresh_interval(&self) -> u64 {
        self.proposer_refresh_interval
    }

    /// Whether staking information is refreshed at block `n`
    pub fn is_staking_update_block(&self, n: u64) -> bool {
        n % self.staking_update_interval == 0
    }

    /// Block whose staking snapshot governs block `n`.
    ///
    /// The snapshot lags by two intervals on an interval boundary and by one
    /// full interval plus the offset otherwise. Early blocks use genesis.
    pub fn staking_block_number(&self, n: u64) -> u64 {
        let interval = self.staking_update_interval;
        if n <= interval.saturating_mul(2) {
            return 0;
        }
        if n % interval == 0 {
            n - 2 * interval
        } else {
            n - interval - n % interval
        }
    }

    /// Whether the proposer list is recomputed at block `n`
    pub fn is_proposer_refresh_block(&self, n: u64) -> bool {
        n % self.proposer_refresh_interval == 0
    }
}

static CONTEXT: RwLock<Option<IntervalSettings>> = RwLock::new(None);

/// Install the process-wide settings. Fails if already installed.
pub fn init_context(settings: IntervalSettings) -> ContextResult<()> {
    let mut slot = CONTEXT.write().unwrap_or_else(|e| e.into_inner());
    if slot.is_some() {
        return Err(ContextError::AlreadyInitialized);
    }
    *slot = Some(settings);
    info!(
        { fields::OPERATION } = operations::CONTEXT_INIT,
        staking_update_interval = settings.staking_update_interval,
        proposer_refresh_interval = settings.proposer_refresh_interval,
        "Interval context initialized"
    );
    Ok(())
}

/// Current process-wide settings
pub fn context() -> ContextResult<IntervalSettings> {
    let slot = CONTEXT.read().unwrap_or_else(|e| e.into_inner());
    slot.ok_or(ContextError::NotInitialized)
}

/// Remove the process-wide settings, returning them if they were installed
pub fn teardown_context() -> Option<IntervalSettings> {
    let mut slot = CONTEXT.write().unwrap_or_else(|e| e.into_inner());
    let previous = slot.take();
    if previous.is_some() {
        info!({ fields::OPERATION } = operations::CONTEXT_TEARDOWN, "Interval context torn down");
    }
    previous
}
