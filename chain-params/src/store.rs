//! Configuration publication
//!
//! Readers take an `Arc` snapshot of the active configuration and keep using
//! it for as long as they like; a replacement swaps the pointer under a short
//! write lock, so no reader ever sees a partially updated record.

use std::sync::{Arc, RwLock};

use tracing::{info, warn};

use crate::config::ChainConfig;
use crate::error::{SwapError, SwapResult};
use crate::logging::{fields, operations};

/// Holder of the active chain configuration
#[derive(Debug)]
pub struct ConfigStore {
    current: RwLock<Arc<ChainConfig>>,
}

impl ConfigStore {
    /// Wrap a validated configuration
    pub fn new(config: ChainConfig) -> SwapResult<Self> {
        config.validate()?;
        Ok(Self {
            current: RwLock::new(Arc::new(config)),
        })
    }

    /// Snapshot of the active configuration
    pub fn current(&self) -> Arc<ChainConfig> {
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&*guard)
    }

    /// Publish `new` if a chain at `height` can switch to it without rewinding.
    ///
    /// Returns the configuration that was replaced.
    pub fn replace(&self, new: ChainConfig, height: u64) -> SwapResult<Arc<ChainConfig>> {
        new.validate()?;

        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        if guard.chain_id != new.chain_id {
            let err = SwapError::ChainIdMismatch {
                stored: display_chain_id(&guard),
                new: display_chain_id(&new),
            };
            warn!(
                { fields::OPERATION } = operations::REPLACE,
                { fields::CHAIN_ID } = %display_chain_id(&new),
                { fields::ERROR } = %err,
                "Replacement refused"
            );
            return Err(err);
        }
        if let Some(err) = guard.check_compatible(&new, height) {
            warn!(
                { fields::OPERATION } = operations::REPLACE,
                { fields::HEIGHT } = height,
                { fields::REWIND_TO } = err.rewind_to,
                { fields::ERROR } = %err,
                "Replacement refused"
            );
            return Err(err.into());
        }

        let previous = std::mem::replace(&mut *guard, Arc::new(new));
        info!(
            { fields::OPERATION } = operations::REPLACE,
            { fields::HEIGHT } = height,
            config = %guard,
            "Chain config replaced"
        );
        Ok(previous)
    }

    /// Publish `new` without a compatibility check, after the caller rewound
    pub fn force_replace(&self, new: ChainConfig) -> SwapResult<Arc<ChainConfig>> {
        new.validate()?;

        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        let previous = std::mem::replace(&mut *guard, Arc::new(new));
        info!(
            { fields::OPERATION } = operations::REPLACE,
            forced = true,
            config = %guard,
            "Chain config replaced"
        );
        Ok(previous)
    }
}

fn display_chain_id(config: &ChainConfig) -> String {
    config
        .chain_id
        .as_ref()
        .map_or_else(|| "<nil>".to_string(), |id| id.to_string())
}
