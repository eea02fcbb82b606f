//! Blob Schedule
//!
//! Per-fork data-availability parameters. Forks are cumulative: once several
//! blob forks are active, the newest one's parameters apply.

use serde::{Deserialize, Serialize};

use crate::catalog::Fork;
use crate::config::ChainConfig;
use crate::constants::{
    DEFAULT_OSAKA_BLOB_MAX, DEFAULT_OSAKA_BLOB_TARGET, DEFAULT_OSAKA_BLOB_UPDATE_FRACTION,
};
use crate::error::ForkOrderError;

/// Blob capacity parameters for one fork
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlobConfig {
    /// Target blobs per block
    pub target: u64,
    /// Maximum blobs per block
    pub max: u64,
    #[serde(rename = "baseFeeUpdateFraction")]
    pub update_fraction: u64,
}

impl BlobConfig {
    pub fn new(target: u64, max: u64, update_fraction: u64) -> Self {
        Self {
            target,
            max,
            update_fraction,
        }
    }

    pub fn osaka_default() -> Self {
        Self::new(
            DEFAULT_OSAKA_BLOB_TARGET,
            DEFAULT_OSAKA_BLOB_MAX,
            DEFAULT_OSAKA_BLOB_UPDATE_FRACTION,
        )
    }

    fn validate(&self, fork: Fork) -> Result<(), ForkOrderError> {
        let invalid = |reason: &str| ForkOrderError::InvalidBlobConfig {
            fork,
            reason: reason.to_string(),
        };
        if self.update_fraction == 0 {
            return Err(invalid("update fraction must be defined and non-zero"));
        }
        if self.max == 0 {
            return Err(invalid("max needs to be non-zero"));
        }
        if self.target > self.max {
            return Err(invalid("target cannot be larger than max"));
        }
        Ok(())
    }
}

/// One optional `BlobConfig` per blob fork
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlobScheduleConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub osaka: Option<BlobConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bpo1: Option<BlobConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bpo2: Option<BlobConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bpo3: Option<BlobConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bpo4: Option<BlobConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bpo5: Option<BlobConfig>,
}

impl BlobScheduleConfig {
    /// Entry for a blob fork; `None` for non-blob forks
    pub fn get(&self, fork: Fork) -> Option<&BlobConfig> {
        match fork {
            Fork::Osaka => self.osaka.as_ref(),
            Fork::Bpo1 => self.bpo1.as_ref(),
            Fork::Bpo2 => self.bpo2.as_ref(),
            Fork::Bpo3 => self.bpo3.as_ref(),
            Fork::Bpo4 => self.bpo4.as_ref(),
            Fork::Bpo5 => self.bpo5.as_ref(),
            _ => None,
        }
    }

    /// Set the entry for a blob fork. Non-blob forks are ignored.
    pub fn set(&mut self, fork: Fork, config: Option<BlobConfig>) {
        let slot = match fork {
            Fork::Osaka => &mut self.osaka,
            Fork::Bpo1 => &mut self.bpo1,
            Fork::Bpo2 => &mut self.bpo2,
            Fork::Bpo3 => &mut self.bpo3,
            Fork::Bpo4 => &mut self.bpo4,
            Fork::Bpo5 => &mut self.bpo5,
            _ => return,
        };
        *slot = config;
    }
}

impl ChainConfig {
    /// Newest blob fork active at `head`
    pub fn latest_blob_fork(&self, head: u64) -> Option<Fork> {
        Fork::BLOB_FORKS
            .iter()
            .rev()
            .copied()
            .find(|fork| self.is_active(*fork, head))
    }

    /// Blob parameters in force at `head`, or `None` before the first blob fork
    pub fn blob_config(&self, head: u64) -> Option<&BlobConfig> {
        let fork = self.latest_blob_fork(head)?;
        self.blob_schedule.as_ref()?.get(fork)
    }

    pub fn max_blobs_per_block(&self, head: u64) -> u64 {
        self.blob_config(head).map_or(0, |c| c.max)
    }

    pub fn target_blobs_per_block(&self, head: u64) -> u64 {
        self.blob_config(head).map_or(0, |c| c.target)
    }

    /// Every scheduled blob fork needs a valid schedule entry
    pub fn check_blob_schedule(&self) -> Result<(), ForkOrderError> {
        for fork in Fork::BLOB_FORKS {
            let entry = self.blob_schedule.as_ref().and_then(|s| s.get(fork));
            if let Some(entry) = entry {
                entry.validate(fork)?;
            }
            if self.fork_block(fork).is_some() && entry.is_none() {
                return Err(ForkOrderError::MissingBlobConfig { fork });
            }
        }
        Ok(())
    }
}
