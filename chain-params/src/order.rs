//! Fork Order Validation
//!
//! A schedule must respect the catalog order: a mandatory fork cannot be
//! scheduled unless every earlier mandatory fork is, and no later fork may
//! activate before an earlier one. Unscheduled optional forks are skipped.

use tracing::debug;

use crate::catalog::ForkPoint;
use crate::config::ChainConfig;
use crate::error::ForkOrderError;
use crate::logging::{fields, operations};

impl ChainConfig {
    /// Check the schedule against the catalog order.
    ///
    /// Reports the first violation only.
    pub fn check_fork_order(&self) -> Result<(), ForkOrderError> {
        let mut last: Option<ForkPoint<'_>> = None;
        for cur in self.fork_points() {
            if let Some(prev) = last {
                match (prev.threshold, cur.threshold) {
                    (None, Some(later_block)) => {
                        return Err(ForkOrderError::NotEnabled {
                            earlier: prev.fork,
                            later: cur.fork,
                            later_block: later_block.clone(),
                        });
                    }
                    (Some(earlier_block), Some(later_block)) if earlier_block > later_block => {
                        return Err(ForkOrderError::OutOfOrder {
                            earlier: prev.fork,
                            earlier_block: earlier_block.clone(),
                            later: cur.fork,
                            later_block: later_block.clone(),
                        });
                    }
                    _ => {}
                }
            }
            // An unscheduled optional fork does not become the reference point
            if !cur.optional || cur.threshold.is_some() {
                last = Some(cur);
            }
        }
        Ok(())
    }

    /// Full load-time validation: fork order, then blob schedule
    pub fn validate(&self) -> Result<(), ForkOrderError> {
        self.check_fork_order()?;
        self.check_blob_schedule()?;
        debug!(
            { fields::OPERATION } = operations::VALIDATE,
            scheduled = self.scheduled_forks().count(),
            "Chain config validated"
        );
        Ok(())
    }
}
