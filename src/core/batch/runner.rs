//! Sequential batch runner

use super::job::BatchJob;
use super::types::BatchReport;
use crate::core::assets::AssetRef;
use crate::utils::error::{PortalError, Result};
use async_trait::async_trait;
use std::time::Instant;
use tracing::{debug, info, warn};

/// The per-asset step of a bulk action
#[async_trait]
pub trait ItemOperation: Send + Sync {
    /// Apply the action to one asset
    async fn apply_one(&self, asset: &AssetRef) -> Result<()>;

    /// Message recorded when a failure carries no text of its own
    fn failure_fallback(&self) -> &str;
}

/// Drives a [`BatchJob`] through one sequential pass over a selection
pub struct BatchRunner;

impl BatchRunner {
    /// Attempt every asset in input order, one at a time.
    ///
    /// Each attempt is fully awaited before the next begins. Item failures are
    /// recorded on the job and never abort the pass; only job state errors
    /// propagate.
    pub async fn run<O>(job: &BatchJob, assets: &[AssetRef], op: &O) -> Result<BatchReport>
    where
        O: ItemOperation + ?Sized,
    {
        let started = Instant::now();
        job.start(assets.len())?;
        info!(job_id = %job.id(), total = assets.len(), "Starting batch");

        for asset in assets {
            debug!(job_id = %job.id(), asset_id = %asset.id, "Applying to asset");
            match op.apply_one(asset).await {
                Ok(()) => job.record_success(&asset.name)?,
                Err(e) => {
                    let message = failure_message(&asset.name, &e, op.failure_fallback());
                    warn!(job_id = %job.id(), asset_id = %asset.id, "{}", message);
                    job.record_failure(message)?;
                }
            }
        }

        job.complete()?;
        let report = BatchReport::from_snapshot(job.snapshot(), started.elapsed());
        info!(
            job_id = %report.job_id,
            successes = report.successes.len(),
            errors = report.errors.len(),
            duration_ms = report.duration.as_millis() as u64,
            "Batch completed"
        );
        Ok(report)
    }
}

/// `"<name>: <detail>"`, falling back when the error has no message
pub fn failure_message(name: &str, error: &PortalError, fallback: &str) -> String {
    let detail = error.detail();
    let detail = detail.trim();
    if detail.is_empty() {
        format!("{}: {}", name, fallback)
    } else {
        format!("{}: {}", name, detail)
    }
}
