//! Bulk commands
//!
//! Each command drives a dialog the way the asset list page does: open with a
//! selection, submit, then dismiss a held result.

use super::progress::spawn_printer;
use anyhow::{Result, bail};
use bi_portal::core::assets::{AssetRef, Tag};
use bi_portal::core::notify::TracingNotifier;
use bi_portal::{
    BatchReport, BulkAction, BulkDialog, DialogOutcome, FolderBatchApplier, PortalConfig,
    TagBatchApplier,
};
use std::sync::Arc;
use tracing::info;

pub async fn add_to_folder(
    config: &PortalConfig,
    folder_id: &str,
    assets: Vec<AssetRef>,
) -> Result<bool> {
    let applier = FolderBatchApplier::new(super::client(config)?, config.bulk.folder_close_delay());
    let dialog = BulkDialog::new(applier, Arc::new(TracingNotifier));

    dialog.open(assets).await?;
    if !dialog.action().targets().iter().any(|f| f.id == folder_id) {
        bail!("Folder '{}' is not a shared folder", folder_id);
    }
    dialog.action().select_folder(folder_id);

    run_dialog(&dialog).await
}

pub async fn tag(config: &PortalConfig, tags: Vec<Tag>, assets: Vec<AssetRef>) -> Result<bool> {
    let applier = TagBatchApplier::new(super::client(config)?, config.bulk.tag_close_delay());
    applier.set_tag_rows(tags);
    let dialog = BulkDialog::new(applier, Arc::new(TracingNotifier));

    dialog.open(assets).await?;
    run_dialog(&dialog).await
}

async fn run_dialog<A: BulkAction>(dialog: &BulkDialog<A>) -> Result<bool> {
    let printer = spawn_printer(&dialog.handle());
    let outcome = dialog.submit().await;
    printer.abort();

    let outcome = outcome?;
    if let DialogOutcome::AwaitingDismissal(_) = outcome {
        dialog.close();
    }

    let report = outcome.report();
    print_report(report);
    info!(job_id = %report.job_id, "Dialog dismissed");
    Ok(!report.has_errors())
}

fn print_report(report: &BatchReport) {
    for name in &report.successes {
        println!("ok    {}", name);
    }
    for error in &report.errors {
        println!("fail  {}", error);
    }
    println!(
        "{} of {} succeeded in {} ms",
        report.successes.len(),
        report.total,
        report.duration.as_millis()
    );
}
