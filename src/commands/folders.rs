//! Folders command

use anyhow::Result;
use bi_portal::core::notify::TracingNotifier;
use bi_portal::{FolderBatchApplier, PortalConfig};

/// Print the shared folders, sorted by name
pub async fn execute(config: &PortalConfig) -> Result<()> {
    let applier = FolderBatchApplier::new(super::client(config)?, config.bulk.folder_close_delay());
    let folders = applier.load_targets(&TracingNotifier).await;

    if folders.is_empty() {
        println!("No shared folders");
        return Ok(());
    }
    for folder in folders {
        println!("{}\t{}\t{:?}", folder.id, folder.name, folder.sharing_model);
    }
    Ok(())
}
