//! Live progress output for a running batch

use bi_portal::DialogHandle;
use tokio::task::JoinHandle;

/// Print a line per progress change until the job completes
pub fn spawn_printer(handle: &DialogHandle) -> JoinHandle<()> {
    let mut updates = handle.subscribe();
    tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let snapshot = updates.borrow_and_update().clone();
            let progress = &snapshot.progress;
            if progress.total > 0 {
                eprintln!(
                    "[{}/{}] {:.0}%",
                    progress.processed,
                    progress.total,
                    snapshot.percent()
                );
            }
            if snapshot.is_completed() {
                break;
            }
        }
    })
}
