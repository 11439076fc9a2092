//! Folder-membership batch integration tests

#[cfg(test)]
mod tests {
    use crate::common::FakeFolderApi;
    use crate::common::fakes::Gate;
    use crate::common::fixtures::{CallCounter, dashboards, notifier};
    use crate::{assert_err, assert_ok};
    use bi_portal::config::BulkConfig;
    use bi_portal::core::assets::SharingModel;
    use bi_portal::core::notify::{RecordingNotifier, Severity};
    use bi_portal::{BulkDialog, DialogOutcome, FolderBatchApplier, JobState};
    use std::sync::Arc;
    use std::time::Duration;

    struct Harness {
        api: Arc<FakeFolderApi>,
        notifier: Arc<RecordingNotifier>,
        dialog: Arc<BulkDialog<FolderBatchApplier>>,
        closed: CallCounter,
        completed: CallCounter,
    }

    fn harness(api: FakeFolderApi) -> Harness {
        let api = Arc::new(api);
        let notifier = notifier();
        let closed = CallCounter::new();
        let completed = CallCounter::new();

        let delay = BulkConfig::default().folder_close_delay();
        let applier = FolderBatchApplier::new(api.clone(), delay);
        let dialog = BulkDialog::new(applier, notifier.clone())
            .on_close(closed.callback())
            .on_complete(completed.callback());

        Harness {
            api,
            notifier,
            dialog: Arc::new(dialog),
            closed,
            completed,
        }
    }

    fn shared_q4() -> FakeFolderApi {
        FakeFolderApi::new()
            .with_folder("f-q4", "Shared-Q4", SharingModel::Account)
            .with_folder("f-me", "My stuff", SharingModel::Private)
    }

    #[tokio::test(start_paused = true)]
    async fn test_three_dashboards_one_denied() {
        let h = harness(shared_q4().rejecting("d-3", "access denied"));

        assert_ok!(h.dialog.open(dashboards(3)).await);
        h.dialog.action().select_folder("f-q4");
        let outcome = assert_ok!(h.dialog.submit().await);

        let report = outcome.report();
        assert!(matches!(outcome, DialogOutcome::AwaitingDismissal(_)));
        assert_eq!(report.successes, vec!["name1", "name2"]);
        assert_eq!(report.errors, vec!["name3: access denied"]);
        assert_eq!(report.processed, 3);

        let snapshot = h.dialog.handle().snapshot();
        assert_eq!(snapshot.state, JobState::Completed);
        assert_eq!(snapshot.progress.processed, 3);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(h.dialog.is_open());
        assert_eq!(h.completed.count(), 0);
        assert_eq!(
            h.notifier.messages(Severity::Warning),
            vec!["Added 2 assets to Shared-Q4; 1 failed".to_string()]
        );

        assert!(h.dialog.close());
        assert_eq!(h.completed.count(), 1);
        assert_eq!(h.closed.count(), 1);
    }

    #[tokio::test]
    async fn test_members_sent_in_input_order() {
        let h = harness(shared_q4().rejecting("d-2", "nope").rejecting("d-4", ""));

        assert_ok!(h.dialog.open(dashboards(5)).await);
        h.dialog.action().select_folder("f-q4");
        let outcome = assert_ok!(h.dialog.submit().await);

        assert_eq!(h.api.member_ids(), vec!["d-1", "d-2", "d-3", "d-4", "d-5"]);
        assert!(h.api.calls().iter().all(|(folder, member)| {
            folder == "f-q4" && member.member_type == "DASHBOARD"
        }));

        let report = outcome.report();
        assert_eq!(report.successes, vec!["name1", "name3", "name5"]);
        assert_eq!(report.errors, vec!["name2: nope", "name4: Failed to add"]);
        assert_eq!(report.successes.len() + report.errors.len(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clean_success_completes_without_manual_close() {
        let h = harness(shared_q4());

        assert_ok!(h.dialog.open(dashboards(2)).await);
        h.dialog.action().select_folder("f-q4");
        let outcome = assert_ok!(h.dialog.submit().await);

        assert!(matches!(outcome, DialogOutcome::AutoClosed(_)));
        assert!(!h.dialog.is_open());
        assert_eq!(h.completed.count(), 1);
        assert_eq!(
            h.notifier.messages(Severity::Success),
            vec!["Added 2 assets to Shared-Q4".to_string()]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_close_during_delay_completes_once() {
        let h = harness(shared_q4());
        assert_ok!(h.dialog.open(dashboards(1)).await);
        h.dialog.action().select_folder("f-q4");

        let dialog = h.dialog.clone();
        let submit = tokio::spawn(async move { dialog.submit().await });

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(h.dialog.handle().is_open());
        assert!(h.dialog.handle().close());
        assert_eq!(h.completed.count(), 1);

        let outcome = assert_ok!(submit.await.unwrap());
        assert!(matches!(outcome, DialogOutcome::AutoClosed(_)));
        assert_eq!(h.completed.count(), 1);
        assert_eq!(h.closed.count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_refused_while_running() {
        let gate = Gate::default();
        let h = harness(shared_q4().gated("d-2", gate.clone()));
        assert_ok!(h.dialog.open(dashboards(3)).await);
        h.dialog.action().select_folder("f-q4");

        let handle = h.dialog.handle();
        let dialog = h.dialog.clone();
        let submit = tokio::spawn(async move { dialog.submit().await });

        gate.reached.notified().await;
        let snapshot = handle.snapshot();
        assert!(snapshot.is_running());
        assert_eq!(snapshot.progress.processed, 1);
        assert!(!handle.can_close());
        assert!(!handle.close());
        assert!(handle.is_open());
        assert_eq!(h.closed.count(), 0);

        gate.release.notify_one();
        assert_ok!(submit.await.unwrap());
        assert_eq!(h.completed.count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_folder_change_mid_run_applies_to_next_submission() {
        let gate = Gate::default();
        let h = harness(
            shared_q4()
                .with_folder("f-fin", "Finance", SharingModel::Account)
                .gated("d-1", gate.clone()),
        );
        assert_ok!(h.dialog.open(dashboards(3)).await);
        h.dialog.action().select_folder("f-q4");

        let dialog = h.dialog.clone();
        let submit = tokio::spawn(async move { dialog.submit().await });

        gate.reached.notified().await;
        h.dialog.action().select_folder("f-fin");
        gate.release.notify_one();
        assert_ok!(submit.await.unwrap());

        let folders: Vec<String> = h.api.calls().into_iter().map(|(f, _)| f).collect();
        assert_eq!(folders, vec!["f-q4", "f-q4", "f-q4"]);
        assert_eq!(
            h.notifier.messages(Severity::Success),
            vec!["Added 3 assets to Shared-Q4".to_string()]
        );
        assert_eq!(h.dialog.action().selected_folder().as_deref(), Some("f-fin"));
    }

    #[tokio::test]
    async fn test_reopen_dismisses_held_results() {
        let h = harness(shared_q4().rejecting("d-2", "access denied"));
        assert_ok!(h.dialog.open(dashboards(2)).await);
        h.dialog.action().select_folder("f-q4");
        let outcome = assert_ok!(h.dialog.submit().await);
        assert!(matches!(outcome, DialogOutcome::AwaitingDismissal(_)));

        assert_ok!(h.dialog.open(dashboards(1)).await);
        assert_eq!(h.completed.count(), 1);
        assert_eq!(h.closed.count(), 1);
        assert!(h.dialog.is_open());
        assert_eq!(h.dialog.selected().len(), 1);
        assert_eq!(h.dialog.handle().snapshot().state, JobState::Idle);

        assert!(h.dialog.close());
        assert_eq!(h.completed.count(), 1);
        assert_eq!(h.closed.count(), 2);
    }

    #[tokio::test]
    async fn test_no_folder_selected_makes_no_calls() {
        let h = harness(shared_q4());

        assert_ok!(h.dialog.open(dashboards(2)).await);
        let err = assert_err!(h.dialog.submit().await);

        assert!(err.is_validation());
        assert!(h.api.calls().is_empty());
        assert_eq!(
            h.notifier.messages(Severity::Warning),
            vec!["Please select a folder".to_string()]
        );
        assert!(h.dialog.is_open());
    }

    #[tokio::test]
    async fn test_only_shared_folders_offered() {
        let h = harness(shared_q4());
        assert_ok!(h.dialog.open(dashboards(1)).await);

        let targets = h.dialog.action().targets();
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].name, "Shared-Q4");
    }

    #[tokio::test]
    async fn test_load_failure_leaves_no_targets() {
        let h = harness(FakeFolderApi::new().failing_list("service unavailable"));
        assert_ok!(h.dialog.open(dashboards(1)).await);

        assert!(h.dialog.action().targets().is_empty());
        assert_eq!(
            h.notifier.messages(Severity::Error),
            vec!["Failed to load folders: service unavailable".to_string()]
        );
    }

    #[tokio::test]
    async fn test_try_again_after_total_failure() {
        let h = harness(
            shared_q4()
                .rejecting("d-1", "access denied")
                .rejecting("d-2", "access denied"),
        );
        assert_ok!(h.dialog.open(dashboards(2)).await);
        h.dialog.action().select_folder("f-q4");

        assert_ok!(h.dialog.submit().await);
        assert_eq!(
            h.notifier.messages(Severity::Error),
            vec!["Failed to add 2 assets to Shared-Q4".to_string()]
        );

        assert_ok!(h.dialog.try_again());
        assert_eq!(h.dialog.handle().snapshot().progress.processed, 0);

        let outcome = assert_ok!(h.dialog.submit().await);
        assert_eq!(outcome.report().processed, 2);
        assert_eq!(h.api.member_ids(), vec!["d-1", "d-2", "d-1", "d-2"]);
    }

    #[tokio::test]
    async fn test_partial_failure_has_no_retry() {
        let h = harness(shared_q4().rejecting("d-1", "access denied"));
        assert_ok!(h.dialog.open(dashboards(2)).await);
        h.dialog.action().select_folder("f-q4");
        assert_ok!(h.dialog.submit().await);

        assert_err!(h.dialog.try_again());
        assert_eq!(h.dialog.handle().snapshot().state, JobState::Completed);
    }
}
