//! Batch runs over the database

#[cfg(test)]
mod tests {
    use crate::common::{RepoFactory, TestDatabase};
    use crate::{assert_err, assert_ok};
    use anyhow::bail;
    use repo_sweep::{BatchRunner, CancelToken, ExecutionOptions, Outcome, SweepError, run_batch};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    async fn seeded(names: &[&str]) -> TestDatabase {
        let db = TestDatabase::new().await;
        // First name is the newest
        for (age, name) in names.iter().enumerate() {
            db.add_repo(RepoFactory::added_days_ago(name, age as i64 + 1))
                .await;
        }
        db
    }

    fn options(concurrency: usize, fail_fast: bool) -> ExecutionOptions {
        ExecutionOptions::builder()
            .concurrency(concurrency)
            .fail_fast(fail_fast)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_payloads_follow_selection_order() {
        let db = seeded(&["acme/a", "acme/b", "acme/c", "acme/d"]).await;

        let report = assert_ok!(
            run_batch(
                db.db(),
                |record, index| async move {
                    // Earlier items take longer
                    tokio::time::sleep(Duration::from_millis(5 * (4 - index as u64))).await;
                    Ok(Outcome::success(record.repo.full_name).with_meta("stars", record.repo.stars))
                },
                &options(3, false),
            )
            .await
        );

        assert_eq!(report.payloads, vec!["acme/a", "acme/b", "acme/c", "acme/d"]);
        assert_eq!(report.summary.total, 4);
        assert_eq!(report.summary.success_count, 4);
        assert_eq!(report.summary.meta.total("stars"), 400.0);
    }

    #[tokio::test]
    async fn test_failing_repo_is_isolated() {
        let db = seeded(&["acme/a", "acme/broken", "acme/c"]).await;

        let report = run_batch(
            db.db(),
            |record, _| async move {
                if record.repo.full_name == "acme/broken" {
                    bail!("cannot read {}", record.repo.full_name);
                }
                Ok(Outcome::success(record.repo.full_name))
            },
            &options(2, false),
        )
        .await
        .unwrap();

        assert_eq!(report.payloads, vec!["acme/a", "acme/c"]);
        assert_eq!(report.summary.success_count, 2);
        assert_eq!(report.summary.failure_count, 1);
    }

    #[tokio::test]
    async fn test_fail_fast_reports_offending_repo() {
        let db = seeded(&["acme/a", "acme/broken", "acme/c"]).await;
        let broken_id = db
            .db()
            .find_repo_ids(&repo_sweep::Selection {
                name: Some("acme/broken".to_string()),
                ..Default::default()
            })
            .await
            .unwrap()
            .remove(0);

        let err = assert_err!(
            run_batch(
                db.db(),
                |record, _| async move {
                    if record.repo.full_name == "acme/broken" {
                        bail!("boom");
                    }
                    Ok(Outcome::success(()))
                },
                &options(1, true),
            )
            .await
        );

        match err {
            SweepError::UnitOfWork { id, label, .. } => {
                assert_eq!(id, broken_id);
                assert_eq!(label, "acme/broken");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_limit_and_name_restrict_the_run() {
        let db = seeded(&["acme/a", "acme/b", "acme/c"]).await;
        let calls = Arc::new(AtomicUsize::new(0));

        let limited = ExecutionOptions::builder().limit(2).build().unwrap();
        let counter = calls.clone();
        let report = run_batch(
            db.db(),
            |record, _| {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(Outcome::success(record.repo.full_name))
                }
            },
            &limited,
        )
        .await
        .unwrap();
        assert_eq!(report.payloads, vec!["acme/a", "acme/b"]);
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        let named = ExecutionOptions::builder()
            .name_filter(Some("acme/c".to_string()))
            .build()
            .unwrap();
        let report = run_batch(
            db.db(),
            |record, _| async move { Ok(Outcome::success(record.repo.full_name)) },
            &named,
        )
        .await
        .unwrap();
        assert_eq!(report.payloads, vec!["acme/c"]);
    }

    #[tokio::test]
    async fn test_empty_catalog_gives_empty_report() {
        let db = TestDatabase::new().await;

        let report = run_batch(
            db.db(),
            |_, _| async move { Ok(Outcome::success(())) },
            &ExecutionOptions::default(),
        )
        .await
        .unwrap();

        assert!(report.payloads.is_empty());
        assert_eq!(report.summary.total, 0);
    }

    #[tokio::test]
    async fn test_cancel_mid_run() {
        let db = seeded(&["acme/a", "acme/b", "acme/c", "acme/d"]).await;
        let cancel = CancelToken::new();
        let started = Arc::new(AtomicUsize::new(0));

        let runner = BatchRunner::new(db.db(), options(1, false)).with_cancel(cancel.clone());
        let err = runner
            .run(|_, _| {
                let (cancel, started) = (cancel.clone(), started.clone());
                async move {
                    if started.fetch_add(1, Ordering::SeqCst) == 1 {
                        cancel.cancel();
                    }
                    Ok(Outcome::success(()))
                }
            })
            .await
            .unwrap_err();

        assert!(matches!(err, SweepError::Cancelled));
        assert_eq!(started.load(Ordering::SeqCst), 2);
    }
}
