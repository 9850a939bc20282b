//! Built-in task tests
//!
//! Runs `build-static-api` end to end into a temporary output directory.

#[cfg(test)]
mod tests {
    use crate::assert_ok;
    use crate::common::{ProjectFactory, RepoFactory, TagFactory, TestDatabase};
    use repo_sweep::core::tasks::{FULL_LIST_FILE, MAIN_LIST_FILE, MainList, RepoList, RepoStatus};
    use repo_sweep::storage::JsonWriter;
    use repo_sweep::{ExecutionOptions, SweepError, TaskContext, TaskRegistry};
    use std::path::Path;

    fn read_list(path: &Path) -> RepoList {
        let content = std::fs::read(path).expect("output file should exist");
        serde_json::from_slice(&content).expect("output file should be a repo list")
    }

    fn read_main_list(path: &Path) -> MainList {
        let content = std::fs::read(path).expect("output file should exist");
        serde_json::from_slice(&content).expect("output file should be a main list")
    }

    async fn catalog() -> TestDatabase {
        let db = TestDatabase::new().await;

        let bundler = db
            .add_repo(RepoFactory::added_days_ago("acme/bundler", 1))
            .await;
        db.add_project(ProjectFactory::create(&bundler, "bundler")).await;
        db.add_project(ProjectFactory::with_status(&bundler, "bundler-cli", "promoted"))
            .await;

        let legacy = db.add_repo(RepoFactory::archived("acme/legacy")).await;
        db.add_project(ProjectFactory::create(&legacy, "legacy")).await;

        db.add_repo(RepoFactory::with_stars("acme/docs", 7)).await;
        db
    }

    fn context(db: &TestDatabase, output: &Path, options: ExecutionOptions) -> TaskContext {
        TaskContext::new(db.db_arc(), options, JsonWriter::new(output))
    }

    #[tokio::test]
    async fn test_build_static_api_writes_both_lists() {
        let db = catalog().await;
        let temp = tempfile::tempdir().unwrap();
        let options = ExecutionOptions::builder().concurrency(2).build().unwrap();
        let ctx = context(&db, temp.path(), options);

        let report = assert_ok!(
            TaskRegistry::with_builtin_tasks()
                .run("build-static-api", &ctx)
                .await
        );

        assert_eq!(report.task, "build-static-api");
        assert_eq!(report.summary.total, 3);
        assert_eq!(report.summary.success_count, 3);
        assert_eq!(report.summary.meta.flag_count("no projects"), 1);
        assert_eq!(report.summary.meta.flag_count("promoted"), 1);
        assert_eq!(report.summary.meta.flag_count("archived"), 1);
        assert_eq!(report.summary.meta.total("stars"), 207.0);
        assert_eq!(
            report.files,
            vec![temp.path().join(FULL_LIST_FILE), temp.path().join(MAIN_LIST_FILE)]
        );

        let full = read_list(&temp.path().join(FULL_LIST_FILE));
        assert_eq!(full.count, 3);
        let bundler = full
            .repos
            .iter()
            .find(|repo| repo.full_name == "acme/bundler")
            .expect("bundler should be exported");
        assert_eq!(bundler.projects.len(), 2);
        assert!(full.repos.iter().any(|repo| repo.status == RepoStatus::Archived));

        let main = read_main_list(&temp.path().join(MAIN_LIST_FILE));
        assert_eq!(main.count, 2);
        assert!(main.repos.iter().all(|repo| repo.status == RepoStatus::Active));
        assert!(main.repos.iter().any(|repo| repo.full_name == "acme/docs"));
        assert!(main.tags.is_empty());
    }

    #[tokio::test]
    async fn test_main_list_keeps_promoted_repos_and_their_tags() {
        let db = catalog().await;
        let relic = db.add_repo(RepoFactory::archived("acme/relic")).await;
        let relic_project = db
            .add_project(ProjectFactory::with_status(&relic, "relic", "promoted"))
            .await;
        let legacy_tag = db.add_tag(TagFactory::create("legacy")).await;
        db.add_tag(TagFactory::create("spare")).await;
        db.tag_project(&relic_project, &legacy_tag).await;

        let temp = tempfile::tempdir().unwrap();
        let ctx = context(&db, temp.path(), ExecutionOptions::default());
        TaskRegistry::with_builtin_tasks()
            .run("build-static-api", &ctx)
            .await
            .unwrap();

        let main = read_main_list(&temp.path().join(MAIN_LIST_FILE));
        assert_eq!(main.count, 3);
        let relic = main
            .repos
            .iter()
            .find(|repo| repo.full_name == "acme/relic")
            .expect("promoted archived repo should stay in the main list");
        assert_eq!(relic.status, RepoStatus::Archived);
        assert_eq!(relic.projects[0].tags, vec!["legacy"]);
        assert!(!main.repos.iter().any(|repo| repo.full_name == "acme/legacy"));

        let codes: Vec<_> = main.tags.iter().map(|tag| tag.code.as_str()).collect();
        assert_eq!(codes, vec!["legacy"]);
        assert_eq!(main.tags[0].name, "legacy tools");

        let full = read_list(&temp.path().join(FULL_LIST_FILE));
        assert_eq!(full.count, 4);
    }

    #[tokio::test]
    async fn test_dates_are_exported_as_days() {
        let db = TestDatabase::new().await;
        db.add_repo(RepoFactory::create("acme/dated")).await;
        let temp = tempfile::tempdir().unwrap();
        let ctx = context(&db, temp.path(), ExecutionOptions::default());

        TaskRegistry::with_builtin_tasks()
            .run("build-static-api", &ctx)
            .await
            .unwrap();

        let full = read_list(&temp.path().join(FULL_LIST_FILE));
        let repo = &full.repos[0];
        assert_eq!(repo.name, "dated");
        assert_eq!(repo.created_at, "2020-01-15");
        assert_eq!(repo.pushed_at.as_deref(), Some("2024-05-01"));
        assert_eq!(repo.added_at.len(), "YYYY-MM-DD".len());
    }

    #[tokio::test]
    async fn test_invalid_repo_is_isolated() {
        let db = catalog().await;
        db.add_repo(RepoFactory::create("")).await;
        let temp = tempfile::tempdir().unwrap();
        let ctx = context(&db, temp.path(), ExecutionOptions::default());

        let report = TaskRegistry::with_builtin_tasks()
            .run("build-static-api", &ctx)
            .await
            .unwrap();

        assert_eq!(report.summary.total, 4);
        assert_eq!(report.summary.failure_count, 1);
        assert_eq!(read_list(&temp.path().join(FULL_LIST_FILE)).count, 3);
    }

    #[tokio::test]
    async fn test_invalid_repo_aborts_fail_fast_run() {
        let db = catalog().await;
        db.add_repo(RepoFactory::create("")).await;
        let temp = tempfile::tempdir().unwrap();
        let options = ExecutionOptions::builder().fail_fast(true).build().unwrap();
        let ctx = context(&db, temp.path(), options);

        let err = TaskRegistry::with_builtin_tasks()
            .run("build-static-api", &ctx)
            .await
            .unwrap_err();

        assert!(matches!(err, SweepError::UnitOfWork { .. }));
        assert!(!temp.path().join(FULL_LIST_FILE).exists());
    }

    #[tokio::test]
    async fn test_limit_applies_to_export() {
        let db = catalog().await;
        let temp = tempfile::tempdir().unwrap();
        let options = ExecutionOptions::builder().limit(1).build().unwrap();
        let ctx = context(&db, temp.path(), options);

        let report = TaskRegistry::with_builtin_tasks()
            .run("build-static-api", &ctx)
            .await
            .unwrap();

        assert_eq!(report.summary.total, 1);
        let full = read_list(&temp.path().join(FULL_LIST_FILE));
        assert_eq!(full.repos.len(), 1);
    }
}
