//! Repo selection tests
//!
//! Exercises the database as an entity source: ordering, windowing and
//! name filtering.

#[cfg(test)]
mod tests {
    use crate::common::{ProjectFactory, RepoFactory, TagFactory, TestDatabase};
    use crate::{assert_err, assert_ok};
    use repo_sweep::{EntitySource, Selection, SweepError};

    /// Three repos, most recently added: b, c, a
    async fn seeded() -> (TestDatabase, [String; 3]) {
        let db = TestDatabase::new().await;
        let a = db.add_repo(RepoFactory::added_days_ago("acme/a", 10)).await;
        let b = db.add_repo(RepoFactory::added_days_ago("acme/b", 1)).await;
        let c = db.add_repo(RepoFactory::added_days_ago("acme/c", 5)).await;
        (db, [a.id, b.id, c.id])
    }

    fn selection(limit: u64, skip: u64, name: Option<&str>) -> Selection {
        Selection {
            limit,
            skip,
            name: name.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_identifiers_newest_first() {
        let (db, [a, b, c]) = seeded().await;

        let ids = assert_ok!(db.db().resolve_identifiers(&Selection::default()).await);
        assert_eq!(ids, vec![b, c, a]);
    }

    #[tokio::test]
    async fn test_limit_and_skip_window() {
        let (db, [a, b, c]) = seeded().await;

        let first_two = db.db().resolve_identifiers(&selection(2, 0, None)).await.unwrap();
        assert_eq!(first_two, vec![b, c.clone()]);

        let skipped = db.db().resolve_identifiers(&selection(0, 1, None)).await.unwrap();
        assert_eq!(skipped, vec![c.clone(), a]);

        let middle = db.db().resolve_identifiers(&selection(1, 1, None)).await.unwrap();
        assert_eq!(middle, vec![c]);

        let past_end = db.db().resolve_identifiers(&selection(0, 5, None)).await.unwrap();
        assert!(past_end.is_empty());
    }

    #[tokio::test]
    async fn test_name_filter() {
        let (db, [a, _, _]) = seeded().await;

        let ids = db
            .db()
            .resolve_identifiers(&selection(0, 0, Some("acme/a")))
            .await
            .unwrap();
        assert_eq!(ids, vec![a]);

        let none = db
            .db()
            .resolve_identifiers(&selection(0, 0, Some("acme/unknown")))
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_resolve_entity_loads_projects() {
        let db = TestDatabase::new().await;
        let repo = db.add_repo(RepoFactory::create("acme/tool")).await;
        db.add_project(ProjectFactory::create(&repo, "tool-b")).await;
        db.add_project(ProjectFactory::create(&repo, "tool-a")).await;

        let record = assert_ok!(db.db().resolve_entity(&repo.id).await);
        assert_eq!(record.repo.full_name, "acme/tool");
        let slugs: Vec<_> = record.projects.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["tool-a", "tool-b"]);
        assert_eq!(db.db().entity_label(&record), "acme/tool");
    }

    #[tokio::test]
    async fn test_resolve_entity_loads_project_tags() {
        let db = TestDatabase::new().await;
        let repo = db.add_repo(RepoFactory::create("acme/kit")).await;
        let kit = db.add_project(ProjectFactory::create(&repo, "kit")).await;
        let plain = db.add_project(ProjectFactory::create(&repo, "kit-plain")).await;
        let ui = db.add_tag(TagFactory::create("ui")).await;
        let build = db.add_tag(TagFactory::create("build")).await;
        db.add_tag(TagFactory::create("unused")).await;
        db.tag_project(&kit, &ui).await;
        db.tag_project(&kit, &build).await;

        let record = assert_ok!(db.db().resolve_entity(&repo.id).await);
        assert_eq!(record.tags.get(&kit.id), Some(&vec!["build".to_string(), "ui".to_string()]));
        assert!(!record.tags.contains_key(&plain.id));

        let codes: Vec<_> = db.db().find_tags().await.unwrap().into_iter().map(|t| t.code).collect();
        assert_eq!(codes, vec!["build", "ui", "unused"]);
    }

    #[tokio::test]
    async fn test_deleted_repo_is_not_found() {
        let db = TestDatabase::new().await;
        let repo = db.add_repo(RepoFactory::create("acme/gone")).await;
        assert!(db.db().delete_repo(&repo.id).await.unwrap());

        let err = assert_err!(db.db().resolve_entity(&repo.id).await);
        match err {
            SweepError::EntityNotFound { id } => assert_eq!(id, repo.id),
            other => panic!("unexpected error: {other}"),
        }
    }
}
