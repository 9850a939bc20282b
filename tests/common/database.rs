//! Test database utilities
//!
//! Provides in-memory SQLite database for testing without external dependencies.
//! Each test gets an isolated database instance.

use repo_sweep::config::DatabaseConfig;
use repo_sweep::storage::Database;
use repo_sweep::storage::database::entities::{project, repo, tag};
use std::sync::Arc;

/// Test database wrapper providing isolated in-memory SQLite instances
#[derive(Debug, Clone)]
pub struct TestDatabase {
    inner: Arc<Database>,
}

impl TestDatabase {
    /// Create a migrated in-memory database
    pub async fn new() -> Self {
        let db = Database::new(&DatabaseConfig::in_memory())
            .await
            .expect("Failed to create in-memory test database");

        db.migrate()
            .await
            .expect("Failed to run database migrations");

        Self {
            inner: Arc::new(db),
        }
    }

    /// Get reference to the underlying database
    pub fn db(&self) -> &Database {
        &self.inner
    }

    /// Get Arc to the underlying database
    pub fn db_arc(&self) -> Arc<Database> {
        Arc::clone(&self.inner)
    }

    pub async fn add_repo(&self, model: repo::Model) -> repo::Model {
        self.inner
            .insert_repo(model)
            .await
            .expect("Failed to insert repo")
    }

    pub async fn add_project(&self, model: project::Model) -> project::Model {
        self.inner
            .insert_project(model)
            .await
            .expect("Failed to insert project")
    }

    pub async fn add_tag(&self, model: tag::Model) -> tag::Model {
        self.inner
            .insert_tag(model)
            .await
            .expect("Failed to insert tag")
    }

    pub async fn tag_project(&self, project: &project::Model, tag: &tag::Model) {
        self.inner
            .tag_project(&project.id, &tag.id)
            .await
            .expect("Failed to tag project")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::RepoFactory;

    #[tokio::test]
    async fn test_database_creation() {
        let db = TestDatabase::new().await;
        assert!(db.db().health_check().await.is_ok());
        assert_eq!(db.db().count_repos().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_databases_are_isolated() {
        let first = TestDatabase::new().await;
        let second = TestDatabase::new().await;

        first.add_repo(RepoFactory::create("acme/one")).await;
        assert_eq!(first.db().count_repos().await.unwrap(), 1);
        assert_eq!(second.db().count_repos().await.unwrap(), 0);
    }
}
