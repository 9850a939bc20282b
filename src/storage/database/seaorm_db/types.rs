use super::super::entities::{project, repo};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// SeaORM-based database implementation
#[derive(Debug)]
pub struct SeaOrmDatabase {
    pub(super) db: DatabaseConnection,
}

/// A repo loaded together with its projects and their tags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoRecord {
    pub repo: repo::Model,
    pub projects: Vec<project::Model>,
    /// Tag codes by project ID, sorted by code
    #[serde(default)]
    pub tags: BTreeMap<String, Vec<String>>,
}
