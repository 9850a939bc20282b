use crate::core::batch::{EntitySource, Selection};
use crate::utils::error::{Result, SweepError};
use async_trait::async_trait;

use super::types::{RepoRecord, SeaOrmDatabase};

#[async_trait]
impl EntitySource for SeaOrmDatabase {
    type Id = String;
    type Entity = RepoRecord;

    async fn resolve_identifiers(&self, selection: &Selection) -> Result<Vec<String>> {
        self.find_repo_ids(selection).await
    }

    async fn resolve_entity(&self, id: &String) -> Result<RepoRecord> {
        self.find_repo_with_projects(id)
            .await?
            .ok_or_else(|| SweepError::entity_not_found(id))
    }

    fn entity_label(&self, entity: &RepoRecord) -> String {
        entity.repo.full_name.clone()
    }
}
