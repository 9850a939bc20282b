use crate::core::batch::Selection;
use crate::utils::error::{Result, SweepError};
use sea_orm::*;
use std::collections::BTreeMap;
use tracing::debug;

use super::super::entities::{self, project, project_tag, repo, tag};
use super::types::{RepoRecord, SeaOrmDatabase};

impl SeaOrmDatabase {
    /// Repo IDs in the selection window, most recently added first
    pub async fn find_repo_ids(&self, selection: &Selection) -> Result<Vec<String>> {
        debug!(
            limit = selection.limit,
            skip = selection.skip,
            name = ?selection.name,
            "Listing repo ids"
        );

        let mut query = entities::Repo::find()
            .select_only()
            .column(repo::Column::Id)
            .order_by_desc(repo::Column::AddedAt)
            .order_by_asc(repo::Column::Id);

        if let Some(name) = &selection.name {
            query = query.filter(repo::Column::FullName.eq(name.as_str()));
        }
        if selection.limit > 0 {
            query = query.limit(selection.limit);
        }
        if selection.skip > 0 {
            query = query.offset(selection.skip);
        }

        query
            .into_tuple::<String>()
            .all(&self.db)
            .await
            .map_err(SweepError::Database)
    }

    /// Load a repo with its projects, then the tags of those projects
    pub async fn find_repo_with_projects(&self, id: &str) -> Result<Option<RepoRecord>> {
        let mut rows = entities::Repo::find_by_id(id.to_string())
            .find_with_related(entities::Project)
            .order_by_asc(project::Column::Name)
            .all(&self.db)
            .await
            .map_err(SweepError::Database)?;

        let Some((repo, projects)) = rows.pop() else {
            return Ok(None);
        };
        let tags = self.find_project_tags(&projects).await?;

        Ok(Some(RepoRecord {
            repo,
            projects,
            tags,
        }))
    }

    async fn find_project_tags(
        &self,
        projects: &[project::Model],
    ) -> Result<BTreeMap<String, Vec<String>>> {
        let mut tags: BTreeMap<String, Vec<String>> = BTreeMap::new();
        if projects.is_empty() {
            return Ok(tags);
        }

        let project_ids = projects.iter().map(|project| project.id.clone());
        let links = entities::ProjectTag::find()
            .filter(project_tag::Column::ProjectId.is_in(project_ids))
            .find_also_related(entities::Tag)
            .order_by_asc(tag::Column::Code)
            .all(&self.db)
            .await
            .map_err(SweepError::Database)?;

        for (link, tag) in links {
            if let Some(tag) = tag {
                tags.entry(link.project_id).or_default().push(tag.code);
            }
        }
        Ok(tags)
    }

    /// Every stored tag, sorted by code
    pub async fn find_tags(&self) -> Result<Vec<tag::Model>> {
        entities::Tag::find()
            .order_by_asc(tag::Column::Code)
            .all(&self.db)
            .await
            .map_err(SweepError::Database)
    }

    /// Insert a repo
    pub async fn insert_repo(&self, model: repo::Model) -> Result<repo::Model> {
        debug!("Inserting repo: {}", model.full_name);

        let active_model = repo::ActiveModel {
            id: Set(model.id),
            full_name: Set(model.full_name),
            owner_id: Set(model.owner_id),
            description: Set(model.description),
            stars: Set(model.stars),
            contributor_count: Set(model.contributor_count),
            archived: Set(model.archived),
            added_at: Set(model.added_at),
            created_at: Set(model.created_at),
            last_commit: Set(model.last_commit),
        };

        active_model
            .insert(&self.db)
            .await
            .map_err(SweepError::Database)
    }

    /// Insert a project
    pub async fn insert_project(&self, model: project::Model) -> Result<project::Model> {
        debug!("Inserting project: {}", model.slug);

        let active_model = project::ActiveModel {
            id: Set(model.id),
            name: Set(model.name),
            slug: Set(model.slug),
            description: Set(model.description),
            status: Set(model.status),
            logo: Set(model.logo),
            repo_id: Set(model.repo_id),
            created_at: Set(model.created_at),
        };

        active_model
            .insert(&self.db)
            .await
            .map_err(SweepError::Database)
    }

    /// Insert a tag
    pub async fn insert_tag(&self, model: tag::Model) -> Result<tag::Model> {
        debug!("Inserting tag: {}", model.code);

        let active_model = tag::ActiveModel {
            id: Set(model.id),
            code: Set(model.code),
            name: Set(model.name),
            description: Set(model.description),
            created_at: Set(model.created_at),
        };

        active_model
            .insert(&self.db)
            .await
            .map_err(SweepError::Database)
    }

    /// Attach a tag to a project
    pub async fn tag_project(&self, project_id: &str, tag_id: &str) -> Result<()> {
        let link = project_tag::ActiveModel {
            project_id: Set(project_id.to_string()),
            tag_id: Set(tag_id.to_string()),
        };

        entities::ProjectTag::insert(link)
            .exec_without_returning(&self.db)
            .await
            .map_err(SweepError::Database)?;
        Ok(())
    }

    /// Delete a repo, returning whether a row was removed
    pub async fn delete_repo(&self, id: &str) -> Result<bool> {
        let result = entities::Repo::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            .map_err(SweepError::Database)?;

        Ok(result.rows_affected > 0)
    }

    /// Total number of stored repos
    pub async fn count_repos(&self) -> Result<u64> {
        entities::Repo::find()
            .count(&self.db)
            .await
            .map_err(SweepError::Database)
    }
}
