//! `build-static-api`: export the catalog as static JSON files

use super::{Task, TaskContext, TaskReport};
use crate::core::batch::Outcome;
use crate::storage::RepoRecord;
use crate::storage::database::entities::{project, tag};
use crate::utils::error::Result;
use anyhow::bail;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::info;

/// Every exported repo, archived ones included
pub const FULL_LIST_FILE: &str = "repos-full.json";
/// Maintained or promoted repos, with the tags they use
pub const MAIN_LIST_FILE: &str = "repos.json";

const DEFAULT_PROJECT_STATUS: &str = "active";
const PROMOTED_PROJECT_STATUS: &str = "promoted";

/// Public view of a stored repo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoItem {
    pub name: String,
    pub full_name: String,
    pub owner_id: String,
    pub description: Option<String>,
    pub stars: i32,
    pub contributor_count: Option<i32>,
    pub added_at: String,
    pub created_at: String,
    pub pushed_at: Option<String>,
    pub status: RepoStatus,
    pub projects: Vec<ProjectItem>,
}

impl RepoItem {
    /// At least one of its projects is promoted
    pub fn is_promoted(&self) -> bool {
        self.projects
            .iter()
            .any(|project| project.status == PROMOTED_PROJECT_STATUS)
    }

    /// Archived repos stay out of the main list unless promoted
    pub fn in_main_list(&self) -> bool {
        self.status == RepoStatus::Active || self.is_promoted()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepoStatus {
    Active,
    Archived,
}

/// Public view of a project hosted by a repo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectItem {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    /// Tag codes, sorted
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Public view of a tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagItem {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: String,
}

impl From<tag::Model> for TagItem {
    fn from(tag: tag::Model) -> Self {
        Self {
            created_at: format_date(&tag.created_at),
            code: tag.code,
            name: tag.name,
            description: tag.description,
        }
    }
}

/// Shape of `repos-full.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoList {
    pub date: DateTime<Utc>,
    pub count: usize,
    pub repos: Vec<RepoItem>,
}

impl RepoList {
    fn new(date: DateTime<Utc>, repos: Vec<RepoItem>) -> Self {
        Self {
            date,
            count: repos.len(),
            repos,
        }
    }
}

/// Shape of `repos.json`: only the tags its repos use are listed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainList {
    pub date: DateTime<Utc>,
    pub count: usize,
    pub tags: Vec<TagItem>,
    pub repos: Vec<RepoItem>,
}

impl MainList {
    pub fn new(date: DateTime<Utc>, all_repos: &[RepoItem], all_tags: Vec<tag::Model>) -> Self {
        let repos: Vec<RepoItem> = all_repos
            .iter()
            .filter(|item| item.in_main_list())
            .cloned()
            .collect();
        let used: BTreeSet<&str> = repos
            .iter()
            .flat_map(|item| &item.projects)
            .flat_map(|project| &project.tags)
            .map(String::as_str)
            .collect();
        let tags = all_tags
            .into_iter()
            .filter(|tag| used.contains(tag.code.as_str()))
            .map(TagItem::from)
            .collect();

        Self {
            date,
            count: repos.len(),
            tags,
            repos,
        }
    }
}

/// Writes `repos-full.json` and `repos.json` from the stored repos
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildStaticApiTask;

#[async_trait]
impl Task for BuildStaticApiTask {
    fn name(&self) -> &'static str {
        "build-static-api"
    }

    fn description(&self) -> &'static str {
        "Export repos and their projects as static JSON files"
    }

    async fn run(&self, ctx: &TaskContext) -> Result<TaskReport> {
        let report = ctx
            .process_repos(|record, _index| async move { project_repo(record) })
            .await?;

        let tags = ctx.database().find_tags().await?;
        let date = Utc::now();
        let main = MainList::new(date, &report.payloads, tags);
        let full = RepoList::new(date, report.payloads);

        info!(
            full = full.count,
            main = main.count,
            tags = main.tags.len(),
            "Saving static API files"
        );
        let files = vec![
            ctx.save_json(&full, FULL_LIST_FILE).await?,
            ctx.save_json(&main, MAIN_LIST_FILE).await?,
        ];

        Ok(TaskReport {
            task: self.name().to_string(),
            summary: report.summary,
            files,
        })
    }
}

/// Unit of work: turn one stored repo into its public item
pub fn project_repo(record: RepoRecord) -> anyhow::Result<Outcome<RepoItem>> {
    let RepoRecord {
        repo,
        projects,
        mut tags,
    } = record;
    if repo.full_name.trim().is_empty() {
        bail!("repo {} has no full_name", repo.id);
    }

    let has_projects = !projects.is_empty();
    let archived = repo.archived;
    let stars = repo.stars;
    let promoted = projects
        .iter()
        .any(|project| project.status.as_deref() == Some(PROMOTED_PROJECT_STATUS));

    let name = repo
        .full_name
        .rsplit('/')
        .next()
        .unwrap_or(&repo.full_name)
        .to_string();
    let projects = projects
        .into_iter()
        .map(|project| {
            let codes = tags.remove(&project.id).unwrap_or_default();
            project_item(project, codes, repo.description.as_deref())
        })
        .collect();

    let item = RepoItem {
        name,
        full_name: repo.full_name,
        owner_id: repo.owner_id,
        description: repo.description,
        stars: repo.stars,
        contributor_count: repo.contributor_count,
        added_at: format_date(&repo.added_at),
        created_at: format_date(&repo.created_at),
        pushed_at: repo.last_commit.as_ref().map(format_date),
        status: if archived {
            RepoStatus::Archived
        } else {
            RepoStatus::Active
        },
        projects,
    };

    let mut outcome = Outcome::success(item)
        .with_meta("processed", true)
        .with_meta("stars", stars);
    if !has_projects {
        outcome = outcome.with_meta("no projects", true);
    }
    if archived {
        outcome = outcome.with_meta("archived", true);
    }
    if promoted {
        outcome = outcome.with_meta("promoted", true);
    }
    Ok(outcome)
}

fn project_item(
    project: project::Model,
    tags: Vec<String>,
    repo_description: Option<&str>,
) -> ProjectItem {
    ProjectItem {
        description: project
            .description
            .filter(|text| !text.trim().is_empty())
            .or_else(|| repo_description.map(str::to_string)),
        status: project
            .status
            .unwrap_or_else(|| DEFAULT_PROJECT_STATUS.to_string()),
        name: project.name,
        slug: project.slug,
        logo: project.logo,
        tags,
    }
}

/// `YYYY-MM-DD` in UTC
pub fn format_date(date: &DateTimeWithTimeZone) -> String {
    date.with_timezone(&Utc).format("%Y-%m-%d").to_string()
}
