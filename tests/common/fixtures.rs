//! Test fixtures and data factories
//!
//! Provides factory methods for creating test data with sensible defaults.
//! All factories create real models, not mocks.

use chrono::{Duration, FixedOffset, TimeZone, Utc};
use repo_sweep::storage::database::entities::{project, repo, tag};
use sea_orm::prelude::DateTimeWithTimeZone;
use uuid::Uuid;

fn now() -> DateTimeWithTimeZone {
    Utc::now().fixed_offset()
}

/// Fixed UTC timestamp at noon
pub fn date(year: i32, month: u32, day: u32) -> DateTimeWithTimeZone {
    FixedOffset::east_opt(0)
        .and_then(|utc| utc.with_ymd_and_hms(year, month, day, 12, 0, 0).single())
        .expect("valid test date")
}

/// Factory for creating test repos
pub struct RepoFactory;

impl RepoFactory {
    /// Create a basic repo added just now
    pub fn create(full_name: &str) -> repo::Model {
        repo::Model {
            id: Uuid::new_v4().to_string(),
            full_name: full_name.to_string(),
            owner_id: format!("owner_{}", &Uuid::new_v4().to_string()[..8]),
            description: Some(format!("{} description", full_name)),
            stars: 100,
            contributor_count: Some(3),
            archived: false,
            added_at: now(),
            created_at: date(2020, 1, 15),
            last_commit: Some(date(2024, 5, 1)),
        }
    }

    /// Create a repo added `days` days ago
    pub fn added_days_ago(full_name: &str, days: i64) -> repo::Model {
        let mut repo = Self::create(full_name);
        repo.added_at = now() - Duration::days(days);
        repo
    }

    /// Create an archived repo
    pub fn archived(full_name: &str) -> repo::Model {
        let mut repo = Self::create(full_name);
        repo.archived = true;
        repo
    }

    /// Create a repo with a specific star count
    pub fn with_stars(full_name: &str, stars: i32) -> repo::Model {
        let mut repo = Self::create(full_name);
        repo.stars = stars;
        repo
    }
}

/// Factory for creating test projects
pub struct ProjectFactory;

impl ProjectFactory {
    /// Create a project hosted by `repo`
    pub fn create(repo: &repo::Model, slug: &str) -> project::Model {
        project::Model {
            id: Uuid::new_v4().to_string(),
            name: slug.to_string(),
            slug: slug.to_string(),
            description: None,
            status: None,
            logo: None,
            repo_id: repo.id.clone(),
            created_at: now(),
        }
    }

    /// Create a project with an explicit status
    pub fn with_status(repo: &repo::Model, slug: &str, status: &str) -> project::Model {
        let mut project = Self::create(repo, slug);
        project.status = Some(status.to_string());
        project
    }
}

/// Factory for creating test tags
pub struct TagFactory;

impl TagFactory {
    /// Create a tag whose name is derived from its code
    pub fn create(code: &str) -> tag::Model {
        tag::Model {
            id: Uuid::new_v4().to_string(),
            code: code.to_string(),
            name: format!("{} tools", code),
            description: None,
            created_at: date(2023, 6, 1),
        }
    }
}
