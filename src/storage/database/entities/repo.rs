use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Repository database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "repos")]
pub struct Model {
    /// Repo ID
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// `owner/name` on the hosting service (unique)
    #[sea_orm(unique)]
    pub full_name: String,

    /// Owner account ID
    pub owner_id: String,

    /// Repository description
    pub description: Option<String>,

    /// Star count at the last refresh
    pub stars: i32,

    /// Number of contributors, when known
    pub contributor_count: Option<i32>,

    /// Archived on the hosting service
    pub archived: bool,

    /// When the repo was added to the catalog
    pub added_at: DateTimeWithTimeZone,

    /// When the repo was created on the hosting service
    pub created_at: DateTimeWithTimeZone,

    /// Date of the last commit
    pub last_commit: Option<DateTimeWithTimeZone>,
}

/// Repository entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Projects hosted by this repo
    #[sea_orm(has_many = "super::project::Entity")]
    Projects,
}

impl Related<super::project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Projects.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
