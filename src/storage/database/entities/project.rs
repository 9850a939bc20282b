use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Project database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    /// Project ID
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Display name
    pub name: String,

    /// URL slug (unique)
    #[sea_orm(unique)]
    pub slug: String,

    /// Short description, falling back to the repo's
    pub description: Option<String>,

    /// `active`, `promoted`, `deprecated`...
    pub status: Option<String>,

    /// Logo URL
    pub logo: Option<String>,

    /// Owning repo
    pub repo_id: String,

    /// Creation timestamp
    pub created_at: DateTimeWithTimeZone,
}

/// Project entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::repo::Entity",
        from = "Column::RepoId",
        to = "super::repo::Column::Id",
        on_delete = "Cascade"
    )]
    Repo,
}

impl Related<super::repo::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Repo.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
