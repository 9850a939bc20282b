use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Tag database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "tags")]
pub struct Model {
    /// Tag ID
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Stable code referenced by exported projects (unique)
    #[sea_orm(unique)]
    pub code: String,

    /// Display name
    pub name: String,

    pub description: Option<String>,

    /// Creation timestamp
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::project_tag::Entity")]
    ProjectTags,
}

impl Related<super::project_tag::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProjectTags.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
