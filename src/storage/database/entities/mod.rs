/// Project entity module
pub mod project;
/// Project to tag link entity module
pub mod project_tag;
/// Repository entity module
pub mod repo;
/// Tag entity module
pub mod tag;

pub use project::Entity as Project;
pub use project_tag::Entity as ProjectTag;
pub use repo::Entity as Repo;
pub use tag::Entity as Tag;
