use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Repos::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Repos::Id)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Repos::FullName)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Repos::OwnerId).string_len(64).not_null())
                    .col(ColumnDef::new(Repos::Description).text().null())
                    .col(
                        ColumnDef::new(Repos::Stars)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Repos::ContributorCount).integer().null())
                    .col(
                        ColumnDef::new(Repos::Archived)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Repos::AddedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Repos::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Repos::LastCommit)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Identifier listing orders by recency
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_repos_added_at")
                    .table(Repos::Table)
                    .col(Repos::AddedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Repos::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(super) enum Repos {
    Table,
    Id,
    FullName,
    OwnerId,
    Description,
    Stars,
    ContributorCount,
    Archived,
    AddedAt,
    CreatedAt,
    LastCommit,
}
