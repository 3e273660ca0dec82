//! Migration to create branches table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Branches::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Branches::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Branches::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Branches::Address).string_len(200).not_null())
                    .col(ColumnDef::new(Branches::City).string_len(80).not_null())
                    .col(ColumnDef::new(Branches::State).string_len(2).not_null())
                    .col(ColumnDef::new(Branches::PostalCode).string_len(9).null())
                    .col(
                        ColumnDef::new(Branches::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Branches::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_branches_city")
                    .table(Branches::Table)
                    .col(Branches::City)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_branches_state")
                    .table(Branches::Table)
                    .col(Branches::State)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Branches::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub(super) enum Branches {
    Table,
    Id,
    Name,
    Address,
    City,
    State,
    PostalCode,
    CreatedAt,
    UpdatedAt,
}
